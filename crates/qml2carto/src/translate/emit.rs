//! Symbol emitter: one symbol's layer properties to ordered declarations

use tracing::warn;

use crate::diagnostic::Diagnostic;
use crate::error::{Error, ErrorKind, Result};
use crate::style::{Symbol, SymbolKind};
use crate::stylesheet::Declaration;
use crate::translate::values::{
    format_color, format_dash_pattern, format_number, scale_marker_size, SOLID_DASH_PATTERN,
    UNMAPPED_DASH_PATTERN,
};

/// Declarations for `symbol`, in the fixed order of its kind
///
/// | kind   | declarations                                          |
/// |--------|-------------------------------------------------------|
/// | fill   | `polygon-fill`, `line-color`, `line-width`?           |
/// | line   | `line-color`, `line-width`?, `line-dasharray`?        |
/// | marker | `marker-fill`, `marker-line-color`, `marker-width`    |
///
/// Non-fatal findings are appended to `diagnostics`.
pub fn emit_symbol(
    symbol: &Symbol<'_>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<Declaration>> {
    if symbol.layer_count > 1 {
        record(
            diagnostics,
            Diagnostic::ExtraLayers {
                symbol: symbol.name.to_string(),
                count: symbol.layer_count,
            },
        );
    }

    let mut out = Vec::with_capacity(3);
    match symbol.kind {
        SymbolKind::Fill => {
            out.push(Declaration::new(
                "polygon-fill",
                format_color(require(symbol, "color")?),
            ));
            out.push(Declaration::new(
                "line-color",
                format_color(require(symbol, "color_border")?),
            ));
            if let Some(width) = optional(symbol, "width-border") {
                out.push(Declaration::new("line-width", width));
            }
        }
        SymbolKind::Line => {
            out.push(Declaration::new(
                "line-color",
                format_color(require(symbol, "color")?),
            ));
            if let Some(width) = optional(symbol, "width") {
                out.push(Declaration::new("line-width", width));
            }

            let penstyle = symbol.layer.resolve("penstyle");
            let dasharray = format_dash_pattern(penstyle);
            if dasharray == UNMAPPED_DASH_PATTERN {
                record(
                    diagnostics,
                    Diagnostic::UnmappedDashPattern {
                        symbol: symbol.name.to_string(),
                        raw: penstyle.map(str::to_string),
                    },
                );
            }
            if dasharray != SOLID_DASH_PATTERN {
                out.push(Declaration::new("line-dasharray", dasharray));
            }
        }
        SymbolKind::Marker => {
            out.push(Declaration::new(
                "marker-fill",
                format_color(require(symbol, "color")?),
            ));
            out.push(Declaration::new(
                "marker-line-color",
                format_color(require(symbol, "color_border")?),
            ));
            let size = require(symbol, "size")?;
            let width = scale_marker_size(size).ok_or_else(|| {
                Error::detached(ErrorKind::Format {
                    key: "size".to_string(),
                    raw: Some(size.to_string()),
                    symbol: symbol.name.to_string(),
                })
            })?;
            out.push(Declaration::new("marker-width", format_number(width)));
        }
    }
    Ok(out)
}

fn require<'a>(symbol: &Symbol<'a>, key: &str) -> Result<&'a str> {
    symbol.layer.resolve(key).ok_or_else(|| {
        Error::detached(ErrorKind::MissingProperty {
            key: key.to_string(),
            kind: symbol.kind,
            symbol: symbol.name.to_string(),
        })
    })
}

/// Optional keys with an empty value count as absent
fn optional<'a>(symbol: &Symbol<'a>, key: &str) -> Option<&'a str> {
    symbol.layer.resolve(key).filter(|value| !value.is_empty())
}

pub(crate) fn record(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    warn!("{diagnostic}");
    diagnostics.push(diagnostic);
}
