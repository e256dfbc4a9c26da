//! Non-fatal findings recorded alongside a translation

use std::fmt;

/// Something the translator could not express faithfully but worked around
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Diagnostic {
    /// Renderer type other than `categorizedSymbol` or `singleSymbol`; no blocks were emitted
    UnknownRendererType { type_name: String },
    /// Pen style with no dash-array equivalent; the sentinel value was written instead
    UnmappedDashPattern { symbol: String, raw: Option<String> },
    /// Several symbols share a name referenced by a category; the first was used
    AmbiguousSymbolName { name: String, candidates: usize },
    /// Symbol with more than one layer; only the first was translated
    ExtraLayers { symbol: String, count: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRendererType { type_name } => write!(f, "unknown type \"{type_name}\""),
            Self::UnmappedDashPattern { symbol, raw } => match raw {
                Some(raw) => write!(f, "symbol \"{symbol}\": unmapped pen style \"{raw}\""),
                None => write!(f, "symbol \"{symbol}\": no pen style"),
            },
            Self::AmbiguousSymbolName { name, candidates } => write!(
                f,
                "symbol name \"{name}\" matches {candidates} symbols, using the first"
            ),
            Self::ExtraLayers { symbol, count } => write!(
                f,
                "symbol \"{symbol}\" has {count} layers, only the first is translated"
            ),
        }
    }
}
