//! Renderer dispatch and the categorized / single-symbol strategies

pub mod emit;
pub mod values;

pub use emit::emit_symbol;

use tracing::{debug, instrument};

use crate::diagnostic::Diagnostic;
use crate::error::{Error, ErrorKind, Result};
use crate::input::Input;
use crate::style::document::read_symbol;
use crate::style::{Category, Renderer, StyleDocument};
use crate::stylesheet::{Block, Body, Declaration, Selector, Stylesheet};
use crate::xml::{self, Document};
use emit::record;

/// How a category's symbol name is resolved when several symbols share it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SymbolLookup {
    /// Use the first symbol in document order and record a diagnostic
    #[default]
    FirstMatch,
    /// Refuse to translate an ambiguous name
    Strict,
}

/// Translation settings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub symbol_lookup: SymbolLookup,
    /// Also write each diagnostic as a comment inside the stylesheet
    pub annotate: bool,
    /// Limits applied while reading the XML
    pub xml: xml::Config,
}

/// Result of translating one style document
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Translation {
    pub stylesheet: Stylesheet,
    pub diagnostics: Vec<Diagnostic>,
}

impl Translation {
    /// The stylesheet text
    pub fn text(&self) -> String {
        self.stylesheet.to_string()
    }
}

/// Translate a loaded style into a stylesheet named `name`
#[instrument(skip(style, options), fields(renderer = style.renderer().type_name()))]
pub fn translate(style: &StyleDocument<'_>, name: &str, options: &Options) -> Result<Translation> {
    let mut diagnostics = Vec::new();

    let body = match style.renderer() {
        Renderer::Categorized { attr, categories } => Body::Scoped(translate_categorized(
            style,
            attr,
            categories,
            options,
            &mut diagnostics,
        )?),
        Renderer::Single => Body::Unscoped(translate_single(style, &mut diagnostics)?),
        Renderer::Unknown { type_name } => {
            record(
                &mut diagnostics,
                Diagnostic::UnknownRendererType {
                    type_name: (*type_name).to_string(),
                },
            );
            Body::Empty
        }
    };

    let mut stylesheet = Stylesheet::new(name, body);
    if options.annotate {
        stylesheet.annotations = diagnostics.iter().map(ToString::to_string).collect();
    }

    Ok(Translation {
        stylesheet,
        diagnostics,
    })
}

/// Translate a parsed XML document
pub fn translate_document(document: &Document, name: &str, options: &Options) -> Result<Translation> {
    let style = StyleDocument::from_xml(document)?;
    translate(&style, name, options)
}

/// Parse and translate `input`, named by [`Input::with_name`] (`layer` when unnamed)
pub fn translate_input(input: Input<'_>, options: &Options) -> Result<Translation> {
    let document = xml::Parser::with_config(input.as_bytes(), options.xml).parse()?;
    translate_document(&document, input.name().unwrap_or("layer"), options)
}

/// Parse and translate `xml` with default options
pub fn translate_str(xml: &str, name: &str) -> Result<Translation> {
    translate_input(Input::from_str(xml).with_name(name), &Options::default())
}

/// One selector block per category, in category order
fn translate_categorized(
    style: &StyleDocument<'_>,
    attr: &str,
    categories: &[Category<'_>],
    options: &Options,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<Block>> {
    let mut blocks = Vec::with_capacity(categories.len());

    for category in categories {
        let context = || format!("category \"{}\"", category.value);
        let candidates = style.symbols_named(category.symbol_name);
        let element = match candidates {
            [] => {
                return Err(Error::detached(ErrorKind::SymbolNotFound {
                    name: category.symbol_name.to_string(),
                    value: category.value.to_string(),
                }))
            }
            [only] => only,
            [first, ..] => match options.symbol_lookup {
                SymbolLookup::FirstMatch => {
                    record(
                        diagnostics,
                        Diagnostic::AmbiguousSymbolName {
                            name: category.symbol_name.to_string(),
                            candidates: candidates.len(),
                        },
                    );
                    first
                }
                SymbolLookup::Strict => {
                    return Err(Error::detached(ErrorKind::AmbiguousSymbol {
                        name: category.symbol_name.to_string(),
                        count: candidates.len(),
                    })
                    .with_context(context()))
                }
            },
        };

        let symbol = read_symbol(element).map_err(|err| err.with_context(context()))?;
        let declarations =
            emit_symbol(&symbol, diagnostics).map_err(|err| err.with_context(context()))?;
        debug!(
            value = category.value,
            symbol = symbol.name,
            declarations = declarations.len(),
            "emitted category block"
        );

        blocks.push(Block {
            selector: Selector {
                attr: attr.to_string(),
                value: category.value.to_string(),
            },
            declarations,
        });
    }

    Ok(blocks)
}

fn translate_single(
    style: &StyleDocument<'_>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<Declaration>> {
    let symbol = read_symbol(style.first_symbol()?)?;
    let declarations = emit_symbol(&symbol, diagnostics)?;
    debug!(
        symbol = symbol.name,
        declarations = declarations.len(),
        "emitted single symbol"
    );
    Ok(declarations)
}
