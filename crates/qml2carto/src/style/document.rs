//! Building the typed view over a parsed `.qml` document

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::style::model::{Category, Layer, Property, Renderer, Symbol, SymbolKind};
use crate::xml::{Document, Element};

const RENDERER: &str = "renderer-v2";

/// Read-only view of one style document
///
/// Holds the single renderer and an index from symbol name to the `<symbol>`
/// elements carrying that name, in document order.
#[derive(Clone, Debug)]
pub struct StyleDocument<'a> {
    document: &'a Document,
    renderer: Renderer<'a>,
    symbols: IndexMap<&'a str, Vec<&'a Element>>,
}

impl<'a> StyleDocument<'a> {
    /// Check the document's shape and index its symbols
    pub fn from_xml(document: &'a Document) -> Result<Self> {
        let mut renderers = document.elements_named(RENDERER);
        let element = renderers
            .next()
            .ok_or_else(|| Error::structural(format!("no <{RENDERER}> element")))?;
        let extra = renderers.count();
        if extra > 0 {
            return Err(Error::structural(format!(
                "expected one <{RENDERER}> element, found {}",
                extra + 1
            )));
        }

        let renderer = parse_renderer(element)?;

        let mut symbols: IndexMap<&'a str, Vec<&'a Element>> = IndexMap::new();
        for symbol in nested_within(element, "symbols", "symbol") {
            if let Some(name) = symbol.attr("name") {
                symbols.entry(name).or_default().push(symbol);
            }
        }

        debug!(
            renderer = renderer.type_name(),
            symbols = symbols.len(),
            "loaded style document"
        );

        Ok(Self {
            document,
            renderer,
            symbols,
        })
    }

    pub const fn renderer(&self) -> &Renderer<'a> {
        &self.renderer
    }

    /// Every renderer symbol carrying `name`, in document order
    pub fn symbols_named(&self, name: &str) -> &[&'a Element] {
        self.symbols.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of all renderer symbols, in document order
    pub fn symbol_names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.symbols.keys().copied()
    }

    /// First `<symbol>` anywhere in the document
    pub fn first_symbol(&self) -> Result<&'a Element> {
        self.document
            .elements_named("symbol")
            .next()
            .ok_or_else(|| Error::structural("document has no <symbol> element"))
    }
}

/// Turn a `<symbol>` element into its typed form
pub fn read_symbol(element: &Element) -> Result<Symbol<'_>> {
    let name = element.attr("name").unwrap_or_default();
    let type_name = element
        .attr("type")
        .ok_or_else(|| Error::structural(format!("symbol \"{name}\" has no type")))?;
    let kind = SymbolKind::from_type(type_name).ok_or_else(|| {
        Error::structural(format!(
            "symbol \"{name}\" has unsupported type \"{type_name}\""
        ))
    })?;

    let layer = element
        .descendants_named("layer")
        .next()
        .ok_or_else(|| Error::structural(format!("symbol \"{name}\" has no <layer>")))?;
    let layer_count = element
        .child_elements()
        .filter(|child| child.name == "layer")
        .count()
        .max(1);

    Ok(Symbol {
        name,
        kind,
        layer: read_layer(layer),
        layer_count,
    })
}

fn read_layer(element: &Element) -> Layer<'_> {
    element
        .descendants_named("prop")
        .filter_map(|prop| {
            Some(Property {
                key: prop.attr("k")?,
                value: prop.attr("v")?,
            })
        })
        .collect()
}

fn parse_renderer(element: &Element) -> Result<Renderer<'_>> {
    let type_name = element
        .attr("type")
        .ok_or_else(|| Error::structural(format!("<{RENDERER}> has no type")))?;

    match type_name {
        "categorizedSymbol" => {
            let attr = element.attr("attr").ok_or_else(|| {
                Error::structural("categorized renderer does not declare an attr")
            })?;
            let categories = nested_within(element, "categories", "category")
                .into_iter()
                .map(parse_category)
                .collect::<Result<Vec<_>>>()?;
            Ok(Renderer::Categorized { attr, categories })
        }
        "singleSymbol" => Ok(Renderer::Single),
        other => Ok(Renderer::Unknown { type_name: other }),
    }
}

fn parse_category(element: &Element) -> Result<Category<'_>> {
    let value = element
        .attr("value")
        .ok_or_else(|| Error::structural("category without a value"))?;
    let symbol_name = element
        .attr("symbol")
        .ok_or_else(|| Error::structural(format!("category \"{value}\" names no symbol")))?;
    Ok(Category { symbol_name, value })
}

/// `item` elements that sit anywhere below a `container` element below `root`,
/// each reported once, in document order
fn nested_within<'a>(root: &'a Element, container: &str, item: &str) -> Vec<&'a Element> {
    fn walk<'a>(
        element: &'a Element,
        inside: bool,
        container: &str,
        item: &str,
        out: &mut Vec<&'a Element>,
    ) {
        for child in element.child_elements() {
            if inside && child.name == item {
                out.push(child);
            }
            walk(child, inside || child.name == container, container, item, out);
        }
    }

    let mut out = Vec::new();
    walk(root, false, container, item, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::xml::Parser;

    fn ensure_eq<T: PartialEq + std::fmt::Debug>(left: T, right: T) -> Result<()> {
        if left == right {
            Ok(())
        } else {
            Err(Error::structural(format!(
                "assertion failed: left={left:?} right={right:?}"
            )))
        }
    }

    fn parse(xml: &str) -> Result<Document> {
        Parser::new(xml.as_bytes()).parse()
    }

    fn structural_reason(xml: &str) -> Result<String> {
        let doc = parse(xml)?;
        match StyleDocument::from_xml(&doc) {
            Err(err) => match err.kind() {
                ErrorKind::Structural { reason } => Ok(reason.clone()),
                other => Err(Error::structural(format!("unexpected error {other}"))),
            },
            Ok(_) => Err(Error::structural("expected a structural error")),
        }
    }

    const CATEGORIZED: &str = r#"<qgis>
      <renderer-v2 type="categorizedSymbol" attr="highway">
        <categories>
          <category symbol="0" value="primary" label="Primary"/>
          <category symbol="1" value="track" label="Track"/>
        </categories>
        <symbols>
          <symbol name="0" type="line"><layer class="SimpleLine"><prop k="color" v="1,1,1,255"/></layer></symbol>
          <symbol name="1" type="line"><layer class="SimpleLine"><prop k="color" v="2,2,2,255"/></layer></symbol>
          <symbol name="1" type="fill"><layer class="SimpleFill"/></symbol>
        </symbols>
      </renderer-v2>
    </qgis>"#;

    #[test]
    fn test_categorized_renderer() -> Result<()> {
        let doc = parse(CATEGORIZED)?;
        let style = StyleDocument::from_xml(&doc)?;
        match style.renderer() {
            Renderer::Categorized { attr, categories } => {
                ensure_eq(*attr, "highway")?;
                ensure_eq(
                    categories.clone(),
                    vec![
                        Category {
                            symbol_name: "0",
                            value: "primary",
                        },
                        Category {
                            symbol_name: "1",
                            value: "track",
                        },
                    ],
                )
            }
            other => Err(Error::structural(format!("unexpected renderer {other:?}"))),
        }
    }

    #[test]
    fn test_symbol_index_keeps_duplicates_in_order() -> Result<()> {
        let doc = parse(CATEGORIZED)?;
        let style = StyleDocument::from_xml(&doc)?;
        ensure_eq(style.symbols_named("0").len(), 1)?;
        let ones = style.symbols_named("1");
        ensure_eq(ones.len(), 2)?;
        ensure_eq(ones.first().and_then(|el| el.attr("type")), Some("line"))?;
        ensure_eq(style.symbols_named("missing").len(), 0)?;
        ensure_eq(style.symbol_names().collect::<Vec<_>>(), vec!["0", "1"])
    }

    #[test]
    fn test_read_symbol_takes_first_layer() -> Result<()> {
        let doc = parse(
            r#"<symbol name="s" type="fill">
                 <layer><prop k="color" v="1,2,3,4"/><prop k="color" v="5,6,7,8"/></layer>
                 <layer><prop k="color" v="9,9,9,9"/></layer>
               </symbol>"#,
        )?;
        let symbol = read_symbol(&doc.root)?;
        ensure_eq(symbol.name, "s")?;
        ensure_eq(symbol.kind, SymbolKind::Fill)?;
        ensure_eq(symbol.layer_count, 2)?;
        ensure_eq(symbol.layer.resolve("color"), Some("1,2,3,4"))
    }

    #[test]
    fn test_read_symbol_rejects_unsupported_type() -> Result<()> {
        let doc = parse(r#"<symbol name="s" type="raster"><layer/></symbol>"#)?;
        match read_symbol(&doc.root) {
            Err(err) => ensure_eq(
                err.to_string(),
                "malformed style document: symbol \"s\" has unsupported type \"raster\""
                    .to_string(),
            ),
            Ok(symbol) => Err(Error::structural(format!("unexpected {symbol:?}"))),
        }
    }

    #[test]
    fn test_read_symbol_requires_layer() -> Result<()> {
        let doc = parse(r#"<symbol name="s" type="line"/>"#)?;
        ensure_eq(read_symbol(&doc.root).is_err(), true)
    }

    #[test]
    fn test_prop_without_value_is_skipped() -> Result<()> {
        let doc = parse(r#"<symbol name="s" type="line"><layer><prop k="width"/><prop k="width" v="2"/></layer></symbol>"#)?;
        let symbol = read_symbol(&doc.root)?;
        ensure_eq(symbol.layer.resolve("width"), Some("2"))
    }

    #[test]
    fn test_missing_renderer() -> Result<()> {
        ensure_eq(
            structural_reason("<qgis><symbols/></qgis>")?,
            "no <renderer-v2> element".to_string(),
        )
    }

    #[test]
    fn test_multiple_renderers() -> Result<()> {
        ensure_eq(
            structural_reason(
                r#"<qgis><renderer-v2 type="singleSymbol"/><renderer-v2 type="singleSymbol"/></qgis>"#,
            )?,
            "expected one <renderer-v2> element, found 2".to_string(),
        )
    }

    #[test]
    fn test_categorized_without_attr() -> Result<()> {
        ensure_eq(
            structural_reason(r#"<qgis><renderer-v2 type="categorizedSymbol"/></qgis>"#)?,
            "categorized renderer does not declare an attr".to_string(),
        )
    }

    #[test]
    fn test_unknown_renderer_is_not_structural() -> Result<()> {
        let doc = parse(r#"<qgis><renderer-v2 type="graduatedSymbol" attr="x"/></qgis>"#)?;
        let style = StyleDocument::from_xml(&doc)?;
        ensure_eq(
            style.renderer().clone(),
            Renderer::Unknown {
                type_name: "graduatedSymbol",
            },
        )
    }

    #[test]
    fn test_first_symbol_is_document_wide() -> Result<()> {
        let doc = parse(
            r#"<qgis><renderer-v2 type="singleSymbol"><symbols>
                 <symbol name="0" type="marker"><layer/></symbol>
                 <symbol name="1" type="line"><layer/></symbol>
               </symbols></renderer-v2></qgis>"#,
        )?;
        let style = StyleDocument::from_xml(&doc)?;
        ensure_eq(style.first_symbol()?.attr("name"), Some("0"))
    }
}
