//! qml2carto - QGIS layer style to CartoCSS translation
//!
//! Reads the `renderer-v2` section of a QGIS `.qml` style (categorized or
//! single-symbol renderers of fill, line and marker symbols) and writes the
//! equivalent CartoCSS.
//!
//! # Quick Start
//!
//! ```
//! use qml2carto::translate_str;
//! # fn main() -> Result<(), qml2carto::Error> {
//! let qml = r#"<qgis><renderer-v2 type="singleSymbol"><symbols>
//!   <symbol name="0" type="marker"><layer class="SimpleMarker">
//!     <prop k="color" v="255,0,0,255"/>
//!     <prop k="color_border" v="0,0,0,255"/>
//!     <prop k="size" v="1.4"/>
//!   </layer></symbol>
//! </symbols></renderer-v2></qgis>"#;
//!
//! let translation = translate_str(qml, "basename")?;
//! assert_eq!(
//!     translation.text(),
//!     ".basename {\n    marker-fill: rgba(255,0,0,255);\n    marker-line-color: rgba(0,0,0,255);\n    marker-width: 7.0;\n}\n"
//! );
//! assert!(translation.diagnostics.is_empty());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result, Span};

pub mod input;
pub use input::{document_name, Input};

pub mod xml;
pub use xml::{Document as XmlDocument, Element as XmlElement, Parser as XmlParser};

pub mod style;
pub use style::{Category, Layer, Renderer, StyleDocument, Symbol, SymbolKind};

pub mod diagnostic;
pub use diagnostic::Diagnostic;

pub mod stylesheet;
pub use stylesheet::{Block, Body, Declaration, Selector, Stylesheet};

pub mod translate;
pub use translate::{
    translate, translate_document, translate_input, translate_str, Options, SymbolLookup,
    Translation,
};

/// Parse XML from string
pub fn from_xml_str(s: &str) -> Result<XmlDocument> {
    XmlParser::new(s.as_bytes()).parse()
}
