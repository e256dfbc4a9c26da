//! Typed, read-only view of a QGIS layer style

pub mod document;
pub mod model;

pub use document::StyleDocument;
pub use model::{Category, Layer, Property, Renderer, Symbol, SymbolKind};
