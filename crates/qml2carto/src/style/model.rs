//! Renderer, category, symbol and layer records

use std::fmt;

/// Symbol type, taken from the `type` attribute of a `<symbol>`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SymbolKind {
    Fill,
    Line,
    Marker,
}

impl SymbolKind {
    pub fn from_type(type_name: &str) -> Option<Self> {
        match type_name {
            "fill" => Some(Self::Fill),
            "line" => Some(Self::Line),
            "marker" => Some(Self::Marker),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Line => "line",
            Self::Marker => "marker",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `<renderer-v2>` rule set
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Renderer<'a> {
    /// One symbol per value of `attr`
    Categorized {
        attr: &'a str,
        categories: Vec<Category<'a>>,
    },
    /// Every feature drawn with the document's one symbol
    Single,
    /// Any renderer type this crate does not translate
    Unknown { type_name: &'a str },
}

impl Renderer<'_> {
    pub fn type_name(&self) -> &str {
        match self {
            Self::Categorized { .. } => "categorizedSymbol",
            Self::Single => "singleSymbol",
            Self::Unknown { type_name } => *type_name,
        }
    }
}

/// A `<category>` of a categorized renderer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Category<'a> {
    /// Name of the `<symbol>` drawn for this category
    pub symbol_name: &'a str,
    /// Value the discriminating attribute must equal
    pub value: &'a str,
}

/// A single `<prop k="..." v="..."/>` record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Property<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Property records of a symbol layer, in document order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layer<'a> {
    properties: Vec<Property<'a>>,
}

impl<'a> Layer<'a> {
    pub const fn new(properties: Vec<Property<'a>>) -> Self {
        Self { properties }
    }

    /// Value of the first record with exactly this key.
    ///
    /// Duplicate keys are legal; later records are never consulted.
    pub fn resolve(&self, key: &str) -> Option<&'a str> {
        self.properties
            .iter()
            .find(|prop| prop.key == key)
            .map(|prop| prop.value)
    }

    pub fn properties(&self) -> &[Property<'a>] {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<'a> FromIterator<Property<'a>> for Layer<'a> {
    fn from_iter<I: IntoIterator<Item = Property<'a>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A named `<symbol>` reduced to its first layer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol<'a> {
    pub name: &'a str,
    pub kind: SymbolKind,
    pub layer: Layer<'a>,
    /// Number of `<layer>` children the symbol declares
    pub layer_count: usize,
}
