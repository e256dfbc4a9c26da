//! Style document source

use std::path::Path;

/// A style document's bytes together with the name its stylesheet is published under
#[derive(Clone, Debug)]
pub struct Input<'a> {
    source: &'a [u8],
    name: Option<&'a str>,
}

impl<'a> Input<'a> {
    /// Create from byte slice
    pub const fn from_bytes(source: &'a [u8]) -> Self {
        Self { source, name: None }
    }

    /// Create from string
    pub const fn from_str(source: &'a str) -> Self {
        Self {
            source: source.as_bytes(),
            name: None,
        }
    }

    /// Set the outer selector name
    pub const fn with_name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    /// Get source bytes
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.source
    }

    /// Outer selector name, if one was given
    pub const fn name(&self) -> Option<&'a str> {
        self.name
    }

    /// Get length in bytes
    pub const fn len(&self) -> usize {
        self.source.len()
    }

    /// Check if empty
    pub const fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(s: &'a str) -> Self {
        Self::from_str(s)
    }
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(b: &'a [u8]) -> Self {
        Self::from_bytes(b)
    }
}

/// Derive a stylesheet name from a style file path: `qml/roads.qml` becomes `roads`
pub fn document_name(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|stem| stem.to_str())
}
