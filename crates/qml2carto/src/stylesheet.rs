//! CartoCSS output model and its text form

use std::fmt;

/// Indentation of a selector block inside the outer block
const BLOCK_INDENT: &str = "  ";
/// Indentation of a declaration, whether scoped by a selector or not
const DECLARATION_INDENT: &str = "    ";

/// One `property: value;` line
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Declaration {
    pub property: &'static str,
    pub value: String,
}

impl Declaration {
    pub fn new(property: &'static str, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {};", self.property, self.value)
    }
}

/// Attribute filter `[attr="value"]`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Selector {
    pub attr: String,
    pub value: String,
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}=\"", self.attr)?;
        for ch in self.value.chars() {
            if matches!(ch, '"' | '\\') {
                f.write_str("\\")?;
            }
            write!(f, "{ch}")?;
        }
        f.write_str("\"]")
    }
}

/// Declarations scoped by a selector
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Block {
    pub selector: Selector,
    pub declarations: Vec<Declaration>,
}

/// Contents of the outer block
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "items", rename_all = "snake_case"))]
pub enum Body {
    Empty,
    Scoped(Vec<Block>),
    Unscoped(Vec<Declaration>),
}

/// A translated stylesheet: `.name { ... }`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Stylesheet {
    pub name: String,
    pub body: Body,
    /// Comment lines placed at the top of the outer block
    pub annotations: Vec<String>,
}

impl Stylesheet {
    pub fn new(name: impl Into<String>, body: Body) -> Self {
        Self {
            name: name.into(),
            body,
            annotations: Vec::new(),
        }
    }

    /// Number of selector blocks, zero for unscoped or empty bodies
    pub fn block_count(&self) -> usize {
        match &self.body {
            Body::Scoped(blocks) => blocks.len(),
            Body::Empty | Body::Unscoped(_) => 0,
        }
    }

    /// The stylesheet as text lines, without line terminators
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!(".{} {{", self.name)];
        for note in &self.annotations {
            lines.push(format!("{BLOCK_INDENT}/* XXX: {} */", note.replace("*/", "* /")));
        }
        match &self.body {
            Body::Empty => {}
            Body::Scoped(blocks) => {
                for block in blocks {
                    lines.push(format!("{BLOCK_INDENT}{} {{", block.selector));
                    push_declarations(&mut lines, &block.declarations);
                    lines.push(format!("{BLOCK_INDENT}}}"));
                }
            }
            Body::Unscoped(declarations) => push_declarations(&mut lines, declarations),
        }
        lines.push("}".to_string());
        lines
    }
}

fn push_declarations(lines: &mut Vec<String>, declarations: &[Declaration]) {
    lines.extend(
        declarations
            .iter()
            .map(|decl| format!("{DECLARATION_INDENT}{decl}")),
    );
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
