//! Error types for qml2carto

use std::fmt;
use thiserror::Error;

use crate::style::SymbolKind;

/// Position in the source document
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Span representing a range in the source document
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub const fn at(pos: Pos) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub const fn empty() -> Self {
        Self {
            start: Pos::new(0, 0, 0),
            end: Pos::new(0, 0, 0),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.start.line == 0 && self.end.line == 0
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    // XML syntax
    UnexpectedToken { expected: String, found: String },
    UnexpectedEof,
    MismatchedTag { open: String, close: String },
    DuplicateAttribute { name: String },
    InvalidEntity { entity: String },
    InvalidUtf8,
    MaxDepthExceeded { max: u16 },
    MaxSizeExceeded { max: usize },

    /// The document does not have the shape a layer style must have
    Structural { reason: String },

    // Translation
    MissingProperty {
        key: String,
        kind: SymbolKind,
        symbol: String,
    },
    SymbolNotFound { name: String, value: String },
    AmbiguousSymbol { name: String, count: usize },
    Format {
        key: String,
        raw: Option<String>,
        symbol: String,
    },
}

impl ErrorKind {
    /// Whether the error comes from reading the XML itself rather than from its contents
    pub const fn is_syntax(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedToken { .. }
                | Self::UnexpectedEof
                | Self::MismatchedTag { .. }
                | Self::DuplicateAttribute { .. }
                | Self::InvalidEntity { .. }
                | Self::InvalidUtf8
                | Self::MaxDepthExceeded { .. }
                | Self::MaxSizeExceeded { .. }
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::UnexpectedEof => write!(f, "unexpected end of input"),
            Self::MismatchedTag { open, close } => {
                write!(f, "closing tag </{close}> does not match <{open}>")
            }
            Self::DuplicateAttribute { name } => write!(f, "duplicate attribute: {name}"),
            Self::InvalidEntity { entity } => write!(f, "invalid xml entity: &{entity};"),
            Self::InvalidUtf8 => write!(f, "invalid utf-8"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
            Self::Structural { reason } => write!(f, "malformed style document: {reason}"),
            Self::MissingProperty { key, kind, symbol } => {
                write!(
                    f,
                    "{kind} symbol \"{symbol}\" is missing required property \"{key}\""
                )
            }
            Self::SymbolNotFound { name, value } => {
                write!(f, "category \"{value}\" references unknown symbol \"{name}\"")
            }
            Self::AmbiguousSymbol { name, count } => {
                write!(f, "symbol name \"{name}\" matches {count} symbols")
            }
            Self::Format { key, raw, symbol } => match raw {
                Some(raw) => write!(
                    f,
                    "symbol \"{symbol}\": property \"{key}\" is not a number: {raw:?}"
                ),
                None => write!(f, "symbol \"{symbol}\": property \"{key}\" is missing"),
            },
        }
    }
}

/// Main error type for qml2carto
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
    context: Option<String>,
}

impl Error {
    pub const fn new(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            context: None,
        }
    }

    /// Error without a source position, raised while walking the parsed tree
    pub const fn detached(kind: ErrorKind) -> Self {
        Self::new(kind, Span::empty())
    }

    pub fn structural(reason: impl Into<String>) -> Self {
        Self::detached(ErrorKind::Structural {
            reason: reason.into(),
        })
    }

    /// Create error at specific position
    pub const fn at(kind: ErrorKind, pos: Pos) -> Self {
        Self::new(kind, Span::at(pos))
    }

    /// Attach the category (or other enclosing item) being translated
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub const fn span(&self) -> Span {
        self.span
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.span.is_empty() {
            write!(f, "error at {}: ", self.span.start)?;
        }
        write!(f, "{}", self.kind)?;
        if let Some(context) = &self.context {
            write!(f, " (in {context})")?;
        }
        Ok(())
    }
}

/// Result type alias for qml2carto
pub type Result<T> = std::result::Result<T, Error>;
