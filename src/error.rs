//! Error types for xmldict

use std::fmt;
use thiserror::Error;

/// Position in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.offset, self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Span representing a range in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub const fn empty() -> Self {
        Self {
            start: Pos::new(0, 0, 0),
            end: Pos::new(0, 0, 0),
        }
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A `<...>` construct that never reaches its `>`, or has no usable name
    MalformedTag,
    /// Attribute text that cannot be split into `key="value"` pairs
    MalformedAttribute,
    /// `</...>` with no open element left to close
    UnmatchedCloseTag,
    /// Elements still open at end of input (strict mode)
    UnclosedContainer { open: usize },
    MaxDepthExceeded { max: u16 },
    MaxSizeExceeded { max: usize },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTag => write!(f, "malformed tag"),
            Self::MalformedAttribute => write!(f, "malformed attribute"),
            Self::UnmatchedCloseTag => write!(f, "unmatched close tag"),
            Self::UnclosedContainer { open } => {
                write!(f, "{open} element(s) left open at end of input")
            }
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
        }
    }
}

/// Main error type for xmldict
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            span,
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error at {}: {}", self.span.start, self.message)
    }
}

/// Result type alias for xmldict
pub type Result<T> = std::result::Result<T, Error>;
