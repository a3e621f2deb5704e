//! Node types emitted by the tokenizer

use indexmap::IndexMap;

use crate::error::Span;

/// Attributes of one tag, keys already carrying the attribute prefix
pub type Attributes = IndexMap<String, String>;

/// Lexical unit of a markup document
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// `<name ...>`, children follow until the matching close
    ContainerOpen { name: String, attributes: Attributes },
    /// `<name .../>`
    Primitive { name: String, attributes: Attributes },
    /// `</...>`
    ContainerClose,
    /// Trimmed, non-empty character data between tags
    Text { content: String },
    /// `<!...>` or `<?...?>`
    Comment,
}

impl NodeKind {
    /// Get node name for diagnostics
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ContainerOpen { .. } => "open tag",
            Self::Primitive { .. } => "self-closing tag",
            Self::ContainerClose => "close tag",
            Self::Text { .. } => "text",
            Self::Comment => "comment",
        }
    }
}

/// Node with source location
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    pub const fn new(kind: NodeKind, span: Span) -> Self {
        Self { kind, span }
    }
}
