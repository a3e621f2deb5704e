//! Lexer module: scans markup text into a flat sequence of nodes

pub mod cursor;
pub mod node;
pub mod tokenizer;

pub use cursor::Cursor;
pub use node::{Attributes, Node, NodeKind};
pub use tokenizer::{tokenize, Tokenizer};
