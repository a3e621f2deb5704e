//! xmldict - XML/SVG markup to nested objects
//!
//! Elements become objects keyed by element name, attributes become prefixed
//! string entries, text content lands under a reserved key, and sibling
//! elements sharing a name collapse into an array.
//!
//! # Quick Start
//!
//! ```
//! use xmldict::parse;
//! # fn main() -> Result<(), xmldict::Error> {
//! let value = parse(r#"<p width="10">Hello World</p>"#)?;
//! let text = value
//!     .get("p")
//!     .and_then(|p| p.get("#text"))
//!     .and_then(|t| t.as_string())
//!     .unwrap_or_default();
//! assert_eq!(text, "Hello World");
//! # Ok(())
//! # }
//! ```
//!
//! Parsing runs in two phases: [`tokenize`] scans the text into a flat list of
//! [`Node`]s, then [`build`] folds them into the tree.

#![forbid(unsafe_code)]

use tracing::{debug, instrument};

pub mod builder;
pub mod config;
pub mod error;
pub mod lexer;
pub mod value;

pub use builder::{build, Builder};
pub use config::{Config, TextMode};
pub use error::{Error, ErrorKind, Pos, Result, Span};
pub use lexer::{tokenize, Node, NodeKind, Tokenizer};
pub use value::{Array, Object, Value};

/// Parse a document with the default configuration
pub fn parse(document: &str) -> Result<Value> {
    parse_with_config(document, &Config::default())
}

/// Parse a document with a custom configuration
#[instrument(skip_all, fields(len = document.len()))]
pub fn parse_with_config(document: &str, config: &Config) -> Result<Value> {
    if config.max_size > 0 && document.len() > config.max_size {
        return Err(Error::new(
            ErrorKind::MaxSizeExceeded {
                max: config.max_size,
            },
            Span::empty(),
        ));
    }

    let nodes = tokenize(document, config)?;
    debug!(nodes = nodes.len(), "tokenized document");

    let root = build(nodes, config)?;
    Ok(Value::Object(root))
}
