//! Tree builder
//!
//! Folds the tokenizer's nodes into one root [`Object`]. Open elements live on
//! an explicit stack; an element is attached to its parent when it closes, so
//! nesting depth never touches the call stack.

use tracing::{debug, warn};

use crate::config::{Config, TextMode};
use crate::error::{Error, ErrorKind, Result, Span};
use crate::lexer::{Attributes, Node, NodeKind};
use crate::value::{Object, Value};

/// Build a tree from a complete node sequence
pub fn build(nodes: impl IntoIterator<Item = Node>, config: &Config) -> Result<Object> {
    let mut builder = Builder::new(config);
    for node in nodes {
        builder.push(node)?;
    }
    builder.finish()
}

/// An element whose close tag has not been seen yet
#[derive(Debug)]
struct Frame {
    name: String,
    object: Object,
    span: Span,
}

/// Incremental tree builder
#[derive(Debug)]
pub struct Builder<'a> {
    config: &'a Config,
    root: Object,
    stack: Vec<Frame>,
}

impl<'a> Builder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            root: Object::new(),
            stack: Vec::new(),
        }
    }

    /// Number of currently open elements
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Consume one node
    pub fn push(&mut self, node: Node) -> Result<()> {
        match node.kind {
            NodeKind::Text { content } => {
                self.add_text(content);
                Ok(())
            }
            NodeKind::Primitive { name, attributes } => {
                self.current().append(name, element(attributes).into());
                Ok(())
            }
            NodeKind::ContainerOpen { name, attributes } => {
                self.open(name, attributes, node.span)
            }
            NodeKind::ContainerClose => self.close(node.span),
            NodeKind::Comment => Ok(()),
        }
    }

    /// Return the root, handling elements that were never closed
    pub fn finish(mut self) -> Result<Object> {
        if let Some(innermost) = self.stack.last() {
            let open = self.stack.len();
            if self.config.strict {
                return Err(Error::with_message(
                    ErrorKind::UnclosedContainer { open },
                    innermost.span,
                    format!("element <{}> is never closed", innermost.name),
                ));
            }
            warn!(open, "closing elements left open at end of input");
            while let Some(frame) = self.stack.pop() {
                self.current().append(frame.name, frame.object.into());
            }
        }
        debug!(keys = self.root.len(), "tree built");
        Ok(self.root)
    }

    fn current(&mut self) -> &mut Object {
        match self.stack.last_mut() {
            Some(frame) => &mut frame.object,
            None => &mut self.root,
        }
    }

    fn add_text(&mut self, content: String) {
        let mode = self.config.text_mode;
        let key = self.config.text_key.clone();
        let target = self.current();
        if mode == TextMode::Concat {
            if let Some(Value::String(existing)) = target.get_mut(&key) {
                existing.push_str(&content);
                return;
            }
        }
        target.insert(key, content);
    }

    fn open(&mut self, name: String, attributes: Attributes, span: Span) -> Result<()> {
        let max = self.config.max_depth;
        if max > 0 && self.stack.len() >= usize::from(max) {
            return Err(Error::new(ErrorKind::MaxDepthExceeded { max }, span));
        }
        self.stack.push(Frame {
            name,
            object: element(attributes),
            span,
        });
        Ok(())
    }

    fn close(&mut self, span: Span) -> Result<()> {
        let Some(frame) = self.stack.pop() else {
            return Err(Error::new(ErrorKind::UnmatchedCloseTag, span));
        };
        self.current().append(frame.name, frame.object.into());
        Ok(())
    }
}

/// Fresh element object seeded with its (already prefixed) attributes
fn element(attributes: Attributes) -> Object {
    attributes
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}
