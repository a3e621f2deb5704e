//! Markup tokenizer
//!
//! Scans text left to right into [`Node`]s. The scanner knows tags, attributes,
//! comments and text runs; it has no idea how elements nest.

use tracing::trace;

use crate::config::Config;
use crate::error::{Error, ErrorKind, Pos, Result, Span};
use crate::lexer::cursor::Cursor;
use crate::lexer::node::{Attributes, Node, NodeKind};

/// Follows `<` in a CDATA section
const CDATA_OPEN: &str = "![CDATA[";
const CDATA_CLOSE: &str = "]]>";

/// Tokenize a whole document
pub fn tokenize(input: &str, config: &Config) -> Result<Vec<Node>> {
    let mut tokenizer = Tokenizer::new(input, config);
    let mut nodes = Vec::new();
    while let Some(node) = tokenizer.next_node()? {
        trace!(
            kind = node.kind.name(),
            line = node.span.start.line,
            col = node.span.start.col,
            "scanned node"
        );
        nodes.push(node);
    }
    Ok(nodes)
}

/// Markup tokenizer
#[derive(Clone, Debug)]
pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    attr_prefix: &'a str,
    cdata_as_text: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer using the prefix and CDATA settings of `config`
    pub fn new(input: &'a str, config: &'a Config) -> Self {
        Self {
            cursor: Cursor::new(input),
            attr_prefix: &config.attr_prefix,
            cdata_as_text: config.cdata_as_text,
        }
    }

    /// Get the next node, or `None` once no tag remains
    ///
    /// Text after the last tag is discarded.
    pub fn next_node(&mut self) -> Result<Option<Node>> {
        loop {
            let start = self.cursor.position();
            match self.cursor.current() {
                None => return Ok(None),
                Some('<') => return self.scan_markup(start).map(Some),
                Some(_) => {
                    let Some(next_tag) = self.cursor.find("<") else {
                        return Ok(None);
                    };
                    self.cursor.advance_to(next_tag);
                    let content = self.cursor.slice_from(start.offset).trim();
                    if !content.is_empty() {
                        let kind = NodeKind::Text {
                            content: content.to_string(),
                        };
                        return Ok(Some(self.node_from(kind, start)));
                    }
                }
            }
        }
    }

    fn scan_markup(&mut self, start: Pos) -> Result<Node> {
        self.cursor.advance(); // '<'
        match self.cursor.current() {
            None => Err(self.error_from(
                ErrorKind::MalformedTag,
                start,
                "unexpected end of input after '<'",
            )),
            Some('/') => {
                self.skip_past(">", start, "unterminated close tag")?;
                Ok(self.node_from(NodeKind::ContainerClose, start))
            }
            Some('!') => self.scan_declaration(start),
            Some('?') => {
                self.skip_past("?>", start, "unterminated processing instruction")?;
                Ok(self.node_from(NodeKind::Comment, start))
            }
            Some(_) => self.scan_element(start),
        }
    }

    /// Comments, doctypes and CDATA; the body is skipped up to the first `>`
    fn scan_declaration(&mut self, start: Pos) -> Result<Node> {
        if !(self.cdata_as_text && self.cursor.starts_with(CDATA_OPEN)) {
            self.skip_past(">", start, "unterminated comment")?;
            return Ok(self.node_from(NodeKind::Comment, start));
        }

        self.cursor.advance_by(CDATA_OPEN.len());
        let body_start = self.cursor.pos();
        let Some(end) = self.cursor.find(CDATA_CLOSE) else {
            return Err(self.error_from(
                ErrorKind::MalformedTag,
                start,
                "unterminated CDATA section",
            ));
        };
        self.cursor.advance_to(end);
        let content = self.cursor.slice_from(body_start).trim().to_string();
        self.cursor.advance_by(CDATA_CLOSE.len());

        if content.is_empty() {
            Ok(self.node_from(NodeKind::Comment, start))
        } else {
            Ok(self.node_from(NodeKind::Text { content }, start))
        }
    }

    fn scan_element(&mut self, start: Pos) -> Result<Node> {
        let mut name = String::new();
        let mut has_attr_region = false;
        let mut is_self_closing = false;
        let mut attrs = AttrScanner::new(self.attr_prefix);

        loop {
            let Some(c) = self.cursor.current() else {
                return Err(self.error_from(ErrorKind::MalformedTag, start, "unterminated tag"));
            };
            if c == '>' {
                break;
            }

            if c == '/' && self.cursor.peek() == Some('>') {
                is_self_closing = true;
            } else if has_attr_region {
                attrs
                    .feed(c)
                    .map_err(|(kind, message)| self.error_here(kind, message))?;
            } else if c.is_whitespace() {
                has_attr_region = true;
            } else if is_name_delimiter(c) {
                return Err(self.error_here(
                    ErrorKind::MalformedTag,
                    "invalid character in element name",
                ));
            } else {
                name.push(c);
            }
            self.cursor.advance();
        }

        let attributes = attrs
            .finish()
            .map_err(|(kind, message)| self.error_here(kind, message))?;
        self.cursor.advance(); // '>'

        if name.is_empty() {
            return Err(self.error_from(ErrorKind::MalformedTag, start, "missing element name"));
        }

        let kind = if is_self_closing {
            NodeKind::Primitive { name, attributes }
        } else {
            NodeKind::ContainerOpen { name, attributes }
        };
        Ok(self.node_from(kind, start))
    }

    fn skip_past(&mut self, pattern: &str, start: Pos, message: &str) -> Result<()> {
        match self.cursor.find(pattern) {
            Some(idx) => {
                self.cursor.advance_to(idx + pattern.len());
                Ok(())
            }
            None => Err(self.error_from(ErrorKind::MalformedTag, start, message)),
        }
    }

    fn node_from(&self, kind: NodeKind, start: Pos) -> Node {
        Node::new(kind, Span::new(start, self.cursor.position()))
    }

    fn error_here(&self, kind: ErrorKind, message: &str) -> Error {
        let pos = self.cursor.position();
        Error::with_message(kind, Span::new(pos, pos), message)
    }

    fn error_from(&self, kind: ErrorKind, start: Pos, message: &str) -> Error {
        Error::with_message(kind, Span::new(start, self.cursor.position()), message)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_node().transpose()
    }
}

fn is_name_delimiter(c: char) -> bool {
    matches!(c, '/' | '=' | '"' | '\'' | '<')
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AttrState {
    /// Accumulating a key, possibly still empty
    Key,
    /// Whitespace after a non-empty key
    AfterKey,
    /// Seen `=`, waiting for the opening quote
    Equals,
    /// Inside a value opened by this quote character
    Value(char),
    /// Right after a closing quote
    AfterValue,
}

type Rejection = (ErrorKind, &'static str);

/// Attribute region of one tag
///
/// The key buffer always starts with the attribute prefix, so a key equal to
/// the bare prefix is empty.
#[derive(Debug)]
struct AttrScanner {
    state: AttrState,
    prefix_len: usize,
    key: String,
    value: String,
    attributes: Attributes,
}

impl AttrScanner {
    fn new(prefix: &str) -> Self {
        Self {
            state: AttrState::Key,
            prefix_len: prefix.len(),
            key: prefix.to_string(),
            value: String::new(),
            attributes: Attributes::new(),
        }
    }

    fn has_key(&self) -> bool {
        self.key.len() > self.prefix_len
    }

    fn feed(&mut self, c: char) -> std::result::Result<(), Rejection> {
        let ws = c.is_whitespace();
        self.state = match (self.state, c) {
            (AttrState::Value(quote), _) if c == quote => {
                self.commit();
                AttrState::AfterValue
            }
            (AttrState::Value(quote), _) => {
                self.value.push(c);
                AttrState::Value(quote)
            }
            (_, '<') => return Err((ErrorKind::MalformedTag, "unexpected '<' inside tag")),
            (AttrState::Key, _) if ws => {
                if self.has_key() {
                    AttrState::AfterKey
                } else {
                    AttrState::Key
                }
            }
            (AttrState::Key | AttrState::AfterKey, '=') => AttrState::Equals,
            (AttrState::Key | AttrState::AfterKey, '"' | '\'') => {
                return Err((
                    ErrorKind::MalformedAttribute,
                    "expected '=' before attribute value",
                ))
            }
            (AttrState::Key, _) => {
                self.key.push(c);
                AttrState::Key
            }
            (AttrState::AfterKey, _) if ws => AttrState::AfterKey,
            // the previous key had no value and is dropped
            (AttrState::AfterKey, _) => {
                self.key.truncate(self.prefix_len);
                self.key.push(c);
                AttrState::Key
            }
            (AttrState::Equals, '"' | '\'') => AttrState::Value(c),
            (AttrState::Equals, '=') => AttrState::Equals,
            (AttrState::Equals, _) if ws => AttrState::Equals,
            (AttrState::Equals, _) => {
                return Err((ErrorKind::MalformedAttribute, "unquoted attribute value"))
            }
            (AttrState::AfterValue, _) if ws => AttrState::Key,
            (AttrState::AfterValue, _) => {
                return Err((
                    ErrorKind::MalformedAttribute,
                    "expected whitespace after attribute value",
                ))
            }
        };
        Ok(())
    }

    /// Store the pending pair if both halves are non-empty, then reset
    fn commit(&mut self) {
        if self.has_key() && !self.value.is_empty() {
            self.attributes
                .insert(self.key.clone(), std::mem::take(&mut self.value));
        }
        self.key.truncate(self.prefix_len);
        self.value.clear();
    }

    fn finish(self) -> std::result::Result<Attributes, Rejection> {
        match self.state {
            AttrState::Value(_) => Err((
                ErrorKind::MalformedAttribute,
                "unterminated attribute value",
            )),
            AttrState::Equals => Err((ErrorKind::MalformedAttribute, "missing attribute value")),
            _ => Ok(self.attributes),
        }
    }
}
