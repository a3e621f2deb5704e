//! Character cursor for input navigation

use crate::error::Pos;

/// Cursor over a string, one character at a time, with position tracking
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    line: u32,
    col: u32,
}

impl<'a> Cursor<'a> {
    /// Create cursor from a string slice
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Get current character without consuming
    pub fn current(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Peek at the character after the current one
    pub fn peek(&self) -> Option<char> {
        let mut chars = self.remaining().chars();
        chars.next();
        chars.next()
    }

    /// Advance cursor by one character
    pub fn advance(&mut self) {
        if let Some(c) = self.current() {
            self.pos += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
    }

    /// Advance cursor by `n` characters
    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Check whether the remaining input starts with `pattern`
    pub fn starts_with(&self, pattern: &str) -> bool {
        self.remaining().starts_with(pattern)
    }

    /// Byte offset of the next occurrence of `pattern` at or after the cursor
    pub fn find(&self, pattern: &str) -> Option<usize> {
        self.remaining().find(pattern).map(|idx| self.pos + idx)
    }

    /// Advance until the cursor sits at byte offset `target`
    ///
    /// `target` must lie on a character boundary at or after the cursor.
    pub fn advance_to(&mut self, target: usize) {
        while self.pos < target && !self.is_eof() {
            self.advance();
        }
    }

    /// Get current position
    pub const fn position(&self) -> Pos {
        Pos::new(self.pos, self.line, self.col)
    }

    /// Check if at end of input
    pub const fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Get remaining input
    pub fn remaining(&self) -> &'a str {
        self.input.get(self.pos..).unwrap_or_default()
    }

    /// Get current position index
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Get slice from start to current position
    pub fn slice_from(&self, start: usize) -> &'a str {
        self.input.get(start..self.pos).unwrap_or_default()
    }
}
