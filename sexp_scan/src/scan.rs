//! Balance-aware structural scanning
//!
//! Cursor-relative queries over an [`EditBuffer`]: atom bounds, whole
//! sub-expression traversal in either direction, symbol-run skipping,
//! string-state detection, and list descent. An atom, a string literal, or
//! a fully delimited list (with any attached expression prefixes) counts as
//! one unit.

use thiserror::Error;

use crate::buffer::{EditBuffer, Span};
use crate::syntax::{SyntaxClass, SyntaxSpec};

/// Scan direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Scanning error
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// Fewer complete sub-expressions than requested before a buffer or
    /// form boundary
    #[error("incomplete expression before buffer or form boundary")]
    IncompleteExpression,

    /// Descend attempted on a character that does not open a list
    #[error("not at an opening delimiter")]
    NotAList,
}

/// Structural scanner over an edit buffer
///
/// Holds the dialect table only; the buffer is passed per call so callers
/// may interleave queries with edits. Every answer is computed fresh from
/// the buffer text.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    syntax: SyntaxSpec,
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            syntax: SyntaxSpec::lisp(),
        }
    }

    pub fn with_syntax(syntax: SyntaxSpec) -> Self {
        Self { syntax }
    }

    pub fn syntax(&self) -> &SyntaxSpec {
        &self.syntax
    }

    /// Bounds of the symbol-constituent run at `pos`
    ///
    /// A run ending exactly at `pos` also counts, so the query succeeds at
    /// the position just after a typed word. `None` when `pos` touches no
    /// constituent run.
    pub fn atom_bounds_at(&self, buffer: &EditBuffer, pos: usize) -> Option<Span> {
        let on_symbol = buffer
            .char_at(pos)
            .map_or(false, |c| self.syntax.is_symbol_char(c));
        let after_symbol = pos > 0
            && buffer
                .char_at(pos - 1)
                .map_or(false, |c| self.syntax.is_symbol_char(c));

        if on_symbol {
            let start = self.skip_symbol_chars(buffer, pos, Direction::Backward);
            let end = self.skip_symbol_chars(buffer, pos, Direction::Forward);
            Some(Span::new(start, end))
        } else if after_symbol {
            let start = self.skip_symbol_chars(buffer, pos, Direction::Backward);
            Some(Span::new(start, pos))
        } else {
            None
        }
    }

    /// Advance or retreat while the character class is symbol constituent
    pub fn skip_symbol_chars(&self, buffer: &EditBuffer, pos: usize, direction: Direction) -> usize {
        let mut pos = pos;
        match direction {
            Direction::Forward => {
                while let Some(ch) = buffer.char_at(pos) {
                    if !self.syntax.is_symbol_char(ch) {
                        break;
                    }
                    pos += 1;
                }
            }
            Direction::Backward => {
                while pos > 0 {
                    match buffer.char_at(pos - 1) {
                        Some(ch) if self.syntax.is_symbol_char(ch) => pos -= 1,
                        _ => break,
                    }
                }
            }
        }
        pos
    }

    /// Cross exactly `n` complete sub-expressions
    ///
    /// Fails with [`ScanError::IncompleteExpression`] when the buffer
    /// boundary or the enclosing form's closing delimiter intervenes.
    /// Backward traversal does not model line comments; position within
    /// code, not trailing comments.
    pub fn skip_expressions(
        &self,
        buffer: &EditBuffer,
        pos: usize,
        n: usize,
        direction: Direction,
    ) -> Result<usize, ScanError> {
        let mut pos = pos;
        for _ in 0..n {
            pos = match direction {
                Direction::Forward => self.skip_one_forward(buffer, pos)?,
                Direction::Backward => self.skip_one_backward(buffer, pos)?,
            };
        }
        Ok(pos)
    }

    /// Position of the first child of the list opening at `pos`
    pub fn descend_into(&self, buffer: &EditBuffer, pos: usize) -> Result<usize, ScanError> {
        match buffer.char_at(pos) {
            Some(ch) if self.syntax.classify(ch) == SyntaxClass::Open => Ok(pos + 1),
            _ => Err(ScanError::NotAList),
        }
    }

    /// True if `pos` lies inside an open string literal
    ///
    /// Computed by a syntactic-state scan from the buffer start, honoring
    /// escapes and line comments.
    pub fn is_inside_string(&self, buffer: &EditBuffer, pos: usize) -> bool {
        let mut in_string = false;
        let mut in_comment = false;
        let mut i = 0;
        while i < pos {
            let ch = match buffer.char_at(i) {
                Some(c) => c,
                None => break,
            };
            let class = self.syntax.classify(ch);
            if in_string {
                match class {
                    SyntaxClass::Escape => {
                        i += 2;
                        continue;
                    }
                    SyntaxClass::StringQuote => in_string = false,
                    _ => {}
                }
            } else if in_comment {
                if ch == '\n' {
                    in_comment = false;
                }
            } else {
                match class {
                    SyntaxClass::StringQuote => in_string = true,
                    SyntaxClass::CommentStart => in_comment = true,
                    SyntaxClass::Escape => {
                        i += 2;
                        continue;
                    }
                    _ => {}
                }
            }
            i += 1;
        }
        in_string
    }

    /// Skip whitespace and line comments forward
    pub fn skip_blank_and_comments(&self, buffer: &EditBuffer, pos: usize) -> usize {
        let mut pos = pos;
        while let Some(ch) = buffer.char_at(pos) {
            match self.syntax.classify(ch) {
                SyntaxClass::Whitespace => pos += 1,
                SyntaxClass::CommentStart => {
                    while let Some(c) = buffer.char_at(pos) {
                        pos += 1;
                        if c == '\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
        pos
    }

    fn skip_one_forward(&self, buffer: &EditBuffer, start: usize) -> Result<usize, ScanError> {
        let mut pos = self.skip_blank_and_comments(buffer, start);

        // Expression prefixes attach to the form that follows
        let mut prefixed = false;
        while let Some(ch) = buffer.char_at(pos) {
            if self.syntax.classify(ch) == SyntaxClass::Prefix {
                pos += 1;
                prefixed = true;
            } else {
                break;
            }
        }
        if prefixed {
            pos = self.skip_blank_and_comments(buffer, pos);
        }

        let ch = buffer.char_at(pos).ok_or(ScanError::IncompleteExpression)?;
        match self.syntax.classify(ch) {
            SyntaxClass::Open => self.skip_list_forward(buffer, pos),
            SyntaxClass::StringQuote => self.skip_string_forward(buffer, pos),
            SyntaxClass::Close => Err(ScanError::IncompleteExpression),
            SyntaxClass::Symbol => Ok(self.skip_symbol_chars(buffer, pos, Direction::Forward)),
            SyntaxClass::Escape => {
                // Char-literal escape outside a string: the escaped char
                // plus trailing constituents form one unit
                if pos + 2 > buffer.len() {
                    return Err(ScanError::IncompleteExpression);
                }
                Ok(self.skip_symbol_chars(buffer, pos + 2, Direction::Forward))
            }
            _ => Ok(pos + 1),
        }
    }

    fn skip_one_backward(&self, buffer: &EditBuffer, start: usize) -> Result<usize, ScanError> {
        let mut pos = start;
        while pos > 0 {
            match buffer.char_at(pos - 1) {
                Some(ch) if self.syntax.classify(ch) == SyntaxClass::Whitespace => pos -= 1,
                _ => break,
            }
        }
        if pos == 0 {
            return Err(ScanError::IncompleteExpression);
        }

        let ch = buffer
            .char_at(pos - 1)
            .ok_or(ScanError::IncompleteExpression)?;
        let mut pos = match self.syntax.classify(ch) {
            SyntaxClass::Close => self.skip_list_backward(buffer, pos)?,
            SyntaxClass::StringQuote => self.skip_string_backward(buffer, pos)?,
            SyntaxClass::Open => return Err(ScanError::IncompleteExpression),
            SyntaxClass::Symbol => self.skip_symbol_chars(buffer, pos, Direction::Backward),
            _ => pos - 1,
        };

        // Pull attached expression prefixes along
        while pos > 0 {
            match buffer.char_at(pos - 1) {
                Some(c) if self.syntax.classify(c) == SyntaxClass::Prefix => pos -= 1,
                _ => break,
            }
        }
        Ok(pos)
    }

    fn skip_list_forward(&self, buffer: &EditBuffer, open: usize) -> Result<usize, ScanError> {
        let mut depth = 0usize;
        let mut pos = open;
        while let Some(ch) = buffer.char_at(pos) {
            match self.syntax.classify(ch) {
                SyntaxClass::Open => {
                    depth += 1;
                    pos += 1;
                }
                SyntaxClass::Close => {
                    if depth == 0 {
                        return Err(ScanError::IncompleteExpression);
                    }
                    depth -= 1;
                    pos += 1;
                    if depth == 0 {
                        return Ok(pos);
                    }
                }
                SyntaxClass::StringQuote => pos = self.skip_string_forward(buffer, pos)?,
                SyntaxClass::CommentStart => {
                    while let Some(c) = buffer.char_at(pos) {
                        pos += 1;
                        if c == '\n' {
                            break;
                        }
                    }
                }
                SyntaxClass::Escape => pos += 2,
                _ => pos += 1,
            }
        }
        Err(ScanError::IncompleteExpression)
    }

    fn skip_string_forward(&self, buffer: &EditBuffer, open: usize) -> Result<usize, ScanError> {
        let mut pos = open + 1;
        while let Some(ch) = buffer.char_at(pos) {
            match self.syntax.classify(ch) {
                SyntaxClass::Escape => pos += 2,
                SyntaxClass::StringQuote => return Ok(pos + 1),
                _ => pos += 1,
            }
        }
        Err(ScanError::IncompleteExpression)
    }

    /// `end` sits just after a closing delimiter; returns the offset of the
    /// matching opening delimiter
    fn skip_list_backward(&self, buffer: &EditBuffer, end: usize) -> Result<usize, ScanError> {
        let mut depth = 0usize;
        let mut pos = end;
        while pos > 0 {
            pos -= 1;
            let ch = buffer.char_at(pos).ok_or(ScanError::IncompleteExpression)?;
            match self.syntax.classify(ch) {
                SyntaxClass::Close => depth += 1,
                SyntaxClass::Open => {
                    if depth == 0 {
                        return Err(ScanError::IncompleteExpression);
                    }
                    depth -= 1;
                    if depth == 0 {
                        return Ok(pos);
                    }
                }
                SyntaxClass::StringQuote if !self.is_escaped(buffer, pos) => {
                    pos = self.skip_string_backward(buffer, pos + 1)?;
                }
                _ => {}
            }
        }
        Err(ScanError::IncompleteExpression)
    }

    /// `end` sits just after a closing quote; returns the offset of the
    /// opening quote
    fn skip_string_backward(&self, buffer: &EditBuffer, end: usize) -> Result<usize, ScanError> {
        let mut pos = end.checked_sub(1).ok_or(ScanError::IncompleteExpression)?;
        while pos > 0 {
            pos -= 1;
            let ch = buffer.char_at(pos).ok_or(ScanError::IncompleteExpression)?;
            if self.syntax.classify(ch) == SyntaxClass::StringQuote && !self.is_escaped(buffer, pos)
            {
                return Ok(pos);
            }
        }
        Err(ScanError::IncompleteExpression)
    }

    /// True when the char at `pos` is preceded by an odd run of escapes
    fn is_escaped(&self, buffer: &EditBuffer, pos: usize) -> bool {
        let mut escapes = 0;
        let mut i = pos;
        while i > 0 {
            match buffer.char_at(i - 1) {
                Some(ch) if self.syntax.classify(ch) == SyntaxClass::Escape => {
                    escapes += 1;
                    i -= 1;
                }
                _ => break,
            }
        }
        escapes % 2 == 1
    }
}
