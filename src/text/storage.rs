//! Rope-backed text storage with checked positional insert/delete.

use std::ops::Range;

use ropey::Rope;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use super::graphemes;
use crate::error::{EngineError, Result};

/// A position in the text (line and column, both 0-indexed, column in chars).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Document content as a sequence of scalar values.
///
/// Backed by `ropey::Rope`, so insert and delete are O(log n) and cloning is a
/// cheap copy-on-write share of the tree. `version` counts applied changes.
#[derive(Debug, Clone, Default)]
pub struct TextStorage {
    rope: Rope,
    version: u64,
}

impl TextStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            version: 0,
        }
    }

    /// Access the underlying rope for read-only rope operations
    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Copy-on-write copy of the current text
    pub fn snapshot(&self) -> Rope {
        self.rope.clone()
    }

    /// Number of scalar values
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Number of applied insert/delete operations since creation
    pub fn version(&self) -> u64 {
        self.version
    }

    fn check_range(&self, range: &Range<usize>) -> Result<()> {
        if range.start > range.end || range.end > self.len() {
            return Err(EngineError::out_of_range(range.clone(), self.len()));
        }
        Ok(())
    }

    /// Read the scalar values in `range`.
    pub fn read(&self, range: Range<usize>) -> Result<String> {
        self.check_range(&range)?;
        Ok(self.rope.slice(range).to_string())
    }

    /// Full content (allocates; prefer `rope()` for large documents)
    pub fn content(&self) -> String {
        self.rope.to_string()
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        (offset < self.len()).then(|| self.rope.char(offset))
    }

    /// Insert `text` at `offset`, returning the number of scalar values inserted.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<usize> {
        if offset > self.len() {
            return Err(EngineError::out_of_range(offset..offset, self.len()));
        }
        let inserted = text.chars().count();
        if inserted > 0 {
            self.rope.insert(offset, text);
            self.version += 1;
        }
        Ok(inserted)
    }

    /// Delete `range`, returning the removed text.
    pub fn delete(&mut self, range: Range<usize>) -> Result<String> {
        self.check_range(&range)?;
        if range.is_empty() {
            return Ok(String::new());
        }
        let removed = self.rope.slice(range.clone()).to_string();
        self.rope.remove(range);
        self.version += 1;
        Ok(removed)
    }

    /// Number of lines (always >= 1)
    pub fn line_count(&self) -> usize {
        self.rope.len_lines().max(1)
    }

    /// Line content without its trailing line break
    pub fn line(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line).to_string();
        Some(s.trim_end_matches(&['\n', '\r'][..]).to_string())
    }

    /// Length of a line in chars, excluding the line break
    pub fn line_length(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len -= 1;
            if len > 0 && slice.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        len
    }

    /// Offset of the first char of `line`
    pub fn line_to_offset(&self, line: usize) -> Result<usize> {
        if line >= self.rope.len_lines() {
            return Err(EngineError::out_of_range(line..line, self.rope.len_lines()));
        }
        Ok(self.rope.line_to_char(line))
    }

    /// Convert a position to an offset. Columns past the line end fail.
    pub fn position_to_offset(&self, position: Position) -> Result<usize> {
        let start = self.line_to_offset(position.line)?;
        let line_len = self.line_length(position.line);
        if position.column > line_len {
            return Err(EngineError::out_of_range(
                position.column..position.column,
                line_len,
            ));
        }
        Ok(start + position.column)
    }

    /// Convert an offset to a (line, column) position.
    pub fn offset_to_position(&self, offset: usize) -> Result<Position> {
        if offset > self.len() {
            return Err(EngineError::out_of_range(offset..offset, self.len()));
        }
        let line = self.rope.char_to_line(offset);
        let column = offset - self.rope.line_to_char(line);
        Ok(Position::new(line, column.min(self.line_length(line))))
    }

    pub fn next_grapheme_boundary(&self, offset: usize) -> usize {
        graphemes::next_grapheme_boundary(self.rope.slice(..), offset)
    }

    pub fn prev_grapheme_boundary(&self, offset: usize) -> usize {
        graphemes::prev_grapheme_boundary(self.rope.slice(..), offset)
    }

    pub fn is_grapheme_boundary(&self, offset: usize) -> bool {
        graphemes::is_grapheme_boundary(self.rope.slice(..), offset)
    }

    pub fn grapheme_count(&self) -> usize {
        graphemes::grapheme_count(self.rope.slice(..))
    }

    /// Number of words by Unicode word boundaries
    pub fn word_count(&self) -> usize {
        self.rope
            .lines()
            .map(|line| line.to_string().unicode_words().count())
            .sum()
    }
}

impl PartialEq for TextStorage {
    fn eq(&self, other: &Self) -> bool {
        self.rope == other.rope
    }
}

impl Eq for TextStorage {}
