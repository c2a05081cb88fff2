//! A single selection.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::history::EditRecord;

/// A text selection with anchor (fixed end) and active (moving end).
/// `anchor == active` is a caret with no selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: usize,
    pub active: usize,
    /// Column vertical motion tries to return to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_column: Option<usize>,
}

impl Selection {
    pub fn new(anchor: usize, active: usize) -> Self {
        Self {
            anchor,
            active,
            goal_column: None,
        }
    }

    /// A caret at `offset`
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.active)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.active)
    }

    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// Active end before anchor
    pub fn is_reversed(&self) -> bool {
        self.active < self.anchor
    }

    pub fn extend_to(&mut self, offset: usize) {
        self.active = offset;
    }

    pub fn collapse_to(&mut self, offset: usize) {
        self.anchor = offset;
        self.active = offset;
    }

    /// Whether `offset` lies within the selected span (end exclusive)
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start() && offset < self.end()
    }

    /// Whether two selections overlap or touch at a shared caret
    pub fn overlaps(&self, other: &Selection) -> bool {
        if self.is_empty() || other.is_empty() {
            return self.start() <= other.end() && other.start() <= self.end();
        }
        self.start() < other.end() && other.start() < self.end()
    }

    /// Re-map both ends across an applied record, then clamp into `0..=len`.
    ///
    /// Anchor and active are mapped independently with the same rule.
    pub fn transform(&mut self, record: &EditRecord, len: usize) {
        let anchor = record.map_offset(self.anchor).min(len);
        let active = record.map_offset(self.active).min(len);
        if anchor != self.anchor || active != self.active {
            self.goal_column = None;
        }
        self.anchor = anchor;
        self.active = active;
    }
}
