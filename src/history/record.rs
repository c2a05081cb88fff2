//! Atomic edit records.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::text::TextStorage;

/// Identifier shared by all records of one edit group
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u64);

impl GroupId {
    /// Records applied outside the undo history (IME composition in progress)
    pub const TRANSIENT: GroupId = GroupId(0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditKind {
    Insert,
    Delete,
}

/// A change to make, before it has been applied and recorded. Offsets refer
/// to the text as left by the steps before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditStep {
    Delete(Range<usize>),
    Insert { at: usize, text: String },
}

/// One atomic insert or delete applied to the text.
///
/// Immutable once created. A delete keeps the removed text so that applying
/// the inverse reconstructs the prior state exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRecord {
    kind: EditKind,
    start: usize,
    text: String,
    len: usize,
    revision: u64,
    group: GroupId,
}

impl EditRecord {
    pub fn insert(start: usize, text: impl Into<String>, revision: u64, group: GroupId) -> Self {
        Self::new(EditKind::Insert, start, text.into(), revision, group)
    }

    pub fn delete(start: usize, removed: impl Into<String>, revision: u64, group: GroupId) -> Self {
        Self::new(EditKind::Delete, start, removed.into(), revision, group)
    }

    fn new(kind: EditKind, start: usize, text: String, revision: u64, group: GroupId) -> Self {
        let len = text.chars().count();
        Self {
            kind,
            start,
            text,
            len,
            revision,
            group,
        }
    }

    pub fn kind(&self) -> EditKind {
        self.kind
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Inserted text for an insert, removed text for a delete
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of `text()` in chars
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// End of the affected span (in the text where the span exists)
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    /// The record that undoes this one, stamped with `revision`.
    pub fn inverse(&self, revision: u64) -> Self {
        let kind = match self.kind {
            EditKind::Insert => EditKind::Delete,
            EditKind::Delete => EditKind::Insert,
        };
        Self {
            kind,
            start: self.start,
            text: self.text.clone(),
            len: self.len,
            revision,
            group: self.group,
        }
    }

    /// Same edit stamped with a new revision (used when redoing)
    pub fn restamped(&self, revision: u64) -> Self {
        Self {
            revision,
            ..self.clone()
        }
    }

    /// Apply to `storage`.
    ///
    /// A delete first verifies that the text it is about to remove is the
    /// text it recorded; a mismatch means the history no longer describes the
    /// document and is reported as `InternalConsistency`.
    pub fn apply(&self, storage: &mut TextStorage) -> Result<()> {
        match self.kind {
            EditKind::Insert => {
                storage
                    .insert(self.start, &self.text)
                    .map_err(|e| self.consistency_error(e))?;
            }
            EditKind::Delete => {
                let current = storage
                    .read(self.start..self.end())
                    .map_err(|e| self.consistency_error(e))?;
                if current != self.text {
                    return Err(EngineError::InternalConsistency(format!(
                        "record of group {} expected {:?} at {}, found {:?}",
                        self.group.0, self.text, self.start, current
                    )));
                }
                storage
                    .delete(self.start..self.end())
                    .map_err(|e| self.consistency_error(e))?;
            }
        }
        Ok(())
    }

    fn consistency_error(&self, cause: EngineError) -> EngineError {
        EngineError::InternalConsistency(format!(
            "record of group {} no longer applies: {}",
            self.group.0, cause
        ))
    }

    /// Re-map an offset across this (already applied) record.
    ///
    /// Offsets before the edit stay put. An insert at or before the offset
    /// pushes it forward. A delete wholly before the offset pulls it back, and
    /// an offset inside the deleted span collapses to the deletion start.
    pub fn map_offset(&self, offset: usize) -> usize {
        match self.kind {
            EditKind::Insert => {
                if offset < self.start {
                    offset
                } else {
                    offset + self.len
                }
            }
            EditKind::Delete => {
                if offset <= self.start {
                    offset
                } else if offset >= self.end() {
                    offset - self.len
                } else {
                    self.start
                }
            }
        }
    }

    /// Whether this record touches the span `start..end` of the text it was
    /// applied to. Inserts strictly inside the span and deletes overlapping it
    /// count; edits that only abut the span do not.
    pub fn touches(&self, start: usize, end: usize) -> bool {
        match self.kind {
            EditKind::Insert => self.start > start && self.start < end,
            EditKind::Delete => self.start < end && self.end() > start,
        }
    }
}
