//! In-progress IME composition.
//!
//! The marked text lives in the document while the user composes, but it is
//! kept out of the undo history. Commit turns the net change into one group;
//! cancel puts the replaced text back.

use std::ops::Range;
use std::time::Instant;

use crate::history::{EditGroup, EditOrigin, EditRecord, GroupId};
use crate::selection::SelectionSet;

#[derive(Debug, Clone)]
pub struct Composition {
    start: usize,
    /// Text the composition replaced when it began
    original: String,
    marked: String,
    selections_before: SelectionSet,
}

impl Composition {
    pub fn new(start: usize, original: String, selections_before: SelectionSet) -> Self {
        Self {
            start,
            original,
            marked: String::new(),
            selections_before,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn marked(&self) -> &str {
        &self.marked
    }

    /// Document range currently occupied by the marked text
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.marked.chars().count()
    }

    pub fn selections_before(&self) -> &SelectionSet {
        &self.selections_before
    }

    /// Records replacing the marked text with `text`. Updates the marked text.
    pub(crate) fn replace_marked(&mut self, text: &str, revision: u64) -> Vec<EditRecord> {
        let mut records = Vec::with_capacity(2);
        if !self.marked.is_empty() {
            records.push(EditRecord::delete(
                self.start,
                self.marked.as_str(),
                revision,
                GroupId::TRANSIENT,
            ));
        }
        if !text.is_empty() {
            records.push(EditRecord::insert(
                self.start,
                text,
                revision,
                GroupId::TRANSIENT,
            ));
        }
        self.marked = text.to_string();
        records
    }

    /// Records restoring the text from before the composition began
    pub(crate) fn rollback(&self, revision: u64) -> Vec<EditRecord> {
        let mut records = Vec::with_capacity(2);
        if !self.marked.is_empty() {
            records.push(EditRecord::delete(
                self.start,
                self.marked.as_str(),
                revision,
                GroupId::TRANSIENT,
            ));
        }
        if !self.original.is_empty() {
            records.push(EditRecord::insert(
                self.start,
                self.original.as_str(),
                revision,
                GroupId::TRANSIENT,
            ));
        }
        records
    }

    /// The net change as one undoable group. None when nothing changed.
    pub(crate) fn into_group(
        self,
        id: GroupId,
        revision: u64,
        selections_after: SelectionSet,
    ) -> Option<EditGroup> {
        if self.original == self.marked {
            return None;
        }
        let mut group = EditGroup::new(id, EditOrigin::Composition, self.selections_before);
        if !self.original.is_empty() {
            group.push(EditRecord::delete(self.start, self.original, revision, id));
        }
        if !self.marked.is_empty() {
            group.push(EditRecord::insert(self.start, self.marked, revision, id));
        }
        group.seal(selections_after, Instant::now());
        Some(group)
    }
}
