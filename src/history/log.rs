//! Append-only journal of applied edit records.
//!
//! Every record that changes the text (commits, undo inverses, redos and
//! transient composition updates) is appended in application order. The log
//! is truncated from the front once it exceeds its capacity; `horizon` is the
//! newest revision whose records may have been dropped.

use std::collections::VecDeque;

use super::record::EditRecord;

#[derive(Debug, Clone)]
pub struct EditLog {
    entries: VecDeque<EditRecord>,
    capacity: usize,
    horizon: u64,
}

impl EditLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            horizon: 0,
        }
    }

    pub fn append(&mut self, record: EditRecord) {
        debug_assert!(self
            .entries
            .back()
            .map_or(true, |last| last.revision() <= record.revision()));
        self.entries.push_back(record);
        while self.entries.len() > self.capacity {
            if let Some(dropped) = self.entries.pop_front() {
                self.horizon = self.horizon.max(dropped.revision());
            }
        }
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = EditRecord>) {
        for record in records {
            self.append(record);
        }
    }

    /// Records applied after `revision`, oldest first.
    ///
    /// `None` when records newer than `revision` have already been truncated.
    pub fn changes_since(&self, revision: u64) -> Option<Vec<EditRecord>> {
        if revision < self.horizon {
            return None;
        }
        Some(
            self.entries
                .iter()
                .filter(|record| record.revision() > revision)
                .cloned()
                .collect(),
        )
    }

    /// Drop everything; nothing at or before `revision` can be replayed
    pub fn reset(&mut self, revision: u64) {
        self.entries.clear();
        self.horizon = revision;
    }

    pub fn horizon(&self) -> u64 {
        self.horizon
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
