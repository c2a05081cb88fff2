//! Edit groups: the unit of undo.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::record::{EditKind, EditRecord, GroupId};
use crate::error::Result;
use crate::selection::SelectionSet;
use crate::text::TextStorage;

/// Where a group came from. Decides whether it may coalesce with the next edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOrigin {
    /// Keystroke-by-keystroke text entry
    Typing,
    Paste,
    /// Committed IME composition
    Composition,
    /// Outline reordering or heading changes
    Structural,
    /// Accepted background suggestion
    Suggestion,
    /// Explicit `request_edit` from a collaborator
    Programmatic,
}

/// Ordered records sharing one group id, with the selections around them.
#[derive(Debug, Clone)]
pub struct EditGroup {
    id: GroupId,
    origin: EditOrigin,
    records: Vec<EditRecord>,
    selections_before: SelectionSet,
    selections_after: SelectionSet,
    committed_at: Instant,
}

impl EditGroup {
    pub fn new(id: GroupId, origin: EditOrigin, selections_before: SelectionSet) -> Self {
        Self {
            id,
            origin,
            records: Vec::new(),
            selections_after: selections_before.clone(),
            selections_before,
            committed_at: Instant::now(),
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn origin(&self) -> EditOrigin {
        self.origin
    }

    pub fn records(&self) -> &[EditRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last_record(&self) -> Option<&EditRecord> {
        self.records.last()
    }

    pub fn push(&mut self, record: EditRecord) {
        debug_assert_eq!(record.group(), self.id);
        self.records.push(record);
    }

    pub fn selections_before(&self) -> &SelectionSet {
        &self.selections_before
    }

    pub fn selections_after(&self) -> &SelectionSet {
        &self.selections_after
    }

    /// Record the selections once the group's records have been applied
    pub fn seal(&mut self, selections_after: SelectionSet, at: Instant) {
        self.selections_after = selections_after;
        self.committed_at = at;
    }

    pub fn committed_at(&self) -> Instant {
        self.committed_at
    }

    /// True when every record is an insert and each starts where the previous ended
    pub fn is_contiguous_insert_run(&self) -> bool {
        let mut expected = None;
        for record in &self.records {
            if record.kind() != EditKind::Insert {
                return false;
            }
            if let Some(end) = expected {
                if record.start() != end {
                    return false;
                }
            }
            expected = Some(record.end());
        }
        !self.records.is_empty()
    }

    /// Re-apply the records in order, stamping them with `revision`.
    pub fn apply_forward(&self, storage: &mut TextStorage, revision: u64) -> Result<Vec<EditRecord>> {
        let mut applied = Vec::with_capacity(self.records.len());
        for record in &self.records {
            let record = record.restamped(revision);
            record.apply(storage)?;
            applied.push(record);
        }
        Ok(applied)
    }

    /// Apply the inverse of every record in reverse order, stamped with `revision`.
    pub fn apply_inverse(&self, storage: &mut TextStorage, revision: u64) -> Result<Vec<EditRecord>> {
        let mut applied = Vec::with_capacity(self.records.len());
        for record in self.records.iter().rev() {
            let inverse = record.inverse(revision);
            inverse.apply(storage)?;
            applied.push(inverse);
        }
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_with(records: Vec<EditRecord>) -> EditGroup {
        let mut group = EditGroup::new(GroupId(7), EditOrigin::Typing, SelectionSet::default());
        for record in records {
            group.push(record);
        }
        group
    }

    #[test]
    fn test_inverse_in_reverse_order() {
        let mut storage = TextStorage::from_text("ab");
        let group = group_with(vec![
            EditRecord::insert(2, "c", 1, GroupId(7)),
            EditRecord::insert(3, "d", 1, GroupId(7)),
            EditRecord::delete(0, "a", 1, GroupId(7)),
        ]);
        group.apply_forward(&mut storage, 1).unwrap();
        assert_eq!(storage.content(), "bcd");

        let inverses = group.apply_inverse(&mut storage, 2).unwrap();
        assert_eq!(storage.content(), "ab");
        assert_eq!(inverses[0].kind(), EditKind::Insert);
        assert!(inverses.iter().all(|r| r.revision() == 2));
    }

    #[test]
    fn test_contiguous_insert_run() {
        let run = group_with(vec![
            EditRecord::insert(0, "a", 1, GroupId(7)),
            EditRecord::insert(1, "b", 2, GroupId(7)),
        ]);
        assert!(run.is_contiguous_insert_run());

        let split = group_with(vec![
            EditRecord::insert(0, "a", 1, GroupId(7)),
            EditRecord::insert(5, "b", 1, GroupId(7)),
        ]);
        assert!(!split.is_contiguous_insert_run());

        let mixed = group_with(vec![EditRecord::delete(0, "a", 1, GroupId(7))]);
        assert!(!mixed.is_contiguous_insert_run());
    }
}
