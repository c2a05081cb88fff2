//! The document entity: text, mode, selections and history behind one lock.
//!
//! Every mutation follows the same path: check the mode, apply to a
//! copy-on-write clone of the text, record the applied edits, transform the
//! selections, commit the group, bump the revision and notify subscribers.
//! The clone is swapped in only once every step succeeded, so a failed
//! request leaves no trace.

use std::fmt;
use std::ops::Range;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, trace, warn};

use super::change::{Change, ChangeKind, Subscribers};
use super::snapshot::{Snapshot, TextSnapshot};
use super::DocumentId;
use crate::composition::Composition;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::history::{EditGroup, EditKind, EditLog, EditOrigin, EditRecord, EditStep, UndoStack};
use crate::mode::{Capability, Mode, ModeGate, ModeMachine};
use crate::selection::{MoveTarget, Selection, SelectionSet};
use crate::text::TextStorage;
use crate::tracing::SelectionSnapshot;

pub struct Document {
    id: DocumentId,
    storage: TextStorage,
    modes: ModeMachine,
    selections: SelectionSet,
    history: UndoStack,
    journal: EditLog,
    revision: u64,
    composition: Option<Composition>,
    /// Set once history stopped matching the text; blocks all mutation
    poisoned: Option<String>,
    subscribers: Subscribers,
    gate: Option<Arc<dyn ModeGate>>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.id)
            .field("len", &self.storage.len())
            .field("mode", &self.modes.current())
            .field("revision", &self.revision)
            .field("selections", &self.selections)
            .field("undo", &self.history.undo_count())
            .field("redo", &self.history.redo_count())
            .field("composing", &self.composition.is_some())
            .field("poisoned", &self.poisoned)
            .finish()
    }
}

impl Document {
    pub fn new(text: &str, config: &EngineConfig) -> Self {
        Self {
            id: DocumentId::new(),
            storage: TextStorage::from_text(text),
            modes: ModeMachine::new(config.default_mode),
            selections: SelectionSet::default(),
            history: UndoStack::new(config.history_limit, config.coalesce_policy()),
            journal: EditLog::with_capacity(config.journal_capacity),
            revision: 0,
            composition: None,
            poisoned: None,
            subscribers: Subscribers::default(),
            gate: None,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn storage(&self) -> &TextStorage {
        &self.storage
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn read(&self, range: Range<usize>) -> Result<String> {
        self.storage.read(range)
    }

    pub fn mode(&self) -> Mode {
        self.modes.current()
    }

    pub fn modes(&self) -> &ModeMachine {
        &self.modes
    }

    pub fn selections(&self) -> &SelectionSet {
        &self.selections
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn composition(&self) -> Option<&Composition> {
        self.composition.as_ref()
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned.is_some()
    }

    pub fn changes_since(&self, revision: u64) -> Option<Vec<EditRecord>> {
        self.journal.changes_since(revision)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            text: self.storage.content(),
            mode: self.mode(),
            revision: self.revision,
        }
    }

    pub fn text_snapshot(&self) -> TextSnapshot {
        TextSnapshot::new(self.storage.snapshot(), self.revision, self.mode())
    }

    // =========================================================================
    // Gates
    // =========================================================================

    fn ensure_writable(&self) -> Result<()> {
        match &self.poisoned {
            Some(reason) => Err(EngineError::InternalConsistency(format!(
                "document is halted after an earlier failure: {}",
                reason
            ))),
            None => Ok(()),
        }
    }

    pub(crate) fn require(&self, capability: Capability) -> Result<()> {
        self.ensure_writable()?;
        let mode = self.mode();
        if mode.allows(capability) {
            Ok(())
        } else {
            warn!(%mode, %capability, "request rejected");
            Err(EngineError::CapabilityDenied { mode, capability })
        }
    }

    /// Capability check, then commit any pending composition
    fn begin(&mut self, capability: Capability) -> Result<()> {
        self.require(capability)?;
        self.flush_composition();
        Ok(())
    }

    fn poison(&mut self, err: &EngineError) {
        error!(document = %self.id, %err, "history no longer matches text, halting mutation");
        self.poisoned = Some(err.to_string());
    }

    fn notify(&mut self, kind: ChangeKind) {
        let change = Change {
            document: self.id,
            revision: self.revision,
            kind,
        };
        self.subscribers.notify(&change);
    }

    pub(crate) fn subscribe(&mut self, sender: Sender<Change>) {
        self.subscribers.add(sender);
    }

    pub(crate) fn set_gate(&mut self, gate: Option<Arc<dyn ModeGate>>) {
        self.gate = gate;
    }

    // =========================================================================
    // Edits
    // =========================================================================

    /// Apply `steps` as one group. Returns false when nothing changed.
    pub(crate) fn apply_steps(
        &mut self,
        capability: Capability,
        origin: EditOrigin,
        steps: Vec<EditStep>,
    ) -> Result<bool> {
        self.require(capability)?;
        self.check_steps(&steps)?;
        self.flush_composition();
        self.commit_steps(origin, steps)
    }

    /// Bounds-check `steps` against the current length without applying them
    fn check_steps(&self, steps: &[EditStep]) -> Result<()> {
        let mut len = self.storage.len();
        for step in steps {
            match step {
                EditStep::Delete(range) => {
                    if range.start > range.end || range.end > len {
                        return Err(EngineError::out_of_range(range.clone(), len));
                    }
                    len -= range.len();
                }
                EditStep::Insert { at, text } => {
                    if *at > len {
                        return Err(EngineError::out_of_range(*at..*at, len));
                    }
                    len += text.chars().count();
                }
            }
        }
        Ok(())
    }

    fn commit_steps(&mut self, origin: EditOrigin, steps: Vec<EditStep>) -> Result<bool> {
        let now = Instant::now();
        let revision = self.revision + 1;

        let coalesce_into = match (origin, steps.as_slice()) {
            (EditOrigin::Typing, [EditStep::Insert { at, text }]) => self
                .history
                .coalesce_target(*at, text, now)
                .map(|group| group.id()),
            _ => None,
        };
        let group_id = match coalesce_into {
            Some(id) => id,
            None => self.history.next_group_id(),
        };

        let mut storage = self.storage.clone();
        let mut selections = self.selections.clone();
        let mut records = Vec::with_capacity(steps.len());
        for step in steps {
            let record = match step {
                EditStep::Delete(range) => {
                    if range.start > range.end || range.end > storage.len() {
                        return Err(EngineError::out_of_range(range, storage.len()));
                    }
                    if range.is_empty() {
                        continue;
                    }
                    let start = range.start;
                    let removed = storage.delete(range)?;
                    EditRecord::delete(start, removed, revision, group_id)
                }
                EditStep::Insert { at, text } => {
                    if text.is_empty() {
                        if at > storage.len() {
                            return Err(EngineError::out_of_range(at..at, storage.len()));
                        }
                        continue;
                    }
                    storage.insert(at, &text)?;
                    EditRecord::insert(at, text, revision, group_id)
                }
            };
            selections.transform(&record, storage.len());
            records.push(record);
        }

        if records.is_empty() {
            return Ok(false);
        }

        self.trace_selections(&selections);
        let selections_before = std::mem::replace(&mut self.selections, selections);
        self.storage = storage;
        self.journal.extend(records.iter().cloned());
        self.revision = revision;

        let coalesced = match coalesce_into {
            Some(_) => match self.history.coalesce_target(records[0].start(), records[0].text(), now) {
                Some(group) => {
                    for record in records.drain(..) {
                        group.push(record);
                    }
                    group.seal(self.selections.clone(), now);
                    true
                }
                None => false,
            },
            None => false,
        };
        if !coalesced {
            let record_count = records.len();
            let mut group = EditGroup::new(group_id, origin, selections_before);
            for record in records {
                group.push(record);
            }
            group.seal(self.selections.clone(), now);
            self.history.commit(group);
            debug!(revision, group = group_id.0, ?origin, records = record_count, "committed edit group");
        } else {
            debug!(revision, group = group_id.0, "extended typing group");
        }

        self.notify(ChangeKind::Edit {
            group: group_id,
            origin,
        });
        Ok(true)
    }

    fn trace_selections(&self, after: &SelectionSet) {
        let before = SelectionSnapshot::from_set(&self.selections);
        if let Some(diff) = before.diff(&SelectionSnapshot::from_set(after)) {
            trace!(target: "selection", %diff, "selections transformed");
        }
    }

    /// One step per selection, built back to front so earlier offsets hold
    fn per_selection(
        &self,
        mut f: impl FnMut(&Selection, &TextStorage) -> Vec<EditStep>,
    ) -> Vec<EditStep> {
        self.selections
            .iter()
            .rev()
            .flat_map(|selection| f(selection, &self.storage))
            .collect()
    }

    /// Replace every selection with `text`
    pub(crate) fn insert_at_selections(&mut self, origin: EditOrigin, text: &str) -> Result<bool> {
        self.begin(Capability::EditText)?;
        let steps = self.per_selection(|selection, _| {
            let mut steps = Vec::with_capacity(2);
            if !selection.is_empty() {
                steps.push(EditStep::Delete(selection.range()));
            }
            steps.push(EditStep::Insert {
                at: selection.start(),
                text: text.to_string(),
            });
            steps
        });
        self.commit_steps(origin, steps)
    }

    /// Delete each selection, or the grapheme before/after each caret
    pub(crate) fn delete_at_selections(&mut self, forward: bool) -> Result<bool> {
        self.begin(Capability::EditText)?;
        let storage = &self.storage;
        let ranges = self
            .selections
            .iter()
            .map(|selection| {
                if !selection.is_empty() {
                    selection.range()
                } else if forward {
                    selection.active..storage.next_grapheme_boundary(selection.active)
                } else {
                    storage.prev_grapheme_boundary(selection.active)..selection.active
                }
            })
            .collect();
        let steps = merge_ranges(ranges)
            .into_iter()
            .rev()
            .map(EditStep::Delete)
            .collect();
        self.commit_steps(EditOrigin::Programmatic, steps)
    }

    // =========================================================================
    // Undo / redo
    // =========================================================================

    pub(crate) fn undo(&mut self) -> Result<bool> {
        self.begin(Capability::History)?;
        let Some(group) = self.history.peek_undo() else {
            return Ok(false);
        };
        let revision = self.revision + 1;
        let mut storage = self.storage.clone();
        let applied = group.apply_inverse(&mut storage, revision);
        let group_id = group.id();
        let restored = group.selections_before().clone();

        match applied {
            Ok(records) => {
                self.finish_history_step(storage, records, restored, revision);
                self.history.finish_undo();
                debug!(revision, group = group_id.0, "undo");
                self.notify(ChangeKind::Undo { group: group_id });
                Ok(true)
            }
            Err(err) => {
                self.poison(&err);
                Err(err)
            }
        }
    }

    pub(crate) fn redo(&mut self) -> Result<bool> {
        self.begin(Capability::History)?;
        let Some(group) = self.history.peek_redo() else {
            return Ok(false);
        };
        let revision = self.revision + 1;
        let mut storage = self.storage.clone();
        let applied = group.apply_forward(&mut storage, revision);
        let group_id = group.id();
        let restored = group.selections_after().clone();

        match applied {
            Ok(records) => {
                self.finish_history_step(storage, records, restored, revision);
                self.history.finish_redo();
                debug!(revision, group = group_id.0, "redo");
                self.notify(ChangeKind::Redo { group: group_id });
                Ok(true)
            }
            Err(err) => {
                self.poison(&err);
                Err(err)
            }
        }
    }

    fn finish_history_step(
        &mut self,
        storage: TextStorage,
        records: Vec<EditRecord>,
        restored: SelectionSet,
        revision: u64,
    ) {
        let selections = if restored.is_within(storage.len()) {
            restored
        } else {
            let mut selections = self.selections.clone();
            for record in &records {
                selections.transform(record, storage.len());
            }
            selections
        };
        self.trace_selections(&selections);
        self.selections = selections;
        self.storage = storage;
        self.journal.extend(records);
        self.revision = revision;
    }

    // =========================================================================
    // Modes
    // =========================================================================

    pub(crate) fn switch_mode(&mut self, target: Mode) -> Result<bool> {
        self.ensure_writable()?;
        let from = self.mode();
        if from == target {
            return Ok(false);
        }
        if target == Mode::Publish && self.storage.is_empty() {
            warn!(%target, "mode switch rejected: document is empty");
            return Err(EngineError::ModeUnavailable {
                target,
                reason: "document is empty".to_string(),
            });
        }
        if let Some(gate) = &self.gate {
            if let Err(reason) = gate.check(from, target, self.storage.rope()) {
                warn!(%target, %reason, "mode switch rejected by gate");
                return Err(EngineError::ModeUnavailable { target, reason });
            }
        }

        self.flush_composition();
        self.history.close_typing_run();
        self.revision += 1;
        self.modes.switch(target, self.revision);
        debug!(revision = self.revision, %from, to = %target, "mode switched");
        self.notify(ChangeKind::ModeSwitch { from, to: target });
        Ok(true)
    }

    // =========================================================================
    // Selections
    // =========================================================================

    /// Commit a pending composition before selections move away from it
    fn settle_for_selection_change(&mut self) {
        if self.poisoned.is_none() {
            self.flush_composition();
        }
    }

    pub(crate) fn set_selections(&mut self, selections: Vec<Selection>, primary: usize) -> Result<()> {
        let mut set = SelectionSet::from_vec(selections, primary, self.storage.len())?;
        let storage = &self.storage;
        set.for_each_mut(|selection| snap_to_grapheme(selection, storage));
        self.settle_for_selection_change();
        self.trace_selections(&set);
        self.selections = set;
        Ok(())
    }

    pub(crate) fn add_selection(&mut self, selection: Selection) -> Result<()> {
        let len = self.storage.len();
        if selection.end() > len {
            return Err(EngineError::out_of_range(selection.range(), len));
        }
        self.settle_for_selection_change();
        let mut selection = selection;
        snap_to_grapheme(&mut selection, &self.storage);
        let mut set = self.selections.clone();
        set.push(selection);
        self.trace_selections(&set);
        self.selections = set;
        Ok(())
    }

    pub(crate) fn select_all(&mut self) {
        self.settle_for_selection_change();
        self.selections = SelectionSet::single(Selection::new(0, self.storage.len()));
    }

    pub(crate) fn move_selections(&mut self, target: MoveTarget, extend: bool) {
        self.settle_for_selection_change();
        let storage = &self.storage;
        let mut set = self.selections.clone();
        set.for_each_mut(|selection| {
            *selection = crate::selection::move_selection(*selection, storage, target, extend);
        });
        self.trace_selections(&set);
        self.selections = set;
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Start composing over the primary selection. Other selections collapse.
    pub(crate) fn begin_composition(&mut self) -> Result<()> {
        self.begin(Capability::EditText)?;
        let primary = *self.selections.primary();
        let selections_before = self.selections.clone();
        let original = self.storage.read(primary.range())?;
        let composition = Composition::new(primary.start(), original, selections_before);

        if primary.is_empty() {
            self.selections = SelectionSet::single(Selection::caret(primary.start()));
        } else {
            let revision = self.revision + 1;
            let record = EditRecord::delete(
                primary.start(),
                composition.original(),
                revision,
                crate::history::GroupId::TRANSIENT,
            );
            let mut storage = self.storage.clone();
            record.apply(&mut storage)?;
            self.storage = storage;
            self.selections = SelectionSet::single(Selection::caret(primary.start()));
            self.journal.append(record);
            self.revision = revision;
            self.notify(ChangeKind::Composition);
        }
        self.composition = Some(composition);
        Ok(())
    }

    pub(crate) fn update_composition(&mut self, text: &str) -> Result<()> {
        self.require(Capability::EditText)?;
        let Some(composition) = self.composition.as_mut() else {
            return Err(EngineError::NoComposition);
        };
        if composition.marked() == text {
            return Ok(());
        }
        let revision = self.revision + 1;
        let records = composition.replace_marked(text, revision);
        let caret = composition.range().end;
        self.apply_transient(records, revision)?;
        self.selections = SelectionSet::single(Selection::caret(caret));
        Ok(())
    }

    pub(crate) fn commit_composition(&mut self) -> Result<bool> {
        self.require(Capability::EditText)?;
        if self.composition.is_none() {
            return Err(EngineError::NoComposition);
        }
        Ok(self.flush_composition())
    }

    pub(crate) fn cancel_composition(&mut self) -> Result<()> {
        self.ensure_writable()?;
        let Some(composition) = self.composition.take() else {
            return Err(EngineError::NoComposition);
        };
        let revision = self.revision + 1;
        let records = composition.rollback(revision);
        if records.is_empty() {
            self.selections = composition.selections_before().clone();
            return Ok(());
        }
        self.apply_transient(records, revision)?;
        let restored = composition.selections_before().clone();
        if restored.is_within(self.storage.len()) {
            self.selections = restored;
        }
        debug!(revision, "composition cancelled");
        Ok(())
    }

    /// Apply records that stay out of the undo history
    fn apply_transient(&mut self, records: Vec<EditRecord>, revision: u64) -> Result<()> {
        let mut storage = self.storage.clone();
        for record in &records {
            if let Err(err) = record.apply(&mut storage) {
                self.poison(&err);
                return Err(err);
            }
        }
        self.storage = storage;
        self.journal.extend(records);
        self.revision = revision;
        self.notify(ChangeKind::Composition);
        Ok(())
    }

    /// Promote a pending composition to a committed group. Returns whether a
    /// group was committed.
    fn flush_composition(&mut self) -> bool {
        let Some(composition) = self.composition.take() else {
            return false;
        };
        let revision = self.revision + 1;
        let id = self.history.next_group_id();
        let Some(group) = composition.into_group(id, revision, self.selections.clone()) else {
            return false;
        };
        self.history.commit(group);
        self.revision = revision;
        debug!(revision, group = id.0, "composition committed");
        self.notify(ChangeKind::Edit {
            group: id,
            origin: EditOrigin::Composition,
        });
        true
    }

    // =========================================================================
    // Restore
    // =========================================================================

    /// Replace the whole document. History, journal and composition are
    /// dropped; the revision moves past both the current and the snapshot's.
    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        let revision = self.revision.max(snapshot.revision) + 1;
        self.storage = TextStorage::from_text(&snapshot.text);
        self.modes.reset(snapshot.mode);
        self.selections = SelectionSet::default();
        self.history.clear();
        self.journal.reset(revision);
        self.composition = None;
        self.poisoned = None;
        self.revision = revision;
        debug!(revision, mode = %snapshot.mode, len = self.storage.len(), "document restored");
        self.notify(ChangeKind::Restore);
    }

    // =========================================================================
    // Suggestion rebasing
    // =========================================================================

    /// Carry `range`, valid at `base_revision`, forward to the current text.
    pub(crate) fn rebase_range(&self, base_revision: u64, range: Range<usize>) -> Result<Range<usize>> {
        if base_revision > self.revision {
            return Err(EngineError::StaleSuggestion(format!(
                "base revision {} is newer than the document ({})",
                base_revision, self.revision
            )));
        }
        let Some(records) = self.journal.changes_since(base_revision) else {
            return Err(EngineError::StaleSuggestion(format!(
                "revision {} is no longer in the edit log",
                base_revision
            )));
        };

        let (mut start, mut end) = (range.start, range.end);
        for record in &records {
            if record.touches(start, end) {
                return Err(EngineError::StaleSuggestion(format!(
                    "range {}..{} was edited at revision {}",
                    start,
                    end,
                    record.revision()
                )));
            }
            let pinned_end = start < end && record.kind() == EditKind::Insert && record.start() == end;
            start = record.map_offset(start);
            if !pinned_end {
                end = record.map_offset(end);
            }
        }
        Ok(start..end)
    }
}

/// Pull both ends of `selection` back onto grapheme boundaries
fn snap_to_grapheme(selection: &mut Selection, storage: &TextStorage) {
    for offset in [&mut selection.anchor, &mut selection.active] {
        if !storage.is_grapheme_boundary(*offset) {
            *offset = storage.prev_grapheme_boundary(*offset);
        }
    }
}

/// Sort `ranges` and join the ones that overlap or touch
fn merge_ranges(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.sort_by_key(|range| (range.start, range.end));
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::new(text, &EngineConfig::default())
    }

    fn insert(doc: &mut Document, at: usize, text: &str) -> bool {
        doc.apply_steps(
            Capability::EditText,
            EditOrigin::Programmatic,
            vec![EditStep::Insert {
                at,
                text: text.to_string(),
            }],
        )
        .unwrap()
    }

    #[test]
    fn test_failed_step_leaves_no_trace() {
        let mut d = doc("abc");
        let err = d
            .apply_steps(
                Capability::EditText,
                EditOrigin::Programmatic,
                vec![
                    EditStep::Insert {
                        at: 0,
                        text: "x".to_string(),
                    },
                    EditStep::Delete(2..9),
                ],
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::OutOfRange { .. }));
        assert_eq!(d.storage().content(), "abc");
        assert_eq!(d.revision(), 0);
        assert!(!d.history().can_undo());
    }

    #[test]
    fn test_merge_ranges_joins_overlaps() {
        let merged = merge_ranges(vec![1..3, 5..6, 0..2, 3..4]);
        assert_eq!(merged, vec![0..4, 5..6]);
    }

    #[test]
    fn test_snap_to_grapheme() {
        let storage = TextStorage::from_text("e\u{301}x");
        let mut selection = Selection::new(1, 3);
        snap_to_grapheme(&mut selection, &storage);
        assert_eq!(selection, Selection::new(0, 3));
    }

    #[test]
    fn test_empty_steps_are_noop() {
        let mut d = doc("abc");
        assert!(!insert(&mut d, 1, ""));
        assert_eq!(d.revision(), 0);
    }

    #[test]
    fn test_undo_restores_selections() {
        let mut d = doc("");
        d.insert_at_selections(EditOrigin::Paste, "hello").unwrap();
        assert_eq!(d.selections().primary().active, 5);
        d.undo().unwrap();
        assert_eq!(d.selections().primary().active, 0);
        d.redo().unwrap();
        assert_eq!(d.selections().primary().active, 5);
    }

    #[test]
    fn test_corrupted_history_poisons_document() {
        let mut d = doc("");
        insert(&mut d, 0, "hello");
        // tamper with the text behind the history's back
        d.storage.delete(0..2).unwrap();

        let err = d.undo().unwrap_err();
        assert!(matches!(err, EngineError::InternalConsistency(_)));
        assert!(d.is_poisoned());
        assert_eq!(d.storage().content(), "llo");

        let err = d
            .apply_steps(
                Capability::EditText,
                EditOrigin::Programmatic,
                vec![EditStep::Insert {
                    at: 0,
                    text: "x".to_string(),
                }],
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::InternalConsistency(_)));
        assert_eq!(d.snapshot().text, "llo");
    }

    #[test]
    fn test_rebase_through_later_edits() {
        let mut d = doc("hello world");
        let base = d.revision();
        insert(&mut d, 0, ">> ");
        assert_eq!(d.rebase_range(base, 6..11).unwrap(), 9..14);

        insert(&mut d, 14, "!");
        assert_eq!(d.rebase_range(base, 6..11).unwrap(), 9..14);

        insert(&mut d, 11, "X");
        assert!(matches!(
            d.rebase_range(base, 6..11),
            Err(EngineError::StaleSuggestion(_))
        ));
    }

    #[test]
    fn test_restore_resets_state() {
        let mut d = doc("abc");
        insert(&mut d, 3, "d");
        d.restore(Snapshot {
            text: "xyz".to_string(),
            mode: Mode::Outline,
            revision: 10,
        });
        assert_eq!(d.revision(), 11);
        assert_eq!(d.mode(), Mode::Outline);
        assert!(!d.history().can_undo());
        assert_eq!(d.changes_since(11), Some(Vec::new()));
        assert_eq!(d.changes_since(1), None);
    }
}
