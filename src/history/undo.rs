//! Undo/redo stacks of edit groups.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use unicode_segmentation::UnicodeSegmentation;

use super::group::{EditGroup, EditOrigin};
use super::record::GroupId;

/// When consecutive typing merges into one undo step.
///
/// A typed grapheme joins the previous group only if that group is an
/// uninterrupted typing run ending exactly where the new text starts, it was
/// committed within `window`, and the new text does not open a new word
/// (whitespace typed after non-whitespace always starts a new group).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoalescePolicy {
    pub enabled: bool,
    pub window: Duration,
}

impl Default for CoalescePolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            window: Duration::from_millis(1000),
        }
    }
}

impl CoalescePolicy {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Whether typing `text` at `start` at time `now` may extend `last`
    pub fn allows(&self, last: &EditGroup, start: usize, text: &str, now: Instant) -> bool {
        if !self.enabled || last.origin() != EditOrigin::Typing {
            return false;
        }
        if !last.is_contiguous_insert_run() {
            return false;
        }
        let Some(previous) = last.last_record() else {
            return false;
        };
        if previous.end() != start {
            return false;
        }
        if now.saturating_duration_since(last.committed_at()) > self.window {
            return false;
        }
        if text.graphemes(true).count() != 1 {
            return false;
        }
        let typed_space = text.chars().all(char::is_whitespace);
        let after_word = previous
            .text()
            .chars()
            .last()
            .is_some_and(|ch| !ch.is_whitespace());
        !(typed_space && after_word)
    }
}

/// Done and redo stacks. New committed work discards the redo branch.
#[derive(Debug, Clone)]
pub struct UndoStack {
    done: VecDeque<EditGroup>,
    redo: Vec<EditGroup>,
    limit: usize,
    policy: CoalescePolicy,
    next_id: u64,
    /// Set by a mode switch; the next typed text opens a new group
    run_closed: bool,
}

impl UndoStack {
    pub fn new(limit: usize, policy: CoalescePolicy) -> Self {
        Self {
            done: VecDeque::new(),
            redo: Vec::new(),
            limit: limit.max(1),
            policy,
            next_id: 1,
            run_closed: false,
        }
    }

    pub fn next_group_id(&mut self) -> GroupId {
        let id = GroupId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn policy(&self) -> CoalescePolicy {
        self.policy
    }

    /// Push an applied group onto the done stack and clear the redo stack.
    ///
    /// The oldest groups are evicted once `limit` is exceeded; their effect
    /// becomes part of the history base.
    pub fn commit(&mut self, group: EditGroup) {
        self.redo.clear();
        self.run_closed = false;
        self.done.push_back(group);
        while self.done.len() > self.limit {
            if let Some(evicted) = self.done.pop_front() {
                tracing::debug!(group = evicted.id().0, "evicted oldest undo group");
            }
        }
    }

    /// The group typing `text` at `start` should extend, if any
    pub fn coalesce_target(
        &mut self,
        start: usize,
        text: &str,
        now: Instant,
    ) -> Option<&mut EditGroup> {
        if self.run_closed || !self.redo.is_empty() {
            return None;
        }
        let policy = self.policy;
        self.done
            .back_mut()
            .filter(|last| policy.allows(last, start, text, now))
    }

    /// End the current typing run without committing anything
    pub fn close_typing_run(&mut self) {
        self.run_closed = true;
    }

    pub fn peek_undo(&self) -> Option<&EditGroup> {
        self.done.back()
    }

    pub fn peek_redo(&self) -> Option<&EditGroup> {
        self.redo.last()
    }

    /// Move the newest done group onto the redo stack
    pub fn finish_undo(&mut self) -> Option<&EditGroup> {
        let group = self.done.pop_back()?;
        self.redo.push(group);
        self.redo.last()
    }

    /// Move the newest redo group back onto the done stack (keeps the rest of redo)
    pub fn finish_redo(&mut self) -> Option<&EditGroup> {
        let group = self.redo.pop()?;
        self.done.push_back(group);
        self.done.back()
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.done.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo.len()
    }

    /// Groups on the done stack, oldest first
    pub fn done(&self) -> impl Iterator<Item = &EditGroup> {
        self.done.iter()
    }

    pub fn clear(&mut self) {
        self.done.clear();
        self.redo.clear();
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(1000, CoalescePolicy::default())
    }
}
