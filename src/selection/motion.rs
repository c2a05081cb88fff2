//! Cursor motions over the text. Motions never change the text.

use serde::{Deserialize, Serialize};

use super::range::Selection;
use crate::text::{Position, TextStorage};
use crate::util::is_word_boundary;

/// Target for cursor movement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveTarget {
    /// One grapheme cluster left
    Left,
    /// One grapheme cluster right
    Right,
    WordLeft,
    WordRight,
    LineStart,
    LineEnd,
    /// One line up, keeping the goal column
    Up,
    /// One line down, keeping the goal column
    Down,
    DocumentStart,
    DocumentEnd,
}

impl MoveTarget {
    fn is_vertical(self) -> bool {
        matches!(self, MoveTarget::Up | MoveTarget::Down)
    }
}

/// Move one selection. With `extend` the anchor stays; otherwise the
/// selection collapses to the new caret. A non-empty selection moved left or
/// right without `extend` collapses to its start or end.
pub(crate) fn move_selection(
    selection: Selection,
    text: &TextStorage,
    target: MoveTarget,
    extend: bool,
) -> Selection {
    if !extend && !selection.is_empty() {
        match target {
            MoveTarget::Left | MoveTarget::WordLeft => return Selection::caret(selection.start()),
            MoveTarget::Right | MoveTarget::WordRight => return Selection::caret(selection.end()),
            _ => {}
        }
    }

    let from = selection.active.min(text.len());
    let (offset, goal_column) = match target {
        MoveTarget::Left => (text.prev_grapheme_boundary(from), None),
        MoveTarget::Right => (text.next_grapheme_boundary(from), None),
        MoveTarget::WordLeft => (word_left(text, from), None),
        MoveTarget::WordRight => (word_right(text, from), None),
        MoveTarget::LineStart => {
            let position = position_of(text, from);
            (from - position.column, None)
        }
        MoveTarget::LineEnd => {
            let position = position_of(text, from);
            (from - position.column + text.line_length(position.line), None)
        }
        MoveTarget::Up | MoveTarget::Down => vertical(text, &selection, from, target),
        MoveTarget::DocumentStart => (0, None),
        MoveTarget::DocumentEnd => (text.len(), None),
    };

    let mut moved = selection;
    if extend {
        moved.extend_to(offset);
    } else {
        moved.collapse_to(offset);
    }
    moved.goal_column = if target.is_vertical() { goal_column } else { None };
    moved
}

fn position_of(text: &TextStorage, offset: usize) -> Position {
    text.offset_to_position(offset).unwrap_or_default()
}

fn vertical(
    text: &TextStorage,
    selection: &Selection,
    from: usize,
    target: MoveTarget,
) -> (usize, Option<usize>) {
    let position = position_of(text, from);
    let goal = selection.goal_column.unwrap_or(position.column);
    let line = match target {
        MoveTarget::Up if position.line == 0 => return (0, Some(goal)),
        MoveTarget::Up => position.line - 1,
        _ if position.line + 1 >= text.line_count() => return (text.len(), Some(goal)),
        _ => position.line + 1,
    };
    let column = goal.min(text.line_length(line));
    let mut offset = text
        .position_to_offset(Position::new(line, column))
        .unwrap_or(from);
    if !text.is_grapheme_boundary(offset) {
        offset = text.prev_grapheme_boundary(offset);
    }
    (offset, Some(goal))
}

fn word_left(text: &TextStorage, from: usize) -> usize {
    let mut pos = from;
    // skip whitespace and punctuation, then the word itself
    while pos > 0 && text.char_at(pos - 1).is_some_and(is_word_boundary) {
        pos -= 1;
    }
    while pos > 0 && text.char_at(pos - 1).is_some_and(|ch| !is_word_boundary(ch)) {
        pos -= 1;
    }
    pos
}

fn word_right(text: &TextStorage, from: usize) -> usize {
    let len = text.len();
    let mut pos = from;
    while pos < len && text.char_at(pos).is_some_and(|ch| !is_word_boundary(ch)) {
        pos += 1;
    }
    while pos < len && text.char_at(pos).is_some_and(is_word_boundary) {
        pos += 1;
    }
    pos
}
