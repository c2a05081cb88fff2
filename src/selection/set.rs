//! The set of live selections of a document.

use serde::{Deserialize, Serialize};

use super::range::Selection;
use crate::error::{EngineError, Result};
use crate::history::EditRecord;

/// One or more selections with a primary one. Never empty.
///
/// Selections are kept sorted by start offset and non-overlapping; touching
/// carets are merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    selections: Vec<Selection>,
    primary: usize,
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self::single(Selection::caret(0))
    }
}

impl SelectionSet {
    pub fn single(selection: Selection) -> Self {
        Self {
            selections: vec![selection],
            primary: 0,
        }
    }

    /// Build a set from `selections`, validated against a text of length `len`.
    pub fn from_vec(selections: Vec<Selection>, primary: usize, len: usize) -> Result<Self> {
        if selections.is_empty() {
            return Err(EngineError::out_of_range(0..0, 0));
        }
        if primary >= selections.len() {
            return Err(EngineError::out_of_range(primary..primary, selections.len()));
        }
        if let Some(bad) = selections.iter().find(|s| s.end() > len) {
            return Err(EngineError::out_of_range(bad.range(), len));
        }
        let mut set = Self {
            selections,
            primary,
        };
        set.normalize();
        Ok(set)
    }

    pub fn primary(&self) -> &Selection {
        &self.selections[self.primary]
    }

    pub fn primary_index(&self) -> usize {
        self.primary
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Selection> {
        self.selections.iter()
    }

    pub fn as_slice(&self) -> &[Selection] {
        &self.selections
    }

    pub fn is_single_caret(&self) -> bool {
        self.selections.len() == 1 && self.selections[0].is_empty()
    }

    /// Whether every offset lies within `0..=len`
    pub fn is_within(&self, len: usize) -> bool {
        self.selections.iter().all(|s| s.end() <= len)
    }

    /// Add a selection and make it primary
    pub fn push(&mut self, selection: Selection) {
        self.selections.push(selection);
        self.primary = self.selections.len() - 1;
        self.normalize();
    }

    /// Collapse to the primary selection only
    pub fn collapse_to_primary(&mut self) {
        let primary = self.selections[self.primary];
        self.selections = vec![primary];
        self.primary = 0;
    }

    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut Selection)) {
        for selection in &mut self.selections {
            f(selection);
        }
        self.normalize();
    }

    /// Re-map every selection across one applied record
    pub fn transform(&mut self, record: &EditRecord, len: usize) {
        for selection in &mut self.selections {
            selection.transform(record, len);
        }
        self.normalize();
    }

    /// Sort by start and merge overlapping selections, keeping the primary.
    fn normalize(&mut self) {
        if self.selections.len() < 2 {
            return;
        }
        let primary = self.selections[self.primary];
        let mut indexed: Vec<(bool, Selection)> = self
            .selections
            .iter()
            .enumerate()
            .map(|(i, s)| (i == self.primary, *s))
            .collect();
        indexed.sort_by_key(|(_, s)| (s.start(), s.end()));

        let mut merged: Vec<(bool, Selection)> = Vec::with_capacity(indexed.len());
        for (is_primary, sel) in indexed {
            match merged.last_mut() {
                Some((last_primary, last)) if last.overlaps(&sel) => {
                    let start = last.start().min(sel.start());
                    let end = last.end().max(sel.end());
                    let reversed = if is_primary {
                        sel.is_reversed()
                    } else {
                        last.is_reversed()
                    };
                    *last = if reversed {
                        Selection::new(end, start)
                    } else {
                        Selection::new(start, end)
                    };
                    *last_primary |= is_primary;
                }
                _ => merged.push((is_primary, sel)),
            }
        }

        self.primary = merged.iter().position(|(p, _)| *p).unwrap_or(0);
        self.selections = merged.into_iter().map(|(_, s)| s).collect();
        if self.selections.len() == 1 {
            self.selections[0].goal_column = primary.goal_column;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::GroupId;

    #[test]
    fn test_default_is_caret_at_zero() {
        let set = SelectionSet::default();
        assert!(set.is_single_caret());
        assert_eq!(set.primary(), &Selection::caret(0));
    }

    #[test]
    fn test_from_vec_validates_bounds() {
        assert!(SelectionSet::from_vec(vec![Selection::new(0, 6)], 0, 5).is_err());
        assert!(SelectionSet::from_vec(Vec::new(), 0, 5).is_err());
        assert!(SelectionSet::from_vec(vec![Selection::caret(1)], 1, 5).is_err());
        assert!(SelectionSet::from_vec(vec![Selection::new(0, 5)], 0, 5).is_ok());
    }

    #[test]
    fn test_sorted_and_primary_tracked() {
        let set = SelectionSet::from_vec(
            vec![Selection::caret(9), Selection::caret(1), Selection::caret(4)],
            0,
            10,
        )
        .unwrap();
        let offsets: Vec<usize> = set.iter().map(|s| s.active).collect();
        assert_eq!(offsets, vec![1, 4, 9]);
        assert_eq!(set.primary(), &Selection::caret(9));
    }

    #[test]
    fn test_carets_collapsed_by_delete_merge() {
        let mut set =
            SelectionSet::from_vec(vec![Selection::caret(6), Selection::caret(8)], 1, 20).unwrap();
        set.transform(&EditRecord::delete(5, "123456", 1, GroupId(1)), 14);
        assert_eq!(set.len(), 1);
        assert_eq!(set.primary(), &Selection::caret(5));
    }

    #[test]
    fn test_overlapping_ranges_merge() {
        let set =
            SelectionSet::from_vec(vec![Selection::new(0, 4), Selection::new(6, 2)], 1, 10).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.primary(), &Selection::new(6, 0));
    }

    #[test]
    fn test_push_makes_primary() {
        let mut set = SelectionSet::default();
        set.push(Selection::caret(3));
        assert_eq!(set.len(), 2);
        assert_eq!(set.primary(), &Selection::caret(3));
        set.collapse_to_primary();
        assert_eq!(set.len(), 1);
        assert_eq!(set.primary(), &Selection::caret(3));
    }
}
