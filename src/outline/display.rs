//! Write-mode display projection: heading markers are hidden and offsets are
//! mapped between the displayed text and the document.

use std::ops::Range;

use ropey::Rope;

use super::extract::headings;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayMap {
    /// Sorted, non-overlapping document ranges that are not displayed
    hidden: Vec<Range<usize>>,
    revision: u64,
}

impl DisplayMap {
    pub fn build(text: &Rope, revision: u64) -> Self {
        let mut hidden = Vec::new();
        for heading in headings(text) {
            if !heading.marker.is_empty() {
                hidden.push(heading.marker);
            }
        }
        Self { hidden, revision }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn hidden_ranges(&self) -> &[Range<usize>] {
        &self.hidden
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden.iter().map(|r| r.len()).sum()
    }

    pub fn is_hidden(&self, offset: usize) -> bool {
        self.hidden.iter().any(|r| r.contains(&offset))
    }

    /// Document offset to display offset. Offsets inside a hidden marker map
    /// to where the marker would have been.
    pub fn to_display(&self, offset: usize) -> usize {
        let mut removed = 0;
        for range in &self.hidden {
            if range.end <= offset {
                removed += range.len();
            } else {
                if range.start < offset {
                    removed += offset - range.start;
                }
                break;
            }
        }
        offset - removed
    }

    /// Display offset to document offset. A display offset at the start of a
    /// heading maps past its marker.
    pub fn to_document(&self, offset: usize) -> usize {
        let mut doc = offset;
        for range in &self.hidden {
            if range.start <= doc {
                doc += range.len();
            } else {
                break;
            }
        }
        doc
    }

    /// The text as displayed
    pub fn display_text(&self, text: &Rope) -> String {
        let mut out = String::with_capacity(text.len_bytes());
        let mut pos = 0;
        for range in &self.hidden {
            out.extend(text.slice(pos..range.start).chars());
            pos = range.end;
        }
        out.extend(text.slice(pos..).chars());
        out
    }
}
