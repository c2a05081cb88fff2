//! Document outline
//!
//! The outline is a projection of the text: headings are parsed from lines
//! starting with `#` markers and recomputed on demand. Nothing here is stored
//! alongside the text.

mod display;
mod extract;
mod structure;

pub use display::DisplayMap;
pub use extract::{classify_lines, parse_heading};
pub(crate) use structure::{plan_insert_heading, plan_move_section, plan_set_heading_level};

use std::ops::Range;

use ropey::Rope;
use serde::{Deserialize, Serialize};

/// Deepest heading level recognised
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Role of one line in the outline projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// First line of a heading, `level` is the number of `#` markers
    HeadingStart { level: u8 },
    Body,
    Blank,
}

/// A heading in the outline tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineNode {
    pub level: u8,
    pub title: String,
    /// Line of the heading marker
    pub line: usize,
    /// Offsets of the heading text, marker excluded
    pub range: Range<usize>,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Whether this node has children (can be expanded/collapsed)
    pub fn is_collapsible(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Complete outline for a document at one revision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineData {
    pub revision: u64,
    pub roots: Vec<OutlineNode>,
}

impl OutlineData {
    pub fn build(text: &Rope, revision: u64) -> Self {
        let headings = extract::headings(text);
        Self {
            revision,
            roots: extract::build_heading_tree(headings),
        }
    }

    /// Check if the outline has any headings
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of headings in the tree
    pub fn heading_count(&self) -> usize {
        fn count(nodes: &[OutlineNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.roots)
    }
}

/// A heading together with everything up to the next heading of the same or
/// higher rank. Sections nest: a level-2 section contains its level-3 ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Position of the heading in document order
    pub index: usize,
    pub level: u8,
    pub title: String,
    pub line: usize,
    /// Heading line start through the start of the next sibling or ancestor
    pub range: Range<usize>,
}

/// Sections in document order, one per heading
pub fn sections(text: &Rope) -> Vec<Section> {
    extract::headings(text)
        .into_iter()
        .enumerate()
        .map(|(index, heading)| Section {
            index,
            level: heading.level,
            title: heading.title,
            line: heading.line,
            range: heading.line_start..heading.section_end,
        })
        .collect()
}
