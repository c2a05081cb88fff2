//! Structural edits expressed as plain delete/insert steps.
//!
//! Each plan is a list of ops applied in order; every op's offsets refer to
//! the text as left by the ops before it.

use ropey::Rope;

use super::extract::{headings, Heading};
use super::MAX_HEADING_LEVEL;
use crate::error::{EngineError, Result};
use crate::history::EditStep;

fn heading_at(all: &[Heading], index: usize) -> Result<&Heading> {
    all.get(index)
        .ok_or_else(|| EngineError::out_of_range(index..index + 1, all.len()))
}

fn check_level(level: u8, min: u8) -> Result<()> {
    if level < min || level > MAX_HEADING_LEVEL {
        let level = level as usize;
        return Err(EngineError::out_of_range(
            level..level,
            MAX_HEADING_LEVEL as usize,
        ));
    }
    Ok(())
}

fn marker(level: u8) -> String {
    let mut s = "#".repeat(level as usize);
    s.push(' ');
    s
}

fn ends_with_newline(text: &Rope, end: usize) -> bool {
    end > 0 && text.char(end - 1) == '\n'
}

/// Move section `index` (with its subsections) before section `before`, or to
/// the end of the document when `before` is None.
pub(crate) fn plan_move_section(
    text: &Rope,
    index: usize,
    before: Option<usize>,
) -> Result<Vec<EditStep>> {
    let all = headings(text);
    let len = text.len_chars();
    let section = heading_at(&all, index)?;
    let (start, end) = (section.line_start, section.section_end);
    let target = match before {
        Some(j) => heading_at(&all, j)?.line_start,
        None => len,
    };

    if target == start || target == end {
        return Ok(Vec::new());
    }
    if target > start && target < end {
        // cannot move a section into itself
        return Err(EngineError::out_of_range(target..target, len));
    }

    let moved = text.slice(start..end).to_string();
    let removed = end - start;

    if !ends_with_newline(text, end) {
        // last section without a trailing newline; take the preceding one along
        let delete_from = if ends_with_newline(text, start) {
            start - 1
        } else {
            start
        };
        return Ok(vec![
            EditStep::Delete(delete_from..end),
            EditStep::Insert {
                at: target,
                text: format!("{}\n", moved),
            },
        ]);
    }

    let at = if target > start {
        target - removed
    } else {
        target
    };
    let text_to_insert = if target == len && !ends_with_newline(text, len) {
        format!("\n{}", moved.trim_end_matches('\n'))
    } else {
        moved
    };
    Ok(vec![
        EditStep::Delete(start..end),
        EditStep::Insert {
            at,
            text: text_to_insert,
        },
    ])
}

/// Change the marker of heading `index`. Level 0 turns the heading into body
/// text.
pub(crate) fn plan_set_heading_level(
    text: &Rope,
    index: usize,
    level: u8,
) -> Result<Vec<EditStep>> {
    check_level(level, 0)?;
    let all = headings(text);
    let heading = heading_at(&all, index)?;
    if heading.level == level {
        return Ok(Vec::new());
    }
    if level == 0 {
        return Ok(vec![EditStep::Delete(heading.marker.clone())]);
    }
    let indent = heading.marker.len() - heading.level as usize - 1;
    let hashes_start = heading.marker.start + indent;
    Ok(vec![
        EditStep::Delete(hashes_start..heading.marker.end),
        EditStep::Insert {
            at: hashes_start,
            text: marker(level),
        },
    ])
}

/// Insert a new heading line before heading `before`, or at the end.
pub(crate) fn plan_insert_heading(
    text: &Rope,
    before: Option<usize>,
    level: u8,
    title: &str,
) -> Result<Vec<EditStep>> {
    check_level(level, 1)?;
    if title.contains(['\n', '\r']) {
        return Err(EngineError::InvalidText(
            "heading title must be a single line".to_string(),
        ));
    }
    let line = format!("{}{}", marker(level), title.trim());
    let op = match before {
        Some(j) => {
            let all = headings(text);
            EditStep::Insert {
                at: heading_at(&all, j)?.line_start,
                text: format!("{}\n", line),
            }
        }
        None => {
            let len = text.len_chars();
            let text = if len > 0 && !ends_with_newline(text, len) {
                format!("\n{}", line)
            } else {
                line
            };
            EditStep::Insert { at: len, text }
        }
    };
    Ok(vec![op])
}
