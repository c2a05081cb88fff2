//! Heading detection and tree building

use std::ops::Range;

use ropey::Rope;

use super::{LineKind, OutlineNode, MAX_HEADING_LEVEL};

/// Parse a heading marker: optional leading spaces/tabs, 1 to 6 `#`, then a
/// space. Returns the level and the marker length in chars (leading
/// whitespace and the space included).
pub fn parse_heading(line: &str) -> Option<(u8, usize)> {
    let indent = line
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();
    let mut rest = line.chars().skip(indent);
    let mut hashes = 0usize;
    loop {
        match rest.next() {
            Some('#') => hashes += 1,
            Some(' ') if hashes > 0 => break,
            _ => return None,
        }
    }
    if hashes > MAX_HEADING_LEVEL as usize {
        return None;
    }
    Some((hashes as u8, indent + hashes + 1))
}

fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

fn line_text(text: &Rope, idx: usize) -> String {
    let line = text.line(idx).to_string();
    line.trim_end_matches(&['\n', '\r'][..]).to_string()
}

/// Classify every hard line of the text. A heading never extends past its
/// own line.
pub fn classify_lines(text: &Rope) -> Vec<LineKind> {
    (0..text.len_lines())
        .map(|idx| {
            let line = line_text(text, idx);
            if let Some((level, _)) = parse_heading(&line) {
                LineKind::HeadingStart { level }
            } else if is_blank(&line) {
                LineKind::Blank
            } else {
                LineKind::Body
            }
        })
        .collect()
}

/// A heading with the offsets structural edits need
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Heading {
    pub level: u8,
    pub title: String,
    pub line: usize,
    pub line_start: usize,
    /// Marker chars (indent, hashes, space) in document offsets
    pub marker: Range<usize>,
    /// Heading text after the marker, up to the line break
    pub text_range: Range<usize>,
    pub section_end: usize,
}

pub(crate) fn headings(text: &Rope) -> Vec<Heading> {
    let kinds = classify_lines(text);
    let mut headings: Vec<Heading> = Vec::new();

    for (idx, kind) in kinds.iter().enumerate() {
        match kind {
            LineKind::HeadingStart { level } => {
                let line = line_text(text, idx);
                let marker_len = parse_heading(&line).map_or(0, |(_, len)| len);
                let line_start = text.line_to_char(idx);
                let title: String = line.chars().skip(marker_len).collect();
                headings.push(Heading {
                    level: *level,
                    title: title.trim().to_string(),
                    line: idx,
                    line_start,
                    marker: line_start..line_start + marker_len,
                    text_range: line_start + marker_len..line_start + line.chars().count(),
                    section_end: text.len_chars(),
                });
            }
            LineKind::Body | LineKind::Blank => {}
        }
    }

    for i in 0..headings.len() {
        let level = headings[i].level;
        if let Some(next) = headings[i + 1..].iter().find(|h| h.level <= level) {
            headings[i].section_end = next.line_start;
        }
    }

    headings
}

// =============================================================================
// Level-based nesting
// =============================================================================

pub(crate) fn build_heading_tree(headings: Vec<Heading>) -> Vec<OutlineNode> {
    let mut roots: Vec<OutlineNode> = Vec::new();
    let mut stack: Vec<OutlineNode> = Vec::new();

    for heading in headings {
        let node = OutlineNode {
            level: heading.level,
            title: heading.title,
            line: heading.line,
            range: heading.text_range,
            children: Vec::new(),
        };

        // Pop everything at same level or deeper
        while stack.last().is_some_and(|top| top.level >= node.level) {
            if let Some(finished) = stack.pop() {
                attach(&mut stack, &mut roots, finished);
            }
        }

        stack.push(node);
    }

    // Flush remaining stack
    while let Some(finished) = stack.pop() {
        attach(&mut stack, &mut roots, finished);
    }

    roots
}

fn attach(stack: &mut [OutlineNode], roots: &mut Vec<OutlineNode>, node: OutlineNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else {
        roots.push(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_heading() {
        assert_eq!(parse_heading("# Title"), Some((1, 2)));
        assert_eq!(parse_heading("###### Deep"), Some((6, 7)));
        assert_eq!(parse_heading("  ## Indented"), Some((2, 5)));
        assert_eq!(parse_heading("####### Too deep"), None);
        assert_eq!(parse_heading("#NoSpace"), None);
        assert_eq!(parse_heading("#"), None);
        assert_eq!(parse_heading("Not # a heading"), None);
        assert_eq!(parse_heading(""), None);
    }

    #[test]
    fn test_classify_lines() {
        let text = Rope::from_str("# Title\nfirst line\n\nbody\n## Next\n");
        assert_eq!(
            classify_lines(&text),
            vec![
                LineKind::HeadingStart { level: 1 },
                LineKind::Body,
                LineKind::Blank,
                LineKind::Body,
                LineKind::HeadingStart { level: 2 },
                LineKind::Blank,
            ]
        );
    }

    #[test]
    fn test_title_stops_at_line_break() {
        let text = Rope::from_str("# Notes\nIdea: a lighthouse.\n\nBody");
        let found = headings(&text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Notes");
        assert_eq!(found[0].text_range, 2..7);
        assert_eq!(found[0].section_end, 33);
    }

    #[test]
    fn test_section_ends() {
        let text = Rope::from_str("# A\n## B\ntext\n## C\n# D\n");
        let found = headings(&text);
        let ends: Vec<_> = found.iter().map(|h| (h.line_start, h.section_end)).collect();
        assert_eq!(ends, vec![(0, 19), (4, 14), (14, 19), (19, 23)]);
    }

    #[test]
    fn test_heading_tree_basic() {
        let text = Rope::from_str("# Title\n\n## Section 1\n\n### Sub 1.1\n\n## Section 2\n");
        let roots = build_heading_tree(headings(&text));
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].title, "Title");
        assert_eq!(roots[0].children.len(), 2);
        assert_eq!(roots[0].children[0].title, "Section 1");
        assert_eq!(roots[0].children[0].children[0].title, "Sub 1.1");
        assert_eq!(roots[0].children[1].title, "Section 2");
    }

    #[test]
    fn test_heading_tree_no_h1() {
        let text = Rope::from_str("## A\n## B\n#### C\n");
        let roots = build_heading_tree(headings(&text));
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[1].children[0].title, "C");
        assert_eq!(roots[1].children[0].line, 2);
    }
}
