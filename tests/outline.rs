//! Outline tests - projection over the text and structural edits

mod common;

use wordsmith::outline::LineKind;
use wordsmith::{DocumentEngine, EngineError, Mode};

const BOOK: &str = "# Part One\n\nIntro.\n\n## Chapter 1\n\nText.\n\n# Part Two\n";

fn outline_engine() -> DocumentEngine {
    let engine = DocumentEngine::with_text(BOOK);
    engine.request_mode_switch(Mode::Outline).unwrap();
    engine
}

// ========================================================================
// Projection
// ========================================================================

#[test]
fn test_outline_tree() {
    let engine = DocumentEngine::with_text(BOOK);
    let outline = engine.outline();

    assert_eq!(outline.heading_count(), 3);
    assert_eq!(outline.revision, 0);
    assert_eq!(outline.roots.len(), 2);
    assert_eq!(outline.roots[0].title, "Part One");
    assert_eq!(outline.roots[0].children[0].title, "Chapter 1");
    assert_eq!(outline.roots[0].children[0].line, 4);
    assert_eq!(outline.roots[1].title, "Part Two");
    assert!(!outline.roots[1].is_collapsible());
}

#[test]
fn test_outline_follows_edits() {
    let engine = DocumentEngine::with_text(BOOK);
    common::insert(&engine, 0, "## Preface\n\n");

    let outline = engine.outline();
    assert_eq!(outline.revision, 1);
    assert_eq!(outline.heading_count(), 4);
    assert_eq!(outline.roots[0].title, "Preface");
}

#[test]
fn test_sections_nest() {
    let engine = DocumentEngine::with_text(BOOK);
    let sections = engine.sections();

    let ranges: Vec<_> = sections.iter().map(|s| s.range.clone()).collect();
    assert_eq!(ranges, vec![0..41, 20..41, 41..52]);
    assert_eq!(sections[1].level, 2);
}

#[test]
fn test_line_kinds() {
    let engine = DocumentEngine::with_text("# Long\ntitle\n\nbody\n  #not a heading");
    assert_eq!(
        engine.line_kinds(),
        vec![
            LineKind::HeadingStart { level: 1 },
            LineKind::Body,
            LineKind::Blank,
            LineKind::Body,
            LineKind::Body,
        ]
    );
    assert_eq!(engine.outline().roots[0].title, "Long");
}

#[test]
fn test_display_map_hides_markers() {
    let engine = DocumentEngine::with_text(BOOK);
    let map = engine.display_map();

    let rope = engine.text_snapshot().rope().clone();
    assert_eq!(
        map.display_text(&rope),
        "Part One\n\nIntro.\n\nChapter 1\n\nText.\n\nPart Two\n"
    );
    assert_eq!(map.hidden_count(), 7);
    assert_eq!(map.to_display(23), 18);
    assert_eq!(map.to_document(18), 23);
    assert_eq!(map.to_document(0), 2);
}

// ========================================================================
// Structural edits
// ========================================================================

#[test]
fn test_move_section_is_one_undo_step() {
    let engine = outline_engine();
    engine.move_section(2, Some(0)).unwrap();
    assert_eq!(
        engine.text(),
        "# Part Two\n# Part One\n\nIntro.\n\n## Chapter 1\n\nText.\n\n"
    );

    engine.request_undo().unwrap();
    assert_eq!(engine.text(), BOOK);
}

#[test]
fn test_move_section_carries_children() {
    let engine = outline_engine();
    engine.move_section(0, None).unwrap();
    assert_eq!(
        engine.text(),
        "# Part Two\n# Part One\n\nIntro.\n\n## Chapter 1\n\nText.\n\n"
    );
}

#[test]
fn test_move_section_into_itself_rejected() {
    let engine = outline_engine();
    let revision = engine.get_revision();
    let err = engine.move_section(0, Some(1)).unwrap_err();
    assert!(matches!(err, EngineError::OutOfRange { .. }));
    assert_eq!(engine.get_revision(), revision);
    assert_eq!(engine.text(), BOOK);
}

#[test]
fn test_set_heading_level() {
    let engine = outline_engine();
    engine.set_heading_level(1, 3).unwrap();
    assert!(engine.text().contains("\n### Chapter 1\n"));
    assert_eq!(engine.outline().roots[0].children[0].level, 3);

    engine.set_heading_level(1, 0).unwrap();
    assert_eq!(engine.outline().heading_count(), 2);
    assert!(engine.text().contains("\nChapter 1\n"));

    let err = engine.set_heading_level(0, 7).unwrap_err();
    assert!(matches!(err, EngineError::OutOfRange { .. }));
}

#[test]
fn test_insert_heading() {
    let engine = outline_engine();
    engine.insert_heading(Some(2), 2, "Chapter 2").unwrap();

    let titles: Vec<String> = engine.sections().into_iter().map(|s| s.title).collect();
    assert_eq!(titles, vec!["Part One", "Chapter 1", "Chapter 2", "Part Two"]);

    let err = engine.insert_heading(None, 1, "two\nlines").unwrap_err();
    assert!(matches!(err, EngineError::InvalidText(_)));
}

#[test]
fn test_structural_edits_allowed_in_write_mode() {
    let engine = DocumentEngine::with_text(BOOK);
    engine.set_heading_level(2, 2).unwrap();
    assert_eq!(engine.sections()[2].level, 2);
}
