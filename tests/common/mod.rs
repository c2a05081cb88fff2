//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use wordsmith::{DocumentEngine, EditRequest, EngineConfig, Selection};

/// Engine over `text` with the caret at `offset`
pub fn engine_with(text: &str, offset: usize) -> DocumentEngine {
    let engine = DocumentEngine::with_text(text);
    engine
        .set_selections(vec![Selection::caret(offset)], 0)
        .expect("caret within text");
    engine
}

/// Engine over `text` with `anchor..active` selected
pub fn engine_with_selection(text: &str, anchor: usize, active: usize) -> DocumentEngine {
    let engine = DocumentEngine::with_text(text);
    engine
        .set_selections(vec![Selection::new(anchor, active)], 0)
        .expect("selection within text");
    engine
}

/// Engine that never merges typing into one undo group
pub fn engine_without_coalescing(text: &str) -> DocumentEngine {
    let config = EngineConfig {
        coalesce_typing: false,
        ..EngineConfig::default()
    };
    DocumentEngine::with_config(text, &config)
}

/// Type `text` one character at a time
pub fn type_chars(engine: &DocumentEngine, text: &str) {
    for ch in text.chars() {
        engine.type_text(ch.to_string()).expect("typing allowed");
    }
}

pub fn insert(engine: &DocumentEngine, offset: usize, text: &str) {
    engine
        .request_edit(EditRequest::insert(offset, text))
        .expect("insert accepted");
}

pub fn delete(engine: &DocumentEngine, start: usize, end: usize) {
    engine
        .request_edit(EditRequest::delete(start..end))
        .expect("delete accepted");
}

/// Primary caret offset
pub fn caret(engine: &DocumentEngine) -> usize {
    engine.get_cursors().primary().active
}

/// Primary selection as (anchor, active)
pub fn selection(engine: &DocumentEngine) -> (usize, usize) {
    let primary = *engine.get_cursors().primary();
    (primary.anchor, primary.active)
}
