//! IME composition tests - marked text, commit, cancel, implicit flush

mod common;

use common::{caret, engine_with, engine_with_selection, insert};
use wordsmith::history::EditOrigin;
use wordsmith::{ChangeKind, DocumentEngine, EngineError, Mode, MoveTarget};

// ========================================================================
// Lifecycle
// ========================================================================

#[test]
fn test_marked_text_is_visible_while_composing() {
    let engine = engine_with("ab", 1);
    engine.begin_composition().unwrap();
    engine.update_composition("k").unwrap();
    engine.update_composition("か").unwrap();

    assert_eq!(engine.text(), "aかb");
    assert_eq!(engine.composition_range(), Some(1..2));
    assert_eq!(caret(&engine), 2);
    assert!(!engine.can_undo());
}

#[test]
fn test_commit_is_one_undo_step() {
    let engine = engine_with("", 0);
    engine.begin_composition().unwrap();
    for marked in ["n", "に", "にh", "にほ", "日本"] {
        engine.update_composition(marked).unwrap();
    }
    engine.commit_composition().unwrap();
    assert_eq!(engine.text(), "日本");
    assert_eq!(engine.composition_range(), None);

    engine.request_undo().unwrap();
    assert_eq!(engine.text(), "");
    assert!(!engine.can_undo());

    engine.request_redo().unwrap();
    assert_eq!(engine.text(), "日本");
}

#[test]
fn test_commit_notifies_with_composition_origin() {
    let engine = engine_with("", 0);
    engine.begin_composition().unwrap();
    engine.update_composition("é").unwrap();
    let changes = engine.subscribe();
    engine.commit_composition().unwrap();

    let change = changes.try_recv().unwrap();
    assert!(matches!(
        change.kind,
        ChangeKind::Edit {
            origin: EditOrigin::Composition,
            ..
        }
    ));
}

#[test]
fn test_cancel_restores_text_and_history() {
    let engine = engine_with("hello", 5);
    insert(&engine, 0, ">");
    engine.begin_composition().unwrap();
    engine.update_composition("ñ").unwrap();
    assert_eq!(engine.text(), ">helloñ");

    engine.cancel_composition().unwrap();
    assert_eq!(engine.text(), ">hello");
    assert_eq!(engine.composition_range(), None);

    engine.request_undo().unwrap();
    assert_eq!(engine.text(), "hello");
}

#[test]
fn test_composition_over_selection() {
    let engine = engine_with_selection("one two", 4, 7);
    engine.begin_composition().unwrap();
    assert_eq!(engine.text(), "one ");

    engine.update_composition("2").unwrap();
    engine.commit_composition().unwrap();
    assert_eq!(engine.text(), "one 2");

    engine.request_undo().unwrap();
    assert_eq!(engine.text(), "one two");
}

#[test]
fn test_cancel_over_selection_restores_selection() {
    let engine = engine_with_selection("one two", 4, 7);
    engine.begin_composition().unwrap();
    engine.update_composition("2").unwrap();
    engine.cancel_composition().unwrap();

    assert_eq!(engine.text(), "one two");
    assert_eq!(engine.get_cursors().primary().range(), 4..7);
}

// ========================================================================
// Errors
// ========================================================================

#[test]
fn test_update_without_composition() {
    let engine = DocumentEngine::with_text("x");
    assert_eq!(
        engine.update_composition("a").unwrap_err(),
        EngineError::NoComposition
    );
    assert_eq!(
        engine.commit_composition().unwrap_err(),
        EngineError::NoComposition
    );
    assert_eq!(
        engine.cancel_composition().unwrap_err(),
        EngineError::NoComposition
    );
}

#[test]
fn test_malformed_marked_text_rejected() {
    let engine = engine_with("", 0);
    engine.begin_composition().unwrap();
    engine.update_composition("a").unwrap();

    let err = engine
        .update_composition(vec![0xd83du16])
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidText(_)));
    assert_eq!(engine.text(), "a");
}

// ========================================================================
// Implicit flush
// ========================================================================

#[test]
fn test_edit_commits_pending_composition_first() {
    let engine = engine_with("", 0);
    engine.begin_composition().unwrap();
    engine.update_composition("abc").unwrap();

    insert(&engine, 0, "X");
    assert_eq!(engine.text(), "Xabc");
    assert_eq!(engine.composition_range(), None);

    engine.request_undo().unwrap();
    assert_eq!(engine.text(), "abc");
    engine.request_undo().unwrap();
    assert_eq!(engine.text(), "");
}

#[test]
fn test_caret_motion_commits_pending_composition() {
    let engine = engine_with("z", 0);
    engine.begin_composition().unwrap();
    engine.update_composition("y").unwrap();

    engine.move_selections(MoveTarget::DocumentEnd, false);
    assert_eq!(engine.composition_range(), None);
    assert!(engine.can_undo());
    assert_eq!(engine.text(), "yz");
}

#[test]
fn test_mode_switch_commits_pending_composition() {
    let engine = engine_with("", 0);
    engine.begin_composition().unwrap();
    engine.update_composition("draft").unwrap();

    engine.request_mode_switch(Mode::Publish).unwrap();
    assert_eq!(engine.composition_range(), None);
    assert_eq!(engine.text(), "draft");
}

#[test]
fn test_rejected_request_keeps_composition() {
    let engine = engine_with("", 0);
    engine.begin_composition().unwrap();
    engine.update_composition("ab").unwrap();

    assert!(engine.set_heading_level(5, 1).is_err());
    assert!(engine
        .request_edit(wordsmith::EditRequest::insert(99, "x"))
        .is_err());
    assert_eq!(engine.composition_range(), Some(0..2));
}
