//! Undo/redo tests - exactness, redo-branch discard, typing coalescing

mod common;

use common::{delete, engine_with, engine_without_coalescing, insert, type_chars};
use proptest::prelude::*;
use wordsmith::{DocumentEngine, EditRequest, EngineConfig, EngineError, Mode};

// ========================================================================
// Exactness
// ========================================================================

#[test]
fn test_undo_all_then_redo_all_restores_final_text() {
    let engine = DocumentEngine::with_text("The quick fox");
    insert(&engine, 4, "very ");
    delete(&engine, 0, 4);
    engine
        .request_edit(EditRequest::replace(5..10, "slow"))
        .unwrap();
    let after = engine.text();

    while engine.request_undo().unwrap() {}
    assert_eq!(engine.text(), "The quick fox");

    while engine.request_redo().unwrap() {}
    assert_eq!(engine.text(), after);
}

#[test]
fn test_undo_restores_multibyte_text() {
    let engine = DocumentEngine::with_text("naïve café 👋🏽");
    delete(&engine, 2, 5);
    insert(&engine, 0, "日本");
    assert_eq!(engine.text(), "日本na café 👋🏽");

    assert!(engine.request_undo().unwrap());
    assert!(engine.request_undo().unwrap());
    assert_eq!(engine.text(), "naïve café 👋🏽");
}

#[test]
fn test_undo_on_empty_history_is_noop() {
    let engine = DocumentEngine::with_text("abc");
    let revision = engine.get_revision();
    assert!(!engine.request_undo().unwrap());
    assert!(!engine.request_redo().unwrap());
    assert_eq!(engine.get_revision(), revision);
}

#[test]
fn test_undo_restores_selection() {
    let engine = engine_with("hello", 5);
    engine.paste(" world").unwrap();
    assert_eq!(common::caret(&engine), 11);

    engine.request_undo().unwrap();
    assert_eq!(common::caret(&engine), 5);
    engine.request_redo().unwrap();
    assert_eq!(common::caret(&engine), 11);
}

// ========================================================================
// Redo branch
// ========================================================================

#[test]
fn test_new_commit_discards_redo_branch() {
    let engine = DocumentEngine::new();
    insert(&engine, 0, "one");
    insert(&engine, 3, " two");
    insert(&engine, 7, " three");

    engine.request_undo().unwrap();
    engine.request_undo().unwrap();
    assert!(engine.can_redo());

    insert(&engine, 3, "!");
    assert!(!engine.can_redo());
    assert!(!engine.request_redo().unwrap());
    assert_eq!(engine.text(), "one!");
}

#[test]
fn test_rejected_edit_keeps_redo_branch() {
    let engine = DocumentEngine::new();
    insert(&engine, 0, "abc");
    engine.request_undo().unwrap();

    let err = engine
        .request_edit(EditRequest::insert(10, "x"))
        .unwrap_err();
    assert!(matches!(err, EngineError::OutOfRange { .. }));
    assert!(engine.can_redo());
}

#[test]
fn test_empty_edit_keeps_redo_branch() {
    let engine = DocumentEngine::new();
    insert(&engine, 0, "abc");
    engine.request_undo().unwrap();

    engine.request_edit(EditRequest::insert(0, "")).unwrap();
    assert!(engine.can_redo());
}

// ========================================================================
// Coalescing
// ========================================================================

#[test]
fn test_typing_a_word_is_one_undo_step() {
    let engine = engine_with("", 0);
    type_chars(&engine, "hello");
    assert_eq!(engine.text(), "hello");

    engine.request_undo().unwrap();
    assert_eq!(engine.text(), "");
}

#[test]
fn test_space_after_word_starts_new_group() {
    let engine = engine_with("", 0);
    type_chars(&engine, "hello world");

    engine.request_undo().unwrap();
    assert_eq!(engine.text(), "hello");
    engine.request_undo().unwrap();
    assert_eq!(engine.text(), "");
}

#[test]
fn test_programmatic_edits_never_coalesce() {
    let engine = DocumentEngine::new();
    insert(&engine, 0, "a");
    insert(&engine, 1, "b");

    engine.request_undo().unwrap();
    assert_eq!(engine.text(), "a");
}

#[test]
fn test_typing_after_caret_jump_starts_new_group() {
    let engine = engine_with("xy", 0);
    type_chars(&engine, "ab");
    engine
        .set_selections(vec![wordsmith::Selection::caret(4)], 0)
        .unwrap();
    type_chars(&engine, "cd");
    assert_eq!(engine.text(), "abxycd");

    engine.request_undo().unwrap();
    assert_eq!(engine.text(), "abxy");
}

#[test]
fn test_mode_switch_ends_typing_run() {
    let engine = engine_with("", 0);
    type_chars(&engine, "a");
    engine.request_mode_switch(Mode::Edit).unwrap();
    type_chars(&engine, "b");
    assert_eq!(engine.text(), "ab");

    engine.request_undo().unwrap();
    assert_eq!(engine.text(), "a");
}

#[test]
fn test_coalescing_can_be_disabled() {
    let engine = engine_without_coalescing("");
    type_chars(&engine, "abc");

    engine.request_undo().unwrap();
    assert_eq!(engine.text(), "ab");
}

#[test]
fn test_history_limit_evicts_oldest_group() {
    let config = EngineConfig {
        history_limit: 2,
        ..EngineConfig::default()
    };
    let engine = DocumentEngine::with_config("", &config);
    insert(&engine, 0, "a");
    insert(&engine, 1, "b");
    insert(&engine, 2, "c");

    assert!(engine.request_undo().unwrap());
    assert!(engine.request_undo().unwrap());
    assert!(!engine.request_undo().unwrap());
    assert_eq!(engine.text(), "a");
}

// ========================================================================
// Property: undo N then redo N is exact
// ========================================================================

#[derive(Debug, Clone)]
enum Op {
    Insert(usize, String),
    Delete(usize, usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<usize>(), "[a-zé日👋 \n]{1,6}").prop_map(|(at, text)| Op::Insert(at, text)),
        (any::<usize>(), 1usize..8).prop_map(|(at, len)| Op::Delete(at, len)),
    ]
}

proptest! {
    #[test]
    fn prop_undo_redo_exactness(seed in "[a-z ]{0,20}", ops in prop::collection::vec(op_strategy(), 1..20)) {
        let engine = DocumentEngine::with_text(&seed);
        let mut committed = 0;

        for op in ops {
            let len = engine.len();
            let request = match op {
                Op::Insert(at, text) => EditRequest::insert(at % (len + 1), text),
                Op::Delete(at, n) => {
                    let start = at % (len + 1);
                    EditRequest::delete(start..(start + n).min(len))
                }
            };
            let before = engine.get_revision();
            engine.request_edit(request).unwrap();
            if engine.get_revision() != before {
                committed += 1;
            }
        }
        let after = engine.text();

        for _ in 0..committed {
            prop_assert!(engine.request_undo().unwrap());
        }
        prop_assert_eq!(engine.text(), seed);

        for _ in 0..committed {
            prop_assert!(engine.request_redo().unwrap());
        }
        prop_assert_eq!(engine.text(), after);
        prop_assert!(!engine.can_redo());
    }
}
