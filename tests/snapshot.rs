//! Snapshot and restore tests

mod common;

use common::{delete, engine_with, insert, type_chars};
use wordsmith::{ChangeKind, DocumentEngine, EngineError, Mode, Snapshot};

// ========================================================================
// Round trip
// ========================================================================

#[test]
fn test_restore_own_snapshot_keeps_text_and_mode() {
    let engine = engine_with("Chapter one\n", 12);
    type_chars(&engine, "It was late.");
    delete(&engine, 0, 8);
    engine.request_mode_switch(Mode::Refine).unwrap();
    let snapshot = engine.snapshot();

    engine.restore(snapshot.clone()).unwrap();
    assert_eq!(engine.text(), snapshot.text);
    assert_eq!(engine.get_mode(), Mode::Refine);
}

#[test]
fn test_restore_into_another_engine() {
    let source = DocumentEngine::with_text("draft");
    insert(&source, 5, " two");
    source.request_mode_switch(Mode::Publish).unwrap();

    let target = DocumentEngine::new();
    target.restore(source.snapshot()).unwrap();
    assert_eq!(target.text(), "draft two");
    assert_eq!(target.get_mode(), Mode::Publish);
}

#[test]
fn test_snapshot_survives_json() {
    let engine = DocumentEngine::with_text("emoji 👋🏽 and \"quotes\"\n");
    engine.request_mode_switch(Mode::Outline).unwrap();

    let json = engine.snapshot().to_json().unwrap();
    let decoded = Snapshot::from_json(&json).unwrap();
    assert_eq!(decoded, engine.snapshot());
}

// ========================================================================
// Revision policy
// ========================================================================

#[test]
fn test_restore_moves_revision_past_both() {
    let engine = DocumentEngine::with_text("x");
    insert(&engine, 1, "y");
    insert(&engine, 2, "z");
    assert_eq!(engine.get_revision(), 2);

    engine
        .restore(Snapshot {
            text: "old".into(),
            mode: Mode::Write,
            revision: 1,
        })
        .unwrap();
    assert_eq!(engine.get_revision(), 3);

    engine
        .restore(Snapshot {
            text: "new".into(),
            mode: Mode::Write,
            revision: 40,
        })
        .unwrap();
    assert_eq!(engine.get_revision(), 41);
}

#[test]
fn test_restore_clears_history_and_selections() {
    let engine = engine_with("abc", 3);
    insert(&engine, 3, "def");
    engine.request_undo().unwrap();
    let snapshot = engine.snapshot();

    engine.restore(snapshot).unwrap();
    assert!(!engine.can_undo());
    assert!(!engine.can_redo());
    assert_eq!(engine.get_cursors().primary().range(), 0..0);
}

#[test]
fn test_restore_truncates_change_log() {
    let engine = DocumentEngine::with_text("a");
    insert(&engine, 1, "b");
    engine.restore(engine.snapshot()).unwrap();

    assert!(engine.changes_since(0).is_none());
    let current = engine.get_revision();
    assert_eq!(engine.changes_since(current), Some(vec![]));
}

#[test]
fn test_restore_notifies_subscribers() {
    let engine = DocumentEngine::with_text("a");
    let changes = engine.subscribe();
    engine.restore(engine.snapshot()).unwrap();

    let change = changes.try_recv().unwrap();
    assert_eq!(change.kind, ChangeKind::Restore);
    assert_eq!(change.revision, engine.get_revision());
}

// ========================================================================
// Malformed input
// ========================================================================

#[test]
fn test_malformed_utf8_snapshot_is_invalid() {
    let err = Snapshot::from_raw(vec![b'h', 0xff, b'i'], Mode::Write, 0).unwrap_err();
    assert!(matches!(err, EngineError::InvalidSnapshot(_)));

    let err = Snapshot::from_json_bytes(b"{\"text\":\"\xc3\",\"mode\":\"write\",\"revision\":0}")
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidSnapshot(_)));
}

#[test]
fn test_unpaired_surrogate_snapshot_is_invalid() {
    let err = Snapshot::from_raw(vec![0x0068u16, 0xd800], Mode::Write, 0).unwrap_err();
    assert!(matches!(err, EngineError::InvalidSnapshot(_)));
}

#[test]
fn test_unknown_mode_in_json_is_invalid() {
    let err = Snapshot::from_json(r#"{"text":"a","mode":"draft","revision":0}"#).unwrap_err();
    assert!(matches!(err, EngineError::InvalidSnapshot(_)));
}
