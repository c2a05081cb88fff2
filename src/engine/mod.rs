//! Document engine
//!
//! [`DocumentEngine`] is the one entry point collaborators use. It is a cheap
//! clonable handle over a locked [`Document`]: reads share the lock, every
//! mutation takes it exclusively, so requests commit one at a time in the
//! order they acquire the lock and readers never observe a partial edit.

mod change;
mod document;
mod request;
mod snapshot;

pub use change::{Change, ChangeKind};
pub use document::Document;
pub use request::EditRequest;
pub use snapshot::{Snapshot, TextSnapshot};

use std::fmt;
use std::ops::Range;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::history::{EditOrigin, EditRecord, EditStep};
use crate::mode::{Capability, Mode, ModeGate};
use crate::outline::{self, DisplayMap, LineKind, OutlineData, Section};
use crate::selection::{MoveTarget, Selection, SelectionSet};
use crate::text::RawText;

/// Unique identifier of an open document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone)]
pub struct DocumentEngine(Arc<RwLock<Document>>);

impl fmt::Debug for DocumentEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|doc| f.debug_tuple("DocumentEngine").field(doc).finish())
    }
}

impl Default for DocumentEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentEngine {
    /// Empty document with default settings
    pub fn new() -> Self {
        Self::with_config("", &EngineConfig::default())
    }

    pub fn with_text(text: &str) -> Self {
        Self::with_config(text, &EngineConfig::default())
    }

    pub fn with_config(text: &str, config: &EngineConfig) -> Self {
        Self(Arc::new(RwLock::new(Document::new(text, config))))
    }

    /// Run `f` with shared access; sees one consistent state
    pub fn with<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        let guard = self.0.read();
        f(&guard)
    }

    pub(crate) fn with_mut<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        let mut guard = self.0.write();
        f(&mut guard)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn id(&self) -> DocumentId {
        self.with(|doc| doc.id())
    }

    pub fn get_text(&self, range: Range<usize>) -> Result<String> {
        self.with(|doc| doc.read(range))
    }

    /// Full text
    pub fn text(&self) -> String {
        self.with(|doc| doc.storage().content())
    }

    pub fn len(&self) -> usize {
        self.with(|doc| doc.len())
    }

    pub fn is_empty(&self) -> bool {
        self.with(|doc| doc.is_empty())
    }

    pub fn get_cursors(&self) -> SelectionSet {
        self.with(|doc| doc.selections().clone())
    }

    pub fn get_mode(&self) -> Mode {
        self.with(|doc| doc.mode())
    }

    pub fn get_revision(&self) -> u64 {
        self.with(|doc| doc.revision())
    }

    /// Whether `capability` is granted right now
    pub fn allows(&self, capability: Capability) -> bool {
        self.with(|doc| !doc.is_poisoned() && doc.mode().allows(capability))
    }

    pub fn can_undo(&self) -> bool {
        self.with(|doc| doc.history().can_undo())
    }

    pub fn can_redo(&self) -> bool {
        self.with(|doc| doc.history().can_redo())
    }

    pub fn is_poisoned(&self) -> bool {
        self.with(|doc| doc.is_poisoned())
    }

    /// Records applied after `revision`; None once they left the edit log
    pub fn changes_since(&self, revision: u64) -> Option<Vec<EditRecord>> {
        self.with(|doc| doc.changes_since(revision))
    }

    pub fn snapshot(&self) -> Snapshot {
        self.with(|doc| doc.snapshot())
    }

    pub fn text_snapshot(&self) -> TextSnapshot {
        self.with(|doc| doc.text_snapshot())
    }

    /// Range of the marked text while an IME composition is active
    pub fn composition_range(&self) -> Option<Range<usize>> {
        self.with(|doc| doc.composition().map(|c| c.range()))
    }

    pub fn outline(&self) -> OutlineData {
        self.with(|doc| OutlineData::build(doc.storage().rope(), doc.revision()))
    }

    pub fn sections(&self) -> Vec<Section> {
        self.with(|doc| outline::sections(doc.storage().rope()))
    }

    pub fn line_kinds(&self) -> Vec<LineKind> {
        self.with(|doc| outline::classify_lines(doc.storage().rope()))
    }

    pub fn display_map(&self) -> DisplayMap {
        self.with(|doc| DisplayMap::build(doc.storage().rope(), doc.revision()))
    }

    /// Receive one [`Change`] per accepted change, in order
    pub fn subscribe(&self) -> Receiver<Change> {
        let (tx, rx) = mpsc::channel();
        self.with_mut(|doc| doc.subscribe(tx));
        rx
    }

    /// Install (or clear) an external precondition for mode switches
    pub fn set_mode_gate(&self, gate: Option<Arc<dyn ModeGate>>) {
        self.with_mut(|doc| doc.set_gate(gate));
    }

    // =========================================================================
    // Mutation requests
    // =========================================================================

    /// Granular insert/delete/replace. One undo group, never coalesced.
    pub fn request_edit(&self, request: EditRequest) -> Result<()> {
        self.with_mut(|doc| {
            doc.require(Capability::EditText)?;
            let steps = request.into_steps()?;
            doc.apply_steps(Capability::EditText, EditOrigin::Programmatic, steps)
                .map(drop)
        })
    }

    /// Returns false when there is nothing to undo
    pub fn request_undo(&self) -> Result<bool> {
        self.with_mut(|doc| doc.undo())
    }

    /// Returns false when there is nothing to redo
    pub fn request_redo(&self) -> Result<bool> {
        self.with_mut(|doc| doc.redo())
    }

    pub fn request_mode_switch(&self, target: Mode) -> Result<()> {
        self.with_mut(|doc| doc.switch_mode(target)).map(drop)
    }

    pub fn restore(&self, snapshot: Snapshot) -> Result<()> {
        self.with_mut(|doc| doc.restore(snapshot));
        Ok(())
    }

    // =========================================================================
    // Cursor-relative editing
    // =========================================================================

    /// Keystroke text entry; consecutive keystrokes may share an undo step
    pub fn type_text(&self, text: impl Into<RawText>) -> Result<()> {
        let text = text.into();
        self.with_mut(|doc| {
            doc.require(Capability::EditText)?;
            let text = text.decode()?;
            doc.insert_at_selections(EditOrigin::Typing, &text).map(drop)
        })
    }

    pub fn paste(&self, text: impl Into<RawText>) -> Result<()> {
        let text = text.into();
        self.with_mut(|doc| {
            doc.require(Capability::EditText)?;
            let text = text.decode()?;
            doc.insert_at_selections(EditOrigin::Paste, &text).map(drop)
        })
    }

    pub fn insert_newline(&self) -> Result<()> {
        self.with_mut(|doc| doc.insert_at_selections(EditOrigin::Typing, "\n").map(drop))
    }

    pub fn delete_backward(&self) -> Result<()> {
        self.with_mut(|doc| doc.delete_at_selections(false).map(drop))
    }

    pub fn delete_forward(&self) -> Result<()> {
        self.with_mut(|doc| doc.delete_at_selections(true).map(drop))
    }

    // =========================================================================
    // Selections
    // =========================================================================

    pub fn set_selections(&self, selections: Vec<Selection>, primary: usize) -> Result<()> {
        self.with_mut(|doc| doc.set_selections(selections, primary))
    }

    /// Add a selection and make it primary
    pub fn add_selection(&self, selection: Selection) -> Result<()> {
        self.with_mut(|doc| doc.add_selection(selection))
    }

    pub fn select_all(&self) {
        self.with_mut(|doc| doc.select_all());
    }

    pub fn move_selections(&self, target: MoveTarget, extend: bool) {
        self.with_mut(|doc| doc.move_selections(target, extend));
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Move a section (with its subsections) before section `before`, or to
    /// the end of the document
    pub fn move_section(&self, index: usize, before: Option<usize>) -> Result<()> {
        self.structural(|text| outline::plan_move_section(text, index, before))
    }

    /// Set a heading's level; 0 turns it into body text
    pub fn set_heading_level(&self, index: usize, level: u8) -> Result<()> {
        self.structural(|text| outline::plan_set_heading_level(text, index, level))
    }

    pub fn insert_heading(&self, before: Option<usize>, level: u8, title: &str) -> Result<()> {
        self.structural(|text| outline::plan_insert_heading(text, before, level, title))
    }

    fn structural(
        &self,
        plan: impl FnOnce(&ropey::Rope) -> Result<Vec<EditStep>>,
    ) -> Result<()> {
        self.with_mut(|doc| {
            doc.require(Capability::EditStructure)?;
            let steps = plan(doc.storage().rope())?;
            doc.apply_steps(Capability::EditStructure, EditOrigin::Structural, steps)
                .map(drop)
        })
    }

    // =========================================================================
    // IME composition
    // =========================================================================

    /// Start composing at the primary selection, replacing its text
    pub fn begin_composition(&self) -> Result<()> {
        self.with_mut(|doc| doc.begin_composition())
    }

    /// Replace the marked text
    pub fn update_composition(&self, text: impl Into<RawText>) -> Result<()> {
        let text = text.into();
        self.with_mut(|doc| {
            doc.require(Capability::EditText)?;
            let text = text.decode()?;
            doc.update_composition(&text)
        })
    }

    /// Promote the composition to one undo step
    pub fn commit_composition(&self) -> Result<()> {
        self.with_mut(|doc| doc.commit_composition()).map(drop)
    }

    /// Put back the text from before the composition began
    pub fn cancel_composition(&self) -> Result<()> {
        self.with_mut(|doc| doc.cancel_composition())
    }
}
