//! Request messages
//!
//! Every mutation a collaborator can ask for, as one enum. UI surfaces build
//! `Request`s from input events and hand them to [`DocumentEngine::dispatch`].

use crate::engine::{DocumentEngine, EditRequest, Snapshot};
use crate::error::Result;
use crate::mode::Mode;
use crate::refine::Suggestion;
use crate::selection::{MoveTarget, Selection};
use crate::text::RawText;
#[cfg(debug_assertions)]
use crate::tracing::SelectionSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    // === Text ===
    /// Granular insert/delete/replace
    Edit(EditRequest),
    /// Keystroke text entry
    Type(RawText),
    Paste(RawText),
    InsertNewline,
    /// Backspace
    DeleteBackward,
    /// Delete key
    DeleteForward,

    // === History ===
    Undo,
    Redo,

    // === Modes ===
    SwitchMode(Mode),

    // === Selections ===
    Move { target: MoveTarget, extend: bool },
    SelectAll,
    SetSelections { selections: Vec<Selection>, primary: usize },
    AddSelection(Selection),

    // === Structure ===
    MoveSection { index: usize, before: Option<usize> },
    SetHeadingLevel { index: usize, level: u8 },
    InsertHeading { before: Option<usize>, level: u8, title: String },

    // === IME ===
    BeginComposition,
    UpdateComposition(RawText),
    CommitComposition,
    CancelComposition,

    // === Collaborators ===
    ApplySuggestion(Suggestion),
    Restore(Snapshot),
}

impl Request {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Request::Edit(_) => "Edit",
            Request::Type(_) => "Type",
            Request::Paste(_) => "Paste",
            Request::InsertNewline => "InsertNewline",
            Request::DeleteBackward => "DeleteBackward",
            Request::DeleteForward => "DeleteForward",
            Request::Undo => "Undo",
            Request::Redo => "Redo",
            Request::SwitchMode(_) => "SwitchMode",
            Request::Move { .. } => "Move",
            Request::SelectAll => "SelectAll",
            Request::SetSelections { .. } => "SetSelections",
            Request::AddSelection(_) => "AddSelection",
            Request::MoveSection { .. } => "MoveSection",
            Request::SetHeadingLevel { .. } => "SetHeadingLevel",
            Request::InsertHeading { .. } => "InsertHeading",
            Request::BeginComposition => "BeginComposition",
            Request::UpdateComposition(_) => "UpdateComposition",
            Request::CommitComposition => "CommitComposition",
            Request::CancelComposition => "CancelComposition",
            Request::ApplySuggestion(_) => "ApplySuggestion",
            Request::Restore(_) => "Restore",
        }
    }
}

/// What a dispatched request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub revision_before: u64,
    pub revision_after: u64,
}

impl Outcome {
    /// Whether the document revision moved
    pub fn changed(&self) -> bool {
        self.revision_after != self.revision_before
    }
}

impl DocumentEngine {
    /// Apply one request.
    ///
    /// In debug builds each request is wrapped in a span and selection changes
    /// are logged as a diff.
    pub fn dispatch(&self, request: Request) -> Result<Outcome> {
        let revision_before = self.get_revision();

        #[cfg(debug_assertions)]
        let (_span, before) = {
            let span = tracing::debug_span!("dispatch", request = request.name()).entered();
            let before = self.with(|doc| SelectionSnapshot::from_set(doc.selections()));
            (span, before)
        };

        self.dispatch_inner(request)?;

        #[cfg(debug_assertions)]
        {
            let after = self.with(|doc| SelectionSnapshot::from_set(doc.selections()));
            if let Some(diff) = before.diff(&after) {
                tracing::debug!(target: "selection", %diff, "selections changed");
            }
        }

        Ok(Outcome {
            revision_before,
            revision_after: self.get_revision(),
        })
    }

    fn dispatch_inner(&self, request: Request) -> Result<()> {
        match request {
            Request::Edit(edit) => self.request_edit(edit),
            Request::Type(text) => self.type_text(text),
            Request::Paste(text) => self.paste(text),
            Request::InsertNewline => self.insert_newline(),
            Request::DeleteBackward => self.delete_backward(),
            Request::DeleteForward => self.delete_forward(),
            Request::Undo => self.request_undo().map(drop),
            Request::Redo => self.request_redo().map(drop),
            Request::SwitchMode(mode) => self.request_mode_switch(mode),
            Request::Move { target, extend } => {
                self.move_selections(target, extend);
                Ok(())
            }
            Request::SelectAll => {
                self.select_all();
                Ok(())
            }
            Request::SetSelections {
                selections,
                primary,
            } => self.set_selections(selections, primary),
            Request::AddSelection(selection) => self.add_selection(selection),
            Request::MoveSection { index, before } => self.move_section(index, before),
            Request::SetHeadingLevel { index, level } => self.set_heading_level(index, level),
            Request::InsertHeading {
                before,
                level,
                title,
            } => self.insert_heading(before, level, &title),
            Request::BeginComposition => self.begin_composition(),
            Request::UpdateComposition(text) => self.update_composition(text),
            Request::CommitComposition => self.commit_composition(),
            Request::CancelComposition => self.cancel_composition(),
            Request::ApplySuggestion(suggestion) => self.apply_suggestion(&suggestion),
            Request::Restore(snapshot) => self.restore(snapshot),
        }
    }
}
