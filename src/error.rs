//! Error taxonomy for the document engine.
//!
//! Every failure is returned to the caller. A failed request never leaves the
//! document partially mutated.

use thiserror::Error;

use crate::mode::{Capability, Mode};

pub type Result<T, E = EngineError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Offset or range outside the current bounds of the text
    #[error("range {start}..{end} is out of bounds for length {len}")]
    OutOfRange { start: usize, end: usize, len: usize },

    /// Input that is not well-formed Unicode text
    #[error("invalid text: {0}")]
    InvalidText(String),

    /// The current mode does not grant the capability the request needs
    #[error("{capability} is not permitted in {mode} mode")]
    CapabilityDenied { mode: Mode, capability: Capability },

    /// A precondition for entering the target mode is unmet
    #[error("cannot switch to {target} mode: {reason}")]
    ModeUnavailable { target: Mode, reason: String },

    /// Restore input was malformed
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Undo/redo history no longer matches the text. Fatal for the document.
    #[error("internal consistency failure: {0}")]
    InternalConsistency(String),

    /// Composition update/commit without an active composition
    #[error("no active composition")]
    NoComposition,

    /// A background suggestion could not be carried forward to the current text
    #[error("stale suggestion: {0}")]
    StaleSuggestion(String),
}

impl EngineError {
    pub(crate) fn out_of_range(range: std::ops::Range<usize>, len: usize) -> Self {
        EngineError::OutOfRange {
            start: range.start,
            end: range.end,
            len,
        }
    }

    /// Whether the caller can surface this to the user and carry on.
    ///
    /// `InternalConsistency` is the only condition that halts further mutation.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, EngineError::InternalConsistency(_))
    }
}
