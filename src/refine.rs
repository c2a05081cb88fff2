//! Background analysis for Refine mode.
//!
//! Analysis runs on a worker thread over a [`TextSnapshot`] and never holds
//! the document lock. Its suggestions name the revision they were computed
//! against; applying one rebases its range through the edits made since and
//! submits it as an ordinary gated request.

use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;

use serde::{Deserialize, Serialize};

use crate::engine::{DocumentEngine, TextSnapshot};
use crate::error::Result;
use crate::history::{EditOrigin, EditStep};
use crate::mode::Capability;

/// A proposed replacement, valid against `base_revision`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub base_revision: u64,
    pub range: Range<usize>,
    pub replacement: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Suggestion {
    pub fn new(base_revision: u64, range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            base_revision,
            range,
            replacement: replacement.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// External analysis. Implementations should poll `cancel` during long work.
pub trait Analyzer: Send + Sync + 'static {
    fn analyze(&self, text: &TextSnapshot, cancel: &CancelToken) -> Vec<Suggestion>;
}

impl<F> Analyzer for F
where
    F: Fn(&TextSnapshot, &CancelToken) -> Vec<Suggestion> + Send + Sync + 'static,
{
    fn analyze(&self, text: &TextSnapshot, cancel: &CancelToken) -> Vec<Suggestion> {
        self(text, cancel)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Completed {
        base_revision: u64,
        suggestions: Vec<Suggestion>,
    },
    Cancelled,
}

/// A running analysis
#[derive(Debug)]
pub struct AnalysisHandle {
    cancel: CancelToken,
    rx: Receiver<AnalysisOutcome>,
    worker: Option<JoinHandle<()>>,
    base_revision: u64,
}

impl AnalysisHandle {
    pub fn base_revision(&self) -> u64 {
        self.base_revision
    }

    /// Request cancellation. The document is never rolled back.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// The outcome if the worker has finished
    pub fn try_outcome(&self) -> Option<AnalysisOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(AnalysisOutcome::Cancelled),
        }
    }

    /// Block until the worker finishes
    pub fn wait(mut self) -> AnalysisOutcome {
        let outcome = self.rx.recv().unwrap_or(AnalysisOutcome::Cancelled);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("analysis worker panicked");
            }
        }
        outcome
    }
}

/// Take a snapshot and analyze it on a worker thread
pub fn spawn_analysis(engine: &DocumentEngine, analyzer: Arc<dyn Analyzer>) -> AnalysisHandle {
    let snapshot = engine.text_snapshot();
    let base_revision = snapshot.revision();
    let cancel = CancelToken::new();
    let (tx, rx) = mpsc::channel();

    let token = cancel.clone();
    let worker = std::thread::spawn(move || {
        let suggestions = analyzer.analyze(&snapshot, &token);
        let outcome = if token.is_cancelled() {
            tracing::debug!(base_revision, "analysis cancelled");
            AnalysisOutcome::Cancelled
        } else {
            tracing::debug!(
                base_revision,
                count = suggestions.len(),
                "analysis completed"
            );
            AnalysisOutcome::Completed {
                base_revision,
                suggestions,
            }
        };
        let _ = tx.send(outcome);
    });

    AnalysisHandle {
        cancel,
        rx,
        worker: Some(worker),
        base_revision,
    }
}

impl DocumentEngine {
    /// Accept a suggestion: rebase it onto the current text and commit it as
    /// one undo step. Fails with `StaleSuggestion` when text inside its range
    /// changed since it was computed.
    pub fn apply_suggestion(&self, suggestion: &Suggestion) -> Result<()> {
        self.with_mut(|doc| {
            doc.require(Capability::EditText)?;
            let range = doc.rebase_range(suggestion.base_revision, suggestion.range.clone())?;
            let at = range.start;
            let steps = vec![
                EditStep::Delete(range),
                EditStep::Insert {
                    at,
                    text: suggestion.replacement.clone(),
                },
            ];
            doc.apply_steps(Capability::EditText, EditOrigin::Suggestion, steps)
                .map(drop)
        })
    }
}
