//! The mode selector. Every mode is reachable from every other mode; the
//! engine decides whether a request may proceed.

use serde::{Deserialize, Serialize};

use super::Mode;

/// External precondition for entering a mode.
///
/// Returns `Err(reason)` to refuse the transition.
pub trait ModeGate: Send + Sync {
    fn check(&self, from: Mode, to: Mode, text: &ropey::Rope) -> Result<(), String>;
}

impl<F> ModeGate for F
where
    F: Fn(Mode, Mode, &ropey::Rope) -> Result<(), String> + Send + Sync,
{
    fn check(&self, from: Mode, to: Mode, text: &ropey::Rope) -> Result<(), String> {
        self(from, to, text)
    }
}

/// One accepted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeTransition {
    pub from: Mode,
    pub to: Mode,
    pub revision: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ModeMachine {
    current: Mode,
    transitions: Vec<ModeTransition>,
}

impl ModeMachine {
    pub fn new(initial: Mode) -> Self {
        Self {
            current: initial,
            transitions: Vec::new(),
        }
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    /// Switch to `target`. Returns the transition, or None when already there.
    pub fn switch(&mut self, target: Mode, revision: u64) -> Option<ModeTransition> {
        if target == self.current {
            return None;
        }
        let transition = ModeTransition {
            from: self.current,
            to: target,
            revision,
        };
        self.current = target;
        self.transitions.push(transition);
        Some(transition)
    }

    /// Set the mode without recording a transition (restore)
    pub fn reset(&mut self, mode: Mode) {
        self.current = mode;
        self.transitions.clear();
    }

    pub fn transitions(&self) -> &[ModeTransition] {
        &self.transitions
    }
}
