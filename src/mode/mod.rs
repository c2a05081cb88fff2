//! Authoring modes and the capabilities each one grants.

mod machine;
mod policy;

pub use machine::{ModeGate, ModeMachine, ModeTransition};
pub use policy::{Capability, ModePolicy};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The active authoring phase of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Reorder sections and edit headings
    Outline,
    /// Free drafting
    #[default]
    Write,
    Edit,
    /// Accept or reject suggestions from background analysis
    Refine,
    /// Read only
    Publish,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Outline,
        Mode::Write,
        Mode::Edit,
        Mode::Refine,
        Mode::Publish,
    ];

    /// Capabilities granted in this mode
    pub fn policy(self) -> ModePolicy {
        ModePolicy::for_mode(self)
    }

    pub fn allows(self, capability: Capability) -> bool {
        self.policy().allows(capability)
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Outline => "Outline",
            Mode::Write => "Write",
            Mode::Edit => "Edit",
            Mode::Refine => "Refine",
            Mode::Publish => "Publish",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown mode '{}'", s))
    }
}
