//! Mode → capability table. Every gate in the engine asks this table.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Mode;

/// A class of operations a mode may grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Granular insert/delete, typing, paste and IME composition
    EditText,
    /// Heading edits and section reordering
    EditStructure,
    /// Undo and redo
    History,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Capability::EditText => "text editing",
            Capability::EditStructure => "structural editing",
            Capability::History => "undo/redo",
        })
    }
}

/// What a mode permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModePolicy {
    pub edit_text: bool,
    pub edit_structure: bool,
    pub history: bool,
}

impl ModePolicy {
    /// Text, structure and history
    pub const fn full() -> Self {
        Self {
            edit_text: true,
            edit_structure: true,
            history: true,
        }
    }

    /// Structure and history, no granular text edits
    pub const fn structural() -> Self {
        Self {
            edit_text: false,
            edit_structure: true,
            history: true,
        }
    }

    pub const fn read_only() -> Self {
        Self {
            edit_text: false,
            edit_structure: false,
            history: false,
        }
    }

    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Outline => Self::structural(),
            Mode::Write | Mode::Edit | Mode::Refine => Self::full(),
            Mode::Publish => Self::read_only(),
        }
    }

    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::EditText => self.edit_text,
            Capability::EditStructure => self.edit_structure,
            Capability::History => self.history,
        }
    }

    pub fn is_read_only(&self) -> bool {
        !self.edit_text && !self.edit_structure && !self.history
    }
}
