//! Point-in-time copies of a document.

use std::ops::Range;

use ropey::Rope;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::mode::Mode;
use crate::text::RawText;

/// Full text, mode and revision. What the persistence collaborator stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub text: String,
    pub mode: Mode,
    pub revision: u64,
}

impl Snapshot {
    /// Build from raw external content; malformed Unicode is an invalid snapshot
    pub fn from_raw(text: impl Into<RawText>, mode: Mode, revision: u64) -> Result<Self> {
        let text = text.into().decode().map_err(|e| match e {
            EngineError::InvalidText(msg) => EngineError::InvalidSnapshot(msg),
            other => other,
        })?;
        Ok(Self {
            text,
            mode,
            revision,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| EngineError::InvalidSnapshot(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| EngineError::InvalidSnapshot(e.to_string()))
    }

    /// Decode JSON bytes, rejecting malformed UTF-8 anywhere in the input
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        let json = std::str::from_utf8(bytes).map_err(|e| {
            EngineError::InvalidSnapshot(format!("malformed UTF-8 at byte {}", e.valid_up_to()))
        })?;
        Self::from_json(json)
    }
}

/// Immutable copy of the text for work done outside the document lock.
///
/// Cloning the rope shares its tree, so taking one is cheap and later edits
/// to the document do not affect it.
#[derive(Debug, Clone)]
pub struct TextSnapshot {
    text: Rope,
    revision: u64,
    mode: Mode,
}

impl TextSnapshot {
    pub(crate) fn new(text: Rope, revision: u64, mode: Mode) -> Self {
        Self {
            text,
            revision,
            mode,
        }
    }

    pub fn rope(&self) -> &Rope {
        &self.text
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.text.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.text.len_chars() == 0
    }

    pub fn read(&self, range: Range<usize>) -> Result<String> {
        if range.start > range.end || range.end > self.len() {
            return Err(EngineError::out_of_range(range, self.len()));
        }
        Ok(self.text.slice(range).to_string())
    }

    pub fn content(&self) -> String {
        self.text.to_string()
    }
}
