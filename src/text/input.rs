//! Decoding of raw text arriving from external collaborators.
//!
//! Platform input layers hand over UTF-8 bytes or UTF-16 code units (IME
//! callbacks, clipboards). Both are validated here before reaching storage.

use crate::error::{EngineError, Result};

/// Text as received from a collaborator, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawText {
    Str(String),
    Utf8(Vec<u8>),
    Utf16(Vec<u16>),
}

impl RawText {
    /// Decode into well-formed text.
    ///
    /// Malformed UTF-8 and unpaired surrogates fail with `InvalidText`.
    pub fn decode(self) -> Result<String> {
        match self {
            RawText::Str(s) => Ok(s),
            RawText::Utf8(bytes) => String::from_utf8(bytes).map_err(|e| {
                EngineError::InvalidText(format!(
                    "malformed UTF-8 at byte {}",
                    e.utf8_error().valid_up_to()
                ))
            }),
            RawText::Utf16(units) => {
                let mut out = String::with_capacity(units.len());
                for (index, decoded) in char::decode_utf16(units.iter().copied()).enumerate() {
                    match decoded {
                        Ok(ch) => out.push(ch),
                        Err(e) => {
                            return Err(EngineError::InvalidText(format!(
                                "unpaired surrogate {:#06x} at unit {}",
                                e.unpaired_surrogate(),
                                index
                            )))
                        }
                    }
                }
                Ok(out)
            }
        }
    }
}

impl From<String> for RawText {
    fn from(s: String) -> Self {
        RawText::Str(s)
    }
}

impl From<&str> for RawText {
    fn from(s: &str) -> Self {
        RawText::Str(s.to_string())
    }
}

impl From<Vec<u8>> for RawText {
    fn from(bytes: Vec<u8>) -> Self {
        RawText::Utf8(bytes)
    }
}

impl From<Vec<u16>> for RawText {
    fn from(units: Vec<u16>) -> Self {
        RawText::Utf16(units)
    }
}
