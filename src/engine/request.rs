//! Granular edit requests from collaborators.

use std::ops::Range;

use crate::error::Result;
use crate::history::EditStep;
use crate::text::RawText;

/// What `request_edit` should do. Text arrives undecoded and is validated
/// before anything is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditRequest {
    Insert { offset: usize, text: RawText },
    Delete { range: Range<usize> },
    Replace { range: Range<usize>, text: RawText },
}

impl EditRequest {
    pub fn insert(offset: usize, text: impl Into<RawText>) -> Self {
        EditRequest::Insert {
            offset,
            text: text.into(),
        }
    }

    pub fn delete(range: Range<usize>) -> Self {
        EditRequest::Delete { range }
    }

    pub fn replace(range: Range<usize>, text: impl Into<RawText>) -> Self {
        EditRequest::Replace {
            range,
            text: text.into(),
        }
    }

    /// Decode the text and lower the request to steps
    pub(crate) fn into_steps(self) -> Result<Vec<EditStep>> {
        Ok(match self {
            EditRequest::Insert { offset, text } => vec![EditStep::Insert {
                at: offset,
                text: text.decode()?,
            }],
            EditRequest::Delete { range } => vec![EditStep::Delete(range)],
            EditRequest::Replace { range, text } => {
                let text = text.decode()?;
                let at = range.start;
                vec![EditStep::Delete(range), EditStep::Insert { at, text }]
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_replace_lowers_to_delete_then_insert() {
        let steps = EditRequest::replace(2..4, "xy").into_steps().unwrap();
        assert_eq!(
            steps,
            vec![
                EditStep::Delete(2..4),
                EditStep::Insert {
                    at: 2,
                    text: "xy".to_string()
                }
            ]
        );
    }

    #[test]
    fn test_malformed_text_rejected() {
        let err = EditRequest::insert(0, vec![0xC3u8]).into_steps().unwrap_err();
        assert!(matches!(err, EngineError::InvalidText(_)));
    }
}
