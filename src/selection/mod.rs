//! Cursor and selection model.
//!
//! Selections are (anchor, active) offset pairs into the text. Every applied
//! edit record re-maps every live selection through [`EditRecord::map_offset`],
//! whichever mode or collaborator produced the edit.
//!
//! [`EditRecord::map_offset`]: crate::history::EditRecord::map_offset

mod motion;
mod range;
mod set;

pub(crate) use motion::move_selection;
pub use motion::MoveTarget;
pub use range::Selection;
pub use set::SelectionSet;
