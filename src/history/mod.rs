//! Edit history for the document engine.
//!
//! - [`EditRecord`]: one atomic, reversible insert or delete
//! - [`EditGroup`]: the records of one user-visible action
//! - [`EditLog`]: append-only journal of every record applied to the text
//! - [`UndoStack`]: done/redo stacks of groups with coalescing and eviction

mod group;
mod log;
mod record;
mod undo;

pub use group::{EditGroup, EditOrigin};
pub use log::EditLog;
pub use record::{EditKind, EditRecord, EditStep, GroupId};
pub use undo::{CoalescePolicy, UndoStack};
