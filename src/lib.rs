//! Wordsmith - document engine for a mode-based writing application
//!
//! One shared document (text, undo history, selections) is edited through a
//! [`DocumentEngine`], with the active [`Mode`] deciding which requests are
//! accepted. Rendering and export are left to collaborators that read the
//! engine and submit requests to it.

pub mod cli;
pub mod composition;
pub mod config;
pub mod config_paths;
pub mod engine;
pub mod error;
pub mod history;
pub mod messages;
pub mod mode;
pub mod outline;
pub mod project;
pub mod refine;
pub mod selection;
pub mod text;
pub mod tracing;
pub mod util;

// Re-export commonly used types
pub use config::EngineConfig;
pub use engine::{Change, ChangeKind, DocumentEngine, EditRequest, Snapshot, TextSnapshot};
pub use error::{EngineError, Result};
pub use messages::Request;
pub use mode::{Capability, Mode};
pub use selection::{MoveTarget, Selection, SelectionSet};
pub use text::RawText;
