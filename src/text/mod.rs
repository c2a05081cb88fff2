//! Text storage for the document engine.
//!
//! Offsets throughout the crate are Unicode scalar value (char) indices, never
//! byte offsets or grapheme indices. Grapheme boundaries are derived from the
//! current text on demand and never cached across a mutation.

pub mod graphemes;
mod input;
mod storage;

pub use input::RawText;
pub use storage::{Position, TextStorage};
