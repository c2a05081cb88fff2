//! Utility modules

pub mod text;

pub use text::{char_class, is_word_boundary, CharClass};
