//! Character classes for word motion in prose

/// Character class used to find word boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Whitespace,
    /// Letters, digits and in-word apostrophes ("don't", "l’été")
    Word,
    Punctuation,
}

/// Classify a character for word navigation
pub fn char_class(ch: char) -> CharClass {
    if ch.is_whitespace() {
        CharClass::Whitespace
    } else if ch.is_alphanumeric() || ch == '\'' || ch == '\u{2019}' {
        CharClass::Word
    } else {
        CharClass::Punctuation
    }
}

/// Check if a character ends a word (symbol or whitespace)
pub fn is_word_boundary(ch: char) -> bool {
    char_class(ch) != CharClass::Word
}
