//! Grapheme cluster boundaries over a rope, derived on demand.
//!
//! Queries walk the rope's chunks with a `GraphemeCursor`, so the cost
//! depends on the cluster size around the offset and not on the line length.

use ropey::str_utils::byte_to_char_idx;
use ropey::RopeSlice;
use unicode_segmentation::{GraphemeCursor, GraphemeIncomplete};

/// Returns whether `char_idx` is at a grapheme cluster boundary.
pub fn is_grapheme_boundary(text: RopeSlice, char_idx: usize) -> bool {
    if char_idx == 0 || char_idx >= text.len_chars() {
        return true;
    }
    let byte_idx = text.char_to_byte(char_idx);
    let (chunk, chunk_byte_idx, _, _) = text.chunk_at_byte(byte_idx);
    let mut cursor = GraphemeCursor::new(byte_idx, text.len_bytes(), true);
    loop {
        match cursor.is_boundary(chunk, chunk_byte_idx) {
            Ok(boundary) => return boundary,
            Err(GraphemeIncomplete::PreContext(n)) => {
                let (context, context_start, _, _) = text.chunk_at_byte(n - 1);
                cursor.provide_context(context, context_start);
            }
            Err(_) => return true,
        }
    }
}

/// Char offset of the next boundary after `char_idx` (or the text length).
pub fn next_grapheme_boundary(text: RopeSlice, char_idx: usize) -> usize {
    let len = text.len_chars();
    if char_idx >= len {
        return len;
    }
    let byte_idx = text.char_to_byte(char_idx);
    let (mut chunk, mut chunk_byte_idx, mut chunk_char_idx, _) = text.chunk_at_byte(byte_idx);
    let mut cursor = GraphemeCursor::new(byte_idx, text.len_bytes(), true);
    loop {
        match cursor.next_boundary(chunk, chunk_byte_idx) {
            Ok(Some(n)) => return chunk_char_idx + byte_to_char_idx(chunk, n - chunk_byte_idx),
            Ok(None) => return len,
            Err(GraphemeIncomplete::NextChunk) => {
                chunk_byte_idx += chunk.len();
                let (next, _, next_char_idx, _) = text.chunk_at_byte(chunk_byte_idx);
                chunk = next;
                chunk_char_idx = next_char_idx;
            }
            Err(GraphemeIncomplete::PreContext(n)) => {
                let (context, context_start, _, _) = text.chunk_at_byte(n - 1);
                cursor.provide_context(context, context_start);
            }
            Err(_) => return len,
        }
    }
}

/// Char offset of the previous boundary before `char_idx` (or 0).
pub fn prev_grapheme_boundary(text: RopeSlice, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    let char_idx = char_idx.min(text.len_chars());
    let byte_idx = text.char_to_byte(char_idx);
    let (mut chunk, mut chunk_byte_idx, mut chunk_char_idx, _) = text.chunk_at_byte(byte_idx);
    let mut cursor = GraphemeCursor::new(byte_idx, text.len_bytes(), true);
    loop {
        match cursor.prev_boundary(chunk, chunk_byte_idx) {
            Ok(Some(n)) => return chunk_char_idx + byte_to_char_idx(chunk, n - chunk_byte_idx),
            Ok(None) => return 0,
            Err(GraphemeIncomplete::PrevChunk) => {
                let (prev, prev_byte_idx, prev_char_idx, _) =
                    text.chunk_at_byte(chunk_byte_idx - 1);
                chunk = prev;
                chunk_byte_idx = prev_byte_idx;
                chunk_char_idx = prev_char_idx;
            }
            Err(GraphemeIncomplete::PreContext(n)) => {
                let (context, context_start, _, _) = text.chunk_at_byte(n - 1);
                cursor.provide_context(context, context_start);
            }
            Err(_) => return 0,
        }
    }
}

/// Total number of grapheme clusters.
pub fn grapheme_count(text: RopeSlice) -> usize {
    let len = text.len_chars();
    let mut count = 0;
    let mut idx = 0;
    while idx < len {
        idx = next_grapheme_boundary(text, idx);
        count += 1;
    }
    count
}
