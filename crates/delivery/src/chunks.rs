//! Splits text into consecutive windows of at most `max_chars` chars.
//!
//! Boundaries fall on `char` (Unicode scalar value) boundaries, so every chunk is valid UTF-8.
//! Grapheme clusters made of several chars may still be split.

use std::iter::FusedIterator;

/// Lazy iterator over the chunks of a text. Cloning restarts from the clone's position.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    rest: &'a str,
    max_chars: usize,
    done: bool,
}

/// Returns the chunks of `text`, each at most `max_chars` chars.
///
/// Text of `max_chars` chars or fewer (including the empty string) yields exactly one chunk equal to the text.
/// A `max_chars` of 0 is treated as 1.
pub fn chunks(text: &str, max_chars: usize) -> Chunks<'_> {
    Chunks {
        rest: text,
        max_chars: max_chars.max(1),
        done: false,
    }
}

/// Number of chunks `chunks(text, max_chars)` yields: `ceil(chars / max)`, and 1 for empty text.
pub fn chunk_count(text: &str, max_chars: usize) -> usize {
    let max_chars = max_chars.max(1);
    text.chars().count().div_ceil(max_chars).max(1)
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.done {
            return None;
        }
        let split_at = self
            .rest
            .char_indices()
            .nth(self.max_chars)
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());
        let (chunk, rest) = self.rest.split_at(split_at);
        self.rest = rest;
        if rest.is_empty() {
            self.done = true;
        }
        Some(chunk)
    }
}

impl FusedIterator for Chunks<'_> {}
