// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Word and paragraph boundary queries over plain text.

use alloc::vec::Vec;

use icu_segmenter::WordSegmenter;
use icu_segmenter::options::WordBreakInvariantOptions;

use crate::TextRange;

/// One run between two adjacent word breaks, in character offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Segment {
    start: usize,
    end: usize,
    is_word: bool,
}

/// Precomputed word segmentation of a text.
///
/// Segments are produced by the ICU word segmenter (UAX #29 plus dictionary and LSTM models
/// for complex scripts). A segment counts as a word when it contains at least one alphanumeric
/// character; whitespace, punctuation and line breaks form non-word segments.
#[derive(Clone, Debug, Default)]
pub struct WordBoundaries {
    segments: Vec<Segment>,
    len: usize,
}

impl WordBoundaries {
    /// Segments `text`.
    pub fn new(text: &str) -> Self {
        let mut segments = Vec::new();
        let mut len = 0;
        if !text.is_empty() {
            let segmenter = WordSegmenter::new_auto(WordBreakInvariantOptions::default());
            let mut prev_byte = 0;
            let mut prev_char = 0;
            let mut chars = text.char_indices().peekable();
            for byte in segmenter.segment_str(text) {
                if byte <= prev_byte {
                    continue;
                }
                let mut count = 0;
                let mut is_word = false;
                while let Some(&(ix, ch)) = chars.peek() {
                    if ix >= byte {
                        break;
                    }
                    is_word |= ch.is_alphanumeric();
                    count += 1;
                    chars.next();
                }
                segments.push(Segment {
                    start: prev_char,
                    end: prev_char + count,
                    is_word,
                });
                prev_byte = byte;
                prev_char += count;
            }
            len = prev_char;
        }
        Self { segments, len }
    }

    /// Number of characters in the segmented text.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the segmented text was empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the word boundary at `offset`.
    ///
    /// An offset at the start of a word or at its end belongs to that word. When `offset` sits
    /// between two words with no separator, the range spans both. An offset with no word on
    /// either side, such as one inside a run of spaces, yields the collapsed range at `offset`.
    /// Offsets past the end are clamped.
    pub fn word_at(&self, offset: usize) -> TextRange {
        if self.segments.is_empty() {
            return TextRange::ZERO;
        }
        let offset = offset.min(self.len);
        let after = self
            .segments
            .iter()
            .find(|s| s.is_word && s.start <= offset && offset < s.end);
        let before = self
            .segments
            .iter()
            .find(|s| s.is_word && s.start < offset && offset <= s.end);
        match (before, after) {
            (Some(b), Some(a)) => TextRange::new(b.start, a.end),
            (Some(w), None) | (None, Some(w)) => TextRange::new(w.start, w.end),
            (None, None) => TextRange::collapsed(offset),
        }
    }
}

/// Returns the paragraph boundary around `offset` in `text`.
///
/// Paragraphs are separated by `'\n'`. The returned range starts right after the preceding
/// newline (or at 0) and ends at the next newline at or after `offset` (or at the end of the
/// text), so a newline belongs to the paragraph it terminates.
pub fn paragraph_boundary(text: &str, offset: usize) -> TextRange {
    let mut start = 0;
    let mut end = None;
    for (ix, ch) in text.chars().enumerate() {
        if ch != '\n' {
            continue;
        }
        if ix < offset {
            start = ix + 1;
        } else {
            end = Some(ix);
            break;
        }
    }
    let end = end.unwrap_or_else(|| text.chars().count());
    TextRange::new(start, end.max(start))
}
