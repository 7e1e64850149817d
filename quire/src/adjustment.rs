// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection adjustment policies.
//!
//! A drag or click produces a *raw* range: the offsets directly under the two handles. An
//! adjustment policy turns that raw range into the range that is actually selected, snapping to
//! characters, words or paragraphs. Policies are pure functions of the layout, the new raw range
//! and the previous raw and adjusted ranges.

use crate::TextRange;
use crate::layout::TextLayout;

/// Granularity used to adjust a raw selection range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionAdjustment {
    /// Use the raw range as is.
    #[default]
    None,
    /// Select at least one character.
    Character,
    /// Expand both ends to word boundaries.
    Word,
    /// Expand both ends to paragraph boundaries.
    Paragraph,
    /// Move by characters, but snap to words while expanding across a word boundary or when
    /// moving between lines.
    CharacterWithWordAccelerate,
}

impl SelectionAdjustment {
    /// Adjusts `new_raw`.
    ///
    /// `previous_raw` and `previous_adjusted` are the raw and adjusted ranges from the previous
    /// update of the same gesture, if any. `is_start_handle` says which end of the range moved.
    ///
    /// The result always lies within `0..=layout.len()`.
    pub fn adjust<L: TextLayout + ?Sized>(
        self,
        layout: &L,
        new_raw: TextRange,
        previous_raw: Option<TextRange>,
        previous_adjusted: Option<TextRange>,
        is_start_handle: bool,
    ) -> TextRange {
        match self {
            Self::None => new_raw,
            Self::Character => {
                if new_raw.is_collapsed() {
                    ensure_at_least_one_char(
                        new_raw.start(),
                        layout.len(),
                        is_start_handle,
                        previous_adjusted.is_some_and(TextRange::is_reversed),
                    )
                } else {
                    new_raw
                }
            }
            Self::Word => adjust_by_boundary(layout, new_raw, |offset| {
                layout.word_boundary(offset)
            }),
            Self::Paragraph => adjust_by_boundary(layout, new_raw, |offset| {
                layout.paragraph_boundary(offset)
            }),
            Self::CharacterWithWordAccelerate => {
                let Some(previous_adjusted) = previous_adjusted else {
                    return Self::Word.adjust(layout, new_raw, None, None, is_start_handle);
                };
                if new_raw.is_collapsed() {
                    return ensure_at_least_one_char(
                        new_raw.start(),
                        layout.len(),
                        is_start_handle,
                        previous_adjusted.is_reversed(),
                    );
                }
                let reversed = new_raw.is_reversed();
                if is_start_handle {
                    let start = accelerate_boundary(
                        layout,
                        BoundaryMove {
                            new_raw: new_raw.start(),
                            previous_raw: previous_raw.map(TextRange::start),
                            previous_adjusted: previous_adjusted.start(),
                            other: new_raw.end(),
                            is_start: true,
                            reversed,
                        },
                    );
                    TextRange::new(start, new_raw.end())
                } else {
                    let end = accelerate_boundary(
                        layout,
                        BoundaryMove {
                            new_raw: new_raw.end(),
                            previous_raw: previous_raw.map(TextRange::end),
                            previous_adjusted: previous_adjusted.end(),
                            other: new_raw.start(),
                            is_start: false,
                            reversed,
                        },
                    );
                    TextRange::new(new_raw.start(), end)
                }
            }
        }
    }
}

/// Expands a collapsed selection at `offset` to exactly one character.
///
/// `last_offset` is the length of the text. The character chosen keeps the handle orientation
/// given by `previous_handles_crossed`, except at either end of the text, where the handle that is
/// not being dragged is pinned to the text boundary. Empty text yields `(offset, offset)`.
///
/// ```
/// use quire::{TextRange, ensure_at_least_one_char};
///
/// assert_eq!(ensure_at_least_one_char(0, 5, true, false), TextRange::new(1, 0));
/// assert_eq!(ensure_at_least_one_char(5, 5, false, false), TextRange::new(5, 4));
/// assert_eq!(ensure_at_least_one_char(2, 5, false, false), TextRange::new(2, 3));
/// ```
pub fn ensure_at_least_one_char(
    offset: usize,
    last_offset: usize,
    is_start_handle: bool,
    previous_handles_crossed: bool,
) -> TextRange {
    if last_offset == 0 {
        return TextRange::collapsed(offset);
    }
    if offset == 0 {
        return if is_start_handle {
            TextRange::new(1, 0)
        } else {
            TextRange::new(0, 1)
        };
    }
    if offset >= last_offset {
        return if is_start_handle {
            TextRange::new(last_offset - 1, last_offset)
        } else {
            TextRange::new(last_offset, last_offset - 1)
        };
    }
    match (is_start_handle, previous_handles_crossed) {
        (true, false) => TextRange::new(offset - 1, offset),
        (true, true) => TextRange::new(offset + 1, offset),
        (false, false) => TextRange::new(offset, offset + 1),
        (false, true) => TextRange::new(offset, offset - 1),
    }
}

fn adjust_by_boundary<L, F>(layout: &L, range: TextRange, boundary: F) -> TextRange
where
    L: TextLayout + ?Sized,
    F: Fn(usize) -> TextRange,
{
    if layout.is_empty() {
        return TextRange::ZERO;
    }
    let max = layout.len() - 1;
    let start = boundary(range.start().min(max));
    let end = boundary(range.end().min(max));
    if range.is_reversed() {
        TextRange::new(start.end(), end.start())
    } else {
        TextRange::new(start.start(), end.end())
    }
}

/// The moving end of a selection, as seen by the word accelerated policy.
#[derive(Clone, Copy, Debug)]
struct BoundaryMove {
    new_raw: usize,
    previous_raw: Option<usize>,
    previous_adjusted: usize,
    /// Raw offset of the end that is not moving.
    other: usize,
    is_start: bool,
    reversed: bool,
}

impl BoundaryMove {
    /// Whether the moving end grows the selection.
    fn is_expanding(&self) -> bool {
        let Some(previous) = self.previous_raw else {
            return true;
        };
        if self.new_raw == previous {
            false
        } else if self.is_start ^ self.reversed {
            self.new_raw < previous
        } else {
            self.new_raw > previous
        }
    }
}

fn accelerate_boundary<L: TextLayout + ?Sized>(layout: &L, step: BoundaryMove) -> usize {
    if Some(step.new_raw) == step.previous_raw {
        return step.previous_adjusted;
    }
    let line = layout.line_for_offset(step.new_raw);
    if line != layout.line_for_offset(step.previous_adjusted) {
        return snap_to_word(layout, line, step);
    }
    if !step.is_expanding() {
        return step.new_raw;
    }
    let previous_word = layout.word_boundary(step.previous_adjusted);
    if step.previous_adjusted != previous_word.start() && step.previous_adjusted != previous_word.end()
    {
        return step.new_raw;
    }
    snap_to_word(layout, line, step)
}

/// Snaps the moving end to the nearer edge of its word, clipped to `line`.
fn snap_to_word<L: TextLayout + ?Sized>(layout: &L, line: usize, step: BoundaryMove) -> usize {
    let word = layout.word_boundary(step.new_raw);
    let start = if layout.line_for_offset(word.start()) == line {
        word.start()
    } else {
        layout.line_start(line)
    };
    let end = if layout.line_for_offset(word.end()) == line {
        word.end()
    } else {
        layout.line_end(line, false)
    };
    // Never collapse onto the other end.
    if start == step.other {
        return end;
    }
    if end == step.other {
        return start;
    }
    let threshold = (start + end) / 2;
    if step.is_start ^ step.reversed {
        if step.new_raw <= threshold { start } else { end }
    } else if step.new_raw >= threshold {
        end
    } else {
        start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MonospaceLayout, MonospaceMetrics};

    const WORDS: &str = "hello world hello world";

    fn wrapped(text: &str, columns: usize) -> MonospaceLayout {
        MonospaceLayout::with_metrics(text, MonospaceMetrics::default().with_wrap(columns))
    }

    #[track_caller]
    fn accelerate(
        layout: &MonospaceLayout,
        raw: (usize, usize),
        previous: (usize, usize),
        is_start: bool,
    ) -> TextRange {
        let previous = TextRange::new(previous.0, previous.1);
        SelectionAdjustment::CharacterWithWordAccelerate.adjust(
            layout,
            TextRange::new(raw.0, raw.1),
            Some(previous),
            Some(previous),
            is_start,
        )
    }

    #[test]
    fn none_is_identity() {
        let layout = MonospaceLayout::new("hello world");
        let raw = TextRange::new(3, 1);
        assert_eq!(
            SelectionAdjustment::None.adjust(&layout, raw, None, None, true),
            raw
        );
    }

    #[test]
    fn character_expands_collapsed() {
        let layout = MonospaceLayout::new("hello");
        let character = SelectionAdjustment::Character;
        assert_eq!(
            character.adjust(
                &layout,
                TextRange::new(1, 1),
                None,
                Some(TextRange::new(1, 2)),
                false
            ),
            TextRange::new(1, 2)
        );
        assert_eq!(
            character.adjust(
                &layout,
                TextRange::new(2, 2),
                None,
                Some(TextRange::new(2, 1)),
                false
            ),
            TextRange::new(2, 1)
        );
        assert_eq!(
            character.adjust(&layout, TextRange::new(0, 3), None, None, false),
            TextRange::new(0, 3)
        );
    }

    #[test]
    fn ensure_one_char_table() {
        assert_eq!(ensure_at_least_one_char(3, 0, true, false), TextRange::new(3, 3));
        assert_eq!(ensure_at_least_one_char(0, 5, false, true), TextRange::new(0, 1));
        assert_eq!(ensure_at_least_one_char(5, 5, true, true), TextRange::new(4, 5));
        assert_eq!(ensure_at_least_one_char(2, 5, true, false), TextRange::new(1, 2));
        assert_eq!(ensure_at_least_one_char(2, 5, true, true), TextRange::new(3, 2));
        assert_eq!(ensure_at_least_one_char(2, 5, false, true), TextRange::new(2, 1));
    }

    #[test]
    fn word_expands_and_keeps_orientation() {
        let layout = MonospaceLayout::new("hello world");
        let word = SelectionAdjustment::Word;
        let adjust = |start, end| word.adjust(&layout, TextRange::new(start, end), None, None, true);
        assert_eq!(adjust(1, 1), TextRange::new(0, 5));
        assert_eq!(adjust(6, 6), TextRange::new(6, 11));
        assert_eq!(adjust(5, 5), TextRange::new(0, 5));
        assert_eq!(adjust(0, 0), TextRange::new(0, 5));
        assert_eq!(adjust(11, 11), TextRange::new(6, 11));
        assert_eq!(adjust(1, 2), TextRange::new(0, 5));
        assert_eq!(adjust(2, 1), TextRange::new(5, 0));

        let layout = MonospaceLayout::new(WORDS);
        assert_eq!(
            word.adjust(&layout, TextRange::new(4, 7), None, None, true),
            TextRange::new(0, 11)
        );
        assert_eq!(
            word.adjust(&layout, TextRange::new(7, 4), None, None, true),
            TextRange::new(11, 0)
        );
    }

    #[test]
    fn word_on_empty_text() {
        let layout = MonospaceLayout::new("");
        assert_eq!(
            SelectionAdjustment::Word.adjust(&layout, TextRange::ZERO, None, None, true),
            TextRange::ZERO
        );
        assert_eq!(
            SelectionAdjustment::Paragraph.adjust(&layout, TextRange::ZERO, None, None, true),
            TextRange::ZERO
        );
    }

    #[test]
    fn paragraph_expands_to_newlines() {
        let paragraph = SelectionAdjustment::Paragraph;
        let layout = MonospaceLayout::new("hello world\nhello world");
        let adjust = |start, end| {
            paragraph.adjust(&layout, TextRange::new(start, end), None, None, true)
        };
        assert_eq!(adjust(14, 14), TextRange::new(12, 23));
        assert_eq!(adjust(22, 22), TextRange::new(12, 23));
        assert_eq!(adjust(23, 23), TextRange::new(12, 23));
        assert_eq!(adjust(1, 2), TextRange::new(0, 11));
        assert_eq!(adjust(2, 1), TextRange::new(11, 0));

        let layout = MonospaceLayout::new("hello world\nhello world\nhello world\nhello world");
        assert_eq!(
            paragraph.adjust(&layout, TextRange::new(13, 26), None, None, true),
            TextRange::new(12, 35)
        );
        assert_eq!(
            paragraph.adjust(&layout, TextRange::ZERO, None, None, true),
            TextRange::new(0, 11)
        );
    }

    #[test]
    fn accelerate_starts_with_word() {
        let layout = MonospaceLayout::new("hello world\nhello world");
        assert_eq!(
            SelectionAdjustment::CharacterWithWordAccelerate.adjust(
                &layout,
                TextRange::new(3, 3),
                None,
                None,
                false
            ),
            TextRange::new(0, 5)
        );
    }

    #[test]
    fn accelerate_within_word_moves_by_char() {
        let layout = MonospaceLayout::new("hello world\nhello world");
        assert_eq!(accelerate(&layout, (6, 8), (6, 7), false), TextRange::new(6, 8));
        assert_eq!(accelerate(&layout, (8, 6), (7, 6), true), TextRange::new(8, 6));
        assert_eq!(accelerate(&layout, (8, 11), (7, 11), true), TextRange::new(8, 11));
        assert_eq!(accelerate(&layout, (11, 8), (11, 7), false), TextRange::new(11, 8));
    }

    #[test]
    fn accelerate_snaps_when_leaving_word_boundary() {
        let layout = MonospaceLayout::new(WORDS);
        assert_eq!(accelerate(&layout, (6, 13), (6, 11), false), TextRange::new(6, 12));
        assert_eq!(accelerate(&layout, (13, 6), (11, 6), true), TextRange::new(12, 6));
        assert_eq!(accelerate(&layout, (5, 11), (6, 11), true), TextRange::new(5, 11));
        assert_eq!(accelerate(&layout, (11, 5), (11, 6), false), TextRange::new(11, 5));
        assert_eq!(accelerate(&layout, (6, 15), (6, 11), false), TextRange::new(6, 17));
        assert_eq!(accelerate(&layout, (15, 6), (11, 6), true), TextRange::new(17, 6));
        assert_eq!(accelerate(&layout, (2, 11), (6, 11), true), TextRange::new(0, 11));
        assert_eq!(accelerate(&layout, (11, 2), (11, 6), false), TextRange::new(11, 0));
    }

    #[test]
    fn accelerate_shrinks_by_char() {
        let layout = MonospaceLayout::new(WORDS);
        assert_eq!(accelerate(&layout, (0, 8), (0, 11), false), TextRange::new(0, 8));
        assert_eq!(accelerate(&layout, (8, 0), (11, 0), true), TextRange::new(8, 0));
        assert_eq!(accelerate(&layout, (2, 8), (0, 8), true), TextRange::new(2, 8));
        assert_eq!(accelerate(&layout, (8, 2), (8, 0), false), TextRange::new(8, 2));
    }

    #[test]
    fn accelerate_snaps_across_lines() {
        // Lines: "hello " "world " "hello " "world".
        let layout = wrapped(WORDS, 6);
        assert_eq!(accelerate(&layout, (3, 8), (3, 4), false), TextRange::new(3, 11));
        assert_eq!(accelerate(&layout, (8, 3), (4, 3), true), TextRange::new(11, 3));
        assert_eq!(accelerate(&layout, (3, 8), (7, 8), true), TextRange::new(5, 8));
        assert_eq!(accelerate(&layout, (8, 3), (8, 7), false), TextRange::new(8, 5));
        assert_eq!(accelerate(&layout, (2, 4), (2, 8), false), TextRange::new(2, 5));
        assert_eq!(accelerate(&layout, (4, 2), (8, 2), true), TextRange::new(5, 2));
        assert_eq!(accelerate(&layout, (7, 8), (2, 8), true), TextRange::new(6, 8));
        assert_eq!(accelerate(&layout, (8, 7), (8, 2), false), TextRange::new(8, 6));
    }

    #[test]
    fn accelerate_clips_word_to_line() {
        // Lines: "hello wo" "rld hell" "o world".
        let layout = wrapped(WORDS, 8);
        assert_eq!(accelerate(&layout, (15, 17), (16, 17), true), TextRange::new(16, 17));
        assert_eq!(accelerate(&layout, (17, 15), (17, 16), false), TextRange::new(17, 16));
    }

    #[test]
    fn accelerate_never_collapses_onto_other_end() {
        let layout = wrapped(WORDS, 6);
        assert_eq!(accelerate(&layout, (6, 7), (6, 15), false), TextRange::new(6, 11));
    }

    #[test]
    fn accelerate_collapsed_keeps_one_char() {
        let layout = MonospaceLayout::new(WORDS);
        assert_eq!(accelerate(&layout, (4, 4), (4, 5), false), TextRange::new(4, 5));
        assert_eq!(accelerate(&layout, (4, 4), (5, 4), false), TextRange::new(4, 3));
    }

    #[test]
    fn accelerate_same_raw_offset_keeps_previous() {
        let layout = MonospaceLayout::new(WORDS);
        let adjusted = SelectionAdjustment::CharacterWithWordAccelerate.adjust(
            &layout,
            TextRange::new(6, 13),
            Some(TextRange::new(6, 13)),
            Some(TextRange::new(6, 17)),
            false,
        );
        assert_eq!(adjusted, TextRange::new(6, 17));
    }
}
