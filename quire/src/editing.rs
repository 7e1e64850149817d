// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursor movement for single-text editing surfaces.

use crate::TextRange;
use crate::layout::{ResolvedTextDirection, TextLayout};

/// A cursor or selection within one text, with an anchor and a moving focus.
///
/// All movement methods return a new value. When `extend` is `true` the anchor is kept and only
/// the focus moves; otherwise the result is collapsed at the new focus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextSelection {
    anchor: usize,
    focus: usize,
}

impl TextSelection {
    /// Creates a selection from `anchor` to `focus`.
    pub const fn new(anchor: usize, focus: usize) -> Self {
        Self { anchor, focus }
    }

    /// Creates a collapsed selection at `offset`.
    pub const fn collapsed(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Creates a selection covering the word at `offset`.
    pub fn word_at<L: TextLayout + ?Sized>(layout: &L, offset: usize) -> Self {
        let word = layout.word_boundary(offset);
        Self::new(word.start(), word.end())
    }

    /// Where the selection was started.
    pub const fn anchor(&self) -> usize {
        self.anchor
    }

    /// The moving end of the selection.
    pub const fn focus(&self) -> usize {
        self.focus
    }

    /// Returns `true` if anchor and focus are equal.
    pub const fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// The selection as a range from anchor to focus.
    pub const fn text_range(&self) -> TextRange {
        TextRange::new(self.anchor, self.focus)
    }

    /// Moves one character to the right in visual order.
    #[must_use]
    pub fn move_right<L: TextLayout + ?Sized>(&self, layout: &L, extend: bool) -> Self {
        if !extend && !self.is_collapsed() {
            let range = self.text_range();
            return Self::collapsed(if self.is_ltr(layout) {
                range.max()
            } else {
                range.min()
            });
        }
        let focus = if self.is_ltr(layout) {
            (self.focus + 1).min(layout.len())
        } else {
            self.focus.saturating_sub(1)
        };
        self.maybe_extend(focus, extend)
    }

    /// Moves one character to the left in visual order.
    #[must_use]
    pub fn move_left<L: TextLayout + ?Sized>(&self, layout: &L, extend: bool) -> Self {
        if !extend && !self.is_collapsed() {
            let range = self.text_range();
            return Self::collapsed(if self.is_ltr(layout) {
                range.min()
            } else {
                range.max()
            });
        }
        let focus = if self.is_ltr(layout) {
            self.focus.saturating_sub(1)
        } else {
            (self.focus + 1).min(layout.len())
        };
        self.maybe_extend(focus, extend)
    }

    /// Moves by one word to the right in visual order.
    ///
    /// In left-to-right text the focus lands on the end of the word that follows the character
    /// after the focus, so from inside a word it skips to the end of the next word.
    #[must_use]
    pub fn move_right_by_word<L: TextLayout + ?Sized>(&self, layout: &L, extend: bool) -> Self {
        let focus = if self.is_ltr(layout) {
            next_word_offset(layout, self.focus)
        } else {
            previous_word_offset(layout, self.focus)
        };
        self.maybe_extend(focus, extend)
    }

    /// Moves by one word to the left in visual order.
    ///
    /// In left-to-right text the focus lands on the start of the word at the focus, or of the
    /// preceding word when already at a word start.
    #[must_use]
    pub fn move_left_by_word<L: TextLayout + ?Sized>(&self, layout: &L, extend: bool) -> Self {
        let focus = if self.is_ltr(layout) {
            previous_word_offset(layout, self.focus)
        } else {
            next_word_offset(layout, self.focus)
        };
        self.maybe_extend(focus, extend)
    }

    /// Moves to the start of the visual line.
    #[must_use]
    pub fn move_to_line_start<L: TextLayout + ?Sized>(&self, layout: &L, extend: bool) -> Self {
        let line = layout.line_for_offset(self.focus);
        self.maybe_extend(layout.line_start(line), extend)
    }

    /// Moves to the end of the visual line, before any trailing whitespace.
    #[must_use]
    pub fn move_to_line_end<L: TextLayout + ?Sized>(&self, layout: &L, extend: bool) -> Self {
        let line = layout.line_for_offset(self.focus);
        self.maybe_extend(layout.line_end(line, true), extend)
    }

    /// Moves to the start of the paragraph, or of the previous one when already there.
    #[must_use]
    pub fn move_to_paragraph_start<L: TextLayout + ?Sized>(
        &self,
        layout: &L,
        extend: bool,
    ) -> Self {
        let mut start = layout.paragraph_boundary(self.focus).start();
        if start == self.focus && start > 0 {
            start = layout.paragraph_boundary(start - 1).start();
        }
        self.maybe_extend(start, extend)
    }

    /// Moves to the end of the paragraph, or of the next one when already there.
    #[must_use]
    pub fn move_to_paragraph_end<L: TextLayout + ?Sized>(&self, layout: &L, extend: bool) -> Self {
        let mut end = layout.paragraph_boundary(self.focus).end();
        if end == self.focus && end < layout.len() {
            end = layout.paragraph_boundary(end + 1).end();
        }
        self.maybe_extend(end, extend)
    }

    /// Moves to the start of the text.
    #[must_use]
    pub fn move_to_text_start(&self, extend: bool) -> Self {
        self.maybe_extend(0, extend)
    }

    /// Moves to the end of the text.
    #[must_use]
    pub fn move_to_text_end<L: TextLayout + ?Sized>(&self, layout: &L, extend: bool) -> Self {
        self.maybe_extend(layout.len(), extend)
    }

    /// Selects the whole text.
    #[must_use]
    pub fn select_all<L: TextLayout + ?Sized>(layout: &L) -> Self {
        Self::new(0, layout.len())
    }

    /// Collapses the selection at its focus.
    #[must_use]
    pub fn collapse(&self) -> Self {
        Self::collapsed(self.focus)
    }

    fn is_ltr<L: TextLayout + ?Sized>(&self, layout: &L) -> bool {
        layout.paragraph_direction(self.focus) != ResolvedTextDirection::Rtl
    }

    fn maybe_extend(&self, focus: usize, extend: bool) -> Self {
        if extend {
            Self::new(self.anchor, focus)
        } else {
            Self::collapsed(focus)
        }
    }
}

/// Offset of the end of the word following the character after `offset`.
pub fn next_word_offset<L: TextLayout + ?Sized>(layout: &L, offset: usize) -> usize {
    let len = layout.len();
    let mut at = offset + 1;
    while at < len {
        let end = layout.word_boundary(at).end();
        if end > at {
            return end;
        }
        at += 1;
    }
    len
}

/// Offset of the start of the word at `offset`, or of the preceding word if `offset` already
/// starts one.
pub fn previous_word_offset<L: TextLayout + ?Sized>(layout: &L, offset: usize) -> usize {
    let mut at = offset.min(layout.len());
    while at > 0 {
        let start = layout.word_boundary(at).start();
        if start < at {
            return start;
        }
        at -= 1;
    }
    0
}
