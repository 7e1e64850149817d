// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::ops::Range;

/// A pair of character offsets into some text.
///
/// Unlike `Range<usize>`, a `TextRange` keeps its orientation: `start` may be greater than `end`,
/// in which case the range is *reversed*. Selections use this to remember which handle was
/// dragged past the other one.
///
/// Offsets count Unicode scalar values (`char`s), not bytes, and are valid when they lie in
/// `0..=len` of the text they were produced for.
///
/// ## Example
///
/// ```
/// use quire::TextRange;
///
/// let range = TextRange::new(5, 2);
/// assert!(range.is_reversed());
/// assert_eq!(range.min(), 2);
/// assert_eq!(range.len(), 3);
/// assert_eq!(range.as_range(), 2..5);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextRange {
    start: usize,
    end: usize,
}

impl TextRange {
    /// The collapsed range at offset zero.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a range from `start` to `end`; `start` may be past `end`.
    #[must_use]
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Creates a collapsed range at `offset`.
    #[must_use]
    #[inline]
    pub const fn collapsed(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// The start offset.
    #[must_use]
    #[inline]
    pub const fn start(self) -> usize {
        self.start
    }

    /// The end offset.
    #[must_use]
    #[inline]
    pub const fn end(self) -> usize {
        self.end
    }

    /// The smaller of the two offsets.
    #[must_use]
    #[inline]
    pub const fn min(self) -> usize {
        if self.start < self.end {
            self.start
        } else {
            self.end
        }
    }

    /// The larger of the two offsets.
    #[must_use]
    #[inline]
    pub const fn max(self) -> usize {
        if self.start > self.end {
            self.start
        } else {
            self.end
        }
    }

    /// Number of characters covered, regardless of orientation.
    #[must_use]
    #[inline]
    pub const fn len(self) -> usize {
        self.max() - self.min()
    }

    /// Returns `true` if `start == end`.
    #[must_use]
    #[inline]
    pub const fn is_collapsed(self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `start > end`.
    #[must_use]
    #[inline]
    pub const fn is_reversed(self) -> bool {
        self.start > self.end
    }

    /// Alias of [`Self::is_collapsed`], kept for parity with `Range::is_empty`.
    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.is_collapsed()
    }

    /// Returns `true` if `offset` lies in `min()..max()`.
    #[must_use]
    #[inline]
    pub const fn contains(self, offset: usize) -> bool {
        offset >= self.min() && offset < self.max()
    }

    /// Returns the same range with `start` and `end` swapped.
    #[must_use]
    #[inline]
    pub const fn flipped(self) -> Self {
        Self::new(self.end, self.start)
    }

    /// The covered offsets as an ascending `Range`.
    #[must_use]
    #[inline]
    pub const fn as_range(self) -> Range<usize> {
        self.min()..self.max()
    }
}

impl From<Range<usize>> for TextRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextRange({}, {})", self.start, self.end)
    }
}

/// Returns the substring covering the character offsets `range`.
///
/// Offsets past the end of `text` are clamped.
pub fn char_slice(text: &str, range: Range<usize>) -> &str {
    let byte_at = |offset: usize| {
        text.char_indices()
            .nth(offset)
            .map(|(ix, _)| ix)
            .unwrap_or(text.len())
    };
    let start = byte_at(range.start);
    let end = byte_at(range.end.max(range.start));
    &text[start..end]
}

/// Returns the number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
