// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A deterministic fixed-cell layout.

use alloc::string::String;
use alloc::vec::Vec;

use peniko::kurbo::{Point, Rect, Size};
use unicode_bidi::BidiInfo;

use crate::layout::{ResolvedTextDirection, TextLayout};
use crate::segment::WordBoundaries;
use crate::{TextRange, char_len};

/// Cell metrics for a [`MonospaceLayout`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    /// Advance of every character.
    pub char_width: f64,
    /// Height of every line.
    pub line_height: f64,
    /// Wrap lines after this many characters.
    pub wrap_columns: Option<usize>,
}

impl MonospaceMetrics {
    /// Default character advance.
    pub const DEFAULT_CHAR_WIDTH: f64 = 10.0;
    /// Default line height.
    pub const DEFAULT_LINE_HEIGHT: f64 = 20.0;

    /// Returns these metrics wrapping after `columns` characters.
    #[must_use]
    pub fn with_wrap(mut self, columns: usize) -> Self {
        self.wrap_columns = Some(columns.max(1));
        self
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            char_width: Self::DEFAULT_CHAR_WIDTH,
            line_height: Self::DEFAULT_LINE_HEIGHT,
            wrap_columns: None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Line {
    start: usize,
    /// End of the printable content, before any newline.
    content_end: usize,
    /// Start of the next line.
    end: usize,
    rtl: bool,
}

/// A [`TextLayout`] where every character occupies one cell of the same size.
///
/// Lines break at `'\n'` and, when [`MonospaceMetrics::wrap_columns`] is set, after that many
/// characters. Right-to-left paragraphs are mirrored as a whole; runs inside a paragraph are not
/// reordered, so the primary and secondary caret positions always coincide.
///
/// This is enough geometry to exercise selection without a shaping engine, and is what the
/// tests in this workspace lay text out with.
#[derive(Clone, Debug)]
pub struct MonospaceLayout {
    text: String,
    chars: Vec<char>,
    metrics: MonospaceMetrics,
    lines: Vec<Line>,
    words: WordBoundaries,
    rtl_chars: Vec<bool>,
    paragraphs: Vec<(TextRange, bool)>,
    width: f64,
}

impl MonospaceLayout {
    /// Lays out `text` with default metrics.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_metrics(text, MonospaceMetrics::default())
    }

    /// Lays out `text` with the given metrics.
    pub fn with_metrics(text: impl Into<String>, metrics: MonospaceMetrics) -> Self {
        let text = text.into();
        let chars: Vec<char> = text.chars().collect();

        let bidi = BidiInfo::new(&text, None);
        let mut byte_to_char = Vec::with_capacity(text.len() + 1);
        for (ix, ch) in chars.iter().enumerate() {
            byte_to_char.extend(core::iter::repeat_n(ix, ch.len_utf8()));
        }
        byte_to_char.push(chars.len());
        let rtl_chars = text
            .char_indices()
            .map(|(byte, _)| bidi.levels[byte].is_rtl())
            .collect();
        let paragraphs: Vec<(TextRange, bool)> = bidi
            .paragraphs
            .iter()
            .map(|p| {
                let range = TextRange::new(byte_to_char[p.range.start], byte_to_char[p.range.end]);
                (range, p.level.is_rtl())
            })
            .collect();

        let is_rtl_at = |offset: usize| {
            paragraphs
                .iter()
                .find(|(range, _)| range.contains(offset))
                .map(|(_, rtl)| *rtl)
                .unwrap_or(false)
        };

        let mut lines = Vec::new();
        let mut paragraph_start = 0;
        let mut widest = 0;
        for content in text.split('\n') {
            let content_len = char_len(content);
            let content_end = paragraph_start + content_len;
            let has_newline = chars.get(content_end) == Some(&'\n');
            let rtl = is_rtl_at(paragraph_start);
            let wrap = metrics.wrap_columns.unwrap_or(usize::MAX).max(1);
            let mut line_start = paragraph_start;
            loop {
                let line_content_end = content_end.min(line_start.saturating_add(wrap));
                let is_last = line_content_end == content_end;
                let end = if is_last && has_newline {
                    content_end + 1
                } else {
                    line_content_end
                };
                widest = widest.max(line_content_end - line_start);
                lines.push(Line {
                    start: line_start,
                    content_end: line_content_end,
                    end,
                    rtl,
                });
                if is_last {
                    break;
                }
                line_start = line_content_end;
            }
            paragraph_start = content_end + 1;
        }

        let columns = metrics.wrap_columns.unwrap_or(widest);
        let width = columns as f64 * metrics.char_width;
        log::trace!("laid out {} chars into {} lines", chars.len(), lines.len());
        Self {
            words: WordBoundaries::new(&text),
            text,
            chars,
            metrics,
            lines,
            rtl_chars,
            paragraphs,
            width,
        }
    }

    /// The metrics this layout was built with.
    pub fn metrics(&self) -> MonospaceMetrics {
        self.metrics
    }

    fn line(&self, line: usize) -> &Line {
        &self.lines[line.min(self.lines.len() - 1)]
    }

    fn column_x(&self, line: &Line, column: usize) -> f64 {
        let x = column as f64 * self.metrics.char_width;
        if line.rtl { self.width - x } else { x }
    }
}

impl TextLayout for MonospaceLayout {
    fn text(&self) -> &str {
        &self.text
    }

    fn len(&self) -> usize {
        self.chars.len()
    }

    fn size(&self) -> Size {
        Size::new(
            self.width,
            self.lines.len() as f64 * self.metrics.line_height,
        )
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_for_offset(&self, offset: usize) -> usize {
        let offset = offset.min(self.chars.len());
        self.lines
            .partition_point(|line| line.start <= offset)
            .saturating_sub(1)
    }

    fn line_start(&self, line: usize) -> usize {
        self.line(line).start
    }

    fn line_end(&self, line: usize, visible_end: bool) -> usize {
        let line = self.line(line);
        if !visible_end {
            return line.end;
        }
        let mut end = line.content_end;
        while end > line.start && self.chars[end - 1].is_whitespace() {
            end -= 1;
        }
        end
    }

    fn line_top(&self, line: usize) -> f64 {
        line.min(self.lines.len() - 1) as f64 * self.metrics.line_height
    }

    fn line_bottom(&self, line: usize) -> f64 {
        self.line_top(line) + self.metrics.line_height
    }

    fn horizontal_position(&self, offset: usize, _use_primary_direction: bool) -> f64 {
        let offset = offset.min(self.chars.len());
        let line = self.line(self.line_for_offset(offset));
        self.column_x(line, offset.min(line.content_end) - line.start)
    }

    fn offset_for_position(&self, position: Point) -> usize {
        let row = (position.y / self.metrics.line_height).floor().max(0.0);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "row is non-negative and bounded by the clamp below"
        )]
        let line = self.line((row as usize).min(self.lines.len() - 1));
        let x = if line.rtl {
            self.width - position.x
        } else {
            position.x
        };
        let column = (x / self.metrics.char_width).round().max(0.0);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "column is non-negative and clamped to the line length"
        )]
        let column = (column as usize).min(line.content_end - line.start);
        line.start + column
    }

    fn word_boundary(&self, offset: usize) -> TextRange {
        self.words.word_at(offset)
    }

    fn bidi_run_direction(&self, offset: usize) -> ResolvedTextDirection {
        match self.rtl_chars.get(offset.min(self.chars.len().saturating_sub(1))) {
            Some(true) => ResolvedTextDirection::Rtl,
            _ => ResolvedTextDirection::Ltr,
        }
    }

    fn paragraph_direction(&self, offset: usize) -> ResolvedTextDirection {
        let rtl = self
            .paragraphs
            .iter()
            .find(|(range, _)| range.contains(offset))
            .or(self.paragraphs.last())
            .is_some_and(|(_, rtl)| *rtl);
        if rtl {
            ResolvedTextDirection::Rtl
        } else {
            ResolvedTextDirection::Ltr
        }
    }

    fn bounding_box(&self, offset: usize) -> Rect {
        let offset = offset.min(self.chars.len());
        let line_ix = self.line_for_offset(offset);
        let line = self.line(line_ix);
        let column = offset - line.start;
        let x0 = column as f64 * self.metrics.char_width;
        let x1 = if offset < self.chars.len() {
            x0 + self.metrics.char_width
        } else {
            x0
        };
        let (x0, x1) = if line.rtl {
            (self.width - x1, self.width - x0)
        } else {
            (x0, x1)
        };
        Rect::new(x0, self.line_top(line_ix), x1, self.line_bottom(line_ix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_breaks_make_lines() {
        let layout = MonospaceLayout::new("hello world\nhi");
        assert_eq!(layout.line_count(), 2);
        assert_eq!(layout.line_for_offset(11), 0);
        assert_eq!(layout.line_for_offset(12), 1);
        assert_eq!(layout.line_for_offset(14), 1);
        assert_eq!(layout.line_end(0, false), 12);
        assert_eq!(layout.line_end(0, true), 11);
        assert_eq!(layout.size(), Size::new(110.0, 40.0));
    }

    #[test]
    fn trailing_newline_adds_empty_line() {
        let layout = MonospaceLayout::new("ab\n");
        assert_eq!(layout.line_count(), 2);
        assert_eq!(layout.line_for_offset(3), 1);
        assert_eq!(layout.line_start(1), 3);
    }

    #[test]
    fn wrapping_splits_paragraphs() {
        let metrics = MonospaceMetrics::default().with_wrap(6);
        let layout = MonospaceLayout::with_metrics("hello world", metrics);
        assert_eq!(layout.line_count(), 2);
        assert_eq!(layout.line_for_offset(5), 0);
        assert_eq!(layout.line_for_offset(6), 1);
        assert_eq!(layout.line_start(1), 6);
        assert_eq!(layout.line_end(0, false), 6);
        assert_eq!(layout.line_end(0, true), 5);
    }

    #[test]
    fn positions_round_trip_through_offsets() {
        let layout = MonospaceLayout::new("abc\ndefgh");
        assert_eq!(layout.offset_for_position(Point::new(21.0, 5.0)), 2);
        assert_eq!(layout.offset_for_position(Point::new(24.0, 25.0)), 6);
        // Past the end of a short line clamps to its content end.
        assert_eq!(layout.offset_for_position(Point::new(90.0, 5.0)), 3);
        assert_eq!(layout.offset_for_position(Point::new(-10.0, 100.0)), 4);
        assert_eq!(layout.horizontal_position(6, true), 20.0);
        assert_eq!(layout.line_bottom(1), 40.0);
    }

    #[test]
    fn rtl_paragraph_is_mirrored() {
        let layout = MonospaceLayout::new("\u{5d0}\u{5d1}\u{5d2}");
        assert_eq!(layout.paragraph_direction(0), ResolvedTextDirection::Rtl);
        assert_eq!(layout.bidi_run_direction(1), ResolvedTextDirection::Rtl);
        assert_eq!(layout.horizontal_position(0, true), 30.0);
        assert_eq!(layout.horizontal_position(3, true), 0.0);
        assert_eq!(layout.offset_for_position(Point::new(28.0, 1.0)), 0);
    }

    #[test]
    fn empty_text_has_one_line() {
        let layout = MonospaceLayout::new("");
        assert_eq!(layout.line_count(), 1);
        assert_eq!(layout.line_for_offset(0), 0);
        assert_eq!(layout.offset_for_position(Point::new(50.0, 50.0)), 0);
        assert_eq!(layout.word_boundary(0), TextRange::ZERO);
        assert_eq!(layout.bidi_run_direction(0), ResolvedTextDirection::Ltr);
    }
}
