// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The text layout query facade consumed by selection.

use peniko::kurbo::{Point, Rect, Size};

use crate::TextRange;
use crate::segment::paragraph_boundary;

/// Resolved direction of a run of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResolvedTextDirection {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
    /// No direction could be resolved (e.g. no layout was available).
    Unspecified,
}

/// Read-only queries over a laid out run of text.
///
/// Implementations own their text and answer in their own local pixel space, with the origin at
/// the top left corner of the layout. All offsets are character offsets in `0..=len()`;
/// implementations clamp offsets outside that range rather than panicking.
pub trait TextLayout {
    /// The laid out text.
    fn text(&self) -> &str;

    /// Number of characters in [`Self::text`].
    fn len(&self) -> usize;

    /// Returns `true` if the text is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the layout.
    fn size(&self) -> Size;

    /// Number of visual lines. Always at least one.
    fn line_count(&self) -> usize;

    /// Index of the line containing `offset`.
    fn line_for_offset(&self, offset: usize) -> usize;

    /// First offset of `line`.
    fn line_start(&self, line: usize) -> usize;

    /// Offset after the last character of `line`.
    ///
    /// With `visible_end`, trailing whitespace and the terminating newline are excluded.
    fn line_end(&self, line: usize, visible_end: bool) -> usize;

    /// Top of `line`.
    fn line_top(&self, line: usize) -> f64;

    /// Bottom of `line`.
    fn line_bottom(&self, line: usize) -> f64;

    /// Horizontal caret position for `offset`.
    ///
    /// At a bidi run boundary a caret has two candidate positions; `use_primary_direction`
    /// selects the one that follows the paragraph direction.
    fn horizontal_position(&self, offset: usize, use_primary_direction: bool) -> f64;

    /// Character offset closest to `position`.
    fn offset_for_position(&self, position: Point) -> usize;

    /// Word boundary around `offset`.
    fn word_boundary(&self, offset: usize) -> TextRange;

    /// Paragraph boundary around `offset`, computed on the raw text.
    fn paragraph_boundary(&self, offset: usize) -> TextRange {
        paragraph_boundary(self.text(), offset)
    }

    /// Direction of the bidi run containing `offset`.
    fn bidi_run_direction(&self, offset: usize) -> ResolvedTextDirection;

    /// Base direction of the paragraph containing `offset`.
    fn paragraph_direction(&self, offset: usize) -> ResolvedTextDirection;

    /// Bounding box of the character at `offset`.
    fn bounding_box(&self, offset: usize) -> Rect;
}

/// Position of a selection handle anchored at `offset`, in the layout's local space.
///
/// The handle sits at the bottom of the line containing `offset`. Its horizontal position uses the
/// primary caret when the character the handle is attached to runs in the paragraph direction.
/// That character is the one at `offset` for a start handle and the one before `offset` for an end
/// handle; crossed handles swap roles.
pub fn selection_handle_position<L: TextLayout + ?Sized>(
    layout: &L,
    offset: usize,
    is_start_handle: bool,
    handles_crossed: bool,
) -> Point {
    let line = layout.line_for_offset(offset);
    let check = if is_start_handle != handles_crossed {
        offset
    } else {
        offset.saturating_sub(1)
    };
    let use_primary = layout.bidi_run_direction(check) == layout.paragraph_direction(offset);
    let x = layout.horizontal_position(offset, use_primary);
    Point::new(x, layout.line_bottom(line))
}

/// The range of the visual line containing `offset`, excluding trailing whitespace.
pub fn line_range_at<L: TextLayout + ?Sized>(layout: &L, offset: usize) -> TextRange {
    let line = layout.line_for_offset(offset);
    TextRange::new(layout.line_start(line), layout.line_end(line, true))
}
