// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading-order comparisons between handle positions and selectable bounds.

use core::cmp::Ordering;

use quire::kurbo::{Point, Rect};

use crate::coordinates::contains_inclusive;

/// How selectables are laid out relative to each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// Selectables are stacked top to bottom, and text reads left to right within a row.
    #[default]
    Vertical,
    /// Selectables are placed left to right, and text reads top to bottom within a column.
    Horizontal,
}

impl SelectionMode {
    /// Compares `position` with `bounds` in reading order.
    ///
    /// Returns [`Ordering::Equal`] if `position` is inside `bounds`, [`Ordering::Less`] if it
    /// comes before them and [`Ordering::Greater`] if after.
    ///
    /// All four edges count as inside. A layout is exactly as wide as its longest line, so the
    /// handle after the last character sits on the right edge and must still hit the selectable.
    pub fn compare(self, position: Point, bounds: Rect) -> Ordering {
        if contains_inclusive(bounds, position) {
            return Ordering::Equal;
        }
        let before = match self {
            Self::Vertical => {
                position.y < bounds.y0 || (position.x < bounds.x0 && position.y < bounds.y1)
            }
            Self::Horizontal => {
                position.x < bounds.x0 || (position.y < bounds.y0 && position.x < bounds.x1)
            }
        };
        if before {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Returns `true` if a selection from `start` to `end` covers any part of `bounds`.
    ///
    /// That is the case when either handle is inside `bounds`, or when exactly one handle comes
    /// after them.
    pub fn is_selected(self, bounds: Rect, start: Point, end: Point) -> bool {
        if contains_inclusive(bounds, start) || contains_inclusive(bounds, end) {
            return true;
        }
        let start_after = self.compare(start, bounds) == Ordering::Greater;
        let end_after = self.compare(end, bounds) == Ordering::Greater;
        start_after != end_after
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect::new(100.0, 100.0, 200.0, 200.0);

    #[test]
    fn vertical_compare() {
        let mode = SelectionMode::Vertical;
        assert_eq!(mode.compare(Point::new(150.0, 150.0), BOUNDS), Ordering::Equal);
        assert_eq!(mode.compare(Point::new(200.0, 200.0), BOUNDS), Ordering::Equal);
        assert_eq!(mode.compare(Point::new(500.0, 50.0), BOUNDS), Ordering::Less);
        assert_eq!(mode.compare(Point::new(50.0, 150.0), BOUNDS), Ordering::Less);
        assert_eq!(mode.compare(Point::new(250.0, 150.0), BOUNDS), Ordering::Greater);
        assert_eq!(mode.compare(Point::new(50.0, 250.0), BOUNDS), Ordering::Greater);
    }

    #[test]
    fn horizontal_compare() {
        let mode = SelectionMode::Horizontal;
        assert_eq!(mode.compare(Point::new(50.0, 500.0), BOUNDS), Ordering::Less);
        assert_eq!(mode.compare(Point::new(150.0, 50.0), BOUNDS), Ordering::Less);
        assert_eq!(mode.compare(Point::new(150.0, 250.0), BOUNDS), Ordering::Greater);
        assert_eq!(mode.compare(Point::new(250.0, 50.0), BOUNDS), Ordering::Greater);
    }

    #[test]
    fn selected_when_spanning() {
        let mode = SelectionMode::Vertical;
        // Both handles above.
        assert!(!mode.is_selected(BOUNDS, Point::new(0.0, 0.0), Point::new(300.0, 50.0)));
        // Both handles below.
        assert!(!mode.is_selected(BOUNDS, Point::new(0.0, 300.0), Point::new(300.0, 250.0)));
        // One above, one below.
        assert!(mode.is_selected(BOUNDS, Point::new(0.0, 0.0), Point::new(0.0, 300.0)));
        // Crossed works the same.
        assert!(mode.is_selected(BOUNDS, Point::new(0.0, 300.0), Point::new(0.0, 0.0)));
        // One inside.
        assert!(mode.is_selected(BOUNDS, Point::new(150.0, 150.0), Point::new(0.0, 0.0)));
        // One on the right edge, the other below.
        assert!(mode.is_selected(BOUNDS, Point::new(0.0, 300.0), Point::new(200.0, 199.0)));
    }

    #[test]
    fn edges_are_inside() {
        for mode in [SelectionMode::Vertical, SelectionMode::Horizontal] {
            for corner in [
                Point::new(100.0, 100.0),
                Point::new(200.0, 100.0),
                Point::new(100.0, 200.0),
                Point::new(200.0, 200.0),
            ] {
                assert_eq!(mode.compare(corner, BOUNDS), Ordering::Equal, "{mode:?} {corner:?}");
            }
        }
    }
}
