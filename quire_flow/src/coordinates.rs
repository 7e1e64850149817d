// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate spaces of selectables and their container.

use core::cell::Cell;
use core::fmt;

use quire::kurbo::{Point, Rect, Size};

/// The placement of one laid out element within the root.
///
/// Each selectable and the selection container have their own coordinate space with the origin at
/// their top left corner. Positions move between spaces through the root.
pub trait LayoutCoordinates: fmt::Debug {
    /// Size of the element.
    fn size(&self) -> Size;

    /// Returns `false` once the element has been removed from the root.
    fn is_attached(&self) -> bool;

    /// Position of the element's origin in root coordinates.
    fn position_in_root(&self) -> Point;

    /// Converts a local position to root coordinates.
    fn local_to_root(&self, local: Point) -> Point {
        local + self.position_in_root().to_vec2()
    }

    /// Converts a root position to local coordinates.
    fn root_to_local(&self, root: Point) -> Point {
        root - self.position_in_root().to_vec2()
    }

    /// Converts `relative_to_source`, local to `source`, into this element's space.
    fn local_position_of(&self, source: &dyn LayoutCoordinates, relative_to_source: Point) -> Point {
        self.root_to_local(source.local_to_root(relative_to_source))
    }

    /// The part of the element that is not clipped away, in local coordinates.
    fn visible_bounds(&self) -> Rect;
}

/// Translation-only coordinates that the host moves around as layout changes.
///
/// All setters take `&self` so one instance can be shared between the host and the selectables
/// or manager that read it.
#[derive(Debug)]
pub struct PlacedCoordinates {
    origin: Cell<Point>,
    size: Cell<Size>,
    clip: Cell<Option<Rect>>,
    attached: Cell<bool>,
}

impl PlacedCoordinates {
    /// Creates attached, unclipped coordinates at `origin` in the root.
    pub fn new(origin: Point, size: Size) -> Self {
        Self {
            origin: Cell::new(origin),
            size: Cell::new(size),
            clip: Cell::new(None),
            attached: Cell::new(true),
        }
    }

    /// Moves the element to `origin` in the root.
    pub fn set_origin(&self, origin: Point) {
        self.origin.set(origin);
    }

    /// Resizes the element.
    pub fn set_size(&self, size: Size) {
        self.size.set(size);
    }

    /// Clips the element to `clip`, in local coordinates. `None` removes the clip.
    pub fn set_clip(&self, clip: Option<Rect>) {
        self.clip.set(clip);
    }

    /// Marks the element as removed from the root.
    pub fn detach(&self) {
        self.attached.set(false);
    }

    /// Marks the element as part of the root again.
    pub fn attach(&self) {
        self.attached.set(true);
    }
}

impl LayoutCoordinates for PlacedCoordinates {
    fn size(&self) -> Size {
        self.size.get()
    }

    fn is_attached(&self) -> bool {
        self.attached.get()
    }

    fn position_in_root(&self) -> Point {
        self.origin.get()
    }

    fn visible_bounds(&self) -> Rect {
        let bounds = self.size.get().to_rect();
        match self.clip.get() {
            Some(clip) => bounds.intersect(clip),
            None => bounds,
        }
    }
}

/// Like [`Rect::contains`], but also accepting points on the right and bottom edges.
pub(crate) fn contains_inclusive(rect: Rect, point: Point) -> bool {
    (rect.x0..=rect.x1).contains(&point.x) && (rect.y0..=rect.y1).contains(&point.y)
}
