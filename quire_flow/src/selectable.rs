// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The contract between the selection manager and each selectable text.

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use quire::kurbo::{Point, Rect};
use quire::{SelectableId, Selection, SelectionAdjustment, TextRange};

use crate::coordinates::LayoutCoordinates;

/// One round of a selection update, as seen by every selectable.
///
/// Positions are in the coordinate space of the selection container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionQuery {
    /// Position of the start handle.
    pub start_handle: Point,
    /// Position of the end handle.
    pub end_handle: Point,
    /// Where the moving handle was before this update, if it was anywhere.
    pub previous_handle: Option<Point>,
    /// Whether the start handle is the one moving.
    pub is_start_handle: bool,
    /// How the raw range is snapped.
    pub adjustment: SelectionAdjustment,
}

/// A piece of laid out text that can take part in a selection.
///
/// Selectables are shared between their host and the [`SelectionRegistrar`] they subscribe to, so
/// every method takes `&self`.
///
/// [`SelectionRegistrar`]: crate::SelectionRegistrar
pub trait Selectable: fmt::Debug {
    /// Id assigned by the registrar.
    fn selectable_id(&self) -> SelectableId;

    /// Computes this selectable's share of the selection spanned by the query handles.
    ///
    /// `previous` is this selectable's subselection from the previous update, if any. Returns the
    /// new subselection, `None` if the handles do not cover this selectable, and whether the update
    /// consumed the movement.
    fn update_selection(
        &self,
        query: &SelectionQuery,
        container: &dyn LayoutCoordinates,
        previous: Option<&Selection>,
    ) -> (Option<Selection>, bool);

    /// Selection covering all of this selectable's text, or `None` without a layout.
    fn select_all_selection(&self) -> Option<Selection>;

    /// Position of a handle in local coordinates.
    ///
    /// Returns [`Point::ZERO`] when the requested anchor of `selection` is not in this selectable.
    fn handle_position(&self, selection: &Selection, is_start_handle: bool) -> Point;

    /// Where this selectable is placed, or `None` when it is not laid out.
    fn layout_coordinates(&self) -> Option<Rc<dyn LayoutCoordinates>>;

    /// The current text.
    fn text(&self) -> String;

    /// Bounding box of the character at `offset`, in local coordinates.
    fn bounding_box(&self, offset: usize) -> Rect;

    /// The visible range of the line containing `offset`.
    fn range_of_line_containing(&self, offset: usize) -> TextRange;
}
