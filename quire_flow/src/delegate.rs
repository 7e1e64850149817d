// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Selectable`] backed by a [`TextLayout`].

use alloc::borrow::ToOwned;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;
use core::cmp::Ordering;
use core::fmt;

use quire::kurbo::{Point, Rect};
use quire::{
    AnchorInfo, SelectableId, Selection, TextLayout, TextRange, line_range_at,
    selection_handle_position,
};

use crate::coordinates::LayoutCoordinates;
use crate::mode::SelectionMode;
use crate::selectable::{Selectable, SelectionQuery};

/// Selectable text whose layout and placement are supplied by the host.
///
/// Both may change or go away at any time. Without either, the delegate takes no part in
/// selection.
pub struct MultiWidgetSelectionDelegate<L> {
    id: SelectableId,
    layout: RefCell<Option<Rc<L>>>,
    coordinates: RefCell<Option<Rc<dyn LayoutCoordinates>>>,
}

impl<L: TextLayout> MultiWidgetSelectionDelegate<L> {
    /// Creates a delegate with neither a layout nor coordinates.
    pub fn new(id: SelectableId) -> Self {
        Self {
            id,
            layout: RefCell::new(None),
            coordinates: RefCell::new(None),
        }
    }

    /// Creates a delegate that is already laid out and placed.
    pub fn with_layout(id: SelectableId, layout: L, coordinates: Rc<dyn LayoutCoordinates>) -> Self {
        let delegate = Self::new(id);
        delegate.set_layout(Some(layout));
        delegate.set_coordinates(Some(coordinates));
        delegate
    }

    /// Replaces the text layout.
    pub fn set_layout(&self, layout: Option<L>) {
        *self.layout.borrow_mut() = layout.map(Rc::new);
    }

    /// Replaces the coordinates.
    pub fn set_coordinates(&self, coordinates: Option<Rc<dyn LayoutCoordinates>>) {
        *self.coordinates.borrow_mut() = coordinates;
    }

    /// The current text layout.
    pub fn layout(&self) -> Option<Rc<L>> {
        self.layout.borrow().clone()
    }

    fn anchor(&self, layout: &L, offset: usize, direction_offset: usize) -> AnchorInfo {
        AnchorInfo::new(layout.bidi_run_direction(direction_offset), offset, self.id)
    }
}

/// Offset under `position`; positions outside `bounds` map to either end of the text.
fn raw_offset<L: TextLayout>(layout: &L, bounds: Rect, position: Point) -> usize {
    if bounds.contains(position) {
        layout.offset_for_position(position).min(layout.len())
    } else if SelectionMode::Vertical.compare(position, bounds) == Ordering::Less {
        0
    } else {
        layout.len()
    }
}

impl<L: TextLayout + fmt::Debug> Selectable for MultiWidgetSelectionDelegate<L> {
    fn selectable_id(&self) -> SelectableId {
        self.id
    }

    /// # Panics
    ///
    /// If `previous` has an anchor in another selectable.
    fn update_selection(
        &self,
        query: &SelectionQuery,
        container: &dyn LayoutCoordinates,
        previous: Option<&Selection>,
    ) -> (Option<Selection>, bool) {
        assert!(
            previous.is_none_or(|p| p.start.selectable_id == self.id && p.end.selectable_id == self.id),
            "previous subselection of {} belongs to another selectable",
            self.id
        );
        let (Some(layout), Some(coordinates)) = (self.layout(), self.layout_coordinates()) else {
            return (None, false);
        };
        let start = coordinates.local_position_of(container, query.start_handle);
        let end = coordinates.local_position_of(container, query.end_handle);
        let bounds = layout.size().to_rect();
        if !SelectionMode::Vertical.is_selected(bounds, start, end) {
            return (None, false);
        }

        let raw_start = raw_offset(&*layout, bounds, start);
        let raw_end = raw_offset(&*layout, bounds, end);
        let raw_previous = query
            .previous_handle
            .map(|p| raw_offset(&*layout, bounds, coordinates.local_position_of(container, p)));
        let previous_raw = raw_previous.map(|offset| {
            if query.is_start_handle {
                TextRange::new(offset, raw_end)
            } else {
                TextRange::new(raw_start, offset)
            }
        });

        let adjusted = query.adjustment.adjust(
            &*layout,
            TextRange::new(raw_start, raw_end),
            previous_raw,
            previous.map(Selection::to_text_range),
            query.is_start_handle,
        );
        let selection = Selection::new(
            self.anchor(&layout, adjusted.start(), adjusted.start()),
            self.anchor(&layout, adjusted.end(), adjusted.end().saturating_sub(1)),
            adjusted.is_reversed(),
        );

        let moving = if query.is_start_handle {
            raw_start
        } else {
            raw_end
        };
        let selection_changed = previous != Some(&selection);
        let handle_moved = raw_previous != Some(moving);
        log::trace!(
            "selectable {}: raw {raw_start}..{raw_end} adjusted {adjusted:?}",
            self.id
        );
        (Some(selection), selection_changed || handle_moved)
    }

    fn select_all_selection(&self) -> Option<Selection> {
        let layout = self.layout()?;
        let len = layout.len();
        Some(Selection::new(
            self.anchor(&layout, 0, 0),
            self.anchor(&layout, len, len.saturating_sub(1)),
            false,
        ))
    }

    fn handle_position(&self, selection: &Selection, is_start_handle: bool) -> Point {
        let anchor = if is_start_handle {
            selection.start
        } else {
            selection.end
        };
        if anchor.selectable_id != self.id || self.layout_coordinates().is_none() {
            return Point::ZERO;
        }
        let Some(layout) = self.layout() else {
            return Point::ZERO;
        };
        selection_handle_position(
            &*layout,
            anchor.offset.min(layout.len()),
            is_start_handle,
            selection.handles_crossed,
        )
    }

    fn layout_coordinates(&self) -> Option<Rc<dyn LayoutCoordinates>> {
        self.coordinates
            .borrow()
            .as_ref()
            .filter(|c| c.is_attached())
            .cloned()
    }

    fn text(&self) -> String {
        self.layout()
            .map(|layout| layout.text().to_owned())
            .unwrap_or_default()
    }

    fn bounding_box(&self, offset: usize) -> Rect {
        match self.layout() {
            Some(layout) if !layout.is_empty() => {
                layout.bounding_box(offset.min(layout.len() - 1))
            }
            _ => Rect::ZERO,
        }
    }

    fn range_of_line_containing(&self, offset: usize) -> TextRange {
        match self.layout() {
            Some(layout) if !layout.is_empty() => {
                line_range_at(&*layout, offset.min(layout.len() - 1))
            }
            _ => TextRange::ZERO,
        }
    }
}

impl<L: fmt::Debug> fmt::Debug for MultiWidgetSelectionDelegate<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiWidgetSelectionDelegate")
            .field("id", &self.id)
            .field("layout", &self.layout.borrow())
            .field("coordinates", &self.coordinates.borrow())
            .finish()
    }
}
