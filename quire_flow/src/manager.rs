// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The owner of the selection of one container.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;
use quire::kurbo::{Point, Rect, Vec2};
use quire::{AnchorInfo, SelectableId, Selection, SelectionAdjustment, char_len, char_slice};
use quire_input::{Key, KeyAction, KeyEvent};

use crate::coordinates::{LayoutCoordinates, contains_inclusive};
use crate::gestures::HandleDragObserver;
use crate::platform::{
    Clipboard, HapticFeedback, HapticFeedbackType, TextToolbar, TextToolbarStatus,
};
use crate::registrar::{RegistrarEvent, SelectionRegistrar};
use crate::selectable::{Selectable, SelectionQuery};

/// Height of a selection handle.
pub const HANDLE_HEIGHT: f64 = 25.0;

/// One of the two selection handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    /// The handle at the start anchor.
    SelectionStart,
    /// The handle at the end anchor.
    SelectionEnd,
}

impl Handle {
    fn new(is_start_handle: bool) -> Self {
        if is_start_handle {
            Self::SelectionStart
        } else {
            Self::SelectionEnd
        }
    }
}

/// Owns the selection of a container holding any number of selectables.
///
/// The manager reacts to the events its [`SelectionRegistrar`] queues (see
/// [`process_registrar_events`](Self::process_registrar_events)), to handle drags (see
/// [`handle_drag_observer`](Self::handle_drag_observer)), and to focus, tap and key input from the
/// host. It keeps the positions of both handles, in container coordinates, up to date for the
/// host to draw.
///
/// By default every change is applied right away. A host that wants to control the selection sets
/// an observer with [`set_on_selection_change`](Self::set_on_selection_change), and then calls
/// [`set_selection`](Self::set_selection) itself.
pub struct SelectionManager {
    registrar: Rc<RefCell<SelectionRegistrar>>,
    selection: Option<Selection>,
    on_selection_change: Option<Box<dyn FnMut(Option<Selection>)>>,
    touch_mode: bool,
    haptic_feedback: Option<Box<dyn HapticFeedback>>,
    clipboard: Option<Box<dyn Clipboard>>,
    text_toolbar: Option<Box<dyn TextToolbar>>,
    has_focus: bool,
    container: Option<Rc<dyn LayoutCoordinates>>,
    /// Container position in the root when handles were last placed.
    previous_position: Option<Point>,
    drag_begin_position: Point,
    drag_total_distance: Vec2,
    start_handle_position: Option<Point>,
    end_handle_position: Option<Point>,
    dragging_handle: Option<Handle>,
    current_drag_position: Option<Point>,
    last_update_consumed: bool,
}

impl SelectionManager {
    /// Creates a manager for the selectables of `registrar`.
    pub fn new(registrar: Rc<RefCell<SelectionRegistrar>>) -> Self {
        Self {
            registrar,
            selection: None,
            on_selection_change: None,
            touch_mode: true,
            haptic_feedback: None,
            clipboard: None,
            text_toolbar: None,
            has_focus: false,
            container: None,
            previous_position: None,
            drag_begin_position: Point::ZERO,
            drag_total_distance: Vec2::ZERO,
            start_handle_position: None,
            end_handle_position: None,
            dragging_handle: None,
            current_drag_position: None,
            last_update_consumed: false,
        }
    }

    /// The registrar selectables subscribe to.
    pub fn registrar(&self) -> &Rc<RefCell<SelectionRegistrar>> {
        &self.registrar
    }

    /// The current selection.
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Replaces the selection and moves the handles to match.
    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
        self.update_handle_offsets();
    }

    /// Returns `true` if there is no selection or it is collapsed.
    pub fn selection_is_empty(&self) -> bool {
        self.selection.is_none_or(|s| s.is_collapsed())
    }

    /// Hands selection changes to `observer` instead of applying them.
    pub fn set_on_selection_change(
        &mut self,
        observer: Option<Box<dyn FnMut(Option<Selection>)>>,
    ) {
        self.on_selection_change = observer;
    }

    /// Whether the last input came from touch. Haptic feedback is only given in touch mode.
    pub fn touch_mode(&self) -> bool {
        self.touch_mode
    }

    /// Sets [`touch_mode`](Self::touch_mode).
    pub fn set_touch_mode(&mut self, touch_mode: bool) {
        self.touch_mode = touch_mode;
    }

    /// Sets the haptic feedback provider.
    pub fn set_haptic_feedback(&mut self, haptic_feedback: Option<Box<dyn HapticFeedback>>) {
        self.haptic_feedback = haptic_feedback;
    }

    /// Sets the clipboard [`copy`](Self::copy) writes to.
    pub fn set_clipboard(&mut self, clipboard: Option<Box<dyn Clipboard>>) {
        self.clipboard = clipboard;
    }

    /// Sets the floating toolbar.
    pub fn set_text_toolbar(&mut self, text_toolbar: Option<Box<dyn TextToolbar>>) {
        self.text_toolbar = text_toolbar;
    }

    /// Whether the container has focus.
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Gives the container focus.
    pub fn request_focus(&mut self) {
        self.has_focus = true;
    }

    /// Reports a focus change of the container. Losing focus releases the selection.
    pub fn on_focus_changed(&mut self, focused: bool) {
        if !focused && self.has_focus {
            self.on_release();
        }
        self.has_focus = focused;
    }

    /// Sets the container's coordinates.
    pub fn set_container_coordinates(&mut self, container: Option<Rc<dyn LayoutCoordinates>>) {
        self.container = container;
        self.on_container_positioned();
    }

    /// Reports that the container may have moved within the root.
    pub fn on_container_positioned(&mut self) {
        if !self.has_focus || self.selection.is_none() {
            return;
        }
        let position = self
            .container
            .as_ref()
            .filter(|c| c.is_attached())
            .map(|c| c.position_in_root());
        if self.previous_position != position {
            self.previous_position = position;
            self.update_handle_offsets();
            self.update_selection_toolbar_position();
        }
    }

    /// Position of the start handle in container coordinates, if it is visible.
    pub fn start_handle_position(&self) -> Option<Point> {
        self.start_handle_position
    }

    /// Position of the end handle in container coordinates, if it is visible.
    pub fn end_handle_position(&self) -> Option<Point> {
        self.end_handle_position
    }

    /// The handle being dragged.
    pub fn dragging_handle(&self) -> Option<Handle> {
        self.dragging_handle
    }

    /// Where the dragged handle is, in container coordinates.
    pub fn current_drag_position(&self) -> Option<Point> {
        self.current_drag_position
    }

    /// Whether the last [`RegistrarEvent::SelectionUpdate`] was consumed.
    pub fn last_update_consumed(&self) -> bool {
        self.last_update_consumed
    }

    /// Handles all events queued by the registrar, oldest first.
    pub fn process_registrar_events(&mut self) {
        loop {
            let events = self.registrar.borrow_mut().drain_events();
            if events.is_empty() {
                return;
            }
            for event in events {
                self.handle_registrar_event(event);
            }
        }
    }

    fn handle_registrar_event(&mut self, event: RegistrarEvent) {
        log::trace!("registrar event {event:?}");
        match event {
            RegistrarEvent::PositionChanged(id) => {
                if self.selection.is_some_and(|s| s.touches(id)) {
                    self.update_handle_offsets();
                    self.update_selection_toolbar_position();
                }
            }
            RegistrarEvent::SelectionStart {
                coordinates,
                position,
                adjustment,
            } => {
                let Some(position) = self.convert_to_container_coordinates(&*coordinates, position)
                else {
                    return;
                };
                log::debug!("selection started at {position:?}");
                self.start_selection(position, false, adjustment);
                self.request_focus();
                self.hide_selection_toolbar();
            }
            RegistrarEvent::SelectAll(id) => {
                let (selection, subselections) = self.select_all(id, self.selection);
                if selection != self.selection {
                    self.registrar.borrow_mut().set_subselections(subselections);
                    self.change_selection(selection);
                }
                self.request_focus();
                self.hide_selection_toolbar();
            }
            RegistrarEvent::SelectionUpdate {
                coordinates,
                new_position,
                previous_position,
                is_start_handle,
                adjustment,
            } => {
                let new_position = self.convert_to_container_coordinates(&*coordinates, new_position);
                let previous_position =
                    self.convert_to_container_coordinates(&*coordinates, previous_position);
                self.last_update_consumed = self.update_selection(
                    new_position,
                    previous_position,
                    is_start_handle,
                    adjustment,
                );
            }
            RegistrarEvent::SelectionEnd => {
                log::debug!("selection gesture ended");
                self.show_selection_toolbar();
                self.dragging_handle = None;
                self.current_drag_position = None;
            }
            RegistrarEvent::SelectableChanged(id) => {
                if self.registrar.borrow().has_selection(id) {
                    self.on_release();
                    self.set_selection(None);
                }
            }
            RegistrarEvent::SelectableUnsubscribed(id) => {
                if self.selection.is_some_and(|s| s.touches(id)) {
                    self.start_handle_position = None;
                    self.end_handle_position = None;
                    self.on_release();
                    self.set_selection(None);
                }
            }
        }
    }

    /// Starts a new, collapsed selection at `position`, in container coordinates.
    pub fn start_selection(
        &mut self,
        position: Point,
        is_start_handle: bool,
        adjustment: SelectionAdjustment,
    ) {
        self.update_selection_with_handles(position, position, None, is_start_handle, adjustment);
    }

    /// Moves one handle to `new_position`, in container coordinates.
    ///
    /// The other handle stays where its selectable currently draws it. Returns whether the move
    /// was consumed; nothing happens without a selection.
    pub fn update_selection(
        &mut self,
        new_position: Option<Point>,
        previous_position: Option<Point>,
        is_start_handle: bool,
        adjustment: SelectionAdjustment,
    ) -> bool {
        let Some(new_position) = new_position else {
            return false;
        };
        let Some(selection) = self.selection else {
            return false;
        };
        let other_anchor = if is_start_handle {
            selection.end
        } else {
            selection.start
        };
        let Some(other) = self.anchor_selectable(other_anchor) else {
            return false;
        };
        let Some(other_coordinates) = other.layout_coordinates() else {
            return false;
        };
        let Some(other_position) = self.convert_to_container_coordinates(
            &*other_coordinates,
            adjusted_coordinates(other.handle_position(&selection, !is_start_handle)),
        ) else {
            return false;
        };
        let (start, end) = if is_start_handle {
            (new_position, other_position)
        } else {
            (other_position, new_position)
        };
        self.update_selection_with_handles(start, end, previous_position, is_start_handle, adjustment)
    }

    /// Recomputes the selection spanned by both handles, in container coordinates.
    ///
    /// Every selectable, in reading order, computes its share of the selection; the shares are
    /// merged into one. Returns whether any selectable consumed the move.
    ///
    /// # Panics
    ///
    /// If the container is not attached.
    pub fn update_selection_with_handles(
        &mut self,
        start_handle: Point,
        end_handle: Point,
        previous_handle: Option<Point>,
        is_start_handle: bool,
        adjustment: SelectionAdjustment,
    ) -> bool {
        self.dragging_handle = Some(Handle::new(is_start_handle));
        self.current_drag_position = Some(if is_start_handle {
            start_handle
        } else {
            end_handle
        });
        let container = self.require_container_coordinates();
        let sorted = self.registrar.borrow_mut().sort(&*container);
        let query = SelectionQuery {
            start_handle,
            end_handle,
            previous_handle,
            is_start_handle,
            adjustment,
        };

        let mut subselections = HashMap::new();
        let mut merged: Option<Selection> = None;
        let mut consumed = false;
        for selectable in &sorted {
            let id = selectable.selectable_id();
            let previous = self.registrar.borrow().subselection(id);
            let (selection, selectable_consumed) =
                selectable.update_selection(&query, &*container, previous.as_ref());
            consumed |= selectable_consumed;
            if let Some(selection) = selection {
                subselections.insert(id, selection);
            }
            merged = quire::merge(merged, selection);
        }
        log::trace!("merged {} subselections into {merged:?}", subselections.len());

        if merged != self.selection {
            self.perform_haptic_feedback();
            self.registrar.borrow_mut().set_subselections(subselections);
            self.change_selection(merged);
        }
        consumed
    }

    /// Selection of all the text of `id`, and the matching subselections.
    pub fn select_all(
        &mut self,
        id: SelectableId,
        previous: Option<Selection>,
    ) -> (Option<Selection>, HashMap<SelectableId, Selection>) {
        let container = self.require_container_coordinates();
        let sorted = self.registrar.borrow_mut().sort(&*container);
        let mut subselections = HashMap::new();
        let mut merged: Option<Selection> = None;
        for selectable in &sorted {
            let selection = if selectable.selectable_id() == id {
                selectable.select_all_selection()
            } else {
                None
            };
            if let Some(selection) = selection {
                subselections.insert(selectable.selectable_id(), selection);
            }
            merged = quire::merge(merged, selection);
        }
        if merged != previous {
            self.perform_haptic_feedback();
        }
        (merged, subselections)
    }

    /// Starts a word selection at `position` unless something is already selected.
    pub fn context_menu_open_adjustment(&mut self, position: Point) {
        if self.selection_is_empty() {
            self.start_selection(position, true, SelectionAdjustment::Word);
        }
    }

    /// The selected text, in reading order.
    ///
    /// # Panics
    ///
    /// If there is a selection but the container is not attached.
    pub fn selected_text(&mut self) -> Option<String> {
        let selection = self.selection?;
        let container = self.require_container_coordinates();
        let sorted = self.registrar.borrow_mut().sort(&*container);
        let mut text: Option<String> = None;
        for selectable in &sorted {
            let id = selectable.selectable_id();
            if !selection.touches(id) && text.is_none() {
                continue;
            }
            text.get_or_insert_default()
                .push_str(&current_selected_text(&**selectable, &selection));
            if (id == selection.end.selectable_id && !selection.handles_crossed)
                || (id == selection.start.selectable_id && selection.handles_crossed)
            {
                break;
            }
        }
        text
    }

    /// Copies the selected text to the clipboard.
    pub fn copy(&mut self) {
        let Some(text) = self.selected_text() else {
            return;
        };
        if let Some(clipboard) = &mut self.clipboard {
            clipboard.set_text(text);
        }
    }

    /// The copy action of the toolbar: copies, then releases the selection.
    pub fn on_toolbar_copy(&mut self) {
        self.copy();
        self.on_release();
    }

    /// Handles a key event, returning `true` if it was used.
    pub fn on_key_event(&mut self, event: &KeyEvent) -> bool {
        if is_copy_key_event(event) {
            self.copy();
            return true;
        }
        false
    }

    /// A tap in the container outside any handle clears the selection.
    pub fn on_tap(&mut self) {
        if self.has_focus {
            self.on_release();
        }
    }

    /// Drops the selection and all subselections.
    pub fn on_release(&mut self) {
        log::debug!("releasing selection");
        self.registrar
            .borrow_mut()
            .set_subselections(HashMap::new());
        self.hide_selection_toolbar();
        if self.selection.is_some() {
            self.change_selection(None);
            self.perform_haptic_feedback();
        }
    }

    /// Where a magnifier of the given width should be centred while a handle is dragged, in
    /// container coordinates.
    ///
    /// The centre follows the drag horizontally within the bounds of the dragged line, and sits
    /// in the middle of the line vertically. Returns `None` when nothing is dragged, or when the
    /// drag is more than half a magnifier away from the line.
    pub fn magnifier_center(&self, magnifier_width: f64) -> Option<Point> {
        let selection = self.selection?;
        let (anchor, is_start_handle) = match self.dragging_handle? {
            Handle::SelectionStart => (selection.start, true),
            Handle::SelectionEnd => (selection.end, false),
        };
        let selectable = self.anchor_selectable(anchor)?;
        let container = self.container.as_ref()?;
        let coordinates = selectable.layout_coordinates()?;
        let offset = if is_start_handle {
            anchor.offset
        } else {
            anchor.offset.saturating_sub(1)
        };

        let drag_x = coordinates
            .local_position_of(&**container, self.current_drag_position?)
            .x;
        let line = selectable.range_of_line_containing(offset);
        let line_start = selectable.bounding_box(line.min());
        let line_end = selectable.bounding_box(line.max().saturating_sub(1).max(line.min()));
        let min_x = line_start.x0.min(line_end.x0);
        let max_x = line_start.x1.max(line_end.x1);
        let center_x = drag_x.clamp(min_x, max_x);
        if (drag_x - center_x).abs() > magnifier_width / 2.0 {
            return None;
        }
        let center_y = selectable.bounding_box(offset).center().y;
        Some(container.local_position_of(&*coordinates, Point::new(center_x, center_y)))
    }

    /// Area the toolbar should avoid, in root coordinates.
    ///
    /// Spans both handles horizontally, and from the top of the anchored lines to well below the
    /// lower handle.
    pub fn content_rect(&self) -> Option<Rect> {
        let selection = self.selection?;
        let container = self.container.as_ref().filter(|c| c.is_attached())?;
        let start_selectable = self.anchor_selectable(selection.start)?;
        let end_selectable = self.anchor_selectable(selection.end)?;
        let start_coordinates = start_selectable.layout_coordinates()?;
        let end_coordinates = end_selectable.layout_coordinates()?;

        let start = container.local_to_root(container.local_position_of(
            &*start_coordinates,
            start_selectable.handle_position(&selection, true),
        ));
        let end = container.local_to_root(container.local_position_of(
            &*end_coordinates,
            end_selectable.handle_position(&selection, false),
        ));
        let top_of = |selectable: &dyn Selectable,
                      coordinates: &dyn LayoutCoordinates,
                      anchor: AnchorInfo| {
            let top = Point::new(0.0, selectable.bounding_box(anchor.offset).y0);
            container
                .local_to_root(container.local_position_of(coordinates, top))
                .y
        };
        let start_top = top_of(&*start_selectable, &*start_coordinates, selection.start);
        let end_top = top_of(&*end_selectable, &*end_coordinates, selection.end);

        Some(Rect::new(
            start.x.min(end.x),
            start_top.min(end_top),
            start.x.max(end.x),
            start.y.max(end.y) + HANDLE_HEIGHT * 4.0,
        ))
    }

    /// Observer for drags of the start or end handle.
    pub fn handle_drag_observer(&mut self, is_start_handle: bool) -> HandleDragObserver<'_> {
        HandleDragObserver::new(self, is_start_handle)
    }

    pub(crate) fn handle_drag_down(&mut self, is_start_handle: bool) {
        let Some(selection) = self.selection else {
            return;
        };
        let Some(begin) = self.handle_drag_origin(&selection, is_start_handle) else {
            return;
        };
        self.current_drag_position = Some(begin);
        self.dragging_handle = Some(Handle::new(is_start_handle));
    }

    pub(crate) fn handle_drag_start(&mut self, is_start_handle: bool) {
        self.hide_selection_toolbar();
        let Some(selection) = self.selection else {
            return;
        };
        let Some(begin) = self.handle_drag_origin(&selection, is_start_handle) else {
            return;
        };
        self.drag_begin_position = begin;
        self.drag_total_distance = Vec2::ZERO;
    }

    pub(crate) fn handle_drag(&mut self, is_start_handle: bool, delta: Vec2) {
        self.drag_total_distance += delta;
        let end = self.drag_begin_position + self.drag_total_distance;
        let consumed = self.update_selection(
            Some(end),
            Some(self.drag_begin_position),
            is_start_handle,
            SelectionAdjustment::CharacterWithWordAccelerate,
        );
        if consumed {
            self.drag_begin_position = end;
            self.drag_total_distance = Vec2::ZERO;
        }
    }

    pub(crate) fn handle_drag_end(&mut self) {
        self.show_selection_toolbar();
        self.dragging_handle = None;
        self.current_drag_position = None;
    }

    pub(crate) fn clear_dragging_handle(&mut self) {
        self.dragging_handle = None;
        self.current_drag_position = None;
    }

    /// Where a drag of a handle begins, in container coordinates.
    fn handle_drag_origin(&self, selection: &Selection, is_start_handle: bool) -> Option<Point> {
        let anchor = if is_start_handle {
            selection.start
        } else {
            selection.end
        };
        let selectable = self.anchor_selectable(anchor)?;
        let coordinates = selectable.layout_coordinates()?;
        let begin = adjusted_coordinates(selectable.handle_position(selection, is_start_handle));
        Some(self.require_container_coordinates().local_position_of(&*coordinates, begin))
    }

    fn change_selection(&mut self, selection: Option<Selection>) {
        if let Some(observer) = &mut self.on_selection_change {
            observer(selection);
            return;
        }
        self.set_selection(selection);
    }

    fn anchor_selectable(&self, anchor: AnchorInfo) -> Option<Rc<dyn Selectable>> {
        self.registrar.borrow().selectable(anchor.selectable_id)
    }

    fn require_container_coordinates(&self) -> Rc<dyn LayoutCoordinates> {
        match &self.container {
            Some(container) if container.is_attached() => container.clone(),
            _ => panic!("selection container is not attached"),
        }
    }

    fn convert_to_container_coordinates(
        &self,
        coordinates: &dyn LayoutCoordinates,
        position: Point,
    ) -> Option<Point> {
        let container = self.container.as_ref().filter(|c| c.is_attached())?;
        Some(container.local_position_of(coordinates, position))
    }

    fn update_handle_offsets(&mut self) {
        self.start_handle_position = self.visible_handle_position(true);
        self.end_handle_position = self.visible_handle_position(false);
    }

    fn visible_handle_position(&self, is_start_handle: bool) -> Option<Point> {
        let selection = self.selection?;
        let container = self.container.as_ref().filter(|c| c.is_attached())?;
        let anchor = if is_start_handle {
            selection.start
        } else {
            selection.end
        };
        let selectable = self.anchor_selectable(anchor)?;
        let coordinates = selectable.layout_coordinates()?;
        let position = container.local_position_of(
            &*coordinates,
            selectable.handle_position(&selection, is_start_handle),
        );
        contains_inclusive(container.visible_bounds(), position).then_some(position)
    }

    fn show_selection_toolbar(&mut self) {
        if !self.has_focus {
            return;
        }
        let Some(rect) = self.content_rect() else {
            return;
        };
        if let Some(toolbar) = &mut self.text_toolbar {
            toolbar.show_menu(rect);
        }
    }

    fn hide_selection_toolbar(&mut self) {
        if !self.has_focus {
            return;
        }
        if let Some(toolbar) = &mut self.text_toolbar {
            if toolbar.status() == TextToolbarStatus::Shown {
                toolbar.hide();
            }
        }
    }

    fn update_selection_toolbar_position(&mut self) {
        let shown = self
            .text_toolbar
            .as_ref()
            .is_some_and(|t| t.status() == TextToolbarStatus::Shown);
        if self.has_focus && shown {
            self.show_selection_toolbar();
        }
    }

    fn perform_haptic_feedback(&mut self) {
        if !self.touch_mode {
            return;
        }
        if let Some(haptic_feedback) = &mut self.haptic_feedback {
            haptic_feedback.perform(HapticFeedbackType::TextHandleMove);
        }
    }
}

impl fmt::Debug for SelectionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionManager")
            .field("selection", &self.selection)
            .field("touch_mode", &self.touch_mode)
            .field("has_focus", &self.has_focus)
            .field("container", &self.container)
            .field("start_handle_position", &self.start_handle_position)
            .field("end_handle_position", &self.end_handle_position)
            .field("dragging_handle", &self.dragging_handle)
            .field("current_drag_position", &self.current_drag_position)
            .finish_non_exhaustive()
    }
}

/// Handle positions sit on the line bottom; one pixel up is inside the line.
fn adjusted_coordinates(position: Point) -> Point {
    Point::new(position.x, position.y - 1.0)
}

/// The part of `selectable`'s text covered by `selection`.
fn current_selected_text(selectable: &dyn Selectable, selection: &Selection) -> String {
    let text = selectable.text();
    let len = char_len(&text);
    let id = selectable.selectable_id();
    let (start, end) = (selection.start, selection.end);
    let range = if !selection.touches(id) {
        0..len
    } else if start.selectable_id == end.selectable_id {
        if selection.handles_crossed {
            end.offset..start.offset
        } else {
            start.offset..end.offset
        }
    } else if id == start.selectable_id {
        if selection.handles_crossed {
            0..start.offset
        } else {
            start.offset..len
        }
    } else if selection.handles_crossed {
        end.offset..len
    } else {
        0..end.offset
    };
    char_slice(&text, range).into()
}

/// Returns `true` for the copy shortcuts: Ctrl+C, Meta+C, Ctrl+Insert and the Copy key.
pub fn is_copy_key_event(event: &KeyEvent) -> bool {
    if event.action != KeyAction::Down {
        return false;
    }
    let modifiers = event.modifiers;
    ((modifiers.ctrl || modifiers.meta) && event.key == Key::C)
        || (modifiers.ctrl && event.key == Key::INSERT)
        || event.key == Key::COPY
}
