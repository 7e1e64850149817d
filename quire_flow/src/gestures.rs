// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture handling that drives a [`SelectionManager`].
//!
//! Touch drags are recognised by a [`DragGestureDetector`](quire_input::DragGestureDetector) and
//! handed to one of the [`DragObserver`]s here; mouse input goes through a
//! [`MouseSelectionGesture`]. Positions in input events are root coordinates.

use alloc::rc::Rc;
use core::fmt;

use quire::kurbo::{Point, Vec2};
use quire::{SelectionAdjustment, TextLayout};
use quire_input::{DragObserver, InputEvent, MouseAction, MouseButton, ViewConfiguration};

use crate::coordinates::LayoutCoordinates;
use crate::delegate::MultiWidgetSelectionDelegate;
use crate::manager::SelectionManager;
use crate::registrar::SelectionRegistrar;
use crate::selectable::Selectable;

/// Maximum distance between two clicks that count as a multi-click.
pub const CLICKS_SLOP: f64 = 100.0;

/// Counts consecutive mouse clicks.
///
/// A click continues the count when it comes within the double tap timeout of the previous one
/// and less than [`CLICKS_SLOP`] away from it.
#[derive(Clone, Copy, Debug)]
pub struct ClicksCounter {
    config: ViewConfiguration,
    clicks: u32,
    previous: Option<(Point, u64)>,
}

impl ClicksCounter {
    /// Creates a counter that has seen no clicks.
    pub fn new(config: ViewConfiguration) -> Self {
        Self {
            config,
            clicks: 0,
            previous: None,
        }
    }

    /// Counts a click at `position` and `time`, returning the new count.
    pub fn update(&mut self, position: Point, time: u64) -> u32 {
        let continues = self.previous.is_some_and(|(previous, previous_time)| {
            time.saturating_sub(previous_time) < self.config.double_tap_timeout_ms
                && (position - previous).hypot() < CLICKS_SLOP
        });
        self.clicks = if continues { self.clicks + 1 } else { 1 };
        self.previous = Some((position, time));
        self.clicks
    }

    /// Number of consecutive clicks so far.
    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    /// Adjustment for the current count: characters, then words, then paragraphs, and around again.
    pub fn adjustment(&self) -> SelectionAdjustment {
        match self.clicks.saturating_sub(1) % 3 {
            0 => SelectionAdjustment::None,
            1 => SelectionAdjustment::Word,
            _ => SelectionAdjustment::Paragraph,
        }
    }
}

fn notify(manager: &mut SelectionManager, f: impl FnOnce(&mut SelectionRegistrar)) {
    f(&mut manager.registrar().borrow_mut());
    manager.process_registrar_events();
}

fn has_selection(manager: &SelectionManager, selectable: &dyn Selectable) -> bool {
    manager
        .registrar()
        .borrow()
        .has_selection(selectable.selectable_id())
}

/// Long press and drag on a piece of text.
///
/// The long press selects the word under it, or all the text when pressed past its end. Dragging
/// then moves the end handle.
pub struct TextDragObserver<'a, L> {
    manager: &'a mut SelectionManager,
    selectable: &'a MultiWidgetSelectionDelegate<L>,
    last_position: Point,
    drag_total_distance: Vec2,
}

impl<'a, L: TextLayout + fmt::Debug> TextDragObserver<'a, L> {
    /// Creates an observer for drags on `selectable`.
    pub fn new(
        manager: &'a mut SelectionManager,
        selectable: &'a MultiWidgetSelectionDelegate<L>,
    ) -> Self {
        Self {
            manager,
            selectable,
            last_position: Point::ZERO,
            drag_total_distance: Vec2::ZERO,
        }
    }

    /// Whether both positions lie past the end of the text.
    fn out_of_boundary(&self, start: Point, end: Point) -> bool {
        let Some(layout) = self.selectable.layout() else {
            return false;
        };
        let last_offset = layout.len();
        layout.offset_for_position(start) >= last_offset
            && layout.offset_for_position(end) >= last_offset
    }

    fn end(&mut self) {
        if has_selection(self.manager, self.selectable) {
            notify(self.manager, |r| r.notify_selection_update_end());
        }
    }
}

impl<L: TextLayout + fmt::Debug> DragObserver for TextDragObserver<'_, L> {
    fn on_start(&mut self, position: Point) {
        let Some(coordinates) = self.selectable.layout_coordinates() else {
            return;
        };
        let position = coordinates.root_to_local(position);
        let id = self.selectable.selectable_id();
        if self.out_of_boundary(position, position) {
            notify(self.manager, |r| r.notify_selection_update_select_all(id));
        } else {
            notify(self.manager, |r| {
                r.notify_selection_update_start(coordinates, position, SelectionAdjustment::Word);
            });
        }
        self.last_position = position;
        self.drag_total_distance = Vec2::ZERO;
    }

    fn on_drag(&mut self, delta: Vec2) {
        let Some(coordinates) = self.selectable.layout_coordinates() else {
            return;
        };
        if !has_selection(self.manager, self.selectable) {
            return;
        }
        self.drag_total_distance += delta;
        let new_position = self.last_position + self.drag_total_distance;
        if self.out_of_boundary(self.last_position, new_position) {
            return;
        }
        let previous_position = self.last_position;
        notify(self.manager, |r| {
            r.notify_selection_update(
                coordinates,
                new_position,
                previous_position,
                false,
                SelectionAdjustment::CharacterWithWordAccelerate,
            );
        });
        if self.manager.last_update_consumed() {
            self.last_position = new_position;
            self.drag_total_distance = Vec2::ZERO;
        }
    }

    fn on_stop(&mut self) {
        self.end();
    }

    fn on_cancel(&mut self) {
        self.end();
    }
}

impl<L: fmt::Debug> fmt::Debug for TextDragObserver<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextDragObserver")
            .field("selectable", &self.selectable)
            .field("last_position", &self.last_position)
            .field("drag_total_distance", &self.drag_total_distance)
            .finish_non_exhaustive()
    }
}

/// Drag of one of the selection handles.
#[derive(Debug)]
pub struct HandleDragObserver<'a> {
    manager: &'a mut SelectionManager,
    is_start_handle: bool,
}

impl<'a> HandleDragObserver<'a> {
    /// Creates an observer for drags of the start or end handle.
    pub fn new(manager: &'a mut SelectionManager, is_start_handle: bool) -> Self {
        Self {
            manager,
            is_start_handle,
        }
    }
}

impl DragObserver for HandleDragObserver<'_> {
    fn on_down(&mut self, _: Point) {
        self.manager.handle_drag_down(self.is_start_handle);
    }

    fn on_up(&mut self) {
        self.manager.clear_dragging_handle();
    }

    fn on_start(&mut self, _: Point) {
        self.manager.handle_drag_start(self.is_start_handle);
    }

    fn on_drag(&mut self, delta: Vec2) {
        self.manager.handle_drag(self.is_start_handle, delta);
    }

    fn on_stop(&mut self) {
        self.manager.handle_drag_end();
    }

    fn on_cancel(&mut self) {
        self.manager.handle_drag_end();
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum MouseState {
    Idle,
    Selecting(SelectionAdjustment),
    Extending,
}

/// Mouse selection on one selectable.
///
/// A press starts a selection with the adjustment of its click count (see
/// [`ClicksCounter::adjustment`]); Shift+press extends the current selection instead. Dragging
/// with the primary button moves the end handle, and releasing it ends the update.
#[derive(Clone, Debug)]
pub struct MouseSelectionGesture {
    clicks: ClicksCounter,
    state: MouseState,
    last_position: Point,
}

impl MouseSelectionGesture {
    /// Creates an idle gesture.
    pub fn new(config: ViewConfiguration) -> Self {
        Self {
            clicks: ClicksCounter::new(config),
            state: MouseState::Idle,
            last_position: Point::ZERO,
        }
    }

    /// The click counter.
    pub fn clicks(&self) -> &ClicksCounter {
        &self.clicks
    }

    /// Handles the next event, returning `true` if it was used.
    pub fn process(
        &mut self,
        event: &InputEvent,
        manager: &mut SelectionManager,
        selectable: &dyn Selectable,
    ) -> bool {
        let InputEvent::Mouse(event) = event else {
            return false;
        };
        let Some(coordinates) = selectable.layout_coordinates() else {
            return false;
        };
        let position = coordinates.root_to_local(event.position);
        match event.action {
            MouseAction::Press(MouseButton::PRIMARY) => {
                self.clicks.update(event.position, event.event_time);
                manager.set_touch_mode(false);
                if event.modifiers.shift {
                    self.state = MouseState::Extending;
                    self.extend(manager, selectable, coordinates, position, SelectionAdjustment::None);
                } else {
                    let adjustment = self.clicks.adjustment();
                    self.state = MouseState::Selecting(adjustment);
                    notify(manager, |r| {
                        r.notify_selection_update_start(coordinates, position, adjustment);
                    });
                    self.last_position = position;
                }
                let started = has_selection(manager, selectable);
                if !started {
                    self.state = MouseState::Idle;
                }
                started
            }
            MouseAction::Move if event.is_pressed(MouseButton::PRIMARY) => match self.state {
                MouseState::Idle => false,
                MouseState::Extending => {
                    self.extend(manager, selectable, coordinates, position, SelectionAdjustment::None);
                    true
                }
                MouseState::Selecting(adjustment) => {
                    if has_selection(manager, selectable) {
                        self.extend(manager, selectable, coordinates, position, adjustment);
                    }
                    true
                }
            },
            MouseAction::Release(MouseButton::PRIMARY) | MouseAction::Cancel => {
                if self.state == MouseState::Idle {
                    return false;
                }
                self.state = MouseState::Idle;
                if has_selection(manager, selectable) {
                    notify(manager, |r| r.notify_selection_update_end());
                }
                true
            }
            _ => false,
        }
    }

    fn extend(
        &mut self,
        manager: &mut SelectionManager,
        selectable: &dyn Selectable,
        coordinates: Rc<dyn LayoutCoordinates>,
        position: Point,
        adjustment: SelectionAdjustment,
    ) {
        if !coordinates.is_attached() || manager.selection().is_none() {
            return;
        }
        let previous = self.last_position;
        notify(manager, |r| {
            r.notify_selection_update(coordinates, position, previous, false, adjustment);
        });
        if manager.last_update_consumed() {
            self.last_position = position;
        }
        log::trace!(
            "extended selection from selectable {} to {position:?}",
            selectable.selectable_id()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::PlacedCoordinates;
    use crate::platform::{TextToolbar, TextToolbarStatus};
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use quire::kurbo::{Rect, Size};
    use quire::{MonospaceLayout, SelectableId, TextRange};

    #[derive(Default)]
    struct Toolbar {
        shown: Rc<RefCell<Vec<Rect>>>,
        status: TextToolbarStatus,
    }

    impl TextToolbar for Toolbar {
        fn show_menu(&mut self, rect: Rect) {
            self.shown.borrow_mut().push(rect);
            self.status = TextToolbarStatus::Shown;
        }

        fn hide(&mut self) {
            self.status = TextToolbarStatus::Hidden;
        }

        fn status(&self) -> TextToolbarStatus {
            self.status
        }
    }

    fn setup(text: &str) -> (SelectionManager, Rc<MultiWidgetSelectionDelegate<MonospaceLayout>>) {
        let registrar = Rc::new(RefCell::new(SelectionRegistrar::new()));
        let id = registrar.borrow_mut().next_selectable_id();
        let layout = MonospaceLayout::new(text);
        let coordinates = Rc::new(PlacedCoordinates::new(Point::ZERO, layout.size()));
        let delegate = Rc::new(MultiWidgetSelectionDelegate::with_layout(id, layout, coordinates));
        registrar.borrow_mut().subscribe(delegate.clone());
        let mut manager = SelectionManager::new(registrar);
        manager.set_container_coordinates(Some(Rc::new(PlacedCoordinates::new(
            Point::ZERO,
            Size::new(400.0, 400.0),
        ))));
        (manager, delegate)
    }

    fn range(manager: &SelectionManager) -> Option<TextRange> {
        manager.selection().map(|s| s.to_text_range())
    }

    #[test]
    fn clicks_count_up_and_reset() {
        let mut counter = ClicksCounter::new(ViewConfiguration::default());
        assert_eq!(counter.update(Point::ZERO, 0), 1);
        assert_eq!(counter.update(Point::new(10.0, 0.0), 100), 2);
        assert_eq!(counter.adjustment(), SelectionAdjustment::Word);
        assert_eq!(counter.update(Point::new(10.0, 0.0), 200), 3);
        assert_eq!(counter.adjustment(), SelectionAdjustment::Paragraph);
        assert_eq!(counter.update(Point::new(10.0, 0.0), 300), 4);
        assert_eq!(counter.adjustment(), SelectionAdjustment::None);
        // Too late.
        assert_eq!(counter.update(Point::new(10.0, 0.0), 700), 1);
        // Too far.
        assert_eq!(counter.update(Point::new(200.0, 0.0), 750), 1);
    }

    #[test]
    fn long_press_then_drag_extends_by_words() {
        let (mut manager, delegate) = setup("hello world foo");
        let mut observer = TextDragObserver::new(&mut manager, &*delegate);
        observer.on_start(Point::new(10.0, 10.0));
        assert_eq!(range(observer.manager), Some(TextRange::new(0, 5)));

        observer.on_drag(Vec2::new(60.0, 0.0));
        assert_eq!(range(observer.manager), Some(TextRange::new(0, 6)));
        assert!(observer.manager.last_update_consumed(), "the selection grew");

        observer.on_drag(Vec2::new(30.0, 0.0));
        assert_eq!(range(observer.manager), Some(TextRange::new(0, 11)));

        observer.on_stop();
        assert_eq!(manager.dragging_handle(), None);
        assert!(manager.has_focus(), "starting a selection focuses the container");
    }

    #[test]
    fn long_press_past_the_end_selects_all() {
        let (mut manager, delegate) = setup("hello");
        let mut observer = TextDragObserver::new(&mut manager, &*delegate);
        observer.on_start(Point::new(100.0, 10.0));
        assert_eq!(range(&manager), Some(TextRange::new(0, 5)));
        assert!(
            manager.registrar().borrow().has_selection(SelectableId(1)),
            "select all records a subselection"
        );
    }

    #[test]
    fn handle_drag_moves_end_and_shows_toolbar() {
        let (mut manager, _delegate) = setup("hello world foo");
        let shown = Rc::new(RefCell::new(Vec::new()));
        manager.set_text_toolbar(Some(Box::new(Toolbar {
            shown: shown.clone(),
            ..Toolbar::default()
        })));
        manager.request_focus();
        manager.start_selection(Point::new(10.0, 10.0), false, SelectionAdjustment::Word);
        assert_eq!(range(&manager), Some(TextRange::new(0, 5)));

        let mut observer = HandleDragObserver::new(&mut manager, false);
        observer.on_down(Point::ZERO);
        assert_eq!(observer.manager.current_drag_position(), Some(Point::new(50.0, 19.0)));
        observer.on_start(Point::ZERO);
        observer.on_drag(Vec2::new(60.0, 0.0));
        assert_eq!(range(observer.manager), Some(TextRange::new(0, 11)));
        observer.on_stop();
        observer.on_up();

        assert_eq!(manager.dragging_handle(), None);
        assert_eq!(
            shown.borrow().last(),
            Some(&Rect::new(0.0, 0.0, 110.0, 120.0))
        );
    }
}
