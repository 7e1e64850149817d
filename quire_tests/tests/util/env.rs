// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A container of stacked texts with a selection manager and recording platform services.

use std::cell::RefCell;
use std::rc::Rc;

use quire::kurbo::{Point, Rect, Size};
use quire::{MonospaceLayout, SelectableId, SelectionAdjustment, TextLayout, TextRange};
use quire_flow::{
    Clipboard, HapticFeedback, HapticFeedbackType, MultiWidgetSelectionDelegate,
    PlacedCoordinates, Selectable, SelectionManager, SelectionRegistrar, TextToolbar,
    TextToolbarStatus,
};
use quire_input::{InputDispatcher, InputEvent, Root, RootId};

/// Size of the container and of the [`Window`] it fills.
pub(crate) const CONTAINER_SIZE: Size = Size::new(400.0, 400.0);

/// What the platform services saw.
#[derive(Clone, Debug, Default)]
pub(crate) struct Recorded {
    pub(crate) clipboard: Rc<RefCell<Option<String>>>,
    pub(crate) toolbar_shown: Rc<RefCell<Vec<Rect>>>,
    pub(crate) toolbar_hides: Rc<RefCell<usize>>,
    pub(crate) haptics: Rc<RefCell<Vec<HapticFeedbackType>>>,
}

struct RecordingClipboard(Rc<RefCell<Option<String>>>);

impl Clipboard for RecordingClipboard {
    fn set_text(&mut self, text: String) {
        *self.0.borrow_mut() = Some(text);
    }

    fn text(&self) -> Option<String> {
        self.0.borrow().clone()
    }
}

struct RecordingToolbar {
    shown: Rc<RefCell<Vec<Rect>>>,
    hides: Rc<RefCell<usize>>,
    status: TextToolbarStatus,
}

impl TextToolbar for RecordingToolbar {
    fn show_menu(&mut self, rect: Rect) {
        self.shown.borrow_mut().push(rect);
        self.status = TextToolbarStatus::Shown;
    }

    fn hide(&mut self) {
        *self.hides.borrow_mut() += 1;
        self.status = TextToolbarStatus::Hidden;
    }

    fn status(&self) -> TextToolbarStatus {
        self.status
    }
}

struct RecordingHaptics(Rc<RefCell<Vec<HapticFeedbackType>>>);

impl HapticFeedback for RecordingHaptics {
    fn perform(&mut self, kind: HapticFeedbackType) {
        self.0.borrow_mut().push(kind);
    }
}

/// The root window every test draws into.
#[derive(Debug)]
pub(crate) struct Window;

impl Root for Window {
    fn id(&self) -> RootId {
        RootId(1)
    }

    fn bounds(&self) -> Rect {
        CONTAINER_SIZE.to_rect()
    }
}

/// Texts laid out in one container at the root origin.
///
/// Every text is a [`MonospaceLayout`]: ten pixels per character, twenty per line.
pub(crate) struct TestEnv {
    pub(crate) manager: SelectionManager,
    pub(crate) delegates: Vec<Rc<MultiWidgetSelectionDelegate<MonospaceLayout>>>,
    pub(crate) coordinates: Vec<Rc<PlacedCoordinates>>,
    pub(crate) container: Rc<PlacedCoordinates>,
    pub(crate) recorded: Recorded,
}

impl TestEnv {
    /// Stacks `texts` top to bottom.
    pub(crate) fn new(texts: &[&str]) -> Self {
        let mut y = 0.0;
        let placed: Vec<(&str, Point)> = texts
            .iter()
            .map(|text| {
                let origin = Point::new(0.0, y);
                y += MonospaceLayout::new(*text).size().height;
                (*text, origin)
            })
            .collect();
        Self::with_origins(&placed)
    }

    /// Places each text at its origin, in container coordinates.
    pub(crate) fn with_origins(texts: &[(&str, Point)]) -> Self {
        let registrar = Rc::new(RefCell::new(SelectionRegistrar::new()));
        let mut delegates = Vec::new();
        let mut coordinates = Vec::new();
        for (text, origin) in texts {
            let id = registrar.borrow_mut().next_selectable_id();
            let layout = MonospaceLayout::new(*text);
            let placed = Rc::new(PlacedCoordinates::new(*origin, layout.size()));
            let delegate = Rc::new(MultiWidgetSelectionDelegate::with_layout(
                id,
                layout,
                placed.clone(),
            ));
            registrar.borrow_mut().subscribe(delegate.clone());
            delegates.push(delegate);
            coordinates.push(placed);
        }

        let recorded = Recorded::default();
        let container = Rc::new(PlacedCoordinates::new(Point::ZERO, CONTAINER_SIZE));
        let mut manager = SelectionManager::new(registrar);
        manager.set_container_coordinates(Some(container.clone()));
        manager.set_clipboard(Some(Box::new(RecordingClipboard(
            recorded.clipboard.clone(),
        ))));
        manager.set_text_toolbar(Some(Box::new(RecordingToolbar {
            shown: recorded.toolbar_shown.clone(),
            hides: recorded.toolbar_hides.clone(),
            status: TextToolbarStatus::Hidden,
        })));
        manager.set_haptic_feedback(Some(Box::new(RecordingHaptics(
            recorded.haptics.clone(),
        ))));
        Self {
            manager,
            delegates,
            coordinates,
            container,
            recorded,
        }
    }

    /// Id of the `ix`th text.
    pub(crate) fn id(&self, ix: usize) -> SelectableId {
        self.delegates[ix].selectable_id()
    }

    /// Part of the selection in the `ix`th text.
    pub(crate) fn subselection(&self, ix: usize) -> Option<TextRange> {
        self.manager
            .registrar()
            .borrow()
            .subselection(self.id(ix))
            .map(|s| s.to_text_range())
    }

    /// Selection offsets, when both anchors are in the same text.
    pub(crate) fn range(&self) -> Option<TextRange> {
        let selection = self.manager.selection()?;
        assert_eq!(
            selection.start.selectable_id, selection.end.selectable_id,
            "selection spans several texts"
        );
        Some(selection.to_text_range())
    }

    /// Drags the end handle from `from` to `to` without any adjustment.
    pub(crate) fn select(&mut self, from: Point, to: Point) {
        self.manager
            .start_selection(from, false, SelectionAdjustment::None);
        self.manager
            .update_selection(Some(to), Some(from), false, SelectionAdjustment::None);
    }

    /// Number of haptic feedbacks so far.
    pub(crate) fn haptics(&self) -> usize {
        self.recorded.haptics.borrow().len()
    }
}

/// Takes everything the dispatcher has queued.
pub(crate) fn drain(dispatcher: &mut InputDispatcher) -> Vec<InputEvent> {
    let mut events = Vec::new();
    dispatcher.flush(&mut events);
    events
}
