// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The input dispatcher and its test context.

use alloc::vec::Vec;

use hashbrown::HashMap;
use log::{debug, trace};
use peniko::kurbo::{Point, Rect};

use crate::config::DispatcherConfig;
use crate::error::{Error, ErrorKind};
use crate::event::{
    HistoricalSample, InputEvent, InputSink, Key, KeyAction, KeyEvent, MouseAction, MouseButton,
    MouseEvent, Pointer, PointerId, ScrollWheel, TouchAction, TouchEvent,
};
use crate::state::{InputDispatcherState, KeyInputState, MouseInputState, PartialGesture};

/// Identifier of a root that receives input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RootId(pub u64);

/// The surface a dispatcher sends input to.
pub trait Root {
    /// Stable identity, used to find state saved by an earlier dispatcher.
    fn id(&self) -> RootId;

    /// Bounds of the root in its own coordinates. Mouse gestures may only start inside.
    fn bounds(&self) -> Rect;
}

/// Owner of the simulated clock and of dispatcher state that outlives a single dispatcher.
#[derive(Debug, Default)]
pub struct TestContext {
    now: u64,
    config: DispatcherConfig,
    saved: HashMap<RootId, InputDispatcherState>,
}

impl TestContext {
    /// Creates a context with the default configuration, with its clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context with the given configuration.
    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current simulated time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Configuration handed to every dispatcher created from this context.
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Returns `true` if a disposed dispatcher left state behind for `root`.
    pub fn has_saved_state(&self, root: RootId) -> bool {
        self.saved.contains_key(&root)
    }
}

/// Sequences low-level touch, mouse and key primitives into ordered events.
///
/// Events are queued by the `enqueue_*` methods and delivered by [`flush`](Self::flush). Every
/// event is stamped with the dispatcher's simulated clock, which only moves through
/// [`advance_event_time`](Self::advance_event_time).
///
/// Touch and mouse input are mutually exclusive: starting one cancels the other.
#[derive(Debug)]
pub struct InputDispatcher {
    root: RootId,
    bounds: Rect,
    config: DispatcherConfig,
    now: u64,
    partial_gesture: Option<PartialGesture>,
    mouse: MouseInputState,
    keys: KeyInputState,
    queue: Vec<InputEvent>,
}

impl InputDispatcher {
    /// Creates a dispatcher for `root`, picking up any state saved for it by an earlier one.
    pub fn new(ctx: &mut TestContext, root: &dyn Root) -> Self {
        let id = root.id();
        let state = match ctx.saved.remove(&id) {
            Some(state) => {
                debug!("restoring input state for root {id:?}");
                state
            }
            None => InputDispatcherState::default(),
        };
        Self {
            root: id,
            bounds: root.bounds(),
            config: ctx.config,
            now: ctx.now,
            partial_gesture: state.partial_gesture,
            mouse: state.mouse,
            keys: state.keys,
            queue: Vec::new(),
        }
    }

    /// Saves in-progress state into `ctx` and moves its clock to this dispatcher's time.
    ///
    /// Events that were not flushed are dropped.
    pub fn dispose(self, ctx: &mut TestContext) {
        if !self.queue.is_empty() {
            debug!("dropping {} unflushed input events", self.queue.len());
        }
        debug!("saving input state for root {:?}", self.root);
        ctx.saved.insert(
            self.root,
            InputDispatcherState {
                partial_gesture: self.partial_gesture,
                mouse: self.mouse,
                keys: self.keys,
            },
        );
        ctx.now = ctx.now.max(self.now);
    }

    /// Delivers all queued events to `sink`, in enqueue order.
    pub fn flush(&mut self, sink: &mut dyn InputSink) {
        for event in self.queue.drain(..) {
            sink.dispatch(event);
        }
    }

    /// Number of queued events.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// The configuration this dispatcher was created with.
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Current simulated time in milliseconds.
    pub fn current_time(&self) -> u64 {
        self.now
    }

    /// Bounds of the root.
    pub fn root_bounds(&self) -> Rect {
        self.bounds
    }

    /// Advances the clock by `duration_ms`, emitting key repeats that fall inside the interval.
    pub fn advance_event_time(&mut self, duration_ms: u64) {
        let end = self.now + duration_ms;
        self.send_key_repeats(end);
        self.now = end;
    }

    // --- Touch ---

    /// Returns `true` while a touch gesture is in progress.
    pub fn is_touch_in_progress(&self) -> bool {
        self.partial_gesture.is_some()
    }

    /// Current position of touch pointer `id`, if it is down.
    pub fn current_touch_position(&self, id: PointerId) -> Option<Point> {
        self.partial_gesture.as_ref()?.position_of(id)
    }

    /// Puts pointer `id` down at `position`, starting a gesture if none is in progress.
    ///
    /// Any pressed mouse buttons are cancelled and hovering ends first. Pending pointer updates
    /// are sent as a move before the down event.
    pub fn enqueue_touch_down(&mut self, id: PointerId, position: Point) -> Result<(), Error> {
        if self
            .partial_gesture
            .as_ref()
            .is_some_and(|gesture| gesture.contains(id))
        {
            return Err(Error::pointer(ErrorKind::PointerAlreadyDown, id));
        }
        if self.mouse.has_any_pressed() {
            self.cancel_mouse();
        } else if self.mouse.is_entered {
            self.exit_hover();
        }
        self.flush_pointer_updates();
        match &mut self.partial_gesture {
            Some(gesture) => gesture.add(id, position),
            None => self.partial_gesture = Some(PartialGesture::new(self.now, id, position)),
        }
        self.enqueue_touch(TouchAction::Down(id), Vec::new());
        Ok(())
    }

    /// Moves pointer `id` without sending anything.
    ///
    /// The change is sent by the next [`enqueue_touch_move`](Self::enqueue_touch_move), or before
    /// the next down, up or cancel, batched with updates to other pointers.
    pub fn update_touch_pointer(&mut self, id: PointerId, position: Point) -> Result<(), Error> {
        let gesture = self
            .partial_gesture
            .as_mut()
            .ok_or(Error::new(ErrorKind::NoGestureInProgress))?;
        if gesture.update(id, position) {
            Ok(())
        } else {
            Err(Error::pointer(ErrorKind::PointerNotDown, id))
        }
    }

    /// Sends a move event with the current position of every pointer.
    pub fn enqueue_touch_move(&mut self) -> Result<(), Error> {
        if self.partial_gesture.is_none() {
            return Err(Error::new(ErrorKind::NoGestureInProgress));
        }
        self.enqueue_touch(TouchAction::Move, Vec::new());
        Ok(())
    }

    /// Sends a move event carrying historical samples.
    ///
    /// `relative_times` are offsets from the current time, strictly increasing and not positive.
    /// `coordinates` has one row per active pointer, in the order the pointers went down, and
    /// each row has one position per relative time.
    pub fn enqueue_touch_moves(
        &mut self,
        relative_times: &[i64],
        coordinates: &[Vec<Point>],
    ) -> Result<(), Error> {
        let gesture = self
            .partial_gesture
            .as_ref()
            .ok_or(Error::new(ErrorKind::NoGestureInProgress))?;
        let increasing = relative_times.windows(2).all(|w| w[0] < w[1]);
        let non_positive = relative_times.iter().all(|t| *t <= 0);
        let shaped = coordinates.len() == gesture.pointers.len()
            && coordinates.iter().all(|row| row.len() == relative_times.len());
        let after_down = relative_times
            .first()
            .is_none_or(|t| self.now.checked_add_signed(*t) >= Some(gesture.down_time));
        if !(increasing && non_positive && shaped && after_down) {
            return Err(Error::new(ErrorKind::InvalidHistory));
        }
        let history = relative_times
            .iter()
            .enumerate()
            .map(|(sample, relative)| HistoricalSample {
                time: self.now.saturating_add_signed(*relative),
                pointers: gesture
                    .pointers
                    .iter()
                    .zip(coordinates)
                    .map(|(pointer, row)| Pointer {
                        id: pointer.id,
                        position: row[sample],
                    })
                    .collect(),
            })
            .collect();
        self.enqueue_touch(TouchAction::Move, history);
        Ok(())
    }

    /// Lifts pointer `id`, ending the gesture if it was the last one down.
    pub fn enqueue_touch_up(&mut self, id: PointerId) -> Result<(), Error> {
        let gesture = self
            .partial_gesture
            .as_ref()
            .ok_or(Error::new(ErrorKind::NoGestureInProgress))?;
        if !gesture.contains(id) {
            return Err(Error::pointer(ErrorKind::PointerNotDown, id));
        }
        self.flush_pointer_updates();
        self.enqueue_touch(TouchAction::Up(id), Vec::new());
        if let Some(gesture) = &mut self.partial_gesture {
            gesture.remove(id);
            if gesture.pointers.is_empty() {
                self.partial_gesture = None;
            }
        }
        Ok(())
    }

    /// Cancels the touch gesture.
    pub fn enqueue_touch_cancel(&mut self) -> Result<(), Error> {
        if self.partial_gesture.is_none() {
            return Err(Error::new(ErrorKind::NoGestureInProgress));
        }
        self.cancel_touch();
        Ok(())
    }

    fn cancel_touch(&mut self) {
        debug!("cancelling touch gesture");
        self.flush_pointer_updates();
        self.enqueue_touch(TouchAction::Cancel, Vec::new());
        self.partial_gesture = None;
    }

    fn flush_pointer_updates(&mut self) {
        if self
            .partial_gesture
            .as_ref()
            .is_some_and(|gesture| gesture.has_pointer_updates)
        {
            self.enqueue_touch(TouchAction::Move, Vec::new());
        }
    }

    fn enqueue_touch(&mut self, action: TouchAction, history: Vec<HistoricalSample>) {
        let Some(gesture) = &mut self.partial_gesture else {
            return;
        };
        if action == TouchAction::Move {
            gesture.has_pointer_updates = false;
        }
        let event = TouchEvent {
            action,
            down_time: gesture.down_time,
            event_time: self.now,
            pointers: gesture.pointers.clone(),
            history,
        };
        trace!("enqueue {event:?}");
        self.queue.push(InputEvent::Touch(event));
    }

    // --- Mouse ---

    /// Last known mouse position.
    pub fn current_mouse_position(&self) -> Point {
        self.mouse.last_position
    }

    /// Returns `true` while any mouse button is pressed.
    pub fn is_mouse_in_progress(&self) -> bool {
        self.mouse.has_any_pressed()
    }

    /// Returns `true` if `button` is pressed.
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse.is_pressed(button)
    }

    /// Returns `true` while the mouse hovers over the root.
    pub fn is_hovering(&self) -> bool {
        self.mouse.is_entered
    }

    /// Presses `button` at the current mouse position.
    ///
    /// A touch gesture in progress is cancelled first. The first button of a gesture must be
    /// pressed inside the root.
    pub fn enqueue_mouse_press(&mut self, button: MouseButton) -> Result<(), Error> {
        if self.mouse.is_pressed(button) {
            return Err(Error::button(ErrorKind::ButtonAlreadyPressed, button));
        }
        let position = self.mouse.last_position;
        if !self.mouse.has_any_pressed() && !self.bounds.contains(position) {
            return Err(Error::position(ErrorKind::OutOfBounds, position));
        }
        if self.is_touch_in_progress() {
            self.cancel_touch();
        }
        if !self.mouse.has_any_pressed() {
            self.mouse.down_time = self.now;
        }
        self.mouse.press(button);
        if self.mouse.is_entered {
            self.exit_hover();
        }
        self.enqueue_mouse(MouseAction::Press(button));
        Ok(())
    }

    /// Moves the mouse to `position` and sends a move.
    ///
    /// Hovering starts when the mouse moves into the root with no buttons pressed, and ends
    /// when it leaves.
    pub fn enqueue_mouse_move(&mut self, position: Point) {
        if self.is_touch_in_progress() {
            self.cancel_touch();
        }
        self.mouse.last_position = position;
        let inside = self.bounds.contains(position);
        if inside && !self.mouse.is_entered && !self.mouse.has_any_pressed() {
            self.enter_hover();
        } else if !inside && self.mouse.is_entered {
            self.exit_hover();
        }
        self.enqueue_mouse(MouseAction::Move);
    }

    /// Sets the mouse position without sending anything.
    pub fn update_mouse_position(&mut self, position: Point) {
        self.mouse.last_position = position;
    }

    /// Releases `button`. When it was the last one and the mouse is inside, hovering resumes.
    pub fn enqueue_mouse_release(&mut self, button: MouseButton) -> Result<(), Error> {
        if !self.mouse.is_pressed(button) {
            return Err(Error::button(ErrorKind::ButtonNotPressed, button));
        }
        if self.is_touch_in_progress() {
            return Err(Error::new(ErrorKind::TouchInProgress));
        }
        self.mouse.release(button);
        self.enqueue_mouse(MouseAction::Release(button));
        if !self.mouse.has_any_pressed() && self.bounds.contains(self.mouse.last_position) {
            self.enter_hover();
            self.enqueue_mouse(MouseAction::Move);
        }
        Ok(())
    }

    /// Starts hovering at `position`.
    pub fn enqueue_mouse_enter(&mut self, position: Point) -> Result<(), Error> {
        if self.mouse.is_entered {
            return Err(Error::new(ErrorKind::AlreadyHovering));
        }
        if self.mouse.has_any_pressed() {
            return Err(Error::new(ErrorKind::ButtonsPressed));
        }
        if !self.bounds.contains(position) {
            return Err(Error::position(ErrorKind::OutOfBounds, position));
        }
        self.mouse.last_position = position;
        self.enter_hover();
        Ok(())
    }

    /// Stops hovering at `position`.
    pub fn enqueue_mouse_exit(&mut self, position: Point) -> Result<(), Error> {
        if !self.mouse.is_entered {
            return Err(Error::new(ErrorKind::NotHovering));
        }
        self.mouse.last_position = position;
        self.exit_hover();
        Ok(())
    }

    /// Cancels every pressed button.
    pub fn enqueue_mouse_cancel(&mut self) -> Result<(), Error> {
        if !self.mouse.has_any_pressed() {
            return Err(Error::new(ErrorKind::NoButtonsPressed));
        }
        self.cancel_mouse();
        Ok(())
    }

    /// Scrolls `wheel` by `delta` at the current mouse position.
    ///
    /// A move to the current position is sent first; the scroll itself only when the mouse is
    /// inside the root.
    pub fn enqueue_mouse_scroll(&mut self, delta: f64, wheel: ScrollWheel) {
        self.enqueue_mouse_move(self.mouse.last_position);
        if self.bounds.contains(self.mouse.last_position) {
            self.enqueue_mouse(MouseAction::Scroll { delta, wheel });
        }
    }

    fn cancel_mouse(&mut self) {
        debug!("cancelling mouse gesture");
        self.mouse.pressed.clear();
        self.enqueue_mouse(MouseAction::Cancel);
    }

    fn enter_hover(&mut self) {
        self.enqueue_mouse(MouseAction::Enter);
        self.mouse.is_entered = true;
    }

    fn exit_hover(&mut self) {
        self.enqueue_mouse(MouseAction::Exit);
        self.mouse.is_entered = false;
    }

    fn enqueue_mouse(&mut self, action: MouseAction) {
        let event = MouseEvent {
            action,
            down_time: self.mouse.down_time,
            event_time: self.now,
            position: self.mouse.last_position,
            buttons: self.mouse.pressed.clone(),
            modifiers: self.keys.modifiers(),
        };
        trace!("enqueue {event:?}");
        self.queue.push(InputEvent::Mouse(event));
    }

    // --- Keys ---

    /// Returns `true` if `key` is held down.
    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys.is_down(key)
    }

    /// Presses `key`. While held it repeats as the clock advances.
    pub fn enqueue_key_down(&mut self, key: Key) -> Result<(), Error> {
        if self.keys.is_down(key) {
            return Err(Error::key(ErrorKind::KeyAlreadyDown, key));
        }
        self.keys.set_down(key, self.now);
        self.enqueue_key(KeyAction::Down, key);
        Ok(())
    }

    /// Releases `key`.
    pub fn enqueue_key_up(&mut self, key: Key) -> Result<(), Error> {
        if !self.keys.is_down(key) {
            return Err(Error::key(ErrorKind::KeyNotDown, key));
        }
        self.keys.set_up(key);
        self.enqueue_key(KeyAction::Up, key);
        Ok(())
    }

    fn send_key_repeats(&mut self, end: u64) {
        if !self.config.key_repeat_enabled {
            return;
        }
        let Some(key) = self.keys.repeat_key else {
            return;
        };
        let initial = self.config.initial_repeat_delay_ms;
        let subsequent = self.config.subsequent_repeat_delay_ms;
        if end.saturating_sub(self.keys.down_time) < initial {
            return;
        }
        if self.keys.repeat_count == 0 {
            self.keys.repeat_count = 1;
            self.keys.last_repeat_time = self.keys.down_time + initial;
            self.now = self.keys.last_repeat_time;
            self.enqueue_key(KeyAction::Down, key);
        }
        if subsequent == 0 {
            return;
        }
        let repeats = (end - self.keys.last_repeat_time) / subsequent;
        for _ in 0..repeats {
            self.keys.repeat_count += 1;
            self.keys.last_repeat_time += subsequent;
            self.now = self.keys.last_repeat_time;
            self.enqueue_key(KeyAction::Down, key);
        }
    }

    fn enqueue_key(&mut self, action: KeyAction, key: Key) {
        let event = KeyEvent {
            action,
            key,
            down_time: self.keys.down_time,
            event_time: self.now,
            repeat_count: if action == KeyAction::Down {
                self.keys.repeat_count
            } else {
                0
            },
            modifiers: self.keys.modifiers(),
            caps_lock_on: self.keys.caps_lock_on,
            num_lock_on: self.keys.num_lock_on,
            scroll_lock_on: self.keys.scroll_lock_on,
        };
        trace!("enqueue {event:?}");
        self.queue.push(InputEvent::Key(event));
    }
}

/// Runs `input` against a fresh dispatcher for `root`, then flushes into `sink` and disposes.
///
/// State left by `input` (a finger still down, a pressed button, held keys) carries over to the
/// next call for the same root. Queued events are flushed even when `input` fails.
pub fn perform_input<R>(
    ctx: &mut TestContext,
    root: &dyn Root,
    sink: &mut dyn InputSink,
    input: impl FnOnce(&mut InputDispatcher) -> Result<R, Error>,
) -> Result<R, Error> {
    let mut dispatcher = InputDispatcher::new(ctx, root);
    let result = input(&mut dispatcher);
    dispatcher.flush(sink);
    dispatcher.dispose(ctx);
    result
}
