// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-modality input state kept by the dispatcher.

use hashbrown::HashSet;
use peniko::kurbo::Point;
use smallvec::SmallVec;

use crate::event::{Key, Modifiers, MouseButton, Pointer, PointerId, Pointers};

/// An in-flight touch gesture.
///
/// Exists only while at least one pointer is down: the dispatcher drops it as soon as the last
/// pointer goes up or the gesture is cancelled.
#[derive(Clone, Debug)]
pub(crate) struct PartialGesture {
    pub(crate) down_time: u64,
    /// Active pointers in the order they went down.
    pub(crate) pointers: Pointers,
    /// Set by pointer updates that have not been sent in a move event yet.
    pub(crate) has_pointer_updates: bool,
}

impl PartialGesture {
    pub(crate) fn new(down_time: u64, id: PointerId, position: Point) -> Self {
        let mut pointers = Pointers::new();
        pointers.push(Pointer { id, position });
        Self {
            down_time,
            pointers,
            has_pointer_updates: false,
        }
    }

    pub(crate) fn contains(&self, id: PointerId) -> bool {
        self.pointers.iter().any(|p| p.id == id)
    }

    pub(crate) fn position_of(&self, id: PointerId) -> Option<Point> {
        self.pointers
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.position)
    }

    pub(crate) fn add(&mut self, id: PointerId, position: Point) {
        self.pointers.push(Pointer { id, position });
    }

    /// Moves pointer `id`, returning `false` if it is not part of this gesture.
    pub(crate) fn update(&mut self, id: PointerId, position: Point) -> bool {
        match self.pointers.iter_mut().find(|p| p.id == id) {
            Some(pointer) => {
                pointer.position = position;
                self.has_pointer_updates = true;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, id: PointerId) {
        self.pointers.retain(|p| p.id != id);
    }
}

/// Mouse state. Unlike [`PartialGesture`] it lives as long as the dispatcher.
#[derive(Clone, Debug, Default)]
pub(crate) struct MouseInputState {
    pub(crate) down_time: u64,
    pub(crate) pressed: SmallVec<[MouseButton; 3]>,
    pub(crate) last_position: Point,
    /// Never `true` while a button is pressed.
    pub(crate) is_entered: bool,
}

impl MouseInputState {
    pub(crate) fn has_any_pressed(&self) -> bool {
        !self.pressed.is_empty()
    }

    pub(crate) fn is_pressed(&self, button: MouseButton) -> bool {
        self.pressed.contains(&button)
    }

    pub(crate) fn press(&mut self, button: MouseButton) {
        self.pressed.push(button);
    }

    pub(crate) fn release(&mut self, button: MouseButton) {
        self.pressed.retain(|b| *b != button);
    }
}

/// Keyboard state, including auto-repeat bookkeeping.
#[derive(Clone, Debug, Default)]
pub(crate) struct KeyInputState {
    pub(crate) down: HashSet<Key>,
    pub(crate) down_time: u64,
    pub(crate) repeat_key: Option<Key>,
    pub(crate) repeat_count: u32,
    pub(crate) last_repeat_time: u64,
    pub(crate) caps_lock_on: bool,
    pub(crate) num_lock_on: bool,
    pub(crate) scroll_lock_on: bool,
}

impl KeyInputState {
    pub(crate) fn is_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    pub(crate) fn set_down(&mut self, key: Key, now: u64) {
        self.down.insert(key);
        self.down_time = now;
        self.repeat_key = Some(key);
        self.repeat_count = 0;
        self.last_repeat_time = now;
        match key {
            Key::CAPS_LOCK => self.caps_lock_on = !self.caps_lock_on,
            Key::NUM_LOCK => self.num_lock_on = !self.num_lock_on,
            Key::SCROLL_LOCK => self.scroll_lock_on = !self.scroll_lock_on,
            _ => {}
        }
    }

    pub(crate) fn set_up(&mut self, key: Key) {
        self.down.remove(&key);
        if self.repeat_key == Some(key) {
            self.repeat_key = None;
            self.repeat_count = 0;
        }
    }

    pub(crate) fn modifiers(&self) -> Modifiers {
        let any = |a: Key, b: Key| self.is_down(a) || self.is_down(b);
        Modifiers {
            ctrl: any(Key::CTRL_LEFT, Key::CTRL_RIGHT),
            shift: any(Key::SHIFT_LEFT, Key::SHIFT_RIGHT),
            alt: any(Key::ALT_LEFT, Key::ALT_RIGHT),
            meta: any(Key::META_LEFT, Key::META_RIGHT),
        }
    }
}

/// Everything saved across dispatcher instances for one root.
#[derive(Clone, Debug, Default)]
pub(crate) struct InputDispatcherState {
    pub(crate) partial_gesture: Option<PartialGesture>,
    pub(crate) mouse: MouseInputState,
    pub(crate) keys: KeyInputState,
}
