// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events produced by the dispatcher.

use alloc::vec::Vec;
use core::fmt;

use peniko::kurbo::Point;
use smallvec::SmallVec;

/// Identifier of a touch pointer (finger) within a gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointerId(pub u32);

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mouse button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MouseButton(pub u32);

impl MouseButton {
    /// The main button, usually the left one.
    pub const PRIMARY: Self = Self(0);
    /// The secondary button, usually the right one.
    pub const SECONDARY: Self = Self(1);
    /// The tertiary button, usually the wheel.
    pub const TERTIARY: Self = Self(2);
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Axis of a scroll wheel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollWheel {
    /// The usual wheel.
    Vertical,
    /// A horizontal wheel or tilt.
    Horizontal,
}

/// A keyboard key, identified by its key code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(pub u32);

#[allow(missing_docs, reason = "key names are self-describing")]
impl Key {
    pub const DIRECTION_LEFT: Self = Self(21);
    pub const DIRECTION_RIGHT: Self = Self(22);
    pub const A: Self = Self(29);
    pub const C: Self = Self(31);
    pub const V: Self = Self(50);
    pub const X: Self = Self(52);
    pub const ALT_LEFT: Self = Self(57);
    pub const ALT_RIGHT: Self = Self(58);
    pub const SHIFT_LEFT: Self = Self(59);
    pub const SHIFT_RIGHT: Self = Self(60);
    pub const SPACE: Self = Self(62);
    pub const ENTER: Self = Self(66);
    pub const CTRL_LEFT: Self = Self(113);
    pub const CTRL_RIGHT: Self = Self(114);
    pub const CAPS_LOCK: Self = Self(115);
    pub const SCROLL_LOCK: Self = Self(116);
    pub const META_LEFT: Self = Self(117);
    pub const META_RIGHT: Self = Self(118);
    pub const INSERT: Self = Self(124);
    pub const NUM_LOCK: Self = Self(143);
    pub const COPY: Self = Self(278);
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.0)
    }
}

/// Modifier keys held while an event was produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Either control key.
    pub ctrl: bool,
    /// Either shift key.
    pub shift: bool,
    /// Either alt key.
    pub alt: bool,
    /// Either meta (command, super) key.
    pub meta: bool,
}

/// Position of one touch pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    /// Which pointer.
    pub id: PointerId,
    /// Where it is, in root coordinates.
    pub position: Point,
}

/// Pointer positions of a touch event, in pointer insertion order.
pub type Pointers = SmallVec<[Pointer; 2]>;

/// Earlier positions batched into a move event.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoricalSample {
    /// Event time of the sample.
    pub time: u64,
    /// Positions of all pointers at that time.
    pub pointers: Pointers,
}

/// What happened in a [`TouchEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchAction {
    /// A pointer went down.
    Down(PointerId),
    /// One or more pointers moved.
    Move,
    /// A pointer went up.
    Up(PointerId),
    /// The whole gesture was cancelled.
    Cancel,
}

/// A touch event. Carries the positions of every pointer in the gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// What happened.
    pub action: TouchAction,
    /// Time the gesture started.
    pub down_time: u64,
    /// Time of this event.
    pub event_time: u64,
    /// All active pointers, including the one going up.
    pub pointers: Pointers,
    /// Batched earlier samples, oldest first. Only move events have any.
    pub history: Vec<HistoricalSample>,
}

impl TouchEvent {
    /// Position of pointer `id` in this event.
    pub fn position_of(&self, id: PointerId) -> Option<Point> {
        self.pointers
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.position)
    }
}

/// What happened in a [`MouseEvent`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MouseAction {
    /// A button was pressed.
    Press(MouseButton),
    /// A button was released.
    Release(MouseButton),
    /// The mouse moved; a hover if no buttons are pressed, a drag otherwise.
    Move,
    /// The mouse started hovering over the root.
    Enter,
    /// The mouse stopped hovering over the root.
    Exit,
    /// All pressed buttons were cancelled.
    Cancel,
    /// The wheel scrolled by `delta`.
    Scroll {
        /// Scroll amount.
        delta: f64,
        /// Which wheel.
        wheel: ScrollWheel,
    },
}

/// A mouse event.
#[derive(Clone, Debug, PartialEq)]
pub struct MouseEvent {
    /// What happened.
    pub action: MouseAction,
    /// Time the first currently pressed button went down.
    pub down_time: u64,
    /// Time of this event.
    pub event_time: u64,
    /// Mouse position in root coordinates.
    pub position: Point,
    /// Buttons pressed after this event.
    pub buttons: SmallVec<[MouseButton; 3]>,
    /// Modifier keys held.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Returns `true` if `button` is pressed after this event.
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    /// Returns `true` for a move with no buttons pressed.
    pub fn is_hover(&self) -> bool {
        self.action == MouseAction::Move && self.buttons.is_empty()
    }
}

/// Whether a key went down or up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// The key went down, or auto-repeated.
    Down,
    /// The key went up.
    Up,
}

/// A key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Down or up.
    pub action: KeyAction,
    /// Which key.
    pub key: Key,
    /// Time of the most recent key down.
    pub down_time: u64,
    /// Time of this event.
    pub event_time: u64,
    /// Zero for the initial down, then one more for each auto-repeat.
    pub repeat_count: u32,
    /// Modifier keys held.
    pub modifiers: Modifiers,
    /// Caps lock state.
    pub caps_lock_on: bool,
    /// Num lock state.
    pub num_lock_on: bool,
    /// Scroll lock state.
    pub scroll_lock_on: bool,
}

/// Any event the dispatcher produces.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A touch event.
    Touch(TouchEvent),
    /// A mouse event.
    Mouse(MouseEvent),
    /// A key event.
    Key(KeyEvent),
}

impl InputEvent {
    /// Time of this event.
    pub fn event_time(&self) -> u64 {
        match self {
            Self::Touch(e) => e.event_time,
            Self::Mouse(e) => e.event_time,
            Self::Key(e) => e.event_time,
        }
    }
}

/// Receiver of flushed events.
pub trait InputSink {
    /// Delivers one event.
    fn dispatch(&mut self, event: InputEvent);
}

impl InputSink for Vec<InputEvent> {
    fn dispatch(&mut self, event: InputEvent) {
        self.push(event);
    }
}
