// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pull-based gesture detectors.
//!
//! A detector is fed one [`InputEvent`] at a time and reacts synchronously. It tracks the first
//! touch pointer of a gesture, or the primary mouse button.

use peniko::kurbo::{Point, Vec2};

use crate::config::ViewConfiguration;
use crate::event::{InputEvent, MouseAction, MouseButton, PointerId, TouchAction};

/// Receiver of drag callbacks.
///
/// Every gesture that starts a drag ends with exactly one of [`on_stop`](Self::on_stop) or
/// [`on_cancel`](Self::on_cancel).
pub trait DragObserver {
    /// The pointer went down. Called before any drag is recognised.
    fn on_down(&mut self, position: Point) {
        let _ = position;
    }

    /// The pointer went up, whether or not a drag happened.
    fn on_up(&mut self) {}

    /// A drag was recognised, starting at `position`.
    fn on_start(&mut self, position: Point);

    /// The pointer moved by `delta` while dragging.
    fn on_drag(&mut self, delta: Vec2);

    /// The drag ended normally.
    fn on_stop(&mut self);

    /// The drag was cancelled.
    fn on_cancel(&mut self);
}

/// When a [`DragGestureDetector`] starts a drag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragStart {
    /// As soon as the pointer moves beyond the touch slop.
    #[default]
    Immediate,
    /// Once the pointer has been held within the touch slop for the long press timeout.
    AfterLongPress,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Primitive {
    Down(Point, u64),
    Move(Point, u64),
    Up,
    Cancel,
}

/// Follows one pointer: the first touch pointer down or the primary mouse button.
#[derive(Clone, Copy, Debug, Default)]
struct Tracker {
    pointer: Option<PointerId>,
    mouse: bool,
}

impl Tracker {
    fn next(&mut self, event: &InputEvent) -> Option<Primitive> {
        match event {
            InputEvent::Touch(touch) => match touch.action {
                TouchAction::Down(id) if self.pointer.is_none() && !self.mouse => {
                    self.pointer = Some(id);
                    Some(Primitive::Down(touch.position_of(id)?, touch.event_time))
                }
                TouchAction::Move => {
                    let position = touch.position_of(self.pointer?)?;
                    Some(Primitive::Move(position, touch.event_time))
                }
                TouchAction::Up(id) if self.pointer == Some(id) => {
                    self.pointer = None;
                    Some(Primitive::Up)
                }
                TouchAction::Cancel if self.pointer.is_some() => {
                    self.pointer = None;
                    Some(Primitive::Cancel)
                }
                _ => None,
            },
            InputEvent::Mouse(mouse) => match mouse.action {
                MouseAction::Press(MouseButton::PRIMARY) if self.pointer.is_none() => {
                    self.mouse = true;
                    Some(Primitive::Down(mouse.position, mouse.event_time))
                }
                MouseAction::Move if self.mouse => {
                    Some(Primitive::Move(mouse.position, mouse.event_time))
                }
                MouseAction::Release(MouseButton::PRIMARY) if self.mouse => {
                    self.mouse = false;
                    Some(Primitive::Up)
                }
                MouseAction::Cancel if self.mouse => {
                    self.mouse = false;
                    Some(Primitive::Cancel)
                }
                _ => None,
            },
            InputEvent::Key(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum DragState {
    Idle,
    Pressed {
        down_position: Point,
        down_time: u64,
    },
    Dragging {
        last_position: Point,
    },
    /// The gesture can no longer become a drag; waiting for it to end.
    Ignored,
}

/// Recognises drags and reports them to a [`DragObserver`].
#[derive(Clone, Debug)]
pub struct DragGestureDetector {
    start: DragStart,
    config: ViewConfiguration,
    tracker: Tracker,
    state: DragState,
}

impl DragGestureDetector {
    /// Creates an idle detector.
    pub fn new(start: DragStart, config: ViewConfiguration) -> Self {
        Self {
            start,
            config,
            tracker: Tracker::default(),
            state: DragState::Idle,
        }
    }

    /// Returns `true` between [`DragObserver::on_start`] and the end of the drag.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Handles the next event.
    pub fn process(&mut self, event: &InputEvent, observer: &mut dyn DragObserver) {
        let Some(primitive) = self.tracker.next(event) else {
            return;
        };
        match (self.state, primitive) {
            (DragState::Idle, Primitive::Down(position, time)) => {
                observer.on_down(position);
                self.state = DragState::Pressed {
                    down_position: position,
                    down_time: time,
                };
            }
            (
                DragState::Pressed {
                    down_position,
                    down_time,
                },
                Primitive::Move(position, time),
            ) => {
                let beyond_slop = (position - down_position).hypot() > self.config.touch_slop;
                let held = time.saturating_sub(down_time) >= self.config.long_press_timeout_ms;
                let starts = match self.start {
                    DragStart::Immediate => beyond_slop,
                    DragStart::AfterLongPress if beyond_slop && !held => {
                        self.state = DragState::Ignored;
                        return;
                    }
                    DragStart::AfterLongPress => held,
                };
                if starts {
                    observer.on_start(down_position);
                    if position != down_position {
                        observer.on_drag(position - down_position);
                    }
                    self.state = DragState::Dragging {
                        last_position: position,
                    };
                }
            }
            (DragState::Dragging { last_position }, Primitive::Move(position, _)) => {
                if position != last_position {
                    observer.on_drag(position - last_position);
                }
                self.state = DragState::Dragging {
                    last_position: position,
                };
            }
            (DragState::Dragging { .. }, Primitive::Up) => {
                observer.on_stop();
                observer.on_up();
                self.state = DragState::Idle;
            }
            (DragState::Dragging { .. }, Primitive::Cancel) => {
                observer.on_cancel();
                self.state = DragState::Idle;
            }
            (DragState::Pressed { .. } | DragState::Ignored, Primitive::Up) => {
                observer.on_up();
                self.state = DragState::Idle;
            }
            (_, Primitive::Cancel) => self.state = DragState::Idle,
            _ => {}
        }
    }
}

/// A recognised tap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tap {
    /// Where the pointer went down.
    pub position: Point,
    /// Time of the up event.
    pub event_time: u64,
    /// 1 for a single tap, 2 for the second tap of a double tap, and so on.
    pub count: u32,
}

/// Recognises taps: presses that neither moved beyond the touch slop nor were cancelled.
#[derive(Clone, Debug)]
pub struct TapDetector {
    config: ViewConfiguration,
    tracker: Tracker,
    pressed: Option<(Point, u64)>,
    last: Option<Tap>,
    last_up_time: u64,
}

impl TapDetector {
    /// Creates an idle detector.
    pub fn new(config: ViewConfiguration) -> Self {
        Self {
            config,
            tracker: Tracker::default(),
            pressed: None,
            last: None,
            last_up_time: 0,
        }
    }

    /// Handles the next event, returning a tap when one completes.
    pub fn process(&mut self, event: &InputEvent) -> Option<Tap> {
        let up_time = event.event_time();
        match self.tracker.next(event)? {
            Primitive::Down(position, time) => {
                self.pressed = Some((position, time));
                None
            }
            Primitive::Move(position, _) => {
                if let Some((down, _)) = self.pressed {
                    if (position - down).hypot() > self.config.touch_slop {
                        self.pressed = None;
                    }
                }
                None
            }
            Primitive::Up => {
                let (position, down_time) = self.pressed.take()?;
                let count = match self.last {
                    Some(last) if self.follows(last, position, down_time) => last.count + 1,
                    _ => 1,
                };
                let tap = Tap {
                    position,
                    event_time: up_time,
                    count,
                };
                self.last = Some(tap);
                self.last_up_time = up_time;
                Some(tap)
            }
            Primitive::Cancel => {
                self.pressed = None;
                None
            }
        }
    }

    fn follows(&self, last: Tap, position: Point, down_time: u64) -> bool {
        let gap = down_time.saturating_sub(self.last_up_time);
        gap >= self.config.double_tap_min_time_ms
            && gap < self.config.double_tap_timeout_ms
            && (position - last.position).hypot() <= self.config.touch_slop
    }
}
