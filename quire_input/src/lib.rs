// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `quire_input`: deterministic input sequencing for driving selection in tests and tools.
//!
//! - [`InputDispatcher`]: turns touch, mouse and key primitives into an ordered stream of
//!   [`InputEvent`]s, stamped with a simulated clock owned by a [`TestContext`].
//! - [`injection`]: whole gestures (clicks, swipes, pinches, drags) built from those primitives.
//! - [`VelocityPath`]: straight swipes that end at a requested velocity.
//! - [`DragGestureDetector`] and [`TapDetector`]: pull-based recognisers fed one event at a time.
//!
//! ## Gesture state
//!
//! A touch gesture starts with the first pointer down and ends when the last pointer goes up or
//! the gesture is cancelled. Touch and mouse input never overlap: pressing a mouse button cancels
//! an active touch gesture, and putting a finger down cancels pressed mouse buttons.
//!
//! State that is still in flight when a dispatcher is disposed (a finger still down, a pressed
//! button, held keys) is saved in the [`TestContext`] and picked up by the next dispatcher for
//! the same [`Root`], so one gesture can span several [`perform_input`] calls.
//!
//! ## Example
//!
//! ```
//! use quire_input::kurbo::{Point, Rect};
//! use quire_input::{InputEvent, PointerId, Root, RootId, TestContext, perform_input};
//!
//! struct Window;
//!
//! impl Root for Window {
//!     fn id(&self) -> RootId {
//!         RootId(1)
//!     }
//!
//!     fn bounds(&self) -> Rect {
//!         Rect::new(0.0, 0.0, 100.0, 100.0)
//!     }
//! }
//!
//! let mut ctx = TestContext::new();
//! let mut events: Vec<InputEvent> = Vec::new();
//! perform_input(&mut ctx, &Window, &mut events, |d| {
//!     d.enqueue_touch_down(PointerId(0), Point::new(10.0, 10.0))
//! })
//! .unwrap();
//! perform_input(&mut ctx, &Window, &mut events, |d| {
//!     assert!(d.is_touch_in_progress());
//!     d.enqueue_touch_up(PointerId(0))
//! })
//! .unwrap();
//! assert_eq!(events.len(), 2);
//! ```

extern crate alloc;

mod config;
mod detector;
mod dispatcher;
mod error;
mod event;
mod state;
mod velocity;

pub mod injection;

pub use config::{DispatcherConfig, ViewConfiguration};
pub use detector::{DragGestureDetector, DragObserver, DragStart, Tap, TapDetector};
pub use dispatcher::{InputDispatcher, Root, RootId, TestContext, perform_input};
pub use error::{Error, ErrorKind, Subject, VelocitySuggestions};
pub use event::{
    HistoricalSample, InputEvent, InputSink, Key, KeyAction, KeyEvent, Modifiers, MouseAction,
    MouseButton, MouseEvent, Pointer, PointerId, Pointers, ScrollWheel, TouchAction, TouchEvent,
};
pub use velocity::VelocityPath;

pub use peniko::kurbo;
