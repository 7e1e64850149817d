// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole gestures built from dispatcher primitives.
//!
//! Touch gestures use pointer 0 (and 1 for the second finger of a pinch). Moves are sampled
//! every event period of the dispatcher's configuration.

use alloc::vec::Vec;

use peniko::kurbo::Point;

use crate::dispatcher::InputDispatcher;
use crate::error::{Error, ErrorKind};
use crate::event::{MouseButton, PointerId};
use crate::velocity::VelocityPath;

/// Default duration of [`swipe`].
pub const DEFAULT_SWIPE_DURATION_MS: u64 = 200;
/// Time a mouse button is held during a click.
pub const SINGLE_CLICK_DELAY_MS: u64 = 60;
/// Time between the two clicks of a mouse double click.
pub const DOUBLE_CLICK_DELAY_MS: u64 = 145;
/// Default duration of [`mouse_drag_and_drop`].
pub const DEFAULT_MOUSE_GESTURE_DURATION_MS: u64 = 300;

/// Taps at `position`.
pub fn click(d: &mut InputDispatcher, position: Point) -> Result<(), Error> {
    let id = PointerId(0);
    d.enqueue_touch_down(id, position)?;
    d.advance_event_time(d.config().event_period_ms);
    d.enqueue_touch_move()?;
    d.enqueue_touch_up(id)
}

/// Presses at `position` for `duration_ms`, which must reach the long press timeout.
pub fn long_click(d: &mut InputDispatcher, position: Point, duration_ms: u64) -> Result<(), Error> {
    if duration_ms < d.config().view.long_press_timeout_ms {
        return Err(Error::duration(ErrorKind::InvalidDuration, duration_ms));
    }
    swipe(d, position, position, duration_ms)
}

/// A long click duration comfortably past the configured timeout.
pub fn default_long_click_duration(d: &InputDispatcher) -> u64 {
    d.config().view.long_press_timeout_ms + 100
}

/// Taps twice at `position`, `delay_ms` apart.
///
/// The delay must be at least the double tap minimum time and below the double tap timeout.
pub fn double_click(d: &mut InputDispatcher, position: Point, delay_ms: u64) -> Result<(), Error> {
    let view = d.config().view;
    if delay_ms < view.double_tap_min_time_ms || delay_ms >= view.double_tap_timeout_ms {
        return Err(Error::duration(ErrorKind::InvalidDuration, delay_ms));
    }
    click(d, position)?;
    d.advance_event_time(delay_ms);
    click(d, position)
}

/// Swipes in a straight line from `start` to `end`.
pub fn swipe(
    d: &mut InputDispatcher,
    start: Point,
    end: Point,
    duration_ms: u64,
) -> Result<(), Error> {
    swipe_along(d, |t| lerp(start, end, t, duration_ms), duration_ms, &[])
}

/// Swipes along `curve`, which maps elapsed milliseconds to a position.
///
/// A sample is taken at every key time in addition to the regular ones.
pub fn swipe_along(
    d: &mut InputDispatcher,
    curve: impl Fn(u64) -> Point,
    duration_ms: u64,
    key_times: &[u64],
) -> Result<(), Error> {
    multi_touch_swipe(d, &[&curve], duration_ms, key_times)
}

/// Swipes one pointer per curve at the same time.
///
/// All pointers go down together, move together and go up together, in curve order.
pub fn multi_touch_swipe(
    d: &mut InputDispatcher,
    curves: &[&dyn Fn(u64) -> Point],
    duration_ms: u64,
    key_times: &[u64],
) -> Result<(), Error> {
    let sorted = key_times.windows(2).all(|w| w[0] <= w[1]);
    if !sorted || key_times.iter().any(|t| *t > duration_ms) {
        return Err(Error::new(ErrorKind::InvalidKeyTimes));
    }
    let ids: Vec<PointerId> = (0..curves.len())
        .map(|i| PointerId(u32::try_from(i).unwrap_or(u32::MAX)))
        .collect();
    for (id, curve) in ids.iter().zip(curves) {
        d.enqueue_touch_down(*id, curve(0))?;
    }
    let mut boundaries = Vec::with_capacity(key_times.len() + 2);
    boundaries.push(0);
    boundaries.extend_from_slice(key_times);
    boundaries.push(duration_ms);
    let period = d.config().event_period_ms;
    let mut t = 0;
    for window in boundaries.windows(2) {
        let (from, to) = (window[0], window[1]);
        let steps = step_count(to - from, period);
        for step in 1..=steps {
            let next = from + (to - from) * step / steps;
            d.advance_event_time(next - t);
            t = next;
            for (id, curve) in ids.iter().zip(curves) {
                d.update_touch_pointer(*id, curve(t))?;
            }
            d.enqueue_touch_move()?;
        }
    }
    for id in &ids {
        d.enqueue_touch_up(*id)?;
    }
    Ok(())
}

/// Two-finger pinch; each finger moves in a straight line.
pub fn pinch(
    d: &mut InputDispatcher,
    start0: Point,
    end0: Point,
    start1: Point,
    end1: Point,
    duration_ms: u64,
) -> Result<(), Error> {
    let first = |t| lerp(start0, end0, t, duration_ms);
    let second = |t| lerp(start1, end1, t, duration_ms);
    multi_touch_swipe(d, &[&first, &second], duration_ms, &[])
}

/// Swipes in a straight line, ending at `end_velocity` pixels per second.
pub fn swipe_with_velocity(
    d: &mut InputDispatcher,
    start: Point,
    end: Point,
    end_velocity: f64,
    duration_ms: u64,
) -> Result<(), Error> {
    let path = VelocityPath::new(
        start,
        end,
        end_velocity,
        duration_ms,
        d.config().event_period_ms,
    )?;
    swipe_along(d, |t| path.position_at(t), duration_ms, &[])
}

/// Moves the mouse to `position` one event period from now.
pub fn mouse_move_to(d: &mut InputDispatcher, position: Point) {
    d.advance_event_time(d.config().event_period_ms);
    d.enqueue_mouse_move(position);
}

/// Clicks `button` at `position`.
pub fn mouse_click(
    d: &mut InputDispatcher,
    position: Point,
    button: MouseButton,
) -> Result<(), Error> {
    d.update_mouse_position(position);
    d.enqueue_mouse_press(button)?;
    d.advance_event_time(SINGLE_CLICK_DELAY_MS);
    d.enqueue_mouse_release(button)
}

/// Clicks `button` twice at `position`.
pub fn mouse_double_click(
    d: &mut InputDispatcher,
    position: Point,
    button: MouseButton,
) -> Result<(), Error> {
    mouse_click(d, position, button)?;
    d.advance_event_time(DOUBLE_CLICK_DELAY_MS);
    mouse_click(d, position, button)
}

/// Presses `button` at `start`, drags in a straight line to `end` and releases.
pub fn mouse_drag_and_drop(
    d: &mut InputDispatcher,
    start: Point,
    end: Point,
    button: MouseButton,
    duration_ms: u64,
) -> Result<(), Error> {
    d.update_mouse_position(start);
    d.enqueue_mouse_press(button)?;
    let steps = step_count(duration_ms, d.config().event_period_ms);
    let mut t = 0;
    for step in 1..=steps {
        let next = duration_ms * step / steps;
        d.advance_event_time(next - t);
        t = next;
        d.enqueue_mouse_move(lerp(start, end, t, duration_ms));
    }
    d.enqueue_mouse_release(button)
}

/// Number of samples for an interval: one per event period, at least one.
fn step_count(duration_ms: u64, period_ms: u64) -> u64 {
    if period_ms == 0 {
        return 1;
    }
    ((duration_ms + period_ms / 2) / period_ms).max(1)
}

fn lerp(start: Point, end: Point, t_ms: u64, duration_ms: u64) -> Point {
    if duration_ms == 0 {
        return end;
    }
    start.lerp(end, t_ms as f64 / duration_ms as f64)
}
