// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timing and distance thresholds.

/// Gesture recognition thresholds.
///
/// Times are in milliseconds of simulated event time; distances in root pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfiguration {
    /// Time a pointer must stay down, without moving beyond [`Self::touch_slop`], to count
    /// as a long press.
    pub long_press_timeout_ms: u64,
    /// Maximum time between the first up and the second down of a double tap.
    pub double_tap_timeout_ms: u64,
    /// Minimum time between the first up and the second down of a double tap.
    pub double_tap_min_time_ms: u64,
    /// Distance a pointer may move before a press turns into a drag.
    pub touch_slop: f64,
}

impl ViewConfiguration {
    /// Default long press timeout.
    pub const LONG_PRESS_TIMEOUT_MS: u64 = 400;
    /// Default double tap timeout.
    pub const DOUBLE_TAP_TIMEOUT_MS: u64 = 300;
    /// Default minimum double tap delay.
    pub const DOUBLE_TAP_MIN_TIME_MS: u64 = 40;
    /// Default touch slop.
    pub const TOUCH_SLOP: f64 = 18.0;
}

impl Default for ViewConfiguration {
    fn default() -> Self {
        Self {
            long_press_timeout_ms: Self::LONG_PRESS_TIMEOUT_MS,
            double_tap_timeout_ms: Self::DOUBLE_TAP_TIMEOUT_MS,
            double_tap_min_time_ms: Self::DOUBLE_TAP_MIN_TIME_MS,
            touch_slop: Self::TOUCH_SLOP,
        }
    }
}

/// Settings of an [`InputDispatcher`](crate::InputDispatcher).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DispatcherConfig {
    /// Default time between two generated events.
    pub event_period_ms: u64,
    /// Delay before a held key first repeats.
    pub initial_repeat_delay_ms: u64,
    /// Delay between subsequent key repeats.
    pub subsequent_repeat_delay_ms: u64,
    /// Whether held keys repeat at all.
    pub key_repeat_enabled: bool,
    /// Thresholds used by the gesture helpers.
    pub view: ViewConfiguration,
}

impl DispatcherConfig {
    /// Default event period.
    pub const EVENT_PERIOD_MS: u64 = 16;
    /// Default initial key repeat delay.
    pub const INITIAL_REPEAT_DELAY_MS: u64 = 500;
    /// Default subsequent key repeat delay.
    pub const SUBSEQUENT_REPEAT_DELAY_MS: u64 = 50;
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            event_period_ms: Self::EVENT_PERIOD_MS,
            initial_repeat_delay_ms: Self::INITIAL_REPEAT_DELAY_MS,
            subsequent_repeat_delay_ms: Self::SUBSEQUENT_REPEAT_DELAY_MS,
            key_repeat_enabled: true,
            view: ViewConfiguration::default(),
        }
    }
}
