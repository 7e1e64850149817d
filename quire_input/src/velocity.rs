// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Straight swipes that end at a requested velocity.

use peniko::kurbo::{Point, Vec2};

use crate::error::{Error, ErrorKind, VelocitySuggestions};

/// Longest final segment moving at the requested velocity.
const VELOCITY_WINDOW_MS: f64 = 100.0;

/// A straight path from `start` to `end` whose last stretch moves at a fixed velocity.
///
/// The final `h = min(100, duration / 2)` milliseconds move at the requested end velocity; the
/// rest of the distance is covered at constant speed before that.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityPath {
    start: Point,
    direction: Vec2,
    distance: f64,
    end_velocity: f64,
    duration_ms: u64,
    window_ms: f64,
}

impl VelocityPath {
    /// Finds a path from `start` to `end` taking `duration_ms` and ending at `end_velocity`
    /// pixels per second.
    ///
    /// `duration_ms` must be at least two and a half event periods, so the velocity window holds
    /// enough samples.
    pub fn new(
        start: Point,
        end: Point,
        end_velocity: f64,
        duration_ms: u64,
        event_period_ms: u64,
    ) -> Result<Self, Error> {
        let min_duration = (event_period_ms * 5).div_ceil(2);
        if duration_ms < min_duration {
            return Err(Error::duration(ErrorKind::InvalidDuration, duration_ms));
        }
        if end_velocity < 0.0 {
            return Err(Error::new(ErrorKind::NegativeVelocity));
        }
        let delta = end - start;
        let distance = delta.hypot();
        let window_ms = VELOCITY_WINDOW_MS.min(duration_ms as f64 / 2.0);
        let window_distance = end_velocity * window_ms / 1000.0;
        if window_distance > distance {
            return Err(Error::unreachable_velocity(VelocitySuggestions {
                max_duration_ms: max_duration(distance, end_velocity),
                max_velocity: distance * 1000.0 / window_ms,
                min_distance: window_distance,
            }));
        }
        let direction = if distance > 0.0 {
            delta / distance
        } else {
            Vec2::ZERO
        };
        Ok(Self {
            start,
            direction,
            distance,
            end_velocity,
            duration_ms,
            window_ms,
        })
    }

    /// Total duration of the path.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Position at `t_ms`, clamped to the duration.
    ///
    /// A path of zero duration is at its end from the start.
    pub fn position_at(&self, t_ms: u64) -> Point {
        if self.duration_ms == 0 {
            return self.start + self.direction * self.distance;
        }
        let (t, total) = (t_ms.min(self.duration_ms) as f64, self.duration_ms as f64);
        let window_start = total - self.window_ms;
        let lead_distance = self.distance - self.end_velocity * self.window_ms / 1000.0;
        let travelled = if t <= window_start {
            lead_distance * t / window_start
        } else {
            lead_distance + self.end_velocity * (t - window_start) / 1000.0
        };
        self.start + self.direction * travelled
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "the value is floored, non-negative and small"
)]
fn max_duration(distance: f64, velocity: f64) -> u64 {
    if velocity <= 0.0 {
        return u64::MAX;
    }
    (2000.0 * distance / velocity).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_window_moves_at_velocity() {
        let path =
            VelocityPath::new(Point::ZERO, Point::new(500.0, 0.0), 1000.0, 400, 16).unwrap();
        assert_eq!(path.position_at(0), Point::ZERO);
        assert_eq!(path.position_at(400), Point::new(500.0, 0.0));
        // 100 ms at 1000 px/s.
        assert!((path.position_at(300).x - 400.0).abs() < 1e-9);
        assert!((path.position_at(350).x - 450.0).abs() < 1e-9);
    }

    #[test]
    fn short_duration_halves_the_window() {
        let path = VelocityPath::new(Point::ZERO, Point::new(0.0, 100.0), 500.0, 80, 16).unwrap();
        // Window is 40 ms, covering 20 px.
        assert!((path.position_at(40).y - 80.0).abs() < 1e-9);
    }

    #[test]
    fn zero_duration_jumps_to_the_end() {
        let path = VelocityPath::new(Point::ZERO, Point::new(30.0, 40.0), 0.0, 0, 0).unwrap();
        assert_eq!(path.position_at(0), Point::new(30.0, 40.0));
        assert_eq!(path.position_at(10), Point::new(30.0, 40.0));
    }

        #[test]
    fn unreachable_velocity_suggests_fixes() {
        let err = VelocityPath::new(Point::ZERO, Point::new(50.0, 0.0), 1000.0, 400, 16)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnreachableVelocity);
        let suggestions = err.suggestions().unwrap();
        assert_eq!(suggestions.max_duration_ms, 100);
        assert!((suggestions.max_velocity - 500.0).abs() < 1e-9);
        assert!((suggestions.min_distance - 100.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_arguments() {
        let err = VelocityPath::new(Point::ZERO, Point::new(50.0, 0.0), 10.0, 39, 16).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDuration);
        let err = VelocityPath::new(Point::ZERO, Point::new(50.0, 0.0), -1.0, 40, 16).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NegativeVelocity);
    }
}
