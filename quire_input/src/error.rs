// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use peniko::kurbo::Point;

use crate::event::{Key, MouseButton, PointerId};

/// Error type for input dispatching and gesture generation.
///
/// Carries a non-exhaustive [`ErrorKind`] plus what the failed call was about: a pointer, a
/// button, a key or a position. Velocity errors additionally carry [`VelocitySuggestions`].
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    subject: Option<Subject>,
    suggestions: Option<VelocitySuggestions>,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// What the failed call was about, if anything in particular.
    pub fn subject(&self) -> Option<Subject> {
        self.subject
    }

    /// Ways to make an unreachable swipe velocity reachable.
    pub fn suggestions(&self) -> Option<VelocitySuggestions> {
        self.suggestions
    }

    pub(crate) fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            subject: None,
            suggestions: None,
        }
    }

    pub(crate) fn pointer(kind: ErrorKind, id: PointerId) -> Self {
        Self {
            subject: Some(Subject::Pointer(id)),
            ..Self::new(kind)
        }
    }

    pub(crate) fn button(kind: ErrorKind, button: MouseButton) -> Self {
        Self {
            subject: Some(Subject::Button(button)),
            ..Self::new(kind)
        }
    }

    pub(crate) fn key(kind: ErrorKind, key: Key) -> Self {
        Self {
            subject: Some(Subject::Key(key)),
            ..Self::new(kind)
        }
    }

    pub(crate) fn position(kind: ErrorKind, position: Point) -> Self {
        Self {
            subject: Some(Subject::Position(position)),
            ..Self::new(kind)
        }
    }

    pub(crate) fn duration(kind: ErrorKind, duration_ms: u64) -> Self {
        Self {
            subject: Some(Subject::Duration(duration_ms)),
            ..Self::new(kind)
        }
    }

    pub(crate) fn unreachable_velocity(suggestions: VelocitySuggestions) -> Self {
        Self {
            suggestions: Some(suggestions),
            ..Self::new(ErrorKind::UnreachableVelocity)
        }
    }
}

/// The thing an [`Error`] is about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Subject {
    /// A touch pointer.
    Pointer(PointerId),
    /// A mouse button.
    Button(MouseButton),
    /// A key.
    Key(Key),
    /// A position, in root coordinates.
    Position(Point),
    /// A duration, in milliseconds.
    Duration(u64),
}

/// Three independent ways to make a requested swipe feasible.
///
/// Applying any one of them, with the other two parameters unchanged, yields a swipe that can be
/// generated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocitySuggestions {
    /// Largest duration that works, in milliseconds.
    pub max_duration_ms: u64,
    /// Largest end velocity that works, in pixels per second.
    pub max_velocity: f64,
    /// Smallest distance that works, in pixels.
    pub min_distance: f64,
}

/// Categories of [`Error`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A touch down was sent for a pointer that is already down.
    PointerAlreadyDown,
    /// A touch call referred to a pointer that is not down.
    PointerNotDown,
    /// A touch move, up or cancel was sent with no touch gesture in progress.
    NoGestureInProgress,
    /// A mouse press was sent for a button that is already pressed.
    ButtonAlreadyPressed,
    /// A mouse release was sent for a button that is not pressed.
    ButtonNotPressed,
    /// A mouse cancel was sent with no buttons pressed.
    NoButtonsPressed,
    /// A mouse gesture was started outside the root bounds.
    OutOfBounds,
    /// A hover enter was sent while already hovering.
    AlreadyHovering,
    /// A hover exit was sent while not hovering.
    NotHovering,
    /// A hover enter was sent while buttons are pressed.
    ButtonsPressed,
    /// A mouse release was sent while a touch gesture is in progress.
    TouchInProgress,
    /// A key down was sent for a key that is already down.
    KeyAlreadyDown,
    /// A key up was sent for a key that is not down.
    KeyNotDown,
    /// Historical touch samples were malformed.
    InvalidHistory,
    /// A gesture duration was outside its allowed range.
    InvalidDuration,
    /// Key times of a multi-pointer swipe were unsorted or out of range.
    InvalidKeyTimes,
    /// A negative velocity was requested.
    NegativeVelocity,
    /// A swipe could not reach the requested end velocity.
    UnreachableVelocity,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::PointerAlreadyDown => {
                f.write_str("cannot send DOWN event, a gesture is already in progress for pointer")?;
            }
            ErrorKind::PointerNotDown => {
                f.write_str("pointer is not active in the current gesture")?;
            }
            ErrorKind::NoGestureInProgress => f.write_str("no touch gesture is in progress")?,
            ErrorKind::ButtonAlreadyPressed => f.write_str("mouse button is already pressed")?,
            ErrorKind::ButtonNotPressed => f.write_str("mouse button is not pressed")?,
            ErrorKind::NoButtonsPressed => f.write_str("no mouse buttons are pressed")?,
            ErrorKind::OutOfBounds => {
                f.write_str("cannot start a mouse gesture outside the root bounds")?;
            }
            ErrorKind::AlreadyHovering => f.write_str("mouse is already hovering")?,
            ErrorKind::NotHovering => f.write_str("mouse is not hovering")?,
            ErrorKind::ButtonsPressed => {
                f.write_str("cannot send hover enter while mouse buttons are down")?;
            }
            ErrorKind::TouchInProgress => {
                f.write_str("touch gesture can't be in progress while mouse buttons are down")?;
            }
            ErrorKind::KeyAlreadyDown => f.write_str("key is already pressed down")?,
            ErrorKind::KeyNotDown => f.write_str("key is not pressed down")?,
            ErrorKind::InvalidHistory => {
                f.write_str(
                    "historical samples need strictly increasing, non-positive relative times \
                     and one position per active pointer",
                )?;
            }
            ErrorKind::InvalidDuration => f.write_str("gesture duration is out of range")?,
            ErrorKind::InvalidKeyTimes => {
                f.write_str("key times must be sorted and lie within the swipe duration")?;
            }
            ErrorKind::NegativeVelocity => f.write_str("velocity cannot be negative")?,
            ErrorKind::UnreachableVelocity => {
                f.write_str("unable to generate a swipe with the requested end velocity")?;
            }
        }
        match self.subject {
            Some(Subject::Pointer(id)) => write!(f, " (pointer {id})")?,
            Some(Subject::Button(button)) => write!(f, " (button {button})")?,
            Some(Subject::Key(key)) => write!(f, " ({key})")?,
            Some(Subject::Position(p)) => write!(f, " (position ({}, {}))", p.x, p.y)?,
            Some(Subject::Duration(ms)) => write!(f, " (duration {ms}ms)")?,
            None => {}
        }
        if let Some(s) = self.suggestions {
            write!(
                f,
                "; either reduce the duration to {}ms or less, reduce the velocity to {:.2}px/s \
                 or less, or increase the distance to {:.2}px or more",
                s.max_duration_ms, s.max_velocity, s.min_distance
            )?;
        }
        Ok(())
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_names_the_subject() {
        let err = Error::pointer(ErrorKind::PointerAlreadyDown, PointerId(3));
        assert_eq!(err.kind(), ErrorKind::PointerAlreadyDown);
        assert!(err.to_string().ends_with("(pointer 3)"), "{err}");
    }

    #[test]
    fn velocity_error_lists_remediations() {
        let err = Error::unreachable_velocity(VelocitySuggestions {
            max_duration_ms: 40,
            max_velocity: 500.0,
            min_distance: 100.0,
        });
        let message = err.to_string();
        assert!(message.contains("reduce the duration to 40ms"), "{message}");
        assert!(message.contains("reduce the velocity to 500.00px/s"), "{message}");
        assert!(message.contains("increase the distance to 100.00px"), "{message}");
    }
}
