// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selections that may span several independently laid out texts.

use core::fmt;

use crate::TextRange;
use crate::layout::ResolvedTextDirection;

/// Identifier of a selectable text region.
///
/// Ids are handed out by a selection registrar and are unique within it. Zero is reserved as the
/// [`INVALID`](Self::INVALID) sentinel.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectableId(pub u64);

impl SelectableId {
    /// The reserved, never assigned id.
    pub const INVALID: Self = Self(0);

    /// Returns `true` unless this is [`Self::INVALID`].
    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }
}

impl fmt::Debug for SelectableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SelectableId({})", self.0)
    }
}

impl fmt::Display for SelectableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One end of a [`Selection`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnchorInfo {
    /// Direction of the text at the anchor.
    pub direction: ResolvedTextDirection,
    /// Character offset in the text of [`Self::selectable_id`].
    pub offset: usize,
    /// The selectable this anchor lives in.
    pub selectable_id: SelectableId,
}

impl AnchorInfo {
    /// Creates an anchor.
    pub const fn new(
        direction: ResolvedTextDirection,
        offset: usize,
        selectable_id: SelectableId,
    ) -> Self {
        Self {
            direction,
            offset,
            selectable_id,
        }
    }
}

/// A selection between two anchors, possibly in different selectables.
///
/// Selections are values: every update produces a new one.
///
/// `handles_crossed` is set when the start anchor comes after the end anchor in reading order,
/// which happens when a handle is dragged past the other one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Where the selection starts.
    pub start: AnchorInfo,
    /// Where the selection ends.
    pub end: AnchorInfo,
    /// Whether the start anchor comes after the end anchor.
    pub handles_crossed: bool,
}

impl Selection {
    /// Creates a selection.
    pub const fn new(start: AnchorInfo, end: AnchorInfo, handles_crossed: bool) -> Self {
        Self {
            start,
            end,
            handles_crossed,
        }
    }

    /// Extends this selection with a selection from a selectable that comes later in reading order.
    ///
    /// Without crossed handles, the end anchor is taken from `other`; with crossed handles the
    /// start anchor is.
    #[must_use]
    pub fn merge(self, other: Option<Self>) -> Self {
        let Some(other) = other else {
            return self;
        };
        if self.handles_crossed {
            Self {
                start: other.start,
                ..self
            }
        } else {
            Self {
                end: other.end,
                ..self
            }
        }
    }

    /// The pair of anchor offsets.
    ///
    /// Only meaningful when both anchors are in the same selectable.
    pub fn to_text_range(&self) -> TextRange {
        TextRange::new(self.start.offset, self.end.offset)
    }

    /// Returns `true` if both anchors are at the same place.
    pub fn is_collapsed(&self) -> bool {
        self.start.selectable_id == self.end.selectable_id && self.start.offset == self.end.offset
    }

    /// Returns `true` if either anchor lives in `id`.
    pub fn touches(&self, id: SelectableId) -> bool {
        self.start.selectable_id == id || self.end.selectable_id == id
    }
}

/// Merges two optional selections; see [`Selection::merge`].
pub fn merge(lhs: Option<Selection>, rhs: Option<Selection>) -> Option<Selection> {
    match lhs {
        Some(lhs) => Some(lhs.merge(rhs)),
        None => rhs,
    }
}
