// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quire: text selection primitives.
//!
//! This crate holds the text-side half of selection, independent of any widget tree:
//! - [`TextRange`]: a possibly reversed pair of character offsets.
//! - [`TextLayout`]: the queries selection needs from a laid out text (lines, positions, word
//!   and paragraph boundaries, bidi direction), with [`MonospaceLayout`] as a deterministic
//!   implementation.
//! - [`SelectionAdjustment`]: policies that snap a raw dragged range to characters, words or
//!   paragraphs.
//! - [`Selection`] and [`AnchorInfo`]: a selection whose two ends may live in different
//!   selectable texts, identified by [`SelectableId`].
//! - [`editing::TextSelection`]: keyboard style cursor movement within one text.
//!
//! Multi-text selection (registrar, manager) lives in `quire_flow`; input sequencing lives in
//! `quire_input`.
//!
//! ## Offsets
//!
//! All offsets are counted in Unicode scalar values (`char`s), not bytes. An offset is valid
//! for a text of `len` characters when it lies in `0..=len`.
//!
//! ## Example
//!
//! ```
//! use quire::{MonospaceLayout, SelectionAdjustment, TextRange};
//!
//! let layout = MonospaceLayout::new("hello world");
//! let word = SelectionAdjustment::Word.adjust(&layout, TextRange::new(7, 7), None, None, false);
//! assert_eq!(word, TextRange::new(6, 11));
//! ```

extern crate alloc;

mod adjustment;
mod layout;
mod monospace;
mod range;
mod segment;
mod selection;

pub mod editing;

pub use adjustment::{SelectionAdjustment, ensure_at_least_one_char};
pub use layout::{ResolvedTextDirection, TextLayout, line_range_at, selection_handle_position};
pub use monospace::{MonospaceLayout, MonospaceMetrics};
pub use range::{TextRange, char_len, char_slice};
pub use segment::{WordBoundaries, paragraph_boundary};
pub use selection::{AnchorInfo, SelectableId, Selection, merge};

pub use peniko::kurbo;
