// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `quire_flow`: one selection across many independently laid out texts.
//!
//! - [`Selectable`]: what the manager needs from a piece of text. [`MultiWidgetSelectionDelegate`]
//!   implements it over any [`quire::TextLayout`].
//! - [`SelectionRegistrar`]: the selectables of one container, their reading order and their
//!   subselections. Selectables report to it; it queues [`RegistrarEvent`]s.
//! - [`SelectionManager`]: owns the selection, merges per-selectable results in reading order and
//!   keeps handle positions, the toolbar and the clipboard in sync.
//! - [`gestures`]: long press, handle and mouse gestures that drive the manager.
//!
//! ## Coordinates
//!
//! Every selectable and the container have their own [`LayoutCoordinates`]. The manager works in
//! container coordinates; selectables answer in their own local space. Input events carry root
//! coordinates.
//!
//! ## Reading order
//!
//! Selectables are ordered top to bottom, then left to right, by the position of their origin in
//! the container. A selection from one handle to the other covers the end of the first selectable
//! it touches, every selectable in between and the start of the last one.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use quire::kurbo::{Point, Size};
//! use quire::{MonospaceLayout, SelectionAdjustment, TextLayout};
//! use quire_flow::{
//!     MultiWidgetSelectionDelegate, PlacedCoordinates, SelectionManager, SelectionRegistrar,
//! };
//!
//! let registrar = Rc::new(RefCell::new(SelectionRegistrar::new()));
//! let mut y = 0.0;
//! for text in ["first paragraph", "second one"] {
//!     let id = registrar.borrow_mut().next_selectable_id();
//!     let layout = MonospaceLayout::new(text);
//!     let size = layout.size();
//!     let coordinates = Rc::new(PlacedCoordinates::new(Point::new(0.0, y), size));
//!     y += size.height;
//!     let delegate = MultiWidgetSelectionDelegate::with_layout(id, layout, coordinates);
//!     registrar.borrow_mut().subscribe(Rc::new(delegate));
//! }
//!
//! let mut manager = SelectionManager::new(registrar);
//! let container = PlacedCoordinates::new(Point::ZERO, Size::new(400.0, 400.0));
//! manager.set_container_coordinates(Some(Rc::new(container)));
//!
//! // Select "paragraph", then drag the end handle into the second text.
//! manager.start_selection(Point::new(70.0, 10.0), false, SelectionAdjustment::Word);
//! manager.update_selection(
//!     Some(Point::new(60.0, 30.0)),
//!     Some(Point::new(70.0, 10.0)),
//!     false,
//!     SelectionAdjustment::None,
//! );
//! assert_eq!(manager.selected_text().as_deref(), Some("paragraphsecond"));
//! ```

extern crate alloc;

mod coordinates;
mod delegate;
mod manager;
mod mode;
mod platform;
mod registrar;
mod selectable;

pub mod gestures;

pub use coordinates::{LayoutCoordinates, PlacedCoordinates};
pub use delegate::MultiWidgetSelectionDelegate;
pub use manager::{HANDLE_HEIGHT, Handle, SelectionManager, is_copy_key_event};
pub use mode::SelectionMode;
pub use platform::{Clipboard, HapticFeedback, HapticFeedbackType, TextToolbar, TextToolbarStatus};
pub use registrar::{RegistrarEvent, SelectionRegistrar};
pub use selectable::{Selectable, SelectionQuery};
