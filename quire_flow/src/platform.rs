// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform services used by the selection manager.

use alloc::string::String;

use quire::kurbo::Rect;

/// Plain text clipboard.
pub trait Clipboard {
    /// Replaces the clipboard contents.
    fn set_text(&mut self, text: String);

    /// The current contents, if they are text.
    fn text(&self) -> Option<String>;
}

/// Whether the floating text toolbar is visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextToolbarStatus {
    /// Visible.
    Shown,
    /// Not visible.
    #[default]
    Hidden,
}

/// The floating toolbar offering actions on the selection.
///
/// The only action the selection manager offers is copy; hosts route it to
/// [`SelectionManager::on_toolbar_copy`].
///
/// [`SelectionManager::on_toolbar_copy`]: crate::SelectionManager::on_toolbar_copy
pub trait TextToolbar {
    /// Shows the toolbar next to `rect`, in root coordinates.
    fn show_menu(&mut self, rect: Rect);

    /// Hides the toolbar.
    fn hide(&mut self);

    /// Current visibility.
    fn status(&self) -> TextToolbarStatus;
}

/// Kinds of haptic feedback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HapticFeedbackType {
    /// A selection handle moved to a new position.
    TextHandleMove,
    /// A long press was recognised.
    LongPress,
}

/// Haptic feedback.
pub trait HapticFeedback {
    /// Performs feedback of the given kind.
    fn perform(&mut self, kind: HapticFeedbackType);
}
