// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events delivered to listeners.

use alloc::string::String;

/// An event delivered to a listener [`Tag`](understory_ops::Tag).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Keyboard focus was gained or lost.
    Focus(FocusEvent),
    /// A key was pressed or released.
    Key(KeyEvent),
    /// Text was committed by the platform input method.
    Edit(EditEvent),
    /// The platform clipboard contents arrived.
    Clipboard(ClipboardEvent),
}

/// Sent to a listener when it gains or loses keyboard focus.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FocusEvent {
    /// Whether the listener now holds focus.
    pub focus: bool,
}

/// Whether a key went down or up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    /// The key was pressed.
    Press,
    /// The key was released.
    Release,
}

bitflags::bitflags! {
    /// Modifier keys held during a [`KeyEvent`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// The control key.
        const CTRL    = 0b0000_0001;
        /// The command key (macOS).
        const COMMAND = 0b0000_0010;
        /// The shift key.
        const SHIFT   = 0b0000_0100;
        /// The alt / option key.
        const ALT     = 0b0000_1000;
        /// The super / windows key.
        const SUPER   = 0b0001_0000;
    }
}

impl Modifiers {
    /// The platform's shortcut modifier: [`Modifiers::COMMAND`] on Apple
    /// platforms and [`Modifiers::CTRL`] elsewhere.
    pub const SHORTCUT: Self = if cfg!(any(target_os = "macos", target_os = "ios")) {
        Self::COMMAND
    } else {
        Self::CTRL
    };
}

/// A key press or release, routed to the focused listener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Name of the key, such as `"A"`, `"Enter"` or `"⌫"`.
    pub name: String,
    /// Modifiers held when the key changed state.
    pub modifiers: Modifiers,
    /// Whether the key went down or up.
    pub state: KeyState,
}

/// Text committed by the input method, routed to the focused listener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditEvent {
    /// The committed text.
    pub text: String,
}

/// Platform clipboard contents, broadcast to every pending reader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClipboardEvent {
    /// The clipboard text.
    pub text: String,
}

impl From<FocusEvent> for Event {
    fn from(e: FocusEvent) -> Self {
        Self::Focus(e)
    }
}

impl From<KeyEvent> for Event {
    fn from(e: KeyEvent) -> Self {
        Self::Key(e)
    }
}

impl From<EditEvent> for Event {
    fn from(e: EditEvent) -> Self {
        Self::Edit(e)
    }
}

impl From<ClipboardEvent> for Event {
    fn from(e: ClipboardEvent) -> Self {
        Self::Clipboard(e)
    }
}
