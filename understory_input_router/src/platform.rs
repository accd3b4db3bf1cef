// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The platform side of clipboard I/O.
//!
//! The router never talks to the operating system. It only reports what should
//! be read or written ([`Router::read_clipboard`], [`Router::write_clipboard`]).
//! Hosts with a synchronous clipboard can implement [`Clipboard`] and let
//! [`Router::service_clipboard`] do the bookkeeping; hosts with asynchronous
//! clipboards call the router directly and [`Router::add`] the contents once
//! they arrive.
//!
//! [`Router::read_clipboard`]: crate::Router::read_clipboard
//! [`Router::write_clipboard`]: crate::Router::write_clipboard
//! [`Router::service_clipboard`]: crate::Router::service_clipboard
//! [`Router::add`]: crate::Router::add

use alloc::string::String;

/// Failure reported by a platform clipboard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    /// No clipboard is available, for example on a headless session.
    #[error("clipboard unavailable")]
    Unavailable,
    /// The platform refused access.
    #[error("clipboard access denied")]
    PermissionDenied,
    /// Any other platform failure.
    #[error("clipboard error: {0}")]
    Other(String),
}

/// A synchronous platform clipboard.
pub trait Clipboard {
    /// Read the clipboard as text.
    fn read(&mut self) -> Result<String, ClipboardError>;

    /// Replace the clipboard contents with `text`.
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// An in-process clipboard, for tests and headless hosts.
///
/// ```
/// use understory_input_router::{Clipboard, MemoryClipboard};
///
/// let mut clip = MemoryClipboard::default();
/// clip.write("copied").unwrap();
/// assert_eq!(clip.read().unwrap(), "copied");
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    /// Current contents.
    pub text: String,
}

impl Clipboard for MemoryClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        Ok(self.text.clone())
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.text.clear();
        self.text.push_str(text);
        Ok(())
    }
}
