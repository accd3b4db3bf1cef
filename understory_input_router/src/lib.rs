// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_input_router --heading-base-level=0

//! Understory Input Router: per-frame event routing over an immediate-mode op stream.
//!
//! ## Overview
//!
//! An immediate-mode UI keeps no widget tree between frames. Instead, every frame
//! re-declares its listeners in an [`understory_ops::Ops`] buffer, and this crate
//! works out from that buffer alone who holds keyboard focus, who waits for the
//! clipboard, and who should receive each platform event.
//!
//! The [`Router`] owns one queue per input domain:
//!
//! - **Keyboard**: picks at most one focused listener among the declared
//!   [`KeyInputOp`](understory_ops::KeyInputOp)s, honoring
//!   [`FocusOp`](understory_ops::FocusOp) requests, and resolves the soft
//!   keyboard directive ([`TextInputState`]). Key and edit events go to the
//!   focused listener.
//! - **Clipboard**: deduplicates [`ReadClipboardOp`](understory_ops::ReadClipboardOp)
//!   requests, asks the host to read the platform clipboard once per outstanding
//!   request, and broadcasts the contents to every waiting listener exactly once.
//!   [`WriteClipboardOp`](understory_ops::WriteClipboardOp)s are coalesced; the
//!   last one wins.
//!
//! ## Workflow
//!
//! 1) Build the frame's [`Ops`](understory_ops::Ops) and call [`Router::frame`].
//! 2) Service requests: [`Router::text_input_state`], [`Router::read_clipboard`],
//!    [`Router::write_clipboard`] (or [`Router::service_clipboard`] with a
//!    [`Clipboard`] implementation), and [`Router::wakeup_time`].
//! 3) Feed platform events with [`Router::add`].
//! 4) Each listener drains its events with [`Router::events`].
//!
//! ```
//! use understory_input_router::{Event, FocusEvent, Router, TextInputState};
//! use understory_ops::{FocusOp, KeyInputOp, Ops, SoftKeyboardOp, Tag};
//!
//! let (name, email) = (Tag::new(), Tag::new());
//! let mut router = Router::new();
//! let mut ops = Ops::new();
//!
//! ops.push();
//! KeyInputOp { tag: name }.add(&mut ops);
//! ops.pop();
//! ops.push();
//! KeyInputOp { tag: email }.add(&mut ops);
//! FocusOp { focus: true }.add(&mut ops);
//! SoftKeyboardOp { show: true }.add(&mut ops);
//! ops.pop();
//!
//! router.frame(&ops);
//! assert_eq!(router.focus(), Some(email));
//! assert_eq!(router.text_input_state(), TextInputState::Open);
//! assert_eq!(router.events(email), [Event::Focus(FocusEvent { focus: true })]);
//! assert!(router.events(name).is_empty());
//! ```
//!
//! ## Errors
//!
//! Malformed op buffers are programming errors and panic. Platform failures are
//! reported to the host as [`ClipboardError`] and never enter the queues.
//! Events for which no listener is waiting are dropped silently.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies and the
//!   lock-protected [`SharedRouter`] for hosts that deliver events from other threads.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod clipboard;
mod event;
mod handler_events;
mod key;
mod platform;
mod router;
#[cfg(feature = "std")]
mod shared;

pub use event::{ClipboardEvent, EditEvent, Event, FocusEvent, KeyEvent, KeyState, Modifiers};
pub use key::TextInputState;
pub use platform::{Clipboard, ClipboardError, MemoryClipboard};
pub use router::Router;
#[cfg(feature = "std")]
pub use shared::SharedRouter;
