// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Owns one queue per input domain and the event sink they deliver into.
//! [`Router::frame`] runs every queue's resolution pass over the same op
//! buffer; queues never observe each other's state.
//!
//! ## Event lifetime
//!
//! Events queued for a listener stay available until the host drains them with
//! [`Router::events`] or the next call to [`Router::frame`], which discards
//! whatever was not picked up.

use alloc::string::String;
use alloc::vec::Vec;

use understory_ops::{InvalidateOp, OpKind, Ops, Reader, Tag};

use crate::clipboard::ClipboardQueue;
use crate::event::{ClipboardEvent, Event};
use crate::handler_events::HandlerEvents;
use crate::key::{KeyQueue, TextInputState};
use crate::platform::{Clipboard, ClipboardError};

/// Routes platform events to the listeners declared in each frame's op stream.
///
/// ## Usage
///
/// - Build an [`Ops`] buffer every frame and pass it to [`Router::frame`].
/// - Read the resulting requests: [`Router::text_input_state`],
///   [`Router::read_clipboard`], [`Router::write_clipboard`] and
///   [`Router::wakeup_time`].
/// - Feed platform events with [`Router::add`] as they arrive.
/// - Let each listener drain its events with [`Router::events`].
///
/// ```
/// use understory_input_router::{ClipboardEvent, Event, Router};
/// use understory_ops::{Ops, ReadClipboardOp, Tag};
///
/// let paste = Tag::new();
/// let mut router = Router::new();
/// let mut ops = Ops::new();
/// ReadClipboardOp { tag: paste }.add(&mut ops);
/// router.frame(&ops);
///
/// assert!(router.read_clipboard());
/// router.add(ClipboardEvent { text: "hi".into() });
/// assert_eq!(
///     router.events(paste),
///     [Event::Clipboard(ClipboardEvent { text: "hi".into() })]
/// );
/// ```
///
/// The router is single-threaded. Use [`SharedRouter`](crate::SharedRouter)
/// when events arrive on other threads.
#[derive(Debug, Default)]
pub struct Router {
    handlers: HandlerEvents,
    key: KeyQueue,
    clipboard: ClipboardQueue,
    wakeup: Option<u64>,
}

impl Router {
    /// Create a router with no listeners and nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a new frame against `root`.
    ///
    /// Events not drained since the previous frame are dropped.
    pub fn frame(&mut self, root: &Ops) {
        self.handlers.clear();
        self.key.frame(root, &mut self.handlers);
        self.clipboard.frame(root);
        self.wakeup = Self::scan_invalidate(root);
    }

    /// Deliver a platform event to the listeners interested in it.
    ///
    /// Key and edit events go to the focused listener, clipboard contents go
    /// to every pending reader. Events nobody listens for are dropped.
    pub fn add(&mut self, event: impl Into<Event>) {
        let event = event.into();
        match event {
            Event::Key(_) | Event::Edit(_) => self.key.push(event, &mut self.handlers),
            Event::Clipboard(_) => self.clipboard.push(event, &mut self.handlers),
            Event::Focus(_) => {
                tracing::trace!(?event, "focus events are produced by the router, ignoring");
            }
        }
    }

    /// Remove and return the events delivered to `tag`, in arrival order.
    pub fn events(&mut self, tag: Tag) -> Vec<Event> {
        self.handlers.take(tag)
    }

    /// The soft keyboard directive resolved by the last frame.
    pub fn text_input_state(&self) -> TextInputState {
        self.key.input_state()
    }

    /// The listener holding keyboard focus.
    pub fn focus(&self) -> Option<Tag> {
        self.key.focus()
    }

    /// Reports whether the host should read the platform clipboard.
    ///
    /// Returns `true` at most once per outstanding request: repeated calls
    /// return `false` while the read is in flight, until the contents are
    /// [added](Self::add) or a new listener asks for them.
    pub fn read_clipboard(&mut self) -> bool {
        self.clipboard.read_clipboard()
    }

    /// Take the text to write to the platform clipboard, if any.
    ///
    /// Each write is handed out once.
    pub fn write_clipboard(&mut self) -> Option<String> {
        self.clipboard.write_clipboard()
    }

    /// Number of listeners waiting for clipboard contents.
    pub fn pending_readers(&self) -> usize {
        self.clipboard.pending_readers()
    }

    /// Earliest redraw requested by the last frame, in nanoseconds.
    ///
    /// `Some(0)` asks for a redraw as soon as possible; `None` means no redraw
    /// was requested.
    pub fn wakeup_time(&self) -> Option<u64> {
        self.wakeup
    }

    /// Perform pending clipboard I/O against a synchronous platform clipboard.
    ///
    /// A pending write is handed to the platform first, then a pending read is
    /// performed and its contents delivered to the waiting listeners. On a
    /// failed read the request stays outstanding and is issued again on the
    /// next call. The first failure is returned.
    pub fn service_clipboard<C: Clipboard + ?Sized>(
        &mut self,
        platform: &mut C,
    ) -> Result<(), ClipboardError> {
        let mut result = Ok(());
        if let Some(text) = self.write_clipboard()
            && let Err(err) = platform.write(&text)
        {
            tracing::warn!(%err, "failed to write the platform clipboard");
            result = Err(err);
        }
        if self.read_clipboard() {
            match platform.read() {
                Ok(text) => self.add(ClipboardEvent { text }),
                Err(err) => {
                    tracing::warn!(%err, "failed to read the platform clipboard");
                    self.clipboard.cancel_request();
                    result = result.and(Err(err));
                }
            }
        }
        result
    }

    fn scan_invalidate(root: &Ops) -> Option<u64> {
        Reader::new(root)
            .filter(|op| op.kind == OpKind::Invalidate)
            .map(|op| InvalidateOp::decode(&op).at.unwrap_or(0))
            .min()
    }
}
