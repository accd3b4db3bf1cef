// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clipboard request coalescing.
//!
//! Reads are deduplicated per listener and issued to the host at most once while
//! in flight; the contents, once delivered, go to every waiting listener exactly
//! once. Writes are coalesced: the last one declared before the host drains it
//! wins.

use alloc::string::String;
use alloc::sync::Arc;

use hashbrown::HashSet;
use understory_ops::{OpKind, Ops, ReadClipboardOp, Reader, Tag, WriteClipboardOp};

use crate::event::Event;
use crate::handler_events::HandlerEvents;

/// Cross-frame clipboard routing state.
#[derive(Debug, Default)]
pub(crate) struct ClipboardQueue {
    receivers: HashSet<Tag>,
    /// A read was handed to the host and has not been answered yet.
    requested: bool,
    text: Option<Arc<str>>,
}

impl ClipboardQueue {
    /// Drain the text waiting to be written to the platform clipboard.
    pub(crate) fn write_clipboard(&mut self) -> Option<String> {
        self.text.take().map(|text| String::from(&*text))
    }

    /// Reports whether the host should read the platform clipboard now.
    ///
    /// Returns `true` once per outstanding request, then `false` until a new
    /// listener starts waiting.
    pub(crate) fn read_clipboard(&mut self) -> bool {
        if self.receivers.is_empty() || self.requested {
            return false;
        }
        self.requested = true;
        true
    }

    /// Forget that a read is in flight, so the next call to
    /// [`read_clipboard`](Self::read_clipboard) asks again.
    pub(crate) fn cancel_request(&mut self) {
        self.requested = false;
    }

    /// Number of listeners waiting for clipboard contents.
    pub(crate) fn pending_readers(&self) -> usize {
        self.receivers.len()
    }

    /// Collect clipboard requests declared in `root`.
    pub(crate) fn frame(&mut self, root: &Ops) {
        for op in Reader::new(root) {
            match op.kind {
                OpKind::ReadClipboard => self.process_read(ReadClipboardOp::decode(&op)),
                OpKind::WriteClipboard => self.process_write(WriteClipboardOp::decode(&op)),
                _ => {}
            }
        }
    }

    /// Deliver clipboard contents to every waiting listener.
    pub(crate) fn push(&mut self, event: Event, events: &mut HandlerEvents) {
        tracing::debug!(receivers = self.receivers.len(), "broadcasting clipboard contents");
        for tag in self.receivers.drain() {
            events.add(tag, event.clone());
        }
        self.requested = false;
    }

    fn process_read(&mut self, op: ReadClipboardOp) {
        if self.receivers.insert(op.tag) {
            tracing::debug!(tag = ?op.tag, "new clipboard reader");
            self.requested = false;
        }
    }

    fn process_write(&mut self, op: WriteClipboardOp) {
        self.text = Some(op.text);
    }
}
