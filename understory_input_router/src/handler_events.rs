// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame event accumulator keyed by listener.

use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;
use understory_ops::Tag;

use crate::event::Event;

/// Events waiting to be picked up, per listener, in arrival order.
#[derive(Debug, Default)]
pub(crate) struct HandlerEvents {
    handlers: HashMap<Tag, SmallVec<[Event; 2]>>,
}

impl HandlerEvents {
    /// Queue `event` for `tag`.
    pub(crate) fn add(&mut self, tag: Tag, event: Event) {
        self.handlers.entry(tag).or_default().push(event);
    }

    /// Remove and return the events queued for `tag`.
    pub(crate) fn take(&mut self, tag: Tag) -> Vec<Event> {
        self.handlers
            .remove(&tag)
            .map(SmallVec::into_vec)
            .unwrap_or_default()
    }

    /// Drop everything that was not picked up.
    pub(crate) fn clear(&mut self) {
        self.handlers.clear();
    }

    #[cfg(test)]
    pub(crate) fn pending(&self, tag: Tag) -> &[Event] {
        self.handlers
            .get(&tag)
            .map(|events| events.as_slice())
            .unwrap_or(&[])
    }
}
