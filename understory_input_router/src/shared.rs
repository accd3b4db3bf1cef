// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Router`] that can be shared between the frame loop and platform threads.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::{Mutex, MutexGuard, PoisonError};

use understory_ops::{Ops, Tag};

use crate::event::Event;
use crate::key::TextInputState;
use crate::platform::{Clipboard, ClipboardError};
use crate::router::Router;

/// Cloneable handle to a [`Router`] behind a single lock.
///
/// Frame resolution and event delivery mutate the same queues, so every
/// operation takes the lock for its whole duration. Platform callbacks can
/// [`add`](Self::add) events from any thread while the UI thread calls
/// [`frame`](Self::frame).
///
/// ```
/// use std::thread;
/// use understory_input_router::{ClipboardEvent, SharedRouter};
/// use understory_ops::{Ops, ReadClipboardOp, Tag};
///
/// let router = SharedRouter::default();
/// let tag = Tag::new();
/// let mut ops = Ops::new();
/// ReadClipboardOp { tag }.add(&mut ops);
/// router.frame(&ops);
/// assert!(router.read_clipboard());
///
/// let platform = router.clone();
/// thread::spawn(move || platform.add(ClipboardEvent { text: "pasted".into() }))
///     .join()
///     .unwrap();
/// assert_eq!(router.events(tag).len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedRouter {
    inner: Arc<Mutex<Router>>,
}

impl SharedRouter {
    /// Wrap `router`.
    pub fn new(router: Router) -> Self {
        Self {
            inner: Arc::new(Mutex::new(router)),
        }
    }

    /// Run `f` with exclusive access to the router.
    pub fn with<R>(&self, f: impl FnOnce(&mut Router) -> R) -> R {
        f(&mut self.lock())
    }

    /// See [`Router::frame`].
    pub fn frame(&self, root: &Ops) {
        self.lock().frame(root);
    }

    /// See [`Router::add`].
    pub fn add(&self, event: impl Into<Event>) {
        self.lock().add(event);
    }

    /// See [`Router::events`].
    pub fn events(&self, tag: Tag) -> Vec<Event> {
        self.lock().events(tag)
    }

    /// See [`Router::text_input_state`].
    pub fn text_input_state(&self) -> TextInputState {
        self.lock().text_input_state()
    }

    /// See [`Router::focus`].
    pub fn focus(&self) -> Option<Tag> {
        self.lock().focus()
    }

    /// See [`Router::read_clipboard`].
    pub fn read_clipboard(&self) -> bool {
        self.lock().read_clipboard()
    }

    /// See [`Router::write_clipboard`].
    pub fn write_clipboard(&self) -> Option<String> {
        self.lock().write_clipboard()
    }

    /// See [`Router::wakeup_time`].
    pub fn wakeup_time(&self) -> Option<u64> {
        self.lock().wakeup_time()
    }

    /// See [`Router::service_clipboard`].
    pub fn service_clipboard<C: Clipboard + ?Sized>(
        &self,
        platform: &mut C,
    ) -> Result<(), ClipboardError> {
        self.lock().service_clipboard(platform)
    }

    fn lock(&self) -> MutexGuard<'_, Router> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ClipboardEvent;
    use std::thread;
    use understory_ops::ReadClipboardOp;

    #[test]
    fn events_from_other_threads_are_delivered_once() {
        let router = SharedRouter::default();
        let tags: Vec<Tag> = (0..8).map(|_| Tag::new()).collect();
        let mut ops = Ops::new();
        for tag in &tags {
            ReadClipboardOp { tag: *tag }.add(&mut ops);
        }
        router.frame(&ops);
        assert!(router.read_clipboard());

        let workers: Vec<_> = (0..4)
            .map(|i| {
                let router = router.clone();
                thread::spawn(move || {
                    router.add(ClipboardEvent {
                        text: std::format!("from {i}"),
                    });
                })
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }

        // The first delivery satisfied every reader; later ones found nobody.
        let first = router.events(tags[0]);
        assert_eq!(first.len(), 1);
        for tag in &tags[1..] {
            assert_eq!(router.events(*tag), first);
        }
        assert_eq!(router.with(|r| r.pending_readers()), 0);
    }
}
