// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener identities.

use core::fmt;
use core::num::NonZeroU64;
use core::sync::atomic::{AtomicU64, Ordering};

static NEXT_TAG: AtomicU64 = AtomicU64::new(0);

/// Opaque identity naming an event listener across frames.
///
/// Tags compare by identity: copies of one tag are equal, while two tags minted
/// by separate calls to [`Tag::new`] are never equal. Hosts keep a tag alongside
/// the widget state it names and redeclare it every frame.
///
/// ```
/// use understory_ops::Tag;
///
/// let a = Tag::new();
/// let b = Tag::new();
/// assert_eq!(a, a.clone());
/// assert_ne!(a, b);
/// ```
///
/// There is no `Default` tag; every identity is minted explicitly.
///
/// ```compile_fail
/// let _ = understory_ops::Tag::default();
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(NonZeroU64);

impl Tag {
    /// Mint a fresh identity, distinct from every other tag in this process.
    #[expect(
        clippy::new_without_default,
        reason = "each call mints a new identity, which a `Default` impl would hide"
    )]
    pub fn new() -> Self {
        let n = NEXT_TAG.fetch_add(1, Ordering::Relaxed);
        Self(NonZeroU64::MIN.saturating_add(n))
    }

    /// Numeric value of this identity, for logging.
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(#{})", self.0)
    }
}
