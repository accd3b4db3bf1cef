// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame operation buffer.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::kind::OpKind;
use crate::tag::Tag;

/// An external reference carried alongside an operation's byte payload.
///
/// References hold what cannot be inlined in bytes. They are stored in a
/// separate array, in the order operations were written, and each kind consumes
/// exactly [`OpKind::num_refs`] of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpRef {
    /// A listener identity.
    Tag(Tag),
    /// Shared text, such as data offered for a clipboard write.
    Text(Arc<str>),
}

/// Append-only buffer of encoded operations for one frame.
///
/// The host rebuilds the buffer every frame: call [`Ops::reset`], then let the
/// application add its operations in program order. Scopes are bracketed with
/// [`Ops::push`] and [`Ops::pop`].
///
/// ```
/// use understory_ops::{FocusOp, KeyInputOp, Ops, Tag};
///
/// let tag = Tag::new();
/// let mut ops = Ops::new();
/// ops.push();
/// KeyInputOp { tag }.add(&mut ops);
/// FocusOp { focus: true }.add(&mut ops);
/// ops.pop();
/// assert_eq!(ops.depth(), 0);
/// assert!(!ops.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Ops {
    data: Vec<u8>,
    refs: Vec<OpRef>,
    depth: usize,
}

impl Ops {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `bytes` of payload and `refs` references.
    pub fn with_capacity(bytes: usize, refs: usize) -> Self {
        Self {
            data: Vec::with_capacity(bytes),
            refs: Vec::with_capacity(refs),
            depth: 0,
        }
    }

    /// Clear the buffer for a new frame, keeping its allocations.
    pub fn reset(&mut self) {
        self.data.clear();
        self.refs.clear();
        self.depth = 0;
    }

    /// Append one operation and return its encoded region for in-place encoding.
    ///
    /// The returned slice is [`OpKind::size`] bytes long; its first byte already
    /// holds the kind, the payload starts at index 1.
    ///
    /// # Panics
    ///
    /// Panics if `N` differs from [`OpKind::num_refs`] for `kind`.
    pub fn write<const N: usize>(&mut self, kind: OpKind, refs: [OpRef; N]) -> &mut [u8] {
        assert_eq!(
            N,
            kind.num_refs(),
            "{kind:?} takes {} references",
            kind.num_refs()
        );
        self.refs.extend(refs);
        let start = self.data.len();
        self.data.resize(start + kind.size(), 0);
        let encoded = &mut self.data[start..];
        encoded[0] = kind as u8;
        encoded
    }

    /// Open a nested scope.
    pub fn push(&mut self) {
        self.write(OpKind::Push, []);
        self.depth += 1;
    }

    /// Close the innermost open scope.
    ///
    /// # Panics
    ///
    /// Panics if no scope is open.
    pub fn pop(&mut self) {
        assert!(self.depth > 0, "pop without a matching push");
        self.depth -= 1;
        self.write(OpKind::Pop, []);
    }

    /// Number of currently open scopes.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `true` if no operation has been written since the last reset.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Encoded operation bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// External references, in write order.
    pub fn refs(&self) -> &[OpRef] {
        &self.refs
    }
}
