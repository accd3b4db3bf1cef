// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sequential decoding of an [`Ops`] buffer.
//!
//! ## Scopes
//!
//! [`OpKind::Push`] and [`OpKind::Pop`] are ordinary zero-payload operations as
//! far as the reader is concerned. A walker that cares about nesting handles
//! them itself: on `Push` it recurses with the same reader, and on `Pop` it
//! returns to its caller. Because the child level consumes everything up to and
//! including its own `Pop`, the parent resumes exactly after the child's scope.
//!
//! ```
//! use understory_ops::{KeyInputOp, OpKind, Ops, Reader, Tag};
//!
//! fn count_listeners(r: &mut Reader<'_>) -> usize {
//!     let mut n = 0;
//!     while let Some(op) = r.decode() {
//!         match op.kind {
//!             OpKind::KeyInput => n += 1,
//!             OpKind::Push => n += count_listeners(r),
//!             OpKind::Pop => break,
//!             _ => {}
//!         }
//!     }
//!     n
//! }
//!
//! let mut ops = Ops::new();
//! KeyInputOp { tag: Tag::new() }.add(&mut ops);
//! ops.push();
//! KeyInputOp { tag: Tag::new() }.add(&mut ops);
//! ops.pop();
//! assert_eq!(count_listeners(&mut Reader::new(&ops)), 2);
//! ```
//!
//! ## Malformed buffers
//!
//! Buffers are produced by in-process code only. A kind byte outside the
//! registry, a truncated payload or a missing reference means the encoder is
//! broken, and the reader panics.

use crate::kind::OpKind;
use crate::ops::{OpRef, Ops};

/// One decoded operation, borrowing from the buffer.
#[derive(Copy, Clone, Debug)]
pub struct EncodedOp<'a> {
    /// Kind of the operation.
    pub kind: OpKind,
    /// Encoded bytes, kind byte included.
    pub data: &'a [u8],
    /// The references this operation consumes.
    pub refs: &'a [OpRef],
}

/// Cursor over the operations of an [`Ops`] buffer.
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    ops: &'a Ops,
    pc: usize,
    ref_pc: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader positioned at the first operation of `ops`.
    pub fn new(ops: &'a Ops) -> Self {
        Self {
            ops,
            pc: 0,
            ref_pc: 0,
        }
    }

    /// Rewind to the first operation of `ops`.
    pub fn reset(&mut self, ops: &'a Ops) {
        *self = Self::new(ops);
    }

    /// Decode the next operation, or `None` at the end of the buffer.
    ///
    /// # Panics
    ///
    /// Panics on an unknown kind byte, a truncated payload, or missing references.
    pub fn decode(&mut self) -> Option<EncodedOp<'a>> {
        let data = self.ops.data();
        let b = *data.get(self.pc)?;
        let Some(kind) = OpKind::from_u8(b) else {
            panic!("invalid op kind {b} at offset {}", self.pc);
        };
        let end = self.pc + kind.size();
        assert!(
            end <= data.len(),
            "truncated {kind:?} at offset {}",
            self.pc
        );
        let refs = self.ops.refs();
        let ref_end = self.ref_pc + kind.num_refs();
        assert!(
            ref_end <= refs.len(),
            "{kind:?} at offset {} is missing references",
            self.pc
        );
        let op = EncodedOp {
            kind,
            data: &data[self.pc..end],
            refs: &refs[self.ref_pc..ref_end],
        };
        self.pc = end;
        self.ref_pc = ref_end;
        Some(op)
    }
}

impl<'a> Iterator for Reader<'a> {
    type Item = EncodedOp<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.decode()
    }
}
