// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed operations.
//!
//! Each type encodes itself with `add` according to the layout declared in
//! [`crate::kind`], and decodes itself from an [`EncodedOp`] with `decode`.
//! Decoding an operation of the wrong kind, or with references of the wrong
//! variant, panics: it means the buffer was not produced by these encoders.

use alloc::sync::Arc;

use kurbo::Affine;

use crate::kind::OpKind;
use crate::ops::{OpRef, Ops};
use crate::reader::EncodedOp;
use crate::tag::Tag;

fn expect_kind(op: &EncodedOp<'_>, kind: OpKind) {
    assert_eq!(op.kind, kind, "invalid op: expected {kind:?}");
}

fn decode_tag(op: &EncodedOp<'_>) -> Tag {
    match op.refs {
        [OpRef::Tag(tag)] => *tag,
        refs => panic!("invalid {:?} references: {refs:?}", op.kind),
    }
}

/// Declares a keyboard listener for the enclosing scope.
///
/// The listener becomes a focus candidate; see the router crate for how a
/// single focus holder is chosen among candidates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyInputOp {
    /// Listener identity.
    pub tag: Tag,
}

impl KeyInputOp {
    /// Encode into `ops`.
    pub fn add(self, ops: &mut Ops) {
        ops.write(OpKind::KeyInput, [OpRef::Tag(self.tag)]);
    }

    /// Decode from an encoded [`OpKind::KeyInput`].
    pub fn decode(op: &EncodedOp<'_>) -> Self {
        expect_kind(op, OpKind::KeyInput);
        Self { tag: decode_tag(op) }
    }
}

/// Requests (`focus: true`) or releases (`focus: false`) keyboard focus for
/// the listener the enclosing scope has declared so far.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FocusOp {
    /// Whether focus is requested.
    pub focus: bool,
}

impl FocusOp {
    /// Encode into `ops`.
    pub fn add(self, ops: &mut Ops) {
        ops.write(OpKind::KeyFocus, [])[1] = u8::from(self.focus);
    }

    /// Decode from an encoded [`OpKind::KeyFocus`].
    pub fn decode(op: &EncodedOp<'_>) -> Self {
        expect_kind(op, OpKind::KeyFocus);
        Self {
            focus: op.data[1] != 0,
        }
    }
}

/// Requests that the on-screen keyboard be shown or hidden.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SoftKeyboardOp {
    /// Whether the keyboard should be visible.
    pub show: bool,
}

impl SoftKeyboardOp {
    /// Encode into `ops`.
    pub fn add(self, ops: &mut Ops) {
        ops.write(OpKind::KeySoftKeyboard, [])[1] = u8::from(self.show);
    }

    /// Decode from an encoded [`OpKind::KeySoftKeyboard`].
    pub fn decode(op: &EncodedOp<'_>) -> Self {
        expect_kind(op, OpKind::KeySoftKeyboard);
        Self {
            show: op.data[1] != 0,
        }
    }
}

/// Asks for the platform clipboard contents.
///
/// The listener receives the contents once, after the platform delivers them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ReadClipboardOp {
    /// Listener that receives the contents.
    pub tag: Tag,
}

impl ReadClipboardOp {
    /// Encode into `ops`.
    pub fn add(self, ops: &mut Ops) {
        ops.write(OpKind::ReadClipboard, [OpRef::Tag(self.tag)]);
    }

    /// Decode from an encoded [`OpKind::ReadClipboard`].
    pub fn decode(op: &EncodedOp<'_>) -> Self {
        expect_kind(op, OpKind::ReadClipboard);
        Self { tag: decode_tag(op) }
    }
}

/// Offers text to be written to the platform clipboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteClipboardOp {
    /// Text to write.
    pub text: Arc<str>,
}

impl WriteClipboardOp {
    /// Create a write of `text`.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self { text: text.into() }
    }

    /// Encode into `ops`.
    pub fn add(self, ops: &mut Ops) {
        ops.write(OpKind::WriteClipboard, [OpRef::Text(self.text)]);
    }

    /// Decode from an encoded [`OpKind::WriteClipboard`].
    pub fn decode(op: &EncodedOp<'_>) -> Self {
        expect_kind(op, OpKind::WriteClipboard);
        match op.refs {
            [OpRef::Text(text)] => Self { text: text.clone() },
            refs => panic!("invalid {:?} references: {refs:?}", op.kind),
        }
    }
}

/// Applies a 2D affine transform to the rest of the enclosing scope.
///
/// Coefficients are stored as `f32`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransformOp(pub Affine);

impl TransformOp {
    /// Encode into `ops`.
    pub fn add(self, ops: &mut Ops) {
        let encoded = ops.write(OpKind::Transform, []);
        for (i, c) in self.0.as_coeffs().into_iter().enumerate() {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Transforms are encoded with f32 precision."
            )]
            let c = c as f32;
            let at = 1 + 4 * i;
            encoded[at..at + 4].copy_from_slice(&c.to_le_bytes());
        }
    }

    /// Decode from an encoded [`OpKind::Transform`].
    pub fn decode(op: &EncodedOp<'_>) -> Self {
        expect_kind(op, OpKind::Transform);
        let mut coeffs = [0.0_f64; 6];
        for (i, c) in coeffs.iter_mut().enumerate() {
            let at = 1 + 4 * i;
            let mut bytes = [0_u8; 4];
            bytes.copy_from_slice(&op.data[at..at + 4]);
            *c = f64::from(f32::from_le_bytes(bytes));
        }
        Self(Affine::new(coeffs))
    }
}

/// Requests a redraw.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InvalidateOp {
    /// Monotonic time in nanoseconds at which to redraw, or `None` for the next
    /// frame. A time of zero is the same as `None`.
    pub at: Option<u64>,
}

impl InvalidateOp {
    /// Encode into `ops`.
    pub fn add(self, ops: &mut Ops) {
        let encoded = ops.write(OpKind::Invalidate, []);
        encoded[1..9].copy_from_slice(&self.at.unwrap_or(0).to_le_bytes());
    }

    /// Decode from an encoded [`OpKind::Invalidate`].
    pub fn decode(op: &EncodedOp<'_>) -> Self {
        expect_kind(op, OpKind::Invalidate);
        let mut bytes = [0_u8; 8];
        bytes.copy_from_slice(&op.data[1..9]);
        let at = u64::from_le_bytes(bytes);
        Self {
            at: (at != 0).then_some(at),
        }
    }
}
