// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Operation registry: the fixed layout of every operation kind.
//!
//! Each encoded operation starts with its kind byte, followed by a payload whose
//! total length (kind byte included) is fixed per kind. The number of external
//! references an operation consumes from the parallel reference array is fixed
//! per kind as well, so a reader can skip any operation in O(1) without knowing
//! what it means.

/// Kind of an encoded operation.
///
/// Discriminants start at a high number so raw buffers are easier to eyeball
/// while debugging.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpKind {
    /// A 2D affine transform for the enclosing scope.
    Transform = FIRST_OP_KIND,
    /// A request to redraw, now or at a future time.
    Invalidate,
    /// Text to be written to the platform clipboard.
    WriteClipboard,
    /// A listener asking for the platform clipboard contents.
    ReadClipboard,
    /// A keyboard listener declaration.
    KeyInput,
    /// A request to gain or release keyboard focus.
    KeyFocus,
    /// A request to show or hide the soft keyboard.
    KeySoftKeyboard,
    /// Start of a nested scope.
    Push,
    /// End of the innermost open scope.
    Pop,
}

const FIRST_OP_KIND: u8 = 200;

const KINDS: [OpKind; 9] = [
    OpKind::Transform,
    OpKind::Invalidate,
    OpKind::WriteClipboard,
    OpKind::ReadClipboard,
    OpKind::KeyInput,
    OpKind::KeyFocus,
    OpKind::KeySoftKeyboard,
    OpKind::Push,
    OpKind::Pop,
];

/// Encoded length of [`OpKind::Transform`]: six `f32` coefficients.
pub const TRANSFORM_LEN: usize = 1 + 4 * 6;
/// Encoded length of [`OpKind::Invalidate`]: a `u64` timestamp.
pub const INVALIDATE_LEN: usize = 1 + 8;
/// Encoded length of [`OpKind::WriteClipboard`].
pub const WRITE_CLIPBOARD_LEN: usize = 1;
/// Encoded length of [`OpKind::ReadClipboard`].
pub const READ_CLIPBOARD_LEN: usize = 1;
/// Encoded length of [`OpKind::KeyInput`].
pub const KEY_INPUT_LEN: usize = 1;
/// Encoded length of [`OpKind::KeyFocus`]: one flag byte.
pub const KEY_FOCUS_LEN: usize = 1 + 1;
/// Encoded length of [`OpKind::KeySoftKeyboard`]: one flag byte.
pub const KEY_SOFT_KEYBOARD_LEN: usize = 1 + 1;
/// Encoded length of [`OpKind::Push`].
pub const PUSH_LEN: usize = 1;
/// Encoded length of [`OpKind::Pop`].
pub const POP_LEN: usize = 1;

impl OpKind {
    /// Look up the kind for a raw kind byte.
    ///
    /// Returns `None` for bytes outside the registry.
    pub const fn from_u8(b: u8) -> Option<Self> {
        if b < FIRST_OP_KIND {
            return None;
        }
        let idx = (b - FIRST_OP_KIND) as usize;
        if idx < KINDS.len() {
            Some(KINDS[idx])
        } else {
            None
        }
    }

    /// Total encoded length in bytes, including the leading kind byte.
    pub const fn size(self) -> usize {
        match self {
            Self::Transform => TRANSFORM_LEN,
            Self::Invalidate => INVALIDATE_LEN,
            Self::WriteClipboard => WRITE_CLIPBOARD_LEN,
            Self::ReadClipboard => READ_CLIPBOARD_LEN,
            Self::KeyInput => KEY_INPUT_LEN,
            Self::KeyFocus => KEY_FOCUS_LEN,
            Self::KeySoftKeyboard => KEY_SOFT_KEYBOARD_LEN,
            Self::Push => PUSH_LEN,
            Self::Pop => POP_LEN,
        }
    }

    /// Number of external references consumed by this kind.
    pub const fn num_refs(self) -> usize {
        match self {
            Self::WriteClipboard | Self::ReadClipboard | Self::KeyInput => 1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_bytes_map_back_to_kinds() {
        for kind in KINDS {
            assert_eq!(OpKind::from_u8(kind as u8), Some(kind));
        }
    }

    #[test]
    fn bytes_outside_registry_are_rejected() {
        assert_eq!(OpKind::from_u8(0), None);
        assert_eq!(OpKind::from_u8(FIRST_OP_KIND - 1), None);
        assert_eq!(OpKind::from_u8(OpKind::Pop as u8 + 1), None);
        assert_eq!(OpKind::from_u8(u8::MAX), None);
    }

    #[test]
    fn every_kind_has_room_for_its_kind_byte() {
        for kind in KINDS {
            assert!(kind.size() >= 1, "{kind:?} must encode its kind byte");
        }
        assert_eq!(OpKind::Push.size(), 1);
        assert_eq!(OpKind::Pop.num_refs(), 0);
        assert_eq!(OpKind::KeyInput.num_refs(), 1);
    }
}
