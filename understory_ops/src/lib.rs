// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_ops --heading-base-level=0

//! Understory Ops: the per-frame operation stream of an immediate-mode UI.
//!
//! ## Overview
//!
//! Every frame, the application re-declares its whole input-handling intent by
//! appending operations to a flat [`Ops`] buffer: which listeners want keyboard
//! input, who asks for focus, who waits for the clipboard, and so on. Nothing is
//! retained between frames except what downstream consumers (such as the
//! Understory input router) choose to keep.
//!
//! ## Encoding
//!
//! - Each operation is a kind byte followed by a fixed-size payload. The size and
//!   the number of external references are declared per kind in the registry
//!   ([`OpKind::size`], [`OpKind::num_refs`]).
//! - Values that cannot live in bytes ([`Tag`]s and shared text) are stored as
//!   [`OpRef`]s in a parallel array, in write order.
//! - [`Ops::push`] / [`Ops::pop`] bracket nested scopes. They are zero-payload
//!   operations; walkers give them meaning by recursing.
//!
//! The encoding is an in-process contract. It is neither persisted nor
//! versioned.
//!
//! ## Decoding
//!
//! A [`Reader`] walks the buffer sequentially and yields [`EncodedOp`]s. Typed
//! operations ([`KeyInputOp`], [`FocusOp`], [`SoftKeyboardOp`],
//! [`ReadClipboardOp`], [`WriteClipboardOp`], [`TransformOp`],
//! [`InvalidateOp`]) decode themselves from an [`EncodedOp`] of their kind.
//! Malformed buffers are programming errors and panic.
//!
//! ```
//! use understory_ops::{KeyInputOp, OpKind, Ops, Reader, SoftKeyboardOp, Tag};
//!
//! let editor = Tag::new();
//! let mut ops = Ops::new();
//! ops.push();
//! KeyInputOp { tag: editor }.add(&mut ops);
//! SoftKeyboardOp { show: true }.add(&mut ops);
//! ops.pop();
//!
//! let listeners: Vec<_> = Reader::new(&ops)
//!     .filter(|op| op.kind == OpKind::KeyInput)
//!     .map(|op| KeyInputOp::decode(&op).tag)
//!     .collect();
//! assert_eq!(listeners, [editor]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` through `kurbo`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod kind;
mod op;
mod ops;
mod reader;
mod tag;

pub use kind::OpKind;
pub use op::{
    FocusOp, InvalidateOp, KeyInputOp, ReadClipboardOp, SoftKeyboardOp, TransformOp,
    WriteClipboardOp,
};
pub use ops::{OpRef, Ops};
pub use reader::{EncodedOp, Reader};
pub use tag::Tag;
