//! Shared constants and the atomic/allocation shims every module builds on.
//!
//! The `loom` cfg swaps the standard atomics and allocation primitives for
//! loom's instrumented equivalents so the segment/queue algorithms can be
//! exhaustively model-checked under `RUSTFLAGS="--cfg loom"`.

#[cfg(not(loom))]
pub(crate) use std::alloc::{alloc_zeroed, dealloc, Layout};

#[cfg(loom)]
pub(crate) use loom::alloc::{alloc_zeroed, dealloc, Layout};

#[cfg(not(loom))]
pub(crate) use core::sync::atomic::*;

#[cfg(loom)]
pub(crate) use loom::sync::atomic::*;

pub(crate) use crossbeam_utils::{Backoff, CachePadded};

/// Width of a cache line on the architectures this crate targets.
///
/// Hot fields touched by disjoint roles (producer tail, consumer head,
/// segment link) are padded to this width so they never share a line.
pub const CACHE_LINE_SIZE: usize = 64;

/// Maximum alignment the allocator guarantees for a payload's `Info` header.
pub const MAX_ALIGNMENT: usize = 8;

/// Rounds `size` up to the next multiple of [`MAX_ALIGNMENT`].
#[inline]
pub(crate) const fn align_up(size: usize) -> usize {
  (size + MAX_ALIGNMENT - 1) / MAX_ALIGNMENT * MAX_ALIGNMENT
}
