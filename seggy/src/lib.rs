//! Lock-free segmented arena allocator and MPMC queue.
//!
//! This crate is a thin, documented facade over [`seggy_core`], which
//! holds the actual unsafe, lock-free engine. It exists so the published
//! API surface can carry crate-level documentation independent of the
//! engine crate's internal module layout.
//!
//! - [`Memory`] is a segmented bump allocator: producers claim space from
//!   a chain of fixed-capacity segments, and space is released back in
//!   FIFO order per segment. Allocations too large for a segment fall back
//!   to the system heap transparently.
//! - [`Queue`] is an unbounded multi-producer multi-consumer FIFO queue
//!   built from the same linked-segment shape.
//!
//! Both types are lock-free: every operation is either a bounded retry
//! loop over compare-and-swap, or a constant number of atomic operations.
//! Neither is wait-free, and neither makes fairness guarantees across
//! threads.
#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]

#[cfg(not(any(feature = "std", feature = "alloc")))]
compile_error!("`seggy` requires either the 'std' or 'alloc' feature to be enabled");

#[cfg(not(feature = "std"))]
extern crate alloc as std;

#[cfg(feature = "std")]
extern crate std;

pub use seggy_core::{memory, queue, ArenaBox, Error, Memory, MemoryOptions, Queue, QueueOptions, CACHE_LINE_SIZE, MAX_ALIGNMENT};
