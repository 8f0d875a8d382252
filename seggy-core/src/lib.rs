//! Engine crate for `seggy`.
//!
//! This crate contains the two lock-free primitives the `seggy` facade
//! re-exports:
//!
//! - [`memory::Memory`], a segmented bump allocator that recycles
//!   fixed-capacity arenas.
//! - [`queue::Queue`], an unbounded multi-producer/multi-consumer FIFO
//!   queue built from linked fixed-capacity segments.
//!
//! Both are built from the same structural pattern: a singly linked list of
//! fixed-capacity segments, a dummy segment permanently at the head, and a
//! single-slot reserve of retired segments kept around for reuse.
#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]

#[cfg(not(any(feature = "std", feature = "alloc")))]
compile_error!("`seggy-core` requires either the 'std' or 'alloc' feature to be enabled");

#[cfg(not(feature = "std"))]
extern crate alloc as std;

#[cfg(feature = "std")]
extern crate std;

mod common;
mod error;
pub mod memory;
pub mod queue;

pub use common::{CACHE_LINE_SIZE, MAX_ALIGNMENT};
pub use error::Error;
pub use memory::{ArenaBox, Memory, MemoryOptions};
pub use queue::{Queue, QueueOptions};
