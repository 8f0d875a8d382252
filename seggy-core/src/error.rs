use core::fmt;

/// The only error this crate surfaces.
///
/// Every retry-able condition (capacity exhaustion of a segment, an
/// out-of-range deallocation address, an unordered release) is recovered
/// internally by the allocator and queue's retry loops and never reaches
/// the caller. The sole externally visible failure is the global allocator
/// itself being unable to satisfy the heap-fallback path taken for a
/// payload too large to fit a segment.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
  /// The global allocator could not satisfy an oversize allocation.
  ///
  /// Carries the `(size, align)` of the failed request.
  HeapExhausted {
    /// Requested size in bytes.
    size: usize,
    /// Requested alignment in bytes.
    align: usize,
  },
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::HeapExhausted { size, align } => write!(
        f,
        "global allocator could not satisfy an oversize allocation of {size} bytes (align {align})"
      ),
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
