use core::{mem, ptr, ptr::NonNull};

use crate::common::*;

/// Header written immediately before every payload.
///
/// Records the padded size of the allocation so a release can walk `head`
/// forward without consulting the allocator. Only `size` is needed, not an
/// `isAllocated` bit, because releases happen strictly in FIFO order (see
/// `DESIGN.md`).
#[repr(C)]
struct Info {
  size: u32,
}

pub(crate) const INFO_SIZE: usize = align_up(mem::size_of::<Info>());

/// A fixed-capacity byte arena with a bump tail and a FIFO head.
///
/// `head`, `tail` and `next` are each given their own cache line: producers
/// only ever touch `tail`, consumers (deallocators) only ever touch `head`,
/// and segment-list maintenance only ever touches `next`.
pub(crate) struct Segment {
  bytes: NonNull<u8>,
  layout: Layout,
  capacity: u32,
  head: CachePadded<AtomicU32>,
  tail: CachePadded<AtomicU32>,
  next: CachePadded<AtomicPtr<Segment>>,
}

unsafe impl Send for Segment {}
unsafe impl Sync for Segment {}

/// Outcome of [`Segment::try_deallocate`].
///
/// Kept distinct from a plain `bool` so a caller walking the segment chain
/// can tell "this segment doesn't own `address`, keep looking and retire it
/// if drained" apart from "this segment owns `address` but the FIFO CAS
/// lost" — the latter must never trigger retirement, since the segment is
/// neither drained nor safe to reset.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Release {
  /// `address` is not within this segment's byte range.
  Foreign,
  /// `address` was the oldest outstanding allocation and was released.
  Released,
  /// `address` belongs to this segment but was not at the head of the
  /// FIFO (a programmer error: unordered deallocation).
  OutOfOrder,
}

impl Segment {
  /// Creates a segment with the given payload capacity. A capacity of `0`
  /// is used only for the manager's embedded dummy segment, which is
  /// never allocated into, so it skips the heap entirely rather than
  /// asking the allocator for a zero-sized block.
  pub(crate) fn new(capacity: u32) -> std::boxed::Box<Segment> {
    let layout =
      Layout::from_size_align(capacity as usize, MAX_ALIGNMENT).expect("segment capacity overflow");
    let bytes = if capacity == 0 {
      NonNull::dangling()
    } else {
      unsafe {
        let ptr = alloc_zeroed(layout);
        if ptr.is_null() {
          std::alloc::handle_alloc_error(layout);
        }
        NonNull::new_unchecked(ptr)
      }
    };

    std::boxed::Box::new(Self {
      bytes,
      layout,
      capacity,
      head: CachePadded::new(AtomicU32::new(0)),
      tail: CachePadded::new(AtomicU32::new(0)),
      next: CachePadded::new(AtomicPtr::new(ptr::null_mut())),
    })
  }

  #[inline]
  pub(crate) fn next(&self) -> *mut Segment {
    self.next.load(Ordering::Acquire)
  }

  #[inline]
  pub(crate) fn next_atomic(&self) -> &AtomicPtr<Segment> {
    &self.next
  }

  /// Reserves the smallest multiple of [`MAX_ALIGNMENT`] at least
  /// `size + INFO_SIZE` bytes and writes the `Info` header. Returns `None`
  /// (and leaves the segment sealed for future callers) once capacity is
  /// exhausted.
  pub(crate) fn try_allocate(&self, size: u32) -> Option<NonNull<u8>> {
    let need = align_up(size as usize + INFO_SIZE) as u32;
    loop {
      let tail_old = self.tail.load(Ordering::Relaxed);
      let end = match tail_old.checked_add(need) {
        Some(end) if end <= self.capacity => end,
        _ => return None,
      };

      if self
        .tail
        .compare_exchange_weak(tail_old, end, Ordering::SeqCst, Ordering::Relaxed)
        .is_ok()
      {
        unsafe {
          let header = self.bytes.as_ptr().add(tail_old as usize).cast::<Info>();
          header.write(Info { size: need });
          let payload = self.bytes.as_ptr().add(tail_old as usize + INFO_SIZE);
          return Some(NonNull::new_unchecked(payload));
        }
      }
    }
  }

  /// Releases the allocation at `address`.
  ///
  /// Strict FIFO: `address` must be the oldest outstanding allocation in
  /// this segment.
  pub(crate) fn try_deallocate(&self, address: NonNull<u8>) -> Release {
    let base = self.bytes.as_ptr() as usize;
    let addr = address.as_ptr() as usize;
    if addr < base + INFO_SIZE || addr >= base + self.capacity as usize {
      return Release::Foreign;
    }

    let offset = (addr - base - INFO_SIZE) as u32;
    let size = unsafe {
      let header = self.bytes.as_ptr().add(offset as usize).cast::<Info>();
      (*header).size
    };

    match self.head.compare_exchange(
      offset,
      offset + size,
      Ordering::AcqRel,
      Ordering::Relaxed,
    ) {
      Ok(_) => Release::Released,
      Err(_) => {
        debug_assert!(
          false,
          "deallocation at offset {offset} is out of FIFO order for this segment"
        );
        Release::OutOfOrder
      }
    }
  }

  #[inline]
  pub(crate) fn is_drained(&self) -> bool {
    self.head.load(Ordering::Acquire) >= self.tail.load(Ordering::Acquire)
  }

  #[inline]
  pub(crate) fn is_sealed(&self) -> bool {
    self.tail.load(Ordering::Acquire) >= self.capacity
  }

  /// Resets the segment for reuse.
  ///
  /// # Safety
  /// No producer or consumer may hold a pointer into this segment.
  pub(crate) unsafe fn reset(&self) {
    ptr::write_bytes(self.bytes.as_ptr(), 0, self.capacity as usize);
    self.head.store(0, Ordering::Relaxed);
    self.tail.store(0, Ordering::Relaxed);
    self.next.store(ptr::null_mut(), Ordering::Relaxed);
  }
}

impl Drop for Segment {
  fn drop(&mut self) {
    if self.capacity == 0 {
      return;
    }
    unsafe { dealloc(self.bytes.as_ptr(), self.layout) }
  }
}
