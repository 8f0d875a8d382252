//! An unbounded lock-free MPMC FIFO queue built from linked segments.
//!
//! [`Queue<T>`] is a singly linked list of fixed-capacity [`Segment`]s, a
//! dummy segment permanently at the head, and an atomic `tail` pointer to
//! the segment producers are currently writing into.

mod segment;

use core::ptr;

use crate::common::*;
use segment::Segment;

pub(crate) use segment::ITEM_COUNT;

/// Construction options for [`Queue`].
///
/// Currently empty: segment capacity is a fixed design constant (see
/// [`ITEM_COUNT`] internally), a "one cache line of slots" sizing. The
/// type exists so adding a knob later does not break callers, the same
/// reasoning [`crate::memory::MemoryOptions`] follows.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueueOptions {
  _private: (),
}

impl QueueOptions {
  /// Creates the default options.
  #[inline]
  pub const fn new() -> Self {
    Self { _private: () }
  }
}

/// An unbounded, lock-free multi-producer multi-consumer FIFO queue.
pub struct Queue<T> {
  dummy: std::boxed::Box<Segment<T>>,
  tail: CachePadded<AtomicPtr<Segment<T>>>,
}

unsafe impl<T: Send> Send for Queue<T> {}
unsafe impl<T: Send> Sync for Queue<T> {}

impl<T> Queue<T> {
  /// Creates an empty queue.
  #[inline]
  pub fn new() -> Self {
    Self::with_options(QueueOptions::default())
  }

  /// Creates an empty queue with the given options.
  pub fn with_options(_opts: QueueOptions) -> Self {
    let dummy = Segment::new();
    let dummy_ptr: *mut Segment<T> = &*dummy as *const Segment<T> as *mut Segment<T>;
    Self {
      dummy,
      tail: CachePadded::new(AtomicPtr::new(dummy_ptr)),
    }
  }

  #[inline]
  fn dummy_ptr(&self) -> *mut Segment<T> {
    &*self.dummy as *const Segment<T> as *mut Segment<T>
  }

  /// Enqueues `item`. Never fails; eventually links a new segment if the
  /// current tail segment is full.
  ///
  /// The queue only holds `item` in custody until a matching [`pop`](Self::pop)
  /// returns it; it does not own enqueued values. Dropping the queue while
  /// items remain enqueued leaks them rather than running their
  /// destructors — callers that need every item dropped must drain the
  /// queue themselves first.
  pub fn push(&self, item: T) {
    let boxed = std::boxed::Box::into_raw(std::boxed::Box::new(item));
    self.push_raw(boxed);
  }

  fn push_raw(&self, item: *mut T) {
    let mut tail_new: Option<std::boxed::Box<Segment<T>>> = None;

    loop {
      let tail_old_ptr = self.tail.load(Ordering::Acquire);
      let tail_old = unsafe { &*tail_old_ptr };

      if tail_old_ptr != self.dummy_ptr() && tail_old.try_push(item) {
        // `tail_new` is dropped here if it was never linked.
        return;
      }

      if tail_new.is_none() {
        tail_new = Some(Segment::new());
      }
      let candidate = tail_new.as_ref().unwrap();
      let published = candidate.try_push(item);
      debug_assert!(published, "a freshly created segment always accepts one push");
      let candidate_ptr: *mut Segment<T> = &**candidate as *const Segment<T> as *mut Segment<T>;

      if tail_old
        .next_atomic()
        .compare_exchange(ptr::null_mut(), candidate_ptr, Ordering::AcqRel, Ordering::Acquire)
        .is_ok()
      {
        let linked = tail_new.take().unwrap();
        let linked_ptr = std::boxed::Box::into_raw(linked);
        let _ = self
          .tail
          .compare_exchange(tail_old_ptr, linked_ptr, Ordering::AcqRel, Ordering::Relaxed);
        return;
      }

      let _ = self
        .tail
        .compare_exchange(tail_old_ptr, tail_old.next(), Ordering::AcqRel, Ordering::Relaxed);
    }
  }

  /// Dequeues the oldest item, or `None` if the queue was observably empty
  /// at some point during the call.
  pub fn pop(&self) -> Option<T> {
    self.pop_raw().map(|ptr| *unsafe { std::boxed::Box::from_raw(ptr) })
  }

  fn pop_raw(&self) -> Option<*mut T> {
    loop {
      let head_ptr = self.dummy.next_atomic().load(Ordering::Acquire);
      if head_ptr.is_null() {
        return None;
      }

      let head = unsafe { &*head_ptr };
      if let Some(item) = head.try_pop() {
        return Some(item);
      }

      if !head.is_full() {
        // Not full and nothing published: genuinely empty right now.
        return None;
      }

      let head_next = head.next();
      if self
        .dummy
        .next_atomic()
        .compare_exchange(head_ptr, head_next, Ordering::AcqRel, Ordering::Relaxed)
        .is_ok()
      {
        if head_next.is_null() {
          if self
            .tail
            .compare_exchange(head_ptr, self.dummy_ptr(), Ordering::AcqRel, Ordering::Relaxed)
            .is_err()
          {
            let _ = self.dummy.next_atomic().compare_exchange(
              ptr::null_mut(),
              unsafe { &*head_ptr }.next(),
              Ordering::AcqRel,
              Ordering::Relaxed,
            );
          }
        }
        unsafe { drop(std::boxed::Box::from_raw(head_ptr)) };
      }
    }
  }
}

impl<T> Default for Queue<T> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Drop for Queue<T> {
  fn drop(&mut self) {
    // Items still enqueued are intentionally leaked here: the queue holds
    // borrowed pointers and never owned their pointees (only the segment
    // storage that held those pointers is released).
    let mut current = self.dummy.next();
    while !current.is_null() {
      unsafe {
        let boxed = std::boxed::Box::from_raw(current);
        current = boxed.next();
        drop(boxed);
      }
    }
  }
}
