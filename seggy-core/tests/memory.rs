use std::sync::Arc;
use std::thread;

use seggy_core::{Memory, MemoryOptions};

#[test]
fn single_thread_allocate_then_deallocate_in_order() {
    let memory = Memory::new();
    let mut handles = Vec::with_capacity(10_000);
    for i in 0..10_000u64 {
        handles.push(memory.alloc(i));
    }
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(*handle, i as u64);
        drop(handle);
    }

    // Every segment should now be drained; a subsequent allocation should
    // be serviceable without the process aborting, reusing either the
    // current tail segment or a recycled one.
    drop(memory.alloc(0u64));
}

#[test]
fn oversize_allocation_uses_heap_fallback_only() {
    struct Payload([u8; 1024]);

    let memory = Memory::with_options(MemoryOptions::new().with_block_size(256).with_prewarm(false));
    let handle = memory.alloc(Payload([9; 1024]));
    assert_eq!(handle.0[1023], 9);
    drop(handle);
}

#[test]
fn mpmc_allocate_and_release_under_contention() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 5_000;

    let memory = Arc::new(Memory::new());
    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            let memory = memory.clone();
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let value = (t * PER_THREAD + i) as u64;
                    let handle = memory.alloc(value);
                    assert_eq!(*handle, value);
                    drop(handle);
                }
            })
        })
        .collect();
    for w in workers {
        w.join().unwrap();
    }
}
