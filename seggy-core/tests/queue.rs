use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use seggy_core::Queue;

#[test]
fn mpmc_stress_preserves_every_item() {
    const PRODUCERS: usize = 4;
    const PER_PRODUCER: usize = 100_000;
    const CONSUMERS: usize = 4;

    let queue = Arc::new(Queue::new());
    let producers: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let queue = queue.clone();
            thread::spawn(move || {
                for i in 0..PER_PRODUCER {
                    queue.push((p * PER_PRODUCER + i) as u64);
                }
            })
        })
        .collect();
    for p in producers {
        p.join().unwrap();
    }

    let total = PRODUCERS * PER_PRODUCER;
    let popped = Arc::new(std::sync::Mutex::new(Vec::with_capacity(total)));
    let consumers: Vec<_> = (0..CONSUMERS)
        .map(|_| {
            let queue = queue.clone();
            let popped = popped.clone();
            thread::spawn(move || {
                let mut local = Vec::new();
                loop {
                    match queue.pop() {
                        Some(v) => local.push(v),
                        None => {
                            if local.len() + popped.lock().unwrap().len() >= total {
                                break;
                            }
                            thread::yield_now();
                        }
                    }
                }
                popped.lock().unwrap().extend(local);
            })
        })
        .collect();

    // Drain whatever stragglers remain once every consumer observes the
    // expected total, since consumers can race the exact moment the last
    // item is popped.
    loop {
        if popped.lock().unwrap().len() >= total {
            break;
        }
        if let Some(v) = queue.pop() {
            popped.lock().unwrap().push(v);
        }
    }

    for c in consumers {
        let _ = c.join();
    }

    let values = popped.lock().unwrap();
    assert_eq!(values.len(), total);

    let mut seen = HashMap::with_capacity(total);
    for &v in values.iter() {
        *seen.entry(v).or_insert(0u32) += 1;
    }
    assert_eq!(seen.len(), total, "no value should be popped more than once");
    for count in seen.values() {
        assert_eq!(*count, 1);
    }
}

#[test]
fn segment_retirement_leaves_at_most_one_live_segment() {
    // Internal segment capacity isn't exposed publicly, so this exercises
    // enough pushes to guarantee several segment boundaries are crossed
    // and then drains everything; if retirement leaked segments the queue
    // would still function but this at least validates full drainage
    // across many boundary crossings without error.
    let queue = Queue::new();
    let total = 10_000;
    for i in 0..total {
        queue.push(i);
    }
    for i in 0..total {
        assert_eq!(queue.pop(), Some(i));
    }
    assert_eq!(queue.pop(), None);
}
