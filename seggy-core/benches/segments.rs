use criterion::{criterion_group, criterion_main, Criterion};
use seggy_core::{Memory, Queue};

fn bench_memory_alloc_dealloc(c: &mut Criterion) {
  let memory = Memory::new();
  c.bench_function("memory_alloc_dealloc_u64", |b| {
    b.iter(|| {
      let handle = memory.alloc(42u64);
      drop(handle);
    })
  });
}

fn bench_queue_push_pop(c: &mut Criterion) {
  let queue = Queue::new();
  c.bench_function("queue_push_pop_u64", |b| {
    b.iter(|| {
      queue.push(42u64);
      queue.pop()
    })
  });
}

criterion_group!(benches, bench_memory_alloc_dealloc, bench_queue_push_pop);
criterion_main!(benches);
