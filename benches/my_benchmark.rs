use std::hint::black_box;

use chunked_pqueue::ChunkedPriorityQueue;
use chunked_pqueue::HeapPriorityQueue;
use chunked_pqueue::PriorityQueue;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const LEN: usize = 2_000;

fn shuffled_values() -> Vec<i32> {
  let mut values = (0..LEN as i32).collect::<Vec<_>>();
  values.shuffle(&mut StdRng::seed_from_u64(7));
  values
}

fn fill_and_drain<Q: PriorityQueue>(values: &[i32]) {
  let mut queue = Q::default();
  for value in values {
    queue.enqueue(*value);
  }
  let mut previous = i32::MAX;
  while !queue.is_empty() {
    let value = queue.dequeue_max();
    assert!(value <= previous);
    previous = black_box(value);
  }
}

fn bench_with<Q: PriorityQueue>(c: &mut Criterion, detail: &str, values: &[i32]) {
  let name = format!("{} {detail}", Q::default().implementation_name())
    .trim_end()
    .to_string();
  c.bench_function(&format!("fill and drain {name}"), |b| {
    b.iter(|| fill_and_drain::<Q>(black_box(values)))
  });
  c.bench_function(&format!("enqueue descending {name}"), |b| {
    b.iter_batched(
      Q::default,
      |mut queue| {
        for value in (0..LEN as i32).rev() {
          queue.enqueue(value);
        }
        queue
      },
      BatchSize::SmallInput,
    )
  });
}

fn criterion_benchmark(c: &mut Criterion) {
  let values = shuffled_values();
  bench_with::<ChunkedPriorityQueue>(c, "(4 per chunk)", &values);
  bench_with::<ChunkedPriorityQueue<16>>(c, "(16 per chunk)", &values);
  bench_with::<HeapPriorityQueue>(c, "", &values);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
