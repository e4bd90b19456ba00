// Copyright 2018-2024 the Deno authors. MIT license.

use parking_lot::Mutex;
use parking_lot::MutexGuard;

use crate::PriorityQueue;
use crate::Underflow;

/// A priority queue that can be shared between threads.
///
/// The queues themselves assume a single owner, so every operation here
/// takes a lock around the whole queue. Use [`Self::lock`] when several
/// operations must happen without another thread interleaving.
#[derive(Debug, Default)]
pub struct SharedPriorityQueue<Q: PriorityQueue> {
  inner: Mutex<Q>,
}

impl<Q: PriorityQueue> SharedPriorityQueue<Q> {
  pub fn new(queue: Q) -> Self {
    Self {
      inner: Mutex::new(queue),
    }
  }

  pub fn enqueue(&self, value: i32) {
    self.inner.lock().enqueue(value);
  }

  pub fn try_dequeue_max(&self) -> Result<i32, Underflow> {
    self.inner.lock().try_dequeue_max()
  }

  /// Removes and returns the maximum value.
  ///
  /// # Panics
  ///
  /// Panics when the queue is empty.
  pub fn dequeue_max(&self) -> i32 {
    self.inner.lock().dequeue_max()
  }

  pub fn peek_max(&self) -> Option<i32> {
    self.inner.lock().peek_max()
  }

  pub fn len(&self) -> usize {
    self.inner.lock().size()
  }

  pub fn is_empty(&self) -> bool {
    self.inner.lock().is_empty()
  }

  pub fn lock(&self) -> MutexGuard<'_, Q> {
    self.inner.lock()
  }

  pub fn into_inner(self) -> Q {
    self.inner.into_inner()
  }
}

#[cfg(test)]
mod test {
  use std::thread;

  use super::*;
  use crate::ChunkedPriorityQueue;
  use crate::HeapPriorityQueue;

  #[test]
  fn enqueue_from_many_threads() {
    let queue = SharedPriorityQueue::<ChunkedPriorityQueue>::default();
    thread::scope(|scope| {
      for offset in 0..4 {
        let queue = &queue;
        scope.spawn(move || {
          for value in 0..250 {
            queue.enqueue(value * 4 + offset);
          }
        });
      }
    });
    assert_eq!(queue.len(), 1000);
    assert_eq!(queue.peek_max(), Some(999));

    let queue = queue.into_inner();
    assert_eq!(queue.into_iter().collect::<Vec<_>>(), (0..1000).rev().collect::<Vec<_>>());
  }

  #[test]
  fn dequeue_from_many_threads() {
    let queue = SharedPriorityQueue::new(HeapPriorityQueue::default());
    for value in 0..400 {
      queue.enqueue(value);
    }
    let mut taken = thread::scope(|scope| {
      let handles = (0..4)
        .map(|_| {
          scope.spawn(|| {
            let mut taken = Vec::new();
            while let Ok(value) = queue.try_dequeue_max() {
              taken.push(value);
            }
            // each thread sees its own values in descending order
            assert!(taken.windows(2).all(|pair| pair[0] > pair[1]));
            taken
          })
        })
        .collect::<Vec<_>>();
      handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect::<Vec<_>>()
    });
    taken.sort_unstable();
    assert_eq!(taken, (0..400).collect::<Vec<_>>());
    assert!(queue.is_empty());
  }

  #[test]
  fn lock_allows_compound_operations() {
    let queue = SharedPriorityQueue::new(ChunkedPriorityQueue::new());
    queue.enqueue(3);
    queue.enqueue(9);
    {
      let mut guard = queue.lock();
      let max = guard.dequeue_max();
      guard.enqueue(max - 1);
    }
    assert_eq!(queue.dequeue_max(), 8);
    assert_eq!(queue.dequeue_max(), 3);
    assert_eq!(queue.try_dequeue_max(), Err(Underflow));
  }
}
