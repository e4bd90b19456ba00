// Copyright 2018-2024 the Deno authors. MIT license.

use std::collections::BinaryHeap;
use std::mem::size_of;

use crate::ChunkedPriorityQueue;
use crate::Underflow;

/// The operations a harness needs to swap one max-priority queue of
/// integers for another and compare them.
pub trait PriorityQueue: Default {
  fn enqueue(&mut self, value: i32);

  fn try_dequeue_max(&mut self) -> Result<i32, Underflow>;

  /// Removes and returns the maximum value.
  ///
  /// # Panics
  ///
  /// Panics when the queue is empty.
  fn dequeue_max(&mut self) -> i32 {
    match self.try_dequeue_max() {
      Ok(value) => value,
      Err(err) => panic!("{err}"),
    }
  }

  fn peek_max(&self) -> Option<i32>;

  fn is_empty(&self) -> bool;

  fn size(&self) -> usize;

  /// Approximate bytes of storage the queue holds.
  fn bytes_used(&self) -> usize;

  /// Short label naming the backing strategy.
  fn implementation_name(&self) -> &'static str;
}

impl<const K: usize> PriorityQueue for ChunkedPriorityQueue<K> {
  fn enqueue(&mut self, value: i32) {
    ChunkedPriorityQueue::enqueue(self, value)
  }

  fn try_dequeue_max(&mut self) -> Result<i32, Underflow> {
    ChunkedPriorityQueue::try_dequeue_max(self)
  }

  fn peek_max(&self) -> Option<i32> {
    ChunkedPriorityQueue::peek_max(self)
  }

  fn is_empty(&self) -> bool {
    ChunkedPriorityQueue::is_empty(self)
  }

  fn size(&self) -> usize {
    self.len()
  }

  fn bytes_used(&self) -> usize {
    ChunkedPriorityQueue::bytes_used(self)
  }

  fn implementation_name(&self) -> &'static str {
    ChunkedPriorityQueue::implementation_name(self)
  }
}

/// Baseline backed by the standard library's binary heap.
#[derive(Debug, Default, Clone)]
pub struct HeapPriorityQueue {
  heap: BinaryHeap<i32>,
}

impl PriorityQueue for HeapPriorityQueue {
  fn enqueue(&mut self, value: i32) {
    self.heap.push(value);
  }

  fn try_dequeue_max(&mut self) -> Result<i32, Underflow> {
    self.heap.pop().ok_or(Underflow)
  }

  fn peek_max(&self) -> Option<i32> {
    self.heap.peek().copied()
  }

  fn is_empty(&self) -> bool {
    self.heap.is_empty()
  }

  fn size(&self) -> usize {
    self.heap.len()
  }

  fn bytes_used(&self) -> usize {
    size_of::<Self>() + self.heap.capacity() * size_of::<i32>()
  }

  fn implementation_name(&self) -> &'static str {
    "binary heap"
  }
}
