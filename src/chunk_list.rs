// Copyright 2018-2024 the Deno authors. MIT license.

use std::fmt;
use std::iter::FusedIterator;
use std::mem::size_of;

use crate::error::Underflow;

/// Number of values a chunk holds when no capacity is given.
pub const DEFAULT_CHUNK_CAPACITY: usize = 4;

/// A cell in the chain. Occupied values live at `[0, len)` in
/// descending order.
struct Chunk<const K: usize> {
  values: [i32; K],
  len: usize,
  next: Option<Box<Chunk<K>>>,
}

impl<const K: usize> Chunk<K> {
  fn with_value(value: i32, next: Option<Box<Chunk<K>>>) -> Box<Self> {
    let mut values = [0; K];
    values[0] = value;
    Box::new(Self {
      values,
      len: 1,
      next,
    })
  }

  fn values(&self) -> &[i32] {
    &self.values[..self.len]
  }

  fn is_full(&self) -> bool {
    self.len == K
  }

  /// First occupied slot holding a value smaller than `value`.
  fn insertion_slot(&self, value: i32) -> Option<usize> {
    self.values().iter().position(|&current| value > current)
  }

  fn shift_add(&mut self, value: i32) {
    debug_assert!(!self.is_full());
    let index = self.insertion_slot(value).unwrap_or(self.len);
    self.values.copy_within(index..self.len, index + 1);
    self.values[index] = value;
    self.len += 1;
  }

  /// Moves the back half of a full chunk into a new chunk linked right
  /// after this one, then adds `value` to whichever half it belongs in.
  /// With an odd capacity the front half keeps the extra value.
  fn split_add(&mut self, value: i32) {
    debug_assert!(self.is_full());
    let keep = K - K / 2;
    let mut back = Box::new(Self {
      values: [0; K],
      len: K - keep,
      next: self.next.take(),
    });
    back.values[..K - keep].copy_from_slice(&self.values[keep..]);
    self.len = keep;
    tracing::trace!(value, front = keep, back = back.len, "split full chunk");

    if self.insertion_slot(value).is_some() {
      self.shift_add(value);
    } else {
      back.shift_add(value);
    }
    self.next = Some(back);
  }

  fn remove_first(&mut self) -> i32 {
    let value = self.values[0];
    self.values.copy_within(1..self.len, 0);
    self.len -= 1;
    value
  }
}

/// An integer priority queue stored in a linked chain of chunks that
/// each hold up to `K` values.
///
/// Reading every chunk front to back yields the values in descending
/// order, so the maximum is always the first value of the first chunk.
/// Duplicate values are allowed.
pub struct ChunkedPriorityQueue<const K: usize = DEFAULT_CHUNK_CAPACITY> {
  head: Option<Box<Chunk<K>>>,
}

impl ChunkedPriorityQueue {
  /// Creates an empty queue using the default chunk capacity.
  pub fn new() -> Self {
    Self::default()
  }
}

impl<const K: usize> Default for ChunkedPriorityQueue<K> {
  fn default() -> Self {
    #[allow(clippy::let_unit_value)]
    let () = Self::CAPACITY_CHECK;
    Self { head: None }
  }
}

impl<const K: usize> ChunkedPriorityQueue<K> {
  // splitting a single slot chunk would leave an empty chunk behind
  const CAPACITY_CHECK: () = assert!(K >= 2, "chunk capacity must be at least 2");

  /// Inserts `value` at its position in descending order.
  pub fn enqueue(&mut self, value: i32) {
    let Some(head) = self.head.as_deref() else {
      tracing::trace!(value, "allocated first chunk");
      self.head = Some(Chunk::with_value(value, None));
      return;
    };

    if head.is_full() && value > head.values[0] {
      // new maximum and no room up front
      tracing::trace!(value, "allocated new head chunk");
      let next = self.head.take();
      self.head = Some(Chunk::with_value(value, next));
      return;
    }

    let mut cursor = self.head.as_deref_mut();
    while let Some(chunk) = cursor {
      if chunk.insertion_slot(value).is_some() {
        if chunk.is_full() {
          chunk.split_add(value);
        } else {
          chunk.shift_add(value);
        }
        return;
      }

      // The value sorts after everything in this chunk. Keep it here
      // when there is room and the next chunk can't take it without
      // splitting.
      let belongs_here = chunk.next.as_deref().map_or(true, |next| {
        next.is_full() && value > next.values[0]
      });
      if belongs_here && !chunk.is_full() {
        chunk.shift_add(value);
        return;
      }
      if chunk.next.is_none() {
        tracing::trace!(value, "allocated new tail chunk");
        chunk.next = Some(Chunk::with_value(value, None));
        return;
      }
      cursor = chunk.next.as_deref_mut();
    }
  }

  /// Removes and returns the maximum value.
  ///
  /// # Panics
  ///
  /// Panics when the queue is empty. Use [`Self::try_dequeue_max`] to get
  /// an [`Underflow`] error instead.
  pub fn dequeue_max(&mut self) -> i32 {
    match self.try_dequeue_max() {
      Ok(value) => value,
      Err(err) => panic!("{err}"),
    }
  }

  /// Removes and returns the maximum value, or [`Underflow`] when the
  /// queue is empty. The queue is left untouched on error.
  pub fn try_dequeue_max(&mut self) -> Result<i32, Underflow> {
    let head = self.head.as_deref_mut().ok_or(Underflow)?;
    let value = head.remove_first();
    if head.len == 0 {
      if let Some(mut released) = self.head.take() {
        self.head = released.next.take();
        tracing::trace!(value, "released emptied head chunk");
      }
    }
    Ok(value)
  }

  /// The maximum value without removing it.
  pub fn peek_max(&self) -> Option<i32> {
    self.head.as_deref().map(|head| head.values[0])
  }

  pub fn is_empty(&self) -> bool {
    self.head.is_none()
  }

  /// Number of values in the queue. Walks every chunk.
  pub fn len(&self) -> usize {
    self.chunks().map(|chunk| chunk.len).sum()
  }

  pub fn chunk_count(&self) -> usize {
    self.chunks().count()
  }

  /// Bytes used by the queue itself plus every live chunk.
  pub fn bytes_used(&self) -> usize {
    size_of::<Self>() + self.chunk_count() * size_of::<Chunk<K>>()
  }

  pub fn implementation_name(&self) -> &'static str {
    "chunk list"
  }

  /// The occupied values of each chunk, front to back.
  pub fn debug_dump(&self) -> Vec<Vec<i32>> {
    self.chunks().map(|chunk| chunk.values().to_vec()).collect()
  }

  /// Emits the chunk layout as `debug` level tracing events.
  pub fn log_debug_info(&self) {
    tracing::debug!("start of chunk list debug info");
    for (cell, chunk) in self.chunks().enumerate() {
      tracing::debug!(
        cell,
        values = ?chunk.values(),
        has_next = chunk.next.is_some(),
        "chunk"
      );
    }
    tracing::debug!("end of chunk list debug info");
  }

  /// Values in descending order without removing them.
  pub fn iter(&self) -> Iter<'_, K> {
    Iter {
      chunk: self.head.as_deref(),
      slot: 0,
    }
  }

  /// Releases every chunk.
  pub fn clear(&mut self) {
    // unlink one at a time so a long chain doesn't drop recursively
    let mut next = self.head.take();
    while let Some(mut chunk) = next {
      next = chunk.next.take();
    }
  }

  fn chunks(&self) -> impl Iterator<Item = &Chunk<K>> {
    std::iter::successors(self.head.as_deref(), |chunk| chunk.next.as_deref())
  }
}

impl<const K: usize> Drop for ChunkedPriorityQueue<K> {
  fn drop(&mut self) {
    self.clear();
  }
}

impl<const K: usize> fmt::Debug for ChunkedPriorityQueue<K> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.chunks().map(Chunk::values)).finish()
  }
}

/// One line per chunk with its values separated by spaces.
impl<const K: usize> fmt::Display for ChunkedPriorityQueue<K> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for chunk in self.chunks() {
      for (i, value) in chunk.values().iter().enumerate() {
        if i > 0 {
          write!(f, " ")?;
        }
        write!(f, "{value}")?;
      }
      writeln!(f)?;
    }
    Ok(())
  }
}

impl<const K: usize> Extend<i32> for ChunkedPriorityQueue<K> {
  fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
    for value in iter {
      self.enqueue(value);
    }
  }
}

impl<const K: usize> FromIterator<i32> for ChunkedPriorityQueue<K> {
  fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
    let mut queue = Self::default();
    queue.extend(iter);
    queue
  }
}

/// Borrowing iterator over the values in descending order.
pub struct Iter<'a, const K: usize> {
  chunk: Option<&'a Chunk<K>>,
  slot: usize,
}

impl<const K: usize> Iterator for Iter<'_, K> {
  type Item = i32;

  fn next(&mut self) -> Option<i32> {
    loop {
      let chunk = self.chunk?;
      if let Some(&value) = chunk.values().get(self.slot) {
        self.slot += 1;
        return Some(value);
      }
      self.chunk = chunk.next.as_deref();
      self.slot = 0;
    }
  }
}

impl<const K: usize> FusedIterator for Iter<'_, K> {}

impl<'a, const K: usize> IntoIterator for &'a ChunkedPriorityQueue<K> {
  type Item = i32;
  type IntoIter = Iter<'a, K>;

  fn into_iter(self) -> Iter<'a, K> {
    self.iter()
  }
}

/// Draining iterator that dequeues the maximum on each step.
pub struct IntoIter<const K: usize>(ChunkedPriorityQueue<K>);

impl<const K: usize> Iterator for IntoIter<K> {
  type Item = i32;

  fn next(&mut self) -> Option<i32> {
    self.0.try_dequeue_max().ok()
  }
}

impl<const K: usize> FusedIterator for IntoIter<K> {}

impl<const K: usize> IntoIterator for ChunkedPriorityQueue<K> {
  type Item = i32;
  type IntoIter = IntoIter<K>;

  fn into_iter(self) -> IntoIter<K> {
    IntoIter(self)
  }
}
