// Copyright 2018-2024 the Deno authors. MIT license.

use std::cell::RefCell;
use std::fmt::Formatter;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::Context;
use std::task::Poll;
use std::task::Waker;

use futures_util::Stream;

use crate::ChunkedPriorityQueue;

pub struct SendError(pub i32);

impl std::fmt::Debug for SendError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("SendError").field(&self.0).finish()
  }
}

pub struct Sender {
  shared: Rc<RefCell<Shared>>,
}

impl Sender {
  pub fn send(&self, value: i32) -> Result<(), SendError> {
    let mut shared = self.shared.borrow_mut();
    if shared.closed {
      return Err(SendError(value));
    }
    shared.queue.enqueue(value);
    shared.wake();
    Ok(())
  }
}

impl Clone for Sender {
  fn clone(&self) -> Self {
    self.shared.borrow_mut().senders += 1;
    Self {
      shared: self.shared.clone(),
    }
  }
}

impl Drop for Sender {
  fn drop(&mut self) {
    let mut shared = self.shared.borrow_mut();
    shared.senders -= 1;
    if shared.senders == 0 {
      shared.closed = true;
      shared.wake();
    }
  }
}

pub struct Receiver {
  shared: Rc<RefCell<Shared>>,
}

impl Drop for Receiver {
  fn drop(&mut self) {
    let mut shared = self.shared.borrow_mut();
    shared.closed = true;
  }
}

impl Receiver {
  /// Receives the highest buffered value, returning `None` if there
  /// are no more items and the channel is closed.
  pub async fn recv(&mut self) -> Option<i32> {
    // note: this is `&mut self` so that it can't be polled
    // concurrently and lose a waker
    RecvFuture {
      shared: &self.shared,
    }
    .await
  }

  /// Takes the highest buffered value without waiting.
  pub fn try_recv(&mut self) -> Option<i32> {
    self.shared.borrow_mut().queue.try_dequeue_max().ok()
  }

  /// Number of values waiting to be received.
  pub fn len(&self) -> usize {
    self.shared.borrow().queue.len()
  }

  pub fn is_empty(&self) -> bool {
    self.shared.borrow().queue.is_empty()
  }
}

impl Stream for Receiver {
  type Item = i32;

  fn poll_next(
    self: Pin<&mut Self>,
    cx: &mut Context<'_>,
  ) -> Poll<Option<Self::Item>> {
    poll_recv(&self.shared, cx)
  }
}

struct RecvFuture<'a> {
  shared: &'a RefCell<Shared>,
}

impl<'a> Future for RecvFuture<'a> {
  type Output = Option<i32>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    poll_recv(self.shared, cx)
  }
}

fn poll_recv(shared: &RefCell<Shared>, cx: &mut Context<'_>) -> Poll<Option<i32>> {
  let mut shared = shared.borrow_mut();
  if let Ok(value) = shared.queue.try_dequeue_max() {
    Poll::Ready(Some(value))
  } else if shared.closed {
    Poll::Ready(None)
  } else {
    shared.register(cx.waker());
    Poll::Pending
  }
}

struct Shared {
  queue: ChunkedPriorityQueue,
  waker: Option<Waker>,
  senders: usize,
  closed: bool,
}

impl Shared {
  fn register(&mut self, waker: &Waker) {
    // keep the stored waker unless it would wake a different task
    let is_same = self
      .waker
      .as_ref()
      .map(|w| w.will_wake(waker))
      .unwrap_or(false);
    if !is_same {
      self.waker = Some(waker.clone());
    }
  }

  fn wake(&mut self) {
    if let Some(waker) = self.waker.take() {
      waker.wake();
    }
  }
}

/// A ![`Sync`] and ![`Send`] unbounded channel whose receiver always
/// yields the highest value sent so far.
pub fn unbounded_priority_channel() -> (Sender, Receiver) {
  let shared = Rc::new(RefCell::new(Shared {
    queue: ChunkedPriorityQueue::new(),
    waker: None,
    senders: 1,
    closed: false,
  }));
  (
    Sender {
      shared: shared.clone(),
    },
    Receiver { shared },
  )
}
