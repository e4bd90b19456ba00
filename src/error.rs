// Copyright 2018-2024 the Deno authors. MIT license.

use thiserror::Error;

/// Attempted to remove the maximum from an empty priority queue.
///
/// Callers are expected to check `is_empty()` first, so the panicking
/// `dequeue_max` surfaces this as a precondition violation. The `try_`
/// variants hand it back instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("tried to dequeue max from an empty priority queue")]
pub struct Underflow;
