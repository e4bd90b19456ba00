// Copyright 2018-2024 the Deno authors. MIT license.

mod shared_queue;

pub use shared_queue::SharedPriorityQueue;
