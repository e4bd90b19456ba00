mod chunk_list;
mod error;
pub mod mpsc;
mod pqueue;
#[cfg(feature = "sync")]
pub mod sync;

pub use chunk_list::ChunkedPriorityQueue;
pub use chunk_list::IntoIter;
pub use chunk_list::Iter;
pub use chunk_list::DEFAULT_CHUNK_CAPACITY;
pub use error::Underflow;
pub use pqueue::HeapPriorityQueue;
pub use pqueue::PriorityQueue;
