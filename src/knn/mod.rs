//! Shared scratch state for nearest-neighbor queries.

mod bounded_queue;
mod nearest;

pub use bounded_queue::{BoundedPriorityQueue, Cursor};
pub use nearest::NearestNeighbor;
