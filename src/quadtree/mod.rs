//! A mutable point-region quadtree over 2-D integer points.
//!
//! The tree covers the square of side `2^k` centered at the origin. Leaf ("black") nodes hold up
//! to `bucketing_param` points; when a leaf overflows it splits into a "gray" node with four
//! quadrant children, and when deletions bring a gray node's point count back within the bucket
//! it collapses into a single leaf again.

#![warn(missing_docs)]

mod builder;
mod index;
mod node;
mod region;
mod r#trait;

pub use builder::{PRQuadTreeBuilder, DEFAULT_BUCKETING_PARAM};
pub use index::PRQuadTree;
pub use node::{BlackNode, GrayNode, QuadNode};
pub use region::Quadrant;
