//! A mutable K-D Tree over integer points of any fixed dimensionality.
//!
//! Each level of the tree splits on one coordinate axis, cycling through `0..dims` with depth.
//! The tree performs no rebalancing on insert, so its depth is a function of insertion order;
//! use [`KDTreeBuilder`] to bulk load a balanced tree.

#![warn(missing_docs)]

mod builder;
mod index;
mod node;
mod r#trait;

pub use builder::KDTreeBuilder;
pub use index::KDTree;
pub use node::KDTreeNode;
