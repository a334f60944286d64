#![doc = include_str!("../README.md")]

mod error;
pub mod kdtree;
pub mod knn;
mod point;
pub mod quadtree;
mod r#trait;
mod r#type;

pub use error::{Result, SpatialIndexError};
pub use point::Point;
pub use r#trait::SpatialQuerySolver;
pub use r#type::CoordNum;

#[cfg(test)]
pub(crate) mod test;
