use crate::error::{Result, SpatialIndexError};
use crate::knn::BoundedPriorityQueue;
use crate::point::Point;
use crate::r#type::CoordNum;

/// The query contract shared by every index in this crate.
///
/// Callers that only run queries can be agnostic to whether a [`KDTree`][crate::kdtree::KDTree]
/// or a [`PRQuadTree`][crate::quadtree::PRQuadTree] backs them. All queries exclude points equal
/// to the anchor itself.
pub trait SpatialQuerySolver<N: CoordNum> {
    /// All stored points whose Euclidean distance to `anchor` is at most `radius` (inclusive).
    ///
    /// Fails if `radius` is negative or NaN, or if `anchor` has the wrong dimensionality.
    fn range(&self, anchor: &Point<N>, radius: f64) -> Result<Vec<Point<N>>>;

    /// The stored point closest to `anchor`, or `None` when the index contains nothing besides
    /// the anchor.
    fn nearest_neighbor(&self, anchor: &Point<N>) -> Result<Option<Point<N>>>;

    /// Up to `k` stored points closest to `anchor`, ordered by ascending distance.
    ///
    /// Fails with [`SpatialIndexError::InvalidArgument`] if `k == 0`.
    fn k_nearest_neighbors(&self, k: usize, anchor: &Point<N>)
        -> Result<BoundedPriorityQueue<Point<N>>>;
}

pub(crate) fn check_radius(radius: f64) -> Result<()> {
    if !(radius >= 0.0) {
        return Err(SpatialIndexError::InvalidArgument(format!(
            "range radius must be non-negative, got {}",
            radius
        )));
    }
    Ok(())
}

pub(crate) fn check_k(k: usize) -> Result<()> {
    if k == 0 {
        return Err(SpatialIndexError::InvalidArgument(
            "k must be strictly positive".to_string(),
        ));
    }
    Ok(())
}
