use crate::error::{Result, SpatialIndexError};
use crate::kdtree::node::{KDTreeNode, Link};
use crate::kdtree::KDTree;
use crate::point::Point;
use crate::r#type::CoordNum;

/// A builder to bulk load a balanced [`KDTree`].
///
/// Inserting points one at a time yields a tree whose depth depends on insertion order. The
/// builder instead collects every point and kd-sorts them: each level takes the median along its
/// axis, so the resulting tree has height `floor(log2(n))` for distinct coordinates.
#[derive(Debug, Clone)]
pub struct KDTreeBuilder<N: CoordNum = i32> {
    dims: usize,
    points: Vec<Point<N>>,
}

impl<N: CoordNum> KDTreeBuilder<N> {
    /// Create a new builder for points with `dims` coordinates.
    pub fn new(dims: usize) -> Result<Self> {
        Self::new_with_capacity(dims, 0)
    }

    /// Create a new builder, reserving space for `num_items` points.
    pub fn new_with_capacity(dims: usize, num_items: usize) -> Result<Self> {
        if dims == 0 {
            return Err(SpatialIndexError::InvalidDimensionality(dims));
        }
        Ok(Self {
            dims,
            points: Vec::with_capacity(num_items),
        })
    }

    /// Add a copy of a point to the index, returning its insertion index.
    pub fn add(&mut self, point: &Point<N>) -> Result<usize> {
        point.check_dim(self.dims)?;
        self.points.push(point.clone());
        Ok(self.points.len() - 1)
    }

    /// Consume this builder, performing the k-d sort and generating a tree ready for queries
    /// and further mutation.
    pub fn finish(self) -> KDTree<N> {
        let num_items = self.points.len();
        log::debug!(
            "building balanced kdtree over {} points in {} dimensions",
            num_items,
            self.dims
        );
        // Points keep their insertion index as sequence number
        let items = self.points.into_iter().zip(0..).collect();
        let root = sort(items, 0, self.dims);
        KDTree {
            root,
            dims: self.dims,
            num_items,
            next_seq: num_items as u64,
        }
    }
}

/// Recursively kd-sort `items`, splitting on `axis` and taking turns with depth.
fn sort<N: CoordNum>(mut items: Vec<(Point<N>, u64)>, axis: usize, dims: usize) -> Link<N> {
    if items.is_empty() {
        return None;
    }

    items.sort_unstable_by_key(|(p, _)| p.coord(axis));
    let median = items[items.len() / 2].0.coord(axis);
    // The first point of the median's run of equal coordinates, so that everything to its left
    // is strictly smaller
    let m = items.partition_point(|(p, _)| p.coord(axis) < median);

    let right = items.split_off(m + 1);
    let (point, seq) = items.pop()?;
    let left = items;

    let next = (axis + 1) % dims;
    let node =
        KDTreeNode::with_children(point, seq, sort(left, next, dims), sort(right, next, dims));
    Some(Box::new(node))
}
