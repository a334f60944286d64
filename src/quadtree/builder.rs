use crate::error::Result;
use crate::point::Point;
use crate::quadtree::node::{Entry, QuadNode};
use crate::quadtree::region::Region;
use crate::quadtree::PRQuadTree;
use crate::r#type::CoordNum;

/// The number of points a black node holds when no bucketing parameter is given.
pub const DEFAULT_BUCKETING_PARAM: usize = 1;

/// A builder to bulk load a [`PRQuadTree`].
///
/// The shape of a PR quadtree depends only on the set of points it holds, so bulk loading gives
/// the same tree as inserting the points one at a time. The builder partitions every point once
/// per level instead of repeatedly splitting leaves.
#[derive(Debug, Clone)]
pub struct PRQuadTreeBuilder<N: CoordNum = i32> {
    tree: PRQuadTree<N>,
    points: Vec<Point<N>>,
}

impl<N: CoordNum> PRQuadTreeBuilder<N> {
    /// Create a new builder for a tree spanning the square of side `2^k`, with leaves holding
    /// up to [`DEFAULT_BUCKETING_PARAM`] points.
    pub fn new(k: u32) -> Result<Self> {
        Self::new_with_bucketing_param(k, DEFAULT_BUCKETING_PARAM)
    }

    /// Create a new builder with an explicit bucketing parameter.
    pub fn new_with_bucketing_param(k: u32, bucketing_param: usize) -> Result<Self> {
        Ok(Self {
            tree: PRQuadTree::new(k, bucketing_param)?,
            points: vec![],
        })
    }

    /// Add a copy of a point, returning its insertion index.
    ///
    /// The point must be 2-D and lie within the tree's square.
    pub fn add(&mut self, point: &Point<N>) -> Result<usize> {
        self.tree.check_point(point)?;
        self.points.push(point.clone());
        Ok(self.points.len() - 1)
    }

    /// Consume this builder, subdividing the square until every leaf fits its bucket.
    pub fn finish(self) -> Result<PRQuadTree<N>> {
        let Self { mut tree, points } = self;
        log::debug!(
            "building quadtree over {} points (k = {}, bucketing parameter {})",
            points.len(),
            tree.k,
            tree.bucketing_param
        );
        tree.next_seq = points.len() as u64;
        if !points.is_empty() {
            let entries = points
                .into_iter()
                .zip(0..)
                .map(|(point, seq)| Entry { point, seq })
                .collect();
            let root = QuadNode::build(Region::root(tree.k), entries, tree.bucketing_param)?;
            tree.root = Some(root);
        }
        Ok(tree)
    }
}
