//! Nodes of the K-D Tree and the recursive algorithms over them.

use crate::error::Result;
use crate::knn::{BoundedPriorityQueue, NearestNeighbor};
use crate::point::Point;
use crate::r#type::CoordNum;

pub(crate) type Link<N> = Option<Box<KDTreeNode<N>>>;

/// A node in the [`KDTree`][crate::kdtree::KDTree].
///
/// Relative to the axis assigned to the node's depth, every point in the right subtree has a
/// coordinate greater than or equal to this node's, and every point in the left subtree a
/// strictly smaller one.
#[derive(Debug, Clone)]
pub struct KDTreeNode<N: CoordNum> {
    point: Point<N>,
    /// Insertion sequence number, which breaks distance ties in queries.
    seq: u64,
    /// Cached height of the subtree rooted here; 0 for a leaf.
    height: usize,
    left: Link<N>,
    right: Link<N>,
}

#[inline]
fn link_height<N: CoordNum>(link: &Link<N>) -> isize {
    link.as_ref().map_or(-1, |node| node.height as isize)
}

impl<N: CoordNum> KDTreeNode<N> {
    pub(crate) fn leaf(point: Point<N>, seq: u64) -> Self {
        Self {
            point,
            seq,
            height: 0,
            left: None,
            right: None,
        }
    }

    pub(crate) fn with_children(point: Point<N>, seq: u64, left: Link<N>, right: Link<N>) -> Self {
        let mut node = Self {
            point,
            seq,
            height: 0,
            left,
            right,
        };
        node.update_height();
        node
    }

    /// The point held by this node.
    pub fn point(&self) -> &Point<N> {
        &self.point
    }

    /// The subtree holding points strictly smaller along this node's axis.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The subtree holding points greater than or equal along this node's axis.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// The height of the subtree rooted at this node. A leaf has height 0.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `true` if this is a leaf node without children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    #[inline]
    fn update_height(&mut self) {
        let tallest = link_height(&self.left).max(link_height(&self.right));
        self.height = (tallest + 1) as usize;
    }

    pub(crate) fn insert(&mut self, point: Point<N>, seq: u64, axis: usize, dims: usize) {
        let next = (axis + 1) % dims;
        let child = if point.coord(axis) >= self.point.coord(axis) {
            &mut self.right
        } else {
            &mut self.left
        };
        match child {
            Some(node) => node.insert(point, seq, next, dims),
            None => *child = Some(Box::new(Self::leaf(point, seq))),
        }
        self.update_height();
    }

    pub(crate) fn search(&self, point: &Point<N>, mut axis: usize, dims: usize) -> bool {
        let mut current = Some(self);
        while let Some(node) = current {
            if node.point == *point {
                return true;
            }
            current = if point.coord(axis) >= node.point.coord(axis) {
                node.right()
            } else {
                node.left()
            };
            axis = (axis + 1) % dims;
        }
        false
    }

    /// The node with the smallest coordinate along `target` in the subtree rooted here, whose
    /// own split axis is `axis`.
    fn min_along(&self, target: usize, axis: usize, dims: usize) -> &Self {
        let next = (axis + 1) % dims;
        let mut best = self;
        if let Some(left) = self.left() {
            let candidate = left.min_along(target, next, dims);
            if candidate.point.coord(target) < best.point.coord(target) {
                best = candidate;
            }
        }
        // Along its own axis, the right subtree can't hold anything smaller than this node
        if axis != target {
            if let Some(right) = self.right() {
                let candidate = right.min_along(target, next, dims);
                if candidate.point.coord(target) < best.point.coord(target) {
                    best = candidate;
                }
            }
        }
        best
    }

    pub(crate) fn range(
        &self,
        anchor: &Point<N>,
        radius: f64,
        axis: usize,
        dims: usize,
        results: &mut Vec<Point<N>>,
    ) {
        if self.point != *anchor && self.point.distance_unchecked(anchor) <= radius {
            results.push(self.point.clone());
        }

        let next = (axis + 1) % dims;
        let split = self.point.coord(axis).as_f64();
        let a = anchor.coord(axis).as_f64();

        // queue search in halves that intersect the query
        if let Some(left) = self.left() {
            if a - radius < split {
                left.range(anchor, radius, next, dims, results);
            }
        }
        if let Some(right) = self.right() {
            if a + radius >= split {
                right.range(anchor, radius, next, dims, results);
            }
        }
    }

    /// The (near, far) children relative to `anchor`, and the gap between the anchor and this
    /// node's splitting plane.
    #[inline]
    fn split_children(&self, anchor: &Point<N>, axis: usize) -> (Option<&Self>, Option<&Self>, f64) {
        let gap = anchor.coord(axis).as_f64() - self.point.coord(axis).as_f64();
        if gap >= 0.0 {
            (self.right(), self.left(), gap)
        } else {
            (self.left(), self.right(), -gap)
        }
    }

    pub(crate) fn nearest_neighbor(
        &self,
        anchor: &Point<N>,
        axis: usize,
        dims: usize,
        mut best: NearestNeighbor<N>,
    ) -> NearestNeighbor<N> {
        if self.point != *anchor {
            let distance = self.point.distance_unchecked(anchor);
            best = best.offer_ordered(&self.point, self.seq, distance);
        }

        let next = (axis + 1) % dims;
        let (near, far, gap) = self.split_children(anchor, axis);
        if let Some(near) = near {
            best = near.nearest_neighbor(anchor, next, dims, best);
        }
        // Nothing across the splitting plane is closer than the gap, though a point exactly at
        // the gap may tie with an earlier insertion order
        if let Some(far) = far {
            if gap <= best.distance() {
                best = far.nearest_neighbor(anchor, next, dims, best);
            }
        }
        best
    }

    pub(crate) fn k_nearest_neighbors(
        &self,
        anchor: &Point<N>,
        axis: usize,
        dims: usize,
        queue: &mut BoundedPriorityQueue<Point<N>>,
    ) -> Result<()> {
        if self.point != *anchor {
            let distance = self.point.distance_unchecked(anchor);
            queue.enqueue_ordered(self.point.clone(), distance, self.seq)?;
        }

        let next = (axis + 1) % dims;
        let (near, far, gap) = self.split_children(anchor, axis);
        if let Some(near) = near {
            near.k_nearest_neighbors(anchor, next, dims, queue)?;
        }
        if let Some(far) = far {
            let worst = queue.last_priority().unwrap_or(f64::INFINITY);
            if !queue.is_full() || gap <= worst {
                far.k_nearest_neighbors(anchor, next, dims, queue)?;
            }
        }
        Ok(())
    }

    pub(crate) fn collect_points(&self, points: &mut Vec<Point<N>>) {
        points.push(self.point.clone());
        if let Some(left) = self.left() {
            left.collect_points(points);
        }
        if let Some(right) = self.right() {
            right.collect_points(points);
        }
    }
}

/// Delete one occurrence of `point` from the subtree owned by `link`, whose root splits on
/// `axis`. With `seq`, only the copy inserted with that sequence number matches. Returns whether
/// a point was removed.
pub(crate) fn delete<N: CoordNum>(
    link: &mut Link<N>,
    point: &Point<N>,
    seq: Option<u64>,
    axis: usize,
    dims: usize,
) -> bool {
    let Some(node) = link.as_mut() else {
        return false;
    };
    let next = (axis + 1) % dims;

    if node.point != *point || seq.is_some_and(|seq| seq != node.seq) {
        // Every copy of a point lies on its search path, so an equal copy routes right
        let removed = if point.coord(axis) >= node.point.coord(axis) {
            delete(&mut node.right, point, seq, next, dims)
        } else {
            delete(&mut node.left, point, seq, next, dims)
        };
        if removed {
            node.update_height();
        }
        return removed;
    }

    if let Some(right) = node.right() {
        // Replace with the in-order successor along this node's axis
        let successor = right.min_along(axis, next, dims);
        let (successor, successor_seq) = (successor.point.clone(), successor.seq);
        let removed = delete(&mut node.right, &successor, Some(successor_seq), next, dims);
        debug_assert!(removed);
        node.point = successor;
        node.seq = successor_seq;
    } else if let Some(left) = node.left.take() {
        // The minimum of the left subtree along this axis is <= everything left in it, so the
        // remainder becomes a valid right subtree of the replacement
        let successor = left.min_along(axis, next, dims);
        let (successor, successor_seq) = (successor.point.clone(), successor.seq);
        let mut moved = Some(left);
        let removed = delete(&mut moved, &successor, Some(successor_seq), next, dims);
        debug_assert!(removed);
        node.right = moved;
        node.point = successor;
        node.seq = successor_seq;
    } else {
        *link = None;
        return true;
    }

    node.update_height();
    true
}
