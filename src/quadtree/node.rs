//! Black (leaf) and gray (internal) quadtree nodes and the recursive algorithms over them.

use tinyvec::ArrayVec;

use crate::error::Result;
use crate::knn::{BoundedPriorityQueue, NearestNeighbor};
use crate::point::Point;
use crate::quadtree::region::{Quadrant, Region};
use crate::r#type::CoordNum;

type Link<N> = Option<Box<QuadNode<N>>>;

/// A stored point and its insertion sequence number, which breaks distance ties in queries.
#[derive(Debug, Clone)]
pub(crate) struct Entry<N: CoordNum> {
    pub(crate) point: Point<N>,
    pub(crate) seq: u64,
}

/// A non-empty node of a [`PRQuadTree`][crate::quadtree::PRQuadTree]. Empty quadrants are
/// represented by the absence of a child.
#[derive(Debug, Clone)]
pub enum QuadNode<N: CoordNum> {
    /// A leaf holding a bucket of points.
    Black(BlackNode<N>),
    /// An internal node with four quadrant children.
    Gray(GrayNode<N>),
}

/// A leaf holding at most `bucketing_param` points of its region.
#[derive(Debug, Clone)]
pub struct BlackNode<N: CoordNum> {
    region: Region<N>,
    entries: Vec<Entry<N>>,
}

/// An internal node. It always holds more than `bucketing_param` points in total; otherwise it
/// is collapsed into a [`BlackNode`].
#[derive(Debug, Clone)]
pub struct GrayNode<N: CoordNum> {
    region: Region<N>,
    children: [Link<N>; 4],
    /// Total number of points under this node.
    count: usize,
}

impl<N: CoordNum> BlackNode<N> {
    /// The points held by this leaf.
    pub fn points(&self) -> impl ExactSizeIterator<Item = &Point<N>> + '_ {
        self.entries.iter().map(|e| &e.point)
    }
}

impl<N: CoordNum> GrayNode<N> {
    /// The total number of points under this node.
    pub fn count(&self) -> usize {
        self.count
    }

    /// The child covering `quadrant`, or `None` if that quadrant is empty.
    pub fn child(&self, quadrant: Quadrant) -> Option<&QuadNode<N>> {
        self.children[quadrant.index()].as_deref()
    }

    /// All non-empty children, in Z-order.
    pub fn children(&self) -> impl Iterator<Item = (Quadrant, &QuadNode<N>)> + '_ {
        Quadrant::ALL
            .into_iter()
            .filter_map(|q| self.child(q).map(|child| (q, child)))
    }

    /// Non-empty children ordered by the distance from `anchor` to their squares.
    fn children_by_distance(&self, anchor: &Point<N>) -> ArrayVec<[(f64, usize); 4]> {
        let mut order: ArrayVec<[(f64, usize); 4]> = self
            .children
            .iter()
            .enumerate()
            .filter_map(|(i, child)| {
                child
                    .as_deref()
                    .map(|child| (child.region().distance_to(anchor), i))
            })
            .collect();
        order.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));
        order
    }
}

impl<N: CoordNum> QuadNode<N> {
    pub(crate) fn leaf(region: Region<N>, entry: Entry<N>) -> Self {
        Self::Black(BlackNode {
            region,
            entries: vec![entry],
        })
    }

    /// Build the subtree holding `entries` over `region`, splitting for as long as a bucket
    /// overflows.
    pub(crate) fn build(
        region: Region<N>,
        entries: Vec<Entry<N>>,
        bucketing_param: usize,
    ) -> Result<Self> {
        if entries.len() <= bucketing_param {
            return Ok(Self::Black(BlackNode { region, entries }));
        }

        let count = entries.len();
        let mut buckets: [Vec<Entry<N>>; 4] = Default::default();
        for entry in entries {
            buckets[region.quadrant(&entry.point).index()].push(entry);
        }

        let mut children: [Link<N>; 4] = Default::default();
        for (quadrant, bucket) in Quadrant::ALL.into_iter().zip(buckets) {
            if bucket.is_empty() {
                continue;
            }
            let child = Self::build(region.child(quadrant)?, bucket, bucketing_param)?;
            children[quadrant.index()] = Some(Box::new(child));
        }

        Ok(Self::Gray(GrayNode {
            region,
            children,
            count,
        }))
    }

    #[inline]
    pub(crate) fn region(&self) -> &Region<N> {
        match self {
            Self::Black(black) => &black.region,
            Self::Gray(gray) => &gray.region,
        }
    }

    /// The center of the square spanned by this node.
    pub fn centroid(&self) -> &Point<N> {
        self.region().centroid()
    }

    /// The exponent of the square spanned by this node, whose side is `2^k`.
    pub fn k(&self) -> u32 {
        self.region().k()
    }

    /// The number of points under this node.
    pub fn count(&self) -> usize {
        match self {
            Self::Black(black) => black.entries.len(),
            Self::Gray(gray) => gray.count,
        }
    }

    /// The height of the subtree rooted at this node: 0 for a black node.
    pub fn height(&self) -> usize {
        match self {
            Self::Black(_) => 0,
            Self::Gray(gray) => {
                1 + gray
                    .children()
                    .map(|(_, child)| child.height())
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// Insert `entry`, whose point must lie within this node's region.
    ///
    /// On error the subtree is left unchanged: a split is fully built before it replaces the
    /// overflowing leaf.
    pub(crate) fn insert(&mut self, entry: Entry<N>, bucketing_param: usize) -> Result<()> {
        match self {
            Self::Black(black) if black.entries.len() < bucketing_param => {
                black.entries.push(entry);
            }
            Self::Black(black) => {
                let mut entries = Vec::with_capacity(black.entries.len() + 1);
                entries.extend(black.entries.iter().cloned());
                entries.push(entry);
                let split = Self::build(black.region.clone(), entries, bucketing_param)?;
                log::debug!(
                    "split black node at {} (k = {}) into gray node",
                    split.centroid(),
                    split.k()
                );
                *self = split;
            }
            Self::Gray(gray) => {
                let quadrant = gray.region.quadrant(&entry.point);
                let slot = &mut gray.children[quadrant.index()];
                if let Some(child) = slot {
                    child.insert(entry, bucketing_param)?;
                } else {
                    let region = gray.region.child(quadrant)?;
                    *slot = Some(Box::new(Self::leaf(region, entry)));
                }
                gray.count += 1;
            }
        }
        Ok(())
    }

    /// Remove one occurrence of `point`, returning whether it was found.
    ///
    /// A gray node whose count drops to `bucketing_param` or below collapses into a single
    /// black node. A black node may be left empty; the owner drops it.
    pub(crate) fn delete(&mut self, point: &Point<N>, bucketing_param: usize) -> bool {
        match self {
            Self::Black(black) => match black.entries.iter().position(|e| e.point == *point) {
                Some(i) => {
                    black.entries.remove(i);
                    true
                }
                None => false,
            },
            Self::Gray(gray) => {
                let index = gray.region.quadrant(point).index();
                let slot = &mut gray.children[index];
                let Some(child) = slot else {
                    return false;
                };
                if !child.delete(point, bucketing_param) {
                    return false;
                }
                if child.count() == 0 {
                    *slot = None;
                }
                gray.count -= 1;

                if gray.count <= bucketing_param {
                    let mut entries = Vec::with_capacity(gray.count);
                    for (_, child) in gray.children() {
                        child.collect_entries(&mut entries);
                    }
                    log::debug!(
                        "collapse gray node at {} (k = {}) holding {} points",
                        gray.region.centroid(),
                        gray.region.k(),
                        entries.len()
                    );
                    let region = gray.region.clone();
                    *self = Self::Black(BlackNode { region, entries });
                }
                true
            }
        }
    }

    pub(crate) fn search(&self, point: &Point<N>) -> bool {
        match self {
            Self::Black(black) => black.entries.iter().any(|e| e.point == *point),
            Self::Gray(gray) => gray
                .child(gray.region.quadrant(point))
                .is_some_and(|child| child.search(point)),
        }
    }

    pub(crate) fn range(&self, anchor: &Point<N>, radius: f64, results: &mut Vec<Point<N>>) {
        match self {
            Self::Black(black) => {
                for p in black.points() {
                    if p != anchor && p.distance_unchecked(anchor) <= radius {
                        results.push(p.clone());
                    }
                }
            }
            Self::Gray(gray) => {
                for (_, child) in gray.children() {
                    // skip quadrants whose square doesn't intersect the query disk
                    if child.region().distance_to(anchor) <= radius {
                        child.range(anchor, radius, results);
                    }
                }
            }
        }
    }

    pub(crate) fn nearest_neighbor(
        &self,
        anchor: &Point<N>,
        mut best: NearestNeighbor<N>,
    ) -> NearestNeighbor<N> {
        match self {
            Self::Black(black) => {
                for e in black.entries.iter() {
                    if e.point != *anchor {
                        let distance = e.point.distance_unchecked(anchor);
                        best = best.offer_ordered(&e.point, e.seq, distance);
                    }
                }
            }
            Self::Gray(gray) => {
                for (bound, i) in gray.children_by_distance(anchor) {
                    // Children are sorted, so every later square is at least as far. A square at
                    // exactly the best distance may still hold an earlier-inserted tie.
                    if bound > best.distance() {
                        break;
                    }
                    if let Some(child) = gray.children[i].as_deref() {
                        best = child.nearest_neighbor(anchor, best);
                    }
                }
            }
        }
        best
    }

    pub(crate) fn k_nearest_neighbors(
        &self,
        anchor: &Point<N>,
        queue: &mut BoundedPriorityQueue<Point<N>>,
    ) -> Result<()> {
        match self {
            Self::Black(black) => {
                for e in black.entries.iter() {
                    if e.point != *anchor {
                        let distance = e.point.distance_unchecked(anchor);
                        queue.enqueue_ordered(e.point.clone(), distance, e.seq)?;
                    }
                }
            }
            Self::Gray(gray) => {
                for (bound, i) in gray.children_by_distance(anchor) {
                    let worst = queue.last_priority().unwrap_or(f64::INFINITY);
                    if queue.is_full() && bound > worst {
                        break;
                    }
                    if let Some(child) = gray.children[i].as_deref() {
                        child.k_nearest_neighbors(anchor, queue)?;
                    }
                }
            }
        }
        Ok(())
    }

    pub(crate) fn collect_entries(&self, entries: &mut Vec<Entry<N>>) {
        match self {
            Self::Black(black) => entries.extend(black.entries.iter().cloned()),
            Self::Gray(gray) => {
                for (_, child) in gray.children() {
                    child.collect_entries(entries);
                }
            }
        }
    }
}
