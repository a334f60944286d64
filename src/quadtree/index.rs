use crate::error::{Result, SpatialIndexError};
use crate::point::Point;
use crate::quadtree::node::{Entry, QuadNode};
use crate::quadtree::region::Region;
use crate::r#type::CoordNum;

/// A mutable point-region quadtree over 2-D points.
///
/// ```
/// use spatial_index::quadtree::PRQuadTree;
/// use spatial_index::{Point, SpatialQuerySolver};
///
/// let mut tree = PRQuadTree::new(4, 1).unwrap();
/// for (x, y) in [(-5, 5), (5, 5), (-5, -5), (5, -5)] {
///     tree.insert(&Point::from([x, y])).unwrap();
/// }
/// assert_eq!(tree.count(), 4);
/// assert_eq!(tree.height(), 1);
///
/// let within = tree.range(&Point::from([0, 0]), 8.0).unwrap();
/// assert_eq!(within.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PRQuadTree<N: CoordNum = i32> {
    pub(crate) root: Option<QuadNode<N>>,
    pub(crate) k: u32,
    pub(crate) bucketing_param: usize,
    /// Sequence number handed to the next inserted point.
    pub(crate) next_seq: u64,
}

impl<N: CoordNum> PRQuadTree<N> {
    /// Create an empty tree spanning the square of side `2^k` centered at the origin, whose
    /// leaves hold up to `bucketing_param` points.
    ///
    /// `k` may be at most the bit width of `N`; at that exponent the tree spans every value of
    /// the coordinate type.
    pub fn new(k: u32, bucketing_param: usize) -> Result<Self> {
        if bucketing_param == 0 {
            return Err(SpatialIndexError::InvalidArgument(
                "bucketing parameter must be at least 1".to_string(),
            ));
        }
        if k > N::BITS {
            return Err(SpatialIndexError::InvalidArgument(format!(
                "region exponent {} exceeds the {}-bit coordinate range",
                k,
                N::BITS
            )));
        }
        Ok(Self {
            root: None,
            k,
            bucketing_param,
            next_seq: 0,
        })
    }

    /// The exponent of the root square, whose side is `2^k`.
    pub fn k(&self) -> u32 {
        self.k
    }

    /// The maximum number of points a black node holds.
    pub fn bucketing_param(&self) -> usize {
        self.bucketing_param
    }

    /// The number of points held by this tree.
    pub fn count(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.count())
    }

    /// Whether the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The height of the tree: -1 when empty, 0 when the root is a black node.
    pub fn height(&self) -> isize {
        self.root.as_ref().map_or(-1, |root| root.height() as isize)
    }

    /// Access the root node of the tree for manual traversal.
    pub fn root(&self) -> Result<&QuadNode<N>> {
        self.root.as_ref().ok_or(SpatialIndexError::EmptyStructure)
    }

    /// Whether `point` lies within the square covered by this tree.
    pub fn contains(&self, point: &Point<N>) -> bool {
        point.dim() == 2 && Region::root(self.k).contains(point)
    }

    pub(crate) fn check_point(&self, point: &Point<N>) -> Result<()> {
        point.check_dim(2)?;
        if !Region::root(self.k).contains(point) {
            return Err(SpatialIndexError::OutOfRegion(point.to_string()));
        }
        Ok(())
    }

    /// Insert a copy of `point`.
    ///
    /// Fails with [`SpatialIndexError::OutOfRegion`] if the point lies outside the tree's square,
    /// and with [`SpatialIndexError::CentroidAccuracy`] if storing it would require splitting a
    /// square too small to subdivide. The tree is unchanged on failure.
    pub fn insert(&mut self, point: &Point<N>) -> Result<()> {
        self.check_point(point)?;
        log::trace!("quadtree insert {}", point);
        let entry = Entry {
            point: point.clone(),
            seq: self.next_seq,
        };
        match self.root.as_mut() {
            Some(root) => root.insert(entry, self.bucketing_param)?,
            None => self.root = Some(QuadNode::leaf(Region::root(self.k), entry)),
        }
        self.next_seq += 1;
        Ok(())
    }

    /// Whether the tree holds a point equal to `point`.
    pub fn search(&self, point: &Point<N>) -> bool {
        if !self.contains(point) {
            return false;
        }
        self.root.as_ref().is_some_and(|root| root.search(point))
    }

    /// Delete one occurrence of `point`, returning whether it was present.
    ///
    /// Fails with [`SpatialIndexError::EmptyStructure`] on an empty tree.
    pub fn delete(&mut self, point: &Point<N>) -> Result<bool> {
        let Some(root) = self.root.as_mut() else {
            return Err(SpatialIndexError::EmptyStructure);
        };
        point.check_dim(2)?;
        if !Region::root(self.k).contains(point) {
            return Ok(false);
        }

        let removed = root.delete(point, self.bucketing_param);
        if removed {
            log::trace!("quadtree delete {}", point);
            if root.count() == 0 {
                self.root = None;
            }
        }
        Ok(removed)
    }

    /// Copies of all points, grouped by leaf in Z-order.
    pub fn points(&self) -> Vec<Point<N>> {
        let mut entries = Vec::with_capacity(self.count());
        if let Some(root) = self.root.as_ref() {
            root.collect_entries(&mut entries);
        }
        entries.into_iter().map(|e| e.point).collect()
    }
}
