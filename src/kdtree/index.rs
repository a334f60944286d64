use crate::error::{Result, SpatialIndexError};
use crate::kdtree::node::{self, KDTreeNode, Link};
use crate::point::Point;
use crate::r#type::CoordNum;

/// A mutable K-D Tree.
///
/// ```
/// use spatial_index::kdtree::KDTree;
/// use spatial_index::{Point, SpatialQuerySolver};
///
/// let mut tree = KDTree::new(2).unwrap();
/// for (x, y) in [(2, 3), (5, 4), (9, 6), (4, 7), (8, 1), (7, 2)] {
///     tree.insert(&Point::from([x, y])).unwrap();
/// }
/// assert!(tree.search(&Point::from([4, 7])));
/// assert!(!tree.search(&Point::from([9, 1])));
///
/// let nearest = tree.nearest_neighbor(&Point::from([9, 2])).unwrap();
/// assert_eq!(nearest, Some(Point::from([8, 1])));
/// ```
#[derive(Debug, Clone)]
pub struct KDTree<N: CoordNum = i32> {
    pub(crate) root: Link<N>,
    pub(crate) dims: usize,
    pub(crate) num_items: usize,
    /// Sequence number handed to the next inserted point.
    pub(crate) next_seq: u64,
}

impl<N: CoordNum> KDTree<N> {
    /// Create an empty tree over points with `dims` coordinates.
    pub fn new(dims: usize) -> Result<Self> {
        if dims == 0 {
            return Err(SpatialIndexError::InvalidDimensionality(dims));
        }
        Ok(Self {
            root: None,
            dims,
            num_items: 0,
            next_seq: 0,
        })
    }

    /// The dimensionality of the points held by this tree.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// The number of points held by this tree, counting duplicates.
    pub fn len(&self) -> usize {
        self.num_items
    }

    /// Whether the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The height of the tree: -1 when empty, 0 for a single node.
    pub fn height(&self) -> isize {
        self.root.as_ref().map_or(-1, |root| root.height() as isize)
    }

    /// Access the root node of the tree for manual traversal.
    pub fn root(&self) -> Result<&KDTreeNode<N>> {
        self.root.as_deref().ok_or(SpatialIndexError::EmptyStructure)
    }

    /// Insert a copy of `point`.
    ///
    /// Duplicates are kept; an equal point descends to the right.
    pub fn insert(&mut self, point: &Point<N>) -> Result<()> {
        point.check_dim(self.dims)?;
        log::trace!("kdtree insert {}", point);
        match self.root.as_mut() {
            Some(root) => root.insert(point.clone(), self.next_seq, 0, self.dims),
            None => self.root = Some(Box::new(KDTreeNode::leaf(point.clone(), self.next_seq))),
        }
        self.num_items += 1;
        self.next_seq += 1;
        Ok(())
    }

    /// Whether the tree holds a point equal to `point`.
    ///
    /// A point of another dimensionality is never found.
    pub fn search(&self, point: &Point<N>) -> bool {
        if point.dim() != self.dims {
            return false;
        }
        self.root
            .as_ref()
            .is_some_and(|root| root.search(point, 0, self.dims))
    }

    /// Delete one occurrence of `point`, returning whether it was present.
    ///
    /// Fails with [`SpatialIndexError::EmptyStructure`] on an empty tree.
    pub fn delete(&mut self, point: &Point<N>) -> Result<bool> {
        if self.is_empty() {
            return Err(SpatialIndexError::EmptyStructure);
        }
        point.check_dim(self.dims)?;
        let removed = node::delete(&mut self.root, point, None, 0, self.dims);
        if removed {
            log::trace!("kdtree delete {}", point);
            self.num_items -= 1;
        }
        Ok(removed)
    }

    /// Copies of all points, in pre-order.
    pub fn points(&self) -> Vec<Point<N>> {
        let mut points = Vec::with_capacity(self.num_items);
        if let Some(root) = self.root.as_deref() {
            root.collect_points(&mut points);
        }
        points
    }
}
