use crate::error::Result;
use crate::knn::{BoundedPriorityQueue, NearestNeighbor};
use crate::point::Point;
use crate::quadtree::PRQuadTree;
use crate::r#trait::{check_k, check_radius, SpatialQuerySolver};
use crate::r#type::CoordNum;

// Anchors must be 2-D but may lie outside the tree's square.
impl<N: CoordNum> SpatialQuerySolver<N> for PRQuadTree<N> {
    fn range(&self, anchor: &Point<N>, radius: f64) -> Result<Vec<Point<N>>> {
        check_radius(radius)?;
        anchor.check_dim(2)?;

        let mut results = vec![];
        if let Some(root) = self.root.as_ref() {
            if root.region().distance_to(anchor) <= radius {
                root.range(anchor, radius, &mut results);
            }
        }
        Ok(results)
    }

    fn nearest_neighbor(&self, anchor: &Point<N>) -> Result<Option<Point<N>>> {
        anchor.check_dim(2)?;

        let best = match self.root.as_ref() {
            Some(root) => root.nearest_neighbor(anchor, NearestNeighbor::unbounded()),
            None => NearestNeighbor::unbounded(),
        };
        Ok(best.into_point())
    }

    fn k_nearest_neighbors(
        &self,
        k: usize,
        anchor: &Point<N>,
    ) -> Result<BoundedPriorityQueue<Point<N>>> {
        check_k(k)?;
        anchor.check_dim(2)?;

        let mut queue = BoundedPriorityQueue::new(k)?;
        if let Some(root) = self.root.as_ref() {
            root.k_nearest_neighbors(anchor, &mut queue)?;
        }
        Ok(queue)
    }
}
