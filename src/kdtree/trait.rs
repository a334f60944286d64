use crate::error::Result;
use crate::kdtree::KDTree;
use crate::knn::{BoundedPriorityQueue, NearestNeighbor};
use crate::point::Point;
use crate::r#trait::{check_k, check_radius, SpatialQuerySolver};
use crate::r#type::CoordNum;

impl<N: CoordNum> SpatialQuerySolver<N> for KDTree<N> {
    fn range(&self, anchor: &Point<N>, radius: f64) -> Result<Vec<Point<N>>> {
        check_radius(radius)?;
        anchor.check_dim(self.dims)?;

        let mut results = vec![];
        if let Some(root) = self.root.as_deref() {
            root.range(anchor, radius, 0, self.dims, &mut results);
        }
        Ok(results)
    }

    fn nearest_neighbor(&self, anchor: &Point<N>) -> Result<Option<Point<N>>> {
        anchor.check_dim(self.dims)?;

        let best = match self.root.as_deref() {
            Some(root) => root.nearest_neighbor(anchor, 0, self.dims, NearestNeighbor::unbounded()),
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
        anchor.check_dim(self.dims)?;

        let mut queue = BoundedPriorityQueue::new(k)?;
        if let Some(root) = self.root.as_deref() {
            root.k_nearest_neighbors(anchor, 0, self.dims, &mut queue)?;
        }
        Ok(queue)
    }
}
