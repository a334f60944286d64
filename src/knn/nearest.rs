use crate::point::Point;
use crate::r#type::CoordNum;

/// The best candidate found so far by a nearest-neighbor descent, and its distance to the anchor.
///
/// The state is threaded by value through the recursive search: every node takes the current
/// state and hands back a possibly improved one.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestNeighbor<N: CoordNum> {
    best: Option<Point<N>>,
    distance: f64,
    /// Insertion order of the best candidate; an equally distant, earlier point replaces it.
    order: u64,
}

impl<N: CoordNum> NearestNeighbor<N> {
    /// A state with no candidate yet; every distance improves on it.
    pub fn unbounded() -> Self {
        Self {
            best: None,
            distance: f64::INFINITY,
            order: u64::MAX,
        }
    }

    /// Whether no candidate has been found yet.
    pub fn is_unbounded(&self) -> bool {
        self.best.is_none()
    }

    /// Replace the current candidate if `distance` is strictly smaller than the best so far.
    #[must_use]
    pub fn offer(self, point: &Point<N>, distance: f64) -> Self {
        self.offer_ordered(point, u64::MAX, distance)
    }

    /// Replace the current candidate if `distance` is smaller, or equal with an earlier
    /// insertion `order`.
    #[must_use]
    pub(crate) fn offer_ordered(mut self, point: &Point<N>, order: u64, distance: f64) -> Self {
        if distance < self.distance || (distance == self.distance && order < self.order) {
            self.best = Some(point.clone());
            self.distance = distance;
            self.order = order;
        }
        self
    }

    /// The best candidate so far.
    pub fn best(&self) -> Option<&Point<N>> {
        self.best.as_ref()
    }

    /// Distance of the best candidate, or infinity when unbounded.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Consume the state, returning the best candidate.
    pub fn into_point(self) -> Option<Point<N>> {
        self.best
    }
}

impl<N: CoordNum> Default for NearestNeighbor<N> {
    fn default() -> Self {
        Self::unbounded()
    }
}
