//! Integer square regions and their quadrant arithmetic.

use crate::error::{Result, SpatialIndexError};
use crate::point::Point;
use crate::r#type::CoordNum;

/// One of the four children of a gray node, in Z-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// `x < cx` and `y >= cy`
    NorthWest = 0,
    /// `x >= cx` and `y >= cy`
    NorthEast = 1,
    /// `x < cx` and `y < cy`
    SouthWest = 2,
    /// `x >= cx` and `y < cy`
    SouthEast = 3,
}

impl Quadrant {
    /// All quadrants in Z-order.
    pub const ALL: [Self; 4] = [
        Self::NorthWest,
        Self::NorthEast,
        Self::SouthWest,
        Self::SouthEast,
    ];

    /// The index of this quadrant among a gray node's children.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The sign of the offset from a parent's centroid to this quadrant's centroid.
    #[inline]
    fn signs(self) -> (bool, bool) {
        match self {
            Self::NorthWest => (false, true),
            Self::NorthEast => (true, true),
            Self::SouthWest => (false, false),
            Self::SouthEast => (true, false),
        }
    }
}

/// The half-open square `[c - 2^(k-1), c + 2^(k-1))` on both axes around centroid `c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Region<N: CoordNum> {
    centroid: Point<N>,
    k: u32,
}

impl<N: CoordNum> Region<N> {
    /// The region of side `2^k` centered at the origin.
    pub(crate) fn root(k: u32) -> Self {
        Self {
            centroid: Point::from([N::zero(), N::zero()]),
            k,
        }
    }

    #[inline]
    pub(crate) fn centroid(&self) -> &Point<N> {
        &self.centroid
    }

    #[inline]
    pub(crate) fn k(&self) -> u32 {
        self.k
    }

    /// Whether `point` lies within the half-open square.
    pub(crate) fn contains(&self, point: &Point<N>) -> bool {
        // Compare doubled offsets so that k = 0 (half-width 1/2) stays exact
        let side = 1i128 << self.k;
        (0..2).all(|axis| {
            let offset = 2 * (point.coord(axis).as_i128() - self.centroid.coord(axis).as_i128());
            offset >= -side && offset < side
        })
    }

    /// The quadrant of this region that `point` routes to.
    pub(crate) fn quadrant(&self, point: &Point<N>) -> Quadrant {
        let east = point.coord(0) >= self.centroid.coord(0);
        let north = point.coord(1) >= self.centroid.coord(1);
        match (east, north) {
            (false, true) => Quadrant::NorthWest,
            (true, true) => Quadrant::NorthEast,
            (false, false) => Quadrant::SouthWest,
            (true, false) => Quadrant::SouthEast,
        }
    }

    /// The region of one quadrant, one exponent finer.
    ///
    /// For `k >= 2` the child's centroid is offset by its own half-width `2^(k-2)`. A region with
    /// `k = 1` covers a 2x2 block of cells; its children are those unit cells, each centered on
    /// its own integer coordinate. A unit cell can't be subdivided.
    pub(crate) fn child(&self, quadrant: Quadrant) -> Result<Self> {
        let (up, down) = match self.k {
            0 => return Err(SpatialIndexError::CentroidAccuracy { k: 0 }),
            1 => (N::zero(), N::one()),
            k => {
                let offset = N::one() << (k - 2) as usize;
                (offset, offset)
            }
        };
        let (east, north) = quadrant.signs();
        let shift = |c: N, positive: bool| {
            if positive {
                c.checked_add(&up)
            } else {
                c.checked_sub(&down)
            }
        };
        let x = shift(self.centroid.coord(0), east);
        let y = shift(self.centroid.coord(1), north);
        match (x, y) {
            (Some(x), Some(y)) => Ok(Self {
                centroid: Point::from([x, y]),
                k: self.k - 1,
            }),
            _ => Err(SpatialIndexError::CentroidAccuracy { k: self.k }),
        }
    }

    /// The smallest Euclidean distance from `point` to the (closed) square.
    pub(crate) fn distance_to(&self, point: &Point<N>) -> f64 {
        let half = f64::powi(2.0, self.k as i32 - 1);
        let axis_dist = |axis: usize| {
            let d = (point.coord(axis).as_f64() - self.centroid.coord(axis).as_f64()).abs() - half;
            d.max(0.0)
        };
        let dx = axis_dist(0);
        let dy = axis_dist(1);
        (dx * dx + dy * dy).sqrt()
    }
}
