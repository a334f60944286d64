//! Fixed-dimensionality integer points.

use std::fmt;

use geo_traits::CoordTrait;
use tinyvec::TinyVec;

use crate::error::{Result, SpatialIndexError};
use crate::r#type::CoordNum;

/// A point with integer coordinates in `dim` dimensions.
///
/// Coordinates are held inline for up to four dimensions and spill to the heap above that.
/// Every index in this crate stores its own deep copy of a point (cloning a `Point` never
/// shares the coordinate buffer), so mutating a caller-side buffer after an insert can't affect
/// indexed state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Point<N: CoordNum = i32> {
    coords: TinyVec<[N; 4]>,
}

impl<N: CoordNum> Point<N> {
    /// Create a point by copying the provided coordinates. The dimensionality of the point is the
    /// length of the slice.
    pub fn new(coords: &[N]) -> Self {
        Self {
            coords: coords.iter().copied().collect(),
        }
    }

    /// The origin in `dim` dimensions.
    pub fn origin(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(SpatialIndexError::InvalidDimensionality(dim));
        }
        Ok(Self {
            coords: std::iter::repeat(N::zero()).take(dim).collect(),
        })
    }

    /// Create a 2-D point from any coordinate implementing [`CoordTrait`].
    pub fn from_coord(coord: &impl CoordTrait<T = N>) -> Self {
        Self::new(&[coord.x(), coord.y()])
    }

    /// The number of coordinates of this point.
    #[inline]
    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    /// All coordinates of this point.
    #[inline]
    pub fn coords(&self) -> &[N] {
        &self.coords
    }

    /// The coordinate along `axis`.
    ///
    /// Panics if `axis >= self.dim()`.
    #[inline]
    pub fn coord(&self, axis: usize) -> N {
        self.coords[axis]
    }

    /// Euclidean distance to another point of the same dimensionality.
    pub fn distance(&self, other: &Self) -> Result<f64> {
        if self.dim() != other.dim() {
            return Err(SpatialIndexError::DimensionMismatch {
                expected: self.dim(),
                found: other.dim(),
            });
        }
        Ok(self.distance_unchecked(other))
    }

    /// Euclidean distance for callers that already validated dimensionality.
    #[inline]
    pub(crate) fn distance_unchecked(&self, other: &Self) -> f64 {
        debug_assert_eq!(self.dim(), other.dim());
        self.coords
            .iter()
            .zip(other.coords.iter())
            .map(|(a, b)| {
                let d = a.as_f64() - b.as_f64();
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Fail with [`SpatialIndexError::DimensionMismatch`] unless this point has `dim` coordinates.
    #[inline]
    pub(crate) fn check_dim(&self, dim: usize) -> Result<()> {
        if self.dim() != dim {
            return Err(SpatialIndexError::DimensionMismatch {
                expected: dim,
                found: self.dim(),
            });
        }
        Ok(())
    }
}

impl<N: CoordNum, const D: usize> From<[N; D]> for Point<N> {
    fn from(value: [N; D]) -> Self {
        Self::new(&value)
    }
}

impl<N: CoordNum> From<Vec<N>> for Point<N> {
    fn from(value: Vec<N>) -> Self {
        Self::new(&value)
    }
}

impl<N: CoordNum> fmt::Display for Point<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}

/// Exposes the first two coordinates as `x` and `y`; accessing a missing coordinate panics.
impl<N: CoordNum> CoordTrait for Point<N> {
    type T = N;

    fn dim(&self) -> geo_traits::Dimensions {
        match self.dim() {
            2 => geo_traits::Dimensions::Xy,
            3 => geo_traits::Dimensions::Xyz,
            n => geo_traits::Dimensions::Unknown(n),
        }
    }

    fn x(&self) -> Self::T {
        self.coords[0]
    }

    fn y(&self) -> Self::T {
        self.coords[1]
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        self.coords[n]
    }
}
