use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpatialIndexError {
    /// Two points (or a point and an index) disagree on dimensionality.
    #[error("Expected a {expected}-dimensional point, got a {found}-dimensional one.")]
    DimensionMismatch { expected: usize, found: usize },

    /// A dimensionality of zero was requested.
    #[error("Invalid dimensionality provided: {0}.")]
    InvalidDimensionality(usize),

    /// A bounded queue was created with a capacity of zero.
    #[error("Invalid capacity provided: {0}. Capacity must be at least 1.")]
    InvalidCapacity(usize),

    /// A priority that is negative or NaN.
    #[error("Invalid priority provided: {0}.")]
    InvalidPriority(f64),

    /// A call or construction parameter is out of its domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Deletion or root access on a structure with no elements.
    #[error("Structure is empty.")]
    EmptyStructure,

    /// A quadtree node would need to split below integer centroid resolution.
    #[error("Cannot subdivide a quadrant with k = {k}: child centroids would not be integral.")]
    CentroidAccuracy { k: u32 },

    /// A point lies outside of the square spanned by a quadtree.
    #[error("Point {0} lies outside of the indexed region.")]
    OutOfRegion(String),

    /// A cursor observed a mutation of the container it iterates.
    #[error("Container was modified during iteration.")]
    ConcurrentModification,
}

pub type Result<T> = std::result::Result<T, SpatialIndexError>;
