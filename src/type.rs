use std::fmt::{Debug, Display};
use std::hash::Hash;

use num_traits::{NumCast, PrimInt, Signed, ToPrimitive};

/// A trait for types that can be used for indexed coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Coordinates are signed
/// integers so that quadtree centroid arithmetic stays exact; distances are always reported as
/// `f64`.
pub trait CoordNum:
    private::Sealed
    + PrimInt
    + Signed
    + NumCast
    + ToPrimitive
    + Debug
    + Display
    + Default
    + Hash
    + Send
    + Sync
{
    /// The number of bits of the underlying integer type
    const BITS: u32;

    /// Conversion used by distance computations; exact up to 2^53 in magnitude.
    #[inline]
    fn as_f64(self) -> f64 {
        // Every supported integer type converts to f64
        self.to_f64().unwrap_or(f64::NAN)
    }

    /// Lossless widening used by region arithmetic.
    #[inline]
    fn as_i128(self) -> i128 {
        self.to_i128().unwrap_or_default()
    }
}

impl CoordNum for i8 {
    const BITS: u32 = 8;
}

impl CoordNum for i16 {
    const BITS: u32 = 16;
}

impl CoordNum for i32 {
    const BITS: u32 = 32;
}

impl CoordNum for i64 {
    const BITS: u32 = 64;
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for i8 {}
    impl Sealed for i16 {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
}
