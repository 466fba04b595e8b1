use core::{fmt::Debug, ops::Add};

/// Trait bounds shared by stored values and their sums
#[cfg(not(feature = "serde"))]
pub trait ValueBounds: Default + Debug + Clone + Copy + Ord + Send + Sync + 'static {}

/// Trait bounds shared by stored values and their sums
#[cfg(feature = "serde")]
pub trait ValueBounds:
    Default
    + Debug
    + Clone
    + Copy
    + Ord
    + Send
    + Sync
    + serde::Serialize
    + for<'a> serde::Deserialize<'a>
    + 'static
{
}

#[cfg(not(feature = "serde"))]
impl<T> ValueBounds for T where T: Default + Debug + Clone + Copy + Ord + Send + Sync + 'static {}

#[cfg(feature = "serde")]
impl<T> ValueBounds for T where
    T: Default
        + Debug
        + Clone
        + Copy
        + Ord
        + Send
        + Sync
        + serde::Serialize
        + for<'a> serde::Deserialize<'a>
        + 'static
{
}

/// An element type that can be stored in a [SegmentTree](crate::SegmentTree)
///
/// Sums are accumulated in a wider [Value::Sum] type so that summing a range of
/// values never overflows the element type itself.
///
/// Implemented for `i8`, `i16`, `i32`, `i64`, `u8`, `u16`, `u32` and `u64`.
pub trait Value: ValueBounds {
    /// Type used for range sums
    type Sum: ValueBounds + Add<Output = Self::Sum>;

    /// A value at least as large as any other value of this type.
    ///
    /// Used as the minimum of an empty range.
    const MAX: Self;

    /// The sum of an empty range
    const ZERO: Self::Sum;

    /// Widens a single value into [Value::Sum]
    fn lift(self) -> Self::Sum;

    /// Returns the sum of `len` copies of this value
    fn scale(self, len: usize) -> Self::Sum;
}

macro_rules! value_impl {
    ($type:ty, $sum:ty) => {
        impl Value for $type {
            type Sum = $sum;

            const MAX: Self = <$type>::MAX;
            const ZERO: Self::Sum = 0;

            #[inline]
            fn lift(self) -> Self::Sum {
                <$sum>::from(self)
            }

            #[inline]
            fn scale(self, len: usize) -> Self::Sum {
                <$sum>::from(self) * len as $sum
            }
        }
    };
}

value_impl!(i8, i64);
value_impl!(i16, i64);
value_impl!(i32, i64);
value_impl!(i64, i128);
value_impl!(u8, u64);
value_impl!(u16, u64);
value_impl!(u32, u64);
value_impl!(u64, u128);
