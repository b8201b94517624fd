//! Numeric types and coordinate utilities for polynomial approximations.
//!
//! This module defines the [`Value`] trait, which abstracts the numeric
//! types that can be used in polynomial fitting and evaluation, ensuring
//! compatibility with nalgebra, floating-point operations, and formatting.
//!
//! # Traits
//!
//! - [`Value`]: Extends `Float`, `Scalar`, and `ComplexField` to provide:
//!   - A canonical `two()` constant.
//!   - `try_cast` for safe type conversion with error handling.
//!   - `factorial` for Taylor coefficients.
//! - [`CoordExt`]: accessors for `(x, y)` sample slices.
//!
//! # Example
//!
//! ```rust
//! use polyapprox::value::Value;
//!
//! let two = f64::two();
//! assert_eq!(f64::factorial(5), 120.0);
//! ```
use std::ops::RangeInclusive;

use crate::error::Error;

/// Numeric type for polynomials
pub trait Value:
    nalgebra::Scalar
    + nalgebra::ComplexField<RealField = Self>
    + nalgebra::RealField
    + num_traits::float::FloatCore
    + std::fmt::LowerExp
{
    /// Returns the value 2.0
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Tries to cast a value to the target type
    ///
    /// # Errors
    /// Returns an error if the cast fails
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self, Error> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Raises the value to the power of an integer
    #[must_use]
    fn powi(self, n: i32) -> Self {
        nalgebra::ComplexField::powi(self, n)
    }

    /// Get the absolute value for a numeric type
    #[must_use]
    fn abs(self) -> Self {
        nalgebra::ComplexField::abs(self)
    }

    /// Returns the absolute difference between two values.
    #[must_use]
    fn abs_sub(self, other: Self) -> Self {
        nalgebra::ComplexField::abs(self - other)
    }

    /// Check if the value is negative
    fn is_sign_negative(&self) -> bool {
        self < &Self::zero()
    }

    /// Computes the factorial of a non-negative integer `n`.
    #[must_use]
    fn factorial(n: usize) -> Self {
        let mut result = Self::one();
        for i in 2..=n {
            result *= Self::from_positive_int(i);
        }
        result
    }

    /// Computes the binomial coefficient `n choose k`.
    #[must_use]
    fn binomial(n: usize, k: usize) -> Self {
        if k > n {
            return Self::zero();
        }

        // Multiplicative form keeps intermediate values small
        let k = k.min(n - k);
        let mut result = Self::one();
        for i in 0..k {
            result *= Self::from_positive_int(n - i);
            result /= Self::from_positive_int(i + 1);
        }
        result
    }

    /// Converts a `usize` to the target numeric type.
    ///
    /// Results in `infinity` if the value is out of range.
    #[must_use]
    fn from_positive_int(n: usize) -> Self {
        Self::try_cast(n).unwrap_or(Self::infinity())
    }
}

impl<T> Value for T where
    T: nalgebra::Scalar
        + nalgebra::ComplexField<RealField = Self>
        + nalgebra::RealField
        + num_traits::float::FloatCore
        + std::fmt::LowerExp
{
}

/// Extension trait for accessing the `x` and `y` coordinates of sampled data.
///
/// # Examples
///
/// ```
/// # use polyapprox::value::CoordExt;
/// let data = vec![(1.5, -2.0), (2.0, 3.0), (0.0, 1.0)];
/// assert_eq!(data.y(), vec![-2.0, 3.0, 1.0]);
/// ```
pub trait CoordExt<T: Value> {
    /// Returns an iterator over the x-coordinates of this value.
    fn x_iter(&self) -> impl Iterator<Item = T>;

    /// Returns an iterator over the y-coordinates of this value.
    fn y_iter(&self) -> impl Iterator<Item = T>;

    /// Returns the x-coordinates.
    fn x(&self) -> Vec<T> {
        self.x_iter().collect()
    }

    /// Returns the y-coordinates.
    fn y(&self) -> Vec<T> {
        self.y_iter().collect()
    }

    /// Returns the inclusive range of x-coordinates, or `None` if empty.
    fn x_range(&self) -> Option<RangeInclusive<T>> {
        let bounds = self.x_iter().fold(None, |acc: Option<(T, T)>, x| {
            Some(match acc {
                Some((min, max)) => (
                    nalgebra::RealField::min(min, x),
                    nalgebra::RealField::max(max, x),
                ),
                None => (x, x),
            })
        });
        bounds.map(|(start, end)| start..=end)
    }
}
impl<T: Value> CoordExt<T> for [(T, T)] {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(x, _)| *x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|(_, y)| *y)
    }
}

/// Trait for infallible integer casting with clamping.
pub trait IntClampedCast:
    num_traits::Num + num_traits::NumCast + num_traits::Bounded + Copy + PartialOrd + Ord
{
    /// Clamps a value to the range of the target type and casts it.
    fn clamped_cast<T: num_traits::PrimInt>(self) -> T {
        //
        // Simple case: self is in range of T
        if let Some(v) = num_traits::cast(self) {
            return v;
        }

        let min = match num_traits::cast::<T, Self>(T::min_value()) {
            Some(v) => v,              // Self can go lower than T - clamp to min
            None => Self::min_value(), // Self cannot go lower than T
        };

        let max = match num_traits::cast::<T, Self>(T::max_value()) {
            Some(v) => v,              // Self can go higher than T - clamp to max
            None => Self::max_value(), // Self cannot go higher than T
        };

        let clamped = self.clamp(min, max);
        num_traits::cast(clamped).unwrap_or_else(T::max_value)
    }
}
impl<T: num_traits::PrimInt> IntClampedCast for T {}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn factorial_small_values() {
        assert_eq!(f64::factorial(0), 1.0);
        assert_eq!(f64::factorial(1), 1.0);
        assert_eq!(f64::factorial(5), 120.0);
        assert_eq!(f64::factorial(10), 3_628_800.0);
    }

    #[test]
    fn binomial_matches_pascal() {
        assert_eq!(f64::binomial(5, 0), 1.0);
        assert_eq!(f64::binomial(5, 2), 10.0);
        assert_eq!(f64::binomial(5, 5), 1.0);
        assert_eq!(f64::binomial(25, 12), 5_200_300.0);
        assert_eq!(f64::binomial(3, 4), 0.0);
    }

    #[test]
    fn x_range_of_samples() {
        let data = vec![(0.5, 1.0), (-1.0, 2.0), (2.0, 3.0)];
        assert_eq!(data.x_range(), Some(-1.0..=2.0));

        let empty: Vec<(f64, f64)> = vec![];
        assert_eq!(empty.x_range(), None);
    }

    #[test]
    fn coords_through_slices_and_cow() {
        let samples = [(0.0, 1.0), (3.0, -1.0), (-2.0, 4.0)];
        let slice: &[(f64, f64)] = &samples;
        assert_eq!(slice.x_range(), Some(-2.0..=3.0));

        let cow: std::borrow::Cow<[(f64, f64)]> = std::borrow::Cow::Borrowed(slice);
        assert_eq!(cow.x_range(), Some(-2.0..=3.0));
        assert_eq!(cow.y_iter().collect::<Vec<_>>(), vec![1.0, -1.0, 4.0]);
        assert_eq!(cow.x(), vec![0.0, 3.0, -2.0]);
    }

    #[test]
    fn clamped_cast_edge_cases() {
        assert_eq!(127i8.clamped_cast::<i8>(), 127);
        assert_eq!((-1i8).clamped_cast::<u8>(), 0);
        assert_eq!(255u8.clamped_cast::<i8>(), 127);
        assert_eq!(i64::MIN.clamped_cast::<i8>(), -128);
        assert_eq!(u32::MAX.clamped_cast::<i16>(), 32767);
        assert_eq!(26usize.clamped_cast::<i32>(), 26);
    }
}
