//! Polynomial bases for approximations
//!
//! This module defines the [`Basis`] trait, which abstracts the set of functions a polynomial
//! approximation is expressed in. The same trait drives least-squares fitting (through
//! [`Basis::fill_matrix_row`]) and evaluation (through [`Basis::evaluate`]).
//!
//! Also contains [`IntoMonomialBasis`], for bases which can be converted to monomial form,
//! and [`DifferentialBasis`] for bases whose polynomials can be differentiated.
//!
//! # Provided Bases
//! - [`TaylorBasis`]: Powers of `(x - a)` about a center `a`; the shape of a Taylor expansion.
//!   Evaluated with Horner's scheme in `(x - a)`.
//! - [`ChebyshevBasis`]: Chebyshev polynomials of the first kind, on an interval `[a, b]`
//!   mapped onto `[-1, 1]`. Evaluated with Clenshaw's algorithm.
//! - [`MonomialBasis`]: Plain powers of `x`. Both other bases convert to it.
use nalgebra::MatrixViewMut;

use crate::{error::Result, value::Value};

pub(crate) mod monomial;
pub use monomial::MonomialBasis;

pub(crate) mod chebyshev;
pub use chebyshev::ChebyshevBasis;

pub(crate) mod taylor;
pub use taylor::TaylorBasis;

/// A trait representing a polynomial basis.
///
/// Assumes a Vandermonde structure for the basis functions.
///
/// A basis defines the functions φ₀, φ₁, …, φₙ a polynomial is a linear combination of,
/// along with the change of variable applied to `x` before evaluating them.
///
/// It is not meant to be used on its own, but through [`crate::Polynomial`] or [`crate::CurveFit`],
/// which are generic over basis.
///
/// # Type Parameters
/// - `T`: The numeric type used for coefficients and evaluation (e.g., `f64`).
pub trait Basis<T: Value>: Sized + Clone + std::fmt::Debug + Send + Sync {
    /// Create a new basis suited to data spanning the given range
    ///
    /// Initializes any needed metadata for normalization
    fn from_range(x_range: std::ops::RangeInclusive<T>) -> Self;

    /// Returns the number of basis functions needed for a polynomial of a given degree.
    ///
    /// Every provided basis has one function per degree plus the constant term.
    #[inline(always)]
    fn k(&self, degree: usize) -> usize {
        degree + 1
    }

    /// Returns the polynomial degree corresponding to a given number of basis functions.
    ///
    /// Returns `None` if the number of functions does not correspond to a valid degree.
    #[inline(always)]
    fn degree(&self, k: usize) -> Option<usize> {
        if k > 0 {
            Some(k - 1)
        } else {
            None
        }
    }

    /// Populates a row of a Vandermonde matrix with this basis evaluated at `x`.
    ///
    /// All basis functions are written into `row` starting at column `start_index`.
    ///
    /// `x` will be normalized by the caller using the `normalize_x` method.
    ///
    /// # Parameters
    /// - `start_index`: Column index where writing begins.
    /// - `x`: The evaluation point.
    /// - `row`: Mutable row buffer.
    fn fill_matrix_row<R: nalgebra::Dim, C: nalgebra::Dim, RS: nalgebra::Dim, CS: nalgebra::Dim>(
        &self,
        start_index: usize,
        x: T,
        row: MatrixViewMut<T, R, C, RS, CS>,
    );

    /// Maps `x` into the variable the basis functions are defined on.
    fn normalize_x(&self, x: T) -> T;

    /// Inverse of [`Basis::normalize_x`].
    fn denormalize_x(&self, x: T) -> T;

    /// Evaluates the `j`th basis function, `φⱼ(x)`.
    ///
    /// `x` will be normalized by the caller using the `normalize_x` method.
    fn solve_function(&self, j: usize, x: T) -> T;

    /// Evaluates `Σ cⱼ·φⱼ(x)` at an un-normalized `x`.
    ///
    /// The default sums [`Basis::solve_function`] term by term. Bases with a cheaper
    /// recurrence (Horner, Clenshaw) override it.
    fn evaluate(&self, x: T, coefficients: &[T]) -> T {
        let x = self.normalize_x(x);
        let mut y = T::zero();
        for (j, &c) in coefficients.iter().enumerate() {
            y += c * self.solve_function(j, x);
        }
        y
    }
}

/// A trait for converting polynomial representations into monomial form.
///
/// - The given `coefficients` slice is mutated in place to represent the same
///   polynomial expressed in the monomial basis `1, x, x², …` of the original, un-normalized `x`.
/// - Implementations must overwrite the entire slice.
pub trait IntoMonomialBasis<T: Value>: Basis<T> {
    /// Converts this polynomial representation into monomial form.
    ///
    /// # Errors
    /// Returns an error if the coefficients cannot be converted.
    fn as_monomial(&self, coefficients: &mut [T]) -> Result<()>;
}

/// Trait for bases that support differentiation of polynomials.
///
/// # Type Parameters
/// - `T`: Numeric type for coefficients.
/// - `B2`: Basis type returned by the derivative.
pub trait DifferentialBasis<T: Value>: Basis<T> {
    /// The basis type returned by the derivative operation.
    type B2: Basis<T> + crate::display::PolynomialDisplay<T>;

    /// Computes the derivative, with respect to the un-normalized `x`, of a polynomial in this basis.
    ///
    /// # Errors
    /// Returns an error if the differentiation is not supported for the given coefficients.
    fn derivative(&self, coefficients: &[T]) -> Result<(Self::B2, Vec<T>)>;
}
