use std::borrow::Cow;

use nalgebra::MatrixViewMut;

use crate::{
    basis::{Basis, DifferentialBasis, IntoMonomialBasis},
    display::{self, Sign, DEFAULT_PRECISION},
    error::Result,
    value::{IntClampedCast, Value},
    Polynomial,
};

/// Standard monomial basis for polynomials, `1, x, x², …, xⁿ`.
///
/// Approximations are built in the [`crate::basis::TaylorBasis`] or [`crate::basis::ChebyshevBasis`];
/// both convert to this basis with [`Polynomial::as_monomial`] so that they can be compared
/// coefficient by coefficient.
#[derive(Debug, Clone)]
pub struct MonomialBasis<T: Value = f64>(pub std::marker::PhantomData<T>);
impl<T: Value> MonomialBasis<T> {
    /// Creates a new monomial basis.
    #[must_use]
    pub const fn default() -> Self {
        Self(std::marker::PhantomData)
    }

    /// Creates a new monomial polynomial with the given coefficients.
    ///
    /// # Errors
    /// Returns an error if `coefficients` is empty.
    ///
    /// # Example
    /// ```rust
    /// use polyapprox::basis::MonomialBasis;
    /// let poly = MonomialBasis::new_polynomial(&[1.0, 0.0, -0.5]).unwrap();
    /// assert_eq!(poly.y(2.0), -1.0);
    /// ```
    pub fn new_polynomial(coefficients: &[T]) -> Result<crate::Polynomial<'_, Self, T>> {
        crate::Polynomial::<Self, T>::from_basis(Self::default(), coefficients)
    }
}
impl<T: Value> Basis<T> for MonomialBasis<T> {
    fn from_range(_x_range: std::ops::RangeInclusive<T>) -> Self {
        Self::default()
    }

    #[inline(always)]
    fn normalize_x(&self, x: T) -> T {
        x
    }

    #[inline(always)]
    fn denormalize_x(&self, x: T) -> T {
        x
    }

    #[inline(always)]
    fn fill_matrix_row<R: nalgebra::Dim, C: nalgebra::Dim, RS: nalgebra::Dim, CS: nalgebra::Dim>(
        &self,
        start_index: usize,
        x: T,
        mut row: MatrixViewMut<T, R, C, RS, CS>,
    ) {
        for j in start_index..row.ncols() {
            row[j] = self.solve_function(j, x);
        }
    }

    #[inline(always)]
    fn solve_function(&self, j: usize, x: T) -> T {
        match j {
            0 => T::one(),
            1 => x,
            _ => Value::powi(x, j.clamped_cast()),
        }
    }

    fn evaluate(&self, x: T, coefficients: &[T]) -> T {
        horner(x, coefficients)
    }
}
impl<T: Value> IntoMonomialBasis<T> for MonomialBasis<T> {
    fn as_monomial(&self, _: &mut [T]) -> Result<()> {
        Ok(())
    }
}
impl<T: Value> DifferentialBasis<T> for MonomialBasis<T> {
    type B2 = Self;

    fn derivative(&self, coefficients: &[T]) -> Result<(Self, Vec<T>)> {
        Ok((self.clone(), power_rule(coefficients)))
    }
}
impl<T: Value> display::PolynomialDisplay<T> for MonomialBasis<T> {
    fn format_term(&self, degree: i32, coef: T) -> Option<display::Term> {
        let sign = Sign::from_coef(coef);

        let base = display::format_variable("x", None, degree);
        let coef = display::format_coefficient(coef, degree, DEFAULT_PRECISION)?;

        let body = format!("{coef}{base}");
        Some(display::Term::new(sign, body))
    }
}

/// Evaluates `Σ cⱼ·xʲ` with Horner's scheme.
pub(crate) fn horner<T: Value>(x: T, coefficients: &[T]) -> T {
    let mut y = T::zero();
    for &c in coefficients.iter().rev() {
        y = y * x + c;
    }
    y
}

/// Differentiates power-series coefficients term by term, `(j + 1)·cⱼ₊₁`.
///
/// A constant differentiates to `[0]`, never to an empty sequence.
pub(crate) fn power_rule<T: Value>(coefficients: &[T]) -> Vec<T> {
    if coefficients.len() <= 1 {
        return vec![T::zero()];
    }

    coefficients
        .iter()
        .enumerate()
        .skip(1)
        .map(|(j, &c)| c * T::from_positive_int(j))
        .collect()
}

/// A monomial polynomial of the form `y = aₙxⁿ + ... + a₁x + a₀`.
///
/// # Type Parameters
/// - `'a`: Lifetime of borrowed coefficients (if used).
/// - `T`: Numeric type (default `f64`).
pub type MonomialPolynomial<'a, T = f64> = Polynomial<'a, MonomialBasis<T>, T>;

impl<'a, T: Value> MonomialPolynomial<'a, T> {
    /// Creates a new borrowed monomial polynomial from a slice of coefficients.
    ///
    /// # Example
    /// ```
    /// # use polyapprox::MonomialPolynomial;
    /// let poly = MonomialPolynomial::borrowed(&[1.0, 2.0, 3.0]); // 1 + 2x + 3x^2
    /// assert_eq!(poly.y(1.0), 6.0);
    /// ```
    pub const fn borrowed(coefficients: &'a [T]) -> Self {
        let degree = coefficients.len().saturating_sub(1);
        unsafe {
            Self::from_raw(
                MonomialBasis::default(),
                Cow::Borrowed(coefficients),
                degree,
            )
        } // Safety: Monomials expect k+1 coefficients
    }

    /// Creates a new owned monomial polynomial from a vector of coefficients.
    #[must_use]
    pub const fn owned(coefficients: Vec<T>) -> Self {
        let degree = coefficients.len().saturating_sub(1);
        unsafe { Self::from_raw(MonomialBasis::default(), Cow::Owned(coefficients), degree) }
        // Safety: Monomials expect k+1 coefficients
    }
}
