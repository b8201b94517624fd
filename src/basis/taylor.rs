use nalgebra::MatrixViewMut;

use crate::{
    basis::{monomial, Basis, DifferentialBasis, IntoMonomialBasis},
    display::{self, Sign, DEFAULT_PRECISION},
    error::Result,
    value::{IntClampedCast, Value},
    Polynomial,
};

/// Power basis about a center point, `1, (x - a), (x - a)², …, (x - a)ⁿ`.
///
/// This is the natural basis of a Taylor expansion: the coefficient of `(x - a)ⁿ`
/// is `f⁽ⁿ⁾(a) / n!`, and no conversion is needed to store one.
///
/// Evaluation uses Horner's scheme in `(x - a)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaylorBasis<T: Value = f64> {
    center: T,
}
impl<T: Value> TaylorBasis<T> {
    /// Creates a power basis about `center`.
    pub fn new(center: T) -> Self {
        Self { center }
    }

    /// The expansion point `a`.
    pub fn center(&self) -> T {
        self.center
    }

    /// Creates a polynomial `Σ cₙ(x - a)ⁿ` from its coefficients.
    ///
    /// # Errors
    /// Returns an error if `coefficients` is empty.
    ///
    /// # Example
    /// ```rust
    /// use polyapprox::basis::TaylorBasis;
    /// // 1 + (x - 2)²
    /// let poly = TaylorBasis::new_polynomial(2.0, &[1.0, 0.0, 1.0]).unwrap();
    /// assert_eq!(poly.y(3.0), 2.0);
    /// ```
    pub fn new_polynomial(center: T, coefficients: &[T]) -> Result<Polynomial<'_, Self, T>> {
        Polynomial::<Self, T>::from_basis(Self::new(center), coefficients)
    }
}
impl<T: Value> Basis<T> for TaylorBasis<T> {
    /// Centers the basis on the midpoint of the range.
    fn from_range(x_range: std::ops::RangeInclusive<T>) -> Self {
        let (start, end) = x_range.into_inner();
        Self::new((start + end) / T::two())
    }

    #[inline(always)]
    fn normalize_x(&self, x: T) -> T {
        x - self.center
    }

    #[inline(always)]
    fn denormalize_x(&self, x: T) -> T {
        x + self.center
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
        monomial::horner(self.normalize_x(x), coefficients)
    }
}

impl<T: Value> IntoMonomialBasis<T> for TaylorBasis<T> {
    /// Expands every `(x - a)ⁿ` with the binomial theorem.
    fn as_monomial(&self, coefficients: &mut [T]) -> Result<()> {
        let shift = -self.center;

        let mut monomial = vec![T::zero(); coefficients.len()];
        for (n, &c) in coefficients.iter().enumerate() {
            for k in 0..=n {
                monomial[k] += c * T::binomial(n, k) * Value::powi(shift, (n - k).clamped_cast());
            }
        }

        coefficients.copy_from_slice(&monomial);
        Ok(())
    }
}

impl<T: Value> DifferentialBasis<T> for TaylorBasis<T> {
    type B2 = Self;

    fn derivative(&self, coefficients: &[T]) -> Result<(Self, Vec<T>)> {
        Ok((*self, monomial::power_rule(coefficients)))
    }
}

impl<T: Value> display::PolynomialDisplay<T> for TaylorBasis<T> {
    fn format_term(&self, degree: i32, coef: T) -> Option<display::Term> {
        let sign = Sign::from_coef(coef);

        let variable = display::format_shifted_variable("x", self.center, DEFAULT_PRECISION);
        let base = display::format_variable(&variable, None, degree);
        let coef = display::format_coefficient(coef, degree, DEFAULT_PRECISION)?;

        let glue = if coef.is_empty() || base.is_empty() || !variable.starts_with('(') {
            ""
        } else {
            "·"
        };

        let body = format!("{coef}{glue}{base}");
        Some(display::Term::new(sign, body))
    }
}

/// A truncated Taylor expansion `Σ cₙ(x - a)ⁿ`, as produced by [`crate::taylor::TaylorExpander`].
pub type TaylorPolynomial<'a, T = f64> = Polynomial<'a, TaylorBasis<T>, T>;
