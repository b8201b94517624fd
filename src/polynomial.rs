use std::borrow::Cow;

use crate::{
    basis::{Basis, DifferentialBasis, IntoMonomialBasis},
    display::PolynomialDisplay,
    error::{Error, Result},
    statistics,
    value::{CoordExt, Value},
    MonomialPolynomial,
};

/// A polynomial approximation: coefficients in a given basis.
///
/// Unlike [`crate::CurveFit`], this struct is **not tied to any dataset or matrix**; it can be
/// evaluated at any x-value. Evaluating a Chebyshev approximation outside its fitting interval
/// extrapolates the series.
///
/// The basis is the representation tag:
/// - [`crate::basis::TaylorBasis`] for a Taylor expansion about a center, see [`crate::TaylorPolynomial`]
/// - [`crate::basis::ChebyshevBasis`] for a least-squares Chebyshev fit, see [`crate::ChebyshevPolynomial`]
/// - [`crate::basis::MonomialBasis`] for plain powers of `x`, see [`crate::MonomialPolynomial`]
///
/// # Type Parameters
/// - `'a`: Lifetime for borrowed coefficients, if used.
/// - `B`: The polynomial basis.
/// - `T`: Numeric type for the coefficients, default is `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<'a, B, T: Value = f64>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    degree: usize,
    basis: B,
    coefficients: Cow<'a, [T]>,
}
impl<'a, B, T: Value> Polynomial<'a, B, T>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    /// Creates a [`Polynomial`] from a given basis, coefficients, and degree.
    ///
    /// # Safety
    /// This constructor does not check that the number of coefficients matches the degree.
    /// The length of coefficients must be equal to `Basis::k(degree)`
    pub const unsafe fn from_raw(basis: B, coefficients: Cow<'a, [T]>, degree: usize) -> Self {
        Self {
            degree,
            basis,
            coefficients,
        }
    }

    /// Creates a new polynomial from a basis and coefficients, inferring the degree.
    ///
    /// # Errors
    /// Returns [`Error::InvalidNumberOfParameters`] if the number of coefficients does not
    /// correspond to a valid degree for the given basis.
    pub fn from_basis(basis: B, coefficients: impl Into<Cow<'a, [T]>>) -> Result<Self> {
        let coefficients = coefficients.into();
        let degree = basis
            .degree(coefficients.len())
            .ok_or(Error::InvalidNumberOfParameters(coefficients.len()))?;
        Ok(unsafe { Self::from_raw(basis, coefficients, degree) })
    }

    /// Decomposes the polynomial into its basis, coefficients, and degree.
    pub fn into_inner(self) -> (B, Cow<'a, [T]>, usize) {
        (self.basis, self.coefficients, self.degree)
    }

    /// Returns a reference to the polynomial's basis.
    pub fn basis(&self) -> &B {
        &self.basis
    }

    /// Converts the polynomial into a version that owns its coefficients.
    pub fn into_owned(self) -> Polynomial<'static, B, T> {
        Polynomial {
            degree: self.degree,
            basis: self.basis,
            coefficients: Cow::Owned(self.coefficients.into_owned()),
        }
    }

    /// Returns the coefficients, one per basis function, lowest degree first.
    ///
    /// For a Taylor expansion these are `f⁽ⁿ⁾(a) / n!`; for a Chebyshev fit, the weights of `Tₙ`.
    #[must_use]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Returns the degree of the polynomial.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Evaluates the polynomial at a given x-value.
    ///
    /// Uses the basis' evaluation scheme; Horner for Taylor and monomial polynomials,
    /// Clenshaw for Chebyshev series.
    ///
    /// # Example
    /// ```
    /// # use polyapprox::MonomialPolynomial;
    /// let poly = MonomialPolynomial::borrowed(&[1.0, 2.0, 3.0]); // 1 + 2x + 3x^2
    /// assert_eq!(poly.y(2.0), 17.0);
    /// ```
    pub fn y(&self, x: T) -> T {
        self.basis.evaluate(x, &self.coefficients)
    }

    /// Evaluates the polynomial at each x-value, returning `(x, y)` pairs.
    pub fn solve(&self, x: impl IntoIterator<Item = T>) -> Vec<(T, T)> {
        x.into_iter().map(|x| (x, self.y(x))).collect()
    }

    /// Evaluates the polynomial at each x-value, returning only the y-values.
    ///
    /// This is how approximations are compared with ground truth on a [`crate::grid::SampleGrid`].
    pub fn evaluate(&self, x: &[T]) -> Vec<T> {
        x.iter().map(|&x| self.y(x)).collect()
    }

    /// Calculates the R-squared value for the model compared to provided data.
    ///
    /// See [`statistics::r_squared`] for more details.
    pub fn r_squared(&self, data: &[(T, T)]) -> T {
        let y = data.y_iter();
        let y_fit = data.x_iter().map(|x| self.y(x));
        statistics::r_squared(y, y_fit)
    }

    /// Computes the derivative of this polynomial with respect to `x`.
    ///
    /// # Errors
    /// If the basis cannot compute the derivative coefficients, an error is returned.
    ///
    /// # Example
    /// ```rust
    /// polyapprox::function!(test(x) = 20.0 + 3.0 x^1 + 2.0 x^2 + 4.0 x^3);
    /// let deriv = test.derivative().unwrap();
    /// assert_eq!(deriv.coefficients(), &[3.0, 4.0, 12.0]);
    /// ```
    pub fn derivative(&self) -> Result<Polynomial<'static, B::B2, T>>
    where
        B: DifferentialBasis<T>,
    {
        let (db, dc) = self.basis.derivative(&self.coefficients)?;
        Polynomial::from_basis(db, dc)
    }

    /// Computes the `n`th derivative of this polynomial.
    ///
    /// # Errors
    /// If the basis cannot compute the derivative coefficients, an error is returned.
    pub fn nth_derivative(&self, n: usize) -> Result<Polynomial<'static, B, T>>
    where
        B: DifferentialBasis<T, B2 = B>,
    {
        let mut derivative = self.clone().into_owned();
        for _ in 0..n {
            derivative = derivative.derivative()?;
        }
        Ok(derivative)
    }

    /// Converts the polynomial into a monomial polynomial in the original, un-normalized `x`.
    ///
    /// # Errors
    /// Returns an error if the current basis cannot be converted to monomial form.
    ///
    /// # Example
    /// ```
    /// # use polyapprox::basis::TaylorBasis;
    /// // (x - 1)^2
    /// let poly = TaylorBasis::new_polynomial(1.0, &[0.0, 0.0, 1.0]).unwrap();
    /// let monomial = poly.as_monomial().unwrap();
    /// assert_eq!(monomial.coefficients(), &[1.0, -2.0, 1.0]);
    /// ```
    pub fn as_monomial(&self) -> Result<MonomialPolynomial<'static, T>>
    where
        B: IntoMonomialBasis<T>,
    {
        let mut coefficients = self.coefficients().to_vec();
        self.basis().as_monomial(&mut coefficients)?;
        Ok(MonomialPolynomial::owned(coefficients))
    }

    /// Returns a human-readable string of the polynomial equation.
    ///
    /// # Example
    /// ```
    /// # use polyapprox::MonomialPolynomial;
    /// let poly = MonomialPolynomial::borrowed(&[1.0, 2.0, 3.0]); // 1 + 2x + 3x^2
    /// assert_eq!(poly.equation(), "y(x) = 3.00x² + 2.00x + 1.00");
    /// ```
    #[expect(clippy::missing_panics_doc, reason = "Infallible operation")]
    #[must_use]
    pub fn equation(&self) -> String {
        let mut output = String::new();
        self.basis
            .format_polynomial(&mut output, self.coefficients())
            .expect("String should be infallible");
        output
    }
}

impl<'a, B, T: Value> AsRef<Polynomial<'a, B, T>> for Polynomial<'a, B, T>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    fn as_ref(&self) -> &Polynomial<'a, B, T> {
        self
    }
}

impl<B, T: Value> std::fmt::Display for Polynomial<'_, B, T>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.equation())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use crate::{
        assert_all_close, assert_close, assert_y,
        basis::{MonomialBasis, TaylorBasis},
        function,
    };

    use super::*;

    #[test]
    fn test_y() {
        function!(test(x) = 8.0 + 7.0 x^1 + 6.0 x^2);
        assert_y!(&test, 0.0, 8.0);
        assert_y!(&test, 1.0, 21.0);
        assert_y!(&test, 2.0, 46.0);
    }

    #[test]
    fn test_solve_and_evaluate() {
        function!(test(x) = 8.0 + 7.0 x^1 + 6.0 x^2);
        let points = test.solve(vec![0.0, 1.0, 2.0]);
        assert_all_close!(points.y(), &[8.0, 21.0, 46.0]);
        assert_all_close!(test.evaluate(&[0.0, 1.0, 2.0]), &[8.0, 21.0, 46.0]);
        assert_close!(test.r_squared(&points), 1.0);
    }

    #[test]
    fn test_from_basis_rejects_empty() {
        let result = MonomialBasis::<f64>::new_polynomial(&[]);
        assert!(matches!(result, Err(Error::InvalidNumberOfParameters(0))));
    }

    #[test]
    fn test_nth_derivative() {
        // x^4 about 0: 4th derivative is 24
        let poly = TaylorBasis::new_polynomial(0.0, &[0.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
        let d4 = poly.nth_derivative(4).unwrap();
        assert_eq!(d4.coefficients(), &[24.0]);
        assert_eq!(poly.nth_derivative(0).unwrap(), poly.clone().into_owned());

        let d5 = poly.nth_derivative(5).unwrap();
        assert_eq!(d5.coefficients(), &[0.0]);
    }

    #[test]
    fn test_display_matches_equation() {
        let poly = TaylorBasis::new_polynomial(0.0, &[1.0, -1.0]).unwrap();
        assert_eq!(poly.to_string(), poly.equation());
        assert_eq!(poly.to_string(), "y(x) = -x + 1.00");
    }
}
