use std::{borrow::Cow, ops::RangeInclusive};

use nalgebra::{DMatrix, DVector, SVD};

use crate::{
    basis::{Basis, IntoMonomialBasis},
    display::PolynomialDisplay,
    error::{Error, Result},
    statistics,
    value::{CoordExt, Value},
    MonomialPolynomial, Polynomial,
};

/// Normalized Chebyshev polynomial curve
///
/// Uses the Chebyshev polynomials, which are orthogonal polynomials defined on the interval \[-1, 1\].
/// The sample range is mapped onto that interval before the design matrix is built, which keeps the
/// least-squares system well conditioned even at degree 25.
pub type ChebyshevFit<'data, T = f64> = CurveFit<'data, crate::basis::ChebyshevBasis<T>, T>;

/// Non-normalized monomial polynomial curve
///
/// Uses the standard monomial basis functions, which are of the form 1, x, x^2, ..., x^n.
/// Ill-conditioned for high degrees; mostly useful as an exact reference in tests.
pub type MonomialFit<'data, T = f64> = CurveFit<'data, crate::basis::MonomialBasis<T>, T>;

/// Represents a polynomial least-squares fit of a given basis to a set of samples.
///
/// The fit keeps a copy (or borrow) of the data it was built from, and only evaluates
/// inside the x-range of that data. Use [`CurveFit::into_polynomial`] to drop the data
/// and get a [`Polynomial`] that can be evaluated anywhere.
///
/// # Type Parameters
/// - `'data`: Lifetime of the borrowed samples, if any.
/// - `B`: The polynomial basis.
/// - `T`: Numeric type, default is `f64`.
///
/// # Example
/// ```
/// # use polyapprox::ChebyshevFit;
/// let data = &[(0.0, 1.0), (1.0, 3.0), (2.0, 7.0)];
/// let fit = ChebyshevFit::new(data, 2).unwrap();
/// println!("Coefficients: {:?}", fit.coefficients());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CurveFit<'data, B, T: Value = f64>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    data: Cow<'data, [(T, T)]>,
    x_range: RangeInclusive<T>,
    function: Polynomial<'static, B, T>,
}
impl<'data, T: Value, B> CurveFit<'data, B, T>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    /// Turns a dataset portion into a basis matrix and y-values vector.
    fn create_matrix(data: &[(T, T)], basis: &B, k: usize) -> (DMatrix<T>, DVector<T>) {
        let mut bigx = DMatrix::zeros(data.len(), k);
        let b = DVector::from_iterator(data.len(), data.iter().map(|&(_, y)| y));

        for (row, (x, _)) in bigx.row_iter_mut().zip(data.iter()) {
            let x = basis.normalize_x(*x);
            basis.fill_matrix_row(0, x, row);
        }

        (bigx, b)
    }

    /// Solves the linear system using SVD.
    fn solve_matrix(xtx: DMatrix<T>, xtb: &DVector<T>) -> Result<Vec<T>> {
        let size = xtx.shape();

        // Calculate the singular value decomposition of the matrix
        let decomp = SVD::new_unordered(xtx, true, true);

        // ~= machine_epsilon * max(size) * max_singular
        let machine_epsilon = T::epsilon();
        let max_size = size.0.max(size.1);
        let sigma_max = decomp.singular_values.max();
        let epsilon = machine_epsilon * T::try_cast(max_size)? * sigma_max;

        // Solve for X in `SVD * X = b`
        let big_x = decomp.solve(xtb, epsilon).map_err(Error::Algebra)?;
        let coefficients: Vec<_> = big_x.data.into();

        if coefficients.iter().any(|c| c.is_nan()) {
            return Err(Error::Algebra("NaN in coefficients"));
        }

        Ok(coefficients)
    }

    /// Creates a new polynomial least-squares fit for the given samples and degree.
    ///
    /// # Parameters
    /// - `data`: Slice of `(x, y)` samples to fit.
    /// - `degree`: Desired polynomial degree.
    ///
    /// # Errors
    /// - [`Error::NoData`]: `data` is empty.
    /// - [`Error::UnderdeterminedFit`]: fewer than `degree + 1` samples.
    /// - [`Error::Algebra`]: the linear system could not be solved.
    /// - [`Error::CastFailed`]: a numeric value could not be cast to the target type.
    ///
    /// # Behavior
    /// - Builds the basis from the x-range of the data, then fills each row of the design matrix
    ///   using [`Basis::fill_matrix_row`].
    /// - Solves `A * c = y` in the least-squares sense with an SVD.
    ///
    /// # Example
    /// ```
    /// # use polyapprox::ChebyshevFit;
    /// let data: &[(f64, f64)] = &[(0.0, 1.0), (1.0, 3.0), (2.0, 7.0)];
    /// let fit = ChebyshevFit::new(data, 2).unwrap();
    /// assert!((fit.y(1.0).unwrap() - 3.0).abs() < 1e-9);
    /// ```
    pub fn new(data: impl Into<Cow<'data, [(T, T)]>>, degree: usize) -> Result<Self> {
        let data: Cow<_> = data.into();

        if data.is_empty() {
            return Err(Error::NoData);
        }

        let x_range = data.x_range().ok_or(Error::NoData)?;
        let basis = B::from_range(x_range.clone());
        let k = basis.k(degree);
        if data.len() < k {
            return Err(Error::UnderdeterminedFit {
                samples: data.len(),
                degree,
            });
        }

        let (m, b) = Self::create_matrix(&data, &basis, k);
        let coefs = Self::solve_matrix(m, &b)?;
        log::debug!(
            "Fitted degree {degree} to {} samples over {:?}",
            data.len(),
            x_range
        );

        let function = unsafe { Polynomial::from_raw(basis, coefs.into(), degree) }; // Safety: The coefs were generated by the basis
        Ok(Self {
            data,
            x_range,
            function,
        })
    }

    /// Returns the degree of the polynomial.
    pub fn degree(&self) -> usize {
        self.function.degree()
    }

    /// Returns the fitted coefficients, one per basis function.
    pub fn coefficients(&self) -> &[T] {
        self.function.coefficients()
    }

    /// Returns the basis the fit is expressed in.
    pub fn basis(&self) -> &B {
        self.function.basis()
    }

    /// Returns a reference to the samples used for fitting.
    pub fn data(&self) -> &[(T, T)] {
        &self.data
    }

    /// Returns the inclusive range of x-values in the dataset.
    pub fn x_range(&self) -> RangeInclusive<T> {
        self.x_range.clone()
    }

    /// Evaluates the fit at a given x-value.
    ///
    /// # Errors
    /// Returns [`Error::DataRange`] if `x` is outside the original data bounds.
    ///
    /// # Notes
    /// To evaluate outside the original bounds, use [`CurveFit::as_polynomial`].
    pub fn y(&self, x: T) -> Result<T> {
        if !self.x_range.contains(&x) {
            return Err(Error::DataRange(
                format!("{}", self.x_range.start()),
                format!("{}", self.x_range.end()),
            ));
        }

        Ok(self.function.y(x))
    }

    /// Returns the fitted y-values corresponding to the original x-values.
    ///
    /// Every x-value of the source data is inside the fit's range, so this cannot fail.
    pub fn solution(&self) -> Vec<(T, T)> {
        self.data()
            .iter()
            .map(|&(x, _)| (x, self.function.y(x)))
            .collect()
    }

    /// Root mean squared error of this fit against its source data.
    ///
    /// See [`statistics::root_mean_squared_error`].
    pub fn root_mean_squared_error(&self) -> T {
        let y = self.data.y_iter();
        let y_fit = self.solution().into_iter().map(|(_, y)| y);
        statistics::root_mean_squared_error(y, y_fit)
    }

    /// Calculates the R-squared value for the model compared to provided data.
    ///
    /// See [`statistics::r_squared`].
    pub fn r_squared(&self, data: &[(T, T)]) -> T {
        self.function.r_squared(data)
    }

    /// A reference to the [`Polynomial`] that this fit uses internally.
    ///
    /// The polynomial can be evaluated anywhere; outside the fit's x-range it extrapolates.
    pub fn as_polynomial(&self) -> &Polynomial<'_, B, T> {
        &self.function
    }

    /// Drops the samples and returns the fitted [`Polynomial`].
    pub fn into_polynomial(self) -> Polynomial<'static, B, T> {
        self.function
    }

    /// Converts the fit into a monomial polynomial in the original `x`.
    ///
    /// # Errors
    /// Returns an error if the current basis cannot be converted to monomial form.
    pub fn as_monomial(&self) -> Result<MonomialPolynomial<'static, T>>
    where
        B: IntoMonomialBasis<T>,
    {
        self.function.as_monomial()
    }

    /// Returns a human-readable string of the fitted equation.
    #[must_use]
    pub fn equation(&self) -> String {
        self.function.equation()
    }

}

impl<B, T: Value> AsRef<Polynomial<'static, B, T>> for CurveFit<'_, B, T>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    fn as_ref(&self) -> &Polynomial<'static, B, T> {
        &self.function
    }
}

impl<T: Value, B> std::fmt::Display for CurveFit<'_, B, T>
where
    B: Basis<T>,
    B: PolynomialDisplay<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.equation())
    }
}
