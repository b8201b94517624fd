//! Truncated Taylor expansions of catalog functions.
//!
//! [`TaylorExpander::expand`] computes `cₙ = f⁽ⁿ⁾(a) / n!` for `n = 0..=N` and stores them in a
//! [`TaylorPolynomial`] about `a`. Derivatives are exact by rule, never finite differences.
//!
//! ```
//! # use polyapprox::{catalog::Catalog, taylor::TaylorExpander};
//! let sin = Catalog::standard().get(1).unwrap().clone();
//! let p = TaylorExpander::default().expand(&sin, 0.0, 5).unwrap();
//! assert!((p.y(0.5) - 0.5_f64.sin()).abs() < 1e-4);
//! ```
use std::str::FromStr;

use crate::{
    basis::TaylorBasis,
    catalog::TargetFunction,
    error::{Error, Result},
    value::Value,
    Polynomial, TaylorPolynomial,
};

/// Highest degree [`DerivativeMethod::Symbolic`] will expand to.
pub const MAX_SYMBOLIC_DEGREE: usize = 10;

/// How the derivatives at the expansion point are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DerivativeMethod {
    /// Propagates a truncated power series through the expression tree.
    ///
    /// Each node applies the recurrence of its derivative rule, so the cost stays polynomial in
    /// the degree, even at degree 25.
    #[default]
    Series,

    /// Differentiates the expression tree symbolically `N` times and evaluates each derivative.
    ///
    /// The derivative trees grow geometrically with `N`, so this method only accepts degrees up to
    /// [`MAX_SYMBOLIC_DEGREE`]. Meant for low degrees and cross-checking.
    Symbolic,
}

impl std::fmt::Display for DerivativeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DerivativeMethod::Series => write!(f, "series"),
            DerivativeMethod::Symbolic => write!(f, "symbolic"),
        }
    }
}

impl FromStr for DerivativeMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "series" => Ok(Self::Series),
            "symbolic" => Ok(Self::Symbolic),
            other => Err(Error::Config(format!(
                "unknown derivative method `{other}`, expected `series` or `symbolic`"
            ))),
        }
    }
}

/// Builds Taylor polynomials of target functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaylorExpander {
    method: DerivativeMethod,
}
impl TaylorExpander {
    /// Creates an expander using the given derivative method.
    #[must_use]
    pub fn new(method: DerivativeMethod) -> Self {
        Self { method }
    }

    /// The derivative method in use.
    #[must_use]
    pub fn method(&self) -> DerivativeMethod {
        self.method
    }

    /// Degree `degree` Taylor polynomial of `function` about `center`.
    ///
    /// The result has `degree + 1` coefficients, and evaluates with Horner's scheme in `(x - center)`.
    ///
    /// # Errors
    /// - [`Error::UndefinedDerivative`] if the function is not differentiable `degree` times
    ///   at `center`, or if any coefficient is not finite.
    /// - [`Error::SymbolicDegreeLimit`] if the method is [`DerivativeMethod::Symbolic`] and
    ///   `degree` is above [`MAX_SYMBOLIC_DEGREE`].
    pub fn expand(
        &self,
        function: &TargetFunction,
        center: f64,
        degree: usize,
    ) -> Result<TaylorPolynomial<'static>> {
        let coefficients = match self.method {
            DerivativeMethod::Series => series_coefficients(function, center, degree)?,
            DerivativeMethod::Symbolic => symbolic_coefficients(function, center, degree)?,
        };

        log::debug!(
            "Expanded {function} about {center} to degree {degree} using the {} method",
            self.method
        );
        Polynomial::from_basis(TaylorBasis::new(center), coefficients)
    }
}

fn series_coefficients(function: &TargetFunction, center: f64, degree: usize) -> Result<Vec<f64>> {
    let series = function.expr().taylor_series(center, degree)?;
    Ok(series.into_coefficients())
}

fn symbolic_coefficients(
    function: &TargetFunction,
    center: f64,
    degree: usize,
) -> Result<Vec<f64>> {
    if degree > MAX_SYMBOLIC_DEGREE {
        return Err(Error::SymbolicDegreeLimit {
            degree,
            max: MAX_SYMBOLIC_DEGREE,
        });
    }

    let mut derivative = function.expr().clone();
    let mut coefficients = Vec::with_capacity(degree + 1);

    for n in 0..=degree {
        if n > 0 {
            derivative = derivative.derivative();
        }

        let c = derivative.eval(center) / f64::factorial(n);
        if !c.is_finite() {
            return Err(Error::UndefinedDerivative {
                expression: derivative.to_string(),
                point: center,
            });
        }
        coefficients.push(c);
    }

    Ok(coefficients)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use crate::{
        assert_all_close, assert_close,
        catalog::Catalog,
        symbolic::{Expr, Func},
    };

    use super::*;

    #[test]
    fn test_sin_degree_5() {
        let sin = TargetFunction::new(Func::Sin, 0.0);
        let p = TaylorExpander::default().expand(&sin, 0.0, 5).unwrap();

        assert_eq!(p.degree(), 5);
        assert_eq!(p.basis().center(), 0.0);
        assert_all_close!(
            p.coefficients(),
            &[0.0, 1.0, 0.0, -1.0 / 6.0, 0.0, 1.0 / 120.0],
            tol = 1e-15
        );
        assert_close!(p.y(0.5), 0.5_f64.sin(), tol = 1e-4);
    }

    #[test]
    fn test_exp_off_center() {
        let exp = TargetFunction::new(Func::Exp, 0.0);
        let p = TaylorExpander::default().expand(&exp, 1.0, 4).unwrap();
        let e = std::f64::consts::E;
        assert_all_close!(
            p.coefficients(),
            &[e, e, e / 2.0, e / 6.0, e / 24.0],
            tol = 1e-12
        );
    }

    #[test]
    fn test_derivatives_at_center() {
        // The n-th derivative of the polynomial at the center matches the symbolic derivative
        let catalog = Catalog::standard();
        for f in &catalog {
            let p = TaylorExpander::default().expand(f, 0.0, 4).unwrap();
            let mut expr: Expr = f.expr().clone();
            for n in 0..=4 {
                let derivative = p.nth_derivative(n).unwrap();
                let expected = expr.eval(0.0);
                let tol = 1e-9 * expected.abs().max(1.0);
                let label = format!("d{n} {f}");
                assert_close!(derivative.y(0.0), expected, tol = tol, "{}", label);
                expr = expr.derivative();
            }
        }
    }

    #[test]
    fn test_methods_agree() {
        let series = TaylorExpander::new(DerivativeMethod::Series);
        let symbolic = TaylorExpander::new(DerivativeMethod::Symbolic);

        for f in &Catalog::standard() {
            for center in [0.0, 0.25] {
                let a = series.expand(f, center, 5).unwrap();
                let b = symbolic.expand(f, center, 5).unwrap();
                for (n, (&ca, &cb)) in a.coefficients().iter().zip(b.coefficients()).enumerate() {
                    let tol = 1e-9 * cb.abs().max(1.0);
                    let label = format!("{f} c{n} about {center}");
                    assert_close!(ca, cb, tol = tol, "{}", label);
                }
            }
        }
    }

    #[test]
    fn test_high_degree_series() {
        let catalog = Catalog::standard();
        for f in &catalog {
            let p = TaylorExpander::default().expand(f, 0.0, 25).unwrap();
            assert_eq!(p.coefficients().len(), 26);
            assert!(p.coefficients().iter().all(|c| c.is_finite()), "{f}");
        }
    }

    #[test]
    fn test_undefined_derivative() {
        let csc = TargetFunction::new(Func::Csc, 0.0);
        for method in [DerivativeMethod::Series, DerivativeMethod::Symbolic] {
            let result = TaylorExpander::new(method).expand(&csc, 0.0, 3);
            assert!(
                matches!(result, Err(Error::UndefinedDerivative { .. })),
                "{method}"
            );
        }

        // asin is not analytic at 1
        let asin = TargetFunction::new(Func::Asin, 0.0);
        let result = TaylorExpander::default().expand(&asin, 1.0, 2);
        assert!(matches!(result, Err(Error::UndefinedDerivative { .. })));
    }

    #[test]
    fn test_symbolic_degree_limit() {
        let asin = TargetFunction::new(Func::Asin, 0.0);
        let series = TaylorExpander::new(DerivativeMethod::Series);
        let symbolic = TaylorExpander::new(DerivativeMethod::Symbolic);

        let exact = series.expand(&asin, 0.0, MAX_SYMBOLIC_DEGREE).unwrap();
        let slow = symbolic.expand(&asin, 0.0, MAX_SYMBOLIC_DEGREE).unwrap();
        assert_all_close!(slow.coefficients(), exact.coefficients(), tol = 1e-9);

        for degree in [MAX_SYMBOLIC_DEGREE + 1, 15, 25] {
            let result = symbolic.expand(&asin, 0.0, degree);
            assert!(
                matches!(
                    result,
                    Err(Error::SymbolicDegreeLimit { degree: d, max: MAX_SYMBOLIC_DEGREE }) if d == degree
                ),
                "degree {degree}"
            );
            assert!(series.expand(&asin, 0.0, degree).is_ok());
        }
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!(
            "series".parse::<DerivativeMethod>().unwrap(),
            DerivativeMethod::Series
        );
        assert_eq!(
            " Symbolic ".parse::<DerivativeMethod>().unwrap(),
            DerivativeMethod::Symbolic
        );
        assert!(matches!(
            "finite".parse::<DerivativeMethod>(),
            Err(Error::Config(_))
        ));
        assert_eq!(DerivativeMethod::default().to_string(), "series");
    }
}
