//! Rendering of approximations as human-readable equations
//!
//! # Key Concepts
//! - **[`PolynomialDisplay`]**: Trait to define how a polynomial basis renders terms.
//! - **[`Term`]**: A single polynomial term with a sign and body.
//! - **[`Sign`]**: Whether a term is added or subtracted.
//!
//! Each basis renders its own terms:
//! - Taylor: `3.00·(x - 2.00)²`, or `3.00x²` when expanded about 0
//! - Chebyshev: `3.00·T₂(xₛ)`, prefixed with the scaling formula for `xₛ`
//! - Monomial: `3.00x²`
//!
//! # Helpers
//! - [`format_coefficient`]: Formats a numeric coefficient, skipping zeros.
//! - [`format_variable`]: Attaches subscripts and superscript exponents to a variable.
//! - [`format_shifted_variable`]: Renders `(x - a)`.
#![allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]

use crate::value::Value;

pub mod unicode;

/// Default precision for formatting used by the provided implementations of [`PolynomialDisplay`]
pub const DEFAULT_PRECISION: usize = 2;

/// Default range in which scientific notation is not used
#[must_use]
pub fn default_fixed_range<T: Value>() -> Option<std::ops::Range<T>> {
    const RANGE: std::ops::Range<f64> = 1e-3..1e3;
    let s = T::try_cast(RANGE.start).ok()?;
    let e = T::try_cast(RANGE.end).ok()?;
    Some(s..e)
}

/// Trait for formatting and displaying polynomial expressions.
///
/// Implementors control how individual terms are displayed,
/// while a default implementation assembles them into a full equation.
///
/// - [`PolynomialDisplay::format_term`] is required: renders a single term
///   (e.g., `3x²`, `-x`, or `7`).
/// - [`PolynomialDisplay::format_polynomial`] is provided: writes the full polynomial as
///   `"y(x) = ..."` into any [`std::fmt::Write`] buffer.
pub trait PolynomialDisplay<T: Value> {
    /// Formats a single polynomial term for display.
    ///
    /// Returning `None` indicates the term should be skipped
    /// (typically when the coefficient is zero).
    ///
    /// # Example
    /// ```rust
    /// # use polyapprox::display::{format_variable, format_coefficient, DEFAULT_PRECISION, PolynomialDisplay, Term, Sign};
    /// pub struct MyBasis;
    /// impl<T: polyapprox::value::Value> PolynomialDisplay<T> for MyBasis {
    ///     fn format_term(&self, degree: i32, coef: T) -> Option<Term> {
    ///         let sign = Sign::from_coef(coef);
    ///         let base = format_variable("u", None, degree);
    ///         let coef = format_coefficient(coef, degree, DEFAULT_PRECISION)?;
    ///         Some(Term::new(sign, format!("{coef}{base}")))
    ///     }
    /// }
    ///
    /// let mut out = String::new();
    /// MyBasis.format_polynomial(&mut out, &[1.0, 0.0, 2.0]).unwrap();
    /// assert_eq!(out, "y(x) = 2.00u² + 1.00");
    /// ```
    fn format_term(&self, degree: i32, coef: T) -> Option<Term>;

    /// Formats the change of variable used by the basis, if any.
    fn format_scaling_formula(&self) -> Option<String> {
        None
    }

    /// Writes the full polynomial expression into the provided buffer.
    ///
    /// Terms are written from the highest degree down. Zero coefficients are skipped, and the
    /// first term carries no leading `+`. An all-zero polynomial is written as `0`.
    ///
    /// # Errors
    /// Returns an error if writing to `buffer` fails.
    fn format_polynomial<B: std::fmt::Write>(
        &self,
        buffer: &mut B,
        coefficients: &[T],
    ) -> std::fmt::Result {
        let degree = coefficients.len().saturating_sub(1);
        let mut terms = coefficients
            .iter()
            .rev()
            .enumerate()
            .filter_map(|(i, &coef)| self.format_term((degree - i) as i32, coef));

        if let Some(scaling) = self.format_scaling_formula() {
            write!(buffer, "{scaling}, ")?;
        }

        write!(buffer, "y(x) = ")?;
        let Some(first) = terms.next() else {
            return write!(buffer, "0");
        };

        if first.sign == Sign::Negative {
            write!(buffer, "{}", first.sign.char())?;
        }
        write!(buffer, "{}", first.body)?;

        for term in terms {
            write!(buffer, " {} {}", term.sign.char(), term.body)?;
        }

        Ok(())
    }
}

/// Represents the sign of a polynomial term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Positive sign (`+` when displayed).
    Positive,

    /// Negative sign (`-` when displayed).
    Negative,
}

impl Sign {
    /// Determines the sign from a numeric coefficient.
    ///
    /// # Example
    /// ```
    /// # use polyapprox::display::Sign;
    /// assert_eq!(Sign::from_coef(3.0), Sign::Positive);
    /// assert_eq!(Sign::from_coef(-2.0), Sign::Negative);
    /// ```
    pub fn from_coef<T: Value>(coef: T) -> Self {
        if coef.is_sign_negative() {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// `+` for `Positive`, `-` for `Negative`.
    #[must_use]
    pub fn char(&self) -> char {
        match self {
            Sign::Positive => '+',
            Sign::Negative => '-',
        }
    }
}

/// A single term of a polynomial: its sign and the unsigned body (e.g., `"2.00x²"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// The sign of the term.
    pub sign: Sign,

    /// The body of the term, without its sign.
    pub body: String,
}

impl Term {
    /// Creates a new polynomial term with the given sign and body.
    #[must_use]
    pub fn new(sign: Sign, body: String) -> Self {
        Self { sign, body }
    }
}

/// Formats the magnitude of a coefficient for display in a polynomial term.
///
/// - Returns `None` if the coefficient is zero or effectively zero (≤ epsilon).
/// - Returns an empty string for a unit coefficient on a non-constant term.
/// - Formats as a decimal if the absolute value is between `1e-3` and `1e3`, and in scientific notation otherwise.
///
/// # Example
/// ```
/// # use polyapprox::display::format_coefficient;
/// assert_eq!(format_coefficient(0.0, 1, 2), None);
/// assert_eq!(format_coefficient(-2.5, 1, 2), Some("2.50".to_string()));
/// assert_eq!(format_coefficient(1.0, 3, 2), Some(String::new()));
/// assert_eq!(format_coefficient(1e5, 1, 2), Some("1.00e5".to_string()));
/// ```
pub fn format_coefficient<T: Value>(coef: T, degree: i32, precision: usize) -> Option<String> {
    let abs = Value::abs(coef);

    if coef.is_zero() || abs <= T::epsilon() {
        return None;
    }

    if abs.abs_sub(T::one()) <= T::epsilon() && degree != 0 {
        return Some(String::new());
    }

    let sci_cutoff = default_fixed_range();
    Some(unicode::float(abs, sci_cutoff, precision))
}

/// Formats the variable part of a polynomial term: base, subscript and exponent.
///
/// - If `exp == 0`, returns an empty string (`""`).
/// - If `exp == 1`, returns the base string unchanged.
/// - Otherwise, appends the Unicode subscript and superscript exponent to `base`.
///
/// # Examples
/// ```
/// # use polyapprox::display::format_variable;
/// assert_eq!(format_variable("x", None, 0), "");
/// assert_eq!(format_variable("x", None, 1), "x");
/// assert_eq!(format_variable("x", Some("1"), 2), "x₁²");
/// ```
#[must_use]
pub fn format_variable(base: &str, subscript: Option<&str>, exp: i32) -> String {
    match exp {
        0 => String::new(),
        1 => base.to_string(),
        _ => {
            let lbl = unicode::subscript(subscript.unwrap_or_default());
            let sup = unicode::superscript(&exp.to_string());
            format!("{base}{lbl}{sup}")
        }
    }
}

/// Formats `variable` shifted by a center point, `(x - a)`.
///
/// A zero center leaves the variable bare, and a negative center is written as `(x + |a|)`.
///
/// # Examples
/// ```
/// # use polyapprox::display::format_shifted_variable;
/// assert_eq!(format_shifted_variable("x", 0.0, 2), "x");
/// assert_eq!(format_shifted_variable("x", 1.5, 2), "(x - 1.50)");
/// assert_eq!(format_shifted_variable("x", -2.0, 1), "(x + 2.0)");
/// ```
#[must_use]
pub fn format_shifted_variable<T: Value>(variable: &str, center: T, precision: usize) -> String {
    if center.is_zero() {
        return variable.to_string();
    }

    let sign = if center.is_sign_negative() { '+' } else { '-' };
    let magnitude = unicode::float(Value::abs(center), default_fixed_range(), precision);
    format!("({variable} {sign} {magnitude})")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DummyBasis;

    impl PolynomialDisplay<f64> for DummyBasis {
        fn format_term(&self, degree: i32, coef: f64) -> Option<Term> {
            let sign = Sign::from_coef(coef);
            let coef_str = format_coefficient(coef, 0, DEFAULT_PRECISION)?;
            let body = format!("{coef_str}{}", format_variable("x", None, degree));
            Some(Term::new(sign, body))
        }
    }

    #[test]
    fn test_sign_from_coef() {
        assert_eq!(Sign::from_coef(1.0), Sign::Positive);
        assert_eq!(Sign::from_coef(-1.0), Sign::Negative);
        assert_eq!(Sign::from_coef(0.0), Sign::Positive);
    }

    #[test]
    fn test_format_coefficient() {
        assert_eq!(format_coefficient(2.5, 1, 2), Some("2.50".to_string()));
        assert_eq!(format_coefficient(-1.0, 2, 2), Some(String::new()));
        assert_eq!(format_coefficient(-1.0, 0, 2), Some("1.00".to_string()));
        assert_eq!(format_coefficient(1e-20, 1, 2), None);
        assert_eq!(format_coefficient(1e-5, 2, 2), Some("1.00e-5".to_string()));
    }

    #[test]
    fn test_format_variable() {
        assert_eq!(format_variable("T", None, 3), "T³");
        assert_eq!(format_variable("x", None, -2), "x⁻²");
        assert_eq!(format_variable("(x - 1)", None, 12), "(x - 1)¹²");
    }

    #[test]
    fn test_format_shifted_variable() {
        assert_eq!(format_shifted_variable("x", 0.0, 2), "x");
        assert_eq!(format_shifted_variable("x", 0.25, 2), "(x - 0.25)");
        assert_eq!(format_shifted_variable("x", -1.0, 2), "(x + 1.00)");
        assert_eq!(format_shifted_variable("x", 2e4, 1), "(x - 2.0e4)");
    }

    #[test]
    fn test_format_polynomial() {
        let mut buf = String::new();
        DummyBasis
            .format_polynomial(&mut buf, &[2.0, -3.0, 0.0, 4.0])
            .unwrap();
        assert_eq!(buf, "y(x) = 4.00x³ - 3.00x + 2.00");

        let mut buf = String::new();
        DummyBasis.format_polynomial(&mut buf, &[-1.0, 2.0]).unwrap();
        assert_eq!(buf, "y(x) = 2.00x - 1.00");
    }

    #[test]
    fn test_format_polynomial_all_zero() {
        let mut buf = String::new();
        DummyBasis.format_polynomial(&mut buf, &[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(buf, "y(x) = 0");

        let mut buf = String::new();
        DummyBasis.format_polynomial(&mut buf, &[]).unwrap();
        assert_eq!(buf, "y(x) = 0");
    }
}
