//! The fixed set of functions every batch approximates.
//!
//! Some functions are singular at or near 0, so they are evaluated at a shifted argument
//! `f(x) = g(x + s)`. The shifts are fixed constants, not derived from the singularities:
//!
//! | Index | Function | Shift |
//! |-------|----------|-------|
//! | 0     | exp      |       |
//! | 1     | sin      |       |
//! | 2     | cos      |       |
//! | 3     | tan      |       |
//! | 4     | asin     |       |
//! | 5     | acos     |       |
//! | 6     | atan     |       |
//! | 7     | csc      | 2     |
//! | 8     | sec      |       |
//! | 9     | cot      | 2     |
//! | 10    | acsc     | 2     |
//! | 11    | asec     | 2     |
//! | 12    | acot     | 1     |
//!
//! `acot` is the only function shifted by 1. Since `acot(0) = π/2` it would not need a shift at
//! all, but the tables produced by earlier runs use `acot(x + 1)`, so it is kept.
//!
//! ```
//! # use polyapprox::catalog::Catalog;
//! let catalog = Catalog::standard();
//! let csc = catalog.get(7).unwrap();
//! assert_eq!(csc.to_string(), "csc(x + 2)");
//! assert_eq!(csc.eval(0.0), 1.0 / 2.0_f64.sin());
//! ```
use crate::{
    error::{Error, Result},
    symbolic::{Expr, Func},
};

/// Number of functions in [`Catalog::standard`].
pub const CATALOG_SIZE: usize = 13;

const STANDARD: [(Func, f64); CATALOG_SIZE] = [
    (Func::Exp, 0.0),
    (Func::Sin, 0.0),
    (Func::Cos, 0.0),
    (Func::Tan, 0.0),
    (Func::Asin, 0.0),
    (Func::Acos, 0.0),
    (Func::Atan, 0.0),
    (Func::Csc, 2.0),
    (Func::Sec, 0.0),
    (Func::Cot, 2.0),
    (Func::Acsc, 2.0),
    (Func::Asec, 2.0),
    (Func::Acot, 1.0),
];

/// A real function of one variable, `g(x + s)`, with its symbolic form.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetFunction {
    func: Func,
    shift: f64,
    expr: Expr,
}
impl TargetFunction {
    /// Creates the target `func(x + shift)`.
    #[must_use]
    pub fn new(func: Func, shift: f64) -> Self {
        let argument = Expr::x() + Expr::number(shift);
        let expr = Expr::call(func, argument);
        Self { func, shift, expr }
    }

    /// Name of the underlying function, without the shift (`"csc"`).
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.func.name()
    }

    /// The underlying elementary function.
    #[must_use]
    pub fn func(&self) -> Func {
        self.func
    }

    /// Constant added to `x` before evaluating.
    #[must_use]
    pub fn shift(&self) -> f64 {
        self.shift
    }

    /// The symbolic form, with the shift already applied.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Evaluates the function at `x`.
    ///
    /// Returns a non-finite value at a singularity; see [`TargetFunction::try_eval`].
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        self.func.eval(x + self.shift)
    }

    /// Evaluates the function at `x`, failing at a singularity.
    ///
    /// # Errors
    /// Returns [`Error::Domain`] if the value is not finite.
    pub fn try_eval(&self, x: f64) -> Result<f64> {
        let y = self.eval(x);
        if y.is_finite() {
            Ok(y)
        } else {
            Err(Error::Domain {
                function: self.to_string(),
                x,
            })
        }
    }
}

impl std::fmt::Display for TargetFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expr)
    }
}

/// An ordered list of target functions.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    functions: Vec<TargetFunction>,
}
impl Catalog {
    /// The 13 standard functions, in table order.
    #[must_use]
    pub fn standard() -> Self {
        let functions = STANDARD
            .iter()
            .map(|&(func, shift)| TargetFunction::new(func, shift))
            .collect();
        Self { functions }
    }

    /// A catalog of arbitrary functions, in the given order.
    #[must_use]
    pub fn from_functions(functions: Vec<TargetFunction>) -> Self {
        Self { functions }
    }

    /// Returns the function at `index`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownFunction`] if there is no function at `index`.
    pub fn get(&self, index: usize) -> Result<&TargetFunction> {
        self.functions
            .get(index)
            .ok_or(Error::UnknownFunction(index))
    }

    /// Number of functions in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// The functions, in order.
    pub fn iter(&self) -> impl Iterator<Item = &TargetFunction> {
        self.functions.iter()
    }

    /// The functions as a slice, in order.
    #[must_use]
    pub fn as_slice(&self) -> &[TargetFunction] {
        &self.functions
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a TargetFunction;
    type IntoIter = std::slice::Iter<'a, TargetFunction>;

    fn into_iter(self) -> Self::IntoIter {
        self.functions.iter()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use crate::assert_close;

    use super::*;

    #[test]
    fn test_standard_order() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), CATALOG_SIZE);

        let names: Vec<_> = catalog.iter().map(TargetFunction::name).collect();
        assert_eq!(
            names,
            [
                "exp", "sin", "cos", "tan", "asin", "acos", "atan", "csc", "sec", "cot", "acsc",
                "asec", "acot"
            ]
        );
    }

    #[test]
    fn test_shifts() {
        let catalog = Catalog::standard();
        let shifts: Vec<_> = catalog.iter().map(TargetFunction::shift).collect();
        assert_eq!(
            shifts,
            [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 0.0, 2.0, 2.0, 2.0, 1.0]
        );

        assert_eq!(catalog.get(0).unwrap().to_string(), "exp(x)");
        assert_eq!(catalog.get(12).unwrap().to_string(), "acot(x + 1)");
    }

    #[test]
    fn test_shifted_values() {
        let catalog = Catalog::standard();
        assert_close!(catalog.get(7).unwrap().eval(0.0), 1.0 / 2.0_f64.sin());
        assert_close!(catalog.get(9).unwrap().eval(0.0), 2.0_f64.cos() / 2.0_f64.sin());
        assert_close!(catalog.get(10).unwrap().eval(0.0), 0.5_f64.asin());
        assert_close!(catalog.get(11).unwrap().eval(0.0), 0.5_f64.acos());
        assert_close!(
            catalog.get(12).unwrap().eval(-1.0),
            std::f64::consts::FRAC_PI_2
        );
        assert_close!(
            catalog.get(12).unwrap().eval(0.0),
            std::f64::consts::FRAC_PI_4
        );
    }

    #[test]
    fn test_expr_agrees_with_eval() {
        for f in &Catalog::standard() {
            for x in [-0.9, -0.3, 0.0, 0.4, 0.8] {
                let label = format!("{f} at {x}");
                assert_close!(f.expr().eval(x), f.eval(x), tol = 1e-12, "{}", label);
            }
        }
    }

    #[test]
    fn test_unknown_function() {
        let catalog = Catalog::standard();
        assert!(matches!(catalog.get(13), Err(Error::UnknownFunction(13))));
        assert!(catalog.get(12).is_ok());
    }

    #[test]
    fn test_try_eval_domain() {
        let csc = TargetFunction::new(Func::Csc, 0.0);
        assert!(matches!(csc.try_eval(0.0), Err(Error::Domain { x, .. }) if x == 0.0));
        assert!(csc.try_eval(1.0).is_ok());
    }
}
