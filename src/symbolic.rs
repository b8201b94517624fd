//! Symbolic expressions in one variable, and their power series.
//!
//! [`Expr`] is a small expression tree over a single variable `x`, with the elementary functions
//! listed in [`Func`]. It supports:
//! - Numeric evaluation, see [`Expr::eval`]
//! - Symbolic differentiation, see [`Expr::derivative`] and [`Expr::nth_derivative`]
//! - Substitution of `x`, see [`Expr::compose`]
//! - Truncated Taylor series through [`Series`], see [`Expr::taylor_series`]
//!
//! ```
//! # use polyapprox::symbolic::{Expr, Func};
//! let f = Expr::call(Func::Sin, Expr::x()) * Expr::x();
//! assert_eq!(f.derivative().to_string(), "cos(x)·x + sin(x)");
//!
//! let series = f.taylor_series(0.0, 4).unwrap();
//! assert_eq!(series.coefficients()[2], 1.0);
//! ```
mod expr;
mod series;

pub use expr::{Expr, Func};
pub use series::Series;
