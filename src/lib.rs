//! # Polyapprox
//! ## Taylor against Chebyshev, on thirteen functions
//!
//! This crate approximates a fixed catalog of elementary and trigonometric functions on an
//! interval in two independent ways, and scores both against the real thing:
//! - A **Taylor expansion** about the center of the interval, with exact derivatives
//! - A **least-squares Chebyshev fit** over the whole interval
//!
//! Each approximation is evaluated on a shared grid and compared with the ground truth using
//! RMSE, MAPE and R².
//!
//! ```rust
//! use polyapprox::{catalog::Catalog, grid::SampleGrid, metrics::ErrorReport};
//! use polyapprox::{fitter::ChebyshevFitter, taylor::TaylorExpander};
//!
//! let catalog = Catalog::standard();
//! let tan = catalog.get(3).unwrap();
//!
//! let grid = SampleGrid::new(0.0, 1.0, 1001).unwrap();
//! let truth = grid.evaluate(tan).unwrap();
//!
//! let taylor = TaylorExpander::default().expand(tan, 0.0, 7).unwrap();
//! let chebyshev = ChebyshevFitter::default().fit(tan, -1.0, 1.0, 7).unwrap();
//!
//! let taylor_error = ErrorReport::compute(&truth, &taylor.evaluate(grid.points())).unwrap();
//! let chebyshev_error = ErrorReport::compute(&truth, &chebyshev.evaluate(grid.points())).unwrap();
//! assert!(chebyshev_error.rmse < taylor_error.rmse);
//! ```
//!
//! # Core Concepts
//! - A [`catalog::TargetFunction`] is one of 13 fixed functions, some evaluated at a shifted argument
//!   like `csc(x + 2)` to move their singularity away from the interval.
//! - A [`Polynomial`] is an approximation: coefficients in a [`basis::Basis`].
//!     - [`TaylorPolynomial`]: powers of `(x - a)`, evaluated with Horner's scheme
//!     - [`ChebyshevPolynomial`]: Chebyshev polynomials on `[a, b]` mapped to `[-1, 1]`, evaluated with Clenshaw's algorithm
//!     - [`MonomialPolynomial`]: plain powers of `x`; both other forms convert to it
//! - A [`CurveFit`] is a least-squares fit tied to its samples; [`fitter::ChebyshevFitter`] builds one
//!   and keeps only its polynomial.
//! - An [`metrics::ErrorReport`] holds the three metrics; a metric with a zero denominator is
//!   `None`, never a made-up number.
//! - A [`pipeline::Pipeline`] runs the whole catalog at one degree, isolating failures per function,
//!   and hands the results to a [`sink::ResultSink`].
//!
//! # Implementation Details
//!
//! Derivatives for the Taylor coefficients come from the [`symbolic`] module: an expression tree
//! with exact differentiation rules, and truncated power series propagated through that tree.
//! Least squares uses `nalgebra`'s SVD.
//!
//! # Testing utilities
//!
//! This crate includes a set of assertion macros for approximations. See [`test`].
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)] // The worst clippy lint
#![allow(clippy::cast_precision_loss)] // I don't care about this one
#![allow(clippy::similar_names)] //       Clippy does not get to decide what names are similar
#![cfg_attr(docsrs, feature(doc_cfg))]


pub mod basis;
pub mod catalog;
pub mod config;
pub mod degree;
pub mod display;
pub mod error;
pub mod fitter;
pub mod grid;
pub mod metrics;
pub mod pipeline;
pub mod sink;
pub mod statistics;
pub mod symbolic;
pub mod taylor;
pub mod value;

mod fit;
mod polynomial;

pub use basis::{chebyshev::ChebyshevPolynomial, taylor::TaylorPolynomial};
pub use fit::*;
pub use polynomial::Polynomial;

pub use basis::monomial::MonomialPolynomial;

pub use nalgebra;
