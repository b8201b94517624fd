//! Error types for function approximation
//!
//! This module defines the common errors encountered when building, fitting,
//! evaluating or scoring an approximation, along with a convenient `Result` alias.
//!
//! Every error is local to a single `(function, degree)` pair; the pipeline
//! records it and moves on to the next catalog entry.
use crate::metrics::Metric;

/// Errors that can occur while approximating or scoring a function.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Cannot compute anything because there is no data.
    #[error("No data available")]
    NoData,

    /// Two sequences that must be compared element-wise have different lengths.
    #[error("Sequence length mismatch: expected {expected}, found {found}")]
    LengthMismatch {
        /// Length of the reference sequence
        expected: usize,
        /// Length of the other sequence
        found: usize,
    },

    /// The specified basis cannot have the given number of coefficients.
    #[error("Specified basis cannot have exactly {0} coefficients")]
    InvalidNumberOfParameters(usize),

    /// A grid point lands on a singularity of the function being sampled.
    #[error("{function} is not finite at x = {x}")]
    Domain {
        /// Display form of the function
        function: String,
        /// Grid point that produced the non-finite value
        x: f64,
    },

    /// The function cannot be differentiated at the expansion point.
    ///
    /// Usually the shift applied by the catalog still leaves a singularity at the center.
    #[error("Derivative of `{expression}` is undefined at {point}")]
    UndefinedDerivative {
        /// The sub-expression that failed
        expression: String,
        /// Value of that sub-expression's argument at the expansion point
        point: f64,
    },

    /// Repeated symbolic differentiation was asked for a degree above its limit.
    ///
    /// Each derivative multiplies the size of the expression tree, so high degrees need the
    /// series method.
    #[error("Symbolic derivatives are limited to degree {max}, got {degree}; use the series method")]
    SymbolicDegreeLimit {
        /// Requested degree
        degree: usize,
        /// Highest supported degree
        max: usize,
    },

    /// The least-squares system has fewer samples than coefficients.
    #[error("Cannot fit a degree {degree} polynomial to {samples} samples; at least {} are required", .degree + 1)]
    UnderdeterminedFit {
        /// Number of sample points
        samples: usize,
        /// Requested polynomial degree
        degree: usize,
    },

    /// The denominator of a metric is zero, so the metric has no value.
    #[error("{0} is undefined for this data")]
    MetricUndefined(Metric),

    /// The sample grid is degenerate.
    #[error("Invalid sample grid: {0}")]
    InvalidGrid(String),

    /// No catalog entry exists at this index.
    #[error("No target function at catalog index {0}")]
    UnknownFunction(usize),

    /// The input x-values are outside the valid range for this fit.
    ///
    /// Use `as_polynomial` to ignore these bounds if you accept extrapolation.
    #[error(
        "This fit is only valid within the x-value range {0}..{1}. Use call `as_polynomial` to ignore these bounds"
    )]
    DataRange(String, String),

    /// A numeric value could not be cast to the target type.
    #[error("Failed to cast value to target type")]
    CastFailed,

    /// Failed to solve the algebraic system during fitting.
    ///
    /// Contains a static string describing the solver error.
    #[error("Failed to solve: {0}")]
    Algebra(&'static str),

    /// The run configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Reading a configuration or writing a result failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for approximation and scoring
pub type Result<T> = std::result::Result<T, Error>;
