//! Runs every catalog function through both approximations and scores them.
//!
//! For each function the pipeline:
//! 1. evaluates the ground truth on the scoring grid,
//! 2. expands a Taylor polynomial about the center of the interval,
//! 3. fits a Chebyshev series over the interval,
//! 4. evaluates both on the grid and computes an [`ErrorReport`] for each.
//!
//! A failure for one function is logged and recorded as [`FunctionOutcome::Failed`], and the
//! batch carries on with the next function.
//!
//! ```
//! # use polyapprox::{config::RunConfig, degree::DegreeSelection, pipeline::Pipeline};
//! let pipeline = Pipeline::new(RunConfig::default()).unwrap();
//! let batch = pipeline.run(DegreeSelection::from_selector(3));
//! assert_eq!(batch.outcomes.len(), 13);
//! assert_eq!(batch.failures().count(), 0);
//! ```
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Catalog, TargetFunction},
    config::RunConfig,
    degree::DegreeSelection,
    error::Result,
    fitter::ChebyshevFitter,
    grid::SampleGrid,
    metrics::ErrorReport,
    sink::ResultSink,
    taylor::TaylorExpander,
};

/// Everything computed for one function at one degree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionReport {
    /// Position in the catalog.
    pub index: usize,

    /// Function name, without the shift.
    pub name: String,

    /// The function as evaluated, shift included (`csc(x + 2)`).
    pub expression: String,

    /// Degree of both approximations.
    pub degree: usize,

    /// Grid abscissas.
    pub x: Vec<f64>,

    /// Ground truth on the grid.
    pub y_true: Vec<f64>,

    /// Taylor polynomial on the grid.
    pub y_taylor: Vec<f64>,

    /// Chebyshev series on the grid.
    pub y_chebyshev: Vec<f64>,

    /// Coefficients of `(x - a)ⁿ`.
    pub taylor_coefficients: Vec<f64>,

    /// Coefficients of `Tₙ` on the normalized interval.
    pub chebyshev_coefficients: Vec<f64>,

    /// The Taylor polynomial, written out (`y(x) = x³ + ...`).
    pub taylor_equation: String,

    /// The Chebyshev series, written out with its scaling of `x`.
    pub chebyshev_equation: String,

    /// Taylor polynomial against the ground truth.
    pub taylor_error: ErrorReport,

    /// Chebyshev series against the ground truth.
    pub chebyshev_error: ErrorReport,
}

/// A function that could not be approximated or scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionFailure {
    /// Position in the catalog.
    pub index: usize,

    /// Function name.
    pub name: String,

    /// Rendered error.
    pub error: String,
}

/// The result for one catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FunctionOutcome {
    /// Both approximations were built and scored.
    Completed(FunctionReport),

    /// Something failed for this function.
    Failed(FunctionFailure),
}

impl FunctionOutcome {
    /// Catalog index of the function.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            FunctionOutcome::Completed(report) => report.index,
            FunctionOutcome::Failed(failure) => failure.index,
        }
    }

    /// The report, if the function completed.
    #[must_use]
    pub fn report(&self) -> Option<&FunctionReport> {
        match self {
            FunctionOutcome::Completed(report) => Some(report),
            FunctionOutcome::Failed(_) => None,
        }
    }
}

/// All outcomes of one batch, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Selector and degree of the batch.
    pub selection: DegreeSelection,

    /// One outcome per catalog function.
    pub outcomes: Vec<FunctionOutcome>,
}

impl BatchReport {
    /// Reports of the functions that completed.
    pub fn completed(&self) -> impl Iterator<Item = &FunctionReport> {
        self.outcomes.iter().filter_map(FunctionOutcome::report)
    }

    /// The functions that failed.
    pub fn failures(&self) -> impl Iterator<Item = &FunctionFailure> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            FunctionOutcome::Failed(failure) => Some(failure),
            FunctionOutcome::Completed(_) => None,
        })
    }
}

/// Approximates and scores catalog functions with a fixed configuration.
#[derive(Debug, Clone)]
pub struct Pipeline {
    catalog: Catalog,
    config: RunConfig,
    grid: SampleGrid,
    expander: TaylorExpander,
    fitter: ChebyshevFitter,
}
impl Pipeline {
    /// A pipeline over the standard catalog.
    ///
    /// # Errors
    /// Returns [`crate::error::Error::Config`] if the configuration is invalid.
    pub fn new(config: RunConfig) -> Result<Self> {
        Self::with_catalog(Catalog::standard(), config)
    }

    /// A pipeline over a custom catalog.
    ///
    /// # Errors
    /// Returns [`crate::error::Error::Config`] if the configuration is invalid.
    pub fn with_catalog(catalog: Catalog, config: RunConfig) -> Result<Self> {
        config.validate()?;
        let grid = config.grid()?;

        Ok(Self {
            catalog,
            config,
            grid,
            expander: config.expander(),
            fitter: config.fitter(),
        })
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// The catalog in use.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The scoring grid.
    #[must_use]
    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    /// Approximates and scores the function at catalog `index`.
    ///
    /// # Errors
    /// Returns the first error from the catalog lookup, ground truth, either approximation,
    /// or the metrics.
    pub fn run_function(&self, index: usize, degree: usize) -> Result<FunctionReport> {
        let function = self.catalog.get(index)?;
        self.approximate(index, function, degree)
    }

    fn approximate(
        &self,
        index: usize,
        function: &TargetFunction,
        degree: usize,
    ) -> Result<FunctionReport> {
        let (a, b) = self.config.interval();
        let x = self.grid.points();
        let y_true = self.grid.evaluate(function)?;

        let taylor = self.expander.expand(function, self.config.center, degree)?;
        let chebyshev = self.fitter.fit(function, a, b, degree)?;

        let y_taylor = taylor.evaluate(x);
        let y_chebyshev = chebyshev.evaluate(x);

        let taylor_error = ErrorReport::compute(&y_true, &y_taylor)?;
        let chebyshev_error = ErrorReport::compute(&y_true, &y_chebyshev)?;
        log::debug!("{function} degree {degree}: taylor {taylor_error}; chebyshev {chebyshev_error}");

        Ok(FunctionReport {
            index,
            name: function.name().to_string(),
            expression: function.to_string(),
            degree,
            x: x.to_vec(),
            y_true,
            y_taylor,
            y_chebyshev,
            taylor_coefficients: taylor.coefficients().to_vec(),
            chebyshev_coefficients: chebyshev.coefficients().to_vec(),
            taylor_equation: taylor.equation(),
            chebyshev_equation: chebyshev.equation(),
            taylor_error,
            chebyshev_error,
        })
    }

    fn outcome(&self, index: usize, function: &TargetFunction, degree: usize) -> FunctionOutcome {
        match self.approximate(index, function, degree) {
            Ok(report) => FunctionOutcome::Completed(report),
            Err(e) => {
                log::warn!("Skipping {function} at degree {degree}: {e}");
                FunctionOutcome::Failed(FunctionFailure {
                    index,
                    name: function.name().to_string(),
                    error: e.to_string(),
                })
            }
        }
    }

    /// Runs every catalog function at the selected degree.
    ///
    /// Failures are recorded per function and never abort the batch.
    #[must_use]
    pub fn run(&self, selection: DegreeSelection) -> BatchReport {
        let degree = selection.degree;
        let functions = self.catalog.as_slice();

        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<_> = functions
            .iter()
            .enumerate()
            .map(|(index, function)| self.outcome(index, function, degree))
            .collect();

        #[cfg(feature = "parallel")]
        let outcomes: Vec<_> = {
            use rayon::prelude::*;
            functions
                .par_iter()
                .enumerate()
                .map(|(index, function)| self.outcome(index, function, degree))
                .collect()
        };

        let batch = BatchReport {
            selection,
            outcomes,
        };
        log::info!(
            "Selector {} (degree {degree}): {} completed, {} failed",
            selection.selector,
            batch.completed().count(),
            batch.failures().count()
        );
        batch
    }

    /// Runs the batch and writes every outcome to `sink`, then finishes the sink.
    ///
    /// # Errors
    /// Returns an error only if the sink fails; function failures are written to the sink.
    pub fn run_into(
        &self,
        selection: DegreeSelection,
        sink: &mut impl ResultSink,
    ) -> Result<BatchReport> {
        let batch = self.run(selection);
        for outcome in &batch.outcomes {
            match outcome {
                FunctionOutcome::Completed(report) => sink.write_report(&selection, report)?,
                FunctionOutcome::Failed(failure) => sink.write_failure(&selection, failure)?,
            }
        }

        sink.finish()?;
        Ok(batch)
    }
}
