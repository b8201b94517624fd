//! Error reports scoring an approximation against ground truth.
//!
//! An [`ErrorReport`] bundles the three metrics used to compare approximation methods:
//! - RMSE, see [`crate::statistics::root_mean_squared_error`]
//! - MAPE, see [`crate::statistics::mean_absolute_percentage_error`]
//! - R², see [`crate::statistics::checked_r_squared`]
//!
//! MAPE and R² can be undefined for some data. They are stored as `None` and rendered as
//! `undefined`; they never silently become 0.
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    statistics,
    value::Value,
};

/// Names one of the error metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Root mean squared error
    Rmse,

    /// Mean absolute percentage error
    Mape,

    /// Coefficient of determination
    RSquared,
}
impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Rmse => write!(f, "RMSE"),
            Metric::Mape => write!(f, "MAPE"),
            Metric::RSquared => write!(f, "R²"),
        }
    }
}

/// RMSE, MAPE and R² of one approximation against ground truth.
///
/// # Example
/// ```
/// # use polyapprox::metrics::ErrorReport;
/// let y_true = [0.0, 1.0, 2.0, 3.0];
/// let y_pred = [0.0, 1.0, 2.0, 3.0];
///
/// let report = ErrorReport::compute(&y_true, &y_pred).unwrap();
/// assert_eq!(report.rmse, 0.0);
/// assert_eq!(report.mape, Some(0.0));
/// assert_eq!(report.r_squared, Some(1.0));
/// assert_eq!(report.to_string(), "RMSE = 0.0000, MAPE = 0.0000, R² = 1.0000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport<T: Value = f64> {
    /// Root mean squared error, always defined
    pub rmse: T,

    /// Mean absolute percentage error over non-zero truth values; `None` if every truth value is zero
    pub mape: Option<T>,

    /// Coefficient of determination; `None` if the truth values are constant
    pub r_squared: Option<T>,
}

impl<T: Value> ErrorReport<T> {
    /// Scores `y_pred` against `y_true`.
    ///
    /// # Errors
    /// - [`Error::NoData`] if the sequences are empty.
    /// - [`Error::LengthMismatch`] if the sequences have different lengths.
    ///
    /// An undefined MAPE or R² is not an error; it is recorded as `None`.
    pub fn compute(y_true: &[T], y_pred: &[T]) -> Result<Self> {
        if y_true.is_empty() {
            return Err(Error::NoData);
        }

        if y_true.len() != y_pred.len() {
            return Err(Error::LengthMismatch {
                expected: y_true.len(),
                found: y_pred.len(),
            });
        }

        let y = || y_true.iter().copied();
        let y_fit = || y_pred.iter().copied();

        let rmse = statistics::root_mean_squared_error(y(), y_fit());
        let mape = defined(statistics::mean_absolute_percentage_error(y(), y_fit()))?;
        let r_squared = defined(statistics::checked_r_squared(y(), y_fit()))?;

        Ok(Self {
            rmse,
            mape,
            r_squared,
        })
    }

    /// Returns the value of one metric, or `None` if it is undefined.
    pub fn get(&self, metric: Metric) -> Option<T> {
        match metric {
            Metric::Rmse => Some(self.rmse),
            Metric::Mape => self.mape,
            Metric::RSquared => self.r_squared,
        }
    }

    /// Returns the value of one metric.
    ///
    /// # Errors
    /// Returns [`Error::MetricUndefined`] if the metric has no value for this data.
    pub fn require(&self, metric: Metric) -> Result<T> {
        self.get(metric).ok_or(Error::MetricUndefined(metric))
    }
}

/// Turns a metric's `MetricUndefined` into `None`, passing every other error through.
fn defined<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(Error::MetricUndefined(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Formats a metric with 4 decimals, or `undefined`.
#[must_use]
pub fn format_metric<T: Value>(value: Option<T>) -> String {
    match value {
        Some(v) => format!("{v:.4}"),
        None => "undefined".to_string(),
    }
}

impl<T: Value> std::fmt::Display for ErrorReport<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} = {}, {} = {}, {} = {}",
            Metric::Rmse,
            format_metric(Some(self.rmse)),
            Metric::Mape,
            format_metric(self.mape),
            Metric::RSquared,
            format_metric(self.r_squared),
        )
    }
}
