//! Functions for scoring an approximation against ground truth
//!
//! Every function takes the observed (ground truth) values `y` first and the
//! approximated values `y_fit` second.
//!
//! # Error Metrics
//! - [`root_mean_squared_error`]: Square root of MSE, giving error in same units as observed values. Lower is better.
//! - [`mean_squared_error`]: Average squared difference between observed and predicted values. Lower is better.
//! - [`mean_absolute_percentage_error`]: Average relative error in percent, skipping points where `y = 0`.
//!
//! # Model Fit
//! - [`r_squared`]: Proportion of variance explained by the approximation. 1 is a perfect match.
//! - [`checked_r_squared`]: Same, but reports an error instead of `NaN` when `y` is constant.
//!
//! # Descriptive Statistics
//! - [`mean`]: Arithmetic mean of a dataset.
//!
//! # Domain mapping
//! - [`DomainNormalizer`]: Affine map between two intervals, used by the Chebyshev basis.
//!
//! # Examples
//!
//! ```rust
//! use polyapprox::statistics::{r_squared, root_mean_squared_error};
//!
//! let y = vec![1.0, 2.0, 3.0];
//! let y_fit = vec![1.1, 1.9, 3.05];
//!
//! let r2 = r_squared(y.iter().copied(), y_fit.iter().copied());
//! let rmse = root_mean_squared_error(y.into_iter(), y_fit.into_iter());
//! println!("R² = {r2}, RMSE = {rmse}");
//! ```
use crate::{
    error::{Error, Result},
    metrics::Metric,
    value::{IntClampedCast, Value},
};

/// Calculate the R-squared value for a set of data.
///
/// R-squared tells you how well the approximation explains the data:
/// - `0` means it explains none of the variation.
/// - `1` means it explains all the variation.
/// - Negative values mean it is worse than predicting the mean.
///
/// Returns `NaN` if every `y` is identical. Use [`checked_r_squared`] to detect that case.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// R² = 1 - (SS_res / SS_tot)
/// where
///   SS_res = Σ (y_i - y_fit_i)²
///   SS_tot = Σ (y_i - y_mean)²
/// ```
/// </div>
///
/// # Example
/// ```rust
/// # use polyapprox::statistics::r_squared;
/// let y = vec![1.0, 2.0, 3.0];
/// let y_fit = vec![1.1, 1.9, 3.05];
/// let r2 = r_squared(y.into_iter(), y_fit.into_iter());
/// ```
pub fn r_squared<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> T {
    let (ss_residual, ss_total) = r_squared_sums(y, y_fit);
    T::one() - (ss_residual / ss_total)
}

/// Calculate the R-squared value, failing if it is undefined.
///
/// # Errors
/// Returns [`Error::MetricUndefined`] if every `y` is identical, or there is no data.
///
/// Constant data is detected by comparing the values themselves. The computed mean of a
/// constant like `0.1` can be off by an ulp, leaving a tiny non-zero `SS_tot`.
///
/// # Example
/// ```rust
/// # use polyapprox::statistics::checked_r_squared;
/// let flat = vec![2.0, 2.0, 2.0];
/// assert!(checked_r_squared(flat.iter().copied(), flat.iter().copied()).is_err());
/// ```
pub fn checked_r_squared<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> Result<T> {
    let y: Vec<T> = y.collect();
    let constant = match y.first() {
        Some(first) => y.iter().all(|v| v == first),
        None => true,
    };
    if constant {
        return Err(Error::MetricUndefined(Metric::RSquared));
    }

    let (ss_residual, ss_total) = r_squared_sums(y.into_iter(), y_fit);

    // Also rejects a NaN total
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    if !(ss_total > T::zero()) {
        return Err(Error::MetricUndefined(Metric::RSquared));
    }

    Ok(T::one() - (ss_residual / ss_total))
}

/// Returns `(SS_res, SS_tot)`
fn r_squared_sums<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> (T, T) {
    let y: Vec<T> = y.collect();
    let y_mean = mean(y.iter().copied());

    let mut ss_total = T::zero();
    let mut ss_residual = T::zero();
    for (y, y_fit) in y.into_iter().zip(y_fit) {
        ss_total += Value::powi(y - y_mean, 2);
        ss_residual += Value::powi(y - y_fit, 2);
    }

    (ss_residual, ss_total)
}

/// Computes the arithmetic mean of a sequence of values.
///
/// Returns `NaN` if the iterator yields no elements.
///
/// # Examples
/// ```rust
/// let values = vec![1.0, 2.0, 3.0];
/// let m = polyapprox::statistics::mean(values.into_iter());
/// assert_eq!(m, 2.0);
/// ```
pub fn mean<T: Value>(data: impl Iterator<Item = T>) -> T {
    let mut sum = T::zero();
    let mut count = T::zero();
    for value in data {
        sum += value;
        count += T::one();
    }
    sum / count
}

/// Computes the root mean squared error (RMSE) between two sets of values.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// RMSE = √( (Σ (y_i - y_fit_i)²) / N )
/// ```
/// </div>
///
/// # Example
/// ```
/// # use polyapprox::statistics::root_mean_squared_error;
/// let y = vec![1.0, 2.0, 3.0];
/// let y_fit = vec![1.1, 1.9, 3.05];
/// let rmse = root_mean_squared_error(y.into_iter(), y_fit.into_iter());
/// ```
pub fn root_mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    let (mse, _) = mse_with_n(y, y_fit);
    mse.sqrt()
}

/// Computes the mean squared error (MSE) between two sets of values.
///
/// Returns `NaN` for empty input.
///
/// # Example
/// ```
/// # use polyapprox::statistics::mean_squared_error;
/// let y = vec![1.0, 2.0, 3.0];
/// let y_fit = vec![1.1, 1.9, 3.05];
/// let mse = mean_squared_error(y.into_iter(), y_fit.into_iter());
/// ```
pub fn mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    let (mse, _) = mse_with_n(y, y_fit);
    mse
}

fn mse_with_n<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> (T, T) {
    let mut total = T::zero();
    let mut n = T::zero();
    for (y, y_fit) in y.zip(y_fit) {
        total += Value::powi(y - y_fit, 2);
        n += T::one();
    }
    (total / n, n)
}

/// Computes the mean absolute percentage error (MAPE) between two sets of values.
///
/// Points where the observed value is exactly zero are skipped entirely: they count
/// toward neither the sum nor the number of points.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// MAPE = 100 · (Σ |(y_fit_i - y_i) / y_i|) / N'
/// where
///   the sum runs over the N' points with y_i ≠ 0
/// ```
/// </div>
///
/// # Errors
/// Returns [`Error::MetricUndefined`] if every observed value is zero.
///
/// # Example
/// ```
/// # use polyapprox::statistics::mean_absolute_percentage_error;
/// let y = vec![0.0, 2.0];
/// let y_fit = vec![1.0, 2.0];
/// let mape = mean_absolute_percentage_error(y.into_iter(), y_fit.into_iter()).unwrap();
/// assert_eq!(mape, 0.0);
/// ```
pub fn mean_absolute_percentage_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> Result<T> {
    let mut total = T::zero();
    let mut n = T::zero();
    for (y, y_fit) in y.zip(y_fit) {
        if y.is_zero() {
            continue;
        }

        total += Value::abs((y_fit - y) / y);
        n += T::one();
    }

    if n.is_zero() {
        return Err(Error::MetricUndefined(Metric::Mape));
    }

    Ok(T::from_positive_int(100) * total / n)
}

/// Affine map from a source interval onto a destination interval.
///
/// Values outside the source interval map outside the destination interval; nothing is clamped,
/// so a Chebyshev series can still be evaluated (extrapolated) beyond its fitting range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainNormalizer<T: Value> {
    src_range: (T, T),
    dst_range: (T, T),
}
impl<T: Value> Default for DomainNormalizer<T> {
    fn default() -> Self {
        let unit = (-T::one(), T::one());
        Self::new(unit, unit)
    }
}
impl<T: Value> DomainNormalizer<T> {
    /// Creates a new `DomainNormalizer` for the given source and destination ranges.
    pub fn new(src_range: (T, T), dst_range: (T, T)) -> Self {
        Self {
            src_range,
            dst_range,
        }
    }

    /// Creates a new `DomainNormalizer` from an inclusive source range and a destination range.
    pub fn from_range(src_range: std::ops::RangeInclusive<T>, dst_range: (T, T)) -> Self {
        let (min, max) = src_range.into_inner();
        Self::new((min, max), dst_range)
    }

    /// Returns the source range of the normalizer.
    pub fn src_range(&self) -> (T, T) {
        self.src_range
    }

    /// Returns the destination range of the normalizer.
    pub fn dst_range(&self) -> (T, T) {
        self.dst_range
    }

    /// Slope of the map, `d(normalized)/dx`.
    pub fn scale(&self) -> T {
        let (src_min, src_max) = self.src_range;
        let (dst_min, dst_max) = self.dst_range;
        (dst_max - dst_min) / (src_max - src_min)
    }

    /// Maps a value from the source range to the destination range.
    pub fn normalize(&self, x: T) -> T {
        let (src_min, src_max) = self.src_range;
        let (dst_min, dst_max) = self.dst_range;
        dst_min + (x - src_min) * (dst_max - dst_min) / (src_max - src_min)
    }

    /// Maps a value from the destination range back to the source range.
    pub fn denormalize(&self, x: T) -> T {
        let (src_min, src_max) = self.src_range;
        let (dst_min, dst_max) = self.dst_range;
        src_min + (x - dst_min) * (src_max - src_min) / (dst_max - dst_min)
    }

    /// Rewrites monomial coefficients in the normalized variable as coefficients in the source variable.
    ///
    /// The coefficients are assumed to be in ascending order (constant term first).
    #[must_use]
    pub fn denormalize_coefs(&self, coefs: &[T]) -> Vec<T> {
        let (x_min, x_max) = self.src_range();
        let (d_min, d_max) = self.dst_range();

        // x' = alpha·x + beta
        let alpha = (d_max - d_min) / (x_max - x_min);
        let beta = d_min - alpha * x_min;

        let mut unnorm = vec![T::zero(); coefs.len()];
        for (i, &c) in coefs.iter().enumerate() {
            for j in 0..=i {
                unnorm[j] += c
                    * T::binomial(i, j)
                    * Value::powi(alpha, j.clamped_cast())
                    * Value::powi(beta, (i - j).clamped_cast());
            }
        }
        unnorm
    }
}
impl<T: Value> std::fmt::Display for DomainNormalizer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (src_min, src_max) = self.src_range;
        let (dst_min, dst_max) = self.dst_range;
        write!(f, "T[ {src_min}..{src_max} -> {dst_min}..{dst_max} ]")
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::assert_close;

    #[test]
    fn r_squared_perfect_fit() {
        let y = vec![1.0, 2.0, 3.0];
        let y_fit = vec![1.0, 2.0, 3.0];
        let r2 = r_squared::<f64>(y.into_iter(), y_fit.into_iter());
        assert_eq!(r2, 1.0);
    }

    #[test]
    fn r_squared_bad_fit() {
        // mean(y) = 2, SST = 2, SSE = 2
        let y = vec![1.0, 2.0, 3.0];
        let y_fit = vec![2.0, 2.0, 2.0];
        let r2 = r_squared::<f64>(y.into_iter(), y_fit.into_iter());
        assert_eq!(r2, 0.0);
    }

    #[test]
    fn r_squared_negative_case() {
        // SST = 2, SSE = 9² + 8² + 7² = 194
        let y = vec![1.0, 2.0, 3.0];
        let y_fit = vec![10.0, 10.0, 10.0];
        let r2 = r_squared::<f64>(y.into_iter(), y_fit.into_iter());
        assert_eq!(r2, -96.0);
    }

    #[test]
    fn r_squared_constant_y() {
        let y = vec![2.0, 2.0, 2.0];
        let r2 = r_squared::<f64>(y.clone().into_iter(), y.clone().into_iter());
        assert!(r2.is_nan());

        let err = checked_r_squared::<f64>(y.clone().into_iter(), y.into_iter()).unwrap_err();
        assert!(matches!(err, Error::MetricUndefined(Metric::RSquared)));
    }

    #[test]
    fn checked_r_squared_inexact_constant() {
        // mean([0.1; 3]) is an ulp away from 0.1, so SS_tot is tiny but not zero
        let y = [0.1; 3];
        let y_fit = [0.2, 0.0, 0.1];
        let err = checked_r_squared(y.iter().copied(), y_fit.iter().copied()).unwrap_err();
        assert!(matches!(err, Error::MetricUndefined(Metric::RSquared)));

        let y = vec![0.7; 1001];
        let err = checked_r_squared(y.iter().copied(), y.iter().map(|v| v + 0.01)).unwrap_err();
        assert!(matches!(err, Error::MetricUndefined(Metric::RSquared)));

        let empty: Vec<f64> = vec![];
        assert!(checked_r_squared(empty.iter().copied(), empty.iter().copied()).is_err());
    }

    #[test]
    fn checked_r_squared_matches_unchecked() {
        let y = vec![1.0, 2.0, 4.0, 8.0];
        let y_fit = vec![1.5, 2.0, 3.5, 8.5];
        let r2 = r_squared(y.iter().copied(), y_fit.iter().copied());
        let checked = checked_r_squared(y.iter().copied(), y_fit.iter().copied()).unwrap();
        assert_eq!(r2, checked);
    }

    #[test]
    fn rmse_zero_error() {
        let y = vec![-3.0, 0.0, 1.5, 7.0];
        let rmse = root_mean_squared_error::<f64>(y.clone().into_iter(), y.into_iter());
        assert_eq!(rmse, 0.0);
    }

    #[test]
    fn rmse_simple_case() {
        // diffs = [3, 4], mean sq = 12.5
        let y = vec![0.0, 0.0];
        let y_fit = vec![3.0, 4.0];
        let rmse = root_mean_squared_error::<f64>(y.into_iter(), y_fit.into_iter());
        assert_close!(rmse, 12.5_f64.sqrt());
    }

    #[test]
    fn mse_with_negatives() {
        // diffs = [-2, -4], squared = [4, 16], mean = 10
        let y = vec![-1.0, -2.0];
        let y_fit = vec![1.0, 2.0];
        let mse = mean_squared_error::<f64>(y.into_iter(), y_fit.into_iter());
        assert_eq!(mse, 10.0);
    }

    #[test]
    fn mse_empty_input_returns_nan() {
        let y: Vec<f64> = vec![];
        let y_fit: Vec<f64> = vec![];
        let mse = mean_squared_error::<f64>(y.into_iter(), y_fit.into_iter());
        assert!(mse.is_nan());
    }

    #[test]
    fn mape_skips_zero_truth() {
        let y = vec![0.0, 2.0];
        let y_fit = vec![1.0, 2.0];
        let mape = mean_absolute_percentage_error::<f64>(y.into_iter(), y_fit.into_iter()).unwrap();
        assert_eq!(mape, 0.0);

        // Only index 1 and 2 count: (|1/2| + |1/4|) / 2 * 100 = 37.5
        let y = vec![0.0, 2.0, 4.0];
        let y_fit = vec![100.0, 3.0, 3.0];
        let mape = mean_absolute_percentage_error::<f64>(y.into_iter(), y_fit.into_iter()).unwrap();
        assert_close!(mape, 37.5);
    }

    #[test]
    fn mape_all_zero_is_undefined() {
        let y = vec![0.0, 0.0];
        let y_fit = vec![1.0, 0.0];
        let err = mean_absolute_percentage_error::<f64>(y.into_iter(), y_fit.into_iter()).unwrap_err();
        assert!(matches!(err, Error::MetricUndefined(Metric::Mape)));
    }

    #[test]
    fn normalizer_round_trip_without_clamping() {
        let n = DomainNormalizer::new((0.0, 10.0), (-1.0, 1.0));
        assert_eq!(n.normalize(0.0), -1.0);
        assert_eq!(n.normalize(10.0), 1.0);
        assert_eq!(n.normalize(5.0), 0.0);

        // Outside the source range
        assert_eq!(n.normalize(15.0), 2.0);
        assert_eq!(n.denormalize(2.0), 15.0);
    }

    #[test]
    fn normalizer_denormalize_coefs() {
        // p(x') = x'^2 with x' = (x - 5) / 5
        let n = DomainNormalizer::new((0.0, 10.0), (-1.0, 1.0));
        let coefs = n.denormalize_coefs(&[0.0, 0.0, 1.0]);
        for x in [0.0, 2.5, 7.0, 10.0] {
            let expected = ((x - 5.0) / 5.0_f64).powi(2);
            let actual = coefs[0] + coefs[1] * x + coefs[2] * x * x;
            assert_close!(actual, expected, tol = 1e-12);
        }
    }
}
