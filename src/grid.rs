//! Evenly spaced sample points, and ground truth on them.
//!
//! The same grid is used to evaluate the target function and each of its approximations, so
//! the error metrics compare values at identical abscissas.
use crate::{
    catalog::TargetFunction,
    error::{Error, Result},
};

/// Number of grid points used when scoring an approximation.
pub const DEFAULT_GRID_POINTS: usize = 1001;

/// `count` evenly spaced points covering `[a, b]`, both ends included.
///
/// Point `i` is `a + i·(b - a)/(count - 1)`, and the last point is exactly `b`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    points: Vec<f64>,
}
impl SampleGrid {
    /// A grid over `[center - radius, center + radius]`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidGrid`] if `count < 2` or `radius` is not positive.
    ///
    /// # Example
    /// ```
    /// # use polyapprox::grid::SampleGrid;
    /// let grid = SampleGrid::new(0.0, 1.0, 5).unwrap();
    /// assert_eq!(grid.points(), &[-1.0, -0.5, 0.0, 0.5, 1.0]);
    /// ```
    pub fn new(center: f64, radius: f64, count: usize) -> Result<Self> {
        if radius.is_nan() || radius <= 0.0 {
            return Err(Error::InvalidGrid(format!(
                "radius must be positive, got {radius}"
            )));
        }

        Self::from_interval(center - radius, center + radius, count)
    }

    /// A grid over `[a, b]`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidGrid`] if `count < 2`, or if `a < b` does not hold for finite ends.
    pub fn from_interval(a: f64, b: f64, count: usize) -> Result<Self> {
        if count < 2 {
            return Err(Error::InvalidGrid(format!(
                "at least 2 points are required, got {count}"
            )));
        }

        if !(a.is_finite() && b.is_finite() && a < b) {
            return Err(Error::InvalidGrid(format!("empty interval [{a}, {b}]")));
        }

        let last = count - 1;
        let step = (b - a) / last as f64;
        let mut points: Vec<f64> = (0..last).map(|i| a + i as f64 * step).collect();
        points.push(b);

        Ok(Self { points })
    }

    /// The abscissas, in increasing order.
    #[must_use]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; a grid has at least 2 points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last point.
    #[must_use]
    pub fn interval(&self) -> (f64, f64) {
        let first = self.points.first().copied().unwrap_or_default();
        let last = self.points.last().copied().unwrap_or_default();
        (first, last)
    }

    /// Ground truth of `function` on this grid.
    ///
    /// # Errors
    /// Returns [`Error::Domain`] at the first point where the function is not finite.
    pub fn evaluate(&self, function: &TargetFunction) -> Result<Vec<f64>> {
        evaluate(function, &self.points)
    }

    /// `(x, f(x))` pairs on this grid, ready for a least-squares fit.
    ///
    /// # Errors
    /// Returns [`Error::Domain`] at the first point where the function is not finite.
    pub fn sample(&self, function: &TargetFunction) -> Result<Vec<(f64, f64)>> {
        self.points
            .iter()
            .map(|&x| function.try_eval(x).map(|y| (x, y)))
            .collect()
    }
}

/// Evaluates `function` at every point.
///
/// # Errors
/// Returns [`Error::Domain`] at the first point where the function is not finite.
pub fn evaluate(function: &TargetFunction, points: &[f64]) -> Result<Vec<f64>> {
    points.iter().map(|&x| function.try_eval(x)).collect()
}
