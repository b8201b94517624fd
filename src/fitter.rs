//! Least-squares Chebyshev approximations of catalog functions.
use crate::{
    catalog::TargetFunction,
    error::{Error, Result},
    grid::SampleGrid,
    ChebyshevFit, ChebyshevPolynomial,
};

/// Number of evenly spaced samples the least-squares system is built from.
pub const DEFAULT_FIT_SAMPLES: usize = 100;

/// Fits Chebyshev series to target functions over an interval.
///
/// The function is sampled at `samples` evenly spaced points over `[a, b]`, the points are
/// mapped onto `[-1, 1]`, and the first `N + 1` Chebyshev polynomials are fitted in the
/// least-squares sense.
///
/// ```
/// # use polyapprox::{catalog::Catalog, fitter::ChebyshevFitter};
/// let exp = Catalog::standard().get(0).unwrap().clone();
/// let p = ChebyshevFitter::default().fit(&exp, -1.0, 1.0, 3).unwrap();
/// assert!((p.y(0.5) - 0.5_f64.exp()).abs() < 1e-2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChebyshevFitter {
    samples: usize,
}
impl Default for ChebyshevFitter {
    fn default() -> Self {
        Self::new(DEFAULT_FIT_SAMPLES)
    }
}
impl ChebyshevFitter {
    /// Creates a fitter using `samples` points per fit.
    #[must_use]
    pub fn new(samples: usize) -> Self {
        Self { samples }
    }

    /// Number of samples per fit.
    #[must_use]
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Degree `degree` least-squares Chebyshev approximation of `function` over `[a, b]`.
    ///
    /// # Errors
    /// - [`Error::UnderdeterminedFit`] if there are fewer samples than `degree + 1`.
    /// - [`Error::InvalidGrid`] if `[a, b]` is empty.
    /// - [`Error::Domain`] if the function is not finite at a sample point.
    /// - [`Error::Algebra`] if the least-squares system cannot be solved.
    pub fn fit(
        &self,
        function: &TargetFunction,
        a: f64,
        b: f64,
        degree: usize,
    ) -> Result<ChebyshevPolynomial<'static>> {
        if self.samples < degree + 1 {
            return Err(Error::UnderdeterminedFit {
                samples: self.samples,
                degree,
            });
        }

        let grid = SampleGrid::from_interval(a, b, self.samples)?;
        let data = grid.sample(function)?;
        let fit = ChebyshevFit::new(data, degree)?;

        log::debug!(
            "Fitted {function} on [{a}, {b}] to degree {degree}, sample RMSE {:e}",
            fit.root_mean_squared_error()
        );
        Ok(fit.into_polynomial())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        assert_close, assert_tracks,
        catalog::Catalog,
        grid::{SampleGrid, DEFAULT_GRID_POINTS},
        metrics::ErrorReport,
        symbolic::Func,
    };

    use super::*;

    #[test]
    fn test_exp_degree_3() {
        let exp = TargetFunction::new(Func::Exp, 0.0);
        let p = ChebyshevFitter::default().fit(&exp, -1.0, 1.0, 3).unwrap();
        assert_eq!(p.coefficients().len(), 4);

        // Uniform least squares puts its largest error at the ends of the interval, about 1.05e-2
        assert_close!(p.y(1.0), std::f64::consts::E, tol = 1.1e-2);

        let grid = SampleGrid::new(0.0, 0.9, 101).unwrap();
        assert_tracks!(&p, |x: f64| x.exp(), grid.points(), 1e-2);
    }

    #[test]
    fn test_rmse_non_increasing_in_degree() {
        let catalog = Catalog::standard();
        let grid = SampleGrid::new(0.0, 1.0, DEFAULT_GRID_POINTS).unwrap();
        let fitter = ChebyshevFitter::default();

        for index in [0, 1, 2, 6] {
            let f = catalog.get(index).unwrap();
            let truth = grid.evaluate(f).unwrap();

            let mut previous = f64::INFINITY;
            for degree in 1..=10 {
                let p = fitter.fit(f, -1.0, 1.0, degree).unwrap();
                let rmse = ErrorReport::compute(&truth, &p.evaluate(grid.points()))
                    .unwrap()
                    .rmse;
                assert!(
                    rmse <= previous * (1.0 + 1e-6) + 1e-13,
                    "{f}: degree {degree} RMSE {rmse:e} > {previous:e}"
                );
                previous = rmse;
            }
        }
    }

    #[test]
    fn test_underdetermined() {
        let sin = TargetFunction::new(Func::Sin, 0.0);
        let result = ChebyshevFitter::new(5).fit(&sin, -1.0, 1.0, 5);
        assert!(matches!(
            result,
            Err(Error::UnderdeterminedFit {
                samples: 5,
                degree: 5
            })
        ));

        // Exactly enough samples interpolates
        let p = ChebyshevFitter::new(6).fit(&sin, -1.0, 1.0, 5).unwrap();
        assert_close!(p.y(1.0), 1.0_f64.sin(), tol = 1e-9);
    }

    #[test]
    fn test_fit_errors() {
        let csc = TargetFunction::new(Func::Csc, 0.0);
        let result = ChebyshevFitter::new(11).fit(&csc, 0.0, 1.0, 3);
        assert!(matches!(result, Err(Error::Domain { .. })));

        let sin = TargetFunction::new(Func::Sin, 0.0);
        let result = ChebyshevFitter::default().fit(&sin, 1.0, -1.0, 3);
        assert!(matches!(result, Err(Error::InvalidGrid(_))));
    }

    #[test]
    fn test_extrapolates_outside_interval() {
        let exp = TargetFunction::new(Func::Exp, 0.0);
        let p = ChebyshevFitter::default().fit(&exp, 0.0, 1.0, 6).unwrap();
        assert_eq!(p.basis().normalizer().src_range(), (0.0, 1.0));

        let y = p.y(1.2);
        assert!(y.is_finite());
        assert_close!(y, 1.2_f64.exp(), tol = 1e-3);
    }
}
