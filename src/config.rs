//! Run configuration.
//!
//! Every field has a default, so a configuration file only needs the values it changes:
//! ```
//! # use polyapprox::{config::RunConfig, taylor::DerivativeMethod};
//! let config = RunConfig::from_json_str(r#"{ "radius": 0.5, "derivative_method": "symbolic" }"#).unwrap();
//! assert_eq!(config.radius, 0.5);
//! assert_eq!(config.grid_points, 1001);
//! assert_eq!(config.derivative_method, DerivativeMethod::Symbolic);
//! ```
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    fitter::{ChebyshevFitter, DEFAULT_FIT_SAMPLES},
    grid::{SampleGrid, DEFAULT_GRID_POINTS},
    taylor::{DerivativeMethod, TaylorExpander},
};

/// Parameters shared by every function in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Center of the interval, and the Taylor expansion point.
    pub center: f64,

    /// Half-width of the interval.
    pub radius: f64,

    /// Number of points the approximations are scored on.
    pub grid_points: usize,

    /// Number of samples each Chebyshev fit is built from.
    pub fit_samples: usize,

    /// How Taylor coefficients are computed.
    pub derivative_method: DerivativeMethod,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            center: 0.0,
            radius: 1.0,
            grid_points: DEFAULT_GRID_POINTS,
            fit_samples: DEFAULT_FIT_SAMPLES,
            derivative_method: DerivativeMethod::default(),
        }
    }
}

impl RunConfig {
    /// Parses and validates a configuration from JSON.
    ///
    /// # Errors
    /// Returns [`Error::Json`] if the document does not parse, or [`Error::Config`] if it is invalid.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be read, otherwise as [`RunConfig::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serializes the configuration as pretty JSON.
    ///
    /// # Errors
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that the configuration describes a usable run.
    ///
    /// # Errors
    /// Returns [`Error::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if !self.center.is_finite() {
            return Err(Error::Config(format!(
                "center must be finite, got {}",
                self.center
            )));
        }

        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(Error::Config(format!(
                "radius must be positive, got {}",
                self.radius
            )));
        }

        if self.grid_points < 2 {
            return Err(Error::Config(format!(
                "grid_points must be at least 2, got {}",
                self.grid_points
            )));
        }

        if self.fit_samples < 2 {
            return Err(Error::Config(format!(
                "fit_samples must be at least 2, got {}",
                self.fit_samples
            )));
        }

        Ok(())
    }

    /// The interval `[center - radius, center + radius]`.
    #[must_use]
    pub fn interval(&self) -> (f64, f64) {
        (self.center - self.radius, self.center + self.radius)
    }

    /// The scoring grid.
    ///
    /// # Errors
    /// Returns [`Error::InvalidGrid`] if the radius or point count is invalid.
    pub fn grid(&self) -> Result<SampleGrid> {
        SampleGrid::new(self.center, self.radius, self.grid_points)
    }

    /// A Taylor expander using the configured derivative method.
    #[must_use]
    pub fn expander(&self) -> TaylorExpander {
        TaylorExpander::new(self.derivative_method)
    }

    /// A Chebyshev fitter using the configured sample count.
    #[must_use]
    pub fn fitter(&self) -> ChebyshevFitter {
        ChebyshevFitter::new(self.fit_samples)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.interval(), (-1.0, 1.0));
        assert_eq!(config.grid().unwrap().len(), 1001);
        assert_eq!(config.fitter().samples(), 100);
        assert_eq!(config.expander().method(), DerivativeMethod::Series);
        assert!(config.validate().is_ok());

        let empty = RunConfig::from_json_str("{}").unwrap();
        assert_eq!(empty, config);
    }

    #[test]
    fn test_round_trip() {
        let config = RunConfig {
            center: 0.5,
            radius: 0.25,
            grid_points: 11,
            fit_samples: 40,
            derivative_method: DerivativeMethod::Symbolic,
        };
        let json = config.to_json().unwrap();
        assert_eq!(RunConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid() {
        for json in [
            r#"{ "radius": 0.0 }"#,
            r#"{ "radius": -2.0 }"#,
            r#"{ "grid_points": 1 }"#,
            r#"{ "fit_samples": 0 }"#,
        ] {
            assert!(
                matches!(RunConfig::from_json_str(json), Err(Error::Config(_))),
                "{json}"
            );
        }

        assert!(matches!(
            RunConfig::from_json_str(r#"{ "radious": 1.0 }"#),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            RunConfig::from_json_str(r#"{ "derivative_method": "finite" }"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = RunConfig::from_json_file("does/not/exist.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
