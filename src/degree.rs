//! Maps a degree selector onto the degree of approximation.
//!
//! The selector is the number a user picks for a run, in `[0, 13]`. It also names the target
//! table the results are written to. Selectors `0..=10` are used as the degree directly, and the
//! last three select the high degrees:
//!
//! | Selector | Degree |
//! |----------|--------|
//! | 0 - 10   | same   |
//! | 11       | 15     |
//! | 12       | 20     |
//! | 13       | 25     |
//!
//! Anything outside `[0, 13]` is replaced by selector 1, degree 1.
//!
//! ```
//! # use polyapprox::degree::{DegreeSelection, DegreeNotice};
//! let selection = DegreeSelection::from_selector(12);
//! assert_eq!(selection.degree, 20);
//! assert_eq!(selection.notice, Some(DegreeNotice::Aliased { selector: 12, degree: 20 }));
//! ```

/// Largest valid selector.
pub const MAX_SELECTOR: i64 = 13;

/// Why the degree differs from the selector the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DegreeNotice {
    /// The selector was outside `[0, 13]` and was replaced by 1.
    OutOfRange {
        /// The selector that was asked for
        requested: i64,
    },

    /// The selector stands for a higher degree.
    Aliased {
        /// The selector
        selector: usize,
        /// The degree it stands for
        degree: usize,
    },
}

impl std::fmt::Display for DegreeNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DegreeNotice::OutOfRange { requested } => write!(
                f,
                "Selector {requested} is outside 0..={MAX_SELECTOR}. Changed to 1."
            ),
            DegreeNotice::Aliased { degree, .. } => write!(f, "Degree changed to {degree}"),
        }
    }
}

/// The outcome of resolving a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DegreeSelection {
    /// The effective selector, in `[0, 13]`. Identifies the result table.
    pub selector: usize,

    /// Degree of the Taylor and Chebyshev approximations.
    pub degree: usize,

    /// Set when `degree` differs from the selector the user asked for.
    pub notice: Option<DegreeNotice>,
}
impl DegreeSelection {
    /// Resolves a user-supplied selector.
    ///
    /// The notice, if any, is also logged as a warning.
    #[must_use]
    pub fn from_selector(selector: i64) -> Self {
        let selection = match usize::try_from(selector) {
            Ok(s) if selector <= MAX_SELECTOR => {
                let degree = match s {
                    11 => 15,
                    12 => 20,
                    13 => 25,
                    _ => s,
                };

                let notice = (degree != s).then_some(DegreeNotice::Aliased {
                    selector: s,
                    degree,
                });

                Self {
                    selector: s,
                    degree,
                    notice,
                }
            }

            _ => Self {
                selector: 1,
                degree: 1,
                notice: Some(DegreeNotice::OutOfRange {
                    requested: selector,
                }),
            },
        };

        if let Some(notice) = &selection.notice {
            log::warn!("{notice}");
        }
        selection
    }

    /// Every valid selection, in selector order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=MAX_SELECTOR).map(Self::from_selector)
    }
}
