use nalgebra::MatrixViewMut;

use crate::{
    basis::{Basis, DifferentialBasis, IntoMonomialBasis},
    display::{self, Sign, DEFAULT_PRECISION},
    error::Result,
    statistics::DomainNormalizer,
    value::Value,
};

/// Normalized Chebyshev basis of the first kind.
///
/// The polynomials `Tₙ` are orthogonal on [-1, 1], and a least-squares fit in this basis is
/// close to the minimax polynomial of the same degree, without the instability of fitting
/// raw powers of `x`.
///
/// Inputs are mapped from the fitting interval [`x_min`, `x_max`] onto [-1, 1] before
/// evaluating `Tₙ`. Points outside the interval map outside [-1, 1] and the series is
/// extrapolated; nothing is clamped.
///
/// Evaluation uses Clenshaw's algorithm.
#[derive(Debug, Clone)]
pub struct ChebyshevBasis<T: Value = f64> {
    normalizer: DomainNormalizer<T>,
}
impl<T: Value> ChebyshevBasis<T> {
    /// Creates a new Chebyshev basis that normalizes inputs from the given range to [-1, 1].
    pub fn new(x_min: T, x_max: T) -> Self {
        let normalizer = DomainNormalizer::new((x_min, x_max), (-T::one(), T::one()));
        Self { normalizer }
    }

    /// Creates a Chebyshev basis from an existing domain normalizer.
    pub fn from_normalizer(normalizer: DomainNormalizer<T>) -> Self {
        Self { normalizer }
    }

    /// The map from the fitting interval onto [-1, 1].
    pub fn normalizer(&self) -> &DomainNormalizer<T> {
        &self.normalizer
    }

    /// Creates a new Chebyshev polynomial with the given coefficients over the specified x-range.
    ///
    /// # Errors
    /// Returns an error if `coefficients` is empty.
    ///
    /// # Example
    /// ```rust
    /// use polyapprox::basis::ChebyshevBasis;
    /// // T₂(x) = 2x² - 1
    /// let poly = ChebyshevBasis::new_polynomial((-1.0, 1.0), &[0.0, 0.0, 1.0]).unwrap();
    /// assert_eq!(poly.y(0.5), -0.5);
    /// ```
    pub fn new_polynomial(
        x_range: (T, T),
        coefficients: &[T],
    ) -> Result<crate::Polynomial<'_, Self, T>> {
        let basis = Self::new(x_range.0, x_range.1);
        crate::Polynomial::<Self, T>::from_basis(basis, coefficients)
    }
}
impl<T: Value> Basis<T> for ChebyshevBasis<T> {
    fn from_range(x_range: std::ops::RangeInclusive<T>) -> Self {
        let normalizer = DomainNormalizer::from_range(x_range, (-T::one(), T::one()));
        Self { normalizer }
    }

    #[inline(always)]
    fn fill_matrix_row<R: nalgebra::Dim, C: nalgebra::Dim, RS: nalgebra::Dim, CS: nalgebra::Dim>(
        &self,
        start_index: usize,
        x: T,
        mut row: MatrixViewMut<'_, T, R, C, RS, CS>,
    ) {
        // The recurrence needs the two previous columns even when they are not written
        let (mut t0, mut t1) = (T::one(), x);
        for j in 0..row.ncols() {
            let t = match j {
                0 => T::one(),
                1 => x,
                _ => {
                    let t = T::two() * x * t1 - t0;
                    t0 = t1;
                    t1 = t;
                    t
                }
            };

            if j >= start_index {
                row[j] = t;
            }
        }
    }

    #[inline(always)]
    fn normalize_x(&self, x: T) -> T {
        self.normalizer.normalize(x)
    }

    #[inline(always)]
    fn denormalize_x(&self, x: T) -> T {
        self.normalizer.denormalize(x)
    }

    #[inline(always)]
    fn solve_function(&self, j: usize, x: T) -> T {
        match j {
            0 => T::one(), // T0(x) = 1
            1 => x,        // T1(x) = x
            _ => {
                // Tn(x) = 2x*T_{n-1}(x) - T_{n-2}(x)
                let mut t0 = T::one();
                let mut t1 = x;
                let mut t = T::zero();

                for _ in 2..=j {
                    t = T::two() * x * t1 - t0;
                    t0 = t1;
                    t1 = t;
                }

                t
            }
        }
    }

    /// Clenshaw's algorithm: `bₖ = cₖ + 2x·bₖ₊₁ - bₖ₊₂`, then `y = c₀ + x·b₁ - b₂`.
    fn evaluate(&self, x: T, coefficients: &[T]) -> T {
        let Some((&c0, rest)) = coefficients.split_first() else {
            return T::zero();
        };

        let x = self.normalize_x(x);
        let mut b1 = T::zero();
        let mut b2 = T::zero();
        for &c in rest.iter().rev() {
            let b = c + T::two() * x * b1 - b2;
            b2 = b1;
            b1 = b;
        }

        c0 + x * b1 - b2
    }
}

impl<T: Value> IntoMonomialBasis<T> for ChebyshevBasis<T> {
    fn as_monomial(&self, coefficients: &mut [T]) -> Result<()> {
        let n = coefficients.len() - 1;

        //
        // Phase 1 - Chebyshev -> Monomial in x'
        //

        let mut monomial_prime = vec![T::zero(); n + 1];
        let mut tkm1 = vec![T::one()]; //T0 = 1
        let mut tk = vec![T::zero(), T::one()]; // T1 = x

        monomial_prime[0] = coefficients[0];
        if n >= 1 {
            monomial_prime[1] = coefficients[1];
        }

        for (k, &c) in coefficients.iter().enumerate().skip(2) {
            // Tk = 2x*T(k-1) - T(k-2)
            let mut tk1 = vec![T::zero(); k + 1];

            for (i, &coef) in tk.iter().enumerate() {
                tk1[i + 1] += coef * T::two();
            }

            for (i, &coef) in tkm1.iter().enumerate() {
                tk1[i] -= coef;
            }

            for (i, &coef) in tk1.iter().enumerate() {
                monomial_prime[i] += c * coef;
            }

            tkm1 = tk;
            tk = tk1;
        }

        //
        // Phase 2 - Un-normalize over x
        let monomial = self.normalizer.denormalize_coefs(&monomial_prime);

        coefficients.copy_from_slice(&monomial);
        Ok(())
    }
}

impl<T: Value> DifferentialBasis<T> for ChebyshevBasis<T> {
    type B2 = Self;

    /// Differentiates in place, with `c'ₖ₋₁ = c'ₖ₊₁ + 2k·cₖ` and `c'₀` halved,
    /// then applies the chain rule through the domain map.
    fn derivative(&self, coefficients: &[T]) -> Result<(Self, Vec<T>)> {
        let n = coefficients.len();
        if n <= 1 {
            return Ok((self.clone(), vec![T::zero()]));
        }

        let mut d = vec![T::zero(); n + 1];
        for k in (1..n).rev() {
            d[k - 1] = d[k + 1] + T::two() * T::from_positive_int(k) * coefficients[k];
        }
        d[0] /= T::two();
        d.truncate(n - 1);

        let scale = self.normalizer.scale();
        for c in &mut d {
            *c *= scale;
        }

        Ok((self.clone(), d))
    }
}

impl<T: Value> display::PolynomialDisplay<T> for ChebyshevBasis<T> {
    fn format_term(&self, degree: i32, coef: T) -> Option<display::Term> {
        let sign = Sign::from_coef(coef);

        let x = format!("x{}", display::unicode::subscript("s"));
        let rank = display::unicode::subscript(&degree.to_string());
        let func = if degree > 0 {
            format!("T{rank}({x})")
        } else {
            String::new()
        };
        let coef = display::format_coefficient(coef, degree, DEFAULT_PRECISION)?;

        let glue = if coef.is_empty() || func.is_empty() {
            ""
        } else {
            "·"
        };

        let body = format!("{coef}{glue}{func}");
        Some(display::Term::new(sign, body))
    }

    fn format_scaling_formula(&self) -> Option<String> {
        let x = format!("x{}", display::unicode::subscript("s"));
        Some(format!("{x} = {}", self.normalizer))
    }
}

/// A Chebyshev series `Σ cₙTₙ(xₛ)` over a fitting interval, as produced by [`crate::fitter::ChebyshevFitter`].
pub type ChebyshevPolynomial<'a, T = f64> = crate::Polynomial<'a, ChebyshevBasis<T>, T>;
