use std::ops::{Add, Mul, Neg, Sub};

use crate::value::Value;

/// A truncated power series `c₀ + c₁(x - a) + ... + cₙ(x - a)ⁿ` about some center `a`.
///
/// Every operation propagates coefficients with the exact recurrence of the
/// corresponding derivative rule, so `cₖ = f⁽ᵏ⁾(a) / k!` holds for every series
/// built from [`Series::variable`] and [`Series::constant`].
///
/// Fallible operations return `None` when the result is not analytic at the center,
/// for example dividing by a series whose constant term is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    coefficients: Vec<f64>,
}

impl Series {
    /// A constant series, `c₀ = value` and every other coefficient zero.
    #[must_use]
    pub fn constant(value: f64, order: usize) -> Self {
        let mut coefficients = vec![0.0; order + 1];
        coefficients[0] = value;
        Self { coefficients }
    }

    /// The identity `x` expanded about `at`: `at + 1·(x - at)`.
    #[must_use]
    pub fn variable(at: f64, order: usize) -> Self {
        let mut series = Self::constant(at, order);
        if order > 0 {
            series.coefficients[1] = 1.0;
        }
        series
    }

    /// Highest power of `(x - a)` kept by this series.
    #[must_use]
    pub fn order(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// The value of the series at its center, `c₀`.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.coefficients[0]
    }

    /// The coefficients, lowest order first.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Consumes the series and returns its coefficients.
    #[must_use]
    pub fn into_coefficients(self) -> Vec<f64> {
        self.coefficients
    }

    /// The `n`th derivative at the center, `n!·cₙ`.
    ///
    /// Returns zero past the order of the series.
    #[must_use]
    pub fn derivative_at(&self, n: usize) -> f64 {
        self.coefficients
            .get(n)
            .map_or(0.0, |c| c * f64::factorial(n))
    }

    /// True if every coefficient is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.coefficients.iter().all(|c| c.is_finite())
    }

    /// Multiplies every coefficient by `factor`.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        let coefficients = self.coefficients.iter().map(|c| c * factor).collect();
        Self { coefficients }
    }

    /// Term-wise derivative, `d/dx`.
    ///
    /// The top coefficient is unknown at this order and is left at zero.
    /// [`Series::integral`] never reads it.
    #[must_use]
    pub fn derivative(&self) -> Self {
        let n = self.order();
        let mut coefficients = vec![0.0; n + 1];
        for k in 0..n {
            coefficients[k] = f64::from_positive_int(k + 1) * self.coefficients[k + 1];
        }
        Self { coefficients }
    }

    /// Antiderivative with constant term `constant`, at the same order.
    #[must_use]
    pub fn integral(&self, constant: f64) -> Self {
        let n = self.order();
        let mut coefficients = vec![0.0; n + 1];
        coefficients[0] = constant;
        for k in 1..=n {
            coefficients[k] = self.coefficients[k - 1] / f64::from_positive_int(k);
        }
        Self { coefficients }
    }

    /// `1 / self`, or `None` if the constant term is zero.
    #[must_use]
    pub fn recip(&self) -> Option<Self> {
        Self::constant(1.0, self.order()).div(self)
    }

    /// `self / rhs`, or `None` if the constant term of `rhs` is zero.
    #[must_use]
    pub fn div(&self, rhs: &Self) -> Option<Self> {
        let b0 = rhs.value();
        if b0 == 0.0 {
            return None;
        }

        let n = self.order().min(rhs.order());
        let mut w = vec![0.0; n + 1];
        for k in 0..=n {
            let mut sum = self.coefficients[k];
            for j in 1..=k {
                sum -= rhs.coefficients[j] * w[k - j];
            }
            w[k] = sum / b0;
        }

        Some(Self { coefficients: w })
    }

    /// `exp(self)`
    #[must_use]
    pub fn exp(&self) -> Self {
        let u = &self.coefficients;
        let n = self.order();

        let mut w = vec![0.0; n + 1];
        w[0] = u[0].exp();
        for k in 1..=n {
            let mut sum = 0.0;
            for j in 1..=k {
                sum += f64::from_positive_int(j) * u[j] * w[k - j];
            }
            w[k] = sum / f64::from_positive_int(k);
        }

        Self { coefficients: w }
    }

    /// `ln(self)`, or `None` unless the constant term is positive.
    #[must_use]
    pub fn ln(&self) -> Option<Self> {
        let u = &self.coefficients;
        if u[0] <= 0.0 {
            return None;
        }

        let n = self.order();
        let mut w = vec![0.0; n + 1];
        w[0] = u[0].ln();
        for k in 1..=n {
            let mut sum = 0.0;
            for j in 1..k {
                sum += f64::from_positive_int(j) * w[j] * u[k - j];
            }
            w[k] = (u[k] - sum / f64::from_positive_int(k)) / u[0];
        }

        Some(Self { coefficients: w })
    }

    /// `(sin(self), cos(self))`, computed together since each recurrence needs the other.
    #[must_use]
    pub fn sin_cos(&self) -> (Self, Self) {
        let u = &self.coefficients;
        let n = self.order();

        let mut s = vec![0.0; n + 1];
        let mut c = vec![0.0; n + 1];
        s[0] = u[0].sin();
        c[0] = u[0].cos();
        for k in 1..=n {
            let mut s_sum = 0.0;
            let mut c_sum = 0.0;
            for j in 1..=k {
                let ju = f64::from_positive_int(j) * u[j];
                s_sum += ju * c[k - j];
                c_sum += ju * s[k - j];
            }
            let k_f = f64::from_positive_int(k);
            s[k] = s_sum / k_f;
            c[k] = -c_sum / k_f;
        }

        (Self { coefficients: s }, Self { coefficients: c })
    }

    /// `self^p` for a constant real exponent.
    ///
    /// Non-negative integer powers are defined everywhere. Negative integer powers need a
    /// non-zero constant term, and fractional powers a positive one; otherwise `None`.
    #[must_use]
    pub fn powf(&self, p: f64) -> Option<Self> {
        let u = &self.coefficients;

        if p.fract() == 0.0 && (0.0..=64.0).contains(&p) {
            let mut result = Self::constant(1.0, self.order());
            let mut remaining = p;
            while remaining > 0.0 {
                result = &result * self;
                remaining -= 1.0;
            }
            return Some(result);
        }

        if u[0] == 0.0 || (p.fract() != 0.0 && u[0] < 0.0) {
            return None;
        }

        // u·w' = p·u'·w, solved for wₖ
        let n = self.order();
        let mut w = vec![0.0; n + 1];
        w[0] = u[0].powf(p);
        for k in 1..=n {
            let mut sum = 0.0;
            for j in 1..=k {
                let j_f = f64::from_positive_int(j);
                let rest = f64::from_positive_int(k - j);
                sum += (p * j_f - rest) * u[j] * w[k - j];
            }
            w[k] = sum / (f64::from_positive_int(k) * u[0]);
        }

        Some(Self { coefficients: w })
    }

    fn zip_with(&self, rhs: &Self, op: impl Fn(f64, f64) -> f64) -> Self {
        let n = self.order().min(rhs.order());
        let coefficients = (0..=n)
            .map(|k| op(self.coefficients[k], rhs.coefficients[k]))
            .collect();
        Self { coefficients }
    }
}

impl Add for &Series {
    type Output = Series;

    fn add(self, rhs: &Series) -> Series {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Sub for &Series {
    type Output = Series;

    fn sub(self, rhs: &Series) -> Series {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Mul for &Series {
    type Output = Series;

    fn mul(self, rhs: &Series) -> Series {
        let n = self.order().min(rhs.order());
        let mut coefficients = vec![0.0; n + 1];
        for k in 0..=n {
            for j in 0..=k {
                coefficients[k] += self.coefficients[j] * rhs.coefficients[k - j];
            }
        }
        Series { coefficients }
    }
}

impl Neg for &Series {
    type Output = Series;

    fn neg(self) -> Series {
        self.scale(-1.0)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{assert_all_close, assert_close};

    #[test]
    fn test_variable_and_constant() {
        let x = Series::variable(2.0, 3);
        assert_eq!(x.coefficients(), &[2.0, 1.0, 0.0, 0.0]);

        let c = Series::constant(4.0, 0);
        assert_eq!(c.coefficients(), &[4.0]);
        assert_eq!(Series::variable(1.0, 0).coefficients(), &[1.0]);
    }

    #[test]
    fn test_exp_about_zero() {
        let x = Series::variable(0.0, 5);
        let e = x.exp();
        assert_all_close!(
            e.coefficients(),
            &[1.0, 1.0, 0.5, 1.0 / 6.0, 1.0 / 24.0, 1.0 / 120.0]
        );
    }

    #[test]
    fn test_sin_cos_about_zero() {
        let x = Series::variable(0.0, 5);
        let (s, c) = x.sin_cos();
        assert_all_close!(s.coefficients(), &[0.0, 1.0, 0.0, -1.0 / 6.0, 0.0, 1.0 / 120.0]);
        assert_all_close!(c.coefficients(), &[1.0, 0.0, -0.5, 0.0, 1.0 / 24.0, 0.0]);
    }

    #[test]
    fn test_division_and_reciprocal() {
        // 1 / (1 - x) = 1 + x + x² + ...
        let x = Series::variable(0.0, 4);
        let one = Series::constant(1.0, 4);
        let geometric = (&one - &x).recip().unwrap();
        assert_all_close!(geometric.coefficients(), &[1.0; 5]);

        assert!(x.recip().is_none());
    }

    #[test]
    fn test_ln_and_powf() {
        // ln(1 + x) = x - x²/2 + x³/3
        let x = Series::variable(1.0, 3);
        let ln = x.ln().unwrap();
        assert_all_close!(ln.coefficients(), &[0.0, 1.0, -0.5, 1.0 / 3.0]);

        // sqrt(1 + x) = 1 + x/2 - x²/8 + x³/16
        let root = x.powf(0.5).unwrap();
        assert_all_close!(root.coefficients(), &[1.0, 0.5, -0.125, 0.0625]);

        // x² about 0 is defined even with a zero constant term
        let x = Series::variable(0.0, 3);
        assert_all_close!(x.powf(2.0).unwrap().coefficients(), &[0.0, 0.0, 1.0, 0.0]);
        assert!(x.powf(0.5).is_none());
        assert!(x.ln().is_none());
    }

    #[test]
    fn test_derivative_and_integral() {
        let x = Series::variable(0.0, 4);
        let e = x.exp();
        let d = e.derivative();
        assert_all_close!(&d.coefficients()[..4], &e.coefficients()[..4]);

        let back = d.integral(1.0);
        assert_all_close!(back.coefficients(), e.coefficients());
        assert_close!(e.derivative_at(3), 1.0);
        assert_eq!(e.derivative_at(10), 0.0);
    }
}
