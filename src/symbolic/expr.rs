use std::{fmt, sync::Arc};

use crate::{
    error::{Error, Result},
    symbolic::Series,
};

/// Elementary functions understood by the expression tree.
///
/// The reciprocal and inverse-reciprocal functions follow the usual CAS conventions:
/// `csc = 1/sin`, `sec = 1/cos`, `cot = cos/sin`, `asec(u) = acos(1/u)`,
/// `acsc(u) = asin(1/u)` and `acot(u) = atan(1/u)` with `acot(0) = π/2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    /// Natural exponential
    Exp,
    /// Natural logarithm
    Ln,
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Tangent
    Tan,
    /// Secant
    Sec,
    /// Cosecant
    Csc,
    /// Cotangent
    Cot,
    /// Inverse sine
    Asin,
    /// Inverse cosine
    Acos,
    /// Inverse tangent
    Atan,
    /// Inverse secant
    Asec,
    /// Inverse cosecant
    Acsc,
    /// Inverse cotangent
    Acot,
}
impl Func {
    /// The name used when printing a call to this function.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Func::Exp => "exp",
            Func::Ln => "ln",
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Sec => "sec",
            Func::Csc => "csc",
            Func::Cot => "cot",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Atan => "atan",
            Func::Asec => "asec",
            Func::Acsc => "acsc",
            Func::Acot => "acot",
        }
    }

    /// Evaluates the function at `u`.
    ///
    /// Returns a non-finite value outside the function's domain.
    #[must_use]
    pub fn eval(self, u: f64) -> f64 {
        match self {
            Func::Exp => u.exp(),
            Func::Ln => u.ln(),
            Func::Sin => u.sin(),
            Func::Cos => u.cos(),
            Func::Tan => u.tan(),
            Func::Sec => 1.0 / u.cos(),
            Func::Csc => 1.0 / u.sin(),
            Func::Cot => u.cos() / u.sin(),
            Func::Asin => u.asin(),
            Func::Acos => u.acos(),
            Func::Atan => u.atan(),
            Func::Asec => (1.0 / u).acos(),
            Func::Acsc => (1.0 / u).asin(),
            Func::Acot => {
                if u == 0.0 {
                    std::f64::consts::FRAC_PI_2
                } else {
                    (1.0 / u).atan()
                }
            }
        }
    }

    /// Symbolic derivative of the function with respect to its argument, `f'(u)`.
    fn outer_derivative(self, u: &Arc<Expr>) -> Expr {
        let u = || Expr::Shared(Arc::clone(u));
        let one = || Expr::number(1.0);
        match self {
            Func::Exp => Expr::call(Func::Exp, u()),
            Func::Ln => one() / u(),
            Func::Sin => Expr::call(Func::Cos, u()),
            Func::Cos => -Expr::call(Func::Sin, u()),
            Func::Tan => Expr::call(Func::Sec, u()).pow(2.0),
            Func::Sec => Expr::call(Func::Sec, u()) * Expr::call(Func::Tan, u()),
            Func::Csc => -(Expr::call(Func::Csc, u()) * Expr::call(Func::Cot, u())),
            Func::Cot => -Expr::call(Func::Csc, u()).pow(2.0),

            // 1 / sqrt(1 - u²)
            Func::Asin => (one() - u().pow(2.0)).pow(-0.5),
            Func::Acos => -(one() - u().pow(2.0)).pow(-0.5),
            Func::Atan => one() / (one() + u().pow(2.0)),
            Func::Acot => -(one() / (one() + u().pow(2.0))),

            // Chain rule through 1/u; equal to 1 / (|u|·sqrt(u² - 1)) without needing abs
            Func::Asec => u().pow(-2.0) * (one() - u().pow(-2.0)).pow(-0.5),
            Func::Acsc => -(u().pow(-2.0) * (one() - u().pow(-2.0)).pow(-0.5)),
        }
    }

    /// Propagates a truncated Taylor series through the function.
    ///
    /// Returns `None` where the function is not analytic at the series' center.
    fn series(self, u: &Series) -> Option<Series> {
        let result = match self {
            Func::Exp => u.exp(),
            Func::Ln => u.ln()?,
            Func::Sin => u.sin_cos().0,
            Func::Cos => u.sin_cos().1,
            Func::Tan => {
                let (sin, cos) = u.sin_cos();
                sin.div(&cos)?
            }
            Func::Sec => u.sin_cos().1.recip()?,
            Func::Csc => u.sin_cos().0.recip()?,
            Func::Cot => {
                let (sin, cos) = u.sin_cos();
                cos.div(&sin)?
            }
            Func::Asin => asin_series(u)?,
            Func::Acos => acos_series(u)?,
            Func::Atan => atan_like_series(u, self.eval(u.value()), 1.0)?,
            Func::Acot => atan_like_series(u, self.eval(u.value()), -1.0)?,
            Func::Asec => acos_series(&u.recip()?)?,
            Func::Acsc => asin_series(&u.recip()?)?,
        };

        result.is_finite().then_some(result)
    }
}

/// `asin(u) = asin(u₀) + ∫ u' / sqrt(1 - u²)`
fn asin_series(u: &Series) -> Option<Series> {
    let q = inverse_sine_integrand(u)?;
    Some(q.integral(u.value().asin()))
}

/// `acos(u) = acos(u₀) - ∫ u' / sqrt(1 - u²)`
fn acos_series(u: &Series) -> Option<Series> {
    let q = inverse_sine_integrand(u)?;
    Some((-&q).integral(u.value().acos()))
}

fn inverse_sine_integrand(u: &Series) -> Option<Series> {
    let one = Series::constant(1.0, u.order());
    let root = (&one - &(u * u)).powf(-0.5)?;
    Some(&u.derivative() * &root)
}

/// `atan(u)` or `acot(u)`: `w₀ ± ∫ u' / (1 + u²)`
fn atan_like_series(u: &Series, w0: f64, sign: f64) -> Option<Series> {
    let one = Series::constant(1.0, u.order());
    let q = u.derivative().div(&(&one + &(u * u)))?;
    Some(q.scale(sign).integral(w0))
}

/// An expression in a single real variable `x`.
///
/// Sub-expressions are reference counted so that derivative rules can reuse
/// their operands without copying whole trees.
///
/// Arithmetic operators build simplified trees: constants are folded and
/// additive/multiplicative identities are dropped.
///
/// # Example
/// ```
/// use polyapprox::symbolic::{Expr, Func};
///
/// let f = Expr::call(Func::Sin, Expr::x()) * Expr::x();
/// let df = f.derivative();
/// assert_eq!(df.to_string(), "cos(x)·x + sin(x)");
/// assert!((df.eval(0.0)).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Constant number
    Number(f64),

    /// The variable `x`
    Var,

    /// Addition
    Add(Arc<Expr>, Arc<Expr>),

    /// Subtraction
    Sub(Arc<Expr>, Arc<Expr>),

    /// Multiplication
    Mul(Arc<Expr>, Arc<Expr>),

    /// Division
    Div(Arc<Expr>, Arc<Expr>),

    /// Negation
    Neg(Arc<Expr>),

    /// Power with a constant real exponent
    Pow(Arc<Expr>, f64),

    /// Elementary function call
    Call(Func, Arc<Expr>),

    /// A shared sub-expression; transparent for every operation
    Shared(Arc<Expr>),
}

impl Expr {
    /// The variable `x`.
    #[must_use]
    pub fn x() -> Self {
        Expr::Var
    }

    /// A constant.
    #[must_use]
    pub fn number(n: f64) -> Self {
        Expr::Number(n)
    }

    /// A call to an elementary function.
    #[must_use]
    pub fn call(func: Func, arg: Expr) -> Self {
        Expr::Call(func, Arc::new(arg))
    }

    /// Raises this expression to a constant power.
    #[must_use]
    pub fn pow(self, exponent: f64) -> Self {
        if exponent == 0.0 {
            return Expr::Number(1.0);
        }
        if exponent == 1.0 {
            return self;
        }

        match self.as_number() {
            Some(n) => Expr::Number(pow_f64(n, exponent)),
            None => Expr::Pow(Arc::new(self), exponent),
        }
    }

    /// Returns the value of this expression if it is a constant.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self.resolve() {
            Expr::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Looks through shared indirections.
    fn resolve(&self) -> &Expr {
        let mut expr = self;
        while let Expr::Shared(inner) = expr {
            expr = inner;
        }
        expr
    }

    fn is_number(&self, value: f64) -> bool {
        self.as_number().is_some_and(|n| n == value)
    }

    /// Evaluates the expression at `x`.
    ///
    /// Returns a non-finite value where the expression is undefined.
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Expr::Number(n) => *n,
            Expr::Var => x,
            Expr::Add(a, b) => a.eval(x) + b.eval(x),
            Expr::Sub(a, b) => a.eval(x) - b.eval(x),
            Expr::Mul(a, b) => a.eval(x) * b.eval(x),
            Expr::Div(a, b) => a.eval(x) / b.eval(x),
            Expr::Neg(a) => -a.eval(x),
            Expr::Pow(a, p) => pow_f64(a.eval(x), *p),
            Expr::Call(f, a) => f.eval(a.eval(x)),
            Expr::Shared(a) => a.eval(x),
        }
    }

    /// Replaces every occurrence of `x` with `inner`.
    ///
    /// `f.compose(&(Expr::x() + Expr::number(2.0)))` is `f(x + 2)`.
    #[must_use]
    pub fn compose(&self, inner: &Expr) -> Expr {
        match self {
            Expr::Number(n) => Expr::Number(*n),
            Expr::Var => inner.clone(),
            Expr::Add(a, b) => a.compose(inner) + b.compose(inner),
            Expr::Sub(a, b) => a.compose(inner) - b.compose(inner),
            Expr::Mul(a, b) => a.compose(inner) * b.compose(inner),
            Expr::Div(a, b) => a.compose(inner) / b.compose(inner),
            Expr::Neg(a) => -a.compose(inner),
            Expr::Pow(a, p) => a.compose(inner).pow(*p),
            Expr::Call(f, a) => Expr::Call(*f, Arc::new(a.compose(inner))),
            Expr::Shared(a) => a.compose(inner),
        }
    }

    /// Symbolic derivative with respect to `x`.
    #[must_use]
    pub fn derivative(&self) -> Expr {
        match self {
            Expr::Number(_) => Expr::Number(0.0),
            Expr::Var => Expr::Number(1.0),
            Expr::Add(a, b) => a.derivative() + b.derivative(),
            Expr::Sub(a, b) => a.derivative() - b.derivative(),
            Expr::Mul(a, b) => {
                a.derivative() * Expr::Shared(Arc::clone(b))
                    + Expr::Shared(Arc::clone(a)) * b.derivative()
            }
            Expr::Div(a, b) => {
                let numerator = a.derivative() * Expr::Shared(Arc::clone(b))
                    - Expr::Shared(Arc::clone(a)) * b.derivative();
                numerator / Expr::Shared(Arc::clone(b)).pow(2.0)
            }
            Expr::Neg(a) => -a.derivative(),
            Expr::Pow(a, p) => {
                Expr::Number(*p) * Expr::Shared(Arc::clone(a)).pow(p - 1.0) * a.derivative()
            }
            Expr::Call(f, a) => f.outer_derivative(a) * a.derivative(),
            Expr::Shared(a) => a.derivative(),
        }
    }

    /// The `n`th symbolic derivative with respect to `x`.
    #[must_use]
    pub fn nth_derivative(&self, n: usize) -> Expr {
        let mut expr = self.clone();
        for _ in 0..n {
            expr = expr.derivative();
        }
        expr
    }

    /// Truncated Taylor series of this expression about `at`, up to `(x - at)^order`.
    ///
    /// The series is built bottom-up, applying the exact recurrence of each node's
    /// derivative rule, so the `n`th coefficient is `f⁽ⁿ⁾(at) / n!` up to floating point rounding.
    ///
    /// # Errors
    /// Returns [`Error::UndefinedDerivative`] if any sub-expression is not analytic at `at`
    /// (a zero denominator, a root of a non-positive value, `asin` at ±1, ...).
    pub fn taylor_series(&self, at: f64, order: usize) -> Result<Series> {
        let undefined = |expr: &Expr, point: f64| Error::UndefinedDerivative {
            expression: expr.to_string(),
            point,
        };

        let series = match self {
            Expr::Number(n) => Series::constant(*n, order),
            Expr::Var => Series::variable(at, order),
            Expr::Add(a, b) => &a.taylor_series(at, order)? + &b.taylor_series(at, order)?,
            Expr::Sub(a, b) => &a.taylor_series(at, order)? - &b.taylor_series(at, order)?,
            Expr::Mul(a, b) => &a.taylor_series(at, order)? * &b.taylor_series(at, order)?,
            Expr::Div(a, b) => {
                let denominator = b.taylor_series(at, order)?;
                a.taylor_series(at, order)?
                    .div(&denominator)
                    .ok_or_else(|| undefined(self, denominator.value()))?
            }
            Expr::Neg(a) => -&a.taylor_series(at, order)?,
            Expr::Pow(a, p) => {
                let base = a.taylor_series(at, order)?;
                base.powf(*p).ok_or_else(|| undefined(self, base.value()))?
            }
            Expr::Call(f, a) => {
                let arg = a.taylor_series(at, order)?;
                f.series(&arg).ok_or_else(|| undefined(self, arg.value()))?
            }
            Expr::Shared(a) => a.taylor_series(at, order)?,
        };

        if series.is_finite() {
            Ok(series)
        } else {
            Err(undefined(self, at))
        }
    }

    /// Binding strength used when printing.
    fn precedence(&self) -> u8 {
        match self.resolve() {
            Expr::Add(..) | Expr::Sub(..) => 1,
            Expr::Mul(..) | Expr::Div(..) => 2,
            Expr::Neg(..) => 3,
            Expr::Pow(..) => 4,
            Expr::Number(n) if *n < 0.0 => 3,
            _ => 5,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, min_precedence: u8) -> fmt::Result {
        if self.precedence() < min_precedence {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

fn pow_f64(base: f64, exponent: f64) -> f64 {
    if exponent.fract() == 0.0 && exponent.abs() <= f64::from(i32::MAX) {
        #[allow(clippy::cast_possible_truncation)]
        base.powi(exponent as i32)
    } else {
        base.powf(exponent)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{n}"),
            Expr::Var => write!(f, "x"),
            Expr::Add(a, b) => {
                a.fmt_operand(f, 1)?;
                match b.resolve() {
                    Expr::Number(n) if *n < 0.0 => write!(f, " - {}", -n),
                    Expr::Neg(inner) => {
                        write!(f, " - ")?;
                        inner.fmt_operand(f, 2)
                    }
                    _ => {
                        write!(f, " + ")?;
                        b.fmt_operand(f, 1)
                    }
                }
            }
            Expr::Sub(a, b) => {
                a.fmt_operand(f, 1)?;
                write!(f, " - ")?;
                b.fmt_operand(f, 2)
            }
            Expr::Mul(a, b) => {
                a.fmt_operand(f, 2)?;
                write!(f, "·")?;
                b.fmt_operand(f, 3)
            }
            Expr::Div(a, b) => {
                a.fmt_operand(f, 2)?;
                write!(f, "/")?;
                b.fmt_operand(f, 4)
            }
            Expr::Neg(a) => {
                write!(f, "-")?;
                a.fmt_operand(f, 3)
            }
            Expr::Pow(a, p) => {
                a.fmt_operand(f, 5)?;
                if *p < 0.0 {
                    write!(f, "^({p})")
                } else {
                    write!(f, "^{p}")
                }
            }
            Expr::Call(func, a) => write!(f, "{}({a})", func.name()),
            Expr::Shared(a) => write!(f, "{a}"),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        match (self.as_number(), rhs.as_number()) {
            (Some(a), Some(b)) => Expr::Number(a + b),
            (Some(a), _) if a == 0.0 => rhs,
            (_, Some(b)) if b == 0.0 => self,
            _ => Expr::Add(Arc::new(self), Arc::new(rhs)),
        }
    }
}

impl std::ops::Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        match (self.as_number(), rhs.as_number()) {
            (Some(a), Some(b)) => Expr::Number(a - b),
            (Some(a), _) if a == 0.0 => -rhs,
            (_, Some(b)) if b == 0.0 => self,
            _ if self == rhs => Expr::Number(0.0),
            _ => Expr::Sub(Arc::new(self), Arc::new(rhs)),
        }
    }
}

impl std::ops::Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        match (self.as_number(), rhs.as_number()) {
            (Some(a), Some(b)) => Expr::Number(a * b),
            (Some(a), _) | (_, Some(a)) if a == 0.0 => Expr::Number(0.0),
            (Some(a), _) if a == 1.0 => rhs,
            (_, Some(b)) if b == 1.0 => self,
            (Some(a), _) if a == -1.0 => -rhs,
            (_, Some(b)) if b == -1.0 => -self,

            // Constants go first
            (None, Some(_)) => Expr::Mul(Arc::new(rhs), Arc::new(self)),
            _ => Expr::Mul(Arc::new(self), Arc::new(rhs)),
        }
    }
}

impl std::ops::Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Expr {
        match (self.as_number(), rhs.as_number()) {
            (Some(a), Some(b)) if b != 0.0 => Expr::Number(a / b),
            (Some(a), _) if a == 0.0 => Expr::Number(0.0),
            (_, Some(b)) if b == 1.0 => self,
            _ => Expr::Div(Arc::new(self), Arc::new(rhs)),
        }
    }
}

impl std::ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        if let Some(n) = self.as_number() {
            return Expr::Number(-n);
        }
        if let Expr::Neg(inner) = self.resolve() {
            return Expr::Shared(Arc::clone(inner));
        }
        Expr::Neg(Arc::new(self))
    }
}
