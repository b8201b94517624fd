/// Asserts that a polynomial produces an expected `y` value at a given `x` input.
///
/// Useful for spot-checking specific predictions of an approximation.
///
/// # Example
/// ```
/// # use polyapprox::{function, assert_y};
/// function!(poly(x) = 1.0 + 2.0 x^1 + 3.0 x^2);
/// assert_y!(poly, 2.0, 17.0);
/// assert_y!(poly, 0.1, 1.23, tol = 1e-12);
/// ```
#[macro_export]
macro_rules! assert_y {
    ($function:expr, $x:expr, $expected:expr, tol = $tol:expr $(, $msg:literal $(, $($args:tt),*)?)?) => {{
        let function = &$function;
        let x = $x;
        let expected = $expected;

        #[allow(unused_mut, unused_assignments)] let mut msg = format!("y({x}) != {expected}");
        $( msg = format!("{msg}: {}", format!($msg, $($($args)?)?)); )?

        $crate::assert_close!(function.y(x), expected, tol = $tol, "{msg}");
    }};

    ($function:expr, $x:expr, $expected:expr $(, $msg:literal $(, $($args:tt),*)?)?) => {{
        let function = &$function;
        let x = $x;
        let expected = $expected;

        #[allow(unused_mut, unused_assignments)] let mut msg = format!("y({x}) != {expected}");
        $( msg = format!("{msg}: {}", format!($msg, $($($args)?)?)); )?

        $crate::assert_close!(function.y(x), expected, "{msg}");
    }};
}

/// Asserts that a polynomial tracks a target function over a set of x values.
///
/// Every point must satisfy `|p(x) - f(x)| <= max_error`. On failure the worst point is reported,
/// along with the RMSE over all points.
///
/// # Parameters
/// - `$poly`: Anything with a `y(x) -> f64` method (a [`crate::Polynomial`] or [`crate::CurveFit`]).
/// - `$target`: A closure or function `Fn(f64) -> f64`.
/// - `$points`: A slice of x values, such as [`crate::grid::SampleGrid::points`].
/// - `$max_error`: Largest acceptable absolute error.
///
/// # Example
/// ```
/// # use polyapprox::{assert_tracks, grid::SampleGrid, taylor::TaylorExpander, catalog::Catalog};
/// let catalog = Catalog::standard();
/// let sin = catalog.get(1).unwrap();
/// let poly = TaylorExpander::default().expand(sin, 0.0, 7).unwrap();
///
/// let grid = SampleGrid::new(0.0, 0.5, 101).unwrap();
/// assert_tracks!(poly, |x: f64| x.sin(), &grid.points(), 1e-6);
/// ```
#[macro_export]
macro_rules! assert_tracks {
    ($poly:expr, $target:expr, $points:expr, $max_error:expr $(, $msg:literal $(, $($args:tt),*)?)?) => {{
        let poly = &$poly;
        let target = $target;
        let points: &[f64] = $points;
        let max_error: f64 = $max_error;

        let mut worst = (f64::NAN, 0.0_f64);
        let mut sum_sq = 0.0;
        for &x in points {
            let error = (poly.y(x) - target(x)).abs();
            sum_sq += error * error;
            if !(error <= worst.1) {
                worst = (x, error);
            }
        }

        if !(worst.1 <= max_error) {
            let rmse = (sum_sq / points.len() as f64).sqrt();

            #[allow(unused_mut, unused_assignments)]
            let mut msg = format!(
                "Approximation error {} at x = {} exceeds {max_error} (RMSE {rmse:.4e})",
                worst.1, worst.0
            );
            $( msg = format!("{msg}: {}", format!($msg, $($($args)?)?)); )?

            panic!("{msg}");
        }
    }};
}

/// Asserts that two floating-point values are approximately equal within a small tolerance (epsilon).
///
/// Uses the machine epsilon for the floating-point type as the tolerance, unless `tol = ...` is given.
///
/// # Examples
/// ```
/// # use polyapprox::assert_close;
/// assert_close!(1.0 + 1e-16, 1.0);
/// assert_close!(0.5_f64.sin(), 0.4794, tol = 1e-4, "sin(0.5)");
/// ```
#[macro_export]
macro_rules! assert_close {
    ($a:expr, $b:expr, tol = $tol:expr $(, $msg:literal $(, $($args:tt),*)?)?) => { #[allow(clippy::float_cmp)] {
        #[allow(unused_mut, unused_assignments)] let mut msg = "Values not close".to_string();
        $( msg = format!($msg, $($($args)?)?); )?

        let (a, b, tol) = ($a, $b, $tol);
        let diff = $crate::value::Value::abs_sub(a, b);
        assert!(
            a == b || diff <= tol,
            "{msg}: {a} != {b} (|diff| = {diff:e} > {tol:e})"
        );
    }};

    ($a:expr, $b:expr $(, $msg:literal $(, $($args:tt),*)?)?) => { #[allow(clippy::float_cmp)] {
        fn epsilon<T: $crate::value::Value>(_: T) -> T {
            T::epsilon()
        }

        #[allow(unused_mut, unused_assignments)] let mut msg = "Values not close".to_string();
        $( msg = format!($msg, $($($args)?)?); )?

        let (a, b) = ($a, $b);
        assert!(
            a == b || $crate::value::Value::abs_sub(a, b) <= epsilon(a),
            "{msg}: {a} != {b}"
        );
    }};
}

/// Asserts that two slices of floating-point values are approximately equal element-wise.
///
/// - Element-wise [`crate::assert_close`], with the same optional `tol = ...`.
///
/// # Panics
/// - If the lengths differ.
/// - If any pair of elements differ by more than the tolerance.
///
/// # Examples
/// ```
/// # use polyapprox::assert_all_close;
/// let a = [1.0, 2.0, 3.0];
/// let b = [1.0 + 1e-16, 2.0, 3.0 - 1e-16];
/// assert_all_close!(a, b);
/// assert_all_close!([0.333], [1.0 / 3.0], tol = 1e-3);
/// ```
#[macro_export]
macro_rules! assert_all_close {
    ($src:expr, $dst:expr, tol = $tol:expr $(, $msg:literal $(, $($args:tt),*)?)?) => {
        #[allow(unused_assignments, unused_mut)]
        let mut msg = format!("{} elements", $src.len());
        $(
            msg = format!($msg, $($($args)?)?);
        )?

        assert_eq!($src.len(), $dst.len(), "{msg} - length mismatch");

        for (i, (s, d)) in $src.iter().zip($dst.iter()).enumerate() {
            $crate::assert_close!(*s, *d, tol = $tol, "{msg} - src[{i}]");
        }
    };

    ($src:expr, $dst:expr  $(, $msg:literal $(, $($args:tt),*)?)?) => {
        #[allow(unused_assignments, unused_mut)]
        let mut msg = format!("{} elements", $src.len());
        $(
            msg = format!($msg, $($($args)?)?);
        )?

        assert_eq!($src.len(), $dst.len(), "{msg} - length mismatch");

        for (i, (s, d)) in $src.iter().zip($dst.iter()).enumerate() {
            $crate::assert_close!(*s, *d, "{msg} - src[{i}]");
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::function;

    #[test]
    fn test_assert_y_macro() {
        function!(poly(x) = 1.0 + 2.0 x^1 + 3.0 x^2);
        assert_y!(poly, 2.0, 17.0);
        assert_y!(poly, 0.5, 2.75, tol = 1e-12);
    }

    #[test]
    fn test_assert_close_macro() {
        assert_close!(1.0 + 1e-16, 1.0, "Values should be close");
        assert_close!(1.0, 1.001, tol = 1e-2);
    }

    #[test]
    #[should_panic(expected = "Values not close")]
    fn test_assert_close_fails() {
        assert_close!(1.0, 1.1, tol = 1e-3);
    }

    #[test]
    fn test_assert_all_close_macro() {
        let a = [1.0, 2.0, 3.0];
        let b = [1.0 + 1e-16, 2.0, 3.0 - 1e-16];
        assert_all_close!(a, b, "Arrays should be close");
    }

    #[test]
    fn test_assert_tracks_macro() {
        function!(line(x) = 2.0 x + 1.0);
        let points = [0.0, 0.5, 1.0];
        assert_tracks!(line, |x: f64| 2.0 * x + 1.0 + 1e-9, &points, 1e-6);
    }

    #[test]
    #[should_panic(expected = "exceeds")]
    fn test_assert_tracks_fails() {
        function!(line(x) = 2.0 x + 1.0);
        let points = [0.0, 0.5, 1.0];
        assert_tracks!(line, |x: f64| x * x, &points, 1e-6);
    }
}
