//! Unicode formatting for coefficients, exponents and basis subscripts
use std::ops::Range;

use crate::value::Value;

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
const SUBSCRIPT_DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// Format a floating point number as a string
///
/// # Parameters
/// - `n`: The number to format
/// - `fixed_range`: An optional range specifying the values that will not be formatted in scientific notation
/// - `precision`: The number of decimal places to include
pub fn float<T: Value>(n: T, fixed_range: Option<Range<T>>, precision: usize) -> String {
    match fixed_range {
        Some(range) if range.contains(&n) => format!("{n:.precision$}"),
        _ => format!("{n:.precision$e}"),
    }
}

/// Superscript form of an exponent, ignoring characters that have none
pub fn superscript(s: &str) -> String {
    s.chars()
        .filter_map(|c| match c {
            '-' => Some('⁻'),
            '+' => Some('⁺'),
            'n' => Some('ⁿ'),
            _ => digit(c, &SUPERSCRIPT_DIGITS),
        })
        .collect()
}

/// Subscript form of a basis label, ignoring characters that have none
pub fn subscript(s: &str) -> String {
    s.chars()
        .filter_map(|c| match c {
            '-' => Some('₋'),
            '+' => Some('₊'),
            's' => Some('ₛ'),
            'n' => Some('ₙ'),
            _ => digit(c, &SUBSCRIPT_DIGITS),
        })
        .collect()
}

fn digit(c: char, table: &[char; 10]) -> Option<char> {
    c.to_digit(10).map(|d| table[d as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float() {
        assert_eq!(float(0.5, Some(1e-3..1e3), 4), "0.5000");
        assert_eq!(float(12345.0, Some(1e-3..1e3), 2), "1.23e4");
        assert_eq!(float(2.0, None, 1), "2.0e0");
    }

    #[test]
    fn test_scripts() {
        assert_eq!(superscript("-25"), "⁻²⁵");
        assert_eq!(superscript("n"), "ⁿ");
        assert_eq!(subscript("s12"), "ₛ₁₂");
        assert_eq!(subscript("?"), "");
    }
}
