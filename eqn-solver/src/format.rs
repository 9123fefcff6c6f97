//! Rendering of solutions.

use eqn_compute::{fmt::Latex, numerical::eval::eval, symbolic::SymExpr};
use rug::Complex;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Shown instead of a decimal when a solution has no numeric value.
pub const SYMBOLIC: &str = "Symbolic";

/// Significant digits of the numeric approximation of a solution.
const SIGNIFICANT_DIGITS: usize = 12;

/// Fractional digits shown for real solutions, before trailing zeros are trimmed.
const FRACTION_DIGITS: usize = 10;

/// A solution, rendered three ways.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// LaTeX markup of the exact value.
    pub exact: String,

    /// Decimal approximation, or [`SYMBOLIC`].
    pub decimal: String,

    /// The exact value in the canonical plain-text grammar.
    pub plain: String,
}

impl Solution {
    /// Renders a solution.
    pub fn new(value: &SymExpr) -> Self {
        Self {
            exact: value.as_display().to_string(),
            decimal: decimal(value),
            plain: value.to_string(),
        }
    }
}

/// Rounds a finite value to [`SIGNIFICANT_DIGITS`] significant digits.
fn round_significant(value: f64) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value).parse().ok()
}

/// Formats a real value with at most [`FRACTION_DIGITS`] fractional digits, and at least one.
fn real_decimal(value: f64) -> String {
    let fixed = format!("{:.*}", FRACTION_DIGITS, value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let trimmed = if trimmed == "-0" { "0" } else { trimmed };

    if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        format!("{}.0", trimmed)
    }
}

/// Formats one part of a complex value, always with a decimal point.
fn float_part(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

/// Formats a complex value as `a + b*I`.
fn complex_decimal(re: f64, im: f64) -> String {
    if re == 0.0 {
        format!("{}*I", float_part(im))
    } else if im < 0.0 {
        format!("{} - {}*I", float_part(re), float_part(-im))
    } else {
        format!("{} + {}*I", float_part(re), float_part(im))
    }
}

/// Formats an evaluated value, or returns [`None`] if it has no finite approximation.
fn format_value(value: &Complex) -> Option<String> {
    let re = round_significant(value.real().to_f64())?;
    let im = round_significant(value.imag().to_f64())?;

    if im.abs() <= 1e-30 * re.abs().max(1.0) {
        Some(real_decimal(re))
    } else {
        Some(complex_decimal(re, im))
    }
}

/// Returns the decimal approximation of a solution, or [`SYMBOLIC`] if it has none.
pub fn decimal(value: &SymExpr) -> String {
    eval(value)
        .ok()
        .and_then(|value| format_value(&value))
        .unwrap_or_else(|| SYMBOLIC.to_string())
}

/// Whether copied solutions show the exact value or its decimal approximation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Exact,
    Decimal,
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "decimal" => Ok(Self::Decimal),
            other => Err(format!("unknown display mode `{}` (expected `exact` or `decimal`)", other)),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Decimal => write!(f, "decimal"),
        }
    }
}

/// The texts offered for copying a solution to the clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyPayloads {
    pub latex: String,
    pub markdown: String,
    pub plain: String,
    pub html: String,
}

impl CopyPayloads {
    /// Derives the payloads of a solution. In [`DisplayMode::Decimal`], every payload is the
    /// decimal approximation.
    pub fn new(solution: &Solution, mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::Exact => Self {
                latex: solution.exact.clone(),
                markdown: format!("$${}$$", solution.exact),
                plain: solution.plain.clone(),
                html: format!(
                    "<math xmlns=\"http://www.w3.org/1998/Math/MathML\" display=\"block\"><mrow>{}</mrow></math>",
                    solution.exact.replace("\\(", "(").replace("\\)", ")"),
                ),
            },
            DisplayMode::Decimal => Self {
                latex: solution.decimal.clone(),
                markdown: solution.decimal.clone(),
                plain: solution.decimal.clone(),
                html: solution.decimal.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use eqn_compute::symbolic::simplify;
    use eqn_parser::parser::{ast::Expr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn value(input: &str) -> SymExpr {
        simplify(&Parser::new(input).try_parse_full::<Expr>().unwrap().into())
    }

    #[test]
    fn integral_values_keep_one_digit() {
        assert_eq!(decimal(&value("5")), "5.0");
        assert_eq!(decimal(&value("-2")), "-2.0");
        assert_eq!(decimal(&value("0")), "0.0");
        assert_eq!(decimal(&value("1000000")), "1000000.0");
    }

    #[test]
    fn fractional_values() {
        assert_eq!(decimal(&value("1/2")), "0.5");
        assert_eq!(decimal(&value("-3/4")), "-0.75");
        assert_eq!(decimal(&value("1/3")), "0.3333333333");
        assert_eq!(decimal(&value("sqrt(2)")), "1.4142135624");
        assert_eq!(decimal(&value("pi/6")), "0.5235987756");
    }

    #[test]
    fn complex_values() {
        assert_eq!(decimal(&value("2I")), "2.0*I");
        assert_eq!(decimal(&value("-2I")), "-2.0*I");
        assert_eq!(decimal(&value("-1 + sqrt(3)I")), "-1.0 + 1.73205080757*I");
        assert_eq!(decimal(&value("1/2 - I/4")), "0.5 - 0.25*I");
    }

    #[test]
    fn symbolic_values() {
        assert_eq!(decimal(&value("y + 1")), SYMBOLIC);
        assert_eq!(decimal(&value("oo")), SYMBOLIC);
    }

    #[test]
    fn solution_forms() {
        let solution = Solution::new(&value("sqrt(2)"));
        assert_eq!(solution, Solution {
            exact: "\\sqrt{2}".to_string(),
            decimal: "1.4142135624".to_string(),
            plain: "sqrt(2)".to_string(),
        });
    }

    #[test]
    fn exact_payloads() {
        let solution = Solution {
            exact: "\\left(x + 1\\right)^{2}".to_string(),
            decimal: SYMBOLIC.to_string(),
            plain: "(x + 1)**2".to_string(),
        };
        let payloads = CopyPayloads::new(&solution, DisplayMode::Exact);
        assert_eq!(payloads.latex, "\\left(x + 1\\right)^{2}");
        assert_eq!(payloads.markdown, "$$\\left(x + 1\\right)^{2}$$");
        assert_eq!(payloads.plain, "(x + 1)**2");
        assert_eq!(
            payloads.html,
            "<math xmlns=\"http://www.w3.org/1998/Math/MathML\" display=\"block\"><mrow>\\left(x + 1\\right)^{2}</mrow></math>",
        );

        let solution = Solution {
            exact: "\\(x\\)".to_string(),
            decimal: SYMBOLIC.to_string(),
            plain: "x".to_string(),
        };
        assert!(CopyPayloads::new(&solution, DisplayMode::Exact).html.contains("<mrow>(x)</mrow>"));
    }

    #[test]
    fn decimal_payloads() {
        let solution = Solution::new(&value("1/2"));
        let payloads = CopyPayloads::new(&solution, DisplayMode::Decimal);
        assert_eq!(payloads, CopyPayloads {
            latex: "0.5".to_string(),
            markdown: "0.5".to_string(),
            plain: "0.5".to_string(),
            html: "0.5".to_string(),
        });
    }

    #[test]
    fn display_mode_from_str() {
        assert_eq!("Decimal".parse::<DisplayMode>(), Ok(DisplayMode::Decimal));
        assert_eq!(" exact ".parse::<DisplayMode>(), Ok(DisplayMode::Exact));
        assert!("fancy".parse::<DisplayMode>().is_err());
    }
}
