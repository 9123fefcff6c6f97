//! Formatting of [`SymExpr`]s as plain text and as LaTeX.
//!
//! Plain text ([`Display`]) uses `*` for multiplication and `**` for powers, and can be parsed
//! back: `x**2 - 4`, `5*pi/6`, `sqrt(2)/2`, `-2*I`. LaTeX output goes through the [`Latex`] trait:
//! `x^{2} - 4`, `\frac{5 \pi}{6}`, `\frac{\sqrt{2}}{2}`, `- 2 i`.
//!
//! Both formats print a product as a fraction, pulling every factor with a negative exponent into
//! the denominator. [`Term`] does that split once for both.

mod latex;
mod plain;

use crate::primitive::rational;
use crate::symbolic::expr::{Primary, SymExpr};
use rug::{Float, Rational};
use std::fmt::{Display, Formatter, Result};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// If the exponent is "visibly" negative, such as `-2` or `-x`, returns its negation.
pub(crate) fn negated_exponent(exp: &SymExpr) -> Option<SymExpr> {
    match exp {
        SymExpr::Primary(Primary::Float(f)) if f.is_sign_negative() => {
            Some(SymExpr::Primary(Primary::Float(-f.clone())))
        },
        _ => {
            let (coeff, rest) = exp.as_coeff_mul();
            if coeff.cmp0().is_ge() {
                return None;
            }
            let coeff = -coeff;
            Some(if rest.is_one() {
                SymExpr::Primary(Primary::Number(coeff))
            } else if coeff == 1 {
                rest
            } else {
                SymExpr::Primary(Primary::Number(coeff)) * rest
            })
        },
    }
}

/// A term of a sum, split into its sign, coefficient, and the factors above and below the
/// fraction bar.
#[derive(Debug)]
pub(crate) struct Term {
    /// Whether the term is negative.
    pub negative: bool,

    /// The absolute value of the exact coefficient.
    pub coeff: Rational,

    /// The absolute value of the approximate coefficient, if any.
    pub float: Option<Float>,

    /// Factors in the numerator.
    pub numer: Vec<SymExpr>,

    /// Factors in the denominator, with their exponents negated.
    pub denom: Vec<SymExpr>,
}

impl Term {
    /// Splits the expression.
    pub fn new(expr: &SymExpr) -> Self {
        let mut coeff = rational(1);
        let mut float: Option<Float> = None;
        let mut numer = Vec::new();
        let mut denom = Vec::new();

        for factor in expr.factors() {
            match factor {
                SymExpr::Primary(Primary::Number(n)) => coeff *= n,
                SymExpr::Primary(Primary::Float(value)) => {
                    float = Some(match float {
                        Some(acc) => acc * value,
                        None => value.clone(),
                    });
                },
                SymExpr::Exp(base, exp) => match negated_exponent(exp) {
                    Some(exp) if exp.is_one() => denom.push((**base).clone()),
                    Some(exp) => denom.push(SymExpr::pow((**base).clone(), exp)),
                    None => numer.push(factor.clone()),
                },
                factor => numer.push(factor.clone()),
            }
        }

        let mut negative = coeff.cmp0().is_lt();
        if let Some(value) = &mut float {
            if value.is_sign_negative() {
                negative = !negative;
                value.abs_mut();
            }
        }

        Self {
            negative,
            coeff: coeff.abs(),
            float,
            numer,
            denom,
        }
    }

    /// The integer placed in the numerator, if it is not 1.
    pub fn numer_coeff(&self) -> Option<&rug::Integer> {
        let n = self.coeff.numer();
        (*n != 1 || (self.numer.is_empty() && self.float.is_none())).then_some(n)
    }

    /// The integer placed in the denominator, if it is not 1.
    pub fn denom_coeff(&self) -> Option<&rug::Integer> {
        let d = self.coeff.denom();
        (*d != 1).then_some(d)
    }

    /// Returns true if the term has a denominator.
    pub fn has_denom(&self) -> bool {
        self.denom_coeff().is_some() || !self.denom.is_empty()
    }
}

/// Returns true if the term is printed with a leading minus sign.
pub(crate) fn is_negative_term(expr: &SymExpr) -> bool {
    Term::new(expr).negative
}

/// Orders the terms of a sum for printing. If the sum starts with a negative term and ends with a
/// positive number, the number is printed first, so `-x + 5` reads `5 - x`.
pub(crate) fn print_order(terms: &[SymExpr]) -> Vec<&SymExpr> {
    let mut ordered = terms.iter().collect::<Vec<_>>();
    if let (Some(first), Some(last)) = (terms.first(), terms.last()) {
        let positive_number = last.as_number().map_or(false, |n| n.cmp0().is_gt());
        if terms.len() > 1 && is_negative_term(first) && positive_number {
            ordered.rotate_right(1);
        }
    }
    ordered
}

/// Formats an approximate number, always with a decimal point.
pub(crate) fn float_to_string(value: &Float) -> String {
    let value = value.to_f64();
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
