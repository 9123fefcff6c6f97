//! Tools to help manipulate fractions.

use crate::symbolic::expr::{Primary, SymExpr};
use rug::Rational;
use super::simplify;

/// Create a [`SymExpr`] representing a fraction with the given numerator and denominator.
///
/// The representation is a [`SymExpr::Mul`] containing the numerator and the denominator raised
/// to the power of -1. No simplification is done.
pub(crate) fn make_fraction(numerator: SymExpr, denominator: SymExpr) -> SymExpr {
    numerator * denominator.recip()
}

/// If the exponent is "visibly" negative, returns its negation.
///
/// `-2` gives `2`, and `-x` gives `x`.
fn negated_exponent(exp: &SymExpr) -> Option<SymExpr> {
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
}

/// Splits a factor into a numerator and denominator.
fn factor_numer_denom(factor: &SymExpr) -> (SymExpr, SymExpr) {
    match factor {
        SymExpr::Primary(Primary::Number(n)) => (
            SymExpr::Primary(Primary::Number(Rational::from(n.numer()))),
            SymExpr::Primary(Primary::Number(Rational::from(n.denom()))),
        ),
        SymExpr::Exp(base, exp) => match negated_exponent(exp) {
            Some(exp) => (SymExpr::one(), SymExpr::pow((**base).clone(), exp)),
            None => (factor.clone(), SymExpr::one()),
        },
        SymExpr::Add(_) => numer_denom(factor),
        factor => (factor.clone(), SymExpr::one()),
    }
}

/// Rewrites the expression as a single fraction, returning the numerator and denominator, both
/// simplified.
///
/// Sums are brought over a common denominator: `1/x + 1/y` becomes `(y + x) / (xy)`. If two terms
/// share a denominator, it is only included once.
pub fn numer_denom(expr: &SymExpr) -> (SymExpr, SymExpr) {
    match expr {
        SymExpr::Add(terms) => {
            let mut numer = SymExpr::zero();
            let mut denom = SymExpr::one();
            for term in terms {
                let (n, d) = numer_denom(term);
                if d == denom {
                    numer = simplify(&(numer + n));
                } else {
                    numer = simplify(&(numer * d.clone() + n * denom.clone()));
                    denom = simplify(&(denom * d));
                }
            }
            (numer, denom)
        },
        SymExpr::Mul(factors) => {
            let (numers, denoms): (Vec<_>, Vec<_>) = factors.iter().map(factor_numer_denom).unzip();
            (simplify(&SymExpr::Mul(numers)), simplify(&SymExpr::Mul(denoms)))
        },
        expr => {
            let (numer, denom) = factor_numer_denom(expr);
            (simplify(&numer), simplify(&denom))
        },
    }
}

#[cfg(test)]
mod tests {
    use eqn_parser::parser::{ast::expr::Expr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn split(input: &str) -> (String, String) {
        let expr = Parser::new(input).try_parse_full::<Expr>().unwrap();
        let (numer, denom) = numer_denom(&simplify(&expr.into()));
        (numer.to_string(), denom.to_string())
    }

    #[test]
    fn reciprocal() {
        assert_eq!(split("1/x - 2"), ("1 - 2*x".to_string(), "x".to_string()));
    }

    #[test]
    fn numeric_denominator() {
        assert_eq!(split("x/2 - 3"), ("x - 6".to_string(), "2".to_string()));
    }

    #[test]
    fn no_denominator() {
        assert_eq!(split("x^2 - 4"), ("x**2 - 4".to_string(), "1".to_string()));
    }
}
