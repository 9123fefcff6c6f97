//! Simplification of expressions.
//!
//! Simplification is done by applying a set of rules to the expression. Each rule is a function
//! that accepts an expression and returns [`Option<SymExpr>`]; if the rule applies, the rewritten
//! expression is returned. Rules only look at the node they are given, so [`simplify`] first
//! simplifies every child of the node, then applies the rules to the node itself until none of
//! them apply anymore. Whenever a rule fires, the children of the rewritten node are simplified
//! again, since the rule may have produced new, unsimplified children.
//!
//! The result is a canonical form:
//!
//! - sums have at most one numeric term, no two terms that differ only in their coefficient, and
//! a fixed term order (descending degree, numbers last)
//! - products have at most one numeric factor, no two factors with the same base, and a fixed
//! factor order (numbers first)
//! - numeric powers are evaluated exactly, with perfect powers pulled out of roots and
//! denominators rationalized
//! - functions at known arguments (`sin(pi/6)`, `log(32)`) are evaluated exactly

pub mod fraction;
pub mod order;
pub mod rules;

use super::expr::SymExpr;

/// Upper bound on the number of times the rules are applied to one node.
const MAX_PASSES: usize = 64;

/// Simplifies the given expression.
///
/// For more information, see the [module-level documentation](self).
pub fn simplify(expr: &SymExpr) -> SymExpr {
    let mut current = expr.map_children(simplify);

    for _ in 0..MAX_PASSES {
        match rules::all(&current) {
            Some(next) => current = next.map_children(simplify),
            None => break,
        }
    }

    current
}

#[cfg(test)]
mod tests {
    use eqn_parser::parser::{ast::expr::Expr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parses and simplifies the given expression, and prints it back in plain text.
    fn simplified(input: &str) -> String {
        let expr = Parser::new(input).try_parse_full::<Expr>().unwrap();
        simplify(&expr.into()).to_string()
    }

    #[test]
    fn combine_like_terms() {
        assert_eq!(simplified("x + x + x"), "3*x");
        assert_eq!(simplified("2x - 2x"), "0");
        assert_eq!(simplified("x + 3 - 5 + 2x"), "3*x - 2");
    }

    #[test]
    fn combine_like_factors() {
        assert_eq!(simplified("x * x^2"), "x**3");
        assert_eq!(simplified("x / x"), "1");
        assert_eq!(simplified("sqrt(x) sqrt(x)"), "x");
    }

    #[test]
    fn canonical_order() {
        assert_eq!(simplified("-4 + x^2"), "x**2 - 4");
        assert_eq!(simplified("1 + x + x^2"), "x**2 + x + 1");
    }

    #[test]
    fn distribute_numbers() {
        assert_eq!(simplified("2(x + 1)"), "2*x + 2");
        assert_eq!(simplified("-(x - 5)"), "5 - x");
    }

    #[test]
    fn numeric_folding() {
        assert_eq!(simplified("1/2 + 1/3"), "5/6");
        assert_eq!(simplified("2^10"), "1024");
        assert_eq!(simplified("2^-2"), "1/4");
        assert_eq!(simplified("0.5 * 4"), "2");
    }

    #[test]
    fn roots() {
        assert_eq!(simplified("sqrt(8)"), "2*sqrt(2)");
        assert_eq!(simplified("sqrt(16)"), "4");
        assert_eq!(simplified("cbrt(27)"), "3");
        assert_eq!(simplified("sqrt(1/2)"), "sqrt(2)/2");
        assert_eq!(simplified("1/sqrt(2)"), "sqrt(2)/2");
        assert_eq!(simplified("sqrt(2) sqrt(2)"), "2");
    }

    #[test]
    fn imaginary() {
        assert_eq!(simplified("sqrt(-16)"), "4*I");
        assert_eq!(simplified("I^2"), "-1");
        assert_eq!(simplified("I^3"), "-I");
        assert_eq!(simplified("I * I * I * I"), "1");
    }

    #[test]
    fn logarithms() {
        assert_eq!(simplified("log(1)"), "0");
        assert_eq!(simplified("ln(e)"), "1");
        assert_eq!(simplified("log(32)"), "5*log(2)");
        assert_eq!(simplified("log(32) / log(2)"), "5");
        assert_eq!(simplified("log(8, 2)"), "3");
        assert_eq!(simplified("exp(log(x))"), "x");
    }

    #[test]
    fn trigonometry() {
        assert_eq!(simplified("sin(pi/6)"), "1/2");
        assert_eq!(simplified("cos(pi)"), "-1");
        assert_eq!(simplified("sin(pi/4)"), "sqrt(2)/2");
        assert_eq!(simplified("tan(pi/3)"), "sqrt(3)");
        assert_eq!(simplified("asin(1/2)"), "pi/6");
        assert_eq!(simplified("acos(1/2)"), "pi/3");
        assert_eq!(simplified("atan(1)"), "pi/4");
        assert_eq!(simplified("pi - asin(1/2)"), "5*pi/6");
        assert_eq!(simplified("sin(-x)"), "-sin(x)");
    }

    #[test]
    fn absolute_value() {
        assert_eq!(simplified("Abs(-3)"), "3");
        assert_eq!(simplified("Abs(-2x)"), "2*Abs(x)");
    }
}
