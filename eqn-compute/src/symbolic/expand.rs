//! Expansion of products of sums.
//!
//! [`simplify`] only distributes plain numbers over sums, so `(x + 1)(x - 1)` stays a product.
//! [`expand`] multiplies out every product of sums, and every sum raised to a small positive
//! integer power, which turns polynomials into a sum of monomials.

use super::{expr::SymExpr, simplify::simplify};

/// Sums raised to a larger power are left alone.
const MAX_EXPANDED_POWER: i64 = 16;

/// Products with more terms than this after expansion are left alone.
const MAX_EXPANDED_TERMS: usize = 4096;

/// `(a+b)(c+d) = ac + ad + bc + bd`
///
/// Returns [`None`] if the result would have too many terms.
fn distribute(lhs: &SymExpr, rhs: &SymExpr) -> Option<SymExpr> {
    let (lhs, rhs) = (lhs.terms(), rhs.terms());
    if lhs.len() * rhs.len() > MAX_EXPANDED_TERMS {
        return None;
    }

    let terms = lhs.iter()
        .flat_map(|a| rhs.iter().map(move |b| a.clone() * b.clone()))
        .collect();
    Some(simplify(&SymExpr::Add(terms)))
}

fn expand_node(expr: &SymExpr) -> SymExpr {
    let expr = expr.map_children(expand_node);
    match &expr {
        SymExpr::Mul(factors) if factors.iter().any(|factor| matches!(factor, SymExpr::Add(_))) => {
            let mut acc = SymExpr::one();
            for factor in factors {
                match distribute(&acc, factor) {
                    Some(product) => acc = product,
                    None => return expr.clone(),
                }
            }
            acc
        },
        SymExpr::Exp(base, exp) if matches!(**base, SymExpr::Add(_)) => {
            let Some(n) = exp.as_small_integer().filter(|n| (2..=MAX_EXPANDED_POWER).contains(n)) else {
                return expr.clone();
            };

            let mut acc = (**base).clone();
            for _ in 1..n {
                match distribute(&acc, base) {
                    Some(product) => acc = product,
                    None => return expr.clone(),
                }
            }
            acc
        },
        _ => expr,
    }
}

/// Simplifies the expression, then expands it.
///
/// For more information, see the [module-level documentation](self).
pub fn expand(expr: &SymExpr) -> SymExpr {
    simplify(&expand_node(&simplify(expr)))
}

#[cfg(test)]
mod tests {
    use eqn_parser::parser::{ast::expr::Expr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn expanded(input: &str) -> String {
        let expr = Parser::new(input).try_parse_full::<Expr>().unwrap();
        expand(&expr.into()).to_string()
    }

    #[test]
    fn difference_of_squares() {
        assert_eq!(expanded("(x + 1)(x - 1)"), "x**2 - 1");
    }

    #[test]
    fn square_of_sum() {
        assert_eq!(expanded("(x + 1)^2"), "x**2 + 2*x + 1");
    }

    #[test]
    fn nested() {
        assert_eq!(expanded("x(x + 2)^2 - x^3"), "4*x**2 + 4*x");
    }

    #[test]
    fn symbolic_power_is_unchanged() {
        assert_eq!(expanded("(x + 1)^y"), "(x + 1)**y");
    }
}
