//! Solving equations for a single symbol.
//!
//! [`solve`] moves everything to one side, `f(x) = lhs - rhs = 0`, and brings `f` over a common
//! denominator. The numerator is then handled in one of two ways:
//!
//! - If it is a polynomial in some **generator** `g(x)` (the symbol itself, `sqrt(x)`, `e^x`,
//! `sin(x)`, ...), the roots of the polynomial are found with the usual formulas, the rational
//! root theorem, or numerically (see [`poly`]), and `g(x) = root` is solved by isolation.
//! - Otherwise, the symbol is **isolated** by undoing the operations around it one at a time
//! (see [`isolate`]).
//!
//! Every candidate is then substituted back into `f` and kept only if it actually is a root
//! (see [`verify`]). This removes the extraneous roots introduced by squaring, clearing
//! denominators and the like.
//!
//! Solving never loops forever: every loop calls [`SolveError::check`] with the [`CancelToken`]
//! passed to [`solve`].

pub mod isolate;
pub mod numeric;
pub mod poly;
pub mod verify;

use crate::cancel::CancelToken;
use log::{debug, trace};
use poly::Poly;
use std::fmt;
use super::{
    expand::expand,
    expr::SymExpr,
    simplify::{fraction::numer_denom, simplify},
};

/// An error that can occur while solving an equation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The [`CancelToken`] was cancelled, or its deadline passed.
    Cancelled,

    /// The equation is not of a form the solver understands. Holds a description of the part
    /// that could not be solved.
    Unsupported(String),
}

impl SolveError {
    /// Returns [`SolveError::Cancelled`] if the token was cancelled.
    pub fn check(token: &CancelToken) -> Result<(), Self> {
        if token.is_cancelled() {
            Err(Self::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Builds an [`SolveError::Unsupported`] for the equation `lhs = rhs`.
    pub(crate) fn unsupported(lhs: &SymExpr, rhs: &SymExpr) -> Self {
        Self::Unsupported(format!("{} = {}", lhs, rhs))
    }
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(f, "solving was cancelled"),
            Self::Unsupported(eq) => write!(f, "cannot solve `{}`", eq),
        }
    }
}

impl std::error::Error for SolveError {}

/// Finds candidate roots of `f = 0`, where `f` is simplified. Candidates are not verified.
pub(crate) fn solve_zero(
    f: &SymExpr,
    symbol: &str,
    token: &CancelToken,
) -> Result<Vec<SymExpr>, SolveError> {
    SolveError::check(token)?;
    if !f.contains_symbol(symbol) {
        return Ok(Vec::new());
    }

    let (numer, _) = numer_denom(f);
    if !numer.contains_symbol(symbol) {
        return Ok(Vec::new());
    }

    let expanded = expand(&numer);
    trace!("numerator of {}: {}", f, expanded);
    if let Some(poly) = Poly::from_expr(&expanded, symbol) {
        debug!("polynomial of degree {} in {}", poly.degree(), poly.generator);
        match poly.roots(token) {
            Ok(roots) if poly.generator.as_symbol() == Some(symbol) => return Ok(roots),
            Ok(roots) => {
                let mut candidates = Vec::new();
                for root in roots {
                    match isolate::isolate(&poly.generator, root, symbol, token) {
                        Ok(found) => candidates.extend(found),
                        Err(SolveError::Cancelled) => return Err(SolveError::Cancelled),
                        Err(err) => debug!("skipping root of generator: {}", err),
                    }
                }
                return Ok(candidates);
            },
            Err(SolveError::Cancelled) => return Err(SolveError::Cancelled),
            Err(err) => debug!("polynomial solver failed: {}", err),
        }
    }

    isolate::isolate(&numer, SymExpr::zero(), symbol, token)
}

/// Solves the equation `lhs = rhs` for the given symbol.
///
/// Returns every solution found, simplified, without duplicates, and sorted: real solutions in
/// ascending order, then complex solutions, then solutions that could not be evaluated to a
/// number. An equation with no solutions returns an empty list.
///
/// For more information, see the [module-level documentation](self).
pub fn solve(
    lhs: &SymExpr,
    rhs: &SymExpr,
    symbol: &str,
    token: &CancelToken,
) -> Result<Vec<SymExpr>, SolveError> {
    let f = simplify(&(lhs.clone() - rhs.clone()));
    debug!("solving {} = 0 for {}", f, symbol);

    let candidates = solve_zero(&f, symbol, token)?;
    trace!("candidates: {}", candidates.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "));

    let solutions = verify::verified(&f, symbol, candidates, token)?;
    Ok(verify::sorted(solutions))
}

#[cfg(test)]
mod tests {
    use eqn_parser::parser::{ast::expr::Expr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> SymExpr {
        Parser::new(input).try_parse_full::<Expr>().unwrap().into()
    }

    /// Solves `lhs = rhs` for `x`, and prints the solutions.
    fn solutions(lhs: &str, rhs: &str) -> Vec<String> {
        solve(&parse(lhs), &parse(rhs), "x", &CancelToken::new())
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn linear() {
        assert_eq!(solutions("x - 5", "0"), vec!["5"]);
        assert_eq!(solutions("2x + 3", "11"), vec!["4"]);
        assert_eq!(solutions("x / 2", "3"), vec!["6"]);
    }

    #[test]
    fn no_solution() {
        assert_eq!(solutions("x", "x + 1"), Vec::<String>::new());
    }

    #[test]
    fn quadratic() {
        assert_eq!(solutions("x^2 - 4", "0"), vec!["-2", "2"]);
        assert_eq!(solutions("x^2", "9"), vec!["-3", "3"]);
        assert_eq!(solutions("x^2 - 2", "0"), vec!["-sqrt(2)", "sqrt(2)"]);
        assert_eq!(solutions("x^2 - 2x + 1", "0"), vec!["1"]);
    }

    #[test]
    fn nearby_exact_roots_stay_distinct() {
        assert_eq!(solutions("x^2", "10^-30"), vec!["-1/1000000000000000", "1/1000000000000000"]);
        assert_eq!(
            solutions("(x - 10^15)(x - 10^15 - 1)", "0"),
            vec!["1000000000000000", "1000000000000001"],
        );
    }

    #[test]
    fn huge_power_gives_up() {
        assert!(matches!(
            solve(&parse("x^1000000000"), &parse("2"), "x", &CancelToken::new()),
            Err(SolveError::Unsupported(_)),
        ));
    }

    #[test]
    fn complex_roots() {
        assert_eq!(solutions("x^2", "-4"), vec!["-2*I", "2*I"]);
    }

    #[test]
    fn cubic_with_rational_roots() {
        assert_eq!(solutions("x^3 - 6x^2 + 11x - 6", "0"), vec!["1", "2", "3"]);
    }

    #[test]
    fn zero_root() {
        assert_eq!(solutions("x^3 - x", "0"), vec!["-1", "0", "1"]);
    }

    #[test]
    fn reciprocal() {
        assert_eq!(solutions("1/x", "2"), vec!["1/2"]);
        assert_eq!(solutions("1/x", "0"), Vec::<String>::new());
    }

    #[test]
    fn extraneous_denominator_root() {
        // x = 1 makes the denominator vanish
        assert_eq!(solutions("(x^2 - 1) / (x - 1)", "0"), vec!["-1"]);
    }

    #[test]
    fn square_root() {
        assert_eq!(solutions("sqrt(x)", "3"), vec!["9"]);
        assert_eq!(solutions("sqrt(x)", "-3"), Vec::<String>::new());
    }

    #[test]
    fn exponential() {
        assert_eq!(solutions("2^x", "32"), vec!["5"]);
        assert_eq!(solutions("e^x", "1"), vec!["0"]);
    }

    #[test]
    fn trigonometric() {
        assert_eq!(solutions("sin(x)", "1/2"), vec!["pi/6", "5*pi/6"]);
        assert_eq!(solutions("cos(x)", "0"), vec!["pi/2", "3*pi/2"]);
    }

    #[test]
    fn logarithm() {
        assert_eq!(solutions("log(x)", "0"), vec!["1"]);
    }

    #[test]
    fn absolute_value() {
        assert_eq!(solutions("Abs(x)", "2"), vec!["-2", "2"]);
    }

    #[test]
    fn zero_product() {
        assert_eq!(solutions("(x - 1)(x + 2)", "0"), vec!["-2", "1"]);
    }

    #[test]
    fn cancelled_token() {
        let token = CancelToken::new();
        token.cancel();
        assert_eq!(
            solve(&parse("x - 1"), &SymExpr::zero(), "x", &token),
            Err(SolveError::Cancelled),
        );
    }
}
