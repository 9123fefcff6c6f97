//! Checking, deduplicating and ordering candidate solutions.

use crate::cancel::CancelToken;
use crate::numerical::{error::FreeSymbol, eval::eval};
use crate::symbolic::{expr::SymExpr, simplify::simplify};
use log::debug;
use rug::{Complex, Float};
use std::cmp::Ordering;
use super::SolveError;

/// A candidate is a root if `|f(candidate)|` is at most this, relative to the size of the terms
/// of `f`.
const RESIDUAL_TOLERANCE: f64 = 1e-9;

/// Two solutions closer than this, relative to their magnitude, are the same solution, if either
/// of them is approximate. Exact solutions are only the same if their difference simplifies to
/// zero.
const DUPLICATE_TOLERANCE: f64 = 1e-12;

/// An imaginary part smaller than this, relative to the real part, makes a solution real.
const REAL_TOLERANCE: f64 = 1e-20;

fn magnitude(value: &Complex) -> f64 {
    value.clone().abs().real().to_f64()
}

/// Returns true if substituting `value` for the symbol makes `f` zero.
///
/// Fails if `f` cannot be evaluated at the value, which happens when the value makes a
/// denominator zero or a logarithm undefined.
fn is_root(f: &SymExpr, symbol: &SymExpr, value: &SymExpr) -> bool {
    let mut residual = Complex::new(crate::primitive::PRECISION);
    let mut scale = 1f64;
    for term in f.terms() {
        match eval(&term.substitute(symbol, value)) {
            Ok(term_value) => {
                scale += magnitude(&term_value);
                residual += term_value;
            },
            Err(_) => return false,
        }
    }
    magnitude(&residual) <= RESIDUAL_TOLERANCE * scale
}

fn close(a: &Complex, b: &Complex) -> bool {
    let diff = Complex::with_val(crate::primitive::PRECISION, a - b);
    magnitude(&diff) <= DUPLICATE_TOLERANCE * magnitude(a).max(1.0)
}

/// Returns true if the two candidates are the same solution.
fn duplicate(a: &SymExpr, a_value: &Complex, b: &SymExpr, b_value: &Complex) -> bool {
    if a.is_approximate() || b.is_approximate() {
        close(a_value, b_value)
    } else {
        a == b || simplify(&(a.clone() - b.clone())).is_zero()
    }
}

/// Keeps the candidates that actually solve `f = 0`, simplified and without duplicates.
///
/// Candidates that still contain other symbols cannot be checked numerically, so they are kept
/// as long as they are not strict duplicates of each other.
pub fn verified(
    f: &SymExpr,
    symbol: &str,
    candidates: Vec<SymExpr>,
    token: &CancelToken,
) -> Result<Vec<SymExpr>, SolveError> {
    let target = SymExpr::symbol(symbol);
    let mut numeric: Vec<(SymExpr, Complex)> = Vec::new();
    let mut symbolic: Vec<SymExpr> = Vec::new();

    for candidate in candidates {
        SolveError::check(token)?;
        let candidate = simplify(&candidate);
        if candidate.contains_symbol(symbol) {
            debug!("dropping {}: still contains {}", candidate, symbol);
            continue;
        }

        match eval(&candidate) {
            Ok(value) => {
                if numeric.iter().any(|(existing, existing_value)| {
                    duplicate(existing, existing_value, &candidate, &value)
                }) {
                    continue;
                }
                if !is_root(f, &target, &candidate) {
                    debug!("dropping {}: not a root", candidate);
                    continue;
                }
                numeric.push((candidate, value));
            },
            Err(err) if err.is::<FreeSymbol>() => {
                if !symbolic.contains(&candidate) {
                    symbolic.push(candidate);
                }
            },
            Err(err) => debug!("dropping {}: {}", candidate, err),
        }
    }

    Ok(numeric.into_iter()
        .map(|(candidate, _)| candidate)
        .chain(symbolic)
        .collect())
}

/// How a solution is ordered.
enum SortKey {
    Real(Float),
    Complex(Float, Float),
    Symbolic,
}

impl SortKey {
    fn of(solution: &SymExpr) -> Self {
        match eval(solution) {
            Ok(value) => {
                let (re, im) = value.into_real_imag();
                let threshold = re.clone().abs().max(&crate::primitive::float(1)) * REAL_TOLERANCE;
                if im.clone().abs() <= threshold {
                    Self::Real(re)
                } else {
                    Self::Complex(re, im)
                }
            },
            Err(_) => Self::Symbolic,
        }
    }

    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Real(a), Self::Real(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Real(_), _) => Ordering::Less,
            (_, Self::Real(_)) => Ordering::Greater,
            (Self::Complex(a_re, a_im), Self::Complex(b_re, b_im)) => a_re.partial_cmp(b_re)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a_im.partial_cmp(b_im).unwrap_or(Ordering::Equal)),
            (Self::Complex(..), Self::Symbolic) => Ordering::Less,
            (Self::Symbolic, Self::Complex(..)) => Ordering::Greater,
            (Self::Symbolic, Self::Symbolic) => Ordering::Equal,
        }
    }
}

/// Sorts solutions: real solutions in ascending order, then complex solutions by real part and
/// then imaginary part, then solutions that cannot be evaluated, in their original order.
pub fn sorted(solutions: Vec<SymExpr>) -> Vec<SymExpr> {
    let mut keyed = solutions.into_iter()
        .map(|solution| (SortKey::of(&solution), solution))
        .collect::<Vec<_>>();
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    keyed.into_iter().map(|(_, solution)| solution).collect()
}

#[cfg(test)]
mod tests {
    use crate::symbolic::expr::Primary;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn drops_non_roots_and_duplicates() {
        // x^2 - 1
        let f = SymExpr::Add(vec![
            SymExpr::pow(SymExpr::symbol("x"), SymExpr::num(2)),
            SymExpr::num(-1),
        ]);
        let candidates = vec![SymExpr::num(1), SymExpr::num(2), SymExpr::num(1), SymExpr::num(-1)];
        let kept = verified(&f, "x", candidates, &CancelToken::new()).unwrap();
        assert_eq!(kept, vec![SymExpr::num(1), SymExpr::num(-1)]);
    }

    #[test]
    fn exact_candidates_are_compared_exactly() {
        // x^2 - 1/10^30
        let tiny = SymExpr::num((1i64, 1_000_000_000_000_000i64));
        let f = simplify(&SymExpr::Add(vec![
            SymExpr::pow(SymExpr::symbol("x"), SymExpr::num(2)),
            -(tiny.clone() * tiny.clone()),
        ]));
        let candidates = vec![-tiny.clone(), tiny.clone(), tiny.clone()];
        let kept = verified(&f, "x", candidates, &CancelToken::new()).unwrap();
        assert_eq!(kept, vec![simplify(&-tiny.clone()), tiny]);
    }

    #[test]
    fn approximate_candidates_are_compared_numerically() {
        // x^2 - 2
        let f = SymExpr::Add(vec![
            SymExpr::pow(SymExpr::symbol("x"), SymExpr::num(2)),
            SymExpr::num(-2),
        ]);
        let root = SymExpr::num(2).sqrt();
        let approx = SymExpr::Primary(Primary::Float(crate::primitive::float(2).sqrt()));
        let kept = verified(&f, "x", vec![root.clone(), approx], &CancelToken::new()).unwrap();
        assert_eq!(kept, vec![simplify(&root)]);
    }

    #[test]
    fn keeps_symbolic_candidates() {
        let f = SymExpr::Add(vec![SymExpr::symbol("x"), SymExpr::symbol("y")]);
        let candidates = vec![-SymExpr::symbol("y")];
        let kept = verified(&f, "x", candidates, &CancelToken::new()).unwrap();
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn sorts_reals_then_complex() {
        let i = SymExpr::constant(eqn_parser::namespace::Const::I);
        let solutions = vec![i.clone(), SymExpr::num(3), -i, SymExpr::num(-1)];
        let sorted = sorted(solutions)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(sorted, vec!["-1", "3", "-I", "I"]);
    }
}
