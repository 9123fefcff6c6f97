//! The canonical order of terms in a sum and factors in a product.

use crate::symbolic::expr::{Primary, SymExpr};
use eqn_parser::namespace::Const;
use std::cmp::Ordering;

/// The degree of a term in its symbols. `3x^2 y` has degree 3, and `sin(x)` has degree 0.
pub fn degree(term: &SymExpr) -> i64 {
    term.factors()
        .iter()
        .map(|factor| {
            let (base, exp) = factor.as_base_exp();
            match (base, exp.as_small_integer()) {
                (SymExpr::Primary(Primary::Symbol(_)), Some(n)) => n,
                _ => 0,
            }
        })
        .sum()
}

/// Where a term goes in a sum: numbers come after other real terms, and imaginary terms come
/// last so that `a + bi` reads naturally.
fn term_group(term: &SymExpr) -> u8 {
    if term.factors().iter().any(|factor| factor.is_const(Const::I)) {
        2
    } else if term.is_number() {
        1
    } else {
        0
    }
}

/// Orders terms of a sum: higher degree first, then by the non-numeric part of the term, then
/// numbers, and imaginary terms last.
pub fn cmp_terms(a: &SymExpr, b: &SymExpr) -> Ordering {
    term_group(a).cmp(&term_group(b))
        .then_with(|| degree(b).cmp(&degree(a)))
        .then_with(|| a.as_coeff_mul().1.to_string().cmp(&b.as_coeff_mul().1.to_string()))
        .then_with(|| a.to_string().cmp(&b.to_string()))
}

/// Rank of a factor's base in a product; lower ranks are printed first.
fn rank(factor: &SymExpr) -> u8 {
    let (base, _) = factor.as_base_exp();
    match base {
        SymExpr::Primary(Primary::Number(_) | Primary::Float(_)) if factor == base => 0,
        SymExpr::Primary(Primary::Number(_) | Primary::Float(_)) => 1,
        SymExpr::Primary(Primary::Const(Const::I)) => 6,
        SymExpr::Primary(Primary::Const(_)) => 2,
        SymExpr::Primary(Primary::Symbol(_)) => 3,
        SymExpr::Primary(Primary::Call(..)) => 4,
        _ => 5,
    }
}

/// Orders factors of a product: numbers first, then numeric roots, constants, symbols, function
/// calls, everything else, and the imaginary unit last.
pub fn cmp_factors(a: &SymExpr, b: &SymExpr) -> Ordering {
    rank(a).cmp(&rank(b))
        .then_with(|| a.as_base_exp().0.to_string().cmp(&b.as_base_exp().0.to_string()))
        .then_with(|| a.to_string().cmp(&b.to_string()))
}
