//! Simplification rules for expressions involving addition, including combining like terms.

use crate::primitive::rational;
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{order::cmp_terms, rules::do_add},
};
use rug::{Float, Rational};

/// `a+(b+c) = a+b+c`
pub fn flatten(expr: &SymExpr) -> Option<SymExpr> {
    do_add(expr, |terms| {
        if !terms.iter().any(|term| matches!(term, SymExpr::Add(_))) {
            return None;
        }

        let mut new_terms = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                SymExpr::Add(inner) => new_terms.extend(inner.iter().cloned()),
                term => new_terms.push(term.clone()),
            }
        }
        Some(SymExpr::Add(new_terms).downgrade())
    })
}

/// A sum with zero or one term is that term.
pub fn downgrade(expr: &SymExpr) -> Option<SymExpr> {
    do_add(expr, |terms| {
        (terms.len() < 2).then(|| SymExpr::Add(terms.to_vec()).downgrade())
    })
}

/// `1+2 = 3`
/// `a+0 = a`
///
/// Adding an approximate number to an exact one gives an approximate number.
pub fn combine_numbers(expr: &SymExpr) -> Option<SymExpr> {
    do_add(expr, |terms| {
        let numbers = terms.iter().filter(|term| term.is_number()).count();
        let has_zero = terms.iter().any(SymExpr::is_zero);
        if numbers < 2 && !has_zero {
            return None;
        }

        let mut exact = rational(0);
        let mut approx: Option<Float> = None;
        let mut new_terms = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                SymExpr::Primary(Primary::Number(n)) => exact += n,
                SymExpr::Primary(Primary::Float(f)) => {
                    approx = Some(match approx {
                        Some(acc) => acc + f,
                        None => f.clone(),
                    });
                },
                term => new_terms.push(term.clone()),
            }
        }

        match approx {
            Some(f) => new_terms.push(SymExpr::Primary(Primary::Float(f + &exact))),
            None if exact.cmp0().is_ne() => new_terms.push(SymExpr::Primary(Primary::Number(exact))),
            None => (),
        }
        Some(SymExpr::Add(new_terms).downgrade())
    })
}

/// Multiplies `expr` by the exact coefficient, flattening the product.
fn with_coeff(coeff: Rational, expr: SymExpr) -> SymExpr {
    if coeff == 1 {
        expr
    } else {
        SymExpr::Primary(Primary::Number(coeff)) * expr
    }
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `2a+3a = 5a`
/// `a-a = 0`
pub fn combine_like_terms(expr: &SymExpr) -> Option<SymExpr> {
    do_add(expr, |terms| {
        let mut numbers = Vec::new();
        let mut groups: Vec<(Rational, SymExpr)> = Vec::new();
        let mut combined = false;

        for term in terms {
            if term.is_number() {
                numbers.push(term.clone());
                continue;
            }

            let (coeff, body) = term.as_coeff_mul();
            match groups.iter_mut().find(|(_, existing)| *existing == body) {
                Some((existing, _)) => {
                    *existing += coeff;
                    combined = true;
                },
                None => groups.push((coeff, body)),
            }
        }

        if !combined {
            return None;
        }

        let new_terms = groups.into_iter()
            .filter(|(coeff, _)| coeff.cmp0().is_ne())
            .map(|(coeff, body)| with_coeff(coeff, body))
            .chain(numbers)
            .collect();
        Some(SymExpr::Add(new_terms).downgrade())
    })
}

/// Sorts the terms into canonical order.
pub fn sort_terms(expr: &SymExpr) -> Option<SymExpr> {
    do_add(expr, |terms| {
        let mut sorted = terms.to_vec();
        sorted.sort_by(cmp_terms);
        let moved = sorted.iter()
            .zip(terms)
            .any(|(a, b)| a.to_string() != b.to_string());
        moved.then(|| SymExpr::Add(sorted))
    })
}

/// Applies all addition rules.
pub fn all(expr: &SymExpr) -> Option<SymExpr> {
    flatten(expr)
        .or_else(|| downgrade(expr))
        .or_else(|| combine_numbers(expr))
        .or_else(|| combine_like_terms(expr))
        .or_else(|| sort_terms(expr))
}
