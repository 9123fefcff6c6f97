//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::primitive::rational;
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{order::cmp_factors, rules::do_multiply},
};
use rug::Float;

/// `a*(b*c) = a*b*c`
pub fn flatten(expr: &SymExpr) -> Option<SymExpr> {
    do_multiply(expr, |factors| {
        if !factors.iter().any(|factor| matches!(factor, SymExpr::Mul(_))) {
            return None;
        }

        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor {
                SymExpr::Mul(inner) => new_factors.extend(inner.iter().cloned()),
                factor => new_factors.push(factor.clone()),
            }
        }
        Some(SymExpr::Mul(new_factors).downgrade())
    })
}

/// A product with zero or one factor is that factor.
pub fn downgrade(expr: &SymExpr) -> Option<SymExpr> {
    do_multiply(expr, |factors| {
        (factors.len() < 2).then(|| SymExpr::Mul(factors.to_vec()).downgrade())
    })
}

/// `0*a = 0`
pub fn multiply_zero(expr: &SymExpr) -> Option<SymExpr> {
    do_multiply(expr, |factors| {
        factors.iter().any(SymExpr::is_zero).then(SymExpr::zero)
    })
}

/// `2*3 = 6`
/// `1*a = a`
pub fn combine_numbers(expr: &SymExpr) -> Option<SymExpr> {
    do_multiply(expr, |factors| {
        let numbers = factors.iter().filter(|factor| factor.is_number()).count();
        let has_one = factors.iter().any(SymExpr::is_one);
        if numbers < 2 && !has_one {
            return None;
        }

        let mut exact = rational(1);
        let mut approx: Option<Float> = None;
        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor {
                SymExpr::Primary(Primary::Number(n)) => exact *= n,
                SymExpr::Primary(Primary::Float(f)) => {
                    approx = Some(match approx {
                        Some(acc) => acc * f,
                        None => f.clone(),
                    });
                },
                factor => new_factors.push(factor.clone()),
            }
        }

        match approx {
            Some(f) => new_factors.insert(0, SymExpr::Primary(Primary::Float(f * &exact))),
            None if exact != 1 => new_factors.insert(0, SymExpr::Primary(Primary::Number(exact))),
            None => (),
        }
        Some(SymExpr::Mul(new_factors).downgrade())
    })
}

/// Combines factors with the same base by adding their exponents.
///
/// `a*a = a^2`
/// `a^2*a^3 = a^5`
/// `a*a^-1 = a^0`
///
/// Plain numbers are left to [`combine_numbers`].
pub fn combine_like_factors(expr: &SymExpr) -> Option<SymExpr> {
    do_multiply(expr, |factors| {
        let mut numbers = Vec::new();
        let mut groups: Vec<(&SymExpr, Vec<SymExpr>)> = Vec::new();
        let mut combined = false;

        for factor in factors {
            if factor.is_number() {
                numbers.push(factor.clone());
                continue;
            }

            let (base, exp) = factor.as_base_exp();
            match groups.iter_mut().find(|(existing, _)| *existing == base) {
                Some((_, exps)) => {
                    exps.push(exp);
                    combined = true;
                },
                None => groups.push((base, vec![exp])),
            }
        }

        if !combined {
            return None;
        }

        let new_factors = numbers.into_iter()
            .chain(groups.into_iter().map(|(base, mut exps)| {
                let exp = if exps.len() == 1 {
                    exps.remove(0)
                } else {
                    SymExpr::Add(exps)
                };
                if exp.is_one() {
                    base.clone()
                } else {
                    SymExpr::pow(base.clone(), exp)
                }
            }))
            .collect();
        Some(SymExpr::Mul(new_factors).downgrade())
    })
}

/// Distributes an exact number over a sum.
///
/// `2(a+b) = 2a+2b`
/// `-(a-b) = b-a`
pub fn distribute_number(expr: &SymExpr) -> Option<SymExpr> {
    do_multiply(expr, |factors| {
        let [first, second] = factors else {
            return None;
        };
        let (number, sum) = match (first, second) {
            (n @ SymExpr::Primary(Primary::Number(_)), sum @ SymExpr::Add(_)) => (n, sum),
            (sum @ SymExpr::Add(_), n @ SymExpr::Primary(Primary::Number(_))) => (n, sum),
            _ => return None,
        };

        Some(SymExpr::Add(
            sum.terms()
                .iter()
                .map(|term| number.clone() * term.clone())
                .collect(),
        ))
    })
}

/// Sorts the factors into canonical order.
pub fn sort_factors(expr: &SymExpr) -> Option<SymExpr> {
    do_multiply(expr, |factors| {
        let mut sorted = factors.to_vec();
        sorted.sort_by(cmp_factors);
        let moved = sorted.iter()
            .zip(factors)
            .any(|(a, b)| a.to_string() != b.to_string());
        moved.then(|| SymExpr::Mul(sorted))
    })
}

/// Applies all multiplication rules.
pub fn all(expr: &SymExpr) -> Option<SymExpr> {
    flatten(expr)
        .or_else(|| downgrade(expr))
        .or_else(|| multiply_zero(expr))
        .or_else(|| combine_numbers(expr))
        .or_else(|| combine_like_factors(expr))
        .or_else(|| distribute_number(expr))
        .or_else(|| sort_factors(expr))
}
