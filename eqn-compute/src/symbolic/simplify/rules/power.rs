//! Simplification rules for powers, including exact evaluation of numeric powers and roots.

use crate::primitive::{extract_power, float, rational};
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::rules::do_power,
};
use eqn_parser::namespace::{Const, Func};
use rug::{ops::Pow, Rational};

/// Largest number of bits an exactly computed power may have.
const MAX_POWER_BITS: u64 = 1 << 14;

/// Roots with a larger index are left alone.
const MAX_ROOT_INDEX: u32 = 64;

/// `a^0 = 1`
pub fn zero_exponent(expr: &SymExpr) -> Option<SymExpr> {
    do_power(expr, |_, exp| exp.is_zero().then(SymExpr::one))
}

/// `a^1 = a`
pub fn one_exponent(expr: &SymExpr) -> Option<SymExpr> {
    do_power(expr, |base, exp| exp.is_one().then(|| base.clone()))
}

/// `1^a = 1`
pub fn one_base(expr: &SymExpr) -> Option<SymExpr> {
    do_power(expr, |base, _| base.is_one().then(SymExpr::one))
}

/// `0^a = 0`, if `a` is a positive number
pub fn zero_base(expr: &SymExpr) -> Option<SymExpr> {
    do_power(expr, |base, exp| {
        let positive = exp.as_number().map_or(false, |n| n.cmp0().is_gt());
        (base.is_zero() && positive).then(SymExpr::zero)
    })
}

/// Raises a rational to an integer power, if the result is small enough.
fn rational_pow(r: &Rational, n: i64) -> Option<Rational> {
    let bits = u64::from(r.numer().significant_bits()) + u64::from(r.denom().significant_bits());
    if bits.saturating_mul(n.unsigned_abs()) > MAX_POWER_BITS {
        return None;
    }
    if r.cmp0().is_eq() && n < 0 {
        return None;
    }
    Some(r.clone().pow(i32::try_from(n).ok()?))
}

/// Evaluates powers of positive rationals exactly.
///
/// `2^3 = 8`
/// `2^-2 = 1/4`
/// `8^(1/2) = 2*sqrt(2)`
/// `(1/2)^(1/2) = sqrt(2)/2`
///
/// Fractional powers are split into a rational part and a root of an integer, with the root
/// pulled out of the denominator: `(n/d)^(s/q) = (n^s d^(q-s))^(1/q) / d`.
pub fn numeric_power(expr: &SymExpr) -> Option<SymExpr> {
    do_power(expr, |base, exp| {
        let r = base.as_number()?;
        let e = exp.as_number()?;

        if e.is_integer() {
            let n = e.numer().to_i64()?;
            return rational_pow(r, n).map(|n| SymExpr::Primary(Primary::Number(n)));
        }

        if r.cmp0().is_le() {
            return None;
        }

        let q = e.denom().to_u32().filter(|q| *q <= MAX_ROOT_INDEX)?;
        let p = e.numer().to_i64()?;
        let whole = p.div_euclid(i64::from(q));
        let s = p.rem_euclid(i64::from(q)) as u32;

        let numer = r.numer().clone();
        let denom = r.denom().clone();
        let radicand_bits = u64::from(numer.significant_bits()) * u64::from(s)
            + u64::from(denom.significant_bits()) * u64::from(q - s);
        if radicand_bits > MAX_POWER_BITS {
            return None;
        }

        let radicand = numer.pow(s) * denom.clone().pow(q - s);
        let (outside, inside) = extract_power(&radicand, q);
        let coeff = rational_pow(r, whole)? * Rational::from((outside, denom));

        let result = if inside == 1 {
            SymExpr::Primary(Primary::Number(coeff))
        } else {
            let root = SymExpr::pow(
                SymExpr::Primary(Primary::Number(Rational::from(inside))),
                SymExpr::num((1, q)),
            );
            if coeff == 1 {
                root
            } else {
                SymExpr::Mul(vec![SymExpr::Primary(Primary::Number(coeff)), root])
            }
        };

        (result != *expr).then_some(result)
    })
}

/// Evaluates powers involving approximate numbers.
pub fn float_power(expr: &SymExpr) -> Option<SymExpr> {
    do_power(expr, |base, exp| {
        let value = match (base, exp) {
            (SymExpr::Primary(Primary::Float(f)), SymExpr::Primary(Primary::Number(e))) => {
                if e.is_integer() {
                    f.clone().pow(e.numer().to_i32()?)
                } else if f.is_sign_positive() {
                    f.clone().pow(float(e))
                } else {
                    return None;
                }
            },
            (SymExpr::Primary(Primary::Number(r)), SymExpr::Primary(Primary::Float(e))) if r.cmp0().is_gt() => {
                float(r).pow(e)
            },
            (SymExpr::Primary(Primary::Float(f)), SymExpr::Primary(Primary::Float(e))) if f.is_sign_positive() => {
                f.clone().pow(e)
            },
            _ => return None,
        };
        value.is_finite().then(|| SymExpr::Primary(Primary::Float(value)))
    })
}

/// `(a^b)^c = a^(bc)`, if `c` is an integer
pub fn power_of_power(expr: &SymExpr) -> Option<SymExpr> {
    do_power(expr, |base, exp| {
        let SymExpr::Exp(inner_base, inner_exp) = base else {
            return None;
        };
        exp.as_small_integer()?;
        Some(SymExpr::pow(
            (**inner_base).clone(),
            (**inner_exp).clone() * exp.clone(),
        ))
    })
}

/// `(ab)^c = a^c b^c`, if `c` is an integer
///
/// For other exponents, only a positive numeric coefficient is pulled out:
/// `(4x)^(1/2) = 2 x^(1/2)`.
pub fn power_of_product(expr: &SymExpr) -> Option<SymExpr> {
    do_power(expr, |base, exp| {
        let SymExpr::Mul(factors) = base else {
            return None;
        };

        if exp.as_small_integer().is_some() {
            return Some(SymExpr::Mul(
                factors.iter()
                    .map(|factor| SymExpr::pow(factor.clone(), exp.clone()))
                    .collect(),
            ));
        }

        let (coeff, rest) = base.as_coeff_mul();
        if coeff.cmp0().is_le() || coeff == 1 {
            return None;
        }
        Some(SymExpr::Mul(vec![
            SymExpr::pow(SymExpr::Primary(Primary::Number(coeff)), exp.clone()),
            SymExpr::pow(rest, exp.clone()),
        ]))
    })
}

/// `e^log(a) = a`
/// `e^(b log(a)) = a^b`
pub fn exp_of_log(expr: &SymExpr) -> Option<SymExpr> {
    do_power(expr, |base, exp| {
        if !base.is_const(Const::E) {
            return None;
        }

        let factors = exp.factors();
        let position = factors.iter()
            .position(|factor| matches!(factor.as_call(), Some((Func::Log, _))))?;
        let (_, arg) = factors[position].as_call()?;

        let rest = factors.iter()
            .enumerate()
            .filter(|(i, _)| *i != position)
            .map(|(_, factor)| factor.clone())
            .collect::<Vec<_>>();
        Some(SymExpr::pow(arg.clone(), SymExpr::Mul(rest).downgrade()))
    })
}

/// Applies all power rules.
pub fn all(expr: &SymExpr) -> Option<SymExpr> {
    zero_exponent(expr)
        .or_else(|| one_exponent(expr))
        .or_else(|| one_base(expr))
        .or_else(|| zero_base(expr))
        .or_else(|| numeric_power(expr))
        .or_else(|| float_power(expr))
        .or_else(|| power_of_power(expr))
        .or_else(|| power_of_product(expr))
        .or_else(|| exp_of_log(expr))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn integer_powers() {
        let expr = SymExpr::pow(SymExpr::num(3), SymExpr::num(4));
        assert_eq!(numeric_power(&expr), Some(SymExpr::num(81)));

        let expr = SymExpr::pow(SymExpr::num((2, 3)), SymExpr::num(-2));
        assert_eq!(numeric_power(&expr), Some(SymExpr::num((9, 4))));
    }

    #[test]
    fn irreducible_root_is_unchanged() {
        let expr = SymExpr::num(2).sqrt();
        assert_eq!(numeric_power(&expr), None);
    }

    #[test]
    fn huge_power_is_left_alone() {
        let expr = SymExpr::pow(SymExpr::num(7), SymExpr::num(1_000_000));
        assert_eq!(numeric_power(&expr), None);
    }

    #[test]
    fn negative_root_is_left_alone() {
        let expr = SymExpr::num(-4).sqrt();
        assert_eq!(numeric_power(&expr), None);
    }
}
