//! Simplification rules for trigonometric functions and their inverses.
//!
//! Functions are evaluated exactly at rational multiples of `pi` with denominators 1, 2, 3, 4
//! and 6, and the inverse functions at the corresponding values. Negative arguments are made
//! positive using the symmetries of each function.

pub mod consts;

use crate::primitive::rational;
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::rules::do_call,
};
use eqn_parser::namespace::{Const, Func};
use rug::Rational;

/// If `arg` is a rational multiple of `pi`, returns the multiple.
fn pi_multiple(arg: &SymExpr) -> Option<Rational> {
    if arg.is_zero() {
        return Some(rational(0));
    }

    let (coeff, rest) = arg.as_coeff_mul();
    rest.is_const(Const::Pi).then_some(coeff)
}

/// `r pi`
fn times_pi(r: Rational) -> SymExpr {
    SymExpr::Primary(Primary::Number(r)) * SymExpr::constant(Const::Pi)
}

/// Reduces `r` into `[0, period)`.
fn reduce(r: Rational, period: i32) -> Rational {
    let turns = Rational::from(&r / period).floor();
    r - turns * period
}

/// Returns true if the argument is "visibly" negative, meaning it has a negative coefficient.
fn is_negative(arg: &SymExpr) -> bool {
    match arg {
        SymExpr::Primary(Primary::Float(f)) => f.is_sign_negative() && !f.is_zero(),
        arg => arg.as_coeff_mul().0.cmp0().is_lt(),
    }
}

fn lookup_angle(table: &[(Rational, SymExpr)], r: &Rational) -> Option<SymExpr> {
    table.iter()
        .find(|(angle, _)| angle == r)
        .map(|(_, value)| value.clone())
}

fn lookup_value(table: &[(SymExpr, Rational)], v: &SymExpr) -> Option<Rational> {
    table.iter()
        .find(|(value, _)| value == v)
        .map(|(_, angle)| angle.clone())
}

/// `sin(r pi)`, using `sin(x + pi) = -sin(x)` to reduce `r` into `[0, 1)`.
fn sin_of_multiple(r: Rational) -> Option<SymExpr> {
    let r = reduce(r, 2);
    if r >= 1 {
        lookup_angle(&consts::SIN, &(r - 1)).map(|value| -value)
    } else {
        lookup_angle(&consts::SIN, &r)
    }
}

/// `sin(r pi)` for special `r`
pub fn sin_special(expr: &SymExpr) -> Option<SymExpr> {
    do_call(expr, Func::Sin, |arg| sin_of_multiple(pi_multiple(arg)?))
}

/// `cos(r pi) = sin((r + 1/2) pi)` for special `r`
pub fn cos_special(expr: &SymExpr) -> Option<SymExpr> {
    do_call(expr, Func::Cos, |arg| sin_of_multiple(pi_multiple(arg)? + rational((1, 2))))
}

/// `tan(r pi)` for special `r`, using the period `pi`
pub fn tan_special(expr: &SymExpr) -> Option<SymExpr> {
    do_call(expr, Func::Tan, |arg| {
        let r = reduce(pi_multiple(arg)?, 1);
        lookup_angle(&consts::TAN, &r)
    })
}

/// `asin(v)` and `atan(v)` for special `v`
pub fn inverse_special(expr: &SymExpr) -> Option<SymExpr> {
    do_call(expr, Func::Asin, |arg| lookup_value(&consts::ASIN, arg).map(times_pi))
        .or_else(|| do_call(expr, Func::Atan, |arg| lookup_value(&consts::ATAN, arg).map(times_pi)))
}

/// `acos(v) = pi/2 - asin(v)` for special `v`
pub fn acos_special(expr: &SymExpr) -> Option<SymExpr> {
    do_call(expr, Func::Acos, |arg| {
        let r = lookup_value(&consts::ASIN, arg)?;
        Some(times_pi(rational((1, 2)) - r))
    })
}

/// `sin(-x) = -sin(x)`
/// `tan(-x) = -tan(x)`
/// `asin(-x) = -asin(x)`
/// `atan(-x) = -atan(x)`
pub fn odd_symmetry(expr: &SymExpr) -> Option<SymExpr> {
    let (func, arg) = expr.as_call()?;
    if !matches!(func, Func::Sin | Func::Tan | Func::Asin | Func::Atan) || !is_negative(arg) {
        return None;
    }

    Some(-SymExpr::call(func, vec![-arg.clone()]))
}

/// `cos(-x) = cos(x)`
/// `acos(-x) = pi - acos(x)`
pub fn even_symmetry(expr: &SymExpr) -> Option<SymExpr> {
    let (func, arg) = expr.as_call()?;
    if !is_negative(arg) {
        return None;
    }

    match func {
        Func::Cos => Some(SymExpr::call(Func::Cos, vec![-arg.clone()])),
        Func::Acos => Some(
            SymExpr::constant(Const::Pi) - SymExpr::call(Func::Acos, vec![-arg.clone()])
        ),
        _ => None,
    }
}

/// Applies all trigonometric rules.
pub fn all(expr: &SymExpr) -> Option<SymExpr> {
    sin_special(expr)
        .or_else(|| cos_special(expr))
        .or_else(|| tan_special(expr))
        .or_else(|| inverse_special(expr))
        .or_else(|| acos_special(expr))
        .or_else(|| odd_symmetry(expr))
        .or_else(|| even_symmetry(expr))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn reduce_angles() {
        assert_eq!(reduce(rational((7, 2)), 2), rational((3, 2)));
        assert_eq!(reduce(rational((-1, 2)), 2), rational((3, 2)));
        assert_eq!(reduce(rational(1), 1), rational(0));
    }

    #[test]
    fn sin_of_three_halves_pi() {
        assert_eq!(sin_of_multiple(rational((3, 2))), Some(SymExpr::num(-1)));
    }

    #[test]
    fn unknown_angle() {
        assert_eq!(sin_of_multiple(rational((1, 5))), None);
    }
}
