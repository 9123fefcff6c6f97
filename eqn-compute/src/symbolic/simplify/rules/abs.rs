//! Simplification rules for the absolute value.

use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::rules::do_call,
};
use eqn_parser::namespace::{Const, Func};

/// `|-3| = 3`
/// `|pi| = pi`
/// `|i| = 1`
pub fn abs_of_constant(expr: &SymExpr) -> Option<SymExpr> {
    do_call(expr, Func::Abs, |arg| match arg {
        SymExpr::Primary(Primary::Number(n)) => Some(SymExpr::Primary(Primary::Number(n.clone().abs()))),
        SymExpr::Primary(Primary::Float(f)) => Some(SymExpr::Primary(Primary::Float(f.clone().abs()))),
        SymExpr::Primary(Primary::Const(Const::I)) => Some(SymExpr::one()),
        SymExpr::Primary(Primary::Const(Const::Pi | Const::E | Const::Infinity)) => Some(arg.clone()),
        _ => None,
    })
}

/// `|ab| = |a| |b|`, if `a` is a number other than 1
pub fn abs_of_product(expr: &SymExpr) -> Option<SymExpr> {
    do_call(expr, Func::Abs, |arg| {
        let (coeff, rest) = arg.as_coeff_mul();
        if coeff == 1 || rest.is_one() {
            return None;
        }
        Some(SymExpr::Mul(vec![
            SymExpr::Primary(Primary::Number(coeff.abs())),
            SymExpr::call(Func::Abs, vec![rest]),
        ]))
    })
}

/// `||a|| = |a|`
pub fn abs_of_abs(expr: &SymExpr) -> Option<SymExpr> {
    do_call(expr, Func::Abs, |arg| {
        matches!(arg.as_call(), Some((Func::Abs, _))).then(|| arg.clone())
    })
}

/// Applies all absolute value rules.
pub fn all(expr: &SymExpr) -> Option<SymExpr> {
    abs_of_constant(expr)
        .or_else(|| abs_of_product(expr))
        .or_else(|| abs_of_abs(expr))
}
