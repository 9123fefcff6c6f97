//! Simplification rules involving the imaginary unit.

use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::rules::do_power,
};
use eqn_parser::namespace::Const;

/// `i^0 = 1`
/// `i^2 = -1`
/// `i^3 = -i`
/// `i^4 = 1`
pub fn power_of_i(expr: &SymExpr) -> Option<SymExpr> {
    do_power(expr, |base, exp| {
        if !base.is_const(Const::I) {
            return None;
        }

        let i = || SymExpr::constant(Const::I);
        Some(match exp.as_small_integer()?.rem_euclid(4) {
            0 => SymExpr::one(),
            1 => i(),
            2 => SymExpr::num(-1),
            _ => SymExpr::Mul(vec![SymExpr::num(-1), i()]),
        })
    })
}

/// `(-a)^(p/2) = i^p a^(p/2)`, if `a` is a positive number
///
/// `sqrt(-4) = 2i`
pub fn root_of_negative(expr: &SymExpr) -> Option<SymExpr> {
    do_power(expr, |base, exp| {
        let r = base.as_number().filter(|r| r.cmp0().is_lt())?;
        let e = exp.as_number().filter(|e| *e.denom() == 2)?;

        Some(SymExpr::Mul(vec![
            SymExpr::pow(SymExpr::constant(Const::I), SymExpr::Primary(Primary::Number(e.numer().clone().into()))),
            SymExpr::pow(SymExpr::Primary(Primary::Number(-r.clone())), exp.clone()),
        ]))
    })
}

/// Applies all imaginary rules.
pub fn all(expr: &SymExpr) -> Option<SymExpr> {
    power_of_i(expr)
        .or_else(|| root_of_negative(expr))
}
