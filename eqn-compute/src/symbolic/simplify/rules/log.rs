//! Simplification rules for the natural logarithm.

use crate::primitive::as_perfect_power;
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::rules::do_call,
};
use eqn_parser::namespace::{Const, Func};
use rug::{Integer, Rational};

fn log(arg: SymExpr) -> SymExpr {
    SymExpr::call(Func::Log, vec![arg])
}

/// `log(1) = 0`
/// `log(e) = 1`
pub fn log_identities(expr: &SymExpr) -> Option<SymExpr> {
    do_call(expr, Func::Log, |arg| {
        if arg.is_one() {
            Some(SymExpr::zero())
        } else if arg.is_const(Const::E) {
            Some(SymExpr::one())
        } else {
            None
        }
    })
}

/// `log(e^k) = k`, if `k` is a number
pub fn log_of_exp(expr: &SymExpr) -> Option<SymExpr> {
    do_call(expr, Func::Log, |arg| {
        let SymExpr::Exp(base, exp) = arg else {
            return None;
        };
        (base.is_const(Const::E) && exp.is_number()).then(|| (**exp).clone())
    })
}

/// `log(b^k) = k log(b)`, if `b` is a positive number and `k` is a number
///
/// This includes perfect powers such as `log(32) = 5 log(2)`, and reciprocals such as
/// `log(1/3) = -log(3)`.
pub fn log_of_power(expr: &SymExpr) -> Option<SymExpr> {
    do_call(expr, Func::Log, |arg| {
        if let SymExpr::Exp(base, exp) = arg {
            let positive = base.as_number().map_or(false, |b| b.cmp0().is_gt());
            return (positive && exp.is_number())
                .then(|| (**exp).clone() * log((**base).clone()));
        }

        let r = arg.as_number().filter(|r| r.cmp0().is_gt())?;
        if r.is_integer() {
            let (b, k) = as_perfect_power(r.numer())?;
            Some(SymExpr::num(k) * log(SymExpr::Primary(Primary::Number(Rational::from(b)))))
        } else if *r.numer() == 1 {
            let d = Integer::from(r.denom());
            Some(SymExpr::num(-1) * log(SymExpr::Primary(Primary::Number(Rational::from(d)))))
        } else {
            None
        }
    })
}

/// Applies all logarithm rules.
pub fn all(expr: &SymExpr) -> Option<SymExpr> {
    log_identities(expr)
        .or_else(|| log_of_exp(expr))
        .or_else(|| log_of_power(expr))
}
