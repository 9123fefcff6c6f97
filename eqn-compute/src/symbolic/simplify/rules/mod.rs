//! Implementation of many simplification rules.
//!
//! Each rule in this module is a function that takes the expression to simplify as an argument,
//! and returns `Some(expr)` with the simplified expression if the rule applies, or `None` if the
//! rule does not apply. A rule never returns an expression strictly equal to its input.

pub mod abs;
pub mod add;
pub mod imaginary;
pub mod log;
pub mod multiply;
pub mod power;
pub mod trigonometry;

use eqn_parser::namespace::Func;
use super::super::expr::{Primary, SymExpr};

/// If the expression is a call to the given function with exactly one argument, calls the given
/// transformation function with the argument.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_call(
    expr: &SymExpr,
    target: Func,
    f: impl Fn(&SymExpr) -> Option<SymExpr>,
) -> Option<SymExpr> {
    match expr {
        SymExpr::Primary(Primary::Call(func, args)) if *func == target && args.len() == 1 => f(&args[0]),
        _ => None,
    }
}

/// If the expression is an add expression, calls the given transformation function with the terms.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_add(expr: &SymExpr, f: impl Fn(&[SymExpr]) -> Option<SymExpr>) -> Option<SymExpr> {
    if let SymExpr::Add(terms) = expr {
        f(terms)
    } else {
        None
    }
}

/// If the expression is a multiplication expression, calls the given transformation function with
/// the factors.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_multiply(expr: &SymExpr, f: impl Fn(&[SymExpr]) -> Option<SymExpr>) -> Option<SymExpr> {
    if let SymExpr::Mul(factors) = expr {
        f(factors)
    } else {
        None
    }
}

/// If the expression is a power expression, calls the given transformation function with the base
/// and exponent of the power.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_power(expr: &SymExpr, f: impl Fn(&SymExpr, &SymExpr) -> Option<SymExpr>) -> Option<SymExpr> {
    if let SymExpr::Exp(base, exp) = expr {
        f(base, exp)
    } else {
        None
    }
}

/// Applies all rules.
pub fn all(expr: &SymExpr) -> Option<SymExpr> {
    add::all(expr)
        .or_else(|| multiply::all(expr))
        .or_else(|| power::all(expr))
        .or_else(|| imaginary::all(expr))
        .or_else(|| log::all(expr))
        .or_else(|| trigonometry::all(expr))
        .or_else(|| abs::all(expr))
}
