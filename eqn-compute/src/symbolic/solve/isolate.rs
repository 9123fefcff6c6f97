//! Isolating a symbol by undoing the operations applied to it.
//!
//! To solve `2 sin(x) + 1 = 0`, the solver subtracts `1` from both sides, divides by `2`, and
//! takes the inverse sine, at which point `x` is alone on the left. Each step may produce more
//! than one candidate, like the two inverses of `sin` within one period.

use crate::cancel::CancelToken;
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{fraction::make_fraction, simplify},
};
use eqn_parser::namespace::{Const, Func};
use log::trace;
use super::{poly::binomial_roots, solve_zero, SolveError};

fn call(func: Func, arg: SymExpr) -> SymExpr {
    SymExpr::call(func, vec![arg])
}

fn pi() -> SymExpr {
    SymExpr::constant(Const::Pi)
}

/// Values of `base` that solve `base^exp = rhs`, where only `base` depends on the symbol.
fn invert_power(exp: &SymExpr, rhs: &SymExpr, token: &CancelToken) -> Result<Vec<SymExpr>, SolveError> {
    if let Some(n) = exp.as_small_integer() {
        return match (n.cmp(&0), rhs.is_zero()) {
            (std::cmp::Ordering::Greater, _) => binomial_roots(n, rhs, token),
            (_, true) => Ok(Vec::new()),
            _ => binomial_roots(n.saturating_neg(), &simplify(&rhs.clone().recip()), token),
        };
    }

    if let Some(e) = exp.as_number() {
        if rhs.is_zero() {
            return Ok(if e.cmp0().is_gt() { vec![SymExpr::zero()] } else { Vec::new() });
        }

        // principal root: base = rhs^(1/e); verification rejects the wrong branch
        let inverse = SymExpr::Primary(Primary::Number(e.clone().recip()));
        return Ok(vec![simplify(&SymExpr::pow(rhs.clone(), inverse))]);
    }

    Ok(vec![simplify(&SymExpr::pow(rhs.clone(), exp.clone().recip()))])
}

/// Values of `arg` that solve `func(arg) = rhs`.
fn invert_call(func: Func, rhs: SymExpr) -> Option<Vec<SymExpr>> {
    Some(match func {
        Func::Sin => vec![
            call(Func::Asin, rhs.clone()),
            pi() - call(Func::Asin, rhs),
        ],
        Func::Cos => vec![
            call(Func::Acos, rhs.clone()),
            SymExpr::num(2) * pi() - call(Func::Acos, rhs),
        ],
        Func::Tan => vec![call(Func::Atan, rhs)],
        Func::Asin => vec![call(Func::Sin, rhs)],
        Func::Acos => vec![call(Func::Cos, rhs)],
        Func::Atan => vec![call(Func::Tan, rhs)],
        Func::Log => vec![SymExpr::pow(SymExpr::constant(Const::E), rhs)],
        Func::Abs => vec![rhs.clone(), -rhs],
        Func::Exp | Func::Sqrt | Func::Cbrt => return None,
    })
}

/// Solves `lhs = rhs` for the symbol by isolating it, where only `lhs` depends on the symbol.
/// Candidates are not verified.
///
/// Returns [`SolveError::Unsupported`] if `lhs` depends on the symbol in more than one place in
/// a way that cannot be separated, such as `x + sin(x)`.
pub fn isolate(
    lhs: &SymExpr,
    rhs: SymExpr,
    symbol: &str,
    token: &CancelToken,
) -> Result<Vec<SymExpr>, SolveError> {
    SolveError::check(token)?;
    trace!("isolating {} = {}", lhs, rhs);

    if lhs.as_symbol() == Some(symbol) {
        return Ok(vec![simplify(&rhs)]);
    }

    let unsupported = || SolveError::unsupported(lhs, &rhs);
    let isolate_all = |lhs: &SymExpr, values: Vec<SymExpr>| -> Result<Vec<SymExpr>, SolveError> {
        let mut candidates = Vec::new();
        for value in values {
            candidates.extend(isolate(lhs, simplify(&value), symbol, token)?);
        }
        Ok(candidates)
    };

    match lhs {
        SymExpr::Add(terms) => {
            let (dependent, independent): (Vec<_>, Vec<_>) = terms.iter()
                .cloned()
                .partition(|term| term.contains_symbol(symbol));
            let [term] = dependent.as_slice() else {
                return Err(unsupported());
            };
            isolate(term, simplify(&(rhs.clone() - SymExpr::Add(independent))), symbol, token)
        },
        SymExpr::Mul(factors) => {
            let (dependent, independent): (Vec<_>, Vec<_>) = factors.iter()
                .cloned()
                .partition(|factor| factor.contains_symbol(symbol));
            if !independent.is_empty() {
                let lhs = SymExpr::Mul(dependent).downgrade();
                let rhs = simplify(&make_fraction(rhs.clone(), SymExpr::Mul(independent)));
                return isolate(&lhs, rhs, symbol, token);
            }

            if !rhs.is_zero() {
                return Err(unsupported());
            }

            // zero-product property
            let mut candidates = Vec::new();
            for factor in dependent {
                candidates.extend(solve_zero(&factor, symbol, token)?);
            }
            Ok(candidates)
        },
        SymExpr::Exp(base, exp) => match (base.contains_symbol(symbol), exp.contains_symbol(symbol)) {
            (true, false) => isolate_all(base, invert_power(exp, &rhs, token)?),
            (false, true) => {
                if rhs.is_zero() {
                    return Ok(Vec::new());
                }
                let value = if base.is_const(Const::E) {
                    call(Func::Log, rhs.clone())
                } else {
                    make_fraction(call(Func::Log, rhs.clone()), call(Func::Log, (**base).clone()))
                };
                isolate_all(exp, vec![value])
            },
            _ => Err(unsupported()),
        },
        SymExpr::Primary(Primary::Call(func, args)) => match args.as_slice() {
            [arg] => {
                let values = invert_call(*func, rhs.clone()).ok_or_else(unsupported)?;
                isolate_all(arg, values)
            },
            _ => Err(unsupported()),
        },
        _ => Err(unsupported()),
    }
}

#[cfg(test)]
mod tests {
    use eqn_parser::parser::{ast::expr::Expr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn isolated(lhs: &str, rhs: i32) -> Result<Vec<String>, SolveError> {
        let lhs: SymExpr = Parser::new(lhs).try_parse_full::<Expr>().unwrap().into();
        isolate(&simplify(&lhs), SymExpr::num(rhs), "x", &CancelToken::new())
            .map(|values| values.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn linear() {
        assert_eq!(isolated("3x + 1", 7), Ok(vec!["2".to_string()]));
    }

    #[test]
    fn inverse_sine() {
        assert_eq!(isolated("2sin(x)", 1), Ok(vec!["pi/6".to_string(), "5*pi/6".to_string()]));
    }

    #[test]
    fn exponential_with_base() {
        assert_eq!(isolated("3^x", 7), Ok(vec!["log(7)/log(3)".to_string()]));
    }

    #[test]
    fn huge_power_is_unsupported() {
        assert!(matches!(isolated("x^1000000000", 2), Err(SolveError::Unsupported(_))));
        assert!(matches!(isolated("x^-1000000000", 2), Err(SolveError::Unsupported(_))));
        assert_eq!(isolated("x^3", 8).unwrap()[0], "2");
    }

    #[test]
    fn inseparable() {
        assert!(matches!(isolated("x + sin(x)", 0), Err(SolveError::Unsupported(_))));
    }
}
