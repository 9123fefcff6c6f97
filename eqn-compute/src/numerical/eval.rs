use crate::primitive::{complex, euler, pi};
use crate::symbolic::expr::{Primary, SymExpr};
use eqn_error::Error;
use eqn_parser::namespace::{Const, Func};
use rug::{ops::Pow, Complex};
use super::error::{FreeSymbol, NonFinite};

/// Returns true if both parts of the number are finite.
pub fn is_finite(value: &Complex) -> bool {
    value.real().is_finite() && value.imag().is_finite()
}

/// Fails with [`NonFinite`] if the value is not finite.
fn finite(value: Complex) -> Result<Complex, Error> {
    if is_finite(&value) {
        Ok(value)
    } else {
        Err(Error::spanless(NonFinite))
    }
}

fn eval_call(func: Func, args: &[SymExpr]) -> Result<Complex, Error> {
    let mut values = args.iter().map(eval_node);
    let arg = values.next().ok_or_else(|| Error::spanless(NonFinite))??;

    let value = match func {
        Func::Sin => arg.sin(),
        Func::Cos => arg.cos(),
        Func::Tan => arg.tan(),
        Func::Asin => arg.asin(),
        Func::Acos => arg.acos(),
        Func::Atan => arg.atan(),
        Func::Log => {
            if arg.is_zero() {
                return Err(Error::spanless(NonFinite));
            }
            match values.next() {
                Some(base) => arg.ln() / base?.ln(),
                None => arg.ln(),
            }
        },
        Func::Exp => arg.exp(),
        Func::Sqrt => arg.sqrt(),
        Func::Cbrt => arg.pow(complex((1, 0)) / 3u32),
        Func::Abs => arg.abs(),
    };
    finite(value)
}

fn eval_power(base: &SymExpr, exp: &SymExpr) -> Result<Complex, Error> {
    let base_value = eval_node(base)?;

    if let Some(n) = exp.as_small_integer().and_then(|n| i32::try_from(n).ok()) {
        if base_value.is_zero() && n < 0 {
            return Err(Error::spanless(NonFinite));
        }
        return finite(base_value.pow(n));
    }

    let exp_value = eval_node(exp)?;
    if base_value.is_zero() {
        return if exp_value.real().is_sign_positive() && !exp_value.real().is_zero() {
            Ok(complex(0))
        } else {
            Err(Error::spanless(NonFinite))
        };
    }
    finite(base_value.pow(&exp_value))
}

fn eval_node(expr: &SymExpr) -> Result<Complex, Error> {
    match expr {
        SymExpr::Primary(primary) => match primary {
            Primary::Number(n) => Ok(complex(n)),
            Primary::Float(f) => Ok(complex(f)),
            Primary::Symbol(name) => Err(Error::spanless(FreeSymbol { name: name.clone() })),
            Primary::Const(Const::Pi) => Ok(complex(pi())),
            Primary::Const(Const::E) => Ok(complex(euler())),
            Primary::Const(Const::I) => Ok(complex((0, 1))),
            Primary::Const(Const::Infinity) => Err(Error::spanless(NonFinite)),
            Primary::Call(func, args) => eval_call(*func, args),
        },
        SymExpr::Add(terms) => {
            let mut sum = complex(0);
            for term in terms {
                sum += eval_node(term)?;
            }
            finite(sum)
        },
        SymExpr::Mul(factors) => {
            let mut product = complex(1);
            for factor in factors {
                product *= eval_node(factor)?;
            }
            finite(product)
        },
        SymExpr::Exp(base, exp) => eval_power(base, exp),
    }
}

/// Evaluates the expression to a complex number at [`PRECISION`](crate::primitive::PRECISION)
/// bits.
///
/// Powers use the principal branch, so `(-8)^(1/3)` is not `-2`. Fails with [`FreeSymbol`] if
/// the expression contains a symbol, and with [`NonFinite`] if any part of it is infinite or
/// undefined.
pub fn eval(expr: &SymExpr) -> Result<Complex, Error> {
    eval_node(expr)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use eqn_parser::parser::{ast::expr::Expr, Parser};
    use super::*;

    fn eval_str(input: &str) -> Result<Complex, Error> {
        let expr = Parser::new(input).try_parse_full::<Expr>().unwrap();
        eval(&expr.into())
    }

    #[test]
    fn arithmetic() {
        let value = eval_str("1/2 + 3*4").unwrap();
        assert_float_absolute_eq!(value.real().to_f64(), 12.5);
        assert_float_absolute_eq!(value.imag().to_f64(), 0.0);
    }

    #[test]
    fn constants() {
        let value = eval_str("sin(pi/6)").unwrap();
        assert_float_absolute_eq!(value.real().to_f64(), 0.5);

        let value = eval_str("log(e^2)").unwrap();
        assert_float_absolute_eq!(value.real().to_f64(), 2.0);
    }

    #[test]
    fn imaginary() {
        let value = eval_str("sqrt(-4)").unwrap();
        assert_float_absolute_eq!(value.real().to_f64(), 0.0);
        assert_float_absolute_eq!(value.imag().to_f64(), 2.0);
    }

    #[test]
    fn free_symbol() {
        let err = eval_str("x + 1").unwrap_err();
        assert_eq!(err.downcast_ref::<FreeSymbol>(), Some(&FreeSymbol { name: "x".to_string() }));
    }

    #[test]
    fn division_by_zero() {
        assert!(eval_str("1/0").unwrap_err().is::<NonFinite>());
        assert!(eval_str("log(0)").unwrap_err().is::<NonFinite>());
        assert!(eval_str("oo").unwrap_err().is::<NonFinite>());
    }
}
