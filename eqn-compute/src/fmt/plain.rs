use crate::symbolic::expr::{Primary, SymExpr};
use eqn_parser::namespace::Const;
use std::fmt::{Display, Formatter, Result};
use super::{float_to_string, negated_exponent, print_order, Term};

impl Display for Primary {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Float(value) => write!(f, "{}", float_to_string(value)),
            Self::Symbol(name) => write!(f, "{}", name),
            Self::Const(constant) => write!(f, "{}", constant),
            Self::Call(func, args) => {
                let args = args.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "{}({})", func, args.join(", "))
            },
        }
    }
}

/// A factor of a product, in parentheses if it is a sum.
fn factor_string(factor: &SymExpr) -> String {
    match factor {
        SymExpr::Add(_) | SymExpr::Mul(_) => format!("({})", factor),
        factor => factor.to_string(),
    }
}

/// The term without its sign.
fn unsigned(term: &Term) -> String {
    let mut numer = Vec::new();
    if let Some(n) = term.numer_coeff() {
        numer.push(n.to_string());
    }
    if let Some(value) = &term.float {
        numer.push(float_to_string(value));
    }
    numer.extend(term.numer.iter().map(factor_string));
    let numer = if numer.is_empty() { "1".to_string() } else { numer.join("*") };

    let mut denom = Vec::new();
    if let Some(d) = term.denom_coeff() {
        denom.push(d.to_string());
    }
    denom.extend(term.denom.iter().map(factor_string));

    match denom.as_slice() {
        [] => numer,
        [single] => format!("{}/{}", numer, single),
        _ => format!("{}/({})", numer, denom.join("*")),
    }
}

/// A base or exponent of a power, in parentheses unless it is a symbol, constant, call, or
/// non-negative integer.
fn power_operand(expr: &SymExpr) -> String {
    let bare = match expr {
        SymExpr::Primary(Primary::Number(n)) => n.is_integer() && n.cmp0().is_ge(),
        SymExpr::Primary(Primary::Float(value)) => value.is_sign_positive(),
        SymExpr::Primary(_) => true,
        _ => false,
    };
    if bare {
        expr.to_string()
    } else {
        format!("({})", expr)
    }
}

impl Display for SymExpr {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Primary(primary) => primary.fmt(f),
            Self::Add(terms) if terms.is_empty() => write!(f, "0"),
            Self::Add(terms) => {
                for (i, term) in print_order(terms).into_iter().enumerate() {
                    let term = Term::new(term);
                    match (i, term.negative) {
                        (0, true) => write!(f, "-")?,
                        (0, false) => (),
                        (_, true) => write!(f, " - ")?,
                        (_, false) => write!(f, " + ")?,
                    }
                    write!(f, "{}", unsigned(&term))?;
                }
                Ok(())
            },
            Self::Exp(base, exp) if negated_exponent(exp).is_none() => {
                if exp.as_number().map_or(false, |e| *e.numer() == 1 && *e.denom() == 2) {
                    write!(f, "sqrt({})", base)
                } else if base.is_const(Const::E) {
                    write!(f, "exp({})", exp)
                } else {
                    write!(f, "{}**{}", power_operand(base), power_operand(exp))
                }
            },
            Self::Mul(_) | Self::Exp(..) => {
                let term = Term::new(self);
                if term.negative {
                    write!(f, "-")?;
                }
                write!(f, "{}", unsigned(&term))
            },
        }
    }
}
