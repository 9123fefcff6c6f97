use crate::symbolic::expr::{Primary, SymExpr};
use eqn_parser::namespace::{Const, Func};
use std::fmt::{Formatter, Result};
use super::{float_to_string, negated_exponent, print_order, Latex, Term};

fn latex(expr: &impl Latex) -> String {
    expr.as_display().to_string()
}

/// Writes a call, optionally raised to a power: `\sin^{2}{\left(x \right)}`.
fn fmt_call(f: &mut Formatter, func: Func, args: &[SymExpr], power: Option<&SymExpr>) -> Result {
    let args = args.iter().map(latex).collect::<Vec<_>>().join(", ");
    let power = power.map(|p| format!("^{{{}}}", latex(p))).unwrap_or_default();

    match func {
        Func::Abs => write!(f, "\\left|{{{}}}\\right|{}", args, power),
        Func::Sin | Func::Cos | Func::Tan | Func::Log | Func::Exp => {
            write!(f, "\\{}{}{{\\left({} \\right)}}", func.name(), power, args)
        },
        _ => write!(f, "\\operatorname{{{}}}{}{{\\left({} \\right)}}", func.name(), power, args),
    }
}

impl Latex for Primary {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Number(n) if n.is_integer() => write!(f, "{}", n),
            Self::Number(n) => {
                if n.cmp0().is_lt() {
                    write!(f, "- ")?;
                }
                write!(f, "\\frac{{{}}}{{{}}}", n.numer().clone().abs(), n.denom())
            },
            Self::Float(value) => write!(f, "{}", float_to_string(value)),
            Self::Symbol(name) => write!(f, "{}", name),
            Self::Const(Const::Pi) => write!(f, "\\pi"),
            Self::Const(Const::E) => write!(f, "e"),
            Self::Const(Const::I) => write!(f, "i"),
            Self::Const(Const::Infinity) => write!(f, "\\infty"),
            Self::Call(func, args) => fmt_call(f, *func, args, None),
        }
    }
}

/// A factor of a product. Sums are parenthesized unless they are the only factor.
fn factor_latex(factor: &SymExpr, alone: bool) -> String {
    match factor {
        SymExpr::Add(_) if !alone => format!("\\left({}\\right)", latex(factor)),
        factor => latex(factor),
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
    let alone = numer.is_empty() && term.numer.len() == 1;
    numer.extend(term.numer.iter().map(|factor| factor_latex(factor, alone)));
    let numer = if numer.is_empty() { "1".to_string() } else { numer.join(" ") };

    let mut denom = Vec::new();
    if let Some(d) = term.denom_coeff() {
        denom.push(d.to_string());
    }
    let alone = denom.is_empty() && term.denom.len() == 1;
    denom.extend(term.denom.iter().map(|factor| factor_latex(factor, alone)));

    if denom.is_empty() {
        numer
    } else {
        format!("\\frac{{{}}}{{{}}}", numer, denom.join(" "))
    }
}

/// The sign in front of a term at the start of an expression. Plain integers and floats take a
/// tight minus: `-3`, but `- x`.
fn leading_sign(expr: &SymExpr) -> &'static str {
    match expr {
        SymExpr::Primary(Primary::Number(n)) if n.is_integer() => "-",
        SymExpr::Primary(Primary::Float(_)) => "-",
        _ => "- ",
    }
}

/// Returns true if the base of a power needs parentheses.
fn needs_parens(base: &SymExpr) -> bool {
    match base {
        SymExpr::Primary(Primary::Number(n)) => !n.is_integer() || n.cmp0().is_lt(),
        SymExpr::Primary(Primary::Float(value)) => value.is_sign_negative(),
        SymExpr::Primary(_) => false,
        _ => true,
    }
}

fn fmt_pow(f: &mut Formatter, base: &SymExpr, exp: &SymExpr) -> Result {
    if let Some(e) = exp.as_number() {
        if *e.numer() == 1 && *e.denom() == 2 {
            return write!(f, "\\sqrt{{{}}}", latex(base));
        }
        if *e.numer() == 1 && *e.denom() > 2 {
            return write!(f, "\\sqrt[{}]{{{}}}", e.denom(), latex(base));
        }
    }

    if base.is_const(Const::E) {
        return write!(f, "e^{{{}}}", latex(exp));
    }

    if let SymExpr::Primary(Primary::Call(func, args)) = base {
        if exp.as_small_integer().map_or(false, |n| n > 0) {
            return fmt_call(f, *func, args, Some(exp));
        }
    }

    if needs_parens(base) {
        write!(f, "\\left({}\\right)^{{{}}}", latex(base), latex(exp))
    } else {
        write!(f, "{}^{{{}}}", latex(base), latex(exp))
    }
}

impl Latex for SymExpr {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Primary(primary) => primary.fmt_latex(f),
            Self::Add(terms) if terms.is_empty() => write!(f, "0"),
            Self::Add(terms) => {
                for (i, expr) in print_order(terms).into_iter().enumerate() {
                    let term = Term::new(expr);
                    match (i, term.negative) {
                        (0, true) => write!(f, "{}", leading_sign(expr))?,
                        (0, false) => (),
                        (_, true) => write!(f, " - ")?,
                        (_, false) => write!(f, " + ")?,
                    }
                    write!(f, "{}", unsigned(&term))?;
                }
                Ok(())
            },
            Self::Exp(base, exp) if negated_exponent(exp).is_none() => fmt_pow(f, base, exp),
            Self::Mul(_) | Self::Exp(..) => {
                let term = Term::new(self);
                if term.negative {
                    write!(f, "{}", leading_sign(self))?;
                }
                write!(f, "{}", unsigned(&term))
            },
        }
    }
}
