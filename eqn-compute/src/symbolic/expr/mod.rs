//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](eqn_parser::parser::ast::expr::Expr) type from `eqn_parser` is a recursive `enum`
//! that mirrors the source text. It's convenient for parsing, but not so much for algebraic
//! manipulation.
//!
//! This module defines [`SymExpr`], which **flattens** the tree into lists of terms and factors.
//! The expression `x + (y + z)` is a single [`SymExpr::Add`] node with _three_ children, and
//! subtraction and division disappear entirely: `a - b` is `a + (-1)*b`, and `a / b` is
//! `a * b^-1`.
//!
//! # Strict equality
//!
//! Two expressions are **strictly equal** if they have the same shape, where the terms of a sum
//! and the factors of a product may appear in any order. Strict equality is a subset of semantic
//! equality: `(x + 1)^2` and `x^2 + 2x + 1` are not strictly equal, but strictly equal
//! expressions are always semantically equal. The [`PartialEq`] implementation of [`SymExpr`]
//! is strict equality.

mod iter;

use crate::primitive::{rational, rational_from_decimal};
use eqn_parser::{
    namespace::{Const, Func},
    parser::{
        ast::{expr::Expr as AstExpr, literal::Literal},
        token::op::{BinOpKind, UnaryOpKind},
    },
};
use iter::ExprIter;
use rug::{Float, Rational};
use std::{collections::BTreeSet, ops::{Add, Div, Mul, Neg, Sub}};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Primary {
    /// An exact rational number, such as `2`, `-7`, or `1/2`.
    Number(Rational),

    /// An approximate number, produced only by numeric root finding.
    Float(Float),

    /// A variable, such as `x` or `y`.
    Symbol(String),

    /// A named constant, such as `pi`.
    Const(Const),

    /// A function call, such as `sin(x)`.
    Call(Func, Vec<SymExpr>),
}

impl PartialEq for Primary {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(lhs), Self::Number(rhs)) => lhs == rhs,
            (Self::Float(lhs), Self::Float(rhs)) => lhs == rhs,
            (Self::Symbol(lhs), Self::Symbol(rhs)) => lhs == rhs,
            (Self::Const(lhs), Self::Const(rhs)) => lhs == rhs,
            (Self::Call(lhs_func, lhs_args), Self::Call(rhs_func, rhs_args)) => {
                lhs_func == rhs_func && lhs_args == rhs_args
            },
            _ => false,
        }
    }
}

/// [`Eq`] is implemented manually to allow comparing [`Primary::Float`]s. The engine never
/// produces `NaN` floats.
impl Eq for Primary {}

/// A mathematical expression, flattened into sums, products and powers.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

/// Returns true if both lists hold strictly equal expressions, in any order.
fn same_multiset(lhs: &[SymExpr], rhs: &[SymExpr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut used = vec![false; rhs.len()];
    lhs.iter().all(|item| {
        let found = rhs.iter()
            .enumerate()
            .position(|(i, other)| !used[i] && item == other);
        match found {
            Some(i) => {
                used[i] = true;
                true
            },
            None => false,
        }
    })
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                same_multiset(lhs, rhs)
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

impl Eq for SymExpr {}

impl SymExpr {
    /// Creates an exact number.
    pub fn num<T>(n: T) -> Self
    where
        Rational: From<T>,
    {
        Self::Primary(Primary::Number(rational(n)))
    }

    /// The number zero.
    pub fn zero() -> Self {
        Self::num(0)
    }

    /// The number one.
    pub fn one() -> Self {
        Self::num(1)
    }

    /// Creates a symbol with the given name.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates a named constant.
    pub fn constant(constant: Const) -> Self {
        Self::Primary(Primary::Const(constant))
    }

    /// Creates a call to the given function.
    pub fn call(func: Func, args: Vec<SymExpr>) -> Self {
        Self::Primary(Primary::Call(func, args))
    }

    /// Creates the power `base^exp`. No simplification is done.
    pub fn pow(base: SymExpr, exp: SymExpr) -> Self {
        Self::Exp(Box::new(base), Box::new(exp))
    }

    /// Returns `1 / self`. No simplification is done.
    pub fn recip(self) -> Self {
        Self::pow(self, Self::num(-1))
    }

    /// Returns the principal square root of this expression. No simplification is done.
    pub fn sqrt(self) -> Self {
        Self::pow(self, Self::num((1, 2)))
    }

    /// If the expression is a [`Primary::Number`], returns a reference to the contained number.
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Self::Primary(Primary::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Number`] holding an integer, returns it as an `i64`.
    pub fn as_small_integer(&self) -> Option<i64> {
        self.as_number()
            .filter(|n| n.is_integer())
            .and_then(|n| n.numer().to_i64())
    }

    /// Returns true if the expression is an exact or approximate number.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Primary(Primary::Number(_) | Primary::Float(_)))
    }

    /// Returns true if the expression is the exact number zero.
    pub fn is_zero(&self) -> bool {
        self.as_number().map_or(false, |n| n.cmp0().is_eq())
    }

    /// Returns true if the expression is the exact number one.
    pub fn is_one(&self) -> bool {
        self.as_number().map_or(false, |n| *n == 1)
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// Returns true if the expression is the given constant.
    pub fn is_const(&self, constant: Const) -> bool {
        matches!(self, Self::Primary(Primary::Const(c)) if *c == constant)
    }

    /// If the expression is a call to a function with one argument, returns both.
    pub fn as_call(&self) -> Option<(Func, &SymExpr)> {
        match self {
            Self::Primary(Primary::Call(func, args)) if args.len() == 1 => Some((*func, &args[0])),
            _ => None,
        }
    }

    /// The terms of the expression: the children of an [`SymExpr::Add`], or the expression
    /// itself.
    pub fn terms(&self) -> &[SymExpr] {
        match self {
            Self::Add(terms) => terms,
            expr => std::slice::from_ref(expr),
        }
    }

    /// The factors of the expression: the children of an [`SymExpr::Mul`], or the expression
    /// itself.
    pub fn factors(&self) -> &[SymExpr] {
        match self {
            Self::Mul(factors) => factors,
            expr => std::slice::from_ref(expr),
        }
    }

    /// Splits the expression into its exact numeric coefficient and the remaining factors.
    ///
    /// `3x` is `(3, x)`, `x` is `(1, x)`, and `5` is `(5, 1)`.
    pub fn as_coeff_mul(&self) -> (Rational, SymExpr) {
        let mut coeff = rational(1);
        let mut rest = Vec::new();
        for factor in self.factors() {
            match factor.as_number() {
                Some(n) => coeff *= n,
                None => rest.push(factor.clone()),
            }
        }
        (coeff, Self::Mul(rest).downgrade())
    }

    /// Splits the expression into a base and an exponent. Anything that is not a power is its
    /// own base, with exponent one.
    pub fn as_base_exp(&self) -> (&SymExpr, SymExpr) {
        match self {
            Self::Exp(base, exp) => (base, (**exp).clone()),
            expr => (expr, Self::one()),
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`SymExpr::Add`] with zero / one term, or an
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or the number 0 or 1.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => match terms.len() {
                0 => Self::zero(),
                1 => terms.remove(0),
                _ => Self::Add(terms),
            },
            Self::Mul(mut factors) => match factors.len() {
                0 => Self::one(),
                1 => factors.remove(0),
                _ => Self::Mul(factors),
            },
            expr => expr,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first). Function arguments are not visited.
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns true if the expression contains an approximate number, including inside function
    /// arguments.
    pub fn is_approximate(&self) -> bool {
        self.post_order_iter().any(|expr| match expr {
            Self::Primary(Primary::Float(_)) => true,
            Self::Primary(Primary::Call(_, args)) => args.iter().any(SymExpr::is_approximate),
            _ => false,
        })
    }

    /// Returns true if the given symbol appears anywhere in the expression, including inside
    /// function arguments.
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.post_order_iter().any(|expr| match expr {
            Self::Primary(Primary::Symbol(sym)) => sym == name,
            Self::Primary(Primary::Call(_, args)) => args.iter().any(|arg| arg.contains_symbol(name)),
            _ => false,
        })
    }

    /// Returns the names of all symbols in the expression, sorted.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        let mut symbols = BTreeSet::new();
        for expr in self.post_order_iter() {
            match expr {
                Self::Primary(Primary::Symbol(sym)) => {
                    symbols.insert(sym.clone());
                },
                Self::Primary(Primary::Call(_, args)) => {
                    for arg in args {
                        symbols.extend(arg.free_symbols());
                    }
                },
                _ => (),
            }
        }
        symbols
    }

    /// Replaces every subexpression strictly equal to `from` with `to`. No simplification is
    /// done.
    pub fn substitute(&self, from: &SymExpr, to: &SymExpr) -> SymExpr {
        if self == from {
            return to.clone();
        }

        match self {
            Self::Primary(Primary::Call(func, args)) => Self::call(
                *func,
                args.iter().map(|arg| arg.substitute(from, to)).collect(),
            ),
            Self::Primary(primary) => Self::Primary(primary.clone()),
            Self::Add(terms) => Self::Add(terms.iter().map(|term| term.substitute(from, to)).collect()),
            Self::Mul(factors) => Self::Mul(factors.iter().map(|factor| factor.substitute(from, to)).collect()),
            Self::Exp(base, exp) => Self::pow(base.substitute(from, to), exp.substitute(from, to)),
        }
    }

    /// Returns the same expression with every child replaced by `f(child)`, including function
    /// arguments.
    pub fn map_children(&self, mut f: impl FnMut(&SymExpr) -> SymExpr) -> SymExpr {
        match self {
            Self::Primary(Primary::Call(func, args)) => Self::call(*func, args.iter().map(&mut f).collect()),
            Self::Primary(primary) => Self::Primary(primary.clone()),
            Self::Add(terms) => Self::Add(terms.iter().map(&mut f).collect()),
            Self::Mul(factors) => Self::Mul(factors.iter().map(&mut f).collect()),
            Self::Exp(base, exp) => Self::pow(f(&**base), f(&**exp)),
        }
    }
}

impl From<AstExpr> for SymExpr {
    fn from(expr: AstExpr) -> Self {
        match expr {
            AstExpr::Literal(literal) => match literal {
                Literal::Number(num) => Self::Primary(Primary::Number(rational_from_decimal(&num.value))),
                Literal::Symbol(sym) => Self::symbol(sym.name),
                Literal::Const(constant) => Self::constant(constant.constant),
            },
            AstExpr::Paren(paren) => Self::from(*paren.expr),
            AstExpr::Call(call) => {
                let mut args = call.args.into_iter().map(Self::from);
                match (call.func, args.next(), args.next()) {
                    (Func::Sqrt, Some(arg), None) => Self::pow(arg, Self::num((1, 2))),
                    (Func::Cbrt, Some(arg), None) => Self::pow(arg, Self::num((1, 3))),
                    (Func::Exp, Some(arg), None) => Self::pow(Self::constant(Const::E), arg),
                    // change of base: log_b(x) = log(x) / log(b)
                    (Func::Log, Some(arg), Some(base)) => {
                        Self::call(Func::Log, vec![arg]) * Self::call(Func::Log, vec![base]).recip()
                    },
                    (func, first, second) => Self::call(func, first.into_iter().chain(second).collect()),
                }
            },
            AstExpr::Unary(unary) => match unary.op.kind {
                UnaryOpKind::Neg => -Self::from(*unary.operand),
                UnaryOpKind::Pos => Self::from(*unary.operand),
            },
            AstExpr::Binary(bin) => {
                let lhs = Self::from(*bin.lhs);
                let rhs = Self::from(*bin.rhs);
                match bin.op.kind {
                    BinOpKind::Exp => Self::pow(lhs, rhs),
                    BinOpKind::Mul => lhs * rhs,
                    BinOpKind::Div => lhs / rhs,
                    BinOpKind::Add => lhs + rhs,
                    BinOpKind::Sub => lhs - rhs,
                }
            },
        }
    }
}

/// Adds two [`SymExpr`]s together. No simplification is done, except for flattening nested sums
/// into one list of terms.
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) => {
                terms.push(other);
                Self::Add(terms)
            },
            (other, Self::Add(mut terms)) => {
                terms.insert(0, other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, except for flattening nested
/// products into one list of factors.
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (other, Self::Mul(mut factors)) => {
                factors.insert(0, other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a number, in which case the number is negated.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Number(n)) => Self::Primary(Primary::Number(-n)),
            Self::Primary(Primary::Float(n)) => Self::Primary(Primary::Float(-n)),
            expr => Self::num(-1) * expr,
        }
    }
}

/// `a - b` is `a + (-1)*b`. No simplification is done.
impl Sub for SymExpr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + -rhs
    }
}

/// `a / b` is `a * b^-1`. No simplification is done.
impl Div for SymExpr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.recip()
    }
}

/// NOTE: strict equality allows different orderings of terms and factors, but
/// `pretty_assertions` does not, so the diff of a failing test can be misleading.
#[cfg(test)]
mod tests {
    use eqn_parser::parser::{ast::expr::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parse the given expression and return the [`SymExpr`] representation.
    fn parse_expr(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::from(expr)
    }

    #[test]
    fn strict_equality() {
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("(y - 5 + x) * 2");
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_counts_duplicates() {
        assert_ne!(parse_expr("x + x + y"), parse_expr("x + y + y"));
    }

    #[test]
    fn flatten_sum() {
        assert_eq!(parse_expr("x + (y + z)"), SymExpr::Add(vec![
            SymExpr::symbol("x"),
            SymExpr::symbol("y"),
            SymExpr::symbol("z"),
        ]));
    }

    #[test]
    fn subtraction_and_division() {
        assert_eq!(parse_expr("x - y"), SymExpr::Add(vec![
            SymExpr::symbol("x"),
            SymExpr::Mul(vec![SymExpr::num(-1), SymExpr::symbol("y")]),
        ]));
        assert_eq!(parse_expr("x / 2"), SymExpr::Mul(vec![
            SymExpr::symbol("x"),
            SymExpr::pow(SymExpr::num(2), SymExpr::num(-1)),
        ]));
    }

    #[test]
    fn decimals_are_rational() {
        assert_eq!(parse_expr("0.5"), SymExpr::num((1, 2)));
    }

    #[test]
    fn roots_become_powers() {
        assert_eq!(parse_expr("sqrt(x)"), SymExpr::pow(SymExpr::symbol("x"), SymExpr::num((1, 2))));
        assert_eq!(parse_expr("cbrt(x)"), SymExpr::pow(SymExpr::symbol("x"), SymExpr::num((1, 3))));
        assert_eq!(parse_expr("exp(x)"), SymExpr::pow(SymExpr::constant(Const::E), SymExpr::symbol("x")));
    }

    #[test]
    fn log_change_of_base() {
        assert_eq!(parse_expr("log(x, 2)"), SymExpr::Mul(vec![
            SymExpr::call(Func::Log, vec![SymExpr::symbol("x")]),
            SymExpr::call(Func::Log, vec![SymExpr::num(2)]).recip(),
        ]));
    }

    #[test]
    fn symbols() {
        let expr = parse_expr("y sin(x) + pi z");
        assert_eq!(
            expr.free_symbols().into_iter().collect::<Vec<_>>(),
            vec!["x".to_string(), "y".to_string(), "z".to_string()],
        );
        assert!(expr.contains_symbol("x"));
        assert!(!expr.contains_symbol("w"));
    }

    #[test]
    fn substitute_symbol() {
        let expr = parse_expr("x^2 + x");
        let replaced = expr.substitute(&SymExpr::symbol("x"), &SymExpr::num(3));
        assert_eq!(replaced, parse_expr("3^2 + 3"));
    }

    #[test]
    fn coefficient() {
        let (coeff, rest) = parse_expr("3x").as_coeff_mul();
        assert_eq!(coeff, 3);
        assert_eq!(rest, SymExpr::symbol("x"));
    }
}
