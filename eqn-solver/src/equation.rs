//! Construction of an equation from normalized text.

use eqn_compute::{fmt::Latex, symbolic::{simplify, SymExpr}};
use eqn_error::Error;
use eqn_parser::{namespace::SAFE_NAMESPACE, parser::{ast::Expr, Parser}};
use log::debug;
use std::{collections::BTreeSet, fmt};
use crate::error::{bounded_detail, EmptyEquation, ParseError};

/// An equation `lhs = rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    /// The left-hand side.
    pub lhs: SymExpr,

    /// The right-hand side.
    pub rhs: SymExpr,

    /// The normalized text the equation was built from. Error spans point into this text.
    pub source: String,
}

impl Equation {
    /// Returns the names of the symbols on either side of the equation.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        let mut symbols = self.lhs.free_symbols();
        symbols.extend(self.rhs.free_symbols());
        symbols
    }

    /// Renders the equation as LaTeX, with both sides simplified.
    pub fn latex(&self) -> String {
        format!("{} = {}", simplify(&self.lhs).as_display(), simplify(&self.rhs).as_display())
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", simplify(&self.lhs), simplify(&self.rhs))
    }
}

/// Parses one side of the equation. `offset` is the position of the side in the full text.
fn parse_side(text: &str, offset: usize) -> Result<SymExpr, Error> {
    Parser::with_namespace(text, SAFE_NAMESPACE)
        .try_parse_full::<Expr>()
        .map(SymExpr::from)
        .map_err(|err| {
            let detail = bounded_detail(&err.message());
            let err = err.offset_spans(offset);
            Error::new(err.spans, ParseError { detail })
        })
}

/// Builds an equation from normalized text.
///
/// The text is split on its first `=`. Without one, the right-hand side is `0`.
pub fn build(normalized: &str) -> Result<Equation, Error> {
    let (lhs, rhs, rhs_offset) = match normalized.split_once('=') {
        Some((lhs, rhs)) => (lhs, rhs, lhs.len() + 1),
        None => (normalized, "0", normalized.len()),
    };

    if lhs.trim().is_empty() {
        return Err(Error::new(vec![0..normalized.len().min(1)], EmptyEquation));
    }

    let equation = Equation {
        lhs: parse_side(lhs, 0)?,
        rhs: parse_side(rhs, rhs_offset)?,
        source: normalized.to_string(),
    };
    debug!("built equation: {}", equation);
    Ok(equation)
}
