use crate::parser::{
    ast::{binary::Binary, expr::Expr},
    error::Error,
    token::op::{UnaryOp, UnaryOpKind},
    Parser,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary expression, such as `-x`. Unary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or an operand if there is no unary operator.
    ///
    /// The operand of a unary operator extends over any exponentiation that follows it, but not
    /// over multiplication, so `-x^2` is `-(x^2)` and `-2x` is `(-2)x`.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let Some(kind) = input.peek_token().and_then(|token| UnaryOpKind::from_token(token.kind)) else {
            return Expr::parse_operand(input);
        };

        let token = input.next_token()?;
        let op = UnaryOp { kind, span: token.span };
        let operand = Self::parse_or_lower(input)?;
        let operand = Binary::parse_expr(input, operand, op.precedence())?;
        let span = op.span.start..operand.span().end;

        Ok(Expr::Unary(Self {
            operand: Box::new(operand),
            op,
            span,
        }))
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.operand)
    }
}
