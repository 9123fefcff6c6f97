use crate::parser::{
    ast::{expr::Expr, unary::Unary},
    error::Error,
    token::op::{BinOp, BinOpKind},
    Associativity,
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Builds the node `lhs op rhs`.
    pub(crate) fn join(lhs: Expr, op: BinOp, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Self {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        })
    }

    /// After parsing the left-hand-side of a potential binary expression, parse ahead to see if
    /// there is a binary operator with at least the precedence `min`, and if so, parse its
    /// right-hand-side.
    ///
    /// This is precedence climbing: the right-hand-side of an operator is itself completed with
    /// every following operator that binds tighter (or, for right-associative operators, equally
    /// tight). Once an operator with lower precedence is found, the expression built so far is
    /// returned to the caller, which will pick the operator up.
    ///
    /// Implicit multiplication is handled here too. If no operator follows, but the next token
    /// begins an operand (`2x`, `x(x + 1)`, `(x)(y)`), we act as if a multiplication operator was
    /// written between the two, as long as multiplication is allowed at precedence `min`.
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, min: Precedence) -> Result<Expr, Error> {
        loop {
            let Some(token) = input.peek_token() else { break };
            let token_kind = token.kind;

            if let Some(kind) = BinOpKind::from_token(token_kind) {
                let precedence = kind.precedence();
                if precedence < min {
                    break;
                }

                let token = input.next_token()?;
                let op = BinOp { kind, implicit: false, span: token.span };

                let rhs = Unary::parse_or_lower(input)?;
                let rhs_min = match op.associativity() {
                    Associativity::Left => precedence.next(),
                    Associativity::Right => precedence,
                };
                let rhs = Self::parse_expr(input, rhs, rhs_min)?;
                lhs = Self::join(lhs, op, rhs);
            } else if token_kind.starts_operand() && Precedence::Factor >= min {
                let rhs = Expr::parse_operand(input)?;
                let rhs = Self::parse_expr(input, rhs, Precedence::Factor.next())?;
                let op = BinOp {
                    kind: BinOpKind::Mul,
                    implicit: true,
                    span: lhs.span().end..rhs.span().start,
                };
                lhs = Self::join(lhs, op, rhs);
            } else {
                break;
            }
        }

        Ok(lhs)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.lhs, self.op, self.rhs)
    }
}
