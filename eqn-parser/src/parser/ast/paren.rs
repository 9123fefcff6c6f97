use crate::{
    parser::{ast::expr::Expr, error::{kind, Error}, Parse, Parser},
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression. A [`Paren`] can only contain a single expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this expression was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression, removing every redundant layer of parentheses.
    pub fn innermost(&self) -> &Expr {
        let mut inner = &*self.expr;
        while let Expr::Paren(paren) = inner {
            inner = &*paren.expr;
        }
        inner
    }
}

/// Consumes the closing parenthesis matching the opening parenthesis at `open`.
fn expect_close(input: &mut Parser, open: &Range<usize>) -> Result<Range<usize>, Error> {
    match input.next_token() {
        Ok(token) if token.kind == TokenKind::CloseParen => Ok(token.span),
        Ok(token) => Err(Error::new(vec![token.span], kind::UnexpectedToken {
            expected: &[TokenKind::CloseParen],
            found: token.kind,
            lexeme: token.lexeme.to_string(),
        })),
        Err(_) => Err(Error::new(vec![open.clone()], kind::UnclosedParenthesis { opening: true })),
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open = input.next_token()?;
        if open.kind != TokenKind::OpenParen {
            return Err(Error::new(vec![open.span], kind::UnexpectedToken {
                expected: &[TokenKind::OpenParen],
                found: open.kind,
                lexeme: open.lexeme.to_string(),
            }));
        }

        if let Some(close) = input.peek_token().filter(|token| token.kind == TokenKind::CloseParen) {
            let span = open.span.start..close.span.end;
            return Err(Error::new(vec![span], kind::EmptyParenthesis));
        }

        let expr = input.try_parse::<Expr>()?;
        let close = expect_close(input, &open.span)?;

        Ok(Self {
            expr: Box::new(expr),
            span: open.span.start..close.end,
        })
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.expr)
    }
}
