use crate::{
    namespace::Func,
    parser::{
        ast::{binary::Binary, expr::Expr, unary::Unary},
        error::{kind, Error},
        token::op::{BinOp, BinOpKind},
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A function call, such as `sin(x)` or `log(8, 2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The function being called.
    pub func: Func,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the function name.
    pub name_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a parenthesized, comma-separated argument list. Returns the arguments and the end
    /// of the closing parenthesis.
    fn parse_args(input: &mut Parser) -> Result<(Vec<Expr>, usize), Error> {
        let open = input.next_token()?;
        let mut args = Vec::new();

        if let Some(close) = input.peek_token().filter(|token| token.kind == TokenKind::CloseParen) {
            let end = close.span.end;
            input.next_token()?;
            return Ok((args, end));
        }

        loop {
            args.push(input.try_parse::<Expr>()?);

            match input.next_token() {
                Ok(token) if token.kind == TokenKind::Comma => continue,
                Ok(token) if token.kind == TokenKind::CloseParen => return Ok((args, token.span.end)),
                Ok(token) => return Err(Error::new(vec![token.span], kind::UnexpectedToken {
                    expected: &[TokenKind::Comma, TokenKind::CloseParen],
                    found: token.kind,
                    lexeme: token.lexeme.to_string(),
                })),
                Err(_) => return Err(Error::new(vec![open.span], kind::UnclosedParenthesis { opening: true })),
            }
        }
    }

    /// Parses the rest of a function call, after its name has been consumed.
    ///
    /// Three forms are accepted:
    ///
    /// - `sin(x)`: the usual call syntax, with comma-separated arguments.
    /// - `sin x`: implicit application; the argument extends over exponentiation, so `sqrt x^2`
    /// is `sqrt(x^2)`.
    /// - `sin^2(x)` or `sin^2 x`: function exponentiation, meaning `sin(x)^2`.
    pub(crate) fn parse_after_name(
        input: &mut Parser,
        func: Func,
        name_span: Range<usize>,
    ) -> Result<Expr, Error> {
        let power = match input.peek_token() {
            Some(token) if token.kind.is_power() => {
                let token = input.next_token()?;
                let exponent = Unary::parse_or_lower(input)?;
                let exponent = Binary::parse_expr(input, exponent, Precedence::Exp)?;
                Some((BinOp { kind: BinOpKind::Exp, implicit: false, span: token.span }, exponent))
            },
            _ => None,
        };

        let (args, end) = match input.peek_token() {
            Some(token) if token.kind == TokenKind::OpenParen => Self::parse_args(input)?,

            // `sin^2 + 1` is missing its argument; the sign is not one
            Some(token) if power.is_some() && matches!(token.kind, TokenKind::Add | TokenKind::Sub) => {
                let token = input.next_token()?;
                return Err(Error::new(vec![token.span], kind::UnexpectedToken {
                    expected: &[TokenKind::OpenParen, TokenKind::Name],
                    found: token.kind,
                    lexeme: token.lexeme.to_string(),
                }));
            },
            _ => {
                let arg = Unary::parse_or_lower(input)?;
                let arg = Binary::parse_expr(input, arg, Precedence::Neg)?;
                let end = arg.span().end;
                (vec![arg], end)
            },
        };

        let span = name_span.start..end;
        if !func.arity().contains(&args.len()) {
            return Err(Error::new(vec![span], kind::WrongArgumentCount {
                name: func.name(),
                expected: func.arity_str(),
                given: args.len(),
            }));
        }

        let call = Expr::Call(Self { func, args, span, name_span });
        Ok(match power {
            Some((op, exponent)) => Binary::join(call, op, exponent),
            None => call,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.func)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}
