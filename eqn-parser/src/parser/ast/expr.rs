use crate::{
    namespace::Entry,
    parser::{
        ast::{
            binary::Binary,
            call::Call,
            literal::{Literal, LitConst, LitNum, LitSym},
            paren::Paren,
            unary::Unary,
        },
        error::{kind, Error},
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents any expression of the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    Literal(Literal),
    Paren(Paren),
    Call(Call),
    Unary(Unary),
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// If this expression is an [`Expr::Paren`], returns the innermost expression in the
    /// parenthesized expression. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        match self {
            Expr::Paren(paren) => paren.innermost(),
            expr => expr,
        }
    }

    /// Parses an operand: a number, a name, or a parenthesized expression. A function name is
    /// parsed together with its arguments.
    pub fn parse_operand(input: &mut Parser) -> Result<Expr, Error> {
        if input.peek_token().map_or(false, |token| token.kind == TokenKind::OpenParen) {
            return input.try_parse::<Paren>().map(Expr::Paren);
        }

        let token = input.next_token()?;
        match token.kind {
            TokenKind::Int | TokenKind::Float => Ok(Expr::Literal(Literal::Number(LitNum {
                value: token.lexeme.to_string(),
                span: token.span,
            }))),
            TokenKind::Name => match input.namespace().lookup(token.lexeme) {
                Some(Entry::Const(constant)) => Ok(Expr::Literal(Literal::Const(LitConst {
                    constant,
                    span: token.span,
                }))),
                Some(Entry::Func(func)) => Call::parse_after_name(input, func, token.span),
                None => Ok(Expr::Literal(Literal::Symbol(LitSym {
                    name: token.lexeme.to_string(),
                    span: token.span,
                }))),
            },
            _ => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[TokenKind::Int, TokenKind::Float, TokenKind::Name, TokenKind::OpenParen],
                found: token.kind,
                lexeme: token.lexeme.to_string(),
            })),
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if let Some(token) = input.peek_token().filter(|token| token.kind == TokenKind::CloseParen) {
            return Err(Error::new(vec![token.span.clone()], kind::UnclosedParenthesis { opening: false }));
        }

        let lhs = Unary::parse_or_lower(input)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}
