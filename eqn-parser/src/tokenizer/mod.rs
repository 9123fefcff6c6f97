pub mod token;

use crate::namespace::Namespace;
use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Every [`TokenKind::Name`] token is split into its parts with [`Namespace::split_name`], so
/// the resulting names are either entries of the namespace, or single letters.
pub fn tokenize_complete<'source>(input: &'source str, namespace: &Namespace) -> Box<[Token<'source>]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        // every character matches `Symbol`, so the lexer can never fail
        let Ok(kind) = result else { break };
        let span = lexer.span();
        let lexeme = lexer.slice();

        if kind == TokenKind::Name {
            for part in namespace.split_name(lexeme) {
                tokens.push(Token {
                    span: span.start + part.offset..span.start + part.offset + part.text.len(),
                    kind,
                    lexeme: part.text,
                });
            }
        } else {
            tokens.push(Token { span, kind, lexeme });
        }
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::namespace::SAFE_NAMESPACE;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<const N: usize>(input: &str, expected: [(TokenKind, &str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    /// Compares the complete, name-split token stream to the expected lexemes.
    fn compare_complete<const N: usize>(input: &str, expected: [(TokenKind, &str); N]) {
        let tokens = tokenize_complete(input, &SAFE_NAMESPACE)
            .iter()
            .map(|token| (token.kind, token.lexeme))
            .collect::<Vec<_>>();
        assert_eq!(tokens, expected.to_vec());
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "2"),
            ],
        );
    }

    #[test]
    fn power_operators() {
        compare_tokens(
            "x**2^3",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Pow, "**"),
                (TokenKind::Int, "2"),
                (TokenKind::Exp, "^"),
                (TokenKind::Int, "3"),
            ],
        );
    }

    #[test]
    fn floats() {
        compare_tokens(
            "0.5 .25 3.",
            [
                (TokenKind::Float, "0.5"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Float, ".25"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Float, "3."),
            ],
        );
    }

    #[test]
    fn unknown_characters() {
        compare_tokens(
            "x $ y",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "$"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "y"),
            ],
        );
    }

    #[test]
    fn split_names() {
        compare_complete(
            "xsinx",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Name, "sin"),
                (TokenKind::Name, "x"),
            ],
        );
    }

    #[test]
    fn split_name_spans() {
        let tokens = tokenize_complete("2 xy", &SAFE_NAMESPACE);
        let spans = tokens.iter().map(|token| token.span.clone()).collect::<Vec<_>>();
        assert_eq!(spans, vec![0..1, 1..2, 2..3, 3..4]);
    }
}
