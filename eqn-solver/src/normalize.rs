//! Rewriting of sanitized input into the canonical grammar.
//!
//! Normalization runs in two passes:
//!
//! 1. The LaTeX pass expands the few macros that commonly show up when an equation is pasted
//! from a document (`\frac`, `\sqrt`, `\cdot`, ...), and drops delimiters and HTML entities.
//! 2. The ASCII pass tokenizes the result with the parser's own tokenizer, splits letter runs
//! with [`Namespace::split_name`], and writes the tokens back out with explicit `*` and `**`
//! operators and parenthesized function arguments.
//!
//! The result contains no whitespace, and normalizing it again gives the same string.
//!
//! [`Namespace::split_name`]: eqn_parser::namespace::Namespace::split_name

use eqn_parser::{
    namespace::{Entry, SAFE_NAMESPACE},
    tokenizer::{tokenize_complete, TokenKind},
};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// An HTML entity. The trailing `;` is optional, as the sanitizer has removed it already.
static ENTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"&([A-Za-z]+|#[0-9]+);?").expect("valid regex"));

/// Normalizes sanitized input into the canonical grammar.
pub fn normalize(clean: &str) -> String {
    let expanded = expand_latex(clean);
    let normalized = canonical_tokens(&expanded);
    debug!("normalized input: {}", normalized);
    normalized
}

/// Maps an HTML entity to the operator it stands for. Other entities are dropped.
fn entity(name: &str) -> &'static str {
    match name {
        "times" => "*",
        "divide" => "/",
        "minus" => "-",
        _ => "",
    }
}

/// Runs the LaTeX pass over the input.
fn expand_latex(text: &str) -> String {
    let text = ENTITY.replace_all(text, |caps: &regex::Captures| entity(&caps[1]));
    let text = text.replace('$', "");
    expand_macros(&text)
        .chars()
        .map(|c| match c {
            '{' => '(',
            '}' => ')',
            c => c,
        })
        .collect()
}

/// Splits off the next argument of a macro: a brace group, or else a single character.
/// Returns the argument and the text after it.
fn group(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    let mut chars = text.char_indices();

    match chars.next() {
        Some((_, '{')) => {
            let mut depth = 0usize;
            for (i, c) in text.char_indices() {
                match c {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            return (&text[1..i], &text[i + 1..]);
                        }
                    },
                    _ => (),
                }
            }
            (&text[1..], "")
        },
        Some((_, c)) => text.split_at(c.len_utf8()),
        None => ("", ""),
    }
}

/// Splits off the optional `[n]` argument of `\sqrt`.
fn optional_group(text: &str) -> (Option<&str>, &str) {
    let trimmed = text.trim_start();
    match trimmed.strip_prefix('[').and_then(|rest| rest.split_once(']')) {
        Some((index, rest)) => (Some(index), rest),
        None => (None, text),
    }
}

/// Expands the LaTeX macros of the text.
fn expand_macros(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if c != '\\' {
            out.push(c);
            rest = &rest[c.len_utf8()..];
            continue;
        }

        let after = &rest[1..];
        let name_len = after.bytes().take_while(u8::is_ascii_alphabetic).count();
        if name_len == 0 {
            // `\,` `\!` `\:` and escaped braces; a lone trailing backslash is dropped
            rest = match after.chars().next() {
                Some(c @ ('{' | '}' | '(' | ')')) => {
                    out.push(c);
                    &after[1..]
                },
                Some(c) => &after[c.len_utf8()..],
                None => "",
            };
            continue;
        }

        let name = &after[..name_len];
        rest = &after[name_len..];

        match name {
            "frac" | "dfrac" | "tfrac" => {
                let (numer, tail) = group(rest);
                let (denom, tail) = group(tail);
                out.push_str(&format!("(({})/({}))", expand_macros(numer), expand_macros(denom)));
                rest = tail;
            },
            "sqrt" => {
                let (index, tail) = optional_group(rest);
                let (radicand, tail) = group(tail);
                let radicand = expand_macros(radicand);
                match index {
                    Some(index) => out.push_str(&format!("(({})**(1/({})))", radicand, expand_macros(index))),
                    None => out.push_str(&format!("sqrt({})", radicand)),
                }
                rest = tail;
            },
            "left" | "right" | "quad" | "qquad" => (),
            "cdot" | "times" | "ast" => out.push('*'),
            "div" => out.push('/'),
            "ln" | "log" => out.push_str("log"),
            "pi" => out.push_str("pi"),
            "infty" => out.push_str("oo"),
            name => out.push_str(name),
        }
    }

    out
}

/// The role of a piece of the canonical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    Number,
    Symbol,
    Const,
    Func,
    Power,
    Sign,
    Open,
    Close,
    Operator,
}

impl Piece {
    /// Returns true if an operand can end with this piece.
    fn ends_operand(self) -> bool {
        matches!(self, Self::Number | Self::Symbol | Self::Const | Self::Close)
    }

    /// Returns true if an operand can start with this piece.
    fn starts_operand(self) -> bool {
        matches!(self, Self::Number | Self::Symbol | Self::Const | Self::Func | Self::Open)
    }

    /// Returns true if the piece is a bare atom.
    fn is_atom(self) -> bool {
        matches!(self, Self::Number | Self::Symbol | Self::Const)
    }
}

/// Writes pieces into canonical form, inserting `*` between adjacent operands and parentheses
/// around the argument of a function applied without them.
#[derive(Debug, Default)]
struct Writer {
    out: String,
    pieces: Vec<Piece>,

    /// Current parenthesis depth.
    depth: usize,

    /// Depths of the parentheses opened around implicit function arguments.
    pending: Vec<usize>,
}

impl Writer {
    fn last(&self) -> Option<Piece> {
        self.pieces.last().copied()
    }

    /// Returns true if the output ends with a function raised to a power, as in `sin**2`.
    fn after_func_power(&self) -> bool {
        matches!(
            self.pieces.as_slice(),
            [.., Piece::Func, Piece::Power, atom] if atom.is_atom()
        )
    }

    fn emit(&mut self, piece: Piece, text: &str) {
        match piece {
            Piece::Open => self.depth += 1,
            Piece::Close => self.depth = self.depth.saturating_sub(1),
            _ => (),
        }
        self.out.push_str(text);
        self.pieces.push(piece);
    }

    /// Closes the implicit function arguments that end before the given piece.
    fn close_arguments(&mut self, next: Piece) {
        while self.pending.last() == Some(&self.depth)
            && self.last().map_or(false, Piece::ends_operand)
            && next != Piece::Power
        {
            self.pending.pop();
            self.emit(Piece::Close, ")");
        }
    }

    fn push(&mut self, piece: Piece, text: &str) {
        self.close_arguments(piece);

        let after_func = self.last() == Some(Piece::Func);
        if after_func || self.after_func_power() {
            // a sign after `sin**2` is left for the parser to reject
            let opens = piece.starts_operand() || (after_func && piece == Piece::Sign);
            if piece != Piece::Open && opens {
                self.emit(Piece::Open, "(");
                self.pending.push(self.depth);
            }
        } else if self.last().map_or(false, Piece::ends_operand) && piece.starts_operand() {
            self.emit(Piece::Operator, "*");
        }

        self.emit(piece, text);
    }

    fn finish(mut self) -> String {
        while self.pending.pop().is_some() {
            self.emit(Piece::Close, ")");
        }
        self.out
    }
}

/// Runs the ASCII pass over the input.
fn canonical_tokens(text: &str) -> String {
    let mut writer = Writer::default();

    for token in tokenize_complete(text, &SAFE_NAMESPACE).iter() {
        let piece = match token.kind {
            TokenKind::Whitespace => continue,
            TokenKind::Int | TokenKind::Float => Piece::Number,
            TokenKind::Name => match SAFE_NAMESPACE.lookup(token.lexeme) {
                Some(Entry::Func(_)) => Piece::Func,
                Some(Entry::Const(_)) => Piece::Const,
                None => Piece::Symbol,
            },
            TokenKind::Pow | TokenKind::Exp => {
                writer.push(Piece::Power, "**");
                continue;
            },
            TokenKind::Add | TokenKind::Sub => Piece::Sign,
            TokenKind::OpenParen => Piece::Open,
            TokenKind::CloseParen => Piece::Close,
            TokenKind::Mul | TokenKind::Div | TokenKind::Eq | TokenKind::Comma | TokenKind::Symbol => {
                Piece::Operator
            },
        };
        writer.push(piece, token.lexeme);
    }

    writer.finish()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn implicit_multiplication() {
        assert_eq!(normalize("2x"), "2*x");
        assert_eq!(normalize("xy"), "x*y");
        assert_eq!(normalize("2 x"), "2*x");
        assert_eq!(normalize("2(x+1)"), "2*(x+1)");
        assert_eq!(normalize("(x+1)(x-1)"), "(x+1)*(x-1)");
        assert_eq!(normalize("x(x+1)"), "x*(x+1)");
        assert_eq!(normalize("2pi r"), "2*pi*r");
        assert_eq!(normalize("2.5x"), "2.5*x");
    }

    #[test]
    fn carets_become_powers() {
        assert_eq!(normalize("x^2 - 4 = 0"), "x**2-4=0");
        assert_eq!(normalize("2^x=32"), "2**x=32");
        assert_eq!(normalize("x^-1"), "x**-1");
    }

    #[test]
    fn names_are_matched_whole() {
        assert_eq!(normalize("xsinx"), "x*sin(x)");
        assert_eq!(normalize("asin(x)"), "asin(x)");
        assert_eq!(normalize("expx"), "exp(x)");
        assert_eq!(normalize("ex"), "e*x");
    }

    #[test]
    fn implicit_application() {
        assert_eq!(normalize("sqrtx = 3"), "sqrt(x)=3");
        assert_eq!(normalize("sqrt x = 3"), "sqrt(x)=3");
        assert_eq!(normalize("sin 2"), "sin(2)");
        assert_eq!(normalize("sin x + 1"), "sin(x)+1");
        assert_eq!(normalize("2sin x cos x"), "2*sin(x)*cos(x)");
        assert_eq!(normalize("sin cos x"), "sin(cos(x))");
        assert_eq!(normalize("sin -x"), "sin(-x)");
        assert_eq!(normalize("(sin x)"), "(sin(x))");
        assert_eq!(normalize("sqrt x^2"), "sqrt(x**2)");
    }

    #[test]
    fn function_powers() {
        assert_eq!(normalize("sin^2(x) + cos^2(x)"), "sin**2(x)+cos**2(x)");
        assert_eq!(normalize("sin^2 x"), "sin**2(x)");

        // no argument to wrap
        assert_eq!(normalize("sin^2 + 1"), "sin**2+1");
        assert_eq!(normalize("cos^2 -x"), "cos**2-x");
    }

    #[test]
    fn exponent_notation_is_not_special() {
        assert_eq!(normalize("2e3"), "2*e*3");
        assert_eq!(normalize("1e-3"), "1*e-3");
    }

    #[test]
    fn latex_macros() {
        assert_eq!(normalize(r"\frac{x}{2}=3"), "((x)/(2))=3");
        assert_eq!(normalize(r"\frac{\sqrt{x}}{2}"), "((sqrt(x))/(2))");
        assert_eq!(normalize(r"\sqrt{x+1}"), "sqrt(x+1)");
        assert_eq!(normalize(r"\sqrt[3]{x}"), "((x)**(1/(3)))");
        assert_eq!(normalize(r"$$x^{2}$$"), "x**(2)");
        assert_eq!(normalize(r"2\cdot x \times 3 \div 4"), "2*x*3/4");
        assert_eq!(normalize(r"\ln x"), "log(x)");
        assert_eq!(normalize(r"\left( x \right)"), "(x)");
        assert_eq!(normalize(r"\sin\pi"), "sin(pi)");
        assert_eq!(normalize(r"x\,y"), "x*y");
        assert_eq!(normalize(r"\infty"), "oo");
        assert_eq!(normalize(r"\frac12"), "((1)/(2))");
    }

    #[test]
    fn html_entities() {
        assert_eq!(normalize("2 &times x &minus 1 &nbsp"), "2*x-1");
        assert_eq!(normalize("6 &divide; 3"), "6/3");
    }

    #[test]
    fn idempotent_on_canonical_input() {
        for input in [
            "x**2-4=0",
            "2*x+1",
            "sin(x)=1/2",
            "sqrt(x)=3",
            "sin**2(x)+cos**2(x)=1",
            "log(8,2)",
            "((x)/(2))=3",
            "(x+1)*(x-1)",
            "2**x=32",
            "x**-1",
        ] {
            assert_eq!(normalize(input), input);
        }

        for input in ["2x sin x", r"\frac{x}{2}", "sqrt x^2 = 4", "sin cos x"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }
}
