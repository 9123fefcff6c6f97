//! Cleanup of raw user input.
//!
//! The sanitizer removes characters that never belong in an equation, replaces common unicode
//! math notation and a few English phrases with their ASCII spelling, and rejects anything that
//! is still not plain ASCII afterwards. Its output only contains printable ASCII, with every
//! power written with a caret `^`.

use eqn_error::Error;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use crate::error::{DisallowedCharacters, InputTooLong};

/// The opening of a fenced code block, with its language tag.
static CODE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```[A-Za-z]*").expect("valid regex"));

/// Characters removed from the input outright.
static STRIPPED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[;'"`]"#).expect("valid regex"));

/// Anything that looks like an HTML tag.
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

static SQUARE_ROOT_OF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bsquare\s+root\s+of\b").expect("valid regex"));
static CUBE_ROOT_OF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bcube\s+root\s+of\b").expect("valid regex"));

/// Unicode notation and its ASCII spelling.
const REPLACEMENTS: &[(char, &str)] = &[
    ('²', "^2"),
    ('³', "^3"),
    ('⁴', "^4"),
    ('⁵', "^5"),
    ('⁶', "^6"),
    ('⁷', "^7"),
    ('⁸', "^8"),
    ('⁹', "^9"),
    ('√', "sqrt"),
    ('∛', "cbrt"),
    ('∞', "oo"),
    ('π', "pi"),
    ('×', "*"),
    ('·', "*"),
    ('÷', "/"),
    ('−', "-"),
    ('‐', "-"),
    ('‑', "-"),
    ('‒', "-"),
    ('–', "-"),
    ('—', "-"),
    ('½', "1/2"),
    ('¼', "1/4"),
    ('¾', "3/4"),
];

/// Returns the ASCII spelling of a unicode math character, if it has one.
fn replacement(c: char) -> Option<&'static str> {
    REPLACEMENTS.iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

/// Sanitizes raw input, rejecting empty input and input longer than `max_len` characters.
pub fn sanitize(text: &str, max_len: usize) -> Result<String, Error> {
    if text.is_empty() || text.chars().count() > max_len {
        return Err(Error::spanless(InputTooLong { max_len }));
    }

    let text = CODE_FENCE.replace_all(text, "");
    let text = STRIPPED.replace_all(&text, "");
    let text = HTML_TAG.replace_all(&text, "");

    let mut replaced = String::with_capacity(text.len());
    for c in text.chars() {
        match replacement(c) {
            Some(ascii) => replaced.push_str(ascii),
            None if c.is_whitespace() => replaced.push(' '),
            None => replaced.push(c),
        }
    }

    let text = SQUARE_ROOT_OF.replace_all(&replaced, "sqrt");
    let text = CUBE_ROOT_OF.replace_all(&text, "cbrt");
    let text = text.replace("**", "^");
    let text = text.trim();

    let mut found = Vec::new();
    for c in text.chars() {
        if (!c.is_ascii() || c.is_ascii_control()) && !found.contains(&c) {
            found.push(c);
        }
    }
    if !found.is_empty() {
        return Err(Error::spanless(DisallowedCharacters { found }));
    }

    debug!("sanitized input: {}", text);
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn clean(text: &str) -> String {
        sanitize(text, 500).unwrap()
    }

    #[test]
    fn length_bound() {
        assert!(sanitize("", 500).unwrap_err().is::<InputTooLong>());
        assert!(sanitize(&"x".repeat(501), 500).unwrap_err().is::<InputTooLong>());
        assert_eq!(sanitize(&"x".repeat(500), 500).unwrap().len(), 500);

        // counted in characters, not bytes
        assert!(sanitize(&"π".repeat(10), 10).is_ok());
    }

    #[test]
    fn strips_quotes_and_tags() {
        assert_eq!(clean("x';\"=`1"), "x=1");
        assert_eq!(clean("<script>x</script>=2"), "x=2");
        assert_eq!(clean("<b>2x</b> = 4"), "2x = 4");
        assert_eq!(clean("```latex\nx = 1\n```"), "x = 1");
    }

    #[test]
    fn unicode_notation() {
        assert_eq!(clean("x² = 9"), "x^2 = 9");
        assert_eq!(clean("√x = 3"), "sqrtx = 3");
        assert_eq!(clean("2π × x ÷ 3 − 1"), "2pi * x / 3 - 1");
        assert_eq!(clean("x — ½ = ¾"), "x - 1/2 = 3/4");
        assert_eq!(clean("∛x = ∞"), "cbrtx = oo");
    }

    #[test]
    fn phrases() {
        assert_eq!(clean("square root of x = 3"), "sqrt x = 3");
        assert_eq!(clean("Cube   Root Of 27"), "cbrt 27");
        assert_eq!(clean("squareroot of x"), "squareroot of x");
    }

    #[test]
    fn power_becomes_caret() {
        assert_eq!(clean("x**2 = 4"), "x^2 = 4");
        assert_eq!(clean("x^2 = 4"), "x^2 = 4");
    }

    #[test]
    fn unicode_whitespace_and_trim() {
        assert_eq!(clean("\u{a0} x\u{2003}= 1\t"), "x = 1");
    }

    #[test]
    fn disallowed_characters() {
        let err = sanitize("∑x = 1 ∑ ∫", 500).unwrap_err();
        let kind = err.downcast_ref::<DisallowedCharacters>().unwrap();
        assert_eq!(kind.found, vec!['∑', '∫']);
    }
}
