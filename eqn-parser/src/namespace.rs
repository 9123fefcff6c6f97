//! The fixed table of functions and constants the parser recognizes.
//!
//! The table is immutable. It is handed to the [`Parser`](crate::parser::Parser) (and to the
//! textual normalizer in `eqn-solver`), so every consumer agrees on which letter runs are names
//! and which are products of single-letter symbols.

use std::{fmt, ops::RangeInclusive};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A function in the safe namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
    Exp,
    Sqrt,
    Cbrt,
    Abs,
}

impl Func {
    /// The canonical name of the function.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Log => "log",
            Self::Exp => "exp",
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Abs => "Abs",
        }
    }

    /// The number of arguments the function accepts. `log` optionally takes a base as its second
    /// argument.
    pub fn arity(self) -> RangeInclusive<usize> {
        match self {
            Self::Log => 1..=2,
            _ => 1..=1,
        }
    }

    /// Returns a human readable description of [`Func::arity`], used in error messages.
    pub fn arity_str(self) -> &'static str {
        match self {
            Self::Log => "1 or 2 arguments",
            _ => "1 argument",
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A constant in the safe namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Const {
    /// The circle constant, `pi`.
    Pi,

    /// Euler's number, `e`.
    E,

    /// Positive infinity, `oo`.
    Infinity,

    /// The imaginary unit, `I`.
    I,
}

impl Const {
    /// The canonical name of the constant.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
            Self::Infinity => "oo",
            Self::I => "I",
        }
    }
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An entry of a [`Namespace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Func(Func),
    Const(Const),
}

/// A piece of a letter run, produced by [`Namespace::split_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamePart<'a> {
    /// The byte offset of the part inside the letter run.
    pub offset: usize,

    /// The text of the part.
    pub text: &'a str,

    /// The namespace entry the part names, or [`None`] if it is a single-letter symbol.
    pub entry: Option<Entry>,
}

/// A table mapping names to functions and constants.
#[derive(Debug, Clone, Copy)]
pub struct Namespace {
    entries: &'static [(&'static str, Entry)],
}

impl Namespace {
    /// Creates a namespace from the given table of names.
    pub const fn new(entries: &'static [(&'static str, Entry)]) -> Self {
        Self { entries }
    }

    /// Returns the entry with exactly the given name.
    pub fn lookup(&self, name: &str) -> Option<Entry> {
        self.entries
            .iter()
            .find(|(entry_name, _)| *entry_name == name)
            .map(|(_, entry)| *entry)
    }

    /// Returns true if the given name is a function of this namespace.
    pub fn is_func(&self, name: &str) -> bool {
        matches!(self.lookup(name), Some(Entry::Func(_)))
    }

    /// Returns an iterator over all names in the namespace.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Returns the longest name of the namespace that is a prefix of the given text.
    fn longest_prefix(&self, text: &str) -> Option<(&'static str, Entry)> {
        self.entries
            .iter()
            .filter(|(name, _)| text.starts_with(name))
            .max_by_key(|(name, _)| name.len())
            .copied()
    }

    /// Splits a run of letters into namespace names and single-letter symbols.
    ///
    /// The run is scanned from left to right. At each position, the longest name of the
    /// namespace starting there is taken as a whole; if no name matches, the single letter at
    /// that position becomes a symbol. This is how `xsinx` becomes `x`, `sin`, `x`, and `xy`
    /// becomes `x`, `y`.
    pub fn split_name<'a>(&self, name: &'a str) -> Vec<NamePart<'a>> {
        let mut parts = Vec::new();
        let mut offset = 0;

        while offset < name.len() {
            let rest = &name[offset..];
            let (len, entry) = match self.longest_prefix(rest) {
                Some((entry_name, entry)) => (entry_name.len(), Some(entry)),
                None => (rest.chars().next().map_or(1, char::len_utf8), None),
            };

            parts.push(NamePart {
                offset,
                text: &rest[..len],
                entry,
            });
            offset += len;
        }

        parts
    }
}

/// The namespace of functions and constants that may appear in an equation.
///
/// `ln` is an alias of `log`. `sqrt` and `cbrt` become rational powers once the expression
/// reaches the symbolic engine.
pub const SAFE_NAMESPACE: Namespace = Namespace::new(&[
    ("sin", Entry::Func(Func::Sin)),
    ("cos", Entry::Func(Func::Cos)),
    ("tan", Entry::Func(Func::Tan)),
    ("asin", Entry::Func(Func::Asin)),
    ("acos", Entry::Func(Func::Acos)),
    ("atan", Entry::Func(Func::Atan)),
    ("log", Entry::Func(Func::Log)),
    ("ln", Entry::Func(Func::Log)),
    ("exp", Entry::Func(Func::Exp)),
    ("sqrt", Entry::Func(Func::Sqrt)),
    ("cbrt", Entry::Func(Func::Cbrt)),
    ("Abs", Entry::Func(Func::Abs)),
    ("pi", Entry::Const(Const::Pi)),
    ("e", Entry::Const(Const::E)),
    ("oo", Entry::Const(Const::Infinity)),
    ("I", Entry::Const(Const::I)),
]);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn texts(name: &str) -> Vec<&str> {
        SAFE_NAMESPACE.split_name(name).into_iter().map(|part| part.text).collect()
    }

    #[test]
    fn lookup_alias() {
        assert_eq!(SAFE_NAMESPACE.lookup("ln"), Some(Entry::Func(Func::Log)));
        assert_eq!(SAFE_NAMESPACE.lookup("pi"), Some(Entry::Const(Const::Pi)));
        assert_eq!(SAFE_NAMESPACE.lookup("x"), None);
    }

    #[test]
    fn split_unknown_letters() {
        assert_eq!(texts("xy"), vec!["x", "y"]);
    }

    #[test]
    fn split_prefers_longest_name() {
        assert_eq!(texts("asinx"), vec!["asin", "x"]);
        assert_eq!(texts("xsinx"), vec!["x", "sin", "x"]);
        assert_eq!(texts("sqrtx"), vec!["sqrt", "x"]);
    }

    #[test]
    fn split_constants() {
        let parts = SAFE_NAMESPACE.split_name("pix");
        assert_eq!(parts[0].entry, Some(Entry::Const(Const::Pi)));
        assert_eq!(parts[1].entry, None);
        assert_eq!(parts[1].offset, 2);
    }

    #[test]
    fn whole_names_win_over_letters() {
        // `exp` is a function, even though `e` alone is a constant
        assert_eq!(texts("expx"), vec!["exp", "x"]);
        assert_eq!(texts("ex"), vec!["e", "x"]);
    }
}
