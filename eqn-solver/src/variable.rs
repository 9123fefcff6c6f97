//! Validation of the variable to solve for.

use eqn_error::Error;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use crate::{equation::Equation, error::{InvalidVariableName, VariableNotPresent}};

static STRICT_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]$").expect("valid regex"));
static RELAXED_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]{1,10}$").expect("valid regex"));

/// Which variable names are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariablePolicy {
    /// Exactly one lowercase letter, after trimming and lowercasing the name.
    #[default]
    Strict,

    /// One to ten ASCII letters, case preserved.
    ///
    /// Normalization splits every run of letters into single-letter symbols, so `abc` in an
    /// equation is `a*b*c` and a longer name is never found in it. In practice this policy only
    /// adds the uppercase letters.
    Relaxed,
}

impl VariablePolicy {
    /// Checks the name against the policy, returning it in its canonical form.
    pub fn check(self, name: &str) -> Result<String, Error> {
        let name = match self {
            Self::Strict => name.trim().to_lowercase(),
            Self::Relaxed => name.trim().to_string(),
        };
        let pattern = match self {
            Self::Strict => &STRICT_NAME,
            Self::Relaxed => &RELAXED_NAME,
        };

        if pattern.is_match(&name) {
            Ok(name)
        } else {
            Err(Error::spanless(InvalidVariableName { policy: self }))
        }
    }
}

/// Resolves the variable to solve for, checking that it occurs in the equation.
pub fn resolve(equation: &Equation, name: &str, policy: VariablePolicy) -> Result<String, Error> {
    let name = policy.check(name)?;
    let symbols = equation.free_symbols();

    if symbols.contains(&name) {
        debug!("solving for `{}`", name);
        Ok(name)
    } else {
        Err(Error::spanless(VariableNotPresent {
            name,
            found: symbols.into_iter().collect(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::equation::build;
    use super::*;

    #[test]
    fn strict_names() {
        assert_eq!(VariablePolicy::Strict.check(" X ").unwrap(), "x");
        assert!(VariablePolicy::Strict.check("xy").is_err());
        assert!(VariablePolicy::Strict.check("").is_err());
        assert!(VariablePolicy::Strict.check("1").is_err());
        assert!(VariablePolicy::Strict.check("é").is_err());
    }

    #[test]
    fn relaxed_names() {
        assert_eq!(VariablePolicy::Relaxed.check("Theta").unwrap(), "Theta");
        assert!(VariablePolicy::Relaxed.check("abcdefghijk").is_err());
        assert!(VariablePolicy::Relaxed.check("x1").is_err());
    }

    #[test]
    fn relaxed_names_in_equations() {
        let equation = build("X+a*b*c=1").unwrap();
        assert_eq!(resolve(&equation, "X", VariablePolicy::Relaxed).unwrap(), "X");

        let err = resolve(&equation, "abc", VariablePolicy::Relaxed).unwrap_err();
        let kind = err.downcast_ref::<VariableNotPresent>().unwrap();
        assert_eq!(kind.found, vec!["X".to_string(), "a".to_string(), "b".to_string(), "c".to_string()]);
    }

    #[test]
    fn present_variable() {
        let equation = build("x**2+y=3").unwrap();
        assert_eq!(resolve(&equation, "y", VariablePolicy::Strict).unwrap(), "y");
    }

    #[test]
    fn missing_variable_lists_found_symbols() {
        let equation = build("z+y=1").unwrap();
        let err = resolve(&equation, "x", VariablePolicy::Strict).unwrap_err();
        let kind = err.downcast_ref::<VariableNotPresent>().unwrap();
        assert_eq!(kind.found, vec!["y".to_string(), "z".to_string()]);
        assert_eq!(err.message(), "Variable \"x\" not found. Found: y, z");
    }

    #[test]
    fn constants_are_not_symbols() {
        let equation = build("e*pi=2").unwrap();
        let err = resolve(&equation, "e", VariablePolicy::Strict).unwrap_err();
        assert_eq!(err.message(), "Variable \"e\" not found");
    }
}
