//! The errors a request can fail with.
//!
//! Each kind's `message` is the exact text placed in the `error` field of a response, so the
//! messages here are user-facing and do not change between releases.

use ariadne::Fmt;
use eqn_attrs::ErrorKind;
use eqn_error::EXPR;
use crate::variable::VariablePolicy;

/// The longest fragment of a diagnostic kept in a user-facing message.
pub const MAX_DETAIL_LEN: usize = 200;

/// Truncates a diagnostic to at most [`MAX_DETAIL_LEN`] characters.
pub fn bounded_detail(detail: &str) -> String {
    detail.chars().take(MAX_DETAIL_LEN).collect()
}

/// The request did not contain an equation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "Enter an equation")]
pub struct MissingEquation;

/// The input was empty or longer than allowed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("Input too long (max {} chars)", max_len),
    help = "shorten the equation",
)]
pub struct InputTooLong {
    /// The maximum number of characters accepted.
    pub max_len: usize,
}

/// The input contains characters that have no meaning in an equation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("Cannot understand: unsupported characters {}", found.iter().map(|c| format!("`{}`", c)).collect::<Vec<_>>().join(", ")),
    help = "use ASCII math notation, such as `x^2 + 1 = 5`",
)]
pub struct DisallowedCharacters {
    /// The distinct offending characters, in the order they first appear.
    pub found: Vec<char>,
}

/// One side of the equation could not be parsed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("Cannot understand: {}", detail),
    labels = [format!("while reading this part of the {}", "equation".fg(EXPR))],
)]
pub struct ParseError {
    /// The parser's own message, truncated with [`bounded_detail`].
    pub detail: String,
}

/// There is nothing on the left-hand side of the equation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "Cannot understand: the left-hand side of the equation is empty",
    labels = ["add an expression before this"],
)]
pub struct EmptyEquation;

/// The variable name does not follow the accepted policy.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = match policy {
        VariablePolicy::Strict => "Variable must be a single letter (a-z)",
        VariablePolicy::Relaxed => "Variable must be 1 to 10 letters (A-Z, a-z)",
    },
)]
pub struct InvalidVariableName {
    /// The policy the name was checked against.
    pub policy: VariablePolicy,
}

/// The variable does not occur in the equation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = if found.is_empty() {
        format!("Variable \"{}\" not found", name)
    } else {
        format!("Variable \"{}\" not found. Found: {}", name, found.join(", "))
    },
    help = "pick one of the symbols that appear in the equation",
)]
pub struct VariableNotPresent {
    /// The requested variable.
    pub name: String,

    /// The symbols that do occur in the equation, sorted.
    pub found: Vec<String>,
}

/// The solver did not finish before the deadline.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("Solving timed out after {}s", seconds))]
pub struct SolveTimeout {
    /// The deadline, in seconds.
    pub seconds: f64,
}

/// The solver finished without finding any solution.
///
/// This is reported as a `no_solution` response rather than an error response.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "No solutions found")]
pub struct NoSolutionFound;

/// Something outside the solver itself went wrong.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("Solving failed: {}", detail))]
pub struct UnexpectedSolverFailure {
    /// The underlying diagnostic, truncated with [`bounded_detail`].
    pub detail: String,
}
