//! The request and response shapes exchanged with front ends, as JSON.

use eqn_error::ErrorKind;
use serde::{Deserialize, Serialize};
use crate::{error::NoSolutionFound, format::Solution};

fn default_variable() -> String {
    "x".to_string()
}

/// A request to solve an equation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// The equation, as typed by the user.
    #[serde(default)]
    pub equation: String,

    /// The variable to solve for.
    #[serde(default = "default_variable")]
    pub variable: String,
}

impl Request {
    /// Creates a request.
    pub fn new(equation: impl Into<String>, variable: impl Into<String>) -> Self {
        Self { equation: equation.into(), variable: variable.into() }
    }
}

/// The equation was solved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solved {
    pub success: bool,

    /// LaTeX markup of the equation.
    pub equation: String,

    /// The variable that was solved for.
    pub variable: String,

    pub solutions: Vec<Solution>,
    pub count: usize,
}

/// The equation was understood, but has no solution the solver could find.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoSolution {
    pub no_solution: bool,
    pub message: String,

    /// LaTeX markup of the equation.
    pub equation: String,
}

/// The request failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failed {
    /// The user-facing message.
    pub error: String,
}

/// The response to a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Success(Solved),
    NoSolution(NoSolution),
    Error(Failed),
}

impl Response {
    /// Creates a success response, or a no-solution response if there are no solutions.
    pub fn solved(equation: String, variable: String, solutions: Vec<Solution>) -> Self {
        if solutions.is_empty() {
            Self::NoSolution(NoSolution {
                no_solution: true,
                message: NoSolutionFound.message(),
                equation,
            })
        } else {
            Self::Success(Solved {
                success: true,
                equation,
                variable,
                count: solutions.len(),
                solutions,
            })
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(Failed { error: message.into() })
    }

    /// Returns the solutions of a success response.
    pub fn solutions(&self) -> &[Solution] {
        match self {
            Self::Success(solved) => &solved.solutions,
            _ => &[],
        }
    }

    /// Serializes the response as a single line of JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            format!("{{\"error\":\"{}\"}}", err.to_string().replace('"', "'"))
        })
    }
}
