//! Solves informally written single-variable equations.
//!
//! A request goes through a fixed chain of stages:
//!
//! 1. [`sanitize`](sanitize::sanitize) removes dangerous characters, spells unicode math
//! notation in ASCII, and enforces the length limit.
//! 2. [`normalize`](normalize::normalize) rewrites the text into the canonical grammar, with
//! explicit multiplication and `**` powers.
//! 3. [`build`](equation::build) parses both sides of the equation.
//! 4. [`resolve`](variable::resolve) checks the variable to solve for.
//! 5. [`solve_bounded`](bounded::solve_bounded) runs the symbolic solver under a deadline.
//! 6. [`Solution::new`](format::Solution::new) renders each solution.
//!
//! Any failure along the way becomes a single user-facing message.
//!
//! ```
//! use eqn_solver::{config::SolverConfig, response::{Request, Response}, solve_request};
//!
//! let response = solve_request(&Request::new("x^2 - 4 = 0", "x"), &SolverConfig::default());
//! let plain = response.solutions().iter().map(|s| s.plain.as_str()).collect::<Vec<_>>();
//! assert_eq!(plain, vec!["-2", "2"]);
//! ```

pub mod bounded;
pub mod config;
pub mod equation;
pub mod error;
pub mod format;
pub mod normalize;
pub mod response;
pub mod sanitize;
pub mod variable;

use config::SolverConfig;
use eqn_compute::symbolic::SymExpr;
use eqn_error::Error;
use equation::Equation;
use error::MissingEquation;
use format::Solution;
use log::{info, warn};
use response::{Request, Response};

/// A solved equation, before rendering.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// The normalized text of the equation.
    pub normalized: String,

    /// The parsed equation.
    pub equation: Equation,

    /// The variable that was solved for, in canonical form.
    pub variable: String,

    /// The solutions, in the solver's order. Empty if none were found.
    pub solutions: Vec<SymExpr>,
}

impl Outcome {
    /// Renders the outcome as a response.
    pub fn to_response(&self) -> Response {
        Response::solved(
            self.equation.latex(),
            self.variable.clone(),
            self.solutions.iter().map(Solution::new).collect(),
        )
    }
}

/// Runs every stage of the pipeline on an equation.
///
/// Errors keep their spans, which point into the normalized text when they come from the
/// parser.
pub fn solve_equation(text: &str, variable: &str, config: &SolverConfig) -> Result<Outcome, Error> {
    if text.trim().is_empty() {
        return Err(Error::spanless(MissingEquation));
    }

    let clean = sanitize::sanitize(text, config.max_input_len)?;
    let normalized = normalize::normalize(&clean);
    let equation = equation::build(&normalized)?;
    let variable = variable::resolve(&equation, variable, config.variable_policy)?;
    let solutions = bounded::solve_bounded(&equation, &variable, config.deadline())?;

    info!("solved `{}` for {}: {} solution(s)", normalized, variable, solutions.len());
    Ok(Outcome { normalized, equation, variable, solutions })
}

/// Answers a request. Failures become error responses.
pub fn solve_request(request: &Request, config: &SolverConfig) -> Response {
    match solve_equation(&request.equation, &request.variable, config) {
        Ok(outcome) => outcome.to_response(),
        Err(err) => {
            warn!("request failed: {}", err.message());
            Response::error(err.message())
        },
    }
}
