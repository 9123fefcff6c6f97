//! The symbolic engine behind the equation solver.
//!
//! Expressions parsed by `eqn-parser` are converted into [`SymExpr`](symbolic::SymExpr) trees,
//! simplified with a set of rewriting rules, and solved for a single symbol with
//! [`solve`](symbolic::solve::solve). Solutions can be evaluated to arbitrary precision with
//! [`eval`](numerical::eval::eval), and printed either as plain text ([`std::fmt::Display`]) or
//! as LaTeX ([`fmt::Latex`]).
//!
//! ```
//! use eqn_compute::{cancel::CancelToken, symbolic::{solve::solve, SymExpr}};
//! use eqn_parser::parser::{ast::Expr, Parser};
//!
//! let lhs: SymExpr = Parser::new("x^2 - 4").try_parse_full::<Expr>().unwrap().into();
//! let solutions = solve(&lhs, &SymExpr::zero(), "x", &CancelToken::new()).unwrap();
//! let solutions = solutions.iter().map(ToString::to_string).collect::<Vec<_>>();
//! assert_eq!(solutions, vec!["-2", "2"]);
//! ```

pub mod cancel;
pub mod fmt;
pub mod numerical;
pub mod primitive;
pub mod symbolic;
