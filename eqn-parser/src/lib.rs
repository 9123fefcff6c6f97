//! Parser for the restricted math grammar accepted by the equation solver.
//!
//! The grammar is deliberately small: numbers, single-letter symbols, the operators `+ - * / ^
//! **`, parentheses, and the functions / constants of a fixed [`namespace::Namespace`]. There is
//! no general-purpose evaluation anywhere in this crate; any name the namespace does not know is
//! split into single-letter symbols.
//!
//! ```
//! use eqn_parser::parser::{ast::Expr, Parser};
//!
//! let expr = Parser::new("2x sin x").try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.to_string(), "2*x*sin(x)");
//! ```

pub mod namespace;
pub mod parser;
pub mod tokenizer;
