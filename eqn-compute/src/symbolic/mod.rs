//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`SymExpr`] nodes. It's
//! similar to the [`eqn_parser::parser::ast::Expr`] nodes produced by [`eqn_parser`], with the
//! main difference being that [`SymExpr`] nodes **flatten** out the tree structure.
//!
//! If you have a [`eqn_parser::parser::ast::Expr`], you can convert it to an [`SymExpr`] using
//! the [`From`] trait. Conversion is lossy: [`SymExpr`] does not store span information, and it
//! rewrites subtraction, division, roots, and logarithms with a base into sums, products, and
//! powers.
//!
//! # Simplification
//!
//! [`simplify()`] reduces an expression to a canonical form by applying the rules in
//! [`simplify::rules`] bottom-up, until none of them apply. [`expand()`] additionally multiplies
//! out products of sums.
//!
//! ```
//! use eqn_compute::symbolic::{simplify, SymExpr};
//! use eqn_parser::parser::{ast::Expr, Parser};
//!
//! let ast_expr = Parser::new("x + x + x").try_parse_full::<Expr>().unwrap();
//! let simplified = simplify(&ast_expr.into());
//!
//! // `x + x + x = 3x`
//! assert_eq!(simplified, SymExpr::Mul(vec![
//!     SymExpr::num(3),
//!     SymExpr::symbol("x"),
//! ]));
//! ```
//!
//! # Solving
//!
//! [`solve::solve`] finds the values of a symbol that satisfy an equation. See the
//! [`mod@solve`] module.

pub mod expand;
pub mod expr;
pub mod simplify;
pub mod solve;

pub use expand::expand;
pub use expr::{Primary, SymExpr};
pub use simplify::simplify;
