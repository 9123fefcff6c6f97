//! Numerical evaluation of symbolic expressions.
//!
//! The symbolic engine keeps every value exact, but checking a candidate solution requires
//! actually computing it. [`eval::eval`] evaluates a [`SymExpr`](crate::symbolic::SymExpr) with
//! no free symbols to a [`rug::Complex`] at [`PRECISION`](crate::primitive::PRECISION) bits.

pub mod error;
pub mod eval;
