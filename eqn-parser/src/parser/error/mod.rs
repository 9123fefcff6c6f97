pub mod kind;

pub use eqn_error::Error;
