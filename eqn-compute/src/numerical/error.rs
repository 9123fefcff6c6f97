use eqn_attrs::ErrorKind;

/// The expression contains a symbol, which has no value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot evaluate `{}` to a number", name),
    labels = ["this symbol"],
)]
pub struct FreeSymbol {
    /// The name of the symbol.
    pub name: String,
}

/// The expression evaluated to infinity, or to an undefined value such as `log(0)` or `1/0`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the expression does not have a finite value",
    labels = ["this expression"],
)]
pub struct NonFinite;
