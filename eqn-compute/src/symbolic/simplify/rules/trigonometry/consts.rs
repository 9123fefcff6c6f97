//! Exact values of trigonometric functions at the special angles.
//!
//! Angles are stored as rational multiples of `pi`, so `1/6` means `pi/6 rad = 30 deg`.

use crate::primitive::rational;
use crate::symbolic::expr::SymExpr;
use once_cell::sync::Lazy;
use rug::Rational;

/// `a/b sqrt(n)`
fn scaled_root(a: i32, b: i32, n: i32) -> SymExpr {
    SymExpr::Mul(vec![SymExpr::num((a, b)), SymExpr::num(n).sqrt()])
}

/// 1/2
pub static ONE_HALF: Lazy<SymExpr> = Lazy::new(|| SymExpr::num((1, 2)));

/// sqrt(2)/2
pub static SQRT2_2: Lazy<SymExpr> = Lazy::new(|| scaled_root(1, 2, 2));

/// sqrt(3)/2
pub static SQRT3_2: Lazy<SymExpr> = Lazy::new(|| scaled_root(1, 2, 3));

/// sqrt(3)/3
pub static SQRT3_3: Lazy<SymExpr> = Lazy::new(|| scaled_root(1, 3, 3));

/// sqrt(3)
pub static SQRT3: Lazy<SymExpr> = Lazy::new(|| SymExpr::num(3).sqrt());

/// `sin(r pi)` for `r` in `[0, 1)`, in steps of the special angles. `sin` is symmetric about
/// `pi/2`, so each value appears twice.
pub static SIN: Lazy<Vec<(Rational, SymExpr)>> = Lazy::new(|| vec![
    (rational(0), SymExpr::zero()),
    (rational((1, 6)), ONE_HALF.clone()),
    (rational((1, 4)), SQRT2_2.clone()),
    (rational((1, 3)), SQRT3_2.clone()),
    (rational((1, 2)), SymExpr::one()),
    (rational((2, 3)), SQRT3_2.clone()),
    (rational((3, 4)), SQRT2_2.clone()),
    (rational((5, 6)), ONE_HALF.clone()),
]);

/// `tan(r pi)` for `r` in `[0, 1)`. `tan(pi/2)` is undefined.
pub static TAN: Lazy<Vec<(Rational, SymExpr)>> = Lazy::new(|| vec![
    (rational(0), SymExpr::zero()),
    (rational((1, 6)), SQRT3_3.clone()),
    (rational((1, 4)), SymExpr::one()),
    (rational((1, 3)), SQRT3.clone()),
    (rational((2, 3)), -SQRT3.clone()),
    (rational((3, 4)), SymExpr::num(-1)),
    (rational((5, 6)), -SQRT3_3.clone()),
]);

/// `asin(v) = r pi` for the non-negative special values `v`.
pub static ASIN: Lazy<Vec<(SymExpr, Rational)>> = Lazy::new(|| vec![
    (SymExpr::zero(), rational(0)),
    (ONE_HALF.clone(), rational((1, 6))),
    (SQRT2_2.clone(), rational((1, 4))),
    (SQRT3_2.clone(), rational((1, 3))),
    (SymExpr::one(), rational((1, 2))),
]);

/// `atan(v) = r pi` for the non-negative special values `v`.
pub static ATAN: Lazy<Vec<(SymExpr, Rational)>> = Lazy::new(|| vec![
    (SymExpr::zero(), rational(0)),
    (SQRT3_3.clone(), rational((1, 6))),
    (SymExpr::one(), rational((1, 4))),
    (SQRT3.clone(), rational((1, 3))),
]);
