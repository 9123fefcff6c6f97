//! Numerical root finding, used for polynomials without a closed-form solution.

use crate::cancel::CancelToken;
use crate::primitive::{complex, float, PRECISION};
use crate::symbolic::expr::{Primary, SymExpr};
use eqn_parser::namespace::Const;
use rug::{Complex, Float, Rational};
use super::SolveError;

/// Iterations stop after this many rounds, even if the roots have not converged.
const MAX_ITERATIONS: usize = 500;

/// Iterations stop once every root moves less than this.
const TOLERANCE: f64 = 1e-60;

/// A part of a root smaller than this, relative to the magnitude of the root, is taken to be zero.
const ZERO_TOLERANCE: f64 = 1e-30;

/// Evaluates a monic polynomial at `z`.
fn eval_poly(coeffs: &[Complex], z: &Complex) -> Complex {
    coeffs.iter()
        .rev()
        .fold(complex(0), |acc, c| acc * z + c)
}

/// Converts a numeric root to an expression, dropping negligible real or imaginary parts.
fn to_expr(z: Complex) -> SymExpr {
    let (re, im) = z.into_real_imag();
    let threshold = re.clone().hypot(&im).max(&float(1)) * ZERO_TOLERANCE;
    let negligible = |part: &Float| part.clone().abs() < threshold;

    let real = SymExpr::Primary(Primary::Float(re.clone()));
    let imag = || SymExpr::Mul(vec![SymExpr::Primary(Primary::Float(im.clone())), SymExpr::constant(Const::I)]);
    match (negligible(&re), negligible(&im)) {
        (_, true) => real,
        (true, false) => imag(),
        (false, false) => SymExpr::Add(vec![real, imag()]),
    }
}

/// Finds all complex roots of the polynomial with the given coefficients (lowest degree first)
/// with the Durand-Kerner method.
pub(crate) fn durand_kerner(coeffs: &[Rational], token: &CancelToken) -> Result<Vec<SymExpr>, SolveError> {
    let degree = coeffs.len().saturating_sub(1);
    if degree == 0 {
        return Ok(Vec::new());
    }

    let lead = complex(&coeffs[degree]);
    let monic = coeffs.iter()
        .map(|c| complex(c) / &lead)
        .collect::<Vec<_>>();

    // powers of a number that is neither real nor a root of unity
    let seed = complex((0.4, 0.9));
    let mut roots = Vec::with_capacity(degree);
    let mut z = complex(1);
    for _ in 0..degree {
        roots.push(z.clone());
        z *= &seed;
    }

    for _ in 0..MAX_ITERATIONS {
        SolveError::check(token)?;

        let mut largest_step = 0f64;
        for i in 0..degree {
            let mut denom = complex(1);
            for (j, other) in roots.iter().enumerate() {
                if i != j {
                    denom *= Complex::with_val(PRECISION, &roots[i] - other);
                }
            }

            let step = eval_poly(&monic, &roots[i]) / denom;
            largest_step = largest_step.max(step.clone().abs().real().to_f64());
            roots[i] -= step;
        }

        if largest_step < TOLERANCE {
            break;
        }
    }

    Ok(roots.into_iter().map(to_expr).collect())
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use crate::numerical::eval::eval;
    use super::*;

    #[test]
    fn quintic() {
        // x^5 - x - 1 has exactly one real root, near 1.1673
        let coeffs = [-1, -1, 0, 0, 0, 1].map(Rational::from);
        let roots = durand_kerner(&coeffs, &CancelToken::new()).unwrap();
        assert_eq!(roots.len(), 5);

        let real = roots.iter()
            .filter(|root| matches!(root, SymExpr::Primary(Primary::Float(_))))
            .collect::<Vec<_>>();
        assert_eq!(real.len(), 1);
        let value = eval(real[0]).unwrap();
        assert_float_absolute_eq!(value.real().to_f64(), 1.1673039782614187, 1e-12);
    }

    #[test]
    fn cancelled() {
        let token = CancelToken::new();
        token.cancel();
        let coeffs = [1, 1, 0, 0, 1].map(Rational::from);
        assert_eq!(durand_kerner(&coeffs, &token), Err(SolveError::Cancelled));
    }
}
