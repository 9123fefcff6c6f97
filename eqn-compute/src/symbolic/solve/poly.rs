//! Polynomials in a single generator, and their roots.
//!
//! A **generator** is the expression a polynomial is written in. `x^2 - 4` is a polynomial in
//! `x`, `e^(2x) - 3e^x + 2` is a polynomial in `e^x`, and `x - 3 sqrt(x) + 2` is a polynomial in
//! `sqrt(x)`.

use crate::cancel::CancelToken;
use crate::primitive::{divisors, int};
use crate::symbolic::{
    expand::expand,
    expr::{Primary, SymExpr},
    simplify::{fraction::make_fraction, simplify},
};
use eqn_parser::namespace::{Const, Func};
use rug::{Integer, Rational};
use super::{numeric::durand_kerner, SolveError};

/// Polynomials of a higher degree are not solved.
pub(crate) const MAX_DEGREE: i64 = 64;

/// A factor that depends on the symbol, written as `(base^(1/root))^power`.
#[derive(Debug, Clone)]
struct Generated {
    base: SymExpr,
    root: u32,
    power: i64,
}

impl Generated {
    fn new(base: SymExpr) -> Self {
        Self { base, root: 1, power: 1 }
    }
}

/// Writes a factor that depends on the symbol as a power of some generator.
fn generated(factor: &SymExpr, symbol: &str) -> Option<Generated> {
    let SymExpr::Exp(base, exp) = factor else {
        return Some(Generated::new(factor.clone()));
    };

    match (base.contains_symbol(symbol), exp.contains_symbol(symbol)) {
        (true, false) => {
            let e = exp.as_number().filter(|e| e.cmp0().is_gt())?;
            let mut inner = generated(base, symbol)?;
            inner.root = inner.root.checked_mul(e.denom().to_u32()?)?;
            inner.power = inner.power.checked_mul(e.numer().to_i64()?)?;
            Some(inner)
        },
        (false, true) => {
            let (coeff, rest) = exp.as_coeff_mul();
            if coeff.cmp0().is_le() || !coeff.is_integer() {
                return Some(Generated::new(factor.clone()));
            }
            Some(Generated {
                base: SymExpr::pow((**base).clone(), rest),
                root: 1,
                power: coeff.numer().to_i64()?,
            })
        },
        _ => Some(Generated::new(factor.clone())),
    }
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// A polynomial `c_0 + c_1 g + c_2 g^2 + ...` in the generator `g`.
#[derive(Debug, Clone, PartialEq)]
pub struct Poly {
    /// The generator of the polynomial.
    pub generator: SymExpr,

    /// The coefficients, lowest degree first. The leading coefficient is never zero, unless the
    /// polynomial is the constant zero.
    pub coeffs: Vec<SymExpr>,
}

impl Poly {
    /// Writes the expanded expression as a polynomial in one generator that depends on the given
    /// symbol.
    ///
    /// Returns [`None`] if the expression needs more than one generator, such as `x + sin(x)`, or
    /// if the degree is negative or too large.
    pub fn from_expr(expr: &SymExpr, symbol: &str) -> Option<Self> {
        let mut base: Option<SymExpr> = None;
        let mut terms = Vec::new();

        for term in expr.terms() {
            let mut coeff = Vec::new();
            let mut generated_factors = Vec::new();
            for factor in term.factors() {
                if factor.contains_symbol(symbol) {
                    let gen = generated(factor, symbol)?;
                    match &base {
                        Some(existing) if *existing != gen.base => return None,
                        Some(_) => (),
                        None => base = Some(gen.base.clone()),
                    }
                    generated_factors.push(gen);
                } else {
                    coeff.push(factor.clone());
                }
            }
            terms.push((coeff, generated_factors));
        }

        let base = base?;
        let root = terms.iter()
            .flat_map(|(_, gens)| gens.iter().map(|gen| gen.root))
            .fold(1, |acc, root| acc / gcd(acc, root) * root);

        let mut by_degree: Vec<Vec<SymExpr>> = Vec::new();
        for (coeff, gens) in terms {
            let degree = gens.iter()
                .map(|gen| gen.power * i64::from(root / gen.root))
                .sum::<i64>();
            if !(0..=MAX_DEGREE).contains(&degree) {
                return None;
            }

            let degree = degree as usize;
            if by_degree.len() <= degree {
                by_degree.resize(degree + 1, Vec::new());
            }
            by_degree[degree].push(SymExpr::Mul(coeff).downgrade());
        }

        let mut coeffs = by_degree.into_iter()
            .map(|terms| simplify(&SymExpr::Add(terms)))
            .collect::<Vec<_>>();
        while coeffs.len() > 1 && coeffs.last().map_or(false, SymExpr::is_zero) {
            coeffs.pop();
        }

        let generator = if root == 1 {
            base
        } else {
            simplify(&SymExpr::pow(base, SymExpr::num((1, root))))
        };
        Some(Self { generator, coeffs })
    }

    /// The degree of the polynomial.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Finds the roots of the polynomial, with repeated roots possibly included more than once.
    ///
    /// Returns [`SolveError::Unsupported`] if the polynomial has degree 3 or higher, is not a
    /// binomial `a g^n + b`, and has non-rational coefficients.
    pub fn roots(&self, token: &CancelToken) -> Result<Vec<SymExpr>, SolveError> {
        let mut coeffs = self.coeffs.clone();
        let mut roots = Vec::new();

        let zeros = coeffs.iter().take_while(|c| c.is_zero()).count();
        if zeros > 0 && zeros < coeffs.len() {
            roots.push(SymExpr::zero());
            coeffs.drain(..zeros);
        }

        roots.extend(nonzero_roots(&coeffs, token)?);
        Ok(roots)
    }
}

/// Roots of a polynomial with a nonzero constant term.
fn nonzero_roots(coeffs: &[SymExpr], token: &CancelToken) -> Result<Vec<SymExpr>, SolveError> {
    SolveError::check(token)?;
    let degree = coeffs.len().saturating_sub(1);
    match degree {
        0 => Ok(Vec::new()),
        1 => Ok(vec![simplify(&make_fraction(-coeffs[0].clone(), coeffs[1].clone()))]),
        2 => Ok(quadratic(&coeffs[2], &coeffs[1], &coeffs[0])),
        n if is_binomial(coeffs) => {
            let c = simplify(&make_fraction(-coeffs[0].clone(), coeffs[n].clone()));
            binomial_roots(n as i64, &c, token)
        },
        _ => {
            let rationals = coeffs.iter()
                .map(|c| c.as_number().cloned())
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| {
                    let poly = coeffs.iter()
                        .enumerate()
                        .map(|(k, c)| format!("({})*g**{}", c, k))
                        .collect::<Vec<_>>()
                        .join(" + ");
                    SolveError::Unsupported(format!("{} = 0", poly))
                })?;
            rational_poly_roots(rationals, token)
        },
    }
}

/// Returns true if every coefficient except the first and the last is zero.
fn is_binomial(coeffs: &[SymExpr]) -> bool {
    coeffs.len() > 2 && coeffs[1..coeffs.len() - 1].iter().all(SymExpr::is_zero)
}

/// `(-b ± sqrt(b^2 - 4ac)) / 2a`
fn quadratic(a: &SymExpr, b: &SymExpr, c: &SymExpr) -> Vec<SymExpr> {
    let discriminant = expand(&(
        SymExpr::pow(b.clone(), SymExpr::num(2))
            - SymExpr::num(4) * a.clone() * c.clone()
    ));
    let two_a = SymExpr::num(2) * a.clone();

    if discriminant.is_zero() {
        return vec![simplify(&make_fraction(-b.clone(), two_a))];
    }

    let root = simplify(&discriminant.sqrt());
    vec![
        simplify(&make_fraction(-b.clone() + root.clone(), two_a.clone())),
        simplify(&make_fraction(-b.clone() - root, two_a)),
    ]
}

/// Roots of `g^n = c`: the `n`-th roots of `c`, spaced evenly around a circle.
///
/// Returns [`SolveError::Unsupported`] if `n` is negative or larger than [`MAX_DEGREE`], unless
/// `c` is zero.
pub(crate) fn binomial_roots(n: i64, c: &SymExpr, token: &CancelToken) -> Result<Vec<SymExpr>, SolveError> {
    if c.is_zero() && n > 0 {
        return Ok(vec![SymExpr::zero()]);
    }

    let n = u32::try_from(n)
        .ok()
        .filter(|&n| i64::from(n) <= MAX_DEGREE)
        .ok_or_else(|| SolveError::Unsupported(format!("g**{} = {}", n, c)))?;

    match n {
        0 => return Ok(Vec::new()),
        1 => return Ok(vec![c.clone()]),
        2 => {
            let root = simplify(&c.clone().sqrt());
            return Ok(vec![simplify(&-root.clone()), root]);
        },
        _ => (),
    }

    let (radius, offset) = match c.as_number() {
        Some(r) if r.cmp0().is_lt() => (SymExpr::Primary(Primary::Number(-r.clone())), 1),
        _ => (c.clone(), 0),
    };
    let radius = SymExpr::pow(radius, SymExpr::num((1, n)));

    let mut roots = Vec::new();
    for k in 0..n {
        SolveError::check(token)?;
        let angle = SymExpr::num((2 * k + offset, n)) * SymExpr::constant(Const::Pi);
        let unit = SymExpr::call(Func::Cos, vec![angle.clone()])
            + SymExpr::constant(Const::I)
                * SymExpr::call(Func::Sin, vec![angle]);
        roots.push(expand(&(radius.clone() * unit)));
    }
    Ok(roots)
}

/// Evaluates the polynomial at `x` using Horner's method.
fn horner(coeffs: &[Rational], x: &Rational) -> Rational {
    coeffs.iter()
        .rev()
        .fold(Rational::new(), |acc, c| acc * x + c)
}

/// Divides the polynomial by `(g - r)`, where `r` is a root.
fn deflate(coeffs: &[Rational], r: &Rational) -> Vec<Rational> {
    let n = coeffs.len() - 1;
    let mut quotient = vec![Rational::new(); n];
    let mut acc = coeffs[n].clone();
    quotient[n - 1] = acc.clone();
    for k in (1..n).rev() {
        acc = coeffs[k].clone() + acc * r;
        quotient[k - 1] = acc.clone();
    }
    quotient
}

/// Finds a rational root of the polynomial using the rational root theorem: any rational root
/// `p/q` has `p` dividing the constant term and `q` dividing the leading coefficient.
fn find_rational_root(coeffs: &[Rational], token: &CancelToken) -> Result<Option<Rational>, SolveError> {
    let lcm = coeffs.iter().fold(int(1), |acc, c| acc.lcm(c.denom()));
    let scaled = coeffs.iter()
        .map(|c| (c.clone() * &lcm).into_numer_denom().0)
        .collect::<Vec<Integer>>();

    let (Some(ps), Some(qs)) = (divisors(&scaled[0]), divisors(&scaled[scaled.len() - 1])) else {
        return Ok(None);
    };

    for q in &qs {
        for p in &ps {
            SolveError::check(token)?;
            for candidate in [Rational::from((p.clone(), q.clone())), -Rational::from((p.clone(), q.clone()))] {
                if horner(coeffs, &candidate).cmp0().is_eq() {
                    return Ok(Some(candidate));
                }
            }
        }
    }
    Ok(None)
}

/// Roots of a polynomial with rational coefficients and a nonzero constant term.
///
/// Rational roots are found exactly and divided out. Whatever remains is solved exactly if it is
/// at most quadratic or a binomial, and numerically otherwise.
fn rational_poly_roots(mut coeffs: Vec<Rational>, token: &CancelToken) -> Result<Vec<SymExpr>, SolveError> {
    let mut roots = Vec::new();
    while coeffs.len() > 3 {
        match find_rational_root(&coeffs, token)? {
            Some(r) => {
                coeffs = deflate(&coeffs, &r);
                roots.push(SymExpr::Primary(Primary::Number(r)));
            },
            None => break,
        }
    }

    let rest = coeffs.iter()
        .map(|c| SymExpr::Primary(Primary::Number(c.clone())))
        .collect::<Vec<_>>();
    if rest.len() <= 3 || is_binomial(&rest) {
        roots.extend(nonzero_roots(&rest, token)?);
    } else {
        roots.extend(durand_kerner(&coeffs, token)?);
    }
    Ok(roots)
}

#[cfg(test)]
mod tests {
    use eqn_parser::parser::{ast::expr::Expr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn poly(input: &str) -> Option<Poly> {
        let expr: SymExpr = Parser::new(input).try_parse_full::<Expr>().unwrap().into();
        Poly::from_expr(&expand(&expr), "x")
    }

    fn strings(exprs: &[SymExpr]) -> Vec<String> {
        exprs.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn plain_polynomial() {
        let p = poly("3x^2 - 4x + 1").unwrap();
        assert_eq!(p.generator, SymExpr::symbol("x"));
        assert_eq!(strings(&p.coeffs), vec!["1", "-4", "3"]);
    }

    #[test]
    fn exponential_generator() {
        let p = poly("e^(2x) - 3e^x + 2").unwrap();
        assert_eq!(p.generator.to_string(), "exp(x)");
        assert_eq!(p.degree(), 2);
    }

    #[test]
    fn root_generator() {
        let p = poly("x - 3sqrt(x) + 2").unwrap();
        assert_eq!(p.generator.to_string(), "sqrt(x)");
        assert_eq!(strings(&p.coeffs), vec!["2", "-3", "1"]);
    }

    #[test]
    fn mixed_generators() {
        assert_eq!(poly("x + sin(x)"), None);
    }

    #[test]
    fn deflation() {
        // x^2 - 3x + 2 = (x - 1)(x - 2)
        let coeffs = vec![Rational::from(2), Rational::from(-3), Rational::from(1)];
        assert_eq!(deflate(&coeffs, &Rational::from(1)), vec![Rational::from(-2), Rational::from(1)]);
    }

    #[test]
    fn cube_roots_of_eight() {
        let roots = binomial_roots(3, &SymExpr::num(8), &CancelToken::new()).unwrap();
        assert_eq!(strings(&roots), vec!["2", "-1 + sqrt(3)*I", "-1 - sqrt(3)*I"]);
    }

    #[test]
    fn binomial_degree_is_bounded() {
        let token = CancelToken::new();
        assert!(matches!(
            binomial_roots(1_000_000_000, &SymExpr::num(2), &token),
            Err(SolveError::Unsupported(_)),
        ));
        assert!(matches!(
            binomial_roots(1 << 40, &SymExpr::num(2), &token),
            Err(SolveError::Unsupported(_)),
        ));
        assert_eq!(binomial_roots(MAX_DEGREE, &SymExpr::num(1), &token).unwrap().len(), 64);

        // zero is the only root, whatever the degree
        assert_eq!(binomial_roots(1_000_000_000, &SymExpr::zero(), &token), Ok(vec![SymExpr::zero()]));
    }

    #[test]
    fn binomial_roots_cancelled() {
        let token = CancelToken::new();
        token.cancel();
        assert_eq!(binomial_roots(5, &SymExpr::num(2), &token), Err(SolveError::Cancelled));
    }

    #[test]
    fn quartic_without_rational_roots() {
        // x^4 + x + 1 has no rational roots and is solved numerically
        let p = poly("x^4 + x + 1").unwrap();
        let roots = p.roots(&CancelToken::new()).unwrap();
        assert_eq!(roots.len(), 4);
    }
}
