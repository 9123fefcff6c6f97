//! Functions to construct [`Integer`]s, [`Rational`]s, [`Float`]s, and [`Complex`] numbers from
//! various types, and a few number-theoretic helpers used by the simplifier.

use rug::{float::Constant, ops::Pow, Assign, Complex, Float, Integer, Rational};

/// The number of bits of precision to use when computing values.
pub const PRECISION: u32 = 1 << 9;

/// Numbers with more bits than this are not factored or tested for perfect powers.
const MAX_FACTOR_BITS: u32 = 1 << 12;

/// Trial division stops at this prime.
const TRIAL_DIVISION_LIMIT: u32 = 10_000;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
pub fn rational<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates a [`Complex`] with the given value.
pub fn complex<T>(n: T) -> Complex
where
    Complex: Assign<T>,
{
    Complex::with_val(PRECISION, n)
}

/// Returns `pi` at working precision.
pub fn pi() -> Float {
    float(Constant::Pi)
}

/// Returns Euler's number at working precision.
pub fn euler() -> Float {
    float(1).exp()
}

/// Reads a decimal literal such as `12`, `0.5`, or `.25` into an exact [`Rational`].
///
/// Characters other than ASCII digits and the decimal point are ignored; the tokenizer never
/// produces any.
pub fn rational_from_decimal(s: &str) -> Rational {
    let mut numer = int(0);
    let mut scale = 0u32;
    let mut after_point = false;

    for c in s.chars() {
        if c == '.' {
            after_point = true;
        } else if let Some(digit) = c.to_digit(10) {
            numer = numer * 10u32 + digit;
            if after_point {
                scale += 1;
            }
        }
    }

    Rational::from((numer, int(10).pow(scale)))
}

/// Splits a positive integer `n` into `(a, b)` such that `n = a^q * b`, pulling out as many
/// `q`-th powers as trial division can find.
pub fn extract_power(n: &Integer, q: u32) -> (Integer, Integer) {
    if q < 2 || *n <= 1 || n.significant_bits() > MAX_FACTOR_BITS {
        return (int(1), n.clone());
    }

    let mut rest = n.clone();
    let mut outside = int(1);
    let mut inside = int(1);

    let mut p = 2u32;
    while p <= TRIAL_DIVISION_LIMIT && Integer::from(p).pow(2) <= rest {
        let mut count = 0;
        while rest.is_divisible_u(p) {
            rest /= p;
            count += 1;
        }
        outside *= Integer::from(p).pow(count / q);
        inside *= Integer::from(p).pow(count % q);
        p += if p == 2 { 1 } else { 2 };
    }

    // whatever is left has no small factors; it may still be a perfect power on its own
    let (root, rem) = rest.clone().root_rem(int(0), q);
    if rem == 0 {
        outside *= root;
    } else {
        inside *= rest;
    }

    (outside, inside)
}

/// If the positive integer `n` is a perfect power `b^k` with `k >= 2`, returns `(b, k)` with the
/// largest such `k`.
pub fn as_perfect_power(n: &Integer) -> Option<(Integer, u32)> {
    if *n <= 1 || n.significant_bits() > MAX_FACTOR_BITS || !n.is_perfect_power() {
        return None;
    }

    (2..=n.significant_bits()).rev().find_map(|k| {
        let (root, rem) = n.clone().root_rem(int(0), k);
        (rem == 0 && root > 1).then_some((root, k))
    })
}

/// Returns every positive divisor of `n`, or [`None`] if `n` is too large to factor quickly.
pub fn divisors(n: &Integer) -> Option<Vec<Integer>> {
    let n = n.clone().abs();
    if n == 0 || n.significant_bits() > 40 {
        return None;
    }

    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = int(1);
    while Integer::from(&d * &d) <= n {
        if n.is_divisible(&d) {
            let pair = Integer::from(&n / &d);
            if pair != d {
                large.push(pair);
            }
            small.push(d.clone());
        }
        d += 1;
    }

    small.extend(large.into_iter().rev());
    Some(small)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn decimals_are_exact() {
        assert_eq!(rational_from_decimal("0.5"), Rational::from((1, 2)));
        assert_eq!(rational_from_decimal(".25"), Rational::from((1, 4)));
        assert_eq!(rational_from_decimal("12"), Rational::from(12));
        assert_eq!(rational_from_decimal("3."), Rational::from(3));
    }

    #[test]
    fn extract_square() {
        assert_eq!(extract_power(&int(8), 2), (int(2), int(2)));
        assert_eq!(extract_power(&int(72), 2), (int(6), int(2)));
        assert_eq!(extract_power(&int(7), 2), (int(1), int(7)));
        assert_eq!(extract_power(&int(54), 3), (int(3), int(2)));
    }

    #[test]
    fn extract_large_prime_square() {
        // 10007 is prime and above the trial division limit
        let n = int(10007) * int(10007);
        assert_eq!(extract_power(&n, 2), (int(10007), int(1)));
    }

    #[test]
    fn perfect_powers() {
        assert_eq!(as_perfect_power(&int(32)), Some((int(2), 5)));
        assert_eq!(as_perfect_power(&int(36)), Some((int(6), 2)));
        assert_eq!(as_perfect_power(&int(12)), None);
    }

    #[test]
    fn divisors_of() {
        assert_eq!(divisors(&int(12)), Some(vec![int(1), int(2), int(3), int(4), int(6), int(12)]));
        assert_eq!(divisors(&int(-9)), Some(vec![int(1), int(3), int(9)]));
        assert_eq!(divisors(&int(0)), None);
    }
}
