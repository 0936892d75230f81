//! # Primes Module
//!
//! Deterministic trial-division primality, factorisation of small group orders and
//! random prime generation of a requested decimal length.
//!
//! Trial division is O(sqrt n) per test. That is the intended ceiling: keys target
//! primes of around ten decimal digits.

use crate::arith::{self, random_range};
use crate::errors::ElGamalError;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use rand::Rng;

use log::debug;

/// Largest decimal length accepted by [`generate_prime`]; beyond it trial division stops terminating in practice.
pub const MAX_PRIME_DIGITS: u32 = 18;

/// Returns true iff `n` is prime.
///
/// 0 and 1 are not prime. Candidate divisors run from 2 up to `isqrt(n)`; any
/// divisor above that bound pairs with one below it, so the answer matches a scan
/// to `n / 2`.
///
/// # Example
///
/// ```
/// # use elgamal_crypto::primes::is_prime;
/// # use num_bigint::BigUint;
/// assert!(is_prime(&BigUint::from(20_996_023u64)));
/// assert!(!is_prime(&BigUint::from(20_996_021u64)));
/// assert!(!is_prime(&BigUint::from(1u32)));
/// ```
pub fn is_prime(n: &BigUint) -> bool {
    if n < &BigUint::from(2u32) {
        return false;
    }

    if let Some(small) = n.to_u64() {
        return is_prime_u64(small);
    }

    let limit = n.sqrt();
    let mut divisor = BigUint::from(2u32);
    while divisor <= limit {
        if (n % &divisor).is_zero() {
            return false;
        }
        divisor += 1u32;
    }

    true
}

fn is_prime_u64(n: u64) -> bool {
    if n < 2 {
        return false;
    }

    let mut divisor = 2u64;
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 1;
    }

    true
}

/// Factors `n` by trial division, returning `(prime, exponent)` pairs in increasing order.
///
/// `n = 0` and `n = 1` have no prime factors.
pub fn prime_factors(n: &BigUint) -> Vec<(BigUint, u32)> {
    let mut factors = Vec::new();
    if n.is_zero() {
        return factors;
    }

    let mut rest = n.clone();
    let mut divisor = BigUint::from(2u32);
    while &divisor * &divisor <= rest {
        if (&rest % &divisor).is_zero() {
            let mut exponent = 0u32;
            while (&rest % &divisor).is_zero() {
                rest /= &divisor;
                exponent += 1;
            }
            factors.push((divisor.clone(), exponent));
        }
        divisor += 1u32;
    }

    if rest > BigUint::one() {
        factors.push((rest, 1));
    }

    factors
}

/// Samples candidates with exactly `min_digits` decimal digits until one is prime.
///
/// # Errors
///
/// * `ElGamalError::InvalidParameters` if `min_digits` is 0 or above [`MAX_PRIME_DIGITS`].
/// * `ElGamalError::BoundExceeded` after `max_attempts` composite candidates.
pub fn generate_prime<R: Rng + ?Sized>(
    rng: &mut R,
    min_digits: u32,
    max_attempts: u64,
) -> Result<BigUint, ElGamalError> {
    if min_digits == 0 || min_digits > MAX_PRIME_DIGITS {
        return Err(ElGamalError::InvalidParameters(format!(
            "Prime length must be within 1..={} digits, got {}",
            MAX_PRIME_DIGITS, min_digits
        )));
    }

    let ten = BigUint::from(10u32);
    let low = ten.pow(min_digits - 1);
    let high = ten.pow(min_digits);

    for attempt in 1..=max_attempts {
        let candidate = random_range(rng, &low, &high)?;
        if candidate <= BigUint::one() {
            continue;
        }

        if is_prime(&candidate) {
            debug!(
                "found {}-digit prime after {} candidates",
                arith::decimal_digits(&candidate),
                attempt
            );
            return Ok(candidate);
        }
    }

    Err(ElGamalError::BoundExceeded {
        operation: "generate_prime",
        limit: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sieve(limit: usize) -> Vec<bool> {
        let mut flags = vec![true; limit + 1];
        flags[0] = false;
        flags[1] = false;
        let mut i = 2;
        while i * i <= limit {
            if flags[i] {
                let mut j = i * i;
                while j <= limit {
                    flags[j] = false;
                    j += i;
                }
            }
            i += 1;
        }
        flags
    }

    #[test]
    fn test_is_prime_matches_sieve() {
        let flags = sieve(2_000);
        for (n, &expected) in flags.iter().enumerate() {
            assert_eq!(is_prime(&BigUint::from(n)), expected, "n = {}", n);
        }
    }

    #[test]
    fn test_is_prime_beyond_u64() {
        // 2^64 + 1 = 274177 * 67280421310721
        let base = BigUint::from(u64::MAX) + 1u32;
        assert!(!is_prime(&(&base + 1u32)));
        assert!(!is_prime(&(&base + 2u32)));
    }

    #[test]
    fn test_prime_factors() {
        let big = |v: u64| BigUint::from(v);
        assert_eq!(
            prime_factors(&big(22)),
            vec![(big(2), 1), (big(11), 1)]
        );
        assert_eq!(
            prime_factors(&big(360)),
            vec![(big(2), 3), (big(3), 2), (big(5), 1)]
        );
        assert_eq!(prime_factors(&big(97)), vec![(big(97), 1)]);
        assert!(prime_factors(&big(1)).is_empty());
        assert!(prime_factors(&big(0)).is_empty());
    }

    #[test]
    fn test_generate_prime_two_digits() -> Result<(), ElGamalError> {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..50 {
            let prime = generate_prime(&mut rng, 2, 10_000)?;
            assert!(is_prime(&prime));
            assert!(arith::decimal_digits(&prime) >= 2);
        }
        Ok(())
    }

    #[test]
    fn test_generate_prime_one_digit() -> Result<(), ElGamalError> {
        let mut rng = StdRng::seed_from_u64(1);
        let single_digit = [2u32, 3, 5, 7].map(BigUint::from);
        for _ in 0..100 {
            let prime = generate_prime(&mut rng, 1, 10_000)?;
            assert!(single_digit.contains(&prime), "got {}", prime);
        }
        Ok(())
    }

    #[test]
    fn test_generate_prime_default_length() -> Result<(), ElGamalError> {
        let mut rng = StdRng::seed_from_u64(10);
        let prime = generate_prime(&mut rng, 10, 1_000_000)?;
        assert!(is_prime(&prime));
        assert_eq!(arith::decimal_digits(&prime), 10);
        Ok(())
    }

    #[test]
    fn test_generate_prime_rejects_bad_lengths() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            generate_prime(&mut rng, 0, 10),
            Err(ElGamalError::InvalidParameters(_))
        ));
        assert!(matches!(
            generate_prime(&mut rng, MAX_PRIME_DIGITS + 1, 10),
            Err(ElGamalError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_generate_prime_respects_bound() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(
            generate_prime(&mut rng, 6, 0),
            Err(ElGamalError::BoundExceeded { limit: 0, .. })
        ));
    }
}
