//! # Big Arithmetic Module
//!
//! Exact unsigned arbitrary-precision integer operations on [`BigUint`].
//! Every modular component reduces through these helpers, so no value is ever
//! truncated to a fixed width.

pub mod random;

use crate::errors::ElGamalError;

use num_bigint::BigUint;
use num_traits::Zero;

use std::cmp::Ordering;

pub use random::{random_below, random_range};

/// Computes `a + b`.
pub fn add(a: &BigUint, b: &BigUint) -> BigUint {
    a + b
}

/// Computes `a - b`.
///
/// # Errors
///
/// Returns `ElGamalError::NegativeResult` if `b > a`.
///
/// # Example
///
/// ```
/// # use elgamal_crypto::arith::sub;
/// # use num_bigint::BigUint;
/// let seven = BigUint::from(7u32);
/// let two = BigUint::from(2u32);
/// assert_eq!(sub(&seven, &two).unwrap(), BigUint::from(5u32));
/// assert!(sub(&two, &seven).is_err());
/// ```
pub fn sub(a: &BigUint, b: &BigUint) -> Result<BigUint, ElGamalError> {
    if b > a {
        return Err(ElGamalError::NegativeResult(format!("{} - {}", a, b)));
    }

    Ok(a - b)
}

/// Computes `a * b` without loss of precision.
pub fn mul(a: &BigUint, b: &BigUint) -> BigUint {
    a * b
}

/// Computes `a mod modulus`.
///
/// # Errors
///
/// Returns `ElGamalError::InvalidModulus` if `modulus` is zero.
pub fn rem(a: &BigUint, modulus: &BigUint) -> Result<BigUint, ElGamalError> {
    if modulus.is_zero() {
        return Err(ElGamalError::InvalidModulus(
            "Modulus must be greater than 0".to_string(),
        ));
    }

    Ok(a % modulus)
}

/// Orders two values.
pub fn compare(a: &BigUint, b: &BigUint) -> Ordering {
    a.cmp(b)
}

/// Number of decimal digits in `n` (1 for zero).
pub fn decimal_digits(n: &BigUint) -> usize {
    n.to_str_radix(10).len()
}
