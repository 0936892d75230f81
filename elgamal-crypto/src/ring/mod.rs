//! # Ring Module
//!
//! Provides the [`Ring`] struct for representing Z_n and performing modular
//! arithmetic on big integers, plus the free-standing [`pow_mod`] and
//! [`inverse_mod`] entry points used throughout the crate.

pub mod helper;
pub mod math;

use crate::errors::ElGamalError;

use num_bigint::{BigInt, BigUint, Sign};

pub use helper::{gcd, is_coprime};
pub use math::Ring;

/// Computes `base^exponent mod modulus`.
///
/// # Errors
///
/// * `ElGamalError::UnsupportedExponent` if `exponent` is negative.
/// * `ElGamalError::InvalidModulus` if `modulus` is 0.
///
/// # Example
///
/// ```
/// # use elgamal_crypto::ring::pow_mod;
/// # use num_bigint::{BigInt, BigUint};
/// let result = pow_mod(&BigUint::from(2u32), &BigInt::from(10), &BigUint::from(1000u32)).unwrap();
/// assert_eq!(result, BigUint::from(24u32));
/// assert!(pow_mod(&BigUint::from(2u32), &BigInt::from(-1), &BigUint::from(7u32)).is_err());
/// ```
pub fn pow_mod(
    base: &BigUint,
    exponent: &BigInt,
    modulus: &BigUint,
) -> Result<BigUint, ElGamalError> {
    if exponent.sign() == Sign::Minus {
        return Err(ElGamalError::UnsupportedExponent(exponent.clone()));
    }

    pow_mod_unsigned(base, exponent.magnitude(), modulus)
}

/// Computes `base^exponent mod modulus` for an exponent that is unsigned by type.
pub fn pow_mod_unsigned(
    base: &BigUint,
    exponent: &BigUint,
    modulus: &BigUint,
) -> Result<BigUint, ElGamalError> {
    let ring = Ring::try_with(modulus.clone())?;
    Ok(ring.pow(base, exponent))
}

/// Computes the inverse of `element` modulo `modulus`.
///
/// # Errors
///
/// * `ElGamalError::InvalidModulus` if `modulus` is 0.
/// * `ElGamalError::NotInvertible` if `gcd(modulus, element) != 1`.
pub fn inverse_mod(modulus: &BigUint, element: &BigUint) -> Result<BigUint, ElGamalError> {
    Ring::try_with(modulus.clone())?.inv(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(value: u64) -> BigUint {
        BigUint::from(value)
    }

    #[test]
    fn test_pow_mod_known_values() -> Result<(), ElGamalError> {
        assert_eq!(pow_mod(&big(2), &BigInt::from(10), &big(1000))?, big(24));
        assert_eq!(pow_mod(&big(5), &BigInt::from(0), &big(7))?, big(1));
        assert_eq!(pow_mod(&big(3), &BigInt::from(200), &big(1))?, big(0));
        assert_eq!(pow_mod_unsigned(&big(5), &big(6), &big(23))?, big(8));
        Ok(())
    }

    #[test]
    fn test_pow_mod_rejects_bad_input() {
        assert!(matches!(
            pow_mod(&big(2), &BigInt::from(-3), &big(7)),
            Err(ElGamalError::UnsupportedExponent(_))
        ));
        assert!(matches!(
            pow_mod(&big(2), &BigInt::from(3), &big(0)),
            Err(ElGamalError::InvalidModulus(_))
        ));
    }

    #[test]
    fn test_inverse_mod() -> Result<(), ElGamalError> {
        assert_eq!(inverse_mod(&big(7), &big(3))?, big(5));
        assert_eq!(inverse_mod(&big(23), &big(5))?, big(14));
        assert!(matches!(
            inverse_mod(&big(22), &big(4)),
            Err(ElGamalError::NotInvertible { .. })
        ));
        assert!(matches!(
            inverse_mod(&big(0), &big(4)),
            Err(ElGamalError::InvalidModulus(_))
        ));
        Ok(())
    }
}
