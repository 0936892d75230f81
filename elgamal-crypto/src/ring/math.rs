//! Implementation of ring ops using modular arithmetic over big integers.

use crate::arith;
use crate::errors::ElGamalError;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};

use serde::{Deserialize, Serialize};

/// Represents the ring Z_n of residues modulo `n`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRing")]
pub struct Ring {
    modulus: BigUint,
}

#[derive(Deserialize)]
struct RawRing {
    modulus: BigUint,
}

impl TryFrom<RawRing> for Ring {
    type Error = ElGamalError;

    fn try_from(raw: RawRing) -> Result<Self, Self::Error> {
        Ring::try_with(raw.modulus)
    }
}

impl Ring {
    /// Create a new Ring with the given modulus.
    ///
    /// The modulus must be greater than 0.
    pub fn try_with(modulus: BigUint) -> Result<Self, ElGamalError> {
        if modulus.is_zero() {
            return Err(ElGamalError::InvalidModulus(
                "Modulus must be greater than 0, got 0".to_string(),
            ));
        }

        Ok(Ring { modulus })
    }

    /// Builds the ring of an already validated prime modulus.
    pub(crate) fn with_prime(prime: BigUint) -> Self {
        debug_assert!(!prime.is_zero());
        Ring { modulus: prime }
    }

    /// Returns the modulus of the ring.
    ///
    /// # Example
    ///
    /// ```
    /// # use elgamal_crypto::ring::Ring;
    /// # use num_bigint::BigUint;
    /// let ring = Ring::try_with(BigUint::from(13u32)).unwrap();
    /// assert_eq!(ring.modulus(), &BigUint::from(13u32));
    /// ```
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Reduces a value into `[0, modulus - 1]`.
    pub fn normalize(&self, value: &BigUint) -> BigUint {
        value % &self.modulus
    }

    /// Computes `(a + b) mod modulus`.
    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        self.normalize(&arith::add(&self.normalize(a), &self.normalize(b)))
    }

    /// Computes `(a - b) mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use elgamal_crypto::ring::Ring;
    /// # use num_bigint::BigUint;
    /// let ring = Ring::try_with(BigUint::from(10u32)).unwrap();
    /// let three = BigUint::from(3u32);
    /// let five = BigUint::from(5u32);
    /// assert_eq!(ring.sub(&five, &three), BigUint::from(2u32));
    /// assert_eq!(ring.sub(&three, &five), BigUint::from(8u32));
    /// ```
    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let a_norm = self.normalize(a);
        let b_norm = self.normalize(b);

        self.normalize(&(arith::add(&a_norm, &self.modulus) - b_norm))
    }

    /// Computes `(a * b) mod modulus`.
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        self.normalize(&arith::mul(&self.normalize(a), &self.normalize(b)))
    }

    /// Computes `base^exponent mod modulus` by square-and-multiply.
    ///
    /// Bits of the exponent are scanned from least to most significant. The running
    /// square and the accumulator are both reduced after every multiplication.
    ///
    /// # Example
    ///
    /// ```
    /// # use elgamal_crypto::ring::Ring;
    /// # use num_bigint::BigUint;
    /// let ring = Ring::try_with(BigUint::from(1000u32)).unwrap();
    /// let result = ring.pow(&BigUint::from(2u32), &BigUint::from(10u32));
    /// assert_eq!(result, BigUint::from(24u32));
    /// ```
    pub fn pow(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        let mut result = self.normalize(&BigUint::one());
        let mut square = self.normalize(base);

        for bit in 0..exponent.bits() {
            if exponent.bit(bit) {
                result = self.mul(&result, &square);
            }
            square = self.mul(&square, &square);
        }

        result
    }

    /// Computes the modular multiplicative inverse `element^-1 mod modulus`.
    ///
    /// Runs the extended Euclidean algorithm on `(modulus, element)` until the running
    /// remainder reaches 1. The tracked Bezout coefficient of `element` is the inverse,
    /// shifted into `[0, modulus)` when negative.
    ///
    /// # Errors
    ///
    /// Returns `ElGamalError::NotInvertible` if `element` is 0 or the remainder reaches 0
    /// first (i.e. `gcd(element, modulus) != 1`).
    ///
    /// # Example
    ///
    /// ```
    /// # use elgamal_crypto::ring::Ring;
    /// # use num_bigint::BigUint;
    /// let ring = Ring::try_with(BigUint::from(10u32)).unwrap();
    /// assert_eq!(ring.inv(&BigUint::from(3u32)).unwrap(), BigUint::from(7u32));
    /// assert_eq!(ring.inv(&BigUint::from(9u32)).unwrap(), BigUint::from(9u32));
    /// assert!(ring.inv(&BigUint::from(2u32)).is_err()); // gcd(2, 10) = 2
    /// assert!(ring.inv(&BigUint::from(0u32)).is_err());
    /// ```
    pub fn inv(&self, element: &BigUint) -> Result<BigUint, ElGamalError> {
        let not_invertible = || ElGamalError::NotInvertible {
            element: element.clone(),
            modulus: self.modulus.clone(),
        };

        let reduced = self.normalize(element);
        if reduced.is_zero() {
            return Err(not_invertible());
        }

        let modulus = BigInt::from(self.modulus.clone());
        let (mut w1, mut w3) = (BigInt::zero(), modulus.clone());
        let (mut r1, mut r3) = (BigInt::one(), BigInt::from(reduced));

        while !r3.is_one() {
            let q = &w3 / &r3;
            let next1 = &w1 - &q * &r1;
            let next3 = &w3 - &q * &r3;

            w1 = std::mem::replace(&mut r1, next1);
            w3 = std::mem::replace(&mut r3, next3);

            if r3.is_zero() {
                return Err(not_invertible());
            }
        }

        if r1.is_negative() {
            r1 += &modulus;
        }

        let (_, inverse) = r1.into_parts();
        Ok(inverse)
    }
}
