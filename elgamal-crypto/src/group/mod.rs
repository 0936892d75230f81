//! # Group Module
//!
//! Generator discovery and validation for the multiplicative group of integers
//! modulo a prime, and the [`GroupParameters`] pair every key is built on.

use crate::arith;
use crate::errors::ElGamalError;
use crate::primes::{is_prime, prime_factors};
use crate::ring::Ring;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use serde::{Deserialize, Serialize};

use std::collections::HashSet;

use log::debug;

/// A prime modulus together with a primitive root of it.
///
/// Deserialization re-validates both values, so an instance always upholds the
/// invariants checked by [`GroupParameters::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGroupParameters")]
pub struct GroupParameters {
    prime: BigUint,
    generator: BigUint,
}

#[derive(Deserialize)]
struct RawGroupParameters {
    prime: BigUint,
    generator: BigUint,
}

impl TryFrom<RawGroupParameters> for GroupParameters {
    type Error = ElGamalError;

    fn try_from(raw: RawGroupParameters) -> Result<Self, Self::Error> {
        GroupParameters::try_new(raw.prime, raw.generator)
    }
}

impl GroupParameters {
    /// Validates a caller-supplied `(prime, generator)` pair.
    ///
    /// # Errors
    ///
    /// * `ElGamalError::InvalidModulus` if `prime` is not an odd prime.
    /// * `ElGamalError::InvalidParameters` if `generator` is not a primitive root of `prime`.
    pub fn try_new(prime: BigUint, generator: BigUint) -> Result<Self, ElGamalError> {
        ensure_odd_prime(&prime)?;

        if generator >= prime || !is_primitive_root(&prime, &generator) {
            return Err(ElGamalError::InvalidParameters(format!(
                "{} is not a primitive root modulo {}",
                generator, prime
            )));
        }

        Ok(Self { prime, generator })
    }

    /// Builds parameters for `prime` using its smallest primitive root.
    pub fn from_prime(prime: BigUint, max_candidates: u64) -> Result<Self, ElGamalError> {
        ensure_odd_prime(&prime)?;
        let generator = find_primitive_root(&prime, max_candidates)?;

        Ok(Self { prime, generator })
    }

    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    pub fn generator(&self) -> &BigUint {
        &self.generator
    }

    /// Order of the group, `prime - 1`.
    pub fn order(&self) -> BigUint {
        &self.prime - 1u32
    }

    /// The ring Z_p the group lives in.
    pub fn ring(&self) -> Ring {
        Ring::with_prime(self.prime.clone())
    }
}

fn ensure_odd_prime(prime: &BigUint) -> Result<(), ElGamalError> {
    if prime < &BigUint::from(3u32) || !is_prime(prime) {
        return Err(ElGamalError::InvalidModulus(format!(
            "{} is not an odd prime",
            prime
        )));
    }

    Ok(())
}

/// Returns true iff `a` generates the whole multiplicative group modulo `p`.
///
/// `a` is reduced modulo `p` first; 0 and 1 are never generators. The order of `a`
/// is `p - 1` exactly when `a^(p-1) = 1` and `a^((p-1)/q) != 1` for every prime
/// factor `q` of `p - 1`. For a composite `p` no element has order `p - 1`, so the
/// answer is false there as well.
///
/// # Example
///
/// ```
/// # use elgamal_crypto::group::is_primitive_root;
/// # use num_bigint::BigUint;
/// let seven = BigUint::from(7u32);
/// assert!(is_primitive_root(&seven, &BigUint::from(3u32)));
/// assert!(!is_primitive_root(&seven, &BigUint::from(2u32)));
/// ```
pub fn is_primitive_root(p: &BigUint, a: &BigUint) -> bool {
    let Ok(ring) = Ring::try_with(p.clone()) else {
        return false;
    };
    let Ok(order) = arith::sub(p, &BigUint::one()) else {
        return false;
    };

    let factors: Vec<BigUint> = prime_factors(&order).into_iter().map(|(q, _)| q).collect();
    has_full_order(&ring, &order, &factors, a)
}

fn has_full_order(ring: &Ring, order: &BigUint, factors: &[BigUint], a: &BigUint) -> bool {
    let a = ring.normalize(a);
    if a.is_zero() || a.is_one() {
        return false;
    }

    if !ring.pow(&a, order).is_one() {
        return false;
    }

    factors.iter().all(|q| !ring.pow(&a, &(order / q)).is_one())
}

/// Returns true iff `a, a^2, ..., a^(p-1) mod p` are `p - 1` distinct residues.
///
/// This walks the whole cyclic subgroup, O(p) in time and memory, and refuses
/// moduli whose group is larger than `max_order`.
///
/// # Errors
///
/// * `ElGamalError::InvalidModulus` if `p` is 0.
/// * `ElGamalError::BoundExceeded` if `p - 1 > max_order`.
pub fn is_primitive_root_exhaustive(
    p: &BigUint,
    a: &BigUint,
    max_order: u64,
) -> Result<bool, ElGamalError> {
    let ring = Ring::try_with(p.clone())?;
    let a = ring.normalize(a);
    if a.is_zero() || a.is_one() {
        return Ok(false);
    }

    let order = arith::sub(p, &BigUint::one())?
        .to_u64()
        .filter(|&order| order <= max_order)
        .ok_or(ElGamalError::BoundExceeded {
            operation: "is_primitive_root_exhaustive",
            limit: max_order,
        })?;

    let mut seen = HashSet::with_capacity(order as usize);
    let mut last = BigUint::one();
    for _ in 0..order {
        last = ring.mul(&last, &a);
        if !seen.insert(last.clone()) {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Finds the smallest primitive root modulo `p`.
///
/// # Errors
///
/// * `ElGamalError::InvalidModulus` if `p < 2`.
/// * `ElGamalError::BoundExceeded` if more than `max_candidates` values were tried.
/// * `ElGamalError::NoPrimitiveRootFound` if every residue was rejected, which only
///   happens for moduli that are not prime (or for `p = 2`).
pub fn find_primitive_root(p: &BigUint, max_candidates: u64) -> Result<BigUint, ElGamalError> {
    if p < &BigUint::from(2u32) {
        return Err(ElGamalError::InvalidModulus(format!(
            "Cannot search for a primitive root modulo {}",
            p
        )));
    }

    let ring = Ring::try_with(p.clone())?;
    let order = arith::sub(p, &BigUint::one())?;
    let factors: Vec<BigUint> = prime_factors(&order).into_iter().map(|(q, _)| q).collect();

    let mut candidate = BigUint::from(2u32);
    let mut tried = 0u64;
    while &candidate < p {
        if tried == max_candidates {
            return Err(ElGamalError::BoundExceeded {
                operation: "find_primitive_root",
                limit: max_candidates,
            });
        }
        tried += 1;

        if has_full_order(&ring, &order, &factors, &candidate) {
            debug!("primitive root {} of {} after {} candidates", candidate, p, tried);
            return Ok(candidate);
        }
        candidate += 1u32;
    }

    Err(ElGamalError::NoPrimitiveRootFound(p.clone()))
}
