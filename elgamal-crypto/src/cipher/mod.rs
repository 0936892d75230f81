//! # Cipher Module
//!
//! Byte-wise ElGamal: every plaintext byte `m` becomes one pair
//! `(g^k, y^k * m) mod p` under its own ephemeral exponent `k`.

use crate::arith::random_range;
use crate::errors::ElGamalError;
use crate::ring::Ring;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use rand::Rng;

use serde::{Deserialize, Serialize};

/// Smallest modulus for which every byte value is a distinct residue.
pub const MIN_BYTE_MODULUS: u32 = 256;

/// Encryption of a single byte. Both components lie in `[0, p)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiphertextUnit {
    pub c1: BigUint,
    pub c2: BigUint,
}

/// Ordered ciphertext units, one per plaintext byte.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ciphertext {
    units: Vec<CiphertextUnit>,
}

impl Ciphertext {
    pub fn units(&self) -> &[CiphertextUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CiphertextUnit> {
        self.units.iter()
    }

    /// Serializes as a JSON array of `{ "c1", "c2" }` objects with exact integer values.
    pub fn to_json(&self) -> Result<String, ElGamalError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ElGamalError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<Vec<CiphertextUnit>> for Ciphertext {
    fn from(units: Vec<CiphertextUnit>) -> Self {
        Self { units }
    }
}

impl FromIterator<CiphertextUnit> for Ciphertext {
    fn from_iter<I: IntoIterator<Item = CiphertextUnit>>(iter: I) -> Self {
        Self {
            units: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Ciphertext {
    type Item = CiphertextUnit;
    type IntoIter = std::vec::IntoIter<CiphertextUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ciphertext {
    type Item = &'a CiphertextUnit;
    type IntoIter = std::slice::Iter<'a, CiphertextUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}

fn byte_ring(prime: &BigUint) -> Result<Ring, ElGamalError> {
    if prime < &BigUint::from(MIN_BYTE_MODULUS) {
        return Err(ElGamalError::InvalidModulus(format!(
            "Modulus {} is too small to carry byte values (need at least {})",
            prime, MIN_BYTE_MODULUS
        )));
    }

    Ring::try_with(prime.clone())
}

/// Encrypts `plaintext` byte by byte.
///
/// A fresh `k` is drawn uniformly from `[1, p - 1)` for every byte, so encrypting the
/// same plaintext twice yields different ciphertexts.
///
/// # Errors
///
/// * `ElGamalError::InvalidModulus` if `prime < 256`.
/// * `ElGamalError::InvalidParameters` if `generator` or `public_key` is outside `[1, p)`.
pub fn encrypt<R: Rng + ?Sized>(
    plaintext: &[u8],
    public_key: &BigUint,
    generator: &BigUint,
    prime: &BigUint,
    rng: &mut R,
) -> Result<Ciphertext, ElGamalError> {
    let ring = byte_ring(prime)?;
    for (name, value) in [("generator", generator), ("public key", public_key)] {
        if value.is_zero() || value >= prime {
            return Err(ElGamalError::InvalidParameters(format!(
                "The {} {} is outside [1, {})",
                name, value, prime
            )));
        }
    }

    let one = BigUint::one();
    let order = prime - 1u32;

    plaintext
        .iter()
        .map(|&byte| {
            let k = random_range(rng, &one, &order)?;
            let shared = ring.pow(public_key, &k);

            Ok(CiphertextUnit {
                c1: ring.pow(generator, &k),
                c2: ring.mul(&shared, &BigUint::from(byte)),
            })
        })
        .collect()
}

/// Decrypts `ciphertext` with the private exponent.
///
/// Each unit is opened as `m = (c1^-1)^x * c2 mod p`.
///
/// # Errors
///
/// * `ElGamalError::MalformedCiphertext` if a component is not below `prime`.
/// * `ElGamalError::NotInvertible` if some `c1` is 0.
/// * `ElGamalError::ByteOutOfRange` if a recovered value exceeds 255, which points to a
///   key or parameter mismatch.
pub fn decrypt(
    ciphertext: &Ciphertext,
    private_key: &BigUint,
    prime: &BigUint,
) -> Result<Vec<u8>, ElGamalError> {
    let ring = byte_ring(prime)?;

    ciphertext
        .iter()
        .enumerate()
        .map(|(index, unit)| {
            if &unit.c1 >= prime || &unit.c2 >= prime {
                return Err(ElGamalError::MalformedCiphertext(format!(
                    "Unit {} has a component outside [0, {})",
                    index, prime
                )));
            }

            let shared_inv = ring.pow(&ring.inv(&unit.c1)?, private_key);
            let message = ring.mul(&shared_inv, &unit.c2);

            message
                .to_u8()
                .ok_or(ElGamalError::ByteOutOfRange(message))
        })
        .collect()
}
