use crate::arith::{self, random_range};
use crate::cipher::{self, Ciphertext};
use crate::errors::ElGamalError;
use crate::group::GroupParameters;
use crate::keypair::config::KeyGenConfig;
use crate::primes::generate_prime;
use crate::ring::is_coprime;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use rand::Rng;

use std::fmt;

use log::info;

/// The secret exponent `x` with the group it belongs to.
///
/// `Debug` hides the exponent.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    params: GroupParameters,
    exponent: BigUint,
}

/// `y = g^x mod p` together with `(p, g)`: everything an encrypting party or an attacker sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    params: GroupParameters,
    key: BigUint,
}

#[derive(Debug, Clone)]
pub struct KeyPair {
    public_key: PublicKey,
    private_key: PrivateKey,
}

impl KeyPair {
    /// Generates a fresh key pair.
    ///
    /// Uses `config.prime` when set (re-checked for primality), otherwise generates a
    /// prime of `config.min_prime_digits` digits. The generator is the smallest
    /// primitive root of the prime; the private exponent is sampled uniformly from
    /// `[1, p - 1)` until it is coprime to `p - 1`.
    pub fn generate<R: Rng + ?Sized>(
        config: &KeyGenConfig,
        rng: &mut R,
    ) -> Result<Self, ElGamalError> {
        config.validate()?;
        let limits = &config.limits;

        let prime = match &config.prime {
            Some(prime) => prime.clone(),
            None => generate_prime(rng, config.min_prime_digits, limits.max_prime_attempts)?,
        };

        let params = GroupParameters::from_prime(prime, limits.max_root_candidates)?;
        Self::from_params(params, limits.max_key_attempts, rng)
    }

    /// Samples a private exponent for existing group parameters.
    pub fn from_params<R: Rng + ?Sized>(
        params: GroupParameters,
        max_attempts: u64,
        rng: &mut R,
    ) -> Result<Self, ElGamalError> {
        let order = params.order();

        for attempt in 1..=max_attempts {
            let exponent = random_range(rng, &BigUint::one(), &order)?;
            if is_coprime(&exponent, &order) {
                info!(
                    "generated key pair over a {}-digit prime after {} exponent draws",
                    arith::decimal_digits(params.prime()),
                    attempt
                );
                return Self::from_private_exponent(params, exponent);
            }
        }

        Err(ElGamalError::BoundExceeded {
            operation: "sample_private_key",
            limit: max_attempts,
        })
    }

    /// Rebuilds a key pair from a known private exponent.
    ///
    /// # Errors
    ///
    /// Returns `ElGamalError::InvalidParameters` unless `1 <= exponent < p - 1` and
    /// `gcd(exponent, p - 1) == 1`.
    pub fn from_private_exponent(
        params: GroupParameters,
        exponent: BigUint,
    ) -> Result<Self, ElGamalError> {
        let order = params.order();
        if exponent.is_zero() || exponent >= order || !is_coprime(&exponent, &order) {
            return Err(ElGamalError::InvalidParameters(format!(
                "Private exponent must lie in [1, {}) and be coprime to it",
                order
            )));
        }

        let private_key = PrivateKey { params, exponent };
        let public_key = private_key.get_public_key();

        Ok(Self {
            public_key,
            private_key,
        })
    }

    pub fn params(&self) -> &GroupParameters {
        &self.public_key.params
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Splits the pair so the private half can be held separately.
    pub fn into_parts(self) -> (PublicKey, PrivateKey) {
        (self.public_key, self.private_key)
    }
}

impl PrivateKey {
    pub fn params(&self) -> &GroupParameters {
        &self.params
    }

    pub fn exponent(&self) -> &BigUint {
        &self.exponent
    }

    pub fn get_public_key(&self) -> PublicKey {
        let key = self
            .params
            .ring()
            .pow(self.params.generator(), &self.exponent);

        PublicKey {
            params: self.params.clone(),
            key,
        }
    }

    pub fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Vec<u8>, ElGamalError> {
        cipher::decrypt(ciphertext, &self.exponent, self.params.prime())
    }

    /// Decrypts and interprets the plaintext as UTF-8.
    pub fn decrypt_text(&self, ciphertext: &Ciphertext) -> Result<String, ElGamalError> {
        Ok(String::from_utf8(self.decrypt(ciphertext)?)?)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("params", &self.params)
            .field("exponent", &"<redacted>")
            .finish()
    }
}

impl PublicKey {
    /// Pairs a public value with group parameters, checking `1 <= key < p`.
    pub fn try_new(params: GroupParameters, key: BigUint) -> Result<Self, ElGamalError> {
        if key.is_zero() || &key >= params.prime() {
            return Err(ElGamalError::InvalidParameters(format!(
                "Public key {} is outside [1, {})",
                key,
                params.prime()
            )));
        }

        Ok(Self { params, key })
    }

    pub fn params(&self) -> &GroupParameters {
        &self.params
    }

    pub fn key(&self) -> &BigUint {
        &self.key
    }

    pub fn encrypt<R: Rng + ?Sized>(
        &self,
        plaintext: &[u8],
        rng: &mut R,
    ) -> Result<Ciphertext, ElGamalError> {
        cipher::encrypt(
            plaintext,
            &self.key,
            self.params.generator(),
            self.params.prime(),
            rng,
        )
    }

    /// Encrypts the UTF-8 bytes of `text`.
    pub fn encrypt_text<R: Rng + ?Sized>(
        &self,
        text: &str,
        rng: &mut R,
    ) -> Result<Ciphertext, ElGamalError> {
        self.encrypt(text.as_bytes(), rng)
    }
}
