//! Key generation settings and the iteration bounds of its search loops.

use crate::errors::ElGamalError;
use crate::primes::{MAX_PRIME_DIGITS, is_prime};

use num_bigint::BigUint;

use serde::{Deserialize, Serialize};

/// Decimal length of generated primes when the caller does not supply one.
pub const DEFAULT_PRIME_DIGITS: u32 = 10;

/// Caps on the otherwise unbounded searches of key generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    /// Candidates sampled by prime generation before giving up.
    pub max_prime_attempts: u64,
    /// Residues tried while looking for a primitive root.
    pub max_root_candidates: u64,
    /// Private exponents sampled before one coprime to `p - 1` is found.
    pub max_key_attempts: u64,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_prime_attempts: 1_000_000,
            max_root_candidates: 1_000_000,
            max_key_attempts: 10_000,
        }
    }
}

/// Parameters for [`KeyPair::generate`](crate::keypair::KeyPair::generate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyGenConfig {
    /// Decimal length of a generated prime. Ignored when `prime` is set.
    pub min_prime_digits: u32,
    /// Caller-chosen modulus. Must be an odd prime.
    pub prime: Option<BigUint>,
    #[serde(default)]
    pub limits: SearchLimits,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self {
            min_prime_digits: DEFAULT_PRIME_DIGITS,
            prime: None,
            limits: SearchLimits::default(),
        }
    }
}

impl KeyGenConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// * `ElGamalError::InvalidParameters` if `min_prime_digits` is outside `1..=MAX_PRIME_DIGITS`.
    /// * `ElGamalError::InvalidModulus` if `prime` is given and is not an odd prime.
    pub fn try_with(
        min_prime_digits: u32,
        prime: Option<BigUint>,
        limits: SearchLimits,
    ) -> Result<Self, ElGamalError> {
        let config = Self {
            min_prime_digits,
            prime,
            limits,
        };
        config.validate()?;

        Ok(config)
    }

    /// Configuration that uses `prime` as the modulus.
    pub fn with_prime(prime: BigUint) -> Result<Self, ElGamalError> {
        Self::try_with(DEFAULT_PRIME_DIGITS, Some(prime), SearchLimits::default())
    }

    pub fn validate(&self) -> Result<(), ElGamalError> {
        if self.min_prime_digits == 0 || self.min_prime_digits > MAX_PRIME_DIGITS {
            return Err(ElGamalError::InvalidParameters(format!(
                "min_prime_digits must be within 1..={}, got {}",
                MAX_PRIME_DIGITS, self.min_prime_digits
            )));
        }

        if let Some(prime) = &self.prime {
            if prime < &BigUint::from(3u32) || !is_prime(prime) {
                return Err(ElGamalError::InvalidModulus(format!(
                    "Supplied modulus {} is not an odd prime",
                    prime
                )));
            }
        }

        Ok(())
    }

    /// Parses and validates a JSON configuration. Missing limits take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ElGamalError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;

        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ElGamalError> {
        Ok(serde_json::to_string(self)?)
    }
}
