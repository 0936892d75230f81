//! # Discrete Logarithm Module
//!
//! Recovers `x` with `g^x = y (mod p)` from public data only. Both solvers are
//! O(sqrt p), which keeps the ten-digit primes this crate generates within reach.
//!
//! A miss is an ordinary outcome, reported as [`ElGamalError::NoCollisionFound`],
//! [`ElGamalError::DegenerateCollision`] or [`ElGamalError::BoundExceeded`]
//! (see [`ElGamalError::is_search_failure`]). Every returned exponent has been
//! checked against `y`.

pub mod bsgs;
pub mod rho;

use crate::errors::ElGamalError;
use crate::keypair::PublicKey;
use crate::primes::is_prime;
use crate::ring::Ring;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use rand::Rng;

use serde::{Deserialize, Serialize};

pub use bsgs::baby_step_giant_step;
pub use rho::pollard_rho;

/// Caps on the work the solvers may do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverLimits {
    /// Largest step count `H` for baby-step/giant-step; its tables hold about `2H` entries.
    pub max_table_size: u64,
    /// Steps of the slow walker before one rho walk is abandoned.
    pub max_rho_steps: u64,
    /// Walks (the first from a fixed start, the rest from random ones) before giving up.
    pub max_rho_walks: u32,
    /// Largest `gcd(r, p - 1)` whose candidate exponents are checked one by one.
    pub max_degenerate_candidates: u64,
}

impl Default for SolverLimits {
    fn default() -> Self {
        Self {
            max_table_size: 1 << 22,
            max_rho_steps: 1 << 26,
            max_rho_walks: 32,
            max_degenerate_candidates: 1 << 16,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscreteLogMethod {
    BabyStepGiantStep,
    PollardRho,
}

/// Recovers the private exponent behind `public_key` with the chosen method.
///
/// For a primitive-root generator the result is the private exponent itself, since
/// solutions are reduced into `[0, p - 1)`.
pub fn recover_private_key<R: Rng + ?Sized>(
    public_key: &PublicKey,
    method: DiscreteLogMethod,
    limits: &SolverLimits,
    rng: &mut R,
) -> Result<BigUint, ElGamalError> {
    let params = public_key.params();
    let (generator, target, prime) = (params.generator(), public_key.key(), params.prime());

    match method {
        DiscreteLogMethod::BabyStepGiantStep => {
            baby_step_giant_step(generator, target, prime, limits)
        }
        DiscreteLogMethod::PollardRho => pollard_rho(generator, target, prime, limits, rng),
    }
}

/// Checks the solver inputs and returns the ring Z_p.
fn prepare(generator: &BigUint, target: &BigUint, prime: &BigUint) -> Result<Ring, ElGamalError> {
    if prime < &BigUint::from(3u32) || !is_prime(prime) {
        return Err(ElGamalError::InvalidModulus(format!(
            "{} is not an odd prime",
            prime
        )));
    }

    if generator.is_zero() || generator.is_one() || generator >= prime {
        return Err(ElGamalError::InvalidParameters(format!(
            "Generator {} is outside [2, {})",
            generator, prime
        )));
    }

    if target.is_zero() || target >= prime {
        return Err(ElGamalError::InvalidParameters(format!(
            "Target {} is outside [1, {})",
            target, prime
        )));
    }

    Ring::try_with(prime.clone())
}

fn verify(ring: &Ring, generator: &BigUint, exponent: &BigUint, target: &BigUint) -> bool {
    &ring.pow(generator, exponent) == target
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::group::GroupParameters;
    use crate::keypair::KeyPair;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn big(value: u64) -> BigUint {
        BigUint::from(value)
    }

    #[test]
    fn test_prepare_validation() {
        assert!(prepare(&big(5), &big(8), &big(23)).is_ok());
        assert!(matches!(
            prepare(&big(5), &big(8), &big(21)),
            Err(ElGamalError::InvalidModulus(_))
        ));
        assert!(matches!(
            prepare(&big(1), &big(8), &big(23)),
            Err(ElGamalError::InvalidParameters(_))
        ));
        assert!(matches!(
            prepare(&big(5), &big(0), &big(23)),
            Err(ElGamalError::InvalidParameters(_))
        ));
        assert!(matches!(
            prepare(&big(5), &big(23), &big(23)),
            Err(ElGamalError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_recover_private_key_both_methods() -> Result<(), ElGamalError> {
        let params = GroupParameters::try_new(big(1_000_003), big(2))?;
        let pair = KeyPair::from_private_exponent(params, big(654_323))?;
        let mut rng = StdRng::seed_from_u64(77);

        for method in [DiscreteLogMethod::BabyStepGiantStep, DiscreteLogMethod::PollardRho] {
            let recovered =
                recover_private_key(pair.public_key(), method, &SolverLimits::default(), &mut rng)?;
            assert_eq!(&recovered, pair.private_key().exponent(), "{:?}", method);
        }
        Ok(())
    }

    #[test]
    fn test_limits_json() {
        let limits: SolverLimits = serde_json::from_str(r#"{ "max_rho_walks": 3 }"#).unwrap();
        assert_eq!(limits.max_rho_walks, 3);
        assert_eq!(limits.max_table_size, SolverLimits::default().max_table_size);
    }
}
