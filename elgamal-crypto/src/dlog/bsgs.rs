//! Baby-step/giant-step.
//!
//! With `H = ceil(sqrt(p)) + 1` the baby steps are `y * g^i` for `i` in `0..=H` and
//! the giant steps are `g^(j * H)` for `j` in `1..=H`. A match
//! `g^(j * H) = y * g^i` gives `x = j * H - i`, and every exponent in
//! `[0, p - 1)` has such a representation because `H^2 > p`.

use super::{SolverLimits, prepare, verify};
use crate::errors::ElGamalError;

use num_bigint::BigUint;
use num_traits::ToPrimitive;

use std::collections::HashMap;

use log::{debug, info};

/// Solves `generator^x = public_key (mod prime)` by meet-in-the-middle.
///
/// # Errors
///
/// * `ElGamalError::InvalidModulus` / `ElGamalError::InvalidParameters` for bad inputs.
/// * `ElGamalError::BoundExceeded` if `H` is larger than `limits.max_table_size`.
/// * `ElGamalError::NoCollisionFound` if no verified match exists, i.e. `public_key`
///   is not a power of `generator`.
///
/// # Example
///
/// ```
/// # use elgamal_crypto::dlog::{SolverLimits, baby_step_giant_step};
/// # use num_bigint::BigUint;
/// let x = baby_step_giant_step(
///     &BigUint::from(5u32),
///     &BigUint::from(8u32),
///     &BigUint::from(23u32),
///     &SolverLimits::default(),
/// )
/// .unwrap();
/// assert_eq!(x, BigUint::from(6u32));
/// ```
pub fn baby_step_giant_step(
    generator: &BigUint,
    public_key: &BigUint,
    prime: &BigUint,
    limits: &SolverLimits,
) -> Result<BigUint, ElGamalError> {
    let ring = prepare(generator, public_key, prime)?;
    let order = prime - 1u32;

    let mut root = prime.sqrt();
    if &(&root * &root) < prime {
        root += 1u32;
    }
    let step = root + 1u32;

    let steps = step
        .to_u64()
        .filter(|&steps| steps <= limits.max_table_size)
        .ok_or(ElGamalError::BoundExceeded {
            operation: "baby_step_giant_step",
            limit: limits.max_table_size,
        })?;

    // Baby steps keyed by value; the smallest index wins on repeats.
    let mut baby_steps: HashMap<BigUint, u64> = HashMap::with_capacity(steps as usize + 1);
    let mut baby = public_key.clone();
    for i in 0..=steps {
        baby_steps.entry(baby.clone()).or_insert(i);
        baby = ring.mul(&baby, generator);
    }

    let giant_stride = ring.pow(generator, &step);
    let mut giant = giant_stride.clone();
    for j in 1..=steps {
        if let Some(&i) = baby_steps.get(&giant) {
            let exponent = (BigUint::from(j) * &step - i) % &order;
            if verify(&ring, generator, &exponent, public_key) {
                info!("baby-step/giant-step matched at giant step {} of {}", j, steps);
                return Ok(exponent);
            }
            debug!("match at giant step {} / baby step {} failed verification", j, i);
        }
        giant = ring.mul(&giant, &giant_stride);
    }

    Err(ElGamalError::NoCollisionFound(format!(
        "{} is not a power of {} modulo {} within H = {}",
        public_key, generator, prime, steps
    )))
}
