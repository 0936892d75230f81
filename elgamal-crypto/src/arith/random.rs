//! Uniform sampling of [`BigUint`] values from a caller-owned random source.
//!
//! `num_bigint::RandBigInt` is tied to rand 0.8 while this crate uses rand 0.9,
//! so the rejection sampling is done here over `Rng::fill_bytes`.

use crate::errors::ElGamalError;

use num_bigint::BigUint;
use num_traits::Zero;

use rand::Rng;

/// Samples uniformly from `[0, bound)` by rejection over `bound.bits()` random bits.
///
/// # Errors
///
/// Returns `ElGamalError::InvalidParameters` if `bound` is zero.
pub fn random_below<R: Rng + ?Sized>(rng: &mut R, bound: &BigUint) -> Result<BigUint, ElGamalError> {
    if bound.is_zero() {
        return Err(ElGamalError::InvalidParameters(
            "Sampling bound must be positive".to_string(),
        ));
    }

    let bits = bound.bits();
    let byte_len = bits.div_ceil(8) as usize;
    let spare_bits = (byte_len as u64 * 8 - bits) as u32;
    let mut bytes = vec![0u8; byte_len];

    // Acceptance probability is above 1/2 per draw.
    loop {
        rng.fill_bytes(&mut bytes);
        if let Some(top) = bytes.last_mut() {
            *top &= 0xffu8 >> spare_bits;
        }

        let candidate = BigUint::from_bytes_le(&bytes);
        if &candidate < bound {
            return Ok(candidate);
        }
    }
}

/// Samples uniformly from `[low, high)`.
///
/// # Errors
///
/// Returns `ElGamalError::InvalidParameters` if the range is empty.
pub fn random_range<R: Rng + ?Sized>(
    rng: &mut R,
    low: &BigUint,
    high: &BigUint,
) -> Result<BigUint, ElGamalError> {
    if low >= high {
        return Err(ElGamalError::InvalidParameters(format!(
            "Empty sampling range [{}, {})",
            low, high
        )));
    }

    let width = super::sub(high, low)?;
    Ok(super::add(low, &random_below(rng, &width)?))
}
