use elgamal_crypto::cipher;
use elgamal_crypto::group::GroupParameters;
use elgamal_crypto::keypair::KeyPair;
use elgamal_crypto::ring::{inverse_mod, is_coprime, pow_mod_unsigned};
use elgamal_crypto::{arith, primes};

use num_bigint::BigUint;
use num_traits::One;

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use rand::SeedableRng;
use rand::rngs::StdRng;

const PRIME: u64 = 20_996_023;
const GENERATOR: u64 = 5;

#[quickcheck]
fn prop_encrypt_decrypt_round_trip(plaintext: Vec<u8>, exponent: u32, seed: u64) -> TestResult {
    let order = PRIME - 1;
    let exponent = u64::from(exponent) % order;
    if exponent == 0 || !is_coprime(&BigUint::from(exponent), &BigUint::from(order)) {
        return TestResult::discard();
    }

    let params = match GroupParameters::try_new(BigUint::from(PRIME), BigUint::from(GENERATOR)) {
        Ok(params) => params,
        Err(err) => return TestResult::error(err.to_string()),
    };
    let pair = match KeyPair::from_private_exponent(params, BigUint::from(exponent)) {
        Ok(pair) => pair,
        Err(err) => return TestResult::error(err.to_string()),
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let decrypted = pair
        .public_key()
        .encrypt(&plaintext, &mut rng)
        .and_then(|ciphertext| pair.private_key().decrypt(&ciphertext));

    match decrypted {
        Ok(bytes) => TestResult::from_bool(bytes == plaintext),
        Err(err) => TestResult::error(err.to_string()),
    }
}

#[quickcheck]
fn prop_inverse_times_element_is_one(element: u64) -> TestResult {
    let modulus = BigUint::from(PRIME);
    let element = BigUint::from(element) % &modulus;
    if element == BigUint::ZERO {
        return TestResult::discard();
    }

    match inverse_mod(&modulus, &element) {
        Ok(inverse) => TestResult::from_bool((inverse * element) % modulus == BigUint::one()),
        Err(err) => TestResult::error(err.to_string()),
    }
}

#[quickcheck]
fn prop_pow_mod_matches_library(base: u64, exponent: u64, modulus: u64) -> TestResult {
    if modulus == 0 {
        return TestResult::discard();
    }

    let (base, exponent, modulus) = (
        BigUint::from(base),
        BigUint::from(exponent),
        BigUint::from(modulus),
    );

    match pow_mod_unsigned(&base, &exponent, &modulus) {
        Ok(value) => TestResult::from_bool(value == base.modpow(&exponent, &modulus)),
        Err(err) => TestResult::error(err.to_string()),
    }
}

#[quickcheck]
fn prop_sub_inverts_add(a: u128, b: u128) -> bool {
    let (a, b) = (BigUint::from(a), BigUint::from(b));
    let sum = arith::add(&a, &b);
    let round_trips = matches!(arith::sub(&sum, &b), Ok(ref diff) if *diff == a);
    let underflow_detected = arith::sub(&a, &sum).is_err() == (b != BigUint::ZERO);

    round_trips && underflow_detected
}

#[quickcheck]
fn prop_factors_multiply_back(n: u32) -> TestResult {
    if n < 2 {
        return TestResult::discard();
    }

    let n = BigUint::from(n);
    let factors = primes::prime_factors(&n);
    let product = factors
        .iter()
        .fold(BigUint::one(), |acc, (p, e)| acc * p.pow(*e));

    TestResult::from_bool(product == n && factors.iter().all(|(p, _)| primes::is_prime(p)))
}

#[test]
fn ciphertext_components_stay_in_range() -> Result<(), elgamal_crypto::errors::ElGamalError> {
    let mut rng = StdRng::seed_from_u64(0);
    let (p, g) = (BigUint::from(PRIME), BigUint::from(GENERATOR));
    let y = g.modpow(&BigUint::from(1_234_567u32), &p);

    let ciphertext = cipher::encrypt(&[0u8; 64], &y, &g, &p, &mut rng)?;
    assert!(
        ciphertext
            .iter()
            .all(|unit| unit.c1 > BigUint::ZERO && unit.c1 < p && unit.c2 < p)
    );
    Ok(())
}
