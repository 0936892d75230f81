//! ElGamal over the multiplicative group of a prime field, with the discrete
//! logarithm attacks that break it for small primes.
//!
//! ```
//! use elgamal_crypto::dlog::{DiscreteLogMethod, SolverLimits, recover_private_key};
//! use elgamal_crypto::keypair::{KeyGenConfig, KeyPair};
//! use num_bigint::BigUint;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(2024);
//! let config = KeyGenConfig::with_prime(BigUint::from(1_000_003u32)).unwrap();
//! let pair = KeyPair::generate(&config, &mut rng).unwrap();
//!
//! let ciphertext = pair.public_key().encrypt_text("hello", &mut rng).unwrap();
//! assert_eq!(pair.private_key().decrypt_text(&ciphertext).unwrap(), "hello");
//!
//! let recovered = recover_private_key(
//!     pair.public_key(),
//!     DiscreteLogMethod::BabyStepGiantStep,
//!     &SolverLimits::default(),
//!     &mut rng,
//! )
//! .unwrap();
//! assert_eq!(&recovered, pair.private_key().exponent());
//! ```

pub mod arith;
pub mod cipher;
pub mod dlog;
pub mod errors;
pub mod group;
pub mod keypair;
pub mod primes;
pub mod ring;
