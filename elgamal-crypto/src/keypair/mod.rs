//! # Keypair Module
//!
//! Key generation for the ElGamal scheme: a prime modulus, its smallest primitive
//! root, a private exponent coprime to the group order and the matching public value.

pub mod config;
pub mod keys;

pub use config::{DEFAULT_PRIME_DIGITS, KeyGenConfig, SearchLimits};
pub use keys::{KeyPair, PrivateKey, PublicKey};
