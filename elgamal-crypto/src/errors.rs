use num_bigint::{BigInt, BigUint};

#[derive(thiserror::Error, Debug)]
pub enum ElGamalError {
    /// Modulus is zero, not prime, or too small where primality or size is required.
    #[error("InvalidModulus: {0}")]
    InvalidModulus(String),
    /// Unsigned subtraction would go below zero.
    #[error("NegativeResult: {0}")]
    NegativeResult(String),
    #[error("Negative exponent {0} is not supported")]
    UnsupportedExponent(BigInt),
    #[error("No primitive root found modulo {0}")]
    NoPrimitiveRootFound(BigUint),
    /// gcd(element, modulus) != 1, so no multiplicative inverse exists.
    #[error("{element} is not invertible modulo {modulus}")]
    NotInvertible { element: BigUint, modulus: BigUint },
    /// Decryption produced a value that is not a byte. Usually a key or parameter mismatch.
    #[error("Decrypted value {0} does not fit in a byte")]
    ByteOutOfRange(BigUint),
    #[error("MalformedCiphertext: {0}")]
    MalformedCiphertext(String),

    #[error("No collision found: {0}")]
    NoCollisionFound(String),
    #[error("Degenerate collision: {0}")]
    DegenerateCollision(String),
    #[error("{operation} gave up after {limit} iterations")]
    BoundExceeded { operation: &'static str, limit: u64 },

    #[error("InvalidParameters: {0}")]
    InvalidParameters(String),

    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Plaintext is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl ElGamalError {
    /// True for the expected "not found" outcomes of bounded or probabilistic searches.
    ///
    /// Callers may retry these with wider limits or another random walk; every other
    /// variant signals a misused API.
    pub fn is_search_failure(&self) -> bool {
        matches!(
            self,
            ElGamalError::NoCollisionFound(_)
                | ElGamalError::DegenerateCollision(_)
                | ElGamalError::BoundExceeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_failures_are_classified() {
        assert!(ElGamalError::NoCollisionFound("h = 5".into()).is_search_failure());
        assert!(ElGamalError::DegenerateCollision("d = 2".into()).is_search_failure());
        assert!(
            ElGamalError::BoundExceeded {
                operation: "pollard_rho",
                limit: 10
            }
            .is_search_failure()
        );
        assert!(!ElGamalError::InvalidModulus("0".into()).is_search_failure());
        assert!(!ElGamalError::ByteOutOfRange(BigUint::from(300u32)).is_search_failure());
    }

    #[test]
    fn test_error_messages() {
        let err = ElGamalError::NotInvertible {
            element: BigUint::from(4u32),
            modulus: BigUint::from(6u32),
        };
        assert_eq!(err.to_string(), "4 is not invertible modulo 6");

        let err = ElGamalError::BoundExceeded {
            operation: "generate_prime",
            limit: 3,
        };
        assert_eq!(err.to_string(), "generate_prime gave up after 3 iterations");
    }
}
