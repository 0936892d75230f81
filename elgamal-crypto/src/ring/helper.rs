use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;

/// Greatest common divisor of two unsigned values. `gcd(a, 0) == a`.
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

/// True when `gcd(a, b) == 1`.
pub fn is_coprime(a: &BigUint, b: &BigUint) -> bool {
    gcd(a, b).is_one()
}
