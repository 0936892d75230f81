//! Pollard's rho for discrete logarithms.
//!
//! The walk tracks `x = g^a * y^b (mod p)` and picks its next move by which third
//! of `[0, p)` the current `x` falls into:
//!
//! | third  | move      | exponents            |
//! |--------|-----------|----------------------|
//! | first  | `x * m1`  | `a + c1`, `b + d1`   |
//! | second | `x^2`     | `2a`, `2b`           |
//! | third  | `x * m3`  | `a + c3`, `b + d3`   |
//!
//! with `m = g^c * y^d`. The first walk uses `m1 = g` and `m3 = y`; every restart
//! draws fresh multipliers, so it iterates a different function instead of
//! falling back into the same cycle.
//!
//! Floyd's tortoise and hare find `i` with `x_i = x_2i`. The collision yields
//! `(b_i - b_2i) * x = a_2i - a_i (mod p - 1)`.

use super::{SolverLimits, prepare, verify};
use crate::arith::random_below;
use crate::errors::ElGamalError;
use crate::ring::{Ring, gcd, inverse_mod};

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use rand::Rng;

use log::{debug, info, warn};

/// A group element together with its exponents over `g` and `y`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WalkPoint {
    value: BigUint,
    a: BigUint,
    b: BigUint,
}

/// Group and target shared by every walk of one search.
struct Instance<'a> {
    ring: Ring,
    exponents: Ring,
    generator: &'a BigUint,
    target: &'a BigUint,
    first_third: BigUint,
    second_third: BigUint,
}

impl<'a> Instance<'a> {
    fn new(
        ring: Ring,
        generator: &'a BigUint,
        target: &'a BigUint,
    ) -> Result<Self, ElGamalError> {
        let prime = ring.modulus().clone();
        let exponents = Ring::try_with(&prime - 1u32)?;

        Ok(Self {
            ring,
            exponents,
            generator,
            target,
            first_third: &prime / 3u32,
            second_third: &prime * 2u32 / 3u32,
        })
    }

    fn order(&self) -> &BigUint {
        self.exponents.modulus()
    }

    fn point(&self, a: BigUint, b: BigUint) -> WalkPoint {
        let value = self.ring.mul(
            &self.ring.pow(self.generator, &a),
            &self.ring.pow(self.target, &b),
        );

        WalkPoint { value, a, b }
    }

    /// The textbook walk: multiply by `g` in the first third and by `y` in the last.
    fn classic_walk(&self) -> RandomWalk<'_, 'a> {
        RandomWalk {
            instance: self,
            first_multiplier: self.point(BigUint::one(), BigUint::zero()),
            third_multiplier: self.point(BigUint::zero(), BigUint::one()),
        }
    }

    fn random_walk<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<RandomWalk<'_, 'a>, ElGamalError> {
        let order = self.order();

        Ok(RandomWalk {
            instance: self,
            first_multiplier: self.point(random_below(rng, order)?, random_below(rng, order)?),
            third_multiplier: self.point(random_below(rng, order)?, random_below(rng, order)?),
        })
    }

    fn random_start<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<WalkPoint, ElGamalError> {
        let order = self.order();
        Ok(self.point(random_below(rng, order)?, random_below(rng, order)?))
    }

    /// Turns a collision into a verified exponent.
    fn solve(
        &self,
        tortoise: &WalkPoint,
        hare: &WalkPoint,
        max_candidates: u64,
    ) -> Result<BigUint, ElGamalError> {
        let order = self.order();
        let r = self.exponents.sub(&tortoise.b, &hare.b);
        let s = self.exponents.sub(&hare.a, &tortoise.a);

        if r.is_zero() {
            return Err(ElGamalError::DegenerateCollision(
                "collision carries no information about the exponent".to_string(),
            ));
        }

        let d = gcd(&r, order);
        if d.is_one() {
            let exponent = self.exponents.mul(&inverse_mod(order, &r)?, &s);
            if verify(&self.ring, self.generator, &exponent, self.target) {
                return Ok(exponent);
            }

            return Err(ElGamalError::NoCollisionFound(format!(
                "candidate {} does not reproduce the target",
                exponent
            )));
        }

        if !(&s % &d).is_zero() {
            return Err(ElGamalError::DegenerateCollision(format!(
                "gcd {} does not divide the exponent difference",
                d
            )));
        }

        let count = d
            .to_u64()
            .filter(|&count| count <= max_candidates)
            .ok_or_else(|| {
                ElGamalError::DegenerateCollision(format!(
                    "gcd {} leaves too many candidate exponents",
                    d
                ))
            })?;

        // r/d * x = s/d (mod n/d) has one solution x0; the full solutions are x0 + k * n/d.
        let reduced_order = order / &d;
        let base = (&s / &d) * inverse_mod(&reduced_order, &(&r / &d))? % &reduced_order;

        let mut candidate = base;
        for _ in 0..count {
            if verify(&self.ring, self.generator, &candidate, self.target) {
                return Ok(candidate);
            }
            candidate += &reduced_order;
        }

        Err(ElGamalError::DegenerateCollision(format!(
            "none of the {} candidates for gcd {} reproduce the target",
            count, d
        )))
    }
}

/// One iteration function, fixed by the multipliers of the outer thirds.
struct RandomWalk<'i, 'a> {
    instance: &'i Instance<'a>,
    first_multiplier: WalkPoint,
    third_multiplier: WalkPoint,
}

impl RandomWalk<'_, '_> {
    fn step(&self, point: &WalkPoint) -> WalkPoint {
        let instance = self.instance;
        let (ring, exponents) = (&instance.ring, &instance.exponents);

        let multiplier = if point.value < instance.first_third {
            &self.first_multiplier
        } else if point.value < instance.second_third {
            return WalkPoint {
                value: ring.mul(&point.value, &point.value),
                a: exponents.add(&point.a, &point.a),
                b: exponents.add(&point.b, &point.b),
            };
        } else {
            &self.third_multiplier
        };

        WalkPoint {
            value: ring.mul(&point.value, &multiplier.value),
            a: exponents.add(&point.a, &multiplier.a),
            b: exponents.add(&point.b, &multiplier.b),
        }
    }

    /// Runs tortoise and hare from `start` until their values meet.
    fn find_collision(
        &self,
        start: WalkPoint,
        max_steps: u64,
    ) -> Result<(WalkPoint, WalkPoint), ElGamalError> {
        let mut tortoise = start.clone();
        let mut hare = start;

        for step in 1..=max_steps {
            tortoise = self.step(&tortoise);
            hare = self.step(&self.step(&hare));

            if tortoise.value == hare.value {
                debug!("rho walk collided after {} steps", step);
                return Ok((tortoise, hare));
            }
        }

        Err(ElGamalError::BoundExceeded {
            operation: "pollard_rho",
            limit: max_steps,
        })
    }
}

/// Solves `generator^x = public_key (mod prime)` with Pollard's rho.
///
/// The first walk is the classic one started at `x = 1`. Later walks draw new
/// multipliers and a random start `g^a0 * y^b0` from `rng`. A walk whose collision
/// cannot be solved is abandoned and the next one begins, up to
/// `limits.max_rho_walks` walks.
///
/// # Errors
///
/// * `ElGamalError::InvalidModulus` / `ElGamalError::InvalidParameters` for bad inputs.
/// * `ElGamalError::BoundExceeded` if a walk runs `limits.max_rho_steps` steps
///   without a collision.
/// * `ElGamalError::DegenerateCollision` or `ElGamalError::NoCollisionFound` from the
///   last walk when no walk produced a verified exponent.
pub fn pollard_rho<R: Rng + ?Sized>(
    generator: &BigUint,
    public_key: &BigUint,
    prime: &BigUint,
    limits: &SolverLimits,
    rng: &mut R,
) -> Result<BigUint, ElGamalError> {
    let ring = prepare(generator, public_key, prime)?;
    if public_key.is_one() {
        return Ok(BigUint::zero());
    }

    let instance = Instance::new(ring, generator, public_key)?;
    let mut last_failure = ElGamalError::NoCollisionFound("no walk was attempted".to_string());

    for attempt in 0..limits.max_rho_walks {
        let (walk, start) = if attempt == 0 {
            let start = instance.point(BigUint::zero(), BigUint::zero());
            (instance.classic_walk(), start)
        } else {
            (instance.random_walk(rng)?, instance.random_start(rng)?)
        };

        let (tortoise, hare) = walk.find_collision(start, limits.max_rho_steps)?;
        match instance.solve(&tortoise, &hare, limits.max_degenerate_candidates) {
            Ok(exponent) => {
                info!("pollard rho recovered the exponent on walk {}", attempt + 1);
                return Ok(exponent);
            }
            Err(err) if err.is_search_failure() => {
                warn!("rho walk {} failed: {}", attempt + 1, err);
                last_failure = err;
            }
            Err(err) => return Err(err),
        }
    }

    Err(last_failure)
}
