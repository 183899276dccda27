use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;

use crate::{Error, Result};

/// Witness bases for the Miller-Rabin test.
///
/// Deterministic for every input below 3.3 * 10^24 and a strong probabilistic
/// test above that.
const MILLER_RABIN_BASES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// Computes `base^exp mod modulus`.
///
/// Timing depends on the operands; constant-time arithmetic is a property of
/// the big-integer backend, not of this crate.
pub fn mod_pow(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> Result<BigUint> {
    if modulus.is_zero() {
        return Err(Error::InvalidParameter("modulus cannot be zero".to_string()));
    }
    Ok(base.modpow(exp, modulus))
}

/// Computes the inverse of `value` modulo `modulus`.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `value` is not a unit modulo `modulus`.
pub fn mod_inverse(value: &BigUint, modulus: &BigUint) -> Result<BigUint> {
    if modulus.is_zero() {
        return Err(Error::InvalidParameter("modulus cannot be zero".to_string()));
    }
    value
        .modinv(modulus)
        .ok_or_else(|| Error::InvalidInput("value is not invertible modulo n".to_string()))
}

/// Computes `(a - b) mod modulus` without leaving the unsigned domain.
pub fn mod_sub(a: &BigUint, b: &BigUint, modulus: &BigUint) -> BigUint {
    let a = a % modulus;
    let b = b % modulus;
    if a >= b {
        a - b
    } else {
        modulus - (b - a)
    }
}

/// Samples a uniform integer in `[0, bound)`.
pub fn random_below<R: CryptoRngCore>(bound: &BigUint, rng: &mut R) -> BigUint {
    rng.gen_biguint_below(bound)
}

/// Samples a uniform element of `Z*_n`.
pub fn random_unit<R: CryptoRngCore>(n: &BigUint, rng: &mut R) -> BigUint {
    loop {
        let candidate = rng.gen_biguint_range(&BigUint::one(), n);
        if candidate.gcd(n).is_one() {
            return candidate;
        }
    }
}

/// Returns `true` if `value` lies in `[1, n)` and is coprime to `n`.
pub fn is_unit(value: &BigUint, n: &BigUint) -> bool {
    !value.is_zero() && value < n && value.gcd(n).is_one()
}

/// Miller-Rabin primality test over fixed witness bases.
pub fn is_probable_prime(n: &BigUint) -> bool {
    let two = BigUint::from(2u32);
    if *n < two {
        return false;
    }
    for base in MILLER_RABIN_BASES {
        let base = BigUint::from(base);
        if *n == base {
            return true;
        }
        if (n % &base).is_zero() {
            return false;
        }
    }

    let n_minus_one = n - 1u32;
    let rounds = n_minus_one.trailing_zeros().unwrap_or(0);
    let odd_part = &n_minus_one >> rounds;

    'witness: for base in MILLER_RABIN_BASES {
        let mut x = BigUint::from(base).modpow(&odd_part, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..rounds {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}
