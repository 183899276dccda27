//! Soundness parameter and challenge types shared by every protocol.

use core::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use subtle::{Choice, ConstantTimeEq};
use tracing::warn;

use crate::crypto::MessageFields;
use crate::{Error, Result};

/// Largest accepted soundness parameter in bits.
pub const MAX_SOUNDNESS_BITS: usize = 4096;

/// Challenge bit length `t`.
///
/// Fixed when a protocol role is constructed. A challenge is exactly `t / 8`
/// bytes, so `t` must be a positive multiple of 8 no larger than
/// [`MAX_SOUNDNESS_BITS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundnessParameter(usize);

impl SoundnessParameter {
    /// Creates a soundness parameter of `bits` bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `bits` is zero, not a multiple
    /// of 8, or above [`MAX_SOUNDNESS_BITS`].
    pub fn new(bits: usize) -> Result<Self> {
        if bits == 0 || bits % 8 != 0 {
            return Err(Error::InvalidParameter(format!(
                "soundness parameter must be a positive multiple of 8, got {bits}"
            )));
        }
        if bits > MAX_SOUNDNESS_BITS {
            return Err(Error::InvalidParameter(format!(
                "soundness parameter {bits} exceeds {MAX_SOUNDNESS_BITS} bits"
            )));
        }
        Ok(Self(bits))
    }

    /// Returns `t` in bits.
    pub fn bits(&self) -> usize {
        self.0
    }

    /// Returns the challenge length `t / 8` in bytes.
    pub fn challenge_len(&self) -> usize {
        self.0 / 8
    }

    /// Checks `2^t < q` for protocols over a group of order `q`.
    pub fn check_group_order(&self, order: &BigUint) -> Result<()> {
        // 2^t < q  <=>  2^t <= q - 1  <=>  bits(q - 1) > t
        let fits = !order.is_zero() && (order - BigUint::one()).bits() > self.0 as u64;
        if !fits {
            return Err(Error::InvalidParameter(format!(
                "soundness parameter {} requires 2^t < q, q has {} bits",
                self.0,
                order.bits()
            )));
        }
        Ok(())
    }

    /// Checks `t < bitlength(n) / 3` for protocols over an RSA modulus `n`.
    pub fn check_modulus(&self, modulus: &BigUint) -> Result<()> {
        let limit = modulus.bits() as usize / 3;
        if self.0 >= limit {
            return Err(Error::InvalidParameter(format!(
                "soundness parameter {} requires t < bitlength(n)/3 = {limit}",
                self.0
            )));
        }
        Ok(())
    }

    /// Checks that a sub-protocol's parameter matches this one.
    pub fn ensure_same(&self, other: SoundnessParameter, what: &str) -> Result<()> {
        if *self != other {
            return Err(Error::InvalidParameter(format!(
                "{what} has soundness parameter {}, expected {}",
                other.0, self.0
            )));
        }
        Ok(())
    }

    /// Checks that `challenge` is exactly `t / 8` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CheatAttempt`] on any other length.
    pub fn check_challenge(&self, challenge: &Challenge) -> Result<()> {
        if challenge.len() != self.challenge_len() {
            warn!(
                received = challenge.len(),
                expected = self.challenge_len(),
                "challenge length mismatch"
            );
            return Err(Error::CheatAttempt(format!(
                "challenge has {} bytes, expected {}",
                challenge.len(),
                self.challenge_len()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for SoundnessParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bits", self.0)
    }
}

/// Verifier challenge `e`: a big-endian bit string of `t / 8` bytes.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Challenge(Vec<u8>);

impl Challenge {
    /// Wraps externally supplied challenge bytes.
    ///
    /// The length is checked against a soundness parameter by whoever
    /// consumes the challenge.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Samples a uniform `t`-bit challenge.
    pub fn random<R: CryptoRngCore>(soundness: SoundnessParameter, rng: &mut R) -> Self {
        let mut bytes = vec![0u8; soundness.challenge_len()];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Returns the challenge bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the challenge length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for an empty challenge.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Interprets the challenge as an unsigned big-endian integer.
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }

    /// Byte-wise XOR of two challenges of equal length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CheatAttempt`] if the lengths differ.
    pub fn xor(&self, other: &Challenge) -> Result<Challenge> {
        if self.len() != other.len() {
            return Err(Error::CheatAttempt(format!(
                "cannot combine challenges of {} and {} bytes",
                self.len(),
                other.len()
            )));
        }
        Ok(Challenge(
            self.0
                .iter()
                .zip(other.0.iter())
                .map(|(a, b)| a ^ b)
                .collect(),
        ))
    }
}

impl ConstantTimeEq for Challenge {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.as_slice().ct_eq(other.0.as_slice())
    }
}

impl MessageFields for Challenge {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        out.push(self.0.clone());
    }
}

impl fmt::Debug for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Challenge({})", hex::encode(&self.0))
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}
