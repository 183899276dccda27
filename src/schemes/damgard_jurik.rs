//! Damgard-Jurik public-key operations needed by the encrypted-value proofs.
//!
//! Only encryption is provided. A ciphertext carries the length parameter `ℓ`
//! it was produced with, so a proof can recompute `N = n^ℓ` and `N' = n^{ℓ+1}`.
//! `ℓ` is limited to [`MAX_LENGTH_PARAMETER`].

use num_bigint::BigUint;
use num_traits::One;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use crate::crypto::{field, MessageFields, Secret};
use crate::{Error, Result};

const MIN_MODULUS_BITS: u64 = 64;

/// Largest accepted length parameter `ℓ`.
pub const MAX_LENGTH_PARAMETER: usize = 16;

/// Public RSA modulus `n`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamgardJurikPublicKey {
    n: BigUint,
}

impl DamgardJurikPublicKey {
    /// Wraps a modulus.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for an even modulus or one shorter
    /// than 64 bits.
    pub fn new(n: BigUint) -> Result<Self> {
        if n.bits() < MIN_MODULUS_BITS || !n.bit(0) {
            return Err(Error::InvalidParameter(format!(
                "Damgard-Jurik modulus must be odd and at least {MIN_MODULUS_BITS} bits"
            )));
        }
        Ok(Self { n })
    }

    /// Returns `n`.
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    /// Returns `(N, N') = (n^ℓ, n^{ℓ+1})` for the length parameter `ℓ`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] unless `1 <= ℓ <= MAX_LENGTH_PARAMETER`.
    pub fn moduli(&self, length: usize) -> Result<(BigUint, BigUint)> {
        if length == 0 {
            return Err(Error::InvalidInput("length parameter must be positive".into()));
        }
        if length > MAX_LENGTH_PARAMETER {
            return Err(Error::InvalidInput(format!(
                "length parameter {length} exceeds {MAX_LENGTH_PARAMETER}"
            )));
        }
        let big_n = num_traits::pow(self.n.clone(), length);
        let n_prime = &big_n * &self.n;
        Ok((big_n, n_prime))
    }

    /// Encrypts `x` with fresh randomness, returning the ciphertext and `r`.
    pub fn encrypt<R: CryptoRngCore>(
        &self,
        plaintext: &BigUint,
        length: usize,
        rng: &mut R,
    ) -> Result<(DamgardJurikCiphertext, Secret)> {
        let r = field::random_unit(&self.n, rng);
        let ciphertext = self.encrypt_with(plaintext, &r, length)?;
        Ok((ciphertext, Secret::new(&r)))
    }

    /// Computes `(1+n)^x · r^{n^ℓ} mod n^{ℓ+1}`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `ℓ` is out of range, if `x >= n^ℓ`,
    /// or if `r` is not a unit mod `n`.
    pub fn encrypt_with(
        &self,
        plaintext: &BigUint,
        randomness: &BigUint,
        length: usize,
    ) -> Result<DamgardJurikCiphertext> {
        let (big_n, n_prime) = self.moduli(length)?;
        if *plaintext >= big_n {
            return Err(Error::InvalidInput("plaintext exceeds n^length".into()));
        }
        if !field::is_unit(randomness, &self.n) {
            return Err(Error::InvalidInput("randomness is not a unit mod n".into()));
        }
        let message_part = self.message_factor(plaintext, &n_prime)?;
        let random_part = field::mod_pow(randomness, &big_n, &n_prime)?;
        Ok(DamgardJurikCiphertext {
            value: (message_part * random_part) % &n_prime,
            length,
        })
    }

    /// Divides out `(1+n)^x`, leaving an encryption of zero under the same randomness.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the ciphertext's `ℓ` is out of range.
    pub fn subtract_plaintext(
        &self,
        ciphertext: &DamgardJurikCiphertext,
        plaintext: &BigUint,
    ) -> Result<DamgardJurikCiphertext> {
        let (_, n_prime) = self.moduli(ciphertext.length)?;
        let factor = self.message_factor(plaintext, &n_prime)?;
        let inverse = field::mod_inverse(&factor, &n_prime)?;
        Ok(DamgardJurikCiphertext {
            value: (&ciphertext.value * inverse) % &n_prime,
            length: ciphertext.length,
        })
    }

    fn message_factor(&self, plaintext: &BigUint, n_prime: &BigUint) -> Result<BigUint> {
        let base = &self.n + BigUint::one();
        field::mod_pow(&base, plaintext, n_prime)
    }
}

/// Ciphertext modulo `n^{ℓ+1}` together with its length parameter `ℓ`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamgardJurikCiphertext {
    value: BigUint,
    length: usize,
}

impl DamgardJurikCiphertext {
    /// Wraps a raw ciphertext value.
    pub fn new(value: BigUint, length: usize) -> Self {
        Self { value, length }
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl MessageFields for DamgardJurikCiphertext {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        out.push(self.value.to_bytes_be());
        out.push((self.length as u64).to_be_bytes().to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_dj_key;
    use rand_core::OsRng;

    #[test]
    fn rejects_weak_modulus() {
        assert!(DamgardJurikPublicKey::new(BigUint::from(35u32)).is_err());
        assert!(DamgardJurikPublicKey::new(BigUint::one() << 100).is_err());
    }

    #[test]
    fn encryption_is_homomorphic_in_plaintext() {
        let key = test_dj_key();
        let (c, r) = key.encrypt(&BigUint::from(7u32), 1, &mut OsRng).unwrap();
        let zero = key.subtract_plaintext(&c, &BigUint::from(7u32)).unwrap();
        let expected = key.encrypt_with(&BigUint::from(0u32), &r.expose(), 1).unwrap();
        assert_eq!(zero, expected);
    }

    #[test]
    fn longer_length_uses_larger_modulus() {
        let key = test_dj_key();
        let (c, _) = key.encrypt(&BigUint::from(3u32), 2, &mut OsRng).unwrap();
        assert_eq!(c.length(), 2);
        assert!(c.value() < &key.moduli(2).unwrap().1);
    }

    #[test]
    fn length_parameter_is_bounded() {
        let key = test_dj_key();
        assert!(key.moduli(MAX_LENGTH_PARAMETER).is_ok());
        for length in [0, MAX_LENGTH_PARAMETER + 1, 1 << 24, usize::MAX] {
            assert!(matches!(key.moduli(length), Err(Error::InvalidInput(_))));
            let forged = DamgardJurikCiphertext::new(BigUint::from(2u32), length);
            let result = key.subtract_plaintext(&forged, &BigUint::from(3u32));
            assert!(matches!(result, Err(Error::InvalidInput(_))));
        }
        let result = key.encrypt_with(&BigUint::from(1u32), &BigUint::from(2u32), usize::MAX);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_oversized_plaintext() {
        let key = test_dj_key();
        let too_big = key.modulus().clone();
        let result = key.encrypt_with(&too_big, &BigUint::from(2u32), 1);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
