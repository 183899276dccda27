//! Secret big integers that are wiped from memory on drop.

use core::fmt;

use num_bigint::BigUint;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{Error, Result};

/// A secret witness value (exponent, randomness or private key).
///
/// The value is stored as big-endian bytes and zeroized when dropped. It can
/// be cloned so that one witness can back several proof sessions.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    bytes: Vec<u8>,
}

impl Secret {
    /// Wraps a secret integer.
    pub fn new(value: &BigUint) -> Self {
        Self {
            bytes: value.to_bytes_be(),
        }
    }

    /// Returns a transient copy of the secret integer.
    pub fn expose(&self) -> BigUint {
        BigUint::from_bytes_be(&self.bytes)
    }
}

impl From<BigUint> for Secret {
    fn from(value: BigUint) -> Self {
        Self::new(&value)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(..)")
    }
}

/// Ephemeral prover randomness sampled for a first message.
///
/// A `Nonce` is move-only: it is handed back by `compute_first_msg` and
/// consumed by `compute_second_msg`, so the same randomness can never answer
/// two challenges. It is zeroized when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Nonce {
    values: Vec<Vec<u8>>,
}

impl Nonce {
    /// Wraps a single ephemeral integer.
    pub fn new(value: &BigUint) -> Self {
        Self {
            values: vec![value.to_bytes_be()],
        }
    }

    /// Wraps several ephemeral integers sampled together.
    pub fn from_values(values: &[BigUint]) -> Self {
        Self {
            values: values.iter().map(BigUint::to_bytes_be).collect(),
        }
    }

    /// Returns the number of ephemeral integers held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the nonce holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a transient copy of the ephemeral integer at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the nonce holds fewer than
    /// `index + 1` values.
    pub(crate) fn value(&self, index: usize) -> Result<BigUint> {
        self.values
            .get(index)
            .map(|bytes| BigUint::from_bytes_be(bytes))
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "prover state holds {} ephemeral values, index {index} requested",
                    self.values.len()
                ))
            })
    }
}

impl fmt::Debug for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nonce({} values, ..)", self.values.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_roundtrip_and_redacted_debug() {
        let secret = Secret::new(&BigUint::from(0xdead_beefu32));
        assert_eq!(secret.expose(), BigUint::from(0xdead_beefu32));
        assert_eq!(format!("{secret:?}"), "Secret(..)");
    }

    #[test]
    fn nonce_values() {
        let nonce = Nonce::from_values(&[BigUint::from(7u32), BigUint::from(9u32)]);
        assert_eq!(nonce.len(), 2);
        assert_eq!(nonce.value(1).unwrap(), BigUint::from(9u32));
        assert!(!format!("{nonce:?}").contains('7'));
    }

    #[test]
    fn missing_nonce_value_is_an_error() {
        let nonce = Nonce::new(&BigUint::from(7u32));
        assert!(nonce.value(1).unwrap_err().is_invalid_input());
        assert!(Nonce::from_values(&[]).value(0).is_err());
    }
}
