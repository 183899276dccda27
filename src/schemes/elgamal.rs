use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use crate::crypto::{DlogGroup, MessageFields, Secret};
use crate::{Error, Result};

/// ElGamal public key `h = g^w`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ElGamalPublicKey<G: DlogGroup> {
    h: G::Element,
}

impl<G: DlogGroup> ElGamalPublicKey<G> {
    pub fn new(group: &G, h: G::Element) -> Result<Self> {
        if !group.is_member(&h) {
            return Err(Error::InvalidInput("public key is not a group element".into()));
        }
        Ok(Self { h })
    }

    /// Returns `h`.
    pub fn element(&self) -> &G::Element {
        &self.h
    }
}

impl<G: DlogGroup> MessageFields for ElGamalPublicKey<G> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.h.write_fields(out);
    }
}

/// Ciphertext `(u, v) = (g^r, h^r · m)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ElGamalCiphertext<G: DlogGroup> {
    u: G::Element,
    v: G::Element,
}

impl<G: DlogGroup> ElGamalCiphertext<G> {
    pub fn new(u: G::Element, v: G::Element) -> Self {
        Self { u, v }
    }

    pub fn u(&self) -> &G::Element {
        &self.u
    }

    pub fn v(&self) -> &G::Element {
        &self.v
    }
}

impl<G: DlogGroup> MessageFields for ElGamalCiphertext<G> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.u.write_fields(out);
        self.v.write_fields(out);
    }
}

/// Generates a key pair, returning the public key and the private exponent `w`.
pub fn generate_keypair<G: DlogGroup, R: CryptoRngCore>(
    group: &G,
    rng: &mut R,
) -> (ElGamalPublicKey<G>, Secret) {
    let w = group.random_exponent(rng);
    let h = group.exponentiate_generator(&w);
    (ElGamalPublicKey { h }, Secret::new(&w))
}

/// Encrypts a group-element message, returning the ciphertext and its randomness `r`.
pub fn encrypt<G: DlogGroup, R: CryptoRngCore>(
    group: &G,
    key: &ElGamalPublicKey<G>,
    message: &G::Element,
    rng: &mut R,
) -> (ElGamalCiphertext<G>, Secret) {
    let r = group.random_exponent(rng);
    let u = group.exponentiate_generator(&r);
    let v = group.multiply(&group.exponentiate(&key.h, &r), message);
    (ElGamalCiphertext { u, v }, Secret::new(&r))
}
