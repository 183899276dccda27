//! Cramer-Shoup encryption of group elements.
//!
//! The hash `α = H(u1, u2, e)` is SHA-256 over the fixed-width element
//! encodings, reduced modulo the group order.

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::crypto::{DlogGroup, MessageFields, Secret};

/// Public key `(g1, g2, c, d, h)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct CramerShoupPublicKey<G: DlogGroup> {
    pub g1: G::Element,
    pub g2: G::Element,
    pub c: G::Element,
    pub d: G::Element,
    pub h: G::Element,
}

/// Ciphertext `(u1, u2, e, v)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct CramerShoupCiphertext<G: DlogGroup> {
    pub u1: G::Element,
    pub u2: G::Element,
    pub e: G::Element,
    pub v: G::Element,
}

impl<G: DlogGroup> MessageFields for CramerShoupPublicKey<G> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        for element in [&self.g1, &self.g2, &self.c, &self.d, &self.h] {
            element.write_fields(out);
        }
    }
}

impl<G: DlogGroup> MessageFields for CramerShoupCiphertext<G> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        for element in [&self.u1, &self.u2, &self.e, &self.v] {
            element.write_fields(out);
        }
    }
}

/// Generates a public key with `g1` the group generator and `g2 = g1^k` for random `k`.
///
/// The private exponents are not retained.
pub fn generate_public_key<G: DlogGroup, R: CryptoRngCore>(
    group: &G,
    rng: &mut R,
) -> CramerShoupPublicKey<G> {
    let g1 = group.generator().clone();
    let g2 = group.exponentiate_generator(&group.random_exponent(rng));
    let [x1, x2, y1, y2, z] = [(); 5].map(|_| group.random_exponent(rng));

    let pair = |a: &BigUint, b: &BigUint| {
        group.multiply(&group.exponentiate(&g1, a), &group.exponentiate(&g2, b))
    };
    CramerShoupPublicKey {
        c: pair(&x1, &x2),
        d: pair(&y1, &y2),
        h: group.exponentiate(&g1, &z),
        g1,
        g2,
    }
}

/// Computes `α = H(u1, u2, e) mod q`.
pub fn hash_alpha<G: DlogGroup>(
    group: &G,
    u1: &G::Element,
    u2: &G::Element,
    e: &G::Element,
) -> BigUint {
    let mut hasher = Sha256::new();
    for element in [u1, u2, e] {
        hasher.update(group.element_to_bytes(element));
    }
    BigUint::from_bytes_be(&hasher.finalize()) % group.order()
}

/// Encrypts `message`, returning the ciphertext and its randomness `r`.
pub fn encrypt<G: DlogGroup, R: CryptoRngCore>(
    group: &G,
    key: &CramerShoupPublicKey<G>,
    message: &G::Element,
    rng: &mut R,
) -> (CramerShoupCiphertext<G>, Secret) {
    let r = group.random_exponent(rng);
    (encrypt_with(group, key, message, &r), Secret::new(&r))
}

pub fn encrypt_with<G: DlogGroup>(
    group: &G,
    key: &CramerShoupPublicKey<G>,
    message: &G::Element,
    r: &BigUint,
) -> CramerShoupCiphertext<G> {
    let u1 = group.exponentiate(&key.g1, r);
    let u2 = group.exponentiate(&key.g2, r);
    let e = group.multiply(&group.exponentiate(&key.h, r), message);
    let alpha = hash_alpha(group, &u1, &u2, &e);
    let v = group.exponentiate(&validity_base(group, key, &alpha), r);
    CramerShoupCiphertext { u1, u2, e, v }
}

/// Returns `c · d^α`, the base whose `r`-th power is `v`.
pub fn validity_base<G: DlogGroup>(
    group: &G,
    key: &CramerShoupPublicKey<G>,
    alpha: &BigUint,
) -> G::Element {
    group.multiply(&key.c, &group.exponentiate(&key.d, alpha))
}
