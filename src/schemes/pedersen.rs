use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use crate::crypto::{DlogGroup, MessageFields, Secret};
use crate::{Error, Result};

/// Pedersen commitment `c = g^r · h^x`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PedersenCommitment<G: DlogGroup> {
    value: G::Element,
}

impl<G: DlogGroup> PedersenCommitment<G> {
    pub fn new(value: G::Element) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &G::Element {
        &self.value
    }
}

impl<G: DlogGroup> MessageFields for PedersenCommitment<G> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.value.write_fields(out);
    }
}

/// Commits to exponents under the public key `h`.
#[derive(Clone, Debug)]
pub struct PedersenCommitter<G: DlogGroup> {
    group: G,
    h: G::Element,
}

impl<G: DlogGroup> PedersenCommitter<G> {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `h` is not a group member.
    pub fn new(group: G, h: G::Element) -> Result<Self> {
        if !group.is_member(&h) {
            return Err(Error::InvalidParameter(
                "Pedersen key is not a group element".into(),
            ));
        }
        Ok(Self { group, h })
    }

    /// Samples a trapdoor `k` and returns the committer for `h = g^k` with `k`.
    pub fn generate<R: CryptoRngCore>(group: G, rng: &mut R) -> (Self, Secret) {
        let trapdoor = group.random_exponent(rng);
        let h = group.exponentiate_generator(&trapdoor);
        (Self { group, h }, Secret::new(&trapdoor))
    }

    pub fn group(&self) -> &G {
        &self.group
    }

    pub fn public_key(&self) -> &G::Element {
        &self.h
    }

    /// Commits to `x` with fresh randomness, returning the commitment and `r`.
    pub fn commit<R: CryptoRngCore>(
        &self,
        x: &BigUint,
        rng: &mut R,
    ) -> (PedersenCommitment<G>, Secret) {
        let r = self.group.random_exponent(rng);
        (self.commit_with(x, &r), Secret::new(&r))
    }

    pub fn commit_with(&self, x: &BigUint, r: &BigUint) -> PedersenCommitment<G> {
        let blinding = self.group.exponentiate_generator(r);
        let message = self.group.exponentiate(&self.h, x);
        PedersenCommitment::new(self.group.multiply(&blinding, &message))
    }
}
