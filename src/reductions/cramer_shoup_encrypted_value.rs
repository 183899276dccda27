//! Knowledge of the randomness `r` of a Cramer-Shoup ciphertext encrypting a
//! public message `m`.
//!
//! With `α = H(u1, u2, e)` the ciphertext satisfies
//! `(u1, u2, e/m, v) = (g1^r, g2^r, h^r, (c·d^α)^r)`, an extended DH tuple of
//! four bases.

use serde::{Deserialize, Serialize};

use super::{ReducedProver, ReducedSimulator, ReducedVerifier, Reduction};
use crate::crypto::{DlogGroup, MessageFields, Secret};
use crate::protocol::{ProverInput, SoundnessParameter};
use crate::protocols::dh_extended::{
    DhExtendedCommonInput, DhExtendedProver, DhExtendedProverInput, DhExtendedSimulator,
    DhExtendedVerifier,
};
use crate::schemes::cramer_shoup::{hash_alpha, validity_base};
use crate::schemes::{CramerShoupCiphertext, CramerShoupPublicKey};
use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct CsEncryptedValueCommonInput<G: DlogGroup> {
    public_key: CramerShoupPublicKey<G>,
    ciphertext: CramerShoupCiphertext<G>,
    message: G::Element,
}

impl<G: DlogGroup> CsEncryptedValueCommonInput<G> {
    pub fn new(
        public_key: CramerShoupPublicKey<G>,
        ciphertext: CramerShoupCiphertext<G>,
        message: G::Element,
    ) -> Self {
        Self {
            public_key,
            ciphertext,
            message,
        }
    }

    pub fn public_key(&self) -> &CramerShoupPublicKey<G> {
        &self.public_key
    }

    pub fn ciphertext(&self) -> &CramerShoupCiphertext<G> {
        &self.ciphertext
    }

    pub fn message(&self) -> &G::Element {
        &self.message
    }
}

impl<G: DlogGroup> MessageFields for CsEncryptedValueCommonInput<G> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.public_key.write_fields(out);
        self.ciphertext.write_fields(out);
        self.message.write_fields(out);
    }
}

#[derive(Clone, Debug)]
pub struct CsEncryptedValueProverInput<G: DlogGroup> {
    common: CsEncryptedValueCommonInput<G>,
    r: Secret,
}

impl<G: DlogGroup> CsEncryptedValueProverInput<G> {
    pub fn new(common: CsEncryptedValueCommonInput<G>, r: Secret) -> Self {
        Self { common, r }
    }

    pub fn common(&self) -> &CsEncryptedValueCommonInput<G> {
        &self.common
    }
}

impl<G: DlogGroup> ProverInput for CsEncryptedValueProverInput<G> {
    type Common = CsEncryptedValueCommonInput<G>;

    fn common_input(&self) -> Self::Common {
        self.common.clone()
    }
}

#[derive(Clone, Debug)]
pub struct CramerShoupEncryptedValue<G: DlogGroup> {
    group: G,
}

pub type CramerShoupEncryptedValueProver<G> =
    ReducedProver<DhExtendedProver<G>, CramerShoupEncryptedValue<G>>;
pub type CramerShoupEncryptedValueVerifier<G> =
    ReducedVerifier<DhExtendedVerifier<G>, CramerShoupEncryptedValue<G>>;
pub type CramerShoupEncryptedValueSimulator<G> =
    ReducedSimulator<DhExtendedSimulator<G>, CramerShoupEncryptedValue<G>>;

impl<G: DlogGroup> CramerShoupEncryptedValue<G> {
    pub fn new(group: G) -> Self {
        Self { group }
    }

    pub fn prover(
        group: G,
        soundness: SoundnessParameter,
    ) -> Result<CramerShoupEncryptedValueProver<G>> {
        let base = DhExtendedProver::new(group.clone(), soundness)?;
        Ok(ReducedProver::new(base, Self::new(group)))
    }

    pub fn verifier(
        group: G,
        soundness: SoundnessParameter,
    ) -> Result<CramerShoupEncryptedValueVerifier<G>> {
        let base = DhExtendedVerifier::new(group.clone(), soundness)?;
        Ok(ReducedVerifier::new(base, Self::new(group)))
    }

    pub fn simulator(
        group: G,
        soundness: SoundnessParameter,
    ) -> Result<CramerShoupEncryptedValueSimulator<G>> {
        let base = DhExtendedSimulator::new(group.clone(), soundness)?;
        Ok(ReducedSimulator::from_base(base, Self::new(group)))
    }
}

impl<G: DlogGroup> Reduction for CramerShoupEncryptedValue<G> {
    type CommonInput = CsEncryptedValueCommonInput<G>;
    type ProverInput = CsEncryptedValueProverInput<G>;
    type BaseCommonInput = DhExtendedCommonInput<G>;
    type BaseProverInput = DhExtendedProverInput<G>;

    fn reduce_common(&self, input: &Self::CommonInput) -> Result<Self::BaseCommonInput> {
        let group = &self.group;
        let key = &input.public_key;
        let ct = &input.ciphertext;
        if !group.is_member(&input.message) {
            return Err(Error::InvalidInput("message is not a group element".into()));
        }
        let alpha = hash_alpha(group, &ct.u1, &ct.u2, &ct.e);
        let e_over_m = group.multiply(&ct.e, &group.invert(&input.message));
        DhExtendedCommonInput::new(
            vec![
                key.g1.clone(),
                key.g2.clone(),
                key.h.clone(),
                validity_base(group, key, &alpha),
            ],
            vec![ct.u1.clone(), ct.u2.clone(), e_over_m, ct.v.clone()],
        )
    }

    fn reduce_prover(&self, input: &Self::ProverInput) -> Result<Self::BaseProverInput> {
        let common = self.reduce_common(&input.common)?;
        Ok(DhExtendedProverInput::new(common, input.r.clone()))
    }
}
