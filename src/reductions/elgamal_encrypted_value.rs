//! Knowledge that an ElGamal ciphertext `(u, v)` encrypts a public message `m`.
//!
//! With `v' = v · m^{-1}` the statement becomes a DH tuple:
//!
//! * prover knows the randomness `r`: `(g, h, u, v')` with witness `r`;
//! * prover knows the private key `w`: `(g, u, h, v')` with witness `w`.

use serde::{Deserialize, Serialize};

use super::{ReducedProver, ReducedSimulator, ReducedVerifier, Reduction};
use crate::crypto::{DlogGroup, MessageFields, Secret};
use crate::protocol::{ProverInput, SoundnessParameter};
use crate::protocols::dh::{DhCommonInput, DhProver, DhProverInput, DhSimulator, DhVerifier};
use crate::schemes::{ElGamalCiphertext, ElGamalPublicKey};
use crate::{Error, Result};

/// Which secret the prover holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElGamalWitness {
    /// The encryption randomness `r`.
    Randomness,
    /// The private key `w`.
    PrivateKey,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct EncryptedValueCommonInput<G: DlogGroup> {
    public_key: ElGamalPublicKey<G>,
    ciphertext: ElGamalCiphertext<G>,
    message: G::Element,
    witness: ElGamalWitness,
}

impl<G: DlogGroup> EncryptedValueCommonInput<G> {
    pub fn new(
        public_key: ElGamalPublicKey<G>,
        ciphertext: ElGamalCiphertext<G>,
        message: G::Element,
        witness: ElGamalWitness,
    ) -> Self {
        Self {
            public_key,
            ciphertext,
            message,
            witness,
        }
    }

    pub fn public_key(&self) -> &ElGamalPublicKey<G> {
        &self.public_key
    }

    pub fn ciphertext(&self) -> &ElGamalCiphertext<G> {
        &self.ciphertext
    }

    pub fn message(&self) -> &G::Element {
        &self.message
    }

    pub fn witness(&self) -> ElGamalWitness {
        self.witness
    }
}

impl<G: DlogGroup> MessageFields for EncryptedValueCommonInput<G> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.public_key.write_fields(out);
        self.ciphertext.write_fields(out);
        self.message.write_fields(out);
        let tag = match self.witness {
            ElGamalWitness::Randomness => 0u8,
            ElGamalWitness::PrivateKey => 1u8,
        };
        out.push(vec![tag]);
    }
}

/// Statement plus the secret named by [`EncryptedValueCommonInput::witness`].
#[derive(Clone, Debug)]
pub struct EncryptedValueProverInput<G: DlogGroup> {
    common: EncryptedValueCommonInput<G>,
    secret: Secret,
}

impl<G: DlogGroup> EncryptedValueProverInput<G> {
    pub fn new(common: EncryptedValueCommonInput<G>, secret: Secret) -> Self {
        Self { common, secret }
    }

    pub fn common(&self) -> &EncryptedValueCommonInput<G> {
        &self.common
    }
}

impl<G: DlogGroup> ProverInput for EncryptedValueProverInput<G> {
    type Common = EncryptedValueCommonInput<G>;

    fn common_input(&self) -> Self::Common {
        self.common.clone()
    }
}

#[derive(Clone, Debug)]
pub struct ElGamalEncryptedValue<G: DlogGroup> {
    group: G,
}

pub type ElGamalEncryptedValueProver<G> = ReducedProver<DhProver<G>, ElGamalEncryptedValue<G>>;
pub type ElGamalEncryptedValueVerifier<G> =
    ReducedVerifier<DhVerifier<G>, ElGamalEncryptedValue<G>>;
pub type ElGamalEncryptedValueSimulator<G> =
    ReducedSimulator<DhSimulator<G>, ElGamalEncryptedValue<G>>;

impl<G: DlogGroup> ElGamalEncryptedValue<G> {
    pub fn new(group: G) -> Self {
        Self { group }
    }

    pub fn prover(
        group: G,
        soundness: SoundnessParameter,
    ) -> Result<ElGamalEncryptedValueProver<G>> {
        let base = DhProver::new(group.clone(), soundness)?;
        Ok(ReducedProver::new(base, Self::new(group)))
    }

    pub fn verifier(
        group: G,
        soundness: SoundnessParameter,
    ) -> Result<ElGamalEncryptedValueVerifier<G>> {
        let base = DhVerifier::new(group.clone(), soundness)?;
        Ok(ReducedVerifier::new(base, Self::new(group)))
    }

    pub fn simulator(
        group: G,
        soundness: SoundnessParameter,
    ) -> Result<ElGamalEncryptedValueSimulator<G>> {
        let base = DhSimulator::new(group.clone(), soundness)?;
        Ok(ReducedSimulator::from_base(base, Self::new(group)))
    }
}

impl<G: DlogGroup> Reduction for ElGamalEncryptedValue<G> {
    type CommonInput = EncryptedValueCommonInput<G>;
    type ProverInput = EncryptedValueProverInput<G>;
    type BaseCommonInput = DhCommonInput<G>;
    type BaseProverInput = DhProverInput<G>;

    fn reduce_common(&self, input: &Self::CommonInput) -> Result<Self::BaseCommonInput> {
        if !self.group.is_member(&input.message) {
            return Err(Error::InvalidInput("message is not a group element".into()));
        }
        let g = self.group.generator().clone();
        let h = input.public_key.element().clone();
        let u = input.ciphertext.u().clone();
        let v = self
            .group
            .multiply(input.ciphertext.v(), &self.group.invert(&input.message));
        Ok(match input.witness {
            ElGamalWitness::Randomness => DhCommonInput::new(g, h, u, v),
            ElGamalWitness::PrivateKey => DhCommonInput::new(g, u, h, v),
        })
    }

    fn reduce_prover(&self, input: &Self::ProverInput) -> Result<Self::BaseProverInput> {
        let common = self.reduce_common(&input.common)?;
        Ok(DhProverInput::new(common, input.secret.clone()))
    }
}
