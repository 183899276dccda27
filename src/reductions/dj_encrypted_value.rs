//! Knowledge that a Damgard-Jurik ciphertext encrypts a public plaintext `x`.
//!
//! Dividing out `(1+n)^x` leaves `c' = r^N mod N'`, an encryption of zero
//! under the same randomness.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::{ReducedProver, ReducedSimulator, ReducedVerifier, Reduction};
use crate::crypto::{MessageFields, Secret};
use crate::protocol::{ProverInput, SoundnessParameter};
use crate::protocols::dj_encrypted_zero::{
    DjEncryptedZeroCommonInput, DjEncryptedZeroProver, DjEncryptedZeroProverInput,
    DjEncryptedZeroSimulator, DjEncryptedZeroVerifier,
};
use crate::schemes::{DamgardJurikCiphertext, DamgardJurikPublicKey};
use crate::Result;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DjEncryptedValueCommonInput {
    ciphertext: DamgardJurikCiphertext,
    plaintext: BigUint,
}

impl DjEncryptedValueCommonInput {
    pub fn new(ciphertext: DamgardJurikCiphertext, plaintext: BigUint) -> Self {
        Self {
            ciphertext,
            plaintext,
        }
    }

    pub fn ciphertext(&self) -> &DamgardJurikCiphertext {
        &self.ciphertext
    }

    pub fn plaintext(&self) -> &BigUint {
        &self.plaintext
    }
}

impl MessageFields for DjEncryptedValueCommonInput {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.ciphertext.write_fields(out);
        self.plaintext.write_fields(out);
    }
}

#[derive(Clone, Debug)]
pub struct DjEncryptedValueProverInput {
    common: DjEncryptedValueCommonInput,
    r: Secret,
}

impl DjEncryptedValueProverInput {
    pub fn new(common: DjEncryptedValueCommonInput, r: Secret) -> Self {
        Self { common, r }
    }

    pub fn common(&self) -> &DjEncryptedValueCommonInput {
        &self.common
    }
}

impl ProverInput for DjEncryptedValueProverInput {
    type Common = DjEncryptedValueCommonInput;

    fn common_input(&self) -> Self::Common {
        self.common.clone()
    }
}

#[derive(Clone, Debug)]
pub struct DjEncryptedValue {
    key: DamgardJurikPublicKey,
}

pub type DjEncryptedValueProver = ReducedProver<DjEncryptedZeroProver, DjEncryptedValue>;
pub type DjEncryptedValueVerifier = ReducedVerifier<DjEncryptedZeroVerifier, DjEncryptedValue>;
pub type DjEncryptedValueSimulator = ReducedSimulator<DjEncryptedZeroSimulator, DjEncryptedValue>;

impl DjEncryptedValue {
    pub fn new(key: DamgardJurikPublicKey) -> Self {
        Self { key }
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`](crate::Error::InvalidParameter)
    /// unless `t < bitlength(n) / 3`.
    pub fn prover(
        key: DamgardJurikPublicKey,
        soundness: SoundnessParameter,
    ) -> Result<DjEncryptedValueProver> {
        let base = DjEncryptedZeroProver::new(key.clone(), soundness)?;
        Ok(ReducedProver::new(base, Self::new(key)))
    }

    pub fn verifier(
        key: DamgardJurikPublicKey,
        soundness: SoundnessParameter,
    ) -> Result<DjEncryptedValueVerifier> {
        let base = DjEncryptedZeroVerifier::new(key.clone(), soundness)?;
        Ok(ReducedVerifier::new(base, Self::new(key)))
    }

    pub fn simulator(
        key: DamgardJurikPublicKey,
        soundness: SoundnessParameter,
    ) -> Result<DjEncryptedValueSimulator> {
        let base = DjEncryptedZeroSimulator::new(key.clone(), soundness)?;
        Ok(ReducedSimulator::from_base(base, Self::new(key)))
    }
}

impl Reduction for DjEncryptedValue {
    type CommonInput = DjEncryptedValueCommonInput;
    type ProverInput = DjEncryptedValueProverInput;
    type BaseCommonInput = DjEncryptedZeroCommonInput;
    type BaseProverInput = DjEncryptedZeroProverInput;

    fn reduce_common(&self, input: &Self::CommonInput) -> Result<Self::BaseCommonInput> {
        let zero = self
            .key
            .subtract_plaintext(&input.ciphertext, &input.plaintext)?;
        Ok(DjEncryptedZeroCommonInput::new(zero))
    }

    fn reduce_prover(&self, input: &Self::ProverInput) -> Result<Self::BaseProverInput> {
        let common = self.reduce_common(&input.common)?;
        Ok(DjEncryptedZeroProverInput::new(common, input.r.clone()))
    }
}
