use super::{ReducedProver, ReducedSimulator, ReducedVerifier, Reduction};
use crate::crypto::{DlogGroup, Secret};
use crate::protocol::{ProverInput, SoundnessParameter};
use crate::protocols::dlog::{
    DlogCommonInput, DlogProver, DlogProverInput, DlogSimulator, DlogVerifier,
};
use crate::schemes::ElGamalPublicKey;
use crate::Result;

/// Public key plus the private exponent `w` with `h = g^w`.
#[derive(Clone, Debug)]
pub struct PrivateKeyProverInput<G: DlogGroup> {
    public_key: ElGamalPublicKey<G>,
    w: Secret,
}

impl<G: DlogGroup> PrivateKeyProverInput<G> {
    pub fn new(public_key: ElGamalPublicKey<G>, w: Secret) -> Self {
        Self { public_key, w }
    }

    pub fn public_key(&self) -> &ElGamalPublicKey<G> {
        &self.public_key
    }
}

impl<G: DlogGroup> ProverInput for PrivateKeyProverInput<G> {
    type Common = ElGamalPublicKey<G>;

    fn common_input(&self) -> Self::Common {
        self.public_key.clone()
    }
}

/// Reduces knowledge of an ElGamal private key to knowledge of `log_g(h)`.
#[derive(Clone, Debug)]
pub struct ElGamalPrivateKey<G: DlogGroup> {
    _group: core::marker::PhantomData<G>,
}

pub type ElGamalPrivateKeyProver<G> = ReducedProver<DlogProver<G>, ElGamalPrivateKey<G>>;
pub type ElGamalPrivateKeyVerifier<G> = ReducedVerifier<DlogVerifier<G>, ElGamalPrivateKey<G>>;
pub type ElGamalPrivateKeySimulator<G> = ReducedSimulator<DlogSimulator<G>, ElGamalPrivateKey<G>>;

impl<G: DlogGroup> ElGamalPrivateKey<G> {
    pub fn new() -> Self {
        Self {
            _group: core::marker::PhantomData,
        }
    }

    pub fn prover(group: G, soundness: SoundnessParameter) -> Result<ElGamalPrivateKeyProver<G>> {
        Ok(ReducedProver::new(DlogProver::new(group, soundness)?, Self::new()))
    }

    pub fn verifier(
        group: G,
        soundness: SoundnessParameter,
    ) -> Result<ElGamalPrivateKeyVerifier<G>> {
        Ok(ReducedVerifier::new(DlogVerifier::new(group, soundness)?, Self::new()))
    }

    pub fn simulator(
        group: G,
        soundness: SoundnessParameter,
    ) -> Result<ElGamalPrivateKeySimulator<G>> {
        Ok(ReducedSimulator::from_base(
            DlogSimulator::new(group, soundness)?,
            Self::new(),
        ))
    }
}

impl<G: DlogGroup> Default for ElGamalPrivateKey<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: DlogGroup> Reduction for ElGamalPrivateKey<G> {
    type CommonInput = ElGamalPublicKey<G>;
    type ProverInput = PrivateKeyProverInput<G>;
    type BaseCommonInput = DlogCommonInput<G>;
    type BaseProverInput = DlogProverInput<G>;

    fn reduce_common(&self, input: &Self::CommonInput) -> Result<Self::BaseCommonInput> {
        Ok(DlogCommonInput::new(input.element().clone()))
    }

    fn reduce_prover(&self, input: &Self::ProverInput) -> Result<Self::BaseProverInput> {
        let common = self.reduce_common(&input.public_key)?;
        Ok(DlogProverInput::new(common, input.w.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Challenge, SigmaProverComputation, SigmaVerifierComputation};
    use crate::schemes::elgamal;
    use crate::testing::{soundness, test_group};
    use rand_core::OsRng;

    #[test]
    fn key_holder_convinces_verifier() {
        let group = test_group();
        let t = soundness(64);
        let (pk, sk) = elgamal::generate_keypair(&group, &mut OsRng);
        let input = PrivateKeyProverInput::new(pk, sk);
        let prover = ElGamalPrivateKey::prover(group.clone(), t).unwrap();
        let verifier = ElGamalPrivateKey::verifier(group, t).unwrap();

        let (a, state) = prover.compute_first_msg(&input, &mut OsRng).unwrap();
        let e = Challenge::random(t, &mut OsRng);
        let z = prover.compute_second_msg(&input, state, &e).unwrap();
        assert!(verifier.verify(input.public_key(), &a, &e, &z).unwrap());
    }

    #[test]
    fn other_key_is_rejected() {
        let group = test_group();
        let t = soundness(64);
        let (pk, _) = elgamal::generate_keypair(&group, &mut OsRng);
        let (_, other_sk) = elgamal::generate_keypair(&group, &mut OsRng);
        let input = PrivateKeyProverInput::new(pk, other_sk);
        let prover = ElGamalPrivateKey::prover(group.clone(), t).unwrap();
        let verifier = ElGamalPrivateKey::verifier(group, t).unwrap();

        let (a, state) = prover.compute_first_msg(&input, &mut OsRng).unwrap();
        let e = Challenge::random(t, &mut OsRng);
        let z = prover.compute_second_msg(&input, state, &e).unwrap();
        assert!(!verifier.verify(input.public_key(), &a, &e, &z).unwrap());
    }
}
