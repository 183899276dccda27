use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::{ReducedProver, ReducedSimulator, ReducedVerifier, Reduction};
use crate::crypto::{DlogGroup, MessageFields, Secret};
use crate::protocol::{ProverInput, SoundnessParameter};
use crate::protocols::dlog::{
    DlogCommonInput, DlogProver, DlogProverInput, DlogSimulator, DlogVerifier,
};
use crate::schemes::PedersenCommitment;
use crate::{Error, Result};

/// Commitment `c` under key `h`, claimed to open to the public value `x`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct CommittedValueCommonInput<G: DlogGroup> {
    h: G::Element,
    commitment: PedersenCommitment<G>,
    x: BigUint,
}

impl<G: DlogGroup> CommittedValueCommonInput<G> {
    pub fn new(h: G::Element, commitment: PedersenCommitment<G>, x: BigUint) -> Self {
        Self { h, commitment, x }
    }

    pub fn h(&self) -> &G::Element {
        &self.h
    }

    pub fn commitment(&self) -> &PedersenCommitment<G> {
        &self.commitment
    }

    pub fn x(&self) -> &BigUint {
        &self.x
    }
}

impl<G: DlogGroup> MessageFields for CommittedValueCommonInput<G> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.h.write_fields(out);
        self.commitment.write_fields(out);
        self.x.write_fields(out);
    }
}

/// Statement plus the commitment randomness `r`.
#[derive(Clone, Debug)]
pub struct CommittedValueProverInput<G: DlogGroup> {
    common: CommittedValueCommonInput<G>,
    r: Secret,
}

impl<G: DlogGroup> CommittedValueProverInput<G> {
    pub fn new(common: CommittedValueCommonInput<G>, r: Secret) -> Self {
        Self { common, r }
    }

    pub fn common(&self) -> &CommittedValueCommonInput<G> {
        &self.common
    }
}

impl<G: DlogGroup> ProverInput for CommittedValueProverInput<G> {
    type Common = CommittedValueCommonInput<G>;

    fn common_input(&self) -> Self::Common {
        self.common.clone()
    }
}

/// Reduces "`c` opens to `x`" to knowledge of `log_g(c · h^{-x})`.
#[derive(Clone, Debug)]
pub struct PedersenCommittedValue<G: DlogGroup> {
    group: G,
}

pub type PedersenCommittedValueProver<G> =
    ReducedProver<DlogProver<G>, PedersenCommittedValue<G>>;
pub type PedersenCommittedValueVerifier<G> =
    ReducedVerifier<DlogVerifier<G>, PedersenCommittedValue<G>>;
pub type PedersenCommittedValueSimulator<G> =
    ReducedSimulator<DlogSimulator<G>, PedersenCommittedValue<G>>;

impl<G: DlogGroup> PedersenCommittedValue<G> {
    pub fn new(group: G) -> Self {
        Self { group }
    }

    pub fn prover(
        group: G,
        soundness: SoundnessParameter,
    ) -> Result<PedersenCommittedValueProver<G>> {
        let base = DlogProver::new(group.clone(), soundness)?;
        Ok(ReducedProver::new(base, Self::new(group)))
    }

    pub fn verifier(
        group: G,
        soundness: SoundnessParameter,
    ) -> Result<PedersenCommittedValueVerifier<G>> {
        let base = DlogVerifier::new(group.clone(), soundness)?;
        Ok(ReducedVerifier::new(base, Self::new(group)))
    }

    pub fn simulator(
        group: G,
        soundness: SoundnessParameter,
    ) -> Result<PedersenCommittedValueSimulator<G>> {
        let base = DlogSimulator::new(group.clone(), soundness)?;
        Ok(ReducedSimulator::from_base(base, Self::new(group)))
    }

    /// `h' = c · h^{-x}`.
    pub fn cancel(&self, input: &CommittedValueCommonInput<G>) -> Result<G::Element> {
        let c = input.commitment.value();
        if !self.group.is_member(&input.h) || !self.group.is_member(c) {
            return Err(Error::InvalidInput(
                "commitment or key is not a group element".into(),
            ));
        }
        let h_x = self.group.exponentiate(&input.h, &input.x);
        Ok(self.group.multiply(c, &self.group.invert(&h_x)))
    }
}

impl<G: DlogGroup> Reduction for PedersenCommittedValue<G> {
    type CommonInput = CommittedValueCommonInput<G>;
    type ProverInput = CommittedValueProverInput<G>;
    type BaseCommonInput = DlogCommonInput<G>;
    type BaseProverInput = DlogProverInput<G>;

    fn reduce_common(&self, input: &Self::CommonInput) -> Result<Self::BaseCommonInput> {
        Ok(DlogCommonInput::new(self.cancel(input)?))
    }

    fn reduce_prover(&self, input: &Self::ProverInput) -> Result<Self::BaseProverInput> {
        let common = self.reduce_common(&input.common)?;
        Ok(DlogProverInput::new(common, input.r.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::ModpGroup;
    use crate::protocol::{
        Challenge, SigmaProverComputation, SigmaSimulator, SigmaVerifierComputation,
    };
    use crate::schemes::PedersenCommitter;
    use crate::testing::{soundness, test_group};
    use rand_core::OsRng;

    fn committed(x: u32) -> CommittedValueProverInput<ModpGroup> {
        let (committer, _) = PedersenCommitter::generate(test_group(), &mut OsRng);
        let x = BigUint::from(x);
        let (commitment, r) = committer.commit(&x, &mut OsRng);
        let common = CommittedValueCommonInput::new(committer.public_key().clone(), commitment, x);
        CommittedValueProverInput::new(common, r)
    }

    #[test]
    fn committed_value_proof_verifies() {
        let t = soundness(80);
        let prover = PedersenCommittedValue::prover(test_group(), t).unwrap();
        let verifier = PedersenCommittedValue::verifier(test_group(), t).unwrap();
        let input = committed(31337);

        let (a, state) = prover.compute_first_msg(&input, &mut OsRng).unwrap();
        let e = Challenge::random(t, &mut OsRng);
        let z = prover.compute_second_msg(&input, state, &e).unwrap();
        assert!(verifier.verify(input.common(), &a, &e, &z).unwrap());
    }

    #[test]
    fn wrong_claimed_value_is_rejected() {
        let t = soundness(80);
        let prover = PedersenCommittedValue::prover(test_group(), t).unwrap();
        let verifier = PedersenCommittedValue::verifier(test_group(), t).unwrap();
        let honest = committed(10);
        let claim = CommittedValueCommonInput::new(
            honest.common().h().clone(),
            honest.common().commitment().clone(),
            BigUint::from(11u32),
        );
        let lying = CommittedValueProverInput::new(claim, honest.r.clone());

        let (a, state) = prover.compute_first_msg(&lying, &mut OsRng).unwrap();
        let e = Challenge::random(t, &mut OsRng);
        let z = prover.compute_second_msg(&lying, state, &e).unwrap();
        assert!(!verifier.verify(lying.common(), &a, &e, &z).unwrap());
    }

    #[test]
    fn prover_simulator_wraps_base_simulator() {
        let t = soundness(80);
        let prover = PedersenCommittedValue::prover(test_group(), t).unwrap();
        let verifier = PedersenCommittedValue::verifier(test_group(), t).unwrap();
        let input = committed(5);

        let simulator = prover.simulator();
        assert_eq!(simulator.soundness(), t);
        let transcript = simulator.simulate_random(input.common(), &mut OsRng).unwrap();
        assert!(transcript.verify_with(&verifier, input.common()).unwrap());
    }
}
