use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use super::{check_group_setup, ensure_members, relation_holds, response, simulated_commitment};
use crate::crypto::{DlogGroup, MessageFields, Nonce, Secret};
use crate::protocol::{
    Challenge, ProverInput, SigmaProverComputation, SigmaSimulator, SigmaTranscript,
    SigmaVerifierComputation, SimulatorOutput, SoundnessParameter,
};
use crate::Result;

/// Statement `h = g^w` for the group generator `g`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct DlogCommonInput<G: DlogGroup> {
    h: G::Element,
}

impl<G: DlogGroup> DlogCommonInput<G> {
    pub fn new(h: G::Element) -> Self {
        Self { h }
    }

    pub fn h(&self) -> &G::Element {
        &self.h
    }
}

impl<G: DlogGroup> MessageFields for DlogCommonInput<G> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.h.write_fields(out);
    }
}

/// Statement plus witness `w`.
#[derive(Clone, Debug)]
pub struct DlogProverInput<G: DlogGroup> {
    common: DlogCommonInput<G>,
    w: Secret,
}

impl<G: DlogGroup> DlogProverInput<G> {
    pub fn new(common: DlogCommonInput<G>, w: Secret) -> Self {
        Self { common, w }
    }

    pub fn common(&self) -> &DlogCommonInput<G> {
        &self.common
    }
}

impl<G: DlogGroup> ProverInput for DlogProverInput<G> {
    type Common = DlogCommonInput<G>;

    fn common_input(&self) -> Self::Common {
        self.common.clone()
    }
}

/// First message `a = g^r`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct DlogFirstMessage<G: DlogGroup> {
    a: G::Element,
}

impl<G: DlogGroup> DlogFirstMessage<G> {
    pub fn new(a: G::Element) -> Self {
        Self { a }
    }

    pub fn a(&self) -> &G::Element {
        &self.a
    }
}

impl<G: DlogGroup> MessageFields for DlogFirstMessage<G> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.a.write_fields(out);
    }
}

/// Response `z = r + e·w mod q`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DlogSecondMessage {
    z: BigUint,
}

impl DlogSecondMessage {
    pub fn new(z: BigUint) -> Self {
        Self { z }
    }

    pub fn z(&self) -> &BigUint {
        &self.z
    }
}

impl MessageFields for DlogSecondMessage {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.z.write_fields(out);
    }
}

/// Prover for knowledge of a discrete logarithm.
#[derive(Clone, Debug)]
pub struct DlogProver<G: DlogGroup> {
    group: G,
    soundness: SoundnessParameter,
}

impl<G: DlogGroup> DlogProver<G> {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`](crate::Error::InvalidParameter) if the
    /// group fails validation or `2^t >= q`.
    pub fn new(group: G, soundness: SoundnessParameter) -> Result<Self> {
        check_group_setup(&group, soundness)?;
        Ok(Self { group, soundness })
    }
}

impl<G: DlogGroup> SigmaProverComputation for DlogProver<G> {
    type Input = DlogProverInput<G>;
    type FirstMessage = DlogFirstMessage<G>;
    type SecondMessage = DlogSecondMessage;
    type State = Nonce;
    type Simulator = DlogSimulator<G>;

    fn soundness(&self) -> SoundnessParameter {
        self.soundness
    }

    fn compute_first_msg<R: CryptoRngCore>(
        &self,
        _input: &Self::Input,
        rng: &mut R,
    ) -> Result<(Self::FirstMessage, Self::State)> {
        let r = self.group.random_exponent(rng);
        let a = self.group.exponentiate_generator(&r);
        Ok((DlogFirstMessage { a }, Nonce::new(&r)))
    }

    fn compute_second_msg(
        &self,
        input: &Self::Input,
        state: Self::State,
        challenge: &Challenge,
    ) -> Result<Self::SecondMessage> {
        self.soundness.check_challenge(challenge)?;
        let z = response(
            &state.value(0)?,
            &challenge.to_biguint(),
            &input.w.expose(),
            self.group.order(),
        );
        Ok(DlogSecondMessage { z })
    }

    fn simulator(&self) -> Self::Simulator {
        DlogSimulator {
            group: self.group.clone(),
            soundness: self.soundness,
        }
    }
}

/// Verifier checking `g^z == a · h^e`.
#[derive(Clone, Debug)]
pub struct DlogVerifier<G: DlogGroup> {
    group: G,
    soundness: SoundnessParameter,
}

impl<G: DlogGroup> DlogVerifier<G> {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`](crate::Error::InvalidParameter) if the
    /// group fails validation or `2^t >= q`.
    pub fn new(group: G, soundness: SoundnessParameter) -> Result<Self> {
        check_group_setup(&group, soundness)?;
        Ok(Self { group, soundness })
    }
}

impl<G: DlogGroup> SigmaVerifierComputation for DlogVerifier<G> {
    type Input = DlogCommonInput<G>;
    type FirstMessage = DlogFirstMessage<G>;
    type SecondMessage = DlogSecondMessage;

    fn soundness(&self) -> SoundnessParameter {
        self.soundness
    }

    fn verify(
        &self,
        input: &Self::Input,
        first: &Self::FirstMessage,
        challenge: &Challenge,
        second: &Self::SecondMessage,
    ) -> Result<bool> {
        self.soundness.check_challenge(challenge)?;
        let terms = [(self.group.generator(), &input.h, &first.a)];
        Ok(relation_holds(
            &self.group,
            terms,
            &challenge.to_biguint(),
            &second.z,
        ))
    }
}

/// Simulator sampling `z` and setting `a = g^z · h^{-e}`.
#[derive(Clone, Debug)]
pub struct DlogSimulator<G: DlogGroup> {
    group: G,
    soundness: SoundnessParameter,
}

impl<G: DlogGroup> DlogSimulator<G> {
    pub fn new(group: G, soundness: SoundnessParameter) -> Result<Self> {
        check_group_setup(&group, soundness)?;
        Ok(Self { group, soundness })
    }
}

impl<G: DlogGroup> SigmaSimulator for DlogSimulator<G> {
    type Input = DlogCommonInput<G>;
    type FirstMessage = DlogFirstMessage<G>;
    type SecondMessage = DlogSecondMessage;

    fn soundness(&self) -> SoundnessParameter {
        self.soundness
    }

    fn simulate<R: CryptoRngCore>(
        &self,
        input: &Self::Input,
        challenge: &Challenge,
        rng: &mut R,
    ) -> Result<SimulatorOutput<Self::FirstMessage, Self::SecondMessage>> {
        self.soundness.check_challenge(challenge)?;
        ensure_members(&self.group, [&input.h])?;
        let z = self.group.random_exponent(rng);
        let a = simulated_commitment(
            &self.group,
            self.group.generator(),
            &input.h,
            &challenge.to_biguint(),
            &z,
        );
        Ok(SigmaTranscript::new(
            DlogFirstMessage { a },
            challenge.clone(),
            DlogSecondMessage { z },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::{ModpElement, ModpGroup};
    use crate::testing::{soundness, test_group};
    use rand_core::OsRng;

    fn instance(group: &ModpGroup) -> (DlogProverInput<ModpGroup>, BigUint) {
        let w = group.random_exponent(&mut OsRng);
        let h = group.exponentiate_generator(&w);
        (DlogProverInput::new(DlogCommonInput::new(h), Secret::new(&w)), w)
    }

    #[test]
    fn honest_run_verifies() {
        let group = test_group();
        let t = soundness(64);
        let prover = DlogProver::new(group.clone(), t).unwrap();
        let verifier = DlogVerifier::new(group.clone(), t).unwrap();
        let (input, _) = instance(&group);

        let (a, state) = prover.compute_first_msg(&input, &mut OsRng).unwrap();
        let e = Challenge::random(t, &mut OsRng);
        let z = prover.compute_second_msg(&input, state, &e).unwrap();
        assert!(verifier.verify(input.common(), &a, &e, &z).unwrap());
    }

    #[test]
    fn wrong_statement_is_rejected() {
        let group = test_group();
        let t = soundness(64);
        let prover = DlogProver::new(group.clone(), t).unwrap();
        let verifier = DlogVerifier::new(group.clone(), t).unwrap();
        let (input, _) = instance(&group);
        let (other, _) = instance(&group);

        let (a, state) = prover.compute_first_msg(&input, &mut OsRng).unwrap();
        let e = Challenge::random(t, &mut OsRng);
        let z = prover.compute_second_msg(&input, state, &e).unwrap();
        assert!(!verifier.verify(other.common(), &a, &e, &z).unwrap());
    }

    #[test]
    fn non_member_first_message_is_rejected() {
        let group = test_group();
        let t = soundness(16);
        let verifier = DlogVerifier::new(group.clone(), t).unwrap();
        let (input, _) = instance(&group);
        let a = DlogFirstMessage::new(ModpElement::from_raw(group.modulus() - 1u32));
        let e = Challenge::from_bytes(vec![0, 0]);
        let z = DlogSecondMessage::new(BigUint::from(0u32));
        assert!(!verifier.verify(input.common(), &a, &e, &z).unwrap());
    }

    #[test]
    fn simulated_transcript_verifies() {
        let group = test_group();
        let t = soundness(64);
        let simulator = DlogSimulator::new(group.clone(), t).unwrap();
        let verifier = DlogVerifier::new(group.clone(), t).unwrap();
        let (input, _) = instance(&group);

        let transcript = simulator.simulate_random(input.common(), &mut OsRng).unwrap();
        assert!(transcript.verify_with(&verifier, input.common()).unwrap());
    }

    #[test]
    fn soundness_must_fit_group_order() {
        // q has 128 bits, so 2^128 >= q.
        let err = DlogProver::new(test_group(), soundness(128)).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(DlogVerifier::new(test_group(), soundness(120)).is_ok());
    }

    #[test]
    fn challenge_length_is_checked_everywhere() {
        let group = test_group();
        let t = soundness(16);
        let prover = DlogProver::new(group.clone(), t).unwrap();
        let verifier = DlogVerifier::new(group.clone(), t).unwrap();
        let (input, _) = instance(&group);
        let short = Challenge::from_bytes(vec![7]);

        let (a, state) = prover.compute_first_msg(&input, &mut OsRng).unwrap();
        let err = prover.compute_second_msg(&input, state, &short).unwrap_err();
        assert!(err.is_cheat_attempt());

        let z = DlogSecondMessage::new(BigUint::from(1u32));
        assert!(verifier
            .verify(input.common(), &a, &short, &z)
            .unwrap_err()
            .is_cheat_attempt());
        assert!(prover
            .simulator()
            .simulate(input.common(), &short, &mut OsRng)
            .unwrap_err()
            .is_cheat_attempt());
    }
}
