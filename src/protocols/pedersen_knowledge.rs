use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use subtle::Choice;

use super::{check_group_setup, ensure_members, response};
use crate::crypto::{DlogGroup, MessageFields, Nonce, Secret};
use crate::protocol::{
    Challenge, ProverInput, SigmaProverComputation, SigmaSimulator, SigmaTranscript,
    SigmaVerifierComputation, SimulatorOutput, SoundnessParameter,
};
use crate::schemes::PedersenCommitment;
use crate::Result;

/// Commitment key `h` and commitment `c = g^r · h^x`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PedersenKnowledgeCommonInput<G: DlogGroup> {
    h: G::Element,
    commitment: PedersenCommitment<G>,
}

impl<G: DlogGroup> PedersenKnowledgeCommonInput<G> {
    pub fn new(h: G::Element, commitment: PedersenCommitment<G>) -> Self {
        Self { h, commitment }
    }

    pub fn h(&self) -> &G::Element {
        &self.h
    }

    pub fn commitment(&self) -> &PedersenCommitment<G> {
        &self.commitment
    }
}

impl<G: DlogGroup> MessageFields for PedersenKnowledgeCommonInput<G> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.h.write_fields(out);
        self.commitment.write_fields(out);
    }
}

/// Opening `(x, r)` of the commitment.
#[derive(Clone, Debug)]
pub struct PedersenKnowledgeProverInput<G: DlogGroup> {
    common: PedersenKnowledgeCommonInput<G>,
    x: Secret,
    r: Secret,
}

impl<G: DlogGroup> PedersenKnowledgeProverInput<G> {
    pub fn new(common: PedersenKnowledgeCommonInput<G>, x: Secret, r: Secret) -> Self {
        Self { common, x, r }
    }

    pub fn common(&self) -> &PedersenKnowledgeCommonInput<G> {
        &self.common
    }
}

impl<G: DlogGroup> ProverInput for PedersenKnowledgeProverInput<G> {
    type Common = PedersenKnowledgeCommonInput<G>;

    fn common_input(&self) -> Self::Common {
        self.common.clone()
    }
}

/// First message `a = h^α · g^β`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PedersenKnowledgeFirstMessage<G: DlogGroup> {
    a: G::Element,
}

impl<G: DlogGroup> PedersenKnowledgeFirstMessage<G> {
    pub fn new(a: G::Element) -> Self {
        Self { a }
    }

    pub fn a(&self) -> &G::Element {
        &self.a
    }
}

impl<G: DlogGroup> MessageFields for PedersenKnowledgeFirstMessage<G> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.a.write_fields(out);
    }
}

/// Responses `(α + e·x, β + e·r) mod q`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedersenKnowledgeSecondMessage {
    z_x: BigUint,
    z_r: BigUint,
}

impl PedersenKnowledgeSecondMessage {
    pub fn new(z_x: BigUint, z_r: BigUint) -> Self {
        Self { z_x, z_r }
    }

    pub fn z_x(&self) -> &BigUint {
        &self.z_x
    }

    pub fn z_r(&self) -> &BigUint {
        &self.z_r
    }
}

impl MessageFields for PedersenKnowledgeSecondMessage {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.z_x.write_fields(out);
        self.z_r.write_fields(out);
    }
}

/// `h^{z_x} · g^{z_r}`.
fn combine<G: DlogGroup>(group: &G, h: &G::Element, z_x: &BigUint, z_r: &BigUint) -> G::Element {
    group.multiply(&group.exponentiate(h, z_x), &group.exponentiate_generator(z_r))
}

#[derive(Clone, Debug)]
pub struct PedersenKnowledgeProver<G: DlogGroup> {
    group: G,
    soundness: SoundnessParameter,
}

impl<G: DlogGroup> PedersenKnowledgeProver<G> {
    pub fn new(group: G, soundness: SoundnessParameter) -> Result<Self> {
        check_group_setup(&group, soundness)?;
        Ok(Self { group, soundness })
    }
}

impl<G: DlogGroup> SigmaProverComputation for PedersenKnowledgeProver<G> {
    type Input = PedersenKnowledgeProverInput<G>;
    type FirstMessage = PedersenKnowledgeFirstMessage<G>;
    type SecondMessage = PedersenKnowledgeSecondMessage;
    type State = Nonce;
    type Simulator = PedersenKnowledgeSimulator<G>;

    fn soundness(&self) -> SoundnessParameter {
        self.soundness
    }

    fn compute_first_msg<R: CryptoRngCore>(
        &self,
        input: &Self::Input,
        rng: &mut R,
    ) -> Result<(Self::FirstMessage, Self::State)> {
        let alpha = self.group.random_exponent(rng);
        let beta = self.group.random_exponent(rng);
        let a = combine(&self.group, &input.common.h, &alpha, &beta);
        Ok((
            PedersenKnowledgeFirstMessage { a },
            Nonce::from_values(&[alpha, beta]),
        ))
    }

    fn compute_second_msg(
        &self,
        input: &Self::Input,
        state: Self::State,
        challenge: &Challenge,
    ) -> Result<Self::SecondMessage> {
        self.soundness.check_challenge(challenge)?;
        let e = challenge.to_biguint();
        let q = self.group.order();
        Ok(PedersenKnowledgeSecondMessage {
            z_x: response(&state.value(0)?, &e, &input.x.expose(), q),
            z_r: response(&state.value(1)?, &e, &input.r.expose(), q),
        })
    }

    fn simulator(&self) -> Self::Simulator {
        PedersenKnowledgeSimulator {
            group: self.group.clone(),
            soundness: self.soundness,
        }
    }
}

/// Verifier checking `h^{z_x} · g^{z_r} == a · c^e`.
#[derive(Clone, Debug)]
pub struct PedersenKnowledgeVerifier<G: DlogGroup> {
    group: G,
    soundness: SoundnessParameter,
}

impl<G: DlogGroup> PedersenKnowledgeVerifier<G> {
    pub fn new(group: G, soundness: SoundnessParameter) -> Result<Self> {
        check_group_setup(&group, soundness)?;
        Ok(Self { group, soundness })
    }
}

impl<G: DlogGroup> SigmaVerifierComputation for PedersenKnowledgeVerifier<G> {
    type Input = PedersenKnowledgeCommonInput<G>;
    type FirstMessage = PedersenKnowledgeFirstMessage<G>;
    type SecondMessage = PedersenKnowledgeSecondMessage;

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
        let q = self.group.order();
        let c = input.commitment.value();
        let well_formed = self.group.is_member(&input.h)
            & self.group.is_member(c)
            & self.group.is_member(&first.a)
            & (&second.z_x < q)
            & (&second.z_r < q);

        let lhs = combine(&self.group, &input.h, &second.z_x, &second.z_r);
        let rhs = self.group.multiply(
            &first.a,
            &self.group.exponentiate(c, &challenge.to_biguint()),
        );
        let accepted = Choice::from(u8::from(well_formed)) & Choice::from(u8::from(lhs == rhs));
        Ok(bool::from(accepted))
    }
}

/// Simulator sampling `z` and setting `a = h^{z_x} · g^{z_r} · c^{-e}`.
#[derive(Clone, Debug)]
pub struct PedersenKnowledgeSimulator<G: DlogGroup> {
    group: G,
    soundness: SoundnessParameter,
}

impl<G: DlogGroup> PedersenKnowledgeSimulator<G> {
    pub fn new(group: G, soundness: SoundnessParameter) -> Result<Self> {
        check_group_setup(&group, soundness)?;
        Ok(Self { group, soundness })
    }
}

impl<G: DlogGroup> SigmaSimulator for PedersenKnowledgeSimulator<G> {
    type Input = PedersenKnowledgeCommonInput<G>;
    type FirstMessage = PedersenKnowledgeFirstMessage<G>;
    type SecondMessage = PedersenKnowledgeSecondMessage;

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
        let c = input.commitment.value();
        ensure_members(&self.group, [&input.h, c])?;
        let z_x = self.group.random_exponent(rng);
        let z_r = self.group.random_exponent(rng);
        let shifted = self
            .group
            .invert(&self.group.exponentiate(c, &challenge.to_biguint()));
        let a = self
            .group
            .multiply(&combine(&self.group, &input.h, &z_x, &z_r), &shifted);
        Ok(SigmaTranscript::new(
            PedersenKnowledgeFirstMessage { a },
            challenge.clone(),
            PedersenKnowledgeSecondMessage { z_x, z_r },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::ModpGroup;
    use crate::schemes::PedersenCommitter;
    use crate::testing::{soundness, test_group};
    use rand_core::OsRng;

    fn opening(x: u32) -> PedersenKnowledgeProverInput<ModpGroup> {
        let (committer, _) = PedersenCommitter::generate(test_group(), &mut OsRng);
        let x = BigUint::from(x);
        let (commitment, r) = committer.commit(&x, &mut OsRng);
        let common = PedersenKnowledgeCommonInput::new(committer.public_key().clone(), commitment);
        PedersenKnowledgeProverInput::new(common, Secret::new(&x), r)
    }

    #[test]
    fn honest_opening_verifies() {
        let t = soundness(80);
        let prover = PedersenKnowledgeProver::new(test_group(), t).unwrap();
        let verifier = PedersenKnowledgeVerifier::new(test_group(), t).unwrap();
        let input = opening(1234);

        let (a, state) = prover.compute_first_msg(&input, &mut OsRng).unwrap();
        let e = Challenge::random(t, &mut OsRng);
        let z = prover.compute_second_msg(&input, state, &e).unwrap();
        assert!(verifier.verify(input.common(), &a, &e, &z).unwrap());
    }

    #[test]
    fn wrong_opening_is_rejected() {
        let t = soundness(80);
        let prover = PedersenKnowledgeProver::new(test_group(), t).unwrap();
        let verifier = PedersenKnowledgeVerifier::new(test_group(), t).unwrap();
        let honest = opening(1234);
        let forged = PedersenKnowledgeProverInput::new(
            honest.common().clone(),
            Secret::new(&BigUint::from(1235u32)),
            honest.r.clone(),
        );

        let (a, state) = prover.compute_first_msg(&forged, &mut OsRng).unwrap();
        let e = Challenge::from_bytes(vec![0x11; 10]);
        let z = prover.compute_second_msg(&forged, state, &e).unwrap();
        assert!(!verifier.verify(forged.common(), &a, &e, &z).unwrap());
    }

    #[test]
    fn simulated_transcript_verifies() {
        let t = soundness(80);
        let prover = PedersenKnowledgeProver::new(test_group(), t).unwrap();
        let verifier = PedersenKnowledgeVerifier::new(test_group(), t).unwrap();
        let input = opening(9);
        let transcript = prover
            .simulator()
            .simulate_random(input.common(), &mut OsRng)
            .unwrap();
        assert!(transcript.verify_with(&verifier, input.common()).unwrap());
    }
}
