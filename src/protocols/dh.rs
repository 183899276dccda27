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

/// Diffie-Hellman tuple `(g, h, u, v)` with `u = g^w` and `v = h^w`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct DhCommonInput<G: DlogGroup> {
    g: G::Element,
    h: G::Element,
    u: G::Element,
    v: G::Element,
}

impl<G: DlogGroup> DhCommonInput<G> {
    pub fn new(g: G::Element, h: G::Element, u: G::Element, v: G::Element) -> Self {
        Self { g, h, u, v }
    }

    pub fn g(&self) -> &G::Element {
        &self.g
    }

    pub fn h(&self) -> &G::Element {
        &self.h
    }

    pub fn u(&self) -> &G::Element {
        &self.u
    }

    pub fn v(&self) -> &G::Element {
        &self.v
    }

    fn elements(&self) -> [&G::Element; 4] {
        [&self.g, &self.h, &self.u, &self.v]
    }
}

impl<G: DlogGroup> MessageFields for DhCommonInput<G> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        for element in self.elements() {
            element.write_fields(out);
        }
    }
}

#[derive(Clone, Debug)]
pub struct DhProverInput<G: DlogGroup> {
    common: DhCommonInput<G>,
    w: Secret,
}

impl<G: DlogGroup> DhProverInput<G> {
    pub fn new(common: DhCommonInput<G>, w: Secret) -> Self {
        Self { common, w }
    }

    pub fn common(&self) -> &DhCommonInput<G> {
        &self.common
    }
}

impl<G: DlogGroup> ProverInput for DhProverInput<G> {
    type Common = DhCommonInput<G>;

    fn common_input(&self) -> Self::Common {
        self.common.clone()
    }
}

/// First message `(a, b) = (g^r, h^r)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct DhFirstMessage<G: DlogGroup> {
    a: G::Element,
    b: G::Element,
}

impl<G: DlogGroup> DhFirstMessage<G> {
    pub fn new(a: G::Element, b: G::Element) -> Self {
        Self { a, b }
    }

    pub fn a(&self) -> &G::Element {
        &self.a
    }

    pub fn b(&self) -> &G::Element {
        &self.b
    }
}

impl<G: DlogGroup> MessageFields for DhFirstMessage<G> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.a.write_fields(out);
        self.b.write_fields(out);
    }
}

/// Response `z = r + e·w mod q`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhSecondMessage {
    z: BigUint,
}

impl DhSecondMessage {
    pub fn new(z: BigUint) -> Self {
        Self { z }
    }

    pub fn z(&self) -> &BigUint {
        &self.z
    }
}

impl MessageFields for DhSecondMessage {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.z.write_fields(out);
    }
}

#[derive(Clone, Debug)]
pub struct DhProver<G: DlogGroup> {
    group: G,
    soundness: SoundnessParameter,
}

impl<G: DlogGroup> DhProver<G> {
    pub fn new(group: G, soundness: SoundnessParameter) -> Result<Self> {
        check_group_setup(&group, soundness)?;
        Ok(Self { group, soundness })
    }
}

impl<G: DlogGroup> SigmaProverComputation for DhProver<G> {
    type Input = DhProverInput<G>;
    type FirstMessage = DhFirstMessage<G>;
    type SecondMessage = DhSecondMessage;
    type State = Nonce;
    type Simulator = DhSimulator<G>;

    fn soundness(&self) -> SoundnessParameter {
        self.soundness
    }

    fn compute_first_msg<R: CryptoRngCore>(
        &self,
        input: &Self::Input,
        rng: &mut R,
    ) -> Result<(Self::FirstMessage, Self::State)> {
        let r = self.group.random_exponent(rng);
        let a = self.group.exponentiate(&input.common.g, &r);
        let b = self.group.exponentiate(&input.common.h, &r);
        Ok((DhFirstMessage { a, b }, Nonce::new(&r)))
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
        Ok(DhSecondMessage { z })
    }

    fn simulator(&self) -> Self::Simulator {
        DhSimulator {
            group: self.group.clone(),
            soundness: self.soundness,
        }
    }
}

/// Verifier checking `g^z == a · u^e` and `h^z == b · v^e`.
#[derive(Clone, Debug)]
pub struct DhVerifier<G: DlogGroup> {
    group: G,
    soundness: SoundnessParameter,
}

impl<G: DlogGroup> DhVerifier<G> {
    pub fn new(group: G, soundness: SoundnessParameter) -> Result<Self> {
        check_group_setup(&group, soundness)?;
        Ok(Self { group, soundness })
    }
}

impl<G: DlogGroup> SigmaVerifierComputation for DhVerifier<G> {
    type Input = DhCommonInput<G>;
    type FirstMessage = DhFirstMessage<G>;
    type SecondMessage = DhSecondMessage;

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
        let terms = [
            (&input.g, &input.u, &first.a),
            (&input.h, &input.v, &first.b),
        ];
        Ok(relation_holds(
            &self.group,
            terms,
            &challenge.to_biguint(),
            &second.z,
        ))
    }
}

#[derive(Clone, Debug)]
pub struct DhSimulator<G: DlogGroup> {
    group: G,
    soundness: SoundnessParameter,
}

impl<G: DlogGroup> DhSimulator<G> {
    pub fn new(group: G, soundness: SoundnessParameter) -> Result<Self> {
        check_group_setup(&group, soundness)?;
        Ok(Self { group, soundness })
    }
}

impl<G: DlogGroup> SigmaSimulator for DhSimulator<G> {
    type Input = DhCommonInput<G>;
    type FirstMessage = DhFirstMessage<G>;
    type SecondMessage = DhSecondMessage;

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
        ensure_members(&self.group, input.elements())?;
        let e = challenge.to_biguint();
        let z = self.group.random_exponent(rng);
        let a = simulated_commitment(&self.group, &input.g, &input.u, &e, &z);
        let b = simulated_commitment(&self.group, &input.h, &input.v, &e, &z);
        Ok(SigmaTranscript::new(
            DhFirstMessage { a, b },
            challenge.clone(),
            DhSecondMessage { z },
        ))
    }
}
