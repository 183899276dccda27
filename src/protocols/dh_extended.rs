//! Extended Diffie-Hellman tuple: one exponent `w` with `h_i = g_i^w` for
//! every `i` in `0..m`.
//!
//! Witness extraction from two accepting transcripts `(a, e, z)` and
//! `(a, e', z')` is `w = (z - z') / (e - e') mod q`, see [`extract_witness`].

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use super::{check_group_setup, ensure_members, relation_holds, response, simulated_commitment};
use crate::crypto::{field, DlogGroup, MessageFields, Nonce, Secret};
use crate::protocol::{
    Challenge, ProverInput, SigmaProverComputation, SigmaSimulator, SigmaTranscript,
    SigmaVerifierComputation, SimulatorOutput, SoundnessParameter,
};
use crate::{Error, Result};

/// Bases `g` and targets `h` of equal, non-zero length.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct DhExtendedCommonInput<G: DlogGroup> {
    g: Vec<G::Element>,
    h: Vec<G::Element>,
}

impl<G: DlogGroup> DhExtendedCommonInput<G> {
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the lists are empty or of different lengths.
    pub fn new(g: Vec<G::Element>, h: Vec<G::Element>) -> Result<Self> {
        let input = Self { g, h };
        input.check_shape()?;
        Ok(input)
    }

    pub fn g(&self) -> &[G::Element] {
        &self.g
    }

    pub fn h(&self) -> &[G::Element] {
        &self.h
    }

    /// Number of `(g_i, h_i)` pairs.
    pub fn len(&self) -> usize {
        self.g.len()
    }

    pub fn is_empty(&self) -> bool {
        self.g.is_empty()
    }

    fn check_shape(&self) -> Result<()> {
        if self.g.is_empty() || self.g.len() != self.h.len() {
            return Err(Error::InvalidInput(format!(
                "extended DH input needs matching non-empty lists, got {} bases and {} targets",
                self.g.len(),
                self.h.len()
            )));
        }
        Ok(())
    }
}

impl<G: DlogGroup> MessageFields for DhExtendedCommonInput<G> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.g.write_fields(out);
        self.h.write_fields(out);
    }
}

#[derive(Clone, Debug)]
pub struct DhExtendedProverInput<G: DlogGroup> {
    common: DhExtendedCommonInput<G>,
    w: Secret,
}

impl<G: DlogGroup> DhExtendedProverInput<G> {
    pub fn new(common: DhExtendedCommonInput<G>, w: Secret) -> Self {
        Self { common, w }
    }

    pub fn common(&self) -> &DhExtendedCommonInput<G> {
        &self.common
    }
}

impl<G: DlogGroup> ProverInput for DhExtendedProverInput<G> {
    type Common = DhExtendedCommonInput<G>;

    fn common_input(&self) -> Self::Common {
        self.common.clone()
    }
}

/// First message `(g_i^r)_i`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct DhExtendedFirstMessage<G: DlogGroup> {
    a: Vec<G::Element>,
}

impl<G: DlogGroup> DhExtendedFirstMessage<G> {
    pub fn new(a: Vec<G::Element>) -> Self {
        Self { a }
    }

    pub fn a(&self) -> &[G::Element] {
        &self.a
    }
}

impl<G: DlogGroup> MessageFields for DhExtendedFirstMessage<G> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.a.write_fields(out);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhExtendedSecondMessage {
    z: BigUint,
}

impl DhExtendedSecondMessage {
    pub fn new(z: BigUint) -> Self {
        Self { z }
    }

    pub fn z(&self) -> &BigUint {
        &self.z
    }
}

impl MessageFields for DhExtendedSecondMessage {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.z.write_fields(out);
    }
}

#[derive(Clone, Debug)]
pub struct DhExtendedProver<G: DlogGroup> {
    group: G,
    soundness: SoundnessParameter,
}

impl<G: DlogGroup> DhExtendedProver<G> {
    pub fn new(group: G, soundness: SoundnessParameter) -> Result<Self> {
        check_group_setup(&group, soundness)?;
        Ok(Self { group, soundness })
    }
}

impl<G: DlogGroup> SigmaProverComputation for DhExtendedProver<G> {
    type Input = DhExtendedProverInput<G>;
    type FirstMessage = DhExtendedFirstMessage<G>;
    type SecondMessage = DhExtendedSecondMessage;
    type State = Nonce;
    type Simulator = DhExtendedSimulator<G>;

    fn soundness(&self) -> SoundnessParameter {
        self.soundness
    }

    fn compute_first_msg<R: CryptoRngCore>(
        &self,
        input: &Self::Input,
        rng: &mut R,
    ) -> Result<(Self::FirstMessage, Self::State)> {
        input.common.check_shape()?;
        let r = self.group.random_exponent(rng);
        let a = input
            .common
            .g
            .iter()
            .map(|g| self.group.exponentiate(g, &r))
            .collect();
        Ok((DhExtendedFirstMessage { a }, Nonce::new(&r)))
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
        Ok(DhExtendedSecondMessage { z })
    }

    fn simulator(&self) -> Self::Simulator {
        DhExtendedSimulator {
            group: self.group.clone(),
            soundness: self.soundness,
        }
    }
}

/// Verifier checking `g_i^z == a_i · h_i^e` for every `i`.
#[derive(Clone, Debug)]
pub struct DhExtendedVerifier<G: DlogGroup> {
    group: G,
    soundness: SoundnessParameter,
}

impl<G: DlogGroup> DhExtendedVerifier<G> {
    pub fn new(group: G, soundness: SoundnessParameter) -> Result<Self> {
        check_group_setup(&group, soundness)?;
        Ok(Self { group, soundness })
    }
}

impl<G: DlogGroup> SigmaVerifierComputation for DhExtendedVerifier<G> {
    type Input = DhExtendedCommonInput<G>;
    type FirstMessage = DhExtendedFirstMessage<G>;
    type SecondMessage = DhExtendedSecondMessage;

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
        input.check_shape()?;
        if first.a.len() != input.len() {
            return Err(Error::InvalidInput(format!(
                "first message has {} elements, expected {}",
                first.a.len(),
                input.len()
            )));
        }
        let terms = input
            .g
            .iter()
            .zip(input.h.iter())
            .zip(first.a.iter())
            .map(|((g, h), a)| (g, h, a));
        Ok(relation_holds(
            &self.group,
            terms,
            &challenge.to_biguint(),
            &second.z,
        ))
    }
}

#[derive(Clone, Debug)]
pub struct DhExtendedSimulator<G: DlogGroup> {
    group: G,
    soundness: SoundnessParameter,
}

impl<G: DlogGroup> DhExtendedSimulator<G> {
    pub fn new(group: G, soundness: SoundnessParameter) -> Result<Self> {
        check_group_setup(&group, soundness)?;
        Ok(Self { group, soundness })
    }
}

impl<G: DlogGroup> SigmaSimulator for DhExtendedSimulator<G> {
    type Input = DhExtendedCommonInput<G>;
    type FirstMessage = DhExtendedFirstMessage<G>;
    type SecondMessage = DhExtendedSecondMessage;

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
        input.check_shape()?;
        ensure_members(&self.group, input.g.iter().chain(input.h.iter()))?;
        let e = challenge.to_biguint();
        let z = self.group.random_exponent(rng);
        let a = input
            .g
            .iter()
            .zip(input.h.iter())
            .map(|(g, h)| simulated_commitment(&self.group, g, h, &e, &z))
            .collect();
        Ok(SigmaTranscript::new(
            DhExtendedFirstMessage { a },
            challenge.clone(),
            DhExtendedSecondMessage { z },
        ))
    }
}

/// Recovers `w = (z - z') / (e - e') mod q` from two accepting responses to
/// the same first message.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the challenges are equal modulo `q`.
pub fn extract_witness(
    order: &BigUint,
    (e, z): (&Challenge, &DhExtendedSecondMessage),
    (e_prime, z_prime): (&Challenge, &DhExtendedSecondMessage),
) -> Result<BigUint> {
    let numerator = field::mod_sub(&z.z, &z_prime.z, order);
    let denominator = field::mod_sub(&e.to_biguint(), &e_prime.to_biguint(), order);
    let inverse = field::mod_inverse(&denominator, order)?;
    Ok((numerator * inverse) % order)
}
