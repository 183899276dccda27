//! Disjunction of two statements.
//!
//! The prover answers the branch it holds a witness for and simulates the
//! other one. The verifier's challenge `e` is split as `e = e_0 XOR e_1`;
//! the prover picks the simulated branch's share before seeing `e`.

use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use subtle::{Choice, ConstantTimeEq};
use tracing::{debug, warn};

use crate::crypto::MessageFields;
use crate::protocol::{
    Challenge, ProverInput, SigmaProverComputation, SigmaSimulator, SigmaTranscript,
    SigmaVerifierComputation, SimulatorOutput, SoundnessParameter,
};
use crate::{Error, Result};

/// Public statements of both branches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrCommonInput<C0, C1> {
    first: C0,
    second: C1,
}

impl<C0, C1> OrCommonInput<C0, C1> {
    pub fn new(first: C0, second: C1) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &C0 {
        &self.first
    }

    pub fn second(&self) -> &C1 {
        &self.second
    }
}

impl<C0: MessageFields, C1: MessageFields> MessageFields for OrCommonInput<C0, C1> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.first.write_fields(out);
        self.second.write_fields(out);
    }
}

/// Witness for exactly one branch plus the other branch's public statement.
#[derive(Clone, Debug)]
pub enum OrProverInput<I0: ProverInput, I1: ProverInput> {
    /// The prover knows a witness for the first branch.
    First { input: I0, other: I1::Common },
    /// The prover knows a witness for the second branch.
    Second { other: I0::Common, input: I1 },
}

impl<I0: ProverInput, I1: ProverInput> OrProverInput<I0, I1> {
    /// Index of the branch the prover holds a witness for.
    pub fn branch(&self) -> usize {
        match self {
            Self::First { .. } => 0,
            Self::Second { .. } => 1,
        }
    }
}

impl<I0: ProverInput, I1: ProverInput> ProverInput for OrProverInput<I0, I1> {
    type Common = OrCommonInput<I0::Common, I1::Common>;

    fn common_input(&self) -> Self::Common {
        match self {
            Self::First { input, other } => OrCommonInput::new(input.common_input(), other.clone()),
            Self::Second { other, input } => {
                OrCommonInput::new(other.clone(), input.common_input())
            }
        }
    }
}

/// Response `(e_0, z_0, e_1, z_1)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrSecondMessage<Z0, Z1> {
    e0: Challenge,
    z0: Z0,
    e1: Challenge,
    z1: Z1,
}

impl<Z0, Z1> OrSecondMessage<Z0, Z1> {
    pub fn new(e0: Challenge, z0: Z0, e1: Challenge, z1: Z1) -> Self {
        Self { e0, z0, e1, z1 }
    }

    pub fn e0(&self) -> &Challenge {
        &self.e0
    }

    pub fn z0(&self) -> &Z0 {
        &self.z0
    }

    pub fn e1(&self) -> &Challenge {
        &self.e1
    }

    pub fn z1(&self) -> &Z1 {
        &self.z1
    }
}

impl<Z0: MessageFields, Z1: MessageFields> MessageFields for OrSecondMessage<Z0, Z1> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.e0.write_fields(out);
        self.z0.write_fields(out);
        self.e1.write_fields(out);
        self.z1.write_fields(out);
    }
}

/// Real-branch state plus the simulated branch's challenge share and response.
pub struct OrState<S0, S1, Z0, Z1>(OrBranchState<S0, S1, Z0, Z1>);

enum OrBranchState<S0, S1, Z0, Z1> {
    First {
        state: S0,
        simulated_challenge: Challenge,
        simulated_response: Z1,
    },
    Second {
        state: S1,
        simulated_challenge: Challenge,
        simulated_response: Z0,
    },
}

fn ensure_same_soundness(
    first: SoundnessParameter,
    second: SoundnessParameter,
) -> Result<SoundnessParameter> {
    first.ensure_same(second, "OR second branch")?;
    debug!(soundness = first.bits(), "OR composition constructed");
    Ok(first)
}

/// Prover for the disjunction of two statements.
#[derive(Clone, Debug)]
pub struct SigmaOrProver<P0, P1> {
    first: P0,
    second: P1,
    soundness: SoundnessParameter,
}

impl<P0: SigmaProverComputation, P1: SigmaProverComputation> SigmaOrProver<P0, P1> {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the branches' soundness parameters differ.
    pub fn new(first: P0, second: P1) -> Result<Self> {
        let soundness = ensure_same_soundness(first.soundness(), second.soundness())?;
        Ok(Self {
            first,
            second,
            soundness,
        })
    }
}

impl<P0, P1> SigmaProverComputation for SigmaOrProver<P0, P1>
where
    P0: SigmaProverComputation,
    P1: SigmaProverComputation,
{
    type Input = OrProverInput<P0::Input, P1::Input>;
    type FirstMessage = (P0::FirstMessage, P1::FirstMessage);
    type SecondMessage = OrSecondMessage<P0::SecondMessage, P1::SecondMessage>;
    type State = OrState<P0::State, P1::State, P0::SecondMessage, P1::SecondMessage>;
    type Simulator = SigmaOrSimulator<P0::Simulator, P1::Simulator>;

    fn soundness(&self) -> SoundnessParameter {
        self.soundness
    }

    fn compute_first_msg<R: CryptoRngCore>(
        &self,
        input: &Self::Input,
        rng: &mut R,
    ) -> Result<(Self::FirstMessage, Self::State)> {
        let simulated_challenge = Challenge::random(self.soundness, rng);
        match input {
            OrProverInput::First { input, other } => {
                let (a0, state) = self.first.compute_first_msg(input, rng)?;
                let (a1, simulated_challenge, simulated_response) = self
                    .second
                    .simulator()
                    .simulate(other, &simulated_challenge, rng)?
                    .into_parts();
                let state = OrBranchState::First {
                    state,
                    simulated_challenge,
                    simulated_response,
                };
                Ok(((a0, a1), OrState(state)))
            }
            OrProverInput::Second { other, input } => {
                let (a1, state) = self.second.compute_first_msg(input, rng)?;
                let (a0, simulated_challenge, simulated_response) = self
                    .first
                    .simulator()
                    .simulate(other, &simulated_challenge, rng)?
                    .into_parts();
                let state = OrBranchState::Second {
                    state,
                    simulated_challenge,
                    simulated_response,
                };
                Ok(((a0, a1), OrState(state)))
            }
        }
    }

    fn compute_second_msg(
        &self,
        input: &Self::Input,
        state: Self::State,
        challenge: &Challenge,
    ) -> Result<Self::SecondMessage> {
        self.soundness.check_challenge(challenge)?;
        match (input, state.0) {
            (
                OrProverInput::First { input, .. },
                OrBranchState::First {
                    state,
                    simulated_challenge: e1,
                    simulated_response: z1,
                },
            ) => {
                let e0 = challenge.xor(&e1)?;
                let z0 = self.first.compute_second_msg(input, state, &e0)?;
                Ok(OrSecondMessage { e0, z0, e1, z1 })
            }
            (
                OrProverInput::Second { input, .. },
                OrBranchState::Second {
                    state,
                    simulated_challenge: e0,
                    simulated_response: z0,
                },
            ) => {
                let e1 = challenge.xor(&e0)?;
                let z1 = self.second.compute_second_msg(input, state, &e1)?;
                Ok(OrSecondMessage { e0, z0, e1, z1 })
            }
            _ => Err(Error::InvalidInput(
                "OR input branch does not match the first-message state".into(),
            )),
        }
    }

    fn simulator(&self) -> Self::Simulator {
        SigmaOrSimulator {
            first: self.first.simulator(),
            second: self.second.simulator(),
            soundness: self.soundness,
        }
    }
}

/// Verifier for the disjunction of two statements.
///
/// Accepts iff both branch checks pass and `e_0 XOR e_1 == e`.
#[derive(Clone, Debug)]
pub struct SigmaOrVerifier<V0, V1> {
    first: V0,
    second: V1,
    soundness: SoundnessParameter,
}

impl<V0: SigmaVerifierComputation, V1: SigmaVerifierComputation> SigmaOrVerifier<V0, V1> {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the branches' soundness parameters differ.
    pub fn new(first: V0, second: V1) -> Result<Self> {
        let soundness = ensure_same_soundness(first.soundness(), second.soundness())?;
        Ok(Self {
            first,
            second,
            soundness,
        })
    }
}

impl<V0, V1> SigmaVerifierComputation for SigmaOrVerifier<V0, V1>
where
    V0: SigmaVerifierComputation,
    V1: SigmaVerifierComputation,
{
    type Input = OrCommonInput<V0::Input, V1::Input>;
    type FirstMessage = (V0::FirstMessage, V1::FirstMessage);
    type SecondMessage = OrSecondMessage<V0::SecondMessage, V1::SecondMessage>;

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
        let recombined = second.e0.xor(&second.e1)?;
        let split = recombined.ct_eq(challenge);
        if !bool::from(split) {
            warn!("OR challenge shares do not recombine to the verifier challenge");
        }

        let (a0, a1) = first;
        let first_ok = self.first.verify(&input.first, a0, &second.e0, &second.z0);
        let second_ok = self.second.verify(&input.second, a1, &second.e1, &second.z1);
        let accepted = split
            & Choice::from(u8::from(first_ok?))
            & Choice::from(u8::from(second_ok?));
        Ok(bool::from(accepted))
    }
}

/// Simulator splitting `e` into a random `e_0` and `e_1 = e XOR e_0`.
#[derive(Clone, Debug)]
pub struct SigmaOrSimulator<S0, S1> {
    first: S0,
    second: S1,
    soundness: SoundnessParameter,
}

impl<S0: SigmaSimulator, S1: SigmaSimulator> SigmaOrSimulator<S0, S1> {
    pub fn new(first: S0, second: S1) -> Result<Self> {
        let soundness = ensure_same_soundness(first.soundness(), second.soundness())?;
        Ok(Self {
            first,
            second,
            soundness,
        })
    }
}

impl<S0: SigmaSimulator, S1: SigmaSimulator> SigmaSimulator for SigmaOrSimulator<S0, S1> {
    type Input = OrCommonInput<S0::Input, S1::Input>;
    type FirstMessage = (S0::FirstMessage, S1::FirstMessage);
    type SecondMessage = OrSecondMessage<S0::SecondMessage, S1::SecondMessage>;

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
        let e0 = Challenge::random(self.soundness, rng);
        let e1 = challenge.xor(&e0)?;
        let (a0, e0, z0) = self.first.simulate(&input.first, &e0, rng)?.into_parts();
        let (a1, e1, z1) = self.second.simulate(&input.second, &e1, rng)?.into_parts();
        Ok(SigmaTranscript::new(
            (a0, a1),
            challenge.clone(),
            OrSecondMessage { e0, z0, e1, z1 },
        ))
    }
}
