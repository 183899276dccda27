use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use super::challenge::{Challenge, SoundnessParameter};
use crate::crypto::MessageFields;
use crate::Result;

/// Witness-carrying prover input that can project out its public statement.
pub trait ProverInput {
    /// Public part shared with the verifier.
    type Common: Clone;

    fn common_input(&self) -> Self::Common;
}

/// Common input of a prover computation.
pub type CommonInputOf<P> = <<P as SigmaProverComputation>::Input as ProverInput>::Common;

/// Prover side of a three-move Sigma protocol.
///
/// The computation itself is stateless. The ephemeral randomness sampled for
/// the first message comes back as [`Self::State`] and is moved into
/// [`compute_second_msg`](Self::compute_second_msg), so one state can answer
/// exactly one challenge.
pub trait SigmaProverComputation {
    type Input: ProverInput;
    type FirstMessage: Clone;
    type SecondMessage: Clone;
    /// Ephemeral secret state between the two prover moves.
    type State;
    type Simulator: SigmaSimulator<
        Input = <Self::Input as ProverInput>::Common,
        FirstMessage = Self::FirstMessage,
        SecondMessage = Self::SecondMessage,
    >;

    fn soundness(&self) -> SoundnessParameter;

    /// Computes the first message `a` and the state needed to answer a challenge.
    fn compute_first_msg<R: CryptoRngCore>(
        &self,
        input: &Self::Input,
        rng: &mut R,
    ) -> Result<(Self::FirstMessage, Self::State)>;

    /// Computes the response `z` to `challenge`, consuming the ephemeral state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CheatAttempt`](crate::Error::CheatAttempt) if the
    /// challenge is not exactly `t / 8` bytes.
    fn compute_second_msg(
        &self,
        input: &Self::Input,
        state: Self::State,
        challenge: &Challenge,
    ) -> Result<Self::SecondMessage>;

    /// Returns a simulator bound to the same public parameters.
    fn simulator(&self) -> Self::Simulator;
}

/// Verifier side of a three-move Sigma protocol.
pub trait SigmaVerifierComputation {
    type Input;
    type FirstMessage;
    type SecondMessage;

    fn soundness(&self) -> SoundnessParameter;

    /// Checks the transcript `(a, e, z)` against the common input.
    ///
    /// Returns `Ok(false)` for a well-formed but rejected transcript.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CheatAttempt`](crate::Error::CheatAttempt) for a
    /// challenge of the wrong length and
    /// [`Error::InvalidInput`](crate::Error::InvalidInput) for messages of the
    /// wrong shape.
    fn verify(
        &self,
        input: &Self::Input,
        first: &Self::FirstMessage,
        challenge: &Challenge,
        second: &Self::SecondMessage,
    ) -> Result<bool>;
}

/// Honest-verifier zero-knowledge simulator.
pub trait SigmaSimulator {
    type Input;
    type FirstMessage;
    type SecondMessage;

    fn soundness(&self) -> SoundnessParameter;

    /// Produces an accepting transcript for a fixed challenge, without a witness.
    fn simulate<R: CryptoRngCore>(
        &self,
        input: &Self::Input,
        challenge: &Challenge,
        rng: &mut R,
    ) -> Result<SimulatorOutput<Self::FirstMessage, Self::SecondMessage>>;

    /// Produces an accepting transcript for a challenge sampled internally.
    fn simulate_random<R: CryptoRngCore>(
        &self,
        input: &Self::Input,
        rng: &mut R,
    ) -> Result<SimulatorOutput<Self::FirstMessage, Self::SecondMessage>> {
        let challenge = Challenge::random(self.soundness(), rng);
        self.simulate(input, &challenge, rng)
    }
}

/// Immutable transcript `(a, e, z)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigmaTranscript<A, Z> {
    first: A,
    challenge: Challenge,
    second: Z,
}

/// Output of a simulator; indistinguishable from an honest transcript.
pub type SimulatorOutput<A, Z> = SigmaTranscript<A, Z>;

impl<A, Z> SigmaTranscript<A, Z> {
    pub fn new(first: A, challenge: Challenge, second: Z) -> Self {
        Self {
            first,
            challenge,
            second,
        }
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }

    pub fn second(&self) -> &Z {
        &self.second
    }

    pub fn into_parts(self) -> (A, Challenge, Z) {
        (self.first, self.challenge, self.second)
    }

    /// Runs `verifier` on this transcript.
    pub fn verify_with<V>(&self, verifier: &V, input: &V::Input) -> Result<bool>
    where
        V: SigmaVerifierComputation<FirstMessage = A, SecondMessage = Z>,
    {
        verifier.verify(input, &self.first, &self.challenge, &self.second)
    }
}

impl<A: MessageFields, Z: MessageFields> MessageFields for SigmaTranscript<A, Z> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.first.write_fields(out);
        self.challenge.write_fields(out);
        self.second.write_fields(out);
    }
}
