//! Conjunction of `n` statements under one shared challenge.

use rand_core::CryptoRngCore;
use subtle::Choice;
use tracing::debug;

use crate::protocol::{
    Challenge, ProverInput, SigmaProverComputation, SigmaSimulator,
    SigmaTranscript, SigmaVerifierComputation, SimulatorOutput, SoundnessParameter,
};
use crate::{Error, Result};

impl<I: ProverInput> ProverInput for Vec<I> {
    type Common = Vec<I::Common>;

    fn common_input(&self) -> Self::Common {
        self.iter().map(ProverInput::common_input).collect()
    }
}

fn check_members(
    declared: SoundnessParameter,
    params: impl Iterator<Item = SoundnessParameter>,
) -> Result<usize> {
    let mut count = 0;
    for (index, soundness) in params.enumerate() {
        declared.ensure_same(soundness, &format!("AND sub-protocol {index}"))?;
        count += 1;
    }
    if count == 0 {
        return Err(Error::InvalidParameter(
            "AND composition needs at least one sub-protocol".into(),
        ));
    }
    debug!(count, soundness = declared.bits(), "AND composition constructed");
    Ok(count)
}

fn check_len(what: &str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::InvalidInput(format!(
            "AND {what} has {actual} entries, expected {expected}"
        )));
    }
    Ok(())
}

/// Prover for the conjunction of its sub-provers' statements.
#[derive(Clone, Debug)]
pub struct SigmaAndProver<P> {
    provers: Vec<P>,
    soundness: SoundnessParameter,
}

impl<P: SigmaProverComputation> SigmaAndProver<P> {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `provers` is empty or any
    /// sub-prover's soundness parameter differs from `soundness`.
    pub fn new(soundness: SoundnessParameter, provers: Vec<P>) -> Result<Self> {
        check_members(soundness, provers.iter().map(SigmaProverComputation::soundness))?;
        Ok(Self { provers, soundness })
    }

    pub fn provers(&self) -> &[P] {
        &self.provers
    }
}

impl<P: SigmaProverComputation> SigmaProverComputation for SigmaAndProver<P> {
    type Input = Vec<P::Input>;
    type FirstMessage = Vec<P::FirstMessage>;
    type SecondMessage = Vec<P::SecondMessage>;
    type State = Vec<P::State>;
    type Simulator = SigmaAndSimulator<P::Simulator>;

    fn soundness(&self) -> SoundnessParameter {
        self.soundness
    }

    fn compute_first_msg<R: CryptoRngCore>(
        &self,
        input: &Self::Input,
        rng: &mut R,
    ) -> Result<(Self::FirstMessage, Self::State)> {
        check_len("input", input.len(), self.provers.len())?;
        let mut firsts = Vec::with_capacity(self.provers.len());
        let mut states = Vec::with_capacity(self.provers.len());
        for (prover, sub_input) in self.provers.iter().zip(input) {
            let (first, state) = prover.compute_first_msg(sub_input, rng)?;
            firsts.push(first);
            states.push(state);
        }
        Ok((firsts, states))
    }

    fn compute_second_msg(
        &self,
        input: &Self::Input,
        state: Self::State,
        challenge: &Challenge,
    ) -> Result<Self::SecondMessage> {
        self.soundness.check_challenge(challenge)?;
        check_len("input", input.len(), self.provers.len())?;
        check_len("state", state.len(), self.provers.len())?;
        self.provers
            .iter()
            .zip(input)
            .zip(state)
            .map(|((prover, sub_input), sub_state)| {
                prover.compute_second_msg(sub_input, sub_state, challenge)
            })
            .collect()
    }

    fn simulator(&self) -> Self::Simulator {
        SigmaAndSimulator {
            simulators: self.provers.iter().map(SigmaProverComputation::simulator).collect(),
            soundness: self.soundness,
        }
    }
}

/// Verifier accepting iff every sub-verifier accepts under the same challenge.
#[derive(Clone, Debug)]
pub struct SigmaAndVerifier<V> {
    verifiers: Vec<V>,
    soundness: SoundnessParameter,
}

impl<V: SigmaVerifierComputation> SigmaAndVerifier<V> {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `verifiers` is empty or any
    /// sub-verifier's soundness parameter differs from `soundness`.
    pub fn new(soundness: SoundnessParameter, verifiers: Vec<V>) -> Result<Self> {
        check_members(soundness, verifiers.iter().map(SigmaVerifierComputation::soundness))?;
        Ok(Self {
            verifiers,
            soundness,
        })
    }
}

impl<V: SigmaVerifierComputation> SigmaVerifierComputation for SigmaAndVerifier<V> {
    type Input = Vec<V::Input>;
    type FirstMessage = Vec<V::FirstMessage>;
    type SecondMessage = Vec<V::SecondMessage>;

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
        let n = self.verifiers.len();
        check_len("input", input.len(), n)?;
        check_len("first message", first.len(), n)?;
        check_len("second message", second.len(), n)?;

        let mut accepted = Choice::from(1u8);
        let rows = self.verifiers.iter().zip(input).zip(first).zip(second);
        for (((verifier, sub_input), a), z) in rows {
            let sub_result = verifier.verify(sub_input, a, challenge, z)?;
            accepted &= Choice::from(u8::from(sub_result));
        }
        Ok(bool::from(accepted))
    }
}

/// Simulates every sub-statement under the same challenge.
#[derive(Clone, Debug)]
pub struct SigmaAndSimulator<S> {
    simulators: Vec<S>,
    soundness: SoundnessParameter,
}

impl<S: SigmaSimulator> SigmaAndSimulator<S> {
    pub fn new(soundness: SoundnessParameter, simulators: Vec<S>) -> Result<Self> {
        check_members(soundness, simulators.iter().map(SigmaSimulator::soundness))?;
        Ok(Self {
            simulators,
            soundness,
        })
    }
}

impl<S: SigmaSimulator> SigmaSimulator for SigmaAndSimulator<S> {
    type Input = Vec<S::Input>;
    type FirstMessage = Vec<S::FirstMessage>;
    type SecondMessage = Vec<S::SecondMessage>;

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
        check_len("input", input.len(), self.simulators.len())?;
        let mut firsts = Vec::with_capacity(self.simulators.len());
        let mut seconds = Vec::with_capacity(self.simulators.len());
        for (simulator, sub_input) in self.simulators.iter().zip(input) {
            let (first, _, second) = simulator.simulate(sub_input, challenge, rng)?.into_parts();
            firsts.push(first);
            seconds.push(second);
        }
        Ok(SigmaTranscript::new(firsts, challenge.clone(), seconds))
    }
}
