use rand_core::CryptoRngCore;
use tracing::debug;

use super::challenge::{Challenge, SoundnessParameter};
use super::traits::SigmaProverComputation;
use crate::{Error, Result};

/// Drives one prover through a single proof session.
///
/// At most one ephemeral state is pending at a time. It is created by
/// [`compute_first_msg`](Self::compute_first_msg) and moved out by
/// [`compute_second_msg`](Self::compute_second_msg), so a second response to
/// the same first message is impossible.
///
/// # Examples
///
/// ```rust
/// use num_bigint::BigUint;
/// use rand_core::OsRng;
/// use sigma_zkp::groups::ModpGroup;
/// use sigma_zkp::protocol::{ProverSession, SoundnessParameter, VerifierSession};
/// use sigma_zkp::protocols::dlog::{DlogCommonInput, DlogProver, DlogProverInput, DlogVerifier};
/// use sigma_zkp::{DlogGroup, Secret};
///
/// let group = ModpGroup::rfc5114_2048_256();
/// let t = SoundnessParameter::new(80)?;
/// let w = group.random_exponent(&mut OsRng);
/// let h = group.exponentiate_generator(&w);
/// let common = DlogCommonInput::new(h);
///
/// let mut prover = ProverSession::new(DlogProver::new(group.clone(), t)?);
/// let mut verifier = VerifierSession::new(DlogVerifier::new(group, t)?);
///
/// prover.set_input(DlogProverInput::new(common.clone(), Secret::new(&w)));
/// let a = prover.compute_first_msg(&mut OsRng)?;
/// let e = verifier.sample_challenge(&mut OsRng).clone();
/// let z = prover.compute_second_msg(&e)?;
/// assert!(verifier.verify(&common, &a, &z)?);
/// # Ok::<(), sigma_zkp::Error>(())
/// ```
pub struct ProverSession<P: SigmaProverComputation> {
    prover: P,
    input: Option<P::Input>,
    state: Option<P::State>,
}

impl<P: SigmaProverComputation> ProverSession<P> {
    pub fn new(prover: P) -> Self {
        Self {
            prover,
            input: None,
            state: None,
        }
    }

    /// Installs the input for a new session, discarding any pending state.
    pub fn set_input(&mut self, input: P::Input) {
        self.state = None;
        self.input = Some(input);
        debug!("prover input set");
    }

    /// Samples fresh ephemeral randomness and returns the first message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if no input has been set.
    pub fn compute_first_msg<R: CryptoRngCore>(&mut self, rng: &mut R) -> Result<P::FirstMessage> {
        let input = self
            .input
            .as_ref()
            .ok_or_else(|| Error::InvalidInput("prover input has not been set".into()))?;
        let (first, state) = self.prover.compute_first_msg(input, rng)?;
        self.state = Some(state);
        debug!("first message computed");
        Ok(first)
    }

    /// Answers `challenge`, consuming the pending ephemeral state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if there is no pending first message and
    /// [`Error::CheatAttempt`] for a challenge of the wrong length. The pending
    /// state is consumed in both the success and the cheat case.
    pub fn compute_second_msg(&mut self, challenge: &Challenge) -> Result<P::SecondMessage> {
        let input = self
            .input
            .as_ref()
            .ok_or_else(|| Error::InvalidInput("prover input has not been set".into()))?;
        let state = self
            .state
            .take()
            .ok_or_else(|| Error::InvalidInput("first message has not been computed".into()))?;
        let second = self.prover.compute_second_msg(input, state, challenge)?;
        debug!(challenge = %challenge, "second message computed");
        Ok(second)
    }

    /// Returns `true` while a first message awaits its challenge.
    pub fn has_pending_state(&self) -> bool {
        self.state.is_some()
    }

    pub fn soundness(&self) -> SoundnessParameter {
        self.prover.soundness()
    }

    pub fn simulator(&self) -> P::Simulator {
        self.prover.simulator()
    }

    pub fn prover(&self) -> &P {
        &self.prover
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{DlogGroup, Secret};
    use crate::protocols::dlog::{DlogCommonInput, DlogProver, DlogProverInput};
    use crate::testing::{soundness, test_group};
    use rand_core::OsRng;

    fn session() -> ProverSession<DlogProver<crate::groups::ModpGroup>> {
        let group = test_group();
        let w = group.random_exponent(&mut OsRng);
        let h = group.exponentiate_generator(&w);
        let mut session = ProverSession::new(DlogProver::new(group, soundness(16)).unwrap());
        session.set_input(DlogProverInput::new(DlogCommonInput::new(h), Secret::new(&w)));
        session
    }

    #[test]
    fn first_message_requires_input() {
        let prover = DlogProver::new(test_group(), soundness(16)).unwrap();
        let mut session = ProverSession::new(prover);
        let err = session.compute_first_msg(&mut OsRng).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn second_message_requires_first() {
        let mut session = session();
        let e = Challenge::from_bytes(vec![1, 2]);
        assert!(session.compute_second_msg(&e).unwrap_err().is_invalid_input());
    }

    #[test]
    fn ephemeral_state_answers_one_challenge() {
        let mut session = session();
        session.compute_first_msg(&mut OsRng).unwrap();
        assert!(session.has_pending_state());

        session
            .compute_second_msg(&Challenge::from_bytes(vec![1, 2]))
            .unwrap();
        assert!(!session.has_pending_state());

        let err = session
            .compute_second_msg(&Challenge::from_bytes(vec![3, 4]))
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn wrong_challenge_consumes_state() {
        let mut session = session();
        session.compute_first_msg(&mut OsRng).unwrap();
        let err = session
            .compute_second_msg(&Challenge::from_bytes(vec![1]))
            .unwrap_err();
        assert!(err.is_cheat_attempt());
        assert!(!session.has_pending_state());
    }
}
