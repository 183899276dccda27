use rand_core::CryptoRngCore;
use tracing::{debug, warn};

use super::challenge::{Challenge, SoundnessParameter};
use super::traits::SigmaVerifierComputation;
use crate::{Error, Result};

/// Drives one verifier through a single proof session.
///
/// The installed challenge is single-use: [`verify`](Self::verify) and
/// [`take_challenge`](Self::take_challenge) both remove it.
pub struct VerifierSession<V: SigmaVerifierComputation> {
    verifier: V,
    challenge: Option<Challenge>,
}

impl<V: SigmaVerifierComputation> VerifierSession<V> {
    pub fn new(verifier: V) -> Self {
        Self {
            verifier,
            challenge: None,
        }
    }

    /// Samples and installs a fresh uniform `t`-bit challenge.
    pub fn sample_challenge<R: CryptoRngCore>(&mut self, rng: &mut R) -> &Challenge {
        let challenge = Challenge::random(self.verifier.soundness(), rng);
        debug!(challenge = %challenge, "challenge sampled");
        self.challenge.insert(challenge)
    }

    /// Installs an externally supplied challenge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CheatAttempt`] if the challenge is not `t / 8` bytes.
    pub fn set_challenge(&mut self, challenge: Challenge) -> Result<()> {
        self.verifier.soundness().check_challenge(&challenge)?;
        self.challenge = Some(challenge);
        Ok(())
    }

    /// Removes and returns the installed challenge.
    pub fn take_challenge(&mut self) -> Option<Challenge> {
        self.challenge.take()
    }

    /// Verifies `(a, z)` against the installed challenge, consuming it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if no challenge is installed.
    pub fn verify(
        &mut self,
        input: &V::Input,
        first: &V::FirstMessage,
        second: &V::SecondMessage,
    ) -> Result<bool> {
        let challenge = self
            .challenge
            .take()
            .ok_or_else(|| Error::InvalidInput("no challenge installed".into()))?;
        let accepted = self.verifier.verify(input, first, &challenge, second)?;
        if accepted {
            debug!("transcript accepted");
        } else {
            warn!(challenge = %challenge, "transcript rejected");
        }
        Ok(accepted)
    }

    pub fn soundness(&self) -> SoundnessParameter {
        self.verifier.soundness()
    }

    pub fn verifier(&self) -> &V {
        &self.verifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::DlogGroup;
    use crate::protocols::dlog::{
        DlogCommonInput, DlogFirstMessage, DlogSecondMessage, DlogVerifier,
    };
    use crate::testing::{soundness, test_group};
    use num_bigint::BigUint;
    use rand_core::OsRng;

    fn session() -> VerifierSession<DlogVerifier<crate::groups::ModpGroup>> {
        VerifierSession::new(DlogVerifier::new(test_group(), soundness(24)).unwrap())
    }

    #[test]
    fn sampled_challenge_has_soundness_length() {
        let mut session = session();
        assert_eq!(session.sample_challenge(&mut OsRng).len(), 3);
        assert!(session.take_challenge().is_some());
        assert!(session.take_challenge().is_none());
    }

    #[test]
    fn set_challenge_checks_length() {
        let mut session = session();
        assert!(session
            .set_challenge(Challenge::from_bytes(vec![0; 4]))
            .unwrap_err()
            .is_cheat_attempt());
        assert!(session.set_challenge(Challenge::from_bytes(vec![0; 3])).is_ok());
    }

    #[test]
    fn challenge_is_single_use() {
        let group = test_group();
        let h = group.exponentiate_generator(&BigUint::from(3u32));
        let common = DlogCommonInput::new(h);
        let a = DlogFirstMessage::new(group.identity());
        let z = DlogSecondMessage::new(BigUint::from(0u32));

        let mut session = session();
        session.set_challenge(Challenge::from_bytes(vec![0; 3])).unwrap();
        // e = 0, a = 1, z = 0: g^0 == 1 · h^0 holds.
        assert!(session.verify(&common, &a, &z).unwrap());
        assert!(session.verify(&common, &a, &z).unwrap_err().is_invalid_input());
    }
}
