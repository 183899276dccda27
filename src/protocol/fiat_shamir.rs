//! Fiat-Shamir transform for any Sigma protocol.
//!
//! The challenge is squeezed from a [`Transcript`] that has absorbed the
//! context label, the soundness parameter, the common input and the first
//! message, in that order.

use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::challenge::{Challenge, SoundnessParameter};
use super::traits::{CommonInputOf, ProverInput, SigmaProverComputation, SigmaVerifierComputation};
use super::transcript::Transcript;
use crate::crypto::MessageFields;
use crate::Result;

/// Non-interactive proof `(a, z)`; the challenge is recomputed by the verifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonInteractiveProof<A, Z> {
    first: A,
    second: Z,
}

impl<A, Z> NonInteractiveProof<A, Z> {
    pub fn new(first: A, second: Z) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &Z {
        &self.second
    }
}

/// Derives the challenge for `(context, statement, first)`.
pub fn derive_challenge<S, A>(
    soundness: SoundnessParameter,
    context: &[u8],
    statement: &S,
    first: &A,
) -> Challenge
where
    S: MessageFields + ?Sized,
    A: MessageFields + ?Sized,
{
    let mut transcript = Transcript::new();
    transcript.append_context(context);
    transcript.append_soundness(soundness);
    transcript.append_statement(statement);
    transcript.append_first_message(first);
    transcript.challenge(soundness)
}

/// Proves `input` non-interactively under `context`.
pub fn prove_non_interactive<P, R>(
    prover: &P,
    input: &P::Input,
    context: &[u8],
    rng: &mut R,
) -> Result<NonInteractiveProof<P::FirstMessage, P::SecondMessage>>
where
    P: SigmaProverComputation,
    CommonInputOf<P>: MessageFields,
    P::FirstMessage: MessageFields,
    R: CryptoRngCore,
{
    let (first, state) = prover.compute_first_msg(input, rng)?;
    let challenge = derive_challenge(prover.soundness(), context, &input.common_input(), &first);
    let second = prover.compute_second_msg(input, state, &challenge)?;
    debug!(challenge = %challenge, "non-interactive proof generated");
    Ok(NonInteractiveProof { first, second })
}

/// Verifies a proof produced by [`prove_non_interactive`] under the same `context`.
pub fn verify_non_interactive<V>(
    verifier: &V,
    input: &V::Input,
    context: &[u8],
    proof: &NonInteractiveProof<V::FirstMessage, V::SecondMessage>,
) -> Result<bool>
where
    V: SigmaVerifierComputation,
    V::Input: MessageFields,
    V::FirstMessage: MessageFields,
{
    let challenge = derive_challenge(verifier.soundness(), context, input, &proof.first);
    verifier.verify(input, &proof.first, &challenge, &proof.second)
}
