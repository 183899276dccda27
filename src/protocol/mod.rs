/// Soundness parameter and challenges.
pub mod challenge;
/// Fiat-Shamir transform over a Merlin transcript.
pub mod fiat_shamir;
/// Prover session driver.
pub mod prover;
/// Sigma-protocol role traits and transcripts.
pub mod traits;
/// Merlin transcript wrapper for Fiat-Shamir transformation.
pub mod transcript;
/// Verifier session driver.
pub mod verifier;

pub use challenge::{Challenge, SoundnessParameter, MAX_SOUNDNESS_BITS};
pub use fiat_shamir::{
    derive_challenge, prove_non_interactive, verify_non_interactive, NonInteractiveProof,
};
pub use prover::ProverSession;
pub use traits::{
    CommonInputOf, ProverInput, SigmaProverComputation, SigmaSimulator, SigmaTranscript,
    SigmaVerifierComputation, SimulatorOutput,
};
pub use transcript::Transcript;
pub use verifier::VerifierSession;
