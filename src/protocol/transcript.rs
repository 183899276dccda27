use merlin::Transcript as MerlinTranscript;

use super::challenge::{Challenge, SoundnessParameter};
use crate::crypto::MessageFields;

/// Protocol label for transcript initialization.
const PROTOCOL_LABEL: &[u8] = b"sigma-zkp v0.1";

/// Domain separation tag for challenge generation.
const CHALLENGE_DST: &[u8] = b"challenge";

/// Transcript wrapper for the Fiat-Shamir transform.
///
/// Each value is absorbed as a sequence of labelled fields, so two
/// statements with different field boundaries never collide.
pub struct Transcript(MerlinTranscript);

impl Transcript {
    pub fn new() -> Self {
        Self(MerlinTranscript::new(PROTOCOL_LABEL))
    }

    /// Appends application-specific context to prevent cross-protocol replay.
    ///
    /// Examples: session ID, domain separator, purpose string.
    pub fn append_context(&mut self, context: &[u8]) {
        self.0.append_message(b"context", context);
    }

    /// Appends the soundness parameter.
    pub fn append_soundness(&mut self, soundness: SoundnessParameter) {
        self.0.append_u64(b"soundness", soundness.bits() as u64);
    }

    /// Appends the public statement.
    pub fn append_statement<T: MessageFields + ?Sized>(&mut self, statement: &T) {
        self.append_fields(b"statement", statement);
    }

    /// Appends the prover's first message.
    pub fn append_first_message<T: MessageFields + ?Sized>(&mut self, first: &T) {
        self.append_fields(b"first-message", first);
    }

    /// Squeezes a `t / 8`-byte challenge.
    pub fn challenge(&mut self, soundness: SoundnessParameter) -> Challenge {
        let mut buf = vec![0u8; soundness.challenge_len()];
        self.0.challenge_bytes(CHALLENGE_DST, &mut buf);
        Challenge::from_bytes(buf)
    }

    fn append_fields<T: MessageFields + ?Sized>(&mut self, label: &'static [u8], value: &T) {
        let fields = value.to_fields();
        self.0.append_u64(label, fields.len() as u64);
        for field in &fields {
            self.0.append_message(b"field", field);
        }
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
