//! Error types for the Sigma-protocol engine.

/// Main error types for the library.
///
/// Nothing inside the crate retries on any of them; an
/// [`Error::CheatAttempt`] aborts the enclosing protocol run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Incompatible soundness parameter or invalid group/modulus at construction.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Wrong input or message shape, or mismatched list lengths.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A value inconsistent with an honest protocol run, such as a challenge
    /// of the wrong length.
    #[error("Cheat attempt: {0}")]
    CheatAttempt(String),
}

impl Error {
    /// Returns `true` if the error signals a dishonest counterparty.
    pub fn is_cheat_attempt(&self) -> bool {
        matches!(self, Error::CheatAttempt(_))
    }

    /// Returns `true` if the error comes from a rejected construction parameter.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Error::InvalidParameter(_))
    }

    /// Returns `true` if the error comes from malformed caller input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }
}
