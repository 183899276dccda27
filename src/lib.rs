//! Interactive Sigma protocols with generic composition.
//!
//! The crate is organised in layers:
//! - **crypto**: group trait, modular arithmetic, field encoding, and zeroizing secrets
//! - **groups**: prime-order subgroups of `Z_p^*`
//! - **schemes**: Pedersen, ElGamal, Cramer-Shoup, and Damgard-Jurik operations
//! - **protocol**: role traits, challenges, sessions, and the Fiat-Shamir transform
//! - **protocols**: base Sigma protocols
//! - **composition**: AND and OR combinators
//! - **reductions**: derived statements restated as base-protocol instances
//!
//! Every role is stateless; the prover's ephemeral state is returned by
//! the first-message step of [`protocol::SigmaProverComputation`] and
//! consumed by the second-message step. [`protocol::ProverSession`] and
//! [`protocol::VerifierSession`] drive a single run over those roles.

/// AND/OR composition of Sigma protocols.
pub mod composition;
/// Soundness configuration.
pub mod config;
/// Cryptographic primitives and traits.
pub mod crypto;
/// Error types.
pub mod error;
/// Group implementations.
pub mod groups;
/// Role traits, challenges, sessions, and Fiat-Shamir.
pub mod protocol;
/// Base Sigma protocols.
pub mod protocols;
/// Derived statements reduced onto base protocols.
pub mod reductions;
/// Encryption and commitment schemes.
pub mod schemes;

#[cfg(test)]
mod testing;

pub use config::SigmaConfig;
pub use crypto::{DlogGroup, GroupElement, MessageFields, Nonce, Secret};
pub use error::Error;
pub use groups::ModpGroup;

/// Result type for protocol operations.
pub type Result<T> = core::result::Result<T, Error>;
