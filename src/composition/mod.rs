//! Generic AND and OR combinators.
//!
//! Composed roles implement the same traits as base protocols, so they nest:
//! an AND of ORs of reductions is itself a Sigma protocol.

/// AND composition over `n` sub-protocols.
pub mod and;
/// `Either` as a two-way sum protocol.
pub mod either;
/// OR composition over two sub-protocols.
pub mod or;

pub use and::{SigmaAndProver, SigmaAndSimulator, SigmaAndVerifier};
pub use or::{
    OrCommonInput, OrProverInput, OrSecondMessage, OrState, SigmaOrProver, SigmaOrSimulator,
    SigmaOrVerifier,
};
