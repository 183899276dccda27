//! Derived statements restated as base-protocol instances.
//!
//! A [`Reduction`] is a pure, deterministic transform from a derived input to
//! a base input. The `Reduced*` roles apply it on every call and forward to a
//! bound base role, returning the base result unchanged.

/// Cramer-Shoup encrypted value, reduced to an extended DH tuple.
pub mod cramer_shoup_encrypted_value;
/// Damgard-Jurik encrypted value, reduced to an encryption of zero.
pub mod dj_encrypted_value;
/// ElGamal encrypted value, reduced to a DH tuple.
pub mod elgamal_encrypted_value;
/// ElGamal private key, reduced to a discrete logarithm.
pub mod elgamal_private_key;
/// Pedersen committed value, reduced to a discrete logarithm.
pub mod pedersen_committed_value;

use rand_core::CryptoRngCore;

use crate::protocol::{
    Challenge, ProverInput, SigmaProverComputation, SigmaSimulator, SigmaVerifierComputation,
    SimulatorOutput, SoundnessParameter,
};
use crate::Result;

pub use cramer_shoup_encrypted_value::CramerShoupEncryptedValue;
pub use dj_encrypted_value::DjEncryptedValue;
pub use elgamal_encrypted_value::ElGamalEncryptedValue;
pub use elgamal_private_key::ElGamalPrivateKey;
pub use pedersen_committed_value::PedersenCommittedValue;

/// Input transform from a derived statement to a base statement.
pub trait Reduction: Clone {
    type CommonInput: Clone;
    type ProverInput: ProverInput<Common = Self::CommonInput>;
    type BaseCommonInput;
    type BaseProverInput: ProverInput<Common = Self::BaseCommonInput>;

    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) if the
    /// input cannot be transformed.
    fn reduce_common(&self, input: &Self::CommonInput) -> Result<Self::BaseCommonInput>;

    fn reduce_prover(&self, input: &Self::ProverInput) -> Result<Self::BaseProverInput>;
}

/// Prover for a derived statement, delegating to a base prover.
#[derive(Clone, Debug)]
pub struct ReducedProver<P, T> {
    base: P,
    reduction: T,
}

impl<P, T> ReducedProver<P, T>
where
    T: Reduction,
    P: SigmaProverComputation<Input = T::BaseProverInput>,
{
    pub fn new(base: P, reduction: T) -> Self {
        Self { base, reduction }
    }

    pub fn base(&self) -> &P {
        &self.base
    }

    pub fn reduction(&self) -> &T {
        &self.reduction
    }
}

impl<P, T> SigmaProverComputation for ReducedProver<P, T>
where
    T: Reduction,
    P: SigmaProverComputation<Input = T::BaseProverInput>,
    P::Simulator: SigmaSimulator<Input = T::BaseCommonInput>,
{
    type Input = T::ProverInput;
    type FirstMessage = P::FirstMessage;
    type SecondMessage = P::SecondMessage;
    type State = P::State;
    type Simulator = ReducedSimulator<P::Simulator, T>;

    fn soundness(&self) -> SoundnessParameter {
        self.base.soundness()
    }

    fn compute_first_msg<R: CryptoRngCore>(
        &self,
        input: &Self::Input,
        rng: &mut R,
    ) -> Result<(Self::FirstMessage, Self::State)> {
        let base_input = self.reduction.reduce_prover(input)?;
        self.base.compute_first_msg(&base_input, rng)
    }

    fn compute_second_msg(
        &self,
        input: &Self::Input,
        state: Self::State,
        challenge: &Challenge,
    ) -> Result<Self::SecondMessage> {
        let base_input = self.reduction.reduce_prover(input)?;
        self.base.compute_second_msg(&base_input, state, challenge)
    }

    /// Wraps the base prover's own simulator.
    fn simulator(&self) -> Self::Simulator {
        ReducedSimulator::from_base(self.base.simulator(), self.reduction.clone())
    }
}

/// Verifier for a derived statement, delegating to a base verifier.
#[derive(Clone, Debug)]
pub struct ReducedVerifier<V, T> {
    base: V,
    reduction: T,
}

impl<V, T> ReducedVerifier<V, T>
where
    T: Reduction,
    V: SigmaVerifierComputation<Input = T::BaseCommonInput>,
{
    pub fn new(base: V, reduction: T) -> Self {
        Self { base, reduction }
    }

    pub fn base(&self) -> &V {
        &self.base
    }
}

impl<V, T> SigmaVerifierComputation for ReducedVerifier<V, T>
where
    T: Reduction,
    V: SigmaVerifierComputation<Input = T::BaseCommonInput>,
{
    type Input = T::CommonInput;
    type FirstMessage = V::FirstMessage;
    type SecondMessage = V::SecondMessage;

    fn soundness(&self) -> SoundnessParameter {
        self.base.soundness()
    }

    fn verify(
        &self,
        input: &Self::Input,
        first: &Self::FirstMessage,
        challenge: &Challenge,
        second: &Self::SecondMessage,
    ) -> Result<bool> {
        let base_input = self.reduction.reduce_common(input)?;
        self.base.verify(&base_input, first, challenge, second)
    }
}

/// Simulator for a derived statement, delegating to a base simulator.
#[derive(Clone, Debug)]
pub struct ReducedSimulator<S, T> {
    base: S,
    reduction: T,
}

impl<S, T> ReducedSimulator<S, T>
where
    T: Reduction,
    S: SigmaSimulator<Input = T::BaseCommonInput>,
{
    /// Binds an already-built base simulator; no parameters are re-derived.
    pub fn from_base(base: S, reduction: T) -> Self {
        Self { base, reduction }
    }

    pub fn base(&self) -> &S {
        &self.base
    }
}

impl<S, T> SigmaSimulator for ReducedSimulator<S, T>
where
    T: Reduction,
    S: SigmaSimulator<Input = T::BaseCommonInput>,
{
    type Input = T::CommonInput;
    type FirstMessage = S::FirstMessage;
    type SecondMessage = S::SecondMessage;

    fn soundness(&self) -> SoundnessParameter {
        self.base.soundness()
    }

    fn simulate<R: CryptoRngCore>(
        &self,
        input: &Self::Input,
        challenge: &Challenge,
        rng: &mut R,
    ) -> Result<SimulatorOutput<Self::FirstMessage, Self::SecondMessage>> {
        let base_input = self.reduction.reduce_common(input)?;
        self.base.simulate(&base_input, challenge, rng)
    }
}
