//! Two-way sum of protocols, for heterogeneous AND lists.
//!
//! `Either<P0, P1>` runs whichever protocol it holds. Inputs, messages and
//! states are `Either`s too; one of the other side is rejected with
//! [`Error::InvalidInput`].

use either::Either::{self, Left, Right};
use rand_core::CryptoRngCore;

use crate::protocol::{
    Challenge, ProverInput, SigmaProverComputation, SigmaSimulator, SigmaTranscript,
    SigmaVerifierComputation, SimulatorOutput, SoundnessParameter,
};
use crate::{Error, Result};

fn side_mismatch(what: &str) -> Error {
    Error::InvalidInput(format!("{what} does not match the protocol side"))
}

impl<I0: ProverInput, I1: ProverInput> ProverInput for Either<I0, I1> {
    type Common = Either<I0::Common, I1::Common>;

    fn common_input(&self) -> Self::Common {
        self.as_ref()
            .map_left(ProverInput::common_input)
            .map_right(ProverInput::common_input)
    }
}

impl<P0, P1> SigmaProverComputation for Either<P0, P1>
where
    P0: SigmaProverComputation,
    P1: SigmaProverComputation,
{
    type Input = Either<P0::Input, P1::Input>;
    type FirstMessage = Either<P0::FirstMessage, P1::FirstMessage>;
    type SecondMessage = Either<P0::SecondMessage, P1::SecondMessage>;
    type State = Either<P0::State, P1::State>;
    type Simulator = Either<P0::Simulator, P1::Simulator>;

    fn soundness(&self) -> SoundnessParameter {
        match self {
            Left(prover) => prover.soundness(),
            Right(prover) => prover.soundness(),
        }
    }

    fn compute_first_msg<R: CryptoRngCore>(
        &self,
        input: &Self::Input,
        rng: &mut R,
    ) -> Result<(Self::FirstMessage, Self::State)> {
        match (self, input) {
            (Left(prover), Left(input)) => {
                let (first, state) = prover.compute_first_msg(input, rng)?;
                Ok((Left(first), Left(state)))
            }
            (Right(prover), Right(input)) => {
                let (first, state) = prover.compute_first_msg(input, rng)?;
                Ok((Right(first), Right(state)))
            }
            _ => Err(side_mismatch("prover input")),
        }
    }

    fn compute_second_msg(
        &self,
        input: &Self::Input,
        state: Self::State,
        challenge: &Challenge,
    ) -> Result<Self::SecondMessage> {
        match (self, input, state) {
            (Left(prover), Left(input), Left(state)) => {
                prover.compute_second_msg(input, state, challenge).map(Left)
            }
            (Right(prover), Right(input), Right(state)) => {
                prover.compute_second_msg(input, state, challenge).map(Right)
            }
            _ => Err(side_mismatch("prover input or state")),
        }
    }

    fn simulator(&self) -> Self::Simulator {
        match self {
            Left(prover) => Left(prover.simulator()),
            Right(prover) => Right(prover.simulator()),
        }
    }
}

impl<V0, V1> SigmaVerifierComputation for Either<V0, V1>
where
    V0: SigmaVerifierComputation,
    V1: SigmaVerifierComputation,
{
    type Input = Either<V0::Input, V1::Input>;
    type FirstMessage = Either<V0::FirstMessage, V1::FirstMessage>;
    type SecondMessage = Either<V0::SecondMessage, V1::SecondMessage>;

    fn soundness(&self) -> SoundnessParameter {
        match self {
            Left(verifier) => verifier.soundness(),
            Right(verifier) => verifier.soundness(),
        }
    }

    fn verify(
        &self,
        input: &Self::Input,
        first: &Self::FirstMessage,
        challenge: &Challenge,
        second: &Self::SecondMessage,
    ) -> Result<bool> {
        match (self, input, first, second) {
            (Left(verifier), Left(input), Left(a), Left(z)) => {
                verifier.verify(input, a, challenge, z)
            }
            (Right(verifier), Right(input), Right(a), Right(z)) => {
                verifier.verify(input, a, challenge, z)
            }
            _ => Err(side_mismatch("verifier input or message")),
        }
    }
}

impl<S0, S1> SigmaSimulator for Either<S0, S1>
where
    S0: SigmaSimulator,
    S1: SigmaSimulator,
{
    type Input = Either<S0::Input, S1::Input>;
    type FirstMessage = Either<S0::FirstMessage, S1::FirstMessage>;
    type SecondMessage = Either<S0::SecondMessage, S1::SecondMessage>;

    fn soundness(&self) -> SoundnessParameter {
        match self {
            Left(simulator) => simulator.soundness(),
            Right(simulator) => simulator.soundness(),
        }
    }

    fn simulate<R: CryptoRngCore>(
        &self,
        input: &Self::Input,
        challenge: &Challenge,
        rng: &mut R,
    ) -> Result<SimulatorOutput<Self::FirstMessage, Self::SecondMessage>> {
        match (self, input) {
            (Left(simulator), Left(input)) => {
                let (a, e, z) = simulator.simulate(input, challenge, rng)?.into_parts();
                Ok(SigmaTranscript::new(Left(a), e, Left(z)))
            }
            (Right(simulator), Right(input)) => {
                let (a, e, z) = simulator.simulate(input, challenge, rng)?.into_parts();
                Ok(SigmaTranscript::new(Right(a), e, Right(z)))
            }
            _ => Err(side_mismatch("simulator input")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::{SigmaAndProver, SigmaAndVerifier};
    use crate::crypto::{DlogGroup, Secret};
    use crate::groups::ModpGroup;
    use crate::protocols::dh::{DhCommonInput, DhProver, DhProverInput, DhVerifier};
    use crate::protocols::dlog::{DlogCommonInput, DlogProver, DlogProverInput, DlogVerifier};
    use crate::testing::{soundness, test_group};
    use rand_core::OsRng;

    type Mixed = Either<DlogProver<ModpGroup>, DhProver<ModpGroup>>;
    type MixedInput = Either<DlogProverInput<ModpGroup>, DhProverInput<ModpGroup>>;

    fn dlog_input(group: &ModpGroup) -> DlogProverInput<ModpGroup> {
        let w = group.random_exponent(&mut OsRng);
        DlogProverInput::new(
            DlogCommonInput::new(group.exponentiate_generator(&w)),
            Secret::new(&w),
        )
    }

    fn dh_input(group: &ModpGroup) -> DhProverInput<ModpGroup> {
        let w = group.random_exponent(&mut OsRng);
        let h = group.exponentiate_generator(&group.random_exponent(&mut OsRng));
        let common = DhCommonInput::new(
            group.generator().clone(),
            h.clone(),
            group.exponentiate_generator(&w),
            group.exponentiate(&h, &w),
        );
        DhProverInput::new(common, Secret::new(&w))
    }

    #[test]
    fn heterogeneous_conjunction_verifies() {
        let group = test_group();
        let t = soundness(64);
        let provers: Vec<Mixed> = vec![
            Left(DlogProver::new(group.clone(), t).unwrap()),
            Right(DhProver::new(group.clone(), t).unwrap()),
        ];
        let verifiers = vec![
            Left(DlogVerifier::new(group.clone(), t).unwrap()),
            Right(DhVerifier::new(group.clone(), t).unwrap()),
        ];
        let prover = SigmaAndProver::new(t, provers).unwrap();
        let verifier = SigmaAndVerifier::new(t, verifiers).unwrap();
        let input: Vec<MixedInput> = vec![Left(dlog_input(&group)), Right(dh_input(&group))];

        let (a, state) = prover.compute_first_msg(&input, &mut OsRng).unwrap();
        let e = Challenge::random(t, &mut OsRng);
        let z = prover.compute_second_msg(&input, state, &e).unwrap();
        assert!(verifier.verify(&input.common_input(), &a, &e, &z).unwrap());
    }

    #[test]
    fn wrong_side_input_is_invalid_input() {
        let group = test_group();
        let prover: Mixed = Left(DlogProver::new(group.clone(), soundness(64)).unwrap());
        let input: MixedInput = Right(dh_input(&group));
        let err = prover.compute_first_msg(&input, &mut OsRng).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
