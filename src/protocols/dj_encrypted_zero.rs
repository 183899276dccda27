//! Knowledge of `r` such that a Damgard-Jurik ciphertext `c = r^N mod N'`
//! encrypts zero, with `N = n^ℓ` and `N' = n^{ℓ+1}`.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use subtle::Choice;
use tracing::debug;

use crate::crypto::{field, MessageFields, Nonce, Secret};
use crate::protocol::{
    Challenge, ProverInput, SigmaProverComputation, SigmaSimulator, SigmaTranscript,
    SigmaVerifierComputation, SimulatorOutput, SoundnessParameter,
};
use crate::schemes::{DamgardJurikCiphertext, DamgardJurikPublicKey};
use crate::Result;

/// The ciphertext claimed to encrypt zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DjEncryptedZeroCommonInput {
    ciphertext: DamgardJurikCiphertext,
}

impl DjEncryptedZeroCommonInput {
    pub fn new(ciphertext: DamgardJurikCiphertext) -> Self {
        Self { ciphertext }
    }

    pub fn ciphertext(&self) -> &DamgardJurikCiphertext {
        &self.ciphertext
    }
}

impl MessageFields for DjEncryptedZeroCommonInput {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.ciphertext.write_fields(out);
    }
}

/// Ciphertext plus the encryption randomness `r ∈ Z*_n`.
#[derive(Clone, Debug)]
pub struct DjEncryptedZeroProverInput {
    common: DjEncryptedZeroCommonInput,
    r: Secret,
}

impl DjEncryptedZeroProverInput {
    pub fn new(common: DjEncryptedZeroCommonInput, r: Secret) -> Self {
        Self { common, r }
    }

    pub fn common(&self) -> &DjEncryptedZeroCommonInput {
        &self.common
    }
}

impl ProverInput for DjEncryptedZeroProverInput {
    type Common = DjEncryptedZeroCommonInput;

    fn common_input(&self) -> Self::Common {
        self.common.clone()
    }
}

/// First message `a = s^N mod N'`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DjEncryptedZeroFirstMessage {
    a: BigUint,
}

impl DjEncryptedZeroFirstMessage {
    pub fn new(a: BigUint) -> Self {
        Self { a }
    }

    pub fn a(&self) -> &BigUint {
        &self.a
    }
}

impl MessageFields for DjEncryptedZeroFirstMessage {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.a.write_fields(out);
    }
}

/// Response `z = s · r^e mod n`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DjEncryptedZeroSecondMessage {
    z: BigUint,
}

impl DjEncryptedZeroSecondMessage {
    pub fn new(z: BigUint) -> Self {
        Self { z }
    }

    pub fn z(&self) -> &BigUint {
        &self.z
    }
}

impl MessageFields for DjEncryptedZeroSecondMessage {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.z.write_fields(out);
    }
}

/// Public key and soundness shared by the three roles.
#[derive(Clone, Debug)]
struct DjSetup {
    key: DamgardJurikPublicKey,
    soundness: SoundnessParameter,
}

impl DjSetup {
    fn new(key: DamgardJurikPublicKey, soundness: SoundnessParameter) -> Result<Self> {
        soundness.check_modulus(key.modulus())?;
        debug!(
            modulus_bits = key.modulus().bits(),
            soundness = soundness.bits(),
            "encrypted-zero role constructed"
        );
        Ok(Self { key, soundness })
    }

    /// Returns `(N, N')` for the ciphertext's length parameter.
    fn moduli(&self, ciphertext: &DamgardJurikCiphertext) -> Result<(BigUint, BigUint)> {
        self.key.moduli(ciphertext.length())
    }

    /// `x ∈ [1, bound)` and coprime to `n`.
    fn is_residue(&self, x: &BigUint, bound: &BigUint) -> bool {
        let in_range = x >= &BigUint::one() && x < bound;
        in_range & x.gcd(self.key.modulus()).is_one()
    }
}

#[derive(Clone, Debug)]
pub struct DjEncryptedZeroProver {
    setup: DjSetup,
}

impl DjEncryptedZeroProver {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`](crate::Error::InvalidParameter) unless
    /// `t < bitlength(n) / 3`.
    pub fn new(key: DamgardJurikPublicKey, soundness: SoundnessParameter) -> Result<Self> {
        Ok(Self {
            setup: DjSetup::new(key, soundness)?,
        })
    }
}

impl SigmaProverComputation for DjEncryptedZeroProver {
    type Input = DjEncryptedZeroProverInput;
    type FirstMessage = DjEncryptedZeroFirstMessage;
    type SecondMessage = DjEncryptedZeroSecondMessage;
    type State = Nonce;
    type Simulator = DjEncryptedZeroSimulator;

    fn soundness(&self) -> SoundnessParameter {
        self.setup.soundness
    }

    fn compute_first_msg<R: CryptoRngCore>(
        &self,
        input: &Self::Input,
        rng: &mut R,
    ) -> Result<(Self::FirstMessage, Self::State)> {
        let (big_n, n_prime) = self.setup.moduli(&input.common.ciphertext)?;
        let s = field::random_unit(self.setup.key.modulus(), rng);
        let a = field::mod_pow(&s, &big_n, &n_prime)?;
        Ok((DjEncryptedZeroFirstMessage { a }, Nonce::new(&s)))
    }

    fn compute_second_msg(
        &self,
        input: &Self::Input,
        state: Self::State,
        challenge: &Challenge,
    ) -> Result<Self::SecondMessage> {
        self.setup.soundness.check_challenge(challenge)?;
        let n = self.setup.key.modulus();
        let r_e = field::mod_pow(&input.r.expose(), &challenge.to_biguint(), n)?;
        let z = (state.value(0)? * r_e) % n;
        Ok(DjEncryptedZeroSecondMessage { z })
    }

    fn simulator(&self) -> Self::Simulator {
        DjEncryptedZeroSimulator {
            setup: self.setup.clone(),
        }
    }
}

/// Verifier checking `z^N ≡ a · c^e (mod N')`.
#[derive(Clone, Debug)]
pub struct DjEncryptedZeroVerifier {
    setup: DjSetup,
}

impl DjEncryptedZeroVerifier {
    pub fn new(key: DamgardJurikPublicKey, soundness: SoundnessParameter) -> Result<Self> {
        Ok(Self {
            setup: DjSetup::new(key, soundness)?,
        })
    }
}

impl SigmaVerifierComputation for DjEncryptedZeroVerifier {
    type Input = DjEncryptedZeroCommonInput;
    type FirstMessage = DjEncryptedZeroFirstMessage;
    type SecondMessage = DjEncryptedZeroSecondMessage;

    fn soundness(&self) -> SoundnessParameter {
        self.setup.soundness
    }

    fn verify(
        &self,
        input: &Self::Input,
        first: &Self::FirstMessage,
        challenge: &Challenge,
        second: &Self::SecondMessage,
    ) -> Result<bool> {
        self.setup.soundness.check_challenge(challenge)?;
        let (big_n, n_prime) = self.setup.moduli(&input.ciphertext)?;
        let c = input.ciphertext.value();

        let well_formed = Choice::from(u8::from(
            self.setup.is_residue(c, &n_prime)
                & self.setup.is_residue(&first.a, &n_prime)
                & self.setup.is_residue(&second.z, self.setup.key.modulus()),
        ));
        let lhs = field::mod_pow(&second.z, &big_n, &n_prime)?;
        let c_e = field::mod_pow(c, &challenge.to_biguint(), &n_prime)?;
        let rhs = (&first.a * c_e) % &n_prime;
        let relation = Choice::from(u8::from(lhs == rhs));
        Ok(bool::from(well_formed & relation))
    }
}

/// Simulator sampling `z ∈ Z*_n` and setting `a = z^N · c^{-e} mod N'`.
#[derive(Clone, Debug)]
pub struct DjEncryptedZeroSimulator {
    setup: DjSetup,
}

impl DjEncryptedZeroSimulator {
    pub fn new(key: DamgardJurikPublicKey, soundness: SoundnessParameter) -> Result<Self> {
        Ok(Self {
            setup: DjSetup::new(key, soundness)?,
        })
    }
}

impl SigmaSimulator for DjEncryptedZeroSimulator {
    type Input = DjEncryptedZeroCommonInput;
    type FirstMessage = DjEncryptedZeroFirstMessage;
    type SecondMessage = DjEncryptedZeroSecondMessage;

    fn soundness(&self) -> SoundnessParameter {
        self.setup.soundness
    }

    fn simulate<R: CryptoRngCore>(
        &self,
        input: &Self::Input,
        challenge: &Challenge,
        rng: &mut R,
    ) -> Result<SimulatorOutput<Self::FirstMessage, Self::SecondMessage>> {
        self.setup.soundness.check_challenge(challenge)?;
        let (big_n, n_prime) = self.setup.moduli(&input.ciphertext)?;
        let c_e = field::mod_pow(input.ciphertext.value(), &challenge.to_biguint(), &n_prime)?;
        let c_e_inv = field::mod_inverse(&c_e, &n_prime)?;

        let z = field::random_unit(self.setup.key.modulus(), rng);
        let a = (field::mod_pow(&z, &big_n, &n_prime)? * c_e_inv) % &n_prime;
        Ok(SigmaTranscript::new(
            DjEncryptedZeroFirstMessage { a },
            challenge.clone(),
            DjEncryptedZeroSecondMessage { z },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{soundness, test_dj_key};
    use rand_core::OsRng;

    fn zero_encryption(length: usize) -> DjEncryptedZeroProverInput {
        let key = test_dj_key();
        let (ciphertext, r) = key.encrypt(&BigUint::from(0u32), length, &mut OsRng).unwrap();
        DjEncryptedZeroProverInput::new(DjEncryptedZeroCommonInput::new(ciphertext), r)
    }

    #[test]
    fn soundness_must_be_below_a_third_of_modulus() {
        // 128-bit modulus: t must be below 42.
        assert!(DjEncryptedZeroVerifier::new(test_dj_key(), soundness(40)).is_ok());
        let err = DjEncryptedZeroProver::new(test_dj_key(), soundness(48)).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn honest_run_verifies_for_each_length() {
        let t = soundness(40);
        let prover = DjEncryptedZeroProver::new(test_dj_key(), t).unwrap();
        let verifier = DjEncryptedZeroVerifier::new(test_dj_key(), t).unwrap();
        for length in 1..=3 {
            let input = zero_encryption(length);
            let (a, state) = prover.compute_first_msg(&input, &mut OsRng).unwrap();
            let e = Challenge::random(t, &mut OsRng);
            let z = prover.compute_second_msg(&input, state, &e).unwrap();
            assert!(verifier.verify(input.common(), &a, &e, &z).unwrap());
        }
    }

    #[test]
    fn non_zero_plaintext_is_rejected() {
        let t = soundness(40);
        let key = test_dj_key();
        let prover = DjEncryptedZeroProver::new(key.clone(), t).unwrap();
        let verifier = DjEncryptedZeroVerifier::new(key.clone(), t).unwrap();
        let (ciphertext, r) = key.encrypt(&BigUint::from(5u32), 1, &mut OsRng).unwrap();
        let input = DjEncryptedZeroProverInput::new(DjEncryptedZeroCommonInput::new(ciphertext), r);

        let (a, state) = prover.compute_first_msg(&input, &mut OsRng).unwrap();
        let e = Challenge::from_bytes(vec![0x01, 0, 0, 0, 0]);
        let z = prover.compute_second_msg(&input, state, &e).unwrap();
        assert!(!verifier.verify(input.common(), &a, &e, &z).unwrap());
    }

    #[test]
    fn simulated_transcript_verifies() {
        let t = soundness(40);
        let simulator = DjEncryptedZeroSimulator::new(test_dj_key(), t).unwrap();
        let verifier = DjEncryptedZeroVerifier::new(test_dj_key(), t).unwrap();
        let input = zero_encryption(2);
        let transcript = simulator.simulate_random(input.common(), &mut OsRng).unwrap();
        assert!(transcript.verify_with(&verifier, input.common()).unwrap());
    }

    #[test]
    fn zero_length_ciphertext_is_invalid_input() {
        let t = soundness(40);
        let verifier = DjEncryptedZeroVerifier::new(test_dj_key(), t).unwrap();
        let ciphertext = DamgardJurikCiphertext::new(BigUint::from(2u32), 0);
        let common = DjEncryptedZeroCommonInput::new(ciphertext);
        let a = DjEncryptedZeroFirstMessage::new(BigUint::from(1u32));
        let z = DjEncryptedZeroSecondMessage::new(BigUint::from(1u32));
        let e = Challenge::random(t, &mut OsRng);
        assert!(verifier.verify(&common, &a, &e, &z).unwrap_err().is_invalid_input());
    }
}
