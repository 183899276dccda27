mod common;

use either::Either::{Left, Right};
use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_core::OsRng;
use sigma_zkp::composition::{
    OrProverInput, SigmaAndProver, SigmaAndSimulator, SigmaAndVerifier, SigmaOrProver,
    SigmaOrVerifier,
};
use sigma_zkp::protocol::{
    prove_non_interactive, verify_non_interactive, Challenge, ProverInput, ProverSession,
    SigmaProverComputation, SigmaSimulator, SigmaVerifierComputation, VerifierSession,
};
use sigma_zkp::protocols::dh::{DhCommonInput, DhProver, DhProverInput, DhVerifier};
use sigma_zkp::protocols::dh_extended::{
    extract_witness, DhExtendedCommonInput, DhExtendedProver, DhExtendedProverInput,
    DhExtendedSecondMessage, DhExtendedVerifier,
};
use sigma_zkp::protocols::dlog::{
    DlogCommonInput, DlogProver, DlogProverInput, DlogSimulator, DlogVerifier,
};
use sigma_zkp::protocols::pedersen_knowledge::{
    PedersenKnowledgeCommonInput, PedersenKnowledgeProver, PedersenKnowledgeProverInput,
    PedersenKnowledgeVerifier,
};
use sigma_zkp::reductions::elgamal_encrypted_value::{
    ElGamalWitness, EncryptedValueCommonInput, EncryptedValueProverInput,
};
use sigma_zkp::reductions::pedersen_committed_value::{
    CommittedValueCommonInput, CommittedValueProverInput,
};
use sigma_zkp::reductions::{ElGamalEncryptedValue, PedersenCommittedValue};
use sigma_zkp::schemes::{elgamal, PedersenCommitter};
use sigma_zkp::{DlogGroup, ModpGroup, Secret, SigmaConfig};

use common::{init_tracing, small_group, soundness};

fn dlog_statement(group: &ModpGroup) -> DlogProverInput<ModpGroup> {
    let w = group.random_exponent(&mut OsRng);
    DlogProverInput::new(
        DlogCommonInput::new(group.exponentiate_generator(&w)),
        Secret::new(&w),
    )
}

fn dh_statement(group: &ModpGroup) -> DhProverInput<ModpGroup> {
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

fn two_base_statement(group: &ModpGroup, w: &BigUint) -> DhExtendedProverInput<ModpGroup> {
    let g1 = group.generator().clone();
    let g2 = group.exponentiate_generator(&BigUint::from(65_537u32));
    let h = vec![group.exponentiate(&g1, w), group.exponentiate(&g2, w)];
    let common = DhExtendedCommonInput::new(vec![g1, g2], h).unwrap();
    DhExtendedProverInput::new(common, Secret::new(w))
}

#[test]
fn dlog_session_flow() {
    init_tracing();
    let group = small_group();
    let t = soundness(80);
    let input = dlog_statement(&group);
    let common = input.common_input();

    let mut prover = ProverSession::new(DlogProver::new(group.clone(), t).unwrap());
    let mut verifier = VerifierSession::new(DlogVerifier::new(group, t).unwrap());

    prover.set_input(input);
    let a = prover.compute_first_msg(&mut OsRng).unwrap();
    let e = verifier.sample_challenge(&mut OsRng).clone();
    assert_eq!(e.len(), 10);
    let z = prover.compute_second_msg(&e).unwrap();
    assert!(!prover.has_pending_state());
    assert!(verifier.verify(&common, &a, &z).unwrap());
}

#[test]
fn rfc5114_group_runs_dh_protocol() {
    init_tracing();
    let group = ModpGroup::rfc5114_2048_256();
    let t = SigmaConfig::default().soundness().unwrap();
    let input = dh_statement(&group);

    let prover = DhProver::new(group.clone(), t).unwrap();
    let verifier = DhVerifier::new(group, t).unwrap();
    let (a, state) = prover.compute_first_msg(&input, &mut OsRng).unwrap();
    let e = Challenge::random(t, &mut OsRng);
    let z = prover.compute_second_msg(&input, state, &e).unwrap();
    assert!(verifier.verify(input.common(), &a, &e, &z).unwrap());
}

#[test]
fn two_base_extended_dh_with_one_byte_challenge() {
    init_tracing();
    let group = small_group();
    let t = soundness(8);
    let w = BigUint::from(0xC0FFEE_u32);
    let input = two_base_statement(&group, &w);
    let prover = DhExtendedProver::new(group.clone(), t).unwrap();
    let verifier = DhExtendedVerifier::new(group.clone(), t).unwrap();

    let (a, state) = prover
        .compute_first_msg(&input, &mut StdRng::seed_from_u64(7))
        .unwrap();
    let e = Challenge::from_bytes(vec![0x2A]);
    let z = prover.compute_second_msg(&input, state, &e).unwrap();
    assert!(verifier.verify(input.common(), &a, &e, &z).unwrap());

    for bit in 0..group.order().bits() {
        let mut flipped = z.z().clone();
        flipped.set_bit(bit, !flipped.bit(bit));
        let tampered = DhExtendedSecondMessage::new(flipped);
        assert!(
            !verifier.verify(input.common(), &a, &e, &tampered).unwrap(),
            "flipping bit {bit} of z must be rejected"
        );
    }

    let (a_again, state) = prover
        .compute_first_msg(&input, &mut StdRng::seed_from_u64(7))
        .unwrap();
    assert_eq!(a_again, a);
    let e_prime = Challenge::from_bytes(vec![0x91]);
    let z_prime = prover.compute_second_msg(&input, state, &e_prime).unwrap();
    assert!(verifier.verify(input.common(), &a, &e_prime, &z_prime).unwrap());

    let extracted = extract_witness(group.order(), (&e, &z), (&e_prime, &z_prime)).unwrap();
    assert_eq!(extracted, w);
}

#[test]
fn heterogeneous_and_of_dlog_and_dh() {
    init_tracing();
    let group = small_group();
    let t = soundness(64);
    let prover = SigmaAndProver::new(
        t,
        vec![
            Left(DlogProver::new(group.clone(), t).unwrap()),
            Right(DhProver::new(group.clone(), t).unwrap()),
        ],
    )
    .unwrap();
    let verifier = SigmaAndVerifier::new(
        t,
        vec![
            Left(DlogVerifier::new(group.clone(), t).unwrap()),
            Right(DhVerifier::new(group.clone(), t).unwrap()),
        ],
    )
    .unwrap();
    let input = vec![Left(dlog_statement(&group)), Right(dh_statement(&group))];

    let mut prover = ProverSession::new(prover);
    let mut verifier = VerifierSession::new(verifier);
    prover.set_input(input.clone());
    let a = prover.compute_first_msg(&mut OsRng).unwrap();
    let e = verifier.sample_challenge(&mut OsRng).clone();
    let z = prover.compute_second_msg(&e).unwrap();
    assert!(verifier.verify(&input.common_input(), &a, &z).unwrap());
}

#[test]
fn and_simulator_output_verifies() {
    let group = small_group();
    let t = soundness(64);
    let simulators = (0..3)
        .map(|_| DlogSimulator::new(group.clone(), t).unwrap())
        .collect();
    let verifiers = (0..3)
        .map(|_| DlogVerifier::new(group.clone(), t).unwrap())
        .collect();
    let simulator = SigmaAndSimulator::new(t, simulators).unwrap();
    let verifier = SigmaAndVerifier::new(t, verifiers).unwrap();
    let common: Vec<_> = (0..3).map(|_| dlog_statement(&group).common_input()).collect();

    let transcript = simulator.simulate_random(&common, &mut OsRng).unwrap();
    assert!(transcript.verify_with(&verifier, &common).unwrap());
}

#[test]
fn or_of_committed_value_and_private_key() {
    init_tracing();
    let group = small_group();
    let t = soundness(64);
    let prover = SigmaOrProver::new(
        PedersenCommittedValue::prover(group.clone(), t).unwrap(),
        DlogProver::new(group.clone(), t).unwrap(),
    )
    .unwrap();
    let verifier = SigmaOrVerifier::new(
        PedersenCommittedValue::verifier(group.clone(), t).unwrap(),
        DlogVerifier::new(group.clone(), t).unwrap(),
    )
    .unwrap();

    let (committer, _) = PedersenCommitter::generate(group.clone(), &mut OsRng);
    let x = BigUint::from(2024u32);
    let (commitment, r) = committer.commit(&x, &mut OsRng);
    let known = CommittedValueProverInput::new(
        CommittedValueCommonInput::new(committer.public_key().clone(), commitment, x),
        r,
    );
    let input = OrProverInput::First {
        input: known,
        other: dlog_statement(&group).common_input(),
    };

    let (a, state) = prover.compute_first_msg(&input, &mut OsRng).unwrap();
    let e = Challenge::random(t, &mut OsRng);
    let z = prover.compute_second_msg(&input, state, &e).unwrap();
    assert_eq!(z.e0().xor(z.e1()).unwrap(), e);
    assert!(verifier.verify(&input.common_input(), &a, &e, &z).unwrap());
}

#[test]
fn pedersen_opening_proof() {
    let group = small_group();
    let t = soundness(80);
    let (committer, _) = PedersenCommitter::generate(group.clone(), &mut OsRng);
    let x = group.random_exponent(&mut OsRng);
    let (commitment, r) = committer.commit(&x, &mut OsRng);
    let input = PedersenKnowledgeProverInput::new(
        PedersenKnowledgeCommonInput::new(committer.public_key().clone(), commitment),
        Secret::new(&x),
        r,
    );

    let prover = PedersenKnowledgeProver::new(group.clone(), t).unwrap();
    let verifier = PedersenKnowledgeVerifier::new(group, t).unwrap();
    let proof = prove_non_interactive(&prover, &input, b"opening", &mut OsRng).unwrap();
    assert!(verify_non_interactive(&verifier, input.common(), b"opening", &proof).unwrap());
    assert!(!verify_non_interactive(&verifier, input.common(), b"other", &proof).unwrap());
}

#[test]
fn elgamal_plaintext_proof_is_non_interactive() {
    let group = small_group();
    let t = soundness(64);
    let (pk, _) = elgamal::generate_keypair(&group, &mut OsRng);
    let m = group.exponentiate_generator(&BigUint::from(1234u32));
    let (ct, r) = elgamal::encrypt(&group, &pk, &m, &mut OsRng);
    let common = EncryptedValueCommonInput::new(pk, ct, m, ElGamalWitness::Randomness);
    let input = EncryptedValueProverInput::new(common, r);

    let prover = ElGamalEncryptedValue::prover(group.clone(), t).unwrap();
    let verifier = ElGamalEncryptedValue::verifier(group, t).unwrap();
    let proof = prove_non_interactive(&prover, &input, b"ballot", &mut OsRng).unwrap();
    assert!(verify_non_interactive(&verifier, input.common(), b"ballot", &proof).unwrap());
}

#[test]
fn committed_value_matches_dlog_on_cancelled_key() {
    let group = small_group();
    let t = soundness(80);
    let (committer, _) = PedersenCommitter::generate(group.clone(), &mut OsRng);
    let x = BigUint::from(77u32);
    let (commitment, r) = committer.commit(&x, &mut OsRng);
    let common = CommittedValueCommonInput::new(committer.public_key().clone(), commitment, x);
    let input = CommittedValueProverInput::new(common.clone(), r);

    let reduction = PedersenCommittedValue::new(group.clone());
    let cancelled = DlogCommonInput::new(reduction.cancel(&common).unwrap());
    let prover = PedersenCommittedValue::prover(group.clone(), t).unwrap();
    let verifier = PedersenCommittedValue::verifier(group.clone(), t).unwrap();
    let base_verifier = DlogVerifier::new(group, t).unwrap();

    let (a, state) = prover.compute_first_msg(&input, &mut OsRng).unwrap();
    let e = Challenge::random(t, &mut OsRng);
    let z = prover.compute_second_msg(&input, state, &e).unwrap();
    assert!(verifier.verify(&common, &a, &e, &z).unwrap());
    assert!(base_verifier.verify(&cancelled, &a, &e, &z).unwrap());

    let simulated = prover.simulator().simulate(&common, &e, &mut OsRng).unwrap();
    let (sa, se, sz) = simulated.into_parts();
    assert_eq!(
        verifier.verify(&common, &sa, &se, &sz).unwrap(),
        base_verifier.verify(&cancelled, &sa, &se, &sz).unwrap()
    );
}
