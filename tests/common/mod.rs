//! Common test utilities shared across integration tests.
#![allow(dead_code)]

use num_bigint::BigUint;
use sigma_zkp::protocol::SoundnessParameter;
use sigma_zkp::schemes::DamgardJurikPublicKey;
use sigma_zkp::ModpGroup;

/// Initialize test tracing (call once at the beginning of tests).
///
/// Logs from `sigma_zkp` at DEBUG go to the test writer. Subsequent calls are
/// ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::new("sigma_zkp=debug");

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

/// Safe prime `p = 2q + 1` with a 128-bit prime `q`, generator `4`.
pub fn small_group() -> ModpGroup {
    ModpGroup::new(
        "test-129",
        BigUint::parse_bytes(b"1000000000000000000000000000030a3", 16).unwrap(),
        BigUint::parse_bytes(b"80000000000000000000000000001851", 16).unwrap(),
        BigUint::from(4u32),
    )
    .expect("test group parameters are valid")
}

/// 128-bit Damgard-Jurik modulus.
pub fn dj_key() -> DamgardJurikPublicKey {
    let p = BigUint::parse_bytes(b"15147117399190197481", 10).unwrap();
    let q = BigUint::parse_bytes(b"17725086367446941689", 10).unwrap();
    DamgardJurikPublicKey::new(p * q).expect("modulus is odd and 128 bits")
}

pub fn soundness(bits: usize) -> SoundnessParameter {
    SoundnessParameter::new(bits).expect("bits is a positive multiple of 8")
}
