//! Fixtures shared by the unit tests.

use num_bigint::BigUint;

use crate::groups::ModpGroup;
use crate::protocol::SoundnessParameter;
use crate::schemes::damgard_jurik::DamgardJurikPublicKey;

/// Safe prime `p = 2q + 1` with a 128-bit prime `q`; `4` generates the order-`q` subgroup.
pub(crate) fn test_group() -> ModpGroup {
    ModpGroup::new(
        "test-129",
        BigUint::parse_bytes(b"1000000000000000000000000000030a3", 16).unwrap(),
        BigUint::parse_bytes(b"80000000000000000000000000001851", 16).unwrap(),
        BigUint::from(4u32),
    )
    .unwrap()
}

/// 128-bit Damgard-Jurik modulus built from two fixed 64-bit primes.
pub(crate) fn test_dj_key() -> DamgardJurikPublicKey {
    let p = BigUint::parse_bytes(b"15147117399190197481", 10).unwrap();
    let q = BigUint::parse_bytes(b"17725086367446941689", 10).unwrap();
    DamgardJurikPublicKey::new(p * q).unwrap()
}

pub(crate) fn soundness(bits: usize) -> SoundnessParameter {
    SoundnessParameter::new(bits).unwrap()
}
