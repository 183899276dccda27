//! Base Sigma protocols.
//!
//! The discrete-log family (`dlog`, `dh`, `dh_extended`, `pedersen_knowledge`)
//! shares the checks below. `dj_encrypted_zero` works modulo `n^{ℓ+1}` and has
//! its own arithmetic.

/// Knowledge of `w` with `u = g^w` and `v = h^w`.
pub mod dh;
/// Knowledge of `w` with `h_i = g_i^w` for every `i`.
pub mod dh_extended;
/// Knowledge of the randomness of a Damgard-Jurik encryption of zero.
pub mod dj_encrypted_zero;
/// Knowledge of `w` with `h = g^w`.
pub mod dlog;
/// Knowledge of an opening `(x, r)` of a Pedersen commitment.
pub mod pedersen_knowledge;

use num_bigint::BigUint;
use subtle::Choice;
use tracing::debug;

use crate::crypto::DlogGroup;
use crate::protocol::SoundnessParameter;
use crate::{Error, Result};

/// Construction check shared by every discrete-log protocol role.
pub(crate) fn check_group_setup<G: DlogGroup>(
    group: &G,
    soundness: SoundnessParameter,
) -> Result<()> {
    if !group.validate_group() {
        return Err(Error::InvalidParameter(format!(
            "group {} failed validation",
            group.name()
        )));
    }
    soundness.check_group_order(group.order())?;
    debug!(group = group.name(), soundness = soundness.bits(), "protocol role constructed");
    Ok(())
}

/// `z = r + e·w mod q`.
pub(crate) fn response(r: &BigUint, e: &BigUint, w: &BigUint, q: &BigUint) -> BigUint {
    (r + e * w) % q
}

/// Rejects common inputs containing non-members before simulating.
pub(crate) fn ensure_members<'a, G, I>(group: &G, elements: I) -> Result<()>
where
    G: DlogGroup + 'a,
    I: IntoIterator<Item = &'a G::Element>,
{
    if elements.into_iter().all(|element| group.is_member(element)) {
        Ok(())
    } else {
        Err(Error::InvalidInput(
            "common input contains a non-member element".into(),
        ))
    }
}

/// Checks `base^z == first · target^e` with membership of all three
/// elements, for every `(base, target, first)` term.
///
/// Every term is evaluated even after a failure.
pub(crate) fn relation_holds<'a, G, I>(group: &G, terms: I, e: &BigUint, z: &BigUint) -> bool
where
    G: DlogGroup + 'a,
    I: IntoIterator<Item = (&'a G::Element, &'a G::Element, &'a G::Element)>,
{
    let mut accepted = Choice::from(u8::from(z < group.order()));
    for (base, target, first) in terms {
        let members = group.is_member(base) & group.is_member(target) & group.is_member(first);
        let lhs = group.exponentiate(base, z);
        let rhs = group.multiply(first, &group.exponentiate(target, e));
        accepted &= Choice::from(u8::from(members & (lhs == rhs)));
    }
    bool::from(accepted)
}

/// `a = base^z · target^{-e}`, the first message that makes the relation hold.
pub(crate) fn simulated_commitment<G: DlogGroup>(
    group: &G,
    base: &G::Element,
    target: &G::Element,
    e: &BigUint,
    z: &BigUint,
) -> G::Element {
    let shifted = group.invert(&group.exponentiate(target, e));
    group.multiply(&group.exponentiate(base, z), &shifted)
}
