use core::fmt::Debug;

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{field, MessageFields};
use crate::Result;

/// Element of a discrete-log group.
///
/// Elements flatten to a single big-endian field through [`MessageFields`].
pub trait GroupElement:
    Clone + Debug + Eq + PartialEq + Serialize + DeserializeOwned + MessageFields
{
}

/// Discrete-log group of prime order `q` consumed by the Sigma protocols.
///
/// Protocols use exponents modulo [`DlogGroup::order`] and never look inside
/// an element; everything they need goes through this trait.
pub trait DlogGroup: Clone + Debug {
    /// Element type of this group.
    type Element: GroupElement;

    /// Returns a human-readable name of this group.
    fn name(&self) -> &str;

    /// Returns the prime group order `q`.
    fn order(&self) -> &BigUint;

    /// Returns the fixed generator `g` of the group.
    fn generator(&self) -> &Self::Element;

    /// Returns the identity element.
    fn identity(&self) -> Self::Element;

    /// Computes `base^exponent`.
    fn exponentiate(&self, base: &Self::Element, exponent: &BigUint) -> Self::Element;

    /// Computes `a * b`.
    fn multiply(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Computes `element^-1`.
    fn invert(&self, element: &Self::Element) -> Self::Element;

    /// Returns `true` if `element` belongs to the order-`q` group.
    fn is_member(&self, element: &Self::Element) -> bool;

    /// Checks the group description itself (primality, generator order).
    fn validate_group(&self) -> bool;

    /// Serializes an element to fixed-width bytes.
    fn element_to_bytes(&self, element: &Self::Element) -> Vec<u8>;

    /// Deserializes an element, rejecting values outside the group.
    fn element_from_bytes(&self, bytes: &[u8]) -> Result<Self::Element>;

    /// Computes `g^exponent` for the fixed generator.
    fn exponentiate_generator(&self, exponent: &BigUint) -> Self::Element {
        self.exponentiate(self.generator(), exponent)
    }

    /// Samples a uniform exponent in `Z_q`.
    fn random_exponent<R: CryptoRngCore>(&self, rng: &mut R) -> BigUint {
        field::random_below(self.order(), rng)
    }
}
