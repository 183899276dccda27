use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::crypto::{field, DlogGroup, GroupElement, MessageFields};
use crate::{Error, Result};

const RFC5114_P: &str = "87A8E61DB4B6663CFFBBD19C651959998CEEF608660DD0F25D2CEED4435E3B00E00DF8F1D61957D4FAF7DF4561B2AA3016C3D91134096FAA3BF4296D830E9A7C209E0C6497517ABD5A8A9D306BCF67ED91F9E6725B4758C022E0B1EF4275BF7B6C5BFC11D45F9088B941F54EB1E59BB8BC39A0BF12307F5C4FDB70C581B23F76B63ACAE1CAA6B7902D52526735488A0EF13C6D9A51BFA4AB3AD8347796524D8EF6A167B5A41825D967E144E5140564251CCACB83E6B486F6B3CA3F7971506026C0B857F689962856DED4010ABD0BE621C3A3960A54E710C375F26375D7014103A4B54330C198AF126116D2276E11715F693877FAD7EF09CADB094AE91E1A1597";

const RFC5114_Q: &str = "8CF83642A709A097B447997640129DA299B1A47D1EB3750BA308B0FE64F5FBD3";

const RFC5114_G: &str = "3FB32C9B73134D0B2E77506660EDBD484CA7B18F21EF205407F4793A1A0BA12510DBC15077BE463FFF4FED4AAC0BB555BE3A6C1B0C6B47B1BC3773BF7E8C6F62901228F8C28CBB18A55AE31341000A650196F931C77A57F2DDF463E5E9EC144B777DE62AAAB8A8628AC376D282D6ED3864E67982428EBC831D14348F6F2F9193B5045AF2767164E1DFC967C1FB3F2E55A4BD1BFFE83B9C80D052B985D182EA0ADB2A3B7313D3FE14C8484B1E052588B9B7D2BBD2DF016199ECD06E1557CD0915B3353BBB64E0EC377FD028370DF92B52C7891428CDC67EB6184B523D1DB246C32F63078490F00EF8D647D148D47954515E2327CFEF98C582664B4C0F6CC41659";

/// Element of a [`ModpGroup`]: a residue modulo `p`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModpElement(BigUint);

impl ModpElement {
    /// Wraps a residue without checking membership; see [`ModpGroup::element`].
    pub fn from_raw(value: BigUint) -> Self {
        Self(value)
    }

    /// Returns the residue.
    pub fn value(&self) -> &BigUint {
        &self.0
    }
}

impl MessageFields for ModpElement {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        out.push(self.0.to_bytes_be());
    }
}

impl GroupElement for ModpElement {}

/// Prime-order-`q` subgroup of `Z_p^*`.
///
/// Parameters are supplied at runtime and validated on construction, so the
/// same type serves the RFC 5114 group and small test groups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModpGroup {
    name: String,
    p: BigUint,
    q: BigUint,
    g: ModpElement,
    element_len: usize,
}

impl ModpGroup {
    /// Creates a group from `(p, q, g)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `p` or `q` is not prime, `q` does
    /// not divide `p - 1`, or `g` does not generate the order-`q` subgroup.
    pub fn new(name: impl Into<String>, p: BigUint, q: BigUint, g: BigUint) -> Result<Self> {
        let element_len = (p.bits() as usize).div_ceil(8);
        let group = Self {
            name: name.into(),
            p,
            q,
            g: ModpElement(g),
            element_len,
        };
        if !group.validate_group() {
            return Err(Error::InvalidParameter(format!(
                "{} is not a valid prime-order subgroup",
                group.name
            )));
        }
        Ok(group)
    }

    /// The 2048-bit MODP group with a 256-bit prime-order subgroup (RFC 5114, 2.3).
    pub fn rfc5114_2048_256() -> Self {
        let parse = |hex_str: &str| {
            BigUint::parse_bytes(hex_str.as_bytes(), 16)
                .unwrap_or_else(|| unreachable!("RFC 5114 constants are valid hex"))
        };
        let p = parse(RFC5114_P);
        Self {
            name: "RFC5114-2048-256".to_string(),
            element_len: (p.bits() as usize).div_ceil(8),
            p,
            q: parse(RFC5114_Q),
            g: ModpElement(parse(RFC5114_G)),
        }
    }

    /// Returns the modulus `p`.
    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    /// Wraps a residue as a group element after checking membership.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `value` is not in the subgroup.
    pub fn element(&self, value: BigUint) -> Result<ModpElement> {
        let element = ModpElement(value);
        if !self.is_member(&element) {
            return Err(Error::InvalidInput(format!(
                "value is not an element of {}",
                self.name
            )));
        }
        Ok(element)
    }
}

impl DlogGroup for ModpGroup {
    type Element = ModpElement;

    fn name(&self) -> &str {
        &self.name
    }

    fn order(&self) -> &BigUint {
        &self.q
    }

    fn generator(&self) -> &Self::Element {
        &self.g
    }

    fn identity(&self) -> Self::Element {
        ModpElement(BigUint::one())
    }

    fn exponentiate(&self, base: &Self::Element, exponent: &BigUint) -> Self::Element {
        ModpElement(base.0.modpow(exponent, &self.p))
    }

    fn multiply(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        ModpElement((&a.0 * &b.0) % &self.p)
    }

    fn invert(&self, element: &Self::Element) -> Self::Element {
        // Subgroup elements satisfy x^q = 1, so x^(q-1) is the inverse.
        let exponent = &self.q - 1u32;
        ModpElement(element.0.modpow(&exponent, &self.p))
    }

    fn is_member(&self, element: &Self::Element) -> bool {
        if element.0.is_zero() || element.0 >= self.p {
            return false;
        }
        element.0.modpow(&self.q, &self.p).is_one()
    }

    fn validate_group(&self) -> bool {
        if !field::is_probable_prime(&self.p) || !field::is_probable_prime(&self.q) {
            return false;
        }
        if !((&self.p - 1u32) % &self.q).is_zero() {
            return false;
        }
        self.g.0 > BigUint::one() && self.is_member(&self.g)
    }

    fn element_to_bytes(&self, element: &Self::Element) -> Vec<u8> {
        let raw = element.0.to_bytes_be();
        let mut out = vec![0u8; self.element_len.saturating_sub(raw.len())];
        out.extend_from_slice(&raw);
        out
    }

    fn element_from_bytes(&self, bytes: &[u8]) -> Result<Self::Element> {
        if bytes.len() != self.element_len {
            return Err(Error::InvalidInput(format!(
                "Expected {} bytes, got {}",
                self.element_len,
                bytes.len()
            )));
        }
        self.element(BigUint::from_bytes_be(bytes))
    }
}
