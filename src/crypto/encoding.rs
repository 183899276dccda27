//! Flat ordered-field representation of protocol values.
//!
//! Every message, common input and transcript can be flattened into an ordered
//! list of big-endian byte strings. The order is the protocol order (first
//! sub-protocol first, first element first). This fixes the *shape* an external
//! channel transmits; the framing of the fields on the wire belongs to the
//! channel.

use either::Either;
use num_bigint::BigUint;

/// Conversion into the flat ordered-field representation.
pub trait MessageFields {
    /// Appends this value's fields, in order, to `out`.
    fn write_fields(&self, out: &mut Vec<Vec<u8>>);

    /// Returns this value's fields in order.
    fn to_fields(&self) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        self.write_fields(&mut out);
        out
    }
}

impl MessageFields for BigUint {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        out.push(self.to_bytes_be());
    }
}

impl<T: MessageFields> MessageFields for Vec<T> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        for item in self {
            item.write_fields(out);
        }
    }
}

impl<A: MessageFields, B: MessageFields> MessageFields for (A, B) {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        self.0.write_fields(out);
        self.1.write_fields(out);
    }
}

impl<L: MessageFields, R: MessageFields> MessageFields for Either<L, R> {
    fn write_fields(&self, out: &mut Vec<Vec<u8>>) {
        match self {
            Either::Left(left) => left.write_fields(out),
            Either::Right(right) => right.write_fields(out),
        }
    }
}
