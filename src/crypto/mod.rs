/// Flat ordered-field representation of protocol values.
pub mod encoding;
/// Modular arithmetic primitives.
pub mod field;
/// Discrete-log group trait.
pub mod group;
/// Zeroizing secrets and move-only nonces.
pub mod secret;

pub use encoding::MessageFields;
pub use group::{DlogGroup, GroupElement};
pub use secret::{Nonce, Secret};
