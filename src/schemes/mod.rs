/// Cramer-Shoup encryption.
pub mod cramer_shoup;
/// Damgard-Jurik encryption.
pub mod damgard_jurik;
/// ElGamal encryption over a discrete-log group.
pub mod elgamal;
/// Pedersen commitments.
pub mod pedersen;

pub use cramer_shoup::{CramerShoupCiphertext, CramerShoupPublicKey};
pub use damgard_jurik::{DamgardJurikCiphertext, DamgardJurikPublicKey};
pub use elgamal::{ElGamalCiphertext, ElGamalPublicKey};
pub use pedersen::{PedersenCommitment, PedersenCommitter};
