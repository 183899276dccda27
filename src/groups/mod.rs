/// Prime-order subgroups of `Z_p^*`, including the RFC 5114 2048/256 group.
pub mod modp;

pub use modp::{ModpElement, ModpGroup};
