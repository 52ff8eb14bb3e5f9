//! Zero-knowledge range proofs on Paillier ciphertexts and the challenges that drive them.

mod challenge;
mod range;
mod range_ni;

pub use self::{challenge::*, range::*, range_ni::*};
