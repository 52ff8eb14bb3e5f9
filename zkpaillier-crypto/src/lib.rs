//! This crate implements a cut-and-choose zero-knowledge range proof on Paillier ciphertexts:
//! - A canonical bit extractor used to read challenge bits out of a hash digest.
//! - Paillier encryption under caller-chosen randomness.
//! - An interactive three-move range proof (commit to encrypted pairs, respond, verify).
//! - A non-interactive variant that derives the challenge with the Fiat-Shamir heuristic.
//!
//! A typical caller only needs the non-interactive proof:
//! ```
//! # use num_bigint::BigUint;
//! # use zkpaillier_crypto::{paillier::EncryptionKey, proofs::NiRangeProof};
//! # let mut rng = rand::thread_rng();
//! # let p = (BigUint::from(1u8) << 89usize) - 1u8;
//! # let q = (BigUint::from(1u8) << 107usize) - 1u8;
//! let key = EncryptionKey::new(p * q);
//! let range = BigUint::from(3u8) << 64usize;
//! let secret = BigUint::from(12345u32);
//! let (ciphertext, randomness) = key.encrypt(&mut rng, &secret);
//!
//! let proof = NiRangeProof::prove(&mut rng, &key, &range, &ciphertext, &secret, &randomness)?;
//! assert!(proof.verify(&key, &ciphertext).is_ok());
//! # Ok::<(), zkpaillier_crypto::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_copy_implementations, missing_debug_implementations)]
#![warn(unused_qualifications, unused_results)]
#![warn(future_incompatible)]
#![warn(unused)]
#![forbid(rustdoc::broken_intra_doc_links)]

pub mod bitvec;
pub mod paillier;
pub mod proofs;

mod serde;

use num_bigint::BigUint;
use thiserror::*;

pub use crate::common::Rng;

/// Error types that may arise from building or checking range proofs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The encryption key supplied to the verifier is not the one the proof was built under.
    #[error("encryption key mismatch")]
    EncryptionKeyMismatch,
    /// The ciphertext supplied to the verifier is not the one the proof was built on.
    #[error("ciphertext mismatch")]
    CiphertextMismatch,
    /// At least one repetition of the range proof failed to verify.
    #[error("range proof is invalid")]
    InvalidRangeProof,
    /// The range bound is too small to split into thirds.
    #[error("range bound {0} is too small to split into thirds")]
    DegenerateRange(BigUint),
    /// More repetitions were requested than the challenge can supply bits for.
    #[error("requested {requested} repetitions, but the challenge only provides {available} bits")]
    ErrorFactorTooLarge {
        /// The requested number of repetitions.
        requested: usize,
        /// The number of challenge bits available.
        available: usize,
    },
    /// Fewer repetitions were requested than the non-interactive proof requires.
    #[error("requested {requested} repetitions, but at least {required} are required")]
    ErrorFactorTooSmall {
        /// The requested number of repetitions.
        requested: usize,
        /// The minimum number of repetitions.
        required: usize,
    },
}

impl Error {
    /// Whether this error came from the verifier's inputs not matching the proof, as opposed to
    /// the proof itself failing.
    pub fn is_binding_mismatch(&self) -> bool {
        matches!(self, Error::EncryptionKeyMismatch | Error::CiphertextMismatch)
    }
}

mod common {
    //! Common types used internally.

    pub use num_bigint::{BigUint, RandBigInt};
    pub use num_traits::{One, Zero};

    /// A trait synonym for a cryptographically secure random number generator. This trait is
    /// blanket-implemented for all valid types and will never need to be implemented by-hand.
    pub trait Rng: rand::CryptoRng + rand::RngCore {}
    impl<T: rand::CryptoRng + rand::RngCore> Rng for T {}

    /// The bounds `(third, two_thirds)` of the interval the masked values must land in.
    pub fn interval_bounds(range: &BigUint) -> (BigUint, BigUint) {
        let third = range / 3u8;
        let two_thirds = &third * 2u8;
        (third, two_thirds)
    }

    /// Whether `lower < value < upper`.
    pub fn strictly_between(value: &BigUint, lower: &BigUint, upper: &BigUint) -> bool {
        value > lower && value < upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_errors_are_distinguished() {
        assert!(Error::EncryptionKeyMismatch.is_binding_mismatch());
        assert!(Error::CiphertextMismatch.is_binding_mismatch());
        assert!(!Error::InvalidRangeProof.is_binding_mismatch());
        assert_ne!(Error::InvalidRangeProof, Error::CiphertextMismatch);
    }

    #[test]
    fn interval_bounds_split_range_in_thirds() {
        let (third, two_thirds) = common::interval_bounds(&BigUint::from(900_000u32));
        assert_eq!(third, BigUint::from(300_000u32));
        assert_eq!(two_thirds, BigUint::from(600_000u32));

        // Rounds down before doubling.
        let (third, two_thirds) = common::interval_bounds(&BigUint::from(10u8));
        assert_eq!(third, BigUint::from(3u8));
        assert_eq!(two_thirds, BigUint::from(6u8));
    }

    #[test]
    fn strictly_between_excludes_endpoints() {
        let lower = BigUint::from(3u8);
        let upper = BigUint::from(6u8);
        assert!(!common::strictly_between(&BigUint::from(3u8), &lower, &upper));
        assert!(common::strictly_between(&BigUint::from(4u8), &lower, &upper));
        assert!(!common::strictly_between(&BigUint::from(6u8), &lower, &upper));
    }
}
