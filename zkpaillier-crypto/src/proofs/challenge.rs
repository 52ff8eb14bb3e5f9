//! Functionality for building challenge bits.
//!
//! A [`ChallengeBuilder`] accumulates the public components of a proof into a SHA-256 hash. Each
//! integer contributes its minimal big-endian encoding, concatenated in the order it was digested
//! with no length prefixes or delimiters; zero contributes no bytes. The finished 32-byte digest
//! is read through a [`BitVec`](crate::bitvec::BitVec), giving 256 challenge bits.

use crate::{bitvec::BitVec, common::*};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Number of challenge bits derived from a single digest.
pub const DIGEST_BITS: usize = 256;

/// A trait implemented by types which can feed their public components into a [`ChallengeBuilder`].
pub trait ChallengeDigest {
    /// Incorporate public components of this type into a [`ChallengeBuilder`].
    fn digest(&self, builder: &mut ChallengeBuilder);
}

impl<'a, T: ChallengeDigest> ChallengeDigest for &'a T {
    fn digest(&self, builder: &mut ChallengeBuilder) {
        (**self).digest(builder);
    }
}

impl ChallengeDigest for BigUint {
    fn digest(&self, builder: &mut ChallengeBuilder) {
        builder.digest_integer(self);
    }
}

/// Per-repetition challenge bits for a range proof.
///
/// Bit `i` selects the response for repetition `i`: unset asks for the pair to be opened, set
/// asks for the secret to be masked. Bits are read through a [`BitVec`], so within each byte the
/// most significant bit comes first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeBits(Vec<u8>);

impl ChallengeBits {
    /// Wrap raw challenge bytes, e.g. a verifier's random query.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Pack explicit per-repetition bits, most significant bit of each byte first.
    pub fn from_bits(bits: &[bool]) -> Self {
        let bytes = bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |byte, (i, &bit)| byte | ((bit as u8) << (7 - i)))
            })
            .collect();
        Self(bytes)
    }

    /// Sample challenge bytes covering at least `error_factor` repetitions.
    pub fn random(rng: &mut impl Rng, error_factor: usize) -> Self {
        let mut bytes = vec![0; (error_factor + 7) / 8];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// The raw challenge bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Expand into an addressable bit vector.
    pub fn to_bitvec(&self) -> BitVec {
        BitVec::from_bytes(&self.0)
    }
}

/// Holds state used when building [`ChallengeBits`] using the Fiat-Shamir heuristic, as in a
/// non-interactive range proof.
#[derive(Debug, Clone)]
pub struct ChallengeBuilder {
    hasher: Sha256,
}

impl Default for ChallengeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChallengeBuilder {
    /// Initialize a new, empty challenge.
    pub fn new() -> Self {
        Self {
            hasher: Sha256::new(),
        }
    }

    /// Incorporate public data from some given type into the challenge.
    pub fn digest<T: ChallengeDigest>(&mut self, object: &T) {
        object.digest(self);
    }

    /// A conveniently chainable variant of [`ChallengeBuilder::digest`].
    pub fn with<T: ChallengeDigest>(mut self, object: &T) -> Self {
        object.digest(&mut self);
        self
    }

    /// Incorporate the minimal big-endian encoding of an integer into the challenge.
    pub fn digest_integer(&mut self, value: &BigUint) {
        // The minimal encoding of zero is empty.
        if !value.is_zero() {
            self.digest_bytes(value.to_bytes_be());
        }
    }

    /// Incorporate arbitrary bytes into the challenge.
    pub fn digest_bytes(&mut self, bytes: impl AsRef<[u8]>) {
        self.hasher.update(bytes);
    }

    /// Consume the builder and return the raw 32-byte digest.
    pub fn finish_digest(self) -> [u8; 32] {
        let mut digested = [0; 32];
        digested.copy_from_slice(self.hasher.finalize().as_ref());
        digested
    }

    /// Consume the builder and generate [`ChallengeBits`] from the accumulated data.
    pub fn finish(self) -> ChallengeBits {
        ChallengeBits(self.finish_digest().to_vec())
    }
}

/// SHA-256 over the concatenated minimal big-endian encodings of `values`.
pub fn compute_digest<'a>(values: impl IntoIterator<Item = &'a BigUint>) -> [u8; 32] {
    values
        .into_iter()
        .fold(ChallengeBuilder::new(), |builder, value| builder.with(value))
        .finish_digest()
}
