//! The public half of a Paillier key \[1\] and encryption under caller-chosen randomness.
//!
//! Encryption uses the standard generator `g = 1 + N`, so
//! `Enc(m, r) = (1 + m·N) · r^N mod N²`. The scheme is additively homomorphic: multiplying two
//! ciphertexts modulo `N²` yields an encryption of the sum of their plaintexts modulo `N`.
//!
//! Key generation, key validation and decryption belong to the surrounding system and are not
//! provided here.
//!
//! ## References
//!
//! 1. Pascal Paillier. "Public-Key Cryptosystems Based on Composite Degree Residuosity Classes".
//!    In Advances in Cryptology - EUROCRYPT '99, pages 223–238. Springer, 1999.

use crate::{common::*, proofs::ChallengeBuilder, proofs::ChallengeDigest};
use serde::{Deserialize, Serialize};

/// A Paillier encryption key: the modulus `N` and its square.
///
/// Only `N` is serialized; `N²` is recomputed on decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Modulus", into = "Modulus")]
pub struct EncryptionKey {
    n: BigUint,
    nn: BigUint,
}

#[derive(Serialize, Deserialize)]
struct Modulus {
    #[serde(with = "crate::serde::biguint")]
    n: BigUint,
}

impl From<Modulus> for EncryptionKey {
    fn from(modulus: Modulus) -> Self {
        Self::new(modulus.n)
    }
}

impl From<EncryptionKey> for Modulus {
    fn from(key: EncryptionKey) -> Self {
        Self { n: key.n }
    }
}

impl EncryptionKey {
    /// Build a key from the modulus `N`.
    pub fn new(n: BigUint) -> Self {
        let nn = &n * &n;
        Self { n, nn }
    }

    /// The modulus `N`.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// The square of the modulus, `N²`.
    pub fn nn(&self) -> &BigUint {
        &self.nn
    }

    /// Sample encryption randomness uniformly from `[0, N)`.
    pub fn sample_randomness(&self, rng: &mut impl Rng) -> BigUint {
        rng.gen_biguint_below(&self.n)
    }

    /// Encrypt `m` under the given randomness.
    ///
    /// **Precondition:** `r` must be invertible modulo `N`. This is not checked; the verifier of
    /// a range proof recomputes ciphertexts from revealed values with this same function.
    pub fn encrypt_with_chosen_randomness(&self, m: &BigUint, r: &BigUint) -> BigUint {
        let rn = r.modpow(&self.n, &self.nn);
        let gm = (m * &self.n + 1u8) % &self.nn;
        (gm * rn) % &self.nn
    }

    /// Encrypt `m` under fresh randomness, returning the ciphertext and the randomness used.
    pub fn encrypt(&self, rng: &mut impl Rng, m: &BigUint) -> (BigUint, BigUint) {
        let r = self.sample_randomness(rng);
        (self.encrypt_with_chosen_randomness(m, &r), r)
    }

    /// Homomorphically add the plaintexts of two ciphertexts.
    pub fn add(&self, c1: &BigUint, c2: &BigUint) -> BigUint {
        (c1 * c2) % &self.nn
    }
}

impl ChallengeDigest for EncryptionKey {
    fn digest(&self, builder: &mut ChallengeBuilder) {
        builder.digest_integer(&self.n);
    }
}
