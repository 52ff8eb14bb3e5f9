//! Cut-and-choose constraint that a Paillier ciphertext encrypts a value in a bounded range.
//!
//! This is the interactive range proof of \[1\], over Paillier encryption \[2\]. Given a range
//! bound `R`, write `t = R / 3` (rounded down). The prover shows that `C = Enc(x, r)` encrypts an
//! `x` such that `x + w` lands strictly inside the middle third `(t, 2t)` for a masking value `w`
//! drawn from `[0, 2t)`, without revealing `x`. An honest prover with `x` in `[0, t)` succeeds
//! unless a masking value falls exactly on a bound, which happens with probability about `1/t`
//! per repetition. The soundness error is about `2^-k` for `k` repetitions.
//!
//! ## Intuition
//! For each repetition the prover commits to an encrypted pair `(Enc(w1), Enc(w2))`, where one
//! value is drawn from `[0, t)` and the other is exactly `t` larger, in random order. The
//! verifier then flips a coin per repetition:
//!
//! - **open**: the prover reveals both masking values and their randomness. The verifier checks
//!   the commitments and that one value is at most `t` while the other lies strictly inside
//!   `(t, 2t)`.
//! - **mask**: the prover picks the slot `j` for which `x + wj` lies strictly inside `(t, 2t)`
//!   and reveals that sum with the matching randomness `r · rj`. The verifier checks that
//!   `Enc(wj) · C` (a homomorphic addition) is an encryption of the revealed sum, and that the
//!   sum is strictly inside `(t, 2t)`.
//!
//! A prover who cannot answer both questions for a repetition is caught with probability 1/2.
//!
//! ## Expected use
//!
//! 1. *Commit.* Call [`RangeProofBuilder::generate_encrypted_pairs()`] and send the
//!    [`EncryptedPairs`] to the verifier.
//!
//! 2. *Challenge.* The verifier replies with [`ChallengeBits`]; see
//!    [`ChallengeBits::random()`](crate::proofs::ChallengeBits::random). To remove the
//!    interaction, use [`NiRangeProof`](crate::proofs::NiRangeProof) instead, which derives the
//!    challenge from a hash of the commitments.
//!
//! 3. *Respond.* Call [`RangeProofBuilder::generate_proof()`]. This consumes the builder, so the
//!    masking values and randomness do not outlive the proof.
//!
//! 4. *Verify.* The verifier calls [`RangeProof::verify()`] with the same challenge and pairs.
//!
//! ## References
//!
//! 1. Yehuda Lindell. "Fast Secure Two-Party ECDSA Signing". In Advances in Cryptology -
//!    CRYPTO 2017, pages 613–644. Springer, 2017.
//!
//! 2. Pascal Paillier. "Public-Key Cryptosystems Based on Composite Degree Residuosity Classes".
//!    In Advances in Cryptology - EUROCRYPT '99, pages 223–238. Springer, 1999.

use crate::{
    bitvec::BitVec,
    common::*,
    paillier::EncryptionKey,
    proofs::{ChallengeBits, ChallengeBuilder, ChallengeDigest},
    Error,
};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};
use tracing::debug;

/// The ciphertexts committed to by the prover, one pair per repetition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPairs {
    /// Encryptions of the first masking value of each repetition.
    #[serde(with = "crate::serde::biguint_vec")]
    pub c1: Vec<BigUint>,
    /// Encryptions of the second masking value of each repetition.
    #[serde(with = "crate::serde::biguint_vec")]
    pub c2: Vec<BigUint>,
}

impl ChallengeDigest for EncryptedPairs {
    fn digest(&self, builder: &mut ChallengeBuilder) {
        for c in self.c1.iter().chain(&self.c2) {
            builder.digest_integer(c);
        }
    }
}

/// A full opening of one repetition's encrypted pair.
///
/// This is also what the prover retains between committing and responding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Open {
    /// First masking value.
    #[serde(with = "crate::serde::biguint")]
    pub w1: BigUint,
    /// Randomness used to encrypt `w1`.
    #[serde(with = "crate::serde::biguint")]
    pub r1: BigUint,
    /// Second masking value.
    #[serde(with = "crate::serde::biguint")]
    pub w2: BigUint,
    /// Randomness used to encrypt `w2`.
    #[serde(with = "crate::serde::biguint")]
    pub r2: BigUint,
}

/// Selects one half of an encrypted pair. Serialized as `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Slot {
    /// The first ciphertext, `c1`.
    First,
    /// The second ciphertext, `c2`.
    Second,
}

/// The error type returned when decoding a [`Slot`] from anything but `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid pair slot {0}, expected 1 or 2")]
pub struct InvalidSlot(pub u8);

impl From<Slot> for u8 {
    fn from(slot: Slot) -> Self {
        match slot {
            Slot::First => 1,
            Slot::Second => 2,
        }
    }
}

impl TryFrom<u8> for Slot {
    type Error = InvalidSlot;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Slot::First),
            2 => Ok(Slot::Second),
            other => Err(InvalidSlot(other)),
        }
    }
}

/// The secret, shifted by one masking value into the middle third.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mask {
    /// Which masking value was added to the secret.
    pub j: Slot,
    /// `x + wj`.
    #[serde(with = "crate::serde::biguint")]
    pub masked_x: BigUint,
    /// `r · rj mod N`.
    #[serde(with = "crate::serde::biguint")]
    pub masked_r: BigUint,
}

/// The prover's answer for a single repetition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    /// Answer to an unset challenge bit.
    Open(Open),
    /// Answer to a set challenge bit.
    Mask(Mask),
}

/// A complete range proof: one response per repetition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeProof {
    /// Responses, index-aligned with the challenge bits and the encrypted pairs.
    pub responses: Vec<Response>,
}

/// A partially-built [`RangeProof`].
///
/// Holds the committed [`EncryptedPairs`] along with the masking values and randomness needed to
/// answer a challenge.
pub struct RangeProofBuilder {
    encrypted_pairs: EncryptedPairs,
    openings: Vec<Open>,
    range: BigUint,
}

impl fmt::Debug for RangeProofBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeProofBuilder")
            .field("encrypted_pairs", &self.encrypted_pairs)
            .field("openings", &format_args!("<{} redacted>", self.openings.len()))
            .field("range", &self.range)
            .finish()
    }
}

impl RangeProofBuilder {
    /// Run the commitment phase of the range proof with `error_factor` repetitions.
    ///
    /// Fails if `range` is less than 3, since then there is nothing to draw masking values from.
    pub fn generate_encrypted_pairs(
        rng: &mut impl Rng,
        key: &EncryptionKey,
        range: &BigUint,
        error_factor: usize,
    ) -> Result<Self, Error> {
        let (third, _) = interval_bounds(range);
        if third.is_zero() {
            return Err(Error::DegenerateRange(range.clone()));
        }

        let openings: Vec<Open> = (0..error_factor)
            .map(|_| {
                // The width of the middle third is `third` as well.
                let low = rng.gen_biguint_below(&third);
                let high = &third + &low;
                // Slot order is public once opened; drawn from the thread-local generator.
                let (w1, w2) = if rand::random() {
                    (low, high)
                } else {
                    (high, low)
                };
                let r1 = key.sample_randomness(&mut *rng);
                let r2 = key.sample_randomness(&mut *rng);
                Open { w1, r1, w2, r2 }
            })
            .collect();

        let (c1, c2) = openings
            .iter()
            .map(|open| {
                (
                    key.encrypt_with_chosen_randomness(&open.w1, &open.r1),
                    key.encrypt_with_chosen_randomness(&open.w2, &open.r2),
                )
            })
            .unzip();

        debug!(error_factor, "generated encrypted pairs for range proof");

        Ok(Self {
            encrypted_pairs: EncryptedPairs { c1, c2 },
            openings,
            range: range.clone(),
        })
    }

    /// The committed pairs, to be sent to the verifier.
    pub fn encrypted_pairs(&self) -> &EncryptedPairs {
        &self.encrypted_pairs
    }

    /// The number of repetitions committed to.
    pub fn error_factor(&self) -> usize {
        self.openings.len()
    }

    /// Run the response phase of the range proof for `Enc(secret_x, secret_r)`.
    ///
    /// The secret is not checked against the range; a proof on an out-of-range secret will
    /// simply fail to verify. Fails if the challenge holds fewer bits than there are repetitions.
    pub fn generate_proof(
        self,
        key: &EncryptionKey,
        secret_x: &BigUint,
        secret_r: &BigUint,
        challenge: &ChallengeBits,
    ) -> Result<RangeProof, Error> {
        let bits = challenge.to_bitvec();
        if bits.len() < self.error_factor() {
            return Err(Error::ErrorFactorTooLarge {
                requested: self.error_factor(),
                available: bits.len(),
            });
        }

        let (third, two_thirds) = interval_bounds(&self.range);
        let responses = self
            .openings
            .into_iter()
            .enumerate()
            .map(|(i, open)| {
                if !bits.bit(i) {
                    return Response::Open(open);
                }

                let masked_w1 = secret_x + &open.w1;
                let mask = if strictly_between(&masked_w1, &third, &two_thirds) {
                    Mask {
                        j: Slot::First,
                        masked_x: masked_w1,
                        masked_r: (secret_r * &open.r1) % key.n(),
                    }
                } else {
                    Mask {
                        j: Slot::Second,
                        masked_x: secret_x + &open.w2,
                        masked_r: (secret_r * &open.r2) % key.n(),
                    }
                };
                Response::Mask(mask)
            })
            .collect();

        Ok(RangeProof { responses })
    }
}

impl RangeProof {
    /// Verify the proof that `cipher_x` encrypts a value in range, against the challenge and the
    /// committed pairs.
    ///
    /// Every repetition is checked before deciding; the result does not reveal which one failed.
    /// A proof, pair list or challenge of the wrong length fails.
    #[must_use = "the result of a verification should always be checked"]
    pub fn verify(
        &self,
        key: &EncryptionKey,
        challenge: &ChallengeBits,
        encrypted_pairs: &EncryptedPairs,
        range: &BigUint,
        cipher_x: &BigUint,
        error_factor: usize,
    ) -> bool {
        let bits = challenge.to_bitvec();
        let well_formed = bits.len() >= error_factor
            && self.responses.len() == error_factor
            && encrypted_pairs.c1.len() == error_factor
            && encrypted_pairs.c2.len() == error_factor;
        if !well_formed {
            return false;
        }

        let (third, two_thirds) = interval_bounds(range);
        let check = RepetitionCheck {
            key,
            bits: &bits,
            cipher_x,
            third: &third,
            two_thirds: &two_thirds,
        };

        self.responses
            .iter()
            .zip(encrypted_pairs.c1.iter().zip(&encrypted_pairs.c2))
            .enumerate()
            .map(|(i, (response, (c1, c2)))| check.verify(i, response, c1, c2))
            .fold(true, |all, passed| all & passed)
    }
}

/// Shared inputs for checking individual repetitions.
struct RepetitionCheck<'a> {
    key: &'a EncryptionKey,
    bits: &'a BitVec,
    cipher_x: &'a BigUint,
    third: &'a BigUint,
    two_thirds: &'a BigUint,
}

impl RepetitionCheck<'_> {
    fn verify(&self, i: usize, response: &Response, c1: &BigUint, c2: &BigUint) -> bool {
        match (self.bits.bit(i), response) {
            (false, Response::Open(open)) => self.verify_open(open, c1, c2),
            (true, Response::Mask(mask)) => self.verify_mask(mask, c1, c2),
            _ => false,
        }
    }

    fn verify_open(&self, open: &Open, c1: &BigUint, c2: &BigUint) -> bool {
        let commitments_match = self.key.encrypt_with_chosen_randomness(&open.w1, &open.r1) == *c1
            && self.key.encrypt_with_chosen_randomness(&open.w2, &open.r2) == *c2;

        let inside = |w: &BigUint| strictly_between(w, self.third, self.two_thirds);
        let split = (open.w1 <= *self.third && inside(&open.w2))
            || (open.w2 <= *self.third && inside(&open.w1));

        commitments_match && split
    }

    fn verify_mask(&self, mask: &Mask, c1: &BigUint, c2: &BigUint) -> bool {
        let committed = match mask.j {
            Slot::First => c1,
            Slot::Second => c2,
        };
        let shifted = self.key.add(committed, self.cipher_x);
        let expected = self
            .key
            .encrypt_with_chosen_randomness(&mask.masked_x, &mask.masked_r);

        shifted == expected && strictly_between(&mask.masked_x, self.third, self.two_thirds)
    }
}
