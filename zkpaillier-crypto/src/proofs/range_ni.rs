//! Non-interactive range proof, using the Fiat-Shamir heuristic.
//!
//! The challenge bits are the SHA-256 digest of the modulus followed by every first and then
//! every second ciphertext of the committed pairs. The resulting [`NiRangeProof`] carries
//! everything a verifier needs and can be checked by anyone, any number of times.

use crate::{
    common::*,
    paillier::EncryptionKey,
    proofs::{
        ChallengeBits, ChallengeBuilder, EncryptedPairs, RangeProof, RangeProofBuilder,
        DIGEST_BITS,
    },
    Error,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Number of repetitions used by [`NiRangeProof::prove`].
pub const SECURITY_PARAMETER: usize = 128;

/// A self-contained, publicly verifiable range proof on a Paillier ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NiRangeProof {
    encryption_key: EncryptionKey,
    #[serde(with = "crate::serde::biguint")]
    range: BigUint,
    #[serde(with = "crate::serde::biguint")]
    ciphertext: BigUint,
    encrypted_pairs: EncryptedPairs,
    proof: RangeProof,
    error_factor: usize,
}

impl NiRangeProof {
    /// Prove that `ciphertext = Enc(secret_x, secret_r)` encrypts a value in range, using
    /// [`SECURITY_PARAMETER`] repetitions.
    pub fn prove(
        rng: &mut impl Rng,
        key: &EncryptionKey,
        range: &BigUint,
        ciphertext: &BigUint,
        secret_x: &BigUint,
        secret_r: &BigUint,
    ) -> Result<Self, Error> {
        Self::prove_with_error_factor(
            rng,
            key,
            range,
            ciphertext,
            secret_x,
            secret_r,
            SECURITY_PARAMETER,
        )
    }

    /// Like [`NiRangeProof::prove`], with an explicit number of repetitions.
    ///
    /// A single digest provides 256 challenge bits, so at most 256 repetitions are supported.
    /// Fewer than [`SECURITY_PARAMETER`] repetitions would never verify and are rejected.
    pub fn prove_with_error_factor(
        rng: &mut impl Rng,
        key: &EncryptionKey,
        range: &BigUint,
        ciphertext: &BigUint,
        secret_x: &BigUint,
        secret_r: &BigUint,
        error_factor: usize,
    ) -> Result<Self, Error> {
        if error_factor < SECURITY_PARAMETER {
            return Err(Error::ErrorFactorTooSmall {
                requested: error_factor,
                required: SECURITY_PARAMETER,
            });
        }
        if error_factor > DIGEST_BITS {
            return Err(Error::ErrorFactorTooLarge {
                requested: error_factor,
                available: DIGEST_BITS,
            });
        }

        let builder = RangeProofBuilder::generate_encrypted_pairs(rng, key, range, error_factor)?;
        let encrypted_pairs = builder.encrypted_pairs().clone();
        let challenge = fiat_shamir_challenge(key, &encrypted_pairs);
        let proof = builder.generate_proof(key, secret_x, secret_r, &challenge)?;

        debug!(error_factor, "built non-interactive range proof");

        Ok(Self {
            encryption_key: key.clone(),
            range: range.clone(),
            ciphertext: ciphertext.clone(),
            encrypted_pairs,
            proof,
            error_factor,
        })
    }

    /// Verify the proof against the key and ciphertext the verifier expects it to be about.
    ///
    /// Fails with [`Error::EncryptionKeyMismatch`] or [`Error::CiphertextMismatch`] before doing
    /// any cryptography if the proof was built for something else.
    pub fn verify(&self, key: &EncryptionKey, ciphertext: &BigUint) -> Result<(), Error> {
        if *key != self.encryption_key {
            warn!("range proof was built under a different encryption key");
            return Err(Error::EncryptionKeyMismatch);
        }
        if *ciphertext != self.ciphertext {
            warn!("range proof was built on a different ciphertext");
            return Err(Error::CiphertextMismatch);
        }
        self.verify_self()
    }

    /// Verify the proof against its own key and ciphertext.
    ///
    /// A transcript with fewer than [`SECURITY_PARAMETER`] repetitions is invalid.
    pub fn verify_self(&self) -> Result<(), Error> {
        if self.error_factor < SECURITY_PARAMETER {
            warn!(
                error_factor = self.error_factor,
                "range proof has too few repetitions"
            );
            return Err(Error::InvalidRangeProof);
        }

        let challenge = fiat_shamir_challenge(&self.encryption_key, &self.encrypted_pairs);
        let verified = self.proof.verify(
            &self.encryption_key,
            &challenge,
            &self.encrypted_pairs,
            &self.range,
            &self.ciphertext,
            self.error_factor,
        );

        if verified {
            Ok(())
        } else {
            warn!("range proof failed to verify");
            Err(Error::InvalidRangeProof)
        }
    }

    /// The encryption key the proof was built under.
    pub fn encryption_key(&self) -> &EncryptionKey {
        &self.encryption_key
    }

    /// The range bound.
    pub fn range(&self) -> &BigUint {
        &self.range
    }

    /// The ciphertext the proof is about.
    pub fn ciphertext(&self) -> &BigUint {
        &self.ciphertext
    }

    /// The committed pairs.
    pub fn encrypted_pairs(&self) -> &EncryptedPairs {
        &self.encrypted_pairs
    }

    /// The per-repetition responses.
    pub fn proof(&self) -> &RangeProof {
        &self.proof
    }

    /// The number of repetitions.
    pub fn error_factor(&self) -> usize {
        self.error_factor
    }
}

fn fiat_shamir_challenge(key: &EncryptionKey, encrypted_pairs: &EncryptedPairs) -> ChallengeBits {
    ChallengeBuilder::new()
        .with(key)
        .with(encrypted_pairs)
        .finish()
}
