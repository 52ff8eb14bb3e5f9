mod test_utils;

use num_bigint::BigUint;
use zkpaillier_crypto::{
    paillier::EncryptionKey,
    proofs::{
        ChallengeBits, EncryptedPairs, RangeProof, RangeProofBuilder, Response, Slot,
    },
    Rng,
};

// Interval (300000, 600000).
const RANGE: u32 = 900_000;

struct Setup {
    key: EncryptionKey,
    range: BigUint,
    cipher_x: BigUint,
    challenge: ChallengeBits,
    pairs: EncryptedPairs,
    proof: RangeProof,
    error_factor: usize,
}

impl Setup {
    fn verifies(&self) -> bool {
        self.verifies_proof(&self.proof)
    }

    fn verifies_proof(&self, proof: &RangeProof) -> bool {
        proof.verify(
            &self.key,
            &self.challenge,
            &self.pairs,
            &self.range,
            &self.cipher_x,
            self.error_factor,
        )
    }
}

fn run_protocol(
    rng: &mut impl Rng,
    range: BigUint,
    secret_x: BigUint,
    challenge: ChallengeBits,
    error_factor: usize,
) -> Setup {
    let key = test_utils::test_key();
    let (cipher_x, secret_r) = key.encrypt(&mut *rng, &secret_x);

    let builder =
        RangeProofBuilder::generate_encrypted_pairs(&mut *rng, &key, &range, error_factor).unwrap();
    let pairs = builder.encrypted_pairs().clone();
    let proof = builder
        .generate_proof(&key, &secret_x, &secret_r, &challenge)
        .unwrap();

    Setup {
        key,
        range,
        cipher_x,
        challenge,
        pairs,
        proof,
        error_factor,
    }
}

fn fixed_scenario() -> Setup {
    let mut rng = test_utils::seeded_rng();
    run_protocol(
        &mut rng,
        BigUint::from(RANGE),
        BigUint::from(150_000u32),
        ChallengeBits::from_bits(&[false, true, false, true]),
        4,
    )
}

#[test]
fn fixed_challenge_proof_verifies() {
    let setup = fixed_scenario();
    assert!(matches!(setup.proof.responses[0], Response::Open(_)));
    assert!(matches!(setup.proof.responses[1], Response::Mask(_)));
    assert!(matches!(setup.proof.responses[2], Response::Open(_)));
    assert!(matches!(setup.proof.responses[3], Response::Mask(_)));
    assert!(setup.verifies());
}

#[test]
fn corrupting_any_response_field_fails() {
    let setup = fixed_scenario();
    let one = BigUint::from(1u8);

    for i in 0..setup.error_factor {
        let corruptions: [fn(&mut Response, &BigUint); 4] = [
            |r: &mut Response, one: &BigUint| match r {
                Response::Open(open) => open.w1 += one,
                Response::Mask(mask) => mask.masked_x += one,
            },
            |r: &mut Response, one: &BigUint| match r {
                Response::Open(open) => open.r1 += one,
                Response::Mask(mask) => mask.masked_r += one,
            },
            |r: &mut Response, one: &BigUint| match r {
                Response::Open(open) => open.w2 += one,
                Response::Mask(mask) => {
                    mask.j = match mask.j {
                        Slot::First => Slot::Second,
                        Slot::Second => Slot::First,
                    }
                }
            },
            |r: &mut Response, one: &BigUint| match r {
                Response::Open(open) => open.r2 += one,
                Response::Mask(mask) => mask.masked_x -= one,
            },
        ];

        for (n, corrupt) in corruptions.iter().enumerate() {
            let mut proof = setup.proof.clone();
            corrupt(&mut proof.responses[i], &one);
            assert!(
                !setup.verifies_proof(&proof),
                "corruption {} of response {} still verified",
                n,
                i
            );
        }
    }
}

#[test]
fn swapped_response_variant_fails() {
    let setup = fixed_scenario();

    // Answer the second (mask) repetition with the first (open) repetition's response.
    let mut proof = setup.proof.clone();
    proof.responses[1] = proof.responses[0].clone();
    assert!(!setup.verifies_proof(&proof));

    let mut proof = setup.proof.clone();
    proof.responses[0] = proof.responses[1].clone();
    assert!(!setup.verifies_proof(&proof));
}

#[test]
fn wrong_lengths_fail() {
    let setup = fixed_scenario();

    let mut short = setup.proof.clone();
    let _ = short.responses.pop();
    assert!(!setup.verifies_proof(&short));

    let mut long = setup.proof.clone();
    long.responses.push(setup.proof.responses[0].clone());
    assert!(!setup.verifies_proof(&long));

    // Pairs must cover every repetition too.
    let mut pairs = setup.pairs.clone();
    let _ = pairs.c2.pop();
    assert!(!setup.proof.verify(
        &setup.key,
        &setup.challenge,
        &pairs,
        &setup.range,
        &setup.cipher_x,
        setup.error_factor,
    ));

    // And the verifier's error factor must match.
    assert!(!setup.proof.verify(
        &setup.key,
        &setup.challenge,
        &setup.pairs,
        &setup.range,
        &setup.cipher_x,
        setup.error_factor - 1,
    ));
}

#[test]
fn different_challenge_fails() {
    let setup = fixed_scenario();
    let flipped = ChallengeBits::from_bits(&[true, false, true, false]);
    assert!(!setup.proof.verify(
        &setup.key,
        &flipped,
        &setup.pairs,
        &setup.range,
        &setup.cipher_x,
        setup.error_factor,
    ));
}

#[test]
fn different_ciphertext_fails() {
    let setup = fixed_scenario();
    let mut rng = test_utils::seeded_rng();
    let (other_cipher, _) = setup.key.encrypt(&mut rng, &BigUint::from(150_001u32));
    assert!(!setup.proof.verify(
        &setup.key,
        &setup.challenge,
        &setup.pairs,
        &setup.range,
        &other_cipher,
        setup.error_factor,
    ));
}

#[test]
fn random_challenges_verify() {
    let mut rng = test_utils::real_rng();
    for secret in &[0u64, 1, 1 << 40, u64::MAX] {
        let challenge = ChallengeBits::random(&mut rng, 64);
        let setup = run_protocol(
            &mut rng,
            test_utils::wide_range(),
            BigUint::from(*secret),
            challenge,
            64,
        );
        assert!(setup.verifies(), "secret {} failed to verify", secret);
    }
}

#[test]
fn secret_above_lower_third_fails() {
    let mut rng = test_utils::real_rng();
    let range = test_utils::wide_range();
    let third = &range / 3u8;

    // Every masked repetition lands above the interval.
    let too_large = &third * 2u8 + 5u8;
    let all_masked = ChallengeBits::from_bits(&[true; 64]);
    let setup = run_protocol(&mut rng, range.clone(), too_large, all_masked, 64);
    assert!(!setup.verifies());

    // Inside the middle third, each masked repetition passes only half the time.
    let middle = &third + (&third >> 1usize);
    let all_masked = ChallengeBits::from_bits(&[true; 64]);
    let setup = run_protocol(&mut rng, range, middle, all_masked, 64);
    assert!(!setup.verifies());
}
