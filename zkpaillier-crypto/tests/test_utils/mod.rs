#![allow(dead_code)]

use num_bigint::BigUint;
use rand::SeedableRng;
use zkpaillier_crypto::paillier::EncryptionKey;

// Seeded rng for replicable tests.
pub fn seeded_rng() -> (impl rand::CryptoRng + rand::RngCore) {
    const TEST_RNG_SEED: [u8; 32] = *b"NEVER USE THIS FOR ANYTHING REAL";
    rand::rngs::StdRng::from_seed(TEST_RNG_SEED)
}

// Real rng for tests whose outcome should not hinge on one seed.
pub fn real_rng() -> (impl rand::CryptoRng + rand::RngCore) {
    rand::thread_rng()
}

fn mersenne(exp: usize) -> BigUint {
    (BigUint::from(1u8) << exp) - 1u8
}

// N = (2^89 - 1)(2^107 - 1); both factors are Mersenne primes.
pub fn test_key() -> EncryptionKey {
    EncryptionKey::new(mersenne(89) * mersenne(107))
}

// A different modulus, (2^61 - 1)(2^127 - 1).
pub fn other_key() -> EncryptionKey {
    EncryptionKey::new(mersenne(61) * mersenne(127))
}

// A range wide enough that ties on the interval bounds never come up in practice.
pub fn wide_range() -> BigUint {
    BigUint::from(3u8) << 64usize
}
