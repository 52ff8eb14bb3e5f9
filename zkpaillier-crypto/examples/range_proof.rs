use num_bigint::BigUint;
use rand::thread_rng;
use zkpaillier_crypto::{paillier::EncryptionKey, proofs::NiRangeProof, Error};

/// Note on keys: real deployments use a modulus of 2048 bits or more, produced by the key
/// generation of the surrounding system. This example multiplies two Mersenne primes so that it
/// runs instantly.
fn main() {
    let mut rng = thread_rng();
    let p = (BigUint::from(1u8) << 89usize) - 1u8;
    let q = (BigUint::from(1u8) << 107usize) - 1u8;
    let key = EncryptionKey::new(p * q);

    // Masked responses must land in (2^64, 2^65); secrets below 2^64 can always be proven.
    let range = BigUint::from(3u8) << 64usize;
    let share = BigUint::from(123_456_789u64);
    let (ciphertext, randomness) = key.encrypt(&mut rng, &share);

    // Make a proof that the encrypted share is in range
    let proof = match NiRangeProof::prove(&mut rng, &key, &range, &ciphertext, &share, &randomness)
    {
        Ok(proof) => proof,
        Err(e) => unreachable!("Impossible error while generating proof: {}", e),
    };

    // Anyone holding the ciphertext can verify the proof without learning the share
    match proof.verify(&key, &ciphertext) {
        Ok(()) => println!("Yay! Proof verified!"),
        Err(e) => eprintln!("Invalid zk proof! {}", e),
    };

    // The proof is bound to its ciphertext...
    let (other_ciphertext, _) = key.encrypt(&mut rng, &share);
    match proof.verify(&key, &other_ciphertext) {
        Err(Error::CiphertextMismatch) => println!("Got expected error: ciphertext mismatch"),
        other => unreachable!("Proof accepted for another ciphertext: {:?}", other),
    };

    // ...and an out-of-range share cannot be proven.
    let too_large = BigUint::from(3u8) << 63usize;
    let (ciphertext, randomness) = key.encrypt(&mut rng, &too_large);
    let proof =
        match NiRangeProof::prove(&mut rng, &key, &range, &ciphertext, &too_large, &randomness) {
            Ok(proof) => proof,
            Err(e) => unreachable!("Impossible error while generating proof: {}", e),
        };
    match proof.verify_self() {
        Err(e) => println!("Got expected error: {}", e),
        Ok(()) => unreachable!("Out-of-range share verified!"),
    };
}
