//! A packed bit vector with the fixed bit order used to read challenge bits out of a digest.
//!
//! Each source byte is bit-reversed and four reversed bytes are packed into a `u32` word, the
//! first byte in the lowest position. Bit `i` is then bit `i % 32` of word `i / 32`. Reading the
//! vector eight bits at a time therefore yields each source byte most-significant bit first.
//!
//! The vector always holds whole words, so its [`len`](BitVec::len) is a multiple of 32 even
//! when the source buffer was not a multiple of four bytes long.
//!
//! ```
//! # use zkpaillier_crypto::bitvec::BitVec;
//! let bits = BitVec::from_bytes(&[0b1010_0000]);
//! assert!(bits.bit(0));
//! assert!(!bits.bit(1));
//! assert!(bits.bit(2));
//! assert_eq!(bits.len(), 32);
//! ```

use serde::{Deserialize, Serialize};

/// Number of bits held by one backing word.
const WORD_BITS: usize = 32;

/// An ordered sequence of bits backed by 32-bit words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitVec(Vec<u32>);

impl BitVec {
    /// Pack a byte buffer into a bit vector.
    ///
    /// A trailing group of one to three bytes is packed into a final word whose unused high bits
    /// are zero.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let words = bytes
            .chunks(4)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u32, |word, (i, byte)| {
                        word | (u32::from(byte.reverse_bits()) << (i * 8))
                    })
            })
            .collect();
        Self(words)
    }

    /// Read bit `index`.
    ///
    /// Panics if `index` is not less than [`len`](BitVec::len).
    pub fn bit(&self, index: usize) -> bool {
        self.0[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    /// Overwrite bit `index` with `value`.
    ///
    /// Panics if `index` is not less than [`len`](BitVec::len).
    pub fn set_bit(&mut self, index: usize, value: bool) {
        let word = &mut self.0[index / WORD_BITS];
        let mask = 1 << (index % WORD_BITS);
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    /// The number of addressable bits, which is always `32 * word count`.
    pub fn len(&self) -> usize {
        WORD_BITS * self.0.len()
    }

    /// Whether the vector holds no words.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over every addressable bit in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(move |i| self.bit(i))
    }
}
