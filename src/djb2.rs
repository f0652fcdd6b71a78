use core::hash::BuildHasher;
use core::hash::Hasher;

/// Initial accumulator value for djb2.
const SEED: u32 = 5381;

#[inline(always)]
fn step(acc: u32, byte: u8) -> u32 {
    (acc << 5).wrapping_add(acc).wrapping_add(byte as u32)
}

/// Computes the 32-bit djb2 hash of `bytes`.
///
/// Each byte is folded in as `acc * 33 + byte`, wrapping at 32 bits.
///
/// # Examples
///
/// ```rust
/// use chain_hash::djb2::djb2;
///
/// assert_eq!(djb2(b""), 5381);
/// assert_eq!(djb2(b"a"), 177670);
/// ```
pub fn djb2(bytes: &[u8]) -> u32 {
    bytes.iter().fold(SEED, |acc, &byte| step(acc, byte))
}

/// Maps `bytes` to a bucket index in `0..modulus`.
///
/// # Panics
///
/// Panics if `modulus` is zero.
pub fn bucket_index(bytes: &[u8], modulus: usize) -> usize {
    (djb2(bytes) as u64 % modulus as u64) as usize
}

/// A [`Hasher`] implementing djb2 over the raw bytes written to it.
///
/// `finish` returns the 32-bit accumulator widened to `u64`, so
/// `finish() % n` matches [`bucket_index`] for any `n`.
#[derive(Debug, Clone, Copy)]
pub struct Djb2Hasher {
    acc: u32,
}

impl Default for Djb2Hasher {
    fn default() -> Self {
        Self { acc: SEED }
    }
}

impl Hasher for Djb2Hasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.acc = bytes.iter().fold(self.acc, |acc, &byte| step(acc, byte));
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.acc as u64
    }
}

/// The default [`BuildHasher`] of
/// [`ChainedHashTable`](crate::hash_table::ChainedHashTable).
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildDjb2;

impl BuildHasher for BuildDjb2 {
    type Hasher = Djb2Hasher;

    fn build_hasher(&self) -> Self::Hasher {
        Djb2Hasher::default()
    }
}
