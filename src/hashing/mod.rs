//! BLAKE3 helpers used for feature hashing.
//!
//! BLAKE3 output is identical on every platform and Rust release, so hashed
//! features (and therefore stub embeddings) are reproducible across builds,
//! which `std::hash::DefaultHasher` does not promise.

/// Computes a 64-bit hash of the input data using BLAKE3, truncated from 256 bits.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

/// Maps a feature string to a bucket in `0..buckets`.
///
/// Returns `0` when `buckets` is zero.
#[inline]
pub fn feature_bucket(feature: &str, buckets: usize) -> usize {
    if buckets == 0 {
        return 0;
    }
    (hash_to_u64(feature.as_bytes()) % buckets as u64) as usize
}
