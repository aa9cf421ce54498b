//! Blake2b hashing and reduction into the proof field.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use energy_types::FieldHash;

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash `data` and drop the lowest byte, i.e. `blake2b_256(data) >> 8`.
///
/// The result is always below 2^248 and therefore a valid field element.
pub fn hash_to_field(data: &[u8]) -> FieldHash {
    shift_into_field(blake2b_256(data))
}

/// [`hash_to_field`] over the concatenation of `parts`.
pub fn hash_to_field_multi(parts: &[&[u8]]) -> FieldHash {
    shift_into_field(blake2b_256_multi(parts))
}

fn shift_into_field(digest: [u8; 32]) -> FieldHash {
    let mut out = [0u8; 32];
    out[1..].copy_from_slice(&digest[..31]);
    FieldHash::new(out)
}
