//! Field-sized hash values (signal hashes, external contexts, merkle roots).

use crate::hex_repr::impl_hex_newtype;

/// A 32-byte value whose leading byte is zero when produced by
/// `hash_to_field`, so it always fits the proof system's scalar field.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldHash([u8; 32]);

impl FieldHash {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Whether the value is below 2^248.
    pub fn fits_field(&self) -> bool {
        self.0[0] == 0
    }
}

impl std::fmt::Debug for FieldHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FieldHash(0x{}\u{2026})", hex::encode(&self.0[..4]))
    }
}

impl_hex_newtype!(FieldHash, 32);
