//! Identity key issued by the external proof system.

use crate::hex_repr::impl_hex_newtype;

/// A 32-byte nullifier hash: the pseudonymous identity key.
///
/// Derived by the proof system from a human's identity and the
/// application/action context. The ledger never sees the underlying identity:
/// one nullifier is one human is one balance stream for this action.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nullifier([u8; 32]);

impl Nullifier {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for Nullifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Nullifier(0x{}\u{2026})", hex::encode(&self.0[..4]))
    }
}

impl_hex_newtype!(Nullifier, 32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_prefixed_lowercase_hex() {
        let n = Nullifier::new([0xAB; 32]);
        let s = n.to_string();
        assert_eq!(s.len(), 66);
        assert!(s.starts_with("0xabab"));
    }

    #[test]
    fn parse_round_trips_display() {
        let n = Nullifier::new([7; 32]);
        let parsed: Nullifier = n.to_string().parse().unwrap();
        assert_eq!(parsed, n);
    }

    #[test]
    fn parse_rejects_short_input() {
        let err = "0x1234".parse::<Nullifier>().unwrap_err();
        assert_eq!(err, crate::ParseError::InvalidLength { expected: 32, got: 2 });
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        let raw = "ab".repeat(32);
        assert!(matches!(
            raw.parse::<Nullifier>(),
            Err(crate::ParseError::MissingPrefix(_))
        ));
    }

    #[test]
    fn serializes_as_hex_string() {
        let n = Nullifier::new([1; 32]);
        let json = serde_json::to_string(&n).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "01".repeat(32)));
    }
}
