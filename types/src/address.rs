//! 20-byte account address used for spender tags and recipients.

use crate::hex_repr::impl_hex_newtype;

/// A 20-byte address.
///
/// Its canonical textual form is `0x` followed by 40 lowercase hex digits;
/// that exact form is what the spend signal binds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 20]);

impl Address {
    pub const ZERO: Self = Self([0u8; 20]);

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl_hex_newtype!(Address, 20);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form_is_fixed_width() {
        let mut bytes = [0u8; 20];
        bytes[19] = 0x0f;
        assert_eq!(
            Address::new(bytes).to_string(),
            "0x000000000000000000000000000000000000000f"
        );
    }

    #[test]
    fn parse_accepts_mixed_case() {
        let a: Address = "0xABCDEFabcdef0000000000000000000000000001".parse().unwrap();
        assert_eq!(a.to_string(), "0xabcdefabcdef0000000000000000000000000001");
    }

    #[test]
    fn parse_rejects_non_hex() {
        let err = "0xzz00000000000000000000000000000000000000".parse::<Address>();
        assert!(matches!(err, Err(crate::ParseError::InvalidHex(_))));
    }
}
