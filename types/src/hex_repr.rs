//! Shared `0x`-prefixed hex handling for the fixed-width identifier types.

use crate::ParseError;

pub(crate) fn encode(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub(crate) fn decode<const N: usize>(s: &str) -> Result<[u8; N], ParseError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| ParseError::MissingPrefix(s.to_string()))?;
    let bytes = hex::decode(digits).map_err(|e| ParseError::InvalidHex(e.to_string()))?;
    from_slice(&bytes)
}

pub(crate) fn from_slice<const N: usize>(bytes: &[u8]) -> Result<[u8; N], ParseError> {
    bytes.try_into().map_err(|_| ParseError::InvalidLength {
        expected: N,
        got: bytes.len(),
    })
}

/// Implements `Display`, `FromStr` and string-form serde for a `[u8; N]` newtype.
macro_rules! impl_hex_newtype {
    ($ty:ident, $len:expr) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::hex_repr::encode(&self.0))
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::hex_repr::decode::<$len>(s).map(Self)
            }
        }

        impl TryFrom<&[u8]> for $ty {
            type Error = $crate::ParseError;

            fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
                $crate::hex_repr::from_slice::<$len>(bytes).map(Self)
            }
        }

        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use impl_hex_newtype;
