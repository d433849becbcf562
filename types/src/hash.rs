//! Block hash type for the account-chain lattice.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::NanoError;

/// A 32-byte Blake2b block hash — identifies a block in an account's chain.
///
/// The external form is 64 uppercase hexadecimal characters; the all-zero
/// hash doubles as the "no previous block" marker.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockHash([u8; 32]);

impl Default for BlockHash {
    fn default() -> Self {
        Self::ZERO
    }
}

impl BlockHash {
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

    /// Parse from a 64-character hex string (either case).
    pub fn from_hex(s: &str) -> Result<Self, NanoError> {
        let mut bytes = [0u8; 32];
        if s.len() != 64 {
            return Err(NanoError::BadEncoding(
                "block hash must be a 64-character hexadecimal string".into(),
            ));
        }
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|_| NanoError::BadEncoding("block hash is not valid hexadecimal".into()))?;
        Ok(Self(bytes))
    }

    /// Canonical 64-character uppercase hex form.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash(")?;
        for b in &self.0[..4] {
            write!(f, "{:02X}", b)?;
        }
        write!(f, "\u{2026})")
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for BlockHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for BlockHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        BlockHash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let hash = BlockHash::new([0xAB; 32]);
        assert_eq!(hash.to_hex(), "AB".repeat(32));
        assert_eq!(BlockHash::from_hex(&hash.to_hex()).unwrap(), hash);
    }

    #[test]
    fn accepts_lowercase() {
        let hash = BlockHash::from_hex(&"cd".repeat(32)).unwrap();
        assert_eq!(hash.as_bytes(), &[0xCD; 32]);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(BlockHash::from_hex("AB").is_err());
        assert!(BlockHash::from_hex(&"AB".repeat(33)).is_err());
    }

    #[test]
    fn rejects_non_hex() {
        assert!(BlockHash::from_hex(&"GG".repeat(32)).is_err());
    }

    #[test]
    fn zero_is_zero() {
        assert!(BlockHash::ZERO.is_zero());
        assert!(!BlockHash::new([1; 32]).is_zero());
    }
}
