//! The multipurpose state-block link field.

use std::fmt;

use crate::error::NanoError;
use crate::hash::BlockHash;
use crate::keys::PublicKey;

/// A 32-byte link field. Interpreted as the source block hash (receive), the
/// destination account's public key (send) or zero (change). The bytes
/// themselves carry no tag; `link` and `link_as_account` are two renderings
/// of the same value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Link([u8; 32]);

impl Default for Link {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Link {
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

    /// View the link as a block hash (receive interpretation).
    pub fn as_block_hash(&self) -> BlockHash {
        BlockHash::new(self.0)
    }

    /// View the link as an account public key (send interpretation).
    pub fn as_public_key(&self) -> PublicKey {
        PublicKey::new(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, NanoError> {
        Ok(Self(*BlockHash::from_hex(s)?.as_bytes()))
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl From<BlockHash> for Link {
    fn from(hash: BlockHash) -> Self {
        Self(*hash.as_bytes())
    }
}

impl From<PublicKey> for Link {
    fn from(key: PublicKey) -> Self {
        Self(*key.as_bytes())
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
