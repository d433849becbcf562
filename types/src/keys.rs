//! Cryptographic key types for account identity and signing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::NanoError;

/// A 32-byte Ed25519 public key. In NANO an account *is* its public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
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

    pub fn from_hex(s: &str) -> Result<Self, NanoError> {
        let mut bytes = [0u8; 32];
        if s.len() != 64 {
            return Err(NanoError::InvalidPublicKey);
        }
        hex::decode_to_slice(s, &mut bytes).map_err(|_| NanoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}\u{2026})", &self.to_hex()[..8])
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PublicKey::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A 32-byte Ed25519 private key.
///
/// Intentionally implements neither `Debug`, `Clone` nor `Serialize` to
/// prevent accidental exposure. Key bytes are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn from_hex(s: &str) -> Result<Self, NanoError> {
        let mut bytes = [0u8; 32];
        if s.len() != 64 {
            return Err(NanoError::InvalidPrivateKey);
        }
        hex::decode_to_slice(s, &mut bytes).map_err(|_| NanoError::InvalidPrivateKey)?;
        Ok(Self(bytes))
    }

    /// Hex form for export. Handle with the same care as the key itself.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// A 32-byte wallet seed from which account keys are derived.
///
/// External form is 64 lowercase hex characters. Zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; 32]);

impl Seed {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn from_hex(s: &str) -> Result<Self, NanoError> {
        let mut bytes = [0u8; 32];
        if s.len() != 64 {
            return Err(NanoError::InvalidSeed);
        }
        hex::decode_to_slice(s, &mut bytes).map_err(|_| NanoError::InvalidSeed)?;
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// A 64-byte Ed25519 signature; external form is 128 uppercase hex characters.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature([u8; 64]);

impl Signature {
    pub fn new(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    pub fn from_hex(s: &str) -> Result<Self, NanoError> {
        let mut bytes = [0u8; 64];
        if s.len() != 128 {
            return Err(NanoError::InvalidSignature);
        }
        hex::decode_to_slice(s, &mut bytes).map_err(|_| NanoError::InvalidSignature)?;
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}\u{2026})", &self.to_hex()[..8])
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// An Ed25519 key pair (public + private). Intentionally just data; use
/// `nanokit_crypto::keypair_from_seed` to construct one.
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}
