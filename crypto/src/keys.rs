//! Deterministic Ed25519 key derivation from wallet seeds.
//!
//! A private key is the 32-byte Blake2b of `seed || index` with the index in
//! big-endian; the public key is the standard RFC 8032 (SHA-512) Ed25519
//! public key of that private key. Note that the signature scheme's internal
//! hash is SHA-512 even though everything else in the protocol is Blake2b —
//! the two must not be mixed up.

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use rand::RngCore;

use nanokit_types::{KeyPair, PrivateKey, PublicKey, Seed};

use crate::hash::blake2b_256_multi;

/// Generate a fresh random seed from the operating system CSPRNG.
pub fn generate_seed() -> Seed {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    Seed::new(bytes)
}

/// Derive the private key for an account index.
///
/// The `u32` index covers the full derivation space; indices beyond
/// `2^32 - 1` do not exist in the scheme.
pub fn derive_private_key(seed: &Seed, index: u32) -> PrivateKey {
    let digest = blake2b_256_multi(&[seed.as_bytes(), &index.to_be_bytes()]);
    PrivateKey::new(digest)
}

/// Derive the Ed25519 public key from a private key.
pub fn derive_public_key(private: &PrivateKey) -> PublicKey {
    let signing_key = SigningKey::from_bytes(private.as_bytes());
    PublicKey::new(signing_key.verifying_key().to_bytes())
}

/// Derive the full key pair for an account index.
pub fn keypair_from_seed(seed: &Seed, index: u32) -> KeyPair {
    let private = derive_private_key(seed, index);
    let public = derive_public_key(&private);
    KeyPair { public, private }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Derivation vectors computed with independent Blake2b and RFC 8032
    // implementations.
    const SEED: &str = "d290d319ce3c2cbb675b023e5383a767415d7444975a2ea121848fc986954568";

    fn seed() -> Seed {
        Seed::from_hex(SEED).unwrap()
    }

    #[test]
    fn private_key_index_zero() {
        let private = derive_private_key(&seed(), 0);
        assert_eq!(
            private.to_hex(),
            "1daa53d0f4077b761f39f623d039870575256b59e73e9d77cd0cf31af7e91cb9"
        );
    }

    #[test]
    fn private_key_index_seven() {
        let private = derive_private_key(&seed(), 7);
        assert_eq!(
            private.to_hex(),
            "348e4f0e039070988b8b5093b916b4ebf0d33cd61be4a44932d35a86b64ed575"
        );
    }

    #[test]
    fn public_key_index_zero() {
        let pair = keypair_from_seed(&seed(), 0);
        assert_eq!(
            pair.public.to_hex(),
            "a747fb8951bc4c9760f5da150bceb04942b0838f0315b96e006a3e44fabd97d5"
        );
    }

    #[test]
    fn public_key_index_seven() {
        let pair = keypair_from_seed(&seed(), 7);
        assert_eq!(
            pair.public.to_hex(),
            "462983d1281760f90468037b3680b3e228ccec60b9258db0fcee093b01ea3122"
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = derive_private_key(&seed(), 42);
        let b = derive_private_key(&seed(), 42);
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn indices_are_independent() {
        let a = derive_private_key(&seed(), 0);
        let b = derive_private_key(&seed(), 1);
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn generated_seeds_are_distinct() {
        let a = generate_seed();
        let b = generate_seed();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }
}
