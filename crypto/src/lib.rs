//! Cryptographic primitives for the NANO protocol.
//!
//! - **Blake2b** for block hashes, key derivation and address checksums
//! - **Ed25519** (RFC 8032, SHA-512 flavor) for signing and verification
//! - The NANO Base32 alphabet and the `nano_`/`xrb_` address codec

pub mod address;
pub mod base32;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::{decode_account, encode_account, validate_account, AccountPrefix};
pub use hash::{blake2b_256, blake2b_256_multi, blake2b_512, blake2b_64, blake2b_checksum};
pub use keys::{derive_private_key, derive_public_key, generate_seed, keypair_from_seed};
pub use sign::{sign_message, verify_signature};
