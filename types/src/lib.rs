//! Fundamental types for the nanokit NANO client library.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: block hashes, keys, seeds, signatures, raw amounts, work nonces
//! and the common error enum.

pub mod amount;
pub mod error;
pub mod hash;
pub mod keys;
pub mod link;
pub mod work;

pub use amount::Amount;
pub use error::NanoError;
pub use hash::BlockHash;
pub use keys::{KeyPair, PrivateKey, PublicKey, Seed, Signature};
pub use link::Link;
pub use work::WorkNonce;
