//! Common error type shared across crates.

use thiserror::Error;

/// Failure kinds surfaced by the library.
///
/// Everything propagates to the caller synchronously; nothing is retried
/// internally.
#[derive(Debug, Error)]
pub enum NanoError {
    #[error("invalid account id: {0}")]
    InvalidAccount(String),

    #[error("public key must be a 64-character hexadecimal string")]
    InvalidPublicKey,

    #[error("private key must be a 64-character hexadecimal string")]
    InvalidPrivateKey,

    #[error("seed must be a 64-character hexadecimal string")]
    InvalidSeed,

    #[error("invalid block: {reason}")]
    InvalidBlock { reason: String },

    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid proof of work")]
    InvalidWork,

    #[error("invalid work difficulty: {0}")]
    InvalidDifficulty(String),

    #[error("bad encoding: {0}")]
    BadEncoding(String),

    #[error("work generation cancelled")]
    Cancelled,
}

impl NanoError {
    /// Shorthand for [`NanoError::InvalidBlock`] with a formatted reason.
    pub fn invalid_block(reason: impl Into<String>) -> Self {
        NanoError::InvalidBlock {
            reason: reason.into(),
        }
    }
}
