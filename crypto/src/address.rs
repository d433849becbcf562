//! Account address derivation from public keys.
//!
//! Address format: prefix + base32(public_key, 52 chars) + base32(checksum, 8 chars)
//!
//! The checksum is the 5-byte Blake2b of the public key with its bytes
//! reversed (the reversal is part of the wire format). Total length is 65
//! characters with the `nano_` prefix, 64 with `xrb_`.

use nanokit_types::{NanoError, PublicKey};

use crate::base32;
use crate::hash::blake2b_checksum;

/// Number of base32 characters for the public key (256 bits -> 52 chars).
const KEY_CHARS: usize = 52;
/// Number of base32 characters for the checksum (40 bits -> 8 chars).
const CHECKSUM_CHARS: usize = 8;
/// Encoded length after the prefix.
const ENCODED_LEN: usize = KEY_CHARS + CHECKSUM_CHARS;

/// Address prefix. Both are accepted on input; output uses whichever the
/// caller configures, defaulting to `nano_`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccountPrefix {
    #[default]
    Nano,
    /// Pre-rebrand prefix, still recognized universally.
    Xrb,
}

impl AccountPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountPrefix::Nano => "nano_",
            AccountPrefix::Xrb => "xrb_",
        }
    }
}

/// Reversed 5-byte Blake2b checksum of a public key.
fn account_checksum(key: &PublicKey) -> [u8; 5] {
    let mut checksum = blake2b_checksum(key.as_bytes());
    checksum.reverse();
    checksum
}

/// Derive the address for a public key.
pub fn encode_account(key: &PublicKey, prefix: AccountPrefix) -> String {
    let payload = base32::encode(key.as_bytes());
    let checksum = base32::encode(&account_checksum(key));
    format!("{}{}{}", prefix.as_str(), payload, checksum)
}

/// Extract the public key from an address, verifying the checksum.
///
/// Accepts both the `nano_` and `xrb_` prefixes. Every failure mode — wrong
/// prefix, wrong length, characters outside the alphabet, checksum mismatch —
/// reads as [`NanoError::InvalidAccount`].
pub fn decode_account(account: &str) -> Result<PublicKey, NanoError> {
    let encoded = account
        .strip_prefix("nano_")
        .or_else(|| account.strip_prefix("xrb_"))
        .ok_or_else(|| NanoError::InvalidAccount("unknown prefix".into()))?;

    if encoded.len() != ENCODED_LEN {
        return Err(NanoError::InvalidAccount("wrong length".into()));
    }
    // 256 bits in 52 characters leaves 4 pad bits, so a valid payload always
    // starts with '1' or '3'.
    if !encoded.starts_with(['1', '3']) {
        return Err(NanoError::InvalidAccount("invalid leading character".into()));
    }

    let bytes = base32::decode(encoded)
        .map_err(|_| NanoError::InvalidAccount("not Base32 encoded".into()))?;
    let mut key_bytes = [0u8; 32];
    key_bytes.copy_from_slice(&bytes[..32]);
    let key = PublicKey::new(key_bytes);

    if bytes[32..] != account_checksum(&key) {
        return Err(NanoError::InvalidAccount("checksum mismatch".into()));
    }

    Ok(key)
}

/// Whether an address is well-formed with a correct checksum.
pub fn validate_account(account: &str) -> bool {
    decode_account(account).is_ok()
}
