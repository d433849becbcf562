//! Hex-string convenience API over seeds, keys and account IDs.
//!
//! Wallet software mostly shuttles these values around as hex and address
//! strings; this crate wraps the typed primitives in `nanokit-crypto` with
//! that interface, so callers never touch raw byte arrays.

use nanokit_crypto::{
    decode_account, derive_private_key, derive_public_key, encode_account, keypair_from_seed,
    validate_account, AccountPrefix,
};
use nanokit_types::{NanoError, PrivateKey, PublicKey, Seed};

/// A derived key pair in hex form.
///
/// `private` holds key material; drop the struct as soon as it has served
/// its purpose.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountKeyPair {
    /// Private key as 64 lowercase hex characters.
    pub private: String,
    /// Public key as 64 lowercase hex characters.
    pub public: String,
}

/// Generate a random seed as 64 lowercase hex characters.
pub fn generate_seed() -> String {
    nanokit_crypto::generate_seed().to_hex()
}

/// Whether `seed` is a well-formed 64-character hex seed.
pub fn validate_seed(seed: &str) -> bool {
    Seed::from_hex(seed).is_ok()
}

/// Whether `public_key` is a well-formed 64-character hex public key.
pub fn validate_public_key(public_key: &str) -> bool {
    PublicKey::from_hex(public_key).is_ok()
}

/// Whether `private_key` is a well-formed 64-character hex private key.
pub fn validate_private_key(private_key: &str) -> bool {
    PrivateKey::from_hex(private_key).is_ok()
}

/// Whether `account_id` is a valid address with a correct checksum.
pub fn validate_account_id(account_id: &str) -> bool {
    validate_account(account_id)
}

/// Derive the private key for `index` under `seed`, as hex.
pub fn generate_account_private_key(seed: &str, index: u32) -> Result<String, NanoError> {
    let seed = Seed::from_hex(seed)?;
    Ok(derive_private_key(&seed, index).to_hex())
}

/// Derive the key pair for `index` under `seed`, as hex.
pub fn generate_account_key_pair(seed: &str, index: u32) -> Result<AccountKeyPair, NanoError> {
    let seed = Seed::from_hex(seed)?;
    let pair = keypair_from_seed(&seed, index);
    Ok(AccountKeyPair {
        private: pair.private.to_hex(),
        public: pair.public.to_hex(),
    })
}

/// Derive the account ID for `index` under `seed`.
pub fn generate_account_id(
    seed: &str,
    index: u32,
    prefix: AccountPrefix,
) -> Result<String, NanoError> {
    let seed = Seed::from_hex(seed)?;
    let pair = keypair_from_seed(&seed, index);
    Ok(encode_account(&pair.public, prefix))
}

/// Render a hex public key as an account ID.
pub fn account_id_from_public_key(
    public_key: &str,
    prefix: AccountPrefix,
) -> Result<String, NanoError> {
    let key = PublicKey::from_hex(public_key)?;
    Ok(encode_account(&key, prefix))
}

/// Render a hex private key as an account ID.
pub fn account_id_from_private_key(
    private_key: &str,
    prefix: AccountPrefix,
) -> Result<String, NanoError> {
    let key = PrivateKey::from_hex(private_key)?;
    Ok(encode_account(&derive_public_key(&key), prefix))
}

/// Extract the public key from an account ID, as hex.
pub fn public_key_from_account_id(account_id: &str) -> Result<String, NanoError> {
    Ok(decode_account(account_id)?.to_hex())
}
