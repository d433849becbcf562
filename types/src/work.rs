//! Proof-of-work nonce type.

use std::fmt;

use crate::error::NanoError;

/// A 64-bit proof-of-work nonce.
///
/// The textual form is 16 lowercase hex characters in big-endian digit order,
/// but the *little-endian* byte order is what the PoW hash consumes. The
/// asymmetry is canonical; both renderings live here so no call site has to
/// remember which is which.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorkNonce(pub u64);

impl WorkNonce {
    /// Parse from the 16-character hex wire form (either case accepted).
    pub fn from_hex(s: &str) -> Result<Self, NanoError> {
        if s.len() != 16 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(NanoError::InvalidWork);
        }
        let value = u64::from_str_radix(s, 16).map_err(|_| NanoError::InvalidWork)?;
        Ok(Self(value))
    }

    /// The 16-character lowercase hex wire form.
    pub fn to_hex(&self) -> String {
        format!("{:016x}", self.0)
    }

    /// The byte order fed into the PoW hash.
    pub fn to_le_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for WorkNonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip_is_lowercase() {
        let work = WorkNonce(0xABC94D816BF7B2AA);
        assert_eq!(work.to_hex(), "abc94d816bf7b2aa");
        assert_eq!(WorkNonce::from_hex("ABC94D816BF7B2AA").unwrap(), work);
    }

    #[test]
    fn rejects_bad_lengths() {
        assert!(WorkNonce::from_hex("abc").is_err());
        assert!(WorkNonce::from_hex("abc94d816bf7b2aa0").is_err());
        assert!(WorkNonce::from_hex("zzzzzzzzzzzzzzzz").is_err());
    }

    #[test]
    fn le_bytes_reverse_textual_order() {
        let work = WorkNonce(0x0102030405060708);
        assert_eq!(
            work.to_le_bytes(),
            [0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
        );
    }
}
