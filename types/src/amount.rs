//! Raw NANO amounts.
//!
//! Balances are unsigned 128-bit integers counted in `raw`, the atomic
//! denomination. Denomination conversion is out of scope for this library;
//! callers deal in raw exclusively.

use std::fmt;

use crate::error::NanoError;

/// A balance in raw units. The full `u128` range is valid (the protocol cap
/// is exactly `2^128 - 1` raw).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(u128::MAX);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse a decimal string. Fractional or signed inputs are rejected;
    /// balances must be exact raw integers.
    pub fn from_dec_str(s: &str) -> Result<Self, NanoError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NanoError::invalid_block(
                "balance must be a decimal string of raw units",
            ));
        }
        let raw = s
            .parse::<u128>()
            .map_err(|_| NanoError::invalid_block("balance exceeds 2^128 - 1 raw"))?;
        Ok(Self(raw))
    }

    /// Parse the 32-character hex form used by legacy send blocks.
    pub fn from_hex(s: &str) -> Result<Self, NanoError> {
        let mut bytes = [0u8; 16];
        if s.len() != 32 {
            return Err(NanoError::invalid_block(
                "legacy balance must be a 32-character hexadecimal string",
            ));
        }
        hex::decode_to_slice(s, &mut bytes).map_err(|_| {
            NanoError::invalid_block("legacy balance is not valid hexadecimal")
        })?;
        Ok(Self(u128::from_be_bytes(bytes)))
    }

    /// The 32-character uppercase hex form used by legacy send blocks.
    pub fn to_hex(&self) -> String {
        format!("{:032X}", self.0)
    }

    /// Big-endian 16-byte form used in block hashing.
    pub fn to_be_bytes(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
