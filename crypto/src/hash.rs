//! Blake2b with the digest lengths the protocol uses.
//!
//! Four output sizes appear on the wire: 5 bytes (address checksums), 8 bytes
//! (proof-of-work values), 32 bytes (block hashes, key derivation) and 64
//! bytes. All are plain RFC 7693 Blake2b, unkeyed.

use blake2::digest::consts::{U32, U5, U64, U8};
use blake2::{Blake2b, Digest};

type Blake2b40 = Blake2b<U5>;
type Blake2b64 = Blake2b<U8>;
type Blake2b256 = Blake2b<U32>;
type Blake2b512 = Blake2b<U64>;

/// 5-byte Blake2b digest, as used for address checksums.
pub fn blake2b_checksum(data: &[u8]) -> [u8; 5] {
    let mut output = [0u8; 5];
    output.copy_from_slice(&Blake2b40::digest(data));
    output
}

/// 8-byte Blake2b digest, the size the proof-of-work compares against.
pub fn blake2b_64(data: &[u8]) -> [u8; 8] {
    let mut output = [0u8; 8];
    output.copy_from_slice(&Blake2b64::digest(data));
    output
}

/// 32-byte Blake2b digest.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut output = [0u8; 32];
    output.copy_from_slice(&Blake2b256::digest(data));
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut output = [0u8; 32];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// 64-byte Blake2b digest.
pub fn blake2b_512(data: &[u8]) -> [u8; 64] {
    let mut output = [0u8; 64];
    output.copy_from_slice(&Blake2b512::digest(data));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference digests computed with an independent RFC 7693 implementation.

    #[test]
    fn blake2b_64_empty_vector() {
        assert_eq!(hex::encode(blake2b_64(b"")), "e4a6a0577479b2b4");
    }

    #[test]
    fn blake2b_256_abc_vector() {
        assert_eq!(
            hex::encode(blake2b_256(b"abc")),
            "bddd813c634239723171ef3fee98579b94964e3bb1cb3e427262c8c068d52319"
        );
    }

    #[test]
    fn blake2b_checksum_vector() {
        let mut checksum = blake2b_checksum(&[0x22; 32]);
        checksum.reverse();
        assert_eq!(hex::encode(checksum), "f4b7908a70");
    }

    #[test]
    fn multi_equals_concatenation() {
        let single = blake2b_256(b"helloworld");
        let multi = blake2b_256_multi(&[b"hello", b"world"]);
        assert_eq!(single, multi);
    }

    #[test]
    fn sizes_are_independent_digests() {
        let short = blake2b_64(b"abc");
        let long = blake2b_256(b"abc");
        assert_ne!(&long[..8], &short[..]);
    }

    #[test]
    fn blake2b_512_differs_from_256() {
        let wide = blake2b_512(b"abc");
        let narrow = blake2b_256(b"abc");
        assert_ne!(&wide[..32], &narrow[..]);
    }
}
