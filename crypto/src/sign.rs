//! Ed25519 signing over block hashes.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};

use nanokit_types::{PrivateKey, PublicKey, Signature};

/// Sign a message (in practice always a 32-byte block hash).
pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(private_key.as_bytes());
    Signature::new(signing_key.sign(message).to_bytes())
}

/// Verify a signature against a message and public key.
///
/// Malformed public keys and failed verifications both read as `false`; the
/// caller cannot distinguish them, by analogy with the reference node.
pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(public_key.as_bytes()) else {
        return false;
    };
    let sig = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
    verifying_key.verify(message, &sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keypair_from_seed;
    use nanokit_types::Seed;

    fn test_pair() -> nanokit_types::KeyPair {
        let seed = Seed::from_hex(
            "d290d319ce3c2cbb675b023e5383a767415d7444975a2ea121848fc986954568",
        )
        .unwrap();
        keypair_from_seed(&seed, 0)
    }

    #[test]
    fn sign_and_verify() {
        let pair = test_pair();
        let hash = [0x5Au8; 32];
        let sig = sign_message(&hash, &pair.private);
        assert!(verify_signature(&hash, &sig, &pair.public));
    }

    #[test]
    fn known_signature_vector() {
        // RFC 8032 signature over a known block hash, computed with an
        // independent implementation.
        let pair = test_pair();
        let hash: [u8; 32] =
            hex::decode("52739DC9DAB251858D1B0D6D19ABD98BFF283C8F0203200C1DBC1B7EC2EE81E4")
                .unwrap()
                .try_into()
                .unwrap();
        let sig = sign_message(&hash, &pair.private);
        assert_eq!(
            sig.to_hex(),
            "F3A46B61DB378B89369193868C6DE9B8A1AB7CDF2C64D85F1F2CFD29A20E7474\
             91402F4B57D82B28531B51B36428A2F3463B96D3A9A7F976EF5DEBA54ED9C203"
        );
    }

    #[test]
    fn wrong_message_fails() {
        let pair = test_pair();
        let sig = sign_message(b"correct", &pair.private);
        assert!(!verify_signature(b"wrong", &sig, &pair.public));
    }

    #[test]
    fn wrong_key_fails() {
        let pair = test_pair();
        let seed = nanokit_types::Seed::new([9u8; 32]);
        let other = keypair_from_seed(&seed, 0);
        let sig = sign_message(b"message", &pair.private);
        assert!(!verify_signature(b"message", &sig, &other.public));
    }

    #[test]
    fn malformed_public_key_reads_false() {
        let pair = test_pair();
        let sig = sign_message(b"message", &pair.private);
        let bad_key = PublicKey::new([0xFF; 32]);
        assert!(!verify_signature(b"message", &sig, &bad_key));
    }

    #[test]
    fn signatures_are_deterministic() {
        let pair = test_pair();
        let a = sign_message(b"deterministic", &pair.private);
        let b = sign_message(b"deterministic", &pair.private);
        assert_eq!(a, b);
    }
}
