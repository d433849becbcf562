#![no_main]

use libfuzzer_sys::fuzz_target;

use nanokit_crypto::{decode_account, encode_account, AccountPrefix};
use nanokit_types::PublicKey;

// Decoding arbitrary strings must never panic, and encoding any 32-byte key
// must roundtrip through the decoder.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = decode_account(s);
    }

    if data.len() >= 32 {
        let mut key_bytes = [0u8; 32];
        key_bytes.copy_from_slice(&data[..32]);
        let key = PublicKey::new(key_bytes);

        for prefix in [AccountPrefix::Nano, AccountPrefix::Xrb] {
            let account = encode_account(&key, prefix);
            let decoded = decode_account(&account).expect("own encoding must decode");
            assert_eq!(decoded, key, "roundtrip must preserve the key");
        }
    }
});
