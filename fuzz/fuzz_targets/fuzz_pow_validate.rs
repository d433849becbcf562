#![no_main]

use libfuzzer_sys::fuzz_target;

use nanokit_work::{get_work_value, validate_work};

// Validate PoW with arbitrary root, nonce and threshold; must never panic
// and must agree with the raw work value.
fuzz_target!(|data: &[u8]| {
    if data.len() < 48 {
        return;
    }
    let mut root = [0u8; 32];
    root.copy_from_slice(&data[..32]);
    let nonce = u64::from_le_bytes(data[32..40].try_into().unwrap());
    let threshold = u64::from_le_bytes(data[40..48].try_into().unwrap());

    let valid = validate_work(&root, nonce, threshold);
    assert_eq!(valid, get_work_value(&root, nonce) >= threshold);
});
