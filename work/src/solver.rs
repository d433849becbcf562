//! The proof-of-work inner loop.
//!
//! The hot path runs on `blake2b_simd`, which picks the best implementation
//! for the running CPU (AVX2/SSE4.1, with a portable fallback) the first
//! time a hasher is built — so the dispatch cost is paid per batch, not per
//! hash. Hash input order is `nonce_le || root`; the 8-byte digest is read
//! little-endian. Both orderings are fixed by the network.

use blake2b_simd::Params;

use nanokit_types::WorkNonce;

/// Iterations per batch between result/cancellation checks. Large enough to
/// amortize the checks, small enough to bound cancellation latency.
pub(crate) const BATCH_SIZE: u64 = 250_000;

fn work_params() -> Params {
    let mut params = Params::new();
    params.hash_length(8);
    params
}

#[inline]
fn hash_nonce(params: &Params, root: &[u8; 32], nonce: u64) -> u64 {
    let hash = params
        .to_state()
        .update(&nonce.to_le_bytes())
        .update(root)
        .finalize();
    let mut value = [0u8; 8];
    value.copy_from_slice(hash.as_bytes());
    u64::from_le_bytes(value)
}

/// The work value of a nonce for a root: one Blake2b-8 evaluation.
pub fn get_work_value(root: &[u8; 32], nonce: u64) -> u64 {
    hash_nonce(&work_params(), root, nonce)
}

/// Whether `nonce` meets `threshold` for `root`.
pub fn validate_work(root: &[u8; 32], nonce: u64, threshold: u64) -> bool {
    get_work_value(root, nonce) >= threshold
}

/// Search at most `iterations` nonces after `start` (wrapping), returning
/// the first that meets `threshold`.
pub(crate) fn search_batch(
    root: &[u8; 32],
    start: u64,
    threshold: u64,
    iterations: u64,
) -> Option<u64> {
    let params = work_params();
    let mut nonce = start;
    for _ in 0..iterations {
        nonce = nonce.wrapping_add(1);
        if hash_nonce(&params, root, nonce) >= threshold {
            return Some(nonce);
        }
    }
    None
}

/// Blocking single-threaded search from `start_nonce` until a valid nonce is
/// found. For parallel search and cancellation use
/// [`WorkGenerator`](crate::WorkGenerator).
pub fn do_work(root: &[u8; 32], start_nonce: u64, threshold: u64) -> WorkNonce {
    let mut nonce = start_nonce;
    loop {
        if let Some(found) = search_batch(root, nonce, threshold, BATCH_SIZE) {
            return WorkNonce(found);
        }
        nonce = nonce.wrapping_add(BATCH_SIZE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanokit_types::BlockHash;

    // Work pair observed on the live network.
    const NETWORK_ROOT: &str =
        "B585D9363B8265CFD5993F30A3D6DE6B5CA5CC7879E0AFA94D13F08B713B9FFD";
    const NETWORK_WORK: &str = "5b064dcc70b9db0a";

    fn network_root() -> [u8; 32] {
        *BlockHash::from_hex(NETWORK_ROOT).unwrap().as_bytes()
    }

    #[test]
    fn known_network_work_value() {
        let work = WorkNonce::from_hex(NETWORK_WORK).unwrap();
        assert_eq!(get_work_value(&network_root(), work.0), 0xFFFF_FFFE_B124_9486);
    }

    #[test]
    fn known_network_work_meets_mainnet_thresholds() {
        let work = WorkNonce::from_hex(NETWORK_WORK).unwrap();
        assert!(validate_work(
            &network_root(),
            work.0,
            crate::THRESHOLD_EPOCH_2
        ));
        assert!(validate_work(
            &network_root(),
            work.0,
            crate::THRESHOLD_EPOCH_1
        ));
    }

    #[test]
    fn precomputed_low_difficulty_nonce() {
        // First nonce from zero meeting 0xFFFF... for the root 0x42 * 32,
        // found with an independent implementation.
        let root = [0x42u8; 32];
        assert_eq!(get_work_value(&root, 0xE735), 0xFFFF_1FFE_BB03_E406);
        assert!(validate_work(&root, 0xE735, 0xFFFF_0000_0000_0000));
        assert!(!validate_work(&root, 0xE734, 0xFFFF_0000_0000_0000));
    }

    #[test]
    fn do_work_finds_valid_nonce() {
        let root = [0x42u8; 32];
        let threshold = 1u64 << 60;
        let work = do_work(&root, 0, threshold);
        assert!(validate_work(&root, work.0, threshold));
    }

    #[test]
    fn do_work_wraps_around_u64() {
        let root = [0x42u8; 32];
        let work = do_work(&root, u64::MAX - 3, 1);
        assert!(validate_work(&root, work.0, 1));
    }

    #[test]
    fn zero_threshold_accepts_anything() {
        assert!(validate_work(&[0u8; 32], 0, 0));
        assert!(validate_work(&[0xFF; 32], u64::MAX, 0));
    }
}
