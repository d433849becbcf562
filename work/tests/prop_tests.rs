use proptest::prelude::*;

use nanokit_work::{
    derive_work_difficulty, derive_work_multiplier, get_work_value, validate_work, WorkGenerator,
    DEFAULT_DIFFICULTY,
};

proptest! {
    /// Generated PoW always passes its own validation.
    #[test]
    fn generated_pow_always_valid(
        hash_byte in 0u8..=255,
        shift in 48u32..58,
    ) {
        let root = [hash_byte; 32];
        let threshold = 1u64 << shift;
        let work = WorkGenerator::new(2).generate(&root, threshold).unwrap();
        prop_assert!(
            validate_work(&root, work.0, threshold),
            "generated nonce must pass validation"
        );
    }

    /// Zero threshold always passes regardless of nonce.
    #[test]
    fn zero_threshold_always_passes(
        root in prop::array::uniform32(0u8..),
        nonce in any::<u64>(),
    ) {
        prop_assert!(validate_work(&root, nonce, 0));
    }

    /// Validation is deterministic.
    #[test]
    fn validation_is_deterministic(
        root in prop::array::uniform32(0u8..),
        nonce in any::<u64>(),
        threshold in any::<u64>(),
    ) {
        let first = validate_work(&root, nonce, threshold);
        let second = validate_work(&root, nonce, threshold);
        prop_assert_eq!(first, second);
    }

    /// Lower thresholds are easier: valid at T implies valid at T-1.
    #[test]
    fn lower_threshold_is_easier(
        root in prop::array::uniform32(0u8..),
        nonce in any::<u64>(),
        threshold in 1u64..u64::MAX,
    ) {
        if validate_work(&root, nonce, threshold) {
            prop_assert!(validate_work(&root, nonce, threshold - 1));
        }
    }

    /// Validation agrees with the raw work value comparison.
    #[test]
    fn validation_matches_work_value(
        root in prop::array::uniform32(0u8..),
        nonce in any::<u64>(),
        threshold in any::<u64>(),
    ) {
        prop_assert_eq!(
            validate_work(&root, nonce, threshold),
            get_work_value(&root, nonce) >= threshold
        );
    }

    /// Multiplier/difficulty derivation roundtrips within one unit for any
    /// difficulty at or above the network base.
    #[test]
    fn multiplier_difficulty_roundtrip(difficulty in DEFAULT_DIFFICULTY..=u64::MAX - 1) {
        let multiplier = derive_work_multiplier(difficulty, DEFAULT_DIFFICULTY).unwrap();
        prop_assert!(multiplier >= 1.0);
        let derived = derive_work_difficulty(multiplier, DEFAULT_DIFFICULTY).unwrap();
        prop_assert!(
            derived.abs_diff(difficulty) <= 1,
            "{difficulty} roundtripped to {derived}"
        );
    }

    /// The multiplier of a derived difficulty matches the input multiplier.
    #[test]
    fn derived_difficulty_has_requested_multiplier(mult_bits in 1u32..20) {
        let multiplier = f64::from(mult_bits);
        let difficulty = derive_work_difficulty(multiplier, DEFAULT_DIFFICULTY).unwrap();
        let recovered = derive_work_multiplier(difficulty, DEFAULT_DIFFICULTY).unwrap();
        prop_assert!((recovered - multiplier).abs() / multiplier < 1e-9);
    }
}
