//! Difficulty thresholds and multiplier arithmetic.
//!
//! A threshold is the minimum value the 8-byte work digest must reach.
//! Multipliers compare thresholds through their "inverse gap": the distance
//! to `2^64`, which is proportional to the expected number of hash
//! evaluations a search needs.

use nanokit_types::NanoError;

/// Epoch-2 base threshold: sends, changes, legacy blocks and any state block
/// that is not receive-only.
pub const THRESHOLD_EPOCH_2: u64 = 0xFFFF_FFF8_0000_0000;

/// Epoch-2 reduced threshold for receive-only state blocks.
pub const THRESHOLD_EPOCH_2_RECEIVE: u64 = 0xFFFF_FE00_0000_0000;

/// The single threshold in force before epoch 2.
pub const THRESHOLD_EPOCH_1: u64 = 0xFFFF_FFC0_0000_0000;

/// Default difficulty applied to a freshly constructed block.
pub const DEFAULT_DIFFICULTY: u64 = THRESHOLD_EPOCH_2;

const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// Work class of a block, for threshold selection. Whether a state block is
/// receive-only depends on ledger context this library does not have, so the
/// caller decides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkBlockKind {
    /// Send, change, legacy, or any state block not known to be a receive.
    Base,
    /// Receive-only state block (previous set, balance not decreasing).
    Receive,
}

/// Per-epoch threshold set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkThresholds {
    pub base: u64,
    pub receive: u64,
}

impl WorkThresholds {
    /// Epoch-2 thresholds (the modern default).
    pub const V2: Self = Self {
        base: THRESHOLD_EPOCH_2,
        receive: THRESHOLD_EPOCH_2_RECEIVE,
    };

    /// Epoch-1 thresholds: one value for every block kind.
    pub const V1: Self = Self {
        base: THRESHOLD_EPOCH_1,
        receive: THRESHOLD_EPOCH_1,
    };

    /// Required difficulty for a block kind.
    pub fn threshold_for(&self, kind: WorkBlockKind) -> u64 {
        match kind {
            WorkBlockKind::Base => self.base,
            WorkBlockKind::Receive => self.receive,
        }
    }
}

impl Default for WorkThresholds {
    fn default() -> Self {
        Self::V2
    }
}

/// Accept any nonzero threshold.
pub fn validate_difficulty(difficulty: u64) -> Result<u64, NanoError> {
    if difficulty == 0 {
        return Err(NanoError::InvalidDifficulty(
            "difficulty must be nonzero".into(),
        ));
    }
    Ok(difficulty)
}

/// How much harder `difficulty` is than `base`:
/// `(2^64 - base) / (2^64 - difficulty)`.
///
/// Greater than 1.0 means harder, below 1.0 easier.
pub fn derive_work_multiplier(difficulty: u64, base: u64) -> Result<f64, NanoError> {
    validate_difficulty(difficulty)?;
    validate_difficulty(base)?;
    let base_gap = (u64::MAX - base) as f64 + 1.0;
    let gap = (u64::MAX - difficulty) as f64 + 1.0;
    Ok(base_gap / gap)
}

/// Invert [`derive_work_multiplier`]: the threshold that is `multiplier`
/// times harder than `base`, rounded to the nearest integer and clamped to
/// `[1, 2^64 - 1]`.
pub fn derive_work_difficulty(multiplier: f64, base: u64) -> Result<u64, NanoError> {
    if !(multiplier > 0.0) {
        return Err(NanoError::InvalidDifficulty(
            "multiplier must be positive".into(),
        ));
    }
    validate_difficulty(base)?;

    let base_gap = (u64::MAX - base) as f64 + 1.0;
    let gap = (base_gap / multiplier).round();
    let difficulty = if gap < 1.0 {
        u64::MAX
    } else if gap >= TWO_POW_64 {
        1
    } else {
        ((1u128 << 64) - gap as u128) as u64
    };
    Ok(difficulty)
}
