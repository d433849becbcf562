//! Anti-spam proof-of-work for NANO blocks.
//!
//! Not mining — a small computational cost attached to every block in place
//! of fees. A nonce is valid for a 32-byte root when the 8-byte Blake2b of
//! `nonce_le || root`, read little-endian, meets the difficulty threshold.
//! Finding one takes hundreds of millions of hash evaluations at mainnet
//! difficulty; verifying takes exactly one.

pub mod difficulty;
pub mod generator;
pub mod solver;

pub use difficulty::{
    derive_work_difficulty, derive_work_multiplier, validate_difficulty, WorkBlockKind,
    WorkThresholds, DEFAULT_DIFFICULTY, THRESHOLD_EPOCH_1, THRESHOLD_EPOCH_2,
    THRESHOLD_EPOCH_2_RECEIVE,
};
pub use generator::{configure_pool, CancelToken, WorkGenerator};
pub use solver::{do_work, get_work_value, validate_work};
