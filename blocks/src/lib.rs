//! The NANO block model.
//!
//! A [`Block`] carries the canonical fields of one account-chain block —
//! either the modern universal ("state") layout or one of the four legacy
//! layouts — and derives everything else from them: the Blake2b block hash,
//! the proof-of-work root, the Ed25519 signature and the JSON body the node
//! RPC accepts. Hash, signature validity and work validity are cached and
//! invalidated whenever a field changes.

mod block;
mod json;

pub use block::{Block, BlockKind, BlockState, TxKind, EPOCH_SIGN_PUBLIC_KEY, EPOCH_V1_LINK};
