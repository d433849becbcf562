//! Block construction, hashing, signing and work.

use std::cell::Cell;

use nanokit_crypto::{
    decode_account, derive_public_key, encode_account, sign_message, verify_signature,
    AccountPrefix,
};
use nanokit_types::{
    Amount, BlockHash, Link, NanoError, PrivateKey, PublicKey, Signature, WorkNonce,
};
use nanokit_work::{CancelToken, WorkGenerator, DEFAULT_DIFFICULTY};

/// State block preamble: 31 zero bytes followed by the block-kind tag 0x06.
const STATE_PREAMBLE: [u8; 32] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 6,
];

/// Link value marking an account's upgrade to epoch v1.
pub const EPOCH_V1_LINK: [u8; 32] = *b"epoch v1 block\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0";

/// Epoch blocks are signed by this key regardless of the block's account.
pub const EPOCH_SIGN_PUBLIC_KEY: [u8; 32] = [
    0xE8, 0x92, 0x08, 0xDD, 0x03, 0x8F, 0xBB, 0x26, 0x99, 0x87, 0x68, 0x96, 0x21, 0xD5, 0x22,
    0x92, 0xAE, 0x9C, 0x35, 0x94, 0x1A, 0x74, 0x84, 0x75, 0x6E, 0xCC, 0xED, 0x92, 0xA6, 0x50,
    0x93, 0xBA,
];

/// The wire-level block variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    /// Universal block; covers every operation through its field values.
    State,
    Send,
    Receive,
    Open,
    Change,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::State => "state",
            BlockKind::Send => "send",
            BlockKind::Receive => "receive",
            BlockKind::Open => "open",
            BlockKind::Change => "change",
        }
    }

    pub fn from_type_str(s: &str) -> Option<Self> {
        match s {
            "state" => Some(BlockKind::State),
            "send" => Some(BlockKind::Send),
            "receive" => Some(BlockKind::Receive),
            "open" => Some(BlockKind::Open),
            "change" => Some(BlockKind::Change),
            _ => None,
        }
    }
}

/// The operation a block performs, derived from its fields. Legacy blocks
/// state it outright; state blocks encode it in `link` and `previous`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxKind {
    Send,
    Receive,
    Open,
    Change,
    /// Epoch upgrade marker, signed by the genesis epoch key.
    Epoch,
    /// A state block with a nonzero link and previous: send and receive are
    /// indistinguishable without ledger context.
    SendOrReceive,
}

/// Per-variant hashing fields, in canonical hash order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum BlockFields {
    State {
        account: PublicKey,
        previous: BlockHash,
        representative: PublicKey,
        balance: Amount,
        link: Link,
    },
    Send {
        previous: BlockHash,
        destination: PublicKey,
        balance: Amount,
    },
    Receive {
        previous: BlockHash,
        source: BlockHash,
    },
    Open {
        source: BlockHash,
        representative: PublicKey,
        account: PublicKey,
    },
    Change {
        previous: BlockHash,
        representative: PublicKey,
    },
}

/// Lifecycle of a block on its way to broadcastability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockState {
    /// Neither valid work nor a valid signature yet.
    Draft,
    HasWork,
    Signed,
    /// Valid work and a valid signature; ready for the network.
    Complete,
}

/// One account-chain block.
///
/// Constructed from typed field values (or [`Block::from_json`]), then signed
/// and given work in either order. The block hash, signature validity and
/// work validity are computed lazily and cached; mutating any field drops the
/// affected caches.
#[derive(Clone, Debug)]
pub struct Block {
    pub(crate) fields: BlockFields,
    /// Owning account of a legacy send/receive/change block. Not part of the
    /// hash; carried so the signature can be checked.
    pub(crate) legacy_account: Option<PublicKey>,
    pub(crate) signature: Option<Signature>,
    pub(crate) work: Option<WorkNonce>,
    pub(crate) difficulty: u64,
    pub(crate) prefix: AccountPrefix,
    hash_cache: Cell<Option<BlockHash>>,
    signature_cache: Cell<Option<bool>>,
    work_cache: Cell<Option<bool>>,
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
            && self.legacy_account == other.legacy_account
            && self.signature == other.signature
            && self.work == other.work
            && self.difficulty == other.difficulty
            && self.prefix == other.prefix
    }
}

impl Eq for Block {}

impl Block {
    pub(crate) fn from_fields(fields: BlockFields) -> Self {
        Self {
            fields,
            legacy_account: None,
            signature: None,
            work: None,
            difficulty: DEFAULT_DIFFICULTY,
            prefix: AccountPrefix::default(),
            hash_cache: Cell::new(None),
            signature_cache: Cell::new(None),
            work_cache: Cell::new(None),
        }
    }

    /// A universal block. The opening block of an account uses a zero
    /// `previous`; a representative-only change uses a zero `link`.
    pub fn state(
        account: PublicKey,
        previous: BlockHash,
        representative: PublicKey,
        balance: Amount,
        link: Link,
    ) -> Self {
        Self::from_fields(BlockFields::State {
            account,
            previous,
            representative,
            balance,
            link,
        })
    }

    /// A legacy send block. `balance` is the sender's balance *after* the
    /// send.
    pub fn send(previous: BlockHash, destination: PublicKey, balance: Amount) -> Self {
        Self::from_fields(BlockFields::Send {
            previous,
            destination,
            balance,
        })
    }

    /// A legacy receive block pocketing the send block `source`.
    pub fn receive(previous: BlockHash, source: BlockHash) -> Self {
        Self::from_fields(BlockFields::Receive { previous, source })
    }

    /// A legacy account-opening block.
    pub fn open(source: BlockHash, representative: PublicKey, account: PublicKey) -> Self {
        Self::from_fields(BlockFields::Open {
            source,
            representative,
            account,
        })
    }

    /// A legacy representative change block.
    pub fn change(previous: BlockHash, representative: PublicKey) -> Self {
        Self::from_fields(BlockFields::Change {
            previous,
            representative,
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn kind(&self) -> BlockKind {
        match self.fields {
            BlockFields::State { .. } => BlockKind::State,
            BlockFields::Send { .. } => BlockKind::Send,
            BlockFields::Receive { .. } => BlockKind::Receive,
            BlockFields::Open { .. } => BlockKind::Open,
            BlockFields::Change { .. } => BlockKind::Change,
        }
    }

    /// The operation this block performs (see [`TxKind`]).
    pub fn tx_kind(&self) -> TxKind {
        match &self.fields {
            BlockFields::Send { .. } => TxKind::Send,
            BlockFields::Receive { .. } => TxKind::Receive,
            BlockFields::Open { .. } => TxKind::Open,
            BlockFields::Change { .. } => TxKind::Change,
            BlockFields::State { previous, link, .. } => {
                if link.is_zero() {
                    TxKind::Change
                } else if link.as_bytes() == &EPOCH_V1_LINK {
                    TxKind::Epoch
                } else if previous.is_zero() {
                    TxKind::Open
                } else {
                    TxKind::SendOrReceive
                }
            }
        }
    }

    pub fn account(&self) -> Option<PublicKey> {
        match &self.fields {
            BlockFields::State { account, .. } | BlockFields::Open { account, .. } => {
                Some(*account)
            }
            _ => self.legacy_account,
        }
    }

    pub fn previous(&self) -> Option<BlockHash> {
        match &self.fields {
            BlockFields::State { previous, .. }
            | BlockFields::Send { previous, .. }
            | BlockFields::Receive { previous, .. }
            | BlockFields::Change { previous, .. } => Some(*previous),
            BlockFields::Open { .. } => None,
        }
    }

    pub fn representative(&self) -> Option<PublicKey> {
        match &self.fields {
            BlockFields::State { representative, .. }
            | BlockFields::Open { representative, .. }
            | BlockFields::Change { representative, .. } => Some(*representative),
            _ => None,
        }
    }

    pub fn balance(&self) -> Option<Amount> {
        match &self.fields {
            BlockFields::State { balance, .. } | BlockFields::Send { balance, .. } => {
                Some(*balance)
            }
            _ => None,
        }
    }

    pub fn source(&self) -> Option<BlockHash> {
        match &self.fields {
            BlockFields::Receive { source, .. } | BlockFields::Open { source, .. } => {
                Some(*source)
            }
            _ => None,
        }
    }

    pub fn destination(&self) -> Option<PublicKey> {
        match &self.fields {
            BlockFields::Send { destination, .. } => Some(*destination),
            _ => None,
        }
    }

    pub fn link(&self) -> Option<Link> {
        match &self.fields {
            BlockFields::State { link, .. } => Some(*link),
            _ => None,
        }
    }

    /// The link rendered as an account address, using the configured prefix.
    pub fn link_as_account(&self) -> Option<String> {
        self.link()
            .map(|link| encode_account(&link.as_public_key(), self.prefix))
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn work(&self) -> Option<WorkNonce> {
        self.work
    }

    pub fn difficulty(&self) -> u64 {
        self.difficulty
    }

    pub fn prefix(&self) -> AccountPrefix {
        self.prefix
    }

    /// Prefix used when rendering accounts; does not affect any hash.
    pub fn set_prefix(&mut self, prefix: AccountPrefix) {
        self.prefix = prefix;
    }

    // ------------------------------------------------------------------
    // Field mutation. Every setter drops the caches its field feeds into.
    // ------------------------------------------------------------------

    fn invalidate_hash(&mut self) {
        self.hash_cache.set(None);
        self.signature_cache.set(None);
    }

    fn invalidate_work(&mut self) {
        self.work_cache.set(None);
    }

    fn wrong_variant(&self, field: &str) -> NanoError {
        NanoError::invalid_block(format!(
            "'{}' blocks have no '{}' field",
            self.kind().as_str(),
            field
        ))
    }

    pub fn set_account(&mut self, value: PublicKey) -> Result<(), NanoError> {
        match &mut self.fields {
            BlockFields::State { account, .. } | BlockFields::Open { account, .. } => {
                *account = value
            }
            _ => self.legacy_account = Some(value),
        }
        self.invalidate_hash();
        self.invalidate_work();
        Ok(())
    }

    pub fn set_previous(&mut self, value: BlockHash) -> Result<(), NanoError> {
        match &mut self.fields {
            BlockFields::State { previous, .. }
            | BlockFields::Send { previous, .. }
            | BlockFields::Receive { previous, .. }
            | BlockFields::Change { previous, .. } => *previous = value,
            BlockFields::Open { .. } => return Err(self.wrong_variant("previous")),
        }
        self.invalidate_hash();
        self.invalidate_work();
        Ok(())
    }

    pub fn set_source(&mut self, value: BlockHash) -> Result<(), NanoError> {
        match &mut self.fields {
            BlockFields::Receive { source, .. } | BlockFields::Open { source, .. } => {
                *source = value
            }
            _ => return Err(self.wrong_variant("source")),
        }
        self.invalidate_hash();
        self.invalidate_work();
        Ok(())
    }

    pub fn set_destination(&mut self, value: PublicKey) -> Result<(), NanoError> {
        match &mut self.fields {
            BlockFields::Send { destination, .. } => *destination = value,
            _ => return Err(self.wrong_variant("destination")),
        }
        self.invalidate_hash();
        Ok(())
    }

    pub fn set_representative(&mut self, value: PublicKey) -> Result<(), NanoError> {
        match &mut self.fields {
            BlockFields::State { representative, .. }
            | BlockFields::Open { representative, .. }
            | BlockFields::Change { representative, .. } => *representative = value,
            _ => return Err(self.wrong_variant("representative")),
        }
        self.invalidate_hash();
        Ok(())
    }

    pub fn set_balance(&mut self, value: Amount) -> Result<(), NanoError> {
        match &mut self.fields {
            BlockFields::State { balance, .. } | BlockFields::Send { balance, .. } => {
                *balance = value
            }
            _ => return Err(self.wrong_variant("balance")),
        }
        self.invalidate_hash();
        Ok(())
    }

    pub fn set_link(&mut self, value: Link) -> Result<(), NanoError> {
        match &mut self.fields {
            BlockFields::State { link, .. } => *link = value,
            _ => return Err(self.wrong_variant("link")),
        }
        self.invalidate_hash();
        Ok(())
    }

    /// Set the link from its account-address rendering.
    pub fn set_link_as_account(&mut self, account: &str) -> Result<(), NanoError> {
        let key = decode_account(account)?;
        self.set_link(Link::from(key))
    }

    pub fn set_signature(&mut self, value: Option<Signature>) {
        self.signature = value;
        self.signature_cache.set(None);
    }

    pub fn set_work(&mut self, value: Option<WorkNonce>) {
        self.work = value;
        self.invalidate_work();
    }

    /// Per-block difficulty override; the default is the epoch-2 base
    /// threshold.
    pub fn set_difficulty(&mut self, difficulty: u64) -> Result<(), NanoError> {
        self.difficulty = nanokit_work::validate_difficulty(difficulty)?;
        self.invalidate_work();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Derived values
    // ------------------------------------------------------------------

    /// The Blake2b block hash over the variant's hashing fields.
    pub fn block_hash(&self) -> BlockHash {
        if let Some(hash) = self.hash_cache.get() {
            return hash;
        }

        let digest = match &self.fields {
            BlockFields::State {
                account,
                previous,
                representative,
                balance,
                link,
            } => {
                let balance = balance.to_be_bytes();
                nanokit_crypto::blake2b_256_multi(&[
                    &STATE_PREAMBLE,
                    account.as_bytes(),
                    previous.as_bytes(),
                    representative.as_bytes(),
                    &balance,
                    link.as_bytes(),
                ])
            }
            BlockFields::Send {
                previous,
                destination,
                balance,
            } => {
                let balance = balance.to_be_bytes();
                nanokit_crypto::blake2b_256_multi(&[
                    previous.as_bytes(),
                    destination.as_bytes(),
                    &balance,
                ])
            }
            BlockFields::Receive { previous, source } => {
                nanokit_crypto::blake2b_256_multi(&[previous.as_bytes(), source.as_bytes()])
            }
            BlockFields::Open {
                source,
                representative,
                account,
            } => nanokit_crypto::blake2b_256_multi(&[
                source.as_bytes(),
                representative.as_bytes(),
                account.as_bytes(),
            ]),
            BlockFields::Change {
                previous,
                representative,
            } => nanokit_crypto::blake2b_256_multi(&[
                previous.as_bytes(),
                representative.as_bytes(),
            ]),
        };

        let hash = BlockHash::new(digest);
        self.hash_cache.set(Some(hash));
        hash
    }

    /// The 32 bytes the proof-of-work commits to: `previous`, or the account
    /// public key when there is no previous block yet.
    pub fn root(&self) -> [u8; 32] {
        match &self.fields {
            BlockFields::State {
                previous, account, ..
            } => {
                if previous.is_zero() {
                    *account.as_bytes()
                } else {
                    *previous.as_bytes()
                }
            }
            BlockFields::Open { account, .. } => *account.as_bytes(),
            BlockFields::Send { previous, .. }
            | BlockFields::Receive { previous, .. }
            | BlockFields::Change { previous, .. } => *previous.as_bytes(),
        }
    }

    /// The key the signature must verify against: the account, except for
    /// epoch blocks which the genesis epoch key signs.
    fn signer(&self) -> Option<PublicKey> {
        if self.tx_kind() == TxKind::Epoch {
            return Some(PublicKey::new(EPOCH_SIGN_PUBLIC_KEY));
        }
        self.account()
    }

    // ------------------------------------------------------------------
    // Signing
    // ------------------------------------------------------------------

    /// Sign the block hash and store the signature.
    ///
    /// When the block names an account (or is an epoch block), the key must
    /// derive to exactly that signer; otherwise [`NanoError::InvalidSignature`].
    pub fn sign(&mut self, private_key: &PrivateKey) -> Result<(), NanoError> {
        let public = derive_public_key(private_key);
        if let Some(signer) = self.signer() {
            if public != signer {
                return Err(NanoError::InvalidSignature);
            }
        }
        let hash = self.block_hash();
        self.signature = Some(sign_message(hash.as_bytes(), private_key));
        self.signature_cache.set(None);
        Ok(())
    }

    /// Verify the stored signature against the block's signer.
    pub fn verify_signature(&self) -> Result<(), NanoError> {
        let signature = self
            .signature
            .as_ref()
            .ok_or_else(|| NanoError::invalid_block("block has no signature"))?;
        let signer = self.signer().ok_or_else(|| {
            NanoError::invalid_block("an 'account' value is required to verify the signature")
        })?;
        let hash = self.block_hash();
        if verify_signature(hash.as_bytes(), signature, &signer) {
            Ok(())
        } else {
            Err(NanoError::InvalidSignature)
        }
    }

    /// Cached view of [`Block::verify_signature`]; a missing signature or
    /// account reads as `false`.
    pub fn has_valid_signature(&self) -> bool {
        if let Some(cached) = self.signature_cache.get() {
            return cached;
        }
        let valid = self.verify_signature().is_ok();
        self.signature_cache.set(Some(valid));
        valid
    }

    // ------------------------------------------------------------------
    // Work
    // ------------------------------------------------------------------

    /// The work value of the attached nonce, if any.
    pub fn work_value(&self) -> Option<u64> {
        self.work
            .map(|work| nanokit_work::get_work_value(&self.root(), work.0))
    }

    /// Verify the attached work against `difficulty`, defaulting to the
    /// block's own difficulty.
    pub fn verify_work(&self, difficulty: Option<u64>) -> Result<(), NanoError> {
        let difficulty = difficulty.unwrap_or(self.difficulty);
        let work = self
            .work
            .ok_or_else(|| NanoError::invalid_block("block has no work"))?;
        if nanokit_work::validate_work(&self.root(), work.0, difficulty) {
            Ok(())
        } else {
            Err(NanoError::InvalidWork)
        }
    }

    /// Cached view of [`Block::verify_work`] at the block's difficulty;
    /// missing work reads as `false`.
    pub fn has_valid_work(&self) -> bool {
        if let Some(cached) = self.work_cache.get() {
            return cached;
        }
        let valid = self.verify_work(None).is_ok();
        self.work_cache.set(Some(valid));
        valid
    }

    /// Solve work for this block's root and store the nonce, optionally
    /// overriding the block's difficulty.
    pub fn solve_work(&mut self, difficulty: Option<u64>) -> Result<(), NanoError> {
        self.solve_work_cancellable(difficulty, &CancelToken::new())
    }

    /// [`Block::solve_work`] with cooperative cancellation. On cancellation
    /// the block is left untouched.
    pub fn solve_work_cancellable(
        &mut self,
        difficulty: Option<u64>,
        cancel: &CancelToken,
    ) -> Result<(), NanoError> {
        let difficulty = match difficulty {
            Some(value) => nanokit_work::validate_difficulty(value)?,
            None => self.difficulty,
        };
        let nonce =
            WorkGenerator::from_pool().generate_cancellable(&self.root(), difficulty, cancel)?;
        self.difficulty = difficulty;
        self.work = Some(nonce);
        self.invalidate_work();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Valid signature and valid work: ready to broadcast.
    pub fn complete(&self) -> bool {
        self.has_valid_signature() && self.has_valid_work()
    }

    pub fn block_state(&self) -> BlockState {
        match (self.has_valid_work(), self.has_valid_signature()) {
            (false, false) => BlockState::Draft,
            (true, false) => BlockState::HasWork,
            (false, true) => BlockState::Signed,
            (true, true) => BlockState::Complete,
        }
    }
}
