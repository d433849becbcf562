//! The JSON wire format accepted by the node `process` RPC.
//!
//! Key order is stable (field order with `type` last), hashes and signatures
//! render as uppercase hex, work as lowercase hex. State balances are decimal
//! strings; legacy send balances keep their historic 32-character hex form.

use serde_json::{Map, Value};

use nanokit_crypto::{decode_account, encode_account, AccountPrefix};
use nanokit_types::{Amount, BlockHash, Link, NanoError, PublicKey, Signature, WorkNonce};

use crate::block::{Block, BlockFields, BlockKind};

/// Required keys per block type, beyond `type` itself.
fn required_params(kind: BlockKind) -> &'static [&'static str] {
    match kind {
        BlockKind::State => &["account", "previous", "representative", "balance", "link"],
        BlockKind::Send => &["previous", "destination", "balance"],
        BlockKind::Receive => &["previous", "source"],
        BlockKind::Open => &["source", "representative", "account"],
        BlockKind::Change => &["previous", "representative"],
    }
}

/// Optional keys per block type.
fn optional_params(kind: BlockKind) -> &'static [&'static str] {
    match kind {
        BlockKind::State => &["work", "signature", "link_as_account"],
        BlockKind::Open => &["work", "signature"],
        _ => &["work", "signature", "account"],
    }
}

fn str_param<'a>(dict: &'a Map<String, Value>, key: &str) -> Result<&'a str, NanoError> {
    dict.get(key)
        .ok_or_else(|| NanoError::invalid_block(format!("missing required parameter '{key}'")))?
        .as_str()
        .ok_or_else(|| NanoError::invalid_block(format!("parameter '{key}' must be a string")))
}

fn opt_str<'a>(dict: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>, NanoError> {
    match dict.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(Some)
            .ok_or_else(|| NanoError::invalid_block(format!("parameter '{key}' must be a string"))),
    }
}

fn hash_param(dict: &Map<String, Value>, key: &str) -> Result<BlockHash, NanoError> {
    BlockHash::from_hex(str_param(dict, key)?)
}

fn account_param(dict: &Map<String, Value>, key: &str) -> Result<PublicKey, NanoError> {
    decode_account(str_param(dict, key)?)
}

/// Reject missing required keys and keys the block type does not carry.
fn check_parameters(dict: &Map<String, Value>, kind: BlockKind) -> Result<(), NanoError> {
    let required = required_params(kind);
    let optional = optional_params(kind);

    for &key in required {
        if !dict.contains_key(key) {
            return Err(NanoError::invalid_block(format!(
                "'{}' block is missing required parameter '{}'",
                kind.as_str(),
                key
            )));
        }
    }
    for key in dict.keys() {
        if key != "type" && !required.contains(&key.as_str()) && !optional.contains(&key.as_str())
        {
            return Err(NanoError::invalid_block(format!(
                "'{}' block has prohibited parameter '{}'",
                kind.as_str(),
                key
            )));
        }
    }
    Ok(())
}

/// Output prefix inferred from the first account-valued field, so a parsed
/// block re-serializes the way it arrived.
fn detect_prefix(dict: &Map<String, Value>) -> AccountPrefix {
    for key in ["account", "representative", "destination"] {
        if let Some(value) = dict.get(key).and_then(Value::as_str) {
            if value.starts_with("xrb_") {
                return AccountPrefix::Xrb;
            }
            return AccountPrefix::Nano;
        }
    }
    AccountPrefix::default()
}

impl Block {
    /// The block as an ordered JSON object map.
    pub fn to_dict(&self) -> Map<String, Value> {
        let mut map = Map::new();
        let prefix = self.prefix;

        if let Some(account) = self.account() {
            map.insert("account".into(), encode_account(&account, prefix).into());
        }
        if let Some(previous) = self.previous() {
            map.insert("previous".into(), previous.to_hex().into());
        }
        if let Some(destination) = self.destination() {
            map.insert(
                "destination".into(),
                encode_account(&destination, prefix).into(),
            );
        }
        if let Some(representative) = self.representative() {
            map.insert(
                "representative".into(),
                encode_account(&representative, prefix).into(),
            );
        }
        if let Some(balance) = self.balance() {
            let rendered = match self.kind() {
                BlockKind::State => balance.to_string(),
                _ => balance.to_hex(),
            };
            map.insert("balance".into(), rendered.into());
        }
        if let Some(source) = self.source() {
            map.insert("source".into(), source.to_hex().into());
        }
        if let Some(link) = self.link() {
            map.insert("link".into(), link.to_hex().into());
        }
        if let Some(link_as_account) = self.link_as_account() {
            map.insert("link_as_account".into(), link_as_account.into());
        }
        if let Some(signature) = self.signature() {
            map.insert("signature".into(), signature.to_hex().into());
        }
        if let Some(work) = self.work() {
            map.insert("work".into(), work.to_hex().into());
        }
        map.insert("type".into(), self.kind().as_str().into());
        map
    }

    /// The JSON body broadcastable through a node's `process` RPC.
    pub fn to_json(&self) -> String {
        Value::Object(self.to_dict()).to_string()
    }

    /// Build a block from a parsed JSON object. Field presence is enforced
    /// per block type; signature and work are stored unverified (check
    /// [`Block::has_valid_signature`] / [`Block::has_valid_work`]).
    pub fn from_dict(dict: &Map<String, Value>) -> Result<Self, NanoError> {
        let type_str = str_param(dict, "type")?;
        let kind = BlockKind::from_type_str(type_str).ok_or_else(|| {
            NanoError::invalid_block(format!("unknown block type '{type_str}'"))
        })?;
        check_parameters(dict, kind)?;

        let fields = match kind {
            BlockKind::State => BlockFields::State {
                account: account_param(dict, "account")?,
                previous: hash_param(dict, "previous")?,
                representative: account_param(dict, "representative")?,
                balance: Amount::from_dec_str(str_param(dict, "balance")?)?,
                link: Link::from_hex(str_param(dict, "link")?)?,
            },
            BlockKind::Send => BlockFields::Send {
                previous: hash_param(dict, "previous")?,
                destination: account_param(dict, "destination")?,
                balance: Amount::from_hex(str_param(dict, "balance")?)?,
            },
            BlockKind::Receive => BlockFields::Receive {
                previous: hash_param(dict, "previous")?,
                source: hash_param(dict, "source")?,
            },
            BlockKind::Open => BlockFields::Open {
                source: hash_param(dict, "source")?,
                representative: account_param(dict, "representative")?,
                account: account_param(dict, "account")?,
            },
            BlockKind::Change => BlockFields::Change {
                previous: hash_param(dict, "previous")?,
                representative: account_param(dict, "representative")?,
            },
        };

        let mut block = Block::from_fields(fields);
        block.prefix = detect_prefix(dict);

        if !matches!(kind, BlockKind::State | BlockKind::Open) {
            if let Some(account) = opt_str(dict, "account")? {
                block.legacy_account = Some(decode_account(account)?);
            }
        }

        // The two link renderings must agree when both are present.
        if let Some(rendered) = opt_str(dict, "link_as_account")? {
            let key = decode_account(rendered)?;
            if Some(Link::from(key)) != block.link() {
                return Err(NanoError::invalid_block(
                    "'link' and 'link_as_account' disagree",
                ));
            }
        }

        if let Some(signature) = opt_str(dict, "signature")? {
            block.signature = Some(Signature::from_hex(signature)?);
        }
        if let Some(work) = opt_str(dict, "work")? {
            block.work = Some(WorkNonce::from_hex(work)?);
        }

        Ok(block)
    }

    /// Parse a block from its JSON body.
    pub fn from_json(json: &str) -> Result<Self, NanoError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|err| NanoError::BadEncoding(format!("invalid JSON: {err}")))?;
        let dict = value
            .as_object()
            .ok_or_else(|| NanoError::BadEncoding("block JSON must be an object".into()))?;
        Self::from_dict(dict)
    }
}
