//! Full construction flow: derive keys, build the opening block, sign it,
//! attach work, serialize and parse back.

use nanokit_blocks::{Block, BlockState};
use nanokit_crypto::{encode_account, keypair_from_seed, AccountPrefix};
use nanokit_types::{Amount, BlockHash, Link, Seed};

const SEED: &str = "d290d319ce3c2cbb675b023e5383a767415d7444975a2ea121848fc986954568";

// Low enough for the test to finish instantly, high enough to be a real
// search (roughly one hit per 16 nonces).
const TEST_DIFFICULTY: u64 = 0xF000_0000_0000_0000;

#[test]
fn open_account_end_to_end() {
    let seed = Seed::from_hex(SEED).unwrap();
    let pair = keypair_from_seed(&seed, 0);
    let account = encode_account(&pair.public, AccountPrefix::Nano);
    assert_eq!(
        account,
        "nano_3bt9zg6o5h4ekxihdpio3h9d1kc4p43ry1roq7q11tjyamxdu7yoawowiqub"
    );

    let mut block = Block::state(
        pair.public,
        BlockHash::ZERO,
        pair.public,
        Amount::from_dec_str("1000000000000000000000000000000").unwrap(),
        Link::from_hex("A688CF225F2F16B89E49D3153899E9B36C218672379E61A66D6495CB275392BE")
            .unwrap(),
    );
    assert_eq!(block.block_state(), BlockState::Draft);

    // The opening block has no previous, so work commits to the account key.
    assert_eq!(block.root(), *pair.public.as_bytes());

    block.sign(&pair.private).unwrap();
    assert_eq!(block.block_state(), BlockState::Signed);

    block.solve_work(Some(TEST_DIFFICULTY)).unwrap();
    assert_eq!(block.block_state(), BlockState::Complete);
    assert!(block.complete());
    assert!(block.work_value().unwrap() >= TEST_DIFFICULTY);

    // Off the wire and back, nothing changes.
    let parsed = Block::from_json(&block.to_json()).unwrap();
    assert_eq!(parsed.block_hash(), block.block_hash());
    assert!(parsed.has_valid_signature());
    parsed.verify_work(Some(TEST_DIFFICULTY)).unwrap();
}

#[test]
fn received_json_verifies() {
    // A node-style JSON body with a known-good signature; the parsed block
    // must verify without any local signing.
    let json = concat!(
        "{\"account\":\"nano_3bt9zg6o5h4ekxihdpio3h9d1kc4p43ry1roq7q11tjyamxdu7yoawowiqub\",",
        "\"previous\":\"0000000000000000000000000000000000000000000000000000000000000000\",",
        "\"representative\":\"nano_3bt9zg6o5h4ekxihdpio3h9d1kc4p43ry1roq7q11tjyamxdu7yoawowiqub\",",
        "\"balance\":\"1000000000000000000000000000000\",",
        "\"link\":\"A688CF225F2F16B89E49D3153899E9B36C218672379E61A66D6495CB275392BE\",",
        "\"signature\":\"F3A46B61DB378B89369193868C6DE9B8A1AB7CDF2C64D85F1F2CFD29A20E7474",
        "91402F4B57D82B28531B51B36428A2F3463B96D3A9A7F976EF5DEBA54ED9C203\",",
        "\"type\":\"state\"}"
    );
    let block = Block::from_json(json).unwrap();
    assert_eq!(
        block.block_hash().to_hex(),
        "52739DC9DAB251858D1B0D6D19ABD98BFF283C8F0203200C1DBC1B7EC2EE81E4"
    );
    assert!(block.has_valid_signature());
    // Tampering with the balance breaks the signature.
    let mut tampered = block.clone();
    tampered
        .set_balance(Amount::from_dec_str("2000000000000000000000000000000").unwrap())
        .unwrap();
    assert!(!tampered.has_valid_signature());
}
