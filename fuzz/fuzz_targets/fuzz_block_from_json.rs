#![no_main]

use libfuzzer_sys::fuzz_target;

use nanokit_blocks::Block;

// Parsing arbitrary JSON must never panic, and anything that parses must
// survive a serialize/parse cycle unchanged.
fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(block) = Block::from_json(json) {
        let reparsed = Block::from_json(&block.to_json()).expect("own JSON must parse");
        assert_eq!(reparsed, block, "roundtrip must preserve the block");
        let _ = block.block_hash();
        let _ = block.has_valid_signature();
    }
});
