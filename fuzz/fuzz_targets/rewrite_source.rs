#![no_main]

//! Fuzz target for the import-block rewriter.
//!
//! Rewriting must never panic, and rewritten text must still parse.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pkgmove_domain::{DirectiveBlock, DirectiveMap, rewrite_source};

#[derive(Debug, Arbitrary)]
struct Input {
    directives: String,
    source: String,
}

fuzz_target!(|input: Input| {
    let Ok(map) = DirectiveMap::from_blocks([&DirectiveBlock::additional(input.directives)]) else {
        return;
    };

    if let Ok(Some(first)) = rewrite_source(&input.source, &map) {
        // Chained directives may rewrite again; only parsing is required here.
        assert!(rewrite_source(&first.text, &map).is_ok(), "rewritten text fails to parse");
    }
});
