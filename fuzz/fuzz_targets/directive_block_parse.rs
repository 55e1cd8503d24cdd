#![no_main]

use libfuzzer_sys::fuzz_target;
use pkgmove_domain::{DirectiveBlock, DirectiveMap, parse_directive_block};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else { return };

    let block = DirectiveBlock::new("fuzz", s);
    let _ = parse_directive_block(&block);

    // Scope queries over whatever parsed must not panic either.
    if let Ok(map) = DirectiveMap::from_blocks([&block]) {
        for entry in map.iter() {
            let scope = entry.directive.from.widened();
            let _ = map.within_scope(&scope).count();
        }
    }
});
