#![no_main]

//! Fuzz target for import spec parsing.
//!
//! Parsing must never panic, and anything that parses must render back to text that parses to
//! the same spec.

use libfuzzer_sys::fuzz_target;
use pkgmove_types::{Directive, ImportSpec};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(spec) = ImportSpec::parse(s) {
        let rendered = spec.to_string();
        let reparsed = ImportSpec::parse(&rendered).expect("rendered spec parses");
        assert_eq!(reparsed, spec);
        let _ = spec.widened();
    }

    if let Ok(directive) = Directive::parse(s) {
        let _ = directive.wildcard_contribution();
        let _ = directive.to_string();
    }
});
