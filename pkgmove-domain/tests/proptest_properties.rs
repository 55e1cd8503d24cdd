//! Property-based tests for directive merging and rewriting.
//!
//! These tests verify that:
//! - Merging blocks with disjoint keys does not depend on block order
//! - On a collision the later block always wins
//! - Imports that no directive mentions repair to themselves
//! - Rewriting only touches the import block

use pkgmove_domain::{DirectiveBlock, DirectiveMap, Rewrite, repair, rewrite_lines};
use pkgmove_types::ImportSpec;
use proptest::prelude::*;

/// Class names unique within one generated case.
fn arb_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::string::string_regex(r"[A-Z][a-z]{1,6}").unwrap(),
        1..8,
    )
    .prop_map(|mut names| {
        names.sort();
        names.dedup();
        names
    })
}

fn block(origin: &str, lines: &[String]) -> DirectiveBlock {
    DirectiveBlock::new(origin, lines.join("\n"))
}

proptest! {
    /// Blocks with disjoint `from` keys merge to the same map in either order.
    #[test]
    fn disjoint_merge_is_commutative(names in arb_names(), split in 0usize..8) {
        let split = split.min(names.len());
        let left: Vec<String> = names[..split]
            .iter()
            .map(|n| format!("MOVE com.old.{n} -> com.new.{n}"))
            .collect();
        let right: Vec<String> = names[split..]
            .iter()
            .map(|n| format!("REPLACE com.old.{n} -> com.other.{n}"))
            .collect();
        let a = block("a", &left);
        let b = block("b", &right);

        let ab = DirectiveMap::from_blocks([&a, &b]).unwrap();
        let ba = DirectiveMap::from_blocks([&b, &a]).unwrap();
        prop_assert_eq!(ab, ba);
    }

    /// When every key collides, the later block decides every target.
    #[test]
    fn later_block_wins(names in arb_names()) {
        let first: Vec<String> = names.iter().map(|n| format!("com.old.{n} -> com.first.{n}")).collect();
        let second: Vec<String> = names.iter().map(|n| format!("com.old.{n} -> com.second.{n}")).collect();
        let map = DirectiveMap::from_blocks([&block("a", &first), &block("b", &second)]).unwrap();

        prop_assert_eq!(map.len(), names.len());
        for n in &names {
            let target = map.get(&ImportSpec::parse(&format!("com.old.{n}")).unwrap()).unwrap();
            prop_assert_eq!(target.to.package.as_str(), "com.second");
        }
    }

    /// Imports outside every directive's `from` are returned unchanged.
    #[test]
    fn unmentioned_imports_repair_to_themselves(names in arb_names()) {
        let lines: Vec<String> = names.iter().map(|n| format!("MOVE com.old.{n} -> com.new.{n}")).collect();
        let map = DirectiveMap::from_blocks([&block("a", &lines)]).unwrap();
        for n in &names {
            let migrated = ImportSpec::parse(&format!("com.new.{n}")).unwrap();
            let out = repair(&migrated, &map);
            prop_assert_eq!(out.len(), 1);
            prop_assert!(out.contains(&migrated));
        }
    }

    /// Prologue and epilogue lines survive a rewrite verbatim and in order.
    #[test]
    fn rewrite_only_touches_imports(
        names in arb_names(),
        body in prop::collection::vec("[a-z ]{0,12}", 0..6),
    ) {
        let directives: Vec<String> = names.iter().map(|n| format!("MOVE com.old.{n} -> com.new.{n}")).collect();
        let map = DirectiveMap::from_blocks([&block("a", &directives)]).unwrap();

        let mut lines = vec!["package p".to_string(), String::new()];
        lines.extend(names.iter().map(|n| format!("import com.old.{n}")));
        let body: Vec<String> = body.into_iter().filter(|l| !l.trim().starts_with("import ")).collect();
        lines.extend(body.iter().cloned());

        let Rewrite::Rewritten(out) = rewrite_lines(&lines, &map).unwrap() else {
            return Err(TestCaseError::fail("expected a rewrite"));
        };
        prop_assert_eq!(&out.lines[..2], &lines[..2]);
        prop_assert_eq!(&out.lines[2 + names.len()..], &body[..]);
        for (line, n) in out.lines[2..2 + names.len()].iter().zip(&names) {
            prop_assert_eq!(line, &format!("import com.new.{n}"));
        }
    }
}
