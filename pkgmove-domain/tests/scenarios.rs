//! End-to-end scenarios for directive merging, repair and rewriting.

use pkgmove_domain::{
    DirectiveBlock, DirectiveMap, Rewrite, repair, repair_sequence, rewrite_lines,
};
use pkgmove_types::{Directive, DirectiveKind, ImportSpec};
use pretty_assertions::assert_eq;

fn spec(text: &str) -> ImportSpec {
    ImportSpec::parse(text).expect("valid import spec")
}

fn map_of(blocks: &[&str]) -> DirectiveMap {
    let blocks: Vec<DirectiveBlock> = blocks
        .iter()
        .enumerate()
        .map(|(i, text)| DirectiveBlock::new(format!("block-{i}"), *text))
        .collect();
    DirectiveMap::from_blocks(&blocks).expect("valid blocks")
}

fn rendered(specs: impl IntoIterator<Item = ImportSpec>) -> Vec<String> {
    specs.into_iter().map(|s| s.to_string()).collect()
}

fn scenario_map() -> DirectiveMap {
    map_of(&["MOVE com.old.Test -> com.new.Test\nREPLACE com.old.stillExists -> com.new.stillExists"])
}

#[test]
fn exact_move_resolves_to_target() {
    let map = map_of(&["MOVE com.old.Test -> com.new.Test"]);
    assert_eq!(rendered(repair(&spec("com.old.Test"), &map)), vec!["com.new.Test"]);
}

#[test]
fn wildcard_gains_moved_scope_and_replaced_symbol() {
    assert_eq!(
        rendered(repair(&spec("com.old.*"), &scenario_map())),
        vec!["com.new.*", "com.new.stillExists", "com.old.*"]
    );
}

#[test]
fn file_rewrite_puts_new_targets_before_retained_wildcard() {
    let lines = ["package p", "import com.old.*", "", "fun f(){}"];
    let Rewrite::Rewritten(out) = rewrite_lines(&lines, &scenario_map()).expect("rewrite") else {
        panic!("expected a rewrite");
    };
    assert_eq!(
        out.lines,
        vec![
            "package p",
            "import com.new.*",
            "import com.new.stillExists",
            "import com.old.*",
            "",
            "fun f(){}",
        ]
    );
}

#[test]
fn free_form_connective_matches_keyword_form() {
    let prose = Directive::parse("com.old.A moved to com.new.A").expect("parse");
    let keyword = Directive::parse("MOVE com.old.A -> com.new.A").expect("parse");
    assert_eq!(prose.from, keyword.from);
    assert_eq!(prose.to, keyword.to);
    // No keyword means replace.
    assert_eq!(prose.kind, DirectiveKind::Replace);
    assert_eq!(keyword.kind, DirectiveKind::Move);
}

#[test]
fn move_widens_and_replace_stays_exact_under_wildcard() {
    let map = map_of(&["MOVE pkg.X -> pkg2.X\nREPLACE pkg.Y -> pkg3.Y"]);
    let out = repair(&spec("pkg.*"), &map);
    assert!(out.contains(&spec("pkg2.*")));
    assert!(!out.contains(&spec("pkg2.X")));
    assert!(out.contains(&spec("pkg3.Y")));
    assert!(!out.contains(&spec("pkg3.*")));
}

#[test]
fn user_block_overrides_metadata_blocks() {
    let map = map_of(&[
        "MOVE com.old.X -> com.lib1.X",
        "MOVE com.old.X -> com.lib2.X\nMOVE com.old.Y -> com.lib2.Y",
        "REPLACE com.old.X -> com.user.X",
    ]);
    assert_eq!(map.len(), 2);
    assert_eq!(rendered(repair(&spec("com.old.X"), &map)), vec!["com.user.X"]);
    assert_eq!(rendered(repair(&spec("com.old.Y"), &map)), vec!["com.lib2.Y"]);
}

#[test]
fn relocated_symbol_into_imported_wildcard_appears_once() {
    let map = map_of(&["MOVE com.old.Test -> com.new.Test"]);
    let out = repair_sequence(&[spec("com.new.*"), spec("com.old.*")], &map);
    assert_eq!(rendered(out), vec!["com.new.*", "com.old.*"]);
}

#[test]
fn second_run_is_a_no_op() {
    let map = scenario_map();
    let lines = ["package p", "import com.old.Test", "import com.old.stillExists", "class X"];
    let Rewrite::Rewritten(first) = rewrite_lines(&lines, &map).expect("first run") else {
        panic!("expected a rewrite");
    };
    assert_eq!(
        rewrite_lines(&first.lines, &map).expect("second run"),
        Rewrite::Unchanged
    );
}
