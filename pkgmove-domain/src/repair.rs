use crate::directives::DirectiveMap;
use pkgmove_types::{Directive, ImportSpec};
use std::collections::BTreeSet;

/// Resolve one import against the directive map.
///
/// A member or class import is replaced by its directive's target, keeping the import's alias
/// unless the target names its own. A scope-only import is always kept and gains the wildcard
/// contribution of every directive declared directly in its scope.
///
/// The result is in import-spec order, not "targets first": the kept scope sorts among its
/// contributions by fully qualified name.
pub fn repair(spec: &ImportSpec, map: &DirectiveMap) -> BTreeSet<ImportSpec> {
    let mut out = BTreeSet::new();
    if spec.is_scope_only() {
        out.insert(spec.clone());
        out.extend(map.within_scope(spec).map(Directive::wildcard_contribution));
        return out;
    }

    match map.get(spec) {
        Some(directive) => out.insert(carry_alias(spec, &directive.to)),
        None => out.insert(spec.clone()),
    };
    out
}

/// Repair a sequence of imports.
///
/// Duplicate inputs are repaired once. Results are concatenated in input order and
/// de-duplicated, so a symbol moved into a scope that is already imported by wildcard shows up
/// once.
pub fn repair_sequence<'a>(
    specs: impl IntoIterator<Item = &'a ImportSpec>,
    map: &DirectiveMap,
) -> Vec<ImportSpec> {
    let mut seen_in = BTreeSet::new();
    let mut seen_out = BTreeSet::new();
    let mut out = Vec::new();
    for spec in specs {
        if !seen_in.insert(spec) {
            continue;
        }
        for repaired in repair(spec, map) {
            if !seen_out.contains(&repaired) {
                seen_out.insert(repaired.clone());
                out.push(repaired);
            }
        }
    }
    out
}

fn carry_alias(spec: &ImportSpec, to: &ImportSpec) -> ImportSpec {
    match &spec.alias {
        Some(alias) if to.alias.is_none() && !to.is_scope_only() => to.clone().with_alias(alias),
        _ => to.clone(),
    }
}
