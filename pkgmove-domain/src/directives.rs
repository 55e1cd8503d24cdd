use pkgmove_types::{Directive, ImportSpec, ParseError};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Origin label for the user-supplied directive text.
pub const ADDITIONAL_ORIGIN: &str = "<additional>";

/// `char::MAX`: sorts after every identifier character in byte order, so `<scope>.\u{10FFFF}`
/// bounds every name in a scope.
const SCOPE_END: &str = "\u{10FFFF}";

/// A block of directive text and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveBlock {
    /// Resource path, or [`ADDITIONAL_ORIGIN`].
    pub origin: String,
    pub text: String,
}

impl DirectiveBlock {
    pub fn new(origin: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            text: text.into(),
        }
    }

    /// The user-supplied block, merged last.
    pub fn additional(text: impl Into<String>) -> Self {
        Self::new(ADDITIONAL_ORIGIN, text)
    }
}

/// A directive line that failed to parse, with its location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{origin}:{line_number}: invalid directive `{line}`")]
pub struct DirectiveBlockError {
    pub origin: String,
    /// 1-based.
    pub line_number: usize,
    pub line: String,
    #[source]
    pub source: ParseError,
}

/// Parse every directive in a block.
///
/// Lines are trimmed; blank lines and `//` comments are skipped. The first bad line fails the
/// whole block.
pub fn parse_directive_block(block: &DirectiveBlock) -> Result<Vec<Directive>, DirectiveBlockError> {
    let mut out = Vec::new();
    for (idx, raw) in block.text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        let directive = Directive::parse(line).map_err(|source| DirectiveBlockError {
            origin: block.origin.clone(),
            line_number: idx + 1,
            line: line.to_string(),
            source,
        })?;
        out.push(directive);
    }
    Ok(out)
}

/// A directive together with the block that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedDirective {
    pub directive: Directive,
    pub origin: String,
}

/// Directives keyed by their (unaliased) `from` spec, in import-spec order.
///
/// Built once per run by folding blocks in precedence order, then shared read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveMap {
    entries: BTreeMap<ImportSpec, MappedDirective>,
}

impl DirectiveMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge blocks in order. A later block's directive replaces an earlier one with the same
    /// `from`.
    pub fn from_blocks<'a>(
        blocks: impl IntoIterator<Item = &'a DirectiveBlock>,
    ) -> Result<Self, DirectiveBlockError> {
        let mut map = Self::new();
        for block in blocks {
            map.merge_block(block)?;
        }
        Ok(map)
    }

    /// Parse `block` and fold it into the map. Returns the number of directives it supplied.
    pub fn merge_block(&mut self, block: &DirectiveBlock) -> Result<usize, DirectiveBlockError> {
        let directives = parse_directive_block(block)?;
        let count = directives.len();
        for directive in directives {
            self.insert(directive, &block.origin);
        }
        debug!(origin = %block.origin, directives = count, "merged directive block");
        Ok(count)
    }

    /// Insert one directive, returning the entry it replaced.
    pub fn insert(&mut self, directive: Directive, origin: &str) -> Option<MappedDirective> {
        let key = directive.from.without_alias();
        let replaced = self.entries.insert(
            key,
            MappedDirective {
                directive,
                origin: origin.to_string(),
            },
        );
        if let Some(old) = &replaced {
            debug!(
                from = %old.directive.from,
                previous = %old.origin,
                winner = %origin,
                "directive overridden"
            );
        }
        replaced
    }

    /// The directive whose `from` is exactly `spec`, ignoring aliases.
    pub fn get(&self, spec: &ImportSpec) -> Option<&Directive> {
        let found = match spec.alias {
            Some(_) => self.entries.get(&spec.without_alias()),
            None => self.entries.get(spec),
        };
        found.map(|entry| &entry.directive)
    }

    /// Directives whose `from` sits directly inside the scope of `scope`.
    ///
    /// The candidates come from a range query between `scope` itself and `scope` with the element
    /// set to a sentinel that sorts after every identifier. The range also spans nested
    /// packages and owners, so candidates are narrowed to:
    /// - the scope itself
    /// - any member or class declared directly in the scope
    /// - a wildcard over an owner declared directly in the scope
    pub fn within_scope<'a>(
        &'a self,
        scope: &ImportSpec,
    ) -> impl Iterator<Item = &'a Directive> + use<'a> {
        let lower = scope.widened();
        let upper = ImportSpec {
            element: Some(SCOPE_END.to_string()),
            ..lower.clone()
        };
        self.entries
            .range(lower.clone()..=upper)
            .map(|(_, entry)| &entry.directive)
            .filter(move |directive| directly_within(&lower, &directive.from))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in import-spec order.
    pub fn iter(&self) -> impl Iterator<Item = &MappedDirective> {
        self.entries.values()
    }
}

fn directly_within(scope: &ImportSpec, from: &ImportSpec) -> bool {
    if from.package != scope.package {
        return false;
    }
    if from.owners == scope.owners {
        return true;
    }
    from.is_scope_only()
        && from.owners.len() == scope.owners.len() + 1
        && from.owners.starts_with(&scope.owners)
}
