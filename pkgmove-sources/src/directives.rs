use crate::glob_files;
use camino::Utf8PathBuf;
use fs_err as fs;
use pkgmove_domain::DirectiveBlock;
use std::collections::BTreeSet;
use tracing::debug;

/// Directive resources live under `META-INF` and end in `.packagemove`.
pub const DIRECTIVE_RESOURCE_PATTERN: &str = "**/META-INF/**/*.packagemove";

/// Read every directive resource under the given dependency roots.
///
/// Roots are visited in order and paths are sorted within a root, which is the order the blocks
/// must be merged in. A path reachable from two roots is read once, at its first occurrence.
/// A root that does not exist contributes nothing.
pub fn load_directive_sources(roots: &[Utf8PathBuf]) -> anyhow::Result<Vec<DirectiveBlock>> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for root in roots {
        if !root.is_dir() {
            debug!(root = %root, "directive root missing; skipping");
            continue;
        }
        let paths = glob_files(root, DIRECTIVE_RESOURCE_PATTERN)?;
        debug!(root = %root, resources = paths.len(), "scanned directive root");
        for path in paths {
            if !seen.insert(path.clone()) {
                continue;
            }
            let text = fs::read_to_string(&path)?;
            out.push(DirectiveBlock::new(path.as_str(), text));
        }
    }
    Ok(out)
}
