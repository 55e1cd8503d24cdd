//! Filesystem discovery for pkgmove.
//!
//! Two inputs feed a migration: directive resources shipped by dependencies, and the source
//! files to rewrite. Both are found with glob patterns and returned in a deterministic order,
//! so two runs over the same tree merge directives and visit files identically.

mod directives;
mod files;

pub use directives::{DIRECTIVE_RESOURCE_PATTERN, load_directive_sources};
pub use files::discover_source_files;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use glob::{Pattern, glob};

/// Expand `pattern` under `root`, keeping regular files only. Paths are sorted.
pub(crate) fn glob_files(root: &Utf8Path, pattern: &str) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let full = format!("{}/{}", Pattern::escape(root.as_str()), pattern);
    let mut out = Vec::new();
    for entry in glob(&full).with_context(|| format!("glob {full}"))? {
        let path = entry.map_err(|e| anyhow::anyhow!("glob error: {e}"))?;
        let path = Utf8PathBuf::from_path_buf(path)
            .map_err(|p| anyhow::anyhow!("non-UTF-8 path: {}", p.display()))?;
        if path.is_file() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}
