use crate::glob_files;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

/// Candidate source files: `<repo_root>/<dir>/**/*.<ext>` for every dir and extension.
///
/// Sorted and de-duplicated.
pub fn discover_source_files(
    repo_root: &Utf8Path,
    dirs: &[String],
    extensions: &[String],
) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let mut out = Vec::new();
    for dir in dirs {
        let base = repo_root.join(dir);
        if !base.is_dir() {
            debug!(dir = %base, "source dir missing; skipping");
            continue;
        }
        for ext in extensions {
            let ext = ext.trim_start_matches('.');
            out.extend(glob_files(&base, &format!("**/*.{ext}"))?);
        }
    }
    out.sort();
    out.dedup();
    debug!(files = out.len(), "discovered source files");
    Ok(out)
}
