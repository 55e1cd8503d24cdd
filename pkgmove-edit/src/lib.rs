//! Plan/apply engine for pkgmove migrations.
//!
//! Responsibilities:
//! - Rewrite every candidate file in memory against the merged directive map.
//! - Generate a unified diff preview.
//! - Write rewritten files, optionally keeping backups.

mod error;

pub use error::{EditError, EditResult, MalformedInput};

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use diffy::PatchFormatter;
use fs_err as fs;
use pkgmove_domain::{DirectiveMap, rewrite_source};
use pkgmove_types::report::{FileResult, FileStatus};
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct MigrateOptions {
    pub dry_run: bool,
    /// When set, the original contents are saved to `<file><suffix>` before overwriting.
    pub backup_suffix: Option<String>,
}

/// One file whose import block changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Relative to the repo root when the file lives under it.
    pub path: Utf8PathBuf,
    pub before: String,
    pub after: String,
    pub imports_before: usize,
    pub imports_after: usize,
}

/// The complete in-memory result of a migration, computed before anything is written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationPlan {
    pub files_scanned: usize,
    /// Changed files only, in scan order.
    pub changes: Vec<PlannedFile>,
}

impl MigrationPlan {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Read and rewrite every file in memory.
///
/// Any unreadable file or malformed import fails the whole plan, so a failed plan never leaves
/// a partially migrated tree behind.
pub fn plan_migration(
    repo_root: &Utf8Path,
    files: &[Utf8PathBuf],
    map: &DirectiveMap,
) -> EditResult<MigrationPlan> {
    let mut plan = MigrationPlan::default();
    for file in files {
        let abs = abs_path(repo_root, file);
        let rel = rel_path(repo_root, &abs);
        let before = fs::read_to_string(&abs).with_context(|| format!("read {}", abs))?;
        plan.files_scanned += 1;

        let rewritten = rewrite_source(&before, map).map_err(|source| MalformedInput::Import {
            path: rel.clone(),
            source,
        })?;
        match rewritten {
            Some(out) => {
                debug!(path = %rel, before = out.imports_before, after = out.imports_after, "imports rewritten");
                plan.changes.push(PlannedFile {
                    path: rel,
                    before,
                    after: out.text,
                    imports_before: out.imports_before,
                    imports_after: out.imports_after,
                });
            }
            None => debug!(path = %rel, "imports unchanged"),
        }
    }
    Ok(plan)
}

/// Write a plan to disk. When `opts.dry_run` is true nothing is written and every change is
/// reported as pending.
///
/// Writes happen file by file. If one fails, files written before it stay modified; re-running
/// the migration completes the rest, since already-migrated files come out unchanged.
pub fn apply_migration(
    repo_root: &Utf8Path,
    plan: &MigrationPlan,
    opts: &MigrateOptions,
) -> anyhow::Result<Vec<FileResult>> {
    let mut results = Vec::with_capacity(plan.changes.len());
    for change in &plan.changes {
        let mut result = FileResult {
            path: change.path.to_string(),
            status: FileStatus::Pending,
            imports_before: change.imports_before as u64,
            imports_after: change.imports_after as u64,
            backup_path: None,
        };

        if !opts.dry_run {
            let abs = abs_path(repo_root, &change.path);
            if let Some(suffix) = &opts.backup_suffix {
                let backup = Utf8PathBuf::from(format!("{abs}{suffix}"));
                fs::write(&backup, &change.before).with_context(|| format!("write {}", backup))?;
                result.backup_path = Some(format!("{}{suffix}", change.path));
            }
            fs::write(&abs, &change.after).with_context(|| format!("write {}", abs))?;
            info!(path = %change.path, "rewrote imports");
            result.status = FileStatus::Rewritten;
        }

        results.push(result);
    }
    Ok(results)
}

/// Render every planned change as a git-style unified diff.
pub fn render_patch(plan: &MigrationPlan) -> String {
    let mut out = String::new();
    let formatter = PatchFormatter::new();

    for change in &plan.changes {
        out.push_str(&format!("diff --git a/{0} b/{0}\n", change.path));
        out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", change.path));

        let patch = diffy::create_patch(&change.before, &change.after);
        let body = formatter.fmt_patch(&patch).to_string();
        // Drop diffy's own `--- original` / `+++ modified` header.
        for line in body.lines().skip_while(|l| !l.starts_with("@@")) {
            out.push_str(line);
            out.push('\n');
        }
    }

    out
}

fn abs_path(repo_root: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        repo_root.join(path)
    }
}

fn rel_path(repo_root: &Utf8Path, abs: &Utf8Path) -> Utf8PathBuf {
    abs.strip_prefix(repo_root)
        .map(Utf8Path::to_path_buf)
        .unwrap_or_else(|_| abs.to_path_buf())
}
