//! Clap-free settings for the migrate pipeline.

use camino::{Utf8Path, Utf8PathBuf};

/// Settings for the migrate pipeline.
#[derive(Debug, Clone)]
pub struct MigrateSettings {
    pub repo_root: Utf8PathBuf,

    /// Directive text merged after every discovered resource.
    pub additional: String,

    // Discovery
    pub source_dirs: Vec<String>,
    pub extensions: Vec<String>,
    pub directive_roots: Vec<Utf8PathBuf>,

    // Apply behaviour
    pub dry_run: bool,

    // Backups
    pub backup_enabled: bool,
    pub backup_suffix: String,
}

impl Default for MigrateSettings {
    fn default() -> Self {
        Self {
            repo_root: Utf8PathBuf::from("."),
            additional: String::new(),
            source_dirs: vec!["src".to_string()],
            extensions: vec!["kt".to_string()],
            directive_roots: Vec::new(),
            dry_run: true,
            backup_enabled: false,
            backup_suffix: ".pkgmove.bak".to_string(),
        }
    }
}

impl MigrateSettings {
    /// Directive roots with relative entries resolved against the repo root.
    pub fn resolved_directive_roots(&self) -> Vec<Utf8PathBuf> {
        self.directive_roots
            .iter()
            .map(|root| resolve(&self.repo_root, root))
            .collect()
    }
}

fn resolve(base: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
