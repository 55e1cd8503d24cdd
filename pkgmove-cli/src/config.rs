//! Configuration file loading for pkgmove.
//!
//! Discovers and loads `pkgmove.toml` from the repository root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "pkgmove.toml";

/// Top-level configuration from pkgmove.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PkgmoveConfig {
    /// Directive text merged after every discovered resource.
    pub additional: String,

    /// Where to look for source files.
    pub sources: SourcesConfig,

    /// Where to look for directive resources.
    pub directives: DirectivesConfig,

    /// Backup settings.
    pub backups: BackupsConfig,
}

/// Sources section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Directories under the repo root.
    pub dirs: Vec<String>,

    /// File extensions, without the dot.
    pub extensions: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            dirs: vec!["src".to_string()],
            extensions: vec!["kt".to_string()],
        }
    }
}

/// Directives section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DirectivesConfig {
    /// Dependency roots searched for `META-INF/**/*.packagemove`.
    pub roots: Vec<Utf8PathBuf>,
}

/// Backups section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackupsConfig {
    /// Whether to create backups before rewriting files.
    pub enabled: bool,

    /// Suffix for backup files.
    pub suffix: String,
}

impl Default for BackupsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            suffix: ".pkgmove.bak".to_string(),
        }
    }
}

/// Discover the pkgmove.toml config file.
///
/// Returns `None` if no config file is found in the repository root.
pub fn discover_config(repo_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = repo_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a pkgmove.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<PkgmoveConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<PkgmoveConfig> {
    let config: PkgmoveConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from repo root, or return default if not found.
pub fn load_or_default(repo_root: &Utf8Path) -> anyhow::Result<PkgmoveConfig> {
    match discover_config(repo_root) {
        Some(path) => load_config(&path),
        None => Ok(PkgmoveConfig::default()),
    }
}

/// CLI values that override or extend the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Extra directive blocks, appended in order after the config's `additional`.
    pub additional: Vec<String>,
    pub source_dirs: Vec<String>,
    pub extensions: Vec<String>,
    pub directive_roots: Vec<Utf8PathBuf>,
    pub backup: bool,
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
    pub additional: String,
    pub source_dirs: Vec<String>,
    pub extensions: Vec<String>,
    pub directive_roots: Vec<Utf8PathBuf>,
    pub backups: BackupsConfig,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: PkgmoveConfig,
}

impl ConfigMerger {
    /// Create a new merger from a loaded config.
    pub fn new(config: PkgmoveConfig) -> Self {
        Self { config }
    }

    /// CLI lists extend the config file lists; `--backup` forces backups on. CLI directive
    /// text lands after the config's, so it wins on collisions.
    pub fn merge(self, cli: &CliOverrides) -> MergedConfig {
        let mut additional = self.config.additional;
        for block in &cli.additional {
            if !additional.is_empty() && !additional.ends_with('\n') {
                additional.push('\n');
            }
            additional.push_str(block);
        }

        let mut backups = self.config.backups;
        backups.enabled |= cli.backup;

        MergedConfig {
            additional,
            source_dirs: extend_unique(self.config.sources.dirs, &cli.source_dirs),
            extensions: extend_unique(self.config.sources.extensions, &cli.extensions),
            directive_roots: extend_unique(self.config.directives.roots, &cli.directive_roots),
            backups,
        }
    }
}

fn extend_unique<T: Clone + PartialEq>(mut base: Vec<T>, extra: &[T]) -> Vec<T> {
    for item in extra {
        if !base.contains(item) {
            base.push(item.clone());
        }
    }
    base
}
