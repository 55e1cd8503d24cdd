//! Default filesystem-backed port implementations.

use crate::ports::{DirectiveSource, SourceTree, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use pkgmove_domain::DirectiveBlock;

/// Loads directive resources via `pkgmove_sources::load_directive_sources`.
#[derive(Debug, Clone)]
pub struct FsDirectiveSource {
    pub roots: Vec<Utf8PathBuf>,
}

impl FsDirectiveSource {
    pub fn new(roots: Vec<Utf8PathBuf>) -> Self {
        Self { roots }
    }
}

impl DirectiveSource for FsDirectiveSource {
    fn load_directives(&self) -> anyhow::Result<Vec<DirectiveBlock>> {
        pkgmove_sources::load_directive_sources(&self.roots).context("load directive resources")
    }
}

/// In-memory directive source for embedding and testing. Blocks keep the given order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectiveSource {
    blocks: Vec<DirectiveBlock>,
}

impl InMemoryDirectiveSource {
    pub fn new(blocks: Vec<DirectiveBlock>) -> Self {
        Self { blocks }
    }
}

impl DirectiveSource for InMemoryDirectiveSource {
    fn load_directives(&self) -> anyhow::Result<Vec<DirectiveBlock>> {
        Ok(self.blocks.clone())
    }
}

/// Source files under `<repo_root>/<dir>/**/*.<ext>`.
#[derive(Debug, Clone)]
pub struct FsSourceTree {
    pub repo_root: Utf8PathBuf,
    pub dirs: Vec<String>,
    pub extensions: Vec<String>,
}

impl SourceTree for FsSourceTree {
    fn source_files(&self) -> anyhow::Result<Vec<Utf8PathBuf>> {
        pkgmove_sources::discover_source_files(&self.repo_root, &self.dirs, &self.extensions)
            .with_context(|| format!("discover sources under {}", self.repo_root))
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_str().is_empty()
        {
            fs_err::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs_err::write(path, contents).with_context(|| format!("write {}", path))
    }
}
