//! Port traits abstracting all I/O away from the pipeline.

use camino::{Utf8Path, Utf8PathBuf};
use pkgmove_domain::DirectiveBlock;

/// Source of directive blocks, in merge order.
pub trait DirectiveSource {
    fn load_directives(&self) -> anyhow::Result<Vec<DirectiveBlock>>;
}

/// Candidate source files to migrate.
pub trait SourceTree {
    fn source_files(&self) -> anyhow::Result<Vec<Utf8PathBuf>>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
}
