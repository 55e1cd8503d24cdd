//! Error types for pkgmove-edit.
//!
//! Malformed input (exit code 2) is kept apart from runtime failures (exit code 1) so the CLI
//! can tell a bad directive or import line from an I/O problem.

use camino::Utf8PathBuf;
use pkgmove_domain::{DirectiveBlockError, RewriteError};
use thiserror::Error;

/// The top-level error type for pkgmove-edit operations.
#[derive(Debug, Error)]
pub enum EditError {
    /// A directive or import line failed to parse (exit code 2).
    #[error("parse error: {0}")]
    Parse(#[from] MalformedInput),

    /// A runtime/tool error occurred (exit code 1).
    /// This includes I/O errors and invalid arguments.
    #[error("runtime error: {0}")]
    Runtime(#[from] anyhow::Error),
}

/// Input that does not match the directive or import grammar.
#[derive(Debug, Error)]
pub enum MalformedInput {
    #[error(transparent)]
    Directive(#[from] DirectiveBlockError),

    #[error("{path}:{}: invalid import `{}`", .source.line_number, .source.line)]
    Import {
        path: Utf8PathBuf,
        #[source]
        source: RewriteError,
    },
}

impl From<DirectiveBlockError> for EditError {
    fn from(err: DirectiveBlockError) -> Self {
        EditError::Parse(err.into())
    }
}

impl EditError {
    /// Returns true if the run failed on malformed input.
    pub fn is_parse(&self) -> bool {
        matches!(self, EditError::Parse(_))
    }

    /// Returns the recommended exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            EditError::Parse(_) => 2,
            EditError::Runtime(_) => 1,
        }
    }
}

/// Result type alias using EditError.
pub type EditResult<T> = Result<T, EditError>;
