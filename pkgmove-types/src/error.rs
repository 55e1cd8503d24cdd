//! Parse errors for import specs and directive lines.

use thiserror::Error;

/// A grammar violation in an import spec or a directive line.
///
/// Malformed input is never repaired or skipped. Callers treat any of these as fatal for the
/// whole migration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input was empty or whitespace only.
    #[error("empty import spec")]
    Empty,

    /// Two dots in a row, or a leading/trailing dot.
    #[error("empty segment in import spec `{text}`")]
    EmptySegment { text: String },

    /// `*` appeared anywhere but the last segment.
    #[error("wildcard must be the last segment in `{text}`")]
    MisplacedWildcard { text: String },

    /// No lowercase-leading package segment precedes the element.
    #[error("import spec `{text}` has no package")]
    MissingPackage { text: String },

    /// Text after ` as ` is empty or not a single identifier.
    #[error("invalid alias in import spec `{text}`")]
    InvalidAlias { text: String },

    /// Something other than ` as <alias>` follows the qualified name.
    #[error("unexpected text after qualified name in `{text}`")]
    UnexpectedText { text: String },

    /// A directive line with fewer than two tokens after the keyword.
    #[error("directive `{line}` needs both a source and a target")]
    MissingTarget { line: String },
}
