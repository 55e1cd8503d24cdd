//! Shared value types for the pkgmove workspace.
//!
//! # Design constraints
//! - Import specs and directives are immutable values built by parsing.
//! - Report types are serialized to disk; prefer adding optional fields over changing semantics.

mod directive;
mod error;
mod import_spec;
pub mod report;

pub use directive::{Directive, DirectiveKind};
pub use error::ParseError;
pub use import_spec::ImportSpec;

/// Schema identifiers.
pub mod schema {
    pub const PKGMOVE_REPORT_V1: &str = "pkgmove.report.v1";
}
