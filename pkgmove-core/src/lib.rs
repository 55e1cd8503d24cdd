//! Embeddable core library for pkgmove.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking
//! into a build-tool plugin or other host process.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`DirectiveSource`](ports::DirectiveSource): load directive blocks
//! - [`SourceTree`](ports::SourceTree): list candidate source files
//! - [`WritePort`](ports::WritePort): write output files
//!
//! The [`adapters`] module provides default filesystem-backed implementations.
//!
//! # Entry points
//!
//! - [`run_migrate`](pipeline::run_migrate): plan, preview and optionally apply a migration
//! - [`run_directives`](pipeline::run_directives): build the merged directive map

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-export so callers don't need pkgmove-domain or pkgmove-edit directly.
pub use pkgmove_domain::{DirectiveBlock, DirectiveMap};
pub use pkgmove_edit::{EditError, EditResult};
