//! Domain logic: merge migration directives and repair import blocks against them.
//!
//! Everything here is a pure function of its inputs. This crate owns *what* an import becomes;
//! reading and writing files belongs to `pkgmove-edit`.

mod directives;
mod repair;
mod rewrite;

pub use directives::{
    ADDITIONAL_ORIGIN, DirectiveBlock, DirectiveBlockError, DirectiveMap, MappedDirective,
    parse_directive_block,
};
pub use repair::{repair, repair_sequence};
pub use rewrite::{
    Rewrite, RewriteError, RewrittenImports, RewrittenSource, rewrite_lines, rewrite_source,
};
