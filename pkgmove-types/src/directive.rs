use crate::error::ParseError;
use crate::import_spec::ImportSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a directive contributes when an enclosing wildcard import is expanded.
///
/// - move: the symbol's owning scope changed location; the wildcard gains the destination scope
/// - replace: a precise substitution; the wildcard gains exactly the destination symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveKind {
    Move,
    #[default]
    Replace,
}

impl DirectiveKind {
    pub fn keyword(self) -> &'static str {
        match self {
            DirectiveKind::Move => "MOVE",
            DirectiveKind::Replace => "REPLACE",
        }
    }
}

/// One migration rule: `from` is now found at `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub from: ImportSpec,
    pub to: ImportSpec,
    pub kind: DirectiveKind,
}

impl Directive {
    pub fn new(from: ImportSpec, to: ImportSpec, kind: DirectiveKind) -> Self {
        Self { from, to, kind }
    }

    /// Parse `[MOVE|REPLACE] <from> <connective...> <to>`.
    ///
    /// The keyword is case-insensitive and defaults to replace. Only the first and last tokens
    /// are read, so `a.B -> c.B` and `a.B moved to c.B` are the same directive.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let (kind, rest) = if let Some(rest) = strip_keyword(line, "MOVE ") {
            (DirectiveKind::Move, rest)
        } else if let Some(rest) = strip_keyword(line, "REPLACE ") {
            (DirectiveKind::Replace, rest)
        } else {
            (DirectiveKind::Replace, line)
        };

        let mut tokens = rest.split_whitespace();
        let (Some(from), Some(to)) = (tokens.next(), tokens.next_back()) else {
            return Err(ParseError::MissingTarget {
                line: line.to_string(),
            });
        };

        Ok(Directive {
            from: ImportSpec::parse(from)?,
            to: ImportSpec::parse(to)?,
            kind,
        })
    }

    /// What an enclosing wildcard import gains from this directive.
    pub fn wildcard_contribution(&self) -> ImportSpec {
        match self.kind {
            DirectiveKind::Move => self.to.widened(),
            DirectiveKind::Replace => self.to.clone(),
        }
    }
}

fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let head = line.get(..keyword.len())?;
    if head.eq_ignore_ascii_case(keyword) {
        Some(&line[keyword.len()..])
    } else {
        None
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.kind.keyword(), self.from, self.to)
    }
}
