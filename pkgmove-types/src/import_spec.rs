use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// One qualified import reference, e.g. `com.example.Owner.member as alias`.
///
/// The textual grammar is:
///
/// ```text
/// pkg.seg.seg.Member
/// pkg.seg.Owner.member
/// pkg.seg.*
/// pkg.seg.Owner.*
/// <any-of-the-above> as Identifier
/// ```
///
/// Segments that start with a lowercase letter form the package; the first segment that does not
/// ends it. A spec without an `element` is scope-only: a wildcard over the package or owner.
///
/// Specs are totally ordered by their fully qualified name first, then by owner chain, element and
/// alias. Range queries in the directive map rely on the fqn-first order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ImportSpec {
    /// Dot-joined lowercase-leading segments.
    pub package: String,

    /// Capitalized segments naming enclosing types or objects, outermost first.
    pub owners: Vec<String>,

    /// The imported member or class. `None` means "everything in this scope".
    pub element: Option<String>,

    /// Local name given with ` as `.
    pub alias: Option<String>,
}

impl ImportSpec {
    pub fn new(package: impl Into<String>, owners: Vec<String>, element: Option<String>) -> Self {
        Self {
            package: package.into(),
            owners,
            element,
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Parse one import spec. Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseError::Empty);
        }

        let (path, rest) = match text.split_once(char::is_whitespace) {
            Some((path, rest)) => (path, Some(rest)),
            None => (text, None),
        };
        let alias = rest.map(|rest| parse_alias(text, rest)).transpose()?;

        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(ParseError::EmptySegment {
                text: text.to_string(),
            });
        }
        let last = segments.len() - 1;
        if segments[..last].contains(&"*") {
            return Err(ParseError::MisplacedWildcard {
                text: text.to_string(),
            });
        }

        let run = segments
            .iter()
            .take_while(|s| **s == "*" || starts_lowercase(s))
            .count();
        let lower: Vec<&str> = segments[..run].iter().copied().filter(|s| *s != "*").collect();
        let after: Vec<&str> = segments[run..].iter().copied().filter(|s| *s != "*").collect();

        let missing_package = || ParseError::MissingPackage {
            text: text.to_string(),
        };

        let mut spec = if segments[last] == "*" {
            if lower.is_empty() {
                return Err(missing_package());
            }
            ImportSpec::new(lower.join("."), owned_segments(&after), None)
        } else if let Some((element, owners)) = after.split_last() {
            if lower.is_empty() {
                return Err(missing_package());
            }
            ImportSpec::new(lower.join("."), owned_segments(owners), Some(element.to_string()))
        } else {
            match lower.split_last() {
                Some((element, package)) if !package.is_empty() => {
                    ImportSpec::new(package.join("."), Vec::new(), Some(element.to_string()))
                }
                _ => return Err(missing_package()),
            }
        };
        spec.alias = alias;
        Ok(spec)
    }

    /// True when the spec names no element: a wildcard over its package or owner.
    pub fn is_scope_only(&self) -> bool {
        self.element.is_none()
    }

    /// Fully qualified name, ending in `.*` for scope-only specs. The alias is not included.
    pub fn fqn(&self) -> String {
        self.fqn_pieces().collect()
    }

    /// The same reference without its alias. Directive lookups are keyed on this form.
    pub fn without_alias(&self) -> ImportSpec {
        ImportSpec {
            alias: None,
            ..self.clone()
        }
    }

    /// The enclosing scope of this reference as a wildcard import.
    pub fn widened(&self) -> ImportSpec {
        ImportSpec {
            element: None,
            alias: None,
            ..self.clone()
        }
    }

    fn fqn_pieces(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.package.as_str())
            .chain(self.owners.iter().flat_map(|o| [".", o.as_str()]))
            .chain([".", self.element.as_deref().unwrap_or("*")])
    }

    fn owner_bytes(&self) -> impl Iterator<Item = u8> {
        self.owners.iter().enumerate().flat_map(|(i, o)| {
            let sep: &[u8] = if i == 0 { b"" } else { b"." };
            sep.iter().copied().chain(o.bytes())
        })
    }
}

fn starts_lowercase(segment: &str) -> bool {
    segment.chars().next().is_some_and(char::is_lowercase)
}

fn owned_segments(segments: &[&str]) -> Vec<String> {
    segments.iter().map(|s| s.to_string()).collect()
}

fn parse_alias(text: &str, rest: &str) -> Result<String, ParseError> {
    let Some(alias) = rest.trim().strip_prefix("as") else {
        return Err(ParseError::UnexpectedText {
            text: text.to_string(),
        });
    };
    if !alias.starts_with(char::is_whitespace) {
        return Err(ParseError::UnexpectedText {
            text: text.to_string(),
        });
    }
    let alias = alias.trim();
    if alias.is_empty() || alias.contains(char::is_whitespace) {
        return Err(ParseError::InvalidAlias {
            text: text.to_string(),
        });
    }
    Ok(alias.to_string())
}

impl Ord for ImportSpec {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fqn_pieces()
            .flat_map(str::bytes)
            .cmp(other.fqn_pieces().flat_map(str::bytes))
            .then_with(|| self.owner_bytes().cmp(other.owner_bytes()))
            .then_with(|| self.element.cmp(&other.element))
            .then_with(|| self.alias.cmp(&other.alias))
    }
}

impl PartialOrd for ImportSpec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ImportSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for piece in self.fqn_pieces() {
            f.write_str(piece)?;
        }
        if let Some(alias) = &self.alias {
            write!(f, " as {alias}")?;
        }
        Ok(())
    }
}

impl FromStr for ImportSpec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImportSpec::parse(s)
    }
}

impl TryFrom<String> for ImportSpec {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ImportSpec::parse(&value)
    }
}

impl From<ImportSpec> for String {
    fn from(spec: ImportSpec) -> Self {
        spec.to_string()
    }
}
