use crate::directives::DirectiveMap;
use crate::repair::repair_sequence;
use pkgmove_types::{ImportSpec, ParseError};
use thiserror::Error;

const IMPORT_PREFIX: &str = "import ";

/// An import line that does not match the import spec grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line_number}: invalid import `{line}`")]
pub struct RewriteError {
    /// 1-based.
    pub line_number: usize,
    pub line: String,
    #[source]
    pub source: ParseError,
}

/// Outcome of rewriting one file's import block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// No import needed repair; the original lines stand.
    Unchanged,
    Rewritten(RewrittenImports),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenImports {
    pub lines: Vec<String>,
    pub imports_before: usize,
    pub imports_after: usize,
}

/// A rewritten file as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenSource {
    pub text: String,
    pub imports_before: usize,
    pub imports_after: usize,
}

/// Rebuild a file's import block against the directive map.
///
/// Lines before the first import are kept verbatim. Every later `import` line is collected and
/// replaced by the repaired import set, emitted where the first import stood. Every other line
/// keeps its relative order after the block.
pub fn rewrite_lines<S: AsRef<str>>(
    lines: &[S],
    map: &DirectiveMap,
) -> Result<Rewrite, RewriteError> {
    let Some(first) = lines.iter().position(|l| is_import(l.as_ref())) else {
        return Ok(Rewrite::Unchanged);
    };

    let mut specs: Vec<ImportSpec> = Vec::new();
    let mut epilogue: Vec<&str> = Vec::new();
    for (idx, line) in lines.iter().enumerate().skip(first) {
        let line = line.as_ref();
        match line.trim().strip_prefix(IMPORT_PREFIX) {
            Some(rest) => {
                let spec = ImportSpec::parse(rest).map_err(|source| RewriteError {
                    line_number: idx + 1,
                    line: line.to_string(),
                    source,
                })?;
                specs.push(spec);
            }
            None => epilogue.push(line),
        }
    }

    let repaired = repair_sequence(&specs, map);
    if repaired == specs {
        return Ok(Rewrite::Unchanged);
    }

    let mut out: Vec<String> = Vec::with_capacity(first + repaired.len() + epilogue.len());
    out.extend(lines[..first].iter().map(|l| l.as_ref().to_string()));
    out.extend(repaired.iter().map(|spec| format!("{IMPORT_PREFIX}{spec}")));
    out.extend(epilogue.into_iter().map(str::to_string));

    Ok(Rewrite::Rewritten(RewrittenImports {
        lines: out,
        imports_before: specs.len(),
        imports_after: repaired.len(),
    }))
}

/// Rewrite a whole file. Returns `None` when nothing changes.
///
/// Lines are rejoined with the file's own separator (`\r\n` when present, otherwise `\n`) and a
/// trailing newline is kept.
pub fn rewrite_source(
    text: &str,
    map: &DirectiveMap,
) -> Result<Option<RewrittenSource>, RewriteError> {
    let lines: Vec<&str> = text.lines().collect();
    let Rewrite::Rewritten(rewritten) = rewrite_lines(&lines, map)? else {
        return Ok(None);
    };

    let separator = if text.contains("\r\n") { "\r\n" } else { "\n" };
    let mut out = rewritten.lines.join(separator);
    if text.ends_with('\n') {
        out.push_str(separator);
    }
    Ok(Some(RewrittenSource {
        text: out,
        imports_before: rewritten.imports_before,
        imports_after: rewritten.imports_after,
    }))
}

fn is_import(line: &str) -> bool {
    line.trim().starts_with(IMPORT_PREFIX)
}
