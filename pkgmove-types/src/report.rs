use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Machine-readable outcome of one migration run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub run: RunInfo,

    /// True when nothing was written to disk.
    pub dry_run: bool,

    /// Directive blocks in merge order; later entries won on collisions.
    #[serde(default)]
    pub sources: Vec<DirectiveSourceRef>,

    pub summary: MigrationSummary,

    /// Only files whose import block changed are listed.
    #[serde(default)]
    pub files: Vec<FileResult>,
}

impl MigrationReport {
    pub fn new(tool: ToolInfo, dry_run: bool) -> Self {
        Self {
            schema: crate::schema::PKGMOVE_REPORT_V1.to_string(),
            tool,
            run: RunInfo {
                started_at: Utc::now(),
                ended_at: None,
            },
            dry_run,
            sources: vec![],
            summary: MigrationSummary::default(),
            files: vec![],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    pub started_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveSourceRef {
    /// Resource path, or `<additional>` for user-supplied text.
    pub origin: String,
    pub directives: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationSummary {
    /// Entries in the merged directive map.
    pub directives: u64,
    pub files_scanned: u64,
    pub files_changed: u64,
    pub files_written: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileResult {
    pub path: String,
    pub status: FileStatus,
    pub imports_before: u64,
    pub imports_after: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Rewritten on disk.
    Rewritten,
    /// Would be rewritten; dry-run.
    Pending,
}
