//! Core migrate pipeline, extracted from the CLI.
//!
//! These entry points are I/O-agnostic for discovery: directive blocks and candidate files come
//! through the port traits. Reading and writing source files goes through `pkgmove_edit`.

use crate::ports::{DirectiveSource, SourceTree, WritePort};
use crate::settings::MigrateSettings;
use anyhow::Context;
use camino::Utf8Path;
use chrono::Utc;
use pkgmove_domain::{DirectiveBlock, DirectiveMap};
use pkgmove_edit::{
    EditResult, MigrateOptions, MigrationPlan, apply_migration, plan_migration, render_patch,
};
use pkgmove_types::report::{DirectiveSourceRef, MigrationReport, ToolInfo};
use tracing::{debug, info};

/// The merged directive map and the blocks that fed it, in merge order.
#[derive(Debug, Clone)]
pub struct DirectivesOutcome {
    pub map: DirectiveMap,
    pub sources: Vec<DirectiveSourceRef>,
}

/// Outcome of `run_migrate`.
#[derive(Debug, Clone)]
pub struct MigrateOutcome {
    pub plan: MigrationPlan,
    pub report: MigrationReport,
    pub patch: String,
}

/// Build the directive map: discovered blocks first, the settings' additional text last.
pub fn run_directives(
    settings: &MigrateSettings,
    source: &dyn DirectiveSource,
) -> EditResult<DirectivesOutcome> {
    let mut blocks = source.load_directives()?;
    if !settings.additional.trim().is_empty() {
        blocks.push(DirectiveBlock::additional(settings.additional.clone()));
    }

    let mut map = DirectiveMap::new();
    let mut sources = Vec::with_capacity(blocks.len());
    for block in &blocks {
        let count = map.merge_block(block)?;
        sources.push(DirectiveSourceRef {
            origin: block.origin.clone(),
            directives: count as u64,
        });
    }
    info!(blocks = blocks.len(), directives = map.len(), "directive map built");

    Ok(DirectivesOutcome { map, sources })
}

/// Run the migration. Returns the plan, report, and patch.
///
/// Every file is rewritten in memory first. Nothing is written unless `settings.dry_run` is
/// false and the whole plan succeeded.
pub fn run_migrate(
    settings: &MigrateSettings,
    directives: &dyn DirectiveSource,
    tree: &dyn SourceTree,
    tool: ToolInfo,
) -> EditResult<MigrateOutcome> {
    let DirectivesOutcome { map, sources } = run_directives(settings, directives)?;
    if map.is_empty() {
        debug!("no directives; every file will be left unchanged");
    }

    let files = tree.source_files()?;
    let plan = plan_migration(&settings.repo_root, &files, &map)?;
    let patch = render_patch(&plan);

    let opts = MigrateOptions {
        dry_run: settings.dry_run,
        backup_suffix: settings
            .backup_enabled
            .then(|| settings.backup_suffix.clone()),
    };
    let results = apply_migration(&settings.repo_root, &plan, &opts).context("apply migration")?;

    let mut report = MigrationReport::new(tool, settings.dry_run);
    report.sources = sources;
    report.summary.directives = map.len() as u64;
    report.summary.files_scanned = plan.files_scanned as u64;
    report.summary.files_changed = plan.changes.len() as u64;
    report.summary.files_written = if settings.dry_run {
        0
    } else {
        results.len() as u64
    };
    report.files = results;
    report.run.ended_at = Some(Utc::now());

    info!(
        scanned = report.summary.files_scanned,
        changed = report.summary.files_changed,
        written = report.summary.files_written,
        "migration finished"
    );

    Ok(MigrateOutcome {
        plan,
        report,
        patch,
    })
}

/// Serialize the report as pretty JSON to `path`.
pub fn write_report(
    report: &MigrationReport,
    path: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize report")?;
    writer.write_file(path, json.as_bytes())
}
