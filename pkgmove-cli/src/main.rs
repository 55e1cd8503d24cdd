mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::{CliOverrides, ConfigMerger, MergedConfig};
use fs_err as fs;
use pkgmove_core::EditError;
use pkgmove_core::adapters::{FsDirectiveSource, FsSourceTree, FsWritePort};
use pkgmove_core::pipeline::{run_directives, run_migrate, write_report};
use pkgmove_core::settings::MigrateSettings;
use pkgmove_types::Directive;
use pkgmove_types::report::ToolInfo;
use serde::Serialize;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "pkgmove",
    version,
    about = "Rewrites import blocks after packages move between libraries."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rewrite imports against the merged directives (default: dry-run).
    Migrate(MigrateArgs),
    /// Print the merged directive map and which source won each entry.
    Directives(DirectivesArgs),
}

/// Options shared by every command that builds the directive map.
#[derive(Debug, clap::Args)]
struct DirectiveArgs {
    /// Repository root (default: current directory).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Dependency root searched for META-INF/**/*.packagemove (repeatable).
    #[arg(long = "directive-root")]
    directive_roots: Vec<Utf8PathBuf>,

    /// Additional directive text, merged last.
    #[arg(long)]
    additional: Option<String>,

    /// File with additional directive text, merged before --additional.
    #[arg(long)]
    additional_file: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct MigrateArgs {
    #[command(flatten)]
    directives: DirectiveArgs,

    /// Source directory under the repo root (repeatable).
    #[arg(long = "source-dir")]
    source_dirs: Vec<String>,

    /// Source file extension (repeatable).
    #[arg(long = "ext")]
    extensions: Vec<String>,

    /// Write changes to disk. If omitted, prints the patch and writes nothing.
    #[arg(long, default_value_t = false)]
    apply: bool,

    /// Keep a copy of every rewritten file.
    #[arg(long, default_value_t = false)]
    backup: bool,

    /// Write a JSON migration report to this path.
    #[arg(long)]
    report: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct DirectivesArgs {
    #[command(flatten)]
    directives: DirectiveArgs,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        let code = e
            .downcast_ref::<EditError>()
            .map(EditError::exit_code)
            .unwrap_or(1);
        return ExitCode::from(code);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Migrate(args) => cmd_migrate(args),
        Command::Directives(args) => cmd_directives(args),
    }
}

fn cmd_migrate(args: MigrateArgs) -> anyhow::Result<()> {
    let overrides = CliOverrides {
        additional: additional_blocks(&args.directives)?,
        source_dirs: args.source_dirs,
        extensions: args.extensions,
        directive_roots: args.directives.directive_roots,
        backup: args.backup,
    };
    let repo_root = args.directives.repo_root;
    let merged = merged_config(&repo_root, &overrides)?;
    let settings = settings_from(repo_root, merged, !args.apply);

    let directives = FsDirectiveSource::new(settings.resolved_directive_roots());
    let tree = FsSourceTree {
        repo_root: settings.repo_root.clone(),
        dirs: settings.source_dirs.clone(),
        extensions: settings.extensions.clone(),
    };

    let outcome = run_migrate(&settings, &directives, &tree, tool_info())?;

    if let Some(path) = &args.report {
        write_report(&outcome.report, path, &FsWritePort)?;
        info!("wrote report to {}", path);
    }

    let summary = &outcome.report.summary;
    if settings.dry_run {
        print!("{}", outcome.patch);
        info!(
            "dry-run: {} of {} files would change",
            summary.files_changed, summary.files_scanned
        );
    } else {
        println!(
            "pkgmove: rewrote {} of {} files",
            summary.files_written, summary.files_scanned
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct DirectiveEntry<'a> {
    #[serde(flatten)]
    directive: &'a Directive,
    origin: &'a str,
}

fn cmd_directives(args: DirectivesArgs) -> anyhow::Result<()> {
    let overrides = CliOverrides {
        additional: additional_blocks(&args.directives)?,
        directive_roots: args.directives.directive_roots,
        ..CliOverrides::default()
    };
    let repo_root = args.directives.repo_root;
    let merged = merged_config(&repo_root, &overrides)?;
    let settings = settings_from(repo_root, merged, true);

    let source = FsDirectiveSource::new(settings.resolved_directive_roots());
    let outcome = run_directives(&settings, &source)?;

    match args.format {
        OutputFormat::Text => {
            for entry in outcome.map.iter() {
                println!("{}  # {}", entry.directive, entry.origin);
            }
        }
        OutputFormat::Json => {
            let entries: Vec<DirectiveEntry<'_>> = outcome
                .map
                .iter()
                .map(|entry| DirectiveEntry {
                    directive: &entry.directive,
                    origin: &entry.origin,
                })
                .collect();
            let json = serde_json::to_string_pretty(&entries).context("serialize directives")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn additional_blocks(args: &DirectiveArgs) -> anyhow::Result<Vec<String>> {
    let mut blocks = Vec::new();
    if let Some(path) = &args.additional_file {
        let text = fs::read_to_string(path).with_context(|| format!("read {}", path))?;
        blocks.push(text);
    }
    if let Some(text) = &args.additional {
        blocks.push(text.clone());
    }
    Ok(blocks)
}

fn merged_config(repo_root: &Utf8Path, overrides: &CliOverrides) -> anyhow::Result<MergedConfig> {
    let file_config = config::load_or_default(repo_root).context("load pkgmove.toml config")?;
    let merged = ConfigMerger::new(file_config).merge(overrides);
    debug!(
        "merged config: source_dirs={:?}, extensions={:?}, directive_roots={:?}, backups={}",
        merged.source_dirs, merged.extensions, merged.directive_roots, merged.backups.enabled
    );
    Ok(merged)
}

fn settings_from(repo_root: Utf8PathBuf, merged: MergedConfig, dry_run: bool) -> MigrateSettings {
    MigrateSettings {
        repo_root,
        additional: merged.additional,
        source_dirs: merged.source_dirs,
        extensions: merged.extensions,
        directive_roots: merged.directive_roots,
        dry_run,
        backup_enabled: merged.backups.enabled,
        backup_suffix: merged.backups.suffix,
    }
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "pkgmove".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
