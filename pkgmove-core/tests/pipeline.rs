//! End-to-end pipeline runs over a temporary repository.

use camino::{Utf8Path, Utf8PathBuf};
use pkgmove_core::DirectiveBlock;
use pkgmove_core::adapters::{FsSourceTree, FsWritePort, InMemoryDirectiveSource};
use pkgmove_core::pipeline::{run_directives, run_migrate, write_report};
use pkgmove_core::settings::MigrateSettings;
use pkgmove_types::report::{FileStatus, ToolInfo};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const SOURCE: &str = "@file:Suppress(\"unused\")\npackage sample\nimport com.old.*\n\nfun sample() {\n}\n";
const MIGRATED: &str = "@file:Suppress(\"unused\")\npackage sample\nimport com.new.*\nimport com.new.stillExists\nimport com.old.*\n\nfun sample() {\n}\n";

fn repo() -> (TempDir, Utf8PathBuf) {
    let temp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
    let file = root.join("src/main/kotlin/Sample.kt");
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(&file, SOURCE).unwrap();
    (temp, root)
}

fn tool() -> ToolInfo {
    ToolInfo {
        name: "pkgmove".to_string(),
        version: Some("test".to_string()),
    }
}

fn settings(root: &Utf8Path, dry_run: bool) -> MigrateSettings {
    MigrateSettings {
        repo_root: root.to_path_buf(),
        additional: "REPLACE com.old.stillExists -> com.new.stillExists".to_string(),
        dry_run,
        ..MigrateSettings::default()
    }
}

fn tree(settings: &MigrateSettings) -> FsSourceTree {
    FsSourceTree {
        repo_root: settings.repo_root.clone(),
        dirs: settings.source_dirs.clone(),
        extensions: settings.extensions.clone(),
    }
}

fn library_directives() -> InMemoryDirectiveSource {
    InMemoryDirectiveSource::new(vec![DirectiveBlock::new(
        "dep/META-INF/dep.packagemove",
        "MOVE com.old.Test -> com.new.Test\nMOVE com.old.stillExists -> com.lib.stillExists",
    )])
}

#[test]
fn additional_block_is_merged_last() {
    let (_temp, root) = repo();
    let s = settings(&root, true);

    let out = run_directives(&s, &library_directives()).unwrap();
    assert_eq!(out.map.len(), 2);
    let origins: Vec<&str> = out.sources.iter().map(|s| s.origin.as_str()).collect();
    assert_eq!(origins, vec!["dep/META-INF/dep.packagemove", "<additional>"]);
    assert_eq!(out.sources[1].directives, 1);

    let winner = out
        .map
        .iter()
        .find(|e| e.directive.from.to_string() == "com.old.stillExists")
        .unwrap();
    assert_eq!(winner.origin, "<additional>");
    assert_eq!(winner.directive.to.to_string(), "com.new.stillExists");
}

#[test]
fn blank_additional_text_is_not_a_source() {
    let (_temp, root) = repo();
    let s = MigrateSettings {
        additional: "  \n".to_string(),
        ..settings(&root, true)
    };
    let out = run_directives(&s, &library_directives()).unwrap();
    assert_eq!(out.sources.len(), 1);
}

#[test]
fn dry_run_reports_patch_without_writing() {
    let (_temp, root) = repo();
    let s = settings(&root, true);

    let out = run_migrate(&s, &library_directives(), &tree(&s), tool()).unwrap();
    assert!(out.report.dry_run);
    assert_eq!(out.report.summary.files_scanned, 1);
    assert_eq!(out.report.summary.files_changed, 1);
    assert_eq!(out.report.summary.files_written, 0);
    assert_eq!(out.report.files[0].status, FileStatus::Pending);
    assert!(out.patch.contains("+import com.new.stillExists\n"));
    assert!(out.report.run.ended_at.is_some());

    let on_disk = fs::read_to_string(root.join("src/main/kotlin/Sample.kt")).unwrap();
    assert_eq!(on_disk, SOURCE);
}

#[test]
fn apply_rewrites_and_is_idempotent() {
    let (_temp, root) = repo();
    let s = settings(&root, false);

    let first = run_migrate(&s, &library_directives(), &tree(&s), tool()).unwrap();
    assert_eq!(first.report.summary.files_written, 1);
    assert_eq!(first.report.files[0].path, "src/main/kotlin/Sample.kt");
    assert_eq!(
        fs::read_to_string(root.join("src/main/kotlin/Sample.kt")).unwrap(),
        MIGRATED
    );

    let second = run_migrate(&s, &library_directives(), &tree(&s), tool()).unwrap();
    assert!(second.plan.is_empty());
    assert_eq!(second.patch, "");
    assert_eq!(second.report.summary.files_written, 0);
}

#[test]
fn bad_directive_is_a_parse_error() {
    let (_temp, root) = repo();
    let s = MigrateSettings {
        additional: "MOVE com.old.Test".to_string(),
        ..settings(&root, false)
    };
    let err = run_migrate(&s, &library_directives(), &tree(&s), tool()).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("<additional>:1"));

    let on_disk = fs::read_to_string(root.join("src/main/kotlin/Sample.kt")).unwrap();
    assert_eq!(on_disk, SOURCE);
}

#[test]
fn report_is_written_as_json() {
    let (_temp, root) = repo();
    let s = settings(&root, true);
    let out = run_migrate(&s, &library_directives(), &tree(&s), tool()).unwrap();

    let path = root.join("out/report.json");
    write_report(&out.report, &path, &FsWritePort).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["schema"], "pkgmove.report.v1");
    assert_eq!(json["summary"]["directives"], 2);
    assert_eq!(json["files"][0]["status"], "pending");
}
