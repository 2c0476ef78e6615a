// Tests for the deleter, driven by real scan results

use depclean::cleaner::{scan, Deleter, Stats};
use depclean::output::delete_progress_message;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

use super::common::write_file;

#[test]
fn test_scan_then_delete_everything() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "web/node_modules/a.js", 200);
    write_file(tmp.path(), "py/__pycache__/m.pyc", 50);
    write_file(tmp.path(), "web/src/index.js", 10);

    let result = scan(tmp.path(), &[], &[]).unwrap();
    let stats = Arc::new(Stats::new());
    let report = Deleter::new(Arc::clone(&stats), false).delete_all(&result.directories, |_, _, _| {});

    assert_eq!(report.deleted, 2);
    assert_eq!(report.freed_bytes, 250);
    assert!(!report.has_failures());
    assert!(!tmp.path().join("web/node_modules").exists());
    assert!(!tmp.path().join("py/__pycache__").exists());
    assert!(tmp.path().join("web/src/index.js").exists());
    assert_eq!(stats.deleted(), 2);
    assert_eq!(stats.bytes(), 250);

    assert!(scan(tmp.path(), &[], &[]).unwrap().is_empty());
}

#[test]
fn test_missing_path_fails_alone() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "a/node_modules/x", 300);
    write_file(tmp.path(), "b/dist/x", 200);
    write_file(tmp.path(), "c/target/x", 100);

    let result = scan(tmp.path(), &[], &[]).unwrap();
    assert_eq!(result.len(), 3);

    // Vanishes between scan and delete
    fs::remove_dir_all(tmp.path().join("b/dist")).unwrap();

    let stats = Arc::new(Stats::new());
    let report = Deleter::new(Arc::clone(&stats), false).delete_all(&result.directories, |_, _, _| {});

    assert_eq!(report.results.len(), 3);
    assert_eq!(report.deleted, 2);
    assert_eq!(report.freed_bytes, 400);
    assert_eq!(stats.failed(), 1);

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path, tmp.path().join("b/dist"));
    let message = failures[0].error.as_deref().unwrap();
    assert!(message.contains("No such directory"));
    assert!(message.contains("dist"));

    assert!(report.results[0].success);
    assert!(report.results[2].success);
    assert!(!tmp.path().join("a/node_modules").exists());
    assert!(!tmp.path().join("c/target").exists());
}

#[test]
fn test_progress_sees_running_totals() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "a/node_modules/x", 2048);
    write_file(tmp.path(), "b/dist/x", 10);

    let result = scan(tmp.path(), &[], &[]).unwrap();
    let deleter = Deleter::new(Arc::new(Stats::new()), false);

    let mut messages = Vec::new();
    deleter.delete_all(&result.directories, |_, _, dir| {
        messages.push(delete_progress_message(dir, deleter.stats()));
    });

    assert_eq!(
        messages,
        vec![
            format!("Deleting {} (0 B freed)", result.directories[0].relative_path),
            format!("Deleting {} (2.0 KB freed)", result.directories[1].relative_path),
        ]
    );
    assert_eq!(deleter.stats().bytes(), 2058);
}

#[cfg(unix)]
#[test]
fn test_symlinked_target_is_unlinked_not_followed() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "keep/data.bin", 10);
    std::os::unix::fs::symlink(tmp.path().join("keep"), tmp.path().join("dist")).unwrap();

    let found = depclean::cleaner::FoundDirectory::new(
        tmp.path(),
        tmp.path().join("dist"),
        "dist".to_string(),
        10,
    );
    let result = Deleter::new(Arc::new(Stats::new()), false).delete(&found);

    assert!(result.success);
    assert!(fs::symlink_metadata(tmp.path().join("dist")).is_err());
    assert!(tmp.path().join("keep/data.bin").exists());
}
