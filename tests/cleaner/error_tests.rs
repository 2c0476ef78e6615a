// Tests for error module

use depclean::cleaner::CleanError;
use std::error::Error;
use std::io;
use std::path::PathBuf;

#[test]
fn test_root_not_found_display() {
    let error = CleanError::RootNotFound {
        path: PathBuf::from("/no/such/dir"),
    };
    let message = format!("{}", error);
    assert!(message.contains("Directory not found"));
    assert!(message.contains("/no/such/dir"));
    assert!(message.contains("Suggestion"));
}

#[test]
fn test_not_a_directory_display() {
    let error = CleanError::NotADirectory {
        path: PathBuf::from("notes.txt"),
    };
    let message = format!("{}", error);
    assert!(message.contains("Not a directory"));
    assert!(message.contains("notes.txt"));
}

#[test]
fn test_invalid_arguments_display() {
    let error = CleanError::InvalidArguments {
        message: "nothing to look for".to_string(),
    };
    let message = format!("{}", error);
    assert!(message.contains("nothing to look for"));
    assert!(message.contains("--help"));
}

#[test]
fn test_from_io_error_not_found_with_path() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
    let error = CleanError::from_io_error(io_err, "scanning directory", Some(PathBuf::from("/x")));
    assert!(matches!(error, CleanError::RootNotFound { .. }));
}

#[test]
fn test_from_io_error_permission_denied() {
    let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
    let error = CleanError::from_io_error(io_err, "scanning directory", Some(PathBuf::from("/x")));
    let message = format!("{}", error);
    assert!(matches!(error, CleanError::PermissionDenied { .. }));
    assert!(message.contains("scanning directory"));
}

#[test]
fn test_io_error_keeps_source() {
    let io_err = io::Error::new(io::ErrorKind::Other, "disk on fire");
    let error = CleanError::from_io_error(io_err, "scanning directory", None);
    assert!(matches!(error, CleanError::IoError { .. }));
    assert!(error.source().is_some());
    assert!(format!("{}", error).contains("disk on fire"));
}

#[test]
fn test_from_plain_io_error() {
    let error: CleanError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
    // No path, so it cannot become RootNotFound
    assert!(matches!(error, CleanError::IoError { path: None, .. }));
}
