// Error handling for the cleaner
// Only fatal conditions live here; traversal failures are absorbed by the scanner

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for scan and clean operations
/// Carries the offending path and a suggestion for the user
#[derive(Debug)]
pub enum CleanError {
    /// Scan root problems (fatal, abort before any deletion)
    RootNotFound { path: PathBuf },
    NotADirectory { path: PathBuf },
    PermissionDenied { path: PathBuf, operation: String },
    IoError { path: Option<PathBuf>, operation: String, source: io::Error },

    /// CLI errors
    InvalidArguments { message: String },
}

impl fmt::Display for CleanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CleanError::RootNotFound { path } => {
                writeln!(f, "Directory not found: {}", path.display())?;
                write!(f, "Suggestion: Check that the directory path is correct and the directory exists")
            }
            CleanError::NotADirectory { path } => {
                writeln!(f, "Not a directory: {}", path.display())?;
                write!(f, "Suggestion: Pass the directory that contains your projects, not a file")
            }
            CleanError::PermissionDenied { path, operation } => {
                writeln!(f, "Permission denied while {}: {}", operation, path.display())?;
                write!(f, "Suggestion: Check directory permissions or run with appropriate privileges")
            }
            CleanError::IoError { path, operation, source } => {
                if let Some(p) = path {
                    writeln!(f, "I/O error while {} {}: {}", operation, p.display(), source)?;
                } else {
                    writeln!(f, "I/O error while {}: {}", operation, source)?;
                }
                write!(f, "Suggestion: Check directory permissions")
            }
            CleanError::InvalidArguments { message } => {
                writeln!(f, "Invalid arguments: {}", message)?;
                write!(f, "Suggestion: Run with --help to see usage information")
            }
        }
    }
}

impl std::error::Error for CleanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CleanError::IoError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl CleanError {
    /// Map an io::Error raised while inspecting `path` to the most specific variant
    pub fn from_io_error(err: io::Error, operation: &str, path: Option<PathBuf>) -> Self {
        match (err.kind(), path) {
            (io::ErrorKind::NotFound, Some(p)) => CleanError::RootNotFound { path: p },
            (io::ErrorKind::PermissionDenied, Some(p)) => CleanError::PermissionDenied {
                path: p,
                operation: operation.to_string(),
            },
            (_, path) => CleanError::IoError {
                path,
                operation: operation.to_string(),
                source: err,
            },
        }
    }
}

impl From<io::Error> for CleanError {
    fn from(err: io::Error) -> Self {
        CleanError::from_io_error(err, "unknown operation", None)
    }
}
