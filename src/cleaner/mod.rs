//! Cleaner module - finds and removes regenerable dependency/build/cache folders
//!
//! This module provides scanning and deletion of common development
//! directories like node_modules, venv, target, __pycache__, etc.

pub mod config;
pub mod deleter;
pub mod error;
pub mod patterns;
pub mod scanner;
pub mod size;
pub mod stats;

pub use config::{Config, DEFAULT_TARGETS, SKIP_DIRECTORIES};
pub use deleter::{DeleteReport, DeleteResult, Deleter};
pub use error::CleanError;
pub use patterns::{is_target, Classification, PatternMatcher};
pub use scanner::{scan, Diagnostic, DiagnosticKind, FoundDirectory, ScanProgress, ScanResult, ScanStats, Scanner};
pub use size::dir_size;
pub use stats::Stats;
