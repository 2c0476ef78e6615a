//! Directory tree scanner.
//!
//! Walks the tree once, depth-first and pre-order, in name order.
//! Version control directories are ignored, target directories are
//! measured and pruned, everything else is descended into. Unreadable
//! subtrees contribute nothing and never fail the scan.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use walkdir::WalkDir;

use super::config::Config;
use super::error::CleanError;
use super::patterns::{Classification, PatternMatcher};
use super::size::dir_size_with;

/// One matched target directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundDirectory {
    /// Absolute path.
    #[serde(serialize_with = "serialize_path")]
    pub path: PathBuf,
    /// Base name.
    pub name: String,
    /// Path relative to the scan root, prefixed with `./`.
    pub relative_path: String,
    /// Size in bytes.
    pub size: u64,
}

impl FoundDirectory {
    pub fn new(root: &Path, path: PathBuf, name: String, size: u64) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(&path);
        let relative_path = format!("./{}", relative.display());
        Self {
            path,
            name,
            relative_path,
            size,
        }
    }
}

// Paths that are not valid UTF-8 are written lossily instead of failing the whole document
fn serialize_path<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&path.to_string_lossy())
}

/// Statistics collected during a scan
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanStats {
    pub dirs_visited: usize,
    pub unreadable: usize,
    pub loops_skipped: usize,
    #[serde(serialize_with = "serialize_duration")]
    pub duration: Duration,
}

// Helper function to serialize Duration as seconds
fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Complete result of one scan, sorted by size descending.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanResult {
    pub directories: Vec<FoundDirectory>,
    pub total_size: u64,
    pub stats: ScanStats,
}

impl ScanResult {
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }
}

/// Why a subtree was left out of the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Listing or stat failed; the subtree contributes nothing.
    Unreadable { message: String },
    /// Directory already visited or measured through another path (symlink loop).
    SymlinkLoop,
}

/// A skipped subtree, delivered to the optional diagnostic callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn unreadable(path: PathBuf, err: &io::Error) -> Self {
        Self {
            path,
            kind: DiagnosticKind::Unreadable {
                message: err.to_string(),
            },
        }
    }

    pub fn symlink_loop(path: PathBuf) -> Self {
        Self {
            path,
            kind: DiagnosticKind::SymlinkLoop,
        }
    }

    /// Converts a walk failure; `fallback` is used when the error carries no path.
    pub fn from_walk_error(err: &walkdir::Error, fallback: &Path) -> Self {
        let path = err.path().unwrap_or(fallback).to_path_buf();
        if err.loop_ancestor().is_some() {
            return Self::symlink_loop(path);
        }
        let message = match err.io_error() {
            Some(io_err) => io_err.to_string(),
            None => err.to_string(),
        };
        Self {
            path,
            kind: DiagnosticKind::Unreadable { message },
        }
    }
}

/// Progress information for scan operations
#[derive(Debug, Clone)]
pub struct ScanProgress {
    pub dirs_visited: usize,
    pub found: usize,
    pub current_dir: PathBuf,
}

/// Type alias for progress callback function
pub type ProgressCallback = Box<dyn Fn(&ScanProgress) + Send + Sync>;

/// Type alias for diagnostic callback function
pub type DiagnosticCallback = Box<dyn Fn(&Diagnostic) + Send + Sync>;

/// Scanner for target directories
pub struct Scanner {
    matcher: PatternMatcher,
    progress_callback: Option<Arc<ProgressCallback>>,
    diagnostic_callback: Option<Arc<DiagnosticCallback>>,
}

impl Scanner {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            matcher: PatternMatcher::new(config),
            progress_callback: None,
            diagnostic_callback: None,
        }
    }

    /// Called once per directory entered.
    pub fn with_progress_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ScanProgress) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Opt in to a report of every skipped subtree. The scan result is unchanged.
    pub fn with_diagnostics<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Diagnostic) + Send + Sync + 'static,
    {
        self.diagnostic_callback = Some(Arc::new(Box::new(callback)));
        self
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    /// Scan `root` for target directories.
    ///
    /// # Errors
    /// Only if `root` does not exist or is not a directory. A root that exists
    /// but cannot be accessed or listed yields an empty result.
    pub fn scan(&self, root: &Path) -> Result<ScanResult, CleanError> {
        let start_time = Instant::now();
        let mut stats = ScanStats::default();

        let metadata = match fs::metadata(root) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                tracing::warn!("cannot access {}: {}", root.display(), e);
                stats.unreadable += 1;
                self.emit(&Diagnostic::unreadable(root.to_path_buf(), &e));
                stats.duration = start_time.elapsed();
                return Ok(ScanResult {
                    stats,
                    ..ScanResult::default()
                });
            }
            Err(e) => {
                return Err(CleanError::from_io_error(
                    e,
                    "scanning directory",
                    Some(root.to_path_buf()),
                ))
            }
        };
        if !metadata.is_dir() {
            return Err(CleanError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        let config = self.matcher.config();
        let follow = config.follow_symlinks;
        let enters = |depth: usize| config.max_depth.map_or(true, |max| depth < max);

        let mut found: Vec<FoundDirectory> = Vec::new();
        // Canonical path of each entry in `found`; only kept while following symlinks.
        let mut measured: Vec<PathBuf> = Vec::new();

        let mut walker = WalkDir::new(root).follow_links(follow).sort_by_file_name();
        if let Some(depth) = config.max_depth {
            walker = walker.max_depth(depth);
        }

        let matcher = &self.matcher;
        let mut it = walker.into_iter().filter_entry(|entry| {
            entry.depth() == 0
                || (entry.file_type().is_dir()
                    && !matcher.is_skipped(&entry.file_name().to_string_lossy()))
        });

        while let Some(entry) = it.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    self.record_walk_error(&err, root, &mut stats);
                    continue;
                }
            };

            let depth = entry.depth();
            let classification = if depth == 0 {
                Classification::Descend
            } else {
                matcher.classify(&entry.file_name().to_string_lossy())
            };

            let canonical = if follow && depth > 0 {
                match entry.path().canonicalize() {
                    Ok(canonical) => Some(canonical),
                    Err(e) => {
                        tracing::debug!("cannot resolve {}: {}", entry.path().display(), e);
                        stats.unreadable += 1;
                        self.emit(&Diagnostic::unreadable(entry.path().to_path_buf(), &e));
                        it.skip_current_dir();
                        continue;
                    }
                }
            } else {
                None
            };

            // Reached again through a symlink into something already measured.
            if let Some(ref canonical) = canonical {
                if measured.iter().any(|m| canonical.starts_with(m)) {
                    self.record_revisit(entry.path(), &mut stats);
                    it.skip_current_dir();
                    continue;
                }
            }

            match classification {
                Classification::Target => {
                    it.skip_current_dir();

                    if let Some(canonical) = canonical {
                        // An earlier match reached through a symlink may lie inside this one.
                        let mut i = 0;
                        while i < measured.len() {
                            if measured[i].starts_with(&canonical) {
                                measured.remove(i);
                                let nested = found.remove(i);
                                self.record_revisit(&nested.path, &mut stats);
                            } else {
                                i += 1;
                            }
                        }
                        measured.push(canonical);
                    }

                    let size = dir_size_with(entry.path(), &|d| self.emit(d));
                    tracing::debug!("found {} ({} bytes)", entry.path().display(), size);
                    let name = entry.file_name().to_string_lossy().into_owned();
                    found.push(FoundDirectory::new(root, entry.into_path(), name, size));
                }
                Classification::Descend => {
                    if enters(depth) {
                        stats.dirs_visited += 1;
                        if let Some(ref callback) = self.progress_callback {
                            callback(&ScanProgress {
                                dirs_visited: stats.dirs_visited,
                                found: found.len(),
                                current_dir: entry.path().to_path_buf(),
                            });
                        }
                    }
                }
                Classification::Skip => it.skip_current_dir(),
            }
        }

        found.sort_by(|a, b| b.size.cmp(&a.size));
        let total_size = found.iter().map(|d| d.size).sum();
        stats.duration = start_time.elapsed();

        tracing::debug!(
            "scan of {} done: {} directories visited, {} targets, {} bytes",
            root.display(),
            stats.dirs_visited,
            found.len(),
            total_size
        );

        Ok(ScanResult {
            directories: found,
            total_size,
            stats,
        })
    }

    fn record_walk_error(&self, err: &walkdir::Error, root: &Path, stats: &mut ScanStats) {
        let diagnostic = Diagnostic::from_walk_error(err, root);
        match diagnostic.kind {
            DiagnosticKind::SymlinkLoop => {
                tracing::warn!("skipping {}: symlink loop", diagnostic.path.display());
                stats.loops_skipped += 1;
            }
            DiagnosticKind::Unreadable { .. } => {
                tracing::debug!("skipping unreadable {}", err);
                stats.unreadable += 1;
            }
        }
        self.emit(&diagnostic);
    }

    fn record_revisit(&self, path: &Path, stats: &mut ScanStats) {
        tracing::warn!("skipping {}: already measured through another path", path.display());
        stats.loops_skipped += 1;
        self.emit(&Diagnostic::symlink_loop(path.to_path_buf()));
    }

    fn emit(&self, diagnostic: &Diagnostic) {
        if let Some(ref callback) = self.diagnostic_callback {
            callback(diagnostic);
        }
    }
}

/// Scan `root` with the default list narrowed by `only` and reduced by `exclude`.
pub fn scan(root: &Path, only: &[String], exclude: &[String]) -> Result<ScanResult, CleanError> {
    let config = Config::new()
        .with_only(only.iter().cloned())
        .with_exclude(exclude.iter().cloned());
    Scanner::new(Arc::new(config)).scan(root)
}
