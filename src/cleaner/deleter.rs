//! Sequential removal of found directories.
//!
//! Each directory is removed independently: a failure is recorded and the
//! batch moves on.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use super::scanner::FoundDirectory;
use super::stats::Stats;

/// Outcome for one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    pub path: PathBuf,
    pub success: bool,
    pub error: Option<String>,
}

/// Outcome of a whole batch, results in input order.
#[derive(Debug, Clone, Default)]
pub struct DeleteReport {
    pub results: Vec<DeleteResult>,
    pub deleted: usize,
    pub freed_bytes: u64,
}

impl DeleteReport {
    pub fn failures(&self) -> impl Iterator<Item = &DeleteResult> {
        self.results.iter().filter(|r| !r.success)
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

pub struct Deleter {
    stats: Arc<Stats>,
    dry_run: bool,
}

impl Deleter {
    pub fn new(stats: Arc<Stats>, dry_run: bool) -> Self {
        Self { stats, dry_run }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Remove one directory tree.
    pub fn delete(&self, dir: &FoundDirectory) -> DeleteResult {
        match self.remove(dir) {
            Ok(()) => {
                self.stats.record_deleted(dir.size);
                tracing::debug!("deleted {}", dir.path.display());
                DeleteResult {
                    path: dir.path.clone(),
                    success: true,
                    error: None,
                }
            }
            Err(e) => {
                self.stats.record_failed();
                tracing::warn!("failed to delete {}: {}", dir.path.display(), e);
                DeleteResult {
                    path: dir.path.clone(),
                    success: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Remove every directory in order. `on_progress(current, total, dir)` runs
    /// before each item, `current` starting at 1.
    pub fn delete_all<F>(&self, dirs: &[FoundDirectory], mut on_progress: F) -> DeleteReport
    where
        F: FnMut(usize, usize, &FoundDirectory),
    {
        let mut report = DeleteReport::default();

        for (i, dir) in dirs.iter().enumerate() {
            on_progress(i + 1, dirs.len(), dir);

            let result = self.delete(dir);
            if result.success {
                report.deleted += 1;
                report.freed_bytes += dir.size;
            }
            report.results.push(result);
        }

        report
    }

    fn remove(&self, dir: &FoundDirectory) -> io::Result<()> {
        let metadata = match fs::symlink_metadata(&dir.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("No such directory: {}", dir.path.display()),
                ));
            }
            Err(e) => return Err(e),
        };

        if self.dry_run {
            return Ok(());
        }

        // A symlinked target is unlinked, never followed.
        if metadata.file_type().is_symlink() {
            fs::remove_file(&dir.path)
        } else {
            fs::remove_dir_all(&dir.path)
        }
    }
}
