// Size accumulation for matched directories
// Exhaustive walk: every subdirectory is entered, unreadable parts count as zero

use std::path::Path;
use walkdir::WalkDir;

use super::scanner::Diagnostic;

/// Total size in bytes of all regular files under `path`.
pub fn dir_size(path: &Path) -> u64 {
    dir_size_with(path, &|_| {})
}

/// Same as [`dir_size`], reporting every skipped subtree or file to `on_skip`.
///
/// Symlinks are neither followed nor counted.
pub fn dir_size_with(path: &Path, on_skip: &dyn Fn(&Diagnostic)) -> u64 {
    let mut total = 0u64;

    for entry in WalkDir::new(path).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!("size: skipping {}", err);
                on_skip(&Diagnostic::from_walk_error(&err, path));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => total += metadata.len(),
            Err(err) => {
                tracing::debug!("size: cannot stat {}: {}", entry.path().display(), err);
                on_skip(&Diagnostic::from_walk_error(&err, entry.path()));
            }
        }
    }

    total
}
