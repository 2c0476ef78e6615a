//! Target configuration for the cleaner.
//!
//! [`DEFAULT_TARGETS`] is the single table of directory names considered
//! regenerable. The CLI help text and the [`PatternMatcher`](super::PatternMatcher)
//! both read it.

/// Directory names that are regenerable artifacts.
pub const DEFAULT_TARGETS: &[&str] = &[
    // JavaScript/Node.js
    "node_modules",
    ".next",
    "dist",
    "build",
    ".parcel-cache",
    ".turbo",
    // Python
    "venv",
    ".venv",
    "env",
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    EGG_INFO_SUFFIX,
    // Java/Kotlin/Rust
    "target",
    ".gradle",
    // Go/Ruby/PHP
    "vendor",
    // .NET
    "bin",
    "obj",
    "packages",
    // iOS/macOS
    "Pods",
    "DerivedData",
];

/// Version control metadata. Never descended into, never reported.
pub const SKIP_DIRECTORIES: &[&str] = &[".git", ".svn", ".hg"];

/// Marker entry enabling the `*.egg-info` suffix rule.
pub const EGG_INFO_SUFFIX: &str = ".egg-info";

/// Scan configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Replaces the default target list when non-empty.
    pub only: Vec<String>,
    /// Removed from whichever list is active.
    pub exclude: Vec<String>,
    /// Descend through symlinked directories (with cycle detection).
    pub follow_symlinks: bool,
    /// Maximum descent depth below the root. Children of the root are depth 1.
    pub max_depth: Option<usize>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_only<I, S>(mut self, only: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = only.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclude<I, S>(mut self, exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = exclude.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The target names actually used for a scan, in order, without duplicates.
    ///
    /// `only` replaces the defaults when non-empty; `exclude` is subtracted
    /// afterwards, so it can also remove names given in `only`.
    pub fn effective_targets(&self) -> Vec<String> {
        let base: Vec<&str> = if self.only.is_empty() {
            DEFAULT_TARGETS.to_vec()
        } else {
            self.only.iter().map(String::as_str).collect()
        };

        let mut targets: Vec<String> = Vec::with_capacity(base.len());
        for name in base {
            if self.exclude.iter().any(|e| e == name) {
                continue;
            }
            if !targets.iter().any(|t| t == name) {
                targets.push(name.to_string());
            }
        }
        targets
    }
}

/// Split a comma-separated CLI list, trimming items and dropping empty ones.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
