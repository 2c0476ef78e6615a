//! Directory name classification.

use std::collections::HashSet;
use std::sync::Arc;

use super::config::{Config, EGG_INFO_SUFFIX, SKIP_DIRECTORIES};

/// What the scanner should do with a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Version control metadata: ignore entirely.
    Skip,
    /// Regenerable artifact: measure, report, do not descend.
    Target,
    /// Anything else: descend.
    Descend,
}

/// Returns true if `name` is a target under `targets`.
///
/// Exact membership, plus the `*.egg-info` suffix rule which only applies
/// while the literal `.egg-info` marker is itself in `targets`.
pub fn is_target(name: &str, targets: &HashSet<String>) -> bool {
    if targets.contains(name) {
        return true;
    }
    name.ends_with(EGG_INFO_SUFFIX) && targets.contains(EGG_INFO_SUFFIX)
}

/// Classifier bound to one effective target set.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    config: Arc<Config>,
    targets: HashSet<String>,
}

impl PatternMatcher {
    pub fn new(config: Arc<Config>) -> Self {
        let targets = config.effective_targets().into_iter().collect();
        Self { config, targets }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn targets(&self) -> &HashSet<String> {
        &self.targets
    }

    pub fn is_skipped(&self, name: &str) -> bool {
        SKIP_DIRECTORIES.contains(&name)
    }

    pub fn is_target(&self, name: &str) -> bool {
        is_target(name, &self.targets)
    }

    /// Skip is checked before target matching.
    pub fn classify(&self, name: &str) -> Classification {
        if self.is_skipped(name) {
            Classification::Skip
        } else if self.is_target(name) {
            Classification::Target
        } else {
            Classification::Descend
        }
    }
}
