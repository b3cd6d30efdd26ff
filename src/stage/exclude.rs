//! Exclusion rules for the staging mirror.

use crate::config::StageConfig;
use std::collections::BTreeSet;

/// Directory names and file suffixes that never reach the staging directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRules {
    dirs: BTreeSet<String>,
    suffixes: Vec<String>,
}

impl ExclusionRules {
    pub fn new<D, S>(dirs: D, suffixes: S) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &StageConfig) -> Self {
        Self::new(
            config.exclude_dirs.iter().cloned(),
            config.exclude_suffixes.iter().cloned(),
        )
    }

    /// Also prune directories with this name
    #[must_use]
    pub fn with_dir(mut self, name: impl Into<String>) -> Self {
        self.dirs.insert(name.into());
        self
    }

    /// Directory names are matched exactly, at any depth
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.dirs.contains(name)
    }

    /// File names are matched by case-sensitive suffix
    pub fn is_excluded_file(&self, name: &str) -> bool {
        self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self::new(
            [".git", ".temp"],
            [
                ".gitignore",
                ".py",
                ".bat",
                ".code-workspace",
                ".wbn",
                ".aux",
                ".log",
                ".out",
                ".gz",
            ],
        )
    }
}
