//! Configuration for a migration run.
//!
//! Everything the migrator needs is passed in explicitly. The CLI fills a
//! `MigrationConfig` from its flags; library callers and tests build one from
//! `MigrationConfig::default()` and override fields.

use std::path::PathBuf;

use glob::Pattern;

use crate::error::ConfigError;

/// Directory scanned when no root is given.
pub const DEFAULT_ROOT: &str = "frontend/app/api";

/// File name that identifies a route handler.
pub const DEFAULT_TARGET_FILE_NAME: &str = "route.ts";

/// Options for a single migration run.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct MigrationConfig {
    /// Directory searched recursively for route files.
    pub root: PathBuf,
    /// Exact file name of the files to migrate (default: `route.ts`).
    pub target_file_name: String,
    /// Run every step but never write to disk.
    pub dry_run: bool,
    /// Exclude patterns (glob format), matched against the full path and the file name.
    pub exclude: Vec<String>,
    /// Maximum file size in bytes (default: 10 MB). Larger files are reported as errors.
    pub max_file_size: u64,
    /// Whether to follow symbolic links while walking `root`.
    ///
    /// **Defaults to `false`** so a stray link cannot pull files from outside
    /// the tree into the rewrite.
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            target_file_name: DEFAULT_TARGET_FILE_NAME.to_owned(),
            dry_run: false,
            exclude: Vec::new(),
            max_file_size: 10_485_760,
            follow_links: false,
            max_depth: 64,
        }
    }
}

impl MigrationConfig {
    /// Check the configuration before any file is touched.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the root is missing or not a directory, the
    /// target file name is empty, or an exclude pattern is not a valid glob.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_file_name.trim().is_empty() {
            return Err(ConfigError::EmptyTargetFileName);
        }
        if !self.root.exists() {
            return Err(ConfigError::RootNotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(ConfigError::RootNotDirectory(self.root.clone()));
        }
        self.exclude_patterns().map(|_| ())
    }

    /// Compile the exclude globs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidExcludePattern`] for the first pattern that
    /// does not parse.
    pub fn exclude_patterns(&self) -> Result<Vec<Pattern>, ConfigError> {
        self.exclude
            .iter()
            .map(|pat| {
                Pattern::new(pat).map_err(|e| ConfigError::InvalidExcludePattern {
                    pattern: pat.clone(),
                    cause: e.to_string(),
                })
            })
            .collect()
    }
}
