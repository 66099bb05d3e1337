//! Error types for the migrator.
//!
//! Two layers: [`ConfigError`] aborts a run before any file is touched, while
//! [`FileError`] is data recorded against a single file and never stops the run.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Invalid run configuration. The only failures that are fatal to a run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The scan root does not exist.
    #[error("Root path does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The scan root exists but is not a directory.
    #[error("Root path is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    /// The target file name is empty.
    #[error("Target file name must not be empty")]
    EmptyTargetFileName,

    /// An exclude glob could not be parsed.
    #[error("Invalid exclude glob pattern '{pattern}': {cause}")]
    InvalidExcludePattern {
        /// The pattern as given.
        pattern: String,
        /// Parser message.
        cause: String,
    },
}

/// The kind of failure that stopped a single file from being migrated.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum FileErrorKind {
    /// An I/O error occurred while opening or reading the file.
    IoError,
    /// The file exceeded the configured maximum size limit.
    FileTooLarge,
    /// The file content is not valid UTF-8.
    InvalidEncoding,
    /// Writing the rewritten content back failed.
    WriteError,
    /// A directory traversal error (permission denied, loop detected, etc.).
    WalkError,
    /// The resolved path is outside the scan root (symlink escape).
    OutsideRoot,
}

impl std::fmt::Display for FileErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError => write!(f, "io error"),
            Self::FileTooLarge => write!(f, "file too large"),
            Self::InvalidEncoding => write!(f, "invalid encoding"),
            Self::WriteError => write!(f, "write error"),
            Self::WalkError => write!(f, "walk error"),
            Self::OutsideRoot => write!(f, "outside root"),
        }
    }
}

/// A per-file failure. Counted as an error; the run carries on.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct FileError {
    /// The file (or directory, for walk errors) that failed.
    pub file: PathBuf,
    /// The kind of failure.
    pub kind: FileErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
}

impl FileError {
    /// Create a new per-file error.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, kind: FileErrorKind, message: String) -> Self {
        Self {
            file: file.into(),
            kind,
            message,
        }
    }

    /// Format the error for human-readable output.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("{}: [{}] {}", self.file.display(), self.kind, self.message)
    }
}
