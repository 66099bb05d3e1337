//! Migration report types.

use std::path::PathBuf;

use serde::Serialize;

use crate::eligibility::SkipReason;
use crate::error::FileError;

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
#[non_exhaustive]
pub enum FileOutcome {
    /// The file was rewritten (or would have been, in a dry run).
    Updated {
        /// The rewritten file calls the helper but has no import for it.
        missing_import: bool,
    },
    /// The file was left untouched.
    Skipped {
        /// Why the file was left alone.
        reason: SkipReason,
    },
    /// The file could not be read, walked, or written.
    Errored {
        /// The failure.
        error: FileError,
    },
}

impl std::fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Updated { .. } => write!(f, "Updated"),
            Self::Skipped { reason } => write!(f, "{reason}"),
            Self::Errored { error } => write!(f, "Error: {} ({})", error.message, error.kind),
        }
    }
}

/// Outcome for one file, in processing order.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct FileReport {
    /// Path as discovered under the scan root.
    pub path: PathBuf,
    /// Shorter path used for display.
    pub display_path: PathBuf,
    /// What happened.
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Result of a migration run.
///
/// Every processed file increments exactly one of `updated`, `skipped`, or
/// `errored`, so the three always sum to `files.len()`.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct MigrationReport {
    /// Directory that was scanned.
    pub root: PathBuf,
    /// Whether writes were suppressed.
    pub dry_run: bool,
    /// Number of route files found by discovery.
    pub discovered: usize,
    /// Files rewritten (or that would be, in a dry run).
    pub updated: usize,
    /// Files left untouched.
    pub skipped: usize,
    /// Files that failed.
    pub errored: usize,
    /// Per-file outcomes, in processing order.
    pub files: Vec<FileReport>,
}

impl MigrationReport {
    /// Create an empty report.
    #[must_use]
    pub fn new(root: PathBuf, dry_run: bool) -> Self {
        Self {
            root,
            dry_run,
            discovered: 0,
            updated: 0,
            skipped: 0,
            errored: 0,
            files: Vec::new(),
        }
    }

    /// Record one file and bump the matching counter.
    pub fn record(&mut self, file: FileReport) {
        match file.outcome {
            FileOutcome::Updated { .. } => self.updated += 1,
            FileOutcome::Skipped { .. } => self.skipped += 1,
            FileOutcome::Errored { .. } => self.errored += 1,
        }
        self.files.push(file);
    }

    /// Total number of files with an outcome.
    #[must_use]
    pub fn files_processed(&self) -> usize {
        self.updated + self.skipped + self.errored
    }

    /// Updated files that still need the helper import added by hand.
    pub fn missing_imports(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| {
            matches!(
                f.outcome,
                FileOutcome::Updated {
                    missing_import: true
                }
            )
        })
    }
}

impl FileReport {
    /// Create a report entry.
    #[must_use]
    pub fn new(path: PathBuf, display_path: PathBuf, outcome: FileOutcome) -> Self {
        Self {
            path,
            display_path,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FileErrorKind;

    fn entry(name: &str, outcome: FileOutcome) -> FileReport {
        FileReport::new(PathBuf::from(name), PathBuf::from(name), outcome)
    }

    #[test]
    fn test_record_bumps_one_counter() {
        let mut report = MigrationReport::new(PathBuf::from("api"), false);
        report.record(entry(
            "a/route.ts",
            FileOutcome::Updated {
                missing_import: false,
            },
        ));
        report.record(entry(
            "b/route.ts",
            FileOutcome::Skipped {
                reason: SkipReason::NoFetchCalls,
            },
        ));
        report.record(entry(
            "c/route.ts",
            FileOutcome::Skipped {
                reason: SkipReason::AlreadyUpdated,
            },
        ));
        report.record(entry(
            "d/route.ts",
            FileOutcome::Errored {
                error: FileError::new("d/route.ts", FileErrorKind::IoError, "boom".to_owned()),
            },
        ));

        assert_eq!(report.updated, 1);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.errored, 1);
        assert_eq!(report.files_processed(), report.files.len());
    }

    #[test]
    fn test_missing_imports() {
        let mut report = MigrationReport::new(PathBuf::from("api"), true);
        report.record(entry(
            "a/route.ts",
            FileOutcome::Updated {
                missing_import: true,
            },
        ));
        report.record(entry(
            "b/route.ts",
            FileOutcome::Updated {
                missing_import: false,
            },
        ));

        let missing: Vec<_> = report.missing_imports().map(|f| f.path.clone()).collect();
        assert_eq!(missing, vec![PathBuf::from("a/route.ts")]);
    }

    #[test]
    fn test_outcome_display() {
        let updated = FileOutcome::Updated {
            missing_import: true,
        };
        assert_eq!(updated.to_string(), "Updated");

        let skipped = FileOutcome::Skipped {
            reason: SkipReason::AuthRoute,
        };
        assert_eq!(skipped.to_string(), "Auth route (public)");

        let errored = FileOutcome::Errored {
            error: FileError::new(
                "a/route.ts",
                FileErrorKind::FileTooLarge,
                "File exceeds maximum size of 16 bytes".to_owned(),
            ),
        };
        assert_eq!(
            errored.to_string(),
            "Error: File exceeds maximum size of 16 bytes (file too large)"
        );
    }

    #[test]
    fn test_outcome_serialization_is_tagged() {
        let file = entry(
            "a/route.ts",
            FileOutcome::Skipped {
                reason: SkipReason::WebhookRoute,
            },
        );
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["outcome"], "skipped");
        assert_eq!(json["reason"], "webhook_route");
        assert_eq!(json["path"], "a/route.ts");
    }
}
