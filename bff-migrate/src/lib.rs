//! # bff-migrate
//!
//! One-shot migration of route handlers from hand-forwarded cookies to the
//! `buildBFFHeaders()` helper.
//!
//! A run discovers every `route.ts` under a root directory, decides per file
//! whether it should be migrated ([`eligibility`]), rewrites the header
//! construction with a fixed set of text patterns ([`rewrite`]), and writes
//! the result back unless the run is a dry run. Each file ends up in exactly
//! one of three buckets (updated, skipped, errored) on the returned
//! [`MigrationReport`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use bff_migrate::{migrate_fs, MigrationConfig};
//!
//! let mut config = MigrationConfig::default();
//! config.root = PathBuf::from("frontend/app/api");
//! config.dry_run = true;
//!
//! let report = migrate_fs(&config).unwrap();
//! println!("Updated: {}", report.updated);
//! println!("Skipped: {}", report.skipped);
//! println!("Errors:  {}", report.errored);
//! ```

mod config;
pub mod eligibility;
mod error;
pub mod output;
mod report;
pub mod rewrite;
mod strategy;

pub use config::{DEFAULT_ROOT, DEFAULT_TARGET_FILE_NAME, MigrationConfig};
pub use eligibility::SkipReason;
pub use error::{ConfigError, FileError, FileErrorKind};
pub use report::{FileOutcome, FileReport, MigrationReport};

use std::path::{Path, PathBuf};

use strategy::fs::{find_route_files, read_file_bounded, write_file};

/// Migrate every route file under `config.root`.
///
/// This is the primary public API. Files are processed one at a time in
/// sorted path order. Per-file failures (unreadable, oversized, non-UTF-8,
/// unwritable) are recorded in the report and never abort the run.
///
/// # Errors
///
/// Returns an error only if the configuration is invalid (see
/// [`MigrationConfig::validate`]).
pub fn migrate_fs(config: &MigrationConfig) -> anyhow::Result<MigrationReport> {
    config.validate()?;
    let exclude_patterns = config.exclude_patterns()?;

    tracing::info!(
        root = %config.root.display(),
        target = %config.target_file_name,
        dry_run = config.dry_run,
        "starting migration"
    );

    let (files, walk_errors) = find_route_files(config, &exclude_patterns);

    let mut report = MigrationReport::new(config.root.clone(), config.dry_run);
    report.discovered = files.len();

    for error in walk_errors {
        tracing::warn!("{}", error.format_human_readable());
        let display_path = display_path_for(&config.root, &error.file);
        report.record(FileReport::new(
            error.file.clone(),
            display_path,
            FileOutcome::Errored { error },
        ));
    }

    for file_path in files {
        let outcome = process_file(&file_path, config);
        let display_path = display_path_for(&config.root, &file_path);
        tracing::info!(path = %display_path.display(), "{outcome}");
        report.record(FileReport::new(file_path, display_path, outcome));
    }

    tracing::info!(
        updated = report.updated,
        skipped = report.skipped,
        errored = report.errored,
        "migration finished"
    );

    Ok(report)
}

/// Read, classify, rewrite, and (unless dry run) write back a single file.
///
/// Never fails: every problem becomes a [`FileOutcome`].
#[must_use]
pub fn process_file(path: &Path, config: &MigrationConfig) -> FileOutcome {
    let content = match read_file_bounded(path, config.max_file_size) {
        Ok(content) => content,
        Err(error) => {
            tracing::warn!("{}", error.format_human_readable());
            return FileOutcome::Errored { error };
        }
    };

    // Path rules look for segments like `/auth/`, which a relative root hides.
    let rule_path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    if let Some(reason) = eligibility::classify(&rule_path, &content) {
        tracing::debug!(path = %path.display(), %reason, "skipped");
        return FileOutcome::Skipped { reason };
    }

    let Some(rewritten) = rewrite::rewrite_route(&content) else {
        tracing::debug!(path = %path.display(), "no pattern matched");
        return FileOutcome::Skipped {
            reason: SkipReason::NoPatternMatched,
        };
    };

    let missing_import = rewrite::helper_import_missing(&rewritten);
    if missing_import {
        tracing::warn!(
            path = %path.display(),
            "helper call inserted but the file has no import line to anchor the helper import"
        );
    }

    if config.dry_run {
        tracing::debug!(path = %path.display(), "dry run, not writing");
    } else if let Err(error) = write_file(path, &rewritten) {
        tracing::warn!("{}", error.format_human_readable());
        return FileOutcome::Errored { error };
    }

    FileOutcome::Updated { missing_import }
}

/// Path shown to the operator: relative to the grandparent of the scan root,
/// so `frontend/app/api/users/route.ts` prints as `app/api/users/route.ts`.
fn display_path_for(root: &Path, path: &Path) -> PathBuf {
    root.ancestors()
        .nth(2)
        .and_then(|base| path.strip_prefix(base).ok())
        .map_or_else(|| path.to_path_buf(), Path::to_path_buf)
}
