//! Shared output formatting for migration reports.
//!
//! Provides JSON and plain-text formatters for `MigrationReport`.
//! The plain-text form is meant for an operator watching the run; the JSON
//! form is the stable contract for scripts.

use std::io::Write;

use crate::report::{FileOutcome, MigrationReport};

const RULE_WIDTH: usize = 60;

/// Format a `MigrationReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &MigrationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `MigrationReport` as human-readable plain text to a writer.
///
/// One header line per file followed by one outcome line, then a summary
/// with the three totals.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &MigrationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(writer, "BFF Routes Updater for Subdomain Support")?;
    writeln!(writer, "{rule}")?;

    if report.dry_run {
        writeln!(writer, "DRY RUN MODE - No files will be modified")?;
        writeln!(writer, "{rule}")?;
    }

    writeln!(writer)?;
    writeln!(writer, "Found {} route files", report.discovered)?;
    writeln!(writer)?;

    for file in &report.files {
        writeln!(writer, "> {}", file.display_path.display())?;
        match &file.outcome {
            FileOutcome::Updated { missing_import } => {
                writeln!(writer, "   \u{2713} Updated")?;
                if *missing_import {
                    writeln!(
                        writer,
                        "   ! No import line found; add the buildBFFHeaders import by hand"
                    )?;
                }
            }
            FileOutcome::Skipped { reason } => {
                writeln!(writer, "   - {reason}")?;
            }
            FileOutcome::Errored { .. } => {
                writeln!(writer, "   \u{2717} {}", file.outcome)?;
            }
        }
    }

    writeln!(writer)?;
    writeln!(writer, "{rule}")?;
    writeln!(writer, "Summary:")?;
    writeln!(writer, "   Updated: {} routes", report.updated)?;
    writeln!(writer, "   Skipped: {} routes", report.skipped)?;
    writeln!(writer, "   Errors: {} routes", report.errored)?;
    writeln!(writer, "{rule}")?;

    Ok(())
}
