// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stderr: configuration failures are reported to the operator on stderr.
// - exit: Calling `std::process::exit()` is standard for CLI apps to signal failure to the shell.
#![allow(clippy::print_stderr, clippy::exit)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use bff_migrate::{DEFAULT_ROOT, DEFAULT_TARGET_FILE_NAME, MigrationConfig, migrate_fs, output};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Rewrite route handlers that forward cookies by hand to use `buildBFFHeaders()`.
#[derive(Debug, Parser)]
#[command(name = "bff-migrate", version, about)]
struct Cli {
    /// Directory searched recursively for route files
    #[arg(long, default_value = DEFAULT_ROOT)]
    root: PathBuf,

    /// File name that identifies a route handler
    #[arg(long = "file-name", default_value = DEFAULT_TARGET_FILE_NAME)]
    file_name: String,

    /// Run every step but do not modify any file
    #[arg(long)]
    dry_run: bool,

    /// Glob pattern of paths to leave out of discovery (repeatable)
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Maximum size of a route file in bytes
    #[arg(long)]
    max_file_size: Option<u64>,

    /// Follow symbolic links while walking the root
    #[arg(long)]
    follow_links: bool,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = Format::Human)]
    format: Format,

    /// Diagnostics on stderr (-v debug, -vv trace); `RUST_LOG` takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Human,
    Json,
}

impl Cli {
    fn to_config(&self) -> MigrationConfig {
        let mut config = MigrationConfig::default();
        config.root.clone_from(&self.root);
        config.target_file_name.clone_from(&self.file_name);
        config.dry_run = self.dry_run;
        config.exclude.clone_from(&self.exclude);
        config.follow_links = self.follow_links;
        if let Some(max) = self.max_file_size {
            config.max_file_size = max;
        }
        config
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let report = migrate_fs(&cli.to_config())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        Format::Human => output::write_human(&report, &mut out)?,
        Format::Json => output::write_json(&report, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_map_to_config() {
        let cli = Cli::parse_from(["bff-migrate"]);
        let config = cli.to_config();
        assert_eq!(config.root, PathBuf::from(DEFAULT_ROOT));
        assert_eq!(config.target_file_name, DEFAULT_TARGET_FILE_NAME);
        assert!(!config.dry_run);
        assert_eq!(cli.format, Format::Human);
    }

    #[test]
    fn test_flags_map_to_config() {
        let cli = Cli::parse_from([
            "bff-migrate",
            "--root",
            "web/app/api",
            "--dry-run",
            "--exclude",
            "*/legacy/*",
            "--exclude",
            "*/internal/*",
            "--max-file-size",
            "2048",
            "--format",
            "json",
            "-vv",
        ]);
        let config = cli.to_config();
        assert_eq!(config.root, PathBuf::from("web/app/api"));
        assert!(config.dry_run);
        assert_eq!(config.exclude.len(), 2);
        assert_eq!(config.max_file_size, 2048);
        assert_eq!(cli.format, Format::Json);
        assert_eq!(cli.verbose, 2);
    }
}
