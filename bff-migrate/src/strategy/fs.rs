//! Filesystem source.
//!
//! Discovers route files on disk, reads them with a size bound, and writes
//! rewritten content back in place. Properties enforced here:
//! - Only regular files named exactly like the target are returned
//! - Symlinks are not followed by default (`follow_links: false`)
//! - Resolved paths must stay within the scan root
//! - Results are sorted so every run visits files in the same order
//! - Walk failures are returned, never silently dropped

use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::config::MigrationConfig;
use crate::error::{FileError, FileErrorKind};

/// Check if a path matches any of the exclude patterns
fn matches_exclude(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

fn matches_target_name(path: &Path, target_file_name: &str) -> bool {
    path.file_name().is_some_and(|name| name == target_file_name)
}

/// Find every route file under `config.root`.
///
/// Returns `(files, errors)`:
/// - `files`: matching regular files, sorted by path and deduplicated.
/// - `errors`: traversal failures and root-boundary violations.
pub fn find_route_files(
    config: &MigrationConfig,
    exclude_patterns: &[Pattern],
) -> (Vec<PathBuf>, Vec<FileError>) {
    let mut files = Vec::new();
    let mut errors = Vec::new();
    let root = &config.root;

    let canonical_root = match root.canonicalize() {
        Ok(r) => r,
        Err(e) => {
            errors.push(FileError::new(
                root.clone(),
                FileErrorKind::IoError,
                format!("Failed to canonicalize root path: {e}"),
            ));
            return (files, errors);
        }
    };

    for entry_result in WalkDir::new(root)
        .follow_links(config.follow_links)
        .max_depth(config.max_depth)
    {
        let entry = match entry_result {
            Ok(e) => e,
            Err(walk_err) => {
                let path = walk_err
                    .path()
                    .map_or_else(|| root.clone(), Path::to_path_buf);
                errors.push(FileError::new(
                    path,
                    FileErrorKind::WalkError,
                    format!("Directory traversal error: {walk_err}"),
                ));
                continue;
            }
        };

        let file_path = entry.path();

        if !matches_target_name(file_path, &config.target_file_name) || !file_path.is_file() {
            continue;
        }

        match file_path.canonicalize() {
            Ok(canonical_path) => {
                if !canonical_path.starts_with(&canonical_root) {
                    errors.push(FileError::new(
                        file_path,
                        FileErrorKind::OutsideRoot,
                        format!(
                            "Path resolves outside scan root: {} -> {}",
                            file_path.display(),
                            canonical_path.display()
                        ),
                    ));
                    continue;
                }
            }
            Err(e) => {
                errors.push(FileError::new(
                    file_path,
                    FileErrorKind::IoError,
                    format!("Failed to canonicalize path: {e}"),
                ));
                continue;
            }
        }

        if matches_exclude(file_path, exclude_patterns) {
            tracing::debug!(path = %file_path.display(), "excluded by pattern");
            continue;
        }

        files.push(file_path.to_path_buf());
    }

    files.sort();
    files.dedup();
    (files, errors)
}

/// Read a file using a bounded streaming read, enforcing `max_file_size`.
///
/// Reads at most `max_file_size + 1` bytes so oversized files are detected
/// without loading them whole.
///
/// # Errors
///
/// Returns a [`FileError`] if the file cannot be opened or read, exceeds
/// `max_file_size`, or is not valid UTF-8.
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<String, FileError> {
    let file = std::fs::File::open(path).map_err(|e| {
        FileError::new(path, FileErrorKind::IoError, format!("Failed to open file: {e}"))
    })?;

    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| {
            FileError::new(path, FileErrorKind::IoError, format!("Failed to read file: {e}"))
        })?;

    if buffer.len() as u64 > max_file_size {
        return Err(FileError::new(
            path,
            FileErrorKind::FileTooLarge,
            format!("File exceeds maximum size of {max_file_size} bytes"),
        ));
    }

    String::from_utf8(buffer).map_err(|_| {
        FileError::new(
            path,
            FileErrorKind::InvalidEncoding,
            "File is not valid UTF-8".to_owned(),
        )
    })
}

/// Overwrite `path` with `content` in a single write.
///
/// # Errors
///
/// Returns a [`FileError`] of kind `WriteError` if the write fails.
pub fn write_file(path: &Path, content: &str) -> Result<(), FileError> {
    std::fs::write(path, content).map_err(|e| {
        FileError::new(path, FileErrorKind::WriteError, format!("Failed to write file: {e}"))
    })
}
