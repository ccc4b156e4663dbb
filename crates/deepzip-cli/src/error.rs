//! Error conversion utilities for CLI.
//!
//! Converts deepzip-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use deepzip_core::ExtractionError;
use std::path::Path;

/// Converts `ExtractionError` to user-friendly anyhow error with context
pub fn convert_extraction_error(err: ExtractionError, archive: &Path) -> anyhow::Error {
    match err {
        ExtractionError::PathTraversal { path } => {
            anyhow!(
                "Security violation: Archive '{}' attempted path traversal with '{}'\n\
                 HINT: This archive may be malicious. No entry of the offending archive was written.",
                archive.display(),
                path.display()
            )
        }
        ExtractionError::SecurityViolation { reason } => {
            anyhow!(
                "Security violation in '{}': {}\n\
                 HINT: This archive may be malicious. Do not extract from untrusted sources.",
                archive.display(),
                reason
            )
        }
        ExtractionError::NestingTooDeep { path, depth, max } => {
            anyhow!(
                "Nested archives in '{}' go too deep: '{}' is at depth {} (max {})\n\
                 HINT: Use --max-depth to allow deeper nesting, or --no-recursive to skip it.",
                archive.display(),
                path.display(),
                depth,
                max
            )
        }
        ExtractionError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
        ExtractionError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The archive may be corrupted, truncated, or not a ZIP file.",
                archive.display(),
                reason
            )
        }
    }
}

/// Adds context to a generic error about archive operations
pub fn add_archive_context<T>(
    result: Result<T, ExtractionError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_extraction_error(e, archive))
}
