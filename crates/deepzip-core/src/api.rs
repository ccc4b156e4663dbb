//! High-level public API for one-shot extraction.

use std::path::Path;

use crate::ExtractionReport;
use crate::Extractor;
use crate::ExtractorConfig;
use crate::NoopProgress;
use crate::Result;

/// Extracts an archive into `output_dir` without touching nested archives.
///
/// A short-lived [`Extractor`] is used; since the output directory is
/// explicit, nothing is left for it to clean up.
///
/// # Arguments
///
/// * `archive_path` - Path to the ZIP file
/// * `output_dir` - Directory where entries will be written (created if
///   missing)
/// * `config` - Extractor configuration
///
/// # Errors
///
/// See [`Extractor::extract_one`].
///
/// # Examples
///
/// ```no_run
/// use deepzip_core::ExtractorConfig;
/// use deepzip_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExtractorConfig::default();
/// let report = extract_archive("archive.zip", "/tmp/output", &config)?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractorConfig,
) -> Result<ExtractionReport> {
    Extractor::with_config(config.clone()).extract_one_with_progress(
        archive_path.as_ref(),
        Some(output_dir.as_ref()),
        &mut NoopProgress,
    )
}

/// Extracts an archive into `output_dir` and expands every nested archive.
///
/// # Errors
///
/// See [`Extractor::extract_recursive`].
///
/// # Examples
///
/// ```no_run
/// use deepzip_core::ExtractorConfig;
/// use deepzip_core::extract_archive_recursive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExtractorConfig::default().with_max_nesting_depth(8);
/// let report = extract_archive_recursive("bundle.zip", "/tmp/output", &config)?;
/// println!("Expanded {} nested archives", report.nested_archives);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive_recursive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractorConfig,
) -> Result<ExtractionReport> {
    Extractor::with_config(config.clone()).extract_recursive_with_progress(
        archive_path.as_ref(),
        Some(output_dir.as_ref()),
        &mut NoopProgress,
    )
}
