//! Output formatter trait for CLI results.

use anyhow::Result;
use deepzip_core::ExtractionReport;
use deepzip_core::formats::detect;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the result of extracting one archive
    fn format_extraction_result(&self, archive: &Path, report: &ExtractionReport) -> Result<()>;

    /// Format the files an archive expands to, relative to the extraction root
    fn format_listing(&self, archive: &Path, files: &[PathBuf]) -> Result<()>;

    /// Format archive detection results
    fn format_probe(&self, results: &[ProbeResult]) -> Result<()>;

    /// Format a failure that does not stop the command
    fn format_error(&self, operation: &str, archive: &Path, error: &anyhow::Error);
}

/// Detection outcome for one path.
#[derive(Debug, Serialize)]
pub struct ProbeResult {
    pub path: String,
    pub is_archive: bool,
    pub has_zip_extension: bool,
    pub has_zip_signature: bool,
}

impl ProbeResult {
    pub fn probe(path: &Path) -> Self {
        Self {
            path: path.display().to_string(),
            is_archive: detect::is_archive(path),
            has_zip_extension: detect::has_archive_extension(path),
            has_zip_signature: detect::has_zip_signature(path),
        }
    }

    /// Short explanation for paths that are not archives.
    pub fn reason(&self) -> Option<&'static str> {
        if self.is_archive {
            None
        } else if !self.has_zip_extension {
            Some("no .zip extension")
        } else if !self.has_zip_signature {
            Some("no ZIP signature")
        } else {
            Some("unreadable ZIP container")
        }
    }
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
