//! JSON output formatter for machine-readable results.
//!
//! Each call prints one complete document, so a batch produces a stream of
//! documents in archive order.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use super::formatter::ProbeResult;
use anyhow::Result;
use deepzip_core::ExtractionReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use std::path::PathBuf;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct RecoveredNameOutput<'a> {
    stored: &'a str,
    decoded: &'a str,
}

#[derive(Serialize)]
struct ExtractionOutput<'a> {
    archive: String,
    output_dir: String,
    files_extracted: usize,
    directories_created: usize,
    bytes_written: u64,
    nested_archives: usize,
    recovered_names: Vec<RecoveredNameOutput<'a>>,
    warnings: &'a [String],
    duration_ms: u128,
}

impl<'a> ExtractionOutput<'a> {
    fn new(archive: &Path, report: &'a ExtractionReport) -> Self {
        Self {
            archive: archive.display().to_string(),
            output_dir: report.output_dir.display().to_string(),
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            bytes_written: report.bytes_written,
            nested_archives: report.nested_archives,
            recovered_names: report
                .recovered_names
                .iter()
                .map(|name| RecoveredNameOutput {
                    stored: &name.stored,
                    decoded: &name.decoded,
                })
                .collect(),
            warnings: &report.warnings,
            duration_ms: report.duration.as_millis(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(&self, archive: &Path, report: &ExtractionReport) -> Result<()> {
        let output = JsonOutput::success("extract", ExtractionOutput::new(archive, report));
        Self::output(&output)
    }

    fn format_listing(&self, archive: &Path, files: &[PathBuf]) -> Result<()> {
        #[derive(Serialize)]
        struct ListingOutput {
            archive: String,
            files: Vec<String>,
        }

        let data = ListingOutput {
            archive: archive.display().to_string(),
            files: files
                .iter()
                .map(|f| f.to_string_lossy().replace('\\', "/"))
                .collect(),
        };

        Self::output(&JsonOutput::success("list", data))
    }

    fn format_probe(&self, results: &[ProbeResult]) -> Result<()> {
        Self::output(&JsonOutput::success("probe", results))
    }

    fn format_error(&self, operation: &str, archive: &Path, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error(
            operation,
            format!("{}: {error:#}", archive.display()),
        );
        let _ = Self::output(&output);
    }
}
