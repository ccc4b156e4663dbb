//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use super::formatter::ProbeResult;
use super::humanize_bytes;
use anyhow::Result;
use console::Term;
use console::style;
use deepzip_core::ExtractionReport;
use std::path::Path;
use std::path::PathBuf;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn heading(&self, mark: &str, text: &str) -> String {
        if self.use_colors {
            format!("{} {text}", style(mark).green().bold())
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_result(&self, archive: &Path, report: &ExtractionReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.term.write_line(&self.heading(
            "✓",
            &format!(
                "Extracted {} into {}",
                archive.display(),
                report.output_dir.display()
            ),
        ))?;
        self.term
            .write_line(&format!("  Files extracted: {}", report.files_extracted))?;
        self.term
            .write_line(&format!("  Directories: {}", report.directories_created))?;
        self.term.write_line(&format!(
            "  Total size: {}",
            humanize_bytes(report.bytes_written)
        ))?;
        if report.nested_archives > 0 {
            self.term
                .write_line(&format!("  Nested archives: {}", report.nested_archives))?;
        }
        if !report.recovered_names.is_empty() {
            self.term.write_line(&format!(
                "  Recovered names: {}",
                report.recovered_names.len()
            ))?;
        }

        if self.verbose {
            for name in &report.recovered_names {
                self.term
                    .write_line(&format!("    {} (stored as {})", name.decoded, name.stored))?;
            }
            self.term
                .write_line(&format!("  Duration: {:?}", report.duration))?;
        }

        if report.has_warnings() {
            if self.use_colors {
                self.term
                    .write_line(&format!("{}", style("Warnings:").yellow().bold()))?;
            } else {
                self.term.write_line("Warnings:")?;
            }
            for warning in &report.warnings {
                self.term.write_line(&format!("  - {warning}"))?;
            }
        }

        Ok(())
    }

    fn format_listing(&self, _archive: &Path, files: &[PathBuf]) -> Result<()> {
        // The listing is the command's output, so quiet does not hide it.
        for file in files {
            self.term.write_line(&file.display().to_string())?;
        }
        Ok(())
    }

    fn format_probe(&self, results: &[ProbeResult]) -> Result<()> {
        for result in results {
            let line = match result.reason() {
                None if self.use_colors => {
                    format!("{}: {}", result.path, style("ZIP archive").green())
                }
                None => format!("{}: ZIP archive", result.path),
                Some(reason) if self.use_colors => format!(
                    "{}: {}",
                    result.path,
                    style(format!("not an archive ({reason})")).dim()
                ),
                Some(reason) => format!("{}: not an archive ({reason})", result.path),
            };
            self.term.write_line(&line)?;
        }
        Ok(())
    }

    fn format_error(&self, _operation: &str, _archive: &Path, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:#}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:#}"));
        }
    }
}
