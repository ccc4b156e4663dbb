//! Progress bar implementation for CLI operations.

use crate::output::humanize_bytes;
use console::Term;
use deepzip_core::ProgressCallback;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use std::path::Path;

/// CLI progress bar wrapper implementing `ProgressCallback`.
///
/// One bar is reused for every archive in a recursive extraction: its length
/// is reset to the entry count of whichever archive is being unpacked, and
/// the byte total (shown as the prefix) keeps growing across all of them.
pub struct CliProgress {
    bar: ProgressBar,
    label: String,
    bytes_written: u64,
}

impl CliProgress {
    /// Creates a new CLI progress bar.
    ///
    /// `label` is shown before the archive name, e.g. "Extracting".
    #[must_use]
    pub fn new(label: &str) -> Self {
        let bar = ProgressBar::new(0);

        // Template: "Extracting docs.zip [████████░░░░] 42/100 entries (15.2 MB, 3s)"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} entries ({prefix}, {elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_prefix(humanize_bytes(0));
        bar.set_message(label.to_string());

        Self {
            bar,
            label: label.to_string(),
            bytes_written: 0,
        }
    }

    /// Checks if we should show progress (TTY detection).
    ///
    /// The bar is drawn on stderr, so that is the stream checked.
    #[must_use]
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_archive_start(&mut self, archive: &Path, depth: usize) {
        let name = archive
            .file_name()
            .map_or_else(|| archive.display().to_string(), |n| n.to_string_lossy().into_owned());
        self.bar.set_length(0);
        self.bar.set_position(0);
        self.bar
            .set_message(format!("{}{} {name}", "  ".repeat(depth), self.label));
    }

    fn on_entry_start(&mut self, _path: &Path, total: usize, _current: usize) {
        self.bar.set_length(total as u64);
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written += bytes;
        self.bar.set_prefix(humanize_bytes(self.bytes_written));
    }

    fn on_entry_complete(&mut self, _path: &Path) {
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}
