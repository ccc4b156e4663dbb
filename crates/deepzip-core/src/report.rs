//! Extraction statistics and progress hooks.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

/// An entry name rewritten by the legacy filename heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredName {
    /// Name as the container decoded it.
    pub stored: String,
    /// Name after GBK recovery.
    pub decoded: String,
}

/// What an extraction call did.
///
/// For recursive extraction the counters cover every nested archive too, so
/// a nested archive file is counted once as a written file before it is
/// replaced by its contents.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Root of the extracted tree, as requested by the caller.
    pub output_dir: PathBuf,

    /// Files written, nested archive files included.
    pub files_extracted: usize,

    /// Directory entries materialized.
    pub directories_created: usize,

    /// Entry content bytes written.
    pub bytes_written: u64,

    /// Nested archives replaced by a directory of their contents.
    pub nested_archives: usize,

    /// Entry names recovered from a legacy encoding, in extraction order.
    pub recovered_names: Vec<RecoveredName>,

    /// Wall time of the whole call.
    pub duration: Duration,

    /// Non-fatal oddities, such as `*.zip` files that are not archives.
    pub warnings: Vec<String>,
}

impl ExtractionReport {
    /// Empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a non-fatal problem.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Files plus directories.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }

    /// `true` when at least one warning was recorded.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Hooks invoked while archives are unpacked.
///
/// `Send` is required so an extraction carrying a callback can run on a
/// worker thread.
///
/// # Examples
///
/// ```
/// use deepzip_core::ProgressCallback;
/// use std::path::Path;
///
/// #[derive(Default)]
/// struct Tree {
///     lines: Vec<String>,
/// }
///
/// impl ProgressCallback for Tree {
///     fn on_archive_start(&mut self, archive: &Path, depth: usize) {
///         self.lines
///             .push(format!("{}{}", "  ".repeat(depth), archive.display()));
///     }
///
///     fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _path: &Path) {}
///
///     fn on_complete(&mut self) {}
/// }
/// ```
pub trait ProgressCallback: Send {
    /// An archive was opened. `depth` is 0 for the archive the caller passed
    /// and grows by one per level of nesting.
    fn on_archive_start(&mut self, archive: &Path, depth: usize);

    /// Entry `current` of `total` (1-based) in the current archive is about
    /// to be written. `path` is the decoded entry name.
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// `bytes` more bytes of the current entry reached disk.
    fn on_bytes_written(&mut self, bytes: u64);

    /// The entry started last is fully written.
    fn on_entry_complete(&mut self, path: &Path);

    /// The call finished successfully, recursion included.
    fn on_complete(&mut self);
}

/// A `ProgressCallback` that ignores every event.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_archive_start(&mut self, _archive: &Path, _depth: usize) {}

    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}
