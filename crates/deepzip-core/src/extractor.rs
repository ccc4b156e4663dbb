//! Recursive archive extractor with an owned temporary directory pool.

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use tempfile::TempDir;
use walkdir::WalkDir;

use crate::ExtractionError;
use crate::ExtractionReport;
use crate::ExtractorConfig;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::formats::ZipContainer;
use crate::formats::detect;
use crate::types::DestDir;

/// Extracts ZIP archives, optionally replacing nested archives with their
/// contents.
///
/// Temporary directories allocated for calls without an explicit target are
/// owned by the extractor. They are removed by [`Extractor::cleanup`] or when
/// the extractor is dropped, whichever comes first. Directories supplied by
/// the caller are never removed.
///
/// An `Extractor` is `Send` but holds per-instance state; run independent
/// extractors on separate threads rather than sharing one.
///
/// # Examples
///
/// ```no_run
/// use deepzip_core::Extractor;
/// use std::path::Path;
///
/// # fn main() -> Result<(), deepzip_core::ExtractionError> {
/// let mut extractor = Extractor::new();
/// let root = extractor.extract_recursive(Path::new("bundle.zip"), None)?;
/// for entry in std::fs::read_dir(&root)? {
///     println!("{}", entry?.path().display());
/// }
/// // `root` is removed here, when `extractor` goes out of scope
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Extractor {
    config: ExtractorConfig,
    temp_dirs: Vec<TempDir>,
}

impl Extractor {
    /// Creates an extractor with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor with a custom configuration.
    #[must_use]
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self {
            config,
            temp_dirs: Vec::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Returns `true` if `path` is a readable ZIP container with a `zip`
    /// extension. See [`detect::is_archive`].
    #[must_use]
    pub fn is_archive(&self, path: &Path) -> bool {
        detect::is_archive(path)
    }

    /// Extracts one archive without looking at nested archives.
    ///
    /// With `target_dir` set, entries go there (the directory is created if
    /// missing). Without it, a fresh temporary directory is allocated and
    /// added to the pool. Returns the directory that holds the entries,
    /// exactly as requested.
    ///
    /// Nothing is rolled back on failure: entries written before the error
    /// stay on disk.
    ///
    /// # Errors
    ///
    /// - `ExtractionError::Io` if the archive cannot be opened or output
    ///   cannot be written
    /// - `ExtractionError::InvalidArchive` if the archive is corrupt
    /// - `ExtractionError::PathTraversal` if any entry would escape the
    ///   target
    pub fn extract_one(&mut self, archive: &Path, target_dir: Option<&Path>) -> Result<PathBuf> {
        self.extract_one_with_progress(archive, target_dir, &mut NoopProgress)
            .map(|report| report.output_dir)
    }

    /// Like [`Extractor::extract_one`], reporting progress and returning
    /// statistics.
    ///
    /// # Errors
    ///
    /// Same as [`Extractor::extract_one`].
    pub fn extract_one_with_progress(
        &mut self,
        archive: &Path,
        target_dir: Option<&Path>,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExtractionReport> {
        let start = Instant::now();
        let mut report = ExtractionReport::new();

        let output_dir = self.extract_into(archive, target_dir, 0, progress, &mut report)?;
        report.output_dir = output_dir;
        report.duration = start.elapsed();
        progress.on_complete();

        Ok(report)
    }

    /// Extracts an archive and then every nested archive it contains.
    ///
    /// After the archive is unpacked, each regular file in the output that
    /// [`is_archive`](Self::is_archive) accepts is extracted into a sibling
    /// directory named after its stem (`docs.zip` becomes `docs/`), that
    /// directory is processed the same way, and the nested archive file is
    /// deleted. Files named `*.zip` that are not valid containers are left
    /// alone and noted in the report warnings.
    ///
    /// # Errors
    ///
    /// Everything [`Extractor::extract_one`] returns for any archive in the
    /// tree, plus `ExtractionError::NestingTooDeep` once nesting exceeds
    /// [`ExtractorConfig::max_nesting_depth`].
    pub fn extract_recursive(
        &mut self,
        archive: &Path,
        target_dir: Option<&Path>,
    ) -> Result<PathBuf> {
        self.extract_recursive_with_progress(archive, target_dir, &mut NoopProgress)
            .map(|report| report.output_dir)
    }

    /// Like [`Extractor::extract_recursive`], reporting progress and
    /// returning statistics for the whole tree.
    ///
    /// # Errors
    ///
    /// Same as [`Extractor::extract_recursive`].
    pub fn extract_recursive_with_progress(
        &mut self,
        archive: &Path,
        target_dir: Option<&Path>,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExtractionReport> {
        let start = Instant::now();
        let mut report = ExtractionReport::new();

        let root = self.extract_into(archive, target_dir, 0, progress, &mut report)?;
        self.expand_nested(&root, 0, progress, &mut report)?;

        report.output_dir = root;
        report.duration = start.elapsed();
        progress.on_complete();

        Ok(report)
    }

    /// Removes every pooled temporary directory.
    ///
    /// Best effort: a directory that cannot be removed is skipped and the
    /// rest are still removed. The pool is emptied either way, so calling
    /// this again does nothing.
    pub fn cleanup(&mut self) {
        for dir in self.temp_dirs.drain(..) {
            // Ignored: the remaining directories must still be attempted.
            let _ = dir.close();
        }
    }

    /// Iterates over the temporary directories currently in the pool.
    pub fn temp_dirs(&self) -> impl Iterator<Item = &Path> {
        self.temp_dirs.iter().map(TempDir::path)
    }

    fn extract_into(
        &mut self,
        archive: &Path,
        target_dir: Option<&Path>,
        depth: usize,
        progress: &mut dyn ProgressCallback,
        report: &mut ExtractionReport,
    ) -> Result<PathBuf> {
        // Opened first so an invalid archive never leaves an empty target.
        let mut container = ZipContainer::open(archive)?;
        let output_dir = self.prepare_target(target_dir)?;
        let dest = DestDir::new(&output_dir)?;

        progress.on_archive_start(archive, depth);
        container.extract(&dest, self.config.recover_legacy_names, progress, report)?;

        Ok(output_dir)
    }

    fn prepare_target(&mut self, target_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = target_dir {
            fs::create_dir_all(dir)?;
            return Ok(dir.to_path_buf());
        }

        let mut builder = tempfile::Builder::new();
        builder.prefix(&self.config.temp_prefix);
        let temp = match &self.config.temp_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };

        // Pooled before extraction so a failing archive is still cleaned up.
        let path = temp.path().to_path_buf();
        self.temp_dirs.push(temp);
        Ok(path)
    }

    fn expand_nested(
        &mut self,
        root: &Path,
        depth: usize,
        progress: &mut dyn ProgressCallback,
        report: &mut ExtractionReport,
    ) -> Result<()> {
        let nested_depth = depth + 1;

        for nested in collect_nested_archives(root, report)? {
            // A sibling archive expanded into this same directory may have
            // already consumed it.
            if !nested.exists() {
                continue;
            }

            if nested_depth > self.config.max_nesting_depth {
                return Err(ExtractionError::NestingTooDeep {
                    path: nested,
                    depth: nested_depth,
                    max: self.config.max_nesting_depth,
                });
            }

            let target = nested_target(&nested);
            self.extract_into(&nested, Some(&target), nested_depth, progress, report)?;
            self.expand_nested(&target, nested_depth, progress, report)?;
            fs::remove_file(&nested)?;
            report.nested_archives += 1;
        }

        Ok(())
    }
}

impl Drop for Extractor {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Lists nested archives below `root` in a stable order.
///
/// The whole list is built before anything is extracted, so the walk never
/// sees output of the archives it found.
fn collect_nested_archives(root: &Path, report: &mut ExtractionReport) -> Result<Vec<PathBuf>> {
    let mut archives = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() || !detect::has_archive_extension(entry.path()) {
            continue;
        }

        if detect::is_archive(entry.path()) {
            archives.push(entry.into_path());
        } else {
            // A nested archive merged into an existing directory makes the
            // walk revisit files already classified.
            let warning = format!(
                "not a valid ZIP archive, kept as a file: {}",
                entry.path().display()
            );
            if !report.warnings.contains(&warning) {
                report.add_warning(warning);
            }
        }
    }

    Ok(archives)
}

/// `dir/docs.zip` extracts into `dir/docs`.
///
/// A stem of `.` or `..` (from `..zip` or `...zip`) would name the parent
/// itself, so those use the file name with its last `.` replaced by `_`
/// (`dir/._zip`).
fn nested_target(archive: &Path) -> PathBuf {
    let stem = archive
        .file_stem()
        .filter(|stem| !stem.is_empty() && *stem != "." && *stem != "..");
    if let Some(stem) = stem {
        return archive.with_file_name(stem);
    }

    let name = archive
        .file_name()
        .map_or_else(|| "archive".into(), |n| n.to_string_lossy());
    let fallback = match name.rsplit_once('.') {
        Some((head, ext)) => format!("{head}_{ext}"),
        None => format!("{name}_"),
    };
    archive.with_file_name(fallback)
}
