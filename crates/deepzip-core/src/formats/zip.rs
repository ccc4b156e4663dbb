//! ZIP container extraction.
//!
//! Every entry name is decoded (see [`crate::names`]) and validated into a
//! [`SafePath`] before the first byte is written, so a hostile name leaves
//! the target untouched. Entries are then written in stored order. A corrupt
//! entry or a write failure aborts the archive with earlier entries left on
//! disk.
//!
//! Symlink entries are written as regular files holding the link target.
//! Encrypted entries are rejected by the `zip` crate as unsupported and
//! surface as `InvalidArchive`.

use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::path::Path;
use std::path::PathBuf;

use zip::result::ZipError;

use super::common;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::ProgressCallback;
use crate::RecoveredName;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::names::decode_entry_name;
use crate::types::DestDir;
use crate::types::SafePath;

/// An opened ZIP container.
///
/// Opening parses the central directory, so a `ZipContainer` is always a
/// structurally valid archive. Entry data is only checked while it is read.
///
/// # Examples
///
/// ```no_run
/// use deepzip_core::NoopProgress;
/// use deepzip_core::formats::ZipContainer;
/// use deepzip_core::types::DestDir;
/// use deepzip_core::ExtractionReport;
/// use std::path::Path;
///
/// # fn main() -> Result<(), deepzip_core::ExtractionError> {
/// let mut container = ZipContainer::open(Path::new("archive.zip"))?;
/// let dest = DestDir::create("/tmp/output")?;
/// let mut report = ExtractionReport::new();
/// container.extract(&dest, true, &mut NoopProgress, &mut report)?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ZipContainer<R: Read + Seek> {
    inner: zip::ZipArchive<R>,
}

impl ZipContainer<BufReader<File>> {
    /// Opens the archive at `path`.
    ///
    /// # Errors
    ///
    /// - `ExtractionError::Io` if the file cannot be opened
    /// - `ExtractionError::InvalidArchive` if it is not a ZIP container
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> ZipContainer<R> {
    /// Parses a ZIP container from a seekable source.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidArchive` if the central directory
    /// cannot be parsed, including when the source is too short to hold one.
    pub fn new(source: R) -> Result<Self> {
        let inner = zip::ZipArchive::new(source).map_err(|e| match e {
            ZipError::Io(io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
                ExtractionError::InvalidArchive(format!("truncated archive: {io}"))
            }
            other => other.into(),
        })?;
        Ok(Self { inner })
    }

    /// Number of entries in the central directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the archive has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Extracts every entry below `dest`, accumulating into `report`.
    ///
    /// When `recover_names` is set, names that look like GBK misread as
    /// CP437 are decoded and recorded in `report.recovered_names`.
    ///
    /// # Errors
    ///
    /// - `ExtractionError::PathTraversal` if an entry would escape `dest`
    /// - `ExtractionError::SecurityViolation` if an entry name has a NUL
    /// - `ExtractionError::InvalidArchive` if an entry is corrupt or a file
    ///   entry has an empty name
    /// - `ExtractionError::Io` if writing fails
    pub fn extract(
        &mut self,
        dest: &DestDir,
        recover_names: bool,
        progress: &mut dyn ProgressCallback,
        report: &mut ExtractionReport,
    ) -> Result<()> {
        let planned = self.plan(dest, recover_names, report)?;
        let total = planned.len();
        let mut copy_buffer = CopyBuffer::new();

        for (index, target) in planned.iter().enumerate() {
            let mut entry = self.inner.by_index(index).map_err(|e| match e {
                ZipError::Io(io) => {
                    ExtractionError::InvalidArchive(format!("cannot read entry {index}: {io}"))
                }
                other => other.into(),
            })?;

            progress.on_entry_start(&target.name, total, index + 1);

            if target.is_dir {
                common::create_directory(&target.safe_path, dest, report)?;
            } else {
                common::extract_file(
                    &mut entry,
                    &target.safe_path,
                    dest,
                    report,
                    &mut copy_buffer,
                    progress,
                )?;
            }

            progress.on_entry_complete(&target.name);
        }

        Ok(())
    }

    /// Decodes and validates every entry name, in central directory order.
    ///
    /// Runs to completion before anything is written.
    fn plan(
        &self,
        dest: &DestDir,
        recover_names: bool,
        report: &mut ExtractionReport,
    ) -> Result<Vec<PlannedEntry>> {
        let mut planned = Vec::with_capacity(self.inner.len());

        for stored in self.inner.file_names() {
            let name = if recover_names {
                decode_entry_name(stored)
            } else {
                Cow::Borrowed(stored)
            };
            let safe_path = SafePath::validate(Path::new(name.as_ref()), dest)?;
            let is_dir = stored.ends_with(['/', '\\']);
            if !is_dir && safe_path.is_root() {
                return Err(ExtractionError::InvalidArchive(format!(
                    "file entry has an empty name: {stored:?}"
                )));
            }

            if let Cow::Owned(decoded) = &name {
                report.recovered_names.push(RecoveredName {
                    stored: stored.to_owned(),
                    decoded: decoded.clone(),
                });
            }

            planned.push(PlannedEntry {
                name: PathBuf::from(name.as_ref()),
                safe_path,
                is_dir,
            });
        }

        Ok(planned)
    }
}

#[derive(Debug)]
struct PlannedEntry {
    name: PathBuf,
    safe_path: SafePath,
    /// Same rule the `zip` crate applies: a trailing `/` or `\`.
    is_dir: bool,
}
