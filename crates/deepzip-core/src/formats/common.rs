//! Filesystem writes shared by the entry extraction loop.

use std::fs::File;
use std::fs::create_dir_all;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;

use crate::ExtractionReport;
use crate::ProgressCallback;
use crate::Result;
use crate::copy::COPY_BUFFER_SIZE;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::types::DestDir;
use crate::types::SafePath;

/// Writes one file entry below `dest`.
///
/// Missing parent directories are created. An existing file at the
/// destination is truncated and overwritten.
///
/// # Errors
///
/// - `ExtractionError::InvalidArchive` if the entry data cannot be read
/// - `ExtractionError::Io` if a directory or the file cannot be written
pub fn extract_file<R: Read + ?Sized>(
    reader: &mut R,
    safe_path: &SafePath,
    dest: &DestDir,
    report: &mut ExtractionReport,
    copy_buffer: &mut CopyBuffer,
    progress: &mut dyn ProgressCallback,
) -> Result<()> {
    let output_path = dest.join(safe_path);

    if let Some(parent) = output_path.parent() {
        create_dir_all(parent)?;
    }

    let output_file = File::create(&output_path)?;
    let mut buffered_writer = BufWriter::with_capacity(COPY_BUFFER_SIZE, output_file);
    let bytes_written = copy_with_buffer(reader, &mut buffered_writer, copy_buffer, progress)?;
    buffered_writer.flush()?;

    report.files_extracted += 1;
    report.bytes_written += bytes_written;

    Ok(())
}

/// Creates a directory entry below `dest`. Idempotent.
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub fn create_directory(
    safe_path: &SafePath,
    dest: &DestDir,
    report: &mut ExtractionReport,
) -> Result<()> {
    create_dir_all(dest.join(safe_path))?;
    report.directories_created += 1;
    Ok(())
}
