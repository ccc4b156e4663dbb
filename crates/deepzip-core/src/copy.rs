//! Buffered copy of entry data with read/write error separation.
//!
//! The source is always an archive entry stream, so a failed read means the
//! entry is corrupt (CRC mismatch, truncated data, unsupported method) and is
//! reported as [`ExtractionError::InvalidArchive`]. A failed write is an
//! environment problem and stays [`ExtractionError::Io`].

use std::io::Read;
use std::io::Write;
use std::io::{self};

use crate::ExtractionError;
use crate::ProgressCallback;

/// Buffer size for entry copies (64KB).
pub const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Reusable heap buffer for entry copies.
///
/// One buffer is allocated per archive and shared by all of its entries.
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a new zeroed copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies entry data from `reader` to `writer`, reporting every chunk.
///
/// Returns the number of bytes copied.
///
/// # Errors
///
/// - `ExtractionError::InvalidArchive` if reading the entry fails
/// - `ExtractionError::Io` if writing fails
///
/// # Examples
///
/// ```
/// use deepzip_core::NoopProgress;
/// use deepzip_core::copy::CopyBuffer;
/// use deepzip_core::copy::copy_with_buffer;
///
/// let mut buffer = CopyBuffer::new();
/// let mut output = Vec::new();
/// let copied = copy_with_buffer(
///     &mut &b"hello"[..],
///     &mut output,
///     &mut buffer,
///     &mut NoopProgress,
/// )?;
/// assert_eq!(copied, 5);
/// # Ok::<(), deepzip_core::ExtractionError>(())
/// ```
pub fn copy_with_buffer<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
    progress: &mut dyn ProgressCallback,
) -> Result<u64, ExtractionError> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(ExtractionError::InvalidArchive(format!(
                    "failed to read entry data: {e}"
                )));
            }
        };

        writer.write_all(&buffer.buf[..bytes_read])?;

        let chunk = bytes_read as u64;
        total += chunk;
        progress.on_bytes_written(chunk);
    }

    Ok(total)
}
