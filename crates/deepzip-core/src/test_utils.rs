//! Test utilities for building ZIP archives in memory.
//!
//! Used by unit tests, integration tests, benches, and the CLI tests.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use encoding_rs::GBK;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// Creates an in-memory ZIP archive from a list of `(name, content)` pairs.
///
/// Files are stored uncompressed with mode 0o644.
///
/// # Examples
///
/// ```
/// use deepzip_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(&[("file.txt", "hello"), ("dir/nested.txt", "world")]);
/// ```
#[must_use]
pub fn create_test_zip<D: AsRef<[u8]>>(entries: &[(&str, D)]) -> Vec<u8> {
    entries
        .iter()
        .fold(ZipTestBuilder::new(), |builder, (name, data)| {
            builder.add_file(name, data.as_ref())
        })
        .build()
}

/// Writes `data` to `dir/name` and returns the full path.
pub fn write_archive(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, data).unwrap();
    path
}

/// Builder for ZIP test archives.
///
/// Besides plain files and directories it can produce entries whose names
/// are stored as raw GBK bytes without the UTF-8 flag, the way legacy
/// Windows archivers wrote them, and archives with corrupted entry data.
///
/// # Examples
///
/// ```
/// use deepzip_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_file("file.txt", b"content")
///     .add_directory("dir/")
///     .add_legacy_name("测试文件.docx", b"legacy")
///     .build();
/// ```
pub struct ZipTestBuilder {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
    compression: CompressionMethod,
    name_patches: Vec<(Vec<u8>, Vec<u8>)>,
    payloads: Vec<Vec<u8>>,
}

impl ZipTestBuilder {
    /// Creates a new ZIP test builder. Files are stored uncompressed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
            compression: CompressionMethod::Stored,
            name_patches: Vec::new(),
            payloads: Vec::new(),
        }
    }

    /// Compresses subsequently added files with DEFLATE.
    #[must_use]
    pub fn deflated(mut self) -> Self {
        self.compression = CompressionMethod::Deflated;
        self
    }

    fn file_options(&self, mode: u32) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(self.compression)
            .unix_permissions(mode)
    }

    /// Adds a regular file to the archive.
    #[must_use]
    pub fn add_file(mut self, path: &str, data: &[u8]) -> Self {
        let options = self.file_options(0o644);
        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self.payloads.push(data.to_vec());
        self
    }

    /// Adds a directory to the archive.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    /// Adds a symlink entry. The link target is stored as the entry data.
    #[cfg(unix)]
    #[must_use]
    pub fn add_symlink(mut self, path: &str, target: &str) -> Self {
        let options = SimpleFileOptions::default();
        self.zip.add_symlink(path, target, options).unwrap();
        self
    }

    /// Adds a file whose name is stored as GBK bytes without the UTF-8 flag.
    ///
    /// Readers decode such a name as CP437, so `测试文件.docx` comes back as
    /// `▓Γ╩╘╬─╝■.docx`.
    #[must_use]
    pub fn add_legacy_name(mut self, name: &str, data: &[u8]) -> Self {
        let (gbk, _, had_errors) = GBK.encode(name);
        assert!(!had_errors, "{name} is not representable in GBK");

        // An ASCII placeholder of the same byte length keeps every header
        // offset valid once the bytes are swapped after `finish`.
        let tag = self.name_patches.len().to_string();
        assert!(tag.len() <= gbk.len(), "legacy name too short: {name}");
        let placeholder = format!("{tag:~>width$}", width = gbk.len());

        let options = self.file_options(0o644);
        self.zip.start_file(placeholder.as_str(), options).unwrap();
        self.zip.write_all(data).unwrap();
        self.name_patches
            .push((placeholder.into_bytes(), gbk.into_owned()));
        self.payloads.push(data.to_vec());
        self
    }

    /// Builds and returns the ZIP archive data.
    #[must_use]
    pub fn build(mut self) -> Vec<u8> {
        let patches = std::mem::take(&mut self.name_patches);
        let mut data = self.zip.finish().unwrap().into_inner();
        for (placeholder, replacement) in &patches {
            replace_all(&mut data, placeholder, replacement);
        }
        data
    }

    /// Builds the archive, then flips a byte in the first non-empty stored
    /// file payload so reading that entry fails its CRC check.
    ///
    /// Only meaningful for uncompressed entries.
    #[must_use]
    pub fn build_corrupted(self) -> Vec<u8> {
        let payload = self
            .payloads
            .iter()
            .find(|p| !p.is_empty())
            .cloned()
            .unwrap();
        let mut data = self.build();
        let offset = data
            .windows(payload.len())
            .position(|w| w == payload.as_slice())
            .unwrap();
        data[offset] ^= 0xFF;
        data
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn replace_all(data: &mut [u8], from: &[u8], to: &[u8]) {
    debug_assert_eq!(from.len(), to.len());
    let mut start = 0;
    while let Some(pos) = data[start..].windows(from.len()).position(|w| w == from) {
        let at = start + pos;
        data[at..at + to.len()].copy_from_slice(to);
        start = at + to.len();
    }
}
