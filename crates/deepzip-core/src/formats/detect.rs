//! Archive detection.
//!
//! Detection never fails: anything that cannot be opened or parsed is simply
//! not an archive.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::zip::ZipContainer;

/// File extension (compared case-insensitively) of archives the extractor
/// handles.
pub const ZIP_EXTENSION: &str = "zip";

/// Local file header signature, the first bytes of most ZIP files.
const LOCAL_FILE_HEADER_SIGNATURE: [u8; 4] = *b"PK\x03\x04";

/// End-of-central-directory signature, the first bytes of an empty ZIP.
const END_OF_CENTRAL_DIRECTORY_SIGNATURE: [u8; 4] = *b"PK\x05\x06";

/// Returns `true` if the path's extension is `zip`, ignoring ASCII case.
///
/// # Examples
///
/// ```
/// use deepzip_core::formats::detect::has_archive_extension;
/// use std::path::Path;
///
/// assert!(has_archive_extension(Path::new("REPORT.ZIP")));
/// assert!(!has_archive_extension(Path::new("report.zip.txt")));
/// ```
#[must_use]
pub fn has_archive_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ZIP_EXTENSION))
}

/// Returns `true` if the file starts with a ZIP signature.
///
/// This only reads four bytes. It does not prove the file is a valid
/// container, and self-extracting archives with a stub in front are not
/// recognized.
#[must_use]
pub fn has_zip_signature(path: &Path) -> bool {
    let mut magic = [0u8; 4];
    File::open(path)
        .and_then(|mut file| file.read_exact(&mut magic))
        .is_ok_and(|()| {
            magic == LOCAL_FILE_HEADER_SIGNATURE || magic == END_OF_CENTRAL_DIRECTORY_SIGNATURE
        })
}

/// Returns `true` if `path` has a `zip` extension and opens as a
/// structurally valid ZIP container.
///
/// Missing, unreadable, and malformed files all give `false`.
#[must_use]
pub fn is_archive(path: &Path) -> bool {
    has_archive_extension(path) && path.is_file() && ZipContainer::open(path).is_ok()
}
