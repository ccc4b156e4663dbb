//! Recursive, containment-checked ZIP extraction.
//!
//! `deepzip-core` unpacks ZIP archives below a chosen root, refuses any entry
//! that would land outside it, recovers Chinese filenames that legacy
//! archivers stored as GBK without the UTF-8 flag, and can replace every
//! nested ZIP in the output with a directory holding its contents.
//!
//! # Examples
//!
//! ```no_run
//! use deepzip_core::Extractor;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), deepzip_core::ExtractionError> {
//! let mut extractor = Extractor::new();
//! if extractor.is_archive(Path::new("bundle.zip")) {
//!     let root = extractor.extract_recursive(Path::new("bundle.zip"), None)?;
//!     println!("unpacked into {}", root.display());
//! }
//! // temporary output is removed when `extractor` is dropped
//! # Ok(())
//! # }
//! ```
//!
//! With an explicit destination:
//!
//! ```no_run
//! use deepzip_core::ExtractorConfig;
//! use deepzip_core::extract_archive_recursive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = extract_archive_recursive("bundle.zip", "out", &ExtractorConfig::default())?;
//! println!("{} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod error;
pub mod extractor;
pub mod formats;
pub mod names;
pub mod report;
pub mod types;

#[doc(hidden)]
pub mod test_utils;

pub use api::extract_archive;
pub use api::extract_archive_recursive;
pub use config::ExtractorConfig;
pub use error::ExtractionError;
pub use error::Result;
pub use extractor::Extractor;
pub use formats::is_archive;
pub use names::decode_entry_name;
pub use report::ExtractionReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use report::RecoveredName;

pub use types::DestDir;
pub use types::SafePath;
