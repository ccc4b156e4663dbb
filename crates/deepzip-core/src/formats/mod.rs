//! ZIP container handling.

mod common;
pub mod detect;
pub mod zip;

pub use detect::has_archive_extension;
pub use detect::has_zip_signature;
pub use detect::is_archive;
pub use zip::ZipContainer;
