//! Type-safe wrappers for archive extraction operations.
//!
//! Every path the extractor writes to is a [`DestDir`] joined with a
//! [`SafePath`], and neither can be built without validation. There are no
//! `From<PathBuf>` implementations for either type.

pub mod dest_dir;
pub mod safe_path;

pub use dest_dir::DestDir;
pub use safe_path::SafePath;
