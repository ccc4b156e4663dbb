//! Extraction root type.

use crate::ExtractionError;
use crate::Result;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use super::SafePath;

/// The root an archive is extracted into.
///
/// Holds the canonical form of an existing directory, so containment checks
/// compare resolved paths against a root with no symlinks or `..` left in it.
///
/// # Examples
///
/// ```no_run
/// use deepzip_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::create("/tmp/extraction")?;
/// println!("Extracting to: {}", dest.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Wraps an existing directory.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Io` with `NotFound` if nothing exists at
    /// `path`, `InvalidInput` if it is not a directory, or the underlying
    /// error if it cannot be resolved.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let canonical = path.canonicalize().map_err(|e| {
            io::Error::new(e.kind(), format!("cannot resolve {}: {e}", path.display()))
        })?;

        if !fs::metadata(&canonical)?.is_dir() {
            return Err(ExtractionError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a directory: {}", path.display()),
            )));
        }

        Ok(Self(canonical))
    }

    /// Like [`DestDir::new`], creating the directory and its parents first.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Io` if creation fails or the path is taken
    /// by a file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        fs::create_dir_all(path.as_ref())?;
        Self::new(path)
    }

    /// The canonical root.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Where `entry` lands on disk.
    #[inline]
    #[must_use]
    pub fn join(&self, entry: &SafePath) -> PathBuf {
        self.0.join(entry.as_path())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_existing_directory_is_canonical() {
        let temp = TempDir::new().unwrap();
        let dest = DestDir::new(temp.path().join("."))
            .expect("existing directory should be accepted");
        assert!(dest.as_path().is_absolute());
        assert_eq!(dest.as_path(), temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_missing_directory_is_not_found() {
        let temp = TempDir::new().unwrap();
        let result = DestDir::new(temp.path().join("missing"));
        assert!(
            matches!(result, Err(ExtractionError::Io(e)) if e.kind() == io::ErrorKind::NotFound)
        );
    }

    #[test]
    fn test_file_is_invalid_input() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        let result = DestDir::new(&file);
        assert!(
            matches!(result, Err(ExtractionError::Io(e)) if e.kind() == io::ErrorKind::InvalidInput)
        );
        assert!(DestDir::create(&file).is_err());
    }

    #[test]
    fn test_create_makes_parents_and_is_repeatable() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("x/y/z");

        let first = DestDir::create(&nested).unwrap();
        let second = DestDir::create(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(first, second);
    }

    #[test]
    fn test_join_appends_entry() {
        let temp = TempDir::new().unwrap();
        let dest = DestDir::new(temp.path()).unwrap();
        let entry = SafePath::validate(Path::new("./docs/a.txt"), &dest).unwrap();
        assert_eq!(dest.join(&entry), dest.as_path().join("docs/a.txt"));
    }

    #[test]
    #[cfg(unix)]
    fn test_symlinked_root_resolves_to_target() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let real = temp.path().join("real");
        fs::create_dir(&real).unwrap();
        let link = temp.path().join("link");
        symlink(&real, &link).unwrap();

        let dest = DestDir::new(&link).unwrap();
        assert_eq!(dest.as_path(), real.canonicalize().unwrap());
    }
}
