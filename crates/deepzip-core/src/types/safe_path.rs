//! Validated safe path type for archive extraction.

use crate::ExtractionError;
use crate::Result;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use super::DestDir;

/// A relative path that has been checked to stay inside a [`DestDir`].
///
/// `SafePath` represents a path that has been validated to not contain:
/// - Parent directory components (`..`), even ones that would normalize
///   back inside the root
/// - Root or drive-prefix components (absolute paths)
/// - Null bytes
///
/// `.` components are removed. There is no `From<PathBuf>`; validation is
/// the only constructor.
///
/// # Examples
///
/// ```no_run
/// use deepzip_core::types::DestDir;
/// use deepzip_core::types::SafePath;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new("/tmp")?;
///
/// let safe = SafePath::validate(Path::new("foo/bar.txt"), &dest)?;
/// assert!(SafePath::validate(Path::new("../etc/passwd"), &dest).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath(PathBuf);

impl SafePath {
    /// Validates and constructs a `SafePath`.
    ///
    /// # Validation Steps
    ///
    /// 1. Reject null bytes
    /// 2. Reject `..`, root, and prefix components
    /// 3. Drop `.` components
    /// 4. Canonicalize the nearest existing ancestor of `dest/path` (the
    ///    path itself if it exists) and require it to be inside `dest`;
    ///    a dangling symlink there is rejected
    ///
    /// Step 4 catches symlinks already present in a caller-supplied
    /// destination.
    ///
    /// # Errors
    ///
    /// - `ExtractionError::SecurityViolation` for null bytes
    /// - `ExtractionError::PathTraversal` for any escape
    /// - `ExtractionError::Io` if canonicalization fails for a reason other
    ///   than the path not existing
    pub fn validate(path: &Path, dest: &DestDir) -> Result<Self> {
        if has_null_bytes(path) {
            return Err(ExtractionError::SecurityViolation {
                reason: format!("path contains null bytes: {}", path.display()),
            });
        }

        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(ExtractionError::PathTraversal {
                        path: path.to_path_buf(),
                    });
                }
            }
        }

        let resolved = dest.as_path().join(&normalized);
        if !resolves_within(&resolved, dest)? {
            return Err(ExtractionError::PathTraversal {
                path: path.to_path_buf(),
            });
        }

        Ok(Self(normalized))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Returns `true` if the path normalized to the destination root itself.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.as_os_str().is_empty()
    }
}

fn resolves_within(resolved: &Path, dest: &DestDir) -> Result<bool> {
    for ancestor in resolved.ancestors() {
        match ancestor.symlink_metadata() {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(canonicalize_error(ancestor, &e)),
        }

        // The nearest existing ancestor decides. A dangling symlink counts as
        // an escape since writing through it would create its target.
        return match ancestor.canonicalize() {
            Ok(canonical) => Ok(canonical.starts_with(dest.as_path())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(canonicalize_error(ancestor, &e)),
        };
    }
    Ok(resolved.starts_with(dest.as_path()))
}

fn canonicalize_error(path: &Path, e: &std::io::Error) -> ExtractionError {
    ExtractionError::Io(std::io::Error::new(
        e.kind(),
        format!("failed to canonicalize {}: {e}", path.display()),
    ))
}

#[cfg(unix)]
fn has_null_bytes(path: &Path) -> bool {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().contains(&b'\0')
}

#[cfg(not(unix))]
fn has_null_bytes(path: &Path) -> bool {
    path.to_str().is_none_or(|s| s.contains('\0'))
}
