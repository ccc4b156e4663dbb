//! Error types for archive extraction operations.

use std::path::PathBuf;
use thiserror::Error;
use zip::result::ZipError;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Errors that can occur during archive extraction.
///
/// Every variant aborts the extraction call that produced it. Nothing is
/// retried: a corrupt container or a traversal attempt cannot succeed on a
/// second pass.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive is corrupted, truncated, or not a ZIP container at all.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// An entry name would resolve outside the extraction root.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The decoded entry name that attempted traversal.
        path: PathBuf,
    },

    /// Operation not permitted by security policy.
    #[error("operation denied by security policy: {reason}")]
    SecurityViolation {
        /// Reason for the violation.
        reason: String,
    },

    /// Nested archives go deeper than the configured limit.
    #[error("archive nesting too deep: {path} is at depth {depth} (max {max})")]
    NestingTooDeep {
        /// The nested archive that would have been descended into.
        path: PathBuf,
        /// Depth of that archive (the top-level archive is depth 0).
        depth: usize,
        /// Configured maximum depth.
        max: usize,
    },
}

impl From<ZipError> for ExtractionError {
    fn from(err: ZipError) -> Self {
        match err {
            ZipError::Io(io) => Self::Io(io),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}

impl ExtractionError {
    /// Returns `true` if this error was caused by hostile archive content
    /// rather than by corruption or the environment.
    ///
    /// # Examples
    ///
    /// ```
    /// use deepzip_core::ExtractionError;
    /// use std::path::PathBuf;
    ///
    /// let err = ExtractionError::PathTraversal {
    ///     path: PathBuf::from("../etc/passwd"),
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// let err = ExtractionError::InvalidArchive("bad header".into());
    /// assert!(!err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(
            self,
            Self::PathTraversal { .. } | Self::SecurityViolation { .. } | Self::NestingTooDeep { .. }
        )
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use deepzip_core::ExtractionError;
    ///
    /// let err = ExtractionError::InvalidArchive("bad header".to_string());
    /// assert_eq!(err.context(), Some("bad header"));
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidArchive(msg) => Some(msg),
            Self::SecurityViolation { reason } => Some(reason),
            _ => None,
        }
    }
}
