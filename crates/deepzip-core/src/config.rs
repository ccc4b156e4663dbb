//! Extractor configuration.

use std::path::PathBuf;

/// Default prefix for temporary extraction directories.
pub const DEFAULT_TEMP_PREFIX: &str = "deepzip_";

/// Default limit on how deep nested archives are unpacked.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 32;

/// Configuration for an [`Extractor`](crate::Extractor).
///
/// # Examples
///
/// ```
/// use deepzip_core::ExtractorConfig;
///
/// let config = ExtractorConfig::default()
///     .with_max_nesting_depth(4)
///     .with_temp_prefix("batch_");
/// assert_eq!(config.max_nesting_depth, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Deepest nested archive `extract_recursive` will descend into. The
    /// top-level archive is depth 0.
    pub max_nesting_depth: usize,

    /// Prefix for temporary directories the extractor allocates itself.
    pub temp_prefix: String,

    /// Parent directory for temporary directories. `None` uses the system
    /// temp directory.
    pub temp_root: Option<PathBuf>,

    /// Apply the GBK-read-as-CP437 recovery heuristic to entry names.
    pub recover_legacy_names: bool,
}

impl Default for ExtractorConfig {
    /// Default values:
    /// - `max_nesting_depth`: 32
    /// - `temp_prefix`: `"deepzip_"`
    /// - `temp_root`: `None`
    /// - `recover_legacy_names`: true
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            temp_prefix: DEFAULT_TEMP_PREFIX.to_string(),
            temp_root: None,
            recover_legacy_names: true,
        }
    }
}

impl ExtractorConfig {
    /// Sets the nesting depth limit.
    #[must_use]
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Sets the temporary directory prefix.
    #[must_use]
    pub fn with_temp_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.temp_prefix = prefix.into();
        self
    }

    /// Places temporary directories under `root` instead of the system
    /// temp directory.
    #[must_use]
    pub fn with_temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    /// Enables or disables legacy filename recovery.
    #[must_use]
    pub fn with_legacy_name_recovery(mut self, enabled: bool) -> Self {
        self.recover_legacy_names = enabled;
        self
    }
}
