//! Console configuration and errors
//!
//! ```toml
//! [lookup]
//! base_url = "http://catalog.internal/api"
//! request_timeout_ms = 5000
//!
//! [validation]
//! debounce_ms = 500
//! lookup_timeout_ms = 8000
//! ```

use pharma_diff::DiffError;
use pharma_lookup::{HttpLookupConfig, LookupError};
use pharma_validation::ValidatorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Console command errors
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// File could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`ConsoleConfig`]
    #[error("invalid config {path}: {source}")]
    Config {
        /// Config path
        path: PathBuf,
        /// Parse error
        source: toml::de::Error,
    },

    /// Entity file is not valid JSON
    #[error("invalid JSON in {path}: {source}")]
    Json {
        /// Entity file path
        path: PathBuf,
        /// Parse error
        source: serde_json::Error,
    },

    /// Entity file holds JSON that is not an object
    #[error("{path}: {source}")]
    Entity {
        /// Entity file path
        path: PathBuf,
        /// Snapshot error
        source: DiffError,
    },

    /// Lookup collaborator could not be built
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Console configuration, read from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Lookup service settings
    pub lookup: HttpLookupConfig,
    /// Debounce and lookup deadline
    pub validation: ValidatorConfig,
}

impl ConsoleConfig {
    /// Load from a TOML file, or defaults when no path is given
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: Option<&Path>) -> Result<Self, ConsoleError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConsoleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConsoleError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// With service root
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.lookup.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_path_uses_defaults() {
        let config = ConsoleConfig::load(None).unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.validation.debounce_ms, 500);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[lookup]\nbase_url = \"http://catalog.internal/api\"\n\n[validation]\nlookup_timeout_ms = 8000"
        )
        .unwrap();

        let config = ConsoleConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.lookup.base_url, "http://catalog.internal/api");
        assert_eq!(config.lookup.product_route, "productos/sku");
        assert_eq!(config.validation.lookup_timeout_ms, Some(8000));
        assert_eq!(config.validation.debounce_ms, 500);
    }

    #[test]
    fn malformed_file_is_reported_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[lookup\nbase_url = 3").unwrap();

        let err = ConsoleConfig::load(Some(file.path())).unwrap_err();

        assert!(matches!(err, ConsoleError::Config { .. }));
    }

    #[test]
    fn base_url_override() {
        let config = ConsoleConfig::default().with_base_url("http://x");
        assert_eq!(config.lookup.base_url, "http://x");
    }
}
