//! Configuration types for snapshot-lint.

use crate::finder::FinderOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration (`snapshot-lint.toml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Finder options.
    #[serde(default)]
    pub check: CheckConfig,

    /// Where descriptors are resolved from.
    #[serde(default)]
    pub repository: RepositoryConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Builds finder options from the `[check]` section.
    #[must_use]
    pub fn finder_options(&self) -> FinderOptions {
        FinderOptions::new()
            .verbose(self.check.verbose)
            .fail_early(self.check.fail_early)
            .group_ids(self.check.group_ids.iter().cloned())
    }
}

/// `[check]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Print full inheritance paths for every finding.
    #[serde(default)]
    pub verbose: bool,

    /// Stop at the first SNAPSHOT coupling.
    #[serde(default)]
    pub fail_early: bool,

    /// Only report coordinates in these groups (empty = all groups).
    #[serde(default)]
    pub group_ids: Vec<String>,
}

/// `[repository]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Local repository root (default: `~/.snapshot-lint/repository`).
    #[serde(default)]
    pub local: Option<PathBuf>,

    /// Additional repository roots, searched after the local one.
    #[serde(default)]
    pub remotes: Vec<PathBuf>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.check.verbose);
        assert!(!config.check.fail_early);
        assert!(config.check.group_ids.is_empty());
        assert!(config.repository.local.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[check]
verbose = true
group_ids = ["org.scijava", "net.imglib2"]

[repository]
local = "/var/cache/repo"
remotes = ["/srv/mirror"]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert!(config.check.verbose);
        assert!(!config.check.fail_early);
        assert_eq!(config.repository.local, Some(PathBuf::from("/var/cache/repo")));
        assert_eq!(config.repository.remotes, vec![PathBuf::from("/srv/mirror")]);

        let options = config.finder_options();
        assert!(options.verbose);
        assert!(options.group_ids.contains("net.imglib2"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = Config::parse("[check]\nverbose = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_from_file_reports_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }
}
