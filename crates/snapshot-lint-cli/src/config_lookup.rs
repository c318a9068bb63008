//! Finds the `snapshot-lint.toml` that applies to a checked project.
//!
//! Lookup order:
//!
//! 1. `--config`
//! 2. the directory holding the project descriptor, then each directory
//!    above it, so modules of a multi-module checkout share the config at
//!    its top (`snapshot-lint.toml` wins over `.snapshot-lint.toml` on
//!    every level)
//! 3. `config.toml` in the user config directory
//! 4. built-in defaults

use anyhow::{Context, Result};
use snapshot_lint_core::Config;
use snapshot_lint_repo::layout;
use std::path::{Path, PathBuf};

/// Overrides the user config directory (default `~/.snapshot-lint`).
pub const CONFIG_DIR_ENV: &str = "SNAPSHOT_LINT_CONFIG_DIR";

const PROJECT_FILE_NAMES: [&str; 2] = ["snapshot-lint.toml", ".snapshot-lint.toml"];
const USER_FILE_NAME: &str = "config.toml";

/// The config file a check run uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed with `--config`.
    Explicit(PathBuf),
    /// Next to the project descriptor or in a directory above it.
    Project(PathBuf),
    /// From the user config directory.
    User(PathBuf),
    /// Nothing found.
    Builtin,
}

impl ConfigSource {
    /// Picks the config for checking `target`, a descriptor file or a
    /// directory holding `project.toml`.
    #[must_use]
    pub fn locate(target: &Path, explicit: Option<&Path>) -> Self {
        Self::locate_with(target, explicit, user_config_dir().as_deref())
    }

    fn locate_with(target: &Path, explicit: Option<&Path>, user_dir: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return Self::Explicit(path.to_path_buf());
        }

        let project_dir = descriptor_dir(target);
        let in_checkout = project_dir
            .ancestors()
            .flat_map(|dir| PROJECT_FILE_NAMES.iter().map(move |name| dir.join(name)))
            .find(|candidate| candidate.is_file())
            .map(Self::Project);

        in_checkout
            .or_else(|| {
                user_dir
                    .map(|dir| dir.join(USER_FILE_NAME))
                    .filter(|candidate| candidate.is_file())
                    .map(Self::User)
            })
            .unwrap_or(Self::Builtin)
    }

    /// Reads the selected config; [`Builtin`](Self::Builtin) yields defaults.
    pub fn load(&self) -> Result<Config> {
        let path = match self {
            Self::Builtin => {
                tracing::debug!("No config file found, using defaults");
                return Ok(Config::default());
            }
            Self::User(path) => {
                tracing::info!("Using user config: {}", path.display());
                path
            }
            Self::Explicit(path) | Self::Project(path) => {
                tracing::debug!("Using config: {}", path.display());
                path
            }
        };
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Absolute directory of the descriptor `target` resolves to.
fn descriptor_dir(target: &Path) -> PathBuf {
    let descriptor = layout::project_file(target);
    let dir = match descriptor.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf())
}

/// `$SNAPSHOT_LINT_CONFIG_DIR`, else `~/.snapshot-lint`.
fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".snapshot-lint")))
}
