//! Filesystem-backed descriptor provider.

use crate::dto::DescriptorDto;
use crate::layout;
use crate::loader::{self, ConvertError, ParentRef};

use snapshot_lint_core::{
    Coordinate, Dependency, DescriptorProvider, ProjectDescriptor, Repository, RepositoryConfig,
    ResolutionError,
};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Errors loading a descriptor file and its parent chain.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The descriptor file could not be read.
    #[error("Failed to read descriptor {path}: {source}")]
    Io {
        /// Descriptor path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The descriptor file is not valid TOML for a descriptor.
    #[error("Failed to parse descriptor {path}: {source}")]
    Toml {
        /// Descriptor path.
        path: PathBuf,
        /// Underlying parse error.
        source: toml::de::Error,
    },

    /// The descriptor parsed but failed validation.
    #[error("Invalid descriptor {path}: {source}")]
    Convert {
        /// Descriptor path.
        path: PathBuf,
        /// Validation error.
        source: ConvertError,
    },

    /// The file at a coordinate's location declares another coordinate.
    #[error("Descriptor {path} declares {found}, expected {expected}")]
    Mismatch {
        /// Descriptor path.
        path: PathBuf,
        /// Coordinate that was requested.
        expected: Coordinate,
        /// Coordinate found in the file.
        found: Coordinate,
    },

    /// A parent chain refers back to one of its own descendants.
    #[error("Parent chain loops back to {coordinate}")]
    ParentCycle {
        /// The repeated coordinate.
        coordinate: Coordinate,
    },

    /// A declared parent could not be found anywhere.
    #[error("Parent {coordinate} of {child} not found")]
    ParentNotFound {
        /// Parent coordinate.
        coordinate: Coordinate,
        /// Declaring project.
        child: Coordinate,
    },
}

/// Resolves descriptors from repository directories on disk.
///
/// Lookups search the local repository, then each configured remote, then
/// the repositories passed by the caller, in that order.
#[derive(Debug, Clone)]
pub struct FsRepository {
    local: PathBuf,
    remotes: Vec<PathBuf>,
}

impl FsRepository {
    /// Creates a repository rooted at `local`.
    #[must_use]
    pub fn new(local: impl Into<PathBuf>) -> Self {
        Self {
            local: local.into(),
            remotes: Vec::new(),
        }
    }

    /// Builds a repository from the `[repository]` config section, falling
    /// back to [`default_local`](Self::default_local) for the local root.
    #[must_use]
    pub fn from_config(config: &RepositoryConfig) -> Self {
        let local = config
            .local
            .clone()
            .or_else(Self::default_local)
            .unwrap_or_else(|| PathBuf::from(".snapshot-lint/repository"));
        Self::new(local).with_remotes(config.remotes.iter().cloned())
    }

    /// Default local repository: `~/.snapshot-lint/repository`.
    #[must_use]
    pub fn default_local() -> Option<PathBuf> {
        home::home_dir().map(|h| h.join(".snapshot-lint").join("repository"))
    }

    /// Adds a remote repository root.
    #[must_use]
    pub fn with_remote(mut self, root: impl Into<PathBuf>) -> Self {
        self.remotes.push(root.into());
        self
    }

    /// Adds several remote repository roots.
    #[must_use]
    pub fn with_remotes<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.remotes.extend(roots.into_iter().map(Into::into));
        self
    }

    /// The local repository root.
    #[must_use]
    pub fn local(&self) -> &Path {
        &self.local
    }

    /// Finds the descriptor file for `coordinate`, if any root holds one.
    #[must_use]
    pub fn locate(&self, coordinate: &Coordinate, repositories: &[Repository]) -> Option<PathBuf> {
        if !layout::is_storable(coordinate) {
            warn!("{coordinate} cannot be stored in a repository; skipping lookup");
            return None;
        }
        let declared = repositories.iter().map(|r| PathBuf::from(&r.location));
        std::iter::once(self.local.clone())
            .chain(self.remotes.iter().cloned())
            .chain(declared)
            .map(|root| layout::descriptor_path(&root, coordinate))
            .find(|candidate| candidate.is_file())
    }

    /// Loads a project checkout (a descriptor file or a directory holding
    /// `project.toml`) with its parent chain resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor or any of its parents cannot be
    /// read, parsed or found.
    pub fn load_project(&self, location: &Path) -> Result<ProjectDescriptor, LoadError> {
        let path = layout::project_file(location);
        debug!("Loading project descriptor {}", path.display());
        self.load(&path, None, &[], &mut Vec::new())
    }

    /// Loads the descriptor at `path` and resolves its parent chain.
    ///
    /// `chain` holds the descendants already being loaded, so a parent that
    /// refers back to one of them is reported instead of recursing forever.
    fn load(
        &self,
        path: &Path,
        expected: Option<&Coordinate>,
        repositories: &[Repository],
        chain: &mut Vec<Coordinate>,
    ) -> Result<ProjectDescriptor, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let dto: DescriptorDto = toml::from_str(&content).map_err(|e| LoadError::Toml {
            path: path.to_path_buf(),
            source: e,
        })?;
        let file = loader::convert(dto).map_err(|e| LoadError::Convert {
            path: path.to_path_buf(),
            source: e,
        })?;

        if let Some(expected) = expected {
            if &file.coordinate != expected {
                return Err(LoadError::Mismatch {
                    path: path.to_path_buf(),
                    expected: expected.clone(),
                    found: file.coordinate,
                });
            }
        }
        if chain.contains(&file.coordinate) {
            return Err(LoadError::ParentCycle {
                coordinate: file.coordinate,
            });
        }

        let mut descriptor = ProjectDescriptor::new(file.coordinate.clone());
        descriptor.dependencies = file.dependencies;
        descriptor.repositories = file.repositories;

        if let Some(parent) = &file.parent {
            let mut searched = repositories.to_vec();
            searched.extend(descriptor.repositories.iter().cloned());

            chain.push(file.coordinate.clone());
            let resolved = self.resolve_parent(parent, &file.coordinate, path.parent(), &searched, chain);
            chain.pop();
            descriptor.parent = Some(Box::new(resolved?));
        }

        Ok(descriptor)
    }

    /// Resolves a parent reference: relative path first, then repositories.
    fn resolve_parent(
        &self,
        parent: &ParentRef,
        child: &Coordinate,
        base_dir: Option<&Path>,
        repositories: &[Repository],
        chain: &mut Vec<Coordinate>,
    ) -> Result<ProjectDescriptor, LoadError> {
        if chain.contains(&parent.coordinate) {
            return Err(LoadError::ParentCycle {
                coordinate: parent.coordinate.clone(),
            });
        }

        if let (Some(relative), Some(base)) = (&parent.path, base_dir) {
            let candidate = layout::project_file(&base.join(relative));
            if candidate.is_file() {
                let loaded = self.load(&candidate, None, repositories, chain)?;
                if loaded.coordinate == parent.coordinate {
                    return Ok(loaded);
                }
                warn!(
                    "{} declares {}, expected parent {}; falling back to repositories",
                    candidate.display(),
                    loaded.coordinate,
                    parent.coordinate
                );
            }
        }

        let path = self
            .locate(&parent.coordinate, repositories)
            .ok_or_else(|| LoadError::ParentNotFound {
                coordinate: parent.coordinate.clone(),
                child: child.clone(),
            })?;
        self.load(&path, Some(&parent.coordinate), repositories, chain)
    }
}

impl DescriptorProvider for FsRepository {
    fn resolve(
        &self,
        dependency: &Dependency,
        repositories: &[Repository],
    ) -> Result<ProjectDescriptor, ResolutionError> {
        let coordinate = &dependency.coordinate;
        debug!(
            scope = %dependency.scope,
            kind = %dependency.kind,
            "Resolving {coordinate}"
        );

        let path = self
            .locate(coordinate, repositories)
            .ok_or_else(|| ResolutionError::NotFound {
                coordinate: coordinate.clone(),
            })?;

        self.load(&path, Some(coordinate), repositories, &mut Vec::new())
            .map_err(|e| match e {
                LoadError::Mismatch { .. } | LoadError::Convert { .. } => {
                    ResolutionError::Invalid {
                        coordinate: coordinate.clone(),
                        message: e.to_string(),
                    }
                }
                other => ResolutionError::Backend {
                    coordinate: coordinate.clone(),
                    source: Box::new(other),
                },
            })
    }
}
