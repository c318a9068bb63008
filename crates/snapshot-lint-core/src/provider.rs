//! The descriptor provider seam.
//!
//! The finder never reads descriptors itself; it asks a [`DescriptorProvider`]
//! to turn each declared dependency into a resolved [`ProjectDescriptor`].

use crate::coordinate::Coordinate;
use crate::descriptor::{Dependency, ProjectDescriptor, Repository};
use std::collections::HashMap;

/// Resolves declared dependencies into project descriptors.
///
/// Implementations must return a descriptor whose parent chain is already
/// resolved. A failure is reported per dependency and never aborts a walk.
pub trait DescriptorProvider {
    /// Resolves `dependency`, searching `repositories` in addition to whatever
    /// locations the provider was configured with.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolutionError`] carrying the requested coordinate when the
    /// descriptor cannot be located or parsed.
    fn resolve(
        &self,
        dependency: &Dependency,
        repositories: &[Repository],
    ) -> Result<ProjectDescriptor, ResolutionError>;
}

impl<P: DescriptorProvider + ?Sized> DescriptorProvider for &P {
    fn resolve(
        &self,
        dependency: &Dependency,
        repositories: &[Repository],
    ) -> Result<ProjectDescriptor, ResolutionError> {
        (**self).resolve(dependency, repositories)
    }
}

/// Errors returned by a [`DescriptorProvider`].
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// No descriptor exists for the coordinate in any searched location.
    #[error("no descriptor found for {coordinate}")]
    NotFound {
        /// Requested coordinate.
        coordinate: Coordinate,
    },

    /// A descriptor was found but could not be used.
    #[error("invalid descriptor for {coordinate}: {message}")]
    Invalid {
        /// Requested coordinate.
        coordinate: Coordinate,
        /// What was wrong with it.
        message: String,
    },

    /// The provider's backing store failed.
    #[error("failed to resolve {coordinate}: {source}")]
    Backend {
        /// Requested coordinate.
        coordinate: Coordinate,
        /// Underlying failure.
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ResolutionError {
    /// Returns the coordinate that failed to resolve.
    #[must_use]
    pub fn coordinate(&self) -> &Coordinate {
        match self {
            Self::NotFound { coordinate }
            | Self::Invalid { coordinate, .. }
            | Self::Backend { coordinate, .. } => coordinate,
        }
    }
}

/// In-memory provider keyed by declared coordinate.
///
/// Useful for tests and for embedding callers that already hold a resolved
/// graph. Repositories are ignored.
#[derive(Debug, Clone, Default)]
pub struct MapProvider {
    descriptors: HashMap<Coordinate, ProjectDescriptor>,
}

impl MapProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor under its own coordinate.
    #[must_use]
    pub fn with(mut self, descriptor: ProjectDescriptor) -> Self {
        self.insert(descriptor);
        self
    }

    /// Registers a descriptor under a declared coordinate that differs from
    /// its own (e.g. a relocated artifact).
    #[must_use]
    pub fn with_alias(mut self, declared: Coordinate, descriptor: ProjectDescriptor) -> Self {
        self.descriptors.insert(declared, descriptor);
        self
    }

    /// Registers a descriptor under its own coordinate.
    pub fn insert(&mut self, descriptor: ProjectDescriptor) {
        self.descriptors
            .insert(descriptor.coordinate.clone(), descriptor);
    }

    /// Number of registered descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl DescriptorProvider for MapProvider {
    fn resolve(
        &self,
        dependency: &Dependency,
        _repositories: &[Repository],
    ) -> Result<ProjectDescriptor, ResolutionError> {
        self.descriptors
            .get(&dependency.coordinate)
            .cloned()
            .ok_or_else(|| ResolutionError::NotFound {
                coordinate: dependency.coordinate.clone(),
            })
    }
}
