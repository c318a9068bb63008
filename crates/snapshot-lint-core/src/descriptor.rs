//! Resolved project descriptors and their declared dependencies.

use crate::coordinate::Coordinate;
use serde::{Deserialize, Serialize};

/// Default dependency scope.
pub const DEFAULT_SCOPE: &str = "compile";

/// Default dependency packaging type.
pub const DEFAULT_TYPE: &str = "jar";

/// A dependency as declared by a project.
///
/// `scope`, `kind` and `classifier` are carried through to the provider so it
/// can re-resolve the dependency; the snapshot policy never looks at them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Declared coordinate.
    pub coordinate: Coordinate,
    /// Dependency scope (e.g. "compile", "test").
    pub scope: String,
    /// Packaging type (e.g. "jar", "pom").
    #[serde(rename = "type")]
    pub kind: String,
    /// Optional classifier (e.g. "tests", "sources").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

impl Dependency {
    /// Creates a compile-scope jar dependency.
    #[must_use]
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            scope: DEFAULT_SCOPE.to_string(),
            kind: DEFAULT_TYPE.to_string(),
            classifier: None,
        }
    }

    /// Sets the scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Sets the packaging type.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Sets the classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }
}

/// A repository a project declares for resolving its dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repository {
    /// Repository identifier.
    pub id: String,
    /// Location understood by the provider (a directory for the filesystem provider).
    pub location: String,
}

impl Repository {
    /// Creates a repository reference.
    #[must_use]
    pub fn new(id: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
        }
    }
}

/// One resolved node in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    /// The project's own coordinate.
    pub coordinate: Coordinate,
    /// Resolved parent descriptor, if the project inherits from one.
    pub parent: Option<Box<ProjectDescriptor>>,
    /// Declared dependencies, in declaration order.
    pub dependencies: Vec<Dependency>,
    /// Repositories declared by the project.
    pub repositories: Vec<Repository>,
}

impl ProjectDescriptor {
    /// Creates a descriptor with no parent, dependencies or repositories.
    #[must_use]
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            parent: None,
            dependencies: Vec::new(),
            repositories: Vec::new(),
        }
    }

    /// Sets the parent descriptor.
    #[must_use]
    pub fn with_parent(mut self, parent: ProjectDescriptor) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    /// Appends a declared dependency.
    #[must_use]
    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Appends a declared repository.
    #[must_use]
    pub fn with_repository(mut self, repository: Repository) -> Self {
        self.repositories.push(repository);
        self
    }

    /// Returns the parent descriptor, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&ProjectDescriptor> {
        self.parent.as_deref()
    }
}
