//! TOML deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization of descriptor files.
//! They are converted to domain types by the loader.

use serde::Deserialize;

/// Raw TOML representation of a descriptor file.
#[derive(Debug, Clone, Deserialize)]
pub struct DescriptorDto {
    /// Repositories declared by the project.
    #[serde(default)]
    pub repositories: Vec<RepositoryDto>,

    /// The project's own coordinate.
    pub project: ProjectDto,

    /// Parent reference.
    #[serde(default)]
    pub parent: Option<ParentDto>,

    /// Declared dependencies, in order.
    #[serde(default)]
    pub dependencies: Vec<DependencyDto>,
}

/// `[project]` table. Group and version may be inherited from the parent.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectDto {
    /// Group id.
    #[serde(default)]
    pub group: Option<String>,
    /// Artifact id.
    pub artifact: String,
    /// Version.
    #[serde(default)]
    pub version: Option<String>,
}

/// `[parent]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ParentDto {
    /// Group id.
    pub group: String,
    /// Artifact id.
    pub artifact: String,
    /// Version.
    pub version: String,
    /// Path to the parent descriptor, relative to this file's directory.
    #[serde(default)]
    pub path: Option<String>,
}

/// `[[dependencies]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct DependencyDto {
    /// Group id.
    pub group: String,
    /// Artifact id.
    pub artifact: String,
    /// Version.
    pub version: String,
    /// Scope (default: "compile").
    #[serde(default)]
    pub scope: Option<String>,
    /// Packaging type (default: "jar").
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Classifier.
    #[serde(default)]
    pub classifier: Option<String>,
}

/// `repositories` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryDto {
    /// Repository id.
    pub id: String,
    /// Directory holding the repository.
    pub location: String,
}
