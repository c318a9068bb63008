//! DTO → domain conversion with validation.

use crate::dto::{DependencyDto, DescriptorDto, ParentDto, RepositoryDto};
use crate::layout;
use snapshot_lint_core::{Coordinate, Dependency, Repository};
use std::path::PathBuf;

/// A descriptor file whose parent has not been resolved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorFile {
    /// The project's own coordinate, after inheritance from the parent.
    pub coordinate: Coordinate,
    /// Parent reference, if any.
    pub parent: Option<ParentRef>,
    /// Declared dependencies.
    pub dependencies: Vec<Dependency>,
    /// Declared repositories.
    pub repositories: Vec<Repository>,
}

/// Reference to a parent descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    /// Parent coordinate.
    pub coordinate: Coordinate,
    /// Relative path hint, tried before the repositories.
    pub path: Option<PathBuf>,
}

/// Errors during DTO → domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// A field that can only be inherited from a parent is missing and there
    /// is no parent.
    #[error("project.{field} is required when no parent is declared")]
    Missing {
        /// Missing field name.
        field: &'static str,
    },

    /// A coordinate field is empty, contains `:`, or would not map to a
    /// single directory inside a repository.
    #[error("{context}: `{value}` is not a valid coordinate part")]
    InvalidPart {
        /// Where the error occurred (e.g. "dependencies[2].version").
        context: String,
        /// The rejected value.
        value: String,
    },
}

/// Converts a parsed descriptor into a [`DescriptorFile`].
///
/// # Errors
///
/// Returns the first validation error encountered.
pub fn convert(dto: DescriptorDto) -> Result<DescriptorFile, ConvertError> {
    let parent = dto.parent.map(convert_parent).transpose()?;

    let group = match (dto.project.group, &parent) {
        (Some(group), _) => group,
        (None, Some(p)) => p.coordinate.group().to_string(),
        (None, None) => return Err(ConvertError::Missing { field: "group" }),
    };
    let version = match (dto.project.version, &parent) {
        (Some(version), _) => version,
        (None, Some(p)) => p.coordinate.version().to_string(),
        (None, None) => return Err(ConvertError::Missing { field: "version" }),
    };
    let coordinate = coordinate("project", group, dto.project.artifact, version)?;

    let dependencies = dto
        .dependencies
        .into_iter()
        .enumerate()
        .map(|(i, d)| convert_dependency(d, i))
        .collect::<Result<Vec<_>, _>>()?;

    let repositories = dto.repositories.into_iter().map(convert_repository).collect();

    Ok(DescriptorFile {
        coordinate,
        parent,
        dependencies,
        repositories,
    })
}

fn convert_parent(dto: ParentDto) -> Result<ParentRef, ConvertError> {
    Ok(ParentRef {
        coordinate: coordinate("parent", dto.group, dto.artifact, dto.version)?,
        path: dto.path.map(PathBuf::from),
    })
}

fn convert_dependency(dto: DependencyDto, index: usize) -> Result<Dependency, ConvertError> {
    let context = format!("dependencies[{index}]");
    let mut dependency = Dependency::new(coordinate(&context, dto.group, dto.artifact, dto.version)?);
    if let Some(scope) = dto.scope {
        dependency = dependency.with_scope(scope);
    }
    if let Some(kind) = dto.kind {
        dependency = dependency.with_kind(kind);
    }
    if let Some(classifier) = dto.classifier {
        dependency = dependency.with_classifier(classifier);
    }
    Ok(dependency)
}

fn convert_repository(dto: RepositoryDto) -> Repository {
    Repository::new(dto.id, dto.location)
}

fn coordinate(
    context: &str,
    group: String,
    artifact: String,
    version: String,
) -> Result<Coordinate, ConvertError> {
    let checks = [
        ("group", &group, layout::is_valid_group(&group)),
        ("artifact", &artifact, layout::is_valid_part(&artifact)),
        ("version", &version, layout::is_valid_part(&version)),
    ];
    for (field, value, valid) in checks {
        if !valid {
            return Err(ConvertError::InvalidPart {
                context: format!("{context}.{field}"),
                value: value.clone(),
            });
        }
    }
    Ok(Coordinate::new(group, artifact, version))
}
