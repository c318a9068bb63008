//! On-disk repository layout.
//!
//! A descriptor for `org.x:lib:2.0` lives at
//! `<root>/org/x/lib/2.0/lib-2.0.toml`.

use snapshot_lint_core::Coordinate;
use std::path::{Path, PathBuf};

/// File name of a project checkout's own descriptor.
pub const PROJECT_FILE: &str = "project.toml";

/// Extension of descriptor files inside a repository.
pub const DESCRIPTOR_EXTENSION: &str = "toml";

/// True if `part` maps to exactly one directory name: non-empty, not `.` or
/// `..`, and free of path separators and `:`.
#[must_use]
pub fn is_valid_part(part: &str) -> bool {
    !part.is_empty() && part != "." && part != ".." && !part.contains(['/', '\\', ':'])
}

/// Like [`is_valid_part`], and every `.`-separated segment is non-empty.
#[must_use]
pub fn is_valid_group(group: &str) -> bool {
    is_valid_part(group) && group.split('.').all(|segment| !segment.is_empty())
}

/// True if every part of `coordinate` stays inside a repository root once
/// laid out by [`descriptor_path`].
#[must_use]
pub fn is_storable(coordinate: &Coordinate) -> bool {
    is_valid_group(coordinate.group())
        && is_valid_part(coordinate.artifact())
        && is_valid_part(coordinate.version())
}

/// Returns where the descriptor for `coordinate` lives under `root`.
///
/// Callers check [`is_storable`] first; other coordinates may point outside
/// `root`.
#[must_use]
pub fn descriptor_path(root: &Path, coordinate: &Coordinate) -> PathBuf {
    let mut path = root.to_path_buf();
    for segment in coordinate.group().split('.') {
        path.push(segment);
    }
    path.push(coordinate.artifact());
    path.push(coordinate.version());
    path.push(format!(
        "{}-{}.{DESCRIPTOR_EXTENSION}",
        coordinate.artifact(),
        coordinate.version()
    ));
    path
}

/// Resolves a project location: a descriptor file, or a directory holding
/// [`PROJECT_FILE`].
#[must_use]
pub fn project_file(location: &Path) -> PathBuf {
    if location.is_dir() {
        location.join(PROJECT_FILE)
    } else {
        location.to_path_buf()
    }
}
