//! # snapshot-lint-core
//!
//! Finds SNAPSHOT couplings in a project's dependency graph.
//!
//! A SNAPSHOT version is mutable: depending on one, directly, transitively,
//! or through a parent descriptor, makes a build unreproducible. This crate
//! provides:
//!
//! - [`Coordinate`] and [`ProjectDescriptor`] for the graph itself
//! - [`DescriptorProvider`], the seam through which dependencies are resolved
//! - [`SnapshotPolicy`] deciding what counts as a coupling
//! - [`SnapshotFinder`], the recursive walker
//! - [`FailureLedger`], couplings grouped by the direct dependency that
//!   introduced them
//!
//! ## Example
//!
//! ```ignore
//! use snapshot_lint_core::{FinderOptions, SnapshotFinder};
//!
//! let finder = SnapshotFinder::new(&provider, FinderOptions::new().group_id("org.x"));
//! finder.check(&root)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod coordinate;
mod descriptor;
mod finder;
mod ledger;
mod path;
mod policy;
mod provider;

pub use config::{CheckConfig, Config, ConfigError, RepositoryConfig};
pub use coordinate::{Coordinate, CoordinateError};
pub use descriptor::{Dependency, ProjectDescriptor, Repository, DEFAULT_SCOPE, DEFAULT_TYPE};
pub use finder::{
    check, AuditReport, CheckError, Finding, FindingKind, FinderOptions, SnapshotFinder,
};
pub use ledger::{FailureLedger, LedgerEntry, LedgerKey, ANCESTOR_CHAIN_LABEL};
pub use path::{render_path, TraversalPath};
pub use policy::{SnapshotPolicy, SNAPSHOT_MARKER};
pub use provider::{DescriptorProvider, MapProvider, ResolutionError};
