//! # snapshot-lint-repo
//!
//! A [`DescriptorProvider`](snapshot_lint_core::DescriptorProvider) backed by
//! directories of TOML project descriptors.
//!
//! ## Descriptor format
//!
//! ```toml
//! repositories = [{ id = "mirror", location = "/srv/mirror" }]
//!
//! [project]
//! group = "org.x"          # inherited from [parent] when omitted
//! artifact = "app"
//! version = "1.0"          # inherited from [parent] when omitted
//!
//! [parent]
//! group = "org.x"
//! artifact = "parent"
//! version = "1.0"
//! path = "../parent"       # optional, tried before the repositories
//!
//! [[dependencies]]
//! group = "org.x"
//! artifact = "lib"
//! version = "2.0-SNAPSHOT"
//! scope = "compile"
//! type = "jar"
//! ```
//!
//! # Architecture
//!
//! ```text
//! TOML text
//!   ↓ serde (DTO layer)
//! dto types
//!   ↓ validate + convert
//! DescriptorFile (parent unresolved)
//!   ↓ FsRepository (parent chain resolution)
//! ProjectDescriptor
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod dto;
pub mod layout;
pub mod loader;
mod repository;

pub use layout::{descriptor_path, PROJECT_FILE};
pub use repository::{FsRepository, LoadError};
