//! # Container Installer Library
//!
//! This library compiles the container factories declared by the packages of a
//! resolved dependency graph into a single `containers.php` list. It is used by
//! the `container-installer` command-line tool, and any build hook can drive the
//! same pipeline through the [`package::PackageSource`] trait.
//!
//! ## Quick Example
//!
//! ```
//! use container_installer::package::{InMemoryPackageSource, PackageRecord};
//! use container_installer::phases::orchestrator::{compile, CompileOptions};
//! use container_installer::phases::write::ContainersFile;
//! use serde_json::json;
//!
//! let source = InMemoryPackageSource::new(
//!     vec![PackageRecord::new("acme/foo").with_factories(json!("Acme\\Foo::create()"))],
//!     PackageRecord::root(None),
//! );
//! let containers = ContainersFile::new("containers.php");
//! let options = CompileOptions { dry_run: true, ..CompileOptions::default() };
//!
//! let report = compile(&source, &containers, options).unwrap();
//! assert_eq!(report.entries[0].name, "acme/foo_0");
//! assert!(report.rendered.contains("'factory' => Acme\\Foo::create(),"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Packages (`package`)**: The records the pipeline consumes and the
//!   sources that supply them (a lock file, or records built in memory).
//! - **Factories (`factory`)**: Classification of `container-factory`
//!   declarations and the entries written to the containers file.
//! - **Codec (`php`)**: Rendering and parsing of the containers file.
//! - **Phases (`phases`)**: The pipeline itself.
//! - **Configuration (`config`, `defaults`)**: Where inputs and output live.
//!
//! ## Execution Flow
//!
//! The main entry point is `phases::orchestrator::compile`, which executes:
//!
//! 1.  **Collection**: Keep packages with a `container-interop` block, plus the root.
//! 2.  **Ordering**: Sort them so dependencies come first.
//! 3.  **Merging**: Expand declarations and merge them with the previous file.
//! 4.  **Writing**: Atomically replace the containers file.

pub mod config;
pub mod defaults;
pub mod error;
pub mod factory;
pub mod output;
pub mod package;
pub mod phases;
pub mod php;

#[cfg(test)]
mod ordering_proptest;
