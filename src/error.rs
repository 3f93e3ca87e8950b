//! # Error Handling
//!
//! This module defines the centralized error type for the `container-installer`
//! library. It uses `thiserror` to build an `Error` enum that covers every
//! failure mode of the compile pipeline, with messages that name the stage
//! and the input that failed.
//!
//! ## Key Components
//!
//! - **`Error`**: All errors the library can produce. Some variants are fatal
//!   to a compile run (write failures, unreadable package sources), others are
//!   collected and reported in aggregate (malformed factory declarations) or
//!   downgraded to warnings (an unreadable previous containers file).
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for container-installer operations
#[derive(Error, Debug)]
pub enum Error {
    /// The installer configuration file could not be parsed.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The lock file or root manifest could not be read.
    #[error("Package source error for {}: {message}", path.display())]
    PackageSource { path: PathBuf, message: String },

    /// A package declares `container-factory` metadata in a shape that is
    /// neither a string, a list, nor a factory descriptor.
    #[error("Malformed container-factory declaration in package {package}: {message} (value: {value})")]
    MalformedDeclaration {
        package: String,
        /// The offending raw value, rendered as JSON
        value: String,
        message: String,
    },

    /// The dependency graph restricted to candidate packages contains a cycle.
    #[error("Cycle detected in package dependencies: {cycle}")]
    CycleDetected { cycle: String },

    /// The previous containers file exists but could not be read or parsed.
    #[error("Failed to read previous containers file {}: {message}", path.display())]
    PersistenceRead { path: PathBuf, message: String },

    /// The new containers file could not be written.
    #[error("Failed to write containers file {}: {message}", path.display())]
    PersistenceWrite { path: PathBuf, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
