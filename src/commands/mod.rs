//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `container-installer` command-line tool. Each subcommand is defined in its
//! own file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `container_installer` library.
//!
//! Commands that read packages share [`SourceArgs`] and [`load_config`], which
//! layer CLI flags over the optional `.container-installer.yaml` file.

pub mod completions;
pub mod compile;
pub mod ls;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use container_installer::config::{self, InstallerConfig, Overrides};

/// Options locating the package set and the containers file
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Project directory containing composer.json (defaults to the current directory)
    #[arg(short = 'd', long, value_name = "DIR")]
    pub working_dir: Option<PathBuf>,

    /// Path to an installer configuration file
    #[arg(short, long, value_name = "FILE", env = "CONTAINER_INSTALLER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Lock file listing the installed packages
    #[arg(long, value_name = "FILE", env = "CONTAINER_INSTALLER_LOCK_FILE")]
    pub lock_file: Option<PathBuf>,

    /// Manifest of the root package
    #[arg(long, value_name = "FILE", env = "CONTAINER_INSTALLER_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Containers file to generate
    #[arg(short, long, value_name = "FILE", env = "CONTAINER_INSTALLER_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Ignore development packages
    #[arg(long)]
    pub no_dev: bool,

    /// Fail instead of falling back to collection order on a dependency cycle
    #[arg(long)]
    pub fail_on_cycle: bool,
}

/// Build the effective configuration: defaults, then the configuration file,
/// then CLI flags. Relative paths resolve against the working directory.
pub fn load_config(args: SourceArgs) -> Result<InstallerConfig> {
    let working_dir = match args.working_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine the current directory")?,
    };

    let base = match &args.config {
        Some(path) => {
            let path = if path.is_relative() {
                working_dir.join(path)
            } else {
                path.clone()
            };
            if !path.exists() {
                anyhow::bail!("Configuration file not found: {}", path.display());
            }
            config::from_file(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => config::load_from_dir(&working_dir)?,
    };

    let overrides = Overrides {
        lock_file: args.lock_file,
        manifest: args.manifest,
        output: args.output,
        no_dev: args.no_dev,
        fail_on_cycle: args.fail_on_cycle,
    };

    Ok(base.with_overrides(overrides).resolve_paths(&working_dir))
}
