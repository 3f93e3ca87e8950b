//! # Container Installer CLI
//!
//! This is the binary entry point for the `container-installer` command-line
//! tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging.
//! - Executing the appropriate command and turning library errors into
//!   user-friendly output.
//!
//! The core logic lives in the library crate; the binary is a thin shim that a
//! build hook can invoke after the package set is finalized.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
