//! # Ls Command Implementation
//!
//! Lists the entries of the current containers file in order, with their
//! enabled state. With `--packages` it instead shows the candidate packages in
//! the order their factories would be emitted, without touching any file.
//!
//! This command is read-only.

use anyhow::{Context, Result};
use clap::Args;

use container_installer::output::OutputConfig;
use container_installer::package::LockFilePackageSource;
use container_installer::phases::write::ContainersFile;
use container_installer::phases::{phase1, phase2, CyclePolicy};

use super::{load_config, SourceArgs};

/// List the entries of the containers file
#[derive(Args, Debug)]
pub struct LsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Show the ordered container packages instead of the file entries
    #[arg(long)]
    pub packages: bool,
}

/// Execute the ls command
pub fn execute(args: LsArgs, output: &OutputConfig) -> Result<()> {
    let show_packages = args.packages;
    let config = load_config(args.source)?;

    if show_packages {
        let source = LockFilePackageSource::new(&config.lock_file, &config.manifest)
            .include_dev(config.include_dev);
        let candidates = phase1::collect_from(&source)?;
        let policy = if config.fail_on_cycle {
            CyclePolicy::Fail
        } else {
            CyclePolicy::Fallback
        };
        let ordered = phase2::execute(candidates, policy)?;

        for package in &ordered.packages {
            let marker = if package.is_root { " (root)" } else { "" };
            let declares = if package.factory_declaration().is_some() {
                ""
            } else {
                " [no factories]"
            };
            println!("{}{}{}", package.name, marker, declares);
        }
        for cycle in &ordered.cycles {
            eprintln!("warning: dependency cycle: {}", cycle);
        }
        return Ok(());
    }

    let containers = ContainersFile::new(&config.output);
    if !containers.exists() {
        anyhow::bail!("Containers file not found: {}", config.output.display());
    }

    let entries = containers
        .load()
        .with_context(|| format!("Failed to read {}", config.output.display()))?;

    for entry in &entries {
        println!(
            "{}  {}  {}",
            entry.name,
            output.enabled_label(entry.enable),
            entry.description
        );
    }
    Ok(())
}
