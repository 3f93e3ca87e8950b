//! # Compile Command Implementation
//!
//! The compile command runs the full pipeline:
//! 1. Collect the packages of the lock file that declare container-interop metadata
//! 2. Order them by dependency
//! 3. Merge their factories with the existing containers file
//! 4. Atomically replace the containers file
//!
//! Packages with malformed declarations are skipped and listed at the end; the
//! command still writes the valid entries but exits with an error so that the
//! build notices.

use anyhow::Result;
use clap::Args;

use container_installer::output::{emoji, OutputConfig};
use container_installer::phases::orchestrator;
use container_installer::phases::write::WriteOutcome;

use super::{load_config, SourceArgs};

/// Arguments for the compile command
#[derive(Args, Debug)]
pub struct CompileArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the generated file instead of writing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the compile command
pub fn execute(args: CompileArgs, output: &OutputConfig) -> Result<()> {
    let config = load_config(args.source)?;
    let quiet = args.quiet;

    if !quiet && !args.dry_run {
        println!(
            "{} Compiling containers list",
            emoji(output, "📦", "[COMPILE]")
        );
    }

    let report = orchestrator::compile_with_config(&config, args.dry_run)?;

    if args.dry_run {
        if report.entries.is_empty() {
            println!("No container factories found.");
        } else {
            print!("{}", report.rendered);
        }
    } else if !quiet {
        let path = config.output.display();
        match report.outcome {
            Some(WriteOutcome::Written) => println!(
                "{} Wrote {} container factories from {} packages to {}",
                emoji(output, "✅", "[OK]"),
                report.entries.len(),
                report.packages.len(),
                path
            ),
            Some(WriteOutcome::Unchanged) => println!(
                "{} {} is up to date ({} container factories)",
                emoji(output, "✅", "[OK]"),
                path,
                report.entries.len()
            ),
            Some(WriteOutcome::SkippedEmpty) | None => println!(
                "{} No container factories found; {} left untouched",
                emoji(output, "ℹ️", "[INFO]"),
                path
            ),
        }
    }

    for cycle in &report.cycles {
        eprintln!(
            "{} Dependency cycle broken by collection order: {}",
            emoji(output, "⚠️", "[WARN]"),
            cycle
        );
    }

    if let Some(e) = &report.previous_unreadable {
        eprintln!(
            "{} {}; previous settings were not carried over",
            emoji(output, "⚠️", "[WARN]"),
            e
        );
    }

    if !report.is_clean() {
        for error in &report.malformed {
            eprintln!("{} {}", emoji(output, "❌", "[ERROR]"), error);
        }
        anyhow::bail!(
            "{} package(s) declare malformed container factories",
            report.malformed.len()
        );
    }

    Ok(())
}
