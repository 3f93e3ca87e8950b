//! Orchestrator for the complete compile operation
//!
//! This module coordinates all phases behind a single entry point: given a
//! finalized package set and a containers file, produce the new containers
//! file. It does not know where the packages came from, so a build hook, the
//! CLI or a test can all drive it through a [`PackageSource`].

use log::{info, warn};

use super::write::{ContainersFile, WriteOutcome};
use super::{phase1, phase2, phase3, CyclePolicy};
use crate::config::InstallerConfig;
use crate::error::{Error, Result};
use crate::factory::FactoryEntry;
use crate::package::{LockFilePackageSource, PackageSource};

/// Options for one compile run
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    pub cycle_policy: CyclePolicy,
    /// Render the result but do not touch the containers file
    pub dry_run: bool,
}

/// Everything a compile run produced
#[derive(Debug)]
pub struct CompileReport {
    /// Candidate package names in dependency order
    pub packages: Vec<String>,
    /// Merged factory entries, in emission order
    pub entries: Vec<FactoryEntry>,
    /// The rendered containers file (empty when there are no entries)
    pub rendered: String,
    /// What happened to the containers file; `None` on a dry run
    pub outcome: Option<WriteOutcome>,
    /// Packages skipped because of malformed declarations
    pub malformed: Vec<Error>,
    /// Dependency cycles that were broken
    pub cycles: Vec<String>,
    /// Set when the previous containers file could not be parsed and was
    /// treated as empty
    pub previous_unreadable: Option<Error>,
}

impl CompileReport {
    /// True when every package declaration was usable.
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty()
    }
}

/// Execute the complete compile operation (Phases 1-4)
///
/// 1. Collect container-interop packages and the root package
/// 2. Order them by dependency
/// 3. Load the previous containers file, normalize and merge declarations
/// 4. Replace the containers file (unless `dry_run`)
///
/// Malformed declarations and an unreadable previous file are reported in the
/// returned [`CompileReport`]; a package source failure, a cycle under
/// [`CyclePolicy::Fail`] and a write failure abort the run.
pub fn compile(
    source: &dyn PackageSource,
    containers: &ContainersFile,
    options: CompileOptions,
) -> Result<CompileReport> {
    // Phase 1: Collection
    let candidates = phase1::collect_from(source)?;

    // Phase 2: Ordering
    let ordered = phase2::execute(candidates, options.cycle_policy)?;

    // Phase 3: Merging against the previous file
    let (previous, previous_unreadable) = match containers.load() {
        Ok(previous) => (previous, None),
        Err(e) => {
            warn!("{}; regenerating from scratch", e);
            (Vec::new(), Some(e))
        }
    };
    let merged = phase3::execute(&ordered.packages, &previous);

    // Phase 4: Writing
    let rendered = if merged.entries.is_empty() {
        String::new()
    } else {
        containers.render(&merged.entries)
    };
    let outcome = if options.dry_run {
        None
    } else {
        Some(containers.store(&merged.entries)?)
    };

    if let Some(WriteOutcome::Written) = outcome {
        info!(
            "Wrote {} container factories to {}",
            merged.entries.len(),
            containers.path().display()
        );
    }

    Ok(CompileReport {
        packages: ordered.packages.iter().map(|p| p.name.clone()).collect(),
        entries: merged.entries,
        rendered,
        outcome,
        malformed: merged.malformed,
        cycles: ordered.cycles,
        previous_unreadable,
    })
}

/// Run the compile operation with the lock-file package source described by
/// `config`.
pub fn compile_with_config(config: &InstallerConfig, dry_run: bool) -> Result<CompileReport> {
    let source = LockFilePackageSource::new(&config.lock_file, &config.manifest)
        .include_dev(config.include_dev);
    let containers = ContainersFile::new(&config.output);
    let options = CompileOptions {
        cycle_policy: if config.fail_on_cycle {
            CyclePolicy::Fail
        } else {
            CyclePolicy::Fallback
        },
        dry_run,
    };
    compile(&source, &containers, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::{InMemoryPackageSource, PackageRecord};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn source() -> InMemoryPackageSource {
        InMemoryPackageSource::new(
            vec![
                PackageRecord::new("acme/web")
                    .with_dependency("acme/core")
                    .with_factories(json!("Web::create()")),
                PackageRecord::new("acme/core").with_factories(json!(["Core::a()", "Core::b()"])),
                PackageRecord::new("acme/unrelated"),
            ],
            PackageRecord::root(Some("acme/app")).with_factories(json!({
                "name": "app",
                "description": "Application container",
                "factory": "App::create()"
            })),
        )
    }

    #[test]
    fn test_compile_orders_and_writes() {
        let temp_dir = TempDir::new().unwrap();
        let containers = ContainersFile::new(temp_dir.path().join("containers.php"));

        let report = compile(&source(), &containers, CompileOptions::default()).unwrap();

        assert_eq!(report.packages, vec!["acme/core", "acme/web", "acme/app"]);
        let names: Vec<&str> = report.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["acme/core_0", "acme/core_1", "acme/web_0", "app"]);
        assert_eq!(report.outcome, Some(WriteOutcome::Written));
        assert!(report.is_clean());
        assert_eq!(
            fs::read_to_string(containers.path()).unwrap(),
            report.rendered
        );
    }

    #[test]
    fn test_compile_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let containers = ContainersFile::new(temp_dir.path().join("containers.php"));

        compile(&source(), &containers, CompileOptions::default()).unwrap();
        let first = fs::read_to_string(containers.path()).unwrap();
        let report = compile(&source(), &containers, CompileOptions::default()).unwrap();
        let second = fs::read_to_string(containers.path()).unwrap();

        assert_eq!(first, second);
        assert_eq!(report.outcome, Some(WriteOutcome::Unchanged));
    }

    #[test]
    fn test_compile_dry_run_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let containers = ContainersFile::new(temp_dir.path().join("containers.php"));
        let options = CompileOptions {
            dry_run: true,
            ..CompileOptions::default()
        };

        let report = compile(&source(), &containers, options).unwrap();
        assert!(report.outcome.is_none());
        assert!(report.rendered.contains("'name' => 'app',"));
        assert!(!containers.exists());
    }

    #[test]
    fn test_compile_unreadable_previous_file_is_a_warning() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("containers.php");
        fs::write(&path, "not php at all").unwrap();
        let containers = ContainersFile::new(&path);

        let report = compile(&source(), &containers, CompileOptions::default()).unwrap();
        assert!(matches!(
            report.previous_unreadable,
            Some(Error::PersistenceRead { .. })
        ));
        assert_eq!(report.outcome, Some(WriteOutcome::Written));
        assert!(fs::read_to_string(&path).unwrap().starts_with("<?php"));
    }

    #[test]
    fn test_compile_cycle_policies() {
        let cyclic = InMemoryPackageSource::new(
            vec![
                PackageRecord::new("acme/a")
                    .with_dependency("acme/b")
                    .with_factories(json!("A::create()")),
                PackageRecord::new("acme/b")
                    .with_dependency("acme/a")
                    .with_factories(json!("B::create()")),
            ],
            PackageRecord::root(None),
        );
        let temp_dir = TempDir::new().unwrap();
        let containers = ContainersFile::new(temp_dir.path().join("containers.php"));

        let report = compile(&cyclic, &containers, CompileOptions::default()).unwrap();
        assert_eq!(report.cycles.len(), 1);
        assert_eq!(report.entries.len(), 2);

        let strict = CompileOptions {
            cycle_policy: CyclePolicy::Fail,
            dry_run: false,
        };
        assert!(matches!(
            compile(&cyclic, &containers, strict),
            Err(Error::CycleDetected { .. })
        ));
    }

    #[test]
    fn test_compile_with_config_uses_lock_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("composer.lock"),
            json!({
                "packages": [
                    { "name": "acme/foo", "extra": { "container-interop": { "container-factory": "Foo::create()" } } }
                ]
            })
            .to_string(),
        )
        .unwrap();
        fs::write(temp_dir.path().join("composer.json"), "{}").unwrap();

        let config = InstallerConfig::default().resolve_paths(temp_dir.path());
        let report = compile_with_config(&config, false).unwrap();
        assert_eq!(report.packages, vec!["acme/foo", "root"]);
        assert!(temp_dir.path().join("containers.php").exists());
    }
}
