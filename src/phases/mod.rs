//! Implementation of the phases of the container-installer compile operation.
//!
//! ## Overview
//!
//! The compile operation follows 4 phases:
//! 1. Collection - Filter the resolved package set down to container contributors
//! 2. Ordering - Sort candidates so dependencies come before their dependents
//! 3. Merging - Expand factory declarations and merge them with the previous file
//! 4. Writing - Atomically replace the containers file
//!
//! Each phase depends only on the previous phases and the foundation modules
//! (`package`, `factory`, `php`). Data flows strictly forward; no phase calls
//! back into an earlier one.

use crate::package::PackageRecord;

// Phase modules
pub mod collection;
pub mod merge;
pub mod orchestrator;
pub mod ordering;
pub mod write;

// Numbered aliases, matching the phase list above
pub use collection as phase1;
pub use merge as phase3;
pub use ordering as phase2;
pub use write as phase4;

/// What to do when candidate packages depend on each other in a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePolicy {
    /// Break the cycle at its member with the lowest collection index, keep
    /// going and report the cycle as a warning.
    #[default]
    Fallback,
    /// Abort with `Error::CycleDetected`.
    Fail,
}

/// Candidate packages in dependency order
#[derive(Debug, Clone, Default)]
pub struct OrderedPackages {
    /// Packages, every dependency before its dependents
    pub packages: Vec<PackageRecord>,
    /// Cycles that were broken, formatted as `a -> b -> a`
    pub cycles: Vec<String>,
}

impl OrderedPackages {
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Package names in order.
    pub fn names(&self) -> Vec<&str> {
        self.packages.iter().map(|p| p.name.as_str()).collect()
    }

    /// The root package, identified by its flag rather than its position.
    pub fn root(&self) -> Option<&PackageRecord> {
        self.packages.iter().find(|p| p.is_root)
    }
}
