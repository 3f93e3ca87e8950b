//! Phase 1: Collection
//!
//! This is the first phase of the `container-installer` pipeline. It narrows
//! the resolved package set (production and development packages) down to the
//! packages that can contribute container factories.
//!
//! ## Process
//!
//! 1.  **Filtering**: A non-root package is a candidate if and only if its
//!     `extra.container-interop` block exists and is a mapping. A scalar or
//!     missing block excludes it.
//!
//! 2.  **Root anchoring**: The root package is always appended last, flagged
//!     with `is_root`, whether or not it declares factories.
//!
//! The phase makes no ordering decisions: candidates keep the host's native
//! enumeration order, which Phase 2 normalizes.

use log::debug;

use crate::error::Result;
use crate::package::{PackageRecord, PackageSource};

/// Execute Phase 1 over an in-memory package set
pub fn execute(all_packages: Vec<PackageRecord>, root: PackageRecord) -> Vec<PackageRecord> {
    let total = all_packages.len();
    let mut candidates: Vec<PackageRecord> = all_packages
        .into_iter()
        .filter(|package| !package.is_root && package.container_interop().is_some())
        .collect();

    debug!(
        "Collected {} container-interop package(s) out of {}",
        candidates.len(),
        total
    );

    let mut root = root;
    root.is_root = true;
    candidates.push(root);
    candidates
}

/// Execute Phase 1 against a package source
pub fn collect_from(source: &dyn PackageSource) -> Result<Vec<PackageRecord>> {
    let packages = source.packages()?;
    let root = source.root_package()?;
    Ok(execute(packages, root))
}
