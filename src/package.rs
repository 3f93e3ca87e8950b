//! # Package Records and Sources
//!
//! The compile pipeline does not resolve packages itself. It consumes a
//! finalized package set from a [`PackageSource`]: every resolved package plus
//! one distinguished root package. This module defines the record shape the
//! pipeline works on and two sources:
//!
//! - [`LockFilePackageSource`] reads a `composer.lock` file (`packages` and
//!   optionally `packages-dev`) and the root `composer.json` manifest.
//! - [`InMemoryPackageSource`] holds records built in code, for library callers
//!   and tests.
//!
//! Dependencies are the keys of a package's `require` map (plus `require-dev`
//! for the root package). Platform requirements such as `php` or `ext-json`
//! carry no vendor prefix and are dropped.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Name used for the root package when its manifest declares none.
pub const ROOT_PACKAGE_NAME: &str = "root";

/// Key of the extra block that marks a package as a container contributor.
pub const CONTAINER_INTEROP_KEY: &str = "container-interop";

/// Key of the factory declaration inside the `container-interop` block.
pub const CONTAINER_FACTORY_KEY: &str = "container-factory";

/// One installable package as seen by the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PackageRecord {
    /// Package name, unique within one resolution
    pub name: String,
    /// Names of the packages this one requires
    pub dependencies: BTreeSet<String>,
    /// Arbitrary package metadata (the `extra` section)
    pub extra: Value,
    /// Whether this is the entry-point package of the run
    pub is_root: bool,
}

impl PackageRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependencies: BTreeSet::new(),
            extra: Value::Null,
            is_root: false,
        }
    }

    /// Create a root package record. A missing name becomes `"root"`.
    pub fn root(name: Option<&str>) -> Self {
        let mut package = Self::new(name.unwrap_or(ROOT_PACKAGE_NAME));
        package.is_root = true;
        package
    }

    pub fn with_dependency(mut self, name: impl Into<String>) -> Self {
        self.dependencies.insert(name.into());
        self
    }

    pub fn with_extra(mut self, extra: Value) -> Self {
        self.extra = extra;
        self
    }

    /// Set `extra.container-interop.container-factory` to `declaration`.
    pub fn with_factories(self, declaration: Value) -> Self {
        let mut interop = Map::new();
        interop.insert(CONTAINER_FACTORY_KEY.to_string(), declaration);
        let mut extra = Map::new();
        extra.insert(CONTAINER_INTEROP_KEY.to_string(), Value::Object(interop));
        self.with_extra(Value::Object(extra))
    }

    /// The `container-interop` extra block, if present and a mapping.
    pub fn container_interop(&self) -> Option<&Map<String, Value>> {
        self.extra.get(CONTAINER_INTEROP_KEY)?.as_object()
    }

    /// The raw `container-factory` declaration, if any.
    pub fn factory_declaration(&self) -> Option<&Value> {
        self.container_interop()?
            .get(CONTAINER_FACTORY_KEY)
            .filter(|value| !value.is_null())
    }
}

/// Supplier of a finalized package set.
///
/// This is the seam between the pipeline and whatever host tool resolved the
/// packages: a lock-file reader, a build hook or a test harness.
pub trait PackageSource {
    /// Every resolved package except the root, in the host's native order.
    fn packages(&self) -> Result<Vec<PackageRecord>>;

    /// The root package of the run.
    fn root_package(&self) -> Result<PackageRecord>;
}

/// Package source over records built in memory
#[derive(Debug, Clone)]
pub struct InMemoryPackageSource {
    pub packages: Vec<PackageRecord>,
    pub root: PackageRecord,
}

impl InMemoryPackageSource {
    pub fn new(packages: Vec<PackageRecord>, root: PackageRecord) -> Self {
        Self { packages, root }
    }
}

impl PackageSource for InMemoryPackageSource {
    fn packages(&self) -> Result<Vec<PackageRecord>> {
        Ok(self.packages.clone())
    }

    fn root_package(&self) -> Result<PackageRecord> {
        let mut root = self.root.clone();
        root.is_root = true;
        Ok(root)
    }
}

/// Package entry as it appears in a lock file or manifest
#[derive(Debug, Deserialize)]
struct RawPackage {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    require: Map<String, Value>,
    #[serde(default, rename = "require-dev")]
    require_dev: Map<String, Value>,
    #[serde(default)]
    extra: Value,
}

impl RawPackage {
    fn into_record(self, is_root: bool) -> PackageRecord {
        let mut record = if is_root {
            PackageRecord::root(self.name.as_deref())
        } else {
            PackageRecord::new(self.name.unwrap_or_default())
        };

        let dev = if is_root { Some(self.require_dev) } else { None };
        record.dependencies = self
            .require
            .into_iter()
            .chain(dev.into_iter().flatten())
            .map(|(name, _)| name)
            .filter(|name| !is_platform_package(name))
            .collect();
        record.extra = self.extra;
        record
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawLockFile {
    #[serde(default)]
    packages: Vec<RawPackage>,
    #[serde(default, rename = "packages-dev")]
    packages_dev: Vec<RawPackage>,
}

/// Platform requirements (`php`, `ext-*`, `lib-*`, ...) have no vendor prefix.
fn is_platform_package(name: &str) -> bool {
    !name.contains('/')
}

/// Package source reading `composer.lock` and the root `composer.json`
#[derive(Debug, Clone)]
pub struct LockFilePackageSource {
    lock_file: PathBuf,
    manifest: PathBuf,
    include_dev: bool,
}

impl LockFilePackageSource {
    pub fn new(lock_file: impl Into<PathBuf>, manifest: impl Into<PathBuf>) -> Self {
        Self {
            lock_file: lock_file.into(),
            manifest: manifest.into(),
            include_dev: true,
        }
    }

    /// Whether `packages-dev` is scanned in addition to `packages`.
    pub fn include_dev(mut self, include_dev: bool) -> Self {
        self.include_dev = include_dev;
        self
    }

    fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
        let content = fs::read_to_string(path).map_err(|e| Error::PackageSource {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| Error::PackageSource {
            path: path.to_path_buf(),
            message: format!("invalid JSON: {}", e),
        })
    }
}

impl PackageSource for LockFilePackageSource {
    fn packages(&self) -> Result<Vec<PackageRecord>> {
        if !self.lock_file.exists() {
            log::warn!(
                "Lock file {} not found; only the root package will be scanned",
                self.lock_file.display()
            );
            return Ok(Vec::new());
        }

        let lock: RawLockFile = Self::read_json(&self.lock_file)?;
        let dev = if self.include_dev {
            lock.packages_dev
        } else {
            Vec::new()
        };

        Ok(lock
            .packages
            .into_iter()
            .chain(dev)
            .map(|raw| raw.into_record(false))
            .collect())
    }

    fn root_package(&self) -> Result<PackageRecord> {
        let raw: RawPackage = Self::read_json(&self.manifest)?;
        Ok(raw.into_record(true))
    }
}
