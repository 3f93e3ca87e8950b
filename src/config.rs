//! # Installer Configuration
//!
//! This module defines `InstallerConfig`, the settings that tell the compile
//! pipeline where to find the resolved package set and where to write the
//! containers file. Settings come from three layers, later layers winning:
//!
//! 1.  Built-in defaults (see `crate::defaults`).
//! 2.  An optional `.container-installer.yaml` file in the working directory.
//! 3.  CLI flags and `CONTAINER_INSTALLER_*` environment variables, applied by
//!     the command layer through [`InstallerConfig::with_overrides`].
//!
//! ## File format
//!
//! ```yaml
//! lock-file: composer.lock
//! manifest: composer.json
//! output: containers.php
//! include-dev: true
//! fail-on-cycle: false
//! ```
//!
//! Every key is optional. Unknown keys are rejected so that a typo does not
//! silently fall back to a default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};

/// Settings for one compile run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct InstallerConfig {
    /// Lock file listing the resolved packages.
    pub lock_file: PathBuf,
    /// Manifest of the root package.
    pub manifest: PathBuf,
    /// Containers file to merge against and regenerate.
    pub output: PathBuf,
    /// Whether development packages (`packages-dev`) are scanned too.
    pub include_dev: bool,
    /// Treat a dependency cycle among candidate packages as a fatal error
    /// instead of falling back to collection order.
    pub fail_on_cycle: bool,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            lock_file: defaults::default_lock_file(),
            manifest: defaults::default_manifest(),
            output: defaults::default_output(),
            include_dev: true,
            fail_on_cycle: false,
        }
    }
}

/// Values supplied on the command line; `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub lock_file: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub no_dev: bool,
    pub fail_on_cycle: bool,
}

impl InstallerConfig {
    /// Apply command-line overrides on top of this configuration.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(lock_file) = overrides.lock_file {
            self.lock_file = lock_file;
        }
        if let Some(manifest) = overrides.manifest {
            self.manifest = manifest;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if overrides.no_dev {
            self.include_dev = false;
        }
        if overrides.fail_on_cycle {
            self.fail_on_cycle = true;
        }
        self
    }

    /// Resolve every relative path in this configuration against `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        for path in [&mut self.lock_file, &mut self.manifest, &mut self.output] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

/// Parses a YAML string into an `InstallerConfig`.
///
/// An empty document yields the defaults.
pub fn parse(yaml_content: &str) -> Result<InstallerConfig> {
    if yaml_content.trim().is_empty() {
        return Ok(InstallerConfig::default());
    }

    serde_yaml::from_str(yaml_content).map_err(|e| {
        let message = e.to_string();
        let hint = message.contains("unknown field").then(|| {
            "valid keys are lock-file, manifest, output, include-dev, fail-on-cycle".to_string()
        });
        Error::ConfigParse { message, hint }
    })
}

/// Parse an `InstallerConfig` from a YAML file path
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<InstallerConfig> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Load the configuration file from `dir` if it exists, defaults otherwise.
pub fn load_from_dir(dir: &Path) -> Result<InstallerConfig> {
    let path = dir.join(defaults::CONFIG_FILE_NAME);
    if path.is_file() {
        log::debug!("Loading installer configuration from {}", path.display());
        from_file(&path)
    } else {
        Ok(InstallerConfig::default())
    }
}
