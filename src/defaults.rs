//! Default values for container-installer configuration.
//!
//! This module provides centralized default values used by the configuration
//! layer and the commands, so that file names are spelled in exactly one place.

use std::path::PathBuf;

/// Name of the optional installer configuration file, looked up in the
/// working directory.
pub const CONFIG_FILE_NAME: &str = ".container-installer.yaml";

/// Returns the default lock file path (`composer.lock`).
///
/// This can be overridden by the `--lock-file` CLI flag, the
/// `CONTAINER_INSTALLER_LOCK_FILE` environment variable or the `lock-file`
/// configuration key.
pub fn default_lock_file() -> PathBuf {
    PathBuf::from("composer.lock")
}

/// Returns the default root manifest path (`composer.json`).
pub fn default_manifest() -> PathBuf {
    PathBuf::from("composer.json")
}

/// Returns the default containers file path (`containers.php`).
pub fn default_output() -> PathBuf {
    PathBuf::from("containers.php")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_are_relative() {
        assert_eq!(default_lock_file(), PathBuf::from("composer.lock"));
        assert_eq!(default_manifest(), PathBuf::from("composer.json"));
        assert_eq!(default_output(), PathBuf::from("containers.php"));
        assert!(default_output().is_relative());
    }
}
