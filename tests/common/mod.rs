//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new()
//!         .with_manifest(manifests::APP)
//!         .with_lock(&lock(&[package("acme/foo", &[], Some(json!("new Foo()")))]));
//!     fixture.command().arg("compile").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use serde_json::{json, Value};
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;
    pub use serde_json::json;

    #[allow(unused_imports)]
    pub use super::manifests;
    #[allow(unused_imports)]
    pub use super::{lock, package};
    pub use super::TestFixture;
}

/// Root manifests for testing.
#[allow(dead_code)]
pub mod manifests {
    /// Named root package without factories.
    pub const APP: &str = r#"{ "name": "acme/app", "require": { "php": ">=8.1" } }"#;

    /// Root package that declares its own factory.
    pub const APP_WITH_FACTORY: &str = r#"{
    "name": "acme/app",
    "extra": {
        "container-interop": { "container-factory": "Acme\\App\\ContainerFactory::build()" }
    }
}"#;

    /// Root manifest without a name.
    pub const ANONYMOUS: &str = "{}";
}

/// A lock-file package entry.
#[allow(dead_code)]
pub fn package(name: &str, requires: &[&str], factories: Option<Value>) -> Value {
    let require: serde_json::Map<String, Value> = requires
        .iter()
        .map(|dep| (dep.to_string(), json!("*")))
        .collect();
    let mut entry = json!({ "name": name, "version": "1.0.0", "require": require });
    if let Some(declaration) = factories {
        entry["extra"] = json!({ "container-interop": { "container-factory": declaration } });
    }
    entry
}

/// A `composer.lock` document listing `packages`.
#[allow(dead_code)]
pub fn lock(packages: &[Value]) -> String {
    serde_json::to_string_pretty(&json!({
        "packages": packages,
        "packages-dev": [],
    }))
    .expect("Failed to serialize lock file")
}

/// A test fixture that provides a temporary project directory.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_manifest(manifests::APP)
///     .with_lock(&lock(&[]));
///
/// fixture.command().arg("compile").assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `composer.json`.
    pub fn with_manifest(self, content: &str) -> Self {
        self.with_file("composer.json", content)
    }

    /// Write `composer.lock`.
    pub fn with_lock(self, content: &str) -> Self {
        self.with_file("composer.lock", content)
    }

    /// Write `.container-installer.yaml`.
    #[allow(dead_code)]
    pub fn with_config(self, content: &str) -> Self {
        self.with_file(".container-installer.yaml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the generated containers file.
    #[allow(dead_code)]
    pub fn containers_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("containers.php")
    }

    /// Contents of the generated containers file.
    #[allow(dead_code)]
    pub fn containers(&self) -> String {
        std::fs::read_to_string(self.containers_path()).expect("Failed to read containers.php")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("container-installer");
        cmd.current_dir(self.path())
            .env_remove("CONTAINER_INSTALLER_CONFIG")
            .env_remove("CONTAINER_INSTALLER_LOCK_FILE")
            .env_remove("CONTAINER_INSTALLER_MANIFEST")
            .env_remove("CONTAINER_INSTALLER_OUTPUT")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_lock_helper_is_valid_json() {
        let content = lock(&[package("acme/foo", &["acme/bar"], Some(json!("f()")))]);
        let value: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["packages"][0]["name"], "acme/foo");
        assert_eq!(
            value["packages"][0]["extra"]["container-interop"]["container-factory"],
            "f()"
        );
    }
}
