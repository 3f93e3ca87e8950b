//! Phase 4: Writing the Containers File
//!
//! This is the final phase of the `container-installer` pipeline. It owns the
//! one piece of persistent state: the containers file.
//!
//! ## Process
//!
//! [`ContainersFile`] is a handle over that file with two scoped operations:
//!
//! 1.  **Load**: Read and parse the previous file once, before merging. A
//!     missing file means no previous entries.
//!
//! 2.  **Store**: Render the merged entries and replace the file in one step.
//!     The content is written to a temporary file in the same directory and
//!     renamed over the target, so readers see either the old or the new file
//!     and a failed write leaves the old file in place. An empty entry list
//!     leaves any existing file untouched, and identical content is not
//!     rewritten.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::factory::FactoryEntry;
use crate::php;

/// What [`ContainersFile::store`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was created or replaced.
    Written,
    /// The file already had exactly this content.
    Unchanged,
    /// There were no entries; nothing was written.
    SkippedEmpty,
}

/// Handle over the persisted containers file
#[derive(Debug, Clone)]
pub struct ContainersFile {
    path: PathBuf,
}

impl ContainersFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the previous entries.
    ///
    /// Returns an empty list when the file does not exist, and
    /// `Error::PersistenceRead` when it exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Vec<FactoryEntry>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.read_error(e)),
        };

        let entries = php::parse_entries(&content).map_err(|e| self.read_error(e))?;
        debug!(
            "Loaded {} previous entries from {}",
            entries.len(),
            self.path.display()
        );
        Ok(entries)
    }

    /// Render `entries` to the containers file format without writing.
    pub fn render(&self, entries: &[FactoryEntry]) -> String {
        php::render_entries(entries)
    }

    /// Replace the file with `entries`.
    pub fn store(&self, entries: &[FactoryEntry]) -> Result<WriteOutcome> {
        if entries.is_empty() {
            debug!(
                "No container factories found; leaving {} untouched",
                self.path.display()
            );
            return Ok(WriteOutcome::SkippedEmpty);
        }

        let rendered = self.render(entries);
        if fs::read_to_string(&self.path).is_ok_and(|existing| existing == rendered) {
            return Ok(WriteOutcome::Unchanged);
        }

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| self.write_error(e))?;

        let mut temp = NamedTempFile::new_in(&dir).map_err(|e| self.write_error(e))?;
        temp.write_all(rendered.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| self.write_error(e))?;
        self.copy_permissions(temp.path())?;

        temp.persist(&self.path)
            .map_err(|e| self.write_error(e.error))?;
        debug!("Wrote {} entries to {}", entries.len(), self.path.display());
        Ok(WriteOutcome::Written)
    }

    /// Give the temporary file the target's permissions, or the usual
    /// world-readable mode for a new file.
    fn copy_permissions(&self, temp_path: &Path) -> Result<()> {
        let permissions = match fs::metadata(&self.path) {
            Ok(metadata) => Some(metadata.permissions()),
            Err(_) => {
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    Some(fs::Permissions::from_mode(0o644))
                }
                #[cfg(not(unix))]
                {
                    None
                }
            }
        };

        if let Some(permissions) = permissions {
            fs::set_permissions(temp_path, permissions).map_err(|e| self.write_error(e))?;
        }
        Ok(())
    }

    fn read_error(&self, e: impl ToString) -> Error {
        Error::PersistenceRead {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }

    fn write_error(&self, e: impl ToString) -> Error {
        Error::PersistenceWrite {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }
}
