//! File-backed implementation of [`UserStore`].
//!
//! [`JsonFileStore`] keeps the whole graph in one JSON document (see
//! [`document`](crate::document)). Saves go to a sibling temp file which is
//! then renamed over the document, so a crash mid-save leaves the previous
//! document intact.

use std::fs;
use std::path::{Path, PathBuf};

use friendgraph_core::UserGraph;

use crate::document;
use crate::error::StorageError;
use crate::traits::UserStore;

/// A [`UserStore`] backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store for the document at `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes an empty document if none exists yet.
    ///
    /// Returns `true` when a new document was created.
    pub fn init(&mut self) -> Result<bool, StorageError> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&UserGraph::new())?;
        Ok(true)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl UserStore for JsonFileStore {
    fn load(&self) -> Result<UserGraph, StorageError> {
        let bytes = fs::read(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        document::decode(&bytes)
    }

    fn save(&mut self, graph: &UserGraph) -> Result<(), StorageError> {
        let bytes = document::encode(graph)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }

        let temp = self.temp_path();
        fs::write(&temp, &bytes).map_err(|e| StorageError::io(&temp, e))?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(StorageError::io(&self.path, e));
        }
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
