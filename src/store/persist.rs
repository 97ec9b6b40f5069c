//! JSON file persistence.
//!
//! The whole store is written after every mutation. Writes go to a sibling
//! temp file which is then renamed over the target, so a crash leaves either
//! the old or the new document on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::errors::{StoreError, StoreResult};
use super::models::{ContactMessage, Education, Experience, Profile, Project, Skill};

/// Serialized form of the whole store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDocument {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub messages: Vec<ContactMessage>,
}

#[derive(Debug)]
pub struct JsonFile {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, `None` if the file does not exist yet
    pub fn load(&self) -> StoreResult<Option<StoreDocument>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|e| StoreError::Storage(format!("{}: {}", self.path.display(), e)))?;
        let document = serde_json::from_str(&contents)
            .map_err(|e| StoreError::Storage(format!("{}: {}", self.path.display(), e)))?;
        Ok(Some(document))
    }

    /// Capture and write a document.
    ///
    /// `capture` runs under the write lock so the last writer always saves
    /// the latest state.
    pub fn save_with<F>(&self, capture: F) -> StoreResult<()>
    where
        F: FnOnce() -> StoreResult<StoreDocument>,
    {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::poisoned())?;
        let document = capture()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::Storage(e.to_string()))?;
            }
        }

        let json = serde_json::to_vec_pretty(&document)
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| StoreError::Storage(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::Storage(e.to_string()))?;

        debug!(path = %self.path.display(), "store persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let file = JsonFile::new(dir.path().join("store.json"));
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let file = JsonFile::new(dir.path().join("nested").join("store.json"));

        file.save_with(|| Ok(StoreDocument::default())).unwrap();
        let loaded = file.load().unwrap().unwrap();
        assert!(loaded.profile.is_none());
        assert!(loaded.projects.is_empty());
        assert!(!dir.path().join("nested").join("store.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{ not json").unwrap();

        let file = JsonFile::new(path);
        assert!(matches!(file.load(), Err(StoreError::Storage(_))));
    }
}
