//! In-process config source.
//!
//! Backs local development (loaded from a JSON file) and tests, where
//! individual keys can be forced to fail.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use super::errors::{ConfigSourceError, ConfigSourceResult};
use super::source::ConfigSource;

/// Mutable in-memory key-value store
#[derive(Debug, Default)]
pub struct InMemoryConfigSource {
    values: RwLock<HashMap<String, Value>>,
    failing: RwLock<HashSet<String>>,
}

impl InMemoryConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON object whose top-level entries become keys
    pub fn from_json(document: Value) -> ConfigSourceResult<Self> {
        let Value::Object(map) = document else {
            return Err(ConfigSourceError::Malformed {
                key: "<root>".to_string(),
                reason: "expected a JSON object".to_string(),
            });
        };

        Ok(Self {
            values: RwLock::new(map.into_iter().collect()),
            failing: RwLock::new(HashSet::new()),
        })
    }

    /// Load a JSON document from disk
    pub fn from_file(path: &Path) -> ConfigSourceResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigSourceError::Unreachable(format!("{}: {}", path.display(), e)))?;
        let document: Value =
            serde_json::from_str(&contents).map_err(|e| ConfigSourceError::Malformed {
                key: "<root>".to_string(),
                reason: e.to_string(),
            })?;
        Self::from_json(document)
    }

    /// Set or replace a key
    pub fn set(&self, key: impl Into<String>, value: Value) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.into(), value);
        }
    }

    /// Remove a key so that it reads as absent
    pub fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.write() {
            values.remove(key);
        }
    }

    /// Make every read of `key` fail until [`Self::recover`] is called
    pub fn fail(&self, key: impl Into<String>) {
        if let Ok(mut failing) = self.failing.write() {
            failing.insert(key.into());
        }
    }

    pub fn recover(&self, key: &str) {
        if let Ok(mut failing) = self.failing.write() {
            failing.remove(key);
        }
    }
}

#[async_trait]
impl ConfigSource for InMemoryConfigSource {
    async fn get(&self, key: &str) -> ConfigSourceResult<Option<Value>> {
        let failing = self
            .failing
            .read()
            .map_err(|_| ConfigSourceError::Unreachable("lock poisoned".to_string()))?;
        if failing.contains(key) {
            return Err(ConfigSourceError::Unreachable(format!(
                "read of {key} failed"
            )));
        }
        drop(failing);

        let values = self
            .values
            .read()
            .map_err(|_| ConfigSourceError::Unreachable("lock poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
