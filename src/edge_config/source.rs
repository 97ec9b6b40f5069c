//! Config source abstraction.

use async_trait::async_trait;
use serde_json::Value;

use super::errors::{ConfigSourceError, ConfigSourceResult};

/// Read interface of the remote key-value store.
///
/// `Ok(None)` means the key has never been set. Each call is independent;
/// no consistency is promised between two reads.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Read a single key
    async fn get(&self, key: &str) -> ConfigSourceResult<Option<Value>>;

    /// Short label for logs
    fn name(&self) -> &'static str;
}

/// Source used when no remote store is configured.
///
/// Every read fails with [`ConfigSourceError::NotConfigured`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredSource;

#[async_trait]
impl ConfigSource for UnconfiguredSource {
    async fn get(&self, _key: &str) -> ConfigSourceResult<Option<Value>> {
        Err(ConfigSourceError::NotConfigured)
    }

    fn name(&self) -> &'static str {
        "unconfigured"
    }
}
