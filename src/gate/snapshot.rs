//! Per-request view of the remote configuration.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::edge_config::{ConfigKey, ConfigSource, ConfigSourceError, FeatureFlags, SiteConfig};

/// Outcome of reading one key
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum KeyRead<T> {
    /// Read succeeded and the value decoded
    Present(T),
    /// Key is not set (or set to `null`)
    Absent,
    /// Read failed or the value did not decode
    Failed(#[serde(serialize_with = "error_message")] ConfigSourceError),
}

fn error_message<S: Serializer>(err: &ConfigSourceError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&err.to_string())
}

impl<T> KeyRead<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            KeyRead::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ConfigSourceError> {
        match self {
            KeyRead::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, KeyRead::Failed(_))
    }
}

/// The three values observed for one gating decision.
///
/// The fields are read independently and may reflect different moments of
/// the remote store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    pub site_config: KeyRead<SiteConfig>,
    pub feature_flags: KeyRead<FeatureFlags>,
    pub maintenance_mode: KeyRead<bool>,
}

impl ConfigSnapshot {
    /// Snapshot with every key absent
    pub fn empty() -> Self {
        Self {
            site_config: KeyRead::Absent,
            feature_flags: KeyRead::Absent,
            maintenance_mode: KeyRead::Absent,
        }
    }

    /// Read all three keys concurrently, each bounded by `timeout`
    pub async fn fetch(source: &dyn ConfigSource, timeout: Duration) -> Self {
        let (site_config, maintenance_mode, feature_flags) = tokio::join!(
            read_key::<SiteConfig>(source, ConfigKey::SiteConfig, timeout),
            read_key::<bool>(source, ConfigKey::MaintenanceMode, timeout),
            read_key::<FeatureFlags>(source, ConfigKey::FeatureFlags, timeout),
        );

        Self {
            site_config,
            feature_flags,
            maintenance_mode,
        }
    }

    /// `maintenanceMode`, defaulting to false
    pub fn maintenance_enabled(&self) -> bool {
        self.maintenance_mode.value().copied().unwrap_or(false)
    }

    /// `siteConfig.analytics`, defaulting to false
    pub fn analytics_enabled(&self) -> bool {
        self.site_config
            .value()
            .map(SiteConfig::analytics_enabled)
            .unwrap_or(false)
    }

    /// `featureFlags.newFeatures`, defaulting to false
    pub fn new_features_enabled(&self) -> bool {
        self.feature_flags
            .value()
            .map(FeatureFlags::new_features_enabled)
            .unwrap_or(false)
    }

    /// Keys whose read failed, with the reason
    pub fn failures(&self) -> Vec<(ConfigKey, &ConfigSourceError)> {
        let mut failures = Vec::new();
        if let Some(err) = self.site_config.error() {
            failures.push((ConfigKey::SiteConfig, err));
        }
        if let Some(err) = self.feature_flags.error() {
            failures.push((ConfigKey::FeatureFlags, err));
        }
        if let Some(err) = self.maintenance_mode.error() {
            failures.push((ConfigKey::MaintenanceMode, err));
        }
        failures
    }

    pub fn has_failures(&self) -> bool {
        self.site_config.is_failed()
            || self.feature_flags.is_failed()
            || self.maintenance_mode.is_failed()
    }
}

async fn read_key<T: DeserializeOwned>(
    source: &dyn ConfigSource,
    key: ConfigKey,
    timeout: Duration,
) -> KeyRead<T> {
    let read = match tokio::time::timeout(timeout, source.get(key.as_str())).await {
        Ok(read) => read,
        Err(_) => return KeyRead::Failed(ConfigSourceError::Timeout(timeout.as_millis() as u64)),
    };

    match read {
        Err(err) => KeyRead::Failed(err),
        Ok(None) | Ok(Some(Value::Null)) => KeyRead::Absent,
        Ok(Some(value)) => match serde_json::from_value::<T>(value) {
            Ok(decoded) => KeyRead::Present(decoded),
            Err(e) => KeyRead::Failed(ConfigSourceError::Malformed {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        },
    }
}
