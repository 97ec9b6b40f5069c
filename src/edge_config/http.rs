//! HTTP config source.
//!
//! Speaks the Edge Config item API: `GET {endpoint}/item/{key}` with a bearer
//! token. A `404` means the key is not set.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::errors::{ConfigSourceError, ConfigSourceResult};
use super::source::ConfigSource;

/// Connection settings for the remote store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpSourceSettings {
    /// Base URL, e.g. `https://edge-config.vercel.com/ecfg_abc`
    pub endpoint: String,

    /// Read token
    #[serde(default)]
    pub token: Option<String>,

    /// Per-request timeout in milliseconds (default: 1000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    1000
}

/// Reads keys over HTTP
#[derive(Debug, Clone)]
pub struct HttpConfigSource {
    client: reqwest::Client,
    endpoint: String,
    timeout_ms: u64,
}

impl HttpConfigSource {
    pub fn new(settings: &HttpSourceSettings) -> ConfigSourceResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &settings.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                ConfigSourceError::Malformed {
                    key: "token".to_string(),
                    reason: "token is not a valid header value".to_string(),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigSourceError::Unreachable(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            timeout_ms: settings.timeout_ms,
        })
    }

    fn item_url(&self, key: &str) -> String {
        format!("{}/item/{}", self.endpoint, key)
    }

    fn map_transport_error(&self, err: reqwest::Error) -> ConfigSourceError {
        if err.is_timeout() {
            ConfigSourceError::Timeout(self.timeout_ms)
        } else {
            ConfigSourceError::Unreachable(err.to_string())
        }
    }
}

#[async_trait]
impl ConfigSource for HttpConfigSource {
    async fn get(&self, key: &str) -> ConfigSourceResult<Option<Value>> {
        let url = self.item_url(key);
        debug!(%url, "reading remote config key");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let value = response.json::<Value>().await.map_err(|e| {
                    if e.is_timeout() {
                        ConfigSourceError::Timeout(self.timeout_ms)
                    } else {
                        ConfigSourceError::Malformed {
                            key: key.to_string(),
                            reason: e.to_string(),
                        }
                    }
                })?;
                Ok(Some(value))
            }
            status => Err(ConfigSourceError::Status(status.as_u16())),
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
