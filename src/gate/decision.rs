//! Gate decision policy.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use super::snapshot::ConfigSnapshot;

/// User-facing text of the maintenance block
pub const MAINTENANCE_MESSAGE: &str = "Site is under maintenance. Please check back later.";

/// Body returned when a request is blocked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceNotice {
    pub message: String,
    pub maintenance: bool,
}

impl Default for MaintenanceNotice {
    fn default() -> Self {
        Self {
            message: MAINTENANCE_MESSAGE.to_string(),
            maintenance: true,
        }
    }
}

/// Informational header attached to allowed responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Annotation {
    /// `siteConfig.analytics` is on
    AnalyticsEnabled,
    /// `featureFlags.newFeatures` is on
    NewFeatures,
}

impl Annotation {
    pub fn header_name(&self) -> HeaderName {
        match self {
            Annotation::AnalyticsEnabled => HeaderName::from_static("x-analytics-enabled"),
            Annotation::NewFeatures => HeaderName::from_static("x-new-features"),
        }
    }

    pub fn header_value(&self) -> HeaderValue {
        match self {
            Annotation::AnalyticsEnabled => HeaderValue::from_static("true"),
            Annotation::NewFeatures => HeaderValue::from_static("enabled"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockReason {
    /// `maintenanceMode` is true
    Maintenance,
    /// A read failed and the policy is fail-closed
    ConfigUnavailable,
}

/// What to do with a protected request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum GateDecision {
    Block { reason: BlockReason },
    Allow { annotations: Vec<Annotation> },
}

impl GateDecision {
    pub fn is_blocked(&self) -> bool {
        matches!(self, GateDecision::Block { .. })
    }

    /// Annotations to attach; empty when blocked
    pub fn annotations(&self) -> &[Annotation] {
        match self {
            GateDecision::Allow { annotations } => annotations,
            GateDecision::Block { .. } => &[],
        }
    }
}

/// Paths the gate inspects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedPaths {
    /// Gate the site root `/`
    #[serde(default = "default_true")]
    pub root: bool,

    /// Gate each prefix and everything below it
    #[serde(default = "default_prefixes")]
    pub prefixes: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_prefixes() -> Vec<String> {
    vec!["/admin".to_string()]
}

impl Default for ProtectedPaths {
    fn default() -> Self {
        Self {
            root: true,
            prefixes: default_prefixes(),
        }
    }
}

impl ProtectedPaths {
    pub fn matches(&self, path: &str) -> bool {
        if self.root && path == "/" {
            return true;
        }

        self.prefixes.iter().any(|prefix| {
            let prefix = prefix.trim_end_matches('/');
            match path.strip_prefix(prefix) {
                Some(rest) => rest.is_empty() || rest.starts_with('/'),
                None => false,
            }
        })
    }
}

/// Gate configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatePolicy {
    /// Block protected pages when any config read fails (default: false)
    #[serde(default)]
    pub fail_closed: bool,

    /// Upper bound on each config read in milliseconds (default: 1500)
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    #[serde(default)]
    pub protected: ProtectedPaths,
}

fn default_fetch_timeout_ms() -> u64 {
    1500
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            fail_closed: false,
            fetch_timeout_ms: default_fetch_timeout_ms(),
            protected: ProtectedPaths::default(),
        }
    }
}

impl GatePolicy {
    pub fn fail_closed() -> Self {
        Self {
            fail_closed: true,
            ..Default::default()
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

/// Map a snapshot to a decision.
///
/// Maintenance is checked before any annotation is computed, so a blocked
/// response never carries feature headers.
pub fn decide(snapshot: &ConfigSnapshot, policy: &GatePolicy) -> GateDecision {
    if policy.fail_closed && snapshot.has_failures() {
        return GateDecision::Block {
            reason: BlockReason::ConfigUnavailable,
        };
    }

    if snapshot.maintenance_enabled() {
        return GateDecision::Block {
            reason: BlockReason::Maintenance,
        };
    }

    let mut annotations = Vec::with_capacity(2);
    if snapshot.analytics_enabled() {
        annotations.push(Annotation::AnalyticsEnabled);
    }
    if snapshot.new_features_enabled() {
        annotations.push(Annotation::NewFeatures);
    }

    GateDecision::Allow { annotations }
}
