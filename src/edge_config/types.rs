//! Typed views of the remote configuration entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The keys the gate reads on every request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigKey {
    #[serde(rename = "siteConfig")]
    SiteConfig,
    #[serde(rename = "featureFlags")]
    FeatureFlags,
    #[serde(rename = "maintenanceMode")]
    MaintenanceMode,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 3] = [
        ConfigKey::SiteConfig,
        ConfigKey::FeatureFlags,
        ConfigKey::MaintenanceMode,
    ];

    /// Key name as stored remotely
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::SiteConfig => "siteConfig",
            ConfigKey::FeatureFlags => "featureFlags",
            ConfigKey::MaintenanceMode => "maintenanceMode",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `siteConfig` entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
}

impl SiteConfig {
    pub fn analytics_enabled(&self) -> bool {
        self.analytics.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

/// `featureFlags` entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_features: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta_mode: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
}

impl FeatureFlags {
    pub fn new_features_enabled(&self) -> bool {
        self.new_features.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_site_config_accepts_partial_objects() {
        let config: SiteConfig = serde_json::from_value(json!({ "analytics": true })).unwrap();
        assert!(config.analytics_enabled());
        assert!(config.social_links.is_none());

        let config: SiteConfig = serde_json::from_value(json!({
            "title": "Portfolio",
            "socialLinks": { "github": "https://github.com/me" }
        }))
        .unwrap();
        assert!(!config.analytics_enabled());
        assert_eq!(
            config.social_links.unwrap().github.as_deref(),
            Some("https://github.com/me")
        );
    }

    #[test]
    fn test_feature_flags_camel_case() {
        let flags: FeatureFlags =
            serde_json::from_value(json!({ "newFeatures": true, "darkMode": false })).unwrap();
        assert!(flags.new_features_enabled());
        assert_eq!(flags.dark_mode, Some(false));
        assert_eq!(flags.beta_mode, None);
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        let result: Result<FeatureFlags, _> =
            serde_json::from_value(json!({ "newFeatures": "yes" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_key_names() {
        let names: Vec<_> = ConfigKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["siteConfig", "featureFlags", "maintenanceMode"]);
    }
}
