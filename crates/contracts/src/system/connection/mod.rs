//! Shared contract between the container entrypoint and the dashboard page.
//!
//! The entrypoint writes an [`InjectedConfig`] object into the page under
//! [`INJECTED_CONFIG_GLOBAL`] before any dashboard script runs. Everything else
//! here is the set of literal names both sides must agree on.

use serde::{Deserialize, Serialize};

/// Global name the container entrypoint assigns the injected config to.
pub const INJECTED_CONFIG_GLOBAL: &str = "ESPHOME_DESIGNER_CONFIG";

/// Primary localStorage key for the Home Assistant base URL.
pub const BASE_URL_KEY: &str = "ha_base_url";

/// Legacy URL key, still written so older builds keep reading the same value.
pub const LEGACY_URL_KEY: &str = "ha_manual_url";

/// localStorage key for the long-lived access token.
pub const TOKEN_KEY: &str = "ha_llat_token";

/// Path of the custom component API when served from inside Home Assistant.
pub const EMBEDDED_API_PATH: &str = "/api/reterminal_dashboard";

/// Values injected by the container entrypoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectedConfig {
    #[serde(rename = "HA_URL", default, skip_serializing_if = "Option::is_none")]
    pub ha_url: Option<String>,
    #[serde(rename = "HA_TOKEN", default, skip_serializing_if = "Option::is_none")]
    pub ha_token: Option<String>,
}

impl InjectedConfig {
    /// Injected URL, ignoring empty strings.
    pub fn url(&self) -> Option<&str> {
        non_empty(self.ha_url.as_deref())
    }

    /// Injected token, ignoring empty strings.
    pub fn token(&self) -> Option<&str> {
        non_empty(self.ha_token.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// How the dashboard reaches Home Assistant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionMode {
    /// Served by Home Assistant itself; auth rides on the HA session.
    #[default]
    Embedded,
    /// Served on its own; needs an explicit base URL and token.
    Standalone,
}

impl ConnectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionMode::Embedded => "embedded",
            ConnectionMode::Standalone => "standalone",
        }
    }

    pub fn is_standalone(&self) -> bool {
        matches!(self, ConnectionMode::Standalone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injected_config_from_entrypoint_json() {
        let config: InjectedConfig = serde_json::from_str(
            r#"{"HA_URL": "http://192.168.1.5:8123", "HA_TOKEN": "abc", "EXTRA": 1}"#,
        )
        .unwrap();
        assert_eq!(config.url(), Some("http://192.168.1.5:8123"));
        assert_eq!(config.token(), Some("abc"));
    }

    #[test]
    fn test_injected_config_missing_and_empty_fields() {
        let config: InjectedConfig = serde_json::from_str(r#"{"HA_URL": ""}"#).unwrap();
        assert_eq!(config.url(), None);
        assert_eq!(config.token(), None);
    }

    #[test]
    fn test_mode_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ConnectionMode::Standalone).unwrap(),
            "\"standalone\""
        );
        assert_eq!(ConnectionMode::Embedded.as_str(), "embedded");
        assert!(!ConnectionMode::default().is_standalone());
    }
}
