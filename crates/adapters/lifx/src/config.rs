//! LIFX adapter configuration.

use serde::Deserialize;

fn default_base_url() -> String {
    "https://api.lifx.com/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

/// Connection settings for the LIFX HTTP API.
#[derive(Debug, Clone, Deserialize)]
pub struct LifxConfig {
    /// Personal access token (`https://cloud.lifx.com/settings`).
    pub token: String,
    /// API root; overridable for tests.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_minimal_config_with_defaults() {
        let config: LifxConfig = serde_json::from_str(r#"{"token": "c0ffee"}"#).unwrap();
        assert_eq!(config.base_url, "https://api.lifx.com/v1");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn should_parse_overridden_base_url() {
        let config: LifxConfig =
            serde_json::from_str(r#"{"token": "t", "base_url": "http://localhost:9000/v1"}"#)
                .unwrap();
        assert_eq!(config.base_url, "http://localhost:9000/v1");
    }
}
