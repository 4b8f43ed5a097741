//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `lumend.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// State store settings.
    pub store: StoreConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Virtual adapter toggle.
    pub integrations: IntegrationsConfig,
    /// Philips Hue bridge settings.
    pub hue: HueSection,
    /// LIFX HTTP API settings.
    pub lifx: LifxSection,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// State file configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the JSON state document.
    pub path: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Built-in integration toggles.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IntegrationsConfig {
    /// Enable the virtual/demo adapter.
    pub virtual_enabled: bool,
}

/// Philips Hue bridge section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HueSection {
    /// Enable the Hue adapter.
    pub enabled: bool,
    /// Bridge IP or hostname; when empty the Philips discovery service is
    /// asked for one at startup.
    pub host: String,
    /// Application key for the bridge API.
    pub username: String,
}

/// LIFX HTTP API section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LifxSection {
    /// Enable the LIFX adapter.
    pub enabled: bool,
    /// Personal access token.
    pub token: String,
}

impl Config {
    /// Load configuration from `lumend.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("lumend.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("LUMEN_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("LUMEN_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Ok(val) = std::env::var("LUMEN_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("LUMEN_STORE_PATH") {
            self.store.path = val;
        }
        if let Ok(val) = std::env::var("LUMEN_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("LUMEN_HUE_HOST") {
            self.hue.host = val;
            self.hue.enabled = true;
        }
        if let Ok(val) = std::env::var("LUMEN_HUE_USERNAME") {
            self.hue.username = val;
        }
        if let Ok(val) = std::env::var("LUMEN_LIFX_TOKEN") {
            self.lifx.token = val;
            self.lifx.enabled = true;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.store.path.is_empty() {
            return Err(ConfigError::Validation(
                "store path must not be empty".to_string(),
            ));
        }
        if self.hue.enabled && self.hue.username.is_empty() {
            return Err(ConfigError::Validation(
                "hue.username is required when the hue adapter is enabled".to_string(),
            ));
        }
        if self.lifx.enabled && self.lifx.token.is_empty() {
            return Err(ConfigError::Validation(
                "lifx.token is required when the lifx adapter is enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: "lumen_state.json".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "lumend=info,lumen=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for IntegrationsConfig {
    fn default() -> Self {
        Self {
            virtual_enabled: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.store.path, "lumen_state.json");
        assert!(config.integrations.virtual_enabled);
        assert!(!config.hue.enabled);
        assert!(!config.lifx.enabled);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [store]
            path = '/var/lib/lumen/state.json'

            [logging]
            filter = 'debug'

            [integrations]
            virtual_enabled = false

            [hue]
            enabled = true
            host = '192.168.1.2'
            username = 'abcdef'

            [lifx]
            enabled = true
            token = 'c0ffee'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.store.path, "/var/lib/lumen/state.json");
        assert!(!config.integrations.virtual_enabled);
        assert!(config.hue.enabled);
        assert_eq!(config.hue.username, "abcdef");
        assert!(config.lifx.enabled);
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [server]
            port = 8080
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.integrations.virtual_enabled);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_enabled_hue_without_username() {
        let mut config = Config::default();
        config.hue.enabled = true;
        config.hue.host = "192.168.1.2".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_enabled_lifx_without_token() {
        let mut config = Config::default();
        config.lifx.enabled = true;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_format_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
