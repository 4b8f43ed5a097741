//! Hue adapter configuration.

use serde::Deserialize;

fn default_timeout_secs() -> u64 {
    5
}

/// Connection settings for one Hue bridge.
///
/// The `username` is the application key the bridge hands out after its
/// link button is pressed; creating one is an interactive step outside
/// this adapter.
#[derive(Debug, Clone, Deserialize)]
pub struct HueConfig {
    /// Bridge IP or hostname.
    pub host: String,
    /// Application key for the bridge API.
    pub username: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}
