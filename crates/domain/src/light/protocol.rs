//! Vendor protocol tag — which adapter a light is controlled through.

use serde::{Deserialize, Serialize};

/// The vendor protocol backing a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Philips Hue bulb behind a bridge.
    Hue,
    /// LIFX bulb via the LIFX HTTP API.
    Lifx,
    /// Simulated light for tests and demos.
    Virtual,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hue => f.write_str("hue"),
            Self::Lifx => f.write_str("lifx"),
            Self::Virtual => f.write_str("virtual"),
        }
    }
}
