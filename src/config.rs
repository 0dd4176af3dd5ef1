//! Controller configuration.
//!
//! Tunable parameters live in [`ControllerConfig`].  The timing constants of
//! the control loop (tick period, cycle length, telemetry cadences) are part
//! of the design and live as `const`s in [`crate::irrigation`] and
//! [`crate::scheduler`] and are not configurable.
//!
//! There is no persistence: the binary starts from [`ControllerConfig::default`]
//! and optionally overlays a JSON document baked in at build time.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Fixed receive buffer capacity for one inbound command datagram.
pub const RX_BUFFER_LEN: usize = 128;

/// Core controller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // --- Watering ---
    /// Pump run time for an automatic watering event (seconds).
    /// Not range-checked: zero or huge values are tolerated.
    pub default_pump_run_secs: u32,

    // --- Command channel ---
    /// UDP port the command listener binds to.
    pub udp_port: u16,
    /// Settle delay before a status reply is sent (milliseconds).
    pub status_reply_delay_ms: u32,

    // --- Link ---
    /// Backoff between link initialisation attempts (milliseconds).
    pub link_retry_ms: u32,
    /// Access point to join.
    pub wifi_ssid: heapless::String<32>,
    /// WPA2 passphrase, or empty for an open network.
    pub wifi_password: heapless::String<64>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            default_pump_run_secs: 60,

            udp_port: 8000,
            status_reply_delay_ms: 1000,

            link_retry_ms: 1000,
            wifi_ssid: heapless::String::try_from("irrigator").unwrap_or_default(),
            wifi_password: heapless::String::new(),
        }
    }
}

impl ControllerConfig {
    /// Range-check the fields that would break bring-up.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.udp_port == 0 {
            return Err(ConfigError::ValidationFailed("udp_port must be non-zero"));
        }
        if !is_valid_ssid(&self.wifi_ssid) {
            return Err(ConfigError::ValidationFailed(
                "wifi_ssid must be 1-32 printable ASCII bytes",
            ));
        }
        if !is_valid_password(&self.wifi_password) {
            return Err(ConfigError::ValidationFailed(
                "wifi_password must be empty or 8-64 bytes",
            ));
        }
        Ok(())
    }

    /// Parse a JSON override document.  Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|e| {
            warn!("config: JSON parse error: {}", e);
            ConfigError::Malformed
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply an optional override, falling back to defaults on any error.
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json {
            Some(text) => match Self::from_json(text) {
                Ok(cfg) => {
                    info!("config: override applied");
                    cfg
                }
                Err(e) => {
                    warn!("config: override rejected ({}), using defaults", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

/// 1-32 bytes, each in `0x20..=0x7E`.
pub(crate) fn is_valid_ssid(ssid: &str) -> bool {
    (1..=32).contains(&ssid.len()) && ssid.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

/// Empty (open network) or a 8-64 byte WPA2 passphrase.
pub(crate) fn is_valid_password(password: &str) -> bool {
    password.is_empty() || (8..=64).contains(&password.len())
}
