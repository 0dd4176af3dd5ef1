//! WiFi station-mode adapter.
//!
//! Implements [`LinkPort`]: interface bring-up, access-point join and
//! address query for the startup sequence and the periodic "IP info" line.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver via
//!   `esp_idf_svc::wifi::BlockingWifi`.
//! - **all other targets**: simulation stubs for host-side tests.  The
//!   simulated interface can be told to fail its first N init attempts so
//!   the retry loop is exercised.

use log::{info, warn};

use crate::app::ports::{IpInfo, LinkPort};
use crate::config::{is_valid_password, is_valid_ssid};
use crate::error::LinkError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};

// ───────────────────────────────────────────────────────────────
// Link state
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiState {
    Down,
    Started,
    Joined,
    JoinFailed,
}

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn validate_credentials(ssid: &str, password: &str) -> Result<(), LinkError> {
    if is_valid_ssid(ssid) && is_valid_password(password) {
        Ok(())
    } else {
        Err(LinkError::InvalidCredentials)
    }
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    state: WifiState,
    #[cfg(target_os = "espidf")]
    wifi: BlockingWifi<EspWifi<'static>>,
    /// Simulation: init attempts that still have to fail.
    #[cfg(not(target_os = "espidf"))]
    sim_init_failures: u32,
    #[cfg(not(target_os = "espidf"))]
    sim_init_attempts: u32,
}

impl WifiAdapter {
    #[cfg(target_os = "espidf")]
    pub fn new(wifi: BlockingWifi<EspWifi<'static>>) -> Self {
        Self {
            state: WifiState::Down,
            wifi,
        }
    }

    /// Simulated interface whose first `init_failures` init calls fail.
    #[cfg(not(target_os = "espidf"))]
    pub fn simulated(init_failures: u32) -> Self {
        Self {
            state: WifiState::Down,
            sim_init_failures: init_failures,
            sim_init_attempts: 0,
        }
    }

    pub fn state(&self) -> WifiState {
        self.state
    }

    /// Init attempts seen by the simulated interface.
    #[cfg(not(target_os = "espidf"))]
    pub fn init_attempts(&self) -> u32 {
        self.sim_init_attempts
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_init(&mut self) -> Result<(), LinkError> {
        self.wifi
            .set_configuration(&Configuration::Client(ClientConfiguration::default()))
            .map_err(|e| {
                warn!("WiFi: configuration rejected: {:?}", e);
                LinkError::InitFailed
            })?;
        self.wifi.start().map_err(|e| {
            warn!("WiFi: start failed: {:?}", e);
            LinkError::InitFailed
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_init(&mut self) -> Result<(), LinkError> {
        self.sim_init_attempts += 1;
        if self.sim_init_failures > 0 {
            self.sim_init_failures -= 1;
            warn!("WiFi(sim): simulated init failure (attempt {})", self.sim_init_attempts);
            return Err(LinkError::InitFailed);
        }
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_join(&mut self, ssid: &str, password: &str) -> Result<(), LinkError> {
        let auth_method = if password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let client = ClientConfiguration {
            ssid: ssid.try_into().map_err(|_| LinkError::InvalidCredentials)?,
            password: password
                .try_into()
                .map_err(|_| LinkError::InvalidCredentials)?,
            auth_method,
            ..Default::default()
        };
        self.wifi
            .set_configuration(&Configuration::Client(client))
            .map_err(|_| LinkError::JoinFailed)?;
        self.wifi.connect().map_err(|e| {
            warn!("WiFi: connect failed: {:?}", e);
            LinkError::JoinFailed
        })?;
        self.wifi.wait_netif_up().map_err(|e| {
            warn!("WiFi: netif did not come up: {:?}", e);
            LinkError::JoinFailed
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_join(&mut self, ssid: &str, _password: &str) -> Result<(), LinkError> {
        info!("WiFi(sim): joined '{}'", ssid);
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_ip_info(&self) -> Result<IpInfo, LinkError> {
        use core::fmt::Write as _;

        let info = self
            .wifi
            .wifi()
            .sta_netif()
            .get_ip_info()
            .map_err(|_| LinkError::NoAddress)?;
        let mut text = IpInfo::new();
        let _ = write!(text, "ip={} gw={}", info.ip, info.subnet.gateway);
        Ok(text)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_ip_info(&self) -> Result<IpInfo, LinkError> {
        let mut text = IpInfo::new();
        let _ = text.push_str("ip=192.168.4.2 gw=192.168.4.1");
        Ok(text)
    }
}

// ───────────────────────────────────────────────────────────────
// LinkPort
// ───────────────────────────────────────────────────────────────

impl LinkPort for WifiAdapter {
    fn init(&mut self) -> Result<(), LinkError> {
        self.platform_init()?;
        self.state = WifiState::Started;
        info!("WiFi: interface started");
        Ok(())
    }

    fn join(&mut self, ssid: &str, password: &str) -> Result<(), LinkError> {
        if self.state == WifiState::Down {
            return Err(LinkError::InitFailed);
        }
        let joined =
            validate_credentials(ssid, password).and_then(|()| self.platform_join(ssid, password));
        if let Err(e) = joined {
            self.state = WifiState::JoinFailed;
            return Err(e);
        }
        self.state = WifiState::Joined;
        Ok(())
    }

    fn ip_info(&mut self) -> Result<IpInfo, LinkError> {
        if self.state != WifiState::Joined {
            return Err(LinkError::NoAddress);
        }
        self.platform_ip_info()
    }
}
