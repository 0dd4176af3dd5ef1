//! Unified error types for the irrigation controller.
//!
//! The control core itself never fails: every error in this module comes
//! from an adapter (pins, datagram socket, network link) or from config
//! loading.  Each subsystem has its own small `Copy` enum that converts into
//! the top-level [`Error`], so the binary can funnel everything through one
//! type before handing it to `anyhow`.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible adapter operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Network link bring-up or query failed.
    Link(LinkError),
    /// The datagram transport could not receive or send.
    Transport(TransportError),
    /// A digital pin could not be configured, read or written.
    Gpio(GpioError),
    /// Configuration is invalid or could not be parsed.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link(e) => write!(f, "link: {e}"),
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Gpio(e) => write!(f, "gpio: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}
impl std::error::Error for LinkError {}
impl std::error::Error for TransportError {}
impl std::error::Error for GpioError {}
impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Link errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// The radio / network interface refused to initialise.
    InitFailed,
    /// Joining the access point failed (bad credentials, AP absent).
    JoinFailed,
    /// SSID or password rejected before reaching the driver.
    InvalidCredentials,
    /// No address has been acquired yet.
    NoAddress,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitFailed => write!(f, "interface init failed"),
            Self::JoinFailed => write!(f, "access point join failed"),
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::NoAddress => write!(f, "no address acquired"),
        }
    }
}

impl From<LinkError> for Error {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Binding the listening socket failed.
    BindFailed,
    /// Receive returned an I/O error other than "would block".
    ReceiveFailed,
    /// Send to the last peer failed.
    SendFailed,
    /// A reply was requested before any datagram arrived.
    NoPeer,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BindFailed => write!(f, "socket bind failed"),
            Self::ReceiveFailed => write!(f, "receive failed"),
            Self::SendFailed => write!(f, "send failed"),
            Self::NoPeer => write!(f, "no peer to reply to"),
        }
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// GPIO errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// `gpio_config` rejected the pin (rc carried from ESP-IDF).
    ConfigFailed(i32),
    /// Pin number outside the controller's GPIO range.
    InvalidPin(i32),
    /// Level write rejected by the driver.
    WriteFailed(i32),
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::InvalidPin(pin) => write!(f, "invalid GPIO {}", pin),
            Self::WriteFailed(rc) => write!(f, "GPIO write failed (rc={})", rc),
        }
    }
}

impl embedded_hal::digital::Error for GpioError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl From<GpioError> for Error {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The override text was not valid JSON for [`ControllerConfig`](crate::config::ControllerConfig).
    Malformed,
    /// A field failed range validation; the text names the field.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed config"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
