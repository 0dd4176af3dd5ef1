//! Port traits: the hexagonal boundary between the control core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ IrrigationService / Runtime
//! ```
//!
//! Driven adapters (pins, UDP socket, network link, console, clock)
//! implement these traits.  The core consumes them via generics, so it
//! never touches hardware directly and runs unchanged against test mocks.
//!
//! Pin-level ports are infallible from the core's point of view: adapters
//! log and swallow driver errors.  Only the network-facing ports surface
//! typed errors, and the core treats every one of them as non-fatal.

use crate::error::{LinkError, TransportError};

// ───────────────────────────────────────────────────────────────
// Sensor port (hardware → core)
// ───────────────────────────────────────────────────────────────

/// Soil moisture input.
pub trait SoilSensorPort {
    /// `true` when the soil reads dry.
    fn is_soil_dry(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuator ports (core → hardware)
// ───────────────────────────────────────────────────────────────

/// Pump output.  The pump indicator LED shares the pump pin.
pub trait PumpPort {
    fn set_pump(&mut self, on: bool);

    /// Read the output back from the pin.
    fn is_pump_on(&mut self) -> bool;
}

/// Cosmetic indicator LEDs.
pub trait IndicatorPort {
    /// Mirror the latest soil sample.
    fn set_dry_indicator(&mut self, dry: bool);

    /// Flip the heartbeat LED; called once per tick.
    fn toggle_heartbeat(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Datagram port (network ↔ core)
// ───────────────────────────────────────────────────────────────

/// Connectionless command channel.
///
/// Replies always go to the sender of the most recent datagram.
pub trait DatagramPort {
    /// Non-blocking receive into `buf`.
    ///
    /// `Ok(None)` when nothing is pending.  Datagrams longer than `buf`
    /// are truncated or rejected by the implementation.
    fn try_recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TransportError>;

    /// Send `data` to the last sender.
    fn reply(&mut self, data: &[u8]) -> Result<(), TransportError>;
}

// ───────────────────────────────────────────────────────────────
// Console port (core → local serial text)
// ───────────────────────────────────────────────────────────────

/// Best-effort text output.  Write failures are ignored, so the trait has
/// no error path.
pub trait ConsolePort {
    fn write_str(&mut self, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Link port (network interface bring-up)
// ───────────────────────────────────────────────────────────────

/// Address information as printable text.
pub type IpInfo = heapless::String<64>;

/// Station-mode network link.
pub trait LinkPort {
    /// Initialise the interface.  Retried by the caller until it succeeds.
    fn init(&mut self) -> Result<(), LinkError>;

    /// Join an access point.  Empty `password` means an open network.
    fn join(&mut self, ssid: &str, password: &str) -> Result<(), LinkError>;

    /// Current address information.
    fn ip_info(&mut self) -> Result<IpInfo, LinkError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source for the tick timer.
pub trait ClockPort {
    /// Microseconds since an arbitrary fixed origin.  Never goes backwards.
    fn now_us(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (core → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
