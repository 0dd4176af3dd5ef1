//! Outbound application events.
//!
//! The [`IrrigationService`](super::service::IrrigationService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them: log to serial, forward over the
//! network, count them in a test.

use crate::irrigation::Phase;
use crate::protocol::{Command, StatusLine};

/// Structured events emitted by the control core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service started (carries the configured run time).
    Started { pump_run_ticks: u32 },

    /// A command decoded from a datagram was applied.
    CommandApplied(Command),

    /// A status reply was sent (or attempted) to the last peer.
    StatusReplied { delivered: bool },

    /// The implicit controller phase changed.
    PhaseChanged { from: Phase, to: Phase },

    /// An automatic watering cycle started.
    CycleStarted,

    /// The automatic shutoff stopped the pump.
    PumpStopped,

    /// Periodic status snapshot.
    Telemetry(StatusLine),
}
