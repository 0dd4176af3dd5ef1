//! Tick-driven irrigation state machine.
//!
//! The controller state is a handful of counters and flags rather than an
//! explicit state enum.  Every tick runs one ordered pass over it:
//!
//! ```text
//!   sample soil ──▶ start rule ──▶ shutoff rule ──▶ countdown
//!                   (dry, auto,    (auto, run time   (counter > 0)
//!                    counter==0)    exceeded)
//! ```
//!
//! Later rules see the writes of earlier rules in the same pass, so a cycle
//! started this tick is also decremented this tick.
//!
//! [`Phase`] names the implicit states for logging and telemetry only; the
//! transition rules never consult it.

pub mod state;

pub use state::{ControllerState, TickOutcome};

/// Control loop period.
pub const TICK_PERIOD_MS: u32 = 100;

/// Ticks per second of wall-clock time.
pub const TICKS_PER_SECOND: u32 = 1000 / TICK_PERIOD_MS;

/// Length of one watering cycle: 24 hours expressed in ticks.
pub const CYCLE_LENGTH_TICKS: u32 = 24 * 3600 * TICKS_PER_SECOND;

/// Human-readable classification of the implicit controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Cycle drained, waiting for dry soil.
    Idle,
    /// Automatic watering event in progress.
    Watering,
    /// Pump off, counting down the rest of the 24 h window.
    CoolingDown,
    /// Manual override with the pump on.
    ManualOn,
    /// Manual override with the pump off.
    ManualOff,
}

impl Phase {
    /// Short lowercase label for log lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Watering => "watering",
            Self::CoolingDown => "cooling-down",
            Self::ManualOn => "manual-on",
            Self::ManualOff => "manual-off",
        }
    }
}
