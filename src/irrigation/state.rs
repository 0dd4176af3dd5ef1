//! `ControllerState` and the per-tick transition pass.

use super::{CYCLE_LENGTH_TICKS, Phase, TICKS_PER_SECOND};

/// The single process-wide controller state.
///
/// Owned by [`IrrigationService`](crate::app::service::IrrigationService)
/// and only ever mutated through `&mut self` within one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerState {
    /// Ticks left in the current 24 h window; 0 = eligible to start a cycle.
    /// Invariant: `0 <= tick_counter <= CYCLE_LENGTH_TICKS`.
    pub tick_counter: u32,
    /// How long the pump stays on once an automatic event starts (ticks).
    pub pump_run_ticks: u32,
    /// When set, only explicit commands move the pump.
    pub manual_override: bool,
    /// Commanded pump output.
    pub pump_on: bool,
    /// Last soil sample (`true` = dry).  Not debounced.
    pub soil_dry: bool,
}

/// What one call to [`ControllerState::advance`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// A new watering cycle was started this tick.
    pub cycle_started: bool,
    /// The automatic shutoff rule fired and the pump was on before it.
    pub pump_stopped: bool,
}

impl ControllerState {
    /// Fresh state at power-on: idle, auto mode, pump off.
    pub fn new(pump_run_secs: u32) -> Self {
        Self {
            tick_counter: 0,
            pump_run_ticks: pump_run_secs.saturating_mul(TICKS_PER_SECOND),
            manual_override: false,
            pump_on: false,
            soil_dry: false,
        }
    }

    /// Ticks elapsed since the current cycle started (or the full cycle
    /// length when idle).  A counter above the window reads as zero elapsed.
    pub fn elapsed_in_cycle(&self) -> u32 {
        CYCLE_LENGTH_TICKS.saturating_sub(self.tick_counter)
    }

    /// Run one ordered tick pass with a fresh soil sample.
    pub fn advance(&mut self, soil_dry: bool) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        self.soil_dry = soil_dry;

        // Start: the only trigger for a cycle; needs a fully drained counter.
        if soil_dry && !self.manual_override && self.tick_counter == 0 {
            self.pump_on = true;
            self.tick_counter = CYCLE_LENGTH_TICKS;
            outcome.cycle_started = true;
        }

        // Shutoff: idempotent once the pump is already off.
        if !self.manual_override && self.elapsed_in_cycle() > self.pump_run_ticks {
            outcome.pump_stopped = self.pump_on;
            self.pump_on = false;
        }

        // Countdown acts on the value written above.
        if self.tick_counter > 0 {
            self.tick_counter -= 1;
        }

        outcome
    }

    /// Manual "on": pump on, automatic rules suspended.
    pub fn turn_on(&mut self) {
        self.pump_on = true;
        self.manual_override = true;
    }

    /// Manual "off": pump off, automatic rules resume next tick.
    pub fn turn_off(&mut self) {
        self.pump_on = false;
        self.manual_override = false;
    }

    /// Store a new run time given in seconds.  No bounds are enforced.
    pub fn set_pump_duration(&mut self, seconds: u32) {
        self.pump_run_ticks = seconds.saturating_mul(TICKS_PER_SECOND);
    }

    /// Classify the implicit state.
    pub fn phase(&self) -> Phase {
        match (self.manual_override, self.pump_on) {
            (true, true) => Phase::ManualOn,
            (true, false) => Phase::ManualOff,
            (false, true) => Phase::Watering,
            (false, false) if self.tick_counter == 0 => Phase::Idle,
            (false, false) => Phase::CoolingDown,
        }
    }
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new(60)
    }
}
