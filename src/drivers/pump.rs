//! Water pump relay driver.
//!
//! Single digital output switching the pump relay.  The pump indicator LED
//! is wired on the same net, so it lights whenever the pump runs.
//!
//! ## Safety contract
//!
//! This driver is a dumb actuator: it never decides when to run.  The
//! irrigation state machine and manual commands are the only authorities.
//!
//! ## Readback
//!
//! [`PumpDriver::is_on`] reads the level back from the pin (not the last
//! command), so a status report reflects what the hardware is doing.

use embedded_hal::digital::StatefulOutputPin;
use log::warn;

use super::Polarity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpState {
    Stopped,
    Running,
}

pub struct PumpDriver<P> {
    pin: P,
    polarity: Polarity,
    state: PumpState,
}

impl<P: StatefulOutputPin> PumpDriver<P> {
    /// Wrap `pin` and force the pump off.
    pub fn new(pin: P, polarity: Polarity) -> Self {
        let mut driver = Self {
            pin,
            polarity,
            state: PumpState::Running,
        };
        driver.stop();
        driver
    }

    pub fn set(&mut self, on: bool) {
        let high = self.polarity.level_for(on);
        let result = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        match result {
            Ok(()) => {
                self.state = if on {
                    PumpState::Running
                } else {
                    PumpState::Stopped
                };
            }
            Err(e) => warn!("pump: pin write failed ({:?}), state unchanged", e),
        }
    }

    pub fn start(&mut self) {
        self.set(true);
    }

    pub fn stop(&mut self) {
        self.set(false);
    }

    /// Pin readback; falls back to the last successful command on error.
    pub fn is_on(&mut self) -> bool {
        match self.pin.is_set_high() {
            Ok(high) => self.polarity.is_active(high),
            Err(e) => {
                warn!("pump: pin readback failed ({:?})", e);
                self.state == PumpState::Running
            }
        }
    }

    pub fn state(&self) -> PumpState {
        self.state
    }
}
