//! Indicator LEDs.
//!
//! - **dry**: mirrors the soil sample.
//! - **heartbeat**: toggled every control tick, so a frozen loop is visible
//!   at a glance.
//!
//! Both are cosmetic; write failures are ignored.

use embedded_hal::digital::{OutputPin, StatefulOutputPin};

pub struct StatusLeds<D, H> {
    dry: D,
    heartbeat: H,
}

impl<D: OutputPin, H: StatefulOutputPin> StatusLeds<D, H> {
    pub fn new(dry: D, heartbeat: H) -> Self {
        Self { dry, heartbeat }
    }

    pub fn set_dry(&mut self, on: bool) {
        let _ = if on {
            self.dry.set_high()
        } else {
            self.dry.set_low()
        };
    }

    pub fn toggle_heartbeat(&mut self) {
        let _ = self.heartbeat.toggle();
    }

    pub fn off(&mut self) {
        let _ = self.dry.set_low();
        let _ = self.heartbeat.set_low();
    }
}
