//! Digital soil-moisture probe.
//!
//! The probe's comparator output goes active when the soil is dry.  One
//! raw read per call, no debouncing: the control loop samples once a tick.

use embedded_hal::digital::InputPin;
use log::warn;

use super::Polarity;

pub struct SoilSensor<P> {
    pin: P,
    polarity: Polarity,
    last_dry: bool,
}

impl<P: InputPin> SoilSensor<P> {
    pub fn new(pin: P, polarity: Polarity) -> Self {
        Self {
            pin,
            polarity,
            last_dry: false,
        }
    }

    /// Sample the probe.  A failed read repeats the previous sample.
    pub fn is_dry(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(high) => self.last_dry = self.polarity.is_active(high),
            Err(e) => warn!("soil: pin read failed ({:?}), reusing last sample", e),
        }
        self.last_dry
    }
}
