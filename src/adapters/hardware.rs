//! Hardware adapter: bridges the pin drivers to domain port traits.
//!
//! Owns the soil probe, the pump relay and the indicator LEDs, exposing
//! them through [`SoilSensorPort`], [`PumpPort`] and [`IndicatorPort`].
//! Generic over the embedded-hal pin types so the same adapter runs on
//! [`Gpio`](crate::drivers::gpio::Gpio) pins and on test doubles.

use embedded_hal::digital::{InputPin, OutputPin, StatefulOutputPin};

use crate::app::ports::{IndicatorPort, PumpPort, SoilSensorPort};
use crate::drivers::gpio::Gpio;
use crate::drivers::pump::PumpDriver;
use crate::drivers::soil::SoilSensor;
use crate::drivers::status_led::StatusLeds;
use crate::error::Result;
use crate::pins;

/// Concrete adapter that combines all pin hardware behind port traits.
pub struct HardwareAdapter<S, P, D, H> {
    soil: SoilSensor<S>,
    pump: PumpDriver<P>,
    leds: StatusLeds<D, H>,
}

impl<S, P, D, H> HardwareAdapter<S, P, D, H>
where
    S: InputPin,
    P: StatefulOutputPin,
    D: OutputPin,
    H: StatefulOutputPin,
{
    pub fn new(soil: SoilSensor<S>, pump: PumpDriver<P>, leds: StatusLeds<D, H>) -> Self {
        Self { soil, pump, leds }
    }

    /// Pump off, LEDs off.
    pub fn all_off(&mut self) {
        self.pump.stop();
        self.leds.off();
    }
}

impl HardwareAdapter<Gpio, Gpio, Gpio, Gpio> {
    /// Configure the board pins listed in [`pins`], pump relay first and
    /// latched inactive, then park every output.
    pub fn from_board() -> Result<Self> {
        let pump_idle = pins::PUMP_POLARITY.level_for(false);
        let pump = PumpDriver::new(
            Gpio::output_at(pins::PUMP_GPIO, pump_idle)?,
            pins::PUMP_POLARITY,
        );
        let soil = SoilSensor::new(
            Gpio::input(pins::SOIL_SENSOR_GPIO)?,
            pins::SOIL_SENSOR_POLARITY,
        );
        let leds = StatusLeds::new(
            Gpio::output(pins::LED_DRY_GPIO)?,
            Gpio::output(pins::LED_HEARTBEAT_GPIO)?,
        );
        let mut hw = Self::new(soil, pump, leds);
        hw.all_off();
        Ok(hw)
    }
}

// ── SoilSensorPort implementation ─────────────────────────────

impl<S: InputPin, P, D, H> SoilSensorPort for HardwareAdapter<S, P, D, H> {
    fn is_soil_dry(&mut self) -> bool {
        self.soil.is_dry()
    }
}

// ── PumpPort implementation ───────────────────────────────────

impl<S, P: StatefulOutputPin, D, H> PumpPort for HardwareAdapter<S, P, D, H> {
    fn set_pump(&mut self, on: bool) {
        self.pump.set(on);
    }

    fn is_pump_on(&mut self) -> bool {
        self.pump.is_on()
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl<S, P, D: OutputPin, H: StatefulOutputPin> IndicatorPort for HardwareAdapter<S, P, D, H> {
    fn set_dry_indicator(&mut self, dry: bool) {
        self.leds.set_dry(dry);
    }

    fn toggle_heartbeat(&mut self) {
        self.leds.toggle_heartbeat();
    }
}
