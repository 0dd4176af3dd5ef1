//! Raw GPIO pin exposed through the embedded-hal 1.0 digital traits.
//!
//! Configures the pin with a one-shot `gpio_config` call and then reads or
//! writes levels with the plain ESP-IDF register helpers.  Outputs are
//! configured as input+output so the driven level can be read back.
//!
//! On non-espidf targets the pin is backed by an in-memory level bank in
//! [`sim`], so host harnesses can poke inputs and observe outputs.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};
use log::info;

use crate::error::GpioError;

/// Number of GPIOs on the ESP32-S3 (GPIO0..=GPIO48).
pub const GPIO_COUNT: i32 = 49;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Input,
    Output,
}

/// One configured digital pin.
#[derive(Debug)]
pub struct Gpio {
    pin: i32,
    direction: Direction,
}

impl Gpio {
    /// Configure `pin` as a floating digital input.
    pub fn input(pin: i32) -> Result<Self, GpioError> {
        configure(pin, Direction::Input)?;
        info!("gpio: GPIO{} configured as input", pin);
        Ok(Self {
            pin,
            direction: Direction::Input,
        })
    }

    /// Configure `pin` as a push-pull output, driven low.
    pub fn output(pin: i32) -> Result<Self, GpioError> {
        Self::output_at(pin, false)
    }

    /// Configure `pin` as a push-pull output whose first driven level is
    /// `high`.  The level is latched before the driver is enabled, so the
    /// pin never shows the opposite level.
    pub fn output_at(pin: i32, high: bool) -> Result<Self, GpioError> {
        check_pin(pin)?;
        write_level(pin, high)?;
        configure(pin, Direction::Output)?;
        info!("gpio: GPIO{} configured as output ({})", pin, if high { "high" } else { "low" });
        Ok(Self {
            pin,
            direction: Direction::Output,
        })
    }

    pub fn pin(&self) -> i32 {
        self.pin
    }

    pub fn is_output(&self) -> bool {
        self.direction == Direction::Output
    }
}

impl ErrorType for Gpio {
    type Error = GpioError;
}

impl InputPin for Gpio {
    fn is_high(&mut self) -> Result<bool, GpioError> {
        Ok(read_level(self.pin))
    }

    fn is_low(&mut self) -> Result<bool, GpioError> {
        Ok(!read_level(self.pin))
    }
}

impl OutputPin for Gpio {
    fn set_low(&mut self) -> Result<(), GpioError> {
        write_level(self.pin, false)
    }

    fn set_high(&mut self) -> Result<(), GpioError> {
        write_level(self.pin, true)
    }
}

impl StatefulOutputPin for Gpio {
    fn is_set_high(&mut self) -> Result<bool, GpioError> {
        Ok(read_level(self.pin))
    }

    fn is_set_low(&mut self) -> Result<bool, GpioError> {
        Ok(!read_level(self.pin))
    }
}

fn check_pin(pin: i32) -> Result<(), GpioError> {
    if (0..GPIO_COUNT).contains(&pin) {
        Ok(())
    } else {
        Err(GpioError::InvalidPin(pin))
    }
}

// ── ESP-IDF backend ───────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn configure(pin: i32, direction: Direction) -> Result<(), GpioError> {
    check_pin(pin)?;
    let mode = match direction {
        Direction::Input => gpio_mode_t_GPIO_MODE_INPUT,
        Direction::Output => gpio_mode_t_GPIO_MODE_INPUT_OUTPUT,
    };
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    // SAFETY: gpio_config only touches the pin named in the bit mask, which
    // was range-checked above; called from the single main task.
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(GpioError::ConfigFailed(ret));
    }
    Ok(())
}

#[cfg(target_os = "espidf")]
fn read_level(pin: i32) -> bool {
    // SAFETY: read-only register access on a configured pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(target_os = "espidf")]
fn write_level(pin: i32, high: bool) -> Result<(), GpioError> {
    // SAFETY: pin was range-checked; setting the output latch is valid
    // before and after `gpio_config`.
    let ret = unsafe { gpio_set_level(pin, u32::from(high)) };
    if ret != ESP_OK as i32 {
        return Err(GpioError::WriteFailed(ret));
    }
    Ok(())
}

// ── Host simulation backend ───────────────────────────────────

#[cfg(not(target_os = "espidf"))]
fn configure(pin: i32, _direction: Direction) -> Result<(), GpioError> {
    check_pin(pin)
}

#[cfg(not(target_os = "espidf"))]
fn read_level(pin: i32) -> bool {
    sim::level(pin)
}

#[cfg(not(target_os = "espidf"))]
fn write_level(pin: i32, high: bool) -> Result<(), GpioError> {
    sim::set_level(pin, high);
    Ok(())
}

/// In-memory pin levels used instead of registers on host targets.
#[cfg(not(target_os = "espidf"))]
pub mod sim {
    use core::sync::atomic::{AtomicBool, Ordering};

    use super::GPIO_COUNT;

    static LEVELS: [AtomicBool; GPIO_COUNT as usize] =
        [const { AtomicBool::new(false) }; GPIO_COUNT as usize];

    /// Drive a simulated level (e.g. the soil sensor input).
    pub fn set_level(pin: i32, high: bool) {
        if let Some(level) = LEVELS.get(pin as usize) {
            level.store(high, Ordering::Relaxed);
        }
    }

    pub fn level(pin: i32) -> bool {
        LEVELS
            .get(pin as usize)
            .is_some_and(|level| level.load(Ordering::Relaxed))
    }
}
