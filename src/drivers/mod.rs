//! Pin-level drivers: raw GPIO, pump relay, soil probe, indicator LEDs.
//!
//! Everything above [`gpio`] is generic over the embedded-hal 1.0 digital
//! traits, so the drivers run unchanged against test doubles.

pub mod gpio;
pub mod pump;
pub mod soil;
pub mod status_led;

/// Which pin level means "active".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    /// Pin level (high = `true`) that produces the requested logical state.
    pub fn level_for(self, active: bool) -> bool {
        match self {
            Self::ActiveHigh => active,
            Self::ActiveLow => !active,
        }
    }

    /// Logical state for an observed pin level.
    pub fn is_active(self, high: bool) -> bool {
        self.level_for(high)
    }
}
