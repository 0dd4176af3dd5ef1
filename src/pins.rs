//! GPIO assignments for the controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

use crate::drivers::Polarity;

// ---------------------------------------------------------------------------
// Soil moisture probe (comparator module, digital out)
// ---------------------------------------------------------------------------

/// Digital input: HIGH = soil dry.
pub const SOIL_SENSOR_GPIO: i32 = 4;
pub const SOIL_SENSOR_POLARITY: Polarity = Polarity::ActiveHigh;

// ---------------------------------------------------------------------------
// Pump relay (pump indicator LED on the same net)
// ---------------------------------------------------------------------------

/// Digital output: LOW = pump running (relay module is active-low).
pub const PUMP_GPIO: i32 = 5;
pub const PUMP_POLARITY: Polarity = Polarity::ActiveLow;

// ---------------------------------------------------------------------------
// Indicator LEDs
// ---------------------------------------------------------------------------

/// Lit while the soil reads dry.
pub const LED_DRY_GPIO: i32 = 6;
/// Toggled every control tick.
pub const LED_HEARTBEAT_GPIO: i32 = 7;
