//! Fixed-format status text.
//!
//! Two renderings of the same snapshot:
//!
//! | Kind          | Sink            | Format                                              |
//! |---------------|-----------------|-----------------------------------------------------|
//! | `StatusReport`| UDP reply       | `cont:<u32> bomba:<0/1> <u32> sens:<0/1> manual:<0/1>` |
//! | `StatusLine`  | serial console  | `cont:<u32> bomba:<0/1> sens:<0/1> manual:<0/1>\r`  |
//!
//! The console line ends in a bare carriage return so it overwrites itself
//! in place.

use core::fmt::{self, Write};

use crate::irrigation::ControllerState;

/// Upper bound for either rendering (all-max u32 fields fit with room).
pub const STATUS_TEXT_CAP: usize = 64;

/// Reply to a status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    pub tick_counter: u32,
    pub pump_on: bool,
    pub pump_run_ticks: u32,
    pub soil_dry: bool,
    pub manual_override: bool,
}

impl StatusReport {
    /// Snapshot the state together with live pin readings.
    pub fn capture(state: &ControllerState, pump_on: bool, soil_dry: bool) -> Self {
        Self {
            tick_counter: state.tick_counter,
            pump_on,
            pump_run_ticks: state.pump_run_ticks,
            soil_dry,
            manual_override: state.manual_override,
        }
    }

    pub fn render(&self) -> heapless::String<STATUS_TEXT_CAP> {
        let mut buf = heapless::String::new();
        let _ = write!(buf, "{}", self);
        buf
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cont:{} bomba:{} {} sens:{} manual:{}",
            self.tick_counter,
            u8::from(self.pump_on),
            self.pump_run_ticks,
            u8::from(self.soil_dry),
            u8::from(self.manual_override),
        )
    }
}

/// Periodic console status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine {
    pub tick_counter: u32,
    pub pump_on: bool,
    pub soil_dry: bool,
    pub manual_override: bool,
}

impl StatusLine {
    pub fn capture(state: &ControllerState) -> Self {
        Self {
            tick_counter: state.tick_counter,
            pump_on: state.pump_on,
            soil_dry: state.soil_dry,
            manual_override: state.manual_override,
        }
    }

    pub fn render(&self) -> heapless::String<STATUS_TEXT_CAP> {
        let mut buf = heapless::String::new();
        let _ = write!(buf, "{}", self);
        buf
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cont:{} bomba:{} sens:{} manual:{}\r",
            self.tick_counter,
            u8::from(self.pump_on),
            u8::from(self.soil_dry),
            u8::from(self.manual_override),
        )
    }
}
