//! Fuzz target: command interpreter and tick pass
//!
//! Feeds arbitrary datagrams into `protocol::decode`, applies the result to
//! a controller state the way the service does, then runs a few ticks.
//! Nothing may panic and the counter must stay inside the 24 h window.
//!
//! cargo fuzz run fuzz_command_decode

#![no_main]

use irrigator::irrigation::{CYCLE_LENGTH_TICKS, ControllerState};
use irrigator::protocol::{Command, StatusReport, decode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut state = ControllerState::default();
    let soil_dry = data.first().is_some_and(|b| b & 1 == 1);

    for cmd in decode(data) {
        match cmd {
            Command::TurnOn => state.turn_on(),
            Command::TurnOff => state.turn_off(),
            Command::SetPumpDuration { seconds } => state.set_pump_duration(seconds),
            Command::QueryStatus => {
                // Rendering must fit the fixed reply buffer.
                let text = StatusReport::capture(&state, state.pump_on, soil_dry).render();
                assert!(text.starts_with("cont:"));
            }
            Command::Unrecognized => {}
        }
    }

    for _ in 0..4 {
        state.advance(soil_dry);
        assert!(state.tick_counter <= CYCLE_LENGTH_TICKS);
        if state.manual_override {
            assert!(state.pump_on);
        }
    }
});
