//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (which goes to UART / USB-CDC in production).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | cont={} | pump={} | soil={} | manual={}",
                    t.tick_counter,
                    if t.pump_on { "ON" } else { "OFF" },
                    if t.soil_dry { "DRY" } else { "WET" },
                    t.manual_override,
                );
            }
            AppEvent::PhaseChanged { from, to } => {
                info!("PHASE | {} -> {}", from.label(), to.label());
            }
            AppEvent::CommandApplied(cmd) => {
                info!("CMD | {:?}", cmd);
            }
            AppEvent::StatusReplied { delivered } => {
                info!("CMD | status reply delivered={}", delivered);
            }
            AppEvent::CycleStarted => {
                info!("CYCLE | started");
            }
            AppEvent::PumpStopped => {
                info!("CYCLE | pump stopped");
            }
            AppEvent::Started { pump_run_ticks } => {
                info!("START | pump_run_ticks={}", pump_run_ticks);
            }
        }
    }
}
