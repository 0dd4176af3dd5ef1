//! Application service: the hexagonal core.
//!
//! [`IrrigationService`] owns the [`ControllerState`] and is the only thing
//! that mutates it.  All I/O flows through port traits injected at call
//! sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  SoilSensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                     │    IrrigationService     │
//!  DatagramPort   ◀──▶│  commands · tick pass    │
//!                     │                          │
//!  PumpPort       ◀── └──────────────────────────┘ ──▶ IndicatorPort
//! ```

use bstr::ByteSlice;
use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::irrigation::{ControllerState, Phase};
use crate::protocol::{self, Command, StatusLine, StatusReport};

use super::events::AppEvent;
use super::ports::{DatagramPort, EventSink, IndicatorPort, PumpPort, SoilSensorPort};

// ───────────────────────────────────────────────────────────────
// IrrigationService
// ───────────────────────────────────────────────────────────────

/// Orchestrates command handling and the per-tick watering logic.
pub struct IrrigationService {
    state: ControllerState,
    /// Settle delay applied before a status reply goes out.
    status_reply_delay_ms: u32,
    /// Last phase reported through the event sink.
    phase: Phase,
    tick_count: u64,
}

impl IrrigationService {
    pub fn new(config: &ControllerConfig) -> Self {
        let state = ControllerState::new(config.default_pump_run_secs);
        Self {
            phase: state.phase(),
            state,
            status_reply_delay_ms: config.status_reply_delay_ms,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive the pump to its initial (off) state and announce startup.
    pub fn start(&mut self, hw: &mut impl PumpPort, sink: &mut impl EventSink) {
        hw.set_pump(self.state.pump_on);
        sink.emit(&AppEvent::Started {
            pump_run_ticks: self.state.pump_run_ticks,
        });
        info!(
            "IrrigationService started: run={} ticks, phase={}",
            self.state.pump_run_ticks,
            self.phase.label()
        );
    }

    // ── Command handling ──────────────────────────────────────

    /// Handle one inbound datagram: echo it, then apply every matching rule.
    pub fn handle_datagram(
        &mut self,
        text: &[u8],
        hw: &mut (impl SoilSensorPort + PumpPort),
        transport: &mut impl DatagramPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) {
        if let Err(e) = transport.reply(text) {
            warn!("echo failed: {}", e);
        }
        info!("Recv: {}", text.trim_end().as_bstr());

        for cmd in protocol::decode(text) {
            self.apply_command(cmd, hw, transport, delay, sink);
        }
        self.note_phase(sink);
    }

    /// Apply a single decoded command.
    pub fn apply_command(
        &mut self,
        cmd: Command,
        hw: &mut (impl SoilSensorPort + PumpPort),
        transport: &mut impl DatagramPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            Command::TurnOn => {
                self.state.turn_on();
                hw.set_pump(true);
            }
            Command::TurnOff => {
                self.state.turn_off();
                hw.set_pump(false);
            }
            Command::QueryStatus => {
                let report = StatusReport::capture(&self.state, hw.is_pump_on(), hw.is_soil_dry());
                delay.delay_ms(self.status_reply_delay_ms);
                let delivered = match transport.reply(report.render().as_bytes()) {
                    Ok(()) => true,
                    Err(e) => {
                        warn!("status reply failed: {}", e);
                        false
                    }
                };
                sink.emit(&AppEvent::StatusReplied { delivered });
            }
            Command::SetPumpDuration { seconds } => {
                self.state.set_pump_duration(seconds);
                info!(
                    "pump run time set to {}s ({} ticks)",
                    seconds, self.state.pump_run_ticks
                );
            }
            Command::Unrecognized => {
                debug!("no command keyword matched");
            }
        }
        sink.emit(&AppEvent::CommandApplied(cmd));
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one tick: sample the soil, run the transition pass, drive outputs.
    pub fn tick(
        &mut self,
        hw: &mut (impl SoilSensorPort + PumpPort + IndicatorPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        let dry = hw.is_soil_dry();
        hw.set_dry_indicator(dry);

        let outcome = self.state.advance(dry);
        hw.set_pump(self.state.pump_on);

        if outcome.cycle_started {
            info!("soil dry, watering cycle started");
            sink.emit(&AppEvent::CycleStarted);
        }
        if outcome.pump_stopped {
            info!("run time elapsed, pump stopped");
            sink.emit(&AppEvent::PumpStopped);
        }
        self.note_phase(sink);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Snapshot for the periodic console line.
    pub fn status_line(&self) -> StatusLine {
        StatusLine::capture(&self.state)
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn note_phase(&mut self, sink: &mut impl EventSink) {
        let now = self.state.phase();
        if now != self.phase {
            sink.emit(&AppEvent::PhaseChanged {
                from: self.phase,
                to: now,
            });
            self.phase = now;
        }
    }
}
