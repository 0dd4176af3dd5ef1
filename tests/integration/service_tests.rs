//! Integration tests for the datagram → IrrigationService → pump pipeline.
//!
//! Drives the service through whole watering cycles and command sequences
//! the way the control loop does, and checks the pin writes, replies and
//! events that come out.

use super::mock_hw::{MockBench, MockDelay, MockTransport, RecordingSink};

use irrigator::app::events::AppEvent;
use irrigator::app::service::IrrigationService;
use irrigator::config::ControllerConfig;
use irrigator::irrigation::{CYCLE_LENGTH_TICKS, Phase};
use irrigator::protocol::Command;

struct Rig {
    svc: IrrigationService,
    hw: MockBench,
    net: MockTransport,
    delay: MockDelay,
    sink: RecordingSink,
}

impl Rig {
    fn new(hw: MockBench) -> Self {
        let mut rig = Self {
            svc: IrrigationService::new(&ControllerConfig::default()),
            hw,
            net: MockTransport::new(),
            delay: MockDelay::default(),
            sink: RecordingSink::new(),
        };
        rig.svc.start(&mut rig.hw, &mut rig.sink);
        rig
    }

    fn send(&mut self, text: &str) {
        self.svc.handle_datagram(
            text.as_bytes(),
            &mut self.hw,
            &mut self.net,
            &mut self.delay,
            &mut self.sink,
        );
    }

    fn ticks(&mut self, n: u32) {
        for _ in 0..n {
            self.svc.tick(&mut self.hw, &mut self.sink);
        }
    }
}

// ── Automatic cycle ───────────────────────────────────────────

#[test]
fn dry_soil_starts_cycle_and_stops_after_run_time() {
    let mut rig = Rig::new(MockBench::dry());

    rig.ticks(1);
    assert!(rig.hw.pump_pin, "pump must start on the first dry tick");
    assert_eq!(rig.svc.state().tick_counter, CYCLE_LENGTH_TICKS - 1);
    assert_eq!(rig.svc.phase(), Phase::Watering);

    rig.ticks(600);
    assert!(rig.hw.pump_pin, "60 s run time not yet exceeded");
    assert_eq!(rig.svc.state().tick_counter, CYCLE_LENGTH_TICKS - 601);

    rig.ticks(1);
    assert!(!rig.hw.pump_pin, "pump stops on the 601st tick after start");
    assert_eq!(rig.svc.phase(), Phase::CoolingDown);

    assert_eq!(rig.sink.count(|e| *e == AppEvent::CycleStarted), 1);
    assert_eq!(rig.sink.count(|e| *e == AppEvent::PumpStopped), 1);
}

#[test]
fn soil_drying_mid_window_does_not_restart() {
    let mut rig = Rig::new(MockBench::dry());
    rig.ticks(700);
    assert!(!rig.hw.pump_pin);

    rig.hw.soil_dry = false;
    rig.ticks(5);
    rig.hw.soil_dry = true;
    rig.ticks(5);
    assert!(!rig.hw.pump_pin, "no new cycle until the counter drains");
    assert_eq!(rig.sink.count(|e| *e == AppEvent::CycleStarted), 1);
}

#[test]
fn wet_soil_never_waters() {
    let mut rig = Rig::new(MockBench::new());
    rig.ticks(50);
    assert!(rig.hw.pump_writes.iter().all(|on| !on));
    assert_eq!(rig.svc.state().tick_counter, 0);
    assert_eq!(rig.svc.phase(), Phase::Idle);
}

// ── Manual override ───────────────────────────────────────────

#[test]
fn manual_on_holds_pump_through_cycle_end() {
    let mut rig = Rig::new(MockBench::dry());
    rig.ticks(1);
    rig.send("prender");
    rig.ticks(2000);
    assert!(rig.hw.pump_pin);
    assert!(rig.svc.state().manual_override);
    assert_eq!(rig.svc.phase(), Phase::ManualOn);
    // Countdown keeps running under manual control.
    assert_eq!(rig.svc.state().tick_counter, CYCLE_LENGTH_TICKS - 2001);
}

#[test]
fn apagar_returns_to_automatic_control() {
    let mut rig = Rig::new(MockBench::new());
    rig.send("prender");
    assert!(rig.hw.pump_pin, "prender drives the pin immediately");

    rig.send("apagar");
    assert!(!rig.hw.pump_pin);
    assert!(!rig.svc.state().manual_override);

    // Counter was never armed, so dry soil starts a cycle right away.
    rig.hw.soil_dry = true;
    rig.ticks(1);
    assert!(rig.hw.pump_pin);
    assert_eq!(rig.svc.phase(), Phase::Watering);
}

#[test]
fn apagar_is_idempotent() {
    let mut rig = Rig::new(MockBench::new());
    rig.send("apagar");
    let once = *rig.svc.state();
    rig.send("apagar");
    assert_eq!(*rig.svc.state(), once);
    assert_eq!(
        rig.net.sent_text(),
        vec!["apagar".to_string(), "apagar".to_string()]
    );
}

#[test]
fn both_keywords_apply_in_table_order() {
    let mut rig = Rig::new(MockBench::new());
    rig.send("apagar prender");
    // prender is applied first, then apagar.
    assert!(!rig.hw.pump_pin);
    assert!(!rig.svc.state().manual_override);
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::CommandApplied(_))),
        2
    );
}

// ── Status query / duration ───────────────────────────────────

#[test]
fn bomba_then_estado_reports_new_duration() {
    let mut rig = Rig::new(MockBench::new());
    rig.send("bomba=30");
    assert_eq!(rig.svc.state().pump_run_ticks, 300);

    rig.send("estado");
    let sent = rig.net.sent_text();
    assert_eq!(sent.len(), 3, "two echoes plus one status reply");
    assert_eq!(sent[0], "bomba=30");
    assert_eq!(sent[1], "estado");
    assert_eq!(sent[2], "cont:0 bomba:0 300 sens:0 manual:0");
    assert_eq!(rig.delay.total_ms(), 1000);
}

#[test]
fn status_reports_live_pin_and_sensor() {
    let mut rig = Rig::new(MockBench::new());
    rig.hw.soil_dry = true;
    rig.hw.pump_pin = true;
    rig.send("estado");
    let sent = rig.net.sent_text();
    assert_eq!(sent[1], "cont:0 bomba:1 600 sens:1 manual:0");
}

#[test]
fn malformed_duration_stops_next_cycle_immediately() {
    let mut rig = Rig::new(MockBench::dry());
    rig.send("bomba=abc");
    assert_eq!(rig.svc.state().pump_run_ticks, 0);

    rig.ticks(1);
    assert!(rig.hw.pump_pin);
    rig.ticks(1);
    assert!(!rig.hw.pump_pin, "zero run time stops the pump next tick");
}

#[test]
fn unrecognized_text_is_echoed_only() {
    let mut rig = Rig::new(MockBench::new());
    let before = *rig.svc.state();
    rig.send("hola");
    assert_eq!(*rig.svc.state(), before);
    assert_eq!(rig.net.sent_text(), vec!["hola".to_string()]);
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::CommandApplied(Command::Unrecognized))
    );
}

#[test]
fn send_failure_does_not_roll_back_state() {
    let mut rig = Rig::new(MockBench::new());
    rig.net.fail_send = true;
    rig.send("prender estado");
    assert!(rig.svc.state().manual_override);
    assert!(rig.hw.pump_pin);
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::StatusReplied { delivered: false })
    );
}
