//! Integration tests for the startup sequence and the per-tick runtime glue.

use super::mock_hw::{MockBench, MockConsole, MockDelay, MockLink, MockTransport, RecordingSink};

use irrigator::adapters::wifi::WifiAdapter;
use irrigator::app::events::AppEvent;
use irrigator::app::service::IrrigationService;
use irrigator::config::ControllerConfig;
use irrigator::error::TransportError;
use irrigator::runtime::{self, BANNER, Runtime};

type TestRuntime = Runtime<MockBench, MockTransport, MockLink, MockConsole>;

fn joined_link() -> MockLink {
    let mut link = MockLink::new();
    link.joined = Some(("irrigator".into(), String::new()));
    link
}

fn make_runtime(hw: MockBench) -> (TestRuntime, MockDelay, RecordingSink) {
    let cfg = ControllerConfig::default();
    let mut rt = Runtime::new(
        IrrigationService::new(&cfg),
        hw,
        MockTransport::new(),
        joined_link(),
        MockConsole::default(),
    );
    let mut sink = RecordingSink::new();
    rt.start(&mut sink);
    (rt, MockDelay::default(), sink)
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn bring_up_retries_init_until_ok() {
    let cfg = ControllerConfig::default();
    let mut link = MockLink {
        init_failures: 2,
        ..MockLink::default()
    };
    let mut console = MockConsole::default();
    let mut delay = MockDelay::default();

    runtime::bring_up_link(&mut link, &mut console, &mut delay, &cfg);

    assert_eq!(link.init_calls, 3);
    assert_eq!(delay.total_ms(), 2000, "one retry interval per failure");
    assert!(console.text.starts_with(BANNER));
    assert!(
        console
            .text
            .contains("Starting... ERROR.\r\nERROR.\r\nOK.\r\n")
    );
    assert!(console.text.contains("Connecting to irrigator... OK.\r\n"));
    assert!(console.text.ends_with("IP info: ip=10.0.0.7\r\n"));
}

#[test]
fn bring_up_tolerates_join_failure() {
    let cfg = ControllerConfig::default();
    let mut link = MockLink {
        join_fails: true,
        ..MockLink::default()
    };
    let mut console = MockConsole::default();
    let mut delay = MockDelay::default();

    runtime::bring_up_link(&mut link, &mut console, &mut delay, &cfg);

    assert!(console.text.contains("... ERROR.\r\n"));
    assert!(!console.text.contains("IP info"));
}

#[test]
fn bring_up_with_simulated_wifi() {
    let cfg = ControllerConfig::default();
    let mut wifi = WifiAdapter::simulated(1);
    let mut console = MockConsole::default();
    let mut delay = MockDelay::default();

    runtime::bring_up_link(&mut wifi, &mut console, &mut delay, &cfg);

    assert_eq!(wifi.init_attempts(), 2);
    assert!(console.text.contains("IP info: ip="));
}

#[test]
fn listener_bind_is_retried_then_announced() {
    let cfg = ControllerConfig::default();
    let mut console = MockConsole::default();
    let mut delay = MockDelay::default();
    let mut attempts = 0;

    let port = runtime::open_listener(
        |port| {
            attempts += 1;
            if attempts < 3 {
                Err(TransportError::BindFailed)
            } else {
                Ok(port)
            }
        },
        &mut console,
        &mut delay,
        &cfg,
    );

    assert_eq!(port, 8000);
    assert_eq!(attempts, 3);
    assert_eq!(delay.total_ms(), 2000);
    assert_eq!(console.text, "Listening on UDP port 8000.\r\n");
}

// ── Per-tick glue ─────────────────────────────────────────────

#[test]
fn status_line_every_tenth_tick() {
    let (mut rt, mut delay, mut sink) = make_runtime(MockBench::new());

    for tick in 1..=9 {
        rt.step(tick, &mut delay, &mut sink);
    }
    assert!(rt.console().text.is_empty());

    rt.step(10, &mut delay, &mut sink);
    assert_eq!(rt.console().text, "cont:0 bomba:0 sens:0 manual:0\r");
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::Telemetry(_))),
        1
    );
}

#[test]
fn ip_info_every_hundredth_tick() {
    let (mut rt, mut delay, mut sink) = make_runtime(MockBench::new());

    for tick in 1..=100 {
        rt.step(tick, &mut delay, &mut sink);
    }
    let text = &rt.console().text;
    assert_eq!(text.matches("IP info: ip=10.0.0.7\r\n").count(), 1);
    assert_eq!(text.matches("cont:").count(), 10);
}

#[test]
fn heartbeat_toggles_every_tick() {
    let (mut rt, mut delay, mut sink) = make_runtime(MockBench::new());
    for tick in 1..=7 {
        rt.step(tick, &mut delay, &mut sink);
    }
    assert_eq!(rt.hw().heartbeat_toggles, 7);
    assert!(rt.hw().heartbeat);
}

#[test]
fn datagram_is_handled_before_the_tick_pass() {
    let (mut rt, mut delay, mut sink) = make_runtime(MockBench::dry());
    rt.transport_mut().push("prender");

    rt.step(1, &mut delay, &mut sink);

    // Manual override was in force for the tick, so no cycle started.
    assert!(rt.service().state().manual_override);
    assert_eq!(rt.service().state().tick_counter, 0);
    assert_eq!(sink.count(|e| *e == AppEvent::CycleStarted), 0);
    assert_eq!(rt.transport_mut().sent_text(), vec!["prender".to_string()]);
}

#[test]
fn receive_error_still_runs_the_tick() {
    let (mut rt, mut delay, mut sink) = make_runtime(MockBench::dry());
    rt.transport_mut().fail_recv = true;

    rt.step(1, &mut delay, &mut sink);

    assert!(rt.hw().pump_pin);
    assert_eq!(rt.service().tick_count(), 1);
}

#[test]
fn dry_led_mirrors_sensor() {
    let (mut rt, mut delay, mut sink) = make_runtime(MockBench::dry());
    rt.step(1, &mut delay, &mut sink);
    assert!(rt.hw().dry_led);

    rt.hw_mut().soil_dry = false;
    rt.step(2, &mut delay, &mut sink);
    assert!(!rt.hw().dry_led);
}
