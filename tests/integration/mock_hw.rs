//! Mock adapters for integration tests.
//!
//! Records every actuator call, datagram and console write so tests can
//! assert on the full history without touching real GPIO or sockets.

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use irrigator::app::events::AppEvent;
use irrigator::app::ports::{
    ConsolePort, DatagramPort, EventSink, IndicatorPort, IpInfo, LinkPort, PumpPort,
    SoilSensorPort,
};
use irrigator::error::{LinkError, TransportError};

// ── MockBench: soil probe + pump + LEDs ───────────────────────

#[derive(Default)]
pub struct MockBench {
    pub soil_dry: bool,
    pub pump_pin: bool,
    pub pump_writes: Vec<bool>,
    pub dry_led: bool,
    pub heartbeat: bool,
    pub heartbeat_toggles: u32,
}

#[allow(dead_code)]
impl MockBench {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dry() -> Self {
        Self {
            soil_dry: true,
            ..Self::default()
        }
    }
}

impl SoilSensorPort for MockBench {
    fn is_soil_dry(&mut self) -> bool {
        self.soil_dry
    }
}

impl PumpPort for MockBench {
    fn set_pump(&mut self, on: bool) {
        self.pump_pin = on;
        self.pump_writes.push(on);
    }

    fn is_pump_on(&mut self) -> bool {
        self.pump_pin
    }
}

impl IndicatorPort for MockBench {
    fn set_dry_indicator(&mut self, dry: bool) {
        self.dry_led = dry;
    }

    fn toggle_heartbeat(&mut self) {
        self.heartbeat = !self.heartbeat;
        self.heartbeat_toggles += 1;
    }
}

// ── MockTransport ─────────────────────────────────────────────

#[derive(Default)]
pub struct MockTransport {
    pub inbound: VecDeque<Vec<u8>>,
    pub sent: Vec<Vec<u8>>,
    pub fail_recv: bool,
    pub fail_send: bool,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: &str) {
        self.inbound.push_back(text.as_bytes().to_vec());
    }

    pub fn sent_text(&self) -> Vec<String> {
        self.sent
            .iter()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .collect()
    }
}

impl DatagramPort for MockTransport {
    fn try_recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TransportError> {
        if self.fail_recv {
            return Err(TransportError::ReceiveFailed);
        }
        Ok(self.inbound.pop_front().map(|d| {
            let n = d.len().min(buf.len());
            buf[..n].copy_from_slice(&d[..n]);
            n
        }))
    }

    fn reply(&mut self, data: &[u8]) -> Result<(), TransportError> {
        if self.fail_send {
            return Err(TransportError::SendFailed);
        }
        self.sent.push(data.to_vec());
        Ok(())
    }
}

// ── MockLink ──────────────────────────────────────────────────

#[derive(Default)]
pub struct MockLink {
    pub init_failures: u32,
    pub init_calls: u32,
    pub join_fails: bool,
    pub joined: Option<(String, String)>,
    pub ip_queries: u32,
}

#[allow(dead_code)]
impl MockLink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LinkPort for MockLink {
    fn init(&mut self) -> Result<(), LinkError> {
        self.init_calls += 1;
        if self.init_failures > 0 {
            self.init_failures -= 1;
            return Err(LinkError::InitFailed);
        }
        Ok(())
    }

    fn join(&mut self, ssid: &str, password: &str) -> Result<(), LinkError> {
        if self.join_fails {
            return Err(LinkError::JoinFailed);
        }
        self.joined = Some((ssid.to_string(), password.to_string()));
        Ok(())
    }

    fn ip_info(&mut self) -> Result<IpInfo, LinkError> {
        self.ip_queries += 1;
        if self.joined.is_none() {
            return Err(LinkError::NoAddress);
        }
        let mut ip = IpInfo::new();
        let _ = ip.push_str("ip=10.0.0.7");
        Ok(ip)
    }
}

// ── MockConsole ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockConsole {
    pub text: String,
}

impl ConsolePort for MockConsole {
    fn write_str(&mut self, text: &str) {
        self.text.push_str(text);
    }
}

// ── MockDelay ─────────────────────────────────────────────────

/// Records requested sleep time instead of sleeping.
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

#[allow(dead_code)]
impl MockDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
