//! Cooperative control loop and link bring-up.
//!
//! ```text
//!   TickTimer::wait ──▶ Runtime::step(tick)
//!                         ├─ heartbeat LED
//!                         ├─ DatagramPort::try_recv ──▶ IrrigationService::handle_datagram
//!                         ├─ IrrigationService::tick
//!                         ├─ Cadence::STATUS       ──▶ console status line
//!                         └─ Cadence::NETWORK_INFO ──▶ console "IP info"
//! ```
//!
//! Everything runs on one task.  The only blocking points are the tick
//! wait and the settle delay inside a status reply.

use core::fmt::Write as _;

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{
    ClockPort, ConsolePort, DatagramPort, EventSink, IndicatorPort, LinkPort, PumpPort,
    SoilSensorPort,
};
use crate::app::service::IrrigationService;
use crate::config::{ControllerConfig, RX_BUFFER_LEN};
use crate::error::TransportError;
use crate::scheduler::{Cadence, TickTimer};

/// Console banner printed once at power-up.
pub const BANNER: &str = "\r\nAUTOMATIC IRRIGATION CONTROLLER\r\n";

// ═══════════════════════════════════════════════════════════════
//  Startup
// ═══════════════════════════════════════════════════════════════

/// Print the banner, bring the link up and report the address.
///
/// Interface init is retried every `link_retry_ms` until it succeeds.
/// A failed join is reported and tolerated: the loop still runs and keeps
/// watering on the soil sensor alone.
pub fn bring_up_link(
    link: &mut impl LinkPort,
    console: &mut impl ConsolePort,
    delay: &mut impl DelayNs,
    config: &ControllerConfig,
) {
    console.write_str(BANNER);
    console.write_str("Starting... ");

    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        match link.init() {
            Ok(()) => {
                console.write_str("OK.\r\n");
                break;
            }
            Err(e) => {
                console.write_str("ERROR.\r\n");
                warn!("link init attempt {} failed: {}", attempts, e);
                delay.delay_ms(config.link_retry_ms);
            }
        }
    }

    console.write_str("Connecting to ");
    console.write_str(&config.wifi_ssid);
    console.write_str("... ");
    match link.join(&config.wifi_ssid, &config.wifi_password) {
        Ok(()) => {
            console.write_str("OK.\r\n");
            info!("joined '{}'", config.wifi_ssid);
        }
        Err(e) => {
            console.write_str("ERROR.\r\n");
            warn!("join '{}' failed: {}", config.wifi_ssid, e);
        }
    }

    print_ip_info(link, console);
}

/// Bind the command listener, retrying every `link_retry_ms` until it
/// succeeds, then announce the port on the console.
pub fn open_listener<T>(
    mut bind: impl FnMut(u16) -> Result<T, TransportError>,
    console: &mut impl ConsolePort,
    delay: &mut impl DelayNs,
    config: &ControllerConfig,
) -> T {
    let transport = loop {
        match bind(config.udp_port) {
            Ok(t) => break t,
            Err(e) => {
                warn!("listener on port {} unavailable: {}", config.udp_port, e);
                delay.delay_ms(config.link_retry_ms);
            }
        }
    };

    let mut line: heapless::String<48> = heapless::String::new();
    let _ = write!(line, "Listening on UDP port {}.\r\n", config.udp_port);
    console.write_str(&line);
    transport
}

fn print_ip_info(link: &mut impl LinkPort, console: &mut impl ConsolePort) {
    match link.ip_info() {
        Ok(ip) => {
            console.write_str("IP info: ");
            console.write_str(&ip);
            console.write_str("\r\n");
        }
        Err(e) => warn!("ip info unavailable: {}", e),
    }
}

// ═══════════════════════════════════════════════════════════════
//  Runtime
// ═══════════════════════════════════════════════════════════════

/// Owns the service and every adapter the loop touches.
pub struct Runtime<H, T, L, C> {
    service: IrrigationService,
    hw: H,
    transport: T,
    link: L,
    console: C,
    rx: [u8; RX_BUFFER_LEN],
}

impl<H, T, L, C> Runtime<H, T, L, C>
where
    H: SoilSensorPort + PumpPort + IndicatorPort,
    T: DatagramPort,
    L: LinkPort,
    C: ConsolePort,
{
    pub fn new(service: IrrigationService, hw: H, transport: T, link: L, console: C) -> Self {
        Self {
            service,
            hw,
            transport,
            link,
            console,
            rx: [0; RX_BUFFER_LEN],
        }
    }

    /// Drive outputs to their initial state and emit `Started`.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.service.start(&mut self.hw, sink);
    }

    /// One control tick.  `tick` is the free-running index from 1.
    pub fn step(&mut self, tick: u64, delay: &mut impl DelayNs, sink: &mut impl EventSink) {
        self.hw.toggle_heartbeat();

        match self.transport.try_recv(&mut self.rx) {
            Ok(Some(len)) => {
                let len = len.min(self.rx.len());
                self.service.handle_datagram(
                    &self.rx[..len],
                    &mut self.hw,
                    &mut self.transport,
                    delay,
                    sink,
                );
            }
            Ok(None) => {}
            Err(e) => warn!("receive failed: {}", e),
        }

        self.service.tick(&mut self.hw, sink);

        if Cadence::STATUS.is_due(tick) {
            let line = self.service.status_line();
            self.console.write_str(&line.render());
            sink.emit(&AppEvent::Telemetry(line));
        }

        if Cadence::NETWORK_INFO.is_due(tick) {
            print_ip_info(&mut self.link, &mut self.console);
        }
    }

    /// Run forever at the fixed tick period.
    pub fn run(
        mut self,
        clock: &impl ClockPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> ! {
        let mut timer = TickTimer::new(clock.now_us());
        info!("control loop running");
        loop {
            let tick = timer.wait(clock, delay);
            self.step(tick, delay, sink);
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn service(&self) -> &IrrigationService {
        &self.service
    }

    pub fn hw(&self) -> &H {
        &self.hw
    }

    pub fn hw_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn console(&self) -> &C {
        &self.console
    }
}
