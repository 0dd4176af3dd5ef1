//! Irrigation controller firmware: main entry point.
//!
//! Hexagonal architecture with a single cooperative 100 ms control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter         UdpTransport    WifiAdapter           │
//! │  (Soil+Pump+Indicators)  (Datagram)      (Link)                │
//! │  SerialConsole           LogEventSink    MonotonicClock        │
//! │  (Console)               (EventSink)     (Clock)               │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │         IrrigationService (pure logic)                 │    │
//! │  │  command rules · watering cycle · phase tracking       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Runtime (tick glue) · TickTimer (drift-free 100 ms cadence)   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};

use irrigator::adapters::console::SerialConsole;
use irrigator::adapters::hardware::HardwareAdapter;
use irrigator::adapters::log_sink::LogEventSink;
use irrigator::adapters::time::MonotonicClock;
use irrigator::adapters::udp::UdpTransport;
use irrigator::adapters::wifi::WifiAdapter;
use irrigator::app::service::IrrigationService;
use irrigator::config::ControllerConfig;
use irrigator::runtime::{self, Runtime};

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Irrigator v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config (compile-time override or defaults) ─────────
    let config = ControllerConfig::load_or_default(option_env!("IRRIGATOR_CONFIG"));

    // ── 3. Pins ───────────────────────────────────────────────
    let hw = HardwareAdapter::from_board()?;

    // ── 4. Network link ───────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;
    let wifi = BlockingWifi::wrap(
        EspWifi::new(peripherals.modem, sysloop.clone(), Some(nvs))?,
        sysloop,
    )?;
    let mut link = WifiAdapter::new(wifi);

    let mut console = SerialConsole::new();
    let mut delay = FreeRtos;

    runtime::bring_up_link(&mut link, &mut console, &mut delay, &config);
    let transport = runtime::open_listener(UdpTransport::bind, &mut console, &mut delay, &config);

    // ── 5. Control loop ───────────────────────────────────────
    let mut sink = LogEventSink::new();
    let clock = MonotonicClock::new();
    let mut rt = Runtime::new(
        IrrigationService::new(&config),
        hw,
        transport,
        link,
        console,
    );
    rt.start(&mut sink);

    info!("System ready. Entering control loop.");
    rt.run(&clock, &mut delay, &mut sink)
}
