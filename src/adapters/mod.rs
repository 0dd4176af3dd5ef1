//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to              |
//! |----------------|--------------------|--------------------------|
//! | `hardware`     | SoilSensorPort     | Soil probe GPIO          |
//! |                | PumpPort           | Pump relay GPIO          |
//! |                | IndicatorPort      | Dry / heartbeat LEDs     |
//! | `udp`          | DatagramPort       | UDP socket (lwIP)        |
//! | `wifi`         | LinkPort           | ESP-IDF WiFi STA         |
//! | `console`      | ConsolePort        | UART / USB-CDC stdout    |
//! | `log_sink`     | EventSink          | Serial log output        |
//! | `time`         | ClockPort          | ESP32 system timer       |

pub mod console;
pub mod hardware;
pub mod log_sink;
pub mod time;
pub mod udp;
pub mod wifi;
