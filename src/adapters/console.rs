//! Serial console adapter.
//!
//! Raw text to stdout, which ESP-IDF routes to the UART / USB-CDC console.
//! Unlike the `log` output there is no prefix or newline added: the status
//! line ends in a bare `\r` so it redraws in place.

use std::io::Write;

use crate::app::ports::ConsolePort;

pub struct SerialConsole {
    out: std::io::Stdout,
}

impl Default for SerialConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialConsole {
    pub fn new() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl ConsolePort for SerialConsole {
    fn write_str(&mut self, text: &str) {
        let mut out = self.out.lock();
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }
}
