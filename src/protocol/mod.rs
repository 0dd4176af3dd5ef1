//! Text command protocol carried over the UDP command channel.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  datagram bytes                                           │
//! │      │                                                    │
//! │      ├──▶ echo back verbatim (always, before anything)    │
//! │      │                                                    │
//! │      ▼                                                    │
//! │  RULES (ordered, every match applies)                     │
//! │   "prender" ─▶ TurnOn                                     │
//! │   "apagar"  ─▶ TurnOff                                    │
//! │   "estado"  ─▶ QueryStatus ─▶ StatusReport (reply)        │
//! │   "bomba="  ─▶ SetPumpDuration(secs)                      │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Keywords are case-sensitive and matched as substrings anywhere in the
//! datagram.  The rules are not mutually exclusive: `"prender apagar"`
//! applies both, in table order.

pub mod command;
pub mod report;

pub use command::{Command, Commands, RULES, decode, parse_seconds};
pub use report::{StatusLine, StatusReport};
