//! Command decoding.
//!
//! Dispatch is an ordered table of independent predicate → command rules.
//! Every rule is checked against the same datagram text; all matches are
//! returned in table order.

use bstr::ByteSlice;

/// Maximum number of commands one datagram can produce (one per rule).
pub const MAX_COMMANDS: usize = 4;

/// Structured action decoded from one inbound datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pump on, manual override on.
    TurnOn,
    /// Pump off, manual override off.
    TurnOff,
    /// Reply with a status report.
    QueryStatus,
    /// Set the automatic pump run time (seconds; 0 on parse failure).
    SetPumpDuration { seconds: u32 },
    /// No keyword matched.  Nothing happens beyond the echo.
    Unrecognized,
}

/// Commands decoded from one datagram, in rule order.
pub type Commands = heapless::Vec<Command, MAX_COMMANDS>;

/// One row of the dispatch table.
pub struct CommandRule {
    pub keyword: &'static str,
    /// Builds the command given the text following the keyword.
    pub build: fn(&[u8]) -> Command,
}

/// Dispatch table, evaluated top to bottom.
pub const RULES: [CommandRule; MAX_COMMANDS] = [
    CommandRule {
        keyword: "prender",
        build: |_| Command::TurnOn,
    },
    CommandRule {
        keyword: "apagar",
        build: |_| Command::TurnOff,
    },
    CommandRule {
        keyword: "estado",
        build: |_| Command::QueryStatus,
    },
    CommandRule {
        keyword: "bomba=",
        build: |rest| Command::SetPumpDuration {
            seconds: parse_seconds(rest),
        },
    },
];

/// Decode a datagram into every command whose keyword it contains.
///
/// Never fails.  Returns `[Unrecognized]` when no keyword matches.
pub fn decode(text: &[u8]) -> Commands {
    let mut out = Commands::new();
    for rule in &RULES {
        if let Some(pos) = text.find(rule.keyword) {
            let rest = &text[pos + rule.keyword.len()..];
            // Capacity equals the rule count, so this cannot overflow.
            let _ = out.push((rule.build)(rest));
        }
    }
    if out.is_empty() {
        let _ = out.push(Command::Unrecognized);
    }
    out
}

/// Lenient decimal parse in the style of C `atoi`, restricted to unsigned.
///
/// Skips leading ASCII whitespace, accepts an optional `+`, then reads
/// digits until the first non-digit.  No digits (or a `-` sign) yields 0.
/// Values beyond `u32::MAX` saturate.
pub fn parse_seconds(text: &[u8]) -> u32 {
    let trimmed = text.trim_start_with(|c| c.is_ascii_whitespace());
    let digits = trimmed.strip_prefix(b"+").unwrap_or(trimmed);
    digits
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0u32, |acc, b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        })
}
