//! Tick timer and fixed telemetry cadences.
//!
//! ```text
//!   deadline ─┬─ +100ms ─┬─ +100ms ─┬─ +100ms ─┬─ ...
//!             │  tick 1  │  tick 2  │  tick 3  │
//!             ▼          ▼          ▼          ▼
//!   every 10th tick  ──▶ console status line
//!   every 100th tick ──▶ network address info
//! ```
//!
//! The timer keeps an absolute deadline and advances it by exactly one
//! period per tick, so work done inside a tick never shifts later ticks.
//! When the loop overruns by whole periods (the status reply delay blocks
//! for a full second), the missed periods are skipped rather than replayed
//! back to back.

use embedded_hal::delay::DelayNs;
use log::warn;

use crate::app::ports::ClockPort;
use crate::irrigation::TICK_PERIOD_MS;

/// Console status line cadence (1 s).
pub const STATUS_EVERY_TICKS: u64 = 10;

/// Network address report cadence (10 s).
pub const NETWORK_INFO_EVERY_TICKS: u64 = 100;

// ═══════════════════════════════════════════════════════════════
//  Tick timer
// ═══════════════════════════════════════════════════════════════

/// Monotonic-deadline tick source.
pub struct TickTimer {
    period_us: u64,
    next_deadline_us: u64,
    /// Ticks handed out so far; the first tick is 1.
    ticks: u64,
    /// Periods dropped because the loop overran.
    skipped: u64,
}

impl TickTimer {
    /// Timer with the standard control-loop period, first deadline one
    /// period after `now_us`.
    pub fn new(now_us: u64) -> Self {
        Self::with_period(now_us, u64::from(TICK_PERIOD_MS) * 1000)
    }

    pub fn with_period(now_us: u64, period_us: u64) -> Self {
        Self {
            period_us,
            next_deadline_us: now_us + period_us,
            ticks: 0,
            skipped: 0,
        }
    }

    /// Sleep until the next deadline and return the new tick index.
    pub fn wait(&mut self, clock: &impl ClockPort, delay: &mut impl DelayNs) -> u64 {
        let now = clock.now_us();
        if now < self.next_deadline_us {
            let remaining = self.next_deadline_us - now;
            delay.delay_us(u32::try_from(remaining).unwrap_or(u32::MAX));
        } else {
            let late_by = now - self.next_deadline_us;
            let missed = late_by / self.period_us;
            if missed > 0 {
                warn!(
                    "tick overrun by {}us, skipping {} period(s)",
                    late_by, missed
                );
                self.next_deadline_us += missed * self.period_us;
                self.skipped += missed;
            }
        }
        self.next_deadline_us += self.period_us;
        self.ticks += 1;
        self.ticks
    }

    /// Ticks handed out so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Total periods dropped to overruns.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

// ═══════════════════════════════════════════════════════════════
//  Cadence
// ═══════════════════════════════════════════════════════════════

/// Fires on every tick index that is a multiple of `every`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    every: u64,
}

impl Cadence {
    pub const STATUS: Self = Self::new(STATUS_EVERY_TICKS);
    pub const NETWORK_INFO: Self = Self::new(NETWORK_INFO_EVERY_TICKS);

    pub const fn new(every: u64) -> Self {
        Self { every }
    }

    pub fn is_due(&self, tick: u64) -> bool {
        self.every != 0 && tick % self.every == 0
    }
}
