//! Fixed-period repeating timer.
//!
//! `Heartbeat` is driven by elapsed time the host feeds it, not by a wall
//! clock, so it behaves the same under test as in a real loop. Stopping
//! discards any partial period; starting again begins a fresh period.

use std::time::Duration;

/// Repeating timer with a fixed period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Heartbeat {
    period: Duration,
    carried: Duration,
    running: bool,
}

impl Heartbeat {
    /// Create a stopped heartbeat.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        assert!(!period.is_zero(), "Heartbeat period must be non-zero");
        Self {
            period,
            carried: Duration::ZERO,
            running: false,
        }
    }

    /// The firing period.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Is the heartbeat running?
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start firing. No effect if already running.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.carried = Duration::ZERO;
        }
    }

    /// Stop firing and drop the partial period.
    pub fn stop(&mut self) {
        self.running = false;
        self.carried = Duration::ZERO;
    }

    /// Start or stop to match `running`.
    pub fn set_running(&mut self, running: bool) {
        if running {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Let time pass. Returns how many times the heartbeat fired.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }

        let total = self.carried + elapsed;
        let fires = total.as_nanos() / self.period.as_nanos();
        // `fires * period <= total`, so the remainder fits back in a Duration
        let spent = self.period.as_nanos() * fires;
        let rest = u64::try_from(total.as_nanos() - spent).unwrap_or(u64::MAX);
        self.carried = Duration::from_nanos(rest);
        u32::try_from(fires).unwrap_or(u32::MAX)
    }

    /// Fire once at most: consume one period if that much time has
    /// accumulated. Used when each firing may change whether the
    /// heartbeat should keep running.
    pub fn fire_once(&mut self, elapsed: &mut Duration) -> bool {
        if !self.running {
            return false;
        }

        let needed = self.period - self.carried;
        if *elapsed < needed {
            self.carried += *elapsed;
            *elapsed = Duration::ZERO;
            return false;
        }

        *elapsed -= needed;
        self.carried = Duration::ZERO;
        true
    }
}
