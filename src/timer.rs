// Blocking countdown timer.
//
// Remaining time is always recomputed from the clock delta since the start,
// so oversleeping never accumulates drift; it only makes updates coarser.

use crate::terminal::Terminal;
use std::io;
use std::thread;
use std::time::{Duration, Instant};

/// How long the countdown waits between redraws.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Source of monotonic time plus the ability to wait.
pub trait Clock {
    /// Time elapsed since an arbitrary, fixed origin.
    fn now(&self) -> Duration;

    fn sleep(&self, duration: Duration);
}

/// Real clock backed by `Instant` and `thread::sleep`.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Format remaining seconds as `MM:SS`.
pub fn format_remaining(remaining_secs: u64) -> String {
    format!("{:02}:{:02}", remaining_secs / 60, remaining_secs % 60)
}

/// Runs one timed phase, redrawing a single status line until it expires.
pub struct Countdown<'a> {
    term: &'a mut dyn Terminal,
    clock: &'a dyn Clock,
}

impl<'a> Countdown<'a> {
    pub fn new(term: &'a mut dyn Terminal, clock: &'a dyn Clock) -> Self {
        Countdown { term, clock }
    }

    /// Block for `duration_minutes`, showing `label` and the time left.
    ///
    /// `duration_minutes` is expected to be validated by the caller. Returns
    /// the number of seconds that were counted down.
    pub fn run(&mut self, duration_minutes: u32, label: &str) -> io::Result<u64> {
        self.run_observed(duration_minutes, label, |_| {})
    }

    /// Like `run`, but calls `on_tick` with the elapsed seconds on every poll
    /// and once more with the full duration when the phase ends.
    pub fn run_observed<F>(&mut self, duration_minutes: u32, label: &str, mut on_tick: F) -> io::Result<u64>
    where
        F: FnMut(u64),
    {
        let total_secs = u64::from(duration_minutes) * 60;

        self.term.write_line("")?;
        self.term.write_line(&format!(
            "--- {} timer started ({} min) ---",
            label, duration_minutes
        ))?;
        tracing::debug!(label, duration_minutes, "countdown started");

        let start = self.clock.now();
        loop {
            let elapsed = self.clock.now().saturating_sub(start).as_secs();
            if elapsed >= total_secs {
                break;
            }
            on_tick(elapsed);
            let remaining = total_secs - elapsed;
            self.term
                .write_status_line(&format!("{} remaining: {}", label, format_remaining(remaining)))?;
            self.clock.sleep(POLL_INTERVAL);
        }

        self.term
            .write_status_line(&format!("{} remaining: {}", label, format_remaining(0)))?;
        self.term.finish_status_line()?;
        on_tick(total_secs);
        self.term
            .write_line(&format!("--- {} timer finished! ---", label))?;
        tracing::debug!(label, "countdown finished");

        Ok(total_secs)
    }
}
