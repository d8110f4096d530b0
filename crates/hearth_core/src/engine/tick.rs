//! # Tick Pacing
//!
//! Fixed-timestep pacing for [`Engine::run`](super::Engine::run) and tick
//! timing statistics.
//!
//! A tick that overruns its budget is counted as late and the schedule is
//! re-anchored to the current time, so a slow tick never causes a burst of
//! catch-up ticks.

use std::time::{Duration, Instant};

/// Below this remaining time the pacer spins instead of sleeping.
const SPIN_THRESHOLD: Duration = Duration::from_micros(500);

/// Duration of one tick at `tick_rate` ticks per second. Zero counts as one.
pub(crate) fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_micros(1_000_000 / u64::from(tick_rate.max(1)))
}

/// Tick timing statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickStats {
    /// Minimum tick duration observed.
    pub min_tick_us: u64,
    /// Maximum tick duration observed.
    pub max_tick_us: u64,
    /// Average tick duration (rolling).
    pub avg_tick_us: u64,
    /// Number of late ticks (took longer than budget).
    pub late_ticks: u64,
    /// Total ticks measured.
    pub total_ticks: u64,
}

impl TickStats {
    /// Records one tick.
    ///
    /// `budget` is the target tick duration, if the loop is paced.
    pub fn record(&mut self, elapsed: Duration, budget: Option<Duration>) {
        let elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);

        self.min_tick_us = self.min_tick_us.min(elapsed_us);
        self.max_tick_us = self.max_tick_us.max(elapsed_us);
        self.avg_tick_us = if self.total_ticks == 0 {
            elapsed_us
        } else {
            // Rolling average over roughly the last 16 ticks.
            (self.avg_tick_us.saturating_mul(15)).saturating_add(elapsed_us) / 16
        };
        self.total_ticks += 1;

        if budget.is_some_and(|budget| elapsed > budget) {
            self.late_ticks += 1;
        }
    }

    /// Clears all statistics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for TickStats {
    fn default() -> Self {
        Self {
            min_tick_us: u64::MAX,
            max_tick_us: 0,
            avg_tick_us: 0,
            late_ticks: 0,
            total_ticks: 0,
        }
    }
}

/// Fixed-timestep tick pacer.
#[derive(Debug)]
pub struct TickLoop {
    /// Target tick duration.
    tick_duration: Duration,
    /// When the next tick is due.
    next_tick: Instant,
}

impl TickLoop {
    /// Creates a pacer running at `tick_rate` ticks per second.
    ///
    /// The first tick is due immediately. A zero rate is clamped to one
    /// tick per second.
    #[must_use]
    pub fn new(tick_rate: u32) -> Self {
        Self {
            tick_duration: tick_duration(tick_rate),
            next_tick: Instant::now(),
        }
    }

    /// Returns the target tick duration.
    #[inline]
    #[must_use]
    pub const fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    /// Returns true if the next tick is already due.
    #[must_use]
    pub fn is_due(&self) -> bool {
        Instant::now() >= self.next_tick
    }

    /// Blocks until the next tick is due, then schedules the one after.
    ///
    /// Sleeps for most of the wait and spins for the final stretch.
    pub fn wait_for_next_tick(&mut self) {
        loop {
            let now = Instant::now();
            let Some(remaining) = self.next_tick.checked_duration_since(now) else {
                break;
            };
            if remaining.is_zero() {
                break;
            }
            if remaining > SPIN_THRESHOLD {
                std::thread::sleep(remaining - SPIN_THRESHOLD);
            } else {
                std::hint::spin_loop();
            }
        }

        let now = Instant::now();
        self.next_tick += self.tick_duration;
        if self.next_tick < now {
            // Fell behind: re-anchor instead of bursting.
            self.next_tick = now + self.tick_duration;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_loop_creation() {
        let tick_loop = TickLoop::new(60);
        assert_eq!(tick_loop.tick_duration(), Duration::from_micros(16666));
        assert!(tick_loop.is_due());
    }

    #[test]
    fn test_zero_rate_clamped() {
        let tick_loop = TickLoop::new(0);
        assert_eq!(tick_loop.tick_duration(), Duration::from_secs(1));
        assert_eq!(tick_duration(0), tick_duration(1));
    }

    #[test]
    fn test_wait_paces_ticks() {
        let start = Instant::now();
        let mut tick_loop = TickLoop::new(200); // 5ms per tick

        tick_loop.wait_for_next_tick(); // due immediately
        tick_loop.wait_for_next_tick();
        tick_loop.wait_for_next_tick();

        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn test_stats_record() {
        let mut stats = TickStats::default();
        let budget = Some(Duration::from_micros(100));

        stats.record(Duration::from_micros(50), budget);
        stats.record(Duration::from_micros(150), budget);

        assert_eq!(stats.total_ticks, 2);
        assert_eq!(stats.min_tick_us, 50);
        assert_eq!(stats.max_tick_us, 150);
        assert_eq!(stats.late_ticks, 1);
        assert_eq!(stats.avg_tick_us, (50 * 15 + 150) / 16);
    }

    #[test]
    fn test_stats_unpaced_never_late() {
        let mut stats = TickStats::default();
        stats.record(Duration::from_secs(1), None);
        assert_eq!(stats.late_ticks, 0);

        stats.reset();
        assert_eq!(stats, TickStats::default());
    }
}
