//! Non-blocking interval timer.
//!
//! A [`Timer`] only stores when it was started and how long it should run.
//! Every query takes the current instant, so checking a timer never halts
//! execution and three unrelated timing domains (animation phase, debounce
//! settle window, remote polling) can run side by side in one loop.

use crate::time::{TimeDuration, TimeInstant};

/// Monotonic interval timer evaluated against a caller-supplied instant.
#[derive(Clone, Copy)]
pub struct Timer<I: TimeInstant> {
    duration: I::Duration,
    start: Option<I>,
}

impl<I: TimeInstant> Timer<I> {
    /// Creates a stopped timer with the given duration.
    pub fn new(duration: I::Duration) -> Self {
        Self {
            duration,
            start: None,
        }
    }

    /// Sets the timer duration without touching the running state.
    pub fn set_duration(&mut self, duration: I::Duration) {
        self.duration = duration;
    }

    /// Returns the configured duration.
    pub fn duration(&self) -> I::Duration {
        self.duration
    }

    /// Starts the timer unless it is already running.
    ///
    /// Returns `true` if the timer was started by this call.
    pub fn start(&mut self, now: I) -> bool {
        if self.start.is_some() {
            return false;
        }
        self.start = Some(now);
        true
    }

    /// Sets a new duration and starts the timer unless already running.
    ///
    /// A zero duration keeps the previously configured one.
    pub fn start_with(&mut self, duration: I::Duration, now: I) -> bool {
        if duration.as_millis() > 0 {
            self.duration = duration;
        }
        self.start(now)
    }

    /// Stops the timer.
    pub fn reset(&mut self) {
        self.start = None;
    }

    /// Stops and immediately starts the timer again.
    pub fn restart(&mut self, now: I) {
        self.reset();
        self.start(now);
    }

    /// Returns true if the timer has been started.
    pub fn is_running(&self) -> bool {
        self.start.is_some()
    }

    /// Returns true if a non-zero duration is configured.
    pub fn is_set(&self) -> bool {
        self.duration.as_millis() != 0
    }

    /// Milliseconds since the timer was started, 0 if not running.
    pub fn elapsed(&self, now: I) -> u64 {
        self.start
            .map(|start| now.duration_since(start).as_millis())
            .unwrap_or(0)
    }

    /// Elapsed time relative to the duration, clamped to `[0, 1]`.
    ///
    /// Returns 0 when no duration is configured.
    pub fn elapsed_fraction(&self, now: I) -> f32 {
        let duration = self.duration.as_millis();
        if duration == 0 {
            return 0.0;
        }
        let fraction = self.elapsed(now) as f32 / duration as f32;
        fraction.clamp(0.0, 1.0)
    }

    /// Returns true if the timer is running and the duration has been exceeded.
    pub fn check(&self, now: I) -> bool {
        self.is_running() && self.elapsed(now) > self.duration.as_millis()
    }

    /// Rolls the timer over by whole periods once a period has completed.
    ///
    /// Unlike [`restart`](Self::restart) the start instant advances by an
    /// exact multiple of the duration, so a sparsely sampled cycle keeps its
    /// phase. Returns the number of periods skipped (0 if none completed).
    pub fn check_and_restart(&mut self, now: I) -> u64 {
        let period = self.duration.as_millis();
        let Some(start) = self.start else {
            return 0;
        };
        if period == 0 {
            return 0;
        }

        let elapsed = now.duration_since(start).as_millis();
        let cycles = elapsed / period;
        if cycles > 0 {
            let skip = I::Duration::from_millis(cycles * period);
            // On instant overflow fall back to a plain restart at `now`.
            self.start = Some(start.checked_add(skip).unwrap_or(now));
        }
        cycles
    }
}

impl<I: TimeInstant> Default for Timer<I> {
    fn default() -> Self {
        Self::new(I::Duration::ZERO)
    }
}
