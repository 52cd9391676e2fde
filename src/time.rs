//! Clock abstraction for poll-driven timing.
//!
//! The controller never sleeps. Every timer query reads the clock through a
//! [`TimeSource`] at call time and compares instants, so any monotonic
//! millisecond counter (a HAL tick, `embassy_time::Instant`, a test mock)
//! can drive it.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
///
/// `duration_since` must be wrap-safe for counters that can roll over, i.e.
/// implemented as a wrapping subtraction on the raw tick value.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}
