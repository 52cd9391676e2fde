//! Settle-time debouncing of sampled inputs.
//!
//! A raw sample has to stay unchanged for longer than the threshold before
//! it is committed as the debounced value. Commits after the first one raise
//! a one-shot change flag that [`Debouncer::has_changed`] hands out exactly
//! once.

use crate::pin::{Pin, PinIo};
use crate::time::{TimeDuration, TimeInstant};
use crate::timer::Timer;

/// Settle-time filter for any comparable sample type.
#[derive(Clone, Copy)]
pub struct Debouncer<T, I: TimeInstant> {
    raw: T,
    debounced: T,
    changed: bool,
    ready: bool,
    timer: Timer<I>,
}

impl<T, I> Debouncer<T, I>
where
    T: Copy + PartialEq + Default,
    I: TimeInstant,
{
    /// Creates a debouncer with the given settle threshold.
    pub fn new(threshold: I::Duration) -> Self {
        Self {
            raw: T::default(),
            debounced: T::default(),
            changed: false,
            ready: false,
            timer: Timer::new(threshold),
        }
    }

    /// Feeds one raw sample taken at `now`.
    pub fn debounce(&mut self, sample: T, now: I) {
        self.timer.start(now);
        if sample != self.raw {
            self.timer.restart(now);
            self.raw = sample;
        }

        if !self.timer.is_set() || self.timer.check(now) {
            if self.debounced != self.raw {
                self.debounced = self.raw;
                // The first commit establishes the baseline and is not an edge.
                self.changed |= self.ready;
            }
            self.ready = true;
        }
    }

    /// Returns the stable value.
    pub fn value(&self) -> T {
        self.debounced
    }

    /// Returns the most recent raw sample.
    pub fn raw(&self) -> T {
        self.raw
    }

    /// Returns true once a stable value has been established.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Returns and clears the change flag.
    pub fn has_changed(&mut self) -> bool {
        core::mem::take(&mut self.changed)
    }

    pub fn threshold(&self) -> I::Duration {
        self.timer.duration()
    }

    pub fn set_threshold(&mut self, threshold: I::Duration) {
        self.timer.set_duration(threshold);
    }

    /// Forgets the established value; the next commit is a baseline again.
    pub fn reset(&mut self) {
        self.ready = false;
        self.changed = false;
        self.timer.reset();
    }
}

/// Debounced binary input bound to a hardware pin.
///
/// The logical (post-inversion) high level counts as closed, so an
/// active-low button is described with [`Pin::button`].
#[derive(Clone, Copy)]
pub struct DebouncedSwitch<I: TimeInstant> {
    pin: Pin,
    debouncer: Debouncer<bool, I>,
}

impl<I: TimeInstant> DebouncedSwitch<I> {
    pub fn new(pin: Pin, threshold: I::Duration) -> Self {
        Self {
            pin,
            debouncer: Debouncer::new(threshold),
        }
    }

    /// A switch bound to no pin. Polling it does nothing.
    pub fn unbound() -> Self {
        Self::new(Pin::NONE, I::Duration::ZERO)
    }

    pub fn pin(&self) -> Pin {
        self.pin
    }

    /// Reads the current logical level without debouncing.
    pub fn read(&self, io: &mut impl PinIo) -> bool {
        self.pin.is_set() && self.pin.is_high(io)
    }

    /// Samples the pin and feeds the debouncer.
    pub fn poll(&mut self, io: &mut impl PinIo, now: I) {
        if self.pin.is_set() {
            let sample = self.read(io);
            self.debouncer.debounce(sample, now);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.debouncer.value()
    }

    pub fn is_open(&self) -> bool {
        !self.debouncer.value()
    }

    pub fn is_ready(&self) -> bool {
        self.debouncer.is_ready()
    }

    /// Returns and clears the edge flag.
    pub fn has_changed(&mut self) -> bool {
        self.debouncer.has_changed()
    }

    /// Returns true exactly once per debounced open-to-closed transition.
    pub fn was_pressed(&mut self) -> bool {
        self.has_changed() && self.is_closed()
    }

    pub fn debouncer(&self) -> &Debouncer<bool, I> {
        &self.debouncer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Ms(u64);

    impl TimeDuration for Ms {
        const ZERO: Self = Ms(0);

        fn as_millis(&self) -> u64 {
            self.0
        }

        fn from_millis(millis: u64) -> Self {
            Ms(millis)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct At(u64);

    impl TimeInstant for At {
        type Duration = Ms;

        fn duration_since(&self, earlier: Self) -> Ms {
            Ms(self.0 - earlier.0)
        }

        fn checked_add(self, duration: Ms) -> Option<Self> {
            Some(At(self.0 + duration.0))
        }
    }

    #[test]
    fn first_stable_value_is_not_an_edge() {
        let mut d = Debouncer::<bool, At>::new(Ms(50));
        for t in (0..=200).step_by(10) {
            d.debounce(true, At(t));
        }
        assert!(d.is_ready());
        assert!(d.value());
        assert!(!d.has_changed());
    }

    #[test]
    fn later_transition_raises_single_edge() {
        let mut d = Debouncer::<bool, At>::new(Ms(50));
        d.debounce(false, At(0));
        d.debounce(false, At(60));
        assert!(d.is_ready());

        for t in (100..=300).step_by(10) {
            d.debounce(true, At(t));
        }
        assert!(d.has_changed());
        assert!(!d.has_changed());
        assert!(d.value());
    }

    #[test]
    fn bouncing_input_restarts_settle_window() {
        let mut d = Debouncer::<bool, At>::new(Ms(50));
        d.debounce(false, At(0));
        d.debounce(false, At(60));

        d.debounce(true, At(100));
        d.debounce(false, At(120));
        d.debounce(true, At(140));
        d.debounce(true, At(180));
        assert!(!d.value());
        assert_eq!(d.raw(), true);

        d.debounce(true, At(191));
        assert!(d.value());
        assert!(d.has_changed());
    }

    #[test]
    fn zero_threshold_commits_immediately() {
        let mut d = Debouncer::<u8, At>::new(Ms(0));
        d.debounce(3, At(0));
        assert_eq!(d.value(), 3);
        assert!(!d.has_changed());
        d.debounce(4, At(1));
        assert_eq!(d.value(), 4);
        assert!(d.has_changed());
    }

    #[test]
    fn reset_suppresses_next_edge() {
        let mut d = Debouncer::<bool, At>::new(Ms(10));
        d.debounce(false, At(0));
        d.debounce(false, At(20));
        d.reset();
        assert!(!d.is_ready());

        d.debounce(true, At(30));
        d.debounce(true, At(50));
        assert!(d.value());
        assert!(!d.has_changed());
    }
}
