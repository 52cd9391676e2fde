//! Per-status LED animations.
//!
//! [`Animation`] is a closed set of time-driven color generators. Each
//! variant owns its phase timer and produces one [`Color`] per render tick
//! from nothing but the current instant, so a new animation starts cleanly
//! whenever it is constructed.

use crate::color::{self, BLACK, Color};
use crate::status::Status;
use crate::time::{TimeDuration, TimeInstant};
use crate::timer::Timer;
use core::f32::consts::PI;

pub const WAVE_PERIOD_MS: u64 = 2500;
pub const WAVE_MIN_BRIGHTNESS: u8 = 40;
pub const WAVE_MAX_BRIGHTNESS: u8 = 255;
pub const BLINK_ON_MS: u64 = 200;
pub const BLINK_OFF_MS: u64 = 150;
pub const RAINBOW_PERIOD_MS: u64 = 600;

/// Number of hue phases in one rainbow period.
const RAINBOW_PHASES: u64 = 6;

/// Tag of an [`Animation`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationKind {
    Off,
    Wave,
    Blink,
    Rainbow,
}

/// The live animation for the current status.
#[derive(Clone, Copy)]
pub enum Animation<I: TimeInstant> {
    /// LEDs dark.
    Off,
    /// Smooth cosine pulse of one color.
    Wave(Wave<I>),
    /// Hard on/off blinking of one color.
    Blink(Blink<I>),
    /// Continuous hue sweep.
    Rainbow(Rainbow<I>),
}

impl<I: TimeInstant> Animation<I> {
    /// Builds the animation shown for `status`, started at `now`.
    ///
    /// | Status | Animation |
    /// |---|---|
    /// | `None`, `Undefined` | off |
    /// | `Call` | amber wave, 2.5 s, brightness 40-255 |
    /// | `Video` | red wave, 2.5 s, brightness 40-255 |
    /// | `Request` | cyan blink, 200 ms on / 150 ms off |
    /// | `Coffee` | rainbow, 600 ms |
    pub fn for_status(status: Status, now: I) -> Self {
        let ms = <I::Duration as TimeDuration>::from_millis;
        match status {
            Status::Call => Animation::Wave(Wave::new(
                color::AMBER,
                ms(WAVE_PERIOD_MS),
                WAVE_MIN_BRIGHTNESS,
                WAVE_MAX_BRIGHTNESS,
                now,
            )),
            Status::Video => Animation::Wave(Wave::new(
                color::RED,
                ms(WAVE_PERIOD_MS),
                WAVE_MIN_BRIGHTNESS,
                WAVE_MAX_BRIGHTNESS,
                now,
            )),
            Status::Request => Animation::Blink(Blink::new(
                color::CYAN,
                ms(BLINK_ON_MS),
                ms(BLINK_OFF_MS),
                now,
            )),
            Status::Coffee => Animation::Rainbow(Rainbow::new(ms(RAINBOW_PERIOD_MS), now)),
            Status::None | Status::Undefined => Animation::Off,
        }
    }

    /// Samples the animation at `now`.
    pub fn color(&mut self, now: I) -> Color {
        match self {
            Animation::Off => BLACK,
            Animation::Wave(wave) => wave.color(now),
            Animation::Blink(blink) => blink.color(now),
            Animation::Rainbow(rainbow) => rainbow.color(now),
        }
    }

    pub fn kind(&self) -> AnimationKind {
        match self {
            Animation::Off => AnimationKind::Off,
            Animation::Wave(_) => AnimationKind::Wave,
            Animation::Blink(_) => AnimationKind::Blink,
            Animation::Rainbow(_) => AnimationKind::Rainbow,
        }
    }

    /// Base color of single-color animations.
    pub fn base_color(&self) -> Option<Color> {
        match self {
            Animation::Wave(wave) => Some(wave.base),
            Animation::Blink(blink) => Some(blink.base),
            Animation::Off | Animation::Rainbow(_) => None,
        }
    }
}

/// Brightness follows `0.5 * (cos(2π t / period) + 1)` mapped onto `[min, max]`.
#[derive(Clone, Copy)]
pub struct Wave<I: TimeInstant> {
    base: Color,
    min: u8,
    max: u8,
    timer: Timer<I>,
}

impl<I: TimeInstant> Wave<I> {
    pub fn new(base: Color, period: I::Duration, min: u8, max: u8, now: I) -> Self {
        let mut timer = Timer::new(period);
        timer.start(now);
        Self {
            base,
            min,
            max,
            timer,
        }
    }

    /// Brightness on the 0-255 scale at `now`. Starts at `max`.
    pub fn brightness(&self, now: I) -> f32 {
        let period = self.timer.duration().as_millis();
        let cosine = if period > 0 {
            let phase = (self.timer.elapsed(now) % period) as f32 / period as f32;
            0.5 * (libm::cosf(2.0 * PI * phase) + 1.0)
        } else {
            0.0
        };
        let (min, max) = (self.min as f32, self.max as f32);
        cosine * (max - min) + min
    }

    pub fn color(&self, now: I) -> Color {
        color::scale(self.base, self.brightness(now))
    }
}

/// Base color for `on`, black for `off`, repeating.
#[derive(Clone, Copy)]
pub struct Blink<I: TimeInstant> {
    base: Color,
    on_ms: u64,
    timer: Timer<I>,
}

impl<I: TimeInstant> Blink<I> {
    pub fn new(base: Color, on: I::Duration, off: I::Duration, now: I) -> Self {
        let on_ms = on.as_millis();
        let mut timer = Timer::new(I::Duration::from_millis(on_ms + off.as_millis()));
        timer.start(now);
        Self { base, on_ms, timer }
    }

    pub fn color(&mut self, now: I) -> Color {
        self.timer.check_and_restart(now);
        if self.timer.elapsed(now) < self.on_ms {
            self.base
        } else {
            BLACK
        }
    }
}

/// Six-phase hue sweep: one channel ramps per phase while the others are pinned.
#[derive(Clone, Copy)]
pub struct Rainbow<I: TimeInstant> {
    phase: u8,
    timer: Timer<I>,
}

impl<I: TimeInstant> Rainbow<I> {
    pub fn new(period: I::Duration, now: I) -> Self {
        let step = I::Duration::from_millis(period.as_millis() / RAINBOW_PHASES);
        let mut timer = Timer::new(step);
        timer.start(now);
        Self { phase: 0, timer }
    }

    /// Current phase index, 0-5.
    pub fn phase(&self) -> u8 {
        self.phase
    }

    pub fn color(&mut self, now: I) -> Color {
        let steps = self.timer.check_and_restart(now);
        self.phase = ((self.phase as u64 + steps) % RAINBOW_PHASES) as u8;

        let up = (self.timer.elapsed_fraction(now) * 255.0) as u8;
        let down = 255 - up;
        match self.phase {
            0 => Color::new(255, up, 0),
            1 => Color::new(down, 255, 0),
            2 => Color::new(0, 255, up),
            3 => Color::new(0, down, 255),
            4 => Color::new(up, 0, 255),
            _ => Color::new(255, 0, down),
        }
    }
}
