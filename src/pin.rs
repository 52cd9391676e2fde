//! Pin descriptors and the raw line I/O seam.
//!
//! A [`Pin`] is a small `Copy` descriptor: line number, direction/pull mode
//! and optional inversion. It does not own hardware. Reads and writes go
//! through a [`PinIo`] implementation supplied by the board layer, with the
//! inversion applied here so the rest of the crate thinks in logical levels.

use core::fmt;

/// Trait for abstracting raw digital and analog line access.
///
/// Implement this for your board's GPIO/ADC layer. Methods work on raw
/// electrical levels; inversion is handled by [`Pin`].
pub trait PinIo {
    /// Configures the line for the given mode.
    fn configure(&mut self, line: u8, mode: PinMode);

    /// Reads the raw electrical level (true = high).
    fn read(&mut self, line: u8) -> bool;

    /// Drives the line to the given raw level.
    fn write(&mut self, line: u8, high: bool);

    /// Samples the line as an analog input.
    fn read_analog(&mut self, line: u8) -> u16;

    /// Writes an analog (PWM) value to the line.
    fn write_analog(&mut self, line: u8, value: u16);
}

/// Direction and pull configuration of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Floating input.
    Input,
    /// Input with internal pull-up.
    InputPullUp,
    /// Push-pull output.
    Output,
}

impl PinMode {
    /// Returns true for both input modes.
    pub fn is_input(self) -> bool {
        matches!(self, PinMode::Input | PinMode::InputPullUp)
    }
}

/// Descriptor of a single hardware line.
///
/// Line number 0 is reserved as "not connected".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin {
    line: u8,
    mode: PinMode,
    inverted: bool,
    analog: bool,
}

impl Pin {
    /// Descriptor for an unconnected pin.
    pub const NONE: Pin = Pin::new(0, PinMode::Input);

    /// Creates a non-inverted digital pin descriptor.
    pub const fn new(line: u8, mode: PinMode) -> Self {
        Self {
            line,
            mode,
            inverted: false,
            analog: false,
        }
    }

    /// Creates an active-low button input: pull-up enabled, closed when low.
    pub const fn button(line: u8) -> Self {
        Self::new(line, PinMode::InputPullUp).inverted(true)
    }

    /// Sets signal inversion.
    pub const fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Marks the line as an analog channel (diagnostics only).
    pub const fn analog(mut self, analog: bool) -> Self {
        self.analog = analog;
        self
    }

    pub fn line(&self) -> u8 {
        self.line
    }

    pub fn mode(&self) -> PinMode {
        self.mode
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn is_analog(&self) -> bool {
        self.analog
    }

    /// Returns true if a line is assigned.
    pub fn is_set(&self) -> bool {
        self.line != 0
    }

    /// Returns true if the pin can serve as a button input.
    pub fn is_valid_input(&self) -> bool {
        self.is_set() && self.mode.is_input()
    }

    /// Applies the configured mode to the hardware.
    pub fn setup(&self, io: &mut impl PinIo) {
        if self.is_set() {
            io.configure(self.line, self.mode);
        }
    }

    /// Logical high, after inversion.
    pub fn is_high(&self, io: &mut impl PinIo) -> bool {
        io.read(self.line) != self.inverted
    }

    /// Logical low, after inversion.
    pub fn is_low(&self, io: &mut impl PinIo) -> bool {
        !self.is_high(io)
    }

    /// Drives the logical level high.
    pub fn set_high(&self, io: &mut impl PinIo) {
        io.write(self.line, !self.inverted);
    }

    /// Drives the logical level low.
    pub fn set_low(&self, io: &mut impl PinIo) {
        io.write(self.line, self.inverted);
    }

    /// Raw analog sample.
    pub fn read_analog(&self, io: &mut impl PinIo) -> u16 {
        io.read_analog(self.line)
    }

    /// Analog sample mapped linearly from `[in_min, in_max]` to `[out_min, out_max]`.
    pub fn read_analog_scaled(
        &self,
        io: &mut impl PinIo,
        in_min: f32,
        in_max: f32,
        out_min: f32,
        out_max: f32,
    ) -> f32 {
        let raw = self.read_analog(io) as f32;
        (raw - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
    }

    /// Writes an analog (PWM) value.
    pub fn write_analog(&self, io: &mut impl PinIo, value: u16) {
        io.write_analog(self.line, value);
    }
}

impl Default for Pin {
    fn default() -> Self {
        Pin::NONE
    }
}

/// Compact diagnostic form: `I~[3]`, `IP~[4]`, `Q[12]`, `I[A2]`, `X[]` when unset.
impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_set() {
            return write!(f, "X[]");
        }

        let direction = if self.mode == PinMode::Output { "Q" } else { "I" };
        let pull = if self.mode == PinMode::InputPullUp { "P" } else { "" };
        let invert = if self.inverted { "~" } else { "" };
        let analog = if self.analog { "A" } else { "" };
        write!(f, "{}{}{}[{}{}]", direction, pull, invert, analog, self.line)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    struct Lines {
        level: [bool; 8],
        analog: [u16; 8],
    }

    impl PinIo for Lines {
        fn configure(&mut self, _line: u8, _mode: PinMode) {}

        fn read(&mut self, line: u8) -> bool {
            self.level[line as usize]
        }

        fn write(&mut self, line: u8, high: bool) {
            self.level[line as usize] = high;
        }

        fn read_analog(&mut self, line: u8) -> u16 {
            self.analog[line as usize]
        }

        fn write_analog(&mut self, line: u8, value: u16) {
            self.analog[line as usize] = value;
        }
    }

    #[test]
    fn display_matches_diagnostic_format() {
        assert_eq!(Pin::new(3, PinMode::Input).inverted(true).to_string(), "I~[3]");
        assert_eq!(Pin::button(4).to_string(), "IP~[4]");
        assert_eq!(Pin::new(12, PinMode::Output).to_string(), "Q[12]");
        assert_eq!(Pin::new(2, PinMode::Input).analog(true).to_string(), "I[A2]");
        assert_eq!(Pin::NONE.to_string(), "X[]");
    }

    #[test]
    fn inversion_applies_to_reads_and_writes() {
        let mut io = Lines {
            level: [false; 8],
            analog: [0; 8],
        };
        let pin = Pin::new(1, PinMode::Output).inverted(true);

        assert!(pin.is_high(&mut io));
        pin.set_high(&mut io);
        assert!(!io.level[1]);
        assert!(pin.is_high(&mut io));
        pin.set_low(&mut io);
        assert!(io.level[1]);
        assert!(pin.is_low(&mut io));
    }

    #[test]
    fn analog_scaling_is_linear() {
        let mut io = Lines {
            level: [false; 8],
            analog: [0; 8],
        };
        let pin = Pin::new(5, PinMode::Input).analog(true);
        pin.write_analog(&mut io, 512);

        let scaled = pin.read_analog_scaled(&mut io, 0.0, 1024.0, 0.0, 100.0);
        assert!((scaled - 50.0).abs() < 0.01);
    }

    #[test]
    fn validity_requires_line_and_input_mode() {
        assert!(Pin::button(2).is_valid_input());
        assert!(!Pin::NONE.is_valid_input());
        assert!(!Pin::new(2, PinMode::Output).is_valid_input());
    }
}
