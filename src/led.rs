//! LED strip seam.
//!
//! The controller floods the whole strip with one color per render tick, so
//! the only driver operations it needs are [`LedStrip::fill`] and
//! [`LedStrip::show`]. [`PixelStrip`] adapts any `smart_leds` writer.

use crate::color::{BLACK, Color};
use crate::config::LedConfig;
use smart_leds::{RGB8, SmartLedsWrite, brightness, gamma};

/// Trait for abstracting the addressable LED strip.
pub trait LedStrip {
    /// Sets every pixel of the frame buffer to `color`.
    fn fill(&mut self, color: Color);

    /// Pushes the frame buffer to the hardware.
    ///
    /// Handle hardware errors internally - this method cannot fail.
    fn show(&mut self);
}

/// Frame buffer of `N` pixels in front of a `smart_leds` driver.
pub struct PixelStrip<W, const N: usize> {
    writer: W,
    pixels: [RGB8; N],
    brightness: u8,
    gamma: bool,
}

impl<W, const N: usize> PixelStrip<W, N>
where
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
{
    /// Wraps `writer` with full brightness and no gamma correction.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pixels: [RGB8::default(); N],
            brightness: u8::MAX,
            gamma: false,
        }
    }

    /// Wraps `writer` with the brightness and gamma from `config`.
    pub fn with_config(writer: W, config: &LedConfig) -> Self {
        if usize::from(config.pixel_count) != N {
            warn!(
                "strip configured for {} pixels, frame buffer holds {}",
                config.pixel_count,
                N
            );
        }
        Self::new(writer)
            .with_brightness(config.brightness)
            .with_gamma(config.gamma)
    }

    /// Global brightness applied when showing, 0-255.
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    /// Enables gamma correction when showing.
    pub fn with_gamma(mut self, gamma: bool) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn pixels(&self) -> &[RGB8; N] {
        &self.pixels
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Turns all pixels off immediately.
    pub fn clear(&mut self) {
        self.fill(BLACK);
        self.show();
    }
}

impl<W, const N: usize> LedStrip for PixelStrip<W, N>
where
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
{
    fn fill(&mut self, color: Color) {
        self.pixels.fill(RGB8::new(color.red, color.green, color.blue));
    }

    fn show(&mut self) {
        let pixels = self.pixels.iter().copied();
        let result = if self.gamma {
            self.writer.write(brightness(gamma(pixels), self.brightness))
        } else {
            self.writer.write(brightness(pixels, self.brightness))
        };
        if result.is_err() {
            warn!("LED strip write failed");
        }
    }
}
