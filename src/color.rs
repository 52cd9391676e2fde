//! 24-bit color helpers.
//!
//! Colors are `palette::Srgb<u8>`, one byte per channel, which is what an
//! addressable LED strip consumes directly.

use palette::Srgb;

/// One RGB sample as pushed to the strip.
pub type Color = Srgb<u8>;

pub const BLACK: Color = Srgb::new(0, 0, 0);
pub const RED: Color = Srgb::new(255, 0, 0);
pub const AMBER: Color = Srgb::new(255, 150, 0);
pub const CYAN: Color = Srgb::new(0, 200, 255);

/// Packs a color as `0x00RRGGBB`.
#[inline]
pub fn to_u32(color: Color) -> u32 {
    (color.red as u32) << 16 | (color.green as u32) << 8 | color.blue as u32
}

/// Unpacks a `0x00RRGGBB` value; the top byte is ignored.
#[inline]
pub fn from_u32(packed: u32) -> Color {
    Srgb::new((packed >> 16) as u8, (packed >> 8) as u8, packed as u8)
}

/// Scales every channel by `brightness / 255`, rounding to the nearest step.
pub fn scale(color: Color, brightness: f32) -> Color {
    let factor = (brightness / 255.0).clamp(0.0, 1.0);
    let channel = |c: u8| libm::roundf(c as f32 * factor) as u8;
    Srgb::new(channel(color.red), channel(color.green), channel(color.blue))
}
