//! src/color.rs
//! ------------
//! 8-bit RGBA color. Every constructor that takes floats saturates into
//! `0..=255`, so channel arithmetic can never wrap.

use image::Rgb;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a: 255 } }
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self { Self { r, g, b, a } }

    /// Gray level `255 * intensity`, truncated.
    pub fn gray(intensity: f32) -> Self {
        let v = channel(255.0 * intensity);
        Self::rgb(v, v, v)
    }

    /// Per-channel sum capped at 255. Alpha is kept from `self`.
    pub fn saturating_add(self, o: Self) -> Self {
        Self::rgba(
            self.r.saturating_add(o.r),
            self.g.saturating_add(o.g),
            self.b.saturating_add(o.b),
            self.a,
        )
    }

    /// Normalized multiply: `self * o / 255` per channel, integer division.
    pub fn modulate(self, o: Self) -> Self {
        let m = |a: u8, b: u8| ((a as u16 * b as u16) / 255) as u8;
        Self::rgba(m(self.r, o.r), m(self.g, o.g), m(self.b, o.b), self.a)
    }

    /// Source-over blend of `self` onto an opaque pixel.
    pub fn blend_over(self, dst: Rgb<u8>) -> Rgb<u8> {
        let a = self.a as f32 / 255.0;
        let mix = |s: u8, d: u8| channel(s as f32 * a + d as f32 * (1.0 - a));
        Rgb([mix(self.r, dst[0]), mix(self.g, dst[1]), mix(self.b, dst[2])])
    }
}

impl From<Color> for Rgb<u8> {
    fn from(c: Color) -> Self { Rgb([c.r, c.g, c.b]) }
}

impl From<[u8; 3]> for Color {
    fn from(a: [u8; 3]) -> Self { Color::rgb(a[0], a[1], a[2]) }
}

/// Float to channel: clamps to `0..=255` and truncates like the integer casts
/// in the lighting formulas. NaN maps to 0.
pub fn channel(v: f32) -> u8 {
    if v.is_nan() { return 0; }
    v.clamp(0.0, 255.0) as u8
}

pub fn color_from_array<'de, D>(d: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let arr = <[u8; 3]>::deserialize(d)?;
    Ok(arr.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturating_add_caps_at_white() {
        let c = Color::rgb(200, 100, 0).saturating_add(Color::rgb(100, 100, 10));
        assert_eq!(c, Color::rgb(255, 200, 10));
    }

    #[test]
    fn modulate_by_white_is_identity() {
        let c = Color::rgb(220, 60, 7);
        assert_eq!(c.modulate(Color::WHITE), c);
        assert_eq!(c.modulate(Color::BLACK), Color::BLACK);
    }

    #[test]
    fn channel_clamps_and_truncates() {
        assert_eq!(channel(-3.0), 0);
        assert_eq!(channel(300.0), 255);
        assert_eq!(channel(51.9), 51);
        assert_eq!(channel(f32::NAN), 0);
    }

    #[test]
    fn blend_respects_alpha() {
        let dst = Rgb([0, 0, 0]);
        assert_eq!(Color::rgba(200, 100, 50, 255).blend_over(dst), Rgb([200, 100, 50]));
        assert_eq!(Color::rgba(200, 100, 50, 0).blend_over(dst), Rgb([0, 0, 0]));
    }
}
