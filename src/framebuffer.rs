//! Off-screen target for a render sweep plus the few primitives the overlays
//! need. Coordinates are pixels with the origin in the top-left corner.

use crate::{algebra::Vec2, color::Color, error::Result};
use image::{Rgb, RgbImage};
use std::path::Path;

pub struct FrameBuffer {
    img: RgbImage,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { img: RgbImage::new(width, height) }
    }

    pub fn width(&self) -> u32 { self.img.width() }
    pub fn height(&self) -> u32 { self.img.height() }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let Rgb([r, g, b]) = *self.img.get_pixel(x, y);
        Color::rgb(r, g, b)
    }

    pub fn clear(&mut self, color: Color) {
        let px: Rgb<u8> = color.into();
        self.img.pixels_mut().for_each(|p| *p = px);
    }

    /// Writes one pixel, blending when `color` is translucent. Off-screen
    /// coordinates are ignored.
    pub fn plot(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        let px: Rgb<u8> = match color.a {
            255 => color.into(),
            0 => return,
            _ => color.blend_over(*self.img.get_pixel(x, y)),
        };
        self.img.put_pixel(x, y, px);
    }

    /// Fills the `step × step` cell whose top-left corner is `(x, y)`.
    pub fn fill_cell(&mut self, x: u32, y: u32, step: u32, color: Color) {
        for cy in y..(y + step).min(self.height()) {
            for cx in x..(x + step).min(self.width()) {
                self.plot(cx as i64, cy as i64, color);
            }
        }
    }

    pub fn fill_disc(&mut self, center: Vec2, radius: f32, color: Color) {
        self.fill_ring(center, 0.0, radius, color);
    }

    /// Outline of `thickness` pixels drawn just outside `radius`.
    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, thickness: f32, color: Color) {
        self.fill_ring(center, radius, radius + thickness, color);
    }

    fn fill_ring(&mut self, center: Vec2, inner: f32, outer: f32, color: Color) {
        let x0 = (center.0 - outer).floor() as i64;
        let x1 = (center.0 + outer).ceil() as i64;
        let y0 = (center.1 - outer).floor() as i64;
        let y1 = (center.1 + outer).ceil() as i64;
        for y in y0.max(0)..=y1.min(self.height() as i64 - 1) {
            for x in x0.max(0)..=x1.min(self.width() as i64 - 1) {
                let d = Vec2(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                if d >= inner && d <= outer {
                    self.plot(x, y, color);
                }
            }
        }
    }

    /// Straight segment, `thickness` pixels wide across its minor axis.
    pub fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: u32, color: Color) {
        let delta = to.sub(from);
        let steps = delta.0.abs().max(delta.1.abs()).ceil() as usize;
        let steep = delta.1.abs() > delta.0.abs();
        let mut last = None;

        for i in 0..=steps {
            let t = if steps == 0 { 0.0 } else { i as f32 / steps as f32 };
            let p = from.add(delta.scale(t));
            let cell = (p.0.floor() as i64, p.1.floor() as i64);
            if last == Some(cell) {
                continue;
            }
            last = Some(cell);
            for k in 0..thickness.max(1) as i64 {
                if steep {
                    self.plot(cell.0 + k, cell.1, color);
                } else {
                    self.plot(cell.0, cell.1 + k, color);
                }
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.img.save(path)?;
        Ok(())
    }
}
