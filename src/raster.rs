//! CPU rasterizer behind the window backdrop.
//!
//! Draws into an [`RgbaImage`] with straight-alpha source-over blending, the
//! same compositing a 2D canvas uses. Edges get one pixel of coverage falloff,
//! like the `smoothstep` edge of a point sprite.

use glam::Vec2;
use image::{Rgba, RgbaImage};

use crate::canvas::Canvas;
use crate::font;
use crate::visuals::Color;

/// Framebuffer canvas.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    image: RgbaImage,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw RGBA bytes, row-major, for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (x < self.image.width() && y < self.image.height()).then(|| self.image.get_pixel(x, y).0)
    }

    /// Composite `color` over the pixel at `(x, y)` with the given coverage.
    fn blend(&mut self, x: i64, y: i64, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        let src_a = color.a * coverage.clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        let dst_a = dst.0[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }
        let mix = |s: u8, d: u8| {
            let v = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };
        *dst = Rgba([
            mix(color.r, dst.0[0]),
            mix(color.g, dst.0[1]),
            mix(color.b, dst.0[2]),
            (out_a * 255.0).round() as u8,
        ]);
    }

    /// Pixel range `[lo, hi)` covering `[min, max]`, clipped to `0..limit`.
    fn span(min: f32, max: f32, limit: u32) -> (i64, i64) {
        let lo = (min.floor() as i64).max(0);
        let hi = (max.ceil() as i64 + 1).min(limit as i64);
        (lo, hi)
    }
}

/// Distance from `p` to the segment `a`-`b`.
fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

impl Canvas for PixelCanvas {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.image.dimensions() != (width, height) {
            self.image = RgbaImage::new(width, height);
        }
    }

    fn clear(&mut self, color: Color) {
        let px = Rgba(color.to_rgba8());
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if !(radius > 0.0) || color.a <= 0.0 {
            return;
        }
        let (w, h) = self.image.dimensions();
        let (x0, x1) = Self::span(center.x - radius - 1.0, center.x + radius + 1.0, w);
        let (y0, y1) = Self::span(center.y - radius - 1.0, center.y + radius + 1.0, h);
        for y in y0..y1 {
            for x in x0..x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                let coverage = radius + 0.5 - d;
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, origin: Vec2, size: f32, color: Color) {
        if !(size > 0.0) || color.a <= 0.0 {
            return;
        }
        let unit = size / font::EM;
        let top = origin.y - font::HEIGHT * unit;
        let (w, h) = self.image.dimensions();
        let (y0, y1) = Self::span(top, origin.y - 1.0, h);

        for (i, c) in text.chars().enumerate() {
            let rows = font::glyph(c);
            let left = origin.x + i as f32 * font::ADVANCE * unit;
            let (x0, x1) = Self::span(left, left + 5.0 * unit - 1.0, w);
            for y in y0..y1 {
                let row = ((y as f32 + 0.5 - top) / unit).floor();
                if row < 0.0 {
                    continue;
                }
                for x in x0..x1 {
                    let col = ((x as f32 + 0.5 - left) / unit).floor();
                    if col >= 0.0 && font::lit(&rows, col as usize, row as usize) {
                        self.blend(x, y, color, 1.0);
                    }
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        if !(width > 0.0) || color.a <= 0.0 {
            return;
        }
        let half = width * 0.5;
        let (w, h) = self.image.dimensions();
        let delta = to - from;
        let steep = delta.y.abs() > delta.x.abs();

        // Walk the major axis; on each step cover the few pixels across the line.
        let (major_from, major_to, limit) = if steep {
            (from.y.min(to.y), from.y.max(to.y), h)
        } else {
            (from.x.min(to.x), from.x.max(to.x), w)
        };
        let (m0, m1) = Self::span(major_from - half - 1.0, major_to + half + 1.0, limit);
        let reach = half + 1.5;

        for m in m0..m1 {
            let mc = m as f32 + 0.5;
            // Minor coordinate of the line at this step, clamped to the segment.
            let t = if steep {
                if delta.y == 0.0 { 0.0 } else { ((mc - from.y) / delta.y).clamp(0.0, 1.0) }
            } else if delta.x == 0.0 {
                0.0
            } else {
                ((mc - from.x) / delta.x).clamp(0.0, 1.0)
            };
            let on_line = from + delta * t;
            let minor = if steep { on_line.x } else { on_line.y };
            let minor_limit = if steep { w } else { h };
            let (n0, n1) = Self::span(minor - reach, minor + reach, minor_limit);

            for n in n0..n1 {
                let (x, y) = if steep { (n, m) } else { (m, n) };
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = half + 0.5 - distance_to_segment(p, from, to);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage.min(1.0));
                }
            }
        }
    }
}
