//! Software [`DrawSurface`] writing into an RGBA8 buffer.
//!
//! Shapes are sampled at pixel centers with no anti-aliasing. Lines thinner
//! than one pixel are drawn one pixel wide with their alpha scaled by the
//! width, which keeps the default 0.5 px links as faint as they look on a
//! canvas.

use backdrop_core::{BackdropError, DrawSurface, Rgba, Viewport};
use glam::DVec2;

/// An RGBA8 image that particles and links can be drawn into.
#[derive(Debug, Clone)]
pub struct Raster {
    width: u32,
    height: u32,
    background: Rgba,
    pixels: Vec<u8>,
}

impl Raster {
    /// Creates a raster filled with `background`.
    ///
    /// Returns `BackdropError::InvalidDimensions` when the RGBA buffer size
    /// does not fit in `usize`.
    pub fn new(width: u32, height: u32, background: Rgba) -> Result<Self, BackdropError> {
        let len = buffer_len(width, height).ok_or(BackdropError::InvalidDimensions)?;
        let mut raster = Self {
            width,
            height,
            background,
            pixels: vec![0; len],
        };
        raster.clear();
        Ok(raster)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGBA8 bytes, `width * height * 4` long.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The RGBA bytes at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Resizes the buffer; a size that cannot be addressed leaves the raster empty.
    fn reallocate(&mut self, width: u32, height: u32) {
        let (width, height, len) = match buffer_len(width, height) {
            Some(len) => (width, height, len),
            None => (0, 0, 0),
        };
        self.width = width;
        self.height = height;
        self.pixels = vec![0; len];
        self.clear();
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgba) {
        let i = self.index(x, y);
        let dst = [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ];
        let out = blend_over(dst, color);
        self.pixels[i..i + 4].copy_from_slice(&out);
    }

    /// Pixel columns/rows whose centers may fall inside `[min, max]`.
    fn pixel_span(&self, min: DVec2, max: DVec2) -> Option<(u32, u32, u32, u32)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let x0 = (min.x - 0.5).ceil().max(0.0);
        let y0 = (min.y - 0.5).ceil().max(0.0);
        let x1 = (max.x - 0.5).floor().min(f64::from(self.width - 1));
        let y1 = (max.y - 0.5).floor().min(f64::from(self.height - 1));
        if x0 > x1 || y0 > y1 || !(x0.is_finite() && y0.is_finite()) {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

impl DrawSurface for Raster {
    fn clear(&mut self) {
        let fill = to_bytes(self.background);
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&fill);
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        let size = viewport.size().round();
        self.reallocate(size.x as u32, size.y as u32);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        if radius <= 0.0 || color.alpha == 0.0 {
            return;
        }
        let extent = DVec2::splat(radius);
        let Some((x0, y0, x1, y1)) = self.pixel_span(center - extent, center + extent) else {
            return;
        };
        let r2 = radius * radius;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = DVec2::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                if p.distance_squared(center) <= r2 {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64) {
        if width <= 0.0 || color.alpha == 0.0 {
            return;
        }
        let half = (width / 2.0).max(0.5);
        let color = Rgba::new(color.rgb, color.alpha * width.min(1.0));
        let pad = DVec2::splat(half);
        let Some((x0, y0, x1, y1)) = self.pixel_span(from.min(to) - pad, from.max(to) + pad)
        else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = DVec2::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                if distance_to_segment(p, from, to) <= half {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

/// Byte length of a `width × height` RGBA8 buffer, if addressable.
fn buffer_len(width: u32, height: u32) -> Option<usize> {
    usize::try_from(width)
        .ok()?
        .checked_mul(usize::try_from(height).ok()?)?
        .checked_mul(4)
}

fn to_bytes(color: Rgba) -> [u8; 4] {
    [color.rgb.r, color.rgb.g, color.rgb.b, color.alpha_u8()]
}

/// Source-over compositing of `src` onto a straight-alpha RGBA8 pixel.
pub fn blend_over(dst: [u8; 4], src: Rgba) -> [u8; 4] {
    let sa = src.alpha;
    let da = f64::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }
    let channel = |s: u8, d: u8| {
        let c = (f64::from(s) * sa + f64::from(d) * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    [
        channel(src.rgb.r, dst[0]),
        channel(src.rgb.g, dst[1]),
        channel(src.rgb.b, dst[2]),
        (out_a * 255.0).round() as u8,
    ]
}

fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
