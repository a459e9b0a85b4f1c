use std::ops::Range;

use crate::color::Color;
use crate::geometry::{Vector, vector};

/// Row-major RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    pixels: Vec<Color>,
    is_opaque: bool,
}

impl Bitmap {
    pub fn new(width: usize, height: usize, color: Color) -> Self {
        Self { width, pixels: vec![color; width * height], is_opaque: color.is_opaque() }
    }

    /// Wrap existing pixels. `pixels.len()` must be a multiple of `width`.
    pub fn from_pixels(width: usize, pixels: Vec<Color>) -> Self {
        debug_assert!(width > 0 && pixels.len() % width == 0);
        let is_opaque = pixels.iter().all(Color::is_opaque);
        Self { width, pixels, is_opaque }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        if self.width == 0 { 0 } else { self.pixels.len() / self.width }
    }

    pub fn size(&self) -> Vector {
        vector(self.width as f64, self.height() as f64)
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Raw RGBA bytes, ready for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn is_opaque(&self) -> bool {
        self.is_opaque
    }

    /// Pixel at `(x, y)`, or `None` outside the bitmap.
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        (x < self.width && y < self.height()).then(|| self.pixels[y * self.width + x])
    }

    /// Clamped lookup. Panics only on an empty bitmap.
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        let x = x.min(self.width - 1);
        let y = y.min(self.height() - 1);
        self.pixels[y * self.width + x]
    }

    /// Sample with texture coordinates in `[0, 1)`, truncating.
    pub fn sample(&self, u: f64, v: f64) -> Color {
        let x = (u * self.width as f64).max(0.0) as usize;
        let y = (v * self.height() as f64).max(0.0) as usize;
        self.pixel(x, y)
    }

    /// Overwrite a pixel. Writes outside the bitmap are dropped.
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height() {
            self.pixels[y * self.width + x] = color;
            self.is_opaque &= color.is_opaque();
        }
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
        self.is_opaque = color.is_opaque();
    }

    fn blend(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height() {
            let index = y * self.width + x;
            self.pixels[index] = self.pixels[index].blended(color);
        }
    }

    /// Scale column `source_x` of `source` to `height` pixels and draw it
    /// with its top at `point`.
    pub fn draw_column(
        &mut self,
        source_x: usize,
        source: &Bitmap,
        point: Vector,
        height: f64,
        tint: Option<Color>,
    ) {
        if point.x < 0.0 || height <= 0.0 {
            return;
        }
        let x = point.x as usize;
        if x >= self.width {
            return;
        }
        let start = point.y.floor();
        let end = (point.y + height).ceil().min(self.height() as f64);
        let step_y = source.height() as f64 / height;
        let first = start.max(0.0) as usize;
        let last = end.max(0.0) as usize;

        for y in first..last {
            let source_y = ((y as f64 - point.y).max(0.0) * step_y) as usize;
            let mut color = source.pixel(source_x, source_y);
            if let Some(tint) = tint {
                color = color.tinted(tint);
            }
            if source.is_opaque && tint.is_none_or(|t| t.is_opaque()) {
                self.pixels[y * self.width + x] = color;
            } else {
                self.blend(x, y, color);
            }
        }
    }

    /// Draw columns `x_range` of `source` (all of it by default) scaled to
    /// `size` with the top-left at `point`.
    pub fn draw_image(
        &mut self,
        source: &Bitmap,
        x_range: Option<Range<usize>>,
        point: Vector,
        size: Vector,
        tint: Option<Color>,
    ) {
        let x_range = x_range.unwrap_or(0..source.width);
        if x_range.is_empty() || size.x <= 0.0 {
            return;
        }
        let start = point.x.floor().max(0.0) as usize;
        let end = ((point.x + size.x).floor().max(0.0) as usize).min(self.width);
        let step_x = x_range.len() as f64 / size.x;

        for x in start..end {
            let source_x = ((x as f64 - point.x).max(0.0) * step_x) as usize + x_range.start;
            let source_x = source_x.min(x_range.end - 1);
            self.draw_column(source_x, source, vector(x as f64, point.y), size.y, tint);
        }
    }

    /// Blend `color` over the whole bitmap at `opacity` times its own alpha.
    pub fn tint(&mut self, color: Color, opacity: f64) {
        let alpha = (color.a as f64 / 255.0 * opacity).clamp(0.0, 1.0);
        let overlay = Color::rgba(color.r, color.g, color.b, (255.0 * alpha) as u8);
        if overlay.a == 0 {
            return;
        }
        for pixel in &mut self.pixels {
            *pixel = pixel.blended(overlay);
        }
    }
}
