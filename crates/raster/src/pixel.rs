//! In-memory RGBA8 surface.
//!
//! Always available (no feature gate) so snapshot writers and tests share the
//! same rasterization.

use dotmatrix_core::color::Srgb;
use dotmatrix_core::error::EngineError;
use dotmatrix_core::surface::Surface;

/// Row-major RGBA8 pixel buffer, `width * height * 4` bytes.
///
/// Circles are filled without anti-aliasing: a pixel is painted when its
/// center lies within the radius.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSurface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl RasterSurface {
    /// A black, fully opaque surface. Zero dimensions give an empty buffer.
    pub fn new(width: usize, height: usize) -> Self {
        let mut pixels = vec![0u8; width * height * 4];
        for px in pixels.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Reallocates to `width x height`, discarding the contents.
    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_rgba(self) -> Vec<u8> {
        self.pixels
    }

    /// The RGBA quad at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Number of pixels equal to `rgba`.
    pub fn count(&self, rgba: [u8; 4]) -> usize {
        self.pixels.chunks_exact(4).filter(|px| *px == rgba).count()
    }

    fn put(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let i = (y * self.width + x) * 4;
        self.pixels[i..i + 4].copy_from_slice(&rgba);
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn clear(&mut self, color: Srgb) -> Result<(), EngineError> {
        let rgba = color.to_rgba8();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
        Ok(())
    }

    fn fill_circle(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        color: Srgb,
    ) -> Result<(), EngineError> {
        if !(radius > 0.0) || !cx.is_finite() || !cy.is_finite() || !radius.is_finite() {
            return Ok(());
        }
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }

        // Pixel (x, y) has its center at (x + 0.5, y + 0.5).
        let x0 = (cx - radius - 0.5).floor().max(0.0) as usize;
        let y0 = (cy - radius - 0.5).floor().max(0.0) as usize;
        let x1 = ((cx + radius - 0.5).ceil().max(0.0) as usize).min(self.width - 1);
        let y1 = ((cy + radius - 0.5).ceil().max(0.0) as usize).min(self.height - 1);
        if x0 > x1 || y0 > y1 {
            return Ok(());
        }

        let rgba = color.to_rgba8();
        let r2 = radius * radius;
        for y in y0..=y1 {
            let dy = y as f64 + 0.5 - cy;
            for x in x0..=x1 {
                let dx = x as f64 + 0.5 - cx;
                if dx * dx + dy * dy <= r2 {
                    self.put(x, y, rgba);
                }
            }
        }
        Ok(())
    }
}
