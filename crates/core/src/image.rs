//! Decoded RGBA image buffers and nearest-neighbor brightness sampling.

use crate::error::EngineError;

/// Rec. 601 luma weights applied to R, G, B.
const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// An immutable, row-major RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Wraps decoded RGBA bytes.
    ///
    /// Returns `EngineError::InvalidDimensions` if either dimension is zero and
    /// `EngineError::InvalidBuffer` if `pixels.len() != width * height * 4`.
    pub fn from_rgba(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(EngineError::InvalidDimensions)?;
        if pixels.len() != expected {
            return Err(EngineError::InvalidBuffer {
                expected,
                got: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a buffer where every pixel has the same RGBA value.
    pub fn solid(width: usize, height: usize, rgba: [u8; 4]) -> Result<Self, EngineError> {
        let len = width
            .checked_mul(height)
            .ok_or(EngineError::InvalidDimensions)?;
        Self::from_rgba(width, height, rgba.repeat(len))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// RGBA quad at `(x, y)` with both coordinates clamped into the image.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        let i = (y * self.width + x) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

/// Perceptual brightness of an RGBA quad in [0, 1]. Alpha is ignored.
pub fn luma(rgba: [u8; 4]) -> f64 {
    let [r, g, b, _] = rgba;
    let y = LUMA_WEIGHTS[0] * r as f64 + LUMA_WEIGHTS[1] * g as f64 + LUMA_WEIGHTS[2] * b as f64;
    // The weights sum to 1 only up to rounding.
    (y / 255.0).min(1.0)
}

/// A loaded image that dots read their brightness from.
///
/// Sampling is nearest-neighbor and always clamped to the pixel bounds, so
/// any coordinate (negative, past the edge, non-finite) yields a valid pixel.
#[derive(Debug, Clone)]
pub struct ImageSource {
    buffer: ImageBuffer,
}

impl ImageSource {
    pub fn new(buffer: ImageBuffer) -> Self {
        Self { buffer }
    }

    pub fn buffer(&self) -> &ImageBuffer {
        &self.buffer
    }

    pub fn width(&self) -> usize {
        self.buffer.width
    }

    pub fn height(&self) -> usize {
        self.buffer.height
    }

    /// Brightness at normalized image coordinates `(u, v)` in [0, 1].
    pub fn sample(&self, u: f64, v: f64) -> f64 {
        self.brightness_at(
            u * self.buffer.width as f64,
            v * self.buffer.height as f64,
        )
    }

    /// Brightness of the pixel containing the (fractional) pixel coordinate.
    pub fn brightness_at(&self, px: f64, py: f64) -> f64 {
        let x = clamp_index(px, self.buffer.width);
        let y = clamp_index(py, self.buffer.height);
        luma(self.buffer.pixel(x, y))
    }
}

/// Floors `coord` and clamps it into `0..len`.
pub(crate) fn clamp_index(coord: f64, len: usize) -> usize {
    let max = (len - 1) as f64;
    // NaN compares false everywhere and falls through to 0.
    if coord >= max {
        len - 1
    } else if coord > 0.0 {
        coord.floor() as usize
    } else {
        0
    }
}
