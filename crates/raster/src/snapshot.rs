//! PNG output of rendered frames.
//!
//! Feature-gated behind `png` (default on) so hosts that only need the
//! in-memory surface do not pull in the `image` crate.

use std::path::Path;

use dotmatrix_core::error::EngineError;
use dotmatrix_core::surface::Surface;

use crate::pixel::RasterSurface;

/// Writes the surface as a PNG image.
///
/// Returns `EngineError::InvalidDimensions` for an empty surface or one whose
/// dimensions overflow `u32`, or `EngineError::Io` on write failure.
pub fn write_png(surface: &RasterSurface, path: &Path) -> Result<(), EngineError> {
    if surface.width() == 0 || surface.height() == 0 {
        return Err(EngineError::InvalidDimensions);
    }
    let w = u32::try_from(surface.width()).map_err(|_| EngineError::InvalidDimensions)?;
    let h = u32::try_from(surface.height()).map_err(|_| EngineError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, surface.pixels().to_vec())
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))
}

/// File name for frame `index` of a numbered sequence, e.g. `frame_0007.png`.
pub fn sequence_name(index: usize) -> String {
    format!("frame_{index:04}.png")
}
