//! Loading source images into [`ImageBuffer`]s.
//!
//! Feature-gated behind `png` together with the snapshot writer. Any format
//! the `image` crate was built with (PNG, JPEG) is accepted; everything is
//! converted to RGBA8.

use std::path::Path;

use dotmatrix_core::error::EngineError;
use dotmatrix_core::image::ImageBuffer;
use tracing::debug;

/// Decodes an encoded image held in memory.
///
/// Returns `EngineError::Decode` if the bytes are not a supported image.
pub fn decode_image(bytes: &[u8]) -> Result<ImageBuffer, EngineError> {
    let rgba = image::load_from_memory(bytes)
        .map_err(|e| EngineError::Decode(e.to_string()))?
        .to_rgba8();
    let (w, h) = rgba.dimensions();
    ImageBuffer::from_rgba(w as usize, h as usize, rgba.into_raw())
}

/// Reads and decodes the image at `path`.
///
/// Returns `EngineError::Io` if the file cannot be read and
/// `EngineError::Decode` if its contents are not a supported image.
pub fn load_image(path: &Path) -> Result<ImageBuffer, EngineError> {
    let bytes =
        std::fs::read(path).map_err(|e| EngineError::Io(format!("{}: {e}", path.display())))?;
    let buffer = decode_image(&bytes)
        .map_err(|e| EngineError::Decode(format!("{}: {e}", path.display())))?;
    debug!(
        path = %path.display(),
        width = buffer.width(),
        height = buffer.height(),
        "image loaded"
    );
    Ok(buffer)
}
