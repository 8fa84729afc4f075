//! Error types for the dot-matrix core.

use thiserror::Error;

/// Errors produced by core operations and reported to hosts.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero when creating an image buffer.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A pixel buffer did not hold exactly `width * height * 4` bytes.
    #[error("invalid pixel buffer: expected {expected} bytes, got {got}")]
    InvalidBuffer { expected: usize, got: usize },

    /// A configuration value was outside its usable range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// An image asset failed to load or decode.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The drawing surface rejected an operation.
    #[error("surface error: {0}")]
    Surface(String),

    /// A filesystem operation failed (snapshot writes, asset reads).
    #[error("io error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let err = EngineError::InvalidDimensions;
        let msg = format!("{err}");
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn invalid_buffer_includes_both_lengths() {
        let err = EngineError::InvalidBuffer {
            expected: 64,
            got: 60,
        };
        let msg = format!("{err}");
        assert!(msg.contains("64"), "missing expected length in: {msg}");
        assert!(msg.contains("60"), "missing actual length in: {msg}");
    }

    #[test]
    fn invalid_config_includes_message() {
        let err = EngineError::InvalidConfig("dot_spacing must be positive".into());
        let msg = format!("{err}");
        assert!(msg.contains("dot_spacing"), "missing message in: {msg}");
    }

    #[test]
    fn decode_and_surface_errors_include_message() {
        let decode = EngineError::Decode("truncated png".into());
        let surface = EngineError::Surface("context lost".into());
        assert!(decode.to_string().contains("truncated png"));
        assert!(surface.to_string().contains("context lost"));
    }

    #[test]
    fn engine_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineError>();
    }

    #[test]
    fn engine_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<EngineError>();
    }
}
