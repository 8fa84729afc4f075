//! The drawing surface the renderer paints onto.
//!
//! Hosts implement [`Surface`] over whatever they draw with: an RGBA buffer
//! for offline snapshots, a canvas context in the browser.

use crate::color::Srgb;
use crate::error::EngineError;

/// A pixel surface that can be cleared and have filled circles painted on it.
///
/// Object-safe so the frame driver can take `&mut dyn Surface`.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> usize;

    /// Height in pixels.
    fn height(&self) -> usize;

    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Srgb) -> Result<(), EngineError>;

    /// Paints a filled circle. A radius at or below zero paints nothing.
    fn fill_circle(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        color: Srgb,
    ) -> Result<(), EngineError>;
}

/// In-memory surface that records every call, for tests.
#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub struct Circle {
        pub cx: f64,
        pub cy: f64,
        pub radius: f64,
    }

    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub width: usize,
        pub height: usize,
        pub clears: usize,
        pub circles: Vec<Circle>,
        /// Fail every call once this many circles have been painted.
        pub fail_after: Option<usize>,
    }

    impl RecordingSurface {
        pub fn new(width: usize, height: usize) -> Self {
            Self {
                width,
                height,
                ..Self::default()
            }
        }
    }

    impl Surface for RecordingSurface {
        fn width(&self) -> usize {
            self.width
        }

        fn height(&self) -> usize {
            self.height
        }

        fn clear(&mut self, _color: Srgb) -> Result<(), EngineError> {
            self.clears += 1;
            self.circles.clear();
            Ok(())
        }

        fn fill_circle(
            &mut self,
            cx: f64,
            cy: f64,
            radius: f64,
            _color: Srgb,
        ) -> Result<(), EngineError> {
            if self.fail_after.is_some_and(|limit| self.circles.len() >= limit) {
                return Err(EngineError::Surface("recording surface exhausted".into()));
            }
            self.circles.push(Circle { cx, cy, radius });
            Ok(())
        }
    }
}
