#![deny(unsafe_code)]
//! CPU raster host for the dot-matrix renderer.
//!
//! [`RasterSurface`] paints frames into an RGBA8 buffer. With the `png`
//! feature (default on) the crate also decodes source images from disk and
//! writes frames out as PNG snapshots.

pub mod pixel;

#[cfg(feature = "png")]
pub mod decode;
#[cfg(feature = "png")]
pub mod snapshot;

pub use pixel::RasterSurface;

#[cfg(test)]
mod tests {
    use super::*;
    use dotmatrix_core::{
        Animation, DotMatrix, DotMatrixConfig, ImageBuffer, ImageSource, Layers, NoiseStyle,
    };

    const FLAT: NoiseStyle = NoiseStyle {
        scale: 0.1,
        speed: 0.0,
        min: 1.0,
        range: 0.0,
    };

    fn white_matrix() -> DotMatrix {
        let mut config = DotMatrixConfig {
            dot_spacing: 10.0,
            reveal_duration_ms: 100.0,
            seed: Some(1),
            ..DotMatrixConfig::default()
        };
        config.background.noise = FLAT;
        let layers = Layers::single(ImageSource::new(
            ImageBuffer::solid(2, 2, [255, 255, 255, 255]).unwrap(),
        ));
        DotMatrix::new(config, layers).unwrap()
    }

    #[test]
    fn revealed_white_image_paints_one_disc_per_cell() {
        let mut dm = white_matrix();
        let mut surface = RasterSurface::new(40, 40);
        dm.on_resize(40, 40);
        assert!(dm.on_frame(0.0, &mut surface));
        assert!(dm.on_frame(1000.0, &mut surface));

        // Radius 4 discs centered in every 10px cell; the cell corners stay dark.
        for cy in 0..4 {
            for cx in 0..4 {
                let (x, y) = (cx * 10 + 5, cy * 10 + 5);
                assert_eq!(surface.pixel(x, y), Some([255, 255, 255, 255]));
                assert_eq!(surface.pixel(cx * 10, cy * 10), Some([0, 0, 0, 255]));
            }
        }
    }

    #[test]
    fn first_frame_paints_only_background() {
        let mut dm = white_matrix();
        let mut surface = RasterSurface::new(40, 40);
        dm.on_resize(40, 40);
        assert!(dm.on_frame(0.0, &mut surface));
        // Only the center cell is inside the front, and it has zero radius.
        assert_eq!(surface.count([0, 0, 0, 255]), 40 * 40);
    }
}
