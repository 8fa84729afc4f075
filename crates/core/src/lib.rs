#![deny(unsafe_code)]
//! Core of the dot-matrix image animation.
//!
//! Renders images as a grid of dots whose radius follows local brightness,
//! modulated by animated Perlin noise and revealed radially from the center.
//! Provides the `DotMatrix` frame driver, the `Surface` drawing seam, the
//! grid and crop mapping, the reveal clock, and the JSON configuration.
//! Hosts (raster snapshots, browser canvas) live in sibling crates.

pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod image;
pub mod noise;
pub mod params;
pub mod prng;
pub mod renderer;
pub mod reveal;
pub mod surface;

pub use color::Srgb;
pub use config::{DotMatrixConfig, NoiseStyle, RegionStyle, SubjectStyle};
pub use engine::{Animation, DotMatrix, DEFAULT_SEED};
pub use error::EngineError;
pub use grid::{CropMap, DotGrid, Region, SubjectRect};
pub use image::{ImageBuffer, ImageSource};
pub use noise::NoiseField;
pub use prng::Xorshift64;
pub use renderer::{Dot, FrameStats, Layers, Renderer};
pub use reveal::{AnimationClock, Phase, RevealScheduler};
pub use surface::Surface;
