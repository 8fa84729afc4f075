//! Per-frame composition of grid, images, noise and reveal into dots.
//!
//! Each visible cell becomes a circle of radius
//! `brightness * max_dot_size * noise_multiplier * reveal_scale / 2`,
//! centered in its cell. Cells outside the reveal front are skipped.

use crate::color::Srgb;
use crate::config::{DotMatrixConfig, RegionStyle};
use crate::error::EngineError;
use crate::grid::{DotGrid, Region, SubjectLayout};
use crate::image::ImageSource;
use crate::noise::NoiseField;
use crate::reveal::{AnimationClock, RevealScheduler};
use crate::surface::Surface;

/// The loaded images: always a background, optionally a centered subject.
#[derive(Debug, Clone)]
pub struct Layers {
    pub background: ImageSource,
    pub subject: Option<ImageSource>,
}

impl Layers {
    pub fn single(background: ImageSource) -> Self {
        Self {
            background,
            subject: None,
        }
    }

    pub fn dual(background: ImageSource, subject: ImageSource) -> Self {
        Self {
            background,
            subject: Some(subject),
        }
    }

    fn source(&self, region: Region) -> &ImageSource {
        match (region, &self.subject) {
            (Region::Subject, Some(subject)) => subject,
            _ => &self.background,
        }
    }

    /// An empty grid laid out for these images.
    pub fn grid(&self, config: &DotMatrixConfig) -> DotGrid {
        let subject = self.subject.as_ref().map(|s| SubjectLayout {
            size_fraction: config.subject.size_fraction,
            source_width: s.width(),
            source_height: s.height(),
        });
        DotGrid::new(
            config.dot_spacing,
            (self.background.width(), self.background.height()),
            subject,
        )
    }
}

/// One dot as computed for the current frame. Never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub cell: (usize, usize),
    pub center_px: (f64, f64),
    pub normalized_distance: f64,
    pub region: Region,
    pub brightness: f64,
    pub noise_multiplier: f64,
    pub radius_px: f64,
}

/// Counts from one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub drawn: usize,
    pub skipped: usize,
}

/// Turns grid cells into dots and paints them.
#[derive(Debug, Clone)]
pub struct Renderer {
    noise: NoiseField,
    /// Indexed by [`Region::index`].
    styles: [RegionStyle; 2],
    scheduler: RevealScheduler,
    background_color: Srgb,
    dot_color: Srgb,
}

impl Renderer {
    pub fn new(config: &DotMatrixConfig, seed: u64) -> Self {
        Self {
            noise: NoiseField::new(seed),
            styles: [config.background, config.subject.region()],
            scheduler: config.scheduler(),
            background_color: config.background_color,
            dot_color: config.dot_color,
        }
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// The dot for cell `(x, y)`, or `None` if the reveal has not reached it.
    pub fn dot(
        &self,
        grid: &DotGrid,
        layers: &Layers,
        clock: &AnimationClock,
        x: usize,
        y: usize,
    ) -> Option<Dot> {
        let distance = grid.normalized_distance(x, y);
        let progress = clock.reveal_progress;
        if !RevealScheduler::is_visible(progress, distance) {
            return None;
        }

        let (region, (px, py)) = grid.locate(x, y);
        let brightness = layers.source(region).brightness_at(px as f64, py as f64);

        let style = &self.styles[region.index()];
        let raw = self.noise.noise(
            x as f64 * style.noise.scale,
            y as f64 * style.noise.scale,
            clock.noise_time(region),
        );
        let noise_multiplier = style.noise.multiplier(raw);
        let reveal_scale = self.scheduler.reveal_scale(progress, distance);

        Some(Dot {
            cell: (x, y),
            center_px: grid.cell_center_px(x, y),
            normalized_distance: distance,
            region,
            brightness,
            noise_multiplier,
            radius_px: brightness * style.max_dot_size * noise_multiplier * reveal_scale / 2.0,
        })
    }

    /// Clears `surface` and paints every visible dot in row-major order.
    pub fn render(
        &self,
        grid: &DotGrid,
        layers: &Layers,
        clock: &AnimationClock,
        surface: &mut dyn Surface,
    ) -> Result<FrameStats, EngineError> {
        surface.clear(self.background_color)?;
        let mut stats = FrameStats::default();
        for (x, y) in grid.cells() {
            match self.dot(grid, layers, clock, x, y) {
                Some(dot) => {
                    let (cx, cy) = dot.center_px;
                    surface.fill_circle(cx, cy, dot.radius_px, self.dot_color)?;
                    stats.drawn += 1;
                }
                None => stats.skipped += 1,
            }
        }
        Ok(stats)
    }
}
