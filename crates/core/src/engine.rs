//! The frame-driven animation contract and its dot-matrix implementation.
//!
//! Hosts own the platform plumbing (resize notifications, the refresh-synced
//! frame callback) and forward it through [`Animation`]. Everything runs on
//! the host's single render thread; a resize completes before the next frame
//! reads the grid.

use tracing::{error, info, warn};

use crate::config::DotMatrixConfig;
use crate::error::EngineError;
use crate::grid::DotGrid;
use crate::renderer::{FrameStats, Layers, Renderer};
use crate::reveal::{AnimationClock, RevealScheduler};
use crate::surface::Surface;

/// Seed used when the config does not carry one.
pub const DEFAULT_SEED: u64 = 0x00D0_7D07;

/// A surface animation driven by resize and frame callbacks.
///
/// This trait is **object-safe**: hosts can hold a `Box<dyn Animation>`.
pub trait Animation {
    /// The surface is now `width x height` pixels.
    fn on_resize(&mut self, width: usize, height: usize);

    /// Draws one frame for `timestamp_ms` (monotonic milliseconds).
    ///
    /// Returns `false` once the animation is finished or cancelled; the host
    /// should stop scheduling frames.
    fn on_frame(&mut self, timestamp_ms: f64, surface: &mut dyn Surface) -> bool;
}

/// A mounted dot-matrix animation.
///
/// Can only be built from fully loaded [`Layers`], so no frame is ever drawn
/// before the images exist.
pub struct DotMatrix {
    renderer: Renderer,
    scheduler: RevealScheduler,
    layers: Layers,
    grid: DotGrid,
    clock: AnimationClock,
    running: bool,
    last_stats: FrameStats,
    on_reveal: Option<Box<dyn FnMut()>>,
}

impl DotMatrix {
    /// Validates `config` and mounts it over `layers`. The grid starts empty.
    pub fn new(config: DotMatrixConfig, layers: Layers) -> Result<Self, EngineError> {
        config.validate()?;
        let seed = config.seed.unwrap_or(DEFAULT_SEED);
        Ok(Self {
            renderer: Renderer::new(&config, seed),
            scheduler: config.scheduler(),
            grid: layers.grid(&config),
            layers,
            clock: AnimationClock::new(),
            running: true,
            last_stats: FrameStats::default(),
            on_reveal: None,
        })
    }

    /// Registers the callback fired once, on the frame the reveal completes.
    ///
    /// Replaces any earlier callback. Registering after completion never fires.
    pub fn on_reveal_complete(&mut self, callback: impl FnMut() + 'static) {
        self.on_reveal = Some(Box::new(callback));
    }

    /// Cancels the animation; every later frame returns `false`.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn grid(&self) -> &DotGrid {
        &self.grid
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn layers(&self) -> &Layers {
        &self.layers
    }

    /// Counts from the most recent drawn frame.
    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }
}

impl Animation for DotMatrix {
    fn on_resize(&mut self, width: usize, height: usize) {
        self.grid.resize(width, height);
    }

    fn on_frame(&mut self, timestamp_ms: f64, surface: &mut dyn Surface) -> bool {
        if !self.running {
            return false;
        }

        let size = (surface.width(), surface.height());
        if self.grid.surface_size() != size {
            warn!(
                grid_width = self.grid.surface_size().0,
                grid_height = self.grid.surface_size().1,
                surface_width = size.0,
                surface_height = size.1,
                "surface size changed without resize, recomputing grid"
            );
            self.grid.resize(size.0, size.1);
        }

        let tick = self.scheduler.tick(self.clock, timestamp_ms);
        self.clock = tick.clock;
        if tick.reveal_completed {
            info!(
                elapsed_ms = self.clock.reveal_elapsed_ms,
                "reveal complete"
            );
            if let Some(callback) = self.on_reveal.as_mut() {
                callback();
            }
        }

        match self
            .renderer
            .render(&self.grid, &self.layers, &self.clock, surface)
        {
            Ok(stats) => {
                self.last_stats = stats;
                true
            }
            Err(e) => {
                error!(error = %e, "frame failed, stopping animation");
                self.running = false;
                false
            }
        }
    }
}
