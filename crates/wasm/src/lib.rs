#![deny(unsafe_code)]
//! Browser bindings for the dot-matrix renderer.
//!
//! `DotMatrixView` owns a mounted animation and a 2D canvas context. The page
//! decodes its images into RGBA bytes, forwards resize events, and calls
//! `frame` from `requestAnimationFrame` until it returns `false`.

use dotmatrix_core::color::Srgb;
use dotmatrix_core::{
    Animation, DotMatrix, DotMatrixConfig, EngineError, ImageBuffer, ImageSource, Layers, Surface,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parses a JSON config string; an empty string means all defaults.
fn parse_config(json: &str) -> Result<DotMatrixConfig, EngineError> {
    if json.trim().is_empty() {
        return Ok(DotMatrixConfig::default());
    }
    let params: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| EngineError::InvalidConfig(format!("invalid config JSON: {e}")))?;
    DotMatrixConfig::from_json(&params)
}

/// Maps a uniform sample in [0, 1) onto the seed range.
fn seed_from_unit(r: f64) -> u64 {
    (r.clamp(0.0, 1.0) * (1u64 << 53) as f64) as u64
}

/// [`Surface`] over a canvas 2D context.
struct CanvasSurface<'a> {
    context: &'a CanvasRenderingContext2d,
    width: usize,
    height: usize,
}

impl Surface for CanvasSurface<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn clear(&mut self, color: Srgb) -> Result<(), EngineError> {
        self.context.set_fill_style_str(&color.to_hex());
        self.context
            .fill_rect(0.0, 0.0, self.width as f64, self.height as f64);
        Ok(())
    }

    fn fill_circle(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        color: Srgb,
    ) -> Result<(), EngineError> {
        if !(radius > 0.0) {
            return Ok(());
        }
        self.context.set_fill_style_str(&color.to_hex());
        self.context.begin_path();
        self.context
            .arc(cx, cy, radius, 0.0, std::f64::consts::TAU)
            .map_err(|e| EngineError::Surface(format!("arc failed: {e:?}")))?;
        self.context.fill();
        Ok(())
    }
}

/// A dot-matrix animation mounted on a canvas.
#[wasm_bindgen]
pub struct DotMatrixView {
    matrix: DotMatrix,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

#[wasm_bindgen]
impl DotMatrixView {
    /// Mounts a single-image animation.
    ///
    /// `rgba` holds `width * height * 4` bytes. `config` is a JSON string
    /// (empty for defaults); a missing seed is drawn from `Math.random()`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        width: usize,
        height: usize,
        rgba: Vec<u8>,
        config: &str,
    ) -> Result<DotMatrixView, JsValue> {
        let background = ImageBuffer::from_rgba(width, height, rgba).map_err(js_error)?;
        Self::mount(canvas, Layers::single(ImageSource::new(background)), config)
    }

    /// Mounts a background image with a centered subject image.
    #[wasm_bindgen(js_name = withSubject)]
    #[allow(clippy::too_many_arguments)]
    pub fn with_subject(
        canvas: HtmlCanvasElement,
        width: usize,
        height: usize,
        rgba: Vec<u8>,
        subject_width: usize,
        subject_height: usize,
        subject_rgba: Vec<u8>,
        config: &str,
    ) -> Result<DotMatrixView, JsValue> {
        let background = ImageBuffer::from_rgba(width, height, rgba).map_err(js_error)?;
        let subject = ImageBuffer::from_rgba(subject_width, subject_height, subject_rgba)
            .map_err(js_error)?;
        let layers = Layers::dual(ImageSource::new(background), ImageSource::new(subject));
        Self::mount(canvas, layers, config)
    }

    /// Resizes the canvas backing store and recomputes the grid.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
        self.matrix.on_resize(width as usize, height as usize);
    }

    /// Draws the frame for `timestamp` (the `requestAnimationFrame` argument).
    ///
    /// Returns `false` once stopped; the caller should stop scheduling frames.
    pub fn frame(&mut self, timestamp: f64) -> bool {
        let mut surface = CanvasSurface {
            context: &self.context,
            width: self.canvas.width() as usize,
            height: self.canvas.height() as usize,
        };
        self.matrix.on_frame(timestamp, &mut surface)
    }

    /// Cancels the animation.
    pub fn stop(&mut self) {
        self.matrix.stop();
    }

    /// Whether frames are still being drawn.
    #[wasm_bindgen(getter, js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.matrix.is_running()
    }

    /// Whether the radial reveal has finished.
    #[wasm_bindgen(getter, js_name = isRevealed)]
    pub fn is_revealed(&self) -> bool {
        self.matrix.clock().is_revealed()
    }

    /// Registers a callback invoked once when the reveal completes.
    #[wasm_bindgen(js_name = onRevealComplete)]
    pub fn on_reveal_complete(&mut self, callback: js_sys::Function) {
        self.matrix.on_reveal_complete(move || {
            // A throwing callback does not stop the animation.
            let _ = callback.call0(&JsValue::NULL);
        });
    }
}

impl DotMatrixView {
    fn mount(
        canvas: HtmlCanvasElement,
        layers: Layers,
        config: &str,
    ) -> Result<DotMatrixView, JsValue> {
        let mut config = parse_config(config).map_err(js_error)?;
        if config.seed.is_none() {
            config.seed = Some(seed_from_unit(js_sys::Math::random()));
        }
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| js_error("missing 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let mut matrix = DotMatrix::new(config, layers).map_err(js_error)?;
        matrix.on_resize(canvas.width() as usize, canvas.height() as usize);
        Ok(Self {
            matrix,
            canvas,
            context,
        })
    }
}

/// The default configuration as a JSON string.
#[wasm_bindgen(js_name = defaultConfig)]
pub fn default_config() -> Result<String, JsValue> {
    serde_json::to_string(&DotMatrixConfig::default()).map_err(js_error)
}
