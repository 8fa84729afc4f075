//! Resize-driven dot lattice and grid-to-image coordinate mapping.
//!
//! A [`DotGrid`] divides the drawing surface into square cells of
//! `spacing` pixels (`columns = ceil(width / spacing)`, likewise rows) and
//! knows how each cell maps onto the loaded images. Mapping uses an
//! aspect-preserving center crop ([`CropMap`]) so the image always covers
//! the whole mapped area with equal margins cut from its longer axis.
//!
//! In dual-image mode a centered [`SubjectRect`] (in cell units) carves out
//! the cells that sample the subject image instead of the background.

use glam::DVec2;
use tracing::{debug, warn};

use crate::image::clamp_index;

/// Which image a cell samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Background,
    Subject,
}

impl Region {
    /// Slot of this region in per-region arrays.
    pub fn index(self) -> usize {
        match self {
            Region::Background => 0,
            Region::Subject => 1,
        }
    }
}

/// Scale and offset mapping a rectangular area of cells onto an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropMap {
    /// Grid-space origin of the mapped area.
    origin: DVec2,
    /// Image pixels per cell.
    scale: f64,
    /// Pixels cropped from the left and top edges of the image.
    offset: DVec2,
    source_width: usize,
    source_height: usize,
}

impl CropMap {
    /// Fits an `area_width x area_height` block of cells, starting at
    /// `origin`, onto a `source_width x source_height` image.
    ///
    /// If the image is relatively wider than the area it is scaled by height
    /// and cropped horizontally, otherwise scaled by width and cropped
    /// vertically. A degenerate area maps every cell to pixel `(0, 0)`.
    pub fn fit(
        origin: DVec2,
        area_width: f64,
        area_height: f64,
        source_width: usize,
        source_height: usize,
    ) -> Self {
        let (sw, sh) = (source_width as f64, source_height as f64);
        let (scale, offset) = if !(area_width > 0.0 && area_height > 0.0) {
            (0.0, DVec2::ZERO)
        } else if sw / sh > area_width / area_height {
            let scale = sh / area_height;
            (scale, DVec2::new((sw - area_width * scale) / 2.0, 0.0))
        } else {
            let scale = sw / area_width;
            (scale, DVec2::new(0.0, (sh - area_height * scale) / 2.0))
        };
        Self {
            origin,
            scale,
            offset,
            source_width,
            source_height,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Pixels cropped from each side, as `(horizontal, vertical)`.
    pub fn margins(&self) -> (f64, f64) {
        (self.offset.x, self.offset.y)
    }

    /// Fractional image coordinate under the center of cell `(x, y)`.
    pub fn project(&self, x: f64, y: f64) -> DVec2 {
        self.offset + (DVec2::new(x, y) - self.origin + 0.5) * self.scale
    }

    /// Nearest pixel under the center of cell `(x, y)`, clamped to the image.
    pub fn map(&self, x: f64, y: f64) -> (usize, usize) {
        let p = self.project(x, y);
        (
            clamp_index(p.x, self.source_width),
            clamp_index(p.y, self.source_height),
        )
    }
}

/// How the subject image is placed in dual-image mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectLayout {
    /// Subject width as a fraction of the grid's column count.
    pub size_fraction: f64,
    pub source_width: usize,
    pub source_height: usize,
}

/// Centered inset rectangle, in cell units, covered by the subject image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SubjectRect {
    /// Width is `size_fraction * columns`, height follows the subject's aspect.
    pub fn centered(columns: usize, rows: usize, layout: &SubjectLayout) -> Self {
        let aspect = layout.source_width as f64 / layout.source_height as f64;
        let width = layout.size_fraction * columns as f64;
        let height = width / aspect;
        Self {
            left: (columns as f64 - width) / 2.0,
            top: (rows as f64 - height) / 2.0,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Half-open containment: `[left, right) x [top, bottom)`.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }
}

/// The dot lattice for one surface size.
///
/// Rebuilt in full by [`DotGrid::resize`]; nothing from the previous size
/// survives. An empty grid (zero columns or rows) draws nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct DotGrid {
    spacing: f64,
    surface_width: usize,
    surface_height: usize,
    columns: usize,
    rows: usize,
    center: DVec2,
    max_distance: f64,
    background_source: (usize, usize),
    background_map: CropMap,
    subject_layout: Option<SubjectLayout>,
    subject: Option<(SubjectRect, CropMap)>,
}

impl DotGrid {
    /// Creates an empty grid; call [`DotGrid::resize`] before drawing.
    pub fn new(
        spacing: f64,
        background_source: (usize, usize),
        subject_layout: Option<SubjectLayout>,
    ) -> Self {
        let mut grid = Self {
            spacing,
            surface_width: 0,
            surface_height: 0,
            columns: 0,
            rows: 0,
            center: DVec2::ZERO,
            max_distance: 0.0,
            background_source,
            background_map: CropMap::fit(
                DVec2::ZERO,
                0.0,
                0.0,
                background_source.0,
                background_source.1,
            ),
            subject_layout,
            subject: None,
        };
        grid.resize(0, 0);
        grid
    }

    /// Recomputes the lattice for a `width x height` pixel surface.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.surface_width = width;
        self.surface_height = height;
        self.columns = cell_count(width, self.spacing);
        self.rows = cell_count(height, self.spacing);
        self.center = DVec2::new(self.columns as f64 / 2.0, self.rows as f64 / 2.0);
        self.max_distance = self.center.length();

        let (cols, rows) = (self.columns as f64, self.rows as f64);
        let (bw, bh) = self.background_source;
        self.background_map = CropMap::fit(DVec2::ZERO, cols, rows, bw, bh);
        self.subject = self.subject_layout.map(|layout| {
            let rect = SubjectRect::centered(self.columns, self.rows, &layout);
            let map = CropMap::fit(
                DVec2::new(rect.left, rect.top),
                rect.width,
                rect.height,
                layout.source_width,
                layout.source_height,
            );
            (rect, map)
        });

        if self.is_empty() && (width > 0 || height > 0) {
            warn!(width, height, "degenerate surface, grid is empty");
        }
        debug!(
            width,
            height,
            columns = self.columns,
            rows = self.rows,
            max_distance = self.max_distance,
            "dot grid recomputed"
        );
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn center(&self) -> DVec2 {
        self.center
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// The pixel size this grid was computed for.
    pub fn surface_size(&self) -> (usize, usize) {
        (self.surface_width, self.surface_height)
    }

    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }

    pub fn subject_rect(&self) -> Option<&SubjectRect> {
        self.subject.as_ref().map(|(rect, _)| rect)
    }

    pub fn background_map(&self) -> &CropMap {
        &self.background_map
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.columns).map(move |x| (x, y)))
    }

    /// Distance of cell `(x, y)` from the grid center divided by the largest
    /// such distance; 0 for a grid with no extent.
    pub fn normalized_distance(&self, x: usize, y: usize) -> f64 {
        if self.max_distance <= 0.0 {
            return 0.0;
        }
        DVec2::new(x as f64, y as f64).distance(self.center) / self.max_distance
    }

    /// Surface pixel position of the center of cell `(x, y)`.
    pub fn cell_center_px(&self, x: usize, y: usize) -> (f64, f64) {
        (
            (x as f64 + 0.5) * self.spacing,
            (y as f64 + 0.5) * self.spacing,
        )
    }

    /// Which image cell `(x, y)` samples.
    pub fn region(&self, x: usize, y: usize) -> Region {
        match &self.subject {
            Some((rect, _)) if rect.contains(x as f64, y as f64) => Region::Subject,
            _ => Region::Background,
        }
    }

    /// Region and source pixel for cell `(x, y)`, using the precomputed maps.
    pub fn locate(&self, x: usize, y: usize) -> (Region, (usize, usize)) {
        let (fx, fy) = (x as f64, y as f64);
        match &self.subject {
            Some((rect, map)) if rect.contains(fx, fy) => (Region::Subject, map.map(fx, fy)),
            _ => (Region::Background, self.background_map.map(fx, fy)),
        }
    }

    /// Center-crop mapping of cell `(x, y)` over the full grid onto an
    /// arbitrary `source_width x source_height` image.
    pub fn map_to_image(
        &self,
        x: usize,
        y: usize,
        source_width: usize,
        source_height: usize,
    ) -> (usize, usize) {
        CropMap::fit(
            DVec2::ZERO,
            self.columns as f64,
            self.rows as f64,
            source_width,
            source_height,
        )
        .map(x as f64, y as f64)
    }
}

/// `ceil(length / spacing)`, or 0 when either side is unusable.
fn cell_count(length: usize, spacing: f64) -> usize {
    if length == 0 || !(spacing > 0.0) || !spacing.is_finite() {
        return 0;
    }
    (length as f64 / spacing).ceil() as usize
}
