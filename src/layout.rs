//! Mapping the normalized board onto pixels and drawing it.
//!
//! Drawing goes through the [`Surface`] trait so the geometry can be checked
//! natively; the browser implementation lives in `web::canvas`.

use tracing::trace;

use crate::config::RenderConfig;
use crate::grid::{Board, Cell};
use crate::sequencer::ActiveSet;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellStyle {
    Idle,
    Active,
}

/// Drawing capability the renderer needs.
pub trait Surface {
    fn clear(&mut self, viewport: Viewport);
    /// Stretch the board picture (if any) over the viewport.
    fn draw_background(&mut self, viewport: Viewport);
    fn rounded_rect(&mut self, rect: PixelRect, radius: f64, style: CellStyle);
    /// Width in pixels of `text` at `font_px`.
    fn measure_text(&mut self, text: &str, font_px: f64) -> f64;
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_px: f64);
}

/// Where one cell lands on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellLayout {
    pub rect: PixelRect,
    pub center: (f64, f64),
    pub radius: f64,
}

pub struct LayoutRenderer {
    config: RenderConfig,
}

impl LayoutRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    /// `cell * (viewport - 2*margin) + padding + margin` per axis, shrunk by
    /// the padding on both sides.
    pub fn cell_layout(&self, cell: &Cell, viewport: Viewport) -> CellLayout {
        let mx = self.config.border_ratio * viewport.width;
        let my = self.config.border_ratio * viewport.height;
        let px = self.config.padding_ratio * viewport.width;
        let py = self.config.padding_ratio * viewport.height;
        let inner_w = viewport.width - 2.0 * mx;
        let inner_h = viewport.height - 2.0 * my;

        let [x, y, width, height] = cell.scaled_size(inner_w, inner_h, px, py);
        let (cx, cy) = cell.scaled_center(inner_w, inner_h);
        let rect = PixelRect {
            x: x + mx,
            y: y + my,
            width,
            height,
        };
        let radius = (px * 2.0).min(width.min(height) / 2.0).max(0.0);
        CellLayout {
            rect,
            center: (cx + mx, cy + my),
            radius,
        }
    }

    pub fn draw<S: Surface>(
        &self,
        surface: &mut S,
        board: &Board,
        active: &ActiveSet,
        viewport: Viewport,
    ) {
        surface.clear(viewport);
        surface.draw_background(viewport);
        for (i, cell) in board.cells().iter().enumerate() {
            let layout = self.cell_layout(cell, viewport);
            let style = if active.contains(i) {
                CellStyle::Active
            } else {
                CellStyle::Idle
            };
            surface.rounded_rect(layout.rect, layout.radius, style);

            let label = i.to_string();
            let (font_px, text_width) =
                fit_text(layout.rect, |px| surface.measure_text(&label, px));
            surface.fill_text(
                &label,
                layout.center.0 - text_width / 2.0,
                layout.center.1 + font_px / 4.0,
                font_px,
            );
        }
        trace!(cells = board.size(), active = active.len(), "board drawn");
    }
}

/// Font size for a label inside `rect`: 60% of the cell height, scaled down
/// once so the text takes at most 80% of the cell width. Returns the font size
/// and the measured text width at that size.
pub fn fit_text(rect: PixelRect, mut measure: impl FnMut(f64) -> f64) -> (f64, f64) {
    let mut font_px = rect.height * 0.6;
    let mut width = measure(font_px);
    let max_width = rect.width * 0.8;
    if width > max_width && width > 0.0 {
        font_px *= max_width / width;
        width = measure(font_px);
    }
    (font_px, width)
}
