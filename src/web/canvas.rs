// Canvas 2D implementation of the board drawing surface.
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::config::RenderConfig;
use crate::layout::{CellStyle, PixelRect, Surface, Viewport};

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    image: HtmlImageElement,
    config: RenderConfig,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, image: HtmlImageElement, config: RenderConfig) -> Self {
        Self { ctx, image, config }
    }

    fn trace_rounded_rect(&self, r: PixelRect, radius: f64) -> Result<(), JsValue> {
        let (x, y, w, h) = (r.x, r.y, r.width, r.height);
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x, y + radius);
        ctx.line_to(x, y + h - radius);
        ctx.arc_to(x, y + h, x + radius, y + h, radius)?;
        ctx.line_to(x + w - radius, y + h);
        ctx.arc_to(x + w, y + h, x + w, y + h - radius, radius)?;
        ctx.line_to(x + w, y + radius);
        ctx.arc_to(x + w, y, x + w - radius, y, radius)?;
        ctx.line_to(x + radius, y);
        ctx.arc_to(x, y, x, y + radius, radius)?;
        ctx.close_path();
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, viewport: Viewport) {
        self.ctx
            .clear_rect(0.0, 0.0, viewport.width, viewport.height);
    }

    fn draw_background(&mut self, viewport: Viewport) {
        // An image without a loaded source has no natural size; skip it.
        if !self.image.complete() || self.image.natural_width() == 0 {
            return;
        }
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                &self.image,
                0.0,
                0.0,
                viewport.width,
                viewport.height,
            )
            .ok();
    }

    fn rounded_rect(&mut self, rect: PixelRect, radius: f64, style: CellStyle) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        if self.trace_rounded_rect(rect, radius).is_err() {
            return;
        }
        if style == CellStyle::Active {
            self.ctx.set_fill_style_str(&self.config.active_fill_style);
            self.ctx.fill();
        }
        self.ctx.set_stroke_style_str(&self.config.stroke_style);
        self.ctx.set_line_width(2.0);
        self.ctx.stroke();
    }

    fn measure_text(&mut self, text: &str, font_px: f64) -> f64 {
        self.ctx.set_font(&self.config.font(font_px));
        self.ctx
            .measure_text(text)
            .map(|m| m.width())
            .unwrap_or(0.0)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_px: f64) {
        self.ctx.set_font(&self.config.font(font_px));
        self.ctx.set_fill_style_str(&self.config.text_style);
        self.ctx.fill_text(text, x, y).ok();
    }
}
