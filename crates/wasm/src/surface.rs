//! [`DrawSurface`] over a 2D canvas context.

use backdrop_core::{DrawSurface, Rgba, Viewport};
use glam::DVec2;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Draws into an `HtmlCanvasElement` in CSS pixels.
///
/// The backing store is sized to `devicePixelRatio` times the viewport so
/// particles stay crisp on high-density screens.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    viewport: Viewport,
}

fn device_pixel_ratio() -> f64 {
    web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .filter(|dpr| *dpr > 0.0)
        .unwrap_or(1.0)
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("not a 2d context"))?;
        Ok(Self {
            canvas,
            ctx,
            viewport: Viewport::new(0.0, 0.0),
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.viewport.width(), self.viewport.height());
    }

    fn resize(&mut self, viewport: Viewport) {
        let dpr = device_pixel_ratio();
        self.viewport = viewport;
        self.canvas.set_width((viewport.width() * dpr).round() as u32);
        self.canvas.set_height((viewport.height() * dpr).round() as u32);
        // Setting the size resets the transform; draw in CSS pixels again.
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU);
        self.ctx.fill();
    }

    fn line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }
}
