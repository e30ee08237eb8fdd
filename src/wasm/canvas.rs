use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::Rgba;
use crate::surface::Surface;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// `Ok(None)` when the canvas has no 2d context to give.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Option<Self>, JsValue> {
        let ctx = match canvas.get_context("2d")? {
            Some(obj) => obj.dyn_into::<CanvasRenderingContext2d>().ok(),
            None => None,
        };
        Ok(ctx.map(|ctx| Self { canvas, ctx }))
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    pub fn height(&self) -> f64 {
        self.canvas.height() as f64
    }
}

impl Surface for CanvasSurface {
    fn fill_background(&mut self, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(0.0, 0.0, self.width(), self.height());
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width(), self.height());
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba, glow: f64) {
        if !(radius > 0.0) || !x.is_finite() || !y.is_finite() {
            return;
        }
        let css = color.to_css();
        self.ctx.begin_path();
        if self.ctx.arc(x, y, radius, 0.0, TAU).is_err() {
            return;
        }
        self.ctx.set_fill_style_str(&css);
        if glow > 0.0 {
            self.ctx.set_shadow_color(&css);
            self.ctx.set_shadow_blur(glow);
        }
        self.ctx.fill();
        if glow > 0.0 {
            self.ctx.set_shadow_blur(0.0);
        }
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, width: f64) {
        self.ctx.begin_path();
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }

    fn polyline(&mut self, points: &[(f64, f64)], start: Rgba, end: Rgba, width: f64) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, self.width(), 0.0);
        if gradient.add_color_stop(0.0, &start.to_css()).is_err()
            || gradient.add_color_stop(1.0, &end.to_css()).is_err()
        {
            return;
        }
        self.ctx.set_stroke_style_canvas_gradient(&gradient);
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(first.0, first.1);
        for &(x, y) in rest {
            self.ctx.line_to(x, y);
        }
        self.ctx.stroke();
    }
}
