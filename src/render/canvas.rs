//! Canvas-backed `Surface` for the browser build

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::render::Surface;

/// Draws through a `CanvasRenderingContext2d`
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2d context of `canvas`. Text stays centered on both
    /// axes for the lifetime of the surface.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        Ok(Self { canvas, ctx })
    }

    fn fill_text(&self, center: Vec2, text: &str, font: &str, color: &str, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_fill_style_str(color);
        self.ctx.set_font(font);
        self.ctx
            .fill_text(text, center.x as f64, center.y as f64)
            .ok();
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        self.ctx
            .arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            )
            .ok();
        self.ctx.fill();
    }

    fn fill_circle_glow(&mut self, center: Vec2, radius: f32, color: &str, alpha: f32, blur: f32) {
        self.ctx.save();
        self.ctx.set_shadow_blur(blur as f64);
        self.ctx.set_shadow_color(color);
        self.fill_circle(center, radius, color, alpha);
        self.ctx.restore();
    }

    fn fill_glyph(&mut self, center: Vec2, text: &str, size: f32, color: &str, alpha: f32) {
        self.fill_text(center, text, &format!("bold {size}pt Roboto"), color, alpha);
    }

    fn fill_label(&mut self, center: Vec2, text: &str, size: f32, color: &str, alpha: f32) {
        self.fill_text(center, text, &format!("{size}pt Roboto"), color, alpha);
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: &str, alpha: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.stroke();
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: &str, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
    }
}
