//! Drawing abstraction
//!
//! Game code paints through the `Surface` trait so the core stays free of
//! platform types. The browser build backs it with a 2d canvas context;
//! tests and the native binary use `NullSurface`.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

/// One frame's worth of draw calls, issued back to front
pub trait Surface {
    /// Wipe the whole frame
    fn clear(&mut self);

    /// Filled disc
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str, alpha: f32);

    /// Filled disc with a soft shadow halo, used for spark particles
    fn fill_circle_glow(&mut self, center: Vec2, radius: f32, color: &str, alpha: f32, blur: f32);

    /// Bold centered text, sized in points
    fn fill_glyph(&mut self, center: Vec2, text: &str, size: f32, color: &str, alpha: f32);

    /// Regular-weight centered text, used for overlay copy
    fn fill_label(&mut self, center: Vec2, text: &str, size: f32, color: &str, alpha: f32);

    /// Open polyline through `points`
    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: &str, alpha: f32);

    /// Axis-aligned filled rectangle from its top-left corner
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: &str, alpha: f32);
}

/// Discards every draw call. Keeps headless runs and tests honest about
/// what the game loop does without a screen.
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self) {}
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: &str, _alpha: f32) {}
    fn fill_circle_glow(
        &mut self,
        _center: Vec2,
        _radius: f32,
        _color: &str,
        _alpha: f32,
        _blur: f32,
    ) {
    }
    fn fill_glyph(&mut self, _center: Vec2, _text: &str, _size: f32, _color: &str, _alpha: f32) {}
    fn fill_label(&mut self, _center: Vec2, _text: &str, _size: f32, _color: &str, _alpha: f32) {}
    fn stroke_polyline(&mut self, _points: &[Vec2], _width: f32, _color: &str, _alpha: f32) {}
    fn fill_rect(&mut self, _min: Vec2, _size: Vec2, _color: &str, _alpha: f32) {}
}
