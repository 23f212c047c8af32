//! Memory Dots - a numbered-targets memory game
//!
//! Core modules:
//! - `game`: Deterministic game logic (targets, animation, round progression)
//! - `render`: Draw-primitive surface abstraction (Canvas2D on wasm)
//! - `audio`: Web Audio tone synthesis for click feedback
//! - `records`: Best-level persistence

pub mod audio;
pub mod game;
pub mod records;
pub mod render;

pub use game::{GameEvent, Phase, RoundController};
pub use records::Records;

/// Game configuration constants
pub mod consts {
    /// Target disc radius at level 1 (pixels)
    pub const INITIAL_RADIUS: f32 = 120.0;
    /// Target glyph size at level 1 (points)
    pub const INITIAL_GLYPH_SIZE: f32 = 130.0;
    /// Radius floor - shrinking never goes below this
    pub const MIN_RADIUS: f32 = 30.0;
    /// Glyph size floor
    pub const MIN_GLYPH_SIZE: f32 = 30.0;
    /// Size lost per completed round
    pub const SHRINK_STEP: f32 = 3.0;

    /// Appearance tween length (bounce-in scale, fade-in opacity)
    pub const APPEARANCE_MS: f64 = 400.0;
    /// Sinusoidal pulse phase of the opening animation
    pub const OPEN_PULSE_MS: f64 = 400.0;
    /// Settle phase that eases the pulse back to rest
    pub const OPEN_SETTLE_MS: f64 = 200.0;

    /// Delay before a freshly mixed round is concealed
    pub const CONCEAL_DELAY_MS: f64 = 1000.0;
    /// Stagger between forced error reveals after a wrong click
    pub const REVEAL_STAGGER_MS: f64 = 100.0;
    /// Wrong click to game-over transition
    pub const GAME_OVER_DELAY_MS: f64 = 800.0;
    /// Game-over transition to overlay
    pub const GAME_OVER_SCREEN_DELAY_MS: f64 = 500.0;

    /// Placement retries per target before accepting an overlap
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

    /// Disc and glyph color
    pub const COLOR_DEFAULT: &str = "#E0E0E0";
    /// Alert tint for wrong clicks and forced reveals
    pub const COLOR_ERROR: &str = "#B00020";
    /// Burst particle color
    pub const COLOR_PARTICLE: &str = "#FFFFFF";
}

/// Cubic ease-out: fast start, gentle stop
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Bounce ease-out: overshoots and rebounds like a dropped ball
#[inline]
pub fn ease_out_bounce(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}
