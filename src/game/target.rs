//! Target entity and its per-frame animation state
//!
//! A target is one numbered disc. It owns three layered animations:
//! appearance (bounce-in scale + fade), the opening pulse that plays when a
//! target is revealed, and the particle burst fired at the moment the
//! opening pulse latches.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::render::Surface;
use crate::{ease_out_bounce, ease_out_cubic};

/// Particles spawned per opening burst
pub const PARTICLE_COUNT: usize = 12;
/// Burst particle speed range (pixels per animation step)
pub const PARTICLE_MIN_SPEED: f32 = 2.0;
pub const PARTICLE_MAX_SPEED: f32 = 5.0;
/// Burst particle lifespan range (ms)
pub const PARTICLE_MIN_LIFESPAN: f64 = 300.0;
pub const PARTICLE_MAX_LIFESPAN: f64 = 500.0;
/// Burst particle size range (pixels)
pub const PARTICLE_MIN_SIZE: f32 = 3.0;
pub const PARTICLE_MAX_SIZE: f32 = 7.0;
/// Maximum number of trail points to store per particle
pub const TRAIL_LENGTH: usize = 3;
/// Particle aging per tick (ms); particles advance in fixed steps
pub const PARTICLE_STEP_MS: f64 = 16.0;
/// Downward pull per step
pub const GRAVITY: f32 = 0.15;
/// Velocity damping per step
pub const FRICTION: f32 = 0.96;

/// What the target currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visual {
    /// Filled disc, number hidden
    Concealed,
    /// Numeric glyph visible
    Revealing,
}

/// A burst particle with a short motion trail
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Age in ms, stepped by `PARTICLE_STEP_MS` per tick
    pub age: f64,
    /// Total lifetime in ms, fixed at spawn
    pub lifespan: f64,
    pub size: f32,
    /// Recent positions, oldest first
    pub trail: Vec<Vec2>,
}

/// A numbered circular target
#[derive(Debug, Clone)]
pub struct Target {
    /// Position in the click order (0-based), also the displayed number
    pub id: usize,
    /// Center in surface coordinates
    pub pos: Vec2,
    pub radius: f32,
    pub glyph_size: f32,
    pub visual: Visual,
    pub disc_color: &'static str,
    pub glyph_color: &'static str,

    /// Appearance tween start; `None` until latched by the first tick
    pub appear_start: Option<f64>,
    /// Opening pulse start; `None` re-latches (and re-bursts) on next tick
    pub open_start: Option<f64>,
    /// Opening pulse armed
    pub opening: bool,
    /// Appearance scale, 0 -> 1 with a bounce
    pub scale: f32,
    /// Whole-target alpha, 0 -> 1
    pub opacity: f32,
    /// Glyph-only alpha, driven by the opening pulse
    pub glyph_opacity: f32,
    /// Glyph scale factor during the opening pulse
    pub open_scale: f32,
    /// Disc scale factor during the opening pulse
    pub pulse_scale: f32,

    pub particles: Vec<Particle>,
}

impl Target {
    /// Create a target at the given position, full initial size, revealed
    pub fn new(id: usize, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            radius: INITIAL_RADIUS,
            glyph_size: INITIAL_GLYPH_SIZE,
            visual: Visual::Revealing,
            disc_color: COLOR_DEFAULT,
            glyph_color: COLOR_DEFAULT,
            appear_start: None,
            open_start: None,
            opening: false,
            scale: 0.0,
            opacity: 0.0,
            glyph_opacity: 0.0,
            open_scale: 1.0,
            pulse_scale: 1.0,
            particles: Vec::new(),
        }
    }

    /// True if the point falls inside the disc
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance(point) <= self.radius
    }

    /// Advance all animations to `now`. Call once per tick, before rendering.
    pub fn advance(&mut self, now: f64, rng: &mut impl Rng) {
        let appear_start = *self.appear_start.get_or_insert(now);
        self.advance_appearance(now - appear_start);
        self.advance_opening(now, rng);
        self.advance_particles();
    }

    fn advance_appearance(&mut self, elapsed: f64) {
        if elapsed < APPEARANCE_MS {
            let progress = (elapsed / APPEARANCE_MS) as f32;
            self.scale = ease_out_bounce(progress);
            self.opacity = ease_out_cubic(progress);
        } else {
            self.scale = 1.0;
            self.opacity = 1.0;
        }
    }

    fn advance_opening(&mut self, now: f64, rng: &mut impl Rng) {
        if self.opening {
            let start = match self.open_start {
                Some(start) => start,
                None => {
                    // The pulse latches on its first tick, burst included
                    self.open_start = Some(now);
                    self.spawn_burst(rng);
                    now
                }
            };
            let elapsed = now - start;

            if elapsed < OPEN_PULSE_MS {
                let progress = (elapsed / OPEN_PULSE_MS) as f32;
                let pulse = (progress * std::f32::consts::TAU).sin() * 0.15;
                self.open_scale = 1.0 + pulse;
                self.pulse_scale = 1.0 + pulse * 0.5;
                self.glyph_opacity = ease_out_cubic((progress * 1.5).min(1.0));
            } else if elapsed < OPEN_PULSE_MS + OPEN_SETTLE_MS {
                let progress = ((elapsed - OPEN_PULSE_MS) / OPEN_SETTLE_MS) as f32;
                self.open_scale = 1.0 + 0.1 * (1.0 - progress);
                self.pulse_scale = 1.0;
                self.glyph_opacity = 1.0;
            } else {
                self.open_scale = 1.0;
                self.pulse_scale = 1.0;
                self.glyph_opacity = 1.0;
                self.opening = false;
                self.open_start = None;
            }
        } else if self.visual == Visual::Revealing {
            self.glyph_opacity = 1.0;
        }
    }

    /// One ring of particles radiating from the center, speeds randomized
    fn spawn_burst(&mut self, rng: &mut impl Rng) {
        for i in 0..PARTICLE_COUNT {
            let angle = std::f32::consts::TAU * i as f32 / PARTICLE_COUNT as f32;
            let speed = rng.random_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED);
            self.particles.push(Particle {
                pos: self.pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                age: 0.0,
                lifespan: rng.random_range(PARTICLE_MIN_LIFESPAN..PARTICLE_MAX_LIFESPAN),
                size: rng.random_range(PARTICLE_MIN_SIZE..PARTICLE_MAX_SIZE),
                trail: Vec::new(),
            });
        }
    }

    fn advance_particles(&mut self) {
        self.particles.retain_mut(|p| {
            p.age += PARTICLE_STEP_MS;
            p.pos += p.vel;
            p.vel.y += GRAVITY;
            p.vel *= FRICTION;

            p.trail.push(p.pos);
            if p.trail.len() > TRAIL_LENGTH {
                p.trail.remove(0);
            }

            p.age < p.lifespan
        });
    }

    /// Show the number and arm the opening pulse; clears any error tint.
    ///
    /// On the very first reveal the appearance tween is back-dated to
    /// completion so the target does not pop in from scale zero.
    pub fn reveal(&mut self, now: f64) {
        self.visual = Visual::Revealing;
        self.opening = true;
        self.open_start = None;
        self.disc_color = COLOR_DEFAULT;
        self.glyph_color = COLOR_DEFAULT;
        if self.appear_start.is_none() {
            self.appear_start = Some(now - APPEARANCE_MS);
        }
    }

    /// Forced reveal after a mistake: like `reveal` but tinted alert
    pub fn reveal_as_error(&mut self, now: f64) {
        self.reveal(now);
        self.disc_color = COLOR_ERROR;
        self.glyph_color = COLOR_ERROR;
    }

    /// Hide the number again. Live particles keep decaying.
    pub fn conceal(&mut self) {
        self.visual = Visual::Concealed;
        self.glyph_opacity = 0.0;
        self.opening = false;
    }

    /// Land every tween at its terminal state without animating.
    /// Used when no further frame will advance this target.
    pub fn finish_animation(&mut self) {
        self.opening = false;
        self.open_start = None;
        self.scale = 1.0;
        self.opacity = 1.0;
        self.glyph_opacity = 1.0;
        self.open_scale = 1.0;
        self.pulse_scale = 1.0;
    }

    /// Tint the disc alert without changing what is shown
    pub fn mark_error(&mut self) {
        self.disc_color = COLOR_ERROR;
    }

    /// Back to the default tint
    pub fn clear_error(&mut self) {
        self.disc_color = COLOR_DEFAULT;
        self.glyph_color = COLOR_DEFAULT;
    }

    /// Lose one size step, floored at the minimums
    pub fn shrink(&mut self) {
        self.glyph_size = (self.glyph_size - SHRINK_STEP).max(MIN_GLYPH_SIZE);
        self.radius = (self.radius - SHRINK_STEP).max(MIN_RADIUS);
    }

    /// Forget all animation progress so the next tick starts fresh
    pub fn reset_animation(&mut self) {
        self.appear_start = None;
        self.open_start = None;
        self.scale = 0.0;
        self.opacity = 0.0;
        self.glyph_opacity = 0.0;
        self.opening = false;
        self.open_scale = 1.0;
        self.pulse_scale = 1.0;
        self.particles.clear();
    }

    /// Draw the target and its particles. Pure; no state changes.
    pub fn render(&self, surface: &mut dyn Surface) {
        match self.visual {
            Visual::Concealed => {
                surface.fill_circle(
                    self.pos,
                    self.radius * self.scale * self.pulse_scale,
                    self.disc_color,
                    self.opacity,
                );
            }
            Visual::Revealing => {
                surface.fill_glyph(
                    self.pos,
                    &self.id.to_string(),
                    self.glyph_size * self.scale * self.open_scale,
                    self.glyph_color,
                    self.opacity * self.glyph_opacity,
                );
            }
        }
        self.render_particles(surface);
    }

    fn render_particles(&self, surface: &mut dyn Surface) {
        for p in &self.particles {
            let progress = (p.age / p.lifespan) as f32;
            let alpha = 1.0 - progress;
            let size = p.size * (1.0 - progress * 0.3);

            if p.trail.len() > 1 {
                surface.stroke_polyline(&p.trail, 2.0, COLOR_PARTICLE, alpha * 0.3);
            }

            // Spark with a wider faint halo, both shadowed
            surface.fill_circle_glow(p.pos, size, COLOR_PARTICLE, alpha, 8.0);
            surface.fill_circle_glow(p.pos, size * 1.5, COLOR_PARTICLE, alpha * 0.4, 8.0);
        }
    }
}
