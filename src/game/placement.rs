//! Random target placement with overlap avoidance
//!
//! Pure helpers shared by round setup, the post-round mix, and resize
//! reclamping. Placement is best-effort: past the attempt cap the last
//! sample is accepted even if it overlaps.

use glam::Vec2;
use rand::Rng;

use crate::consts::MAX_PLACEMENT_ATTEMPTS;
use crate::game::target::Target;

/// Uniform sample along one axis keeping the disc fully inside `extent`.
/// Collapses to the near edge when the extent is smaller than one diameter.
pub fn random_axis(extent: f32, radius: f32, rng: &mut impl Rng) -> f32 {
    let hi = extent - radius;
    if hi > radius {
        rng.random_range(radius..hi)
    } else {
        radius
    }
}

/// Uniform in-bounds sample for a disc of the given radius
pub fn random_position(bounds: Vec2, radius: f32, rng: &mut impl Rng) -> Vec2 {
    Vec2::new(
        random_axis(bounds.x, radius, rng),
        random_axis(bounds.y, radius, rng),
    )
}

/// True if a disc at `pos` would touch any disc of the same radius at `others`
pub fn overlaps_any(pos: Vec2, radius: f32, others: &[Vec2]) -> bool {
    others.iter().any(|&other| pos.distance(other) < radius * 2.0)
}

/// Assign a fresh position to every target, checking each sample against the
/// positions already placed in this pass. Targets are visited in id order so
/// the result is deterministic for a given RNG state.
pub fn place_all(targets: &mut [Target], bounds: Vec2, rng: &mut impl Rng) {
    let mut placed: Vec<Vec2> = Vec::with_capacity(targets.len());
    for target in targets.iter_mut() {
        let mut pos = random_position(bounds, target.radius, rng);
        let mut attempts = 1;
        while overlaps_any(pos, target.radius, &placed) && attempts < MAX_PLACEMENT_ATTEMPTS {
            pos = random_position(bounds, target.radius, rng);
            attempts += 1;
        }
        target.pos = pos;
        placed.push(pos);
    }
}
