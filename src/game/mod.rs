//! Deterministic game logic module
//!
//! All gameplay state lives here. This module must be pure and deterministic:
//! - Driven only by timestamps handed to `on_tick`/`on_click`
//! - Seeded RNG only
//! - Stable iteration order (targets sorted by id)
//! - No rendering or platform dependencies beyond the `Surface` trait

pub mod placement;
pub mod round;
pub mod target;

pub use placement::{overlaps_any, place_all, random_axis, random_position};
pub use round::{GameEvent, Phase, RoundController};
pub use target::{Particle, Target, Visual};
