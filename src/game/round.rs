//! Round progression and click matching
//!
//! `RoundController` owns the targets plus the phase machine that ties
//! clicks, deferred actions, and per-frame animation together. It never
//! touches the platform: timestamps come in through `on_tick`/`on_click`,
//! draw calls go out through `Surface`, and sounds are requested through
//! the drained `GameEvent` queue.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::game::placement;
use crate::game::target::{Target, Visual};
use crate::records::Records;
use crate::render::Surface;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting clicks
    Playing,
    /// Frozen frame, clicks ignored
    Paused,
    /// Run ended; any click restarts
    GameOver,
}

/// Things the adapter reacts to (sounds, HUD refresh, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The expected target was clicked
    Correct { id: usize },
    /// A wrong target was clicked; the run is ending
    Wrong { id: usize },
    /// A round finished and the next one is laid out
    RoundComplete { level: u32 },
    /// The run ended after `completed` rounds
    GameOver { completed: u32 },
    /// Fresh round after an explicit restart
    Restarted,
}

/// One-shot action fired by the tick clock
#[derive(Debug, Clone, Copy, PartialEq)]
struct Deferred {
    fire_at: f64,
    /// Entries from a superseded round never fire
    epoch: u64,
    action: Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    /// End of the memorize window: hide every number
    ConcealAll,
    /// Force-reveal one target with the alert tint
    RevealAsError { id: usize },
    /// Playing -> GameOver
    EnterGameOver,
}

/// Owns the targets and drives a full run of the game
#[derive(Debug)]
pub struct RoundController {
    /// Targets sorted by id; id doubles as the click order
    pub targets: Vec<Target>,
    /// Id the player must click next; resets to 0 each round
    pub expected_next: usize,
    /// Completed rounds + 1
    pub level: u32,
    pub phase: Phase,
    /// Current surface size
    pub bounds: Vec2,
    pub records: Records,
    rng: Pcg32,
    deferred: Vec<Deferred>,
    epoch: u64,
    /// Timestamp of the most recent tick; the clock used for clicks
    last_now: f64,
    /// When the game-over transition fired (gates the overlay)
    game_over_at: f64,
    events: Vec<GameEvent>,
}

impl RoundController {
    /// Start a run: one target, memorize window already counting down
    pub fn new(bounds: Vec2, seed: u64, records: Records, now: f64) -> Self {
        let mut controller = Self {
            targets: Vec::new(),
            expected_next: 0,
            level: 1,
            phase: Phase::Playing,
            bounds,
            records,
            rng: Pcg32::seed_from_u64(seed),
            deferred: Vec::new(),
            epoch: 0,
            last_now: now,
            game_over_at: 0.0,
            events: Vec::new(),
        };
        controller.spawn_initial_target();
        controller
    }

    fn spawn_initial_target(&mut self) {
        let pos = placement::random_position(self.bounds, INITIAL_RADIUS, &mut self.rng);
        self.targets.push(Target::new(0, pos));
        self.schedule(CONCEAL_DELAY_MS, Action::ConcealAll);
    }

    fn schedule(&mut self, delay: f64, action: Action) {
        self.deferred.push(Deferred {
            fire_at: self.last_now + delay,
            epoch: self.epoch,
            action,
        });
    }

    /// Advance and repaint one frame. All Targets advance before any renders.
    pub fn on_tick(&mut self, now: f64, surface: &mut dyn Surface) {
        self.last_now = now;
        self.drain_deferred(now);

        surface.clear();
        match self.phase {
            Phase::Playing => {
                for target in &mut self.targets {
                    target.advance(now, &mut self.rng);
                }
                for target in &self.targets {
                    target.render(surface);
                }
            }
            Phase::Paused | Phase::GameOver => {
                // Frozen frame: repaint without advancing
                for target in &self.targets {
                    target.render(surface);
                }
                if self.phase == Phase::GameOver
                    && now - self.game_over_at >= GAME_OVER_SCREEN_DELAY_MS
                {
                    self.render_game_over(surface);
                }
            }
        }
    }

    fn drain_deferred(&mut self, now: f64) {
        let epoch = self.epoch;
        let mut due: Vec<Deferred> = Vec::new();
        self.deferred.retain(|entry| {
            if entry.epoch != epoch {
                return false;
            }
            if entry.fire_at <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at));
        for entry in due {
            self.apply(entry.action, now);
        }
    }

    fn apply(&mut self, action: Action, now: f64) {
        match action {
            Action::ConcealAll => {
                // A conceal landing after the run ended would hide the
                // revealed order on the frozen frame
                if self.phase != Phase::GameOver {
                    for target in &mut self.targets {
                        target.conceal();
                    }
                }
            }
            Action::RevealAsError { id } => {
                if let Some(target) = self.targets.iter_mut().find(|t| t.id == id) {
                    target.reveal_as_error(now);
                    // A reveal landing after the run ended gets no more
                    // frames to play its pulse
                    if self.phase == Phase::GameOver {
                        target.finish_animation();
                    }
                }
            }
            Action::EnterGameOver => self.enter_game_over(now),
        }
    }

    fn enter_game_over(&mut self, now: f64) {
        self.phase = Phase::GameOver;
        self.game_over_at = now;

        // Reveals still queued happen instantly so the frozen final frame
        // shows the complete order; every other pending action is dead
        // once the run is over
        let pending: Vec<usize> = self
            .deferred
            .iter()
            .filter_map(|entry| match entry.action {
                Action::RevealAsError { id } => Some(id),
                _ => None,
            })
            .collect();
        self.deferred.clear();
        for id in pending {
            self.apply(Action::RevealAsError { id }, now);
        }
        // Reveals armed earlier in this frame and targets the mix left
        // unticked have no frames left to fade in; land them
        for target in &mut self.targets {
            if target.appear_start.is_none() || (target.opening && target.open_start.is_none()) {
                target.finish_animation();
            }
        }

        let completed = self.level - 1;
        self.events.push(GameEvent::GameOver { completed });
        log::info!("Game over after {completed} completed rounds");
    }

    fn render_game_over(&self, surface: &mut dyn Surface) {
        let center = self.bounds * 0.5;
        surface.fill_rect(Vec2::ZERO, self.bounds, "#000000", 0.85);
        surface.fill_label(
            center + Vec2::new(0.0, -30.0),
            &(self.level - 1).to_string(),
            48.0,
            "#FFFFFF",
            1.0,
        );
        surface.fill_label(
            center + Vec2::new(0.0, 60.0),
            "Click to continue",
            18.0,
            "#FFFFFF",
            0.6,
        );
    }

    /// Handle a click at surface coordinates
    pub fn on_click(&mut self, point: Vec2) {
        match self.phase {
            Phase::GameOver => {
                self.restart();
                return;
            }
            Phase::Paused => return,
            Phase::Playing => {}
        }

        // Topmost disc wins: scan in reverse insertion order
        let clicked = self
            .targets
            .iter()
            .rev()
            .find(|t| t.contains(point))
            .map(|t| t.id);

        if let Some(id) = clicked {
            if id == self.expected_next {
                self.correct_click(id);
            } else {
                self.wrong_click(id);
            }
        }
    }

    fn correct_click(&mut self, id: usize) {
        let now = self.last_now;
        if let Some(target) = self.targets.iter_mut().find(|t| t.id == id) {
            target.reveal(now);
        }
        self.events.push(GameEvent::Correct { id });
        self.expected_next += 1;

        if self.expected_next == self.targets.len() {
            self.complete_round();
        }
    }

    fn complete_round(&mut self) {
        self.expected_next = 0;
        self.level += 1;

        // Append the next target; its position is provisional because the
        // mix below repositions the whole round
        let id = self.targets.len();
        let radius = self.targets.first().map_or(INITIAL_RADIUS, |t| t.radius);
        let pos = placement::random_position(self.bounds, radius, &mut self.rng);
        self.targets.push(Target::new(id, pos));

        self.shrink_all();
        self.mix();

        let completed = self.level - 1;
        if self.records.note_level(completed) {
            self.records.save();
            log::info!("New best: {completed} rounds");
        }
        self.events.push(GameEvent::RoundComplete { level: self.level });
        log::info!("Round complete, now at level {}", self.level);
    }

    /// Target 0 shrinks one step; everyone else copies its size so the
    /// round stays uniform
    fn shrink_all(&mut self) {
        if self.targets.is_empty() {
            return;
        }
        self.targets[0].shrink();
        let radius = self.targets[0].radius;
        let glyph_size = self.targets[0].glyph_size;
        for target in self.targets.iter_mut().skip(1) {
            target.radius = radius;
            target.glyph_size = glyph_size;
        }
    }

    /// Reposition everything without overlap, wipe tints and animation
    /// state, and start a fresh memorize window
    fn mix(&mut self) {
        placement::place_all(&mut self.targets, self.bounds, &mut self.rng);
        for target in &mut self.targets {
            target.clear_error();
            target.reset_animation();
        }
        self.schedule(CONCEAL_DELAY_MS, Action::ConcealAll);
    }

    fn wrong_click(&mut self, id: usize) {
        if let Some(target) = self.targets.iter_mut().find(|t| t.id == id) {
            target.mark_error();
        }
        self.events.push(GameEvent::Wrong { id });
        log::info!(
            "Wrong click on {id} (expected {}), level {}",
            self.expected_next,
            self.level
        );

        // Walk the player through the rest of the order, then end the run.
        // Already-revealed targets keep their normal look.
        let concealed: Vec<usize> = self
            .targets
            .iter()
            .filter(|t| t.visual == Visual::Concealed && t.id >= self.expected_next)
            .map(|t| t.id)
            .collect();
        let mut delay = 0.0;
        for id in concealed {
            self.schedule(delay, Action::RevealAsError { id });
            delay += REVEAL_STAGGER_MS;
        }
        self.schedule(GAME_OVER_DELAY_MS, Action::EnterGameOver);
    }

    /// Back to a fresh single-target round; the best level survives
    pub fn restart(&mut self) {
        self.epoch += 1;
        self.deferred.clear();
        self.targets.clear();
        self.expected_next = 0;
        self.level = 1;
        self.phase = Phase::Playing;
        self.spawn_initial_target();
        self.events.push(GameEvent::Restarted);
        log::info!("Restarted");
    }

    /// Track the new surface size; targets stranded past the right or
    /// bottom edge get a fresh in-bounds coordinate on that axis
    pub fn on_resize(&mut self, bounds: Vec2) {
        self.bounds = bounds;
        let rng = &mut self.rng;
        for target in &mut self.targets {
            if target.pos.x > bounds.x {
                target.pos.x = placement::random_axis(bounds.x, target.radius, rng);
            }
            if target.pos.y > bounds.y {
                target.pos.y = placement::random_axis(bounds.y, target.radius, rng);
            }
        }
    }

    /// Playing -> Paused, used by auto-pause when the tab goes hidden
    pub fn pause(&mut self) {
        if self.phase == Phase::Playing {
            self.phase = Phase::Paused;
        }
    }

    /// Manual pause toggle; ignored once the run is over
    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Playing => {
                self.phase = Phase::Paused;
                log::info!("Paused");
            }
            Phase::Paused => {
                self.phase = Phase::Playing;
                log::info!("Resumed");
            }
            Phase::GameOver => {}
        }
    }

    /// Take the events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullSurface;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn controller() -> RoundController {
        RoundController::new(BOUNDS, 12345, Records::default(), 0.0)
    }

    fn tick(c: &mut RoundController, now: f64) {
        let mut surface = NullSurface;
        c.on_tick(now, &mut surface);
    }

    /// Pin targets to a row so each center lies only inside its own disc,
    /// making click scripts independent of the random layout
    fn spread(c: &mut RoundController) {
        for t in &mut c.targets {
            t.pos = Vec2::new(100.0 + 130.0 * t.id as f32, 300.0);
        }
    }

    /// Click every target of the current round in id order
    fn complete_round(c: &mut RoundController) {
        spread(c);
        for id in 0..c.targets.len() {
            c.on_click(Vec2::new(100.0 + 130.0 * id as f32, 300.0));
        }
    }

    #[test]
    fn test_initial_round() {
        let mut c = controller();
        assert_eq!(c.targets.len(), 1);
        assert_eq!(c.targets[0].id, 0);
        assert_eq!(c.level, 1);
        assert_eq!(c.phase, Phase::Playing);
        assert_eq!(c.targets[0].visual, Visual::Revealing);

        let pos = c.targets[0].pos;
        assert!(pos.x >= INITIAL_RADIUS && pos.x <= BOUNDS.x - INITIAL_RADIUS);
        assert!(pos.y >= INITIAL_RADIUS && pos.y <= BOUNDS.y - INITIAL_RADIUS);

        // Memorize window still open
        tick(&mut c, 500.0);
        assert_eq!(c.targets[0].visual, Visual::Revealing);

        // Conceal fires once the window closes
        tick(&mut c, 1100.0);
        assert_eq!(c.targets[0].visual, Visual::Concealed);
    }

    #[test]
    fn test_correct_click_completes_round() {
        let mut c = controller();
        tick(&mut c, 1100.0);
        assert_eq!(c.targets[0].visual, Visual::Concealed);

        let pos = c.targets[0].pos;
        c.on_click(pos);

        let events = c.drain_events();
        assert!(events.contains(&GameEvent::Correct { id: 0 }));
        assert!(events.contains(&GameEvent::RoundComplete { level: 2 }));

        assert_eq!(c.targets.len(), 2);
        assert_eq!(c.expected_next, 0);
        assert_eq!(c.level, 2);
        // Completing the first round sets the best to one round
        assert_eq!(c.records.best_level, 1);

        // Uniform post-shrink sizes across the new round
        for t in &c.targets {
            assert_eq!(t.radius, INITIAL_RADIUS - SHRINK_STEP);
            assert_eq!(t.glyph_size, INITIAL_GLYPH_SIZE - SHRINK_STEP);
            assert_eq!(t.visual, Visual::Revealing);
        }

        // New memorize window counts from the click-time clock
        tick(&mut c, 1150.0);
        assert!(c.targets.iter().all(|t| t.visual == Visual::Revealing));
        tick(&mut c, 2150.0);
        assert!(c.targets.iter().all(|t| t.visual == Visual::Concealed));
    }

    #[test]
    fn test_best_level_tracks_completed_rounds() {
        let mut c = controller();
        complete_round(&mut c);
        assert_eq!(c.records.best_level, 1);
        complete_round(&mut c);
        assert_eq!(c.records.best_level, 2);
        complete_round(&mut c);
        assert_eq!(c.records.best_level, 3);
        assert_eq!(c.level, 4);
        assert_eq!(c.targets.len(), 4);
    }

    #[test]
    fn test_sizes_stay_uniform_across_rounds() {
        let mut c = controller();
        for _ in 0..3 {
            complete_round(&mut c);
        }
        let radius = c.targets[0].radius;
        let glyph = c.targets[0].glyph_size;
        assert_eq!(radius, INITIAL_RADIUS - 3.0 * SHRINK_STEP);
        for t in &c.targets {
            assert_eq!(t.radius, radius);
            assert_eq!(t.glyph_size, glyph);
        }
    }

    #[test]
    fn test_wrong_click_cascades_to_game_over() {
        let mut c = controller();
        complete_round(&mut c);
        tick(&mut c, 16.0);
        tick(&mut c, 1100.0);
        assert!(c.targets.iter().all(|t| t.visual == Visual::Concealed));
        c.drain_events();
        spread(&mut c);

        // Click target 1 while 0 is expected
        c.on_click(Vec2::new(230.0, 300.0));

        assert!(c.drain_events().contains(&GameEvent::Wrong { id: 1 }));
        assert_eq!(c.phase, Phase::Playing);
        assert_eq!(c.expected_next, 0, "wrong click must not advance the order");
        assert_eq!(c.targets[1].disc_color, COLOR_ERROR);

        // Stagger: target 0 reveals first, target 1 a beat later
        tick(&mut c, 1116.0);
        assert_eq!(c.targets[0].visual, Visual::Revealing);
        assert_eq!(c.targets[0].glyph_color, COLOR_ERROR);
        assert_eq!(c.targets[1].visual, Visual::Concealed);

        tick(&mut c, 1216.0);
        assert_eq!(c.targets[1].visual, Visual::Revealing);
        assert_eq!(c.targets[1].glyph_color, COLOR_ERROR);

        // Transition lands at the configured delay after the click
        tick(&mut c, 1950.0);
        assert_eq!(c.phase, Phase::GameOver);
        assert!(
            c.drain_events()
                .contains(&GameEvent::GameOver { completed: 1 })
        );

        // Any click now restarts with the best preserved
        c.on_click(Vec2::new(5.0, 5.0));
        assert_eq!(c.phase, Phase::Playing);
        assert_eq!(c.level, 1);
        assert_eq!(c.targets.len(), 1);
        assert_eq!(c.records.best_level, 1);
        assert!(c.drain_events().contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_cascade_skips_already_revealed_targets() {
        let mut c = controller();
        complete_round(&mut c);
        complete_round(&mut c);
        assert_eq!(c.targets.len(), 3);
        tick(&mut c, 16.0);
        tick(&mut c, 1100.0);
        spread(&mut c);

        // 0 clicked correctly, then 0 clicked again: wrong, but revealed
        let pos0 = Vec2::new(100.0, 300.0);
        c.on_click(pos0);
        c.on_click(pos0);

        // The cascade only touches the still-concealed 1 and 2
        tick(&mut c, 1116.0);
        tick(&mut c, 1232.0);
        let t0 = c.targets.iter().find(|t| t.id == 0).unwrap();
        assert_eq!(t0.glyph_color, COLOR_DEFAULT);
        assert_eq!(t0.disc_color, COLOR_ERROR);
        for id in [1, 2] {
            let t = c.targets.iter().find(|t| t.id == id).unwrap();
            assert_eq!(t.visual, Visual::Revealing);
            assert_eq!(t.glyph_color, COLOR_ERROR);
        }
    }

    #[test]
    fn test_clicks_ignored_while_paused() {
        let mut c = controller();
        let pos = c.targets[0].pos;
        c.toggle_pause();
        assert_eq!(c.phase, Phase::Paused);

        c.on_click(pos);
        assert_eq!(c.expected_next, 0);
        assert!(c.drain_events().is_empty());

        c.toggle_pause();
        c.on_click(pos);
        assert_eq!(c.drain_events(), vec![
            GameEvent::Correct { id: 0 },
            GameEvent::RoundComplete { level: 2 },
        ]);
    }

    #[test]
    fn test_pause_freezes_animation() {
        let mut c = controller();
        tick(&mut c, 100.0);
        let scale = c.targets[0].scale;
        assert!(scale < 1.0);

        c.pause();
        tick(&mut c, 2000.0);
        assert_eq!(c.targets[0].scale, scale);
        // Resume; the next frame lands the tween at its terminal state
        c.toggle_pause();
        tick(&mut c, 2016.0);
        assert_eq!(c.targets[0].scale, 1.0);
    }

    #[test]
    fn test_topmost_target_wins_hit_test() {
        let mut c = controller();
        complete_round(&mut c);
        let spot = Vec2::new(400.0, 300.0);
        for t in &mut c.targets {
            t.pos = spot;
        }

        // Reverse scan means the later-inserted disc takes the click
        c.on_click(spot);
        assert!(c.drain_events().contains(&GameEvent::Wrong { id: 1 }));
    }

    #[test]
    fn test_missed_click_does_nothing() {
        let mut c = controller();
        c.targets[0].pos = Vec2::new(400.0, 300.0);
        c.on_click(Vec2::new(400.0 + INITIAL_RADIUS + 50.0, 300.0));
        assert!(c.drain_events().is_empty());
        assert_eq!(c.expected_next, 0);
    }

    #[test]
    fn test_restart_defuses_pending_actions() {
        let mut c = controller();
        complete_round(&mut c);
        tick(&mut c, 1100.0);
        spread(&mut c);

        // Wrong click arms the cascade and the game-over transition
        c.on_click(Vec2::new(230.0, 300.0));
        tick(&mut c, 1116.0);

        // Enter restarts mid-cascade; the old round's timers must not fire
        c.restart();
        assert_eq!(c.targets.len(), 1);
        tick(&mut c, 2500.0);
        assert_eq!(c.phase, Phase::Playing, "stale game-over fired after restart");
        assert_eq!(c.level, 1);
    }

    #[test]
    fn test_resize_rerandomizes_stranded_targets() {
        let mut c = controller();
        c.targets[0].pos = Vec2::new(790.0, 590.0);
        c.on_resize(Vec2::new(400.0, 300.0));

        let pos = c.targets[0].pos;
        let r = c.targets[0].radius;
        assert!(pos.x >= r && pos.x <= 400.0 - r);
        assert!(pos.y >= r && pos.y <= 300.0 - r);

        // In-bounds targets stay put
        let kept = c.targets[0].pos;
        c.on_resize(Vec2::new(500.0, 400.0));
        assert_eq!(c.targets[0].pos, kept);
    }

    #[test]
    fn test_determinism_across_identical_runs() {
        let mut a = RoundController::new(BOUNDS, 999, Records::default(), 0.0);
        let mut b = RoundController::new(BOUNDS, 999, Records::default(), 0.0);

        for c in [&mut a, &mut b] {
            tick(c, 16.0);
            complete_round(c);
            tick(c, 32.0);
            complete_round(c);
            tick(c, 1500.0);
        }

        assert_eq!(a.level, b.level);
        assert_eq!(a.targets.len(), b.targets.len());
        for (ta, tb) in a.targets.iter().zip(b.targets.iter()) {
            assert_eq!(ta.pos, tb.pos);
            assert_eq!(ta.visual, tb.visual);
        }
    }

    #[test]
    fn test_game_over_completes_reveals_from_the_same_frame() {
        let mut c = controller();
        complete_round(&mut c);
        complete_round(&mut c);
        tick(&mut c, 1100.0);
        assert_eq!(c.targets.len(), 3);
        spread(&mut c);

        // Wrong click queues reveals for 0, 1, 2 but no tick ever runs
        // until after the transition is due
        c.on_click(Vec2::new(360.0, 300.0));
        tick(&mut c, 3000.0);

        assert_eq!(c.phase, Phase::GameOver);
        for t in &c.targets {
            assert_eq!(t.visual, Visual::Revealing);
            assert_eq!(t.glyph_opacity, 1.0);
            assert_eq!(t.glyph_color, COLOR_ERROR);
        }
    }

    #[test]
    fn test_long_cascade_lands_every_reveal() {
        let mut c = controller();
        for _ in 0..9 {
            complete_round(&mut c);
        }
        tick(&mut c, 1100.0);
        assert_eq!(c.targets.len(), 10);
        spread(&mut c);

        // With ten targets the reveal stagger stretches past the game-over
        // delay, so the transition fires while a reveal is still queued
        c.on_click(Vec2::new(100.0 + 130.0 * 9.0, 300.0));
        tick(&mut c, 1950.0);

        assert_eq!(c.phase, Phase::GameOver);
        for t in &c.targets {
            assert_eq!(t.visual, Visual::Revealing);
            assert_eq!(t.glyph_opacity, 1.0);
            assert_eq!(t.glyph_color, COLOR_ERROR);
        }
        assert!(
            c.drain_events()
                .contains(&GameEvent::GameOver { completed: 9 })
        );
    }

    #[test]
    fn test_conceal_firing_after_game_over_leaves_the_order_revealed() {
        let mut c = controller();
        tick(&mut c, 1100.0);
        // Completing the round here queues the next conceal for 2100
        complete_round(&mut c);
        spread(&mut c);

        // A wrong click during the memorize window puts the transition
        // at 1900, so one stalled frame can span both deadlines
        c.on_click(Vec2::new(230.0, 300.0));
        tick(&mut c, 2200.0);

        assert_eq!(c.phase, Phase::GameOver);
        for t in &c.targets {
            assert_eq!(t.visual, Visual::Revealing);
            assert_eq!(t.scale, 1.0);
            assert_eq!(t.opacity, 1.0);
            assert_eq!(t.glyph_opacity, 1.0);
        }
        assert!(
            c.drain_events()
                .contains(&GameEvent::GameOver { completed: 1 })
        );
    }

    /// Counts overlay draw calls so frame composition can be asserted
    #[derive(Default)]
    struct RecordingSurface {
        rects: u32,
        labels: Vec<String>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) {
            self.rects = 0;
            self.labels.clear();
        }
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
        fn fill_glyph(&mut self, _center: Vec2, _text: &str, _size: f32, _color: &str, _alpha: f32) {
        }
        fn fill_label(&mut self, _center: Vec2, text: &str, _size: f32, _color: &str, _alpha: f32) {
            self.labels.push(text.to_string());
        }
        fn stroke_polyline(&mut self, _points: &[Vec2], _width: f32, _color: &str, _alpha: f32) {}
        fn fill_rect(&mut self, _min: Vec2, _size: Vec2, _color: &str, _alpha: f32) {
            self.rects += 1;
        }
    }

    #[test]
    fn test_game_over_overlay_waits_for_its_delay() {
        let mut c = controller();
        complete_round(&mut c);
        tick(&mut c, 1100.0);
        spread(&mut c);
        c.on_click(Vec2::new(230.0, 300.0));

        // Transition fires on this frame; the overlay is gated further
        let mut s = RecordingSurface::default();
        c.on_tick(1950.0, &mut s);
        assert_eq!(c.phase, Phase::GameOver);
        assert_eq!(s.rects, 0, "overlay drawn before its delay");

        c.on_tick(2400.0, &mut s);
        assert_eq!(s.rects, 0);

        c.on_tick(2450.0, &mut s);
        assert_eq!(s.rects, 1);
        assert_eq!(s.labels, vec![
            "1".to_string(),
            "Click to continue".to_string()
        ]);
    }
}
