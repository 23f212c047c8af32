//! Memory Dots entry point
//!
//! Browser builds wire the canvas, input, and frame loop around the game
//! core. Native builds run a short headless scenario instead.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use glam::Vec2;
    use memory_dots::audio::{AudioManager, SoundEffect};
    use memory_dots::render::CanvasSurface;
    use memory_dots::{GameEvent, Phase, Records, RoundController};

    /// Everything the frame and input closures share
    struct Game {
        controller: RoundController,
        surface: CanvasSurface,
        audio: AudioManager,
    }

    impl Game {
        /// Advance one frame, repaint, and refresh the HUD
        fn frame(&mut self, now: f64) {
            self.controller.on_tick(now, &mut self.surface);
            self.pump_events();
            self.update_hud();
        }

        fn click(&mut self, point: Vec2) {
            self.controller.on_click(point);
            self.pump_events();
        }

        /// Turn queued game events into sounds
        fn pump_events(&mut self) {
            for event in self.controller.drain_events() {
                match event {
                    GameEvent::Correct { .. } => self.audio.play(SoundEffect::Confirm),
                    GameEvent::Wrong { .. } => self.audio.play(SoundEffect::Error),
                    GameEvent::RoundComplete { .. }
                    | GameEvent::GameOver { .. }
                    | GameEvent::Restarted => {}
                }
            }
        }

        /// Push the level and best-run counters into the page
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("level") {
                el.set_text_content(Some(&self.controller.level.to_string()));
            }
            if let Some(el) = document.get_element_by_id("record") {
                el.set_text_content(Some(&self.controller.records.best_level.to_string()));
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("logger already initialized");

        log::info!("Memory Dots starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("canvas element missing")
            .dyn_into()
            .expect("#canvas is not a canvas");

        // Backing store matches the viewport; no device-pixel scaling
        let bounds = viewport_size(&window);
        canvas.set_width(bounds.x as u32);
        canvas.set_height(bounds.y as u32);

        let seed = js_sys::Date::now() as u64;
        let now = window.performance().map(|p| p.now()).unwrap_or_default();

        let surface = CanvasSurface::new(canvas.clone()).expect("no 2d context");
        let controller = RoundController::new(bounds, seed, Records::load(), now);
        let game = Rc::new(RefCell::new(Game {
            controller,
            surface,
            audio: AudioManager::new(),
        }));

        log::info!("Game initialized with seed: {seed}");

        setup_input_handlers(&canvas, game.clone());
        setup_resize(&canvas, game.clone());
        setup_auto_pause(game.clone());

        schedule_frame(game);

        log::info!("Memory Dots running!");
    }

    /// Window inner size as surface bounds
    fn viewport_size(window: &web_sys::Window) -> Vec2 {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        Vec2::new(w as f32, h as f32)
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Clicks drive the whole game
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let point = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                game.borrow_mut().click(point);
            });
            let _ =
                canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: Enter restarts, Escape toggles pause, M toggles audio
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "Enter" => {
                        g.controller.restart();
                        g.pump_events();
                    }
                    "Escape" => g.controller.toggle_pause(),
                    "m" | "M" => {
                        let muted = g.audio.toggle_muted();
                        log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let bounds = viewport_size(&window);
            canvas.set_width(bounds.x as u32);
            canvas.set_height(bounds.y as u32);
            game.borrow_mut().controller.on_resize(bounds);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Tab switched away or minimized
        {
            let game = game.clone();
            let doc = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if doc.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.controller.phase == Phase::Playing {
                        g.controller.pause();
                        log::info!("Auto-paused, tab hidden");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Focus moved to another window
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if g.controller.phase == Phase::Playing {
                    g.controller.pause();
                    log::info!("Auto-paused, window unfocused");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// One-shot rAF callback that runs a frame and re-arms itself
    fn schedule_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game.borrow_mut().frame(time);
            schedule_frame(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Memory Dots (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play in a browser");

    println!("\nRunning round smoke test...");
    smoke_test_round();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // wasm builds start from wasm_main; the bin target still needs a main
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_test_round() {
    use glam::Vec2;
    use memory_dots::render::NullSurface;
    use memory_dots::{Phase, Records, RoundController};

    let mut controller = RoundController::new(Vec2::new(1280.0, 720.0), 42, Records::new(), 0.0);
    let mut surface = NullSurface;

    controller.on_tick(16.0, &mut surface);
    controller.on_tick(1100.0, &mut surface);
    let pos = controller.targets[0].pos;
    controller.on_click(pos);
    controller.on_tick(1116.0, &mut surface);

    assert_eq!(controller.level, 2);
    assert_eq!(controller.phase, Phase::Playing);
    assert_eq!(controller.targets.len(), 2);
    println!("✓ Round progression smoke test passed!");
}
