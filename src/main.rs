//! Water Heroes entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use water_heroes::audio::{AudioManager, SoundEffect};
    use water_heroes::renderer::CanvasRenderer;
    use water_heroes::sim::{GameEvent, GamePhase, GameState, TickInput, periodic_tick, tick};
    use water_heroes::{Playfield, PlayerProgress, Settings, Tuning};

    /// Mission used when the page does not name one
    const DEFAULT_MISSION: &str = "india";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        settings: Settings,
        progress: PlayerProgress,
        mission_id: String,
        /// Directions currently held (keyboard and on-screen buttons)
        input: TickInput,
        /// A frame callback is scheduled
        loop_active: bool,
    }

    impl Game {
        /// Route simulation events to sound, progress and the HUD
        fn handle_events(&mut self, events: &[GameEvent]) {
            if events.is_empty() {
                return;
            }
            for event in events {
                if let Some(effect) = SoundEffect::for_event(event) {
                    self.audio.play(effect);
                }
                match event {
                    GameEvent::Victory { final_score } => {
                        log::info!("Mission {} complete: {}", self.mission_id, final_score);
                    }
                    GameEvent::GameOver { final_score } => {
                        log::info!("Mission {} failed: {}", self.mission_id, final_score);
                    }
                    _ => {}
                }
            }
            if self.progress.apply_events(&self.mission_id, events) {
                self.progress.save();
            }
            self.update_hud();
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("game-score") {
                el.set_text_content(Some(&self.state.display_score().to_string()));
            }
            if let Some(el) = document.get_element_by_id("lives") {
                el.set_text_content(Some(&self.state.lives.to_string()));
            }
            if let Some(el) = document.get_element_by_id("total-score") {
                el.set_text_content(Some(&self.progress.total_score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("pause-game") {
                let label = if self.state.is_paused() { "Resume" } else { "Pause" };
                el.set_text_content(Some(label));
            }

            // Terminal screens
            for (id, phase) in [
                ("game-over", GamePhase::GameOver),
                ("victory-screen", GamePhase::Victory),
            ] {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el
                        .class_list()
                        .toggle_with_force("active", self.state.phase == phase);
                }
            }
        }

        fn render(&self) {
            if let Some(renderer) = &self.renderer {
                renderer.render(&self.state);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Water Heroes starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("pacman-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let playfield = match Playfield::new(canvas.width() as f32, canvas.height() as f32) {
            Ok(playfield) => playfield,
            Err(e) => {
                log::warn!("{}; using default playfield", e);
                canvas.set_width(Playfield::default().width as u32);
                canvas.set_height(Playfield::default().height as u32);
                Playfield::default()
            }
        };

        let settings = Settings::load();
        let mission_id = canvas
            .get_attribute("data-mission")
            .unwrap_or_else(|| DEFAULT_MISSION.to_string());

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let tuning = Tuning::default();
        let spawn_interval = tuning.spawn_interval_ms;
        let mut state = GameState::new(seed, playfield, tuning);
        state.start();

        let game = Rc::new(RefCell::new(Game {
            state,
            renderer: CanvasRenderer::new(&canvas),
            audio: AudioManager::new(&settings),
            settings,
            progress: PlayerProgress::load(),
            mission_id,
            input: TickInput::default(),
            loop_active: false,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());
        setup_spawner(game.clone(), spawn_interval);

        game.borrow().update_hud();
        ensure_loop(game);

        log::info!("Water Heroes running!");
    }

    /// Map a key name to the held-direction flag it drives
    fn direction_flag<'a>(input: &'a mut TickInput, key: &str) -> Option<&'a mut bool> {
        match key {
            "ArrowUp" | "w" | "W" => Some(&mut input.up),
            "ArrowDown" | "s" | "S" => Some(&mut input.down),
            "ArrowLeft" | "a" | "A" => Some(&mut input.left),
            "ArrowRight" | "d" | "D" => Some(&mut input.right),
            _ => None,
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for (event_name, held) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if let Some(flag) = direction_flag(&mut g.input, &event.key()) {
                    *flag = held;
                    event.prevent_default();
                }
            });
            let _ = document
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        // Pause toggle
        if let Some(btn) = document.get_element_by_id("pause-game") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().state.toggle_pause();
                game.borrow().update_hud();
                ensure_loop(game.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mute toggle
        if let Some(btn) = document.get_element_by_id("mute-toggle") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.settings.muted = !g.settings.muted;
                g.settings.save();
                let settings = g.settings.clone();
                g.audio.apply_settings(&settings);
                log::info!("Sound {}", if settings.muted { "muted" } else { "on" });
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Restart (also offered from the game over screen)
        for id in ["reset-game", "retry-mission"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    {
                        let mut g = game.borrow_mut();
                        g.state.restart();
                        g.input = TickInput::default();
                        g.update_hud();
                    }
                    ensure_loop(game.clone());
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.settings.pause_on_blur && g.state.phase == GamePhase::Running {
                        g.state.pause();
                        g.update_hud();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                // Released keys are never seen after focus leaves
                g.input = TickInput::default();
                if g.settings.pause_on_blur && g.state.phase == GamePhase::Running {
                    g.state.pause();
                    g.update_hud();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Periodic spawner on its own timer; it skips itself unless running
    fn setup_spawner(game: Rc<RefCell<Game>>, interval_ms: u32) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let mut g = game.borrow_mut();
            let events = periodic_tick(&mut g.state);
            g.handle_events(&events);
        });
        let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms as i32,
        );
        closure.forget();
    }

    /// Schedule frames again if the loop had stopped
    fn ensure_loop(game: Rc<RefCell<Game>>) {
        let start = {
            let mut g = game.borrow_mut();
            let start = !g.loop_active && g.state.phase == GamePhase::Running;
            if start {
                g.loop_active = true;
            }
            g.render();
            start
        };
        if start {
            request_animation_frame(game);
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            let input = g.input;
            let events = tick(&mut g.state, &input);
            g.handle_events(&events);
            g.render();

            // Paused or finished: stop asking for frames
            if g.state.phase != GamePhase::Running {
                g.loop_active = false;
                return;
            }
        }
        request_animation_frame(game);
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
    log::info!("Water Heroes (native) starting...");
    log::info!("Native mode runs a headless session - serve the wasm build for the real game");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let tuning = match args.next() {
        Some(path) => load_tuning(&path),
        None => water_heroes::Tuning::default(),
    };

    headless::run(seed, tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> water_heroes::Tuning {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Could not read tuning file {}: {}; using defaults", path, e);
            return water_heroes::Tuning::default();
        }
    };
    match water_heroes::Tuning::from_json(&json) {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Invalid tuning in {}: {}; using defaults", path, e);
            water_heroes::Tuning::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use water_heroes::sim::{GameState, TickInput, periodic_tick, tick};
    use water_heroes::{Playfield, PlayerProgress, Tuning};

    /// Two minutes of 60 Hz frames
    const MAX_TICKS: u64 = 60 * 60 * 2;
    /// Frames spent on each leg of the sweep pattern
    const LEG_TICKS: u64 = 90;

    /// Serpentine sweep with a diagonal leg so obstacles get approached at an angle
    fn scripted_input(t: u64) -> TickInput {
        match (t / LEG_TICKS) % 5 {
            0 => TickInput { right: true, ..Default::default() },
            1 => TickInput { down: true, left: true, ..Default::default() },
            2 => TickInput { left: true, ..Default::default() },
            3 => TickInput { up: true, ..Default::default() },
            _ => TickInput { up: true, right: true, ..Default::default() },
        }
    }

    pub fn run(seed: u64, tuning: Tuning) {
        let spawn_every = tuning.spawn_interval_ticks();
        let mut state = GameState::new(seed, Playfield::default(), tuning);
        let mut progress = PlayerProgress::load();
        state.start();

        for t in 0..MAX_TICKS {
            let mut events = tick(&mut state, &scripted_input(t));
            if (t + 1) % spawn_every == 0 {
                events.extend(periodic_tick(&mut state));
            }
            for event in &events {
                log::debug!("tick {}: {:?}", t, event);
            }
            progress.apply_events("headless", &events);

            if state.phase.is_terminal() {
                break;
            }
        }

        log::info!(
            "Session ended in {:?} after {} ticks: score {}, lives {}, {} of {} collectibles left",
            state.phase,
            state.time_ticks,
            state.display_score(),
            state.lives,
            state.remaining_collectibles(),
            state.collectibles.len()
        );
        log::info!("Lifetime total: {}", progress.total_score);
        progress.save();
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("water-heroes-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_tuning_missing_file_uses_defaults() {
        let tuning = load_tuning("/nonexistent/water-heroes-tuning.json");
        assert_eq!(tuning.starting_lives, water_heroes::Tuning::default().starting_lives);
    }

    #[test]
    fn test_load_tuning_rejects_invalid_values() {
        let path = write_temp("bad.json", r#"{ "water_spawn_chance": 1.5, "starting_lives": 9 }"#);
        let tuning = load_tuning(path.to_str().unwrap());
        assert_eq!(tuning.starting_lives, 3);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_tuning_reads_file() {
        let path = write_temp("good.json", r#"{ "starting_lives": 5 }"#);
        let tuning = load_tuning(path.to_str().unwrap());
        assert_eq!(tuning.starting_lives, 5);
        std::fs::remove_file(path).unwrap();
    }
}
