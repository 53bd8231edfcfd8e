//! Seahorse Dash entry point
//!
//! Browser builds draw to a canvas and take pointer/keyboard input. Native
//! builds run a headless autopilot session and print a JSON summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, PointerEvent};

    use seahorse_dash::Viewport;
    use seahorse_dash::audio::{WebAudio, dispatch_events};
    use seahorse_dash::persistence::LocalStorageStore;
    use seahorse_dash::platform::{ActionSource, Hud, InputLatch, KeyAction, Renderer, key_action};
    use seahorse_dash::renderer::CanvasRenderer;
    use seahorse_dash::sim::{FrameClock, GameState, tick};
    use seahorse_dash::{HighScores, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        clock: FrameClock,
        input: InputLatch,
        audio: WebAudio,
        renderer: CanvasRenderer,
        store: LocalStorageStore,
        settings: Settings,
        highscores: HighScores,
        /// Runs already written to the leaderboard
        runs_recorded: u32,
        last_hud: Option<Hud>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            let dt = self.clock.tick(time);
            let input = self.input.take();
            tick(&mut self.state, &input, dt);

            if self.state.runs_finished != self.runs_recorded {
                self.runs_recorded = self.state.runs_finished;
                self.record_run();
            }

            dispatch_events(&mut self.state, &mut self.audio);
            self.renderer.draw(&self.state, time);
            self.track_fps(time);
            self.update_hud();
        }

        fn record_run(&mut self) {
            let score = self.state.score;
            if let Some(rank) = self.highscores.add_score(score, js_sys::Date::now()) {
                log::info!("Score {} ranked #{}", score, rank);
                self.highscores.save(&mut self.store);
            }
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Update HUD elements in DOM; only touches the DOM when text changes
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let mut hud = Hud::from_state(&self.state);
            if self.settings.show_fps {
                hud.score = format!("{}  ({} fps)", hud.score, self.fps);
            }
            if self.last_hud.as_ref() == Some(&hud) {
                return;
            }

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&hud.score));
            }
            if let Some(el) = document.get_element_by_id("best") {
                el.set_text_content(Some(&hud.best));
            }
            if let Some(el) = document
                .query_selector(".center")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let display = if hud.show_prompt { "" } else { "none" };
                let _ = el.style().set_property("display", display);
            }
            self.last_hud = Some(hud);
        }

        fn toggle_sound(&mut self) {
            let on = self.settings.toggle_sound();
            self.audio.set_volume(self.settings.effective_sfx_volume());
            self.audio
                .set_music_volume(self.settings.effective_music_volume());
            self.settings.save(&mut self.store);
            update_mute_label(on);
            log::info!("Sound {}", if on { "on" } else { "off" });
        }

        fn resize(&mut self) {
            let (viewport, dpr) = measure_viewport();
            self.state.set_viewport(viewport);
            self.renderer.resize(viewport, dpr);
        }
    }

    fn update_mute_label(on: bool) {
        if let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("btnMute"))
        {
            btn.set_text_content(Some(if on { "Sound: On" } else { "Sound: Off" }));
            let _ = btn.set_attribute("aria-pressed", if on { "false" } else { "true" });
        }
    }

    /// Window size in CSS pixels and a device pixel ratio clamped to 1..=2
    fn measure_viewport() -> (Viewport, f64) {
        let Some(window) = web_sys::window() else {
            return (Viewport::default(), 1.0);
        };
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(700.0);
        let width = dim(window.inner_width()).floor() as f32;
        let height = dim(window.inner_height()).floor() as f32;
        let dpr = window.device_pixel_ratio().clamp(1.0, 2.0);
        (Viewport::new(width, height), dpr)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {e}").into());
        }

        log::info!("Seahorse Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no #game canvas")?
            .dyn_into()?;

        let store = LocalStorageStore;
        let settings = Settings::load(&store);
        let highscores = HighScores::load(&store);
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);

        let (viewport, dpr) = measure_viewport();
        let mut state = GameState::new(seed, viewport);
        state.seed_best(highscores.top_score().unwrap_or(0));

        let mut renderer = CanvasRenderer::new(canvas.clone(), seed, settings.reduced_motion)?;
        renderer.resize(viewport, dpr);

        update_mute_label(settings.sound_enabled);
        let audio = WebAudio::new(
            settings.effective_sfx_volume(),
            settings.effective_music_volume(),
        );

        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            clock: FrameClock::new(),
            input: InputLatch::new(),
            audio,
            renderer,
            store,
            settings,
            highscores,
            runs_recorded: 0,
            last_hud: None,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }));

        setup_input_handlers(&canvas, game.clone())?;
        setup_buttons(game.clone())?;

        request_animation_frame(game);

        log::info!("Seahorse Dash running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Pointer down on the playfield
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.input.press(ActionSource::Pointer);
            });
            canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer release anywhere re-arms the pointer
        for name in ["pointerup", "pointercancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().input.release(ActionSource::Pointer);
            });
            window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match key_action(&event.code(), &event.key()) {
                    Some(KeyAction::Swim) => {
                        event.prevent_default();
                        g.audio.resume();
                        if !event.repeat() {
                            g.input.press(ActionSource::Keyboard);
                        }
                    }
                    Some(KeyAction::Reset) => g.input.request_reset(),
                    Some(KeyAction::ToggleAutopilot) => {
                        let on = g.input.toggle_autopilot();
                        log::info!("Autopilot: {}", on);
                    }
                    None => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if key_action(&event.code(), &event.key()) == Some(KeyAction::Swim) {
                    game.borrow_mut().input.release(ActionSource::Keyboard);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Hidden tabs stop requesting frames; don't treat the gap as one long frame
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().clock.restart();
            });
            if let Some(document) = window.document() {
                document.add_event_listener_with_callback(
                    "visibilitychange",
                    closure.as_ref().unchecked_ref(),
                )?;
            }
            closure.forget();
        }

        // Resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().resize();
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;

        if let Some(btn) = document.get_element_by_id("btnStart") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.input.request_restart();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("btnMute") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().toggle_sound();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use serde::Serialize;

    use seahorse_dash::audio::{LogAudio, dispatch_events};
    use seahorse_dash::persistence::FileStore;
    use seahorse_dash::platform::{HudLog, InputLatch, Renderer};
    use seahorse_dash::sim::{FrameClock, GamePhase, GameState, tick};
    use seahorse_dash::{HighScores, Settings, Viewport};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const DEFAULT_SECONDS: f32 = 30.0;

    /// Printed to stdout when the session ends
    #[derive(Debug, Serialize)]
    struct Summary {
        seed: u64,
        seconds: f32,
        frames: u64,
        /// Final score of every finished run, in order
        runs: Vec<u32>,
        score: u32,
        best: u32,
        jumps: u32,
        points: u32,
        hits: u32,
    }

    fn now_ms() -> f64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }

    /// `seahorse-dash [seconds] [seed]`
    pub fn run() {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let seconds = args
            .first()
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(DEFAULT_SECONDS);

        let mut store = FileStore::from_env();
        let settings = Settings::load(&store);
        let seed = args
            .get(1)
            .and_then(|s| s.parse::<u64>().ok())
            .or(settings.seed)
            .unwrap_or_else(|| now_ms() as u64);

        let mut highscores = HighScores::load(&store);
        let mut state = GameState::new(seed, Viewport::default());
        state.seed_best(highscores.top_score().unwrap_or(0));

        let mut input = InputLatch::new();
        input.autopilot = true;
        let mut clock = FrameClock::new();
        let mut audio = LogAudio::new(settings.sound_enabled);
        let mut hud = HudLog::default();

        log::info!("Headless demo: {}s, seed {}", seconds, seed);

        let frames = (seconds as f64 * 1000.0 / FRAME_MS).ceil() as u64;
        let mut runs = Vec::new();
        let mut board_changed = false;
        let mut time = 0.0;

        for _ in 0..frames {
            let dt = clock.tick(time);
            tick(&mut state, &input.take(), dt);

            if state.phase == GamePhase::GameOver {
                runs.push(state.score);
                if let Some(rank) = highscores.add_score(state.score, now_ms()) {
                    log::info!("Score {} ranked #{}", state.score, rank);
                    board_changed = true;
                }
                // Autopilot starts the next run on the following frame
                input.request_reset();
            }

            dispatch_events(&mut state, &mut audio);
            hud.draw(&state, time);
            time += FRAME_MS;
        }

        if board_changed {
            highscores.save(&mut store);
        }

        let summary = Summary {
            seed,
            seconds,
            frames: hud.frames,
            runs,
            score: state.score,
            best: state.best,
            jumps: audio.jumps,
            points: audio.points,
            hits: audio.hits,
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Could not encode summary: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    headless::run();
}
