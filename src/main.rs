//! Monkey Mayhem entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, MouseEvent};

    use monkey_mayhem::persistence::LocalStorageStore;
    use monkey_mayhem::sim::RenderMode;
    use monkey_mayhem::{FrameView, Game, Intent, RenderSink, Tuning};

    /// Writes HUD numbers and overlay visibility into the page
    struct DomHud {
        document: Document,
    }

    impl DomHud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        }
    }

    impl RenderSink for DomHud {
        fn present(&mut self, frame: &FrameView<'_>) {
            let hud = &frame.hud;
            self.set_text("hud-score", &hud.score.to_string());
            self.set_text("hud-lives", &hud.lives.to_string());
            self.set_text("hud-time", &format!("{}s", hud.seconds_left));
            self.set_text("hud-high", &hud.high_score.to_string());

            if let Some(el) = self.document.get_element_by_id("hud-time") {
                let class = if hud.low_time { "hud-value low" } else { "hud-value" };
                let _ = el.set_attribute("class", class);
            }

            self.set_visible("start-prompt", frame.mode == RenderMode::StartPrompt);
            self.set_visible("game-over", frame.mode == RenderMode::GameOver);
            if frame.mode == RenderMode::GameOver {
                self.set_text("final-score", &hud.score.to_string());
            }
        }
    }

    fn intent_for_key(key: &str) -> Option<Intent> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Intent::MoveLeft),
            "ArrowRight" | "d" | "D" => Some(Intent::MoveRight),
            _ => None,
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Monkey Mayhem starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window available");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document available");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(
            Tuning::default(),
            seed,
            Box::new(LocalStorageStore::default()),
        )));
        let hud = Rc::new(RefCell::new(DomHud {
            document: document.clone(),
        }));

        setup_input_handlers(&window, game.clone());
        setup_restart_button(&document, game.clone());
        request_animation_frame(game, hud);

        log::info!("Monkey Mayhem running!");
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if event.code() == "Space" {
                    event.prevent_default();
                    // Space starts or restarts when allowed, otherwise throws
                    if g.can_restart() {
                        g.request_restart();
                    } else {
                        g.set_intent(Intent::Throw, true);
                    }
                } else if let Some(intent) = intent_for_key(&event.key()) {
                    g.set_intent(intent, true);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if event.code() == "Space" {
                    g.set_intent(Intent::Throw, false);
                } else if let Some(intent) = intent_for_key(&event.key()) {
                    g.set_intent(intent, false);
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().request_restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, hud: Rc<RefCell<DomHud>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, hud, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, hud: Rc<RefCell<DomHud>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            let mut sink = hud.borrow_mut();
            g.on_frame(time, &mut *sink);
        }

        request_animation_frame(game, hud);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    //! Native runner: plays one scripted run without a window

    use std::env;
    use std::fs;

    use monkey_mayhem::persistence::{FileStore, HighScoreStore, MemoryStore};
    use monkey_mayhem::sim::{GameEvent, RenderMode};
    use monkey_mayhem::{FrameView, Game, Intent, RenderSink, Tuning};

    /// 60 Hz display
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Default run length: the whole countdown plus a second
    const DEFAULT_FRAMES: u64 = 121 * 60;

    /// Logs overlay changes and hits instead of drawing
    #[derive(Default)]
    struct LogSink {
        last_mode: Option<RenderMode>,
        frames: u64,
        hits: u64,
        penalties: u64,
    }

    impl RenderSink for LogSink {
        fn present(&mut self, frame: &FrameView<'_>) {
            self.frames += 1;
            for event in frame.events {
                match *event {
                    GameEvent::Scored { points } => {
                        self.hits += 1;
                        log::debug!("Frame {}: +{} points", self.frames, points);
                    }
                    GameEvent::LifeLost { remaining } => {
                        self.penalties += 1;
                        log::info!("Frame {}: penalty hit, {} lives left", self.frames, remaining);
                    }
                    _ => {}
                }
            }
            if self.last_mode != Some(frame.mode) {
                log::info!("Frame {}: {:?}", self.frames, frame.mode);
                self.last_mode = Some(frame.mode);
            }
        }
    }

    fn load_tuning() -> Tuning {
        let Ok(path) = env::var("MONKEY_MAYHEM_TUNING") else {
            return Tuning::default();
        };
        let loaded = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
        match loaded {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {} ({}), using defaults", path, e);
                Tuning::default()
            }
        }
    }

    fn env_number(name: &str, default: u64) -> u64 {
        env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    pub fn run() {
        let tuning = load_tuning();
        let seed = env_number("MONKEY_MAYHEM_SEED", 0x5EED);
        let frames = env_number("MONKEY_MAYHEM_FRAMES", DEFAULT_FRAMES);
        let store: Box<dyn HighScoreStore> = match env::var("MONKEY_MAYHEM_SCORES") {
            Ok(path) => Box::new(FileStore::new(path)),
            Err(_) => Box::new(MemoryStore::new()),
        };

        let mut game = Game::new(tuning, seed, store);
        let mut sink = LogSink::default();
        game.request_restart();

        // Autopilot: keep throwing, sweep back and forth along the wall
        game.set_intent(Intent::Throw, true);
        for frame in 0..frames {
            let sweeping_left = (frame / 90) % 2 == 0;
            game.set_intent(Intent::MoveLeft, sweeping_left);
            game.set_intent(Intent::MoveRight, !sweeping_left);
            game.on_frame(frame as f64 * FRAME_MS, &mut sink);
        }

        let hud = game.hud();
        log::info!(
            "Finished after {} frames: {} hits, {} penalties, score {}, lives {}, {}s left, high score {}",
            sink.frames,
            sink.hits,
            sink.penalties,
            hud.score,
            hud.lives,
            hud.seconds_left,
            hud.high_score
        );
        match serde_json::to_string(&hud) {
            Ok(json) => println!("{json}"),
            Err(e) => log::warn!("Could not serialize summary ({})", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Monkey Mayhem (native, headless) starting...");
    headless::run();
}
