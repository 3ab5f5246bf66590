//! Demonic Serpent entry point
//!
//! In the browser: canvas, keyboard, localStorage and Web Audio wired to the
//! host driver, stepped by `requestAnimationFrame`. Natively: a headless
//! autopilot run that prints the final frame.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use demonic_serpent::Game;
    use demonic_serpent::audio::WebAudio;
    use demonic_serpent::consts::CELL_SIZE;
    use demonic_serpent::platform::KeyboardState;
    use demonic_serpent::platform::storage::LocalStorage;
    use demonic_serpent::renderer::{CanvasPresenter, Hud, Presenter, fit_scale};
    use demonic_serpent::sim::GamePhase;
    use demonic_serpent::tuning::Tuning;

    const CANVAS_ID: &str = "game-canvas";
    const SPRITE_ROOT: &str = "assets/images";

    /// Everything the browser callbacks share
    struct Host {
        game: Game<LocalStorage, WebAudio>,
        keys: KeyboardState,
        presenter: Option<CanvasPresenter>,
        /// Pause requested by a blur/visibility change
        auto_pause: bool,
        /// HUD last written to the DOM
        last_hud: Option<Hud>,
    }

    impl Host {
        fn frame(&mut self, time: f64) {
            let mut input = self.keys.take_frame_input();
            if std::mem::take(&mut self.auto_pause) && self.game.phase() == GamePhase::Running {
                input.pause = true;
            }
            self.game.frame(time, &input);

            let snapshot = self.game.snapshot();
            if let Some(presenter) = self.presenter.as_mut() {
                presenter.present(&snapshot, time);
            }
            self.refresh_hud(snapshot.hud());
        }

        /// Rewrite the DOM when score, best, phase or sound changed
        fn refresh_hud(&mut self, hud: Hud) {
            if self.last_hud == Some(hud) {
                return;
            }
            self.last_hud = Some(hud);

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let set_text = |id: &str, text: &str| {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(text));
                }
            };
            set_text("score-display", &hud.score_text());
            set_text("highscore-display", &hud.high_score_text());
            set_text("sound-toggle", hud.sound_icon());
            set_text("final-score", &hud.score_text());
            set_text("final-highscore", &hud.high_score_text());

            if let Some(el) = document
                .get_element_by_id("game-over-overlay")
                .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
            {
                let display = if hud.phase == GamePhase::GameOver { "flex" } else { "none" };
                let _ = el.style().set_property("display", display);
            }
        }
    }

    /// Find `#game-canvas` (or create it) and size its backing store to the grid
    fn find_canvas(document: &web_sys::Document, tuning: &Tuning) -> Option<HtmlCanvasElement> {
        let canvas: HtmlCanvasElement = match document.get_element_by_id(CANVAS_ID) {
            Some(el) => el.dyn_into().ok()?,
            None => {
                let canvas: HtmlCanvasElement =
                    document.create_element("canvas").ok()?.dyn_into().ok()?;
                canvas.set_id(CANVAS_ID);
                document.body()?.append_child(&canvas).ok()?;
                canvas
            }
        };
        canvas.set_width((tuning.grid_cols as f32 * CELL_SIZE) as u32);
        canvas.set_height((tuning.grid_rows as f32 * CELL_SIZE) as u32);
        Some(canvas)
    }

    /// Scale the canvas' CSS size to 90% of the window, keeping its aspect
    fn resize_canvas(canvas: &HtmlCanvasElement) {
        let Some(window) = web_sys::window() else { return };
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let width = canvas.width() as f64;
        let height = canvas.height() as f64;
        let scale = fit_scale(dim(window.inner_width()), dim(window.inner_height()), width, height);
        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", width * scale));
        let _ = style.set_property("height", &format!("{}px", height * scale));
    }

    fn setup_resize(canvas: HtmlCanvasElement) {
        let Some(window) = web_sys::window() else { return };
        resize_canvas(&canvas);
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            resize_canvas(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Demonic Serpent starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let tuning = Tuning::default();
        let canvas = find_canvas(&document, &tuning);
        let presenter = canvas
            .as_ref()
            .and_then(|canvas| CanvasPresenter::new(canvas, SPRITE_ROOT));
        if let Some(canvas) = canvas {
            setup_resize(canvas);
        }
        if presenter.is_none() {
            log::error!("Canvas 2D context unavailable - nothing will be drawn");
        }

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(tuning, seed, LocalStorage::new(), WebAudio::new());
        game.start();
        log::info!("Game initialized with seed: {}", seed);

        let host = Rc::new(RefCell::new(Host {
            game,
            keys: KeyboardState::new(),
            presenter,
            auto_pause: false,
            last_hud: None,
        }));
        {
            let mut h = host.borrow_mut();
            let hud = h.game.snapshot().hud();
            h.refresh_hud(hud);
        }

        setup_keyboard(host.clone());
        setup_sound_toggle(host.clone());
        setup_auto_pause(host.clone());
        request_animation_frame(host);

        log::info!("Demonic Serpent running!");
    }

    fn setup_keyboard(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else { return };
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if matches!(
                    key.as_str(),
                    "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" | " "
                ) {
                    event.prevent_default();
                }
                let mut h = host.borrow_mut();
                h.game.audio_mut().resume();
                h.keys.press(&key);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                host.borrow_mut().keys.release(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_sound_toggle(host: Rc<RefCell<Host>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(btn) = document.get_element_by_id("sound-toggle") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut h = host.borrow_mut();
                h.game.toggle_sound();
                let hud = h.game.snapshot().hud();
                h.refresh_hud(hud);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };

        {
            let host = host.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut h = host.borrow_mut();
                    h.keys.clear();
                    h.auto_pause = true;
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut h = host.borrow_mut();
                h.keys.clear();
                h.auto_pause = true;
                log::info!("Auto-paused (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(host, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(host: Rc<RefCell<Host>>, time: f64) {
        host.borrow_mut().frame(time);
        request_animation_frame(host);
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
    use demonic_serpent::Game;
    use demonic_serpent::audio::LogAudio;
    use demonic_serpent::persistence::MemoryStore;
    use demonic_serpent::renderer::{AsciiPresenter, FrameSnapshot, Presenter};
    use demonic_serpent::sim::{FrameInput, GamePhase, GameState, Heading};
    use demonic_serpent::tuning::Tuning;

    /// Simulated frame length (60 fps)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const DEFAULT_FRAMES: u32 = 3600;

    /// Greedy pilot: the safe heading that gets closest to the orb
    fn autopilot(state: &GameState) -> Option<Heading> {
        let head = state.serpent.head();
        let current = state.serpent.heading();
        let target = state.orb.unwrap_or(state.grid.center());
        let tail = state.serpent.segments().back().copied();

        [Heading::Up, Heading::Down, Heading::Left, Heading::Right]
            .into_iter()
            .filter(|h| !h.is_opposite(current))
            .filter(|h| {
                let next = head + h.vector();
                state.grid.contains(next)
                    && (!state.serpent.occupies(next) || Some(next) == tail)
                    && state.demons.occupant(next).is_none()
                    && state.boss.as_ref().is_none_or(|b| b.pos != next)
            })
            .min_by_key(|h| {
                let d = target - (head + h.vector());
                d.x.abs() + d.y.abs()
            })
    }

    fn load_tuning(path: Option<&str>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
        match parsed {
            Ok(tuning) => {
                log::info!("Loaded tuning from {path}");
                tuning
            }
            Err(e) => {
                log::warn!("Tuning {path} not used ({e}), falling back to defaults");
                Tuning::default()
            }
        }
    }

    pub fn run() {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let seed = args.first().and_then(|s| s.parse().ok()).unwrap_or(42);
        let frames = args
            .get(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_FRAMES);
        let tuning = load_tuning(args.get(2).map(String::as_str));

        log::info!("Demonic Serpent (headless) seed {seed}, {frames} frames");

        let mut game = Game::new(tuning, seed, MemoryStore::new(), LogAudio);
        game.start();

        let mut presenter = AsciiPresenter::new();
        let mut total_ticks = 0u64;
        for frame in 0..frames {
            let input = FrameInput {
                heading: autopilot(&game.state),
                ..FrameInput::default()
            };
            let now = f64::from(frame) * FRAME_MS;
            total_ticks += u64::from(game.frame(now, &input));
            if game.phase() == GamePhase::GameOver {
                break;
            }
        }

        let snapshot = FrameSnapshot::capture(&game.state, game.sound_on());
        presenter.present(&snapshot, 0.0);
        println!("{}", presenter.last_frame());
        println!(
            "ticks {}  feeds {}  demons {}  boss {}",
            total_ticks,
            game.state.feeds,
            game.state.demons.len(),
            if game.state.boss.is_some() { "awake" } else { "asleep" }
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    headless::run();
}
