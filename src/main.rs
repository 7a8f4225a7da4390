//! Dog Hunter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use dog_hunter::consts::*;
    use dog_hunter::platform::input::{InputState, Key};
    use dog_hunter::platform::storage::LocalStorage;
    use dog_hunter::render::Renderer;
    use dog_hunter::sim::{GameEvent, SimRng};
    use dog_hunter::{Mode, Session, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorage>,
        input: InputState,
        renderer: Renderer,
        last_time: f64,
        /// Mode shown by the DOM overlays last frame
        shown_mode: Option<Mode>,
    }

    impl Game {
        fn new(seed: u64, renderer: Renderer) -> Self {
            Self {
                session: Session::new(LocalStorage::new(), SimRng::new(seed), Settings::load()),
                input: InputState::new(),
                renderer,
                last_time: 0.0,
                shown_mode: None,
            }
        }

        /// Run one simulation frame
        fn update(&mut self, dt_ms: f32) {
            let frame = self.input.take_frame();
            for event in self.session.frame(&frame, dt_ms) {
                if let GameEvent::LevelUp { level } = event {
                    log::info!("Reached level {level}");
                }
            }
        }

        /// Render the current frame
        fn render(&self, time: f64) {
            match self.session.run() {
                Some(run) => self.renderer.draw(run, self.session.settings(), time),
                None => self.renderer.clear(),
            }
        }

        /// Show/hide menu, pause menu and canvas to match the session
        fn update_overlays(&mut self) {
            let mode = self.session.mode();
            if self.shown_mode == Some(mode) {
                return;
            }
            self.shown_mode = Some(mode);

            set_visible("menu", mode == Mode::Menu);
            set_visible("pauseMenu", mode == Mode::Paused);
            set_visible("gameCanvas", mode != Mode::Menu);
            if mode == Mode::Menu {
                set_visible("continueGame", self.session.has_save());
            }
            if mode == Mode::Paused {
                self.refresh_pacing_label();
            }
        }

        fn refresh_pacing_label(&self) {
            if let Some(btn) = element("togglePacing") {
                let pacing = self.session.settings().pacing;
                btn.set_text_content(Some(&format!("Pacing: {}", pacing.as_str())));
            }
        }

        /// Flip frame pacing and persist the choice
        fn toggle_pacing(&mut self) {
            let mut settings = self.session.settings().clone();
            settings.pacing = settings.pacing.toggled();
            settings.save();
            log::info!("Pacing set to {}", settings.pacing.as_str());
            self.session.set_settings(settings);
            self.refresh_pacing_label();
        }
    }

    fn element(id: &str) -> Option<HtmlElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    fn set_visible(id: &str, visible: bool) {
        if let Some(el) = element(id) {
            let _ = el
                .style()
                .set_property("display", if visible { "block" } else { "none" });
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dog Hunter starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fixed logical size; CSS scales it to the viewport
        canvas.set_width(ARENA_WIDTH as u32);
        canvas.set_height(ARENA_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, Renderer::new(ctx))));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_menu_buttons(game.clone());
        setup_auto_pause(game.clone());

        game.borrow_mut().update_overlays();
        request_animation_frame(game);

        log::info!("Dog Hunter running!");
    }

    /// Keyboard listeners, registered once
    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    let mut g = game.borrow_mut();
                    let paused = g.session.mode() == Mode::Paused;
                    g.input.apply_key(key, true, paused);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    game.borrow_mut().input.apply_key(key, false, false);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(id: &str, game: Rc<RefCell<Game>>, action: impl Fn(&mut Game) + 'static) {
        let Some(btn) = element(id) else {
            log::warn!("Missing button #{id}");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let mut g = game.borrow_mut();
            action(&mut *g);
            g.update_overlays();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_menu_buttons(game: Rc<RefCell<Game>>) {
        on_click("newGame", game.clone(), |g| {
            g.session.new_game();
            g.input.release_all();
        });

        on_click("continueGame", game.clone(), |g| {
            if let Err(err) = g.session.continue_game() {
                log::warn!("Cannot continue: {err}");
            }
            g.input.release_all();
        });

        on_click("saveGame", game.clone(), |g| {
            if let Err(err) = g.session.save_and_resume() {
                log::warn!("Save failed: {err}");
            }
        });

        on_click("togglePacing", game.clone(), Game::toggle_pacing);

        on_click("exitGame", game, |g| {
            if let Err(err) = g.session.exit_to_menu() {
                log::warn!("Save on exit failed: {err}");
            }
            g.input.release_all();
        });
    }

    /// Pause when the window loses focus so keys do not stick
    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut g = game.borrow_mut();
            g.input.release_all();
            if g.session.pause() {
                log::info!("Auto-paused (window blur)");
            }
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt_ms = if g.last_time > 0.0 {
                (time - g.last_time) as f32
            } else {
                REFERENCE_FRAME_MS
            };
            g.last_time = time;

            g.update(dt_ms);
            g.render(time);
            g.update_overlays();
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
    log::info!("Dog Hunter (native) starting...");
    log::info!("Native mode has no window - build for wasm32 to play; running a headless demo");

    headless_demo(std::env::args().nth(1).and_then(|s| s.parse().ok()).unwrap_or(42));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one simulated minute with a wandering dog and report the outcome
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo(seed: u64) {
    use dog_hunter::consts::REFERENCE_FRAME_MS;
    use dog_hunter::sim::{FrameInput, GameEvent, SimRng};
    use dog_hunter::{MemoryStore, Session, Settings};

    let mut session = Session::new(MemoryStore::new(), SimRng::new(seed), Settings::default());
    session.new_game();

    let mut caught = 0;
    let mut sick = 0;
    for frame in 0..3600u32 {
        // Change heading every two seconds, sprinting for the first half
        let phase = (frame / 120) % 4;
        let input = FrameInput {
            up: phase == 0,
            right: phase == 1,
            down: phase == 2,
            left: phase == 3,
            sprint: frame % 120 < 60,
            pause: false,
        };
        for event in session.frame(&input, REFERENCE_FRAME_MS) {
            match event {
                GameEvent::EnemyCaught { .. } => caught += 1,
                GameEvent::SicknessInflicted => sick += 1,
                GameEvent::LevelUp { level } => log::info!("Level {level} reached"),
                _ => {}
            }
        }
    }

    if let Some(run) = session.run() {
        println!(
            "seed {seed}: level {} score {} bones {} treats {} caught {caught} sick {sick}",
            run.level, run.score, run.bones, run.treats
        );
    }
    if let Err(err) = session.exit_to_menu() {
        log::warn!("Final save failed: {err}");
    }
}
