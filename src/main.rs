//! Sky Flap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use sky_flap::audio::WebAudio;
    use sky_flap::platform::storage::LocalStorage;
    use sky_flap::platform::{Action, InputSource, activation_for};
    use sky_flap::renderer::{RenderState, build_scene};
    use sky_flap::sim::SessionPhase;
    use sky_flap::{Game, Tuning};

    /// Browser app: game controller plus the GPU surface
    struct App {
        game: Game<LocalStorage, WebAudio>,
        render_state: Option<RenderState>,
        last_phase: SessionPhase,
    }

    impl App {
        fn new(seed: u64) -> Result<Self, JsValue> {
            let game = Game::new(Tuning::default(), seed, LocalStorage, WebAudio::new())
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(Self {
                game,
                render_state: None,
                last_phase: SessionPhase::Idle,
            })
        }

        /// Start/restart from the overlay buttons
        fn start(&mut self) {
            self.game.start();
            self.last_phase = SessionPhase::Running;
            if let Some(document) = document() {
                set_hidden(&document, "startScreen", true);
                set_hidden(&document, "gameOverScreen", true);
            }
        }

        fn frame(&mut self, time: f64) {
            let report = self.game.frame(time);
            if report.phase != self.last_phase {
                if report.phase == SessionPhase::Ended {
                    self.show_game_over();
                }
                self.last_phase = report.phase;
            }
            self.render();
        }

        fn render(&mut self) {
            let vertices = build_scene(self.game.session());
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn show_game_over(&self) {
            let Some(document) = document() else { return };
            let session = self.game.session();
            let final_score = session.final_score.unwrap_or(session.score());
            set_text(&document, "finalScore", final_score);
            set_text(&document, "highScore", session.best());
            set_hidden(&document, "gameOverScreen", false);
        }
    }

    fn document() -> Option<Document> {
        web_sys::window().and_then(|w| w.document())
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn set_text(document: &Document, id: &str, value: u64) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(&value.to_string()));
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {e}").into());
        }

        log::info!("Sky Flap starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Backing store at device resolution; the world is mapped onto it
        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed)?));
        set_text(&document, "highScore", app.borrow().game.session().best());

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let world = app.borrow().game.session().tuning.world();
        let render_state = RenderState::new(surface, &adapter, width, height, world)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        app.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, app.clone())?;
        setup_buttons(&document, app.clone())?;

        set_hidden(&document, "startScreen", false);
        request_animation_frame(app);

        log::info!("Sky Flap running!");
        Ok(())
    }

    fn dispatch(app: &Rc<RefCell<App>>, source: InputSource<'_>, time: f64) -> bool {
        let Some(action) = activation_for(source) else {
            return false;
        };
        let mut app = app.borrow_mut();
        app.game.handle(action, time);
        action == Action::Activate
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                // Keep Space from scrolling the page
                if dispatch(&app, InputSource::Key(&code), event.time_stamp()) {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse click
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                dispatch(&app, InputSource::Pointer, event.time_stamp());
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                dispatch(&app, InputSource::Touch, event.time_stamp());
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Start and restart both begin a fresh session
    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        for id in ["startButton", "restartButton"] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing #{id}");
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().start();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        // Scheduled regardless of phase
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;
    use std::time::{SystemTime, UNIX_EPOCH};

    use sky_flap::audio::SilentAudio;
    use sky_flap::platform::storage::JsonFileStore;
    use sky_flap::sim::SessionPhase;
    use sky_flap::{Game, Tuning};

    /// Where the native build keeps the best score
    const BEST_FILE: &str = "sky_flap_best.json";
    /// Synthetic frame rate
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Stop a run that survives this long
    const MAX_SECONDS: f64 = 300.0;

    /// `sky-flap [seed] [tuning.json]`
    pub fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
        let seed = match args.first() {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| format!("invalid seed {raw:?}: {e}"))?,
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default(),
        };

        let tuning = match args.get(1) {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .map_err(|e| format!("cannot read {path}: {e}"))?;
                log::info!("Loaded tuning from {path}");
                Tuning::from_json(&json)?
            }
            None => Tuning::default(),
        };

        let store = JsonFileStore::new(BEST_FILE);
        log::info!("Best score kept in {}", store.path().display());
        let mut game = Game::new(tuning, seed, store, SilentAudio)?;
        game.set_autopilot(true);
        game.start();

        let mut ts = 0.0;
        let mut phase = game.frame(ts).phase;
        while phase == SessionPhase::Running && ts < MAX_SECONDS * 1000.0 {
            ts += FRAME_MS;
            phase = game.frame(ts).phase;
        }

        let session = game.session();
        let outcome = if phase == SessionPhase::Ended {
            "crashed"
        } else {
            "time limit"
        };
        log::info!(
            "Headless run finished ({outcome}) after {:.1}s: score {}, best {}",
            session.elapsed,
            session.score(),
            session.best()
        );
        println!(
            "seed {seed}: score {} (best {}), {outcome} after {:.1}s",
            session.score(),
            session.best(),
            session.elapsed
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sky Flap (native) starting headless demo run...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = headless::run(&args) {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
