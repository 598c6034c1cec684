//! BlokSpace entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use blokspace::audio::{AudioManager, SoundCue};
    use blokspace::platform::{Action, Controls};
    use blokspace::renderer::{RenderState, build_scene};
    use blokspace::sim::{GameEvent, GameState, tick};
    use blokspace::{Hud, Presenter, Settings, present};

    /// Draws to the canvas and drives the DOM HUD, overlays, and audio
    struct WebPresenter {
        document: Document,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        fps: u32,
    }

    impl WebPresenter {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let classes = el.class_list();
                let result = if hidden {
                    classes.add_1("hidden")
                } else {
                    classes.remove_1("hidden")
                };
                if result.is_err() {
                    log::warn!("Failed to toggle #{}", id);
                }
            }
        }

        fn set_button(&self, id: &str, icon: &str, label: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_inner_html(&format!(
                    "<span class=\"btn-icon\">{}</span><span class=\"btn-text\">{}</span>",
                    icon, label
                ));
            }
        }

        fn toggle_mute(&mut self) {
            let muted = self.audio.toggle_muted();
            self.show_mute(muted);
        }

        fn show_mute(&self, muted: bool) {
            let icon = if muted { "\u{1f507}" } else { "\u{1f50a}" };
            self.set_button("muteBtn", icon, "Sound");
        }
    }

    impl Presenter for WebPresenter {
        fn render(&mut self, state: &GameState, now_ms: f64) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            render_state.set_world(state.world);
            let vertices = build_scene(state, now_ms, &self.settings);
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

        fn update_hud(&mut self, hud: &Hud) {
            self.set_text("score", &hud.score.to_string());
            self.set_text("lives", &hud.lives.to_string());
            self.set_text("level", &hud.level.to_string());
            if self.settings.show_fps {
                self.set_text("fps", &self.fps.to_string());
            }
        }

        fn play_cue(&mut self, cue: SoundCue) {
            self.audio.play(cue);
        }

        fn on_event(&mut self, event: &GameEvent) {
            match event {
                GameEvent::Paused => {
                    self.set_hidden("pauseScreen", false);
                    self.set_button("pauseBtn", "\u{25b6}\u{fe0f}", "Resume");
                }
                GameEvent::Resumed => {
                    self.set_hidden("pauseScreen", true);
                    self.set_button("pauseBtn", "\u{23f8}\u{fe0f}", "Pause");
                }
                GameEvent::GameOver { score } => {
                    self.set_text("finalScore", &score.to_string());
                    self.set_hidden("gameOverScreen", false);
                }
                GameEvent::Reset => {
                    self.set_hidden("gameOverScreen", true);
                    self.set_hidden("pauseScreen", true);
                    self.set_button("pauseBtn", "\u{23f8}\u{fe0f}", "Pause");
                }
                _ => {}
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        controls: Controls,
        presenter: WebPresenter,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
    }

    impl Game {
        /// One display refresh: input, tick, present
        fn frame(&mut self, time: f64) {
            let dt = time - self.last_time;
            self.last_time = time;

            if self.controls.take_mute() {
                self.presenter.toggle_mute();
            }

            let input = self.controls.take_input();
            tick(&mut self.state, &input, time, dt);

            self.track_fps(time);
            present(&mut self.state, &mut self.presenter, time);
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Oldest sample sits at the next write slot
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.presenter.fps = (59000.0 / elapsed).round() as u32;
                }
            }
        }
    }

    fn err(msg: &str) -> JsValue {
        JsValue::from_str(msg)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("BlokSpace starting...");

        let window = web_sys::window().ok_or_else(|| err("no window"))?;
        let document = window.document().ok_or_else(|| err("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| err("no canvas"))?
            .dyn_into()?;
        let (width, height) = backing_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        if let Some(el) = document.get_element_by_id("currentYear") {
            let year = js_sys::Date::new_0().get_full_year();
            el.set_text_content(Some(&year.to_string()));
        }

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let state = GameState::new(seed);
        log::info!("Game initialized with seed: {}", seed);

        let render_state = init_gpu(canvas.clone(), width, height, &state).await;
        if render_state.is_none() {
            log::warn!("WebGPU unavailable - running without rendering");
        }

        let mut presenter = WebPresenter {
            document,
            render_state,
            audio: AudioManager::from_settings(&settings),
            settings,
            fps: 0,
        };
        presenter.show_mute(presenter.audio.is_muted());
        presenter.update_hud(&Hud::from_state(&state));

        let game = Rc::new(RefCell::new(Game {
            state,
            controls: Controls::new(),
            presenter,
            last_time: 0.0,
            frame_times: [0.0; 60],
            frame_index: 0,
        }));

        setup_keyboard(game.clone())?;
        setup_buttons(game.clone())?;
        setup_touch_controls(game.clone())?;
        setup_window_events(&canvas, game.clone())?;

        request_animation_frame(game);

        log::info!("BlokSpace running!");
        Ok(())
    }

    /// Canvas pixel size for its CSS size
    fn backing_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width().max(1) as f64 * dpr) as u32;
        let height = (canvas.client_height().max(1) as f64 * dpr) as u32;
        (width, height)
    }

    async fn init_gpu(
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
        state: &GameState,
    ) -> Option<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| log::warn!("Failed to create surface: {}", e))
            .ok()?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| log::warn!("Failed to get adapter: {}", e))
            .ok()?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, state.world)
            .await
            .map_err(|e| log::warn!("Failed to create device: {}", e))
            .ok()
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| err("no window"))?;
        let document = window.document().ok_or_else(|| err("no document"))?;

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                // Browsers only start audio from a user gesture
                g.presenter.audio.resume();
                let phase = g.state.phase;
                if g.controls.key_down(&event.code(), phase) {
                    event.prevent_default();
                }
            });
            document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().controls.key_up(&event.code());
            });
            document.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| err("no window"))?;
        let document = window.document().ok_or_else(|| err("no document"))?;

        let bindings = [
            ("pauseBtn", Action::Pause),
            ("resetBtn", Action::Reset),
            ("muteBtn", Action::Mute),
            ("restartBtn", Action::Reset),
        ];

        for (id, action) in bindings {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing button #{}", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.presenter.audio.resume();
                g.controls.trigger(action);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_touch_controls(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| err("no window"))?;
        let document = window.document().ok_or_else(|| err("no document"))?;

        let buttons = document.query_selector_all(".dpad-btn, .action-btn")?;
        for i in 0..buttons.length() {
            let Some(el) = buttons
                .item(i)
                .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            let Some(key) = el.get_attribute("data-key") else {
                continue;
            };

            {
                let game = game.clone();
                let key = key.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    game.borrow_mut().controls.touch_start(&key);
                });
                el.add_event_listener_with_callback(
                    "touchstart",
                    closure.as_ref().unchecked_ref(),
                )?;
                closure.forget();
            }

            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    game.borrow_mut().controls.touch_end(&key);
                });
                el.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
        }

        Ok(())
    }

    fn setup_window_events(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| err("no window"))?;

        // No context menu on the playfield
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
            });
            canvas
                .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keep the backing store matched to the CSS size
        {
            let game = game.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::UiEvent| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let (width, height) = backing_size(&window, &canvas);
                canvas.set_width(width);
                canvas.set_height(height);
                if let Some(render_state) = game.borrow_mut().presenter.render_state.as_mut() {
                    render_state.resize(width, height);
                }
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Focus loss releases held controls, optionally pausing
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.controls.release_all();
                if g.presenter.settings.pause_on_blur {
                    let phase = g.state.phase;
                    g.controls.force_pause(phase);
                    log::info!("Pausing (window blur)");
                }
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
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
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use blokspace::audio::AudioManager;
    use blokspace::sim::{GamePhase, GameState, MoveIntent, TickInput, tick};
    use blokspace::{Headless, Settings, present};

    /// Headless session length at 60 Hz
    const FRAMES: u32 = 60 * 60;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Steer under the nearest enemy and keep firing
    fn autopilot(state: &GameState) -> TickInput {
        let player_x = state.player.rect().center().x;
        let target = state
            .enemies
            .iter()
            .map(|enemy| enemy.center().x)
            .min_by(|a, b| (a - player_x).abs().total_cmp(&(b - player_x).abs()));

        let mut movement = MoveIntent::default();
        if let Some(target_x) = target {
            movement.left = target_x < player_x - state.player.speed;
            movement.right = target_x > player_x + state.player.speed;
        }

        TickInput {
            movement,
            fire: true,
            ..Default::default()
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("BlokSpace (native) starting...");
        log::info!("Native mode runs a headless autopilot session - use `trunk serve` to play");

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
        log::info!("Game initialized with seed: {}", seed);

        let audio = AudioManager::from_settings(&settings);
        let mut state = GameState::new(seed);
        let mut presenter = Headless::new(audio.is_muted());

        let mut now = 0.0;
        for _ in 0..FRAMES {
            now += FRAME_MS;
            let input = autopilot(&state);
            tick(&mut state, &input, now, FRAME_MS);

            let first_cue = presenter.cues.len();
            present(&mut state, &mut presenter, now);
            for cue in &presenter.cues[first_cue..] {
                audio.play(*cue);
            }

            if state.phase == GamePhase::GameOver {
                break;
            }
        }

        log::info!(
            "Session ended after {:.1}s: score {}, lives {}, level {}, {} cues",
            now / 1000.0,
            state.score,
            state.lives,
            state.level,
            presenter.cues.len()
        );
        println!(
            "score={} lives={} phase={:?} frames={}",
            state.score, state.lives, state.phase, presenter.frames
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
