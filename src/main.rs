//! Dino Dash entry point
//!
//! Handles platform-specific initialization and drives the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent};

    use dino_dash::consts::FIELD_HEIGHT;
    use dino_dash::renderer::CanvasPainter;
    use dino_dash::{Runner, Settings, UserProfile};

    const SPRITE_SHEET_URL: &str = "assets/obstacles.png";

    /// Game instance holding all state
    struct Game {
        runner: Runner,
        painter: CanvasPainter,
        canvas: HtmlCanvasElement,
        profile: UserProfile,
        settings: Settings,
        /// A frame callback is pending
        loop_active: bool,
        /// Autopilot plays instead of the player
        demo: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
            let settings = Settings::load();
            let profile = UserProfile::load();
            let seed = js_sys::Date::now() as u64;
            let mut painter = CanvasPainter::new(ctx);
            painter.high_contrast = settings.high_contrast;
            log::info!("Game initialized with seed: {}", seed);
            Self {
                runner: Runner::new(seed, settings.tuning(), profile.theme()),
                painter,
                canvas,
                profile,
                settings,
                loop_active: false,
                demo: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Match the canvas to its container width
        fn fit_canvas(&mut self) {
            let width = self
                .canvas
                .parent_element()
                .map(|p| p.client_width())
                .unwrap_or_else(|| self.canvas.client_width())
                .max(1) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(FIELD_HEIGHT as u32);
            self.runner.resize(width as f32, FIELD_HEIGHT);
        }

        /// Jump, start, or retry depending on where the run is
        fn press(&mut self) {
            let snapshot = self.runner.snapshot();
            if !snapshot.is_alive {
                self.prepare_run();
                self.runner.request_jump();
            } else if !snapshot.is_running {
                self.prepare_run();
                self.runner.start();
            } else {
                self.runner.request_jump();
            }
        }

        /// Fresh seed, current settings and theme for the next run
        fn prepare_run(&mut self) {
            self.runner.reseed(js_sys::Date::now() as u64);
            self.runner.set_tuning(self.settings.tuning());
            self.runner.set_theme(self.profile.theme());
        }

        /// One frame: advance, report, draw. Returns whether to schedule another.
        fn frame(&mut self, time: f64) -> bool {
            if self.demo {
                self.runner.autopilot();
            }
            let snapshot = self.runner.tick();

            if let Some(final_score) = self.runner.take_game_over() {
                if self.profile.record_score(final_score) {
                    self.profile.save();
                }
            }

            self.painter.draw(&self.runner.scene());
            self.track_fps(time);
            self.update_hud(snapshot.display_score);
            snapshot.is_running
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Oldest frame is the one about to be overwritten
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (59_000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, score: u64) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&format!("{:05}", score)));
            }
            if let Some(el) = document.get_element_by_id("hud-best") {
                el.set_text_content(Some(&format!("{:05}", self.profile.high_score)));
            }
            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&self.fps.to_string()));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dino Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let game = Rc::new(RefCell::new(Game::new(canvas.clone(), ctx)));
        {
            let mut g = game.borrow_mut();
            g.fit_canvas();
            let scene = g.runner.scene();
            g.painter.draw(&scene);
        }

        setup_input_handlers(&canvas, game.clone());
        setup_resize(game.clone());

        // Sprites are optional; flat colors stand in until (or unless) they load
        match load_image(SPRITE_SHEET_URL).await {
            Ok(image) => {
                game.borrow_mut().painter.set_sprite_sheet(image);
                log::info!("Sprite sheet loaded");
            }
            Err(e) => log::warn!("Sprite sheet unavailable: {:?}", e),
        }

        log::info!("Dino Dash ready");
    }

    async fn load_image(url: &str) -> Result<HtmlImageElement, JsValue> {
        let image = HtmlImageElement::new()?;
        image.set_src(url);
        JsFuture::from(image.decode()).await?;
        Ok(image)
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" | "ArrowUp" => {
                        event.prevent_default();
                        game.borrow_mut().press();
                    }
                    "KeyD" => {
                        let mut g = game.borrow_mut();
                        g.demo = !g.demo;
                        log::info!("Demo mode: {}", g.demo);
                    }
                    _ => {}
                }
                ensure_loop(game.clone());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Tap / click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::PointerEvent| {
                event.prevent_default();
                game.borrow_mut().press();
                ensure_loop(game.clone());
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.fit_canvas();
            // Keep a paused screen in sync with the new size
            if !g.loop_active {
                let scene = g.runner.scene();
                g.painter.draw(&scene);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Schedule a frame if the run is going and nothing is pending
    fn ensure_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.loop_active || !g.runner.snapshot().is_running {
                return;
            }
            g.loop_active = true;
        }
        request_animation_frame(game);
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
        let keep_going = {
            let mut g = game.borrow_mut();
            let keep_going = g.frame(time);
            g.loop_active = keep_going;
            keep_going
        };

        // The loop ends on game over; the next press restarts it
        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dino Dash (native) starting...");
    log::info!("Native mode runs headless with the autopilot - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024u64);
    let preset = args
        .next()
        .and_then(|s| dino_dash::TuningPreset::from_str(&s))
        .unwrap_or_default();
    let max_ticks = args.next().and_then(|s| s.parse().ok()).unwrap_or(20_000u64);

    headless_run(seed, preset, max_ticks);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn headless_run(seed: u64, preset: dino_dash::TuningPreset, max_ticks: u64) {
    use dino_dash::{Runner, UserProfile};

    let mut profile = UserProfile::load();
    let mut runner = Runner::new(seed, preset.tuning(), profile.theme());
    log::info!("Preset {} with seed {}", preset.as_str(), seed);

    runner.start();
    let mut ticks = 0u64;
    while ticks < max_ticks {
        runner.autopilot();
        if !runner.tick().is_running {
            break;
        }
        ticks += 1;
    }

    let snapshot = runner.snapshot();
    match runner.take_game_over() {
        Some(score) => {
            let best = profile.record_score(score);
            println!(
                "Crashed after {} ticks with score {}{}",
                runner.state().ticks,
                score,
                if best { " (new best)" } else { "" }
            );
        }
        None => println!(
            "Still running after {} ticks, score {}, speed {:.2}",
            ticks,
            snapshot.display_score,
            runner.state().scroll_speed
        ),
    }
}
