//! Nebula Strike entry point
//!
//! Browser builds drive the game from `requestAnimationFrame` on a 2D canvas.
//! Native builds run a short headless autopilot session and log what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

    use nebula_strike::render::TextAlign;
    use nebula_strike::sim::{Rect, UpgradeKind};
    use nebula_strike::{Color, Game, GameConfig, RenderSurface, UiSurface};

    /// `RenderSurface` over the page's 2D canvas context
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
    }

    impl CanvasSurface {
        fn trace_path(&self, points: &[Vec2]) {
            let Some((first, rest)) = points.split_first() else {
                return;
            };
            self.ctx.begin_path();
            self.ctx.move_to(first.x as f64, first.y as f64);
            for p in rest {
                self.ctx.line_to(p.x as f64, p.y as f64);
            }
            self.ctx.close_path();
        }

        fn trace_arc(&self, center: Vec2, radius: f32, start: f32, end: f32) -> bool {
            self.ctx.begin_path();
            self.ctx
                .arc(
                    center.x as f64,
                    center.y as f64,
                    radius as f64,
                    start as f64,
                    end as f64,
                )
                .is_ok()
        }
    }

    impl RenderSurface for CanvasSurface {
        fn clear(&mut self, width: f32, height: f32) {
            self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
        }

        fn set_fill(&mut self, color: Color) {
            self.ctx.set_fill_style_str(&color.css());
        }

        fn set_stroke(&mut self, color: Color) {
            self.ctx.set_stroke_style_str(&color.css());
        }

        fn set_line_width(&mut self, width: f32) {
            self.ctx.set_line_width(width as f64);
        }

        fn fill_rect(&mut self, rect: Rect) {
            self.ctx.fill_rect(
                rect.x() as f64,
                rect.y() as f64,
                rect.width() as f64,
                rect.height() as f64,
            );
        }

        fn stroke_rect(&mut self, rect: Rect) {
            self.ctx.stroke_rect(
                rect.x() as f64,
                rect.y() as f64,
                rect.width() as f64,
                rect.height() as f64,
            );
        }

        fn fill_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32) {
            if self.trace_arc(center, radius, start, end) {
                self.ctx.fill();
            }
        }

        fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32) {
            if self.trace_arc(center, radius, start, end) {
                self.ctx.stroke();
            }
        }

        fn fill_path(&mut self, points: &[Vec2]) {
            self.trace_path(points);
            self.ctx.fill();
        }

        fn fill_text(&mut self, text: &str, pos: Vec2, size: f32, align: TextAlign) {
            self.ctx.set_font(&format!("{size}px Arial"));
            self.ctx.set_text_align(match align {
                TextAlign::Left => "left",
                TextAlign::Center => "center",
            });
            let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
        }
    }

    /// `UiSurface` over the page's HUD and overlay elements
    struct DomUi {
        document: Document,
    }

    impl DomUi {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_class(&self, id: &str, class: &str, on: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let list = el.class_list();
                let _ = if on { list.add_1(class) } else { list.remove_1(class) };
            }
        }
    }

    impl UiSurface for DomUi {
        fn set_score(&mut self, score: u64) {
            self.set_text("score", &score.to_string());
        }

        fn set_lives(&mut self, lives: u32) {
            self.set_text("lives", &lives.to_string());
        }

        fn set_stage(&mut self, stage: u32) {
            self.set_text("stage", &stage.to_string());
        }

        fn set_slot_selected(&mut self, slot: UpgradeKind, selected: bool) {
            self.set_class(slot.slot_id(), "selected", selected);
        }

        fn set_start_visible(&mut self, visible: bool) {
            self.set_class("start-screen", "hidden", !visible);
        }

        fn set_game_over_visible(&mut self, visible: bool) {
            self.set_class("game-over", "hidden", !visible);
        }

        fn set_final_score(&mut self, score: u64) {
            self.set_text("final-score", &score.to_string());
        }
    }

    /// Everything the frame and key callbacks share
    struct App {
        game: Game,
        surface: CanvasSurface,
        ui: DomUi,
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Nebula Strike starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let config = GameConfig {
            width: canvas.width() as f32,
            height: canvas.height() as f32,
            seed: js_sys::Date::now() as u64,
            ..Default::default()
        };
        log::info!("Seed: {}", config.seed);

        let app = Rc::new(RefCell::new(App {
            game: Game::new(config),
            surface: CanvasSurface { ctx },
            ui: DomUi { document },
        }));
        {
            let mut a = app.borrow_mut();
            let App { game, ui, .. } = &mut *a;
            game.apply_ui(ui);
        }

        setup_input_handlers(&window, app.clone())?;
        request_animation_frame(app);
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                let App { game, ui, .. } = &mut *a;
                if game.key_down_code(&event.code()) {
                    event.prevent_default();
                    game.apply_ui(ui);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.key_up_code(&event.code());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let App { game, surface, ui } = &mut *a;
            game.frame(time, surface, ui);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Nebula Strike (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play in a browser");

    let config = load_config(std::env::args().nth(1));
    headless::run(config);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Config from an optional JSON path, falling back to defaults
#[cfg(not(target_arch = "wasm32"))]
fn load_config(path: Option<String>) -> nebula_strike::GameConfig {
    use nebula_strike::GameConfig;

    let Some(path) = path else {
        return GameConfig::default();
    };
    let loaded = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| GameConfig::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(config) => {
            log::info!("Loaded config from {path}");
            config
        }
        Err(e) => {
            log::warn!("Could not load config {path}: {e}, using defaults");
            GameConfig::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use nebula_strike::sim::GamePhase;
    use nebula_strike::{DrawList, Game, GameConfig, HudState, Key};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const DEMO_FRAMES: u32 = 60 * 60;
    /// Frames between changes of vertical direction
    const WEAVE_PERIOD: u32 = 90;

    /// Fly a scripted pilot: always firing, weaving up and down, spending the
    /// meter whenever it lights up
    pub fn run(config: GameConfig) {
        let mut game = Game::new(config);
        let mut surface = DrawList::new();
        let config = game.session.config();
        log::info!(
            "Headless run: {}x{} playfield, seed {}",
            config.width,
            config.height,
            config.seed
        );
        let mut hud = HudState::default();

        game.key_down(Key::Confirm);
        game.key_up(Key::Confirm);
        game.key_down(Key::Fire);

        let mut frames = 0;
        for frame in 0..DEMO_FRAMES {
            steer(&mut game, frame);
            if game.session.state().meter.is_active() {
                game.key_down(Key::Activate);
                game.key_up(Key::Activate);
            }

            surface.reset();
            game.frame(frame as f64 * FRAME_MS, &mut surface, &mut hud);
            frames += 1;

            if game.session.phase() == GamePhase::Over {
                break;
            }
        }

        let player = &game.session.player;
        log::info!(
            "Demo finished after {frames} frames: score {}, lives {}, phase {:?}",
            hud.score,
            hud.lives,
            game.session.phase()
        );
        log::info!(
            "Ship: speed level {}, options {}, shield {}",
            player.speed_level(),
            player.followers().len(),
            player.has_shield()
        );
        log::info!("Last frame issued {} draw commands", surface.commands.len());
    }

    fn steer(game: &mut Game, frame: u32) {
        let (hold, release) = if (frame / WEAVE_PERIOD) % 2 == 0 {
            (Key::Up, Key::Down)
        } else {
            (Key::Down, Key::Up)
        };
        game.key_up(release);
        game.key_down(hold);
    }
}
