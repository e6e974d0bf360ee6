//! Snack Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        CanvasRenderingContext2d, HtmlButtonElement, HtmlCanvasElement, HtmlImageElement,
        MouseEvent,
    };

    use snack_breaker::assets::Sprites;
    use snack_breaker::consts::*;
    use snack_breaker::render::{Anchor, HAlign, Rgb, Surface, TextStyle, VAlign, draw_frame};
    use snack_breaker::sim::{GameEvent, GameState, TickInput, tick};
    use snack_breaker::ui::RestartControl;

    /// Canvas 2D context as a drawing surface
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
    }

    fn top_left(pos: Vec2, size: Vec2, anchor: Anchor) -> Vec2 {
        match anchor {
            Anchor::Corner => pos,
            Anchor::Center => pos - size / 2.0,
        }
    }

    impl Surface for CanvasSurface {
        type Image = HtmlImageElement;

        fn draw_image(&mut self, image: &HtmlImageElement, pos: Vec2, size: Vec2, anchor: Anchor) {
            let origin = top_left(pos, size, anchor);
            let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                image,
                origin.x as f64,
                origin.y as f64,
                size.x as f64,
                size.y as f64,
            );
        }

        fn fill_rect(&mut self, pos: Vec2, size: Vec2, anchor: Anchor, color: Rgb) {
            let origin = top_left(pos, size, anchor);
            self.ctx.set_fill_style_str(&color.to_css());
            self.ctx
                .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
        }

        fn fill_text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
            self.ctx.set_fill_style_str(&style.color.to_css());
            self.ctx.set_font(&format!("{}px sans-serif", style.size));
            self.ctx.set_text_align(match style.h_align {
                HAlign::Left => "left",
                HAlign::Center => "center",
            });
            self.ctx.set_text_baseline(match style.v_align {
                VAlign::Top => "top",
                VAlign::Middle => "middle",
            });
            let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
        }

        fn save(&mut self) {
            self.ctx.save();
        }

        fn restore(&mut self) {
            self.ctx.restore();
        }

        fn translate(&mut self, offset: Vec2) {
            let _ = self.ctx.translate(offset.x as f64, offset.y as f64);
        }

        fn rotate(&mut self, radians: f32) {
            let _ = self.ctx.rotate(radians as f64);
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        surface: CanvasSurface,
        sprites: Sprites<HtmlImageElement>,
        canvas: HtmlCanvasElement,
        restart_button: Option<HtmlButtonElement>,
    }

    impl Game {
        /// Run one simulation tick and draw it
        fn frame(&mut self) {
            let input = self.input.clone();
            tick(&mut self.state, &input);

            // Clear one-shot inputs after processing
            self.input.restart = false;

            for event in &self.state.events {
                match event {
                    GameEvent::Won { score } => log::info!("You win! Score: {}", score),
                    GameEvent::Lost { score } => log::info!("Game over. Score: {}", score),
                    GameEvent::Restarted => log::info!("New round started"),
                    _ => {}
                }
            }

            draw_frame(&mut self.surface, &self.state, &self.sprites);
        }

        fn remove_restart_button(&mut self) {
            if let Some(btn) = self.restart_button.take() {
                btn.remove();
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Snack Breaker starting...");

        if let Err(e) = start().await {
            log::error!("Startup failed: {:?}", e);
        }
    }

    async fn start() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        // Every sprite must be decoded before the first frame
        let sprites = Sprites::load_with(|path| -> Result<HtmlImageElement, JsValue> {
            let img = HtmlImageElement::new()?;
            img.set_src(path);
            Ok(img)
        })?;
        let all_images = std::iter::once(&sprites.background)
            .chain(std::iter::once(&sprites.ball))
            .chain(sprites.obstacles.iter());
        for img in all_images {
            JsFuture::from(img.decode()).await?;
        }
        log::info!("Loaded {} sprites", 2 + sprites.obstacles.len());

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed),
            input: TickInput::default(),
            surface: CanvasSurface { ctx },
            sprites,
            canvas: canvas.clone(),
            restart_button: None,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Snack Breaker running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Paddle follows the pointer's horizontal position
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            game.borrow_mut().input.pointer_x = Some(event.offset_x() as f32);
        });
        let _ =
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Create or remove the DOM button so it mirrors the session's restart control
    fn sync_restart_button(g: &mut Game, game: &Rc<RefCell<Game>>) {
        if g.restart_button.is_none() {
            if let Some(control) = &g.state.restart_control {
                match create_restart_button(control, &g.canvas, game) {
                    Ok(btn) => g.restart_button = Some(btn),
                    Err(e) => log::error!("Failed to create restart button: {:?}", e),
                }
            }
        } else if g.state.restart_control.is_none() {
            g.remove_restart_button();
        }
    }

    fn create_restart_button(
        control: &RestartControl,
        canvas: &HtmlCanvasElement,
        game: &Rc<RefCell<Game>>,
    ) -> Result<HtmlButtonElement, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;
        let btn: HtmlButtonElement = document.create_element("button")?.dyn_into()?;
        btn.set_text_content(Some(&control.label));

        let left = canvas.offset_left() as f32 + control.pos.x;
        let top = canvas.offset_top() as f32 + control.pos.y;
        let style = btn.style();
        style.set_property("position", "absolute")?;
        style.set_property("left", &format!("{left}px"))?;
        style.set_property("top", &format!("{top}px"))?;
        style.set_property("width", &format!("{}px", control.size.x))?;
        style.set_property("height", &format!("{}px", control.size.y))?;
        style.set_property("font-size", &format!("{}px", control.font_size_px))?;

        // The click only queues the request; the next tick performs the reset
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            game.borrow_mut().input.restart = true;
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();

        document.body().ok_or("no body")?.append_child(&btn)?;
        Ok(btn)
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.frame();
            sync_restart_button(&mut g, &game);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Snack Breaker (native) starting...");
    log::info!("Native mode runs a headless autopilot - build for wasm32 to play");

    let mut args = std::env::args().skip(1);

    let seed: u64 = match args.next() {
        Some(arg) => arg.parse().unwrap_or_else(|e| {
            log::warn!("Invalid seed {:?} ({}), using 0", arg, e);
            0
        }),
        None => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0),
    };

    let tuning = match args.next() {
        Some(path) => native::load_tuning(&path).unwrap_or_else(|e| {
            log::error!("Could not load tuning from {}: {}", path, e);
            snack_breaker::Tuning::default()
        }),
        None => snack_breaker::Tuning::default(),
    };

    native::run_autopilot(seed, tuning, 3);
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use snack_breaker::Tuning;
    use snack_breaker::consts::OBSTACLE_COUNT;
    use snack_breaker::sim::{GameEvent, GamePhase, GameState, TickInput, count_crowded_pairs, tick};

    /// Give up on a round after this many frames (about five minutes at 60 Hz)
    const MAX_FRAMES_PER_ROUND: u64 = 60 * 60 * 5;

    pub fn load_tuning(path: &str) -> Result<Tuning, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        Ok(Tuning::from_json(&json)?)
    }

    /// Play `rounds` rounds with a pointer that shadows the ball
    pub fn run_autopilot(seed: u64, tuning: Tuning, rounds: u32) {
        let mut state = GameState::with_tuning(seed, tuning);
        log::info!(
            "Seed {}: {} obstacles placed, {} crowded pair(s)",
            seed,
            state.obstacles.len(),
            count_crowded_pairs(&state.obstacles, state.tuning.spacing_divisor)
        );

        let mut input = TickInput::default();
        for round in 1..=rounds {
            while state.phase == GamePhase::Playing && state.time_ticks < MAX_FRAMES_PER_ROUND {
                // Aim off-center a little so rebounds vary
                let wobble = (state.time_ticks as f32 * 0.01).sin() * 40.0;
                input.pointer_x = Some(state.ball.pos.x + wobble);
                tick(&mut state, &input);

                for event in &state.events {
                    if let GameEvent::ObstacleDestroyed { pos, variant } = event {
                        log::debug!("Destroyed variant {} at ({:.0}, {:.0})", variant, pos.x, pos.y);
                    }
                }
            }

            log::info!(
                "Round {}: {:?} after {} frames, score {} ({} of {} cleared)",
                round,
                state.phase,
                state.time_ticks,
                state.score,
                state.cleared(),
                OBSTACLE_COUNT
            );

            if round == rounds {
                break;
            }

            // Click the middle of the restart button, like a player would
            if let Some(control) = &state.restart_control {
                let click = control.pos + control.size / 2.0;
                input.restart = control.contains(click);
            } else {
                // Round timed out while playing; start over from scratch
                let tuning = state.tuning.clone();
                state = GameState::with_tuning(seed.wrapping_add(u64::from(round)), tuning);
                continue;
            }
            tick(&mut state, &input);
            input.restart = false;
        }
    }
}
