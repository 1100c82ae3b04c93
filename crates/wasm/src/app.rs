//! Browser-side session state shared by listeners and frame callbacks.

use duck_dodge_core::input::{paints, PointerKind};
use duck_dodge_core::prng::Xorshift64;
use duck_dodge_core::render::Renderer;
use duck_dodge_core::{
    compose, CanvasRect, Control, Frame, FrameTiming, Game, GameConfig, Key, Phase, Sketch,
    UiState, View,
};
use web_sys::HtmlCanvasElement;

use crate::dom;

pub struct App {
    /// `None` when the canvas had no drawing context; frames are then skipped.
    renderer: Option<Renderer>,
    canvas: HtmlCanvasElement,
    ui: UiState,
    sketch: Sketch,
    config: GameConfig,
    game: Option<Game>,
    game_loop_active: bool,
    epoch_ms: f64,
    dirty: bool,
}

impl App {
    pub fn new(
        renderer: Option<Renderer>,
        canvas: HtmlCanvasElement,
        config: GameConfig,
    ) -> Self {
        if let Some(renderer) = &renderer {
            renderer.resize(canvas.width(), canvas.height());
        }
        Self {
            renderer,
            canvas,
            ui: UiState::default(),
            sketch: Sketch::new(),
            config,
            game: None,
            game_loop_active: false,
            epoch_ms: dom::now_ms(),
            dirty: true,
        }
    }

    /// Applies a UI control and leaves game display.
    pub fn control(&mut self, control: Control) {
        self.ui.apply(control);
        self.leave_game();
    }

    pub fn clear(&mut self) {
        self.sketch.clear();
        self.leave_game();
    }

    /// Paints at the pointer if the event qualifies. Ignored while a game runs.
    pub fn pointer(&mut self, kind: PointerKind, client_x: f32, client_y: f32, buttons: u16) {
        if !paints(kind, buttons) || self.game.as_ref().is_some_and(Game::is_running) {
            return;
        }
        let bounds = self.canvas.get_bounding_client_rect();
        let rect = match CanvasRect::new(
            bounds.left() as f32,
            bounds.top() as f32,
            self.canvas.width() as f32,
            self.canvas.height() as f32,
        ) {
            Ok(rect) => rect,
            Err(e) => {
                log::warn!("ignoring pointer event: {e}");
                return;
            }
        };
        self.sketch.paint(&self.ui.brush, rect.to_ndc(client_x, client_y));
        if self.ui.view != View::Sketch {
            self.ui.view = View::Sketch;
        }
        self.leave_game();
    }

    /// Routes a key to the game. Returns whether the key was consumed.
    pub fn key(&mut self, code: &str) -> bool {
        match (Key::from_code(code), self.game.as_mut()) {
            (Some(key), Some(game)) if game.is_running() => {
                game.press(key);
                true
            }
            _ => false,
        }
    }

    /// Starts a fresh game. Returns `true` if the caller must start a frame
    /// loop for it; a loop still running from the previous game is reused.
    pub fn start_game(&mut self, now_ms: f64) -> bool {
        let mut game = Game::with_rng(self.config, Xorshift64::from_timestamp_ms(now_ms));
        game.start(now_ms);
        self.game = Some(game);
        dom::set_visible(dom::GAME_OVER_ID, false);

        let spawn_loop = !self.game_loop_active;
        self.game_loop_active = true;
        spawn_loop
    }

    /// One game frame. Returns `false` once the game is over, which halts the
    /// game's frame loop.
    pub fn game_tick(&mut self, now_ms: f64) -> bool {
        let Some(game) = self.game.as_mut() else {
            self.game_loop_active = false;
            return false;
        };
        let Some(frame) = game.tick(now_ms) else {
            self.game_loop_active = false;
            return false;
        };
        let over = game.phase() == Phase::GameOver;
        self.present(&frame, None);
        if let Some(score) = &frame.overlay.score {
            dom::set_text(dom::SCORE_ID, score);
        }
        if let Some(banner) = &frame.overlay.game_over {
            dom::set_text(dom::GAME_OVER_ID, banner);
            dom::set_visible(dom::GAME_OVER_ID, true);
        }
        if over {
            self.game_loop_active = false;
        }
        !over
    }

    /// One scene frame. Redraws only when something changed or the rig is
    /// animating, and never while a game owns the canvas.
    pub fn scene_tick(&mut self, now_ms: f64) {
        if self.game.is_some() {
            return;
        }
        let animating =
            self.ui.view == View::Rig && (self.ui.animate_yellow || self.ui.animate_magenta);
        if !(self.dirty || animating) {
            return;
        }
        self.dirty = false;

        let seconds = (now_ms - self.epoch_ms) / 1000.0;
        let frame = compose(&self.ui, &self.sketch, seconds);
        let count = (self.ui.view == View::Sketch).then(|| self.sketch.len());
        self.present(&frame, count);
    }

    fn present(&self, frame: &Frame, shape_count: Option<usize>) {
        let Some(renderer) = &self.renderer else {
            return;
        };
        let start = dom::now_ms();
        renderer.execute(frame);
        let mut timing = FrameTiming::between(start, dom::now_ms());
        if let Some(n) = shape_count {
            timing = timing.with_shape_count(n);
        }
        dom::set_text(dom::TIMING_ID, &timing.to_string());
    }

    fn leave_game(&mut self) {
        if self.game.as_ref().is_some_and(Game::is_running) {
            return;
        }
        self.game = None;
        self.dirty = true;
    }
}
