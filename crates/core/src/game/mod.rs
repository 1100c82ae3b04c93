//! The obstacle-dodging game loop.
//!
//! [`Game`] is a state machine `Idle → Running → GameOver`. The host calls
//! [`Game::start`] once, then [`Game::tick`] once per animation frame with a
//! monotonic timestamp. Each running tick:
//!
//! 1. measures `dt` since the previous tick,
//! 2. advances every obstacle by its speed,
//! 3. culls obstacles past the left boundary,
//! 4. spawns one obstacle if the spawn interval has elapsed,
//! 5. tests every obstacle against the duck's body circle,
//! 6. moves to `GameOver` on any hit,
//! 7. accrues `dt * score_rate` if still running,
//! 8. returns the frame to draw.
//!
//! Once `GameOver` is reached the game stays there until the next `start`;
//! further ticks return `None` so the host stops rescheduling.

pub mod config;
pub mod duck;
pub mod obstacle;

pub use config::GameConfig;
pub use duck::{Duck, Key};
pub use obstacle::Obstacle;

use crate::color::Rgba;
use crate::command::{Frame, Overlay};
use crate::prng::Xorshift64;
use serde::{Deserialize, Serialize};

/// Lifecycle of a game session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Running,
    GameOver,
}

/// Mutable per-session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,
    pub duck: Duck,
    pub obstacles: Vec<Obstacle>,
    pub score: f64,
    pub last_update_ms: f64,
    pub last_spawn_ms: f64,
}

impl GameState {
    fn new(config: &GameConfig) -> Self {
        Self {
            phase: Phase::Idle,
            duck: Duck::new(config.duck_start),
            obstacles: Vec::new(),
            score: 0.0,
            last_update_ms: 0.0,
            last_spawn_ms: 0.0,
        }
    }

    /// Score as shown to the player.
    pub fn display_score(&self) -> u64 {
        self.score.floor() as u64
    }
}

/// A game session: configuration, state, and its obstacle RNG.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    state: GameState,
    rng: Xorshift64,
}

impl Game {
    /// Creates an idle game. `seed` determines every spawned obstacle.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, Xorshift64::new(seed))
    }

    /// Creates an idle game drawing obstacles from `rng`.
    pub fn with_rng(config: GameConfig, rng: Xorshift64) -> Self {
        Self {
            state: GameState::new(&config),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for hosts that restore or script a session.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == Phase::Running
    }

    /// Resets the session and begins running at `now_ms`.
    ///
    /// Both the update and spawn clocks start at `now_ms`, so the first tick
    /// sees a near-zero `dt` and the first spawn waits a full interval.
    pub fn start(&mut self, now_ms: f64) {
        self.state = GameState {
            phase: Phase::Running,
            duck: Duck::new(self.config.duck_start),
            obstacles: Vec::new(),
            score: 0.0,
            last_update_ms: now_ms,
            last_spawn_ms: now_ms,
        };
        log::info!("game started at {now_ms:.1} ms");
    }

    /// Applies a movement key. Accepted in every phase.
    pub fn press(&mut self, key: Key) {
        self.state.duck.press(key, &self.config);
    }

    /// Advances one frame at `now_ms` and returns what to draw.
    ///
    /// Returns `None` unless the game was running when called. The tick that
    /// ends the game still returns a frame, carrying the game-over banner.
    pub fn tick(&mut self, now_ms: f64) -> Option<Frame> {
        if self.state.phase != Phase::Running {
            return None;
        }

        // A host clock that steps backwards must not reduce the score.
        let dt = (now_ms - self.state.last_update_ms).max(0.0);
        self.state.last_update_ms = now_ms;

        for obstacle in &mut self.state.obstacles {
            obstacle.advance();
        }

        let left = self.config.left_boundary;
        let before = self.state.obstacles.len();
        self.state.obstacles.retain(|o| !o.is_past(left));
        let culled = before - self.state.obstacles.len();
        if culled > 0 {
            log::debug!("culled {culled} obstacle(s)");
        }

        if now_ms - self.state.last_spawn_ms > self.config.spawn_interval_ms {
            let obstacle = Obstacle::spawn(&self.config, &mut self.rng);
            log::debug!(
                "spawned obstacle y={:.3} r={:.3} speed={:.4}",
                obstacle.y,
                obstacle.radius,
                obstacle.speed
            );
            self.state.obstacles.push(obstacle);
            self.state.last_spawn_ms = now_ms;
        }

        if self.duck_hit() {
            self.state.phase = Phase::GameOver;
            log::info!("game over, final score {}", self.state.display_score());
        }

        if self.state.phase == Phase::Running {
            self.state.score += dt * self.config.score_rate;
        }

        Some(self.frame())
    }

    /// Whether any obstacle overlaps the duck's body circle.
    pub fn duck_hit(&self) -> bool {
        let center = self.state.duck.body_center(&self.config);
        self.state
            .obstacles
            .iter()
            .any(|o| o.collides_with(center, self.config.duck_radius))
    }

    /// Draws the current state without advancing it.
    pub fn frame(&self) -> Frame {
        let mut frame = Frame::new(Rgba::BLACK);
        frame.push(duck::water());
        frame.extend(self.state.duck.figure());
        frame.extend(self.state.obstacles.iter().map(Obstacle::draw_call));

        let score = self.state.display_score();
        frame.overlay = Overlay {
            score: Some(format!("Score: {score}")),
            game_over: (self.state.phase == Phase::GameOver)
                .then(|| format!("Game Over! Final Score: {score}")),
        };
        frame
    }
}
