//! Game state and core simulation types
//!
//! The session owns every entity; nothing outside the simulation step and the
//! renderer holds a reference into it.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::field::generate_field;
use crate::consts::*;
use crate::constrain;
use crate::tuning::Tuning;
use crate::ui::RestartControl;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Every obstacle cleared
    Win,
    /// Ball fell below the canvas
    Lose,
}

impl GamePhase {
    /// True for the phases that end a run
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Win | GamePhase::Lose)
    }
}

/// The player's paddle (center-anchored rectangle)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                CANVAS_WIDTH / 2.0,
                CANVAS_HEIGHT - tuning.paddle_bottom_offset,
            ),
            width: tuning.paddle_width,
            height: tuning.paddle_height,
        }
    }

    /// Follow the pointer, keeping the whole paddle on the canvas
    pub fn track(&mut self, pointer_x: f32) {
        let half = self.width / 2.0;
        self.pos.x = constrain(pointer_x, half, CANVAS_WIDTH - half);
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Y coordinate of the paddle's upper edge
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.height / 2.0
    }

    /// Check if `x` lies strictly inside the paddle's horizontal span
    #[inline]
    pub fn spans(&self, x: f32) -> bool {
        x > self.pos.x - self.width / 2.0 && x < self.pos.x + self.width / 2.0
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Velocity in pixels per frame
    pub vel: Vec2,
    pub radius: f32,
    pub max_speed: f32,
    /// Sprite rotation (radians)
    pub angle: f32,
    /// Rotation kick applied on paddle hits, scaled by hit offset
    pub spin: f32,
}

impl Ball {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT - tuning.ball_bottom_offset),
            vel: Vec2::new(tuning.ball_start_dx, tuning.ball_start_dy),
            radius: tuning.ball_radius,
            max_speed: tuning.ball_max_speed,
            angle: 0.0,
            spin: tuning.ball_spin,
        }
    }

    /// Advance one frame; the sprite rolls with horizontal motion
    pub fn integrate(&mut self, rotation_coupling: f32) {
        self.pos += self.vel;
        self.angle += self.vel.x * rotation_coupling;
    }

    /// Multiply both velocity axes, then clamp each to `[-max_speed, max_speed]`
    pub fn boost(&mut self, factor: f32) {
        self.vel *= factor;
        self.vel.x = constrain(self.vel.x, -self.max_speed, self.max_speed);
        self.vel.y = constrain(self.vel.y, -self.max_speed, self.max_speed);
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// A destructible obstacle (center-anchored rectangle)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Index into the obstacle sprite palette
    pub variant: usize,
}

/// Things that happened during a tick (for hosts and tests)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball reflected off the left, right or top wall
    WallBounce,
    /// Ball hit the paddle; offset is -1 (left edge) to +1 (right edge)
    PaddleHit { offset: f32 },
    /// Obstacle removed by the ball
    ObstacleDestroyed { pos: Vec2, variant: usize },
    Won { score: u32 },
    Lost { score: u32 },
    Restarted,
}

/// RNG state wrapper for serialization
///
/// Every obstacle field draws from its own PCG stream, so the full run
/// (restarts included) replays from the seed alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Hand out the generator for the next field and advance the stream
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u32,
    /// Frames simulated in the current round
    pub time_ticks: u64,
    /// Completed restarts since the session began
    pub restarts: u32,
    pub paddle: Paddle,
    pub ball: Ball,
    pub obstacles: Vec<Obstacle>,
    /// Present only while a terminal phase waits for the player
    pub restart_control: Option<RestartControl>,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new session with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            paddle: Paddle::new(&tuning),
            ball: Ball::new(&tuning),
            tuning,
            phase: GamePhase::Playing,
            score: 0,
            time_ticks: 0,
            restarts: 0,
            obstacles: Vec::with_capacity(OBSTACLE_COUNT),
            restart_control: None,
            events: Vec::new(),
        };
        state.populate_field();
        state
    }

    /// Reinitialize everything for a fresh round
    pub fn reset(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.time_ticks = 0;
        self.remove_restart_control();
        self.paddle = Paddle::new(&self.tuning);
        self.ball = Ball::new(&self.tuning);
        self.populate_field();
        self.restarts += 1;
    }

    fn populate_field(&mut self) {
        let mut rng = self.rng_state.next_rng();
        let field = generate_field(&mut rng, OBSTACLE_COUNT, &self.tuning);
        if field.forced_placements > 0 {
            log::debug!(
                "Obstacle field accepted {} overlapping placement(s)",
                field.forced_placements
            );
        }
        self.obstacles = field.obstacles;
    }

    /// Show the restart control, replacing any existing one
    pub fn show_restart_control(&mut self) {
        self.restart_control = Some(RestartControl::play_again());
    }

    /// Remove the restart control. Removing an absent control is a no-op.
    pub fn remove_restart_control(&mut self) -> Option<RestartControl> {
        self.restart_control.take()
    }

    /// Obstacles destroyed so far this round
    pub fn cleared(&self) -> usize {
        OBSTACLE_COUNT.saturating_sub(self.obstacles.len())
    }
}
