//! Data-driven game balance
//!
//! Every number that shapes how the game plays lives here. Defaults match the
//! shipped game; a JSON document can override any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Errors produced while loading tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Distance from the canvas bottom to the paddle center
    pub paddle_bottom_offset: f32,
    /// Speed multiplier applied on every paddle hit
    pub paddle_boost: f32,
    /// Slowest upward speed the ball may leave the paddle with
    pub min_rebound_speed: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Distance from the canvas bottom to the ball spawn point
    pub ball_bottom_offset: f32,
    pub ball_start_dx: f32,
    pub ball_start_dy: f32,
    pub ball_max_speed: f32,
    /// Rotation kick per unit of paddle hit offset (radians)
    pub ball_spin: f32,
    /// Rotation per frame per unit of horizontal velocity (radians)
    pub rotation_coupling: f32,
    /// Speed multiplier applied on every obstacle hit
    pub obstacle_boost: f32,

    // === Obstacle field ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    /// Horizontal inset of obstacle centers from the side walls
    pub field_side_margin: f32,
    pub field_top: f32,
    pub field_bottom: f32,
    /// Summed extents are divided by this to get the minimum center spacing
    pub spacing_divisor: f32,
    /// Placement attempts per obstacle before accepting an overlap
    pub max_placement_attempts: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            paddle_width: 120.0,
            paddle_height: 15.0,
            paddle_bottom_offset: 30.0,
            paddle_boost: 1.05,
            min_rebound_speed: 2.0,

            ball_radius: 15.0,
            ball_bottom_offset: 60.0,
            ball_start_dx: 4.0,
            ball_start_dy: -4.0,
            ball_max_speed: 10.0,
            ball_spin: 0.2,
            rotation_coupling: 0.05,
            obstacle_boost: 1.01,

            obstacle_width: 50.0,
            obstacle_height: 40.0,
            field_side_margin: 30.0,
            field_top: 50.0,
            field_bottom: 300.0,
            spacing_divisor: 1.5,
            max_placement_attempts: 100,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that every value keeps the simulation inside its safe ranges
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.paddle_width > 0.0 && self.paddle_width <= CANVAS_WIDTH) {
            return invalid("paddle_width", "must be in (0, canvas width]");
        }
        if self.paddle_height <= 0.0 {
            return invalid("paddle_height", "must be positive");
        }
        if self.ball_radius <= 0.0 {
            return invalid("ball_radius", "must be positive");
        }
        if self.ball_max_speed <= 0.0 {
            return invalid("ball_max_speed", "must be positive");
        }
        if !(self.min_rebound_speed > 0.0 && self.min_rebound_speed <= self.ball_max_speed) {
            return invalid("min_rebound_speed", "must be in (0, ball_max_speed]");
        }
        if self.ball_start_dx.abs() > self.ball_max_speed
            || self.ball_start_dy.abs() > self.ball_max_speed
        {
            return invalid("ball_start_dx", "start velocity exceeds ball_max_speed");
        }
        if self.paddle_boost < 1.0 || self.obstacle_boost < 1.0 {
            return invalid("paddle_boost", "speed multipliers must be at least 1.0");
        }
        if self.obstacle_width <= 0.0 || self.obstacle_height <= 0.0 {
            return invalid("obstacle_width", "obstacle size must be positive");
        }
        if self.field_side_margin < 0.0 || 2.0 * self.field_side_margin >= CANVAS_WIDTH {
            return invalid("field_side_margin", "leaves no horizontal room");
        }
        if !(0.0 <= self.field_top
            && self.field_top < self.field_bottom
            && self.field_bottom <= CANVAS_HEIGHT)
        {
            return invalid("field_top", "field band must satisfy 0 <= top < bottom <= height");
        }
        if self.spacing_divisor <= 0.0 {
            return invalid("spacing_divisor", "must be positive");
        }
        if self.max_placement_attempts == 0 {
            return invalid("max_placement_attempts", "must be at least 1");
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
    Err(TuningError::Invalid { field, reason })
}
