//! Snack Breaker - a single-screen paddle and ball arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `render`: Drawing-surface abstraction and frame composition
//! - `assets`: Sprite paths and loaded image handles
//! - `tuning`: Data-driven game balance
//! - `ui`: Restart control model

pub mod assets;
pub mod render;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions (fixed, not configurable at runtime)
    pub const CANVAS_WIDTH: f32 = 1000.0;
    pub const CANVAS_HEIGHT: f32 = 550.0;

    /// Number of obstacles in every generated field
    pub const OBSTACLE_COUNT: usize = 20;
    /// Number of obstacle sprite variants
    pub const OBSTACLE_VARIANTS: usize = 8;
}

/// Constrain `value` to `[low, high]`.
///
/// Does not panic on crossed bounds (unlike `f32::clamp`); `low` wins.
#[inline]
pub fn constrain(value: f32, low: f32, high: f32) -> f32 {
    value.min(high).max(low)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constrain() {
        assert_eq!(constrain(5.0, 0.0, 10.0), 5.0);
        assert_eq!(constrain(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(constrain(42.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_constrain_crossed_bounds() {
        assert_eq!(constrain(7.0, 10.0, 0.0), 10.0);
    }
}
