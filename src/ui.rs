//! Restart control model
//!
//! The session only describes the button; hosts create the real widget when
//! one appears and tear it down when it goes away.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Clickable restart button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestartControl {
    pub label: String,
    /// Top-left corner in canvas pixels
    pub pos: Vec2,
    pub size: Vec2,
    pub font_size_px: u32,
}

impl RestartControl {
    /// The "Play Again" button shown on the end screen
    pub fn play_again() -> Self {
        Self {
            label: "Play Again".to_string(),
            pos: Vec2::new(CANVAS_WIDTH / 2.0 - 50.0, CANVAS_HEIGHT / 2.0 + 40.0),
            size: Vec2::new(100.0, 40.0),
            font_size_px: 16,
        }
    }

    /// Check if a canvas point falls on the button
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.pos + self.size;
        point.x >= self.pos.x && point.x <= max.x && point.y >= self.pos.y && point.y <= max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_again_layout() {
        let control = RestartControl::play_again();
        assert_eq!(control.label, "Play Again");
        assert_eq!(control.pos, Vec2::new(450.0, 315.0));
        assert_eq!(control.size, Vec2::new(100.0, 40.0));
        assert_eq!(control.font_size_px, 16);
    }

    #[test]
    fn test_contains() {
        let control = RestartControl::play_again();
        assert!(control.contains(Vec2::new(500.0, 335.0)));
        assert!(control.contains(Vec2::new(450.0, 315.0)));
        assert!(!control.contains(Vec2::new(449.0, 335.0)));
        assert!(!control.contains(Vec2::new(500.0, 356.0)));
    }
}
