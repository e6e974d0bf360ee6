//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod field;
pub mod state;
pub mod tick;

pub use collision::{circle_hits_rect, circle_rect_distance, closest_point_on_rect, too_close};
pub use field::{Field, count_crowded_pairs, generate_field};
pub use state::{Ball, GameEvent, GamePhase, GameState, Obstacle, Paddle, RngState};
pub use tick::{TickInput, tick};
