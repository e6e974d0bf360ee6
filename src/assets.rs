//! Sprite assets
//!
//! Paths are fixed and loaded once before the first frame. The simulation
//! never touches images; it only stores a variant index per obstacle.

use crate::consts::OBSTACLE_VARIANTS;

pub const BACKGROUND_PATH: &str = "images/dreamsky.png";
pub const BALL_PATH: &str = "images/kirby.png";
pub const OBSTACLE_PATHS: [&str; OBSTACLE_VARIANTS] = [
    "images/food01.png",
    "images/food02.png",
    "images/food03.png",
    "images/food04.png",
    "images/food05.png",
    "images/food06.png",
    "images/food07.png",
    "images/food08.png",
];

/// One loaded image handle per sprite reference.
///
/// Fixed-size so a bundle always has a sprite for every obstacle variant.
#[derive(Debug, Clone)]
pub struct Sprites<I> {
    pub background: I,
    pub ball: I,
    pub obstacles: [I; OBSTACLE_VARIANTS],
}

impl<I> Sprites<I> {
    /// Sprite for an obstacle variant (wraps out-of-range indices)
    pub fn obstacle(&self, variant: usize) -> &I {
        &self.obstacles[variant % OBSTACLE_VARIANTS]
    }

    /// Build a bundle by loading every path with `load`, stopping at the
    /// first failure
    pub fn load_with<E>(mut load: impl FnMut(&str) -> Result<I, E>) -> Result<Self, E> {
        let background = load(BACKGROUND_PATH)?;
        let ball = load(BALL_PATH)?;

        let mut loaded = Vec::with_capacity(OBSTACLE_VARIANTS);
        for path in OBSTACLE_PATHS {
            loaded.push(load(path)?);
        }
        let obstacles: [I; OBSTACLE_VARIANTS] = match loaded.try_into() {
            Ok(array) => array,
            Err(_) => unreachable!("one handle per obstacle path"),
        };

        Ok(Self {
            background,
            ball,
            obstacles,
        })
    }
}
