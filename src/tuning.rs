//! Data-driven game balance
//!
//! Every field has a default taken from [`crate::consts`], so a tuning file only
//! needs to mention the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::PersistenceError;

/// A half-open sampling range `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRange {
    pub min: f64,
    pub max: f64,
}

impl SpawnRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Sample a value, or `min` if the range is empty
    pub fn sample(&self, rng: &mut impl rand::Rng) -> f64 {
        if self.max > self.min {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }
}

/// Sprite footprint used for collisions (width) and clamping (both)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl From<(f64, f64)> for Size {
    fn from((width, height): (f64, f64)) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub viewport_width: f64,
    pub viewport_height: f64,

    pub craft_size: Size,
    pub bullet_size: Size,
    pub crate_size: Size,
    pub coin_size: Size,
    pub heart_size: Size,

    pub bullet_speed: f64,
    pub crate_speed: f64,
    /// Velocity step per held direction, per player
    pub accel_steps: [f64; 2],
    pub max_x: f64,
    pub max_y: f64,
    /// Velocity applied when a craft passes `max_x`/`max_y`
    pub edge_nudge: f64,

    pub speed_start_threshold: f64,
    pub speed_stop_threshold: f64,
    pub speed_loop_interval: f64,

    pub explosion_frame_count: u32,
    pub explosion_frame_ms: u64,

    pub crate_spawn_ms: u64,
    pub coin_spawn_ms: u64,
    pub crate_spawn_x: SpawnRange,
    pub crate_spawn_y: f64,
    pub coin_spawn_x: SpawnRange,
    pub coin_spawn_y: SpawnRange,
    pub heart_spawn_x: SpawnRange,
    pub heart_spawn_y: SpawnRange,

    pub spawn_points: [(f64, f64); 2],
    pub crate_score: u64,
    pub coin_score: u64,
    pub tier_scores: [u64; 2],
    pub starting_lives: i32,
    pub heart_lives_threshold: i32,

    /// Resolve craft-vs-craft contact (off in the shipped game)
    pub craft_collision: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            craft_size: CRAFT_SIZE.into(),
            bullet_size: BULLET_SIZE.into(),
            crate_size: CRATE_SIZE.into(),
            coin_size: COIN_SIZE.into(),
            heart_size: HEART_SIZE.into(),

            bullet_speed: BULLET_SPEED,
            crate_speed: CRATE_SPEED,
            accel_steps: [P1_ACCEL_STEP, P2_ACCEL_STEP],
            max_x: MAX_X,
            max_y: MAX_Y,
            edge_nudge: EDGE_NUDGE,

            speed_start_threshold: SPEED_START_THRESHOLD,
            speed_stop_threshold: SPEED_STOP_THRESHOLD,
            speed_loop_interval: SPEED_LOOP_INTERVAL,

            explosion_frame_count: EXPLOSION_FRAME_COUNT,
            explosion_frame_ms: EXPLOSION_FRAME_MS,

            crate_spawn_ms: CRATE_SPAWN_MS,
            coin_spawn_ms: COIN_SPAWN_MS,
            crate_spawn_x: SpawnRange::new(100.0, 700.0),
            crate_spawn_y: 0.0,
            coin_spawn_x: SpawnRange::new(50.0, 800.0),
            coin_spawn_y: SpawnRange::new(50.0, 550.0),
            heart_spawn_x: SpawnRange::new(100.0, 800.0),
            heart_spawn_y: SpawnRange::new(100.0, 400.0),

            spawn_points: [P1_SPAWN, P2_SPAWN],
            crate_score: CRATE_SCORE,
            coin_score: COIN_SCORE,
            tier_scores: [TIER1_SCORE, TIER2_SCORE],
            starting_lives: STARTING_LIVES,
            heart_lives_threshold: HEART_LIVES_THRESHOLD,

            craft_collision: false,
        }
    }
}

impl Tuning {
    /// Load a tuning file, falling back to defaults for any missing field
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = serde_json::from_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Seconds form of a millisecond period
    pub fn secs(ms: u64) -> f64 {
        ms as f64 / 1000.0
    }
}
