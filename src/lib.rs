//! Crate Rush - a two-player arcade game of falling crates
//!
//! Core modules:
//! - `sim`: Per-frame simulation (actors, spawner, collision passes)
//! - `game`: Frame controller, logical timers and HUD text
//! - `platform`: Renderer/audio/input/storage seams plus headless implementations
//! - `persistence`: Fixed-layout position save record
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{FrameController, FrameOutcome};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical viewport
    pub const VIEWPORT_WIDTH: f64 = 800.0;
    pub const VIEWPORT_HEIGHT: f64 = 600.0;

    /// Speed state hysteresis band (units/s)
    pub const SPEED_START_THRESHOLD: f64 = 35.0;
    pub const SPEED_STOP_THRESHOLD: f64 = 25.0;
    /// Seconds between engine loop cues while moving
    pub const SPEED_LOOP_INTERVAL: f64 = 1.0;

    /// Explosion animation strip length
    pub const EXPLOSION_FRAME_COUNT: u32 = 16;
    /// Explosion frame retrigger period
    pub const EXPLOSION_FRAME_MS: u64 = 100;

    /// Spawn timers
    pub const CRATE_SPAWN_MS: u64 = 500;
    pub const COIN_SPAWN_MS: u64 = 10_000;

    /// Bullets travel straight up
    pub const BULLET_SPEED: f64 = -1000.0;
    /// Crates fall straight down
    pub const CRATE_SPEED: f64 = 300.0;

    /// Move clamp: past these the craft is nudged back instead of stopped
    pub const MAX_X: f64 = 750.0;
    pub const MAX_Y: f64 = 490.0;
    pub const EDGE_NUDGE: f64 = -1.0;

    /// Per-tick velocity step for a held direction
    pub const P1_ACCEL_STEP: f64 = 3.0;
    pub const P2_ACCEL_STEP: f64 = 5.0;

    /// Fixed spawn points
    pub const P1_SPAWN: (f64, f64) = (100.0, 400.0);
    pub const P2_SPAWN: (f64, f64) = (400.0, 400.0);

    /// Scoring
    pub const CRATE_SCORE: u64 = 100;
    pub const COIN_SCORE: u64 = 500;
    pub const TIER1_SCORE: u64 = 1000;
    pub const TIER2_SCORE: u64 = 5000;

    /// Lives
    pub const STARTING_LIVES: i32 = 3;
    /// A heart drops when the first player's lives fall to this or below
    pub const HEART_LIVES_THRESHOLD: i32 = 2;

    /// Sprite sizes (width, height)
    pub const CRAFT_SIZE: (f64, f64) = (64.0, 64.0);
    pub const BULLET_SIZE: (f64, f64) = (8.0, 16.0);
    pub const CRATE_SIZE: (f64, f64) = (64.0, 64.0);
    pub const COIN_SIZE: (f64, f64) = (32.0, 32.0);
    pub const HEART_SIZE: (f64, f64) = (32.0, 32.0);

    /// Background strip height; the scroll offset wraps at this
    pub const BACKDROP_HEIGHT: f64 = 600.0;
}
