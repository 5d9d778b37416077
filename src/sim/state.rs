//! Game state and core simulation types

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Tier};
use super::spawner::Spawner;
use crate::tuning::Tuning;

/// Which of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    /// A player ran out of lives
    GameOver { loser: PlayerId },
}

/// Score and lives for both players
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub score: [u64; 2],
    pub lives: [i32; 2],
}

impl Progression {
    pub fn new(starting_lives: i32) -> Self {
        Self {
            score: [0; 2],
            lives: [starting_lives; 2],
        }
    }

    pub fn score(&self, player: PlayerId) -> u64 {
        self.score[player.index()]
    }

    pub fn lives(&self, player: PlayerId) -> i32 {
        self.lives[player.index()]
    }

    pub fn credit(&mut self, player: PlayerId, points: u64) {
        self.score[player.index()] += points;
    }

    /// Take one life and return what is left
    pub fn lose_life(&mut self, player: PlayerId) -> i32 {
        self.lives[player.index()] -= 1;
        self.lives[player.index()]
    }

    pub fn gain_life(&mut self, player: PlayerId) {
        self.lives[player.index()] += 1;
    }
}

/// Things that happened during a tick, for audio, timers and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    SpeedStart(PlayerId),
    SpeedStop(PlayerId),
    SpeedLoop(PlayerId),
    /// The craft entered its explosion; the frame timer must be armed
    Exploded(PlayerId),
    CrateShot { player: PlayerId, points: u64 },
    CrateHit { player: PlayerId, lives_left: i32 },
    CoinCollected { player: PlayerId, points: u64 },
    HeartDropped,
    HeartCollected { player: PlayerId, lives: i32 },
    TierReached { player: PlayerId, tier: Tier },
    GameOver { loser: PlayerId },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub players: [Actor; 2],
    pub spawner: Spawner,
    pub progression: Progression,
    pub phase: GamePhase,
    /// Simulation ticks run so far
    pub time_ticks: u64,
}

impl GameState {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            players: [
                Actor::new(PlayerId::One, &tuning),
                Actor::new(PlayerId::Two, &tuning),
            ],
            spawner: Spawner::new(),
            progression: Progression::new(tuning.starting_lives),
            phase: GamePhase::Running,
            time_ticks: 0,
            tuning,
        }
    }

    pub fn player(&self, id: PlayerId) -> &Actor {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Actor {
        &mut self.players[id.index()]
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    pub fn spawn_crate(&mut self) {
        self.spawner.spawn_crate(&mut self.rng, &self.tuning);
    }

    pub fn spawn_coin(&mut self) {
        self.spawner.spawn_coin(&mut self.rng, &self.tuning);
    }
}
