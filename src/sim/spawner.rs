//! Crate and coin source

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntitySet, Sprite};
use crate::tuning::Tuning;

/// Owns every falling crate and every placed coin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    pub crates: EntitySet,
    pub coins: EntitySet,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a crate at a random column along the top edge
    pub fn spawn_crate(&mut self, rng: &mut impl rand::Rng, tuning: &Tuning) {
        let pos = DVec2::new(tuning.crate_spawn_x.sample(rng), tuning.crate_spawn_y);
        self.crates.push(Entity::new(
            Sprite::Crate,
            pos,
            DVec2::new(0.0, tuning.crate_speed),
            tuning.crate_size,
        ));
    }

    /// Place a stationary coin
    pub fn spawn_coin(&mut self, rng: &mut impl rand::Rng, tuning: &Tuning) {
        let pos = DVec2::new(tuning.coin_spawn_x.sample(rng), tuning.coin_spawn_y.sample(rng));
        self.coins
            .push(Entity::new(Sprite::Coin, pos, DVec2::ZERO, tuning.coin_size));
    }

    /// Move crates and coins; crates that fall off the bottom are dropped
    pub fn update(&mut self, dt: f64, tuning: &Tuning) {
        let bottom = tuning.viewport_height;
        let missed = self.crates.advance(dt, |c| c.pos.y > bottom);
        if missed > 0 {
            log::trace!("{} crate(s) fell past the bottom edge", missed);
        }
        for coin in self.coins.iter_mut() {
            coin.advance(dt);
        }
    }
}
