//! Per-frame simulation step
//!
//! Input is applied first, then every actor and the spawner advance, then the
//! collision passes run and finally tier upgrades are re-applied.

use super::actor::ActorEvent;
use super::collision;
use super::state::{GameEvent, GameState, PlayerId};
use crate::platform::DirectionMask;

/// Input for a single tick, per player
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held directions
    pub directions: [DirectionMask; 2],
    /// Fire one bullet this tick
    pub fire: [bool; 2],
    /// Self-destruct (debug key)
    pub explode: [bool; 2],
    /// Quarter turns to rotate the base sprite
    pub rotate: [i32; 2],
}

impl TickInput {
    pub fn set_direction(&mut self, player: PlayerId, mask: DirectionMask) {
        self.directions[player.index()] = mask;
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f64) -> Vec<GameEvent> {
    if state.is_over() {
        return Vec::new();
    }
    state.time_ticks += 1;

    let mut events = Vec::new();

    for id in PlayerId::ALL {
        let i = id.index();
        let tuning = &state.tuning;
        let actor = &mut state.players[i];

        actor.apply_input(input.directions[i], tuning);
        if input.rotate[i] != 0 {
            actor.rotate(input.rotate[i]);
        }
        if input.fire[i] {
            actor.fire(tuning);
        }
        if input.explode[i] && !actor.is_exploding() {
            actor.body.vel = glam::DVec2::ZERO;
            actor.explode();
            events.push(GameEvent::Exploded(id));
        }
    }

    for id in PlayerId::ALL {
        let actor_events = state.players[id.index()].update(dt, &state.tuning);
        events.extend(actor_events.into_iter().map(|ev| match ev {
            ActorEvent::SpeedStart => GameEvent::SpeedStart(id),
            ActorEvent::SpeedStop => GameEvent::SpeedStop(id),
            ActorEvent::SpeedLoop => GameEvent::SpeedLoop(id),
            ActorEvent::Exploded => GameEvent::Exploded(id),
        }));
    }
    state.spawner.update(dt, &state.tuning);

    events.extend(collision::resolve(state));

    for id in PlayerId::ALL {
        let score = state.progression.score(id);
        let actor = &mut state.players[id.index()];
        if actor.apply_tier(score, &state.tuning) {
            log::debug!("{:?} reached tier {:?} at {} points", id, actor.tier, score);
            events.push(GameEvent::TierReached {
                player: id,
                tier: actor.tier,
            });
        }
    }

    events
}
