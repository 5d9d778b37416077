//! Collision passes between entity collections
//!
//! Every test is a two-circle overlap on sprite width (see [`Entity::overlaps`]).
//! Passes run in a fixed order, player one before player two, and each
//! collection is scanned front to back so the earliest match always wins.
//! Removal compacts the collection immediately; scan indices only advance when
//! nothing was removed at the current slot.

use super::actor::Actor;
use super::entity::{Entity, EntitySet};
use super::state::{GameEvent, GamePhase, GameState, PlayerId, Progression};
use crate::tuning::Tuning;

/// Bullets fired by `shooter` against the crate list
///
/// Each bullet destroys at most one crate, and each crate is destroyed at most
/// once. Returns the number of hits.
pub fn bullet_crate_pass(
    shooter: &mut Actor,
    crates: &mut EntitySet,
    progression: &mut Progression,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> usize {
    let mut hits = 0;
    let mut b = 0;
    while b < shooter.bullets.len() {
        let hit = shooter
            .bullets
            .get(b)
            .and_then(|bullet| crates.first_overlap(bullet));

        match hit {
            Some(c) => {
                crates.remove(c);
                shooter.bullets.remove(b);
                progression.credit(shooter.player, tuning.crate_score);
                events.push(GameEvent::CrateShot {
                    player: shooter.player,
                    points: tuning.crate_score,
                });
                hits += 1;
            }
            None => b += 1,
        }
    }
    hits
}

/// A crate landing on a craft: explode, respawn, lose a life
///
/// Returns true if the craft was hit. Heart drops and game over are decided
/// by the caller, which sees both players.
pub fn actor_crate_pass(
    actor: &mut Actor,
    crates: &mut EntitySet,
    progression: &mut Progression,
    events: &mut Vec<GameEvent>,
) -> bool {
    if actor.is_exploding() {
        return false;
    }
    let Some(c) = crates.first_overlap(&actor.body) else {
        return false;
    };

    crates.remove(c);
    actor.body.vel = glam::DVec2::ZERO;
    actor.explode();
    actor.respawn();
    let lives_left = progression.lose_life(actor.player);

    log::debug!("{:?} hit by crate, {} lives left", actor.player, lives_left);
    events.push(GameEvent::Exploded(actor.player));
    events.push(GameEvent::CrateHit {
        player: actor.player,
        lives_left,
    });
    true
}

/// Every coin touching a non-exploding craft is collected
pub fn actor_coin_pass(
    actor: &Actor,
    coins: &mut EntitySet,
    progression: &mut Progression,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> usize {
    if actor.is_exploding() {
        return 0;
    }
    let collected = coins.remove_overlapping(&actor.body);
    for _ in 0..collected {
        progression.credit(actor.player, tuning.coin_score);
        events.push(GameEvent::CoinCollected {
            player: actor.player,
            points: tuning.coin_score,
        });
    }
    collected
}

/// Hearts heal the craft that owns them, exploding or not; no cap
pub fn actor_heart_pass(
    actor: &mut Actor,
    progression: &mut Progression,
    events: &mut Vec<GameEvent>,
) -> usize {
    let body = actor.body.clone();
    let collected = actor.hearts.remove_overlapping(&body);
    for _ in 0..collected {
        progression.gain_life(actor.player);
        events.push(GameEvent::HeartCollected {
            player: actor.player,
            lives: progression.lives(actor.player),
        });
    }
    collected
}

/// Craft-on-craft contact: both explode and respawn, no lives lost
pub fn actor_actor_pass(a: &mut Actor, b: &mut Actor, events: &mut Vec<GameEvent>) -> bool {
    if a.is_exploding() || b.is_exploding() || !a.body.overlaps(&b.body) {
        return false;
    }
    for actor in [a, b] {
        actor.body.vel = glam::DVec2::ZERO;
        actor.explode();
        actor.respawn();
        events.push(GameEvent::Exploded(actor.player));
    }
    true
}

/// Run every pass in order against the full game state
pub fn resolve(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let GameState {
        players,
        spawner,
        progression,
        tuning,
        rng,
        phase,
        ..
    } = state;

    for player in players.iter_mut() {
        bullet_crate_pass(player, &mut spawner.crates, progression, tuning, &mut events);
    }

    for idx in 0..players.len() {
        if !actor_crate_pass(&mut players[idx], &mut spawner.crates, progression, &mut events) {
            continue;
        }
        let id = players[idx].player;

        // Hearts belong to the first player, and drop on that player's count
        let healer = &mut players[PlayerId::One.index()];
        if progression.lives(PlayerId::One) <= tuning.heart_lives_threshold {
            healer.spawn_heart(rng, tuning);
            events.push(GameEvent::HeartDropped);
        }

        if progression.lives(id) <= 0 && matches!(*phase, GamePhase::Running) {
            log::info!("{:?} is out of lives", id);
            *phase = GamePhase::GameOver { loser: id };
            events.push(GameEvent::GameOver { loser: id });
        }
    }

    for player in players.iter() {
        actor_coin_pass(player, &mut spawner.coins, progression, tuning, &mut events);
    }

    actor_heart_pass(&mut players[PlayerId::One.index()], progression, &mut events);

    if tuning.craft_collision {
        let [a, b] = players;
        actor_actor_pass(a, b, &mut events);
    }

    events
}

/// Whether `entity` overlaps any member of `set`
pub fn any_overlap(entity: &Entity, set: &EntitySet) -> bool {
    set.first_overlap(entity).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Sprite;
    use crate::tuning::{Size, SpawnRange};
    use glam::DVec2;
    use proptest::prelude::*;

    fn state() -> GameState {
        let mut tuning = Tuning::default();
        // Keep dropped hearts well away from the spawn points
        tuning.heart_spawn_y = SpawnRange::new(100.0, 150.0);
        GameState::new(42, tuning)
    }

    fn crate_at(x: f64, y: f64) -> Entity {
        let t = Tuning::default();
        Entity::new(Sprite::Crate, DVec2::new(x, y), DVec2::ZERO, t.crate_size)
    }

    fn coin_at(x: f64, y: f64) -> Entity {
        let t = Tuning::default();
        Entity::new(Sprite::Coin, DVec2::new(x, y), DVec2::ZERO, t.coin_size)
    }

    fn bullet_at(x: f64, y: f64) -> Entity {
        let t = Tuning::default();
        Entity::new(Sprite::Bullet, DVec2::new(x, y), DVec2::ZERO, t.bullet_size)
    }

    #[test]
    fn test_bullet_crate_inclusive_boundary() {
        let mut s = state();
        // (8 + 64) / 2 = 36
        s.players[0].bullets.push(bullet_at(200.0, 100.0));
        s.spawner.crates.push(crate_at(236.0, 100.0));

        let events = resolve(&mut s);
        assert!(s.spawner.crates.is_empty());
        assert!(s.players[0].bullets.is_empty());
        assert_eq!(s.progression.score, [100, 0]);
        assert!(events.contains(&GameEvent::CrateShot {
            player: PlayerId::One,
            points: 100
        }));
    }

    #[test]
    fn test_each_bullet_and_crate_removed_once() {
        let mut s = state();
        // Three bullets stacked on one crate, one bullet alone on a second crate
        for _ in 0..3 {
            s.players[0].bullets.push(bullet_at(200.0, 100.0));
        }
        s.players[0].bullets.push(bullet_at(500.0, 100.0));
        s.spawner.crates.push(crate_at(200.0, 100.0));
        s.spawner.crates.push(crate_at(500.0, 100.0));

        resolve(&mut s);
        assert!(s.spawner.crates.is_empty());
        // Two of the stacked bullets had nothing left to hit
        assert_eq!(s.players[0].bullets.len(), 2);
        assert_eq!(s.progression.score[0], 200);
    }

    #[test]
    fn test_first_crate_in_order_wins_tie() {
        let mut s = state();
        s.players[0].bullets.push(bullet_at(300.0, 100.0));
        // Both crates sit 10 units away
        s.spawner.crates.push(crate_at(290.0, 100.0));
        s.spawner.crates.push(crate_at(310.0, 100.0));

        resolve(&mut s);
        assert_eq!(s.spawner.crates.len(), 1);
        assert_eq!(s.spawner.crates.get(0).map(|c| c.pos.x), Some(310.0));
    }

    #[test]
    fn test_player_one_shoots_first() {
        let mut s = state();
        s.players[0].bullets.push(bullet_at(300.0, 100.0));
        s.players[1].bullets.push(bullet_at(300.0, 100.0));
        s.spawner.crates.push(crate_at(300.0, 100.0));

        resolve(&mut s);
        assert_eq!(s.progression.score, [100, 0]);
        assert_eq!(s.players[1].bullets.len(), 1);
    }

    #[test]
    fn test_crate_on_spawn_point_scenario() {
        let mut s = state();
        assert_eq!(s.players[0].pos(), DVec2::new(100.0, 400.0));
        s.spawner.crates.push(crate_at(100.0, 400.0));

        let events = resolve(&mut s);
        assert!(s.spawner.crates.is_empty());
        assert_eq!(s.progression.lives[0], 2);
        assert_eq!(s.players[0].pos(), DVec2::new(100.0, 400.0));
        assert_eq!(s.players[0].vel(), DVec2::ZERO);
        assert!(s.players[0].is_exploding());
        assert!(events.contains(&GameEvent::Exploded(PlayerId::One)));
        // 2 <= 2: a heart drops
        assert_eq!(s.players[0].hearts.len(), 1);
    }

    #[test]
    fn test_exploding_craft_ignores_crates() {
        let mut s = state();
        s.players[0].explode();
        s.spawner.crates.push(crate_at(100.0, 400.0));

        resolve(&mut s);
        assert_eq!(s.spawner.crates.len(), 1);
        assert_eq!(s.progression.lives[0], 3);
    }

    #[test]
    fn test_one_crate_hit_per_tick() {
        let mut s = state();
        s.spawner.crates.push(crate_at(100.0, 400.0));
        s.spawner.crates.push(crate_at(110.0, 400.0));

        resolve(&mut s);
        assert_eq!(s.progression.lives[0], 2);
        assert_eq!(s.spawner.crates.len(), 1);
    }

    #[test]
    fn test_no_heart_above_threshold() {
        let mut s = state();
        s.progression.lives = [5, 5];
        s.spawner.crates.push(crate_at(100.0, 400.0));

        resolve(&mut s);
        assert_eq!(s.progression.lives[0], 4);
        assert!(s.players[0].hearts.is_empty());
    }

    #[test]
    fn test_second_player_hit_drops_heart_for_first() {
        let mut s = state();
        s.progression.lives = [2, 3];
        s.spawner.crates.push(crate_at(400.0, 400.0));

        let events = resolve(&mut s);
        assert_eq!(s.progression.lives, [2, 2]);
        assert_eq!(s.players[0].hearts.len(), 1);
        assert!(s.players[1].hearts.is_empty());
        assert!(events.contains(&GameEvent::HeartDropped));
    }

    #[test]
    fn test_last_life_ends_run() {
        let mut s = state();
        s.progression.lives = [3, 1];
        s.spawner.crates.push(crate_at(400.0, 400.0));

        let events = resolve(&mut s);
        assert_eq!(s.progression.lives[1], 0);
        assert_eq!(s.phase, GamePhase::GameOver { loser: PlayerId::Two });
        assert!(events.contains(&GameEvent::GameOver { loser: PlayerId::Two }));
    }

    #[test]
    fn test_coin_pass_credits_each_coin() {
        let mut s = state();
        s.spawner.coins.push(coin_at(100.0, 400.0));
        s.spawner.coins.push(coin_at(120.0, 410.0));
        s.spawner.coins.push(coin_at(700.0, 100.0));
        s.spawner.coins.push(coin_at(400.0, 400.0));

        resolve(&mut s);
        assert_eq!(s.progression.score, [1000, 500]);
        assert_eq!(s.spawner.coins.len(), 1);
        assert_eq!(s.spawner.coins.get(0).map(|c| c.pos.x), Some(700.0));
    }

    #[test]
    fn test_exploding_craft_skips_coins() {
        let mut s = state();
        s.players[1].explode();
        s.spawner.coins.push(coin_at(400.0, 400.0));

        resolve(&mut s);
        assert_eq!(s.progression.score[1], 0);
        assert_eq!(s.spawner.coins.len(), 1);
    }

    #[test]
    fn test_heart_heals_without_cap() {
        let mut s = state();
        let heart = Entity::new(
            Sprite::Heart,
            DVec2::new(100.0, 400.0),
            DVec2::ZERO,
            Size { width: 32.0, height: 32.0 },
        );
        s.players[0].hearts.push(heart.clone());
        s.players[0].hearts.push(heart);

        let events = resolve(&mut s);
        assert_eq!(s.progression.lives[0], 5);
        assert!(s.players[0].hearts.is_empty());
        assert!(events.contains(&GameEvent::HeartCollected {
            player: PlayerId::One,
            lives: 5
        }));
    }

    #[test]
    fn test_craft_collision_off_by_default() {
        let mut s = state();
        s.players[1].body.pos = s.players[0].pos();
        resolve(&mut s);
        assert!(!s.players[0].is_exploding());

        s.tuning.craft_collision = true;
        let events = resolve(&mut s);
        assert!(s.players[0].is_exploding() && s.players[1].is_exploding());
        assert_eq!(s.players[1].pos(), DVec2::new(400.0, 400.0));
        assert_eq!(s.progression.lives, [3, 3]);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_empty_collections_do_nothing() {
        let mut s = state();
        assert!(resolve(&mut s).is_empty());
        assert_eq!(s.progression, Progression::new(3));
    }

    proptest! {
        #[test]
        fn prop_bullet_pass_removes_matched_pairs(
            bullets in prop::collection::vec(0.0f64..800.0, 0..20),
            crates in prop::collection::vec(0.0f64..800.0, 0..20),
        ) {
            let mut s = state();
            for x in &bullets {
                s.players[0].bullets.push(bullet_at(*x, 50.0));
            }
            for x in &crates {
                s.spawner.crates.push(crate_at(*x, 50.0));
            }
            let tuning = s.tuning.clone();
            let mut events = Vec::new();
            let hits = bullet_crate_pass(
                &mut s.players[0],
                &mut s.spawner.crates,
                &mut s.progression,
                &tuning,
                &mut events,
            );

            prop_assert_eq!(s.players[0].bullets.len(), bullets.len() - hits);
            prop_assert_eq!(s.spawner.crates.len(), crates.len() - hits);
            prop_assert_eq!(s.progression.score[0], hits as u64 * 100);
            // Survivors keep their relative order
            let xs: Vec<f64> = s.spawner.crates.iter().map(|c| c.pos.x).collect();
            let mut cursor = crates.iter();
            for x in &xs {
                prop_assert!(cursor.any(|c| c == x));
            }
            // No surviving bullet still overlaps a surviving crate
            for b in s.players[0].bullets.iter() {
                prop_assert!(!any_overlap(b, &s.spawner.crates));
            }
        }
    }
}
