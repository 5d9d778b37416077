//! Player craft: movement, engine-sound state machine, explosion sub-state

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntitySet, Heading, Sprite};
use super::state::PlayerId;
use crate::platform::DirectionMask;
use crate::tuning::Tuning;

/// Engine speed state (drives audio only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpeedState {
    #[default]
    Stopped,
    Moving,
}

/// Visual upgrade level earned by score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Tier {
    #[default]
    Base,
    Fish,
    Shark,
}

/// Side effects an actor reports back to the frame controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorEvent {
    SpeedStart,
    SpeedStop,
    SpeedLoop,
    Exploded,
}

/// Explosion animation sub-state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionState {
    pub active: bool,
    pub frame: u32,
    pub frame_count: u32,
    /// Where the explosion is drawn (the craft itself may have respawned)
    pub origin: DVec2,
}

impl ExplosionState {
    pub fn new(frame_count: u32) -> Self {
        Self {
            active: false,
            frame: 0,
            frame_count,
            origin: DVec2::ZERO,
        }
    }
}

/// A player-controlled craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub player: PlayerId,
    pub body: Entity,
    pub explosion: ExplosionState,
    pub speed: SpeedState,
    /// Time since the last engine cue
    pub sound_timer: f64,
    pub bullets: EntitySet,
    /// Heart pickups dropped for this player
    pub hearts: EntitySet,
    pub heading: Heading,
    pub tier: Tier,
    pub spawn_point: DVec2,
    pub accel_step: f64,
}

impl Actor {
    pub fn new(player: PlayerId, tuning: &Tuning) -> Self {
        let (sx, sy) = tuning.spawn_points[player.index()];
        let spawn_point = DVec2::new(sx, sy);
        let heading = Heading::default();
        Self {
            player,
            body: Entity::new(
                base_sprite(player, heading),
                spawn_point,
                DVec2::ZERO,
                tuning.craft_size,
            ),
            explosion: ExplosionState::new(tuning.explosion_frame_count),
            speed: SpeedState::Stopped,
            sound_timer: 0.0,
            bullets: EntitySet::new(),
            hearts: EntitySet::new(),
            heading,
            tier: Tier::Base,
            spawn_point,
            accel_step: tuning.accel_steps[player.index()],
        }
    }

    pub fn pos(&self) -> DVec2 {
        self.body.pos
    }

    pub fn vel(&self) -> DVec2 {
        self.body.vel
    }

    pub fn is_exploding(&self) -> bool {
        self.explosion.active
    }

    /// Advance the craft and its bullets, then run the engine-sound state machine
    pub fn update(&mut self, dt: f64, tuning: &Tuning) -> Vec<ActorEvent> {
        self.body.advance(dt);
        for heart in self.hearts.iter_mut() {
            heart.advance(dt);
        }

        let bottom = tuning.viewport_height;
        let culled = self
            .bullets
            .advance(dt, |b| b.pos.y < 0.0 || b.pos.y > bottom);
        if culled > 0 {
            log::trace!("{:?}: {} bullet(s) left the playfield", self.player, culled);
        }

        let mut events = Vec::new();
        let v = self.body.vel.length();
        self.sound_timer += dt;

        match self.speed {
            SpeedState::Stopped => {
                if v > tuning.speed_start_threshold {
                    self.speed = SpeedState::Moving;
                    self.sound_timer = 0.0;
                    events.push(ActorEvent::SpeedStart);
                }
            }
            SpeedState::Moving => {
                if v < tuning.speed_stop_threshold {
                    self.speed = SpeedState::Stopped;
                    self.sound_timer = 0.0;
                    events.push(ActorEvent::SpeedStop);
                } else if self.sound_timer > tuning.speed_loop_interval {
                    self.sound_timer = 0.0;
                    events.push(ActorEvent::SpeedLoop);
                }
            }
        }

        events
    }

    /// Accumulate velocity for held directions and clamp at the playfield edges
    ///
    /// Past the lower edges the component is zeroed; past the upper edges it is
    /// set to `tuning.edge_nudge`, pushing the craft back in.
    pub fn apply_input(&mut self, mask: DirectionMask, tuning: &Tuning) {
        if self.explosion.active {
            return;
        }

        let step = self.accel_step;
        let half_w = self.body.width / 2.0;
        let half_h = self.body.height / 2.0;
        let pos = self.body.pos;
        let vel = &mut self.body.vel;

        if mask.contains(DirectionMask::LEFT) {
            vel.x -= step;
        }
        if pos.x < half_w {
            vel.x = 0.0;
        }
        if mask.contains(DirectionMask::RIGHT) {
            vel.x += step;
        }
        if pos.x > tuning.max_x {
            vel.x = tuning.edge_nudge;
        }

        if mask.contains(DirectionMask::FORWARD) {
            vel.y -= step;
        }
        if pos.y < half_h {
            vel.y = 0.0;
        }
        if mask.contains(DirectionMask::BACKWARD) {
            vel.y += step;
        }
        if pos.y > tuning.max_y {
            vel.y = tuning.edge_nudge;
        }
    }

    /// Start the explosion at the current position
    ///
    /// Velocity and position are left alone; collision callers zero and
    /// respawn the craft themselves.
    pub fn explode(&mut self) -> ActorEvent {
        self.explosion.frame = 0;
        self.explosion.active = true;
        self.explosion.origin = self.body.pos;
        log::debug!("{:?} exploded at ({:.0}, {:.0})", self.player, self.body.pos.x, self.body.pos.y);
        ActorEvent::Exploded
    }

    /// Step the explosion animation; returns false once it has finished
    pub fn advance_explosion(&mut self) -> bool {
        if self.explosion.active {
            self.explosion.frame += 1;
            if self.explosion.frame >= self.explosion.frame_count {
                self.explosion.active = false;
                self.explosion.frame = 0;
                self.body.vel = DVec2::ZERO;
                self.speed = SpeedState::Stopped;
                return false;
            }
        }
        true
    }

    /// Fire one bullet straight up from the craft
    pub fn fire(&mut self, tuning: &Tuning) {
        self.bullets.push(Entity::new(
            Sprite::Bullet,
            self.body.pos,
            DVec2::new(0.0, tuning.bullet_speed),
            tuning.bullet_size,
        ));
    }

    /// Zero velocity and return to the fixed spawn point
    pub fn respawn(&mut self) {
        self.body.vel = DVec2::ZERO;
        self.body.pos = self.spawn_point;
    }

    /// Drop a heart somewhere in the upper playfield
    pub fn spawn_heart(&mut self, rng: &mut impl rand::Rng, tuning: &Tuning) {
        let pos = DVec2::new(tuning.heart_spawn_x.sample(rng), tuning.heart_spawn_y.sample(rng));
        self.hearts
            .push(Entity::new(Sprite::Heart, pos, DVec2::ZERO, tuning.heart_size));
    }

    /// Cycle the base sprite heading (positive = clockwise)
    pub fn rotate(&mut self, quarter_turns: i32) {
        self.heading = self.heading.rotated(quarter_turns);
        self.refresh_sprite();
    }

    /// Re-apply the tier sprite for `score`; true only when the tier changed
    pub fn apply_tier(&mut self, score: u64, tuning: &Tuning) -> bool {
        let [tier1, tier2] = tuning.tier_scores;
        let tier = if score >= tier2 {
            Tier::Shark
        } else if score >= tier1 {
            Tier::Fish
        } else {
            Tier::Base
        };

        self.refresh_sprite_for(tier);
        if tier == self.tier {
            return false;
        }
        self.tier = tier;
        true
    }

    /// Sprite to draw this frame: the explosion strip while exploding
    pub fn visible(&self) -> Entity {
        if self.explosion.active {
            Entity {
                pos: self.explosion.origin,
                vel: DVec2::ZERO,
                sprite: Sprite::Explosion {
                    frame: self.explosion.frame,
                },
                ..self.body.clone()
            }
        } else {
            self.body.clone()
        }
    }

    fn refresh_sprite(&mut self) {
        self.refresh_sprite_for(self.tier);
    }

    fn refresh_sprite_for(&mut self, tier: Tier) {
        self.body.sprite = match tier {
            Tier::Base => base_sprite(self.player, self.heading),
            Tier::Fish => Sprite::Fish,
            Tier::Shark => Sprite::Shark,
        };
    }
}

fn base_sprite(player: PlayerId, heading: Heading) -> Sprite {
    match player {
        PlayerId::One => Sprite::Plane(heading),
        PlayerId::Two => Sprite::Rocket(heading),
    }
}
