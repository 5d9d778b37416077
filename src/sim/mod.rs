//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only
//! - Collections iterate in insertion order; removal compacts immediately
//! - No rendering, audio or platform dependencies

pub mod actor;
pub mod collision;
pub mod entity;
pub mod spawner;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorEvent, ExplosionState, SpeedState, Tier};
pub use collision::resolve;
pub use entity::{Entity, EntitySet, Heading, Sprite};
pub use spawner::Spawner;
pub use state::{GameEvent, GamePhase, GameState, PlayerId, Progression};
pub use tick::{TickInput, tick};
