//! Platform abstraction layer
//!
//! The simulation talks to the outside world only through these traits:
//! - `Renderer`: draws the finished frame
//! - `AudioSink`: fire-and-forget sound cues
//! - `InputSource`: held directions and one-shot commands
//! - `PersistenceStore`: position save slot
//!
//! Headless implementations live in the submodules.

pub mod input;
pub mod render;

use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::audio::SoundCue;
use crate::persistence::{PersistenceError, SaveData};
use crate::sim::{Entity, PlayerId};

pub use input::{DemoInput, ScriptedInput};
pub use render::{FrameStats, NullRenderer};

/// Held movement keys as a bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct DirectionMask(u8);

impl DirectionMask {
    pub const NONE: DirectionMask = DirectionMask(0);
    pub const FORWARD: DirectionMask = DirectionMask(1);
    pub const BACKWARD: DirectionMask = DirectionMask(2);
    pub const LEFT: DirectionMask = DirectionMask(4);
    pub const RIGHT: DirectionMask = DirectionMask(8);

    pub const fn from_bits(bits: u8) -> Self {
        DirectionMask(bits & 0x0f)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: DirectionMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for DirectionMask {
    type Output = DirectionMask;

    fn bitor(self, rhs: DirectionMask) -> DirectionMask {
        DirectionMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for DirectionMask {
    fn bitor_assign(&mut self, rhs: DirectionMask) {
        self.0 |= rhs.0;
    }
}

/// One-shot input actions, drained once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Fire(PlayerId),
    Explode(PlayerId),
    /// Quarter turns, positive = clockwise
    Rotate(PlayerId, i32),
    Save,
    Load,
    Quit,
}

/// Draws one frame
pub trait Renderer {
    fn begin_frame(&mut self);

    /// Scrolling backdrop; `offset_y` runs from -600 up to 0
    fn draw_background(&mut self, _offset_y: f64) {}

    fn draw_entity(&mut self, entity: &Entity);

    fn end_frame(&mut self);
}

/// Plays sound cues without waiting on them
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Polled once per tick
pub trait InputSource {
    fn direction_mask(&mut self, player: PlayerId) -> DirectionMask;

    /// One-shot actions since the last poll
    fn commands(&mut self) -> Vec<Command> {
        Vec::new()
    }
}

/// A single save slot holding both craft positions
pub trait PersistenceStore {
    fn save(&mut self, data: &SaveData) -> Result<(), PersistenceError>;

    fn load(&mut self) -> Result<SaveData, PersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_mask_bits() {
        let mask = DirectionMask::FORWARD | DirectionMask::RIGHT;
        assert_eq!(mask.bits(), 9);
        assert!(mask.contains(DirectionMask::RIGHT));
        assert!(!mask.contains(DirectionMask::LEFT));
        assert!(DirectionMask::NONE.is_empty());
        assert_eq!(DirectionMask::from_bits(0xff).bits(), 0x0f);

        let mut held = DirectionMask::NONE;
        held |= DirectionMask::BACKWARD;
        assert_eq!(held, DirectionMask::BACKWARD);
    }
}
