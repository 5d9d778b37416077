//! Headless renderers

use super::Renderer;
use crate::sim::{Entity, Sprite};

/// Discards everything
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn begin_frame(&mut self) {}

    fn draw_entity(&mut self, _entity: &Entity) {}

    fn end_frame(&mut self) {}
}

/// Counts what the last frame drew, by kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStats {
    pub frames: u64,
    pub crafts: usize,
    pub explosions: usize,
    pub bullets: usize,
    pub crates: usize,
    pub coins: usize,
    pub hearts: usize,
    pub background_offset: f64,
    in_frame: bool,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total entities drawn in the last frame
    pub fn drawn(&self) -> usize {
        self.crafts + self.explosions + self.bullets + self.crates + self.coins + self.hearts
    }
}

impl Renderer for FrameStats {
    fn begin_frame(&mut self) {
        self.crafts = 0;
        self.explosions = 0;
        self.bullets = 0;
        self.crates = 0;
        self.coins = 0;
        self.hearts = 0;
        self.in_frame = true;
    }

    fn draw_background(&mut self, offset_y: f64) {
        self.background_offset = offset_y;
    }

    fn draw_entity(&mut self, entity: &Entity) {
        debug_assert!(self.in_frame, "draw outside begin/end");
        match entity.sprite {
            Sprite::Plane(_) | Sprite::Rocket(_) | Sprite::Fish | Sprite::Shark => self.crafts += 1,
            Sprite::Explosion { .. } => self.explosions += 1,
            Sprite::Bullet => self.bullets += 1,
            Sprite::Crate => self.crates += 1,
            Sprite::Coin => self.coins += 1,
            Sprite::Heart => self.hearts += 1,
        }
    }

    fn end_frame(&mut self) {
        self.in_frame = false;
        self.frames += 1;
        log::trace!("frame {}: {} entities", self.frames, self.drawn());
    }
}
