//! Entities and the ordered collections that own them

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Size;

/// Facing of a craft's base sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Heading {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Heading {
    const ORDER: [Heading; 4] = [Heading::Up, Heading::Right, Heading::Down, Heading::Left];

    /// Rotate by quarter turns (positive = clockwise)
    pub fn rotated(self, quarter_turns: i32) -> Self {
        let idx = Self::ORDER.iter().position(|h| *h == self).unwrap_or(0) as i32;
        Self::ORDER[(idx + quarter_turns).rem_euclid(4) as usize]
    }
}

/// What the renderer should draw for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sprite {
    Plane(Heading),
    Rocket(Heading),
    /// Tier 1 craft
    Fish,
    /// Tier 2 craft
    Shark,
    Bullet,
    Crate,
    Coin,
    Heart,
    Explosion { frame: u32 },
}

/// A positioned, moving visual object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub pos: DVec2,
    pub vel: DVec2,
    pub width: f64,
    pub height: f64,
    pub sprite: Sprite,
}

impl Entity {
    pub fn new(sprite: Sprite, pos: DVec2, vel: DVec2, size: Size) -> Self {
        Self {
            pos,
            vel,
            width: size.width,
            height: size.height,
            sprite,
        }
    }

    /// Integrate position
    #[inline]
    pub fn advance(&mut self, dt: f64) {
        self.pos += self.vel * dt;
    }

    /// Two-circle overlap on width only; touching counts
    #[inline]
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.pos.distance(other.pos) <= (self.width + other.width) / 2.0
    }
}

/// Ordered, gap-free sequence of entities
///
/// Removal shifts later elements down immediately, so indices always refer to
/// live entities and iteration order is stable between passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitySet {
    items: Vec<Entity>,
}

impl EntitySet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, entity: Entity) {
        self.items.push(entity);
    }

    /// Replace the whole collection
    pub fn replace(&mut self, items: Vec<Entity>) {
        self.items = items;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Entity> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.items
    }

    /// Remove and compact
    pub fn remove(&mut self, index: usize) -> Entity {
        self.items.remove(index)
    }

    /// Index of the first entity overlapping `other`
    pub fn first_overlap(&self, other: &Entity) -> Option<usize> {
        self.items.iter().position(|e| e.overlaps(other))
    }

    /// Remove every entity overlapping `other`, returning how many went
    pub fn remove_overlapping(&mut self, other: &Entity) -> usize {
        let before = self.items.len();
        self.items.retain(|e| !e.overlaps(other));
        before - self.items.len()
    }

    /// Advance every entity and drop the ones `out_of_bounds` rejects
    pub fn advance(&mut self, dt: f64, out_of_bounds: impl Fn(&Entity) -> bool) -> usize {
        for entity in &mut self.items {
            entity.advance(dt);
        }
        let before = self.items.len();
        self.items.retain(|e| !out_of_bounds(e));
        before - self.items.len()
    }
}

impl<'a> IntoIterator for &'a EntitySet {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn blob(x: f64, y: f64, width: f64) -> Entity {
        Entity::new(
            Sprite::Crate,
            DVec2::new(x, y),
            DVec2::ZERO,
            Size { width, height: width },
        )
    }

    #[test]
    fn test_overlap_is_inclusive() {
        let a = blob(0.0, 0.0, 8.0);
        let b = blob(36.0, 0.0, 64.0);
        // (8 + 64) / 2 = 36 exactly
        assert!(a.overlaps(&b));

        let c = blob(36.001, 0.0, 64.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_overlap_ignores_height() {
        let mut a = blob(0.0, 0.0, 10.0);
        a.height = 500.0;
        let b = blob(0.0, 100.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_advance_integrates_and_culls() {
        let mut set = EntitySet::new();
        let mut fast = blob(10.0, 10.0, 4.0);
        fast.vel = DVec2::new(0.0, -100.0);
        set.push(fast);
        set.push(blob(20.0, 20.0, 4.0));

        let removed = set.advance(0.5, |e| e.pos.y < 0.0);
        assert_eq!(removed, 1);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0).map(|e| e.pos.x), Some(20.0));
    }

    #[test]
    fn test_heading_rotation_wraps() {
        assert_eq!(Heading::Up.rotated(1), Heading::Right);
        assert_eq!(Heading::Up.rotated(-1), Heading::Left);
        assert_eq!(Heading::Left.rotated(1), Heading::Up);
        assert_eq!(Heading::Down.rotated(6), Heading::Up);
    }

    proptest! {
        #[test]
        fn prop_remove_overlapping_compacts(
            xs in prop::collection::vec(0.0f64..200.0, 0..40),
            probe_x in 0.0f64..200.0,
        ) {
            let mut set = EntitySet::new();
            for x in &xs {
                set.push(blob(*x, 0.0, 10.0));
            }
            let probe = blob(probe_x, 0.0, 10.0);
            let expected: Vec<f64> = xs
                .iter()
                .copied()
                .filter(|x| (x - probe_x).abs() > 10.0)
                .collect();

            let removed = set.remove_overlapping(&probe);

            prop_assert_eq!(removed, xs.len() - expected.len());
            let remaining: Vec<f64> = set.iter().map(|e| e.pos.x).collect();
            prop_assert_eq!(remaining, expected);
        }
    }
}
