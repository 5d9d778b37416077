//! Headless input sources

use std::collections::VecDeque;

use super::{Command, DirectionMask, InputSource};
use crate::sim::PlayerId;

/// One tick of scripted input
#[derive(Debug, Clone, Default)]
pub struct ScriptStep {
    pub directions: [DirectionMask; 2],
    pub commands: Vec<Command>,
}

/// Replays a fixed sequence of steps, then holds nothing
///
/// `direction_mask` is polled once per player per tick; `commands` advances
/// to the next step.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    steps: VecDeque<ScriptStep>,
    current: ScriptStep,
}

impl ScriptedInput {
    pub fn new(steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        let mut steps: VecDeque<ScriptStep> = steps.into_iter().collect();
        let current = steps.pop_front().unwrap_or_default();
        Self { steps, current }
    }

    /// Hold `mask` for `player` for `ticks` ticks
    pub fn hold(player: PlayerId, mask: DirectionMask, ticks: usize) -> Self {
        let mut step = ScriptStep::default();
        step.directions[player.index()] = mask;
        Self::new(std::iter::repeat_n(step, ticks))
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl InputSource for ScriptedInput {
    fn direction_mask(&mut self, player: PlayerId) -> DirectionMask {
        self.current.directions[player.index()]
    }

    fn commands(&mut self) -> Vec<Command> {
        let commands = std::mem::take(&mut self.current.commands);
        self.current = self.steps.pop_front().unwrap_or_default();
        commands
    }
}

/// Deterministic attract-mode input for the headless runner
///
/// Each craft sweeps left and right across its half of the field and fires on
/// a fixed cadence.
#[derive(Debug, Clone)]
pub struct DemoInput {
    tick: u64,
    sweep_ticks: u64,
    fire_every: u64,
}

impl DemoInput {
    pub fn new(sweep_ticks: u64, fire_every: u64) -> Self {
        Self {
            tick: 0,
            sweep_ticks: sweep_ticks.max(1),
            fire_every: fire_every.max(1),
        }
    }
}

impl Default for DemoInput {
    fn default() -> Self {
        Self::new(90, 12)
    }
}

impl InputSource for DemoInput {
    fn direction_mask(&mut self, player: PlayerId) -> DirectionMask {
        // Players sweep out of phase with each other
        let phase = self.tick / self.sweep_ticks + player.index() as u64;
        // Thrust for a short burst at the start of each sweep, then coast
        if self.tick % self.sweep_ticks >= 6 {
            return DirectionMask::NONE;
        }
        if phase % 2 == 0 {
            DirectionMask::RIGHT
        } else {
            DirectionMask::LEFT
        }
    }

    fn commands(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        if self.tick % self.fire_every == 0 {
            commands.push(Command::Fire(PlayerId::One));
        }
        if self.tick % self.fire_every == self.fire_every / 2 {
            commands.push(Command::Fire(PlayerId::Two));
        }
        self.tick += 1;
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_advances_per_tick() {
        let mut input = ScriptedInput::new([
            ScriptStep {
                directions: [DirectionMask::LEFT, DirectionMask::NONE],
                commands: vec![Command::Fire(PlayerId::One)],
            },
            ScriptStep {
                directions: [DirectionMask::NONE, DirectionMask::RIGHT],
                commands: vec![],
            },
        ]);

        assert_eq!(input.direction_mask(PlayerId::One), DirectionMask::LEFT);
        assert_eq!(input.commands(), vec![Command::Fire(PlayerId::One)]);
        assert_eq!(input.direction_mask(PlayerId::Two), DirectionMask::RIGHT);
        assert!(input.commands().is_empty());
        // Exhausted: nothing held
        assert_eq!(input.direction_mask(PlayerId::Two), DirectionMask::NONE);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_demo_alternates_fire() {
        let mut input = DemoInput::new(10, 4);
        let fired: Vec<Vec<Command>> = (0..4).map(|_| input.commands()).collect();
        assert_eq!(fired[0], vec![Command::Fire(PlayerId::One)]);
        assert!(fired[1].is_empty());
        assert_eq!(fired[2], vec![Command::Fire(PlayerId::Two)]);
        assert!(fired[3].is_empty());
    }

    #[test]
    fn test_demo_players_sweep_opposite_ways() {
        let mut input = DemoInput::new(10, 4);
        assert_eq!(input.direction_mask(PlayerId::One), DirectionMask::RIGHT);
        assert_eq!(input.direction_mask(PlayerId::Two), DirectionMask::LEFT);
    }
}
