//! Frame controller
//!
//! Owns the simulation and drives one frame at a time:
//! timers, input, tick, event dispatch, render. Collaborators are borrowed
//! per frame so the same controller runs against real or headless I/O.

pub mod hud;
pub mod timers;

use crate::audio::{AudioManager, SoundCue};
use crate::consts::BACKDROP_HEIGHT;
use crate::persistence::{PersistenceError, SaveData};
use crate::platform::{AudioSink, Command, InputSource, PersistenceStore, Renderer};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GamePhase, GameState, PlayerId, TickInput};
use crate::tuning::Tuning;

pub use hud::{Backdrop, status_line};
pub use timers::{FrameClock, LogicalTimers, TimerId};

/// What the caller should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Running,
    /// Window minimized: timers ran, nothing else did
    Inactive,
    GameOver { loser: PlayerId },
    Quit,
}

/// Per-frame I/O borrowed from the host
pub struct Collaborators<'a> {
    pub input: &'a mut dyn InputSource,
    pub renderer: &'a mut dyn Renderer,
    pub store: &'a mut dyn PersistenceStore,
}

pub struct FrameController {
    state: GameState,
    timers: LogicalTimers,
    clock: FrameClock,
    backdrop: Backdrop,
    audio: AudioManager,
    settings: Settings,
    active: bool,
}

impl FrameController {
    pub fn new(state: GameState, settings: Settings, sink: Box<dyn AudioSink>) -> Self {
        let mut timers = LogicalTimers::new();
        timers.arm(TimerId::SpawnCrate, Tuning::secs(state.tuning.crate_spawn_ms));
        timers.arm(TimerId::SpawnCoin, Tuning::secs(state.tuning.coin_spawn_ms));

        log::info!("New game (seed {})", state.seed);
        Self {
            audio: AudioManager::from_settings(sink, &settings),
            state,
            timers,
            clock: FrameClock::new(),
            backdrop: Backdrop::new(BACKDROP_HEIGHT),
            settings,
            active: true,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Window minimized or restored
    pub fn set_active(&mut self, active: bool) {
        if self.active == active {
            return;
        }
        self.active = active;
        if self.settings.mute_when_inactive {
            self.audio.set_suspended(!active);
        }
        log::debug!("Window {}", if active { "restored" } else { "minimized" });
    }

    pub fn status_line(&self) -> String {
        let fps = self.settings.show_fps.then(|| self.clock.frame_rate());
        status_line(fps, &self.state.progression)
    }

    /// Run one frame of `dt` seconds
    pub fn frame(&mut self, dt: f64, io: Collaborators<'_>) -> FrameOutcome {
        self.clock.tick(dt);
        for id in self.timers.advance(dt) {
            self.on_timer(id);
        }

        if !self.active {
            return FrameOutcome::Inactive;
        }
        if let GamePhase::GameOver { loser } = self.state.phase {
            return FrameOutcome::GameOver { loser };
        }

        let mut input = TickInput::default();
        for id in PlayerId::ALL {
            input.set_direction(id, io.input.direction_mask(id));
        }
        for command in io.input.commands() {
            match command {
                Command::Fire(id) => input.fire[id.index()] = true,
                Command::Explode(id) => input.explode[id.index()] = true,
                Command::Rotate(id, turns) => input.rotate[id.index()] += turns,
                Command::Save => self.save(&mut *io.store),
                Command::Load => self.load(&mut *io.store),
                Command::Quit => {
                    log::info!("Quit requested");
                    return FrameOutcome::Quit;
                }
            }
        }

        let events = sim::tick(&mut self.state, &input, dt);
        for event in events {
            self.dispatch(event);
        }

        self.render(io.renderer);

        match self.state.phase {
            GamePhase::GameOver { loser } => FrameOutcome::GameOver { loser },
            GamePhase::Running => FrameOutcome::Running,
        }
    }

    fn on_timer(&mut self, id: TimerId) {
        match id {
            TimerId::SpawnCrate if !self.state.is_over() => self.state.spawn_crate(),
            TimerId::SpawnCoin if !self.state.is_over() => self.state.spawn_coin(),
            TimerId::SpawnCrate | TimerId::SpawnCoin => {}
            TimerId::Explosion(player) => {
                if !self.state.player_mut(player).advance_explosion() {
                    self.timers.cancel(id);
                    log::trace!("{:?} explosion finished", player);
                }
            }
        }
    }

    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::SpeedStart(_) => self.audio.play(SoundCue::JetStart),
            GameEvent::SpeedStop(_) => self.audio.play(SoundCue::JetStop),
            GameEvent::SpeedLoop(_) => self.audio.play(SoundCue::JetCabin),
            GameEvent::Exploded(player) => {
                self.audio.play(SoundCue::Explosion);
                self.timers.arm(
                    TimerId::Explosion(player),
                    Tuning::secs(self.state.tuning.explosion_frame_ms),
                );
            }
            GameEvent::CrateShot { player, points } => {
                log::debug!("{:?} shot a crate (+{})", player, points);
            }
            GameEvent::CrateHit { player, lives_left } => {
                log::debug!("{:?} hit by a crate, {} lives left", player, lives_left);
            }
            GameEvent::CoinCollected { player, points } => {
                log::debug!("{:?} collected a coin (+{})", player, points);
            }
            GameEvent::HeartDropped => log::debug!("Heart dropped"),
            GameEvent::HeartCollected { player, lives } => {
                log::debug!("{:?} collected a heart, {} lives", player, lives);
            }
            GameEvent::TierReached { player, tier } => {
                log::debug!("{:?} upgraded to {:?}", player, tier);
            }
            GameEvent::GameOver { loser } => {
                log::info!("Game over: {:?} ran out of lives ({})", loser, self.status_line());
            }
        }
    }

    fn render(&mut self, renderer: &mut dyn Renderer) {
        self.backdrop.scroll();

        renderer.begin_frame();
        renderer.draw_background(self.backdrop.offset());
        for actor in &self.state.players {
            renderer.draw_entity(&actor.visible());
        }
        for actor in &self.state.players {
            for bullet in &actor.bullets {
                renderer.draw_entity(bullet);
            }
        }
        for actor in &self.state.players {
            for heart in &actor.hearts {
                renderer.draw_entity(heart);
            }
        }
        for crate_ in &self.state.spawner.crates {
            renderer.draw_entity(crate_);
        }
        for coin in &self.state.spawner.coins {
            renderer.draw_entity(coin);
        }
        renderer.end_frame();
    }

    fn save(&self, store: &mut dyn PersistenceStore) {
        let data = SaveData {
            player_one: self.state.player(PlayerId::One).pos(),
            player_two: self.state.player(PlayerId::Two).pos(),
        };
        if let Err(err) = store.save(&data) {
            log::warn!("Save failed: {err}");
        }
    }

    fn load(&mut self, store: &mut dyn PersistenceStore) {
        match store.load() {
            Ok(data) => {
                self.state.player_mut(PlayerId::One).body.pos = data.player_one;
                self.state.player_mut(PlayerId::Two).body.pos = data.player_two;
            }
            Err(PersistenceError::Empty) => log::info!("Nothing saved yet"),
            Err(err) => log::warn!("Load failed: {err}"),
        }
    }
}
