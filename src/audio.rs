//! Sound cue dispatch
//!
//! The simulation never plays sound itself; it reports events and the frame
//! controller turns them into cues here. Playback is fire-and-forget through
//! an [`AudioSink`].

use crate::platform::AudioSink;
use crate::settings::Settings;

/// Sound cue identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Engine spools up
    JetStart,
    /// Engine winds down
    JetStop,
    /// Engine loop while moving
    JetCabin,
    /// Craft blew up
    Explosion,
}

impl SoundCue {
    /// Sample file for this cue
    pub fn asset(&self) -> &'static str {
        match self {
            SoundCue::JetStart => "jet-start.wav",
            SoundCue::JetStop => "jet-stop.wav",
            SoundCue::JetCabin => "jet-cabin.wav",
            SoundCue::Explosion => "explosion.wav",
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// Muted because the window is inactive
    suspended: bool,
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            suspended: false,
        }
    }

    pub fn from_settings(sink: Box<dyn AudioSink>, settings: &Settings) -> Self {
        let mut audio = Self::new(sink);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn set_suspended(&mut self, suspended: bool) {
        self.suspended = suspended;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted || self.suspended {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound cue
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(cue, vol);
    }
}

/// Logs cues instead of playing them
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        log::debug!("play {} at {:.2}", cue.asset(), volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<(SoundCue, f32)>>>);

    impl AudioSink for Recorder {
        fn play(&mut self, cue: SoundCue, volume: f32) {
            self.0.borrow_mut().push((cue, volume));
        }
    }

    #[test]
    fn test_volume_and_mute() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(2.0);

        audio.play(SoundCue::JetStart);
        audio.set_muted(true);
        audio.play(SoundCue::JetStop);
        audio.set_muted(false);
        audio.set_suspended(true);
        audio.play(SoundCue::Explosion);

        assert_eq!(*recorder.0.borrow(), vec![(SoundCue::JetStart, 0.5)]);
    }
}
