//! Audio playback for the [`Sound`] requests the world queues each tick.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use kira::{
    StartTime, Volume,
    manager::{AudioManager, AudioManagerSettings, backend::DefaultBackend},
    sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    tween::Tween,
};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::world::{Sound, SoundName, WorldAction};

/// Where sound requests go. Playback is best-effort: implementations swallow
/// their own failures.
pub trait AudioSink {
    fn play(&mut self, sound: &Sound);
    fn clear_channel(&mut self, channel: usize);
    fn clear_all(&mut self);

    /// Apply the audio side of a world action. Loading a level silences every
    /// channel first.
    fn dispatch(&mut self, action: &WorldAction) {
        match action {
            WorldAction::LoadLevel(_) => self.clear_all(),
            WorldAction::PlaySounds(sounds) => {
                for sound in sounds {
                    self.play(sound);
                }
            }
        }
    }
}

/// Discards everything. Used when audio is disabled or unavailable.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _sound: &Sound) {}
    fn clear_channel(&mut self, _channel: usize) {}
    fn clear_all(&mut self) {}
}

pub struct AudioContext {
    /// `None` when no audio device could be opened.
    manager: Option<AudioManager>,
    sounds: HashMap<SoundName, StaticSoundData>,
    /// Looping players, one per channel.
    channels: HashMap<usize, StaticSoundHandle>,
}

impl AudioContext {
    pub fn new() -> Self {
        let manager = match AudioManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(m) => Some(m),
            Err(e) => {
                warn!("failed to initialize audio manager: {e}, audio disabled");
                None
            }
        };
        Self { manager, sounds: HashMap::new(), channels: HashMap::new() }
    }

    pub fn is_available(&self) -> bool { self.manager.is_some() }

    /// Load every audio file under `folder` whose stem names a [`SoundName`].
    pub fn load_folder(&mut self, folder: &Path) {
        for entry in WalkDir::new(folder).into_iter().filter_map(Result::ok) {
            let path = entry.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else { continue };
            let Some(&name) = SoundName::ALL.iter().find(|n| n.name() == stem) else { continue };
            match StaticSoundData::from_file(path) {
                Ok(data) => {
                    self.sounds.insert(name, data);
                }
                Err(e) => warn!(path = %path.display(), "failed to load sound: {e}"),
            }
        }
        info!(loaded = self.sounds.len(), folder = %folder.display(), "sounds loaded");
    }
}

impl Default for AudioContext {
    fn default() -> Self { Self::new() }
}

impl AudioSink for AudioContext {
    fn play(&mut self, sound: &Sound) {
        let Some(name) = sound.name else {
            if let Some(channel) = sound.channel {
                self.clear_channel(channel);
            }
            return;
        };
        let Some(manager) = self.manager.as_mut() else { return };
        let Some(data) = self.sounds.get(&name) else {
            debug!(sound = name.name(), "sound not loaded");
            return;
        };

        let mut settings = StaticSoundSettings::new();
        settings.volume = Volume::Amplitude(sound.volume.clamp(0.0, 1.0)).into();
        // Kira pans from 0 (left) to 1 (right).
        settings.panning = ((sound.pan.clamp(-1.0, 1.0) + 1.0) / 2.0).into();
        if sound.delay > 0.0 {
            settings.start_time = StartTime::Delayed(Duration::from_secs_f64(sound.delay));
        }
        if sound.channel.is_some() {
            settings = settings.loop_region(0.0..);
        }

        match manager.play(data.clone().with_settings(settings)) {
            Ok(handle) => {
                if let Some(channel) = sound.channel {
                    if let Some(mut previous) = self.channels.insert(channel, handle) {
                        let _ = previous.stop(Tween::default());
                    }
                }
            }
            Err(e) => warn!(sound = name.name(), "failed to play sound: {e}"),
        }
    }

    fn clear_channel(&mut self, channel: usize) {
        if let Some(mut handle) = self.channels.remove(&channel) {
            let _ = handle.stop(Tween::default());
        }
    }

    fn clear_all(&mut self) {
        for (_, mut handle) in self.channels.drain() {
            let _ = handle.stop(Tween::default());
        }
    }
}
