//! A single configured sound cue.

use std::time::Duration;

use crate::config::ConfigSection;

/// Sound used when a cue doesn't name one.
pub const DEFAULT_SOUND: &str = "ENTITY_PLAYER_LEVELUP";

/// Sound used when the named one is blank.
pub const FALLBACK_SOUND: &str = "CLICK";

/// Length of one tick.
pub const TICK: Duration = Duration::from_millis(50);

/// A named sound with volume, pitch and a delay in ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundCue {
    pub sound: String,
    pub volume: f32,
    pub pitch: f32,
    pub enabled: bool,
    pub delay: u32,
}

impl SoundCue {
    pub fn new(sound: impl Into<String>) -> Self {
        Self {
            sound: sound.into(),
            volume: 1.0,
            pitch: 1.0,
            enabled: true,
            delay: 0,
        }
    }

    /// Read a cue: `sound`, `volume`, `pitch`, `enabled`, `delay`.
    pub fn from_section(section: &ConfigSection, fallback: &str) -> Self {
        let name = section.string("sound", DEFAULT_SOUND).trim().to_uppercase();
        Self {
            sound: if name.is_empty() { fallback.to_string() } else { name },
            volume: section.float("volume", 1.0) as f32,
            pitch: section.float("pitch", 1.0) as f32,
            enabled: section.boolean("enabled", true),
            delay: u32::try_from(section.int("delay", 0).max(0)).unwrap_or(u32::MAX),
        }
    }

    pub fn with_delay(mut self, ticks: u32) -> Self {
        self.delay = ticks;
        self
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }

    /// Delay as wall-clock time.
    pub fn delay_duration(&self) -> Duration {
        TICK * self.delay
    }
}
