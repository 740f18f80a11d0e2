//! Sound cues and their deferred playback.

pub mod cue;
pub mod player;
pub mod scheduler;

pub use cue::{SoundCue, DEFAULT_SOUND, FALLBACK_SOUND, TICK};
pub use player::SoundPlayer;
pub use scheduler::{ImmediateScheduler, Scheduler, Task, TokioScheduler};
