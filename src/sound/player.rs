//! Groups of sound cues played together.

use std::sync::Arc;

use tracing::debug;

use crate::config::{ConfigSection, SOUNDS_DOCUMENT};
use crate::platform::Sender;
use crate::sound::cue::{SoundCue, FALLBACK_SOUND};
use crate::sound::scheduler::Scheduler;
use crate::template::Templates;

/// An ordered group of sound cues.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoundPlayer {
    cues: Vec<SoundCue>,
}

impl SoundPlayer {
    /// Cues sorted by ascending delay; equal delays keep their order.
    pub fn from_cues(cues: impl IntoIterator<Item = SoundCue>) -> Self {
        let mut cues: Vec<SoundCue> = cues.into_iter().collect();
        cues.sort_by_key(|cue| cue.delay);
        Self { cues }
    }

    /// Read a group section: `enabled` plus cues under `sounds`.
    pub fn from_section(section: &ConfigSection) -> Self {
        if !section.boolean("enabled", true) {
            return Self::default();
        }
        let Some(cues) = section.section("sounds") else {
            return Self::default();
        };
        Self::from_cues(cues.keys().into_iter().filter_map(|key| {
            cues.section(&key)
                .map(|cue| SoundCue::from_section(&cue, FALLBACK_SOUND))
        }))
    }

    /// Read group `node` of the `sounds` document. Missing groups are silent.
    pub fn from_config(templates: &Templates, node: &str) -> Self {
        match templates.document(SOUNDS_DOCUMENT).section(node) {
            Some(section) => Self::from_section(&section),
            None => {
                debug!("No sound group '{}'", node);
                Self::default()
            }
        }
    }

    pub fn cues(&self) -> &[SoundCue] {
        &self.cues
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Schedule every enabled cue for `recipients`.
    ///
    /// Each cue's delay counts from this call, not from the previous cue.
    pub fn play_to(&self, recipients: &[Arc<dyn Sender>], scheduler: &dyn Scheduler) {
        if recipients.is_empty() {
            return;
        }
        for cue in self.cues.iter().filter(|cue| cue.enabled) {
            let cue = cue.clone();
            let recipients = recipients.to_vec();
            scheduler.schedule(
                cue.delay_duration(),
                Box::new(move || {
                    for recipient in &recipients {
                        recipient.play_sound(&cue);
                    }
                }),
            );
        }
    }
}
