//! Sound bank.
//!
//! Loads every catalog sound once at startup. Audio is best-effort: a track
//! that fails to load leaves an empty slot and the tour continues silently
//! for the steps that use it.

use crate::tour::asset_stage::{AssetStage, SoundBuffer};
use crate::tour::config::SoundEntry;

#[derive(Debug, Clone, Default)]
pub struct SoundBank {
    slots: Vec<Option<SoundBuffer>>,
}

impl SoundBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every entry. Never fails; failed slots are `None`.
    pub async fn load_all<A: AssetStage>(stage: &mut A, entries: &[SoundEntry]) -> Self {
        let mut slots = Vec::with_capacity(entries.len());
        for entry in entries {
            match stage.load_sound(entry).await {
                Ok(buffer) => slots.push(Some(buffer)),
                Err(e) => {
                    log::warn!("sound {} unavailable: {e}", entry.id);
                    slots.push(None);
                }
            }
        }
        let loaded = slots.iter().filter(|s| s.is_some()).count();
        log::info!("sound bank ready: {loaded}/{} tracks", entries.len());
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, track: usize) -> Option<&SoundBuffer> {
        self.slots.get(track).and_then(Option::as_ref)
    }

    /// Play `track` if it loaded. Returns whether anything started.
    pub fn play<A: AssetStage>(&self, stage: &mut A, track: usize) -> bool {
        match self.get(track) {
            Some(buffer) => {
                stage.play_sound(buffer);
                true
            }
            None => false,
        }
    }
}
