//! Player preferences
//!
//! Persisted separately from the high score under its own storage key.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, KeyValueStore};

/// Game settings/preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Play sound effects and the ambient loop
    pub sound_on: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { sound_on: true }
    }
}

impl Settings {
    /// Flip the sound preference and return the new value
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_on = !self.sound_on;
        self.sound_on
    }

    /// Load settings from the store (defaults if missing or unreadable)
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            sound_on: persistence::load_sound_pref(store),
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        persistence::save_sound_pref(store, self.sound_on);
        log::info!("Settings saved (sound {})", if self.sound_on { "on" } else { "off" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_sound_defaults_on() {
        assert!(Settings::load(&MemoryStore::new()).sound_on);
    }

    #[test]
    fn test_toggle_round_trips_through_store() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::default();
        assert!(!settings.toggle_sound());
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), Settings { sound_on: false });
    }
}
