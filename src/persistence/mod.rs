//! Key/value persistence for the two scalars that outlive a session
//!
//! Features:
//! - Host-provided string store (`KeyValueStore`)
//! - In-memory store for native runs and tests
//! - Typed load/save helpers for the high score and sound preference
//!
//! Storage trouble never stops the game: loaders fall back to defaults and
//! savers log, the same way settings and high scores always have.

use std::collections::HashMap;
use std::fmt;

/// Storage key for the best score
pub const HIGH_SCORE_KEY: &str = "demonicSerpent_highscore";
/// Storage key for the sound on/off preference
pub const SOUND_PREF_KEY: &str = "demonicSerpent_sound_on";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    /// The host has no usable store (private mode, blocked storage, ...)
    Unavailable,
    Read { key: String, reason: String },
    Write { key: String, reason: String },
    /// A value was present but could not be parsed
    Malformed { key: String, value: String },
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::Read { key, reason } => write!(f, "failed to read `{key}`: {reason}"),
            Self::Write { key, reason } => write!(f, "failed to write `{key}`: {reason}"),
            Self::Malformed { key, value } => write!(f, "malformed value for `{key}`: {value:?}"),
        }
    }
}

impl std::error::Error for PersistError {}

/// String key/value store provided by the host
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// Process-local store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read the stored high score; absent means 0
pub fn read_high_score(store: &dyn KeyValueStore) -> Result<u64, PersistError> {
    match store.get(HIGH_SCORE_KEY)? {
        None => Ok(0),
        Some(raw) => raw.trim().parse().map_err(|_| PersistError::Malformed {
            key: HIGH_SCORE_KEY.to_string(),
            value: raw,
        }),
    }
}

pub fn write_high_score(store: &mut dyn KeyValueStore, score: u64) -> Result<(), PersistError> {
    store.set(HIGH_SCORE_KEY, &score.to_string())
}

/// Read the stored sound preference; absent means on
pub fn read_sound_pref(store: &dyn KeyValueStore) -> Result<bool, PersistError> {
    match store.get(SOUND_PREF_KEY)? {
        None => Ok(true),
        Some(raw) => serde_json::from_str(raw.trim()).map_err(|_| PersistError::Malformed {
            key: SOUND_PREF_KEY.to_string(),
            value: raw,
        }),
    }
}

pub fn write_sound_pref(store: &mut dyn KeyValueStore, on: bool) -> Result<(), PersistError> {
    store.set(SOUND_PREF_KEY, if on { "true" } else { "false" })
}

/// Load the high score, falling back to 0 on any storage problem
pub fn load_high_score(store: &dyn KeyValueStore) -> u64 {
    read_high_score(store).unwrap_or_else(|e| {
        log::warn!("High score not loaded: {e}");
        0
    })
}

pub fn save_high_score(store: &mut dyn KeyValueStore, score: u64) {
    match write_high_score(store, score) {
        Ok(()) => log::info!("High score saved ({score})"),
        Err(e) => log::warn!("High score not saved: {e}"),
    }
}

/// Load the sound preference, falling back to on
pub fn load_sound_pref(store: &dyn KeyValueStore) -> bool {
    read_sound_pref(store).unwrap_or_else(|e| {
        log::warn!("Sound preference not loaded: {e}");
        true
    })
}

pub fn save_sound_pref(store: &mut dyn KeyValueStore, on: bool) {
    if let Err(e) = write_sound_pref(store, on) {
        log::warn!("Sound preference not saved: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store that refuses everything
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, PersistError> {
            Err(PersistError::Unavailable)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), PersistError> {
            Err(PersistError::Write {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            })
        }
    }

    #[test]
    fn test_defaults_when_empty() {
        let store = MemoryStore::new();
        assert_eq!(read_high_score(&store), Ok(0));
        assert_eq!(read_sound_pref(&store), Ok(true));
    }

    #[test]
    fn test_values_persist_under_fixed_keys() {
        let mut store = MemoryStore::new();
        save_high_score(&mut store, 170);
        save_sound_pref(&mut store, false);
        assert_eq!(store.get(HIGH_SCORE_KEY), Ok(Some("170".to_string())));
        assert_eq!(store.get(SOUND_PREF_KEY), Ok(Some("false".to_string())));
        assert_eq!(load_high_score(&store), 170);
        assert!(!load_sound_pref(&store));
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, "lots").unwrap();
        store.set(SOUND_PREF_KEY, "maybe").unwrap();
        assert!(matches!(
            read_high_score(&store),
            Err(PersistError::Malformed { .. })
        ));
        assert_eq!(load_high_score(&store), 0);
        assert!(load_sound_pref(&store));
    }

    #[test]
    fn test_broken_store_is_not_fatal() {
        let mut store = BrokenStore;
        assert_eq!(load_high_score(&store), 0);
        assert!(load_sound_pref(&store));
        save_high_score(&mut store, 10);
        let err = write_sound_pref(&mut store, true).unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }
}
