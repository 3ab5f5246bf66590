//! Browser `localStorage` store

use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::persistence::{KeyValueStore, PersistError};

/// `KeyValueStore` over `window.localStorage`.
///
/// Storage may be missing entirely (private mode, sandboxed iframes); every
/// operation then reports `Unavailable` and the game keeps its defaults.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("localStorage unavailable - scores will not persist");
        }
        Self { storage }
    }
}

fn describe(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        let storage = self.storage.as_ref().ok_or(PersistError::Unavailable)?;
        storage.get_item(key).map_err(|e| PersistError::Read {
            key: key.to_string(),
            reason: describe(e),
        })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        let storage = self.storage.as_ref().ok_or(PersistError::Unavailable)?;
        storage.set_item(key, value).map_err(|e| PersistError::Write {
            key: key.to_string(),
            reason: describe(e),
        })
    }
}
