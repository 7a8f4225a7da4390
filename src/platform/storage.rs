//! LocalStorage save backend

use web_sys::Storage;

use crate::persistence::{SaveError, SaveStore};

/// Browser LocalStorage; a missing or blocked storage reads as empty
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, saves will fail");
        }
        Self { storage }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl SaveStore for LocalStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| SaveError::Storage("no LocalStorage".into()))?;
        storage
            .set_item(key, value)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.remove_item(key);
        }
    }
}
