use asterism_core::{KeyValueStore, StorageError};
use web_sys as web;

/// `window.localStorage`. When the browser refuses access, reads come back
/// empty and writes report an error.
pub struct LocalStore {
    storage: Option<web::Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("[storage] localStorage unavailable; constellations will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| StorageError("localStorage unavailable".into()))?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError(format!("{:?}", e)))
    }
}
