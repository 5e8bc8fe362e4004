//! `localStorage` as a [`PreferenceStore`].
//!
//! Values are stored raw (`light`/`dark`), not JSON encoded, so pages that
//! already persisted a theme keep it.

use std::rc::Rc;

use folio_core::{FolioError, FolioResult, MemoryStore, PreferenceStore};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Persistent store backed by `window.localStorage`.
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// Opens the local storage of the current window.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Storage`] when storage is disabled or denied.
    pub fn open() -> FolioResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| FolioError::Storage("no window".to_owned()))?;
        let storage = window
            .local_storage()
            .map_err(|err| storage_error(&err))?
            .ok_or_else(|| FolioError::Storage("localStorage disabled".to_owned()))?;
        Ok(Self { storage })
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> FolioResult<Option<String>> {
        self.storage.get_item(key).map_err(|err| storage_error(&err))
    }

    fn set(&self, key: &str, value: &str) -> FolioResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|err| storage_error(&err))
    }
}

/// Opens local storage, or falls back to a session-only store.
#[must_use]
pub fn preference_store() -> Rc<dyn PreferenceStore> {
    match LocalStorageStore::open() {
        Ok(store) => Rc::new(store),
        Err(err) => {
            tracing::warn!("{err}, theme choice will not persist");
            Rc::new(MemoryStore::new())
        }
    }
}

fn storage_error(err: &JsValue) -> FolioError {
    FolioError::Storage(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
