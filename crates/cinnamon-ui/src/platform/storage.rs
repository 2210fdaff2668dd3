//! `localStorage` access.

use cinnamon_core::{KeyValueStore, Result};

use crate::error::UiError;
use crate::platform::window;

/// The page origin's `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

fn storage() -> crate::error::Result<web_sys::Storage> {
    window()?
        .local_storage()?
        .ok_or(UiError::StorageUnavailable)
}

impl KeyValueStore for LocalStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        storage()
            .and_then(|s| s.get_item(key).map_err(UiError::from))
            .map_err(|e| e.into_storage("load"))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        storage()
            .and_then(|s| s.set_item(key, value).map_err(UiError::from))
            .map_err(|e| e.into_storage("save"))
    }
}
