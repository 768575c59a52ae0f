//! `localStorage` access

use stakepool_core::{KeyValueStore, SessionError, SessionResult};
use web_sys::Storage;

fn local_storage() -> SessionResult<Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| SessionError::storage("localStorage unavailable"))
}

/// Raw string access to `localStorage`. Values are stored verbatim, not
/// JSON-encoded, because other scripts on the origin share these keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        local_storage()?
            .set_item(key, value)
            .map_err(|_| SessionError::storage(format!("could not write {key}")))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        local_storage()?
            .get_item(key)
            .map_err(|_| SessionError::storage(format!("could not read {key}")))
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        local_storage()?
            .remove_item(key)
            .map_err(|_| SessionError::storage(format!("could not remove {key}")))
    }
}
