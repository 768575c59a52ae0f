//! Cached customer selection

use crate::error::SessionResult;
use tracing::{debug, warn};

/// Synchronous string store, backed by `localStorage` in the browser
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    fn get(&self, key: &str) -> SessionResult<Option<String>>;
    fn remove(&self, key: &str) -> SessionResult<()>;
}

/// Identifier of the customer whose wallet is selected
pub fn selected_customer(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value.filter(|id| !id.is_empty()),
        Err(err) => {
            warn!("Could not read customer selection: {err}");
            None
        }
    }
}

/// Drop the cached customer. Failures are logged; logout continues.
pub fn clear_customer_selection(store: &dyn KeyValueStore, key: &str) {
    match store.remove(key) {
        Ok(()) => debug!("Cleared customer selection {key:?}"),
        Err(err) => warn!("Could not clear customer selection: {err}"),
    }
}
